//! Routing of editor requests from UI actions to the backend command queue.

use std::collections::VecDeque;

use client_core::{Completion, EditorEvent, ProductListEditor, Request};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

/// Queues `cmd` without blocking the UI thread. On failure the status line is
/// updated and the error is returned.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();
    let err = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            return Ok(());
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            UiError::from_message(
                UiErrorContext::CommandQueue,
                "command queue is full; please retry",
            )
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            UiError::from_message(
                UiErrorContext::CommandQueue,
                "backend worker disconnected; restart the app",
            )
        }
    };
    *status = err.status_line();
    Err(err)
}

/// Applies `event` to the editor and queues every request it issues. A request
/// that cannot be queued is completed as failed right away so the editor never
/// waits on it.
pub fn apply_editor_event(
    editor: &mut ProductListEditor,
    cmd_tx: &Sender<BackendCommand>,
    event: EditorEvent,
    status: &mut String,
) {
    let mut pending: VecDeque<Request> = editor.apply(event).into();
    while let Some(request) = pending.pop_front() {
        let seq = request.seq;
        if let Err(err) =
            dispatch_backend_command(cmd_tx, BackendCommand::Perform(request), status)
        {
            pending.extend(editor.apply(EditorEvent::Completed(Completion {
                seq,
                result: Err(err.message().to_string()),
            })));
        }
    }
}
