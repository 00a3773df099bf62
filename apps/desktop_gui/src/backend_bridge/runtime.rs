//! Backend worker: owns the tokio runtime and the HTTP client, executes
//! queued requests one at a time and reports completions back to the UI.

use std::thread::{self, JoinHandle};

use client_core::{perform, HttpProductApi};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    api: HttpProductApi,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!(api_url = %api.base_url(), "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Backend worker ready ({})",
                api.base_url()
            )));

            // Requests run strictly in queue order, so completions reach the
            // UI in the order the editor issued them.
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Perform(request) => {
                        let completion = perform(&api, &request).await;
                        if ui_tx.send(UiEvent::Completed(completion)).is_err() {
                            tracing::debug!("ui event queue closed; stopping backend worker");
                            break;
                        }
                    }
                }
            }
            tracing::info!("backend worker stopped");
        });
    })
}
