use std::collections::VecDeque;

use shared::domain::{Product, ProductId};
use tracing::{debug, warn};

use crate::{
    api::ProductApi,
    editor::{
        Completion, EditorEvent, FormState, Operation, ProductListEditor, Reply, Request,
        SyncPolicy,
    },
};

/// Executes one editor request against `api`. Failures are logged here and
/// handed back to the editor as a message.
pub async fn perform<A>(api: &A, request: &Request) -> Completion
where
    A: ProductApi + ?Sized,
{
    let operation = request.operation.name();
    debug!(seq = request.seq, operation, "sending product request");

    let result = match &request.operation {
        Operation::FetchAll => api.list_products().await.map(Reply::Listed),
        Operation::Create(payload) => api.create_product(payload).await.map(Reply::Saved),
        Operation::Update { id, payload } => {
            api.update_product(*id, payload).await.map(Reply::Saved)
        }
        Operation::Delete(id) => api.delete_product(*id).await.map(|()| Reply::Deleted),
    };

    let result = result.map_err(|err| {
        warn!(
            seq = request.seq,
            operation,
            status = err.status().map(|status| status.as_u16()),
            error = %err,
            "product request failed"
        );
        err.to_string()
    });

    Completion {
        seq: request.seq,
        result,
    }
}

/// Drives a [`ProductListEditor`] against an API without a UI. Requests run
/// one at a time, in issue order, until the editor stops asking for more.
pub struct EditorSession<A: ProductApi> {
    api: A,
    editor: ProductListEditor,
}

impl<A: ProductApi> EditorSession<A> {
    pub fn new(api: A, policy: SyncPolicy) -> Self {
        Self {
            api,
            editor: ProductListEditor::new(policy),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn editor(&self) -> &ProductListEditor {
        &self.editor
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        self.editor.form_mut()
    }

    pub async fn dispatch(&mut self, event: EditorEvent) {
        let mut pending: VecDeque<Request> = self.editor.apply(event).into();
        while let Some(request) = pending.pop_front() {
            let completion = perform(&self.api, &request).await;
            pending.extend(self.editor.apply(EditorEvent::Completed(completion)));
        }
    }

    pub async fn mount(&mut self) {
        self.dispatch(EditorEvent::Mounted).await;
    }

    pub async fn fetch_all(&mut self) {
        self.dispatch(EditorEvent::Refresh).await;
    }

    pub async fn start_edit(&mut self, product: &Product) {
        self.dispatch(EditorEvent::StartEdit(product.clone())).await;
    }

    pub async fn cancel_edit(&mut self) {
        self.dispatch(EditorEvent::CancelEdit).await;
    }

    pub async fn submit(&mut self) {
        self.dispatch(EditorEvent::Submit).await;
    }

    pub async fn delete(&mut self, id: ProductId) {
        self.dispatch(EditorEvent::Delete(id)).await;
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
