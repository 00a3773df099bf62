//! Backend commands queued from UI to backend worker.

use client_core::Request;

pub enum BackendCommand {
    /// Send one editor request to the products API and report its completion.
    Perform(Request),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Perform(request) => request.operation.name(),
        }
    }
}
