//! UI/backend events and error modeling for the desktop GUI controller.

use client_core::Completion;

pub enum UiEvent {
    Info(String),
    Completed(Completion),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    /// The UI could not reach the backend worker.
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("queue is full")
            || message_lower.contains("disconnected")
            || message_lower.contains("timed out")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Short prefix for the status bar.
    pub fn label(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Transport => "Backend unreachable",
            UiErrorCategory::Unknown => "Error",
        }
    }

    pub fn status_line(&self) -> String {
        format!("{}: {}", self.label(), self.message)
    }
}
