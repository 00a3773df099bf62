pub mod api;
pub mod editor;
pub mod error;
pub mod pricing;
pub mod session;

pub use api::{HttpProductApi, ProductApi, DEFAULT_API_URL};
pub use editor::{
    Completion, EditingTarget, EditorEvent, FormState, Notice, NoticeSeverity, Operation,
    ProductListEditor, Reply, Request, SyncPolicy,
};
pub use error::ClientError;
pub use session::{perform, EditorSession};
