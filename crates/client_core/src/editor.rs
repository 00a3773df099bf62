//! Product list editor: the view state behind the product page and the
//! transitions that decide which requests go to the backend.
//!
//! The editor never performs I/O. Every transition returns the [`Request`]s the
//! caller must execute; their results come back as [`EditorEvent::Completed`].

use std::{collections::HashMap, fmt, str::FromStr};

use serde::Deserialize;
use shared::{
    domain::{Product, ProductId},
    protocol::ProductPayload,
};
use tracing::debug;

use crate::pricing::{parse_price, price_to_form_text};

/// Raw user input backing the create/update form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl FormState {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description_or_empty().to_string(),
            price: price_to_form_text(product.price),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.description.is_empty() && self.price.is_empty()
    }

    pub fn to_payload(&self) -> ProductPayload {
        ProductPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            price: parse_price(&self.price),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditingTarget {
    /// Next submission creates a product.
    #[default]
    None,
    /// Next submission updates this product.
    Product(ProductId),
}

impl EditingTarget {
    pub fn product_id(self) -> Option<ProductId> {
        match self {
            Self::None => None,
            Self::Product(id) => Some(id),
        }
    }
}

/// How local state is reconciled once a mutation completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPolicy {
    /// Re-fetch the whole collection after every create, update or delete.
    #[default]
    Refetch,
    /// Apply the server's response locally; re-fetch only when a mutation fails.
    ApplyResponse,
}

impl FromStr for SyncPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "refetch" => Ok(Self::Refetch),
            "apply_response" => Ok(Self::ApplyResponse),
            other => Err(format!(
                "unknown sync policy '{other}' (expected 'refetch' or 'apply_response')"
            )),
        }
    }
}

impl fmt::Display for SyncPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refetch => f.write_str("refetch"),
            Self::ApplyResponse => f.write_str("apply_response"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Warning,
    Error,
}

/// Dismissible message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl Notice {
    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    FetchAll,
    Create(ProductPayload),
    Update {
        id: ProductId,
        payload: ProductPayload,
    },
    Delete(ProductId),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchAll => "fetch_all",
            Self::Create(_) => "create",
            Self::Update { .. } => "update",
            Self::Delete(_) => "delete",
        }
    }

    fn failure_message(&self, reason: &str) -> String {
        match self {
            Self::FetchAll => format!("Could not load products: {reason}"),
            Self::Create(payload) => format!("Could not create '{}': {reason}", payload.name),
            Self::Update { id, .. } => format!("Could not update product #{}: {reason}", id.0),
            Self::Delete(id) => format!("Could not delete product #{}: {reason}", id.0),
        }
    }
}

/// A request the caller must send; `seq` increases with every request issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub seq: u64,
    pub operation: Operation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Listed(Vec<Product>),
    Saved(Product),
    Deleted,
}

/// Outcome of a [`Request`]. Failures are reduced to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub seq: u64,
    pub result: Result<Reply, String>,
}

#[derive(Debug, Clone)]
pub enum EditorEvent {
    Mounted,
    Refresh,
    StartEdit(Product),
    CancelEdit,
    Submit,
    Delete(ProductId),
    DismissNotice,
    Completed(Completion),
}

#[derive(Debug)]
pub struct ProductListEditor {
    products: Vec<Product>,
    form: FormState,
    target: EditingTarget,
    policy: SyncPolicy,
    notice: Option<Notice>,
    next_seq: u64,
    in_flight: HashMap<u64, Operation>,
    // Seq of the newest listing applied to `products`.
    listing_seq: u64,
    // Seq of the newest mutation patched into `products` locally.
    patched_seq: u64,
}

impl Default for ProductListEditor {
    fn default() -> Self {
        Self::new(SyncPolicy::default())
    }
}

impl ProductListEditor {
    pub fn new(policy: SyncPolicy) -> Self {
        Self {
            products: Vec::new(),
            form: FormState::default(),
            target: EditingTarget::None,
            policy,
            notice: None,
            next_seq: 1,
            in_flight: HashMap::new(),
            listing_seq: 0,
            patched_seq: 0,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn target(&self) -> EditingTarget {
        self.target
    }

    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn apply(&mut self, event: EditorEvent) -> Vec<Request> {
        match event {
            EditorEvent::Mounted | EditorEvent::Refresh => self.fetch_all(),
            EditorEvent::StartEdit(product) => {
                self.start_edit(&product);
                Vec::new()
            }
            EditorEvent::CancelEdit => {
                self.cancel_edit();
                Vec::new()
            }
            EditorEvent::Submit => self.submit(),
            EditorEvent::Delete(id) => self.delete(id),
            EditorEvent::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
            EditorEvent::Completed(completion) => self.complete(completion),
        }
    }

    pub fn fetch_all(&mut self) -> Vec<Request> {
        vec![self.issue(Operation::FetchAll)]
    }

    pub fn start_edit(&mut self, product: &Product) {
        self.form = FormState::from_product(product);
        self.target = EditingTarget::Product(product.id);
    }

    pub fn cancel_edit(&mut self) {
        self.form = FormState::default();
        self.target = EditingTarget::None;
    }

    pub fn submit(&mut self) -> Vec<Request> {
        if self.form.name.trim().is_empty() {
            self.notice = Some(Notice::warning("Name is required."));
            return Vec::new();
        }

        let payload = self.form.to_payload();
        let operation = match self.target {
            EditingTarget::None => Operation::Create(payload),
            EditingTarget::Product(id) => Operation::Update { id, payload },
        };

        // No rollback on failure: the form is consumed by the submission.
        self.form = FormState::default();
        self.target = EditingTarget::None;
        self.notice = None;
        vec![self.issue(operation)]
    }

    /// Leaves the editing target alone, even when `id` is being edited.
    pub fn delete(&mut self, id: ProductId) -> Vec<Request> {
        self.notice = None;
        vec![self.issue(Operation::Delete(id))]
    }

    pub fn complete(&mut self, completion: Completion) -> Vec<Request> {
        let Completion { seq, result } = completion;
        let Some(operation) = self.in_flight.remove(&seq) else {
            debug!(seq, "ignoring completion for unknown request");
            return Vec::new();
        };

        let reply = match result {
            Ok(reply) => reply,
            Err(reason) => {
                self.notice = Some(Notice::error(operation.failure_message(&reason)));
                return match operation {
                    Operation::FetchAll => Vec::new(),
                    _ => self.fetch_all(),
                };
            }
        };

        match (operation, reply) {
            (Operation::FetchAll, Reply::Listed(products)) => {
                self.replace_collection(seq, products)
            }
            (Operation::FetchAll, other) => {
                debug!(seq, ?other, "listing completed with a non-listing reply");
                Vec::new()
            }
            (operation, reply) => match self.policy {
                SyncPolicy::Refetch => self.fetch_all(),
                SyncPolicy::ApplyResponse => self.apply_reply(seq, &operation, reply),
            },
        }
    }

    fn issue(&mut self, operation: Operation) -> Request {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight.insert(seq, operation.clone());
        Request { seq, operation }
    }

    fn replace_collection(&mut self, seq: u64, products: Vec<Product>) -> Vec<Request> {
        if seq <= self.listing_seq {
            debug!(
                seq,
                listing_seq = self.listing_seq,
                "dropping stale product listing"
            );
            return Vec::new();
        }
        self.products = products;
        self.listing_seq = seq;

        // The listing was requested before a mutation we already patched in,
        // so it may not contain that mutation.
        if seq < self.patched_seq {
            return self.fetch_all();
        }
        Vec::new()
    }

    fn apply_reply(&mut self, seq: u64, operation: &Operation, reply: Reply) -> Vec<Request> {
        match (operation, reply) {
            (Operation::Create(_) | Operation::Update { .. }, Reply::Saved(product)) => {
                match self.products.iter_mut().find(|p| p.id == product.id) {
                    Some(existing) => *existing = product,
                    None => self.products.push(product),
                }
            }
            (Operation::Delete(id), Reply::Deleted) => {
                self.products.retain(|p| p.id != *id);
            }
            (operation, reply) => {
                debug!(
                    seq,
                    operation = operation.name(),
                    ?reply,
                    "reply does not match operation; re-fetching"
                );
                return self.fetch_all();
            }
        }
        self.patched_seq = self.patched_seq.max(seq);
        Vec::new()
    }
}

#[cfg(test)]
#[path = "tests/editor_tests.rs"]
mod tests;
