//! Controller layer: UI events, error modeling, and routing editor requests to the backend queue.

pub mod events;
pub mod orchestration;
