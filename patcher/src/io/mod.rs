//! Side-effecting operations: filesystem access for documents and plans.

pub mod document;
pub mod plan;
