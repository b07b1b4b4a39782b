use serde::{Deserialize, Serialize};

/// A single simulated request.
///
/// The payload is opaque to the dispatcher; only the sequence number is used,
/// for tracing and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    id: u64,
}

impl Request {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}
