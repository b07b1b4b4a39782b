use std::collections::VecDeque;

use crate::host::Host;

/// Trait for abstracting host selection strategies
pub trait SelectionStrategy: Send + Sync {
    /// Picks the host that serves the next request.
    ///
    /// Returns the index of that host in `hosts` as the pool stands once the
    /// call returns, since a strategy may reorder the pool. `None` only for an
    /// empty pool.
    fn pick_host(&self, hosts: &mut VecDeque<Host>) -> Option<usize>;
}
