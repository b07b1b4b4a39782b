use std::collections::VecDeque;

use super::strategy::SelectionStrategy;
use crate::host::Host;

/// Round-robin selection by rotating the pool itself.
///
/// The front host is served and moved to the back, so the pool order is the
/// only rotation state and replacing the pool restarts the cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialStrategy;

impl SequentialStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionStrategy for SequentialStrategy {
    fn pick_host(&self, hosts: &mut VecDeque<Host>) -> Option<usize> {
        if hosts.is_empty() {
            return None;
        }
        hosts.rotate_left(1);
        Some(hosts.len() - 1)
    }
}
