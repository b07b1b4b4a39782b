use std::collections::VecDeque;

use super::strategy::SelectionStrategy;
use crate::host::Host;

/// Hosts with a load strictly below this value are picked without comparing loads
pub const DEFAULT_LOAD_THRESHOLD: f64 = 0.75;

/// Least-loaded selection with a threshold shortcut.
///
/// Scans the pool in its current order and takes the first host under the
/// threshold. When every host is at or above it, the least loaded host wins,
/// ties going to the first one in pool order. Never reorders the pool.
#[derive(Debug, Clone, Copy)]
pub struct OptimizedStrategy {
    threshold: f64,
}

impl OptimizedStrategy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for OptimizedStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_THRESHOLD)
    }
}

impl SelectionStrategy for OptimizedStrategy {
    fn pick_host(&self, hosts: &mut VecDeque<Host>) -> Option<usize> {
        if hosts.is_empty() {
            return None;
        }

        if let Some(index) = hosts.iter().position(|h| h.load() < self.threshold) {
            return Some(index);
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, host) in hosts.iter().enumerate() {
            let load = host.load();
            match best {
                None => best = Some((index, load)),
                Some((_, best_load)) if load < best_load => best = Some((index, load)),
                _ => {}
            }
        }

        best.map(|(index, _)| index)
    }
}
