use serde::{Deserialize, Serialize};

use crate::host::{HostId, HostSnapshot};
use crate::policy::Policy;

/// One dispatched request and the pool state right after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    pub request: u64,
    pub host: HostId,
    pub hosts: Vec<HostSnapshot>,
}

/// A run of consecutive dispatches under a single policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseReport {
    pub policy: Policy,
    pub initial: Vec<HostSnapshot>,
    pub dispatches: Vec<DispatchRecord>,
}

impl PhaseReport {
    pub fn new(policy: Policy, initial: Vec<HostSnapshot>) -> Self {
        Self {
            policy,
            initial,
            dispatches: Vec::new(),
        }
    }

    /// Pool state at the end of the phase
    pub fn final_hosts(&self) -> &[HostSnapshot] {
        self.dispatches
            .last()
            .map(|d| d.hosts.as_slice())
            .unwrap_or(self.initial.as_slice())
    }

    /// Number of requests each host served during the phase, in id order
    pub fn served_counts(&self) -> Vec<(HostId, usize)> {
        let mut counts: Vec<(HostId, usize)> = self.initial.iter().map(|h| (h.id, 0)).collect();
        counts.sort_by_key(|(id, _)| *id);
        for record in &self.dispatches {
            if let Ok(pos) = counts.binary_search_by_key(&record.host, |(id, _)| *id) {
                counts[pos].1 += 1;
            }
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub sequential: PhaseReport,
    pub optimized: PhaseReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: HostId, load: f64) -> HostSnapshot {
        HostSnapshot { id, load }
    }

    #[test]
    fn test_final_hosts_without_dispatches() {
        let phase = PhaseReport::new(Policy::Sequential, vec![snapshot(1, 0.6)]);
        assert_eq!(phase.final_hosts(), &[snapshot(1, 0.6)]);
    }

    #[test]
    fn test_served_counts() {
        let mut phase = PhaseReport::new(
            Policy::Optimized,
            vec![snapshot(2, 0.6), snapshot(1, 0.6)],
        );
        for (request, host) in [(1, 2), (2, 2), (3, 1)] {
            phase.dispatches.push(DispatchRecord {
                request,
                host,
                hosts: Vec::new(),
            });
        }
        assert_eq!(phase.served_counts(), vec![(1, 1), (2, 2)]);
    }
}
