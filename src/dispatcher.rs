use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, warn};

use crate::error::{DispatchError, Result};
use crate::host::{Host, HostId, HostSnapshot};
use crate::policy::Policy;
use crate::request::Request;
use crate::strategies::{OptimizedStrategy, SelectionStrategy, SequentialStrategy};

/// Dispatches requests across a pool of hosts using the active [`Policy`].
///
/// The pool is kept in a `VecDeque` because round-robin rotation is expressed
/// as a change of pool order rather than a separate cursor.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    hosts: VecDeque<Host>,
    policy: Policy,
    sequential: SequentialStrategy,
    optimized: OptimizedStrategy,
    dispatched: u64,
}

impl Dispatcher {
    /// Creates a dispatcher over `hosts`.
    ///
    /// An empty pool is accepted here and rejected by [`Dispatcher::dispatch`];
    /// duplicate host ids are rejected immediately.
    pub fn new(hosts: Vec<Host>, policy: Policy) -> Result<Self> {
        ensure_unique_ids(&hosts)?;
        debug!(hosts = hosts.len(), %policy, "Dispatcher created");

        Ok(Self {
            hosts: hosts.into(),
            policy,
            sequential: SequentialStrategy::new(),
            optimized: OptimizedStrategy::default(),
            dispatched: 0,
        })
    }

    /// Creates a dispatcher from the integer policy encoding (1 or 2).
    pub fn with_raw_policy(hosts: Vec<Host>, policy: i64) -> Result<Self> {
        Self::new(hosts, Policy::try_from(policy)?)
    }

    /// Replaces the load threshold used by [`Policy::Optimized`].
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(DispatchError::invalid_configuration(format!(
                "load threshold must be finite, got {}",
                threshold
            )));
        }
        self.optimized = OptimizedStrategy::new(threshold);
        Ok(self)
    }

    /// Selects a host for `request` and lets it serve the request.
    ///
    /// Returns the id of the host that served it. Validation happens before any
    /// selection, so a failed dispatch changes neither loads nor pool order.
    pub fn dispatch(&mut self, request: &Request) -> Result<HostId> {
        if self.hosts.is_empty() {
            warn!(request = request.id(), "Rejecting dispatch: host pool is empty");
            return Err(DispatchError::invalid_configuration(
                "cannot dispatch: host pool is empty",
            ));
        }

        let index = match self.policy {
            Policy::Sequential => self.sequential.pick_host(&mut self.hosts),
            Policy::Optimized => self.optimized.pick_host(&mut self.hosts),
        }
        .ok_or_else(|| DispatchError::invalid_configuration("no host available for selection"))?;

        let host = &mut self.hosts[index];
        host.handle_request(request);
        self.dispatched += 1;

        debug!(
            request = request.id(),
            host = host.id(),
            load = host.load(),
            policy = %self.policy,
            rotated = self.policy.rotates(),
            "Request dispatched"
        );

        Ok(host.id())
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Swaps the active policy. Loads and pool order are left as they are.
    pub fn set_policy(&mut self, policy: Policy) {
        if policy != self.policy {
            info!(from = %self.policy, to = %policy, "Balancing policy changed");
        }
        self.policy = policy;
    }

    /// Swaps the active policy from its integer encoding. An unknown value
    /// leaves the current policy in place.
    pub fn set_policy_raw(&mut self, policy: i64) -> Result<()> {
        let policy = Policy::try_from(policy)?;
        self.set_policy(policy);
        Ok(())
    }

    pub fn threshold(&self) -> f64 {
        self.optimized.threshold()
    }

    /// The pool in its current order.
    pub fn hosts(&self) -> &VecDeque<Host> {
        &self.hosts
    }

    /// Replaces the whole pool. Round-robin restarts from the supplied order.
    pub fn set_hosts(&mut self, hosts: Vec<Host>) -> Result<()> {
        ensure_unique_ids(&hosts)?;
        info!(hosts = hosts.len(), "Host pool replaced");
        self.hosts = hosts.into();
        Ok(())
    }

    pub fn host(&self, id: HostId) -> Option<&Host> {
        self.hosts.iter().find(|h| h.id() == id)
    }

    /// Mutable access to one host, for resetting its load.
    pub fn host_mut(&mut self, id: HostId) -> Option<&mut Host> {
        self.hosts.iter_mut().find(|h| h.id() == id)
    }

    pub fn snapshot(&self) -> Vec<HostSnapshot> {
        self.hosts.iter().map(Host::snapshot).collect()
    }

    /// Number of successful dispatches since creation.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

fn ensure_unique_ids(hosts: &[Host]) -> Result<()> {
    let mut seen = HashSet::with_capacity(hosts.len());
    for host in hosts {
        if !seen.insert(host.id()) {
            return Err(DispatchError::invalid_configuration(format!(
                "duplicate host id {} in pool",
                host.id()
            )));
        }
    }
    Ok(())
}
