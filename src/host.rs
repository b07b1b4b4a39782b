use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::error::{DispatchError, Result};
use crate::request::Request;

pub type HostId = u32;

/// Load added to a host each time it serves a request
pub const DEFAULT_LOAD_INCREMENT: f64 = 0.05;

/// A worker host in the pool.
///
/// The load is private: it grows only when the host serves a request, or when a
/// caller resets it explicitly with [`Host::set_load`].
#[derive(Debug, Clone, PartialEq)]
pub struct Host {
    id: HostId,
    load: f64,
    load_increment: f64,
}

impl Host {
    pub fn new(id: HostId, load: f64) -> Self {
        Self {
            id,
            load,
            load_increment: DEFAULT_LOAD_INCREMENT,
        }
    }

    /// Replaces the per-request increment. It must be finite and not
    /// negative, so serving a request never lowers the load.
    pub fn with_load_increment(mut self, load_increment: f64) -> Result<Self> {
        if !load_increment.is_finite() || load_increment < 0.0 {
            return Err(DispatchError::invalid_configuration(format!(
                "load increment must be finite and not negative, got {}",
                load_increment
            )));
        }
        self.load_increment = load_increment;
        Ok(self)
    }

    pub fn id(&self) -> HostId {
        self.id
    }

    pub fn load(&self) -> f64 {
        self.load
    }

    pub fn load_increment(&self) -> f64 {
        self.load_increment
    }

    /// Overwrites the load unconditionally. Meant for test setup and resets;
    /// negative values are not rejected.
    pub fn set_load(&mut self, load: f64) {
        self.load = load;
    }

    /// Serves one request, which adds the marginal load of that request.
    pub fn handle_request(&mut self, request: &Request) {
        self.load += self.load_increment;
        trace!(
            host = self.id,
            request = request.id(),
            load = self.load,
            "Request handled"
        );
    }

    pub fn snapshot(&self) -> HostSnapshot {
        HostSnapshot {
            id: self.id,
            load: self.load,
        }
    }
}

/// Point-in-time view of a host, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub id: HostId,
    pub load: f64,
}

impl fmt::Display for HostSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Host {} load: {:.2}", self.id, self.load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_request_adds_increment() {
        let mut host = Host::new(1, 0.6);
        host.handle_request(&Request::new(1));
        assert_eq!(host.load(), 0.6 + DEFAULT_LOAD_INCREMENT);
        assert_eq!(host.id(), 1);
    }

    #[test]
    fn test_repeated_requests_are_additive() {
        let mut host = Host::new(7, 0.6);
        let mut expected = 0.6;
        for i in 0..25 {
            host.handle_request(&Request::new(i));
            expected += DEFAULT_LOAD_INCREMENT;
        }
        assert_eq!(host.load(), expected);
    }

    #[test]
    fn test_custom_increment() {
        let mut host = Host::new(2, 0.0).with_load_increment(0.25).unwrap();
        host.handle_request(&Request::new(1));
        host.handle_request(&Request::new(2));
        assert_eq!(host.load(), 0.5);
    }

    #[test]
    fn test_invalid_increment_rejected() {
        for increment in [-0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Host::new(1, 0.6).with_load_increment(increment).unwrap_err();
            assert!(matches!(err, DispatchError::InvalidConfiguration { .. }));
        }
        let host = Host::new(1, 0.6).with_load_increment(0.0).unwrap();
        assert_eq!(host.load_increment(), 0.0);
    }

    #[test]
    fn test_set_load_overwrites_without_validation() {
        let mut host = Host::new(3, 0.9);
        host.set_load(-1.0);
        assert_eq!(host.load(), -1.0);
        host.set_load(0.2);
        assert_eq!(host.snapshot(), HostSnapshot { id: 3, load: 0.2 });
    }

    #[test]
    fn test_snapshot_display() {
        let snapshot = HostSnapshot { id: 4, load: 0.65 };
        assert_eq!(snapshot.to_string(), "Host 4 load: 0.65");
    }
}
