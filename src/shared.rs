use std::sync::Arc;

use parking_lot::Mutex;

use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::host::{Host, HostId, HostSnapshot};
use crate::policy::Policy;
use crate::request::Request;

/// Cloneable handle to a dispatcher shared between threads or tasks.
///
/// Each dispatch runs under the lock from validation through selection,
/// rotation and the load update, so concurrent callers observe the same
/// round-robin and least-loaded behaviour as a single caller.
#[derive(Clone)]
pub struct SharedDispatcher {
    inner: Arc<Mutex<Dispatcher>>,
}

impl SharedDispatcher {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dispatcher)),
        }
    }

    pub fn dispatch(&self, request: &Request) -> Result<HostId> {
        self.inner.lock().dispatch(request)
    }

    pub fn policy(&self) -> Policy {
        self.inner.lock().policy()
    }

    pub fn set_policy(&self, policy: Policy) {
        self.inner.lock().set_policy(policy);
    }

    pub fn set_hosts(&self, hosts: Vec<Host>) -> Result<()> {
        self.inner.lock().set_hosts(hosts)
    }

    pub fn snapshot(&self) -> Vec<HostSnapshot> {
        self.inner.lock().snapshot()
    }

    /// Runs `f` with exclusive access to the dispatcher.
    pub fn with_dispatcher<R>(&self, f: impl FnOnce(&mut Dispatcher) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}

impl From<Dispatcher> for SharedDispatcher {
    fn from(dispatcher: Dispatcher) -> Self {
        Self::new(dispatcher)
    }
}
