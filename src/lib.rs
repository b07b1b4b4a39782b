pub mod config;
pub mod dispatcher;
pub mod error;
pub mod host;
pub mod policy;
pub mod report;
pub mod request;
pub mod shared;
pub mod simulation;
pub mod strategies;

pub use config::SimulationConfig;
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use host::{Host, HostId, HostSnapshot};
pub use policy::Policy;
pub use request::Request;
pub use shared::SharedDispatcher;
pub use simulation::Simulation;
pub use strategies::SelectionStrategy;
