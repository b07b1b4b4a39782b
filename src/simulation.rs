use tracing::info;

use crate::config::SimulationConfig;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::policy::Policy;
use crate::report::{DispatchRecord, PhaseReport, SimulationReport};
use crate::request::Request;

/// Runs the two-phase scenario: a sequential round over a fresh pool, then an
/// optimized round over another fresh pool, on the same dispatcher.
pub struct Simulation {
    config: SimulationConfig,
    next_request: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            next_request: 1,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run(&mut self) -> Result<SimulationReport> {
        let mut dispatcher = Dispatcher::new(self.config.build_pool()?, Policy::Sequential)?
            .with_threshold(self.config.threshold)?;

        info!(
            hosts = self.config.hosts,
            requests = self.config.sequential_requests,
            "Testing sequential request handling"
        );
        let sequential = self.run_phase(&mut dispatcher, self.config.sequential_requests)?;

        dispatcher.set_hosts(self.config.build_pool()?)?;
        dispatcher.set_policy(Policy::Optimized);

        info!(
            hosts = self.config.hosts,
            requests = self.config.optimized_requests,
            threshold = self.config.threshold,
            "Testing optimized request handling"
        );
        let optimized = self.run_phase(&mut dispatcher, self.config.optimized_requests)?;

        Ok(SimulationReport {
            sequential,
            optimized,
        })
    }

    fn run_phase(&mut self, dispatcher: &mut Dispatcher, requests: usize) -> Result<PhaseReport> {
        let mut phase = PhaseReport::new(dispatcher.policy(), dispatcher.snapshot());

        for _ in 0..requests {
            let request = Request::new(self.next_request);
            self.next_request += 1;

            let host = dispatcher.dispatch(&request)?;
            phase.dispatches.push(DispatchRecord {
                request: request.id(),
                host,
                hosts: dispatcher.snapshot(),
            });
        }

        Ok(phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_config() {
        let config = SimulationConfig {
            hosts: 0,
            ..Default::default()
        };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_rejects_jitter_that_would_overflow_the_range() {
        let config = SimulationConfig {
            load_jitter: 1e308,
            ..Default::default()
        };
        let err = Simulation::new(config).err().unwrap();
        assert!(matches!(err, crate::error::DispatchError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_request_ids_continue_across_phases() {
        let config = SimulationConfig {
            hosts: 2,
            sequential_requests: 3,
            optimized_requests: 2,
            ..Default::default()
        };
        let report = Simulation::new(config).unwrap().run().unwrap();
        let ids: Vec<u64> = report
            .sequential
            .dispatches
            .iter()
            .chain(&report.optimized.dispatches)
            .map(|d| d.request)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
