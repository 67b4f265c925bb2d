//! Builders for the two coordinators, mirroring
//! `original_source/source/solver/AbstractSolverBuilder.cpp` and
//! `PortfolioSolverBuilder.cpp`'s fluent `withX(...)` style (minus the
//! JVM-bootstrapping half of the original, which only exists to embed a
//! Java-backed solver and has no counterpart here).

use crate::eps::EPSSolver;
use crate::portfolio::PortfolioSolver;
use panoramyx_core::BigInt;
use panoramyx_optim::{BoundAllocationStrategy, RangeBasedAllocationStrategy};
use panoramyx_transport::Transport;
use std::sync::Arc;

#[derive(Default)]
pub struct EPSSolverBuilder {
    transport: Option<Arc<dyn Transport>>,
}

impl EPSSolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> EPSSolver {
        let transport = self.transport.expect("EPSSolverBuilder requires a transport");
        EPSSolver::new(transport)
    }
}

pub struct PortfolioSolverBuilder {
    transport: Option<Arc<dyn Transport>>,
    allocation_strategy: Option<Box<dyn BoundAllocationStrategy + Send + Sync>>,
    minimum: BigInt,
    maximum: BigInt,
}

impl Default for PortfolioSolverBuilder {
    fn default() -> Self {
        Self {
            transport: None,
            allocation_strategy: None,
            minimum: 0,
            maximum: 0,
        }
    }
}

impl PortfolioSolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_allocation_strategy(mut self, allocation_strategy: Box<dyn BoundAllocationStrategy + Send + Sync>) -> Self {
        self.allocation_strategy = Some(allocation_strategy);
        self
    }

    pub fn with_bounds(mut self, minimum: BigInt, maximum: BigInt) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    pub fn build(self) -> PortfolioSolver {
        let transport = self.transport.expect("PortfolioSolverBuilder requires a transport");
        let allocation_strategy = self
            .allocation_strategy
            .unwrap_or_else(|| Box::new(RangeBasedAllocationStrategy::new(Box::new(
                |min, max, steps| Box::new(panoramyx_optim::LinearRangeIterator::new(min, max, steps)) as Box<dyn Iterator<Item = BigInt>>,
            ))));
        PortfolioSolver::new(transport, allocation_strategy, self.minimum, self.maximum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::GlobalResult;
    use panoramyx_transport::thread::ThreadTransportGroup;

    #[test]
    fn eps_builder_requires_only_a_transport() {
        let group = ThreadTransportGroup::new(1);
        let _solver = EPSSolverBuilder::new().with_transport(Arc::new(group.handle(0))).build();
    }

    #[test]
    fn portfolio_builder_defaults_to_a_range_based_allocation_strategy() {
        let group = ThreadTransportGroup::new(1);
        let solver = PortfolioSolverBuilder::new()
            .with_transport(Arc::new(group.handle(0)))
            .with_bounds(0, 10)
            .build();
        assert_eq!(solver.result(), GlobalResult::Unknown);
    }
}
