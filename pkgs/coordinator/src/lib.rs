//! Parallel-solver coordination (§4.7–§4.10): the coordinator side's view of
//! remote workers, the worker-side request loop, and the two concrete
//! coordinators (`EPSSolver` for cube-and-conquer, `PortfolioSolver` for
//! bound-sharing portfolios) built atop a shared `AbstractParallelSolver`.

mod builder;
mod coordinator;
mod eps;
mod portfolio;
mod queue;
mod remote;
mod semaphore;
mod worker;

pub use builder::{EPSSolverBuilder, PortfolioSolverBuilder};
pub use coordinator::{AbstractParallelSolver, GlobalResult, WorkerState};
pub use eps::EPSSolver;
pub use portfolio::PortfolioSolver;
pub use queue::AvailableSolvers;
pub use remote::{RemoteConstraint, RemoteSolverProxy};
pub use semaphore::CountingSemaphore;
pub use worker::WorkerLoop;
