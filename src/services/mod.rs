//! Contract services: simulated, real, and the hybrid that combines them.

pub mod hybrid;
pub mod latency;
pub mod mint;
pub mod mock;
pub mod real;
pub mod routing;

pub use hybrid::{HybridContractService, ServiceMode};
pub use latency::{Delay, NoDelay, TokioDelay};
pub use mock::MockContractService;
pub use real::{derive_whitelist_address, RealContractService};
pub use routing::{Operation, RealSupport, Route, Routed};
