pub mod errors;
pub mod pagination;
pub mod retry;
pub mod shutdown;

pub use errors::*;
pub use pagination::*;
pub use retry::{retry_with_backoff, RetryConfig};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
