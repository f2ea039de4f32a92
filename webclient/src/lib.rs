// exported modules
pub mod error;
pub mod http;
pub mod model;

// client impls
pub mod judge;

// re-exports
pub use error::*;
pub use judge::{JudgeBackend, JudgeClient};
pub use model::*;

#[cfg(feature = "mock")]
pub use judge::MockJudgeBackend;

// internal modules
mod util;
