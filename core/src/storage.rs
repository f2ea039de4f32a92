pub mod error;
pub use error::*;

pub mod session;
pub use session::*;

pub(crate) mod util;
