pub mod batch;
pub mod state;
pub mod submission;
pub mod verdict;

pub use batch::*;
pub use state::*;
pub use submission::*;
pub use verdict::*;
