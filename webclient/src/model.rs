pub mod contents;
pub mod envelope;
pub mod problem_id;
pub mod session;

pub use contents::*;
pub use envelope::*;
pub use problem_id::ProblemId;
pub use session::SessionContext;

pub use reqwest::Url;
