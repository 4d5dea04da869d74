pub mod error;
pub mod hashing;
pub mod ledger;
pub mod money;
pub mod submission;
pub mod time;

pub use error::{Error, Result};
pub use submission::Submission;
