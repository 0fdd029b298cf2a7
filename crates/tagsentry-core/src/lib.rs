pub mod check;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod resource;
pub mod runner;
pub mod status;
pub mod thresholds;

pub use error::{Result, TagsentryError};
