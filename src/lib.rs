pub mod aggregate;
pub mod bucket;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod output;
pub mod range;
pub mod source;
pub mod table;

pub use error::{DashboardError, DataSourceError, Result};
