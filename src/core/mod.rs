pub mod engine;
pub mod line_filter;
pub mod lines;
pub mod link;

pub use crate::domain::model::FilterReport;
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
