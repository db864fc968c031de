pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, FilterSettings};

pub use core::{engine::FilterEngine, line_filter::LineFilter, link::LinkPattern};
pub use domain::model::{FilterReport, FilterSet, MatchField, WriteFailurePolicy, WriteMode};
pub use utils::error::{FilterError, Result};
