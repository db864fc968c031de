pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{FilterSet, MatchField, WriteFailurePolicy, WriteMode};
use crate::utils::error::Result;
use crate::utils::validation::{validate_filter_names, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "index-filter")]
#[command(about = "Remove index lines that link to excluded notes, rewriting the file in place")]
pub struct CliConfig {
    /// Index file to filter; it is overwritten with the result
    pub path: Option<PathBuf>,

    #[arg(short, long, help = "TOML file with [filter] and [write] settings")]
    pub config: Option<PathBuf>,

    #[arg(
        long = "filter",
        value_delimiter = ',',
        help = "Excluded names, replacing the default set"
    )]
    pub filters: Vec<String>,

    #[arg(long, help = "Compare the display text instead of the link target")]
    pub match_display: bool,

    #[arg(long, help = "Write to a temporary file and rename it into place")]
    pub atomic: bool,

    #[arg(long, help = "Exit with an error status when the rewrite fails")]
    pub strict: bool,

    #[arg(long, help = "Report what would be dropped without writing")]
    pub dry_run: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(config) = &self.config {
            crate::utils::validation::validate_path("config", &config.to_string_lossy())?;
        }
        validate_filter_names("filter", &self.filters)
    }
}

/// Settings after defaults, the TOML file and command line flags are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSettings {
    pub filter_set: FilterSet,
    pub match_field: MatchField,
    pub write_mode: WriteMode,
    pub write_failure_policy: WriteFailurePolicy,
    pub dry_run: bool,
}

impl FilterSettings {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            filter_set: config.filter_set().unwrap_or(defaults.filter_set),
            match_field: config.match_field()?.unwrap_or(defaults.match_field),
            write_mode: config.write_mode()?.unwrap_or(defaults.write_mode),
            write_failure_policy: config
                .write_failure_policy()?
                .unwrap_or(defaults.write_failure_policy),
            dry_run: false,
        })
    }

    /// Flags win over the config file, which wins over the defaults.
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let mut settings = Self::from_toml(&file_config)?;

        if !cli.filters.is_empty() {
            settings.filter_set = FilterSet::new(cli.filters.iter().cloned());
        }
        if cli.match_display {
            settings.match_field = MatchField::Display;
        }
        if cli.atomic {
            settings.write_mode = WriteMode::Atomic;
        }
        if cli.strict {
            settings.write_failure_policy = WriteFailurePolicy::Fail;
        }
        settings.dry_run = cli.dry_run;

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for FilterSettings {
    fn validate(&self) -> Result<()> {
        let names: Vec<String> = self.filter_set.names().map(str::to_string).collect();
        validate_filter_names("filter set", &names)?;

        if self.filter_set.is_empty() {
            tracing::warn!("Filter set is empty, no line will be dropped");
        }
        Ok(())
    }
}

impl ConfigProvider for FilterSettings {
    fn filter_set(&self) -> &FilterSet {
        &self.filter_set
    }

    fn match_field(&self) -> MatchField {
        self.match_field
    }

    fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    fn write_failure_policy(&self) -> WriteFailurePolicy {
        self.write_failure_policy
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}
