use crate::domain::model::{FilterSet, MatchField, WriteFailurePolicy, WriteMode};
use crate::utils::error::{FilterError, Result};
use crate::utils::validation::{validate_filter_names, validate_one_of, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

/// Optional settings file, e.g.
///
/// ```toml
/// [filter]
/// targets = ["read-and-watch-list", "languages"]
/// match_field = "target"
///
/// [write]
/// mode = "atomic"
/// on_error = "fail"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub filter: FilterSection,
    #[serde(default)]
    pub write: WriteSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    pub targets: Option<Vec<String>>,
    pub match_field: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WriteSection {
    pub mode: Option<String>,
    pub on_error: Option<String>,
}

impl TomlConfig {
    /// Loads and validates a settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| FilterError::ConfigError {
            message: format!("cannot read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        let config: Self = toml::from_str(&processed_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Expands `${VAR}` from the environment; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_REGEX
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn filter_set(&self) -> Option<FilterSet> {
        self.filter.targets.as_ref().map(|targets| FilterSet::new(targets.iter().cloned()))
    }

    pub fn match_field(&self) -> Result<Option<MatchField>> {
        self.filter
            .match_field
            .as_deref()
            .map(|value| match value {
                "target" => Ok(MatchField::Target),
                "display" => Ok(MatchField::Display),
                other => Err(invalid("filter.match_field", other, &MatchField::NAMES)),
            })
            .transpose()
    }

    pub fn write_mode(&self) -> Result<Option<WriteMode>> {
        self.write
            .mode
            .as_deref()
            .map(|value| match value {
                "overwrite" => Ok(WriteMode::Overwrite),
                "atomic" => Ok(WriteMode::Atomic),
                other => Err(invalid("write.mode", other, &WriteMode::NAMES)),
            })
            .transpose()
    }

    pub fn write_failure_policy(&self) -> Result<Option<WriteFailurePolicy>> {
        self.write
            .on_error
            .as_deref()
            .map(|value| match value {
                "log" => Ok(WriteFailurePolicy::Log),
                "fail" => Ok(WriteFailurePolicy::Fail),
                other => Err(invalid("write.on_error", other, &WriteFailurePolicy::NAMES)),
            })
            .transpose()
    }
}

fn invalid(field: &str, value: &str, allowed: &[&str]) -> FilterError {
    FilterError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: format!("Expected one of: {}", allowed.join(", ")),
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(targets) = &self.filter.targets {
            validate_filter_names("filter.targets", targets)?;
        }
        if let Some(match_field) = &self.filter.match_field {
            validate_one_of("filter.match_field", match_field, &MatchField::NAMES)?;
        }
        if let Some(mode) = &self.write.mode {
            validate_one_of("write.mode", mode, &WriteMode::NAMES)?;
        }
        if let Some(on_error) = &self.write.on_error {
            validate_one_of("write.on_error", on_error, &WriteFailurePolicy::NAMES)?;
        }
        Ok(())
    }
}
