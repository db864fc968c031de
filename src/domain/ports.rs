use crate::domain::model::{FilterSet, MatchField, WriteFailurePolicy, WriteMode};
use crate::utils::error::Result;
use std::path::Path;

pub trait Storage: Send + Sync {
    /// Reads every line of `path`. The underlying handle is released before
    /// this resolves, whether reading succeeded or not.
    fn read_lines(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;

    fn write_text(
        &self,
        path: &Path,
        content: &str,
        mode: WriteMode,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn filter_set(&self) -> &FilterSet;
    fn match_field(&self) -> MatchField;
    fn write_mode(&self) -> WriteMode;
    fn write_failure_policy(&self) -> WriteFailurePolicy;
    fn dry_run(&self) -> bool;
}
