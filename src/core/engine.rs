use crate::core::line_filter::LineFilter;
use crate::core::{ConfigProvider, FilterReport, Storage};
use crate::domain::model::{WriteFailurePolicy, WriteMode};
use crate::utils::error::Result;
use std::path::Path;

/// Runs the whole read, filter, rewrite pass over one file.
pub struct FilterEngine<S: Storage> {
    storage: S,
    filter: LineFilter,
    write_mode: WriteMode,
    dry_run: bool,
}

impl<S: Storage> FilterEngine<S> {
    pub fn new(storage: S, filter: LineFilter) -> Self {
        Self {
            storage,
            filter,
            write_mode: WriteMode::Overwrite,
            dry_run: false,
        }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Self {
        let filter =
            LineFilter::new(config.filter_set().clone()).with_match_field(config.match_field());

        Self {
            storage,
            filter,
            write_mode: config.write_mode(),
            dry_run: config.dry_run(),
        }
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Nothing is written unless every line was read; a failed write is
    /// returned as `FilterError::WriteError`.
    pub async fn run(&self, path: &Path) -> Result<FilterReport> {
        tracing::debug!("Reading {}", path.display());
        let lines = self.storage.read_lines(path).await?;

        let output = self.filter.filter_lines(&lines);
        tracing::debug!(
            "Kept {} of {} lines, dropped {}",
            output.lines_kept,
            output.lines_read,
            output.dropped.len()
        );

        let mut report = FilterReport {
            path: path.to_path_buf(),
            lines_read: output.lines_read,
            lines_kept: output.lines_kept,
            dropped: output.dropped,
            bytes_written: 0,
            written: false,
        };

        if self.dry_run {
            for dropped in &report.dropped {
                tracing::info!(
                    "Would drop line {} (links to '{}')",
                    dropped.line_number,
                    dropped.key
                );
            }
            return Ok(report);
        }

        self.storage
            .write_text(path, &output.content, self.write_mode)
            .await?;

        report.bytes_written = output.content.len();
        report.written = true;
        tracing::debug!(
            "Wrote {} bytes to {} ({:?})",
            report.bytes_written,
            path.display(),
            self.write_mode
        );

        Ok(report)
    }
}

/// Process exit status for a finished run. A read failure always fails the
/// process; a failed rewrite only does under `WriteFailurePolicy::Fail`.
pub fn exit_code(result: &Result<FilterReport>, policy: WriteFailurePolicy) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) if e.is_write_failure() => match policy {
            WriteFailurePolicy::Log => 0,
            WriteFailurePolicy::Fail => 1,
        },
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FilterSet;
    use crate::utils::error::FilterError;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<PathBuf, String>>>,
        fail_writes: bool,
    }

    impl MockStorage {
        async fn insert(&self, path: &str, content: &str) {
            let mut files = self.files.lock().await;
            files.insert(PathBuf::from(path), content.to_string());
        }

        async fn get(&self, path: &str) -> Option<String> {
            let files = self.files.lock().await;
            files.get(Path::new(path)).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
            let files = self.files.lock().await;
            let content = files.get(path).ok_or_else(|| {
                FilterError::read(
                    path.display().to_string(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                )
            })?;
            Ok(crate::core::lines::split_lines(content)
                .map(str::to_string)
                .collect())
        }

        async fn write_text(&self, path: &Path, content: &str, _mode: WriteMode) -> Result<()> {
            if self.fail_writes {
                return Err(FilterError::write(
                    path.display().to_string(),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            let mut files = self.files.lock().await;
            files.insert(path.to_path_buf(), content.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_run_rewrites_file() {
        let storage = MockStorage::default();
        storage
            .insert("index.md", "# Index\n[[read-and-watch-list|R]]\n[[projects|P]]\n")
            .await;

        let engine = FilterEngine::new(storage.clone(), LineFilter::default());
        let report = engine.run(Path::new("index.md")).await.unwrap();

        assert_eq!(
            storage.get("index.md").await.unwrap(),
            "# Index\n[[projects|P]]\n"
        );
        assert!(report.written);
        assert_eq!(report.lines_read, 3);
        assert_eq!(report.lines_kept, 2);
        assert_eq!(report.lines_dropped(), 1);
        assert_eq!(report.bytes_written, "# Index\n[[projects|P]]\n".len());
    }

    #[tokio::test]
    async fn test_dry_run_leaves_file_alone() {
        let storage = MockStorage::default();
        let original = "[[read-and-watch-list|R]]\r\nkeep\r\n";
        storage.insert("index.md", original).await;

        let engine = FilterEngine::new(storage.clone(), LineFilter::default()).with_dry_run(true);
        let report = engine.run(Path::new("index.md")).await.unwrap();

        assert!(!report.written);
        assert_eq!(report.lines_dropped(), 1);
        assert_eq!(storage.get("index.md").await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_read_failure_writes_nothing() {
        let storage = MockStorage::default();
        let engine = FilterEngine::new(storage.clone(), LineFilter::default());

        let err = engine.run(Path::new("missing.md")).await.unwrap_err();

        assert!(matches!(err, FilterError::ReadError { .. }));
        assert!(storage.get("missing.md").await.is_none());
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let storage = MockStorage {
            fail_writes: true,
            ..Default::default()
        };
        storage.insert("index.md", "[[projects|P]]\n").await;

        let engine = FilterEngine::new(storage.clone(), LineFilter::default());
        let err = engine.run(Path::new("index.md")).await.unwrap_err();

        assert!(err.is_write_failure());
    }

    #[tokio::test]
    async fn test_exit_code_success() {
        let storage = MockStorage::default();
        storage.insert("index.md", "[[projects|P]]\n").await;

        let engine = FilterEngine::new(storage, LineFilter::default());
        let result = engine.run(Path::new("index.md")).await;

        assert_eq!(exit_code(&result, WriteFailurePolicy::Log), 0);
        assert_eq!(exit_code(&result, WriteFailurePolicy::Fail), 0);
    }

    #[tokio::test]
    async fn test_exit_code_read_failure_is_fatal_under_any_policy() {
        let engine = FilterEngine::new(MockStorage::default(), LineFilter::default());
        let result = engine.run(Path::new("missing.md")).await;

        assert_eq!(exit_code(&result, WriteFailurePolicy::Log), 1);
        assert_eq!(exit_code(&result, WriteFailurePolicy::Fail), 1);
    }

    #[tokio::test]
    async fn test_exit_code_write_failure_follows_policy() {
        let storage = MockStorage {
            fail_writes: true,
            ..Default::default()
        };
        storage.insert("index.md", "[[projects|P]]\n").await;

        let engine = FilterEngine::new(storage, LineFilter::default());
        let result = engine.run(Path::new("index.md")).await;

        assert_eq!(exit_code(&result, WriteFailurePolicy::Log), 0);
        assert_eq!(exit_code(&result, WriteFailurePolicy::Fail), 1);
    }

    #[tokio::test]
    async fn test_policy_comes_from_settings() {
        use crate::config::FilterSettings;

        let storage = MockStorage {
            fail_writes: true,
            ..Default::default()
        };
        storage.insert("index.md", "[[projects|P]]\n").await;
        let settings = FilterSettings {
            write_failure_policy: WriteFailurePolicy::Fail,
            ..Default::default()
        };

        let engine = FilterEngine::from_config(storage, &settings);
        let result = engine.run(Path::new("index.md")).await;

        assert_eq!(exit_code(&result, settings.write_failure_policy()), 1);
    }

    #[tokio::test]
    async fn test_custom_filter_set() {
        let storage = MockStorage::default();
        storage
            .insert("index.md", "[[archive|A]]\n[[read-and-watch-list|R]]\n")
            .await;

        let filter = LineFilter::new(FilterSet::new(["archive"]));
        let engine = FilterEngine::new(storage.clone(), filter);
        engine.run(Path::new("index.md")).await.unwrap();

        assert_eq!(
            storage.get("index.md").await.unwrap(),
            "[[read-and-watch-list|R]]\n"
        );
    }
}
