use crate::core::lines::split_segment;
use crate::core::Storage;
use crate::domain::model::WriteMode;
use crate::utils::error::{FilterError, Result};
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }

    /// Replaces the file `path` resolves to, so a symlinked index keeps its
    /// link and the real file gets the new content. Permission bits carry
    /// over, and a read-only file is refused as an overwrite would be.
    async fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
        let target = match fs::canonicalize(path).await {
            Ok(target) => target,
            Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
            Err(e) => return Err(e),
        };

        let permissions = match fs::metadata(&target).await {
            Ok(metadata) => Some(metadata.permissions()),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };
        if permissions.as_ref().is_some_and(|p| p.readonly()) {
            return Err(std::io::Error::new(
                ErrorKind::PermissionDenied,
                "file is read-only",
            ));
        }

        let temp_path = Self::temp_path(&target);

        let written = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(content.as_bytes()).await?;
            if let Some(permissions) = permissions {
                file.set_permissions(permissions).await?;
            }
            file.sync_all().await?;
            fs::rename(&temp_path, &target).await
        }
        .await;

        if written.is_err() {
            if let Err(e) = fs::remove_file(&temp_path).await {
                tracing::debug!("Could not remove {}: {}", temp_path.display(), e);
            }
        }

        written
    }
}

impl Storage for LocalStorage {
    async fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let path_name = path.display().to_string();
        let file = fs::File::open(path)
            .await
            .map_err(|e| FilterError::read(path_name.clone(), e))?;

        // the reader, and with it the handle, is dropped on every return path
        let mut reader = BufReader::new(file);
        let mut lines = Vec::new();
        let mut segment = Vec::new();

        loop {
            segment.clear();
            let read = reader
                .read_until(b'\n', &mut segment)
                .await
                .map_err(|e| FilterError::read(path_name.clone(), e))?;
            if read == 0 {
                break;
            }

            let text = String::from_utf8_lossy(&segment);
            if let Cow::Owned(_) = text {
                tracing::warn!(
                    "Invalid UTF-8 in {} after line {}, replaced with U+FFFD",
                    path_name,
                    lines.len()
                );
            }
            lines.extend(split_segment(&text).map(str::to_string));
        }

        Ok(lines)
    }

    async fn write_text(&self, path: &Path, content: &str, mode: WriteMode) -> Result<()> {
        let written = match mode {
            WriteMode::Overwrite => fs::write(path, content).await,
            WriteMode::Atomic => Self::write_atomic(path, content).await,
        };

        written.map_err(|e| FilterError::write(path.display().to_string(), e))
    }
}
