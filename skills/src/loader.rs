//! Loading related-skills tables and matcher configuration from the filesystem.

use std::path::{Path, PathBuf};

use async_fs as afs;
use futures_lite::stream::StreamExt;

use crate::{MatcherConfig, RelatedSkills, SkillError};

/// Loads related-skills tables from YAML files.
///
/// Each configured path may be a single YAML file or a directory of `*.yaml` /
/// `*.yml` files. Tables are overlaid in the order paths were added (files inside a
/// directory in name order); relations for the same skill are unioned.
///
/// Paths added with [`TableLoader::add_path`] are optional search locations and are
/// skipped when absent. Paths added with [`TableLoader::require_path`] must exist.
///
/// # Example
///
/// ```rust,ignore
/// let table = TableLoader::new()
///     .add_path("/etc/equimatch/related.yaml")
///     .require_path("./related.d")
///     .load()
///     .await?;
/// ```
#[derive(Debug, Default)]
pub struct TableLoader {
    paths: Vec<TablePath>,
}

#[derive(Debug)]
struct TablePath {
    path: PathBuf,
    required: bool,
}

impl TableLoader {
    /// Create a new loader with no paths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an optional file or directory to load from.
    #[must_use]
    pub fn add_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(TablePath {
            path: path.into(),
            required: false,
        });
        self
    }

    /// Add a file or directory that must exist.
    #[must_use]
    pub fn require_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(TablePath {
            path: path.into(),
            required: true,
        });
        self
    }

    /// Load and overlay every table. Optional paths that do not exist are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::ReadFile`] if a required path is missing or an existing
    /// path cannot be read, and a parse error if a file is malformed.
    pub async fn load(&self) -> Result<RelatedSkills, SkillError> {
        let mut table = RelatedSkills::empty();

        for TablePath { path, required } in &self.paths {
            let Some(metadata) = metadata_async(path).await? else {
                if *required {
                    return Err(SkillError::ReadFile {
                        path: path.clone(),
                        source: std::io::Error::from(std::io::ErrorKind::NotFound),
                    });
                }
                tracing::debug!(path = %path.display(), "related-skills path not found, skipping");
                continue;
            };

            if metadata.is_dir() {
                for file in Self::table_files(path).await? {
                    table.merge(&Self::load_file(&file).await?);
                }
            } else {
                table.merge(&Self::load_file(path).await?);
            }
        }

        tracing::info!(entries = table.len(), "loaded related-skills table");
        Ok(table)
    }

    /// Read matcher configuration from a YAML file.
    ///
    /// A relative `table_path` is resolved against the directory holding the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load_config(path: &Path) -> Result<MatcherConfig, SkillError> {
        let content = read_to_string(path).await?;
        let mut config = MatcherConfig::from_yaml_str(&content)?;

        if let Some(base) = path.parent() {
            config.table_path = config
                .table_path
                .map(|table| if table.is_relative() { base.join(table) } else { table });
        }
        Ok(config)
    }

    async fn load_file(path: &Path) -> Result<RelatedSkills, SkillError> {
        let content = read_to_string(path).await?;
        let table = RelatedSkills::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), entries = table.len(), "loaded table file");
        Ok(table)
    }

    /// YAML files directly inside `dir`, sorted by name.
    async fn table_files(dir: &Path) -> Result<Vec<PathBuf>, SkillError> {
        let mut entries = afs::read_dir(dir)
            .await
            .map_err(|source| SkillError::ReadFile {
                path: dir.to_path_buf(),
                source,
            })?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .try_next()
            .await
            .map_err(|source| SkillError::ReadFile {
                path: dir.to_path_buf(),
                source,
            })?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|source| SkillError::ReadFile {
                    path: path.clone(),
                    source,
                })?;

            let is_yaml = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

            if file_type.is_file() && is_yaml {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

async fn read_to_string(path: &Path) -> Result<String, SkillError> {
    afs::read_to_string(path)
        .await
        .map_err(|source| SkillError::ReadFile {
            path: path.to_path_buf(),
            source,
        })
}

async fn metadata_async(path: &Path) -> Result<Option<std::fs::Metadata>, SkillError> {
    match afs::metadata(path).await {
        Ok(metadata) => Ok(Some(metadata)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(SkillError::ReadFile {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}
