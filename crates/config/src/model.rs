use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conventional directory names scaffolded into a fresh configuration.
/// 建立新設定檔時採用的慣例目錄名稱。
pub const DEFAULT_SOURCE_DIR: &str = "web-src";
pub const DEFAULT_RESOURCES_DIR: &str = "res";
pub const DEFAULT_INCLUDE_DIR: &str = "include";

/// Errors raised while reading or writing configuration files.
/// 讀寫設定檔時可能發生的錯誤。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("configuration {path}: {field} must be a workspace-relative path, got '{value}'")]
    AbsolutePath {
        path: PathBuf,
        field: &'static str,
        value: String,
    },
    #[error("failed to serialize configuration {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write configuration {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Semantic category a project file belongs to.
/// 專案檔案所屬的語意分類。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Source,
    Resource,
    Include,
}

impl Category {
    /// The configuration field naming this category's directory.
    /// 此分類在設定檔中的欄位名稱。
    pub fn field_name(&self) -> &'static str {
        match self {
            Category::Source => "sourceDirectory",
            Category::Resource => "resourcesDirectory",
            Category::Include => "includeDirectory",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Source => "source",
            Category::Resource => "resource",
            Category::Include => "include",
        };
        f.write_str(label)
    }
}

/// Parsed contents of one `.fccw` project configuration. Each field names a
/// workspace-relative directory; an absent field suppresses the matching
/// logical section. Unknown keys are ignored for forward compatibility, but a
/// known key holding a non-string value fails the parse.
/// 單一 `.fccw` 設定檔解析後的內容。每個欄位都是相對於工作區的目錄；
/// 欄位缺席時對應的邏輯區段不會顯示。未知欄位會被忽略，
/// 但已知欄位若型別錯誤則解析失敗。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_directory: Option<String>,
}

impl ProjectConfig {
    /// A configuration naming the conventional `web-src`/`res`/`include` layout.
    /// 採用慣例佈局的設定內容。
    pub fn conventional() -> Self {
        Self {
            source_directory: Some(DEFAULT_SOURCE_DIR.to_string()),
            resources_directory: Some(DEFAULT_RESOURCES_DIR.to_string()),
            include_directory: Some(DEFAULT_INCLUDE_DIR.to_string()),
        }
    }

    /// Reads and parses the configuration at `path`. Called on every access;
    /// results are never cached.
    /// 讀取並解析指定路徑的設定檔；每次存取都重新解析，不做快取。
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Saves the configuration as pretty JSON using an atomic write.
    /// 以原子寫入方式將設定儲存為 JSON。
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let payload = serde_json::to_vec_pretty(self).map_err(|source| ConfigError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        write_atomic(path, &payload).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured directory for `category`, if any.
    /// 取得指定分類設定的目錄（若有）。
    pub fn directory(&self, category: Category) -> Option<&str> {
        match category {
            Category::Source => self.source_directory.as_deref(),
            Category::Resource => self.resources_directory.as_deref(),
            Category::Include => self.include_directory.as_deref(),
        }
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fields = [
            (Category::Source.field_name(), &self.source_directory),
            (Category::Resource.field_name(), &self.resources_directory),
            (Category::Include.field_name(), &self.include_directory),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                if Path::new(value).is_absolute() {
                    return Err(ConfigError::AbsolutePath {
                        path: path.to_path_buf(),
                        field,
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Writes data via a temporary sibling file followed by rename.
/// 以臨時檔案搭配 rename 寫入資料。
fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, data)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_all_three_directories() {
        let tmp = tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            "project.fccw",
            r#"{
                "sourceDirectory": "web-src",
                "resourcesDirectory": "res",
                "includeDirectory": "include"
            }"#,
        );

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.directory(Category::Source), Some("web-src"));
        assert_eq!(config.directory(Category::Resource), Some("res"));
        assert_eq!(config.directory(Category::Include), Some("include"));
    }

    #[test]
    fn absent_fields_stay_none_and_unknown_keys_are_ignored() {
        let tmp = tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            "partial.fccw",
            r#"{ "includeDirectory": "headers", "buildProfile": "release" }"#,
        );

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.source_directory, None);
        assert_eq!(config.resources_directory, None);
        assert_eq!(config.directory(Category::Include), Some("headers"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let tmp = tempdir().unwrap();
        let path = write_config(tmp.path(), "broken.fccw", "{ not json");

        let err = ProjectConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn known_key_with_wrong_type_is_a_parse_error() {
        let tmp = tempdir().unwrap();
        let path = write_config(tmp.path(), "typed.fccw", r#"{ "sourceDirectory": 42 }"#);

        let err = ProjectConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn absolute_paths_are_rejected() {
        let tmp = tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            "abs.fccw",
            r#"{ "resourcesDirectory": "/var/res" }"#,
        );

        let err = ProjectConfig::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::AbsolutePath {
                field: "resourcesDirectory",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let tmp = tempdir().unwrap();
        let err = ProjectConfig::load(&tmp.path().join("absent.fccw")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("project.fccw");

        let config = ProjectConfig::conventional();
        config.save(&path).unwrap();

        let reloaded = ProjectConfig::load(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn save_omits_absent_fields() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("sparse.fccw");

        let config = ProjectConfig {
            source_directory: Some("src".into()),
            ..ProjectConfig::default()
        };
        config.save(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("sourceDirectory"));
        assert!(!contents.contains("resourcesDirectory"));
        assert!(!contents.contains("includeDirectory"));
    }
}
