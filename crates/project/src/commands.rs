use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fccw_config::Category;
use thiserror::Error;

use crate::resolve::{resolve_create_target, CategoryRoots, ResolveError, Selected};

/// Errors raised by the create and delete commands.
/// 建立與刪除指令可能發生的錯誤。
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid file name '{0}'")]
    InvalidName(String),
    #[error("{path} already exists")]
    AlreadyExists { path: PathBuf },
    #[error("{path} does not exist")]
    NotFound { path: PathBuf },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to delete {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Creates an empty file named `name` for `category`, mirroring the selected
/// node's sub-path into the category root. Missing intermediate directories
/// are created first; an existing file of the same name is refused. Returns
/// the created path. The host collects the name beforehand; a cancelled
/// prompt means this is never called.
/// 在指定分類下建立名為 `name` 的空白檔案，並將選取節點的子路徑映射到
/// 該分類的根目錄。會先補齊缺少的中間目錄；同名檔案已存在時拒絕建立。
/// 回傳建立後的路徑。
pub fn create_file(
    roots: &CategoryRoots,
    selected: Option<&Selected>,
    category: Category,
    name: &str,
) -> Result<PathBuf, CommandError> {
    validate_name(name)?;
    let target_dir = resolve_create_target(roots, selected, category)?;
    fs::create_dir_all(&target_dir).map_err(|source| CommandError::Create {
        path: target_dir.clone(),
        source,
    })?;

    let target = target_dir.join(name);
    if target.symlink_metadata().is_ok() {
        return Err(CommandError::AlreadyExists { path: target });
    }
    fs::write(&target, []).map_err(|source| CommandError::Create {
        path: target.clone(),
        source,
    })?;
    log::debug!("created {}", target.display());
    Ok(target)
}

/// Deletes a file, or a directory together with all of its descendants. The
/// host confirms beforehand; a declined confirmation means this is never
/// called. Deletion is irreversible.
/// 刪除檔案，或連同所有子孫一併刪除資料夾。刪除無法復原。
pub fn delete_entry(path: &Path) -> Result<(), CommandError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(CommandError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(CommandError::Delete {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|source| CommandError::Delete {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("deleted {}", path.display());
    Ok(())
}

fn validate_name(name: &str) -> Result<(), CommandError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || name.contains(['/', '\\'])
        || name.contains('\0')
    {
        return Err(CommandError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge_roots;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, []).unwrap();
    }

    fn roots_at(base: &Path) -> CategoryRoots {
        CategoryRoots {
            source: Some(base.join("web-src")),
            resources: Some(base.join("res")),
            include: Some(base.join("include")),
        }
    }

    #[test]
    fn creates_in_category_root_without_selection() {
        let tmp = tempdir().unwrap();
        let roots = roots_at(tmp.path());

        let created = create_file(&roots, None, Category::Include, "api.h").unwrap();
        assert_eq!(created, tmp.path().join("include/api.h"));
        assert!(created.is_file());
    }

    #[test]
    fn mirrors_merged_selection_into_the_requested_category() {
        // web-src/a and res/a merge into one logical "a"; creating a resource
        // with that folder selected lands in res/a
        let tmp = tempdir().unwrap();
        touch(&tmp.path().join("web-src/a/x.txt"));
        touch(&tmp.path().join("res/a/y.txt"));
        let roots = roots_at(tmp.path());

        let selected = Selected {
            path: tmp.path().join("web-src/a"),
            is_dir: true,
        };
        let created = create_file(&roots, Some(&selected), Category::Resource, "z.txt").unwrap();
        assert_eq!(created, tmp.path().join("res/a/z.txt"));
        assert!(created.is_file());
    }

    #[test]
    fn creates_missing_intermediate_directories() {
        let tmp = tempdir().unwrap();
        touch(&tmp.path().join("res/assets/deep/texture.png"));
        let roots = roots_at(tmp.path());

        let selected = Selected {
            path: tmp.path().join("res/assets/deep"),
            is_dir: true,
        };
        let created = create_file(&roots, Some(&selected), Category::Source, "shader.js").unwrap();
        assert_eq!(created, tmp.path().join("web-src/assets/deep/shader.js"));
        assert!(created.is_file());
    }

    #[test]
    fn created_file_shows_up_in_the_next_merge() {
        let tmp = tempdir().unwrap();
        touch(&tmp.path().join("web-src/a/x.txt"));
        touch(&tmp.path().join("res/a/y.txt"));
        let roots = roots_at(tmp.path());

        let selected = Selected {
            path: tmp.path().join("web-src/a"),
            is_dir: true,
        };
        create_file(&roots, Some(&selected), Category::Resource, "z.txt").unwrap();

        let nodes = merge_roots(&roots.combined_source_roots()).unwrap();
        let merged_a = &nodes[0];
        assert_eq!(merged_a.label, "a");
        let labels: Vec<_> = merged_a
            .children()
            .iter()
            .map(|child| child.label.as_str())
            .collect();
        assert_eq!(labels, vec!["x.txt", "y.txt", "z.txt"]);
    }

    #[test]
    fn refuses_to_overwrite_an_existing_file() {
        let tmp = tempdir().unwrap();
        touch(&tmp.path().join("include/api.h"));
        let roots = roots_at(tmp.path());

        let err = create_file(&roots, None, Category::Include, "api.h").unwrap_err();
        assert!(matches!(err, CommandError::AlreadyExists { .. }));
    }

    #[test]
    fn rejects_empty_and_traversing_names() {
        let tmp = tempdir().unwrap();
        let roots = roots_at(tmp.path());

        for name in ["", "   ", "..", "a/b.txt", "a\\b.txt"] {
            let err = create_file(&roots, None, Category::Source, name).unwrap_err();
            assert!(matches!(err, CommandError::InvalidName(_)), "name: {name:?}");
        }
    }

    #[test]
    fn deletes_a_single_file() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("res/logo.png");
        touch(&file);

        delete_entry(&file).unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn deletes_a_directory_with_all_descendants() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("web-src/components");
        touch(&dir.join("button/button.js"));
        touch(&dir.join("slider.js"));

        delete_entry(&dir).unwrap();
        assert!(!dir.exists());

        // the next merge no longer lists the subtree
        let nodes = merge_roots(&[tmp.path().join("web-src")]).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn deleting_a_missing_path_reports_not_found() {
        let tmp = tempdir().unwrap();
        let err = delete_entry(&tmp.path().join("ghost.txt")).unwrap_err();
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
