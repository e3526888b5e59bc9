use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// File extension identifying project configuration files.
/// 專案設定檔使用的副檔名。
pub const CONFIG_EXTENSION: &str = "fccw";

/// Errors raised while scanning a workspace for configuration files.
/// 掃描工作區設定檔時可能發生的錯誤。
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("failed to scan workspace: {0}")]
    Scan(#[from] walkdir::Error),
}

/// Recursively collects every configuration file under `root`, depth first
/// with per-directory entries sorted by file name. Each matching file appears
/// exactly once. An unreadable directory aborts the whole scan. Symlinks are
/// not followed, so cyclic layouts cannot loop the walk.
/// 以深度優先方式遞迴收集 `root` 下所有設定檔，每層目錄依檔名排序；
/// 無法讀取的目錄會讓整個掃描失敗。不追蹤符號連結，因此不會陷入循環。
pub fn locate_configs(root: &Path) -> Result<Vec<PathBuf>, LocateError> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_config(entry.path()) {
            found.push(entry.path().to_path_buf());
        }
    }
    log::debug!(
        "located {} configuration file(s) under {}",
        found.len(),
        root.display()
    );
    Ok(found)
}

fn is_config(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(CONFIG_EXTENSION))
        .unwrap_or(false)
}
