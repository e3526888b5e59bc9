use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::tree::TreeNode;

/// Errors raised while listing physical directories for a merge.
/// 合併過程中列舉實體目錄的錯誤。
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("failed to list directory {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Scratch state for one logical name while the roots are being scanned.
/// Consumed when children are computed; never escapes into returned nodes.
/// 掃描期間單一名稱的暫存狀態；計算子節點時即被消耗，不會外洩到回傳節點。
#[derive(Debug)]
struct MergeSlot {
    label: String,
    canonical: PathBuf,
    is_dir: bool,
    contributors: Vec<PathBuf>,
}

/// Lists the immediate children seen across all `roots`, presenting
/// same-named directories from different roots as one logical directory.
///
/// Roots are visited in order; a missing root is skipped silently. The first
/// root to produce a name wins the canonical physical path. Later same-named
/// directories only add their path to the contributor list that the recursive
/// merge of children consumes. Files never merge: any later entry colliding
/// with a name first seen as a file is dropped, first seen wins. Nodes come
/// back in first-discovery order, with each root's listing sorted by name.
/// 依序走訪所有根目錄並列出其直接子項，將不同根目錄下同名的資料夾
/// 呈現為單一邏輯資料夾。不存在的根目錄會被靜默跳過；最先出現的名稱
/// 決定標準實體路徑。後續同名資料夾僅累積到貢獻清單，供遞迴合併子項
/// 使用。檔案不合併：與既有檔案同名的後續項目一律捨棄（先到先贏）。
pub fn merge_roots(roots: &[PathBuf]) -> Result<Vec<TreeNode>, MergeError> {
    let mut order: Vec<OsString> = Vec::new();
    let mut slots: HashMap<OsString, MergeSlot> = HashMap::new();

    for root in roots {
        for (name, path, is_dir) in list_sorted(root)? {
            match slots.entry(name) {
                Entry::Vacant(vacant) => {
                    order.push(vacant.key().clone());
                    let label = vacant.key().to_string_lossy().into_owned();
                    let contributors = if is_dir { vec![path.clone()] } else { Vec::new() };
                    vacant.insert(MergeSlot {
                        label,
                        canonical: path,
                        is_dir,
                        contributors,
                    });
                }
                Entry::Occupied(mut occupied) => {
                    let slot = occupied.get_mut();
                    if slot.is_dir && is_dir {
                        slot.contributors.push(path);
                    } else {
                        log::debug!(
                            "dropping {} (shadowed by {})",
                            path.display(),
                            slot.canonical.display()
                        );
                    }
                }
            }
        }
    }

    let mut nodes = Vec::with_capacity(order.len());
    for name in order {
        let Some(slot) = slots.remove(&name) else {
            continue;
        };
        let children = if slot.is_dir {
            merge_roots(&slot.contributors)?
        } else {
            Vec::new()
        };
        nodes.push(TreeNode::entry(
            slot.label,
            slot.canonical,
            slot.is_dir,
            children,
        ));
    }
    Ok(nodes)
}

/// Lists one root's entries sorted by file name. A missing root yields an
/// empty listing. Symlinks are not followed and list as terminal entries.
fn list_sorted(root: &Path) -> Result<Vec<(OsString, PathBuf, bool)>, MergeError> {
    let read = match fs::read_dir(root) {
        Ok(read) => read,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(MergeError::List {
                path: root.to_path_buf(),
                source,
            })
        }
    };

    let mut entries = Vec::new();
    for entry in read {
        let entry = entry.map_err(|source| MergeError::List {
            path: root.to_path_buf(),
            source,
        })?;
        let file_type = entry.file_type().map_err(|source| MergeError::List {
            path: root.to_path_buf(),
            source,
        })?;
        entries.push((entry.file_name(), entry.path(), file_type.is_dir()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}
