use std::path::{Path, PathBuf};

use fccw_config::{Category, ProjectConfig};
use thiserror::Error;

use crate::tree::{TreeNode, TreeNodeKind};

/// Errors raised while resolving a creation target.
/// 解析建立目標時可能發生的錯誤。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no {0} directory is configured")]
    CategoryUnconfigured(Category),
}

/// Absolute physical roots for the three semantic categories of one
/// configuration, resolved against the workspace root.
/// 單一設定檔三種語意分類對應的實體根目錄（已解析為絕對路徑）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRoots {
    pub source: Option<PathBuf>,
    pub resources: Option<PathBuf>,
    pub include: Option<PathBuf>,
}

impl CategoryRoots {
    /// Joins the configured workspace-relative directories onto `workspace_root`.
    /// 將設定中的相對目錄接在工作區根目錄之後。
    pub fn from_config(config: &ProjectConfig, workspace_root: &Path) -> Self {
        let join = |dir: Option<&str>| dir.map(|dir| workspace_root.join(dir));
        Self {
            source: join(config.directory(Category::Source)),
            resources: join(config.directory(Category::Resource)),
            include: join(config.directory(Category::Include)),
        }
    }

    pub fn get(&self, category: Category) -> Option<&Path> {
        match category {
            Category::Source => self.source.as_deref(),
            Category::Resource => self.resources.as_deref(),
            Category::Include => self.include.as_deref(),
        }
    }

    /// The roots feeding the "Combined source" section, source first.
    /// 組成「Combined source」區段的根目錄，來源目錄優先。
    pub fn combined_source_roots(&self) -> Vec<PathBuf> {
        [self.source.as_ref(), self.resources.as_ref()]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }

    /// The roots feeding the "Includes" section.
    /// 組成「Includes」區段的根目錄。
    pub fn include_roots(&self) -> Vec<PathBuf> {
        self.include.iter().cloned().collect()
    }

    fn all(&self) -> impl Iterator<Item = &Path> {
        [
            self.source.as_deref(),
            self.resources.as_deref(),
            self.include.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// A selected filesystem entry, as reported by the host UI.
/// 宿主 UI 回報的選取節點。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selected {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Selected {
    /// Extracts the selection from a tree node; only filesystem entries count.
    /// 從樹節點取出選取資訊；僅檔案系統節點有效。
    pub fn from_node(node: &TreeNode) -> Option<Self> {
        match &node.kind {
            TreeNodeKind::Entry { path, is_dir, .. } => Some(Self {
                path: path.clone(),
                is_dir: *is_dir,
            }),
            _ => None,
        }
    }

    /// The directory this selection stands for: the entry itself when it is a
    /// directory, its parent otherwise.
    fn base_dir(&self) -> &Path {
        if self.is_dir {
            &self.path
        } else {
            self.path.parent().unwrap_or(&self.path)
        }
    }
}

/// Computes the physical directory where a new file of `category` should be
/// created. Without a selection the category root itself is the target. A
/// selection under any recognised category root keeps its relative sub-path
/// and replays it onto the requested category's root, so creating a source
/// file while `res/sub/` is selected targets `web-src/sub/`. A selection
/// outside every root targets the selected directory (or a file's parent).
/// The function is pure; repeated calls with the same inputs agree.
/// 計算指定分類下新檔案應建立的實體目錄。未選取節點時以分類根目錄為目標；
/// 選取節點位於任一分類根目錄下時，保留其相對子路徑並映射到
/// 要求分類的根目錄；落在所有根目錄之外時，直接以選取的目錄
///（或檔案的上層目錄）為目標。
pub fn resolve_create_target(
    roots: &CategoryRoots,
    selected: Option<&Selected>,
    category: Category,
) -> Result<PathBuf, ResolveError> {
    let target_root = roots
        .get(category)
        .ok_or(ResolveError::CategoryUnconfigured(category))?;

    let Some(selected) = selected else {
        return Ok(target_root.to_path_buf());
    };

    let base = selected.base_dir();
    for root in roots.all() {
        if let Ok(relative) = base.strip_prefix(root) {
            return Ok(target_root.join(relative));
        }
    }
    Ok(base.to_path_buf())
}
