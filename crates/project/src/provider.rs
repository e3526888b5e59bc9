use std::fmt;
use std::path::{Path, PathBuf};

use fccw_config::{locate_configs, ConfigError, LocateError, ProjectConfig};
use thiserror::Error;

use crate::merge::{merge_roots, MergeError};
use crate::resolve::CategoryRoots;
use crate::tree::{Section, TreeNode, TreeNodeKind};

/// Label of the informational node shown when no configuration exists.
/// 工作區內沒有設定檔時顯示的提示文字。
pub const NO_CONFIG_MESSAGE: &str = "No .fccw project configuration found in this workspace";

/// Errors raised while answering a tree request.
/// 回應樹狀請求時可能發生的錯誤。
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("workspace scan failed: {0}")]
    Locate(#[from] LocateError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("merge failed: {0}")]
    Merge(#[from] MergeError),
}

type Listener = Box<dyn Fn() + Send>;

/// Renderable projection of a tree node for the host UI.
/// 供宿主 UI 渲染的節點投影。
#[derive(Debug, Clone, PartialEq)]
pub struct TreeItem {
    pub label: String,
    pub expandable: bool,
    pub path: Option<PathBuf>,
}

/// Tree data provider over one workspace root. An explicitly constructed
/// service object owned by the host; every root request re-reads the
/// filesystem, so `refresh` only has to notify subscribers.
/// 以單一工作區根目錄為範圍的樹狀資料提供者。由宿主明確建構並持有；
/// 每次請求都重新讀取檔案系統，因此 `refresh` 只需通知訂閱者。
pub struct TreeIndex {
    workspace_root: PathBuf,
    revision: u64,
    listeners: Vec<Listener>,
}

impl TreeIndex {
    pub fn new(workspace_root: impl AsRef<Path>) -> Self {
        Self {
            workspace_root: workspace_root.as_ref().to_path_buf(),
            revision: 0,
            listeners: Vec::new(),
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Lists the children of `node`, or the top level when `node` is absent.
    ///
    /// The top level depends on how many configurations the workspace holds:
    /// none yields a single informational leaf, exactly one exposes its two
    /// sections directly, and several yield one grouping node per file, each
    /// lazily expanded into its own sections.
    /// 列出 `node` 的子節點；`node` 缺席時回傳頂層內容。頂層內容取決於
    /// 工作區內設定檔的數量：零個時回傳單一提示節點，恰好一個時直接
    /// 展開其兩個區段，多個時每個設定檔各佔一個群組節點。
    pub fn children(&self, node: Option<&TreeNode>) -> Result<Vec<TreeNode>, IndexError> {
        match node {
            None => self.top_level(),
            Some(node) => match &node.kind {
                TreeNodeKind::Config { config_path } => self.sections(config_path),
                TreeNodeKind::Section { children, .. } | TreeNodeKind::Entry { children, .. } => {
                    Ok(children.clone())
                }
                TreeNodeKind::Message => Ok(Vec::new()),
            },
        }
    }

    /// Renderable projection of `node` for the host.
    /// 供宿主渲染的節點投影。
    pub fn tree_item(&self, node: &TreeNode) -> TreeItem {
        let path = match &node.kind {
            TreeNodeKind::Config { config_path } => Some(config_path.clone()),
            TreeNodeKind::Entry { path, .. } => Some(path.clone()),
            _ => None,
        };
        TreeItem {
            label: node.label.clone(),
            expandable: node.is_expandable(),
            path,
        }
    }

    /// Category roots of one configuration, for command targeting.
    /// 取得單一設定檔的分類根目錄，供指令解析使用。
    pub fn category_roots(&self, config_path: &Path) -> Result<CategoryRoots, IndexError> {
        let config = ProjectConfig::load(config_path)?;
        Ok(CategoryRoots::from_config(&config, &self.workspace_root))
    }

    /// Invalidates the tree and fires every subscribed listener. The next
    /// child request rebuilds from the filesystem.
    /// 使目前的樹失效並通知所有訂閱者；下次請求會重新建樹。
    pub fn refresh(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        for listener in &self.listeners {
            listener();
        }
    }

    /// Registers a change listener fired on every `refresh`.
    /// 註冊每次 `refresh` 都會觸發的變更監聽器。
    pub fn subscribe(&mut self, listener: impl Fn() + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn top_level(&self) -> Result<Vec<TreeNode>, IndexError> {
        let configs = locate_configs(&self.workspace_root)?;
        match configs.as_slice() {
            [] => Ok(vec![TreeNode::message(NO_CONFIG_MESSAGE)]),
            [single] => self.sections(single),
            many => Ok(many
                .iter()
                .map(|path| TreeNode::config(path.clone()))
                .collect()),
        }
    }

    /// Builds the logical sections of one configuration. A parse failure
    /// aborts only this configuration's subtree.
    fn sections(&self, config_path: &Path) -> Result<Vec<TreeNode>, IndexError> {
        let config = ProjectConfig::load(config_path)?;
        let roots = CategoryRoots::from_config(&config, &self.workspace_root);

        let mut sections = Vec::new();
        let combined = roots.combined_source_roots();
        if !combined.is_empty() {
            sections.push(TreeNode::section(
                Section::CombinedSource,
                config_path.to_path_buf(),
                merge_roots(&combined)?,
            ));
        }
        let includes = roots.include_roots();
        if !includes.is_empty() {
            sections.push(TreeNode::section(
                Section::Includes,
                config_path.to_path_buf(),
                merge_roots(&includes)?,
            ));
        }
        Ok(sections)
    }
}

impl fmt::Debug for TreeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeIndex")
            .field("workspace_root", &self.workspace_root)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
