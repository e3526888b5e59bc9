use std::path::{Path, PathBuf};

/// Top-level logical sections shown under one configuration.
/// 單一設定檔下顯示的頂層邏輯區段。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    CombinedSource,
    Includes,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::CombinedSource => "Combined source",
            Section::Includes => "Includes",
        }
    }
}

/// The kind of node handed to the host.
/// 交付給宿主的節點類型。
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNodeKind {
    /// Informational leaf with no action affordances.
    Message,
    /// Grouping node for one configuration file; expands into its sections.
    Config { config_path: PathBuf },
    /// One of the two logical sections, with its subtree computed eagerly.
    Section {
        section: Section,
        config_path: PathBuf,
        children: Vec<TreeNode>,
    },
    /// A physical filesystem entry. `path` is the canonical physical path
    /// (the first contributing root wins) used for open/create/delete
    /// targeting; `children` hold the union across every merged root.
    Entry {
        path: PathBuf,
        is_dir: bool,
        children: Vec<TreeNode>,
    },
}

/// Immutable node of the logical project tree. Nodes are rebuilt from
/// scratch on every root request and never mutated after being returned.
/// 邏輯專案樹中的不可變節點；每次請求都重新建立，回傳後不再變動。
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub label: String,
    pub kind: TreeNodeKind,
}

impl TreeNode {
    pub fn message(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: TreeNodeKind::Message,
        }
    }

    /// A grouping node labelled by the configuration's file name.
    /// 以設定檔檔名為標籤的群組節點。
    pub fn config(config_path: PathBuf) -> Self {
        let label = config_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| config_path.display().to_string());
        Self {
            label,
            kind: TreeNodeKind::Config { config_path },
        }
    }

    pub fn section(section: Section, config_path: PathBuf, children: Vec<TreeNode>) -> Self {
        Self {
            label: section.label().to_string(),
            kind: TreeNodeKind::Section {
                section,
                config_path,
                children,
            },
        }
    }

    pub fn entry(label: String, path: PathBuf, is_dir: bool, children: Vec<TreeNode>) -> Self {
        Self {
            label,
            kind: TreeNodeKind::Entry {
                path,
                is_dir,
                children,
            },
        }
    }

    /// Whether the host should render this node as expandable.
    /// 宿主是否應將此節點顯示為可展開。
    pub fn is_expandable(&self) -> bool {
        match &self.kind {
            TreeNodeKind::Message => false,
            TreeNodeKind::Config { .. } | TreeNodeKind::Section { .. } => true,
            TreeNodeKind::Entry { is_dir, .. } => *is_dir,
        }
    }

    /// The canonical physical path, for filesystem entry nodes only.
    /// 僅檔案系統節點擁有的標準實體路徑。
    pub fn physical_path(&self) -> Option<&Path> {
        match &self.kind {
            TreeNodeKind::Entry { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match &self.kind {
            TreeNodeKind::Section { children, .. } | TreeNodeKind::Entry { children, .. } => {
                children
            }
            _ => &[],
        }
    }
}
