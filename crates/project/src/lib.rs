//! Logical project-tree construction for `.fccw` workspaces: folder merging
//! across physical roots, category path resolution, and the tree data
//! provider a host UI drives.
//! 為 `.fccw` 工作區建立邏輯專案樹：跨實體根目錄的資料夾合併、
//! 分類路徑解析，以及供宿主 UI 使用的樹狀資料提供者。

pub mod commands;
pub mod merge;
pub mod provider;
pub mod resolve;
pub mod tree;

pub use commands::{create_file, delete_entry, CommandError};
pub use merge::{merge_roots, MergeError};
pub use provider::{IndexError, TreeIndex, TreeItem, NO_CONFIG_MESSAGE};
pub use resolve::{resolve_create_target, CategoryRoots, ResolveError, Selected};
pub use tree::{Section, TreeNode, TreeNodeKind};
