//! Discovery and parsing of `.fccw` project configuration files.
//! 搜尋與解析 `.fccw` 專案設定檔的核心模組。

pub mod locator;
pub mod model;

pub use locator::{locate_configs, LocateError, CONFIG_EXTENSION};
pub use model::{
    Category, ConfigError, ProjectConfig, DEFAULT_INCLUDE_DIR, DEFAULT_RESOURCES_DIR,
    DEFAULT_SOURCE_DIR,
};
