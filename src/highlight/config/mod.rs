//! 高亮配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, EngineConfig};

/// 配置常量
pub mod constants {
    // 分块调度相关
    pub const DEFAULT_CHUNK_SIZE: usize = 50;
    pub const MIN_IDLE_REMAINING_MS: u64 = 10;
    pub const FULL_PASS_TIMEOUT_MS: u64 = 1000;
    pub const INCREMENTAL_TIMEOUT_MS: u64 = 500;
    pub const MAX_TIMEOUT_MS: u64 = 60_000;

    // 默认颜色
    pub const DEFAULT_SEARCH_COLOR: &str = "#fff34d";
    pub const DEFAULT_MAPPED_COLOR: &str = "#4dd0e1";

    // 标记元素
    pub const MARKER_TAG: &str = "span";
    pub const MARKER_CLASS: &str = "multi-find-highlight";
    pub const ROLE_ATTR: &str = "data-multi-find-role";
    pub const GROUP_ATTR: &str = "data-multi-find-group";

    /// 显式退出高亮的属性
    pub const IGNORE_ATTR: &str = "data-multi-find-ignore";

    // 跳过的元素
    pub const SKIP_ELEMENTS: &[&str] = &[
        "script", "style", "noscript", "iframe", "object", "svg", "canvas",
    ];

    /// 标记元素从上下文继承的排版属性
    pub const INHERITED_TYPOGRAPHY: &[&str] =
        &["font-family", "font-size", "line-height", "letter-spacing"];

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "multifind.toml",
        ".multifind.toml",
        "~/.config/multifind/config.toml",
    ];
}

/// 加载配置，失败时回退到默认配置
pub fn load_engine_config(path: Option<&str>) -> EngineConfig {
    match ConfigManager::new(path) {
        Ok(manager) => manager.config().clone(),
        Err(e) => {
            tracing::warn!("配置加载失败，使用默认配置: {}", e);
            let mut config = EngineConfig::default();
            config.apply_env_overrides();
            config
        }
    }
}
