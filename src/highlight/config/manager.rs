//! 简化的配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::highlight::error::{HighlightError, HighlightResult};
use crate::highlight::pipeline::segmenter::ScanMode;

/// 高亮引擎配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    // 调度配置
    pub chunk_size: usize,
    pub min_idle_remaining_ms: u64,
    pub full_pass_timeout_ms: u64,
    pub incremental_timeout_ms: u64,

    // 匹配配置
    pub scan_mode: ScanMode,

    // 映射默认值
    pub default_search_color: String,
    pub default_mapped_color: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: constants::DEFAULT_CHUNK_SIZE,
            min_idle_remaining_ms: constants::MIN_IDLE_REMAINING_MS,
            full_pass_timeout_ms: constants::FULL_PASS_TIMEOUT_MS,
            incremental_timeout_ms: constants::INCREMENTAL_TIMEOUT_MS,
            scan_mode: ScanMode::default(),
            default_search_color: constants::DEFAULT_SEARCH_COLOR.to_string(),
            default_mapped_color: constants::DEFAULT_MAPPED_COLOR.to_string(),
        }
    }
}

impl EngineConfig {
    /// 验证配置
    pub fn validate(&self) -> HighlightResult<()> {
        if self.chunk_size == 0 {
            return Err(HighlightError::ConfigError("分块大小不能为0".to_string()));
        }

        for timeout in [self.full_pass_timeout_ms, self.incremental_timeout_ms] {
            if timeout == 0 || timeout > constants::MAX_TIMEOUT_MS {
                return Err(HighlightError::ConfigError(format!(
                    "调度超时必须在 1 到 {} 毫秒之间",
                    constants::MAX_TIMEOUT_MS
                )));
            }
        }

        if self.default_search_color.trim().is_empty()
            || self.default_mapped_color.trim().is_empty()
        {
            return Err(HighlightError::ConfigError("默认颜色不能为空".to_string()));
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{highlight, EnvVar};

        if let Ok(chunk_size) = highlight::ChunkSize::get() {
            self.chunk_size = chunk_size;
        }

        if let Ok(scan_mode) = highlight::ScanMode::get() {
            tracing::info!("环境变量覆盖扫描模式: {:?}", scan_mode);
            self.scan_mode = scan_mode;
        }

        if let Ok(timeout) = highlight::FullPassTimeout::get() {
            self.full_pass_timeout_ms = timeout.as_millis() as u64;
        }

        if let Ok(timeout) = highlight::IncrementalTimeout::get() {
            self.incremental_timeout_ms = timeout.as_millis() as u64;
        }
    }

    pub fn min_idle_remaining(&self) -> Duration {
        Duration::from_millis(self.min_idle_remaining_ms)
    }

    pub fn full_pass_timeout(&self) -> Duration {
        Duration::from_millis(self.full_pass_timeout_ms)
    }

    pub fn incremental_timeout(&self) -> Duration {
        Duration::from_millis(self.incremental_timeout_ms)
    }
}

/// 配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: EngineConfig,
}

impl ConfigManager {
    /// 创建配置管理器
    ///
    /// 显式路径优先，其次是 `MULTIFIND_CONFIG`，最后搜索默认路径。
    pub fn new(path: Option<&str>) -> HighlightResult<Self> {
        let mut config = match Self::resolve_path(path) {
            Some(path) => {
                tracing::info!("加载配置文件: {}", path);
                Self::load_from_file(&path)?
            }
            None => {
                tracing::debug!("未找到配置文件，使用默认配置");
                EngineConfig::default()
            }
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 获取配置
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn resolve_path(path: Option<&str>) -> Option<String> {
        use crate::env::{highlight, EnvVar};

        if let Some(path) = path {
            return Some(shellexpand::tilde(path).into_owned());
        }

        if let Ok(path) = highlight::ConfigPath::get() {
            return Some(shellexpand::tilde(&path).into_owned());
        }

        constants::CONFIG_PATHS
            .iter()
            .map(|path| shellexpand::tilde(path).into_owned())
            .find(|path| Path::new(path).exists())
    }

    /// 从指定文件加载配置
    pub fn load_from_file(path: &str) -> HighlightResult<EngineConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HighlightError::ConfigError(format!("读取配置文件失败: {}", e)))?;

        // 尝试TOML格式
        if path.ends_with(".toml") {
            toml::from_str(&content)
                .map_err(|e| HighlightError::ConfigError(format!("解析TOML配置失败: {}", e)))
        } else {
            // 尝试JSON格式
            serde_json::from_str(&content)
                .map_err(|e| HighlightError::ConfigError(format!("解析JSON配置失败: {}", e)))
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &str) -> HighlightResult<()> {
        let content = toml::to_string_pretty(&EngineConfig::default())
            .map_err(|e| HighlightError::ConfigError(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| HighlightError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}
