//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量管理

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "MULTIFIND_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("warn".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 高亮引擎相关环境变量
pub mod highlight {
    use super::*;

    /// 配置文件路径
    pub struct ConfigPath;
    impl EnvVar<String> for ConfigPath {
        const NAME: &'static str = "MULTIFIND_CONFIG";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Path to a TOML or JSON engine configuration file";

        fn parse(value: &str) -> EnvResult<String> {
            let path = value.trim();
            if path.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Path must not be empty".to_string(),
                });
            }
            Ok(path.to_string())
        }
    }

    /// 每个分块处理的文本节点数
    pub struct ChunkSize;
    impl EnvVar<usize> for ChunkSize {
        const NAME: &'static str = "MULTIFIND_CHUNK_SIZE";
        const DEFAULT: Option<usize> = None;
        const DESCRIPTION: &'static str = "Text nodes processed per idle chunk (1-10000)";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 10_000)
        }
    }

    /// 片段扫描模式
    pub struct ScanMode;
    impl EnvVar<crate::highlight::pipeline::segmenter::ScanMode> for ScanMode {
        const NAME: &'static str = "MULTIFIND_SCAN_MODE";
        const DEFAULT: Option<crate::highlight::pipeline::segmenter::ScanMode> = None;
        const DESCRIPTION: &'static str = "Segment scan mode: cursor, gap-fill";

        fn parse(value: &str) -> EnvResult<crate::highlight::pipeline::segmenter::ScanMode> {
            value.parse().map_err(|message| EnvError {
                variable: Self::NAME.to_string(),
                message,
            })
        }
    }

    /// 全量高亮的最长等待时间
    pub struct FullPassTimeout;
    impl EnvVar<Duration> for FullPassTimeout {
        const NAME: &'static str = "MULTIFIND_FULL_PASS_TIMEOUT_MS";
        const DEFAULT: Option<Duration> = None;
        const DESCRIPTION: &'static str = "Maximum wait for an idle window during a full pass, in milliseconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_millis(value, Self::NAME)
        }
    }

    /// 增量高亮的最长等待时间
    pub struct IncrementalTimeout;
    impl EnvVar<Duration> for IncrementalTimeout {
        const NAME: &'static str = "MULTIFIND_INCREMENTAL_TIMEOUT_MS";
        const DEFAULT: Option<Duration> = None;
        const DESCRIPTION: &'static str =
            "Maximum wait for an idle window during an incremental pass, in milliseconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_millis(value, Self::NAME)
        }
    }
}

/// 辅助函数
fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

fn parse_millis(value: &str, var_name: &str) -> EnvResult<Duration> {
    let millis: u64 = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid number of milliseconds".to_string(),
    })?;

    if millis == 0 {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Timeout must be greater than 0".to_string(),
        });
    }

    if millis > 60_000 {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Timeout too long (max 60000 milliseconds)".to_string(),
        });
    }

    Ok(Duration::from_millis(millis))
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {}\n",
        core::LogLevel::NAME,
        core::LogLevel::DESCRIPTION
    ));

    docs.push_str("\n## Highlight Engine Configuration\n\n");
    for (name, description) in [
        (highlight::ConfigPath::NAME, highlight::ConfigPath::DESCRIPTION),
        (highlight::ChunkSize::NAME, highlight::ChunkSize::DESCRIPTION),
        (highlight::ScanMode::NAME, highlight::ScanMode::DESCRIPTION),
        (highlight::FullPassTimeout::NAME, highlight::FullPassTimeout::DESCRIPTION),
        (
            highlight::IncrementalTimeout::NAME,
            highlight::IncrementalTimeout::DESCRIPTION,
        ),
    ] {
        docs.push_str(&format!("- `{}`: {}\n", name, description));
    }

    docs
}
