//! 存储模块
//!
//! 引擎生命周期内的匹配器缓存

pub mod cache;

pub use cache::{compile_literal, CacheStats, RegexCache};
