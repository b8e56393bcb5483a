//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存系统的错误类型和处理机制。

use thiserror::Error;

/// 缓存系统错误类型枚举
///
/// 定义了覆盖缓存及其后备存储中可能发生的各种错误类型
#[derive(Error, Debug)]
pub enum CacheError {
    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 提交作用域重入错误
    ///
    /// 同一缓存实例上同时只允许打开一个提交作用域
    #[error("Commit scope already active: {0}")]
    ScopeActive(String),

    /// 后备存储操作失败
    #[error("Backend error: {0}")]
    BackendError(String),

    /// IO错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// 缓存操作结果类型别名
///
/// 简化错误处理，所有缓存操作都返回此类型
pub type Result<T> = std::result::Result<T, CacheError>;
