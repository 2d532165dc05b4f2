use std::path::PathBuf;

use thiserror::Error;

/// 核心库错误类型
#[derive(Error, Debug)]
pub enum Error {
    /// 输入文件不存在
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// 无法解析的大小字符串
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// 文件读写失败
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化失败
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// 并发写入任务异常退出
    #[error("Write task failed: {0}")]
    Task(String),
}

/// 核心库结果类型
pub type Result<T> = std::result::Result<T, Error>;
