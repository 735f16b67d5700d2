use article_filter::FilterError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

/// 命令行工具的错误
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("{0}")]
    Filter(#[from] FilterError),

    #[error("遍历目录时出错: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    /// 参数或输入不满足要求
    #[error("{0}")]
    Usage(String),
}

impl IndexerError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}
