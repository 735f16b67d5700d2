use thiserror::Error;
use utils_common::CodecError;

/// 过滤器模块的结果类型
pub type Result<T> = std::result::Result<T, FilterError>;

/// 目录加载与构建错误
///
/// 过滤本身不会失败，这些错误只出现在数据加载和目录构建的边界上。
#[derive(Debug, Error)]
pub enum FilterError {
    /// 文章ID重复
    #[error("文章ID重复: {0}")]
    DuplicateId(u32),

    /// 没有任何文章数据
    #[error("无法构建目录: 没有文章数据")]
    EmptyCatalog,

    /// 全局目录尚未加载
    #[error("catalog not initialized")]
    NotInitialized,

    #[error("目录编解码失败: {0}")]
    Codec(#[from] CodecError),

    #[error("解析JSON失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_message() {
        let err = FilterError::DuplicateId(3);
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_codec_error_conversion() {
        let err: FilterError = CodecError::BadMagic.into();
        assert!(matches!(err, FilterError::Codec(CodecError::BadMagic)));
    }
}
