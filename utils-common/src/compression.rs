use std::io::{self, Read, Write};
use flate2::{Compression, write::GzEncoder, read::GzDecoder};
use thiserror::Error;

/// 魔数常量 - 用于标识文件格式
pub const MAGIC_BYTES: &'static [u8] = b"IAJRC"; // IAJR Catalog

/// 头部长度：魔数 + 版本号(2) + 原始数据大小(4)
const HEADER_LEN: usize = MAGIC_BYTES.len() + 2 + 4;

/// 编解码错误
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("数据太短，无法解析: {0} 字节")]
    TooShort(usize),

    #[error("无效的文件格式：魔数不匹配")]
    BadMagic,

    #[error("不支持的版本: {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("解压后数据大小不匹配: 期望 {expected} 字节, 实际 {actual} 字节")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("序列化失败: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("反序列化失败: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),
}

/// 将对象序列化为二进制格式
pub fn to_binary<T: serde::Serialize>(obj: &T) -> Result<Vec<u8>, CodecError> {
    Ok(bincode::serde::encode_to_vec(obj, bincode::config::standard())?)
}

/// 从二进制格式反序列化对象
pub fn from_binary<T: for<'a> serde::de::Deserialize<'a>>(data: &[u8]) -> Result<T, CodecError> {
    let (value, _) = bincode::serde::decode_from_slice(data, bincode::config::standard())?;
    Ok(value)
}

/// 将对象序列化为压缩的二进制格式
pub fn to_compressed<T: serde::Serialize>(obj: &T, version: [u8; 2]) -> Result<Vec<u8>, CodecError> {
    let binary = to_binary(obj)?;

    let mut output = Vec::with_capacity(HEADER_LEN + binary.len() / 2);
    output.extend_from_slice(MAGIC_BYTES);
    output.extend_from_slice(&version);
    output.extend_from_slice(&(binary.len() as u32).to_le_bytes());

    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&binary)?;
    output.extend_from_slice(&encoder.finish()?);

    Ok(output)
}

/// 从压缩的二进制格式反序列化对象，使用默认最大版本1
pub fn from_compressed<T: for<'a> serde::de::Deserialize<'a>>(data: &[u8]) -> Result<T, CodecError> {
    from_compressed_with_max_version(data, 1)
}

/// 从压缩的二进制格式反序列化对象，允许指定支持的最大版本
pub fn from_compressed_with_max_version<T: for<'a> serde::de::Deserialize<'a>>(
    data: &[u8],
    max_version: u8,
) -> Result<T, CodecError> {
    validate_compressed_data_with_max_version(data, max_version)?;

    // 读取原始数据大小
    let size_offset = MAGIC_BYTES.len() + 2;
    let mut size_bytes = [0u8; 4];
    size_bytes.copy_from_slice(&data[size_offset..HEADER_LEN]);
    let original_size = u32::from_le_bytes(size_bytes) as usize;

    let mut decoder = GzDecoder::new(&data[HEADER_LEN..]);
    let mut decompressed_data = Vec::with_capacity(original_size);
    decoder.read_to_end(&mut decompressed_data)?;

    if decompressed_data.len() != original_size {
        return Err(CodecError::SizeMismatch {
            expected: original_size,
            actual: decompressed_data.len(),
        });
    }

    from_binary(&decompressed_data)
}

/// 验证压缩数据是否有效
pub fn validate_compressed_data(data: &[u8]) -> Result<[u8; 2], CodecError> {
    validate_compressed_data_with_max_version(data, 1)
}

/// 验证压缩数据是否有效，允许指定支持的最大版本
pub fn validate_compressed_data_with_max_version(data: &[u8], max_version: u8) -> Result<[u8; 2], CodecError> {
    if data.len() < HEADER_LEN {
        return Err(CodecError::TooShort(data.len()));
    }

    if &data[0..MAGIC_BYTES.len()] != MAGIC_BYTES {
        return Err(CodecError::BadMagic);
    }

    let version_offset = MAGIC_BYTES.len();
    let version = [data[version_offset], data[version_offset + 1]];

    // 只比较主版本号
    if version[0] > max_version {
        return Err(CodecError::UnsupportedVersion {
            major: version[0],
            minor: version[1],
        });
    }

    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleRecord, Theme};
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<ArticleRecord> {
        vec![ArticleRecord {
            id: 1,
            title: "Geometry-Aware Diffusion Models for 3D Reconstruction".to_string(),
            authors: "H. Müller, I. N'Diaye".to_string(),
            year: 2024,
            theme: Theme::ComputerVision,
            abstract_text: "Aligning diffusion priors with multi-view constraints.".to_string(),
        }]
    }

    #[test]
    fn test_compressed_header_layout() {
        let data = to_compressed(&sample(), [1, 3]).unwrap();
        assert_eq!(&data[..5], b"IAJRC");
        assert_eq!(validate_compressed_data(&data).unwrap(), [1, 3]);

        let decoded: Vec<ArticleRecord> = from_compressed(&data).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_rejects_short_and_bad_magic() {
        assert!(matches!(validate_compressed_data(b"IAJ"), Err(CodecError::TooShort(3))));

        let mut data = to_compressed(&sample(), [1, 0]).unwrap();
        data[0] = b'X';
        assert!(matches!(
            from_compressed::<Vec<ArticleRecord>>(&data),
            Err(CodecError::BadMagic)
        ));
    }

    #[test]
    fn test_rejects_newer_major_version() {
        let data = to_compressed(&sample(), [2, 0]).unwrap();
        assert!(matches!(
            from_compressed::<Vec<ArticleRecord>>(&data),
            Err(CodecError::UnsupportedVersion { major: 2, minor: 0 })
        ));
        assert!(from_compressed_with_max_version::<Vec<ArticleRecord>>(&data, 2).is_ok());
    }

    #[test]
    fn test_detects_size_mismatch() {
        let mut data = to_compressed(&sample(), [1, 0]).unwrap();
        let size_offset = MAGIC_BYTES.len() + 2;
        data[size_offset] = data[size_offset].wrapping_add(1);
        assert!(matches!(
            from_compressed::<Vec<ArticleRecord>>(&data),
            Err(CodecError::SizeMismatch { .. })
        ));
    }
}
