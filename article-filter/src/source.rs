use utils_common::compression::from_compressed;
use utils_common::models::{ArticleRecord, Theme};

use crate::error::Result;
use crate::models::CatalogFile;

/// 文章数据源 - 返回完整的文章列表
///
/// 筛选引擎只依赖这个接口，替换内容来源不需要修改筛选逻辑。
pub trait ArticleSource {
    fn load(&self) -> Result<Vec<ArticleRecord>>;
}

/// 内置示例文章
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoArticles;

impl ArticleSource for DemoArticles {
    fn load(&self) -> Result<Vec<ArticleRecord>> {
        Ok(vec![
            ArticleRecord {
                id: 1,
                title: "Transformer-Efficient Fine-Tuning for Low-Resource Domains".to_string(),
                authors: "S. Ahmed, L. Chen".to_string(),
                year: 2025,
                theme: Theme::Nlp,
                abstract_text: "Parameter-efficient fine-tuning for large language models in specialized low-resource domains.".to_string(),
            },
            ArticleRecord {
                id: 2,
                title: "Self-Reflective Agents: Tool-Use & Verification".to_string(),
                authors: "R. Tanaka, P. Rossi".to_string(),
                year: 2025,
                theme: Theme::MachineLearning,
                abstract_text: "Combining tool-use with iterative self-verification for reliable long-horizon tasks.".to_string(),
            },
            ArticleRecord {
                id: 3,
                title: "Geometry-Aware Diffusion Models for 3D Reconstruction".to_string(),
                authors: "H. Müller, I. N'Diaye".to_string(),
                year: 2024,
                theme: Theme::ComputerVision,
                abstract_text: "Aligning diffusion priors with multi-view constraints for high-fidelity reconstruction.".to_string(),
            },
        ])
    }
}

/// JSON 数组格式的文章列表
#[derive(Debug, Clone)]
pub struct JsonArticles(pub String);

impl ArticleSource for JsonArticles {
    fn load(&self) -> Result<Vec<ArticleRecord>> {
        Ok(serde_json::from_str(&self.0)?)
    }
}

/// 压缩的目录文件 (catalog.bin)
#[derive(Debug, Clone, Copy)]
pub struct CompressedCatalog<'a>(pub &'a [u8]);

impl CompressedCatalog<'_> {
    /// 解码整个目录文件，包括元数据
    pub fn decode(&self) -> Result<CatalogFile> {
        Ok(from_compressed(self.0)?)
    }
}

impl ArticleSource for CompressedCatalog<'_> {
    fn load(&self) -> Result<Vec<ArticleRecord>> {
        Ok(self.decode()?.articles)
    }
}
