use log::{debug, info};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use utils_common::compression::to_compressed;
use utils_common::models::ArticleRecord;

use crate::error::{FilterError, Result};
use crate::filter::{ArticleCatalog, CATALOG_VERSION};

/// 目录构建器
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    articles: Vec<ArticleRecord>,
}

impl CatalogBuilder {
    /// 创建新的目录构建器
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
        }
    }

    /// 添加文章到构建器
    pub fn add_article(&mut self, article: ArticleRecord) {
        self.articles.push(article);
    }

    /// 构建目录，至少需要一篇文章且ID不能重复
    pub fn build_catalog(&self) -> Result<ArticleCatalog> {
        if self.articles.is_empty() {
            return Err(FilterError::EmptyCatalog);
        }

        debug!("开始构建目录，文章数量: {}", self.articles.len());
        let catalog = ArticleCatalog::new(self.articles.clone())?;
        debug!(
            "目录构建完成，主题数量: {}, 年份数量: {}",
            catalog.metadata().theme_count,
            catalog.years().len()
        );
        Ok(catalog)
    }

    /// 构建并编码为压缩的二进制数据
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let catalog = self.build_catalog()?;
        Ok(to_compressed(&catalog.to_file(), CATALOG_VERSION)?)
    }

    /// 保存目录到文件
    pub fn save_catalog(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = self.to_bytes()?;

        let mut file = File::create(path)?;
        file.write_all(&data)?;

        info!("目录已写入文件: {}，大小: {} 字节", path.display(), data.len());
        Ok(())
    }
}

impl Extend<ArticleRecord> for CatalogBuilder {
    fn extend<I: IntoIterator<Item = ArticleRecord>>(&mut self, iter: I) {
        self.articles.extend(iter);
    }
}
