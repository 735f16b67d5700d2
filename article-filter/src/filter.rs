//! 文章筛选引擎
//!
//! 目录很小，每次状态变化都对全部文章做一次完整遍历，不建索引也不做防抖。

use chrono::Utc;
use log::debug;
use std::collections::{BTreeSet, HashSet};
use utils_common::models::{ArticleRecord, CatalogMetadata};

use crate::error::{FilterError, Result};
use crate::models::{CatalogFile, FilterResult, FilterState, ThemeFilter, YearFilter};
use crate::source::ArticleSource;

/// 目录格式版本
pub const CATALOG_VERSION: [u8; 2] = [1, 0];

/// 文章中出现的全部年份，去重后按从新到旧排序
pub fn available_years(articles: &[ArticleRecord]) -> Vec<i32> {
    let years: BTreeSet<i32> = articles.iter().map(|a| a.year).collect();
    years.into_iter().rev().collect()
}

/// 按筛选状态过滤文章，保持原始顺序
///
/// 三个条件同时满足才保留：年份、主题、搜索词（标题、摘要、作者任一包含即可，忽略大小写）。
pub fn filter_articles<'a>(articles: &'a [ArticleRecord], state: &FilterState) -> Vec<&'a ArticleRecord> {
    let needle = query_needle(state);
    articles
        .iter()
        .filter(|a| article_matches(a, state, needle.as_deref()))
        .collect()
}

fn query_needle(state: &FilterState) -> Option<String> {
    state.has_query().then(|| state.query.to_lowercase())
}

// needle 已经转为小写
fn article_matches(article: &ArticleRecord, state: &FilterState, needle: Option<&str>) -> bool {
    state.year.matches(article.year)
        && state.theme.matches(article.theme)
        && needle.map_or(true, |needle| {
            article.title.to_lowercase().contains(needle)
                || article.abstract_text.to_lowercase().contains(needle)
                || article.authors.to_lowercase().contains(needle)
        })
}

/// 文章ID必须唯一
pub(crate) fn ensure_unique_ids(articles: &[ArticleRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(articles.len());
    for article in articles {
        if !seen.insert(article.id) {
            return Err(FilterError::DuplicateId(article.id));
        }
    }
    Ok(())
}

/// 已加载的文章目录，年份列表在加载时计算一次
#[derive(Debug, Clone)]
pub struct ArticleCatalog {
    metadata: CatalogMetadata,
    articles: Vec<ArticleRecord>,
    years: Vec<i32>,
}

impl ArticleCatalog {
    /// 校验文章并创建目录
    pub fn new(articles: Vec<ArticleRecord>) -> Result<Self> {
        let metadata = CatalogMetadata {
            article_count: articles.len(),
            theme_count: count_themes(&articles),
            created_at: Utc::now(),
            version: format!("{}.{}", CATALOG_VERSION[0], CATALOG_VERSION[1]),
        };
        Self::with_metadata(metadata, articles)
    }

    fn with_metadata(metadata: CatalogMetadata, articles: Vec<ArticleRecord>) -> Result<Self> {
        ensure_unique_ids(&articles)?;
        let years = available_years(&articles);
        debug!("目录已加载，文章: {}，年份: {:?}", articles.len(), years);
        Ok(Self {
            metadata,
            articles,
            years,
        })
    }

    /// 从数据源加载目录
    pub fn from_source(source: &dyn ArticleSource) -> Result<Self> {
        Self::new(source.load()?)
    }

    /// 从目录文件恢复，保留文件中记录的元数据
    pub fn from_file(file: CatalogFile) -> Result<Self> {
        Self::with_metadata(file.metadata, file.articles)
    }

    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            metadata: self.metadata.clone(),
            articles: self.articles.clone(),
        }
    }

    pub fn articles(&self) -> &[ArticleRecord] {
        &self.articles
    }

    /// 可选年份（从新到旧）
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn filter(&self, state: &FilterState) -> Vec<&ArticleRecord> {
        filter_articles(&self.articles, state)
    }

    /// 筛选并生成返回给页面的结果
    pub fn filter_result(&self, state: &FilterState) -> FilterResult {
        let articles: Vec<ArticleRecord> = self.filter(state).into_iter().cloned().collect();
        FilterResult {
            total: articles.len(),
            articles,
            catalog_size: self.articles.len(),
        }
    }
}

fn count_themes(articles: &[ArticleRecord]) -> usize {
    articles.iter().map(|a| a.theme).collect::<HashSet<_>>().len()
}

/// 筛选会话 - 持有目录和当前状态，每次状态变化立即重新计算可见文章
#[derive(Debug)]
pub struct FilterSession {
    catalog: ArticleCatalog,
    state: FilterState,
    visible: Vec<usize>,
}

impl FilterSession {
    /// 以默认状态创建会话，此时全部文章可见
    pub fn new(catalog: ArticleCatalog) -> Self {
        let visible = (0..catalog.len()).collect();
        Self {
            catalog,
            state: FilterState::default(),
            visible,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let next = self.state.with_query(query);
        self.apply(next);
    }

    pub fn set_year(&mut self, year: YearFilter) {
        let next = self.state.with_year(year);
        self.apply(next);
    }

    pub fn set_theme(&mut self, theme: ThemeFilter) {
        let next = self.state.with_theme(theme);
        self.apply(next);
    }

    /// 替换整个状态并重新计算
    pub fn apply(&mut self, state: FilterState) {
        let needle = query_needle(&state);
        self.visible = self
            .catalog
            .articles()
            .iter()
            .enumerate()
            .filter(|(_, a)| article_matches(a, &state, needle.as_deref()))
            .map(|(i, _)| i)
            .collect();
        self.state = state;
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn catalog(&self) -> &ArticleCatalog {
        &self.catalog
    }

    pub fn visible(&self) -> Vec<&ArticleRecord> {
        self.visible
            .iter()
            .map(|&i| &self.catalog.articles()[i])
            .collect()
    }

    /// 当前可见文章，供页面序列化
    pub fn result(&self) -> FilterResult {
        let articles: Vec<ArticleRecord> = self.visible().into_iter().cloned().collect();
        FilterResult {
            total: articles.len(),
            articles,
            catalog_size: self.catalog.len(),
        }
    }
}
