//! 从文章 HTML 页面提取目录记录
//!
//! 期刊文章页使用 Highwire 风格的 `citation_*` meta 标签描述元数据。

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use log::{debug, warn};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use utils_common::models::{ArticleRecord, Theme};
use walkdir::WalkDir;

use crate::error::{IndexerError, Result};

/// 从单个页面提取到的文章信息，ID 在扫描结束后统一分配
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: String,
    pub authors: String,
    pub year: i32,
    pub theme: Theme,
    pub abstract_text: String,
}

impl ExtractedArticle {
    pub fn into_record(self, id: u32) -> ArticleRecord {
        ArticleRecord {
            id,
            title: self.title,
            authors: self.authors,
            year: self.year,
            theme: self.theme,
            abstract_text: self.abstract_text,
        }
    }
}

/// 扫描结果
#[derive(Debug, Default)]
pub struct ScanReport {
    pub articles: Vec<ArticleRecord>,
    /// 跳过的 HTML 文件数量
    pub skipped: usize,
}

/// 递归扫描目录中的 HTML 文件，按路径顺序分配 ID (从 1 开始)
pub fn scan_html_files(dir_path: &Path) -> Result<ScanReport> {
    let mut report = ScanReport::default();

    for entry in WalkDir::new(dir_path).sort_by_file_name() {
        let entry = entry?;

        // 只处理HTML文件
        if !entry.file_type().is_file() || entry.path().extension().map_or(true, |ext| ext != "html") {
            continue;
        }

        // 只根据相对于源目录的路径判断，源目录本身的位置不影响结果
        let relative = entry.path().strip_prefix(dir_path).unwrap_or(entry.path());
        if is_system_file(relative) {
            report.skipped += 1;
            continue;
        }

        let extracted = fs::read_to_string(entry.path())
            .map_err(IndexerError::from)
            .and_then(|html| extract_article_from_html(&html));
        match extracted {
            Ok(Some(article)) => {
                debug!("处理: {}", entry.path().display());
                let id = report.articles.len() as u32 + 1;
                report.articles.push(article.into_record(id));
            }
            Ok(None) => {
                warn!("跳过缺少标题、年份或主题的页面: {}", entry.path().display());
                report.skipped += 1;
            }
            Err(err) => {
                warn!("解析文件时出错 {}: {}", entry.path().display(), err);
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

// 站点自带的非文章页面：根目录的 index.html、任意层级的 404.html 和 search/ 目录
fn is_system_file(relative: &Path) -> bool {
    let path = relative.to_string_lossy().replace('\\', "/").to_lowercase();
    path == "index.html"
        || path == "404.html"
        || path.ends_with("/404.html")
        || path.starts_with("search/")
        || path.contains("/search/")
}

/// 解析 HTML 并提取文章信息，缺少标题、年份或主题时返回 None
pub fn extract_article_from_html(html: &str) -> Result<Option<ExtractedArticle>> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let meta = extract_meta_tags(&dom.document);

    let title = first_meta(&meta, &["citation_title", "og:title"])
        .map(str::to_string)
        .or_else(|| find_element_text(&dom.document, "title"))
        .or_else(|| find_element_text(&dom.document, "h1"))
        .unwrap_or_default();
    if title.is_empty() {
        return Ok(None);
    }

    let year = first_meta(&meta, &["citation_publication_date", "citation_date", "article:published_time"])
        .and_then(parse_year);
    let Some(year) = year else {
        return Ok(None);
    };

    let theme = ["citation_keywords", "dc.subject", "article:section"]
        .iter()
        .filter_map(|key| meta.get(*key))
        .flatten()
        .flat_map(|value| value.split([',', ';']))
        .find_map(Theme::from_label_lenient);
    let Some(theme) = theme else {
        return Ok(None);
    };

    let authors = meta
        .get("citation_author")
        .map(|names| {
            names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    let abstract_text = first_meta(&meta, &["citation_abstract", "description", "og:description"])
        .map(normalize_whitespace)
        .unwrap_or_default();

    Ok(Some(ExtractedArticle {
        title: normalize_whitespace(&title),
        authors,
        year,
        theme,
        abstract_text,
    }))
}

// 日期字符串的前四位是年份，如 2025/03/01 或 2025-03-01T00:00:00Z
fn parse_year(date: &str) -> Option<i32> {
    let date = date.trim();
    let digits = date.get(..4)?;
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn first_meta<'a>(meta: &'a HashMap<String, Vec<String>>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| meta.get(*key))
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// 收集所有 meta 标签，键为 name 或 property，重复的键保留全部取值
fn extract_meta_tags(handle: &Handle) -> HashMap<String, Vec<String>> {
    let mut meta_tags = HashMap::new();
    extract_meta_tags_internal(handle, &mut meta_tags);
    meta_tags
}

fn extract_meta_tags_internal(handle: &Handle, meta_tags: &mut HashMap<String, Vec<String>>) {
    if let NodeData::Element { ref name, ref attrs, .. } = handle.data {
        if name.local.as_ref() == "meta" {
            let attrs = attrs.borrow();
            let find = |attr_name: &str| {
                attrs
                    .iter()
                    .find(|attr| attr.name.local.as_ref() == attr_name)
                    .map(|attr| attr.value.to_string())
            };

            if let (Some(key), Some(content)) = (find("name").or_else(|| find("property")), find("content")) {
                meta_tags.entry(key.to_lowercase()).or_default().push(content);
            }
        }
    }

    for child in handle.children.borrow().iter() {
        extract_meta_tags_internal(child, meta_tags);
    }
}

/// 第一个指定标签的文本内容
fn find_element_text(handle: &Handle, tag: &str) -> Option<String> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if name.local.as_ref() == tag {
            let mut text = String::new();
            extract_text_from_node(handle, &mut text);
            let text = normalize_whitespace(&text);
            return (!text.is_empty()).then_some(text);
        }
    }

    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element_text(child, tag))
}

fn extract_text_from_node(handle: &Handle, text: &mut String) {
    if let NodeData::Text { ref contents } = handle.data {
        text.push_str(&contents.borrow());
        text.push(' ');
    }
    for child in handle.children.borrow().iter() {
        extract_text_from_node(child, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ARTICLE_PAGE: &str = r#"<!DOCTYPE html>
<html><head>
<title>Ignored page title</title>
<meta name="citation_title" content="Geometry-Aware Diffusion Models for 3D Reconstruction">
<meta name="citation_author" content="H. Müller">
<meta name="citation_author" content="I. N'Diaye">
<meta name="citation_publication_date" content="2024/11/02">
<meta name="citation_keywords" content="diffusion; Computer Vision; 3D">
<meta name="citation_abstract" content="Aligning diffusion priors with
   multi-view constraints.">
</head><body><h1>Body heading</h1></body></html>"#;

    #[test]
    fn test_extracts_citation_meta() {
        let article = extract_article_from_html(ARTICLE_PAGE).unwrap().unwrap();
        assert_eq!(
            article,
            ExtractedArticle {
                title: "Geometry-Aware Diffusion Models for 3D Reconstruction".to_string(),
                authors: "H. Müller, I. N'Diaye".to_string(),
                year: 2024,
                theme: Theme::ComputerVision,
                abstract_text: "Aligning diffusion priors with multi-view constraints.".to_string(),
            }
        );
    }

    #[test]
    fn test_title_falls_back_to_title_tag() {
        let html = r#"<html><head><title> Safe  Grasping </title>
<meta name="citation_date" content="2023-05-01">
<meta name="dc.subject" content="robotics">
</head><body></body></html>"#;
        let article = extract_article_from_html(html).unwrap().unwrap();
        assert_eq!(article.title, "Safe Grasping");
        assert_eq!(article.theme, Theme::Robotics);
        assert_eq!(article.authors, "");
    }

    #[test]
    fn test_pages_without_theme_or_year_are_skipped() {
        let no_theme = r#"<html><head><title>T</title><meta name="citation_date" content="2023"></head></html>"#;
        assert!(extract_article_from_html(no_theme).unwrap().is_none());

        let no_year = r#"<html><head><title>T</title><meta name="citation_keywords" content="NLP"></head></html>"#;
        assert!(extract_article_from_html(no_year).unwrap().is_none());
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2025-03-01T00:00:00Z"), Some(2025));
        assert_eq!(parse_year(" 2024/01/01"), Some(2024));
        assert_eq!(parse_year("Mar 2024"), None);
        assert_eq!(parse_year("20"), None);
    }

    #[test]
    fn test_system_files_are_relative_to_source() {
        assert!(is_system_file(Path::new("index.html")));
        assert!(is_system_file(Path::new("404.html")));
        assert!(is_system_file(Path::new("search/index.html")));
        assert!(is_system_file(Path::new("docs/search/results.html")));
        assert!(!is_system_file(Path::new("articles/my-paper/index.html")));
        assert!(!is_system_file(Path::new("paper.html")));
    }

    #[test]
    fn test_scan_keeps_nested_index_pages() {
        let dir = tempfile::tempdir().unwrap();
        let slug = dir.path().join("articles").join("my-paper");
        fs::create_dir_all(&slug).unwrap();
        fs::write(slug.join("index.html"), ARTICLE_PAGE).unwrap();
        fs::write(dir.path().join("index.html"), "<html><head><title>Home</title></head></html>").unwrap();

        let report = scan_html_files(dir.path()).unwrap();
        assert_eq!(report.articles.len(), 1);
        assert_eq!(report.articles[0].year, 2024);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_scan_source_below_search_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("search").join("journal");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("paper.html"), ARTICLE_PAGE).unwrap();

        let report = scan_html_files(&source).unwrap();
        assert_eq!(report.articles.len(), 1);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_scan_continues_past_unreadable_page() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.html"), ARTICLE_PAGE).unwrap();
        fs::write(dir.path().join("b.html"), [0xffu8, 0xfe]).unwrap();
        fs::write(dir.path().join("c.html"), ARTICLE_PAGE.replace("2024/11/02", "2023/06/30")).unwrap();

        let report = scan_html_files(dir.path()).unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.articles.len(), 2);
        assert_eq!(report.articles[0].id, 1);
        assert_eq!(report.articles[1].id, 2);
        assert_eq!(report.articles[1].year, 2023);
    }

    #[test]
    fn test_scan_assigns_ids_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        let articles = dir.path().join("articles");
        fs::create_dir_all(&articles).unwrap();
        fs::write(articles.join("b.html"), ARTICLE_PAGE).unwrap();
        fs::write(
            articles.join("a.html"),
            ARTICLE_PAGE.replace("2024/11/02", "2025/01/15"),
        )
        .unwrap();
        fs::write(articles.join("notes.txt"), "not html").unwrap();
        fs::write(dir.path().join("404.html"), "<html></html>").unwrap();
        fs::write(articles.join("draft.html"), "<html><head><title>Draft</title></head></html>").unwrap();

        let report = scan_html_files(dir.path()).unwrap();
        assert_eq!(report.skipped, 2);
        assert_eq!(report.articles.len(), 2);
        assert_eq!(report.articles[0].id, 1);
        assert_eq!(report.articles[0].year, 2025);
        assert_eq!(report.articles[1].id, 2);
        assert_eq!(report.articles[1].year, 2024);
    }
}
