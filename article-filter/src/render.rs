//! 文章卡片和下拉选项的 HTML 片段

use std::fmt::Write;
use utils_common::models::{ArticleRecord, Theme};

use crate::models::{ThemeFilter, YearFilter, ALL};

/// 没有匹配文章时显示的提示
pub const EMPTY_PLACEHOLDER: &str = "No articles available yet.";

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// 单篇文章卡片：标题、作者 • 年份 • 主题、摘要
pub fn render_article_card(article: &ArticleRecord) -> String {
    format!(
        "<div class=\"article-card\" data-id=\"{id}\"><h4>{title}</h4><p class=\"article-meta\">{authors} • {year} • {theme}</p><p class=\"article-abstract\">{summary}</p></div>",
        id = article.id,
        title = html_escape(&article.title),
        authors = html_escape(&article.authors),
        year = article.year,
        theme = html_escape(article.theme.as_str()),
        summary = html_escape(&article.abstract_text),
    )
}

/// 文章网格，结果为空时输出占位提示
pub fn render_article_grid(articles: &[&ArticleRecord]) -> String {
    let mut html = String::from("<div class=\"article-grid\">");
    if articles.is_empty() {
        let _ = write!(html, "<p>{}</p>", EMPTY_PLACEHOLDER);
    }
    for article in articles {
        html.push_str(&render_article_card(article));
    }
    html.push_str("</div>");
    html
}

fn option(html: &mut String, value: &str, label: &str, selected: bool) {
    let _ = write!(
        html,
        "<option value=\"{}\"{}>{}</option>",
        html_escape(value),
        if selected { " selected" } else { "" },
        html_escape(label)
    );
}

/// 年份下拉选项，第一项为 All Years
pub fn render_year_options(years: &[i32], selected: &YearFilter) -> String {
    let mut html = String::new();
    option(&mut html, ALL, "All Years", *selected == YearFilter::All);
    for &year in years {
        option(&mut html, &year.to_string(), &year.to_string(), *selected == YearFilter::Year(year));
    }
    html
}

/// 主题下拉选项，第一项为 All Themes
pub fn render_theme_options(selected: &ThemeFilter) -> String {
    let mut html = String::new();
    option(&mut html, ALL, "All Themes", *selected == ThemeFilter::All);
    for theme in Theme::ALL {
        option(
            &mut html,
            theme.as_str(),
            theme.as_str(),
            *selected == ThemeFilter::Theme(theme),
        );
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ArticleSource, DemoArticles};

    #[test]
    fn test_card_escapes_text() {
        let articles = DemoArticles.load().unwrap();
        let card = render_article_card(&articles[1]);
        assert!(card.contains("Self-Reflective Agents: Tool-Use &amp; Verification"));
        assert!(card.contains("R. Tanaka, P. Rossi • 2025 • Machine Learning"));

        let card = render_article_card(&articles[2]);
        assert!(card.contains("I. N&#x27;Diaye"));
    }

    #[test]
    fn test_empty_grid_shows_placeholder() {
        let html = render_article_grid(&[]);
        assert!(html.contains("<p>No articles available yet.</p>"));
    }

    #[test]
    fn test_grid_keeps_order() {
        let articles = DemoArticles.load().unwrap();
        let refs: Vec<&ArticleRecord> = articles.iter().rev().collect();
        let html = render_article_grid(&refs);
        let first = html.find("data-id=\"3\"").unwrap();
        let last = html.find("data-id=\"1\"").unwrap();
        assert!(first < last);
        assert!(!html.contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn test_options_mark_selection() {
        let years = render_year_options(&[2025, 2024], &YearFilter::Year(2024));
        assert!(years.starts_with("<option value=\"all\">All Years</option>"));
        assert!(years.contains("<option value=\"2024\" selected>2024</option>"));

        let themes = render_theme_options(&ThemeFilter::All);
        assert!(themes.contains("<option value=\"all\" selected>All Themes</option>"));
        assert!(themes.contains("<option value=\"Ethics &amp; Policy\">Ethics &amp; Policy</option>"));
    }
}
