//! 期刊主页的静态 HTML
//!
//! 页面内容都是常量，只有文章网格和下拉选项来自目录，输出的是默认筛选状态下的初始内容。
//!
//! 生成的页面本身不加载 wasm。筛选交互需要另外的页面脚本完成：加载 article-filter
//! 的 wasm 包，读取 `<body data-catalog>` 指向的目录文件并调用 `ArticleFilterJS.init`，
//! 然后把 `#article-query`、`#article-year`、`#article-theme` 的变化分别交给
//! `set_query`、`set_year`、`set_theme`，再用 `render_current` 的结果替换 `.article-grid`。

use std::fmt::Write;

use article_filter::render::{
    html_escape, render_article_grid, render_theme_options, render_year_options,
};
use article_filter::{ArticleCatalog, FilterState};
use chrono::{Datelike, Utc};

/// 编委会成员
#[derive(Debug, Clone)]
pub struct BoardMember {
    pub name: &'static str,
    pub role: &'static str,
    pub affiliation: &'static str,
}

/// 可下载的投稿模板
#[derive(Debug, Clone)]
pub struct Template {
    pub label: &'static str,
    pub href: &'static str,
}

/// 期刊信息
#[derive(Debug, Clone)]
pub struct JournalProfile {
    pub name: &'static str,
    pub short_name: &'static str,
    pub tagline: &'static str,
    pub hero_subtitle: &'static str,
    pub logo: &'static str,
    pub submission_form: &'static str,
    /// (标题, 内容)
    pub announcements: Vec<(&'static str, &'static str)>,
    pub scope: Vec<&'static str>,
    pub board: Vec<BoardMember>,
    pub indexing: Vec<&'static str>,
    pub fee_per_article_usd: u32,
    pub max_pages: u32,
    pub templates: Vec<Template>,
    pub guidelines: Vec<&'static str>,
    pub contact_email: &'static str,
}

impl JournalProfile {
    pub fn iajr() -> Self {
        Self {
            name: "International AI Journal & Review",
            short_name: "IAJR",
            tagline: "Advancing Global Artificial Intelligence Research & Review",
            hero_subtitle: "Peer-reviewed venue for cutting-edge research in Artificial Intelligence",
            logo: "/logo.png",
            submission_form: "https://forms.gle/xxxxx",
            announcements: vec![
                ("First Edition Publication Date:", "October 1, 2025"),
                ("Submission Deadline:", "September 10, 2025"),
            ],
            scope: vec![
                "Machine Learning and Deep Learning",
                "Natural Language Processing (NLP) and Speech Technologies",
                "Computer Vision and Image Understanding",
                "Autonomous Systems and Robotics",
                "AI Ethics, Fairness, and Policy",
                "AI for Healthcare, Climate Science, and Social Good",
            ],
            board: vec![
                BoardMember {
                    name: "Dr. Jane Smith",
                    role: "Editor-in-Chief",
                    affiliation: "Institution, Country",
                },
                BoardMember {
                    name: "Prof. John Doe",
                    role: "Associate Editor",
                    affiliation: "Institution, Country",
                },
                BoardMember {
                    name: "Dr. Alice Kim",
                    role: "Reviewer",
                    affiliation: "Institution, Country",
                },
            ],
            indexing: vec!["Crossref", "Google Scholar", "Scopus (planned)", "DOAJ (planned)"],
            fee_per_article_usd: 100,
            max_pages: 9,
            templates: vec![
                Template {
                    label: "Word Template",
                    href: "/IAJR_Word_Template_Light.docx",
                },
                Template {
                    label: "LaTeX Template",
                    href: "/IAJR_LaTeX_Template.zip",
                },
            ],
            guidelines: vec![
                "Formats accepted: PDF, DOCX, LaTeX (ZIP)",
                "Double-blind review process",
                "6–8 weeks average decision time",
                "Follow IEEE/Elsevier formatting standards",
            ],
            contact_email: "iajrorg@gmail.com",
        }
    }

    pub fn footer(&self, year: i32) -> String {
        format!("© {} {} – {}", year, self.short_name, self.name)
    }
}

fn list(html: &mut String, items: &[&str]) {
    html.push_str("<ul>");
    for item in items {
        let _ = write!(html, "<li>{}</li>", html_escape(item));
    }
    html.push_str("</ul>");
}

fn section_open(html: &mut String, id: &str, heading: &str) {
    let _ = write!(html, "<section id=\"{}\"><h3>{}</h3>", id, html_escape(heading));
}

/// 渲染完整页面，catalog_asset 为浏览器端加载的目录文件路径
pub fn render_page(profile: &JournalProfile, catalog: &ArticleCatalog, catalog_asset: &str) -> String {
    let state = FilterState::default();
    let name = html_escape(profile.name);
    let mut html = String::with_capacity(16 * 1024);

    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{name} – {short}</title>\
<meta name=\"description\" content=\"Peer-reviewed international AI journal publishing cutting-edge research in Machine Learning, NLP, Computer Vision, Robotics, and AI Ethics.\">\
</head><body data-catalog=\"{asset}\">",
        name = name,
        short = html_escape(profile.short_name),
        asset = html_escape(catalog_asset),
    );

    // 页头
    let _ = write!(
        html,
        "<header><img src=\"{logo}\" alt=\"{short} Logo\" width=\"50\" height=\"50\"><div><h1>{name}</h1><p>{tagline}</p></div>\
<a href=\"{form}\"><button>Submit Your Paper</button></a></header>",
        logo = html_escape(profile.logo),
        short = html_escape(profile.short_name),
        name = name,
        tagline = html_escape(profile.tagline),
        form = html_escape(profile.submission_form),
    );

    let _ = write!(
        html,
        "<section id=\"hero\"><h2>{}</h2><p>{}</p></section>",
        name,
        html_escape(profile.hero_subtitle)
    );

    section_open(&mut html, "announcements", "Announcements");
    html.push_str("<ul>");
    for (label, value) in &profile.announcements {
        let _ = write!(
            html,
            "<li><strong>{}</strong> {}</li>",
            html_escape(label),
            html_escape(value)
        );
    }
    html.push_str("</ul></section>");

    section_open(&mut html, "about", "Mission & Scope");
    let _ = write!(
        html,
        "<p>The <strong>{name} ({short})</strong> is a peer-reviewed, open-access platform dedicated to advancing the theory, methodology, and application of <strong>Artificial Intelligence</strong>.</p>\
<p>We welcome <strong>original research articles</strong>, <strong>surveys</strong>, and <strong>perspective papers</strong> covering a broad range of AI domains, including but not limited to:</p>",
        name = name,
        short = html_escape(profile.short_name),
    );
    list(&mut html, &profile.scope);
    html.push_str(
        "<p>All submissions undergo a <strong>rigorous double-blind peer review process</strong>, ensuring that published works meet international standards of clarity, rigor, and reproducibility. \
We encourage interdisciplinary contributions that connect AI with other scientific and industrial domains.</p>",
    );
    let _ = write!(
        html,
        "<p>By maintaining the highest editorial standards, {} aims to foster innovation, stimulate global collaboration, and contribute to the ethical and sustainable growth of Artificial Intelligence.</p></section>",
        html_escape(profile.short_name)
    );

    section_open(&mut html, "articles", "Latest Articles");
    let _ = write!(
        html,
        "<div class=\"article-filters\"><input id=\"article-query\" placeholder=\"Search...\" value=\"\">\
<select id=\"article-year\">{}</select><select id=\"article-theme\">{}</select></div>{}</section>",
        render_year_options(catalog.years(), &state.year),
        render_theme_options(&state.theme),
        render_article_grid(&catalog.filter(&state)),
    );

    section_open(&mut html, "board", "Editorial Board");
    html.push_str("<div class=\"board-grid\">");
    for member in &profile.board {
        let _ = write!(
            html,
            "<div class=\"board-member\"><img src=\"{}\" alt=\"Member Photo\" width=\"80\" height=\"80\"><p>{} – {}</p><p>{}</p></div>",
            html_escape(profile.logo),
            html_escape(member.name),
            html_escape(member.role),
            html_escape(member.affiliation)
        );
    }
    html.push_str("</div></section>");

    section_open(&mut html, "indexing", "Indexing & Abstracting");
    list(&mut html, &profile.indexing);
    html.push_str("</section>");

    section_open(&mut html, "fees", "Publication Fees");
    let _ = write!(
        html,
        "<p>The publication fee is <strong>{} USD per article</strong>. Maximum length: <strong>{} pages</strong>. Pages beyond the limit may incur additional charges.</p></section>",
        profile.fee_per_article_usd, profile.max_pages
    );

    section_open(&mut html, "submit", "Submit Your Paper");
    html.push_str("<p>Download the official templates before submitting:</p><div class=\"templates\">");
    for template in &profile.templates {
        let _ = write!(
            html,
            "<a href=\"{}\" download><button>{}</button></a>",
            html_escape(template.href),
            html_escape(template.label)
        );
    }
    html.push_str("</div></section>");

    section_open(&mut html, "guidelines", "Guidelines for Authors");
    list(&mut html, &profile.guidelines);
    html.push_str("</section>");

    section_open(&mut html, "contact", "Contact");
    let email = html_escape(profile.contact_email);
    let _ = write!(html, "<p>Email: <a href=\"mailto:{0}\">{0}</a></p></section>", email);

    let _ = write!(
        html,
        "<footer>{}</footer></body></html>",
        html_escape(&profile.footer(Utc::now().year()))
    );

    html
}
