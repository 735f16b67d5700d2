use wasm_bindgen::prelude::*;
use once_cell::sync::OnceCell;
use std::sync::Mutex;
use log::{info, Level};
use web_sys::console;
use utils_common::models::Theme;

// 导出模块
pub mod builder;
pub mod error;
pub mod filter;
pub mod models;
pub mod render;
pub mod source;

pub use error::{FilterError, Result};
pub use filter::{available_years, filter_articles, ArticleCatalog, FilterSession};
pub use models::{FilterParams, FilterResult, FilterState, ThemeFilter, YearFilter};
pub use source::{ArticleSource, CompressedCatalog, DemoArticles, JsonArticles};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// 全局筛选会话，保存目录和页面当前的筛选状态
static SESSION: OnceCell<Mutex<Option<FilterSession>>> = OnceCell::new();

/// 初始化函数 - 设置错误处理和日志
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // 重复初始化时 logger 已存在，忽略即可
    let _ = console_log::init_with_level(Level::Debug);
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// 替换全局目录，筛选状态回到默认值
pub fn install_catalog(catalog: ArticleCatalog) -> Result<()> {
    let slot = SESSION.get_or_init(|| Mutex::new(None));
    // 单线程环境下锁不会被毒化，真发生时直接覆盖旧值
    let mut guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    info!("安装目录，文章数量: {}", catalog.len());
    *guard = Some(FilterSession::new(catalog));
    Ok(())
}

/// 在全局会话上执行操作
pub fn with_session<T>(f: impl FnOnce(&mut FilterSession) -> T) -> Result<T> {
    let slot = SESSION.get().ok_or(FilterError::NotInitialized)?;
    let mut guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let session = guard.as_mut().ok_or(FilterError::NotInitialized)?;
    Ok(f(session))
}

/// 在全局目录上执行只读操作
pub fn with_catalog<T>(f: impl FnOnce(&ArticleCatalog) -> T) -> Result<T> {
    with_session(|session| f(session.catalog()))
}

/// 解析页面传来的筛选参数，空字符串视为默认状态
pub fn parse_params(params_json: &str) -> Result<FilterState> {
    if params_json.trim().is_empty() {
        return Ok(FilterState::default());
    }
    let params: FilterParams = serde_json::from_str(params_json)?;
    Ok(params.into())
}

/// 用完整参数替换会话状态并返回筛选结果
pub fn filter_catalog(params_json: &str) -> Result<FilterResult> {
    let state = parse_params(params_json)?;
    with_session(|session| {
        session.apply(state);
        session.result()
    })
}

/// 用完整参数替换会话状态并渲染文章网格
pub fn render_catalog(params_json: &str) -> Result<String> {
    let state = parse_params(params_json)?;
    with_session(|session| {
        session.apply(state);
        render::render_article_grid(&session.visible())
    })
}

/// 只修改搜索词，年份和主题保持不变
pub fn update_query(query: &str) -> Result<FilterResult> {
    with_session(|session| {
        session.set_query(query);
        session.result()
    })
}

/// 只修改年份，取值与下拉列表的 value 相同
pub fn update_year(year: &str) -> Result<FilterResult> {
    with_session(|session| {
        session.set_year(YearFilter::parse(year));
        session.result()
    })
}

/// 只修改主题
pub fn update_theme(theme: &str) -> Result<FilterResult> {
    with_session(|session| {
        session.set_theme(ThemeFilter::parse(theme));
        session.result()
    })
}

/// 按当前会话状态渲染文章网格
pub fn render_visible() -> Result<String> {
    with_session(|session| render::render_article_grid(&session.visible()))
}

fn to_js_value(result: &FilterResult) -> std::result::Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(result)
        .map_err(|e| JsValue::from_str(&format!("序列化结果失败: {}", e)))
}

fn to_js_error(e: FilterError) -> JsValue {
    console::log_1(&JsValue::from_str(&format!("文章筛选失败: {}", e)));
    JsValue::from_str(&e.to_string())
}

/// 文章过滤器JS接口 - 提供给JavaScript使用的筛选API
#[wasm_bindgen]
pub struct ArticleFilterJS;

#[wasm_bindgen]
impl ArticleFilterJS {
    /// 初始化过滤器并加载压缩目录
    #[wasm_bindgen]
    pub fn init(catalog_data: &[u8]) -> std::result::Result<(), JsValue> {
        console_error_panic_hook::set_once();

        CompressedCatalog(catalog_data)
            .decode()
            .and_then(ArticleCatalog::from_file)
            .and_then(install_catalog)
            .map_err(to_js_error)
    }

    /// 使用内置示例文章初始化
    #[wasm_bindgen]
    pub fn init_demo() -> std::result::Result<(), JsValue> {
        ArticleCatalog::from_source(&DemoArticles)
            .and_then(install_catalog)
            .map_err(to_js_error)
    }

    /// 获取可选年份（从新到旧）
    #[wasm_bindgen]
    pub fn available_years() -> std::result::Result<JsValue, JsValue> {
        let years = with_catalog(|catalog| catalog.years().to_vec()).map_err(to_js_error)?;

        serde_wasm_bindgen::to_value(&years)
            .map_err(|e| JsValue::from_str(&format!("序列化年份失败: {}", e)))
    }

    /// 获取所有主题
    #[wasm_bindgen]
    pub fn themes() -> js_sys::Array {
        Theme::ALL
            .iter()
            .map(|theme| JsValue::from_str(theme.as_str()))
            .collect()
    }

    /// 筛选文章
    #[wasm_bindgen]
    pub fn filter_articles(params_json: &str) -> std::result::Result<JsValue, JsValue> {
        let result = filter_catalog(params_json).map_err(to_js_error)?;
        to_js_value(&result)
    }

    /// 筛选文章并返回渲染好的 HTML
    #[wasm_bindgen]
    pub fn render_articles(params_json: &str) -> std::result::Result<String, JsValue> {
        render_catalog(params_json).map_err(to_js_error)
    }

    /// 搜索框输入变化
    #[wasm_bindgen]
    pub fn set_query(query: &str) -> std::result::Result<JsValue, JsValue> {
        let result = update_query(query).map_err(to_js_error)?;
        to_js_value(&result)
    }

    /// 年份下拉列表变化
    #[wasm_bindgen]
    pub fn set_year(year: &str) -> std::result::Result<JsValue, JsValue> {
        let result = update_year(year).map_err(to_js_error)?;
        to_js_value(&result)
    }

    /// 主题下拉列表变化
    #[wasm_bindgen]
    pub fn set_theme(theme: &str) -> std::result::Result<JsValue, JsValue> {
        let result = update_theme(theme).map_err(to_js_error)?;
        to_js_value(&result)
    }

    /// 按当前筛选状态渲染文章网格
    #[wasm_bindgen]
    pub fn render_current() -> std::result::Result<String, JsValue> {
        render_visible().map_err(to_js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 全局目录在测试之间共享，所有涉及全局状态的断言放在同一个测试里
    #[test]
    fn test_global_catalog_lifecycle() {
        install_catalog(ArticleCatalog::from_source(&DemoArticles).unwrap()).unwrap();

        let result = filter_catalog(r#"{"query":"diffusion","year":"all","theme":"all"}"#).unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.articles[0].id, 3);

        let everything = filter_catalog("").unwrap();
        assert_eq!(everything.total, 3);

        let html = render_catalog(r#"{"year":"2025","theme":"Computer Vision"}"#).unwrap();
        assert!(html.contains(render::EMPTY_PLACEHOLDER));

        assert!(matches!(filter_catalog("{not json"), Err(FilterError::Json(_))));

        // 逐个控件修改时其余条件保持不变
        filter_catalog("").unwrap();
        assert_eq!(update_year(" 2025 ").unwrap().total, 2);
        let result = update_query("SELF").unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.articles[0].id, 2);
        assert_eq!(update_theme("NLP").unwrap().total, 0);
        assert!(render_visible().unwrap().contains(render::EMPTY_PLACEHOLDER));
        assert_eq!(update_theme("all").unwrap().total, 1);
        assert_eq!(with_session(|s| s.state().query.clone()).unwrap(), "SELF");
        assert_eq!(with_catalog(|c| c.years().to_vec()).unwrap(), vec![2025, 2024]);

        // 重新安装目录后状态回到默认值
        install_catalog(ArticleCatalog::from_source(&DemoArticles).unwrap()).unwrap();
        assert_eq!(render_visible().unwrap().matches("class=\"article-card\"").count(), 3);
    }

    #[test]
    fn test_version_matches_package() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
