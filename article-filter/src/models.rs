use serde::{Deserialize, Serialize};
use utils_common::models::{ArticleRecord, CatalogMetadata, Theme};

/// 下拉列表中代表"全部"的取值
pub const ALL: &str = "all";

/// 年份筛选条件
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum YearFilter {
    /// 不限年份
    #[default]
    All,
    /// 指定年份
    Year(i32),
    /// 无法解析的取值，不匹配任何文章
    Unmatched(String),
}

impl YearFilter {
    /// 解析下拉列表的原始取值，数字会先去除首尾空白
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == ALL {
            return YearFilter::All;
        }
        match trimmed.parse::<i32>() {
            Ok(year) => YearFilter::Year(year),
            Err(_) => YearFilter::Unmatched(raw.to_string()),
        }
    }

    pub fn matches(&self, year: i32) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(selected) => *selected == year,
            YearFilter::Unmatched(_) => false,
        }
    }

    /// 还原为 `<option value>` 使用的字符串
    pub fn as_value(&self) -> String {
        match self {
            YearFilter::All => ALL.to_string(),
            YearFilter::Year(year) => year.to_string(),
            YearFilter::Unmatched(raw) => raw.clone(),
        }
    }
}

/// 主题筛选条件
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ThemeFilter {
    /// 不限主题
    #[default]
    All,
    /// 指定主题（精确匹配）
    Theme(Theme),
    /// 不属于主题集合的取值，不匹配任何文章
    Unmatched(String),
}

impl ThemeFilter {
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            return ThemeFilter::All;
        }
        match raw.parse::<Theme>() {
            Ok(theme) => ThemeFilter::Theme(theme),
            Err(_) => ThemeFilter::Unmatched(raw.to_string()),
        }
    }

    pub fn matches(&self, theme: Theme) -> bool {
        match self {
            ThemeFilter::All => true,
            ThemeFilter::Theme(selected) => *selected == theme,
            ThemeFilter::Unmatched(_) => false,
        }
    }

    pub fn as_value(&self) -> String {
        match self {
            ThemeFilter::All => ALL.to_string(),
            ThemeFilter::Theme(theme) => theme.as_str().to_string(),
            ThemeFilter::Unmatched(raw) => raw.clone(),
        }
    }
}

/// 筛选状态 - 当前的搜索词、年份和主题选择
///
/// 每次用户输入都会产生一个新的状态值，旧值保持不变。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// 自由文本搜索词
    pub query: String,
    /// 年份筛选
    pub year: YearFilter,
    /// 主题筛选
    pub theme: ThemeFilter,
}

impl FilterState {
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self.clone()
        }
    }

    pub fn with_year(&self, year: YearFilter) -> Self {
        Self {
            year,
            ..self.clone()
        }
    }

    pub fn with_theme(&self, theme: ThemeFilter) -> Self {
        Self {
            theme,
            ..self.clone()
        }
    }

    /// 搜索词是否为空（只含空白也视为空）
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

/// 年份的原始取值 - 页面可能传字符串也可能传数字
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawYear {
    Number(i64),
    Text(String),
}

/// 筛选参数 - 客户端传递的筛选条件
#[derive(Deserialize, Debug, Default)]
pub struct FilterParams {
    /// 搜索词 (可选)
    pub query: Option<String>,
    /// 年份: "all" 或具体年份 (可选)
    pub year: Option<RawYear>,
    /// 主题: "all" 或主题名称 (可选)
    pub theme: Option<String>,
}

impl From<FilterParams> for FilterState {
    fn from(params: FilterParams) -> Self {
        let year = match params.year {
            None => YearFilter::All,
            Some(RawYear::Number(n)) => match i32::try_from(n) {
                Ok(year) => YearFilter::Year(year),
                Err(_) => YearFilter::Unmatched(n.to_string()),
            },
            Some(RawYear::Text(raw)) => YearFilter::parse(&raw),
        };
        let theme = params
            .theme
            .as_deref()
            .map(ThemeFilter::parse)
            .unwrap_or_default();

        FilterState {
            query: params.query.unwrap_or_default(),
            year,
            theme,
        }
    }
}

/// 筛选结果 - 返回给客户端的筛选结果
#[derive(Serialize, Debug)]
pub struct FilterResult {
    /// 筛选后的文章列表，保持目录中的原始顺序
    pub articles: Vec<ArticleRecord>,
    /// 筛选结果总数
    pub total: usize,
    /// 目录中的文章总数
    pub catalog_size: usize,
}

/// 目录文件 - 写入 catalog.bin 的内容
#[derive(Serialize, Deserialize, Debug)]
pub struct CatalogFile {
    pub metadata: CatalogMetadata,
    pub articles: Vec<ArticleRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_filter_normalizes_strings() {
        assert_eq!(YearFilter::parse("all"), YearFilter::All);
        assert_eq!(YearFilter::parse(" 2025 "), YearFilter::Year(2025));
        assert_eq!(YearFilter::parse("20x5"), YearFilter::Unmatched("20x5".to_string()));
        assert!(!YearFilter::parse("20x5").matches(2025));
    }

    #[test]
    fn test_theme_filter_is_exact() {
        assert_eq!(ThemeFilter::parse("NLP"), ThemeFilter::Theme(Theme::Nlp));
        assert_eq!(ThemeFilter::parse("nlp"), ThemeFilter::Unmatched("nlp".to_string()));
        assert_eq!(ThemeFilter::parse("all").as_value(), "all");
    }

    #[test]
    fn test_with_methods_leave_original_untouched() {
        let initial = FilterState::default();
        let typed = initial.with_query("vision");
        let narrowed = typed.with_year(YearFilter::Year(2024));

        assert_eq!(initial, FilterState::default());
        assert_eq!(typed.query, "vision");
        assert_eq!(typed.year, YearFilter::All);
        assert_eq!(narrowed.query, "vision");
        assert_eq!(narrowed.year, YearFilter::Year(2024));
    }

    #[test]
    fn test_params_json_conversion() {
        let params: FilterParams =
            serde_json::from_str(r#"{"query":"agents","year":"2025","theme":"Machine Learning"}"#).unwrap();
        let state = FilterState::from(params);
        assert_eq!(state.query, "agents");
        assert_eq!(state.year, YearFilter::Year(2025));
        assert_eq!(state.theme, ThemeFilter::Theme(Theme::MachineLearning));

        let numeric: FilterParams = serde_json::from_str(r#"{"year":2024}"#).unwrap();
        assert_eq!(FilterState::from(numeric).year, YearFilter::Year(2024));

        let empty: FilterParams = serde_json::from_str("{}").unwrap();
        assert_eq!(FilterState::from(empty), FilterState::default());
    }

    #[test]
    fn test_blank_query_is_not_a_query() {
        assert!(!FilterState::default().with_query("   ").has_query());
        assert!(FilterState::default().with_query(" x ").has_query());
    }
}
