use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 文章主题 - 期刊的固定主题分类
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Theme {
    #[serde(rename = "Machine Learning")]
    MachineLearning,
    #[serde(rename = "Deep Learning")]
    DeepLearning,
    #[serde(rename = "NLP")]
    Nlp,
    #[serde(rename = "Computer Vision")]
    ComputerVision,
    #[serde(rename = "Robotics")]
    Robotics,
    #[serde(rename = "Ethics & Policy")]
    EthicsPolicy,
}

impl Theme {
    /// 所有主题，按下拉列表的展示顺序
    pub const ALL: [Theme; 6] = [
        Theme::MachineLearning,
        Theme::DeepLearning,
        Theme::Nlp,
        Theme::ComputerVision,
        Theme::Robotics,
        Theme::EthicsPolicy,
    ];

    /// 主题的展示名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::MachineLearning => "Machine Learning",
            Theme::DeepLearning => "Deep Learning",
            Theme::Nlp => "NLP",
            Theme::ComputerVision => "Computer Vision",
            Theme::Robotics => "Robotics",
            Theme::EthicsPolicy => "Ethics & Policy",
        }
    }

    /// 忽略大小写匹配主题名称，仅用于导入外部数据
    pub fn from_label_lenient(label: &str) -> Option<Theme> {
        let label = label.trim();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知主题名称
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("未知主题: {0}")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    /// 严格匹配展示名称
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| ParseThemeError(s.to_string()))
    }
}

/// 文章记录 - 一篇期刊文章的元数据
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ArticleRecord {
    /// 文章唯一标识符
    pub id: u32,
    /// 文章标题
    pub title: String,
    /// 作者列表（自由格式）
    pub authors: String,
    /// 发表年份
    pub year: i32,
    /// 文章主题
    pub theme: Theme,
    /// 文章摘要
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

/// 目录元数据 - 存储目录的基本信息
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogMetadata {
    /// 目录包含的文章数量
    pub article_count: usize,
    /// 目录中出现的主题数量
    pub theme_count: usize,
    /// 目录创建时间
    pub created_at: DateTime<Utc>,
    /// 目录版本
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_labels_parse_back() {
        for theme in Theme::ALL {
            assert_eq!(theme.as_str().parse::<Theme>(), Ok(theme));
        }
    }

    #[test]
    fn test_theme_parse_is_exact() {
        assert!("nlp".parse::<Theme>().is_err());
        assert!("Quantum".parse::<Theme>().is_err());
        assert_eq!(Theme::from_label_lenient(" computer vision "), Some(Theme::ComputerVision));
        assert_eq!(Theme::from_label_lenient("Quantum"), None);
    }

    #[test]
    fn test_record_serializes_abstract_key() {
        let record = ArticleRecord {
            id: 7,
            title: "T".to_string(),
            authors: "A".to_string(),
            year: 2024,
            theme: Theme::EthicsPolicy,
            abstract_text: "S".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"abstract\":\"S\""));
        assert!(json.contains("\"theme\":\"Ethics & Policy\""));
        let back: ArticleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
