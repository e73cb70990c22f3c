use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fi,
    #[default]
    En,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported language: {0}")]
pub struct ParseLanguageError(pub String);

impl Language {
    pub const ALL: [Language; 2] = [Language::Fi, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Self::Fi => "fi",
            Self::En => "en",
        }
    }

    /// Accepts bare codes as well as locale strings like `en-US` or `fi_FI.UTF-8`.
    pub fn from_code(value: &str) -> Option<Self> {
        let primary = value
            .trim()
            .split(|ch: char| ch == '-' || ch == '_' || ch == '.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|lang| lang.code() == primary)
    }

    pub fn detect(preferred: Option<&str>) -> Self {
        preferred.and_then(Self::from_code).unwrap_or(Self::En)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_code(value).ok_or_else(|| ParseLanguageError(value.to_string()))
    }
}
