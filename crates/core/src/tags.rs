use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    ChosenTarget,
    RandomTarget,
    Physical,
    Creative,
    Roleplay,
    Voting,
    Humiliation,
    Knowledge,
    Event,
    Classic,
    /// Filter-only sentinel: never attached to a card, it selects cards with no tags.
    Untagged,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown tag: {0}")]
pub struct ParseTagError(pub String);

impl Tag {
    pub const ALL: [Tag; 11] = [
        Tag::ChosenTarget,
        Tag::RandomTarget,
        Tag::Physical,
        Tag::Creative,
        Tag::Roleplay,
        Tag::Voting,
        Tag::Humiliation,
        Tag::Knowledge,
        Tag::Event,
        Tag::Classic,
        Tag::Untagged,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChosenTarget => "chosen_target",
            Self::RandomTarget => "random_target",
            Self::Physical => "physical",
            Self::Creative => "creative",
            Self::Roleplay => "roleplay",
            Self::Voting => "voting",
            Self::Humiliation => "humiliation",
            Self::Knowledge => "knowledge",
            Self::Event => "event",
            Self::Classic => "classic",
            Self::Untagged => "untagged",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == normalized)
            .ok_or_else(|| ParseTagError(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names_and_dashed_aliases() {
        assert_eq!("random_target".parse::<Tag>(), Ok(Tag::RandomTarget));
        assert_eq!("Random-Target".parse::<Tag>(), Ok(Tag::RandomTarget));
        assert_eq!(" untagged ".parse::<Tag>(), Ok(Tag::Untagged));
        assert!("nonsense".parse::<Tag>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&[Tag::ChosenTarget, Tag::Event]).expect("serialize");
        assert_eq!(json, r#"["chosen_target","event"]"#);
        for tag in Tag::ALL {
            let encoded = serde_json::to_string(&tag).expect("serialize");
            assert_eq!(encoded, format!("\"{}\"", tag.as_str()));
        }
    }
}
