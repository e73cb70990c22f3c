use crate::{Language, Tag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Localized strings keyed by language code (`"fi"`, `"en"`).
pub type LocalizedText = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    pub cards: Vec<CatalogCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogCard {
    pub id: u32,
    pub title: LocalizedText,
    pub description: LocalizedText,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub required: bool,
}

impl CatalogCard {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn title_in(&self, language: Language) -> Option<&str> {
        self.title.get(language.code()).map(String::as_str)
    }

    pub fn description_in(&self, language: Language) -> Option<&str> {
        self.description.get(language.code()).map(String::as_str)
    }

    pub fn localize(&self, language: Language) -> LocalizedCard {
        LocalizedCard {
            id: self.id,
            title: self.title_in(language).unwrap_or_default().to_string(),
            description: self.description_in(language).unwrap_or_default().to_string(),
            timed_event: self.has_tag(Tag::Event),
            target_player: self.has_tag(Tag::RandomTarget),
            required: self.required,
            tags: self.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedCard {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub timed_event: bool,
    pub target_player: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub tags: Vec<Tag>,
}
