use crate::{Language, LocalizedCard};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanguageData {
    pub cards: Vec<LocalizedCard>,
    pub language: Language,
}

/// One localized card list per language. Position `i` refers to the same
/// catalog card in every language.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LanguagePool {
    languages: BTreeMap<Language, LanguageData>,
}

impl LanguagePool {
    pub fn empty_for_all() -> Self {
        let mut pool = Self::default();
        for language in Language::ALL {
            pool.insert(LanguageData {
                cards: Vec::new(),
                language,
            });
        }
        pool
    }

    pub fn insert(&mut self, data: LanguageData) {
        self.languages.insert(data.language, data);
    }

    pub fn get(&self, language: Language) -> Option<&LanguageData> {
        self.languages.get(&language)
    }

    pub fn cards(&self, language: Language) -> Option<&[LocalizedCard]> {
        self.get(language).map(|data| data.cards.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Size of the scarcest language, 0 when nothing is loaded.
    pub fn min_card_count(&self) -> usize {
        self.languages
            .values()
            .map(|data| data.cards.len())
            .min()
            .unwrap_or(0)
    }

    /// Splices the first card of each language in `fresh` into slot `index`.
    /// Languages missing from either side, or shorter than `index`, are left alone.
    pub fn replace_card(&mut self, index: usize, fresh: &LanguagePool) -> usize {
        let mut replaced = 0;
        for (language, data) in self.languages.iter_mut() {
            let Some(card) = fresh.cards(*language).and_then(<[_]>::first) else {
                continue;
            };
            if let Some(slot) = data.cards.get_mut(index) {
                *slot = card.clone();
                replaced += 1;
            }
        }
        replaced
    }
}
