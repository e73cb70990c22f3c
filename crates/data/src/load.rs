use crate::schema::{Catalog, Language};
use anyhow::{bail, Context};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the raw catalog comes from.
pub trait CatalogSource {
    fn fetch_catalog(&self) -> anyhow::Result<Catalog>;
}

#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalog {
    fn fetch_catalog(&self) -> anyhow::Result<Catalog> {
        load_catalog(&self.path)
    }
}

/// An already-parsed catalog, handed out as a fresh copy on every fetch.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    catalog: Catalog,
}

impl StaticCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl CatalogSource for StaticCatalog {
    fn fetch_catalog(&self) -> anyhow::Result<Catalog> {
        Ok(self.catalog.clone())
    }
}

impl<S: CatalogSource + ?Sized> CatalogSource for &S {
    fn fetch_catalog(&self) -> anyhow::Result<Catalog> {
        (**self).fetch_catalog()
    }
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_catalog(&raw).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_catalog(raw: &str) -> anyhow::Result<Catalog> {
    let catalog = serde_json::from_str(raw)?;
    Ok(catalog)
}

/// Hard errors make the catalog unusable; soft problems come back as warnings.
pub fn validate_catalog(catalog: &Catalog) -> anyhow::Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();
    for card in &catalog.cards {
        if !seen.insert(card.id) {
            bail!("duplicate card id {}", card.id);
        }
        for language in Language::ALL {
            if card.title_in(language).is_none() {
                warnings.push(format!("card {} has no {} title", card.id, language));
            }
            if card.description_in(language).is_none() {
                warnings.push(format!("card {} has no {} description", card.id, language));
            }
        }
    }
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
  "cards": [
    {"id": 1, "title": {"en": "A", "fi": "A"}, "description": {"en": "a", "fi": "a"}, "tags": ["event"]},
    {"id": 2, "title": {"en": "B"}, "description": {"en": "b", "fi": "b"}, "required": true}
  ]
}"#;

    #[test]
    fn parses_catalog_json() {
        let catalog = parse_catalog(SAMPLE).expect("parse");
        assert_eq!(catalog.cards.len(), 2);
        assert!(catalog.cards[1].required);
    }

    #[test]
    fn unknown_tags_fail_to_parse() {
        let raw = r#"{"cards":[{"id":1,"title":{},"description":{},"tags":["bogus"]}]}"#;
        assert!(parse_catalog(raw).is_err());
    }

    #[test]
    fn validation_reports_missing_translations() {
        let catalog = parse_catalog(SAMPLE).expect("parse");
        let warnings = validate_catalog(&catalog).expect("valid");
        assert_eq!(warnings, vec!["card 2 has no fi title".to_string()]);
    }

    #[test]
    fn validation_rejects_duplicate_ids() {
        let mut catalog = parse_catalog(SAMPLE).expect("parse");
        catalog.cards[1].id = 1;
        let err = validate_catalog(&catalog).expect_err("duplicate");
        assert!(err.to_string().contains("duplicate card id 1"));
    }

    #[test]
    fn missing_file_is_an_error_with_context() {
        let source = FileCatalog::new("/definitely/not/here/cards.json");
        let err = source.fetch_catalog().expect_err("missing");
        assert!(err.to_string().contains("read /definitely/not/here/cards.json"));
    }
}
