use crate::{seeded_shuffle, CatalogCard, Language, LanguageData, LanguagePool, Tag};
use serde::{Deserialize, Serialize};

/// Requested amount meaning "everything that survives filtering".
pub const ALL_CARDS: usize = usize::MAX;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagFilter {
    pub included_tags: Vec<Tag>,
    pub excluded_tags: Vec<Tag>,
}

impl Default for TagFilter {
    fn default() -> Self {
        Self {
            included_tags: Tag::ALL.to_vec(),
            excluded_tags: Vec::new(),
        }
    }
}

impl TagFilter {
    pub fn new(included_tags: Vec<Tag>, excluded_tags: Vec<Tag>) -> Self {
        Self {
            included_tags,
            excluded_tags,
        }
    }

    pub fn includes(&self, card: &CatalogCard) -> bool {
        Self::hits(&self.included_tags, card)
    }

    pub fn excludes(&self, card: &CatalogCard) -> bool {
        Self::hits(&self.excluded_tags, card)
    }

    /// Exclusion wins over inclusion.
    pub fn accepts(&self, card: &CatalogCard) -> bool {
        self.includes(card) && !self.excludes(card)
    }

    fn hits(tags: &[Tag], card: &CatalogCard) -> bool {
        card.tags.iter().any(|tag| tags.contains(tag))
            || (tags.contains(&Tag::Untagged) && card.is_untagged())
    }
}

pub fn filter_catalog(cards: Vec<CatalogCard>, filter: &TagFilter) -> Vec<CatalogCard> {
    cards.into_iter().filter(|card| filter.accepts(card)).collect()
}

/// Required cards first, then non-required ones up to `amount`, each side in
/// shuffle order. Required cards are never cut, even when they alone exceed
/// `amount`.
pub fn select_required_first(shuffled: Vec<CatalogCard>, amount: usize) -> Vec<CatalogCard> {
    let (mut selection, optional): (Vec<_>, Vec<_>) =
        shuffled.into_iter().partition(|card| card.required);
    let room = amount.saturating_sub(selection.len());
    selection.extend(optional.into_iter().take(room));
    selection
}

pub fn project_selection(selection: &[CatalogCard], amount: usize) -> LanguagePool {
    let mut pool = LanguagePool::default();
    for language in Language::ALL {
        let cards = selection
            .iter()
            .take(amount)
            .map(|card| card.localize(language))
            .collect();
        pool.insert(LanguageData { cards, language });
    }
    pool
}

/// Filter, shuffle with `seed`, keep required cards, then project per language.
pub fn build_selection(
    catalog: Vec<CatalogCard>,
    filter: &TagFilter,
    amount: usize,
    seed: i64,
) -> LanguagePool {
    let shuffled = seeded_shuffle(filter_catalog(catalog, filter), seed);
    let selection = select_required_first(shuffled, amount);
    project_selection(&selection, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalizedText;

    fn card(id: u32, tags: Vec<Tag>, required: bool) -> CatalogCard {
        CatalogCard {
            id,
            title: LocalizedText::from([
                ("en".to_string(), format!("Card {id}")),
                ("fi".to_string(), format!("Kortti {id}")),
            ]),
            description: LocalizedText::new(),
            tags,
            required,
        }
    }

    fn sample() -> Vec<CatalogCard> {
        vec![
            card(1, vec![Tag::Event, Tag::RandomTarget], false),
            card(2, vec![Tag::Event], false),
            card(3, Vec::new(), false),
        ]
    }

    fn ids(cards: &[CatalogCard]) -> Vec<u32> {
        let mut ids: Vec<u32> = cards.iter().map(|card| card.id).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn inclusion_by_tag() {
        let filter = TagFilter::new(vec![Tag::Event], Vec::new());
        assert_eq!(ids(&filter_catalog(sample(), &filter)), vec![1, 2]);
    }

    #[test]
    fn untagged_sentinel_includes_cards_without_tags() {
        let filter = TagFilter::new(vec![Tag::Untagged], Vec::new());
        assert_eq!(ids(&filter_catalog(sample(), &filter)), vec![3]);
    }

    #[test]
    fn exclusion_takes_priority() {
        let filter = TagFilter::new(vec![Tag::Event], vec![Tag::RandomTarget]);
        assert_eq!(ids(&filter_catalog(sample(), &filter)), vec![2]);
    }

    #[test]
    fn excluding_untagged_leaves_tagged_cards() {
        let filter = TagFilter::new(vec![Tag::Event], vec![Tag::Untagged]);
        assert_eq!(ids(&filter_catalog(sample(), &filter)), vec![1, 2]);

        let filter = TagFilter::new(vec![Tag::Untagged, Tag::Event], vec![Tag::Untagged]);
        assert_eq!(ids(&filter_catalog(sample(), &filter)), vec![1, 2]);
    }

    #[test]
    fn default_filter_keeps_everything() {
        assert_eq!(ids(&filter_catalog(sample(), &TagFilter::default())), vec![1, 2, 3]);
    }

    #[test]
    fn required_cards_survive_truncation() {
        let shuffled = vec![
            card(10, vec![Tag::Classic], false),
            card(11, vec![Tag::Classic], true),
            card(12, vec![Tag::Classic], false),
            card(13, vec![Tag::Classic], true),
            card(14, vec![Tag::Classic], true),
        ];
        let selection = select_required_first(shuffled.clone(), 2);
        assert_eq!(
            selection.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![11, 13, 14]
        );

        let selection = select_required_first(shuffled, 4);
        assert_eq!(
            selection.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![11, 13, 14, 10]
        );
    }

    #[test]
    fn filtered_required_cards_are_still_removed() {
        let catalog = vec![
            card(1, vec![Tag::Physical], true),
            card(2, vec![Tag::Classic], false),
        ];
        let filter = TagFilter::new(vec![Tag::Classic], Vec::new());
        let pool = build_selection(catalog, &filter, ALL_CARDS, 5);
        let cards = pool.cards(Language::En).expect("english");
        assert_eq!(cards.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn projection_aligns_languages_and_applies_amount() {
        let catalog: Vec<CatalogCard> = (1..=8).map(|id| card(id, vec![Tag::Classic], false)).collect();
        let pool = build_selection(catalog, &TagFilter::default(), 5, 1234);
        let fi = pool.cards(Language::Fi).expect("finnish");
        let en = pool.cards(Language::En).expect("english");
        assert_eq!(fi.len(), 5);
        assert_eq!(en.len(), 5);
        for (fi_card, en_card) in fi.iter().zip(en) {
            assert_eq!(fi_card.id, en_card.id);
            assert_eq!(fi_card.title, format!("Kortti {}", fi_card.id));
            assert_eq!(en_card.title, format!("Card {}", en_card.id));
        }
    }

    #[test]
    fn projection_caps_required_overflow_at_amount() {
        let catalog: Vec<CatalogCard> = (1..=4).map(|id| card(id, Vec::new(), true)).collect();
        let pool = build_selection(catalog, &TagFilter::default(), 1, 99);
        assert_eq!(pool.cards(Language::En).map(<[_]>::len), Some(1));
    }
}
