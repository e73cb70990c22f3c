use crate::load::{validate_catalog, CatalogSource};
use crate::schema::{LanguagePool, TagFilter};
use partydeck_core::{build_selection, RngState, ALL_CARDS};
use tracing::{debug, error, warn};

/// Runs the selection pipeline against a freshly fetched catalog.
///
/// Nothing here returns an error. A failed fetch is logged and yields an
/// empty list for every language; a catalog that fails validation is logged
/// and yields `None`.
pub fn create_cards<S: CatalogSource + ?Sized>(
    source: &S,
    amount: usize,
    filter: &TagFilter,
    rng: &mut RngState,
) -> Option<LanguagePool> {
    let seed = rng.shuffle_seed();
    let catalog = match source.fetch_catalog() {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("failed to fetch cards: {err:#}");
            return Some(LanguagePool::empty_for_all());
        }
    };
    match validate_catalog(&catalog) {
        Ok(warnings) => {
            for warning in warnings {
                warn!("catalog: {warning}");
            }
        }
        Err(err) => {
            error!("failed to create cards: {err:#}");
            return None;
        }
    }
    let required = catalog.cards.iter().filter(|card| card.required).count();
    let pool = build_selection(catalog.cards, filter, amount, seed);
    debug!(
        seed,
        required,
        selected = pool.min_card_count(),
        "created card selection"
    );
    Some(pool)
}

/// Replaces `pool` with a full selection and returns the scarcest language's
/// card count, or 0 when the selection failed (the old pool is then kept).
pub fn load_cards<S: CatalogSource + ?Sized>(
    pool: &mut LanguagePool,
    source: &S,
    filter: &TagFilter,
    rng: &mut RngState,
) -> usize {
    let Some(fresh) = create_cards(source, ALL_CARDS, filter, rng) else {
        return 0;
    };
    *pool = fresh;
    pool.min_card_count()
}

/// Draws one new card and puts it at `index` in every language. Returns
/// whether anything was replaced; an empty pool is left alone.
pub fn load_single_card<S: CatalogSource + ?Sized>(
    pool: &mut LanguagePool,
    index: usize,
    source: &S,
    filter: &TagFilter,
    rng: &mut RngState,
) -> bool {
    if pool.is_empty() {
        debug!(index, "no card pool loaded, skipping reroll");
        return false;
    }
    let Some(fresh) = create_cards(source, 1, filter, rng) else {
        return false;
    };
    pool.replace_card(index, &fresh) > 0
}
