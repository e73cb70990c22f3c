pub use partydeck_core::{
    Catalog, CatalogCard, Language, LanguageData, LanguagePool, LocalizedCard, LocalizedText, Tag,
    TagFilter,
};
