//! Catalog filter and sort selections.
//!
//! Both are ephemeral UI state: they are only ever one of the listed values
//! and carry no validation beyond that.

use serde::{Deserialize, Serialize};

/// Which subset of the catalog is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FilterSelection {
    #[default]
    All,
    New,
    Sale,
}

impl FilterSelection {
    /// All selections in display order.
    pub const ALL: [Self; 3] = [Self::All, Self::New, Self::Sale];

    /// Wire value used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::New => "new",
            Self::Sale => "sale",
        }
    }

    /// Label shown on the filter control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "Все",
            Self::New => "Новинки",
            Self::Sale => "Скидки",
        }
    }
}

/// Ordering rule applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortSelection {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

impl SortSelection {
    /// All selections in display order.
    pub const ALL: [Self; 3] = [Self::Default, Self::PriceAsc, Self::PriceDesc];

    /// Wire value used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    /// Label shown on the sort control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "По умолчанию",
            Self::PriceAsc => "Сначала дешевле",
            Self::PriceDesc => "Сначала дороже",
        }
    }
}

/// The current `(filter, sort)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct CatalogSelection {
    pub filter: FilterSelection,
    pub sort: SortSelection,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values_match_serde() {
        for filter in FilterSelection::ALL {
            let json = serde_json::to_string(&filter).unwrap();
            assert_eq!(json, format!("\"{}\"", filter.as_str()));
        }
        for sort in SortSelection::ALL {
            let json = serde_json::to_string(&sort).unwrap();
            assert_eq!(json, format!("\"{}\"", sort.as_str()));
        }
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        assert!(serde_json::from_str::<FilterSelection>("\"clearance\"").is_err());
        assert!(serde_json::from_str::<SortSelection>("\"name-asc\"").is_err());
    }

    #[test]
    fn test_defaults() {
        let selection = CatalogSelection::default();
        assert_eq!(selection.filter, FilterSelection::All);
        assert_eq!(selection.sort, SortSelection::Default);
    }
}
