use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use assetdesk_core::AssetId;

/// Stock availability, derived from quantity.
///
/// The wire spelling ("Available" / "Out of stock") is what the frontend
/// filters on; keep it stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    #[serde(rename = "Out of stock")]
    OutOfStock,
}

impl Availability {
    pub fn from_quantity(quantity: &Quantity) -> Self {
        if quantity.as_count() > 0 {
            Availability::Available
        } else {
            Availability::OutOfStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::OutOfStock => "Out of stock",
        }
    }
}

/// Quantity as persisted: sometimes a number, sometimes its text form.
///
/// Legacy documents hold values like `"2"` next to `10`; a store-side sort
/// would order them lexically. Every numeric comparison must go through
/// `as_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Count(i64),
    Text(String),
}

impl Quantity {
    /// Coerce to an integer. Unparseable text counts as zero stock.
    pub fn as_count(&self) -> i64 {
        match self {
            Quantity::Count(n) => *n,
            Quantity::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

impl From<i64> for Quantity {
    fn from(n: i64) -> Self {
        Quantity::Count(n)
    }
}

/// An inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub asset_type: String,
    pub availability: Availability,
    pub quantity: Quantity,
    pub timestamp: DateTime<Utc>,
}

/// Creation payload. Availability is not accepted here: new assets are
/// always listed as available.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAsset {
    pub name: String,
    pub asset_type: String,
    pub quantity: Quantity,
}

/// Partial update; availability is recomputed when quantity changes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetPatch {
    pub name: Option<String>,
    pub asset_type: Option<String>,
    pub quantity: Option<Quantity>,
}

/// One filter contract for every asset listing (main page and request page
/// ask the same questions with different parameter names upstream).
/// Predicates are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    /// Case-insensitive substring on the asset name.
    pub search: Option<String>,
    /// Exact availability match.
    pub availability: Option<Availability>,
    /// Exact type match.
    pub asset_type: Option<String>,
}

impl AssetFilter {
    pub fn matches(&self, asset: &Asset) -> bool {
        if let Some(search) = &self.search {
            if !asset.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        if let Some(availability) = self.availability {
            if asset.availability != availability {
                return false;
            }
        }
        if let Some(asset_type) = &self.asset_type {
            if &asset.asset_type != asset_type {
                return false;
            }
        }
        true
    }
}

/// Sort direction over the coerced quantity. Descending when unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse `asc` / `desc`, anything else falling back to the default.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_deserializes_from_number_and_text() {
        let n: Quantity = serde_json::from_str("10").unwrap();
        let t: Quantity = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(n.as_count(), 10);
        assert_eq!(t.as_count(), 2);
    }

    #[test]
    fn unparseable_text_quantity_counts_as_zero() {
        assert_eq!(Quantity::Text("lots".into()).as_count(), 0);
        assert_eq!(Quantity::Text(" 7 ".into()).as_count(), 7);
    }

    #[test]
    fn availability_follows_quantity() {
        assert_eq!(
            Availability::from_quantity(&Quantity::Count(3)),
            Availability::Available
        );
        assert_eq!(
            Availability::from_quantity(&Quantity::Text("0".into())),
            Availability::OutOfStock
        );
    }

    #[test]
    fn out_of_stock_wire_spelling() {
        let json = serde_json::to_string(&Availability::OutOfStock).unwrap();
        assert_eq!(json, "\"Out of stock\"");
    }
}
