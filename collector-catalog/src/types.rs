//! Data model types for the collection.
//!
//! A store holds either single-table stamp records or the catalog/inventory
//! pair. `New*` types are what callers supply; the store fills in ids and
//! timestamps.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, check_year, require_text};
use crate::price::Price;

/// Treat a blank filter value the same as an absent one.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// ── Stamp ───────────────────────────────────────────────────────────────────

/// Fields for a stamp that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub country: String,
    pub year: i32,
    pub denomination: String,
    /// Free text such as "Mint" or "Used"; not restricted to a fixed set.
    pub condition: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to today's local date when the stamp is inserted.
    #[serde(default)]
    pub acquisition_date: Option<NaiveDate>,
    #[serde(default)]
    pub price: Option<Price>,
}

impl NewItem {
    pub fn new(
        country: impl Into<String>,
        year: i32,
        denomination: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            year,
            denomination: denomination.into(),
            condition: condition.into(),
            description: None,
            acquisition_date: None,
            price: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn acquired_on(mut self, date: NaiveDate) -> Self {
        self.acquisition_date = Some(date);
        self
    }

    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    /// Check required fields and ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("country", &self.country)?;
        require_text("denomination", &self.denomination)?;
        require_text("condition", &self.condition)?;
        check_year(self.year)?;
        if let Some(price) = self.price {
            if price.is_negative() {
                return Err(ValidationError::NegativePrice(price));
            }
        }
        Ok(())
    }
}

/// A stored stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub country: String,
    pub year: i32,
    pub denomination: String,
    pub condition: String,
    pub description: String,
    pub acquisition_date: NaiveDate,
    pub price: Option<Price>,
    /// UTC instant the row was written.
    pub created_at: NaiveDateTime,
}

/// Search criteria for stamps. Every supplied field must match.
///
/// `text` is a substring test against country or description; the other
/// fields are exact matches. Blank strings count as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemQuery {
    pub text: Option<String>,
    pub country: Option<String>,
    pub year: Option<i32>,
    pub condition: Option<String>,
}

impl ItemQuery {
    pub fn text(term: impl Into<String>) -> Self {
        Self {
            text: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// True when any exact-match field is supplied.
    pub fn has_structured(&self) -> bool {
        non_blank(&self.country).is_some()
            || self.year.is_some()
            || non_blank(&self.condition).is_some()
    }

    pub fn is_empty(&self) -> bool {
        non_blank(&self.text).is_none() && !self.has_structured()
    }
}

// ── Catalog / Inventory ─────────────────────────────────────────────────────

/// Reference data for one catalog number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCatalogEntry {
    pub catalog_number: String,
    pub region: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub set_name: Option<String>,
}

impl NewCatalogEntry {
    pub fn new(catalog_number: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            catalog_number: catalog_number.into(),
            region: region.into(),
            year: None,
            set_name: None,
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn set_name(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = Some(set_name.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("catalog_number", &self.catalog_number)?;
        require_text("region", &self.region)?;
        if let Some(year) = self.year {
            check_year(year)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub catalog_number: String,
    pub region: String,
    pub year: Option<i32>,
    pub set_name: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A physical holding of a catalogued stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInventoryEntry {
    pub catalog_number: String,
    pub condition: String,
    #[serde(default)]
    pub variant: Option<String>,
}

impl NewInventoryEntry {
    pub fn new(catalog_number: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            catalog_number: catalog_number.into(),
            condition: condition.into(),
            variant: None,
        }
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("catalog_number", &self.catalog_number)?;
        require_text("condition", &self.condition)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub id: i64,
    pub catalog_number: String,
    pub condition: String,
    pub variant: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A holding combined with its catalog data.
///
/// The catalog fields are `None` when no catalog entry carries the holding's
/// catalog number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedEntry {
    pub inventory_id: i64,
    pub catalog_number: String,
    pub condition: String,
    pub variant: Option<String>,
    pub region: Option<String>,
    pub year: Option<i32>,
    pub set_name: Option<String>,
}

/// Exact-match filters over catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub region: Option<String>,
    pub year: Option<i32>,
    pub catalog_number: Option<String>,
}

/// Exact-match filters over holdings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryQuery {
    pub catalog_number: Option<String>,
    pub condition: Option<String>,
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Number of rows sharing one value of a grouping column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub count: i64,
}

/// Aggregates over the stamp table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    pub total_items: i64,
    /// Sum over priced stamps; zero when none carry a price.
    pub total_value: Price,
    /// Mean over priced stamps; zero when none carry a price.
    pub average_value: Price,
    /// Largest group first, ties ordered by country.
    pub by_country: Vec<GroupCount>,
}

/// Aggregates over the catalog and inventory tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_catalog: i64,
    pub total_inventory: i64,
    pub by_region: Vec<GroupCount>,
    pub by_condition: Vec<GroupCount>,
}
