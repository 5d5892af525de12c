//! Demand-to-inventory matching and property search filtering.
//!
//! Pure functions over already-fetched records: a `PropertyFilter` holds
//! partial field values, `matches` decides whether one property satisfies
//! them, and `sort_by_match` orders a collection matched-first. The same
//! predicate serves the property search screen and the per-demand match
//! sets; a demand constrains only type, locality and budget.

use crate::model::demand::Demand;
use crate::model::property::Property;

/// Partial query over property fields. Empty fields impose no constraint,
/// so the default filter matches every record.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub id: String,
    pub property_for: String,
    pub property_type: String,
    pub condition: String,
    pub bedroom: String,
    pub bath: String,
    pub size: String,
    /// Matched against the property's free-text address.
    pub locality: String,
    pub min_price: String,
    pub max_price: String,
}

impl PropertyFilter {
    /// Match constraints a demand imposes on inventory: type, locality and
    /// budget only. The remaining demand fields are recorded for the agent
    /// but deliberately left out of the predicate.
    pub fn from_demand(demand: &Demand) -> Self {
        PropertyFilter {
            property_type: demand.property_type.clone(),
            locality: demand.locality.clone(),
            min_price: demand.min_price.clone(),
            max_price: demand.max_price.clone(),
            ..PropertyFilter::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.property_for.is_empty()
            && self.property_type.is_empty()
            && self.condition.is_empty()
            && self.bedroom.is_empty()
            && self.bath.is_empty()
            && self.size.is_empty()
            && self.locality.is_empty()
            && self.min_price.is_empty()
            && self.max_price.is_empty()
    }
}

/// Free-text numeric string to a number. Malformed or empty input coerces
/// to 0 rather than failing; price fields are user-entered text.
pub fn amount_or_zero(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

fn non_empty_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Single price used for range comparisons: the first non-empty-and-numeric
/// of explicit price, max price, min price, else 0. Total; never fails.
pub fn effective_price(property: &Property) -> f64 {
    property
        .price
        .as_deref()
        .and_then(non_empty_numeric)
        .or_else(|| non_empty_numeric(&property.max_price))
        .or_else(|| non_empty_numeric(&property.min_price))
        .unwrap_or(0.0)
}

/// Case-insensitive substring containment; an empty needle constrains nothing.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True when the property satisfies every non-empty field of the filter.
///
/// Text fields match by case-insensitive substring containment, not exact
/// equality; the locality field is checked against the property address.
/// minPrice/maxPrice bound `effective_price` inclusively.
pub fn matches(filter: &PropertyFilter, property: &Property) -> bool {
    let price = effective_price(property);

    contains_ci(&property.id, &filter.id)
        && contains_ci(&property.property_for, &filter.property_for)
        && contains_ci(&property.property_type, &filter.property_type)
        && contains_ci(&property.condition, &filter.condition)
        && contains_ci(&property.bedroom, &filter.bedroom)
        && contains_ci(&property.bath, &filter.bath)
        && contains_ci(&property.size, &filter.size)
        && contains_ci(&property.address, &filter.locality)
        && (filter.min_price.is_empty() || price >= amount_or_zero(&filter.min_price))
        && (filter.max_price.is_empty() || price <= amount_or_zero(&filter.max_price))
}

/// Orders the collection so every matching record precedes every
/// non-matching one; within each partition, descending by numeric id
/// (most recently created first).
pub fn sort_by_match(properties: &mut [Property], filter: &PropertyFilter) {
    properties.sort_by_key(|p| (std::cmp::Reverse(matches(filter, p)), std::cmp::Reverse(p.id_num())));
}

/// Properties from the inventory satisfying a demand's constraints.
pub fn match_set<'a>(demand: &Demand, properties: &'a [Property]) -> Vec<&'a Property> {
    let filter = PropertyFilter::from_demand(demand);
    properties.iter().filter(|p| matches(&filter, p)).collect()
}
