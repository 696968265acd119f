//! Tenant record types for the mall directory feed.
//!
//! ## Observed shape from the live `tenants.php` endpoint
//!
//! The feed is a single JSON array of tenant objects. Field coverage is
//! inconsistent across tenants — kiosks and seasonal stores omit whole
//! sub-objects — so every field here is optional with a defined empty
//! default, and a value of the wrong JSON type degrades to that default
//! instead of failing the record.
//!
//! ### `name`
//! Display name of the tenant. Occasionally absent on placeholder entries.
//!
//! ### `categories` / `type`
//! Arrays of `{ "name": ... }` wrapper objects, not plain strings. `type`
//! holds coarse buckets (`"Retail"`, `"Food & Beverage"`, `"Attraction"`);
//! `categories` is finer-grained and may be empty.
//!
//! ### `level`
//! Usually a string (`"1"`, `"3"`), but some entries carry a bare number.
//! Coerced to text on the way in.
//!
//! ### `location.unit_number`
//! Mall unit designator like `"N244"`. Numeric on a handful of entries;
//! coerced like `level`.
//!
//! ### `hours`
//! `{ "regular": [...], "today": {...} }` with leaves whose layout varies by
//! tenant (per-day ranges, holiday notes, free-text). Passed through opaque;
//! nothing downstream interprets the leaves.
//!
//! ### `status`
//! `{ "name": ... }` wrapper, e.g. `"Open"` or `"Coming Soon"`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A `{ "name": ... }` wrapper object, used by `categories`, `type`, and
/// `status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
}

/// Unit placement within the mall.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitLocation {
    /// Unit designator like `"N244"`. Numeric on some entries; coerced to
    /// text.
    #[serde(default, deserialize_with = "text_or_number")]
    pub unit_number: String,
}

/// Opening hours, passed through untouched.
///
/// Leaf layout varies by tenant, so both branches stay as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoursRecord {
    /// Weekly schedule entries.
    #[serde(default, deserialize_with = "lenient")]
    pub regular: Vec<serde_json::Value>,
    /// Today's hours, keyed however the feed keys them.
    #[serde(default, deserialize_with = "lenient")]
    pub today: serde_json::Map<String, serde_json::Value>,
}

/// A single tenant as delivered by the directory feed.
///
/// Missing, `null`, and wrong-typed fields all collapse to the field default,
/// so one sloppy tenant never poisons the parsed list. Unknown extra fields
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient")]
    pub categories: Vec<NamedEntry>,

    /// Floor number as text. Coerced from a bare JSON number when needed.
    #[serde(default, deserialize_with = "text_or_number")]
    pub level: String,

    #[serde(default, deserialize_with = "lenient")]
    pub location: UnitLocation,

    /// Coarse tenant buckets. `type` in the feed; renamed for Rust.
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub store_type: Vec<NamedEntry>,

    #[serde(default, deserialize_with = "lenient")]
    pub hours: HoursRecord,

    #[serde(default, deserialize_with = "lenient")]
    pub status: NamedEntry,
}

/// The flat display projection of a [`StoreRecord`].
///
/// Wrapper objects are collapsed to their names; `hours` passes through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedStore {
    pub name: String,
    pub categories: Vec<String>,
    pub level: String,
    /// The unit designator from `location.unit_number`.
    pub location: String,
    #[serde(rename = "type")]
    pub store_type: Vec<String>,
    pub hours: HoursRecord,
    pub status: String,
}

/// A [`NormalizedStore`] paired with its search score.
///
/// Serializes flat, with `relevance` as the trailing key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredStore {
    #[serde(flatten)]
    pub store: NormalizedStore,
    pub relevance: usize,
}

/// Projects a raw [`StoreRecord`] into its [`NormalizedStore`] display shape.
///
/// Pure and total: any record that deserialized normalizes without error,
/// and repeated calls yield identical output. Wrapper names are trimmed and
/// empty ones dropped.
#[must_use]
pub fn normalize(record: &StoreRecord) -> NormalizedStore {
    NormalizedStore {
        name: record.name.clone(),
        categories: project_names(&record.categories),
        level: record.level.clone(),
        location: record.location.unit_number.clone(),
        store_type: project_names(&record.store_type),
        hours: record.hours.clone(),
        status: record.status.name.clone(),
    }
}

fn project_names(entries: &[NamedEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Deserializes any JSON value, falling back to `T::default()` when the value
/// is `null` or of the wrong type. Combined with `#[serde(default)]` this
/// covers the absent case too.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Like [`lenient`] for text fields the feed sometimes delivers as bare JSON
/// numbers (`level`, `unit_number`).
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_record(body: serde_json::Value) -> StoreRecord {
        serde_json::from_value(body).expect("record should deserialize")
    }

    // -----------------------------------------------------------------------
    // deserialization
    // -----------------------------------------------------------------------

    #[test]
    fn full_record_deserializes() {
        let record = parse_record(serde_json::json!({
            "name": "Caribou Coffee",
            "categories": [{ "name": "Coffee" }, { "name": "Bakery" }],
            "level": "1",
            "location": { "unit_number": "N244" },
            "type": [{ "name": "Food & Beverage" }],
            "hours": {
                "regular": [{ "day": "Monday", "open": "10:00", "close": "21:00" }],
                "today": { "open": "10:00", "close": "21:00" }
            },
            "status": { "name": "Open" }
        }));

        assert_eq!(record.name, "Caribou Coffee");
        assert_eq!(record.categories.len(), 2);
        assert_eq!(record.categories[0].name, "Coffee");
        assert_eq!(record.level, "1");
        assert_eq!(record.location.unit_number, "N244");
        assert_eq!(record.store_type[0].name, "Food & Beverage");
        assert_eq!(record.hours.regular.len(), 1);
        assert_eq!(record.status.name, "Open");
    }

    #[test]
    fn empty_object_deserializes_to_defaults() {
        let record = parse_record(serde_json::json!({}));
        assert_eq!(record, StoreRecord::default());
    }

    #[test]
    fn null_fields_deserialize_to_defaults() {
        let record = parse_record(serde_json::json!({
            "name": null,
            "categories": null,
            "level": null,
            "location": null,
            "type": null,
            "hours": null,
            "status": null
        }));
        assert_eq!(record, StoreRecord::default());
    }

    #[test]
    fn wrong_typed_fields_deserialize_to_defaults() {
        let record = parse_record(serde_json::json!({
            "name": 42,
            "categories": "coffee",
            "location": "north wing",
            "type": { "name": "Retail" },
            "hours": [],
            "status": "Open"
        }));
        assert_eq!(record, StoreRecord::default());
    }

    #[test]
    fn numeric_level_coerces_to_text() {
        let record = parse_record(serde_json::json!({ "level": 3 }));
        assert_eq!(record.level, "3");
    }

    #[test]
    fn numeric_unit_number_coerces_to_text() {
        let record = parse_record(serde_json::json!({
            "location": { "unit_number": 244 }
        }));
        assert_eq!(record.location.unit_number, "244");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let record = parse_record(serde_json::json!({
            "name": "Lego Store",
            "tenant_id": 9917,
            "logo_url": "https://cdn.example.com/lego.png"
        }));
        assert_eq!(record.name, "Lego Store");
    }

    #[test]
    fn hours_leaves_pass_through_unparsed() {
        let record = parse_record(serde_json::json!({
            "hours": {
                "regular": ["Mon-Sat 10-9", { "holiday": "closed" }],
                "today": { "note": "extended hours" }
            }
        }));
        assert_eq!(record.hours.regular.len(), 2);
        assert_eq!(
            record.hours.today.get("note"),
            Some(&serde_json::Value::String("extended hours".to_owned()))
        );
    }

    // -----------------------------------------------------------------------
    // normalize
    // -----------------------------------------------------------------------

    fn make_record() -> StoreRecord {
        parse_record(serde_json::json!({
            "name": "Caribou Coffee",
            "categories": [{ "name": "Coffee" }, { "name": " " }, { "name": "Bakery" }],
            "level": "1",
            "location": { "unit_number": "N244" },
            "type": [{ "name": "Food & Beverage" }, {}],
            "hours": { "today": { "open": "10:00" } },
            "status": { "name": "Open" }
        }))
    }

    #[test]
    fn normalize_projects_wrapper_names() {
        let normalized = normalize(&make_record());
        assert_eq!(normalized.name, "Caribou Coffee");
        assert_eq!(normalized.categories, vec!["Coffee", "Bakery"]);
        assert_eq!(normalized.level, "1");
        assert_eq!(normalized.location, "N244");
        assert_eq!(normalized.store_type, vec!["Food & Beverage"]);
        assert_eq!(normalized.status, "Open");
    }

    #[test]
    fn normalize_never_fails_on_a_default_record() {
        let normalized = normalize(&StoreRecord::default());
        assert_eq!(normalized.name, "");
        assert!(normalized.categories.is_empty());
        assert!(normalized.store_type.is_empty());
        assert_eq!(normalized.status, "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let record = make_record();
        assert_eq!(normalize(&record), normalize(&record));
    }

    // -----------------------------------------------------------------------
    // serialization
    // -----------------------------------------------------------------------

    #[test]
    fn normalized_store_serializes_type_key() {
        let rendered = serde_json::to_string(&normalize(&make_record())).unwrap();
        assert!(rendered.contains("\"type\":"), "got: {rendered}");
        assert!(!rendered.contains("store_type"), "got: {rendered}");
    }

    #[test]
    fn scored_store_serializes_flat_with_trailing_relevance() {
        let scored = ScoredStore {
            store: normalize(&make_record()),
            relevance: 2,
        };
        let rendered = serde_json::to_string(&scored).unwrap();
        assert!(rendered.starts_with("{\"name\":"), "got: {rendered}");
        assert!(rendered.ends_with("\"relevance\":2}"), "got: {rendered}");
        assert!(!rendered.contains("\"store\":"), "got: {rendered}");
    }
}
