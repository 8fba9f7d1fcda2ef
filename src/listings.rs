// Property listing state: records fetched from the backend, the
// loading phase, and client-side location filtering.
//
// The collection is fetched once at startup. A fetch failure leaves the
// list empty and exits the loading phase; there is no retry and no
// error surfaced beyond a log line.

use serde::{Deserialize, Serialize};

/// How many distinct locations to offer as quick filters.
pub const QUICK_LOCATION_LIMIT: usize = 6;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A listing as returned by `GET /properties`. Externally owned: the
/// fields are consumed as opaque attributes and never mutated here.
/// Unknown fields on the wire are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub property_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub total_apartments: f64,
    #[serde(default)]
    pub apartment_size: f64,
    #[serde(default)]
    pub present_status: String,
    #[serde(default)]
    pub num_floors: f64,
    #[serde(default)]
    pub land_size: f64,
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Fetch phase for the listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingsPhase {
    Loading,
    Loaded,
}

/// The listing view's state: fetched records plus the current filter.
#[derive(Debug, Clone)]
pub struct ListingsState {
    pub phase: ListingsPhase,
    properties: Vec<PropertyRecord>,
    pub filter: String,
}

impl Default for ListingsState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingsState {
    pub fn new() -> Self {
        ListingsState {
            phase: ListingsPhase::Loading,
            properties: Vec::new(),
            filter: String::new(),
        }
    }

    /// Apply the startup fetch result. A failure arrives as an empty
    /// vector; either way the view leaves the loading phase.
    pub fn set_loaded(&mut self, properties: Vec<PropertyRecord>) {
        self.properties = properties;
        self.phase = ListingsPhase::Loaded;
    }

    pub fn all(&self) -> &[PropertyRecord] {
        &self.properties
    }

    /// Records whose location contains the current filter text,
    /// case-insensitively. An empty filter passes everything. Purely
    /// client-side; the source records are not touched.
    pub fn filtered(&self) -> Vec<&PropertyRecord> {
        filter_by_location(&self.properties, &self.filter)
    }

    /// Distinct known locations, sorted lexicographically and capped,
    /// offered as quick-filter shortcuts.
    pub fn quick_locations(&self) -> Vec<String> {
        let mut locations: Vec<String> = self
            .properties
            .iter()
            .map(|p| p.location.clone())
            .filter(|l| !l.is_empty())
            .collect();
        locations.sort();
        locations.dedup();
        locations.truncate(QUICK_LOCATION_LIMIT);
        locations
    }
}

/// Case-insensitive substring match on the location field.
pub fn filter_by_location<'a>(
    properties: &'a [PropertyRecord],
    filter: &str,
) -> Vec<&'a PropertyRecord> {
    if filter.is_empty() {
        return properties.iter().collect();
    }
    let needle = filter.to_lowercase();
    properties
        .iter()
        .filter(|p| p.location.to_lowercase().contains(&needle))
        .collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, location: &str) -> PropertyRecord {
        PropertyRecord {
            id: None,
            company_name: "ABC Developers Ltd.".to_string(),
            property_name: name.to_string(),
            location: location.to_string(),
            photo_url: String::new(),
            project_type: "Residential".to_string(),
            total_apartments: 10.0,
            apartment_size: 4200.0,
            present_status: "ongoing".to_string(),
            num_floors: 10.0,
            land_size: 9.85,
        }
    }

    #[test]
    fn starts_loading_and_empty() {
        let state = ListingsState::new();
        assert_eq!(state.phase, ListingsPhase::Loading);
        assert!(state.all().is_empty());
        assert!(state.filter.is_empty());
    }

    #[test]
    fn failed_fetch_leaves_list_empty_but_loaded() {
        let mut state = ListingsState::new();
        state.set_loaded(Vec::new());
        assert_eq!(state.phase, ListingsPhase::Loaded);
        assert!(state.all().is_empty());
        assert!(state.filtered().is_empty());
        assert!(state.quick_locations().is_empty());
    }

    #[test]
    fn filter_is_case_insensitive_contains() {
        let properties = vec![
            record("A", "Gulshan"),
            record("B", "Banani"),
            record("C", "Gulshan Ave"),
        ];

        let matched = filter_by_location(&properties, "gulshan");
        let names: Vec<&str> = matched.iter().map(|p| p.property_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);

        // Source records unmutated.
        assert_eq!(properties[0].location, "Gulshan");
        assert_eq!(properties[2].location, "Gulshan Ave");
    }

    #[test]
    fn empty_filter_passes_everything() {
        let properties = vec![record("A", "Gulshan"), record("B", "Banani")];
        assert_eq!(filter_by_location(&properties, "").len(), 2);
    }

    #[test]
    fn filter_with_no_match_is_empty() {
        let properties = vec![record("A", "Gulshan")];
        assert!(filter_by_location(&properties, "Uttara").is_empty());
    }

    #[test]
    fn quick_locations_distinct_sorted_capped() {
        let mut state = ListingsState::new();
        state.set_loaded(vec![
            record("A", "Mirpur"),
            record("B", "Gulshan"),
            record("C", "Gulshan"),
            record("D", "Banani"),
            record("E", ""),
            record("F", "Uttara"),
            record("G", "Dhanmondi"),
            record("H", "Bashundhara"),
            record("I", "Mohakhali"),
        ]);

        let locations = state.quick_locations();
        assert_eq!(locations.len(), QUICK_LOCATION_LIMIT);
        // Sorted lexicographically, duplicates and blanks dropped,
        // capped before the later entries.
        assert_eq!(
            locations,
            vec![
                "Banani",
                "Bashundhara",
                "Dhanmondi",
                "Gulshan",
                "Mirpur",
                "Mohakhali"
            ]
        );
    }

    #[test]
    fn deserializes_wire_record_with_unknown_fields() {
        let json = r#"{
            "_id": "665f1c2ab1",
            "companyName": "ABC Developers Ltd.",
            "propertyName": "Sunrise Residency",
            "location": "Gulshan",
            "photoUrl": "https://example.com/p.jpg",
            "projectType": "Residential",
            "totalApartments": 24,
            "apartmentSize": 1450.5,
            "presentStatus": "ongoing",
            "numFloors": 12,
            "landSize": 9.85,
            "createdAt": "2026-01-01T00:00:00Z"
        }"#;
        let record: PropertyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_deref(), Some("665f1c2ab1"));
        assert_eq!(record.property_name, "Sunrise Residency");
        assert_eq!(record.location, "Gulshan");
        assert!((record.apartment_size - 1450.5).abs() < f64::EPSILON);
    }

    #[test]
    fn deserializes_sparse_record() {
        // The backend may return partially-filled documents; missing
        // fields fall back to defaults instead of failing the fetch.
        let record: PropertyRecord =
            serde_json::from_str(r#"{ "propertyName": "Bare" }"#).unwrap();
        assert_eq!(record.property_name, "Bare");
        assert!(record.location.is_empty());
        assert_eq!(record.num_floors, 0.0);
    }
}
