// Listing submission form: a controlled record with one change handler
// per keyed field.
//
// Numeric fields hold `Option<f64>` so invalid or blank input becomes
// "empty" rather than NaN. Submission re-coerces defensively (blank
// numeric fields post as 0). On success the form resets to its
// defaults; on failure the input is left intact for retry.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field keys
// ---------------------------------------------------------------------------

/// Keys for the form's flat field mapping, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CompanyName,
    PropertyName,
    Location,
    PhotoUrl,
    ProjectType,
    PresentStatus,
    TotalApartments,
    NumFloors,
    ApartmentSize,
    LandSize,
}

impl Field {
    /// All fields in display/tab order.
    pub const ALL: &'static [Field] = &[
        Field::CompanyName,
        Field::PropertyName,
        Field::Location,
        Field::PhotoUrl,
        Field::ProjectType,
        Field::PresentStatus,
        Field::TotalApartments,
        Field::NumFloors,
        Field::ApartmentSize,
        Field::LandSize,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::CompanyName => "Company Name",
            Field::PropertyName => "Property Name",
            Field::Location => "Location",
            Field::PhotoUrl => "Property Photo URL",
            Field::ProjectType => "Project Type",
            Field::PresentStatus => "Present Status",
            Field::TotalApartments => "Total Apartments",
            Field::NumFloors => "Number Of Floors",
            Field::ApartmentSize => "Apartment Size (sft)",
            Field::LandSize => "Land Size (katha)",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::TotalApartments | Field::NumFloors | Field::ApartmentSize | Field::LandSize
        )
    }

    /// Choice fields cycle through a fixed option list instead of
    /// taking free text.
    pub fn options(&self) -> Option<&'static [&'static str]> {
        match self {
            Field::ProjectType => Some(&["Residential", "Commercial", "Mixed-Use"]),
            Field::PresentStatus => Some(&["ongoing", "completed", "upcoming"]),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// The controlled form record. Numeric fields are `None` when blank or
/// when the last input failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct HostForm {
    pub company_name: String,
    pub property_name: String,
    pub location: String,
    pub photo_url: String,
    pub project_type: String,
    pub present_status: String,
    pub total_apartments: Option<f64>,
    pub num_floors: Option<f64>,
    pub apartment_size: Option<f64>,
    pub land_size: Option<f64>,
}

impl Default for HostForm {
    fn default() -> Self {
        HostForm {
            company_name: String::new(),
            property_name: String::new(),
            location: String::new(),
            photo_url: String::new(),
            project_type: "Residential".to_string(),
            present_status: "ongoing".to_string(),
            total_apartments: Some(10.0),
            num_floors: Some(10.0),
            apartment_size: Some(4200.0),
            land_size: Some(9.85),
        }
    }
}

impl HostForm {
    /// The single change handler: apply raw input to one keyed field.
    /// Numeric fields parse to `Some(value)`, or `None` on blank or
    /// invalid input — never NaN.
    pub fn set(&mut self, field: Field, raw: &str) {
        match field {
            Field::CompanyName => self.company_name = raw.to_string(),
            Field::PropertyName => self.property_name = raw.to_string(),
            Field::Location => self.location = raw.to_string(),
            Field::PhotoUrl => self.photo_url = raw.to_string(),
            Field::ProjectType => self.project_type = raw.to_string(),
            Field::PresentStatus => self.present_status = raw.to_string(),
            Field::TotalApartments => self.total_apartments = parse_numeric(raw),
            Field::NumFloors => self.num_floors = parse_numeric(raw),
            Field::ApartmentSize => self.apartment_size = parse_numeric(raw),
            Field::LandSize => self.land_size = parse_numeric(raw),
        }
    }

    /// Current display text for a field (what an input box shows).
    pub fn display(&self, field: Field) -> String {
        match field {
            Field::CompanyName => self.company_name.clone(),
            Field::PropertyName => self.property_name.clone(),
            Field::Location => self.location.clone(),
            Field::PhotoUrl => self.photo_url.clone(),
            Field::ProjectType => self.project_type.clone(),
            Field::PresentStatus => self.present_status.clone(),
            Field::TotalApartments => display_numeric(self.total_apartments),
            Field::NumFloors => display_numeric(self.num_floors),
            Field::ApartmentSize => display_numeric(self.apartment_size),
            Field::LandSize => display_numeric(self.land_size),
        }
    }

    /// Build the wire payload, defensively coercing blank numeric
    /// fields to 0.
    pub fn payload(&self) -> HostSubmission {
        HostSubmission {
            company_name: self.company_name.clone(),
            property_name: self.property_name.clone(),
            location: self.location.clone(),
            photo_url: self.photo_url.clone(),
            project_type: self.project_type.clone(),
            present_status: self.present_status.clone(),
            total_apartments: self.total_apartments.unwrap_or(0.0),
            num_floors: self.num_floors.unwrap_or(0.0),
            apartment_size: self.apartment_size.unwrap_or(0.0),
            land_size: self.land_size.unwrap_or(0.0),
        }
    }

    /// Reset to initial defaults (after a successful submission).
    pub fn reset(&mut self) {
        *self = HostForm::default();
    }
}

fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn display_numeric(value: Option<f64>) -> String {
    match value {
        // Integral values display without a trailing ".0", matching
        // what a number input would show.
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{v}"),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Wire payload
// ---------------------------------------------------------------------------

/// Body for `POST /host`. Field names are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSubmission {
    pub company_name: String,
    pub property_name: String,
    pub location: String,
    pub photo_url: String,
    pub project_type: String,
    pub present_status: String,
    pub total_apartments: f64,
    pub num_floors: f64,
    pub apartment_size: f64,
    pub land_size: f64,
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
