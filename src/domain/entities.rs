use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// A cargo shipment as exchanged with the booking API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoBooking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category: String,
    pub subcategory: String,
    pub item_type: String,
    pub package_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub dimensions: Dimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<bool>,
    pub origin: String,
    pub destination: String,
    /// RFC 3339 timestamp assigned by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CargoStatus>,
}

impl CargoBooking {
    /// Parses `created_date`, ignoring values that are not RFC 3339.
    pub fn created_at(&self) -> Option<SystemTime> {
        let raw = self.created_date.as_deref()?;
        let parsed = OffsetDateTime::parse(raw, &Rfc3339).ok()?;
        let secs = u64::try_from(parsed.unix_timestamp()).ok()?;
        SystemTime::UNIX_EPOCH
            .checked_add(Duration::from_secs(secs))
            .and_then(|time| time.checked_add(Duration::from_nanos(parsed.nanosecond() as u64)))
    }

    /// Display label for the selected catalog path.
    pub fn path_label(&self) -> String {
        format!(
            "{} / {} / {}",
            self.category, self.subcategory, self.item_type
        )
    }

    pub fn status_or_default(&self) -> CargoStatus {
        self.status.unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<LengthUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<WeightUnit>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Cm,
    Inches,
    Meters,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 3] = [LengthUnit::Cm, LengthUnit::Inches, LengthUnit::Meters];

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Cm => "cm",
            LengthUnit::Inches => "inches",
            LengthUnit::Meters => "meters",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.as_str() == raw)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 2] = [WeightUnit::Kg, WeightUnit::Lbs];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.as_str() == raw)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CargoStatus {
    #[default]
    Pending,
    Confirmed,
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
    Cancelled,
}

impl CargoStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CargoStatus::Pending => "Pending",
            CargoStatus::Confirmed => "Confirmed",
            CargoStatus::InTransit => "In Transit",
            CargoStatus::Delivered => "Delivered",
            CargoStatus::Cancelled => "Cancelled",
        }
    }

    /// Bookings that already left the warehouse or were closed cannot be cancelled.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, CargoStatus::Pending | CargoStatus::Confirmed)
    }
}

/// Envelope returned by create, update and delete.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CargoBooking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

/// Partial update body; `None` fields are left out of the request.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CargoStatus>,
}

impl BookingPatch {
    pub fn status(status: CargoStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Label/value pair backing every dropdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn same(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

pub fn to_options<I, S>(values: I) -> Vec<SelectOption>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(SelectOption::same).collect()
}
