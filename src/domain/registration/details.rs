//! Farmer details captured by the registration form.
//!
//! Known form fields are typed; anything else the form sends is kept in
//! `extra` so newer form versions pass through unchanged. The payment
//! workflow only reads `farmer_name` and `contact_number`.

use std::collections::BTreeMap;

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::ValidationError;

/// Keys owned by the registration record itself. Form submissions cannot
/// smuggle them in through the catch-all map.
const RESERVED_KEYS: &[&str] = &[
    "_id",
    "id",
    "orderId",
    "paymentStatus",
    "paymentId",
    "signature",
    "paidAt",
    "createdAt",
    "updatedAt",
    "version",
];

/// One crop planted by the farmer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropEntry {
    #[serde(deserialize_with = "scalar_string")]
    pub crop_name: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub crop_type: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub variety: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub area_allocated: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub sowing_date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub expected_harvest_date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub irrigation_method: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub expected_yield: Option<String>,
}

/// Form payload of a registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmerDetails {
    #[serde(deserialize_with = "scalar_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub registration_date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub farmer_name: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub father_spouse_name: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub contact_number: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub alt_email: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub village: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub mandal: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub district: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub aadhaar_or_farmer_id: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub total_land: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub area_under_natural_ha: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub crops: Vec<CropEntry>,

    // Single-crop fields used by older form versions.
    #[serde(deserialize_with = "scalar_string")]
    pub present_crop: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub sowing_date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub harvesting_date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub crop_types: Option<String>,

    #[serde(deserialize_with = "scalar_string")]
    pub current_practice: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub years_experience: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub irrigation_source: Option<String>,

    #[serde(deserialize_with = "one_or_many")]
    pub livestock: Vec<String>,

    #[serde(deserialize_with = "scalar_string")]
    pub willing_natural_inputs: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub training_required: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub local_group: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub preferred_season: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub remarks: Option<String>,

    /// Unrecognised form fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FarmerDetails {
    /// Farmer name forwarded to the gateway, empty if absent.
    pub fn farmer_name_or_default(&self) -> &str {
        self.farmer_name.as_deref().unwrap_or_default()
    }

    /// Contact number forwarded to the gateway, empty if absent.
    pub fn contact_number_or_default(&self) -> &str {
        self.contact_number.as_deref().unwrap_or_default()
    }

    /// Drops catch-all entries that collide with registration-owned keys.
    pub fn strip_reserved(mut self) -> Self {
        self.extra
            .retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));
        self
    }

    /// Checks the fields a stored registration must carry.
    ///
    /// Store adapters call this before inserting, the way a schema with
    /// NOT NULL columns would reject the row.
    pub fn validate_required(&self) -> Result<(), ValidationError> {
        let required = [
            ("email", &self.email),
            ("farmerName", &self.farmer_name),
            ("fatherSpouseName", &self.father_spouse_name),
            ("contactNumber", &self.contact_number),
        ];

        for (field, value) in required {
            let present = value
                .as_deref()
                .map(|v| !v.trim().is_empty())
                .unwrap_or(false);
            if !present {
                return Err(ValidationError::empty_field(field));
            }
        }
        Ok(())
    }
}

/// Accepts either a single string or a list of strings.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Null,
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) if s.is_empty() => Vec::new(),
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
        OneOrMany::Null => Vec::new(),
    })
}

/// Reads a form value as text: numbers and booleans keep their JSON
/// spelling, `null` is absent.
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        serde_json::Value::Bool(b) => Ok(Some(b.to_string())),
        serde_json::Value::Array(_) => Err(D::Error::invalid_type(
            Unexpected::Seq,
            &"a string, number or boolean",
        )),
        serde_json::Value::Object(_) => Err(D::Error::invalid_type(
            Unexpected::Map,
            &"a string, number or boolean",
        )),
    }
}

#[cfg(test)]
pub(crate) fn complete_details() -> FarmerDetails {
    FarmerDetails {
        email: Some("ravi@example.com".to_string()),
        farmer_name: Some("Ravi Kumar".to_string()),
        father_spouse_name: Some("Suresh Kumar".to_string()),
        contact_number: Some("9876543210".to_string()),
        village: Some("Kondapur".to_string()),
        ..Default::default()
    }
}
