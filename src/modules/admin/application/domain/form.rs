use std::collections::BTreeMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;
use utoipa::ToSchema;

use crate::modules::remote_table::application::ports::outgoing::Row;

/// Field name to the string the user typed.
pub type RawForm = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    LongText,
    Url,
    Date,
    Integer,
    Checkbox,
    /// Comma-separated input stored as a list of strings
    CommaList,
    /// JSON array input stored as structured values
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldSpec {
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub label: &'static str,
    pub kind: FieldType,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldType) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldType) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Errors and policy
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be a JSON list: {reason}")]
    InvalidJson { field: &'static str, reason: String },

    #[error("Unknown field '{0}' for this form")]
    UnknownField(String),

    #[error("Could not encode the form: {0}")]
    Encode(String),
}

/// What to do with a JSON field that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFieldPolicy {
    /// Submit an empty list and log a warning.
    #[default]
    FallbackToEmpty,
    /// Refuse the submission with `DraftError::InvalidJson`.
    Reject,
}

impl FromStr for JsonFieldPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fallback" | "fallback_to_empty" => Ok(JsonFieldPolicy::FallbackToEmpty),
            "reject" | "strict" => Ok(JsonFieldPolicy::Reject),
            other => Err(format!("unknown JSON field policy '{other}'")),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Parsing
// ──────────────────────────────────────────────────────────
//

/// Splits on commas, trims, drops empty entries, keeps order.
pub fn parse_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Blank input is an empty list. Malformed input follows `policy`.
pub fn parse_json_list<T: DeserializeOwned>(
    field: &'static str,
    raw: &str,
    policy: JsonFieldPolicy,
) -> Result<Vec<T>, DraftError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Vec<T>>(raw) {
        Ok(items) => Ok(items),
        Err(e) => match policy {
            JsonFieldPolicy::FallbackToEmpty => {
                warn!("{} is not valid JSON ({}), submitting an empty list", field, e);
                Ok(Vec::new())
            }
            JsonFieldPolicy::Reject => Err(DraftError::InvalidJson {
                field,
                reason: e.to_string(),
            }),
        },
    }
}

/// Typed access to one form's raw values, labelled by its field schema.
pub struct FormReader<'a> {
    form: &'a RawForm,
    fields: &'static [FieldSpec],
    policy: JsonFieldPolicy,
}

impl<'a> FormReader<'a> {
    pub fn new(form: &'a RawForm, fields: &'static [FieldSpec], policy: JsonFieldPolicy) -> Self {
        Self {
            form,
            fields,
            policy,
        }
    }

    fn raw(&self, name: &str) -> &'a str {
        self.form.get(name).map(|v| v.trim()).unwrap_or("")
    }

    fn spec(&self, name: &'static str) -> FieldSpec {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .copied()
            .unwrap_or(FieldSpec::optional(name, name, FieldType::Text))
    }

    pub fn text(&self, name: &'static str) -> Result<String, DraftError> {
        let spec = self.spec(name);
        let value = self.raw(name);
        if spec.required && value.is_empty() {
            return Err(DraftError::MissingField(spec.label));
        }
        Ok(value.to_string())
    }

    /// Blank becomes `None`, which clears the column.
    pub fn optional_text(&self, name: &'static str) -> Option<String> {
        Some(self.raw(name))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Optional numeric string, kept as text.
    pub fn numeric_text(&self, name: &'static str) -> Result<Option<String>, DraftError> {
        match self.optional_text(name) {
            Some(value) if value.parse::<f64>().is_err() => Err(DraftError::InvalidNumber {
                field: self.spec(name).label,
                value,
            }),
            other => Ok(other),
        }
    }

    /// Blank optional integers read as 0.
    pub fn integer(&self, name: &'static str) -> Result<i32, DraftError> {
        let spec = self.spec(name);
        let value = self.raw(name);
        if value.is_empty() {
            return if spec.required {
                Err(DraftError::MissingField(spec.label))
            } else {
                Ok(0)
            };
        }
        value.parse().map_err(|_| DraftError::InvalidNumber {
            field: spec.label,
            value: value.to_string(),
        })
    }

    pub fn checkbox(&self, name: &'static str) -> bool {
        matches!(
            self.raw(name).to_ascii_lowercase().as_str(),
            "true" | "on" | "1" | "yes"
        )
    }

    pub fn list(&self, name: &'static str) -> Vec<String> {
        parse_comma_list(self.raw(name))
    }

    pub fn json_list<T: DeserializeOwned>(&self, name: &'static str) -> Result<Vec<T>, DraftError> {
        parse_json_list(self.spec(name).label, self.raw(name), self.policy)
    }
}

/// Turns a stored row back into the strings an edit form starts from.
pub fn prefill_values(fields: &[FieldSpec], row: &Row) -> RawForm {
    fields
        .iter()
        .map(|spec| {
            let value = match (spec.kind, row.get(spec.name)) {
                (_, None) | (_, Some(Value::Null)) => String::new(),
                (FieldType::Json, Some(value)) => {
                    serde_json::to_string_pretty(value).unwrap_or_default()
                }
                (FieldType::CommaList, Some(Value::Array(items))) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
                (_, Some(Value::String(s))) => s.clone(),
                (_, Some(other)) => other.to_string(),
            };
            (spec.name.to_string(), value)
        })
        .collect()
}
