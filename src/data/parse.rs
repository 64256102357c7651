use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct RawPerson {
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) subteam: String,
    #[serde(default, rename = "PI", deserialize_with = "lenient_bool")]
    pub(super) pi: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct RawPublication {
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) team: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) short_title: String,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub(super) kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) project_year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) doi: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub(super) authors: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) venue: String,
}

impl RawPublication {
    pub(super) fn resolved_year(&self) -> String {
        let project_year = self.project_year.trim();
        if !project_year.is_empty() {
            return project_year.to_owned();
        }

        let year = self.year.trim();
        if !year.is_empty() {
            return year.to_owned();
        }

        match self.date.get(..4) {
            Some(prefix) if prefix.chars().all(|c| c.is_ascii_digit()) => prefix.to_owned(),
            _ => String::new(),
        }
    }

    pub(super) fn label(&self) -> String {
        [&self.short_title, &self.title, &self.id]
            .into_iter()
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .unwrap_or_default()
            .to_owned()
    }

    pub(super) fn doi(&self) -> Option<String> {
        let doi = self.doi.trim();
        (!doi.is_empty()).then(|| doi.to_owned())
    }
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?)
        .trim()
        .to_owned())
}

fn lenient_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        Value::Null => Vec::new(),
        single => vec![single],
    };

    Ok(values
        .into_iter()
        .map(|value| scalar_to_string(value).trim().to_owned())
        .filter(|value| !value.is_empty())
        .collect())
}

fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        ),
        _ => false,
    })
}

pub(super) fn parse_ndjson<T: DeserializeOwned>(raw: &str, source: &str) -> Result<Vec<T>> {
    let mut records = Vec::new();
    for (line_number, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(line) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!(source, line = line_number + 1, %error, "skipping malformed record");
            }
        }
    }
    Ok(records)
}
