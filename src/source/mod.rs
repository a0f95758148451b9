use std::fmt;

use serde::Deserialize;

/// Seed list for a widget's candidate set.
///
/// Document sources accept either a bare list of values or an `options`
/// list whose entries are plain strings or `{ value: ... }` records:
///
/// ```yaml
/// options:
///   - value: Argentina
///   - value: Australia
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    Values(Vec<String>),
    Json(String),
    Yaml(String),
}

impl CandidateSource {
    pub fn values(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Values(values.into_iter().map(Into::into).collect())
    }

    pub fn json(document: impl Into<String>) -> Self {
        Self::Json(document.into())
    }

    pub fn yaml(document: impl Into<String>) -> Self {
        Self::Yaml(document.into())
    }

    /// Flattens the source into candidate values. Document parsing failures
    /// surface here, before any widget activates.
    pub fn load(&self) -> Result<Vec<String>, SourceError> {
        match self {
            Self::Values(values) => Ok(values.clone()),
            Self::Json(document) => {
                let document: Document = serde_json::from_str(document)
                    .map_err(|err| SourceError::new("json", err.to_string()))?;
                Ok(document.into_values())
            }
            Self::Yaml(document) => {
                let document: Document = serde_yaml::from_str(document)
                    .map_err(|err| SourceError::new("yaml", err.to_string()))?;
                Ok(document.into_values())
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Document {
    Bare(Vec<Entry>),
    Keyed { options: Vec<Entry> },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Entry {
    Plain(String),
    Valued { value: String },
}

impl Document {
    fn into_values(self) -> Vec<String> {
        let entries = match self {
            Self::Bare(entries) => entries,
            Self::Keyed { options } => options,
        };
        entries
            .into_iter()
            .map(|entry| match entry {
                Entry::Plain(value) => value,
                Entry::Valued { value } => value,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    format: &'static str,
    message: String,
}

impl SourceError {
    fn new(format: &'static str, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} candidate document: {}", self.format, self.message)
    }
}

impl std::error::Error for SourceError {}
