//! Filter values, filter options and the framework taxonomy they come from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Filter field carrying the selected language
pub const FIELD_LANGUAGE: &str = "language";

/// Filter field carrying the selected subjects
pub const FIELD_SUBJECT: &str = "subject";

/// Filter field carrying the selected content formats
pub const FIELD_CONTENT_TYPE: &str = "contentType";

const DEFAULT_SUBJECTS: [&str; 5] = [
    "Mathematics",
    "Science",
    "Environmental Sciences",
    "English",
    "Hindi",
];

const DEFAULT_CONTENT_TYPES: [&str; 4] = ["Video", "PDF", "E-Book", "Quiz"];

/// Sort order applied to search results by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => anyhow::bail!("Unknown sort order: {}", s),
        }
    }
}

/// Selected filter values, keyed by filter field.
///
/// Passed to the search API as-is. Applying a new set replaces the old
/// one entirely; there is no merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValues {
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

impl FilterValues {
    /// Empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add values for a field. Fields with no values are dropped.
    pub fn with_field<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.fields.insert(field.into(), values);
        }
        self
    }

    /// Set the sort order
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Values selected for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// True when no field is selected and no sort is set
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.sort.is_none()
    }

    /// Parse `key=v1,v2` pairs (CLI syntax)
    pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> anyhow::Result<Self> {
        let mut values = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, raw) = pair
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("Invalid filter '{}', expected key=value", pair))?;
            let key = key.trim();
            if key.is_empty() {
                anyhow::bail!("Invalid filter '{}', empty key", pair);
            }
            let list: Vec<String> = raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            values = values.with_field(key, list);
        }
        Ok(values)
    }
}

/// Working state of the filter panel before it is applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub language: Option<String>,
    pub subjects: Vec<String>,
    pub content_types: Vec<String>,
    pub sort: SortOrder,
}

impl FilterSelection {
    /// Convert the panel state into the values sent with a search
    pub fn to_filter_values(&self) -> FilterValues {
        FilterValues::new()
            .with_field(FIELD_LANGUAGE, self.language.iter().cloned())
            .with_field(FIELD_SUBJECT, self.subjects.iter().cloned())
            .with_field(FIELD_CONTENT_TYPE, self.content_types.iter().cloned())
            .with_sort(self.sort)
    }
}

/// Framework taxonomy fetched from the framework service.
///
/// Opaque JSON; only [`FilterOptions::from_framework`] looks inside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameworkFilter(pub serde_json::Value);

#[derive(Debug, Deserialize)]
struct FrameworkShape {
    #[serde(default)]
    categories: Vec<CategoryShape>,
}

#[derive(Debug, Deserialize)]
struct CategoryShape {
    code: String,
    #[serde(default)]
    terms: Vec<TermShape>,
}

#[derive(Debug, Deserialize)]
struct TermShape {
    name: String,
}

/// Choices offered by the filter panel, per field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub sort: bool,
    pub fields: BTreeMap<String, Vec<String>>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(FIELD_LANGUAGE.to_string(), to_strings(&DEFAULT_SUBJECTS));
        fields.insert(FIELD_SUBJECT.to_string(), to_strings(&DEFAULT_SUBJECTS));
        fields.insert(
            FIELD_CONTENT_TYPE.to_string(),
            to_strings(&DEFAULT_CONTENT_TYPES),
        );
        Self { sort: true, fields }
    }
}

impl FilterOptions {
    /// Build options from a framework taxonomy.
    ///
    /// Each category with at least one term replaces the default options
    /// for the field named by its code. A taxonomy without usable
    /// categories yields the defaults.
    pub fn from_framework(framework: &FrameworkFilter) -> Self {
        let mut options = Self::default();

        let shape: FrameworkShape = match serde_json::from_value(framework.0.clone()) {
            Ok(shape) => shape,
            Err(e) => {
                tracing::warn!("Framework taxonomy has unexpected shape: {}", e);
                return options;
            }
        };

        for category in shape.categories {
            let mut terms: Vec<String> = Vec::new();
            for term in category.terms {
                if !terms.contains(&term.name) {
                    terms.push(term.name);
                }
            }
            if !terms.is_empty() {
                options.fields.insert(category.code, terms);
            }
        }

        options
    }

    /// Options for a single field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
