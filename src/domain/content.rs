//! Content items as returned by the search, hierarchy and read APIs.

use serde::{Deserialize, Deserializer, Serialize};

/// Image shown on a card when the item has no poster
pub const CARD_PLACEHOLDER_IMAGE: &str = "/assets/images/image_ver.png";

/// Text shown on a card when the item has no description
pub const CARD_PLACEHOLDER_DESCRIPTION: &str = "-";

/// Poster shown on the details page when the item has no poster
pub const DETAILS_PLACEHOLDER_IMAGE: &str = "/assets/images/default_hori.png";

/// Text shown on the details page when the item has no description
pub const DETAILS_PLACEHOLDER_DESCRIPTION: &str = "No description available";

/// Mime types the player renders directly.
///
/// Anything outside this list is treated as composite content and goes
/// through a hierarchy lookup before the details page.
pub const PLAYABLE_MIME_TYPES: [&str; 8] = [
    "application/vnd.ekstep.ecml-archive",
    "application/vnd.ekstep.html-archive",
    "application/vnd.ekstep.h5p-archive",
    "application/pdf",
    "video/mp4",
    "video/webm",
    "application/epub",
    "application/vnd.sunbird.questionset",
];

/// Check whether a mime type can be opened straight in the player
pub fn is_playable(mime_type: &str) -> bool {
    PLAYABLE_MIME_TYPES.contains(&mime_type)
}

/// A unit of learning material with shared display metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Unique key; the only value used to correlate a card with a fetch
    pub identifier: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Decides whether activation opens the player or the details page
    #[serde(default, deserialize_with = "null_as_default")]
    pub mime_type: String,

    /// Display label (e.g. "Course", "Resource")
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub grade_level: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub language: Vec<String>,

    /// Rendered as tag chips on the details page
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,

    /// Progress-tracking settings for collections, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trackable: Option<serde_json::Value>,

    /// Nested units returned by a hierarchy lookup
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<ContentItem>,
}

impl ContentItem {
    /// Create an item with just an identifier, name and mime type
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            mime_type: mime_type.into(),
            ..Default::default()
        }
    }

    /// Set the poster image
    pub fn with_poster(mut self, poster_image: impl Into<String>) -> Self {
        self.poster_image = Some(poster_image.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the display content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the keywords
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Poster image, with empty strings treated as missing
    pub fn poster(&self) -> Option<&str> {
        non_empty(self.poster_image.as_deref())
    }

    /// Description, with empty strings treated as missing
    pub fn description_text(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// Whether activating this item opens the player directly
    pub fn is_playable(&self) -> bool {
        is_playable(&self.mime_type)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Read `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Tabs on the content list page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// "Courses" tab
    #[default]
    Courses,

    /// "Content" tab (learning resources)
    Content,
}

impl Tab {
    /// All tabs in display order
    pub const ALL: [Tab; 2] = [Tab::Courses, Tab::Content];

    /// Tab label shown in the tab bar
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Courses => "Courses",
            Tab::Content => "Content",
        }
    }

    /// Content type sent to the search API for this tab
    pub fn search_type(&self) -> &'static str {
        match self {
            Tab::Courses => "Course",
            Tab::Content => "Learning Resource",
        }
    }

    /// Zero-based position in the tab bar
    pub fn index(&self) -> usize {
        match self {
            Tab::Courses => 0,
            Tab::Content => 1,
        }
    }

    /// Tab at a zero-based position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "courses" | "course" | "0" => Ok(Tab::Courses),
            "content" | "learning resource" | "resources" | "1" => Ok(Tab::Content),
            _ => anyhow::bail!("Unknown tab: {}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playable_allow_list() {
        assert!(is_playable("application/pdf"));
        assert!(is_playable("video/mp4"));
        assert!(is_playable("application/vnd.sunbird.questionset"));
        assert!(!is_playable("application/vnd.ekstep.content-collection"));
        assert!(!is_playable("APPLICATION/PDF"));
        assert!(!is_playable(""));
    }

    #[test]
    fn test_content_item_from_wire() {
        let json = r#"{
            "identifier": "do_123",
            "name": "  Fractions  ",
            "mimeType": "application/pdf",
            "contentType": "Resource",
            "posterImage": "",
            "gradeLevel": ["Class 5"],
            "keywords": ["maths", "fractions"],
            "trackable": {"enabled": "Yes"}
        }"#;

        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.identifier, "do_123");
        assert_eq!(item.mime_type, "application/pdf");
        assert_eq!(item.grade_level, vec!["Class 5"]);
        assert!(item.language.is_empty());
        assert_eq!(item.poster(), None);
        assert_eq!(item.description_text(), None);
        assert!(item.is_playable());
        assert!(item.trackable.is_some());
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let json = r#"{
            "identifier": "do_9",
            "name": null,
            "mimeType": null,
            "contentType": null,
            "gradeLevel": null,
            "language": null,
            "keywords": null,
            "description": null,
            "children": null
        }"#;

        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.identifier, "do_9");
        assert_eq!(item.name, "");
        assert_eq!(item.mime_type, "");
        assert!(item.keywords.is_empty());
        assert!(item.children.is_empty());
        assert_eq!(item.description_text(), None);
    }

    #[test]
    fn test_null_keywords_keep_name() {
        let json = r#"{"identifier": "do_1", "name": "Geo", "keywords": null}"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.name, "Geo");
        assert!(item.keywords.is_empty());
    }

    #[test]
    fn test_tab_search_types() {
        assert_eq!(Tab::Courses.search_type(), "Course");
        assert_eq!(Tab::Content.search_type(), "Learning Resource");
        assert_eq!(Tab::from_index(1), Some(Tab::Content));
        assert_eq!(Tab::from_index(2), None);
        assert_eq!("content".parse::<Tab>().unwrap(), Tab::Content);
        assert!("videos".parse::<Tab>().is_err());
    }
}
