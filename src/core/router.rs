//! Routes the pages navigate to, and parsing of incoming locations.

use anyhow::{Context, Result};
use percent_encoding::percent_decode_str;
use reqwest::Url;

/// Origin used to parse relative locations
const LOCAL_ORIGIN: &str = "http://localhost";

/// A navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,

    /// `/page-2`
    Page2,

    /// `/content`, optionally pinned to one item via `?identifier=`
    Content { identifier: Option<String> },

    /// `/player/{identifier}`
    Player(String),

    /// `/content-details/{identifier}`
    ContentDetails(String),

    /// `/details/{identifier}`, the start/continue view
    Start(String),

    /// Previous entry in history
    Back,

    /// Absolute location outside the app (e.g. the login page)
    External(String),
}

impl Route {
    /// Location string for this route
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Page2 => "/page-2".to_string(),
            Route::Content { identifier: None } => "/content".to_string(),
            Route::Content {
                identifier: Some(id),
            } => {
                let mut url = local_url("/content");
                url.query_pairs_mut().append_pair("identifier", id);
                relative(&url)
            }
            Route::Player(id) => segment_path("player", id),
            Route::ContentDetails(id) => segment_path("content-details", id),
            Route::Start(id) => segment_path("details", id),
            Route::Back => "back".to_string(),
            Route::External(url) => url.clone(),
        }
    }

    /// Parse a location produced by [`Route::path`] or typed by a user.
    ///
    /// Absolute URLs are treated as external.
    pub fn parse(location: &str) -> Result<Self> {
        if location == "back" {
            return Ok(Route::Back);
        }
        if Url::parse(location).is_ok() {
            return Ok(Route::External(location.to_string()));
        }

        let url = Url::parse(LOCAL_ORIGIN)
            .and_then(|base| base.join(location))
            .with_context(|| format!("Invalid location: {}", location))?;

        let segments: Vec<String> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).map(decode_segment).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Ok(Route::Home),
            [page] if page == "page-2" => Ok(Route::Page2),
            [page] if page == "content" => Ok(Route::Content {
                identifier: query_identifier(&url),
            }),
            [kind, id] => match kind.as_str() {
                "player" => Ok(Route::Player(id.clone())),
                "content-details" => Ok(Route::ContentDetails(id.clone())),
                "details" => Ok(Route::Start(id.clone())),
                _ => anyhow::bail!("Unknown route: {}", location),
            },
            _ => anyhow::bail!("Unknown route: {}", location),
        }
    }

    /// Identifier carried by the route, if any
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Route::Player(id) | Route::ContentDetails(id) | Route::Start(id) => Some(id),
            Route::Content { identifier } => identifier.as_deref(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Non-empty `identifier` query parameter
fn query_identifier(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "identifier")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn local_url(path: &str) -> Url {
    let mut url = Url::parse(LOCAL_ORIGIN).expect("static origin is a valid URL");
    url.set_path(path);
    url
}

fn segment_path(prefix: &str, id: &str) -> String {
    let mut url = local_url("/");
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(prefix).push(id);
    }
    relative(&url)
}

fn relative(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Percent-decode a path segment
fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
