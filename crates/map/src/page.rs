//! Data embedded in the host page.
//!
//! Pages carry the access token and the marker collection as JSON inside
//! `<script id="..." type="application/json">` elements. The initializer
//! receives them through [`PageData`] instead of looking them up itself.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::MapError;

static SCRIPT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").expect("script pattern is valid")
});

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static ID_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("id pattern is valid")
});

/// Text content of embedded elements, keyed by element id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageData {
    elements: HashMap<String, String>,
}

impl PageData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(id, text);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.elements.insert(id.into(), text.into());
    }

    /// Collect every `<script>` element that has an id. When an id repeats,
    /// the first element wins, matching `getElementById`. Commented-out
    /// markup is ignored.
    pub fn from_html(html: &str) -> Self {
        let mut page = Self::new();
        let html = HTML_COMMENT.replace_all(html, "");

        for script in SCRIPT_ELEMENT.captures_iter(&html) {
            let Some(id) = ID_ATTRIBUTE.captures(&script[1]).and_then(|caps| {
                caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))
            }) else {
                continue;
            };

            page.elements
                .entry(id.as_str().to_string())
                .or_insert_with(|| script[2].to_string());
        }

        tracing::debug!(count = page.elements.len(), "Extracted embedded elements");
        page
    }

    pub fn element(&self, id: &str) -> Result<&str, MapError> {
        self.elements
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| MapError::MissingElement(id.to_string()))
    }

    /// Decode the JSON held by an element.
    pub fn parse_json<T: DeserializeOwned>(&self, id: &str) -> Result<T, MapError> {
        serde_json::from_str(self.element(id)?).map_err(|source| MapError::MalformedElement {
            id: id.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html>
<head><script src="/static/leaflet.js"></script></head>
<body>
  <div id="map"></div>
  <script id="mapbox_token" type="application/json">"pk.abc"</script>
  <SCRIPT type="application/json" id='marker_data'>
    {"type": "FeatureCollection", "features": [], "note": "<b>"}
  </SCRIPT>
  <script id="mapbox_token" type="application/json">"pk.second"</script>
</body>
</html>"#;

    #[test]
    fn test_from_html() {
        let page = PageData::from_html(PAGE);

        assert_eq!(page.element("mapbox_token").unwrap(), r#""pk.abc""#);
        assert!(page.element("marker_data").unwrap().contains("FeatureCollection"));
        // Scripts without an id and non-script elements are ignored
        assert!(matches!(page.element("map"), Err(MapError::MissingElement(id)) if id == "map"));
    }

    #[test]
    fn test_parse_json() {
        let page = PageData::from_html(PAGE);

        let token: String = page.parse_json("mapbox_token").unwrap();
        assert_eq!(token, "pk.abc");

        let markers: serde_json::Value = page.parse_json("marker_data").unwrap();
        assert_eq!(markers["note"], "<b>");
    }

    #[test]
    fn test_malformed_json() {
        let page = PageData::new().with_element("mapbox_token", "pk.abc");
        let err = page.parse_json::<String>("mapbox_token").unwrap_err();
        assert!(matches!(err, MapError::MalformedElement { ref id, .. } if id == "mapbox_token"));
    }

    #[test]
    fn test_ignores_prefixed_id_attributes() {
        let page = PageData::from_html(
            r#"<script data-id="marker_data" id="other" type="application/json">{"x": 1}</script>"#,
        );

        assert_eq!(page.element("other").unwrap(), r#"{"x": 1}"#);
        assert!(matches!(
            page.element("marker_data"),
            Err(MapError::MissingElement(id)) if id == "marker_data"
        ));
    }

    #[test]
    fn test_ignores_commented_out_elements() {
        let page = PageData::from_html(
            r#"<!-- <script id="mapbox_token" type="application/json">"stale"</script> -->
<script id="mapbox_token" type="application/json">"pk.live"</script>"#,
        );

        let token: String = page.parse_json("mapbox_token").unwrap();
        assert_eq!(token, "pk.live");
    }
}
