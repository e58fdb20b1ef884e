//! Elements and the families they belong to.
//!
//! An element is a dated, geolocated observation. Families form a tree
//! (tracked here only through `depth`) and own the elements filed under them.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use geo::{LineString, MultiLineString, Point};
use geojson::{Feature, Geometry, JsonObject};
use itertools::Itertools;
use palette::Srgb;
use serde_json::json;

use crate::color::{aci_color, to_hex};
use crate::identifiers::Username;
use crate::markers::{POPUP_CONTENT_KEY, POPUP_PROPERTY};

#[derive(Clone, Debug, PartialEq)]
pub struct Family {
    pub id: u64,
    pub owner: Username,
    pub title: String,
    pub intro: Option<String>,
    /// 1 for root families.
    pub depth: u32,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 1..self.depth {
            f.write_str("-")?;
        }
        f.write_str(&self.title)
    }
}

impl Family {
    pub fn color(&self) -> Srgb<u8> {
        aci_color(self.id)
    }

    /// Path through this family's elements in date order.
    ///
    /// Elements of other families are ignored. The result always holds a
    /// single line, which is empty when the family has no elements.
    pub fn track<'a>(
        &self,
        elements: impl IntoIterator<Item = &'a Element>,
    ) -> MultiLineString<f64> {
        let line: LineString<f64> = elements
            .into_iter()
            .filter(|element| element.family.id == self.id)
            .sorted_by_key(|element| element.date)
            .map(|element| element.location.0)
            .collect();

        MultiLineString::new(vec![line])
    }

    pub fn track_feature<'a>(&self, elements: impl IntoIterator<Item = &'a Element>) -> Feature {
        let track = self.track(elements);

        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), json!(self.title));
        properties.insert("color".to_string(), json!(to_hex(self.color())));

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson::Value::from(&track))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElementImage {
    /// Path of the popup-sized rendition, relative to the media root.
    pub popup_path: String,
    pub description: Option<String>,
    pub position: Option<u16>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: u64,
    pub owner: Username,
    pub family: Arc<Family>,
    pub intro: Option<String>,
    pub date: DateTime<Utc>,
    pub location: Point<f64>,
    pub private: bool,
    pub images: Vec<ElementImage>,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.family.title, self.id)
    }
}

impl Element {
    /// Author of record, which is the owner of the family.
    pub fn author(&self) -> &Username {
        &self.family.owner
    }

    /// First image by position; unpositioned images come last.
    pub fn first_image(&self) -> Option<&ElementImage> {
        self.images
            .iter()
            .min_by_key(|image| (image.position.is_none(), image.position))
    }

    /// HTML shown in the element's map popup: linked title, first image
    /// if any, then the intro.
    pub fn popup_content(&self, detail_url: &str, media_url: &str) -> String {
        let mut html = format!(
            r#"<h5><a href="{}">{}</a></h5>"#,
            escape_html(detail_url),
            escape_html(&self.to_string())
        );

        if let Some(image) = self.first_image() {
            html.push_str(&format!(
                r#"<img src="{}{}">"#,
                escape_html(media_url),
                escape_html(&image.popup_path)
            ));
        }

        html.push_str(&format!(
            "<small>{}</small>",
            escape_html(self.intro.as_deref().unwrap_or_default())
        ));
        html
    }

    pub fn to_feature(&self, detail_url: &str, media_url: &str) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("id".to_string(), json!(self.id));
        properties.insert("name".to_string(), json!(self.to_string()));
        properties.insert(
            POPUP_PROPERTY.to_string(),
            json!({ POPUP_CONTENT_KEY: self.popup_content(detail_url, media_url) }),
        );

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson::Value::from(&self.location))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Elements a viewer may see: every public element, plus private ones in
/// families the viewer owns. Anonymous viewers only see public elements.
pub fn visible_elements<'a>(
    elements: &'a [Element],
    viewer: Option<&'a Username>,
) -> impl Iterator<Item = &'a Element> + 'a {
    elements
        .iter()
        .filter(move |element| !element.private || viewer == Some(element.author()))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
