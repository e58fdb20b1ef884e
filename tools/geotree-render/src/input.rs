use std::path::Path;

use anyhow::{Context, Result, bail};
use geotree_map::{MapConfig, PageData};

/// Where the embedded page data comes from.
pub enum PageSource<'a> {
    /// A rendered page with JSON script elements.
    Html(&'a Path),
    /// Separate files holding the token JSON and the marker GeoJSON.
    Files { token: &'a Path, markers: &'a Path },
}

pub fn load_page(source: PageSource<'_>, config: &MapConfig) -> Result<PageData> {
    match source {
        PageSource::Html(path) => {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read page {}", path.display()))?;
            let page = PageData::from_html(&html);

            for id in [&config.token_element_id, &config.markers_element_id] {
                if page.element(id).is_err() {
                    tracing::warn!("Page {} has no #{} element", path.display(), id);
                }
            }
            Ok(page)
        }
        PageSource::Files { token, markers } => {
            let token_text = std::fs::read_to_string(token)
                .with_context(|| format!("Failed to read token file {}", token.display()))?;
            let markers_text = std::fs::read_to_string(markers)
                .with_context(|| format!("Failed to read markers file {}", markers.display()))?;

            Ok(PageData::new()
                .with_element(config.token_element_id.as_str(), token_text.trim())
                .with_element(config.markers_element_id.as_str(), markers_text))
        }
    }
}

pub fn page_source<'a>(
    page: Option<&'a Path>,
    token: Option<&'a Path>,
    markers: Option<&'a Path>,
) -> Result<PageSource<'a>> {
    match (page, token, markers) {
        (Some(page), None, None) => Ok(PageSource::Html(page)),
        (None, Some(token), Some(markers)) => Ok(PageSource::Files { token, markers }),
        (Some(_), _, _) => bail!("--page cannot be combined with --token/--markers"),
        _ => bail!("Either --page or both --token and --markers are required"),
    }
}
