//! Page documents and the containers flows render into.
//!
//! A flow addresses its container by element `id`. If the element is not in
//! the page the flow does nothing. Replacing a container's content rewrites
//! only the bytes between its opening and closing tags, so the rest of the
//! document is preserved exactly. Comments and `<script>`/`<style>` bodies
//! are not markup and are ignored while locating those tags.

use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use showcase_shared::{Result, ShowcaseError};

/// Any opening or closing tag. Group 1 is `/` for closing tags, group 2 the name.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(/?)([a-z][a-z0-9-]*)\b[^>]*>").expect("valid regex")
});

/// An `id` attribute inside a tag, in any quoting style.
static ID_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sid\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).expect("valid regex")
});

/// Comments and raw-text elements, whose contents are not markup.
static OPAQUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<!--.*?(?:-->|\z)|<script\b[^>]*>.*?(?:</script\s*>|\z)|<style\b[^>]*>.*?(?:</style\s*>|\z)",
    )
    .expect("valid regex")
});

/// Elements that never have content.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// Something a flow can write markup into.
pub trait Container {
    /// Replace the element's children with `html`.
    fn set_inner_html(&mut self, html: &str);
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// An HTML page whose containers can be rewritten in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    html: String,
}

impl Page {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Read a page from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path).map_err(|e| ShowcaseError::io(path, e))?;
        Ok(Self::new(html))
    }

    /// Write the page to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.html).map_err(|e| ShowcaseError::io(path, e))
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether the parsed document has an element with this `id`.
    pub fn has_element(&self, id: &str) -> bool {
        let doc = Html::parse_document(&self.html);
        let Ok(selector) = Selector::parse("[id]") else {
            return false;
        };
        doc.select(&selector).any(|el| el.value().id() == Some(id))
    }

    /// A writable handle to the element with this `id`, or `None` when the
    /// page has no such element.
    ///
    /// An element that exists but cannot hold content (a void element, or
    /// one without a closing tag) is a validation error.
    pub fn container(&mut self, id: &str) -> Result<Option<PageContainer<'_>>> {
        if !self.has_element(id) {
            debug!(id, "container not found in page");
            return Ok(None);
        }
        if self.inner_span(id).is_none() {
            return Err(ShowcaseError::validation(format!(
                "element #{id} has no content span (void element or missing closing tag)"
            )));
        }
        Ok(Some(PageContainer {
            page: self,
            id: id.to_string(),
        }))
    }

    /// Byte range of the content between the element's opening and closing tags.
    fn inner_span(&self, id: &str) -> Option<Range<usize>> {
        let masked = mask_opaque(&self.html);
        let html = masked.as_str();

        let (name, start) = TAG_RE.captures_iter(html).find_map(|caps| {
            let whole = caps.get(0)?;
            if !caps[1].is_empty() || tag_id(whole.as_str()) != Some(id) {
                return None;
            }
            Some((caps[2].to_ascii_lowercase(), whole.end()))
        })?;

        let open_tag = &html[..start];
        if VOID_ELEMENTS.contains(&name.as_str()) || open_tag.ends_with("/>") {
            return None;
        }

        let mut depth = 1usize;
        for caps in TAG_RE.captures_iter(&html[start..]) {
            if !caps[2].eq_ignore_ascii_case(&name) {
                continue;
            }
            let whole = caps.get(0)?;
            if caps[1].is_empty() {
                if !whole.as_str().ends_with("/>") {
                    depth += 1;
                }
            } else {
                depth -= 1;
                if depth == 0 {
                    return Some(start..start + whole.start());
                }
            }
        }

        None
    }
}

/// `html` with every comment and script/style element blanked to spaces.
/// Byte offsets are unchanged.
fn mask_opaque(html: &str) -> String {
    let mut masked = String::with_capacity(html.len());
    let mut last = 0;
    for m in OPAQUE_RE.find_iter(html) {
        masked.push_str(&html[last..m.start()]);
        masked.extend(std::iter::repeat_n(' ', m.len()));
        last = m.end();
    }
    masked.push_str(&html[last..]);
    masked
}

/// The `id` attribute value of an opening tag, if any.
fn tag_id(tag: &str) -> Option<&str> {
    let caps = ID_ATTR_RE.captures(tag)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
}

/// A container element inside a [`Page`].
pub struct PageContainer<'a> {
    page: &'a mut Page,
    id: String,
}

impl Container for PageContainer<'_> {
    fn set_inner_html(&mut self, html: &str) {
        match self.page.inner_span(&self.id) {
            Some(span) => self.page.html.replace_range(span, html),
            None => warn!(id = %self.id, "container vanished from page"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Projects</title></head>
<body>
  <h1>Our Snakemake Pipelines</h1>
  <div class="wrap" id="pipelines-container">
    <!-- Pipelines will be loaded from pipelines-data.json -->
    <div class="old"><div>stale</div></div>
  </div>
  <div id='github-repos-container'></div>
  <p data-id="pipelines-container">decoy</p>
</body>
</html>
"#;

    #[test]
    fn finds_elements_by_id() {
        let page = Page::new(PAGE);
        assert!(page.has_element("pipelines-container"));
        assert!(page.has_element("github-repos-container"));
        assert!(!page.has_element("missing"));
    }

    #[test]
    fn replaces_nested_content_only() {
        let mut page = Page::new(PAGE);
        {
            let mut container = page
                .container("pipelines-container")
                .unwrap()
                .expect("container");
            container.set_inner_html("<p>new</p>");
        }

        let html = page.html();
        assert!(html.contains(r#"<div class="wrap" id="pipelines-container"><p>new</p></div>"#));
        assert!(!html.contains("stale"));
        assert!(html.contains("<h1>Our Snakemake Pipelines</h1>"));
        assert!(html.contains(r#"<p data-id="pipelines-container">decoy</p>"#));
    }

    #[test]
    fn repeated_writes_replace_previous_content() {
        let mut page = Page::new(PAGE);
        {
            let mut container = page
                .container("github-repos-container")
                .unwrap()
                .expect("container");
            container.set_inner_html("<div>loading</div>");
            container.set_inner_html("<div class=\"repo-grid\"></div>");
        }
        assert!(page.html().contains(
            "<div id='github-repos-container'><div class=\"repo-grid\"></div></div>"
        ));
        assert!(!page.html().contains("loading"));
    }

    #[test]
    fn missing_container_is_none() {
        let mut page = Page::new(PAGE);
        assert!(page.container("nope").unwrap().is_none());
        assert_eq!(page.html(), PAGE);
    }

    #[test]
    fn void_element_is_not_a_container() {
        let mut page = Page::new(r#"<body><img id="logo" src="x.png"><div id="a"></div></body>"#);
        let err = page.container("logo").err().expect("validation error");
        assert!(matches!(err, ShowcaseError::Validation { .. }));
        assert!(page.container("a").unwrap().is_some());
    }

    #[test]
    fn unclosed_container_is_validation_error() {
        let html = r#"<body><div id="a"><p>x</p></body>"#;
        let mut page = Page::new(html);
        let err = page.container("a").err().expect("validation error");
        assert!(matches!(err, ShowcaseError::Validation { .. }));
        assert!(err.to_string().contains("#a"));
        assert_eq!(page.html(), html);
    }

    #[test]
    fn markup_in_comment_inside_container_is_ignored() {
        let mut page = Page::new(
            r#"<div id="pipelines-container"><!-- <div> placeholder --></div><p>after</p>"#,
        );
        page.container("pipelines-container")
            .unwrap()
            .expect("container")
            .set_inner_html("x");
        assert_eq!(page.html(), r#"<div id="pipelines-container">x</div><p>after</p>"#);
    }

    #[test]
    fn commented_out_copy_of_container_is_left_alone() {
        let mut page = Page::new(
            "<!-- <div id=\"pipelines-container\">old</div> -->\n<div id=\"pipelines-container\"></div>",
        );
        page.container("pipelines-container")
            .unwrap()
            .expect("container")
            .set_inner_html("new");
        assert_eq!(
            page.html(),
            "<!-- <div id=\"pipelines-container\">old</div> -->\n<div id=\"pipelines-container\">new</div>"
        );
    }

    #[test]
    fn script_and_style_bodies_are_not_markup() {
        let mut page = Page::new(concat!(
            r#"<div id="a"><script>el.innerHTML = "</div>";</script>"#,
            r#"<style>/* <div> */</style></div><p>tail</p>"#,
        ));
        page.container("a").unwrap().expect("container").set_inner_html("x");
        assert_eq!(page.html(), r#"<div id="a">x</div><p>tail</p>"#);
    }

    #[test]
    fn load_and_save_roundtrip_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("index.html");
        std::fs::write(&path, PAGE).expect("write");

        let mut page = Page::load(&path).expect("load");
        page.container("github-repos-container")
            .expect("scan")
            .expect("container")
            .set_inner_html("x");
        page.save(&path).expect("save");

        let saved = std::fs::read_to_string(&path).expect("read");
        assert!(saved.contains("<div id='github-repos-container'>x</div>"));
    }
}
