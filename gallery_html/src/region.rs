//! Gallery region location and replacement.
//!
//! The region is found structurally: the first element whose `class`
//! attribute carries the gallery token, up to its *matching* closing tag
//! (nested elements of the same name are counted). Comments are skipped.
//! Only the element's children are replaced; the tags themselves and
//! everything around them are kept byte-for-byte.
//!
//! `<script>` and `<style>` bodies are scanned like markup, so a tag-like
//! string inside them can throw off the nesting count.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Comments, or a start/end tag: `(/?)` closing marker, tag name, attributes.
/// Quoted attribute values may contain `>`.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<!--.*?-->|<(/?)([a-z][a-z0-9-]*)\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
        .expect("tag pattern is valid")
});

static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("class pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryRegion {
    pub open_tag: Range<usize>,
    pub inner: Range<usize>,
    pub close_tag: Range<usize>,
    /// Lowercased element name, e.g. `div`
    pub element: String,
    /// Leading whitespace of the line holding the opening tag
    pub indent: String,
}

fn has_class_token(attrs: &str, token: &str) -> bool {
    CLASS_ATTR_RE.captures_iter(attrs).any(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|v| v.as_str().split_whitespace().any(|t| t == token))
            .unwrap_or(false)
    })
}

fn line_indent(document: &str, pos: usize) -> String {
    let line_start = document[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    document[line_start..pos]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

/// Find the gallery container marked with `class_token`.
///
/// `None` when no element carries the token, the element is self-closing,
/// or its closing tag is missing.
pub fn locate_gallery_region(document: &str, class_token: &str) -> Option<GalleryRegion> {
    let mut tags = TAG_RE.captures_iter(document);

    let (open_tag, element) = tags.by_ref().find_map(|caps| {
        let name = caps.get(2)?;
        let is_close = caps.get(1).map(|m| !m.as_str().is_empty()).unwrap_or(false);
        let attrs = caps.get(3).map(|m| m.as_str()).unwrap_or("");
        if is_close || !has_class_token(attrs, class_token) {
            return None;
        }
        let whole = caps.get(0)?;
        Some((whole.range(), name.as_str().to_ascii_lowercase(), attrs.trim_end().ends_with('/')))
    })
    .and_then(|(range, name, self_closing)| (!self_closing).then_some((range, name)))?;

    let mut depth = 1usize;
    for caps in tags {
        let Some(name) = caps.get(2) else {
            continue; // comment
        };
        if !name.as_str().eq_ignore_ascii_case(&element) {
            continue;
        }
        let is_close = caps.get(1).map(|m| !m.as_str().is_empty()).unwrap_or(false);
        let attrs = caps.get(3).map(|m| m.as_str()).unwrap_or("");
        if is_close {
            depth -= 1;
            if depth == 0 {
                let close_tag = caps.get(0)?.range();
                return Some(GalleryRegion {
                    indent: line_indent(document, open_tag.start),
                    inner: open_tag.end..close_tag.start,
                    open_tag,
                    close_tag,
                    element,
                });
            }
        } else if !attrs.trim_end().ends_with('/') {
            depth += 1;
        }
    }

    None
}

/// Swap the region's children for `fragments`, one per line, with the
/// closing tag back at the opening tag's indentation.
pub fn replace_gallery(document: &str, region: &GalleryRegion, fragments: &str) -> String {
    let mut out = String::with_capacity(document.len() + fragments.len() + 8);
    out.push_str(&document[..region.inner.start]);
    out.push('\n');
    if !fragments.is_empty() {
        out.push_str(fragments);
        out.push('\n');
    }
    out.push_str(&region.indent);
    out.push_str(&document[region.inner.end..]);
    out
}
