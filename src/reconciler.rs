//! Conversion between the stored representation (separate `html_content` /
//! `css_content` fields) and the single editable document the editor works
//! on.
//!
//! Both directions are pure string transformations. Detection of
//! `<style>` / `<head>` / `<html>` is substring/regex based, matching the
//! tolerance for malformed markup that email templates require: a document
//! that a real HTML parser would reject still round-trips here.

use crate::template::StoredTemplate;
use regex::Regex;
use std::sync::OnceLock;

/// An opening `<style>` or `<style ...>` tag, case-insensitive
fn style_open_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<style[\s>]").unwrap())
}

/// A complete `<style ...>...</style>` block, non-greedy, across newlines
fn style_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<style[^>]*>(.*?)</style>").unwrap())
}

fn html_open_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<html").unwrap())
}

fn head_close_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</head>").unwrap())
}

/// Reconstruct a single editable document from the stored representation.
///
/// Priority order:
/// 1. markup already carries a `<style>` tag → returned unchanged, the CSS
///    is assumed embedded;
/// 2. markup has `<html>` and `</head>` → the style block is inserted just
///    before `</head>`;
/// 3. markup has `<html>` but no `</head>` → a synthesized head holding the
///    style block is injected right after the opening `<html ...>` tag;
/// 4. bare fragment → wrapped in a full document skeleton.
///
/// Empty `css` still produces an (empty) style block in cases 2-4 so the
/// document shape stays stable.
pub fn merge(html: &str, css: &str) -> String {
    if style_open_regex().is_match(html) {
        return html.to_string();
    }

    if let Some(open) = html_open_regex().find(html) {
        if let Some(close_head) = head_close_regex().find(html) {
            let mut out = String::with_capacity(html.len() + css.len() + 32);
            out.push_str(&html[..close_head.start()]);
            out.push_str("  <style>\n");
            out.push_str(css);
            out.push_str("\n  </style>\n");
            out.push_str(&html[close_head.start()..]);
            return out;
        }

        // No head at all: synthesize one after the end of the opening
        // <html ...> tag. An unterminated opening tag gets the head block
        // appended at end of input instead of guessing a position.
        let head_block = format!("\n<head>\n  <style>\n{css}\n  </style>\n</head>");
        return match html[open.end()..].find('>') {
            Some(i) => {
                let at = open.end() + i + 1;
                let mut out = String::with_capacity(html.len() + head_block.len());
                out.push_str(&html[..at]);
                out.push_str(&head_block);
                out.push_str(&html[at..]);
                out
            }
            None => {
                let mut out = html.to_string();
                out.push_str(&head_block);
                out
            }
        };
    }

    // Bare fragment, no document shell
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <style>
{css}
  </style>
</head>
<body>
{html}
</body>
</html>"#
    )
}

/// Merge from an already-built [`StoredTemplate`]
pub fn merge_stored(stored: &StoredTemplate) -> String {
    merge(&stored.html_content, &stored.css_content)
}

/// Split an editable document back into the stored representation.
///
/// `css_content` collects the inner text of every `<style>` block in source
/// order, trimmed and newline-joined. `html_content` keeps the entire
/// document unchanged, style blocks included, so the stored markup stays
/// self-contained. An unterminated `<style>` tag is simply not matched: its
/// content stays in the markup but is left out of the CSS field.
pub fn split(document: &str) -> StoredTemplate {
    let mut css = String::new();
    for cap in style_block_regex().captures_iter(document) {
        if let Some(inner) = cap.get(1) {
            css.push_str(inner.as_str().trim());
            css.push('\n');
        }
    }
    StoredTemplate::new(document, css.trim().to_string())
}
