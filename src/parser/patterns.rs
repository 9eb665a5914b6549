//! Tolerant textual matchers over raw HTML.
//!
//! Each matcher recognizes one fixed shape (an opening tag by name prefix,
//! a single-line element, a quoted attribute) and skips anything that does
//! not fit. Nothing here understands nesting, comments or script content.

use super::tokenizer::{find_byte, line_terminator_at, read_word, starts_with_at, starts_with_ci};

/// An opening tag: `<name attributes>`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTag<'a> {
    pub name: &'a str,
    /// Everything between the name and the first `>`.
    pub attributes: &'a str,
    /// Byte offset of `<`.
    pub start: usize,
    /// Byte offset just past `>`.
    pub end: usize,
}

/// A paired element whose content sits on a single line.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<'a> {
    pub attributes: &'a str,
    pub content: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Opening tags whose name starts with `prefix` (ASCII case-insensitive).
///
/// `prefix` is a literal, so `open_tags(html, "nav")` also matches `<navbar>`.
pub fn open_tags<'a>(html: &'a str, prefix: &str) -> Vec<RawTag<'a>> {
    open_tags_where(html, prefix, |_| true)
}

/// Like [`open_tags`], keeping only tags whose attributes satisfy `accept`.
pub fn open_tags_where<'a>(
    html: &'a str,
    prefix: &str,
    accept: impl Fn(&str) -> bool,
) -> Vec<RawTag<'a>> {
    let bytes = html.as_bytes();
    let prefix_bytes = prefix.as_bytes();
    let mut tags = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'<' && starts_with_ci(bytes, i + 1, prefix_bytes) {
            let name_end = i + 1 + prefix_bytes.len();
            if let Some(tag) = close_tag(html, i, name_end) {
                if accept(tag.attributes) {
                    i = tag.end;
                    tags.push(tag);
                    continue;
                }
            }
        }
        i += 1;
    }

    tags
}

/// Opening tags with any word-character name that carry a non-empty quoted
/// `attr=` value accepted by `accept`. `attr` ignores ASCII case.
///
/// The attribute has to start before the first `>`, but its quoted value may
/// contain `>`: the tag then ends at the first `>` after the closing quote.
pub fn word_tags_with_value<'a>(html: &'a str, attr: &str, accept: impl Fn(&str) -> bool) -> Vec<RawTag<'a>> {
    let bytes = html.as_bytes();
    tags_with_value(
        html,
        |at| {
            let name_end = read_word(bytes, at + 1);
            (name_end > at + 1).then_some(name_end)
        },
        attr,
        accept,
    )
}

/// Like [`word_tags_with_value`] for tags whose name starts with `prefix`.
pub fn open_tags_with_value<'a>(
    html: &'a str,
    prefix: &str,
    attr: &str,
    accept: impl Fn(&str) -> bool,
) -> Vec<RawTag<'a>> {
    let bytes = html.as_bytes();
    tags_with_value(
        html,
        |at| starts_with_ci(bytes, at + 1, prefix.as_bytes()).then_some(at + 1 + prefix.len()),
        attr,
        accept,
    )
}

fn tags_with_value<'a>(
    html: &'a str,
    name_end_at: impl Fn(usize) -> Option<usize>,
    attr: &str,
    accept: impl Fn(&str) -> bool,
) -> Vec<RawTag<'a>> {
    let bytes = html.as_bytes();
    let mut tags = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'<' {
            let tag = name_end_at(i).and_then(|name_end| tag_with_value_at(html, i, name_end, attr, &accept));
            if let Some(tag) = tag {
                i = tag.end;
                tags.push(tag);
                continue;
            }
        }
        i += 1;
    }

    tags
}

/// Candidates are tried from the last one before the first `>` backwards.
fn tag_with_value_at<'a>(
    html: &'a str,
    start: usize,
    name_end: usize,
    attr: &str,
    accept: &impl Fn(&str) -> bool,
) -> Option<RawTag<'a>> {
    let bytes = html.as_bytes();
    let first_gt = find_byte(bytes, b'>', name_end).unwrap_or(bytes.len());
    let needle = format!("{}=", attr);
    let needle = needle.as_bytes();

    (name_end..first_gt)
        .rev()
        .filter(|&at| starts_with_ci(bytes, at, needle))
        .find_map(|at| {
            let quote = at + needle.len();
            if !matches!(bytes.get(quote), Some(b'"') | Some(b'\'')) {
                return None;
            }
            let value_start = quote + 1;
            let value_len = bytes.get(value_start..)?.iter().position(|&b| b == b'"' || b == b'\'')?;
            let value = &html[value_start..value_start + value_len];
            if value.is_empty() || !accept(value) {
                return None;
            }
            let gt = find_byte(bytes, b'>', value_start + value_len + 1)?;
            Some(RawTag {
                name: &html[start + 1..name_end],
                attributes: &html[name_end..gt],
                start,
                end: gt + 1,
            })
        })
}

fn close_tag(html: &str, start: usize, name_end: usize) -> Option<RawTag<'_>> {
    let gt = find_byte(html.as_bytes(), b'>', name_end)?;
    Some(RawTag {
        name: &html[start + 1..name_end],
        attributes: &html[name_end..gt],
        start,
        end: gt + 1,
    })
}

/// Count non-overlapping runs of `run_len` opening tags named by `prefix`
/// that follow each other with only whitespace in between.
pub fn count_open_tag_runs(html: &str, prefix: &str, run_len: usize) -> usize {
    let mut runs = 0;
    let mut i = 0;

    while i < html.len() {
        match open_tag_run_at(html, i, prefix, run_len) {
            Some(end) => {
                runs += 1;
                i = end;
            }
            None => i += 1,
        }
    }

    runs
}

fn open_tag_run_at(html: &str, start: usize, prefix: &str, run_len: usize) -> Option<usize> {
    let bytes = html.as_bytes();
    let mut at = start;

    for n in 0..run_len {
        if n > 0 {
            at = skip_whitespace(html, at);
        }
        if bytes.get(at) != Some(&b'<') || !starts_with_ci(bytes, at + 1, prefix.as_bytes()) {
            return None;
        }
        at = find_byte(bytes, b'>', at + 1 + prefix.len())? + 1;
    }

    Some(at)
}

fn skip_whitespace(html: &str, at: usize) -> usize {
    match html.get(at..) {
        Some(rest) => {
            let trimmed = rest.trim_start();
            at + (rest.len() - trimmed.len())
        }
        None => at,
    }
}

/// All `<tag ...>content</tag>` elements, in document order.
///
/// The opening name is matched as a prefix, the closing tag exactly, both
/// ignoring ASCII case. The content is the shortest run up to the closing
/// tag and may not cross a line break; elements spanning lines are skipped.
pub fn elements<'a>(html: &'a str, tag: &str) -> Vec<Element<'a>> {
    let mut found = Vec::new();
    let mut i = 0;

    while i < html.len() {
        match element_at(html, i, tag) {
            Some(element) => {
                i = element.end;
                found.push(element);
            }
            None => i += 1,
        }
    }

    found
}

/// First element matching [`elements`], if any.
pub fn first_element<'a>(html: &'a str, tag: &str) -> Option<Element<'a>> {
    (0..html.len()).find_map(|i| element_at(html, i, tag))
}

/// Try to match a single-line `<tag ...>content</tag>` starting exactly at `start`.
pub fn element_at<'a>(html: &'a str, start: usize, tag: &str) -> Option<Element<'a>> {
    let bytes = html.as_bytes();
    if bytes.get(start) != Some(&b'<') || !starts_with_ci(bytes, start + 1, tag.as_bytes()) {
        return None;
    }

    let name_end = start + 1 + tag.len();
    let gt = find_byte(bytes, b'>', name_end)?;
    let closing = format!("</{}>", tag);
    let content_start = gt + 1;

    let mut j = content_start;
    while j < bytes.len() {
        if starts_with_ci(bytes, j, closing.as_bytes()) {
            return Some(Element {
                attributes: &html[name_end..gt],
                content: &html[content_start..j],
                start,
                end: j + closing.len(),
            });
        }
        if line_terminator_at(bytes, j) {
            return None;
        }
        j += 1;
    }

    None
}

/// Value of the first `name="value"` or `name='value'` with a non-empty value.
/// The name match is case-sensitive and may be a suffix of a longer attribute.
pub fn attribute_value<'a>(attributes: &'a str, name: &str) -> Option<&'a str> {
    find_quoted(attributes, name, false, false, 0).map(|(value, _)| value)
}

/// Like [`attribute_value`] but an empty value (`alt=""`) also matches.
pub fn attribute_value_or_empty<'a>(attributes: &'a str, name: &str) -> Option<&'a str> {
    find_quoted(attributes, name, true, false, 0).map(|(value, _)| value)
}

/// Whether `name=` followed by a quote appears in `attributes`.
pub fn has_attribute(attributes: &str, name: &str) -> bool {
    let bytes = attributes.as_bytes();
    let needle = format!("{}=", name);
    (0..bytes.len()).any(|i| {
        starts_with_at(bytes, i, needle.as_bytes())
            && matches!(bytes.get(i + needle.len()), Some(b'"') | Some(b'\''))
    })
}

/// Every non-empty quoted `name=` value, in order, ignoring ASCII case in `name`.
pub fn attribute_values_ci<'a>(haystack: &'a str, name: &str) -> Vec<&'a str> {
    let mut values = Vec::new();
    let mut from = 0;
    while let Some((value, end)) = find_quoted(haystack, name, false, true, from) {
        values.push(value);
        from = end;
    }
    values
}

/// Every `role="..."` value in the document, in order. `role=` ignores case.
pub fn role_values(html: &str) -> Vec<&str> {
    attribute_values_ci(html, "role")
}

/// Find `name=` + quote + value + quote at or after `from`.
/// Returns the value and the offset just past the closing quote.
fn find_quoted<'a>(
    haystack: &'a str,
    name: &str,
    allow_empty: bool,
    ignore_case: bool,
    from: usize,
) -> Option<(&'a str, usize)> {
    let bytes = haystack.as_bytes();
    let needle = format!("{}=", name);
    let needle = needle.as_bytes();

    for i in from..bytes.len() {
        let hit = if ignore_case {
            starts_with_ci(bytes, i, needle)
        } else {
            starts_with_at(bytes, i, needle)
        };
        if !hit {
            continue;
        }
        let quote = i + needle.len();
        if !matches!(bytes.get(quote), Some(b'"') | Some(b'\'')) {
            continue;
        }
        let value_start = quote + 1;
        let mut j = value_start;
        while j < bytes.len() && bytes[j] != b'"' && bytes[j] != b'\'' {
            j += 1;
        }
        if j >= bytes.len() || (!allow_empty && j == value_start) {
            continue;
        }
        return Some((&haystack[value_start..j], j + 1));
    }

    None
}

/// Remove every `<...>` run from `text`. An unterminated `<` is kept.
pub fn strip_tags(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'<' {
            match find_byte(bytes, b'>', i + 1) {
                Some(gt) => {
                    out.push_str(&text[copied..i]);
                    i = gt + 1;
                    copied = i;
                    continue;
                }
                None => break,
            }
        }
        i += 1;
    }

    out.push_str(&text[copied..]);
    out
}
