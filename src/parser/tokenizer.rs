use super::visitor::HtmlVisitor;

/// Scan HTML source and emit an `on_tag_open` event for every opening tag.
///
/// This is a "lossy" scanner: an opening tag is `<` followed by word
/// characters (`[A-Za-z0-9_]`) and then whitespace, `>` or `/`. Closing tags,
/// doctype declarations and comments never match. Nothing is masked, so
/// tag-like text inside comments, scripts or attribute values is counted too.
pub fn scan_html(source: &str, visitors: &mut [&mut dyn HtmlVisitor]) {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        if bytes[i] == b'<' {
            let name_end = read_word(bytes, i + 1);
            if name_end > i + 1 && ends_tag_name(source, name_end) {
                let tag_name = &source[i + 1..name_end];
                for v in visitors.iter_mut() {
                    v.on_tag_open(tag_name, i);
                }
                i = name_end;
                continue;
            }
        }
        i += 1;
    }

    for v in visitors.iter_mut() {
        v.on_document_end();
    }
}

// ── Helper Functions ──────────────────────────────────────────────────

/// ASCII letters, digits and underscore.
pub(super) fn is_word_byte(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

/// Return the end of the run of word characters starting at `start`.
pub(super) fn read_word(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && is_word_byte(bytes[end]) {
        end += 1;
    }
    end
}

/// A tag name ends at whitespace, `>` or `/`. End of input does not count.
fn ends_tag_name(source: &str, at: usize) -> bool {
    match source.get(at..).and_then(|rest| rest.chars().next()) {
        Some(ch) => ch.is_whitespace() || ch == '>' || ch == '/',
        None => false,
    }
}

/// Check if bytes at position `at` start with `prefix`, ignoring ASCII case.
pub(super) fn starts_with_ci(bytes: &[u8], at: usize, prefix: &[u8]) -> bool {
    if at + prefix.len() > bytes.len() {
        return false;
    }
    bytes[at..at + prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Check if bytes at position `at` start with `prefix`.
pub(super) fn starts_with_at(bytes: &[u8], at: usize, prefix: &[u8]) -> bool {
    if at + prefix.len() > bytes.len() {
        return false;
    }
    &bytes[at..at + prefix.len()] == prefix
}

/// Find the next occurrence of `target` at or after `start`.
pub(super) fn find_byte(bytes: &[u8], target: u8, start: usize) -> Option<usize> {
    bytes
        .get(start..)?
        .iter()
        .position(|&b| b == target)
        .map(|p| p + start)
}

/// Line terminators element content may not span: \n, \r, U+2028, U+2029.
pub(super) fn line_terminator_at(bytes: &[u8], at: usize) -> bool {
    match bytes[at] {
        b'\n' | b'\r' => true,
        0xE2 => {
            at + 2 < bytes.len() && bytes[at + 1] == 0x80 && (bytes[at + 2] == 0xA8 || bytes[at + 2] == 0xA9)
        }
        _ => false,
    }
}
