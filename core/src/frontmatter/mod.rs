//! Frontmatter path repair.
//!
//! Converted content files sometimes carry Windows separators in their YAML
//! header, e.g. `source: "loopholes\file.html"`, which YAML then reads as an
//! escape sequence. [`rewrite`] turns every backslash on a `source:` or
//! `route:` line of the leading `---` block into a forward slash and leaves
//! everything else byte-for-byte intact.

mod batch;

pub use batch::FrontmatterSummary;
pub use batch::WriteMode;
pub use batch::fix_file;
pub use batch::fix_tree;

use std::borrow::Cow;

/// Marks the opening and closing line of the frontmatter block.
pub const FENCE: &str = "---";

/// Keys whose values are normalized, checked in this order.
pub const NORMALIZED_KEYS: [&str; 2] = ["source", "route"];

const BOM: char = '\u{feff}';

/// Rewrite backslashes on recognised key lines of the frontmatter block.
///
/// Returns the input unchanged (borrowed) with `false` when there is no
/// complete frontmatter block or no line needed fixing. A single leading
/// byte-order mark is ignored for detection and kept in the output.
///
/// The replacement covers the whole raw line, quoted or not, so an
/// intentionally escaped character on such a line is rewritten too.
pub fn rewrite(text: &str) -> (Cow<'_, str>, bool) {
    let unchanged = (Cow::Borrowed(text), false);

    let (has_bom, content) = match text.strip_prefix(BOM) {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    if !content.starts_with(FENCE) {
        return unchanged;
    }

    let lines = split_lines(content);
    let Some(close) = lines
        .iter()
        .skip(1)
        .position(|line| line.trim_start().starts_with(FENCE))
        .map(|idx| idx + 1)
    else {
        return unchanged;
    };
    let (header, body) = lines.split_at(close + 1);

    let mut changed = false;
    let mut rebuilt = String::with_capacity(text.len());
    if has_bom {
        rebuilt.push(BOM);
    }
    for line in header {
        if matched_key(line).is_some() && line.contains('\\') {
            rebuilt.push_str(&line.replace('\\', "/"));
            changed = true;
        } else {
            rebuilt.push_str(line);
        }
    }

    if !changed {
        return unchanged;
    }

    rebuilt.extend(body.iter().copied());
    (Cow::Owned(rebuilt), true)
}

/// The normalized key a frontmatter line starts with, if any.
fn matched_key(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    NORMALIZED_KEYS.into_iter().find(|key| {
        trimmed
            .get(..key.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(key))
            && trimmed[key.len()..].starts_with(':')
    })
}

/// Characters that end a line. `\r\n` is handled as one terminator.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
    '\u{2029}',
];

/// Split into lines that keep their terminators. `\r\n` stays one terminator.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if !LINE_BREAKS.contains(&ch) {
            continue;
        }
        let mut end = idx + ch.len_utf8();
        if ch == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            end += 1;
        }
        lines.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
