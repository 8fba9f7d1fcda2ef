// Markdown-subset formatting for assistant replies.
//
// The backend returns plain text carrying a small markdown dialect
// (bold, italic, two header levels, bullet lists). This module turns a
// reply into styled fragments that the chat widget can render. It is a
// pure function of its input: no state, no I/O.

use regex::Regex;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Fragment types
// ---------------------------------------------------------------------------

/// Visual style of a single output fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentStyle {
    Plain,
    Bold,
    Italic,
    BoldItalic,
    /// `## text` — the larger of the two header levels.
    Header2,
    /// `### text` — the smaller header level.
    Header3,
}

/// A run of text with one style applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub style: FragmentStyle,
}

impl Fragment {
    fn plain(text: &str) -> Self {
        Fragment {
            text: text.to_string(),
            style: FragmentStyle::Plain,
        }
    }
}

/// One formatted line of a message. The renderer prefixes bullet lines
/// with a marker glyph and inserts vertical spacing between lines
/// (except after the last).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLine {
    pub bullet: bool,
    pub fragments: Vec<Fragment>,
}

// ---------------------------------------------------------------------------
// Inline rules
// ---------------------------------------------------------------------------

/// Ordered inline rules. Each pattern has exactly one capture group
/// holding the styled content. Order is priority: when two rules could
/// match at the same scan position, the earlier one wins (the combined
/// alternation preserves this order under leftmost-first matching).
///
/// Emphasis patterns require at least one character between the
/// markers, so an empty pair like `**` never matches and the scan
/// always advances.
///
/// The header patterns use `\S+` for "consume until whitespace or end
/// of line". Note they match anywhere in a line, not only at line
/// start; that is intentional backend-output behavior and should not be
/// tightened without a product decision.
const INLINE_RULES: &[(&str, FragmentStyle)] = &[
    (r"\*\*\*([^*]+?)\*\*\*", FragmentStyle::BoldItalic),
    (r"\*\*([^*]+?)\*\*", FragmentStyle::Bold),
    (r"\*([^*]+?)\*", FragmentStyle::Italic),
    (r"__(.+?)__", FragmentStyle::Bold),
    (r"###\s+(\S+)", FragmentStyle::Header3),
    (r"##\s+(\S+)", FragmentStyle::Header2),
];

/// The combined alternation built from `INLINE_RULES`, compiled once.
fn inline_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternation = INLINE_RULES
            .iter()
            .map(|(pattern, _)| *pattern)
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation).expect("inline rule patterns are valid")
    })
}

/// Matches the bullet marker prefix: optional leading whitespace, `*`,
/// one whitespace character.
fn bullet_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\*\s").expect("bullet pattern is valid"))
}

/// Strips the full bullet marker including the entire whitespace run
/// after the `*`.
fn bullet_strip_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\*\s+").expect("bullet strip pattern is valid"))
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format a whole message: split on line breaks and format each line
/// independently. Bullet detection takes precedence over inline
/// emphasis for a given line.
pub fn format_message(text: &str) -> Vec<MessageLine> {
    text.split('\n').map(format_line).collect()
}

fn format_line(line: &str) -> MessageLine {
    if is_bullet_line(line) {
        let content = bullet_strip_regex().replace(line, "");
        MessageLine {
            bullet: true,
            fragments: format_inline(&content),
        }
    } else {
        MessageLine {
            bullet: false,
            fragments: format_inline(line),
        }
    }
}

/// A line is a bullet when it starts with `*` plus whitespace and the
/// character right after the first whitespace is not another `*`.
///
/// The second condition keeps `**bold**` lines out, while still
/// accepting `*  *emphasis*` (two spaces) as a bullet — matching how
/// the backend's own renderer treats these lines.
fn is_bullet_line(line: &str) -> bool {
    match bullet_regex().find(line) {
        Some(m) => !line[m.end()..].starts_with('*'),
        None => false,
    }
}

/// Scan one line left to right with the combined rule alternation,
/// emitting untouched text as plain fragments and each match as a
/// styled fragment. Matches never overlap and never recurse; a line
/// with no match comes back as a single plain fragment.
pub fn format_inline(text: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut last = 0;

    for caps in inline_regex().captures_iter(text) {
        let whole = caps.get(0).expect("match always has a group 0");
        if whole.start() > last {
            fragments.push(Fragment::plain(&text[last..whole.start()]));
        }

        // Exactly one rule's capture group participates per match; its
        // index identifies which rule fired.
        for (i, (_, style)) in INLINE_RULES.iter().enumerate() {
            if let Some(group) = caps.get(i + 1) {
                fragments.push(Fragment {
                    text: group.as_str().to_string(),
                    style: *style,
                });
                break;
            }
        }

        last = whole.end();
    }

    if last < text.len() {
        fragments.push(Fragment::plain(&text[last..]));
    }

    fragments
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
