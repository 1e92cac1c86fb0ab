//! Filename suffix rules used to propose renames.
//!
//! Every tool owns an ordered [`RuleSet`]. For each file name the rules are
//! tried in order and the first one that matches produces the new name; the
//! remaining rules never see that file. Matching ignores ASCII case and the
//! removed text is always exactly the matched trailing bytes.

/// A single suffix-stripping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixRule {
    /// `name._docx` -> `name`
    DotUnderscoreDocx,
    /// `name_docx` -> `name`
    UnderscoreDocx,
    /// `page.html.docx` -> `page.html`
    HtmlDocx,
    /// `page.html_extra.docx` -> `page.html_extra`
    HtmlContainingDocx,
}

const DOT_UNDERSCORE_DOCX: &str = "._docx";
const UNDERSCORE_DOCX: &str = "_docx";
const HTML_DOCX: &str = ".html.docx";
const DOCX: &str = ".docx";
const HTML: &str = ".html";

impl SuffixRule {
    /// Returns the new file name if this rule applies to `name`. The result
    /// may be empty when `name` is nothing but the suffix.
    pub fn apply(self, name: &str) -> Option<&str> {
        match self {
            Self::DotUnderscoreDocx => strip_suffix_ignore_case(name, DOT_UNDERSCORE_DOCX),
            Self::UnderscoreDocx => strip_suffix_ignore_case(name, UNDERSCORE_DOCX),
            Self::HtmlDocx => {
                ends_with_ignore_case(name, HTML_DOCX).then(|| &name[..name.len() - DOCX.len()])
            }
            Self::HtmlContainingDocx => {
                if contains_ignore_case(name, HTML) && !ends_with_ignore_case(name, HTML_DOCX) {
                    strip_suffix_ignore_case(name, DOCX)
                } else {
                    None
                }
            }
        }
    }
}

/// An ordered list of rules plus the wording used to describe each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rules: &'static [(SuffixRule, &'static str)],
    hint: &'static str,
}

impl RuleSet {
    /// Flat-folder cleanup of `_docx` leftovers.
    pub const DOCX_SUFFIXES: RuleSet = RuleSet {
        rules: &[
            (SuffixRule::DotUnderscoreDocx, "remove trailing '._docx'"),
            (SuffixRule::UnderscoreDocx, "remove trailing '_docx'"),
        ],
        hint: "Looking for filenames ending with '._docx' or '_docx'.",
    };

    /// Collapse `.html.docx` to `.html`.
    pub const HTML_DOCX: RuleSet = RuleSet {
        rules: &[(SuffixRule::HtmlDocx, "strip trailing .docx from .html.docx")],
        hint: "Looking for filenames ending with '.html.docx'.",
    };

    /// Whole-tree cleanup of imported files.
    pub const IMPORTED_EXTENSIONS: RuleSet = RuleSet {
        rules: &[
            (SuffixRule::HtmlDocx, "strip trailing .docx from .html.docx"),
            (SuffixRule::UnderscoreDocx, "strip trailing _docx suffix"),
            (
                SuffixRule::HtmlContainingDocx,
                "strip trailing .docx from file containing .html",
            ),
        ],
        hint: "Looking for filenames ending with '.html.docx' or '_docx', or containing '.html' and ending with '.docx'.",
    };

    /// First matching rule wins: the new name and the reason string.
    ///
    /// A name that is only the suffix matches but gets no new name, and no
    /// later rule is tried for it.
    pub fn first_match<'a>(&self, name: &'a str) -> Option<(&'a str, &'static str)> {
        let (renamed, reason) = self
            .rules
            .iter()
            .find_map(|(rule, reason)| rule.apply(name).map(|renamed| (renamed, *reason)))?;
        (!renamed.is_empty()).then_some((renamed, reason))
    }

    /// One-line description of what this rule set looks for.
    pub fn hint(&self) -> &'static str {
        self.hint
    }
}

fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.is_char_boundary(name.len() - suffix.len())
        && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    ends_with_ignore_case(name, suffix).then(|| &name[..name.len() - suffix.len()])
}

fn contains_ignore_case(name: &str, needle: &str) -> bool {
    name.as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}
