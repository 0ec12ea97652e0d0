#![forbid(unsafe_code)]

//! Plain-text shaping and entity decoding for rendered templates.

use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern compiles"))
}

fn nbsp_pattern() -> &'static Regex {
    static NBSP: OnceLock<Regex> = OnceLock::new();
    NBSP.get_or_init(|| Regex::new(r"(?i)&nbsp;").expect("nbsp pattern compiles"))
}

fn leading_space_pattern() -> &'static Regex {
    static LEADING: OnceLock<Regex> = OnceLock::new();
    LEADING.get_or_init(|| Regex::new(r"(?m)^\s+").expect("leading-space pattern compiles"))
}

/// Remove all markup tags.
#[must_use]
pub fn strip_tags(input: &str) -> String {
    tag_pattern().replace_all(input, "").into_owned()
}

/// Cleanup applied after stripping changed the content: collapse
/// non-breaking-space entities to plain spaces and drop leading
/// whitespace on each line.
#[must_use]
pub fn collapse_plain_text(input: &str) -> String {
    let collapsed = nbsp_pattern().replace_all(input, " ");
    leading_space_pattern().replace_all(&collapsed, "").into_owned()
}

/// Decode the HTML entities that show up in subjects and option values:
/// the named basics plus decimal and hex numeric references. Unknown
/// entities are left as-is.
#[must_use]
pub fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail[1..].find(';').map(|i| i + 1) {
            // Entities are short; a far-away semicolon means this '&' is literal.
            Some(end) if end <= 10 => {
                let name = &tail[1..end];
                if let Some(decoded) = decode_entity(name) {
                    out.push(decoded);
                } else {
                    out.push_str(&tail[..=end]);
                }
                rest = &tail[end + 1..];
            }
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_including_multiline() {
        assert_eq!(strip_tags("<b>Hi</b> there"), "Hi there");
        assert_eq!(strip_tags("a <div\nclass=\"x\">b</div> c"), "a b c");
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn plain_text_rendering_of_markup_body() {
        let raw = "<b>Hi</b>&nbsp;there";
        let stripped = strip_tags(raw);
        assert_ne!(stripped, raw);
        assert_eq!(collapse_plain_text(&stripped), "Hi there");
    }

    #[test]
    fn collapse_drops_leading_whitespace_per_line() {
        assert_eq!(
            collapse_plain_text("  first\n\t second\nthird"),
            "first\nsecond\nthird"
        );
    }

    #[test]
    fn decodes_named_entities() {
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
        assert_eq!(decode_entities("&quot;hi&quot; &apos;there&apos;"), "\"hi\" 'there'");
    }

    #[test]
    fn decodes_numeric_entities() {
        assert_eq!(decode_entities("&#39;quoted&#39;"), "'quoted'");
        assert_eq!(decode_entities("&#x27;hex&#X27;"), "'hex'");
    }

    #[test]
    fn leaves_unknown_and_bare_ampersands() {
        assert_eq!(decode_entities("&unknown; stays"), "&unknown; stays");
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }
}
