// ABOUTME: Plain-text helpers for feed item content.
// ABOUTME: Strips markup, decodes common entities, and collapses whitespace for text sampling.

/// Strips markup from an HTML fragment, returning collapsed plain text.
///
/// Deliberately naive: drops angle-bracketed runs without parsing. Good
/// enough for building language samples out of feed item bodies.
pub fn strip_html(s: &str) -> String {
    let mut text = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }

    collapse_whitespace(&decode_entities(&text))
}

/// Named entities that show up in real-world feed text.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    ("&ndash;", "\u{2013}"),
    ("&mdash;", "\u{2014}"),
    ("&lsquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
    ("&ldquo;", "\u{201C}"),
    ("&rdquo;", "\u{201D}"),
    ("&hellip;", "\u{2026}"),
    ("&copy;", "\u{A9}"),
    ("&reg;", "\u{AE}"),
];

/// Decodes common named entities and numeric character references.
pub fn decode_entities(s: &str) -> String {
    let mut out = s.to_string();
    for (entity, replacement) in NAMED_ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, replacement);
        }
    }
    decode_numeric_entities(&out)
}

/// Decodes `&#NNN;` and `&#xHH;` references, leaving bad ones untouched.
fn decode_numeric_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("&#") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let (is_hex, digits) = match tail.strip_prefix(['x', 'X']) {
            Some(hex_tail) => (true, hex_tail),
            None => (false, tail),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(digits.len());

        let decoded = if end > 0 && digits[end..].starts_with(';') {
            parse_char_code(&digits[..end], is_hex)
        } else {
            None
        };

        match decoded {
            Some(c) => {
                out.push(c);
                rest = &digits[end + 1..];
            }
            None => {
                out.push_str("&#");
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parses a character reference code. Overflow and, for decimal references,
/// stray hex digits both yield `None`, keeping the reference verbatim.
fn parse_char_code(digits: &str, is_hex: bool) -> Option<char> {
    let code = if is_hex {
        u32::from_str_radix(digits, 16).ok()?
    } else {
        digits.parse().ok()?
    };
    char::from_u32(code)
}

/// Collapses whitespace runs into single spaces and trims the ends.
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }

    out
}
