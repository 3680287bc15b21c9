//! Translation of stored rule patterns into the `regex` crate syntax.
//!
//! Rule tables are authored against ECMAScript regular expressions. Most of
//! that syntax is shared with `regex`; the differences handled here are:
//!
//! - `\uXXXX` and `\u{X...}` code point escapes become `\x{...}`
//! - `\d`, `\D`, `\w`, `\W` keep their ASCII-only meaning
//! - `\b` and `\B` are ASCII word boundaries; inside a class `\b` is a
//!   backspace
//! - `\s` and `\S` use the ECMAScript white space set: U+FEFF is white
//!   space, U+0085 is not
//! - `\/` (escaped delimiter) becomes a plain `/`
//! - a bare `[`, `&` or `~` inside a class is a literal, not a set operator
//! - `[]` never matches and `[^]` matches any character
//!
//! Look-around and back-references have no equivalent; they are passed
//! through and rejected by the regex parser.
//!
//! Patterns are always read in Unicode mode, whether or not the rule sets
//! `u` or `v`: `\u{...}` is a code point and `\p{...}` a property class,
//! never the legacy literal readings.

const ASCII_DIGIT: &str = "0-9";
const ASCII_WORD: &str = "0-9A-Za-z_";
const ECMA_SPACE: &str = r"[\s\x{FEFF}--\x{85}]";
const ECMA_NON_SPACE: &str = r"[^\s\x{FEFF}--\x{85}]";

pub fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let Some(escaped) = chars.next() else {
                    out.push('\\');
                    break;
                };
                match escaped {
                    'u' => translate_unicode_escape(&mut chars, &mut out),
                    'd' | 'D' | 'w' | 'W' => {
                        let body = if escaped.eq_ignore_ascii_case(&'d') {
                            ASCII_DIGIT
                        } else {
                            ASCII_WORD
                        };
                        let negated = escaped.is_ascii_uppercase();
                        match (in_class, negated) {
                            (true, false) => out.push_str(body),
                            (_, true) => {
                                out.push_str("[^");
                                out.push_str(body);
                                out.push(']');
                            }
                            (false, false) => {
                                out.push('[');
                                out.push_str(body);
                                out.push(']');
                            }
                        }
                    }
                    's' => out.push_str(ECMA_SPACE),
                    'S' => out.push_str(ECMA_NON_SPACE),
                    'b' if in_class => out.push_str(r"\x{8}"),
                    'b' | 'B' => {
                        out.push_str("(?-u:\\");
                        out.push(escaped);
                        out.push(')');
                    }
                    '/' => out.push('/'),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                }
            }
            '[' if !in_class => {
                let negated = chars.peek() == Some(&'^');
                if negated {
                    chars.next();
                }
                if chars.peek() == Some(&']') {
                    chars.next();
                    out.push_str(if negated { "(?s:.)" } else { "[a&&b]" });
                    continue;
                }
                in_class = true;
                out.push_str(if negated { "[^" } else { "[" });
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            '[' | '&' | '~' if in_class => {
                out.push('\\');
                out.push(ch);
            }
            other => out.push(other),
        }
    }

    out
}

fn translate_unicode_escape<I>(chars: &mut std::iter::Peekable<I>, out: &mut String)
where
    I: Iterator<Item = char> + Clone,
{
    if chars.peek() == Some(&'{') {
        let mut lookahead = chars.clone();
        lookahead.next();
        let mut hex = String::new();
        let mut closed = false;
        for c in lookahead.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            hex.push(c);
        }
        if closed
            && !hex.is_empty()
            && hex.len() <= 6
            && hex.chars().all(|c| c.is_ascii_hexdigit())
        {
            out.push_str("\\x{");
            out.push_str(&hex);
            out.push('}');
            *chars = lookahead;
            return;
        }
    } else {
        let hex: String = chars.clone().take(4).collect();
        if hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            for _ in 0..4 {
                chars.next();
            }
            out.push_str("\\x{");
            out.push_str(&hex);
            out.push('}');
            return;
        }
    }
    out.push_str("\\u");
}
