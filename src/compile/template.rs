use crate::compile::errors::MatcherError;
use regex::{Captures, Regex, Replacer};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `$&`
    Whole,
    /// `` $` ``
    Before,
    /// `$'`
    After,
    /// `$1` .. `$99`
    Group(usize),
    /// `$<name>`
    Named(String),
}

/// A parsed replacement template.
///
/// Template syntax:
///
/// ```text
/// $$        literal dollar sign
/// $&        the whole match
/// $`        text before the match
/// $'        text after the match
/// $1 .. $99 numbered capture group (two digits only if that group exists)
/// $<name>   named capture group (only when the pattern has named groups)
/// ```
///
/// Any other `$` is literal. A group that did not take part in a match
/// expands to nothing. A reference to a group the pattern does not define
/// is rejected while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str, regex: &Regex) -> Result<Self, MatcherError> {
        let group_count = regex.captures_len().saturating_sub(1);
        let has_names = regex.capture_names().flatten().next().is_some();

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(pos) = rest.find('$') {
            literal.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let mut tail = after.chars();

            let (segment, consumed) = match tail.next() {
                Some('$') => {
                    literal.push('$');
                    rest = &after[1..];
                    continue;
                }
                Some('&') => (Segment::Whole, 1),
                Some('`') => (Segment::Before, 1),
                Some('\'') => (Segment::After, 1),
                Some(first @ '0'..='9') => {
                    let one = first as usize - '0' as usize;
                    let two = tail
                        .next()
                        .and_then(|c| c.to_digit(10))
                        .map(|second| one * 10 + second as usize);
                    match two {
                        Some(n) if n >= 1 && n <= group_count => (Segment::Group(n), 2),
                        _ if one >= 1 && one <= group_count => (Segment::Group(one), 1),
                        _ => {
                            return Err(MatcherError::UnknownGroup {
                                group: first.to_string(),
                            })
                        }
                    }
                }
                Some('<') if has_names => match after[1..].find('>') {
                    Some(end) => {
                        let name = &after[1..1 + end];
                        if regex.capture_names().flatten().all(|n| n != name) {
                            return Err(MatcherError::UnknownGroup {
                                group: name.to_string(),
                            });
                        }
                        (Segment::Named(name.to_string()), end + 2)
                    }
                    None => {
                        literal.push('$');
                        rest = after;
                        continue;
                    }
                },
                _ => {
                    literal.push('$');
                    rest = after;
                    continue;
                }
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(segment);
            rest = &after[consumed..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// The template's text when it references nothing from the match.
    pub fn as_literal(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [] => Some(""),
            [Segment::Literal(text)] => Some(text),
            _ => None,
        }
    }

    /// Append the expansion for one match to `dst`.
    ///
    /// `haystack` must be the string the captures were taken from.
    pub fn expand(&self, caps: &Captures<'_>, haystack: &str, dst: &mut String) {
        let whole = caps.get(0);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => dst.push_str(text),
                Segment::Whole => dst.push_str(whole.map_or("", |m| m.as_str())),
                Segment::Before => dst.push_str(&haystack[..whole.map_or(0, |m| m.start())]),
                Segment::After => {
                    dst.push_str(&haystack[whole.map_or(haystack.len(), |m| m.end())..])
                }
                Segment::Group(index) => dst.push_str(caps.get(*index).map_or("", |m| m.as_str())),
                Segment::Named(name) => dst.push_str(caps.name(name).map_or("", |m| m.as_str())),
            }
        }
    }

    pub(crate) fn replacer<'a>(&'a self, haystack: &'a str) -> TemplateReplacer<'a> {
        TemplateReplacer {
            template: self,
            haystack,
        }
    }
}

/// Binds a template to the haystack it is replacing in, so positional
/// tokens can see text outside the match.
pub(crate) struct TemplateReplacer<'a> {
    template: &'a Template,
    haystack: &'a str,
}

impl Replacer for TemplateReplacer<'_> {
    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) {
        self.template.expand(caps, self.haystack, dst);
    }

    fn no_expansion(&mut self) -> Option<Cow<'_, str>> {
        self.template.as_literal().map(Cow::Borrowed)
    }
}
