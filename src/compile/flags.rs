use crate::compile::errors::FlagError;

/// Parsed rule flags.
///
/// The table stores flags the way ECMAScript regex literals spell them.
/// `g` is accepted but has no effect: every rule replaces all matches.
/// `u`, `v` and `d` are accepted for compatibility; matching is always
/// Unicode-aware and match indices are never exposed. Without `u`,
/// `\u{...}` and `\p{...}` still read as a code point and a property class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    pub global: bool,
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub unicode_sets: bool,
    pub indices: bool,
}

impl Flags {
    pub fn parse(flags: &str) -> Result<Self, FlagError> {
        let mut parsed = Flags::default();

        for flag in flags.chars() {
            let slot = match flag {
                'g' => &mut parsed.global,
                'i' => &mut parsed.case_insensitive,
                'm' => &mut parsed.multi_line,
                's' => &mut parsed.dot_all,
                'u' => &mut parsed.unicode,
                'v' => &mut parsed.unicode_sets,
                'd' => &mut parsed.indices,
                'y' => return Err(FlagError::Unsupported(flag)),
                other => return Err(FlagError::Unknown(other)),
            };
            if *slot {
                return Err(FlagError::Repeated(flag));
            }
            *slot = true;
        }

        if parsed.unicode && parsed.unicode_sets {
            return Err(FlagError::UnicodeConflict);
        }

        Ok(parsed)
    }

    /// Compact key used by the matcher cache; only bits that change
    /// matching behavior participate.
    pub(crate) fn cache_bits(self) -> u8 {
        u8::from(self.case_insensitive)
            | u8::from(self.multi_line) << 1
            | u8::from(self.dot_all) << 2
    }
}
