//! Thread-local regex compilation cache.
//!
//! Rule tables repeat patterns across languages and events, and tables are
//! often rebuilt in tests. Compiled regexes are keyed by an xxh3 hash of
//! `(flags, translated pattern)`; a hit is confirmed against the stored key
//! so a hash collision only costs a recompile.
//! Cache is capped at 256 entries and cleared when full.

use crate::compile::Flags;
use regex::{Regex, RegexBuilder};
use std::cell::RefCell;
use std::collections::HashMap;
use xxhash_rust::xxh3::xxh3_64;

const MAX_CACHE_ENTRIES: usize = 256;

struct Entry {
    flags: u8,
    pattern: String,
    regex: Regex,
}

thread_local! {
    static REGEX_CACHE: RefCell<HashMap<u64, Entry>> = RefCell::new(HashMap::new());
}

fn cache_key(flags: u8, pattern: &str) -> u64 {
    let mut bytes = Vec::with_capacity(pattern.len() + 1);
    bytes.push(flags);
    bytes.extend_from_slice(pattern.as_bytes());
    xxh3_64(&bytes)
}

/// Get a compiled regex from cache, or compile and cache it.
///
/// `pattern` must already be in `regex` syntax.
pub fn get_or_compile(pattern: &str, flags: Flags) -> Result<Regex, regex::Error> {
    let bits = flags.cache_bits();
    let key = cache_key(bits, pattern);

    REGEX_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();

        if let Some(entry) = cache.get(&key) {
            if entry.flags == bits && entry.pattern == pattern {
                return Ok(entry.regex.clone());
            }
        }

        if cache.len() >= MAX_CACHE_ENTRIES {
            cache.clear();
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_all)
            // ECMAScript line terminators: `.` never matches `\r`, and
            // multi-line anchors treat `\r\n` as one break.
            .crlf(true)
            .build()?;

        cache.insert(
            key,
            Entry {
                flags: bits,
                pattern: pattern.to_string(),
                regex: regex.clone(),
            },
        );
        Ok(regex)
    })
}

/// Clear the cache (mainly for testing).
pub fn clear_cache() {
    REGEX_CACHE.with(|cache| {
        cache.borrow_mut().clear();
    });
}

/// Number of cached regexes on this thread.
pub fn cache_size() -> usize {
    REGEX_CACHE.with(|cache| cache.borrow().len())
}
