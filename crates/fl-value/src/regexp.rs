//! Regular expression values.
//!
//! Only the textual identity of a pattern is modelled: its source and flags.
//! Matching is outside the scope of the type-class runtime.

use std::fmt;
use std::rc::Rc;

use crate::{Error, Result};

/// Flag letters in canonical order.
const FLAG_ORDER: &str = "dgimsuvy";

/// A regular expression: pattern source plus canonical flags.
#[derive(Clone)]
pub struct RegExp(Rc<RegExpInner>);

struct RegExpInner {
    source: String,
    flags: String,
}

impl RegExp {
    /// Creates a regular expression.
    ///
    /// Flags are normalised to canonical order. An empty pattern is stored as
    /// `(?:)` and unescaped slashes are escaped, so that the literal form
    /// `/source/flags` always reads back as the same pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] for an unknown or repeated flag.
    pub fn new(source: &str, flags: &str) -> Result<Self> {
        let mut seen = [false; FLAG_ORDER.len()];
        for flag in flags.chars() {
            let Some(idx) = FLAG_ORDER.find(flag) else {
                return Err(Error::Invalid(format!("unknown regular expression flag `{flag}`")));
            };
            if seen[idx] {
                return Err(Error::Invalid(format!("repeated regular expression flag `{flag}`")));
            }
            seen[idx] = true;
        }
        let flags = FLAG_ORDER
            .chars()
            .zip(seen)
            .filter_map(|(flag, on)| on.then_some(flag))
            .collect();
        Ok(Self(Rc::new(RegExpInner {
            source: escape_source(source),
            flags,
        })))
    }

    /// The pattern source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.0.source
    }

    /// The flags in canonical order.
    #[must_use]
    pub fn flags(&self) -> &str {
        &self.0.flags
    }

    /// Returns true if both handles refer to the same regular expression.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

fn escape_source(source: &str) -> String {
    if source.is_empty() {
        return "(?:)".to_string();
    }
    let mut out = String::with_capacity(source.len());
    let mut escaped = false;
    let mut in_class = false;
    for c in source.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => out.push('\\'),
            _ => {}
        }
        if c == '\n' {
            out.push_str("\\n");
        } else {
            out.push(c);
        }
    }
    out
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source(), self.flags())
    }
}

impl fmt::Debug for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegExp({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_canonical() {
        let re = RegExp::new("a+", "ymig").unwrap();
        assert_eq!(re.flags(), "gimy");
        assert_eq!(re.to_string(), "/a+/gimy");
    }

    #[test]
    fn test_bad_flags() {
        assert!(matches!(RegExp::new("a", "x"), Err(Error::Invalid(_))));
        assert!(matches!(RegExp::new("a", "gg"), Err(Error::Invalid(_))));
    }

    #[test]
    fn test_source_escaping() {
        assert_eq!(RegExp::new("", "").unwrap().source(), "(?:)");
        assert_eq!(RegExp::new("a/b", "").unwrap().source(), "a\\/b");
        assert_eq!(RegExp::new("a\\/b", "").unwrap().source(), "a\\/b");
        assert_eq!(RegExp::new("[/]", "").unwrap().source(), "[/]");
    }
}
