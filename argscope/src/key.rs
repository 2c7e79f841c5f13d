// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;

/// The identity an option is looked up by.
///
/// Short and long identities never compare equal, so `-x` and `--x` are
/// distinct options.
///
/// ```rust
/// use argscope::OptionKey;
///
/// assert_eq!(OptionKey::from('n'), OptionKey::Short('n'));
/// assert_eq!(OptionKey::from("count"), OptionKey::Long("count".to_string()));
/// assert_ne!(OptionKey::from('x'), OptionKey::from("x"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    /// A single character used as `-c`.
    Short(char),
    /// A name used as `--name`.
    Long(String),
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short(c) => write!(f, "-{}", c),
            Self::Long(name) => write!(f, "--{}", name),
        }
    }
}

impl From<char> for OptionKey {
    fn from(c: char) -> Self {
        Self::Short(c)
    }
}

impl From<&str> for OptionKey {
    fn from(name: &str) -> Self {
        Self::Long(name.strip_prefix("--").unwrap_or(name).to_string())
    }
}

impl From<String> for OptionKey {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<&OptionKey> for OptionKey {
    fn from(key: &OptionKey) -> Self {
        key.clone()
    }
}

/// The short and long identities of one option.
///
/// Built from a `char` (short only), a `&str` (long only) or a
/// `(char, &str)` pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Names {
    /// Short identity, used as `-c`.
    pub short: Option<char>,
    /// Long identity without dashes, used as `--name`.
    pub long: Option<String>,
}

impl Names {
    /// The keys this identity answers to, short first.
    pub fn keys(&self) -> impl Iterator<Item = OptionKey> + '_ {
        self.short
            .map(OptionKey::Short)
            .into_iter()
            .chain(self.long.iter().map(|long| OptionKey::Long(long.clone())))
    }

    /// Whether `key` is one of these identities.
    pub fn matches(&self, key: &OptionKey) -> bool {
        match key {
            OptionKey::Short(c) => self.short == Some(*c),
            OptionKey::Long(name) => self.long.as_deref() == Some(name.as_str()),
        }
    }

    /// Neither a short nor a long identity is set.
    pub fn is_empty(&self) -> bool {
        self.short.is_none() && self.long.is_none()
    }
}

/// Renders the declared form, e.g. `-n, --count`.
impl fmt::Display for Names {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.short, &self.long) {
            (Some(short), Some(long)) => write!(f, "-{}, --{}", short, long),
            (Some(short), None) => write!(f, "-{}", short),
            (None, Some(long)) => write!(f, "--{}", long),
            (None, None) => Ok(()),
        }
    }
}

impl From<char> for Names {
    fn from(short: char) -> Self {
        Self { short: Some(short), long: None }
    }
}

impl From<&str> for Names {
    fn from(long: &str) -> Self {
        Self { short: None, long: Some(long.strip_prefix("--").unwrap_or(long).to_string()) }
    }
}

impl From<(char, &str)> for Names {
    fn from((short, long): (char, &str)) -> Self {
        Self { short: Some(short), ..Self::from(long) }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_matches_declared_form() {
        assert_eq!(Names::from(('n', "count")).to_string(), "-n, --count");
        assert_eq!(Names::from('n').to_string(), "-n");
        assert_eq!(Names::from("count").to_string(), "--count");
    }

    #[test]
    fn keys_and_matching() {
        let names = Names::from(('n', "count"));
        let keys: Vec<_> = names.keys().collect();
        assert_eq!(keys, vec![OptionKey::Short('n'), OptionKey::Long("count".into())]);
        assert!(names.matches(&OptionKey::from("--count")));
        assert!(!names.matches(&OptionKey::from("n")));
    }
}
