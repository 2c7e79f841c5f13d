// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    key::{Names, OptionKey},
    value::{FromValue, Value},
};

/// The final state of one option, defaults applied.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Binding {
    /// Not given and no default.
    Absent,
    Flag(bool),
    Count(u32),
    Value(Value),
    List(Vec<Value>),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BoundOption {
    pub(crate) names: Names,
    pub(crate) negation: Option<Names>,
    pub(crate) binding: Binding,
    /// Given on the command line rather than defaulted.
    pub(crate) explicit: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BoundPositional {
    pub(crate) name: String,
    pub(crate) values: Vec<String>,
}

/// The values bound for one command of the selected chain.
#[derive(Clone, Debug, PartialEq)]
pub struct Matches {
    pub(crate) name: String,
    pub(crate) options: Vec<BoundOption>,
    pub(crate) positionals: Vec<BoundPositional>,
}

impl Matches {
    /// The command's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this command declares `key`.
    pub fn declares(&self, key: impl Into<OptionKey>) -> bool {
        self.lookup(&key.into()).is_some()
    }

    fn lookup(&self, key: &OptionKey) -> Option<(&BoundOption, bool)> {
        self.options.iter().find_map(|option| {
            if option.names.matches(key) {
                Some((option, false))
            } else if option.negation.as_ref().is_some_and(|names| names.matches(key)) {
                Some((option, true))
            } else {
                None
            }
        })
    }

    /// The value of an option, or its default.
    ///
    /// For a repeated option this is the last item. Reading a value as a type
    /// other than the declared one yields `None`.
    pub fn get<T: FromValue>(&self, key: impl Into<OptionKey>) -> Option<T> {
        let (option, negated) = self.lookup(&key.into())?;
        match &option.binding {
            Binding::Absent => None,
            Binding::Flag(on) => T::from_value(&Value::Bool(*on != negated)),
            Binding::Count(count) => T::from_value(&Value::Int(i64::from(*count))),
            Binding::Value(value) => T::from_value(value),
            Binding::List(values) => values.last().and_then(T::from_value),
        }
    }

    /// The text of a string option, or its default.
    pub fn get_str(&self, key: impl Into<OptionKey>) -> Option<&str> {
        let (option, _) = self.lookup(&key.into())?;
        let value = match &option.binding {
            Binding::Value(value) => value,
            Binding::List(values) => values.last()?,
            _ => return None,
        };
        match value {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Every item of a repeated option, in command line order.
    pub fn get_all<T: FromValue>(&self, key: impl Into<OptionKey>) -> Vec<T> {
        match self.lookup(&key.into()) {
            Some((BoundOption { binding: Binding::List(values), .. }, _)) => {
                values.iter().filter_map(T::from_value).collect()
            }
            Some((BoundOption { binding: Binding::Value(value), .. }, _)) => {
                T::from_value(value).into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Whether a flag is on.
    ///
    /// Asking through the negating identity of a toggle answers whether the
    /// negation is in effect.
    pub fn flag(&self, key: impl Into<OptionKey>) -> bool {
        match self.lookup(&key.into()) {
            Some((BoundOption { binding: Binding::Flag(on), .. }, negated)) => *on != negated,
            Some((BoundOption { binding: Binding::Count(count), .. }, _)) => *count > 0,
            Some((BoundOption { binding: Binding::Value(Value::Bool(on)), .. }, _)) => *on,
            _ => false,
        }
    }

    /// How many times a counting flag was given, or its default.
    pub fn count(&self, key: impl Into<OptionKey>) -> u32 {
        match self.lookup(&key.into()) {
            Some((BoundOption { binding: Binding::Count(count), .. }, _)) => *count,
            Some((BoundOption { binding: Binding::Flag(on), .. }, negated)) => {
                u32::from(*on != negated)
            }
            _ => 0,
        }
    }

    /// Whether the option was given on the command line.
    pub fn is_present(&self, key: impl Into<OptionKey>) -> bool {
        self.lookup(&key.into()).is_some_and(|(option, _)| option.explicit)
    }

    /// The value of a single positional, or its default.
    pub fn positional(&self, name: &str) -> Option<&str> {
        self.positionals(name).first().map(String::as_str)
    }

    /// Every value of a positional, in command line order.
    pub fn positionals(&self, name: &str) -> &[String] {
        self.positionals
            .iter()
            .find(|positional| positional.name == name)
            .map(|positional| positional.values.as_slice())
            .unwrap_or_default()
    }
}

/// Everything bound by a successful parse.
///
/// Holds one [`Matches`] per command from the root to the selected
/// subcommand. The getters here look in the deepest command declaring the
/// key or positional first.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseResult {
    pub(crate) scopes: Vec<Matches>,
    pub(crate) rest: Vec<String>,
}

impl ParseResult {
    fn find(&self, key: &OptionKey) -> Option<&Matches> {
        self.scopes.iter().rev().find(|scope| scope.lookup(key).is_some())
    }

    fn find_positional(&self, name: &str) -> Option<&Matches> {
        self.scopes
            .iter()
            .rev()
            .find(|scope| scope.positionals.iter().any(|positional| positional.name == name))
    }

    /// See [`Matches::get`].
    pub fn get<T: FromValue>(&self, key: impl Into<OptionKey>) -> Option<T> {
        let key = key.into();
        self.find(&key)?.get(key)
    }

    /// See [`Matches::get_str`].
    pub fn get_str(&self, key: impl Into<OptionKey>) -> Option<&str> {
        let key = key.into();
        self.find(&key)?.get_str(key)
    }

    /// See [`Matches::get_all`].
    pub fn get_all<T: FromValue>(&self, key: impl Into<OptionKey>) -> Vec<T> {
        let key = key.into();
        self.find(&key).map(|scope| scope.get_all(key)).unwrap_or_default()
    }

    /// See [`Matches::flag`].
    pub fn flag(&self, key: impl Into<OptionKey>) -> bool {
        let key = key.into();
        self.find(&key).is_some_and(|scope| scope.flag(key))
    }

    /// See [`Matches::count`].
    pub fn count(&self, key: impl Into<OptionKey>) -> u32 {
        let key = key.into();
        self.find(&key).map_or(0, |scope| scope.count(key))
    }

    /// See [`Matches::is_present`].
    pub fn is_present(&self, key: impl Into<OptionKey>) -> bool {
        let key = key.into();
        self.find(&key).is_some_and(|scope| scope.is_present(key))
    }

    /// See [`Matches::positional`].
    pub fn positional(&self, name: &str) -> Option<&str> {
        self.find_positional(name)?.positional(name)
    }

    /// See [`Matches::positionals`].
    pub fn positionals(&self, name: &str) -> &[String] {
        self.find_positional(name).map(|scope| scope.positionals(name)).unwrap_or_default()
    }

    /// Names of the selected subcommands, outermost first. Empty when no
    /// subcommand was given.
    pub fn command_path(&self) -> Vec<&str> {
        self.scopes.iter().skip(1).map(|scope| scope.name.as_str()).collect()
    }

    /// The innermost selected subcommand.
    pub fn subcommand(&self) -> Option<&str> {
        self.scopes.iter().skip(1).last().map(|scope| scope.name.as_str())
    }

    /// Whether the subcommand `name` is part of the selected chain.
    pub fn is_active(&self, name: &str) -> bool {
        self.scopes.iter().skip(1).any(|scope| scope.name == name)
    }

    /// The bindings of one command of the chain, by name. The root is
    /// found by its own name.
    pub fn scope(&self, name: &str) -> Option<&Matches> {
        self.scopes.iter().find(|scope| scope.name == name)
    }

    /// The bindings of the root command.
    pub fn root(&self) -> &Matches {
        &self.scopes[0]
    }

    /// The bindings of the innermost selected command.
    pub fn active(&self) -> &Matches {
        &self.scopes[self.scopes.len() - 1]
    }

    /// Positional arguments no declared positional took.
    pub fn rest(&self) -> &[String] {
        &self.rest
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn option(names: impl Into<Names>, binding: Binding, explicit: bool) -> BoundOption {
        BoundOption { names: names.into(), negation: None, binding, explicit }
    }

    fn result() -> ParseResult {
        ParseResult {
            scopes: vec![
                Matches {
                    name: "git".into(),
                    options: vec![
                        option("verbose", Binding::Flag(true), true),
                        option(('C', "dir"), Binding::Value(Value::Str("/tmp".into())), true),
                    ],
                    positionals: vec![],
                },
                Matches {
                    name: "commit".into(),
                    options: vec![
                        BoundOption {
                            names: ('s', "signoff").into(),
                            negation: Some("no-signoff".into()),
                            binding: Binding::Flag(false),
                            explicit: true,
                        },
                        option('v', Binding::Count(2), true),
                        option(
                            "dir",
                            Binding::List(vec![Value::Int(1), Value::Int(2)]),
                            false,
                        ),
                    ],
                    positionals: vec![BoundPositional {
                        name: "pathspec".into(),
                        values: vec!["a".into(), "b".into()],
                    }],
                },
            ],
            rest: vec![],
        }
    }

    #[test]
    fn deepest_declaring_scope_wins() {
        let result = result();
        assert_eq!(result.get::<i64>("dir"), Some(2));
        assert_eq!(result.get_all::<i64>("dir"), vec![1, 2]);
        assert_eq!(result.get_str('C'), Some("/tmp"));
        assert!(result.flag("verbose"));
        assert!(!result.is_present("dir"));
    }

    #[test]
    fn negation_reads_inverted() {
        let result = result();
        assert!(!result.flag('s'));
        assert!(result.flag("no-signoff"));
        assert_eq!(result.get::<bool>("signoff"), Some(false));
    }

    #[test]
    fn declares_covers_every_name() {
        let result = result();
        let commit = result.active();
        assert!(commit.declares('s'));
        assert!(commit.declares("signoff"));
        assert!(commit.declares("no-signoff"));
        assert!(commit.declares("dir"));
        assert!(!commit.declares('C'));
        assert!(!commit.declares("verbose"));
        assert!(result.root().declares('C'));
    }

    #[test]
    fn chain_queries() {
        let result = result();
        assert_eq!(result.command_path(), vec!["commit"]);
        assert_eq!(result.subcommand(), Some("commit"));
        assert!(result.is_active("commit"));
        assert!(!result.is_active("git"));
        assert_eq!(result.active().name(), "commit");
        assert_eq!(result.root().name(), "git");
        assert_eq!(result.count('v'), 2);
        assert_eq!(result.positionals("pathspec"), ["a", "b"]);
        assert_eq!(result.positional("pathspec"), Some("a"));
        assert_eq!(result.positional("missing"), None);
    }
}
