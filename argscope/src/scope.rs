// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::{HashMap, HashSet};

use argscope_shared::HelpLayout;
use log::debug;

use crate::{
    ParseOutcome,
    bind::Binder,
    error::BuildError,
    key::OptionKey,
    option::{Delimiter, Multiplicity, OptionKind, OptionSpec},
    positional::PositionalSpec,
    value::ValueType,
};

/// Index of a command within a built [`Parser`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(crate) usize);

/// Where a key points within its scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Slot {
    pub(crate) index: usize,
    pub(crate) negated: bool,
}

/// One frozen command. Children and parent are arena indices.
#[derive(Debug)]
pub(crate) struct Scope {
    pub(crate) name: String,
    /// Space separated path from the root, like `git commit`.
    pub(crate) path: String,
    pub(crate) description: String,
    pub(crate) footer: String,
    pub(crate) parent: Option<ScopeId>,
    pub(crate) options: Vec<OptionSpec>,
    pub(crate) positionals: Vec<PositionalSpec>,
    pub(crate) children: Vec<ScopeId>,
    pub(crate) keys: HashMap<OptionKey, Slot>,
}

/// A command under construction: its options, positionals and subcommands.
///
/// ```rust
/// use argscope::{Command, OptionSpec, PositionalSpec};
///
/// let parser = Command::new("git")
///     .option(OptionSpec::flag("verbose"))
///     .subcommand(
///         Command::new("commit")
///             .description("Record changes to the repository")
///             .option(OptionSpec::string(('m', "message")).required()),
///     )
///     .build()
///     .unwrap();
///
/// let result = parser.parse(&["commit", "-m", "fix"]).into_result().unwrap();
/// assert_eq!(result.subcommand(), Some("commit"));
/// assert_eq!(result.get_str("message"), Some("fix"));
/// ```
#[derive(Clone, Debug)]
pub struct Command {
    name: String,
    description: String,
    version: Option<String>,
    builtin_heading: Option<String>,
    footer: String,
    layout: HelpLayout,
    options: Vec<OptionSpec>,
    positionals: Vec<PositionalSpec>,
    subcommands: Vec<Command>,
}

impl Command {
    /// A command called `name`. For the root this is the program name used
    /// in help text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: None,
            builtin_heading: None,
            footer: String::new(),
            layout: HelpLayout::default(),
            options: Vec::new(),
            positionals: Vec::new(),
            subcommands: Vec::new(),
        }
    }

    /// Text shown under the usage line, and next to the name in the
    /// parent's subcommand list.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Enable `-V`/`--version`, printing `version`. Only read on the root.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Help heading of the `-h` and `-V` entries in every command. Without
    /// one they are listed under `Options:`. Only read on the root.
    pub fn builtin_heading(mut self, heading: impl Into<String>) -> Self {
        self.builtin_heading = Some(heading.into());
        self
    }

    /// Text appended after the last help section.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Column at which help descriptions start. Only read on the root.
    pub fn description_indent(mut self, indent: usize) -> Self {
        self.layout.description_indent = indent;
        self
    }

    /// Column layout of help text. Only read on the root.
    pub fn help_layout(mut self, layout: HelpLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Add a flag or valued option.
    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Add the next positional.
    pub fn positional(mut self, positional: PositionalSpec) -> Self {
        self.positionals.push(positional);
        self
    }

    /// Add a subcommand.
    pub fn subcommand(mut self, command: Command) -> Self {
        self.subcommands.push(command);
        self
    }

    /// Check every declaration and freeze the tree into a [`Parser`].
    pub fn build(self) -> Result<Parser, BuildError> {
        let version = self.version.clone();
        let builtin_heading = self.builtin_heading.clone();
        let layout = self.layout;
        let mut scopes = Vec::new();
        flatten(self, None, version.is_some(), &mut scopes)?;
        debug!("built parser with {} scope(s)", scopes.len());
        Ok(Parser { scopes, version, builtin_heading, layout })
    }
}

fn flatten(
    command: Command,
    parent: Option<ScopeId>,
    has_version: bool,
    scopes: &mut Vec<Scope>,
) -> Result<ScopeId, BuildError> {
    let Command { name, description, footer, options, positionals, subcommands, .. } = command;
    let path = match parent {
        Some(parent) => format!("{} {}", scopes[parent.0].path, name),
        None => name.clone(),
    };

    let keys = register_options(&path, &options, has_version)?;
    check_positionals(&path, &positionals)?;

    let mut names = HashSet::new();
    for child in &subcommands {
        if !is_valid_word(&child.name) {
            return Err(BuildError::InvalidName { scope: path, name: child.name.clone() });
        }
        if !names.insert(child.name.as_str()) {
            return Err(BuildError::DuplicateSubcommand { scope: path, name: child.name.clone() });
        }
    }

    let id = ScopeId(scopes.len());
    scopes.push(Scope {
        name,
        path,
        description,
        footer,
        parent,
        options,
        positionals,
        children: Vec::new(),
        keys,
    });

    for child in subcommands {
        let child = flatten(child, Some(id), has_version, scopes)?;
        scopes[id.0].children.push(child);
    }

    Ok(id)
}

fn is_valid_word(word: &str) -> bool {
    !word.is_empty()
        && !word.starts_with('-')
        && !word.contains('=')
        && !word.chars().any(char::is_whitespace)
}

fn is_reserved(key: &OptionKey, has_version: bool) -> bool {
    match key {
        OptionKey::Short(c) => *c == 'h' || (has_version && *c == 'V'),
        OptionKey::Long(name) => name == "help" || (has_version && name == "version"),
    }
}

fn register_options(
    path: &str,
    options: &[OptionSpec],
    has_version: bool,
) -> Result<HashMap<OptionKey, Slot>, BuildError> {
    let mut keys = HashMap::new();

    for (index, option) in options.iter().enumerate() {
        let unnamed_negation = option.negation.as_ref().is_some_and(|names| names.is_empty());
        if option.names.is_empty() || unnamed_negation {
            return Err(BuildError::MissingIdentity { scope: path.to_string() });
        }
        option.check()?;

        for (key, negated) in option.keys() {
            let valid = match &key {
                OptionKey::Short(c) => *c != '-' && *c != '=' && !c.is_whitespace(),
                OptionKey::Long(name) => is_valid_word(name),
            };
            if !valid {
                return Err(BuildError::InvalidName {
                    scope: path.to_string(),
                    name: key.to_string(),
                });
            }
            if is_reserved(&key, has_version) {
                return Err(BuildError::ReservedKey { scope: path.to_string(), key });
            }
            if keys.contains_key(&key) {
                return Err(BuildError::DuplicateKey { scope: path.to_string(), key });
            }
            keys.insert(key, Slot { index, negated });
        }
    }

    for option in options {
        if let Some(Delimiter::Option(delimiter)) = &option.delimiter {
            let is_char_option = keys.get(delimiter).is_some_and(|slot| {
                let target = &options[slot.index];
                !slot.negated
                    && target.kind == OptionKind::Valued(ValueType::Char)
                    && target.multiplicity == Multiplicity::Single
            });
            if !is_char_option {
                return Err(BuildError::InvalidDelimiterOption {
                    option: option.names.to_string(),
                    delimiter: delimiter.clone(),
                });
            }
        }
    }

    Ok(keys)
}

fn check_positionals(path: &str, positionals: &[PositionalSpec]) -> Result<(), BuildError> {
    let mut names = HashSet::new();
    let mut variadic: Option<&str> = None;

    for positional in positionals {
        if !is_valid_word(&positional.name) {
            return Err(BuildError::InvalidName {
                scope: path.to_string(),
                name: positional.name.clone(),
            });
        }
        if !names.insert(positional.name.as_str()) {
            return Err(BuildError::DuplicatePositional {
                scope: path.to_string(),
                name: positional.name.clone(),
            });
        }
        if let Some(name) = variadic {
            return Err(if positional.variadic {
                BuildError::MultipleVariadic { scope: path.to_string() }
            } else {
                BuildError::VariadicNotLast { scope: path.to_string(), name: name.to_string() }
            });
        }
        if positional.variadic {
            variadic = Some(positional.name.as_str());
        } else if positional.default.len() > 1 {
            return Err(BuildError::MultipleDefaults { name: positional.name.clone() });
        }
        if positional.required && !positional.default.is_empty() {
            return Err(BuildError::RequiredWithDefault { name: positional.name.clone() });
        }
    }

    Ok(())
}

/// A frozen command tree, ready to parse any number of argument lists.
#[derive(Debug)]
pub struct Parser {
    pub(crate) scopes: Vec<Scope>,
    pub(crate) version: Option<String>,
    pub(crate) builtin_heading: Option<String>,
    pub(crate) layout: HelpLayout,
}

impl Parser {
    /// Parse `args`, which exclude the program name.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> ParseOutcome {
        Binder::new(self).run(args)
    }

    /// The root command.
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// The command reached by following subcommand names from the root.
    ///
    /// An empty path is the root.
    pub fn find_scope(&self, path: &[&str]) -> Option<ScopeId> {
        path.iter().try_fold(self.root(), |id, name| self.child(id, name))
    }

    /// The help text of the root command.
    pub fn usage(&self) -> String {
        self.usage_for(self.root())
    }

    /// The help text of any command.
    pub fn usage_for(&self, scope: ScopeId) -> String {
        crate::help::render(self, scope, false)
    }

    /// The configured version string.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub(crate) fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub(crate) fn child(&self, id: ScopeId, name: &str) -> Option<ScopeId> {
        self.scope(id).children.iter().copied().find(|child| self.scope(*child).name == name)
    }

    /// The command other than `active` declaring `key`: the nearest
    /// ancestor, else the first in declaration order.
    pub(crate) fn owner_of(&self, key: &OptionKey, active: ScopeId) -> Option<ScopeId> {
        let declares = |id: &ScopeId| self.scope(*id).keys.contains_key(key);

        let mut ancestor = self.scope(active).parent;
        while let Some(id) = ancestor {
            if declares(&id) {
                return Some(id);
            }
            ancestor = self.scope(id).parent;
        }

        (0..self.scopes.len()).map(ScopeId).find(|id| *id != active && declares(id))
    }

    pub(crate) fn is_help(&self, key: &OptionKey) -> bool {
        is_reserved(key, false)
    }

    pub(crate) fn is_version(&self, key: &OptionKey) -> bool {
        self.version.is_some() && is_reserved(key, true) && !self.is_help(key)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn build_error(command: Command) -> String {
        command.build().unwrap_err().to_string()
    }

    #[test]
    fn arena_links_parents_and_children() {
        let parser = Command::new("tool")
            .subcommand(Command::new("remote").subcommand(Command::new("add")))
            .subcommand(Command::new("status"))
            .build()
            .unwrap();

        let add = parser.find_scope(&["remote", "add"]).unwrap();
        assert_eq!(parser.scope(add).path, "tool remote add");
        let remote = parser.scope(add).parent.unwrap();
        assert_eq!(parser.scope(remote).name, "remote");
        assert_eq!(parser.scope(remote).parent, Some(parser.root()));
        assert!(parser.find_scope(&["status"]).is_some());
        assert!(parser.find_scope(&["add"]).is_none());
        assert_eq!(parser.find_scope(&[]), Some(parser.root()));
    }

    #[test]
    fn owner_prefers_nearest_ancestor() {
        let parser = Command::new("tool")
            .subcommand(
                Command::new("x")
                    .subcommand(Command::new("x1").option(OptionSpec::flag("force"))),
            )
            .subcommand(
                Command::new("y")
                    .option(OptionSpec::flag("force"))
                    .subcommand(Command::new("y1")),
            )
            .build()
            .unwrap();

        let force = OptionKey::from("force");
        let y = parser.find_scope(&["y"]).unwrap();
        let y1 = parser.find_scope(&["y", "y1"]).unwrap();
        let x1 = parser.find_scope(&["x", "x1"]).unwrap();
        assert_eq!(parser.owner_of(&force, y1), Some(y));
        assert_eq!(parser.owner_of(&force, parser.root()), Some(x1));
        assert_eq!(parser.owner_of(&force, y), Some(x1));
        assert_eq!(parser.owner_of(&OptionKey::from("nope"), y1), None);
    }

    #[test]
    fn rejects_duplicate_keys() {
        assert_eq!(
            build_error(
                Command::new("tool")
                    .option(OptionSpec::flag(('v', "verbose")))
                    .option(OptionSpec::count('v'))
            ),
            "Option '-v' is declared more than once in 'tool'."
        );
        assert_eq!(
            build_error(
                Command::new("tool")
                    .option(OptionSpec::toggle("color", "no-color"))
                    .option(OptionSpec::flag("no-color"))
            ),
            "Option '--no-color' is declared more than once in 'tool'."
        );
    }

    #[test]
    fn short_and_long_keys_do_not_collide() {
        assert!(
            Command::new("tool")
                .option(OptionSpec::flag('x'))
                .option(OptionSpec::flag("x"))
                .build()
                .is_ok()
        );
    }

    #[test]
    fn rejects_reserved_keys() {
        assert_eq!(
            build_error(Command::new("tool").option(OptionSpec::flag('h'))),
            "Option '-h' in 'tool' is reserved."
        );
        assert!(Command::new("tool").option(OptionSpec::flag('V')).build().is_ok());
        assert_eq!(
            build_error(
                Command::new("tool")
                    .version("1.0")
                    .subcommand(Command::new("run").option(OptionSpec::flag("version")))
            ),
            "Option '--version' in 'tool run' is reserved."
        );
    }

    #[test]
    fn rejects_bad_positional_layouts() {
        assert_eq!(
            build_error(
                Command::new("cp")
                    .positional(PositionalSpec::variadic("sources"))
                    .positional(PositionalSpec::new("dest"))
            ),
            "Variadic positional 'sources' of 'cp' must be declared last."
        );
        assert_eq!(
            build_error(
                Command::new("cp")
                    .positional(PositionalSpec::variadic("a"))
                    .positional(PositionalSpec::variadic("b"))
            ),
            "'cp' declares more than one variadic positional."
        );
        assert_eq!(
            build_error(
                Command::new("cp")
                    .positional(PositionalSpec::new("a"))
                    .positional(PositionalSpec::new("a"))
            ),
            "Positional 'a' is declared more than once in 'cp'."
        );
        assert!(
            Command::new("cp")
                .positional(PositionalSpec::new("a").defaults(["x", "y"]))
                .build()
                .is_err()
        );
    }

    #[test]
    fn rejects_duplicate_subcommands() {
        assert_eq!(
            build_error(
                Command::new("git").subcommand(Command::new("log")).subcommand(Command::new("log"))
            ),
            "Subcommand 'log' is declared more than once in 'git'."
        );
    }

    #[test]
    fn rejects_missing_identity() {
        let names = crate::Names::default();
        assert_eq!(
            build_error(Command::new("tool").option(OptionSpec::flag(names))),
            "An option of 'tool' has neither a short nor a long name."
        );
    }

    #[test]
    fn delimiter_option_must_be_a_char_option() {
        let include = || OptionSpec::string('I').repeated().delimiter_from('d');
        assert!(
            Command::new("cc")
                .option(include())
                .option(OptionSpec::character('d').default(','))
                .build()
                .is_ok()
        );
        assert_eq!(
            build_error(Command::new("cc").option(include()).option(OptionSpec::string('d'))),
            "Delimiter '-d' of option '-I' is not a char option of the same command."
        );
        assert!(Command::new("cc").option(include()).build().is_err());
    }

    #[test]
    fn rejects_invalid_names() {
        assert!(Command::new("tool").option(OptionSpec::flag("a b")).build().is_err());
        assert!(Command::new("tool").option(OptionSpec::flag('-')).build().is_err());
        assert!(Command::new("tool").subcommand(Command::new("-x")).build().is_err());
        assert!(Command::new("tool").positional(PositionalSpec::new("")).build().is_err());
    }
}
