// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Binds classified arguments to the declarations of the active command.

use log::{debug, trace};
use rust_fuzzy_search::fuzzy_compare;

use crate::{
    ParseOutcome,
    error::ParseError,
    help,
    key::OptionKey,
    option::{Delimiter, Multiplicity, OptionKind, OptionSpec},
    result::{Binding, BoundOption, BoundPositional, Matches, ParseResult},
    scope::{Parser, Scope, ScopeId, Slot},
    token::{Scanner, Token},
    validate,
    value::Value,
};

/// Similarity an unknown option needs to a declared one to be suggested.
const SUGGESTION_THRESHOLD: f32 = 0.5;

/// What has been seen for one option so far.
#[derive(Clone, Debug, PartialEq)]
enum Seen {
    Nothing,
    Flag(bool),
    Count(u32),
    Value(Value),
    /// Raw texts of a repeated option with the position of the argument
    /// each came from, split and coerced once all arguments have been read.
    Texts(Vec<(usize, String)>),
}

/// An error and the position of the argument that caused it.
type Located = (usize, ParseError);

/// Bindings of one command of the selected chain.
struct Frame {
    scope: ScopeId,
    options: Vec<Seen>,
    positionals: Vec<Vec<String>>,
    next_positional: usize,
}

impl Frame {
    fn new(id: ScopeId, scope: &Scope) -> Self {
        Self {
            scope: id,
            options: vec![Seen::Nothing; scope.options.len()],
            positionals: vec![Vec::new(); scope.positionals.len()],
            next_positional: 0,
        }
    }
}

pub(crate) struct Binder<'p> {
    parser: &'p Parser,
    frames: Vec<Frame>,
    /// The active command may still switch to a subcommand.
    dispatch_open: bool,
    /// Position of the argument being bound.
    position: usize,
    styled: bool,
    help: bool,
    version: bool,
    error: Option<Located>,
    rest: Vec<String>,
}

impl<'p> Binder<'p> {
    pub(crate) fn new(parser: &'p Parser) -> Self {
        let root = parser.root();
        let scope = parser.scope(root);
        Self {
            parser,
            frames: vec![Frame::new(root, scope)],
            dispatch_open: !scope.children.is_empty(),
            position: 0,
            styled: false,
            help: false,
            version: false,
            error: None,
            rest: Vec::new(),
        }
    }

    /// Render help with terminal styling.
    pub(crate) fn styled(mut self) -> Self {
        self.styled = true;
        self
    }

    fn active(&self) -> ScopeId {
        self.frames[self.frames.len() - 1].scope
    }

    fn frame(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Keep the first error only.
    fn fail(&mut self, error: ParseError) {
        debug!("{}", error);
        if self.error.is_none() {
            self.error = Some((self.position, error));
        }
    }

    pub(crate) fn run<S: AsRef<str>>(mut self, args: &[S]) -> ParseOutcome {
        let mut scanner = Scanner::new(args);
        while let Some(token) = scanner.next() {
            self.position = scanner.position();
            trace!("{:?}", token);
            match token {
                Token::EndOfOptions => {}
                Token::Long { name, value } => self.long(name, value, &mut scanner),
                Token::Short(cluster) => self.short(cluster, &mut scanner),
                Token::Positional(text) => self.positional(text, scanner.options_ended()),
            }
        }

        let parser = self.parser;
        if self.help {
            debug!("help requested for '{}'", parser.scope(self.active()).path);
            return ParseOutcome::Help(help::render(parser, self.active(), self.styled));
        }
        if self.version {
            return ParseOutcome::Version(parser.version.clone().unwrap_or_default());
        }

        let chain: Vec<ScopeId> = self.frames.iter().map(|frame| frame.scope).collect();
        let scan_error = self.error.take();
        // Repeated options are coerced only now, so their errors are ordered
        // against the scan's by argument position.
        let result = match (scan_error, self.finish()) {
            (Some((at, error)), Err((coerced_at, coerce_error))) => {
                Err(if coerced_at < at { coerce_error } else { error })
            }
            (Some((_, error)), Ok(_)) | (None, Err((_, error))) => Err(error),
            (None, Ok(result)) => validate::check(parser, &chain, &result).map(|()| result),
        };
        match result {
            Ok(result) => ParseOutcome::Success(result),
            Err(error) => ParseOutcome::Failure(error),
        }
    }

    /// Handle the reserved keys. Returns whether `key` was one.
    fn builtin(&mut self, key: &OptionKey) -> bool {
        if self.parser.is_help(key) {
            self.help = true;
        } else if self.parser.is_version(key) {
            self.version = true;
        } else {
            return false;
        }
        true
    }

    fn long<S: AsRef<str>>(
        &mut self,
        name: &str,
        value: Option<&str>,
        scanner: &mut Scanner<'_, S>,
    ) {
        let key = OptionKey::Long(name.to_string());
        if self.builtin(&key) {
            return;
        }
        let Some(slot) = self.resolve(&key) else { return };

        let spec = self.spec(slot);
        match spec.kind {
            OptionKind::Flag => match value {
                Some(_) => self.fail(ParseError::UnexpectedValue { option: key.to_string() }),
                None => self.set_flag(slot),
            },
            OptionKind::Valued(_) => match value.or_else(|| scanner.next_value()) {
                Some(text) => self.set_value(slot, text),
                None => self.fail(ParseError::MissingOptionValue { option: key.to_string() }),
            },
        }
    }

    fn short<S: AsRef<str>>(&mut self, cluster: &str, scanner: &mut Scanner<'_, S>) {
        for (offset, c) in cluster.char_indices() {
            let key = OptionKey::Short(c);
            if self.builtin(&key) {
                continue;
            }
            let Some(slot) = self.resolve(&key) else { continue };

            if self.spec(slot).is_flag() {
                self.set_flag(slot);
                continue;
            }

            // A valued option takes the rest of the cluster, or the next argument.
            let rest = &cluster[offset + c.len_utf8()..];
            let text = if rest.is_empty() { scanner.next_value() } else { Some(rest) };
            match text {
                Some(text) => self.set_value(slot, text),
                None => self.fail(ParseError::MissingOptionValue { option: key.to_string() }),
            }
            return;
        }
    }

    fn spec(&self, slot: Slot) -> &'p OptionSpec {
        &self.parser.scope(self.active()).options[slot.index]
    }

    fn resolve(&mut self, key: &OptionKey) -> Option<Slot> {
        let parser = self.parser;
        let active = self.active();
        if let Some(slot) = parser.scope(active).keys.get(key) {
            return Some(*slot);
        }

        let error = match parser.owner_of(key, active) {
            Some(owner) => ParseError::ScopeMismatch {
                option: key.to_string(),
                scope: parser.scope(owner).path.clone(),
            },
            None => ParseError::UnknownIdentifier {
                option: key.to_string(),
                suggestion: suggest(parser, active, key),
            },
        };
        self.fail(error);
        None
    }

    fn set_flag(&mut self, slot: Slot) {
        let multiplicity = self.spec(slot).multiplicity;
        let seen = &mut self.frame().options[slot.index];
        *seen = match (multiplicity, &*seen) {
            (Multiplicity::Counting, Seen::Count(count)) => Seen::Count(count.saturating_add(1)),
            (Multiplicity::Counting, _) => Seen::Count(1),
            _ => Seen::Flag(!slot.negated),
        };
    }

    fn set_value(&mut self, slot: Slot, text: &str) {
        let spec = self.spec(slot);
        let OptionKind::Valued(ty) = spec.kind else { return };

        if spec.multiplicity == Multiplicity::Accumulating {
            let position = self.position;
            match &mut self.frame().options[slot.index] {
                Seen::Texts(texts) => texts.push((position, text.to_string())),
                seen => *seen = Seen::Texts(vec![(position, text.to_string())]),
            }
            return;
        }

        match Value::coerce(ty, text) {
            Some(value) => self.frame().options[slot.index] = Seen::Value(value),
            None => self.fail(ParseError::TypeCoercionFailure {
                option: spec.names.to_string(),
                expected: ty.name(),
                received: text.to_string(),
            }),
        }
    }

    fn positional(&mut self, text: &str, frozen: bool) {
        let parser = self.parser;
        let active = self.active();

        if self.dispatch_open {
            self.dispatch_open = false;
            if let Some(child) = parser.child(active, text).filter(|_| !frozen) {
                let scope = parser.scope(child);
                debug!("switching to subcommand '{}'", scope.path);
                self.frames.push(Frame::new(child, scope));
                self.dispatch_open = !scope.children.is_empty();
                return;
            }
        }

        let specs = &parser.scope(active).positionals;
        let frame = self.frame();
        match specs.get(frame.next_positional) {
            Some(spec) => {
                frame.positionals[frame.next_positional].push(text.to_string());
                if !spec.variadic {
                    frame.next_positional += 1;
                }
            }
            None => self.rest.push(text.to_string()),
        }
    }

    /// Apply defaults, split repeated options and build the result.
    ///
    /// Fails with the coercion error of the earliest argument.
    fn finish(self) -> Result<ParseResult, Located> {
        let parser = self.parser;
        let mut scopes = Vec::with_capacity(self.frames.len());
        let mut errors = Vec::new();

        for frame in &self.frames {
            let scope = parser.scope(frame.scope);
            let mut options = Vec::with_capacity(scope.options.len());
            for (spec, seen) in scope.options.iter().zip(&frame.options) {
                match bind_option(scope, frame, spec, seen) {
                    Ok(bound) => options.push(bound),
                    Err(error) => errors.push(error),
                }
            }

            let positionals = scope
                .positionals
                .iter()
                .zip(&frame.positionals)
                .map(|(spec, values)| BoundPositional {
                    name: spec.name.clone(),
                    values: if values.is_empty() { spec.default.clone() } else { values.clone() },
                })
                .collect();

            scopes.push(Matches { name: scope.name.clone(), options, positionals });
        }

        match errors.into_iter().min_by_key(|(position, _)| *position) {
            Some(error) => Err(error),
            None => Ok(ParseResult { scopes, rest: self.rest }),
        }
    }
}

fn bind_option(
    scope: &Scope,
    frame: &Frame,
    spec: &OptionSpec,
    seen: &Seen,
) -> Result<BoundOption, Located> {
    let binding = match seen {
        Seen::Flag(on) => Binding::Flag(*on),
        Seen::Count(count) => Binding::Count(*count),
        Seen::Value(value) => Binding::Value(value.clone()),
        Seen::Texts(texts) => Binding::List(split_and_coerce(scope, frame, spec, texts)?),
        Seen::Nothing => match (spec.kind, spec.multiplicity, &spec.default) {
            (OptionKind::Flag, Multiplicity::Counting, Some(Value::Int(count))) => {
                Binding::Count(u32::try_from(*count).unwrap_or_default())
            }
            (OptionKind::Flag, Multiplicity::Counting, _) => Binding::Count(0),
            (OptionKind::Flag, _, Some(Value::Bool(on))) => Binding::Flag(*on),
            (OptionKind::Flag, _, _) => Binding::Flag(false),
            (_, Multiplicity::Accumulating, Some(default)) => Binding::List(vec![default.clone()]),
            (_, _, Some(default)) => Binding::Value(default.clone()),
            (_, _, None) => Binding::Absent,
        },
    };

    Ok(BoundOption {
        names: spec.names.clone(),
        negation: spec.negation.clone(),
        binding,
        explicit: *seen != Seen::Nothing,
    })
}

fn split_and_coerce(
    scope: &Scope,
    frame: &Frame,
    spec: &OptionSpec,
    texts: &[(usize, String)],
) -> Result<Vec<Value>, Located> {
    let OptionKind::Valued(ty) = spec.kind else { return Ok(Vec::new()) };

    let delimiter = match &spec.delimiter {
        None => None,
        Some(Delimiter::Char(c)) => Some(*c),
        // The delimiter in force once every argument has been read.
        Some(Delimiter::Option(key)) => scope.keys.get(key).and_then(|slot| {
            match &frame.options[slot.index] {
                Seen::Value(Value::Char(c)) => Some(*c),
                _ => match scope.options[slot.index].default {
                    Some(Value::Char(c)) => Some(c),
                    _ => None,
                },
            }
        }),
    };
    trace!("splitting '{}' on {:?}", spec.names, delimiter);

    let items: Vec<(usize, &str)> = match delimiter {
        Some(delimiter) => texts
            .iter()
            .flat_map(|(position, text)| text.split(delimiter).map(|item| (*position, item)))
            .collect(),
        None => texts.iter().map(|(position, text)| (*position, text.as_str())).collect(),
    };

    items
        .into_iter()
        .map(|(position, item)| {
            Value::coerce(ty, item).ok_or_else(|| {
                let error = ParseError::TypeCoercionFailure {
                    option: spec.names.to_string(),
                    expected: ty.name(),
                    received: item.to_string(),
                };
                (position, error)
            })
        })
        .collect()
}

/// The declared key of the active command closest to `key`, if any is close.
fn suggest(parser: &Parser, active: ScopeId, key: &OptionKey) -> Option<String> {
    let typed = key.to_string();
    let mut candidates: Vec<String> =
        parser.scope(active).keys.keys().map(ToString::to_string).collect();
    candidates.sort();
    candidates.push("--help".to_string());
    if parser.version.is_some() {
        candidates.push("--version".to_string());
    }

    candidates
        .into_iter()
        .map(|candidate| (fuzzy_compare(&typed, &candidate), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .fold(None, |best: Option<(f32, String)>, (score, candidate)| match best {
            Some((best_score, _)) if best_score >= score => best,
            _ => Some((score, candidate)),
        })
        .map(|(_, candidate)| candidate)
}
