// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    error::BuildError,
    key::{Names, OptionKey},
    value::{Value, ValueType},
};

/// What happens when an option occurs more than once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Multiplicity {
    /// The last occurrence wins.
    Single,
    /// Occurrences are counted.
    Counting,
    /// Every occurrence is kept, in order.
    Accumulating,
}

/// Whether an option carries a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OptionKind {
    /// Presence alone carries the information.
    Flag,
    /// The option takes a value of the given type.
    Valued(ValueType),
}

/// How the text of an accumulating option is split into items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delimiter {
    /// Split on a fixed character.
    Char(char),
    /// Split on the value of another `char` option of the same command,
    /// as bound once every argument has been read.
    Option(OptionKey),
}

/// The declaration of one flag or valued option.
///
/// ```rust
/// use argscope::OptionSpec;
///
/// let jobs = OptionSpec::int(('j', "jobs"))
///     .help("number of parallel jobs")
///     .value_name("num")
///     .default(4);
/// let include = OptionSpec::string('I').repeated().delimiter(',');
/// let signoff = OptionSpec::toggle(('s', "signoff"), "no-signoff");
/// # let _ = (jobs, include, signoff);
/// ```
#[derive(Clone, Debug)]
pub struct OptionSpec {
    pub(crate) names: Names,
    pub(crate) negation: Option<Names>,
    pub(crate) negation_help: String,
    pub(crate) kind: OptionKind,
    pub(crate) multiplicity: Multiplicity,
    pub(crate) required: bool,
    pub(crate) default: Option<Value>,
    pub(crate) delimiter: Option<Delimiter>,
    pub(crate) help: String,
    pub(crate) value_name: Option<String>,
    pub(crate) heading: Option<String>,
    pub(crate) hidden: bool,
}

impl OptionSpec {
    fn new(names: Names, kind: OptionKind, multiplicity: Multiplicity) -> Self {
        Self {
            names,
            negation: None,
            negation_help: String::new(),
            kind,
            multiplicity,
            required: false,
            default: None,
            delimiter: None,
            help: String::new(),
            value_name: None,
            heading: None,
            hidden: false,
        }
    }

    /// A boolean flag, `true` when given.
    pub fn flag(names: impl Into<Names>) -> Self {
        Self::new(names.into(), OptionKind::Flag, Multiplicity::Single)
    }

    /// A flag whose occurrences are counted, like `-vvv`.
    pub fn count(names: impl Into<Names>) -> Self {
        Self::new(names.into(), OptionKind::Flag, Multiplicity::Counting)
    }

    /// A boolean flag with a second identity that turns it off again.
    ///
    /// Both identities write the same value; the last occurrence wins.
    pub fn toggle(on: impl Into<Names>, off: impl Into<Names>) -> Self {
        Self::flag(on).negation(off)
    }

    /// An option taking a value of type `ty`.
    pub fn value(names: impl Into<Names>, ty: ValueType) -> Self {
        Self::new(names.into(), OptionKind::Valued(ty), Multiplicity::Single)
    }

    /// An option taking an integer.
    pub fn int(names: impl Into<Names>) -> Self {
        Self::value(names, ValueType::Int)
    }

    /// An option taking a float.
    pub fn double(names: impl Into<Names>) -> Self {
        Self::value(names, ValueType::Double)
    }

    /// An option taking any text.
    pub fn string(names: impl Into<Names>) -> Self {
        Self::value(names, ValueType::Str)
    }

    /// An option taking a boolean literal.
    pub fn boolean(names: impl Into<Names>) -> Self {
        Self::value(names, ValueType::Bool)
    }

    /// An option taking a single character.
    pub fn character(names: impl Into<Names>) -> Self {
        Self::value(names, ValueType::Char)
    }

    /// Give a flag an identity which writes `false` instead of `true`.
    pub fn negation(mut self, names: impl Into<Names>) -> Self {
        self.negation = Some(names.into());
        self
    }

    /// Help text.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Help text for the negating identity of a toggle.
    pub fn negation_help(mut self, help: impl Into<String>) -> Self {
        self.negation_help = help.into();
        self
    }

    /// The option must be given.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value used when the option is absent.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Keep every occurrence instead of only the last one.
    pub fn repeated(mut self) -> Self {
        self.multiplicity = Multiplicity::Accumulating;
        self
    }

    /// Split each occurrence of a repeated option on `delimiter`.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(Delimiter::Char(delimiter));
        self
    }

    /// Split each occurrence of a repeated option on the value of the `char`
    /// option `key`.
    pub fn delimiter_from(mut self, key: impl Into<OptionKey>) -> Self {
        self.delimiter = Some(Delimiter::Option(key.into()));
        self
    }

    /// Name shown for the value in help, like `<num>`.
    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.value_name = Some(name.into());
        self
    }

    /// Help section this option is listed under.
    pub fn heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Leave the option out of help text.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// The short and long identities.
    pub fn names(&self) -> &Names {
        &self.names
    }

    /// The kind of option.
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// The repetition policy.
    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    pub(crate) fn is_flag(&self) -> bool {
        self.kind == OptionKind::Flag
    }

    /// Every key this option answers to, paired with whether it negates.
    pub(crate) fn keys(&self) -> impl Iterator<Item = (OptionKey, bool)> + '_ {
        self.names
            .keys()
            .map(|key| (key, false))
            .chain(self.negation.iter().flat_map(|names| names.keys().map(|key| (key, true))))
    }

    /// The name shown for the value in help.
    pub(crate) fn arg_name(&self) -> Option<&str> {
        match self.kind {
            OptionKind::Flag => None,
            OptionKind::Valued(ty) => Some(self.value_name.as_deref().unwrap_or(ty.name())),
        }
    }

    /// Checks that only involve this option.
    pub(crate) fn check(&self) -> Result<(), BuildError> {
        let option = self.names.to_string();

        if self.is_flag() {
            if self.multiplicity == Multiplicity::Accumulating {
                return Err(BuildError::Unsupported { option, feature: "repetition" });
            }
            if self.required {
                return Err(BuildError::Unsupported { option, feature: "required" });
            }
        } else {
            if self.multiplicity == Multiplicity::Counting {
                return Err(BuildError::Unsupported { option, feature: "counting" });
            }
            if self.negation.is_some() {
                return Err(BuildError::Unsupported { option, feature: "negation" });
            }
        }

        if self.negation.is_some() && self.multiplicity != Multiplicity::Single {
            return Err(BuildError::Unsupported { option, feature: "negation" });
        }

        if self.required && self.default.is_some() {
            return Err(BuildError::RequiredWithDefault { name: option });
        }

        if let Some(default) = &self.default {
            let expected = match (self.kind, self.multiplicity) {
                (OptionKind::Flag, Multiplicity::Counting) => ValueType::Int,
                (OptionKind::Flag, _) => ValueType::Bool,
                (OptionKind::Valued(ty), _) => ty,
            };
            let negative_count = self.multiplicity == Multiplicity::Counting
                && matches!(default, Value::Int(count) if u32::try_from(*count).is_err());
            if default.value_type() != expected || negative_count {
                return Err(BuildError::DefaultTypeMismatch {
                    option,
                    expected: expected.name(),
                    found: default.to_string(),
                });
            }
        }

        if self.delimiter.is_some() && self.multiplicity != Multiplicity::Accumulating {
            return Err(BuildError::DelimiterNotRepeated { option });
        }

        Ok(())
    }
}
