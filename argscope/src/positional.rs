// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

/// The declaration of one positional argument.
///
/// Positionals are filled in the order they are added to a command. A
/// variadic positional must come last and takes every remaining argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionalSpec {
    pub(crate) name: String,
    pub(crate) help: String,
    pub(crate) required: bool,
    pub(crate) variadic: bool,
    pub(crate) default: Vec<String>,
}

impl PositionalSpec {
    /// A required positional taking a single argument.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: String::new(),
            required: true,
            variadic: false,
            default: Vec::new(),
        }
    }

    /// A positional taking every remaining argument. It may be empty unless
    /// marked [`required`](Self::required).
    pub fn variadic(name: impl Into<String>) -> Self {
        Self { required: false, variadic: true, ..Self::new(name) }
    }

    /// The positional may be left out.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// The positional must be given at least once.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value used when the positional is absent. Implies [`optional`](Self::optional).
    pub fn default(self, value: impl Into<String>) -> Self {
        self.defaults([value])
    }

    /// Values used when a variadic positional is absent.
    pub fn defaults<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default = values.into_iter().map(Into::into).collect();
        self.required = false;
        self
    }

    /// Help text.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this positional takes every remaining argument.
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }
}
