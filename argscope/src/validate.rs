// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    error::ParseError,
    result::ParseResult,
    scope::{Parser, ScopeId},
};

/// Report the first required option, from the root down, or required
/// positional of the active command that was not given.
pub(crate) fn check(
    parser: &Parser,
    chain: &[ScopeId],
    result: &ParseResult,
) -> Result<(), ParseError> {
    for (id, matches) in chain.iter().zip(&result.scopes) {
        let scope = parser.scope(*id);
        for (spec, bound) in scope.options.iter().zip(&matches.options) {
            if spec.required && !bound.explicit {
                return Err(ParseError::MissingRequiredOption { option: spec.names.to_string() });
            }
        }
    }

    let (Some(active), Some(matches)) = (chain.last(), result.scopes.last()) else {
        return Ok(());
    };
    let scope = parser.scope(*active);
    for (spec, bound) in scope.positionals.iter().zip(&matches.positionals) {
        if spec.required && bound.values.is_empty() {
            return Err(ParseError::MissingRequiredPositional { name: spec.name.clone() });
        }
    }

    Ok(())
}
