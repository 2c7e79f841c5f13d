// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Classifies raw arguments by shape. Whether a name is declared is decided
//! later, against the active command.

/// One classified argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// `--name` or `--name=value`.
    Long { name: &'a str, value: Option<&'a str> },
    /// `-abc`, without the leading dash.
    Short(&'a str),
    /// Anything else, including a lone `-` and everything after `--`.
    Positional(&'a str),
    /// The first `--`.
    EndOfOptions,
}

pub(crate) struct Scanner<'a, S> {
    args: &'a [S],
    position: usize,
    options_ended: bool,
}

impl<'a, S: AsRef<str>> Scanner<'a, S> {
    pub(crate) fn new(args: &'a [S]) -> Self {
        Self { args, position: 0, options_ended: false }
    }

    /// Take the next argument verbatim, whatever its shape, as the value of
    /// the option just read.
    pub(crate) fn next_value(&mut self) -> Option<&'a str> {
        let arg = self.args.get(self.position)?;
        self.position += 1;
        Some(arg.as_ref())
    }

    /// How many arguments have been consumed.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// `--` has been seen; everything since is positional.
    pub(crate) fn options_ended(&self) -> bool {
        self.options_ended
    }
}

impl<'a, S: AsRef<str>> Iterator for Scanner<'a, S> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let arg = self.next_value()?;

        if self.options_ended {
            return Some(Token::Positional(arg));
        }

        if arg == "--" {
            self.options_ended = true;
            return Some(Token::EndOfOptions);
        }

        if let Some(long) = arg.strip_prefix("--") {
            let token = match long.split_once('=') {
                Some((name, value)) => Token::Long { name, value: Some(value) },
                None => Token::Long { name: long, value: None },
            };
            return Some(token);
        }

        match arg.strip_prefix('-') {
            Some(cluster) if !cluster.is_empty() => Some(Token::Short(cluster)),
            _ => Some(Token::Positional(arg)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scan<'a>(args: &'a [&'a str]) -> Vec<Token<'a>> {
        Scanner::new(args).collect()
    }

    #[test]
    fn classifies_shapes() {
        assert_eq!(
            scan(&["--count=15", "--verbose", "-12v", "-", "file"]),
            vec![
                Token::Long { name: "count", value: Some("15") },
                Token::Long { name: "verbose", value: None },
                Token::Short("12v"),
                Token::Positional("-"),
                Token::Positional("file"),
            ]
        );
    }

    #[test]
    fn double_dash_freezes_the_rest() {
        assert_eq!(
            scan(&["-a", "--", "-b", "--c", "--"]),
            vec![
                Token::Short("a"),
                Token::EndOfOptions,
                Token::Positional("-b"),
                Token::Positional("--c"),
                Token::Positional("--"),
            ]
        );
    }

    #[test]
    fn value_is_taken_verbatim() {
        let args = ["-n", "--", "-h"];
        let mut scanner = Scanner::new(&args);
        assert_eq!(scanner.next(), Some(Token::Short("n")));
        assert_eq!(scanner.position(), 1);
        assert_eq!(scanner.next_value(), Some("--"));
        assert_eq!(scanner.position(), 2);
        assert!(!scanner.options_ended());
        assert_eq!(scanner.next(), Some(Token::Short("h")));
        assert_eq!(scanner.next_value(), None);
    }

    #[test]
    fn value_split_at_first_equals() {
        assert_eq!(
            scan(&["--define=a=b"]),
            vec![Token::Long { name: "define", value: Some("a=b") }]
        );
    }
}
