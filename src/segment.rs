// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use crate::error::{Error, Result};

/// Prefix of every option (and of the long option prefix).
pub const OPT_PREFIX: char = '-';

/// Prefix of a long option (`--verbose`).
pub const LONG_OPT_PREFIX: &str = "--";

/// Split `tokens` into groups, starting a new group at every token for which
/// `is_separator` returns `true`.
///
/// If `include_separator` is set, the separator token becomes the first
/// token of the group it opens, otherwise it is dropped.
///
/// # Notes
///
/// - At least one group is always returned (for empty input, that group is
///   empty).
/// - Tokens are never dropped (other than excluded separators) or
///   reordered.
pub fn split<P>(tokens: &[String], is_separator: P, include_separator: bool) -> Vec<Vec<String>>
where
    P: Fn(&str) -> bool,
{
    let mut groups: Vec<Vec<String>> = vec![Vec::new()];

    for token in tokens {
        if is_separator(token) {
            let group = if include_separator {
                vec![token.clone()]
            } else {
                Vec::new()
            };

            groups.push(group);
        } else if let Some(current) = groups.last_mut() {
            current.push(token.clone());
        }
    }

    groups
}

/// Returns `true` if the token looks like an option (`-x` or `--name`).
pub fn is_flag(token: &str) -> bool {
    token.starts_with(OPT_PREFIX)
}

/// Returns the option name for a flag token with its prefix removed.
pub fn flag_name(token: &str) -> Result<&str> {
    let name = token
        .strip_prefix(LONG_OPT_PREFIX)
        .or_else(|| token.strip_prefix(OPT_PREFIX))
        .unwrap_or(token);

    if name.is_empty() {
        return Err(Error::InvalidOptions(format!(
            "missing option name in {:?}",
            token
        )));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    // Re-join groups, putting back any separators that were excluded.
    fn rejoin(groups: &[Vec<String>], separator: &str, include_separator: bool) -> Vec<String> {
        let mut tokens = Vec::<String>::new();

        for (i, group) in groups.iter().enumerate() {
            if i > 0 && !include_separator {
                tokens.push(separator.into());
            }

            tokens.extend(group.iter().cloned());
        }

        tokens
    }

    #[test]
    fn test_split() {
        #[derive(Debug)]
        struct TestData<'a> {
            tokens: Vec<&'a str>,
            include_separator: bool,
            groups: Vec<Vec<&'a str>>,
        }

        let tests = &[
            TestData {
                tokens: vec![],
                include_separator: false,
                groups: vec![vec![]],
            },
            TestData {
                tokens: vec![],
                include_separator: true,
                groups: vec![vec![]],
            },
            TestData {
                tokens: vec!["build"],
                include_separator: false,
                groups: vec![vec!["build"]],
            },
            TestData {
                tokens: vec!["build", "--fast", "+", "deploy", "target"],
                include_separator: false,
                groups: vec![vec!["build", "--fast"], vec!["deploy", "target"]],
            },
            TestData {
                tokens: vec!["build", "--fast", "+", "deploy", "target"],
                include_separator: true,
                groups: vec![vec!["build", "--fast"], vec!["+", "deploy", "target"]],
            },
            TestData {
                tokens: vec!["+"],
                include_separator: false,
                groups: vec![vec![], vec![]],
            },
            TestData {
                tokens: vec!["+", "+", "a"],
                include_separator: false,
                groups: vec![vec![], vec![], vec!["a"]],
            },
            TestData {
                tokens: vec!["a", "+"],
                include_separator: true,
                groups: vec![vec!["a"], vec!["+"]],
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let tokens = to_strings(&d.tokens);

            let groups = split(&tokens, |t| t == "+", d.include_separator);

            let expected: Vec<Vec<String>> = d.groups.iter().map(|g| to_strings(g)).collect();

            assert_eq!(groups, expected, "{}", msg);

            // Whatever the grouping, no token is lost or reordered.
            let joined = rejoin(&groups, "+", d.include_separator);
            assert_eq!(joined, tokens, "{}", msg);
        }
    }

    #[test]
    fn test_split_on_flags() {
        let tokens = to_strings(&["a", "b", "--db", "host", "5", "-v", "x", "--fast"]);

        let groups = split(&tokens, is_flag, true);

        assert_eq!(
            groups,
            vec![
                to_strings(&["a", "b"]),
                to_strings(&["--db", "host", "5"]),
                to_strings(&["-v", "x"]),
                to_strings(&["--fast"]),
            ]
        );

        // Flag first means the leading plain-value run is empty.
        let tokens = to_strings(&["--verbose", "x"]);
        let groups = split(&tokens, is_flag, true);

        assert_eq!(groups, vec![vec![], to_strings(&["--verbose", "x"])]);
    }

    #[test]
    fn test_is_flag() {
        assert!(is_flag("-v"));
        assert!(is_flag("--verbose"));
        assert!(is_flag("-"));
        assert!(is_flag("--"));
        assert!(is_flag("-5"));

        assert!(!is_flag(""));
        assert!(!is_flag("v"));
        assert!(!is_flag("a-b"));
        assert!(!is_flag("+"));
    }

    #[test]
    fn test_flag_name() {
        #[derive(Debug)]
        struct TestData<'a> {
            token: &'a str,
            result: Result<&'a str>,
        }

        let tests = &[
            TestData {
                token: "-v",
                result: Ok("v"),
            },
            TestData {
                token: "--verbose",
                result: Ok("verbose"),
            },
            TestData {
                token: "--dry-run",
                result: Ok("dry-run"),
            },
            TestData {
                token: "---x",
                result: Ok("-x"),
            },
            TestData {
                token: "plain",
                result: Ok("plain"),
            },
            TestData {
                token: "-",
                result: Err(Error::InvalidOptions(
                    "missing option name in \"-\"".into(),
                )),
            },
            TestData {
                token: "--",
                result: Err(Error::InvalidOptions(
                    "missing option name in \"--\"".into(),
                )),
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(flag_name(d.token), d.result, "{}", msg);
        }
    }
}
