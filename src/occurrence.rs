//! The occurrence index: where the options are in the argument vector.

use std::fmt;

use crate::table::{Arity, OptionTable};
use crate::Error;

/// A recorded option token, by position in the argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Occurrence {
    pub(crate) index: usize,
    pub(crate) long: bool,
}

/// What an argument vector position was used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Claim {
    /// Not used by any option. A positional argument.
    Free,
    /// An option token.
    Option,
    /// Taken as the value of the option before it.
    Value,
}

/// Whether an optional option may not take `arg` as its value: a dash
/// followed by anything.
///
/// A lone `-` can still be a value, conventionally standing for stdin.
pub(crate) fn looks_like_option(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-')
}

/// Record every token that starts with a dash, in order.
pub(crate) fn index(args: &[String]) -> Vec<Occurrence> {
    args.iter()
        .enumerate()
        .filter(|(_, arg)| arg.starts_with('-'))
        .map(|(index, arg)| Occurrence {
            index,
            long: arg.starts_with("--"),
        })
        .collect()
}

/// Work out which positions the options will use, without failing.
///
/// This applies the same association rules as a forward scan, but options
/// that would make the scan fail just claim their own token. A scan stops
/// at such an option anyway, so anything after it only matters for
/// [`Scanner::positionals`][crate::Scanner::positionals].
pub(crate) fn claims(table: &OptionTable, args: &[String], occurrences: &[Occurrence]) -> Vec<Claim> {
    let mut claims = vec![Claim::Free; args.len()];
    for occ in occurrences {
        if claims[occ.index] == Claim::Value {
            continue;
        }
        claims[occ.index] = Claim::Option;
        let token = occ.split(&args[occ.index]);
        let arity = match token.resolve(table) {
            Ok((_, arity)) => arity,
            Err(_) => continue,
        };
        if let Ok(assoc) = associate(args, occ.index, &token, arity) {
            if assoc.consumed_next {
                claims[occ.index + 1] = Claim::Value;
            }
        }
    }
    claims
}

/// The option part of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flag<'a> {
    Short(char),
    Long(&'a str),
    /// A lone `-`, which names no option.
    Dash,
}

/// An option token split into its flag and embedded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) flag: Flag<'a>,
    /// Text after the letter (`-c47401`) or after `=` (`--name=Clany`).
    /// An empty embedded value counts as no value.
    pub(crate) embedded: Option<&'a str>,
}

impl Occurrence {
    /// Split the token this occurrence points at.
    ///
    /// `arg` must start with a dash.
    pub(crate) fn split(self, arg: &str) -> Token<'_> {
        fn non_empty(text: &str) -> Option<&str> {
            Some(text).filter(|text| !text.is_empty())
        }

        if self.long {
            let body = &arg[2..];
            match memchr::memchr(b'=', body.as_bytes()) {
                Some(ind) => Token {
                    flag: Flag::Long(&body[..ind]),
                    embedded: non_empty(&body[ind + 1..]),
                },
                None => Token {
                    flag: Flag::Long(body),
                    embedded: None,
                },
            }
        } else {
            let mut chars = arg[1..].chars();
            match chars.next() {
                Some(letter) => Token {
                    flag: Flag::Short(letter),
                    embedded: non_empty(chars.as_str()),
                },
                None => Token {
                    flag: Flag::Dash,
                    embedded: None,
                },
            }
        }
    }
}

impl Token<'_> {
    /// Look the flag up, returning its code and arity.
    pub(crate) fn resolve(&self, table: &OptionTable) -> Result<(char, Arity), Error> {
        let found = match self.flag {
            Flag::Short(letter) => table.short(letter).map(|arity| (letter, arity)),
            Flag::Long(name) => table.long(name).map(|long| (long.code, long.arity)),
            Flag::Dash => None,
        };
        found.ok_or_else(|| Error::UnknownOption(self.to_string()))
    }

    /// Whether a lookup name refers to this token's flag.
    pub(crate) fn matches(&self, name: &str) -> bool {
        match self.flag {
            Flag::Short(letter) => {
                let mut chars = name.chars();
                chars.next() == Some(letter) && chars.next().is_none()
            }
            Flag::Long(long) => long == name,
            Flag::Dash => false,
        }
    }
}

/// Formats the flag the way it was written, without any value.
impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flag {
            Flag::Short(letter) => write!(f, "-{}", letter),
            Flag::Long(name) => write!(f, "--{}", name),
            Flag::Dash => f.write_str("-"),
        }
    }
}

/// The value an occurrence ended up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Association {
    /// `None` is the empty marker.
    pub(crate) value: Option<String>,
    /// Whether the value is the token after the option.
    pub(crate) consumed_next: bool,
}

impl Association {
    const EMPTY: Association = Association {
        value: None,
        consumed_next: false,
    };
}

/// Find the value of the option at `index`.
///
/// An embedded value always wins. A required option takes the next token
/// whatever it looks like; an optional one only takes it if it is not
/// option-shaped.
pub(crate) fn associate(
    args: &[String],
    index: usize,
    token: &Token<'_>,
    arity: Arity,
) -> Result<Association, Error> {
    if arity == Arity::None {
        return match token.embedded {
            Some(value) => Err(Error::UnexpectedValue {
                option: token.to_string(),
                value: value.to_owned(),
            }),
            None => Ok(Association::EMPTY),
        };
    }

    if let Some(value) = token.embedded {
        return Ok(Association {
            value: Some(value.to_owned()),
            consumed_next: false,
        });
    }

    match args.get(index + 1) {
        Some(next) if arity == Arity::Required || !looks_like_option(next) => Ok(Association {
            value: Some(next.clone()),
            consumed_next: true,
        }),
        _ if arity == Arity::Required => Err(Error::MissingArgument {
            option: token.to_string(),
        }),
        _ => Ok(Association::EMPTY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::LongOption;

    fn args(text: &str) -> Vec<String> {
        text.split_ascii_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_index() {
        let argv = args("--name=Clany -a street -c47401 - pos --file x --");
        assert_eq!(
            index(&argv),
            vec![
                Occurrence { index: 0, long: true },
                Occurrence { index: 1, long: false },
                Occurrence { index: 3, long: false },
                Occurrence { index: 4, long: false },
                Occurrence { index: 6, long: true },
                Occurrence { index: 8, long: true },
            ]
        );
        assert_eq!(index(&[]), vec![]);
        assert_eq!(index(&args("a b c")), vec![]);
    }

    #[test]
    fn test_split() {
        let short = Occurrence { index: 0, long: false };
        let long = Occurrence { index: 0, long: true };

        let token = short.split("-c47401");
        assert_eq!(token.flag, Flag::Short('c'));
        assert_eq!(token.embedded, Some("47401"));
        assert_eq!(token.to_string(), "-c");

        let token = short.split("-µ10");
        assert_eq!(token.flag, Flag::Short('µ'));
        assert_eq!(token.embedded, Some("10"));

        assert_eq!(short.split("-p").embedded, None);

        let token = long.split("--name=Clany=Jr");
        assert_eq!(token.flag, Flag::Long("name"));
        assert_eq!(token.embedded, Some("Clany=Jr"));
        assert_eq!(token.to_string(), "--name");

        let token = long.split("--name=");
        assert_eq!(token.flag, Flag::Long("name"));
        assert_eq!(token.embedded, None);

        assert_eq!(long.split("--").flag, Flag::Long(""));

        let token = short.split("-");
        assert_eq!(token.flag, Flag::Dash);
        assert_eq!(token.embedded, None);
        assert_eq!(token.to_string(), "-");
        assert!(!token.matches("-"));
        assert!(!token.matches(""));
    }

    #[test]
    fn test_matches() {
        let short = Occurrence { index: 0, long: false };
        let long = Occurrence { index: 0, long: true };
        assert!(short.split("-c5").matches("c"));
        assert!(!short.split("-c5").matches("c5"));
        assert!(!short.split("-c5").matches(""));
        assert!(long.split("--name=x").matches("name"));
        assert!(!long.split("--name=x").matches("n"));
        assert!(!long.split("--name=x").matches("name=x"));
    }

    #[test]
    fn test_associate() -> Result<(), Error> {
        let args = args("-a -b value -c");
        let occs = index(&args);
        let tok = |n: usize| occs[n].split(&args[occs[n].index]);

        // Optional followed by an option takes nothing
        let assoc = associate(&args, 0, &tok(0), Arity::Optional)?;
        assert_eq!(assoc, Association::EMPTY);

        // Required takes the next token even if it is option-shaped
        let assoc = associate(&args, 0, &tok(0), Arity::Required)?;
        assert_eq!(assoc.value.as_deref(), Some("-b"));
        assert!(assoc.consumed_next);

        let assoc = associate(&args, 1, &tok(1), Arity::Optional)?;
        assert_eq!(assoc.value.as_deref(), Some("value"));
        assert!(assoc.consumed_next);

        assert_eq!(associate(&args, 3, &tok(2), Arity::Optional)?, Association::EMPTY);
        match associate(&args, 3, &tok(2), Arity::Required) {
            Err(Error::MissingArgument { option }) => assert_eq!(option, "-c"),
            other => panic!("{:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_associate_none() {
        let args = args("--print=yes");
        let occ = Occurrence { index: 0, long: true };
        match associate(&args, 0, &occ.split(&args[0]), Arity::None) {
            Err(Error::UnexpectedValue { option, value }) => {
                assert_eq!(option, "--print");
                assert_eq!(value, "yes");
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_claims() -> Result<(), Error> {
        use Claim::{Free as F, Option as O, Value as V};

        let table = OptionTable::new("a::c:p", &[LongOption::new("file", Arity::Required, 'f')])?;
        let args = args("-a street -c -p pos --file -x -p --bogus");
        let occs = index(&args);
        assert_eq!(
            claims(&table, &args, &occs),
            vec![O, V, O, V, F, O, V, O, O]
        );
        Ok(())
    }
}
