//! The static description of every recognized option.

use std::collections::HashMap;
use std::str::FromStr;

use crate::Error;

/// How many values an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// A plain flag, e.g. `-p`.
    None,
    /// The option always takes a value, embedded (`-c47401`) or as the
    /// next token (`-c 47401`).
    Required,
    /// The option takes a value if one is embedded, or if the next token
    /// does not look like an option.
    Optional,
}

impl Arity {
    /// The arity for a letter followed by `colons` colons in a specifier.
    fn from_colons(colons: usize) -> Option<Arity> {
        match colons {
            0 => Some(Arity::None),
            1 => Some(Arity::Required),
            2 => Some(Arity::Optional),
            _ => None,
        }
    }

    /// Whether the option can have a value at all.
    pub fn takes_value(self) -> bool {
        self != Arity::None
    }
}

/// A long option declaration, e.g. `--name` mapped to `'n'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongOption {
    /// The name without the leading dashes.
    pub name: String,
    /// How many values it accepts.
    pub arity: Arity,
    /// The code returned by [`Scanner::next`][crate::Scanner::next] when
    /// this option is seen. It does not need to be a declared short letter,
    /// or even printable.
    pub code: char,
}

impl LongOption {
    /// Declare a long option.
    pub fn new(name: impl Into<String>, arity: Arity, code: char) -> LongOption {
        LongOption {
            name: name.into(),
            arity,
            code,
        }
    }
}

/// Every short letter and long name the scanner recognizes.
///
/// Built from a getopt-style specifier, where each character is an option
/// letter optionally followed by `:` (required argument) or `::` (optional
/// argument):
///
/// ```
/// use optscan::{Arity, LongOption, OptionTable};
///
/// let table = OptionTable::new("n:a::p", &[LongOption::new("name", Arity::Required, 'n')])?;
/// assert_eq!(table.short('a'), Some(Arity::Optional));
/// assert_eq!(table.long("name").map(|opt| opt.code), Some('n'));
/// # Ok::<(), optscan::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    shorts: HashMap<char, Arity>,
    longs: HashMap<String, LongOption>,
}

impl OptionTable {
    /// Build a table from a short option specifier and long declarations.
    pub fn new(spec: &str, longs: &[LongOption]) -> Result<OptionTable, Error> {
        let mut table = OptionTable::default();

        let mut chars = spec.chars().peekable();
        while let Some(letter) = chars.next() {
            if letter == ':' {
                return Err(Error::Config(format!(
                    "colon without an option letter in {:?}",
                    spec
                )));
            }
            if letter == '-' {
                return Err(Error::Config("'-' cannot be a short option".into()));
            }
            let mut colons = 0;
            while chars.next_if_eq(&':').is_some() {
                colons += 1;
            }
            let arity = Arity::from_colons(colons).ok_or_else(|| {
                Error::Config(format!("too many colons after option '{}'", letter))
            })?;
            if table.shorts.insert(letter, arity).is_some() {
                return Err(Error::Config(format!(
                    "duplicate short option '{}'",
                    letter
                )));
            }
        }

        for long in longs {
            if long.name.is_empty() {
                return Err(Error::Config("empty long option name".into()));
            }
            if memchr::memchr(b'=', long.name.as_bytes()).is_some() {
                return Err(Error::Config(format!(
                    "long option '{}' contains '='",
                    long.name
                )));
            }
            if table.longs.contains_key(&long.name) {
                return Err(Error::Config(format!(
                    "duplicate long option '{}'",
                    long.name
                )));
            }
            table.longs.insert(long.name.clone(), long.clone());
        }

        tracing::debug!(
            shorts = table.shorts.len(),
            longs = table.longs.len(),
            "built option table"
        );
        Ok(table)
    }

    /// The arity of a short letter, if it is declared.
    pub fn short(&self, letter: char) -> Option<Arity> {
        self.shorts.get(&letter).copied()
    }

    /// The declaration of a long option, if it exists.
    pub fn long(&self, name: &str) -> Option<&LongOption> {
        self.longs.get(name)
    }
}

/// Parse a specifier with no long options.
impl FromStr for OptionTable {
    type Err = Error;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        OptionTable::new(spec, &[])
    }
}
