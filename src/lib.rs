//! A getopt-style command line option scanner.
//!
//! Options are declared up front with a compact specifier (`"n:a::c:pf:"`,
//! where `:` means the option requires an argument and `::` means the
//! argument is optional) plus a table of long options. The scanner then
//! hands you the options in order, one code at a time, and decodes the
//! value of each on request.
//!
//! Any option can also be looked up by name at any time with
//! [`Scanner::parse`], without disturbing the forward scan.
//!
//! ## Example
//! ```no_run
//! use optscan::{Arity, LongOption, OptionTable, Scanner};
//!
//! #[derive(Debug, Default)]
//! struct Args {
//!     name: String,
//!     post_code: u32,
//!     print: bool,
//! }
//!
//! fn parse_args() -> Result<Args, optscan::Error> {
//!     let table = OptionTable::new(
//!         "n:c:p",
//!         &[LongOption::new("name", Arity::Required, 'n')],
//!     )?;
//!     let mut scanner = Scanner::from_env(table)?;
//!
//!     let mut args = Args::default();
//!     while let Some(code) = scanner.next()? {
//!         match code {
//!             'n' => args.name = scanner.get_arg(),
//!             'c' => args.post_code = scanner.get_arg(),
//!             'p' => args.print = true,
//!             _ => unreachable!(),
//!         }
//!     }
//!     Ok(args)
//! }
//!
//! fn main() -> Result<(), optscan::Error> {
//!     let args = parse_args()?;
//!     println!("{:#?}", args);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::should_implement_trait)]

use std::ffi::OsString;

mod decode;
mod error;
mod occurrence;
mod table;

pub use crate::decode::{FromArg, Kind, Value};
pub use crate::error::Error;
pub use crate::table::{Arity, LongOption, OptionTable};

use crate::occurrence::{Claim, Occurrence};

/// A scanner over a fixed list of command line arguments.
///
/// The whole argument list is indexed when the scanner is created. After
/// that, [`next`][Scanner::next] walks the options in order and
/// [`parse`][Scanner::parse] can look any of them up by name.
#[derive(Debug, Clone)]
pub struct Scanner {
    table: OptionTable,
    args: Vec<String>,
    bin_name: Option<String>,
    occurrences: Vec<Occurrence>,
    claims: Vec<Claim>,
    cursor: Cursor,
}

/// The forward scan state: where it is, and the value of the last option.
///
/// Only [`Scanner::next`] moves it. Lookups borrow the scanner immutably,
/// so a cursor cloned before a [`Scanner::parse`] call always equals the
/// one after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
    value: Option<String>,
    next_index: usize,
}

impl Cursor {
    /// How many entries of the occurrence index have been passed.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The value of the last option, if it has one.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Scanner {
    /// Create a scanner from an iterator. This may be useful for testing.
    ///
    /// The executable name must not be included.
    pub fn new<I>(table: OptionTable, args: I) -> Scanner
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let occurrences = occurrence::index(&args);
        let claims = occurrence::claims(&table, &args, &occurrences);
        tracing::debug!(
            args = args.len(),
            occurrences = occurrences.len(),
            "indexed command line"
        );
        Scanner {
            table,
            args,
            bin_name: None,
            occurrences,
            claims,
            cursor: Cursor::default(),
        }
    }

    /// Create a scanner from the environment using [`std::env::args_os`].
    ///
    /// Fails if an argument is not valid unicode.
    pub fn from_env(table: OptionTable) -> Result<Scanner, Error> {
        let mut source = std::env::args_os();
        let bin_name = source.next().map(OsString::into_string).transpose()?;
        let args = source
            .map(OsString::into_string)
            .collect::<Result<Vec<_>, _>>()?;
        let mut scanner = Scanner::new(table, args);
        scanner.bin_name = bin_name;
        Ok(scanner)
    }

    /// Get the code of the next option.
    ///
    /// Short options return their letter and long options the code they were
    /// declared with. The option's value can then be read with
    /// [`get_arg`][Scanner::get_arg].
    ///
    /// It returns `Ok(None)` once every option has been seen. An error ends
    /// the scan: later calls return `Ok(None)`.
    pub fn next(&mut self) -> Result<Option<char>, Error> {
        // Take the cursor out so the rest of self can be borrowed.
        let mut cursor = std::mem::take(&mut self.cursor);
        let result = self.advance(&mut cursor);
        if let Err(ref err) = result {
            tracing::debug!(error = %err, "scan failed");
            cursor.position = self.occurrences.len();
        }
        self.cursor = cursor;
        result
    }

    fn advance(&self, cursor: &mut Cursor) -> Result<Option<char>, Error> {
        let occ = loop {
            match self.occurrences.get(cursor.position) {
                None => return Ok(None),
                Some(&occ) => {
                    cursor.position += 1;
                    if !self.swallowed(occ) {
                        break occ;
                    }
                }
            }
        };

        let token = occ.split(&self.args[occ.index]);
        let (code, arity) = token.resolve(&self.table)?;
        let assoc = occurrence::associate(&self.args, occ.index, &token, arity)?;
        tracing::trace!(option = %token, ?code, value = ?assoc.value, "scanned");

        let end = occ.index + usize::from(assoc.consumed_next);
        cursor.next_index = (0..=end)
            .find(|&i| self.claims[i] == Claim::Free)
            .unwrap_or(end + 1);
        cursor.value = assoc.value;
        Ok(Some(code))
    }

    /// Whether an occurrence was taken as the value of the option before it,
    /// as `-p` in `-c -p` when `c` requires an argument.
    fn swallowed(&self, occ: Occurrence) -> bool {
        self.claims[occ.index] == Claim::Value
    }

    /// Decode the value of the last option returned by
    /// [`next`][Scanner::next].
    ///
    /// This never fails: see [`FromArg`] for how each type treats a missing
    /// or malformed value.
    pub fn get_arg<T: FromArg>(&self) -> T {
        T::from_arg(self.cursor.value())
    }

    /// Decode the value of the last option as one of a fixed set of kinds.
    pub fn decode(&self, kind: Kind) -> Value {
        Value::decode(self.cursor.value(), kind)
    }

    /// The value of the last option as written, or `None` if it has none.
    pub fn value(&self) -> Option<&str> {
        self.cursor.value()
    }

    /// Look up the value of an option by letter (`"c"`) or long name
    /// (`"name"`), wherever it is on the command line.
    ///
    /// The first occurrence wins. This does not affect what
    /// [`next`][Scanner::next] or [`get_arg`][Scanner::get_arg] return.
    ///
    /// It fails with [`Error::Lookup`] if the option was not given or if it
    /// takes no argument. Use [`contains`][Scanner::contains] for flags.
    pub fn parse<T: FromArg>(&self, name: &str) -> Result<T, Error> {
        let occ = self
            .find(name)
            .ok_or_else(|| Error::Lookup(format!("option '{}' was not given", name)))?;

        let token = occ.split(&self.args[occ.index]);
        let (_, arity) = token.resolve(&self.table)?;
        if !arity.takes_value() {
            return Err(Error::Lookup(format!(
                "option '{}' does not take an argument",
                name
            )));
        }
        let assoc = occurrence::associate(&self.args, occ.index, &token, arity)?;
        tracing::trace!(option = %token, value = ?assoc.value, "looked up");

        Ok(T::from_arg(assoc.value.as_deref()))
    }

    /// Whether an option was given anywhere on the command line, by letter
    /// or long name.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    fn find(&self, name: &str) -> Option<Occurrence> {
        self.occurrences
            .iter()
            .copied()
            .filter(|&occ| !self.swallowed(occ))
            .find(|occ| occ.split(&self.args[occ.index]).matches(name))
    }

    /// The position of the first argument not yet used by the scan, counting
    /// the executable name as position 0.
    ///
    /// This is getopt's `optind`: before scanning it is 1, and after the
    /// scan it points at the first positional argument (or past the end if
    /// there are none).
    pub fn index(&self) -> usize {
        self.cursor.next_index + 1
    }

    /// The arguments that no option uses, in order.
    ///
    /// Values of options are not included, even if they come before the
    /// option in the scan.
    pub fn positionals(&self) -> impl Iterator<Item = &str> + '_ {
        self.args
            .iter()
            .zip(&self.claims)
            .filter(|(_, claim)| **claim == Claim::Free)
            .map(|(arg, _)| arg.as_str())
    }

    /// The arguments the scanner was created with.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The forward scan state.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Get the name that was used to invoke the program.
    ///
    /// Only available if constructed by [`Scanner::from_env`].
    pub fn bin_name(&self) -> Option<&str> {
        self.bin_name.as_deref()
    }
}
