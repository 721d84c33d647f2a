use std::ffi::OsString;

/// An error during option table construction or scanning.
///
/// Construction errors ([`Error::Config`]) prevent any scanning. Scan errors
/// ([`Error::MissingArgument`], [`Error::UnknownOption`],
/// [`Error::UnexpectedValue`]) end the forward scan; values returned before
/// the error stay valid.
///
/// Malformed numbers are not errors. See [`FromArg`][crate::FromArg].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The option specifier or the long option table is malformed.
    #[error("invalid option specification: {0}")]
    Config(String),

    /// An option that requires an argument had neither an embedded value
    /// nor a following token.
    #[error("missing argument for option '{option}'")]
    MissingArgument {
        /// The option as written, e.g. `-c` or `--name`.
        option: String,
    },

    /// An option letter or name is not in the option table.
    #[error("invalid option '{0}'")]
    UnknownOption(String),

    /// An option that takes no argument was given one, as in `--print=yes`.
    #[error("unexpected argument for option '{option}': {value:?}")]
    UnexpectedValue {
        /// The option as written.
        option: String,
        /// The value that was attached to it.
        value: String,
    },

    /// A named lookup found no matching option, or found one that takes
    /// no argument.
    #[error("{0}")]
    Lookup(String),

    /// An argument from the environment was not valid unicode.
    #[error("argument is invalid unicode: {0:?}")]
    NonUnicodeArgument(OsString),
}

/// For [`OsString::into_string`].
impl From<OsString> for Error {
    fn from(arg: OsString) -> Self {
        Error::NonUnicodeArgument(arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::MissingArgument {
            option: "-c".into(),
        };
        assert_eq!(err.to_string(), "missing argument for option '-c'");
        assert_eq!(
            Error::UnknownOption("--bogus".into()).to_string(),
            "invalid option '--bogus'"
        );
        let err = Error::UnexpectedValue {
            option: "--print".into(),
            value: "yes".into(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected argument for option '--print': \"yes\""
        );
        assert_eq!(
            Error::Config("duplicate short option 'c'".into()).to_string(),
            "invalid option specification: duplicate short option 'c'"
        );
    }
}
