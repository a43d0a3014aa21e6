use regrep_automata::CompileError;

/// An error that occurred while compiling a [`Pattern`](crate::Pattern).
#[derive(Debug)]
pub enum Error {
    /// The pattern is not a valid regular expression.
    Syntax(regex_syntax::Error),
    /// The pattern parsed, but cannot be compiled to an automaton.
    Compile(CompileError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(err) => write!(f, "{}", err),
            Error::Compile(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Syntax(err) => Some(err),
            Error::Compile(err) => Some(err),
        }
    }
}

impl From<regex_syntax::Error> for Error {
    fn from(err: regex_syntax::Error) -> Error {
        Error::Syntax(err)
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Error {
        Error::Compile(err)
    }
}
