//! Regular expression compilation to finite automata over a byte alphabet.
//!
//! The pipeline is the classic one:
//!
//! - a [`Node`] syntax tree, usually lowered from a `regex-syntax` HIR by the
//!   [`Compiler`],
//! - an [`NFA`] built with Thompson's construction by [`nfa::Builder`],
//! - a [`DFA`] obtained by subset construction in [`dfa::Determinizer`],
//! - a minimal [`DFA`] obtained by partition refinement in [`minimize`],
//! - a [`Scanner`] that drives a DFA over a line of text.
//!
//! The alphabet is the 256 byte values plus [`Symbol::Any`], which stands for
//! "any byte" on an NFA edge and for "any byte without its own edge" on a DFA
//! edge.

#[macro_use]
mod macros;

pub mod compiler;
pub mod dfa;
pub mod minimize;
pub mod nfa;
mod render;
pub mod scanner;
pub mod syntax;
mod table;

pub use compiler::{parser_builder, Compiler};
pub use dfa::{Determinizer, DFA};
pub use minimize::minimize;
pub use nfa::{StateId, StateSet, NFA};
pub use scanner::{Match, ScanMode, Scanner};
pub use syntax::{Alphabet, Node, Symbol};

/// The result of any fallible step of the compilation pipeline.
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur while lowering a pattern or building automata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// An automaton would need more states than the configured limit.
    TooComplex {
        /// Number of states reached when the limit tripped.
        states: usize,
        /// The configured limit.
        limit: usize,
    },
    /// The pattern uses a construct the automata cannot express.
    UnsupportedFeature(String),
    /// The pattern names a character outside of the byte alphabet.
    UnsupportedSymbol(char),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::TooComplex { states, limit } => write!(
                f,
                "pattern is too complex: {} states exceeds the limit of {}",
                states, limit
            ),
            CompileError::UnsupportedFeature(feature) => {
                write!(f, "unsupported feature: {}", feature)
            }
            CompileError::UnsupportedSymbol(ch) => write!(
                f,
                "unsupported symbol {:?} (U+{:04X}): only byte values are allowed",
                ch, *ch as u32
            ),
        }
    }
}

impl std::error::Error for CompileError {}
