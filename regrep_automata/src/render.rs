//! Textual form of finished automata, one edge per line:
//!
//! ```text
//! Start State : 2
//! Final State : 5
//! State 0 - a -> State 1
//! State 1 - ε -> State 0
//! ```

use std::fmt;

use crate::dfa::DFA;
use crate::nfa::NFA;
use crate::syntax::Symbol;

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Symbol::Any => write!(f, "."),
            // Keeps a literal dot apart from `Any`.
            Symbol::Byte(b'.') => write!(f, "\\."),
            Symbol::Byte(byte) => write!(f, "{}", std::ascii::escape_default(byte)),
        }
    }
}

impl fmt::Display for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start State : {}", self.start())?;
        writeln!(f, "Final State : {}", self.accept())?;

        for state in 0..self.state_count() {
            for &symbol in self.alphabet() {
                if let Some(target) = self.transition(state, symbol) {
                    writeln!(f, "State {} - {} -> State {}", state, symbol, target)?;
                }
            }
            for target in self.epsilon_transitions(state) {
                writeln!(f, "State {} - ε -> State {}", state, target)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for DFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start State : {}", self.start())?;
        let finals: Vec<String> = self.accepting_states().map(|s| s.to_string()).collect();
        writeln!(f, "Final States : {}", finals.join(" "))?;

        for state in 0..self.state_count() {
            for &symbol in self.alphabet() {
                if let Some(target) = self.transition(state, symbol) {
                    writeln!(f, "State {} - {} -> State {}", state, symbol, target)?;
                }
            }
        }

        Ok(())
    }
}
