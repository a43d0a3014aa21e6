use std::collections::BTreeSet;

use crate::syntax::{Alphabet, Node, Symbol};
use crate::table::TransitionTable;
use crate::{CompileError, CompileResult};

/// A state ID in an automaton
pub type StateId = usize;

/// A set of NFA states, ordered so that equal sets hash and compare equal
/// regardless of insertion order.
pub type StateSet = BTreeSet<StateId>;

/// Fragment of an NFA with start and accept states
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fragment {
    pub start: StateId,
    pub accept: StateId,
}

/// A Thompson NFA with a single start and a single accept state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NFA {
    pub(crate) start: StateId,
    pub(crate) accept: StateId,
    pub(crate) transitions: TransitionTable,
    pub(crate) epsilons: Vec<Vec<StateId>>,
    pub(crate) alphabet: Alphabet,
}

impl NFA {
    /// Builds the NFA for `node` without any size limit.
    pub fn new(node: &Node) -> Self {
        Builder::new().construct(node)
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    pub fn state_count(&self) -> usize {
        self.epsilons.len()
    }

    /// Symbols used by at least one labelled edge.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The edge leaving `state` labelled exactly `symbol`, if any.
    pub fn transition(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions.get(state, symbol)
    }

    pub fn epsilon_transitions(&self, state: StateId) -> &[StateId] {
        &self.epsilons[state]
    }

    /// States reachable from `state` by consuming `symbol`.
    ///
    /// A byte is consumed both by its own edge and by an `Any` edge, while
    /// `Symbol::Any` stands for a byte outside the alphabet and therefore only
    /// follows `Any` edges.
    pub fn step(&self, state: StateId, symbol: Symbol) -> impl Iterator<Item = StateId> {
        let exact = match symbol {
            Symbol::Byte(_) => self.transitions.get(state, symbol),
            Symbol::Any => None,
        };
        exact
            .into_iter()
            .chain(self.transitions.get(state, Symbol::Any))
    }

    /// Get epsilon closure of a set of states
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(state) = stack.pop() {
            for &next in &self.epsilons[state] {
                if closure.insert(next) {
                    stack.push(next);
                }
            }
        }

        closure
    }

    /// Check if the accept state is in the set
    pub fn is_accepting(&self, states: &StateSet) -> bool {
        states.contains(&self.accept)
    }

    /// Whether the whole of `input` is in the language of this NFA.
    pub fn accepts(&self, input: &[u8]) -> bool {
        let mut current = self.epsilon_closure(&StateSet::from([self.start]));

        for &byte in input {
            let moved: StateSet = current
                .iter()
                .flat_map(|&state| self.step(state, Symbol::Byte(byte)))
                .collect();
            if moved.is_empty() {
                return false;
            }
            current = self.epsilon_closure(&moved);
        }

        self.is_accepting(&current)
    }
}

/// Builds an [`NFA`] from a syntax tree with Thompson's construction.
///
/// Every call to [`Builder::build`] numbers states from zero, so two builds
/// of the same tree yield identical automata.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    size_limit: Option<usize>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse trees that need more than `limit` NFA states.
    pub fn size_limit(mut self, limit: Option<usize>) -> Self {
        self.size_limit = limit;
        self
    }

    pub fn build(&self, node: &Node) -> CompileResult<NFA> {
        let states = node.state_count();
        if let Some(limit) = self.size_limit {
            if states > limit {
                return Err(CompileError::TooComplex { states, limit });
            }
        }
        Ok(self.construct(node))
    }

    fn construct(&self, node: &Node) -> NFA {
        let states = node.state_count();
        let mut construction = Construction {
            transitions: TransitionTable::with_states(states),
            epsilons: vec![Vec::new(); states],
            alphabet: Alphabet::new(),
            next_id: 0,
        };

        let fragment = construction.compile(node);
        debug_assert_eq!(construction.next_id, states);
        debug!(
            "built NFA with {} states over {} symbols",
            states,
            construction.alphabet.len()
        );

        NFA {
            start: fragment.start,
            accept: fragment.accept,
            transitions: construction.transitions,
            epsilons: construction.epsilons,
            alphabet: construction.alphabet,
        }
    }
}

/// Scratch state of a single build. Owns the state counter.
struct Construction {
    transitions: TransitionTable,
    epsilons: Vec<Vec<StateId>>,
    alphabet: Alphabet,
    next_id: StateId,
}

impl Construction {
    fn next_state(&mut self) -> StateId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn epsilon(&mut self, from: StateId, to: StateId) {
        self.epsilons[from].push(to);
    }

    fn compile(&mut self, node: &Node) -> Fragment {
        match node {
            Node::Concat(first, second) => {
                let first = self.compile(first);
                let second = self.compile(second);
                self.epsilon(first.accept, second.start);
                Fragment {
                    start: first.start,
                    accept: second.accept,
                }
            }
            Node::Altern(first, second) => {
                let first = self.compile(first);
                let second = self.compile(second);
                let start = self.next_state();
                let accept = self.next_state();
                self.epsilon(start, first.start);
                self.epsilon(start, second.start);
                self.epsilon(first.accept, accept);
                self.epsilon(second.accept, accept);
                Fragment { start, accept }
            }
            Node::Star(sub) => {
                let sub = self.compile(sub);
                let start = self.next_state();
                let accept = self.next_state();
                self.epsilon(start, sub.start);
                self.epsilon(start, accept);
                self.epsilon(sub.accept, sub.start);
                self.epsilon(sub.accept, accept);
                Fragment { start, accept }
            }
            Node::Dot => self.compile_symbol(Symbol::Any),
            Node::Literal(byte) => self.compile_symbol(Symbol::Byte(*byte)),
            Node::Empty => {
                let start = self.next_state();
                let accept = self.next_state();
                self.epsilon(start, accept);
                Fragment { start, accept }
            }
        }
    }

    fn compile_symbol(&mut self, symbol: Symbol) -> Fragment {
        let start = self.next_state();
        let accept = self.next_state();
        self.transitions.set(start, symbol, accept);
        self.alphabet.insert(symbol);
        Fragment { start, accept }
    }
}
