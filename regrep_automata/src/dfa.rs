use std::collections::{HashMap, VecDeque};

use crate::nfa::{StateId, StateSet, NFA};
use crate::syntax::{Alphabet, Symbol};
use crate::table::TransitionTable;
use crate::{CompileError, CompileResult};

/// A deterministic finite automaton over bytes.
///
/// A state has at most one edge per symbol. When reading a byte, the edge
/// labelled with that byte wins and the [`Symbol::Any`] edge is the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DFA {
    pub(crate) start: StateId,
    pub(crate) accepting: Vec<bool>,
    pub(crate) transitions: TransitionTable,
    pub(crate) alphabet: Alphabet,
}

impl DFA {
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.accepting.len()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[inline]
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting[state]
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.accepting
            .iter()
            .enumerate()
            .filter(|(_, accepting)| **accepting)
            .map(|(state, _)| state)
    }

    /// The edge leaving `state` labelled exactly `symbol`, if any.
    #[inline]
    pub fn transition(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions.get(state, symbol)
    }

    /// The state reached from `state` by reading `byte`.
    #[inline]
    pub fn next(&self, state: StateId, byte: u8) -> Option<StateId> {
        self.transitions
            .get(state, Symbol::Byte(byte))
            .or_else(|| self.transitions.get(state, Symbol::Any))
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.transition_count()
    }

    /// Whether the whole of `input` is in the language of this DFA.
    pub fn accepts(&self, input: &[u8]) -> bool {
        let mut state = self.start;
        for &byte in input {
            match self.next(state, byte) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_accepting(state)
    }

    /// Returns the equivalent DFA with the fewest states.
    pub fn minimize(&self) -> DFA {
        crate::minimize::minimize(self)
    }
}

/// Converts an [`NFA`] into a [`DFA`] by subset construction.
#[derive(Debug, Clone, Default)]
pub struct Determinizer {
    size_limit: Option<usize>,
}

impl Determinizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up once the DFA needs more than `limit` states.
    pub fn size_limit(mut self, limit: Option<usize>) -> Self {
        self.size_limit = limit;
        self
    }

    pub fn determinize(&self, nfa: &NFA) -> CompileResult<DFA> {
        let mut subsets = Subsets::new(nfa, self.size_limit);
        let start_set = nfa.epsilon_closure(&StateSet::from([nfa.start()]));
        let start = subsets.intern(start_set)?;

        while let Some((set, state)) = subsets.queue.pop_front() {
            for &symbol in nfa.alphabet() {
                let moved: StateSet = set
                    .iter()
                    .flat_map(|&n| nfa.step(n, symbol))
                    .collect();
                if moved.is_empty() {
                    continue;
                }
                let target = subsets.intern(nfa.epsilon_closure(&moved))?;
                subsets.transitions.set(state, symbol, target);
            }
        }

        debug!(
            "determinized {} NFA states into {} DFA states",
            nfa.state_count(),
            subsets.accepting.len()
        );

        Ok(DFA {
            start,
            accepting: subsets.accepting,
            transitions: subsets.transitions,
            alphabet: nfa.alphabet().clone(),
        })
    }
}

/// Bookkeeping of the subset construction: which NFA state sets already
/// have a DFA state, and which ones still need their edges computed.
struct Subsets<'a> {
    nfa: &'a NFA,
    limit: Option<usize>,
    ids: HashMap<StateSet, StateId>,
    queue: VecDeque<(StateSet, StateId)>,
    transitions: TransitionTable,
    accepting: Vec<bool>,
}

impl<'a> Subsets<'a> {
    fn new(nfa: &'a NFA, limit: Option<usize>) -> Self {
        Self {
            nfa,
            limit,
            ids: HashMap::new(),
            queue: VecDeque::new(),
            transitions: TransitionTable::with_states(0),
            accepting: Vec::new(),
        }
    }

    /// Returns the DFA state of `set`, allocating and enqueueing it the
    /// first time the set is seen.
    fn intern(&mut self, set: StateSet) -> CompileResult<StateId> {
        if let Some(&id) = self.ids.get(&set) {
            return Ok(id);
        }
        if let Some(limit) = self.limit {
            if self.accepting.len() >= limit {
                return Err(CompileError::TooComplex {
                    states: self.accepting.len() + 1,
                    limit,
                });
            }
        }

        let id = self.transitions.add_state();
        self.accepting.push(self.nfa.is_accepting(&set));
        trace!("DFA state {} = NFA states {:?}", id, set);
        self.ids.insert(set.clone(), id);
        self.queue.push_back((set, id));
        Ok(id)
    }
}
