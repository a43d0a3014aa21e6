use crate::nfa::StateId;
use crate::syntax::Symbol;

/// Dense `(state, symbol) -> state` table with one row of [`Symbol::COUNT`]
/// cells per state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransitionTable {
    cells: Vec<Option<StateId>>,
}

impl TransitionTable {
    pub fn with_states(states: usize) -> Self {
        Self {
            cells: vec![None; states * Symbol::COUNT],
        }
    }

    /// Appends an empty row and returns its state.
    pub fn add_state(&mut self) -> StateId {
        let id = self.state_count();
        self.cells.resize(self.cells.len() + Symbol::COUNT, None);
        id
    }

    pub fn state_count(&self) -> usize {
        self.cells.len() / Symbol::COUNT
    }

    #[inline]
    pub fn get(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.cells[state * Symbol::COUNT + symbol.index()]
    }

    #[inline]
    pub fn set(&mut self, state: StateId, symbol: Symbol, target: StateId) {
        self.cells[state * Symbol::COUNT + symbol.index()] = Some(target);
    }

    pub fn transition_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}
