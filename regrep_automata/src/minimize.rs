//! DFA minimization by Moore-style partition refinement.
//!
//! States start out split into accepting and non-accepting blocks. Each pass
//! computes, for every state, the block its edges lead to for every symbol
//! of the alphabet, and splits the blocks whose states disagree. The next
//! partition is fully computed before it replaces the current one, and
//! refinement stops at the first pass that splits nothing.
//!
//! Byte symbols are compared through their effective edge (the byte's own
//! edge, falling back to the `Any` edge), so two states that only differ by a
//! redundant byte edge end up in the same block.

use std::collections::{HashMap, VecDeque};

use crate::dfa::DFA;
use crate::nfa::StateId;
use crate::syntax::Symbol;
use crate::table::TransitionTable;

/// Index of a block within a partition.
type BlockId = usize;

/// Target block of every alphabet symbol, in alphabet order. `None` means
/// that the state has no edge for the symbol.
type Signature = Vec<Option<BlockId>>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Partition {
    blocks: Vec<Vec<StateId>>,
    block_of: Vec<BlockId>,
}

impl Partition {
    fn new(blocks: Vec<Vec<StateId>>, state_count: usize) -> Self {
        let mut block_of = vec![0; state_count];
        for (block, states) in blocks.iter().enumerate() {
            for &state in states {
                block_of[state] = block;
            }
        }
        Self { blocks, block_of }
    }

    /// Accepting states first, then the others. Empty blocks are dropped.
    fn initial(dfa: &DFA) -> Self {
        let (accepting, rejecting): (Vec<StateId>, Vec<StateId>) =
            (0..dfa.state_count()).partition(|&state| dfa.is_accepting(state));
        let blocks = [accepting, rejecting]
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect();
        Self::new(blocks, dfa.state_count())
    }

    fn signature(&self, dfa: &DFA, state: StateId) -> Signature {
        dfa.alphabet()
            .iter()
            .map(|&symbol| effective_target(dfa, state, symbol).map(|t| self.block_of[t]))
            .collect()
    }

    /// Splits every block by signature. Returns `None` when no block was
    /// split, i.e. when this partition is already stable.
    fn refine(&self, dfa: &DFA) -> Option<Partition> {
        let mut blocks = Vec::with_capacity(self.blocks.len());
        let mut split = false;

        for block in &self.blocks {
            // Groups keep the order in which their first state was seen.
            let mut groups: Vec<Vec<StateId>> = Vec::new();
            let mut index: HashMap<Signature, usize> = HashMap::new();
            for &state in block {
                let group = *index
                    .entry(self.signature(dfa, state))
                    .or_insert_with(|| {
                        groups.push(Vec::new());
                        groups.len() - 1
                    });
                groups[group].push(state);
            }
            split |= groups.len() > 1;
            blocks.extend(groups);
        }

        if split {
            Some(Partition::new(blocks, dfa.state_count()))
        } else {
            None
        }
    }
}

fn effective_target(dfa: &DFA, state: StateId, symbol: Symbol) -> Option<StateId> {
    match symbol {
        Symbol::Byte(byte) => dfa.next(state, byte),
        Symbol::Any => dfa.transition(state, Symbol::Any),
    }
}

/// Refines the initial partition until a pass no longer splits a block.
// The pass counter only feeds the log macros.
#[cfg_attr(not(feature = "logging"), allow(unused_variables, unused_assignments))]
fn refine_to_fixpoint(dfa: &DFA) -> Partition {
    let mut partition = Partition::initial(dfa);
    let mut passes = 1;
    while let Some(refined) = partition.refine(dfa) {
        trace!(
            "refinement pass {}: {} -> {} blocks",
            passes,
            partition.blocks.len(),
            refined.blocks.len()
        );
        partition = refined;
        passes += 1;
    }
    debug!(
        "partition stable after {} refinement passes with {} blocks",
        passes,
        partition.blocks.len()
    );
    partition
}

/// Returns the minimal DFA recognizing the same language as `dfa`.
///
/// States of the result are numbered breadth-first from the start state,
/// following edges in alphabet order, so automata for the same language come
/// out identical. Byte edges that lead where the `Any` edge leads are
/// omitted.
pub fn minimize(dfa: &DFA) -> DFA {
    let partition = refine_to_fixpoint(dfa);

    // Breadth-first numbering of the blocks, starting from the start block.
    let mut numbering: Vec<Option<StateId>> = vec![None; partition.blocks.len()];
    let mut order: Vec<BlockId> = Vec::with_capacity(partition.blocks.len());
    let mut queue = VecDeque::new();

    let start_block = partition.block_of[dfa.start()];
    numbering[start_block] = Some(0);
    order.push(start_block);
    queue.push_back(start_block);

    while let Some(block) = queue.pop_front() {
        let representative = partition.blocks[block][0];
        for &symbol in dfa.alphabet() {
            if let Some(target) = effective_target(dfa, representative, symbol) {
                let target_block = partition.block_of[target];
                if numbering[target_block].is_none() {
                    numbering[target_block] = Some(order.len());
                    order.push(target_block);
                    queue.push_back(target_block);
                }
            }
        }
    }

    let mut transitions = TransitionTable::with_states(order.len());
    let mut accepting = Vec::with_capacity(order.len());
    let renumber = |state: StateId| numbering[partition.block_of[state]];

    for (new_state, &block) in order.iter().enumerate() {
        let representative = partition.blocks[block][0];
        accepting.push(dfa.is_accepting(representative));

        let any = dfa
            .transition(representative, Symbol::Any)
            .and_then(renumber);
        for &symbol in dfa.alphabet() {
            let target = effective_target(dfa, representative, symbol).and_then(renumber);
            let redundant = symbol != Symbol::Any && target == any;
            if let (Some(target), false) = (target, redundant) {
                transitions.set(new_state, symbol, target);
            }
        }
    }

    debug!(
        "minimized DFA from {} to {} states",
        dfa.state_count(),
        order.len()
    );

    DFA {
        start: 0,
        accepting,
        transitions,
        alphabet: dfa.alphabet().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfa::tests::determinize;
    use crate::nfa::tests::small_input;
    use crate::nfa::NFA;
    use crate::syntax::Node;
    use quickcheck::quickcheck;
    use std::collections::HashSet;

    fn compile(node: &Node) -> DFA {
        determinize(&NFA::new(node))
    }

    /// Bytes that exercise every column of `dfa`: each alphabet byte plus
    /// one byte outside of the alphabet, if there is one.
    fn probe_bytes(dfa: &DFA) -> Vec<u8> {
        let mut bytes: Vec<u8> = dfa
            .alphabet()
            .iter()
            .filter_map(|symbol| match symbol {
                Symbol::Byte(b) => Some(*b),
                Symbol::Any => None,
            })
            .collect();
        if let Some(other) = (0..=255u8).find(|b| !bytes.contains(b)) {
            bytes.push(other);
        }
        bytes
    }

    /// Brute force: explores pairs of states reachable by reading the same
    /// bytes, looking for a pair where exactly one side accepts.
    fn distinguishable(dfa: &DFA, p: StateId, q: StateId) -> bool {
        let bytes = probe_bytes(dfa);
        let accepts = |s: Option<StateId>| s.map_or(false, |s| dfa.is_accepting(s));
        let mut seen = HashSet::new();
        let mut stack = vec![(Some(p), Some(q))];
        while let Some((p, q)) = stack.pop() {
            if !seen.insert((p, q)) {
                continue;
            }
            if accepts(p) != accepts(q) {
                return true;
            }
            for &b in &bytes {
                let next = (p.and_then(|p| dfa.next(p, b)), q.and_then(|q| dfa.next(q, b)));
                if next != (None, None) {
                    stack.push(next);
                }
            }
        }
        false
    }

    #[test]
    fn test_minimize_a_star_b() {
        let dfa = compile(&Node::concat(Node::star(Node::Literal(b'a')), Node::Literal(b'b')));
        assert_eq!(dfa.state_count(), 3);

        let min = minimize(&dfa);
        assert_eq!(min.state_count(), 2);
        assert_eq!(min.start(), 0);
        assert_eq!(min.accepting_states().collect::<Vec<_>>(), vec![1]);
        assert_eq!(min.transition(0, Symbol::Byte(b'a')), Some(0));
        assert_eq!(min.transition(0, Symbol::Byte(b'b')), Some(1));
        assert_eq!(min.transition_count(), 2);
    }

    #[test]
    fn test_minimize_merges_alternatives() {
        // (ab|cb) needs one state after the first byte and one accepting state.
        let tree = Node::altern(Node::literal(b"ab"), Node::literal(b"cb"));
        let dfa = compile(&tree);
        assert_eq!(dfa.state_count(), 5);
        assert_eq!(minimize(&dfa).state_count(), 3);
    }

    #[test]
    fn test_minimize_drops_redundant_byte_edges() {
        // (a|.) reads any byte into the accepting state.
        let dfa = compile(&Node::altern(Node::Literal(b'a'), Node::Dot));
        let min = minimize(&dfa);
        assert_eq!(min.state_count(), 2);
        assert_eq!(min.transition(0, Symbol::Byte(b'a')), None);
        assert_eq!(min.transition(0, Symbol::Any), Some(1));
        assert!(min.accepts(b"a"));
        assert!(min.accepts(b"q"));
    }

    #[test]
    fn test_refine_to_fixpoint_is_stable() {
        let dfa = compile(&Node::altern(
            Node::literal(b"ab"),
            Node::literal(b"cb"),
        ));
        let partition = refine_to_fixpoint(&dfa);
        assert!(partition.refine(&dfa).is_none());
        assert_eq!(partition.blocks.len(), 3);
    }

    #[test]
    fn test_minimize_is_idempotent() {
        let tree = Node::concat(
            Node::star(Node::altern(Node::Literal(b'a'), Node::Literal(b'b'))),
            Node::Literal(b'c'),
        );
        let min = minimize(&compile(&tree));
        let again = minimize(&min);
        assert_eq!(min.state_count(), again.state_count());
        assert_eq!(min, again);
    }

    quickcheck! {
        fn prop_minimization_preserves_language(node: Node, raw: Vec<u8>) -> bool {
            let nfa = NFA::new(&node);
            let dfa = determinize(&nfa);
            let min = minimize(&dfa);
            let input = small_input(&raw);
            let expected = nfa.accepts(&input);
            dfa.accepts(&input) == expected && min.accepts(&input) == expected
        }

        fn prop_minimal(node: Node) -> bool {
            let min = minimize(&compile(&node));
            (0..min.state_count()).all(|p| {
                (p + 1..min.state_count()).all(|q| distinguishable(&min, p, q))
            })
        }

        fn prop_never_larger(node: Node) -> bool {
            let dfa = compile(&node);
            minimize(&dfa).state_count() <= dfa.state_count()
        }
    }
}
