use std::collections::BTreeSet;

/// A symbol labelling an automaton edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// A single byte value.
    Byte(u8),
    /// Any byte. On a DFA edge it only applies to bytes that have no edge
    /// of their own.
    Any,
}

impl Symbol {
    /// Number of distinct symbols, i.e. the width of a transition row.
    pub const COUNT: usize = 257;

    /// Column of this symbol in a transition row.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Symbol::Byte(b) => b as usize,
            Symbol::Any => 256,
        }
    }
}

/// The set of symbols an automaton actually uses, in symbol order.
pub type Alphabet = BTreeSet<Symbol>;

/// A regular expression syntax tree.
///
/// Composite nodes own their children, so a tree is always finite and
/// acyclic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// The first child followed by the second.
    Concat(Box<Node>, Box<Node>),
    /// Either child.
    Altern(Box<Node>, Box<Node>),
    /// Zero or more repetitions of the child.
    Star(Box<Node>),
    /// Any single byte.
    Dot,
    /// Exactly this byte.
    Literal(u8),
    /// The empty string.
    Empty,
}

impl Node {
    pub fn concat(first: Node, second: Node) -> Node {
        Node::Concat(Box::new(first), Box::new(second))
    }

    pub fn altern(first: Node, second: Node) -> Node {
        Node::Altern(Box::new(first), Box::new(second))
    }

    pub fn star(sub: Node) -> Node {
        Node::Star(Box::new(sub))
    }

    /// Zero or one occurrence of `sub`.
    pub fn optional(sub: Node) -> Node {
        Node::altern(sub, Node::Empty)
    }

    /// The concatenation of `bytes`, or `Empty` when there are none.
    pub fn literal(bytes: &[u8]) -> Node {
        Node::concat_all(bytes.iter().map(|&b| Node::Literal(b)).collect())
    }

    /// Folds `nodes` into a balanced tree of `Concat` nodes.
    pub fn concat_all(nodes: Vec<Node>) -> Node {
        fold_balanced(nodes, Node::concat)
    }

    /// Folds `nodes` into a balanced tree of `Altern` nodes.
    pub fn altern_all(nodes: Vec<Node>) -> Node {
        fold_balanced(nodes, Node::altern)
    }

    /// Number of NFA states Thompson's construction allocates for this tree.
    pub fn state_count(&self) -> usize {
        match self {
            Node::Concat(first, second) => first.state_count() + second.state_count(),
            Node::Altern(first, second) => first.state_count() + second.state_count() + 2,
            Node::Star(sub) => sub.state_count() + 2,
            Node::Dot | Node::Literal(_) | Node::Empty => 2,
        }
    }
}

// Builder recursion depth stays logarithmic in the number of operands.
fn fold_balanced(mut nodes: Vec<Node>, join: fn(Node, Node) -> Node) -> Node {
    match nodes.len() {
        0 => Node::Empty,
        1 => nodes.pop().unwrap_or(Node::Empty),
        n => {
            let second = nodes.split_off(n / 2);
            join(fold_balanced(nodes, join), fold_balanced(second, join))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_count() {
        // a*b
        let tree = Node::concat(Node::star(Node::Literal(b'a')), Node::Literal(b'b'));
        assert_eq!(tree.state_count(), 6);

        // (a|b)*c
        let tree = Node::concat(
            Node::star(Node::altern(Node::Literal(b'a'), Node::Literal(b'b'))),
            Node::Literal(b'c'),
        );
        assert_eq!(tree.state_count(), 10);
    }

    #[test]
    fn test_literal_folding() {
        assert_eq!(Node::literal(b""), Node::Empty);
        assert_eq!(Node::literal(b"a"), Node::Literal(b'a'));
        assert_eq!(
            Node::literal(b"abc"),
            Node::concat(
                Node::Literal(b'a'),
                Node::concat(Node::Literal(b'b'), Node::Literal(b'c')),
            )
        );
    }

    #[test]
    fn test_symbol_order() {
        assert!(Symbol::Byte(255) < Symbol::Any);
        assert_eq!(Symbol::Any.index(), Symbol::COUNT - 1);
    }
}
