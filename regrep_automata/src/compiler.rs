use regex_syntax::hir::{Class, ClassBytes, ClassUnicode, Hir, HirKind, Repetition};
use regex_syntax::ParserBuilder;

use crate::syntax::Node;
use crate::{CompileError, CompileResult};

/// A `regex-syntax` parser builder configured for the byte alphabet.
///
/// Unicode mode is off, so classes and case folding work on bytes, UTF-8
/// validity is not enforced and `.` matches every byte.
pub fn parser_builder() -> ParserBuilder {
    let mut builder = ParserBuilder::new();
    builder
        .unicode(false)
        .utf8(false)
        .dot_matches_new_line(true);
    builder
}

/// Compiler that lowers a regex-syntax HIR into a [`Node`] tree
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    size_limit: Option<usize>,
}

impl Compiler {
    /// Create a new compiler with no size limit
    pub fn new() -> Self {
        Compiler::default()
    }

    /// Fail with [`CompileError::TooComplex`] as soon as a repetition would
    /// expand to more than `limit` NFA states. The check happens before any
    /// copy of the repeated expression is made, so nested counts such as
    /// `a{1000}{1000}{1000}` are rejected without building them.
    pub fn size_limit(mut self, limit: Option<usize>) -> Self {
        self.size_limit = limit;
        self
    }

    /// Lower `hir` into the syntax tree the NFA builder consumes.
    pub fn compile(&self, hir: &Hir) -> CompileResult<Node> {
        match hir.kind() {
            HirKind::Empty => Ok(Node::Empty),
            HirKind::Literal(literal) => Ok(Node::literal(&literal.0)),
            HirKind::Class(class) => self.compile_class(class),
            HirKind::Look(look) => Err(CompileError::UnsupportedFeature(format!(
                "look-around assertion {:?}",
                look
            ))),
            HirKind::Repetition(rep) => self.compile_repetition(rep),
            HirKind::Capture(capture) => self.compile(&capture.sub),
            HirKind::Concat(concat) => Ok(Node::concat_all(self.compile_all(concat)?)),
            HirKind::Alternation(alternation) => {
                Ok(Node::altern_all(self.compile_all(alternation)?))
            }
        }
    }

    fn compile_all(&self, hirs: &[Hir]) -> CompileResult<Vec<Node>> {
        hirs.iter().map(|hir| self.compile(hir)).collect()
    }

    fn compile_class(&self, class: &Class) -> CompileResult<Node> {
        let empty = match class {
            Class::Bytes(class_bytes) => class_bytes.ranges().is_empty(),
            Class::Unicode(class_unicode) => class_unicode.ranges().is_empty(),
        };
        // The tree has no node that never matches.
        if empty {
            return Err(CompileError::UnsupportedFeature(
                "empty character class".to_string(),
            ));
        }
        match class {
            Class::Bytes(class_bytes) => Ok(self.compile_bytes_class(class_bytes)),
            Class::Unicode(class_unicode) => self.compile_unicode_class(class_unicode),
        }
    }

    /// A class of every byte is `Dot`, anything else an alternation of its
    /// bytes.
    fn compile_bytes_class(&self, class: &ClassBytes) -> Node {
        let bytes: Vec<u8> = class
            .iter()
            .flat_map(|range| range.start()..=range.end())
            .collect();

        if bytes.len() == 256 {
            Node::Dot
        } else {
            Node::altern_all(bytes.into_iter().map(Node::Literal).collect())
        }
    }

    fn compile_unicode_class(&self, class: &ClassUnicode) -> CompileResult<Node> {
        let ranges = class.ranges();
        if ranges.len() == 1 && ranges[0].start() == '\0' && ranges[0].end() == char::MAX {
            return Ok(Node::Dot);
        }

        let mut literals = Vec::new();
        for range in ranges {
            for ch in range.start()..=range.end() {
                let byte = u8::try_from(u32::from(ch))
                    .map_err(|_| CompileError::UnsupportedSymbol(ch))?;
                literals.push(Node::Literal(byte));
            }
        }
        Ok(Node::altern_all(literals))
    }

    /// Repetitions become copies of the sub-expression followed by either a
    /// star or a chain of optional copies. Greediness does not change which
    /// lines match, so it is ignored.
    fn compile_repetition(&self, rep: &Repetition) -> CompileResult<Node> {
        let sub = self.compile(&rep.sub)?;

        let sub_states = sub.state_count();
        let tail_states = match rep.max {
            None => sub_states + 2,
            Some(max) => ((max - rep.min) as usize).saturating_mul(sub_states + 2),
        };
        let states = (rep.min as usize)
            .saturating_mul(sub_states)
            .saturating_add(tail_states);
        self.check_size(states)?;

        let mut parts: Vec<Node> = (0..rep.min).map(|_| sub.clone()).collect();

        match rep.max {
            None => parts.push(Node::star(sub)),
            Some(max) => {
                parts.extend((rep.min..max).map(|_| Node::optional(sub.clone())));
            }
        }

        Ok(Node::concat_all(parts))
    }

    fn check_size(&self, states: usize) -> CompileResult<()> {
        match self.size_limit {
            Some(limit) if states > limit => Err(CompileError::TooComplex { states, limit }),
            _ => Ok(()),
        }
    }
}
