/*!
This crate matches lines of text with two independent strategies:

* [`Pattern`] compiles a regular expression into a minimal DFA. The pattern
  is parsed by `regex-syntax`, lowered to a small syntax tree, turned into a
  Thompson NFA, determinized by subset construction and minimized by
  partition refinement. The automata themselves live in the
  `regrep_automata` crate and are re-exported here.
* [`Kmp`] searches for a literal byte string with the Knuth-Morris-Pratt
  algorithm and its strong failure table.

Both implement [`LineMatcher`], so [`search_lines`] can run either of them
over anything that implements `BufRead`.

# Example

```
use regrep::{search_lines, Kmp, Pattern};

let text = b"nothing here\nfind azerty\nand aaab too\n";

let pattern = Pattern::new("a*b")?;
let lines: Vec<usize> = search_lines(&pattern, &text[..])?
    .into_iter()
    .map(|m| m.number)
    .collect();
assert_eq!(lines, vec![3]);

let kmp = Kmp::new("azerty");
assert_eq!(kmp.find("find azerty"), Some(5));
# Ok::<(), Box<dyn std::error::Error>>(())
```

# Scan modes

By default [`Pattern::is_match`] walks a line with a single cursor and goes
back to the start state, skipping the offending byte, whenever the DFA has no
edge for it ([`ScanMode::Restart`]). That walk can miss a match that starts at
the skipped byte:

```
use regrep::{Pattern, PatternBuilder, ScanMode};

assert!(!Pattern::new("ab")?.is_match("aab"));

let pattern = PatternBuilder::new()
    .scan_mode(ScanMode::MultiStart)
    .build("ab")?;
assert!(pattern.is_match("aab"));
# Ok::<(), regrep::Error>(())
```
*/

#![deny(missing_debug_implementations)]

pub use regrep_automata::{
    minimize, CompileError, Compiler, Determinizer, Match, Node, ScanMode, Scanner, Symbol,
    DFA, NFA,
};

pub use crate::error::Error;
pub use crate::kmp::{FailureTable, Kmp};
pub use crate::lines::{search_lines, LineMatch};
pub use crate::pattern::{Pattern, PatternBuilder};

mod error;
pub mod kmp;
mod lines;
mod pattern;

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

/// Something that decides whether a line matches.
pub trait LineMatcher {
    fn is_match_line(&self, line: &[u8]) -> bool;
}

impl LineMatcher for Pattern {
    fn is_match_line(&self, line: &[u8]) -> bool {
        self.is_match(line)
    }
}

impl LineMatcher for Kmp {
    fn is_match_line(&self, line: &[u8]) -> bool {
        self.find(line).is_some()
    }
}

impl<M: LineMatcher + ?Sized> LineMatcher for &M {
    fn is_match_line(&self, line: &[u8]) -> bool {
        (**self).is_match_line(line)
    }
}
