use crate::dfa::DFA;

/// How [`Scanner::is_match`] walks a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// A single cursor over the line. When the current state has no edge for
    /// the current byte, the cursor goes back to the start state and that
    /// byte is skipped without being tried from the start state. This can
    /// miss a match beginning at the skipped byte: `ab` is not found in
    /// `aab`.
    #[default]
    Restart,
    /// Runs the DFA from every offset of the line and never misses a match.
    MultiStart,
}

/// A match of a DFA within a line. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
}

/// Drives a [`DFA`] over lines of text.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    dfa: &'a DFA,
    mode: ScanMode,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given DFA, in [`ScanMode::Restart`] mode
    pub fn new(dfa: &'a DFA) -> Self {
        Self {
            dfa,
            mode: ScanMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Whether the DFA reaches an accepting state somewhere in `line`.
    pub fn is_match(&self, line: &[u8]) -> bool {
        match self.mode {
            ScanMode::Restart => self.scan_restart(line),
            ScanMode::MultiStart => self.find(line).is_some(),
        }
    }

    fn scan_restart(&self, line: &[u8]) -> bool {
        let start = self.dfa.start();
        let mut state = start;

        for &byte in line {
            if self.dfa.is_accepting(state) {
                return true;
            }
            // `next` tries the byte's own edge before the `Any` edge.
            state = self.dfa.next(state, byte).unwrap_or(start);
        }

        self.dfa.is_accepting(state)
    }

    /// Find the leftmost match in `line`, ending at the first accepting
    /// state reached from that start.
    pub fn find(&self, line: &[u8]) -> Option<Match> {
        self.find_at(line, 0)
    }

    /// Like [`Scanner::find`], ignoring matches that start before `from`.
    pub fn find_at(&self, line: &[u8], from: usize) -> Option<Match> {
        (from..=line.len()).find_map(|start| {
            self.match_at(line, start).map(|end| Match { start, end })
        })
    }

    /// Find all non-overlapping matches in `line`, left to right.
    pub fn find_all(&self, line: &[u8]) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut from = 0;

        while from <= line.len() {
            match self.find_at(line, from) {
                Some(m) => {
                    // Empty matches still have to make progress.
                    from = m.end.max(m.start + 1);
                    matches.push(m);
                }
                None => break,
            }
        }

        matches
    }

    /// Runs the DFA from `start` and returns the end of the shortest match.
    fn match_at(&self, line: &[u8], start: usize) -> Option<usize> {
        let mut state = self.dfa.start();
        if self.dfa.is_accepting(state) {
            return Some(start);
        }

        for (offset, &byte) in line[start..].iter().enumerate() {
            state = self.dfa.next(state, byte)?;
            if self.dfa.is_accepting(state) {
                return Some(start + offset + 1);
            }
        }

        None
    }
}
