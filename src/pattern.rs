use regrep_automata::{
    nfa, parser_builder, Compiler, Determinizer, Match, ScanMode, Scanner, DFA, NFA,
};

use crate::error::Error;

/// A regular expression compiled to a DFA.
///
/// ```
/// use regrep::Pattern;
///
/// let pattern = Pattern::new("(a|b)*c").unwrap();
/// assert!(pattern.is_match("aabbc"));
/// assert!(!pattern.is_match("aabb"));
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    nfa: NFA,
    dfa: DFA,
    mode: ScanMode,
}

impl Pattern {
    /// Compiles `pattern` with the default configuration.
    pub fn new(pattern: &str) -> Result<Pattern, Error> {
        PatternBuilder::new().build(pattern)
    }

    /// The source text of the pattern.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The Thompson NFA the DFA was built from.
    pub fn nfa(&self) -> &NFA {
        &self.nfa
    }

    /// The DFA used for matching, minimized unless disabled.
    pub fn dfa(&self) -> &DFA {
        &self.dfa
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.mode
    }

    fn scanner(&self) -> Scanner<'_> {
        Scanner::new(&self.dfa).with_mode(self.mode)
    }

    /// Whether the pattern matches somewhere in `line`, according to the
    /// configured [`ScanMode`].
    pub fn is_match<H: AsRef<[u8]> + ?Sized>(&self, line: &H) -> bool {
        self.scanner().is_match(line.as_ref())
    }

    /// The leftmost match in `line`. Always searches from every offset,
    /// whatever the scan mode.
    pub fn find<H: AsRef<[u8]> + ?Sized>(&self, line: &H) -> Option<Match> {
        self.scanner().find(line.as_ref())
    }

    /// All non-overlapping matches in `line`.
    pub fn find_all<H: AsRef<[u8]> + ?Sized>(&self, line: &H) -> Vec<Match> {
        self.scanner().find_all(line.as_ref())
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Configures the compilation of a [`Pattern`].
#[derive(Debug, Clone)]
pub struct PatternBuilder {
    case_insensitive: bool,
    minimize: bool,
    scan_mode: ScanMode,
    nfa_size_limit: Option<usize>,
    dfa_size_limit: Option<usize>,
}

impl Default for PatternBuilder {
    fn default() -> Self {
        PatternBuilder {
            case_insensitive: false,
            minimize: true,
            scan_mode: ScanMode::default(),
            nfa_size_limit: Some(10_000),
            dfa_size_limit: Some(10_000),
        }
    }
}

impl PatternBuilder {
    pub fn new() -> PatternBuilder {
        PatternBuilder::default()
    }

    /// ASCII case-insensitive matching. Disabled by default.
    pub fn case_insensitive(&mut self, yes: bool) -> &mut PatternBuilder {
        self.case_insensitive = yes;
        self
    }

    /// Minimize the DFA after subset construction. Enabled by default.
    pub fn minimize(&mut self, yes: bool) -> &mut PatternBuilder {
        self.minimize = yes;
        self
    }

    /// How [`Pattern::is_match`] scans a line. Defaults to
    /// [`ScanMode::Restart`].
    pub fn scan_mode(&mut self, mode: ScanMode) -> &mut PatternBuilder {
        self.scan_mode = mode;
        self
    }

    /// Maximum number of NFA states, `None` for no limit. Defaults to
    /// 10 000.
    ///
    /// Counted repetitions are checked while the pattern is lowered, before
    /// they are expanded. Byte classes are expanded into one alternative per
    /// byte, so they are expensive: `[^a]` alone takes 1018 states and
    /// `[^a]{10}` is over the default limit.
    pub fn nfa_size_limit(&mut self, limit: Option<usize>) -> &mut PatternBuilder {
        self.nfa_size_limit = limit;
        self
    }

    /// Maximum number of DFA states before minimization, `None` for no
    /// limit.
    pub fn dfa_size_limit(&mut self, limit: Option<usize>) -> &mut PatternBuilder {
        self.dfa_size_limit = limit;
        self
    }

    pub fn build(&self, pattern: &str) -> Result<Pattern, Error> {
        let hir = parser_builder()
            .case_insensitive(self.case_insensitive)
            .build()
            .parse(pattern)?;
        let tree = Compiler::new()
            .size_limit(self.nfa_size_limit)
            .compile(&hir)?;
        let nfa = nfa::Builder::new()
            .size_limit(self.nfa_size_limit)
            .build(&tree)?;
        let mut dfa = Determinizer::new()
            .size_limit(self.dfa_size_limit)
            .determinize(&nfa)?;
        if self.minimize {
            dfa = dfa.minimize();
        }

        Ok(Pattern {
            source: pattern.to_string(),
            nfa,
            dfa,
            mode: self.scan_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regrep_automata::CompileError;

    #[test]
    fn test_builder_defaults() {
        let pattern = Pattern::new("a*b").unwrap();
        assert_eq!(pattern.as_str(), "a*b");
        assert_eq!(pattern.scan_mode(), ScanMode::Restart);
        assert_eq!(pattern.dfa().state_count(), 2);
        assert_eq!(pattern.nfa().state_count(), 6);
    }

    #[test]
    fn test_without_minimization() {
        let pattern = PatternBuilder::new().minimize(false).build("a*b").unwrap();
        assert_eq!(pattern.dfa().state_count(), 3);
        assert!(pattern.is_match("aaab"));
    }

    #[test]
    fn test_case_insensitive() {
        let pattern = PatternBuilder::new()
            .case_insensitive(true)
            .build("abc")
            .unwrap();
        assert!(pattern.is_match("xABc"));
        assert!(!Pattern::new("abc").unwrap().is_match("xABc"));
    }

    #[test]
    fn test_size_limits() {
        let err = PatternBuilder::new()
            .nfa_size_limit(Some(3))
            .build("ab")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Compile(CompileError::TooComplex { states: 4, limit: 3 })
        ));

        let err = PatternBuilder::new()
            .dfa_size_limit(Some(2))
            .build("abc")
            .unwrap_err();
        assert!(matches!(err, Error::Compile(CompileError::TooComplex { .. })));
    }

    #[test]
    fn test_nested_repetitions_hit_the_limit() {
        let err = Pattern::new("a{1000}{1000}{1000}").unwrap_err();
        assert!(matches!(
            err,
            Error::Compile(CompileError::TooComplex {
                states: 2_000_000,
                limit: 10_000
            })
        ));

        let err = PatternBuilder::new()
            .nfa_size_limit(Some(100))
            .build("(a|b){60}")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Compile(CompileError::TooComplex { limit: 100, .. })
        ));
    }

    #[test]
    fn test_byte_classes_need_a_larger_limit() {
        assert!(matches!(
            Pattern::new("[^a]{10}"),
            Err(Error::Compile(CompileError::TooComplex { .. }))
        ));
        let pattern = PatternBuilder::new()
            .nfa_size_limit(Some(20_000))
            .build("[^a]{10}")
            .unwrap();
        assert!(pattern.is_match("bcdefghijk"));
        assert!(!pattern.is_match("bcdefghija"));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(Pattern::new("(a"), Err(Error::Syntax(_))));
        assert!(matches!(
            Pattern::new("a$"),
            Err(Error::Compile(CompileError::UnsupportedFeature(_)))
        ));
    }
}
