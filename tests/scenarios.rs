use anyhow::Result;
use regrep::{
    search_lines, FailureTable, Kmp, LineMatcher, Match, Pattern, PatternBuilder, ScanMode,
};

use crate::init_logger;

#[test]
fn star_then_literal() -> Result<()> {
    init_logger();
    let pattern = Pattern::new("a*b")?;
    assert!(pattern.is_match("aaab"));
    assert!(!pattern.is_match("c"));
    Ok(())
}

#[test]
fn alternation_under_star() -> Result<()> {
    let pattern = Pattern::new("(a|b)*c")?;
    assert!(pattern.is_match("aabbc"));
    assert!(pattern.is_match("c"));
    assert!(!pattern.is_match("aabb"));
    Ok(())
}

#[test]
fn any_byte() -> Result<()> {
    let pattern = Pattern::new("a.")?;
    assert!(pattern.is_match("ax"));
    assert!(!pattern.is_match("a"));
    assert!(pattern.is_match(&b"a\xff"[..]));
    Ok(())
}

#[test]
fn literal_dot_is_not_any() -> Result<()> {
    let pattern = Pattern::new(r"a\.")?;
    assert!(pattern.is_match("a."));
    assert!(!pattern.is_match("ax"));
    Ok(())
}

#[test]
fn kmp_first_occurrence() {
    let kmp = Kmp::new("azerty");
    assert_eq!(kmp.find("azertyazerty"), Some(0));
    assert_eq!(kmp.find_iter(b"azertyazerty").collect::<Vec<_>>(), vec![0, 6]);
}

#[test]
fn kmp_tables() {
    assert_eq!(
        FailureTable::basic(b"ababaca").as_slice(),
        &[-1, 0, 0, 1, 2, 3, 0, 1]
    );
    let strong = FailureTable::strong(b"ababaca");
    let basic = FailureTable::basic(b"ababaca");
    let differing: Vec<usize> = (0..basic.len())
        .filter(|&i| basic.as_slice()[i] != strong.as_slice()[i])
        .collect();
    // Exactly the offsets where the pattern byte repeats its fallback byte.
    assert_eq!(differing, vec![2, 3, 4, 6]);
}

#[test]
fn minimizing_a_minimal_dfa() -> Result<()> {
    let pattern = Pattern::new("(a|b)*c(d|e)")?;
    let once = pattern.dfa();
    let twice = once.minimize();
    assert_eq!(once.state_count(), twice.state_count());
    assert_eq!(once.to_string(), twice.to_string());
    Ok(())
}

#[test]
fn restart_scan_misses_overlapping_start() -> Result<()> {
    let restart = Pattern::new("ab")?;
    let multi = PatternBuilder::new()
        .scan_mode(ScanMode::MultiStart)
        .build("ab")?;

    assert!(!restart.is_match("aab"));
    assert!(multi.is_match("aab"));
    // `find` searches every offset in both modes.
    assert_eq!(restart.find("aab"), Some(Match { start: 1, end: 3 }));

    for line in ["ab", "xab", "abab", "b", "ba"] {
        assert_eq!(restart.is_match(line), multi.is_match(line), "{}", line);
    }
    Ok(())
}

#[test]
fn rendering() -> Result<()> {
    let pattern = Pattern::new("a*b")?;
    assert_eq!(
        pattern.nfa().to_string(),
        "\
Start State : 2
Final State : 5
State 0 - a -> State 1
State 1 - ε -> State 0
State 1 - ε -> State 3
State 2 - ε -> State 0
State 2 - ε -> State 3
State 3 - ε -> State 4
State 4 - b -> State 5
"
    );
    assert_eq!(
        pattern.dfa().to_string(),
        "\
Start State : 0
Final States : 1
State 0 - a -> State 0
State 0 - b -> State 1
"
    );
    Ok(())
}

#[test]
fn equivalent_patterns_render_identically() -> Result<()> {
    let first = Pattern::new("(a|b)*")?;
    let second = Pattern::new("(a*b*)*")?;
    assert_eq!(first.dfa().to_string(), second.dfa().to_string());
    Ok(())
}

#[test]
fn both_strategies_agree_on_literals() -> Result<()> {
    let text = b"qwerty\nazerty\nazer ty\nxxazertyxx\n";
    let pattern = PatternBuilder::new()
        .scan_mode(ScanMode::MultiStart)
        .build("azerty")?;
    let kmp = Kmp::new("azerty");

    let by_pattern = search_lines(&pattern, &text[..])?;
    let by_kmp = search_lines(&kmp, &text[..])?;
    assert_eq!(by_pattern, by_kmp);
    assert_eq!(by_kmp.iter().map(|m| m.number).collect::<Vec<_>>(), vec![2, 4]);

    let matchers: [&dyn LineMatcher; 2] = [&pattern, &kmp];
    for matcher in matchers {
        assert!(matcher.is_match_line(b"azerty"));
    }
    Ok(())
}
