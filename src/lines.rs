use std::io::{self, BufRead};

use crate::LineMatcher;

/// A line that matched, as reported by [`search_lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// 1-based line number.
    pub number: usize,
    /// The line without its terminator.
    pub line: Vec<u8>,
}

/// Reads `reader` line by line and returns the lines `matcher` accepts.
///
/// Lines are split on `\n`; a trailing `\r` is removed as well. Lines do not
/// need to be valid UTF-8.
pub fn search_lines<M, R>(matcher: &M, reader: R) -> io::Result<Vec<LineMatch>>
where
    M: LineMatcher + ?Sized,
    R: BufRead,
{
    let mut matches = Vec::new();
    for (index, line) in reader.split(b'\n').enumerate() {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if matcher.is_match_line(&line) {
            matches.push(LineMatch {
                number: index + 1,
                line,
            });
        }
    }
    Ok(matches)
}
