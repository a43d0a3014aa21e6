/*!
Exact substring search with the Knuth-Morris-Pratt algorithm.

The failure table of a pattern `p` has `|p| + 1` entries. Entry `i` is the
length of the longest proper prefix of `p[..i]` that is also a suffix of it,
and entry `0` is the sentinel `-1`. After a mismatch at pattern offset `j`,
search resumes at offset `table[j]` without moving back in the text.

The strong variant additionally skips fallback offsets that would compare the
same pattern byte against the text again: when `p[i] == p[table[i]]`, a
mismatch at `i` is bound to fail at `table[i]` too, so entry `i` is replaced
by `table[table[i]]`. Entries are rewritten left to right, so chains of
identical bytes collapse all the way down, possibly to `-1`.
*/

/// The failure table of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureTable {
    entries: Vec<isize>,
}

impl FailureTable {
    /// Computes the classic longest-proper-border table.
    pub fn basic(pattern: &[u8]) -> FailureTable {
        let m = pattern.len();
        let mut entries = vec![0isize; m + 1];
        entries[0] = -1;

        let mut i = 1;
        let mut len = 0;
        while i < m {
            if pattern[i] == pattern[len] {
                len += 1;
                entries[i + 1] = len as isize;
                i += 1;
            } else if len != 0 {
                // A basic entry past index 0 is never negative.
                len = entries[len] as usize;
            } else {
                entries[i + 1] = 0;
                i += 1;
            }
        }

        FailureTable { entries }
    }

    /// Computes the basic table, then applies the strong rewrite.
    pub fn strong(pattern: &[u8]) -> FailureTable {
        let mut table = FailureTable::basic(pattern);
        for i in 1..pattern.len() {
            let fallback = table.entries[i] as usize;
            if pattern[i] == pattern[fallback] {
                table.entries[i] = table.entries[fallback];
            }
        }
        table
    }

    pub fn as_slice(&self) -> &[isize] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Where to resume after a mismatch at pattern offset `j`. `None` means
    /// the text byte can be skipped altogether.
    #[inline]
    fn fallback(&self, j: usize) -> Option<usize> {
        usize::try_from(self.entries[j]).ok()
    }
}

/// Returns the start of the first occurrence of `pattern` in `text`.
///
/// `table` must have been computed for `pattern`, with either
/// [`FailureTable::basic`] or [`FailureTable::strong`].
///
/// # Panics
///
/// Panics if `table` does not have `pattern.len() + 1` entries.
pub fn search(text: &[u8], pattern: &[u8], table: &FailureTable) -> Option<usize> {
    search_from(text, pattern, table, 0)
}

/// Like [`search`], ignoring occurrences that start before `start`.
///
/// The empty pattern occurs at every offset, so it matches at `start` as
/// long as `start` is within the text.
///
/// # Panics
///
/// Panics if `table` does not have `pattern.len() + 1` entries.
pub fn search_from(
    text: &[u8],
    pattern: &[u8],
    table: &FailureTable,
    start: usize,
) -> Option<usize> {
    assert_eq!(
        table.len(),
        pattern.len() + 1,
        "failure table was computed for a pattern of another length"
    );
    if pattern.is_empty() {
        return if start <= text.len() { Some(start) } else { None };
    }

    let mut i = start;
    let mut j = 0;
    while i < text.len() {
        if text[i] == pattern[j] {
            i += 1;
            j += 1;
            if j == pattern.len() {
                return Some(i - j);
            }
        } else if j == 0 {
            i += 1;
        } else {
            match table.fallback(j) {
                Some(k) => j = k,
                None => {
                    i += 1;
                    j = 0;
                }
            }
        }
    }
    None
}

/// A compiled literal pattern.
#[derive(Debug, Clone)]
pub struct Kmp {
    pattern: Vec<u8>,
    table: FailureTable,
}

impl Kmp {
    /// Compiles `pattern` with the strong failure table.
    pub fn new<P: AsRef<[u8]>>(pattern: P) -> Kmp {
        let pattern = pattern.as_ref().to_vec();
        let table = FailureTable::strong(&pattern);
        Kmp { pattern, table }
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn table(&self) -> &FailureTable {
        &self.table
    }

    /// Returns the start of the first occurrence of the pattern in `text`.
    pub fn find<H: AsRef<[u8]> + ?Sized>(&self, text: &H) -> Option<usize> {
        search(text.as_ref(), &self.pattern, &self.table)
    }

    /// Returns the start of the first occurrence at or after `start`.
    pub fn find_at<H: AsRef<[u8]> + ?Sized>(&self, text: &H, start: usize) -> Option<usize> {
        search_from(text.as_ref(), &self.pattern, &self.table, start)
    }

    /// Iterates over the starts of non-overlapping occurrences.
    pub fn find_iter<'k, 't>(&'k self, text: &'t [u8]) -> FindIter<'k, 't> {
        FindIter {
            kmp: self,
            text,
            next: Some(0),
        }
    }
}

/// Iterator returned by [`Kmp::find_iter`].
#[derive(Debug)]
pub struct FindIter<'k, 't> {
    kmp: &'k Kmp,
    text: &'t [u8],
    next: Option<usize>,
}

impl<'k, 't> Iterator for FindIter<'k, 't> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let from = self.next?;
        let found = self.kmp.find_at(self.text, from);
        // An empty pattern still has to move forward.
        self.next = found.map(|start| start + self.kmp.pattern.len().max(1));
        found
    }
}
