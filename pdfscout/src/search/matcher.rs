use crate::errors::{SearchError, SearchResult};

/// Bad-character shift table for a single keyword.
///
/// Every byte that does not occur in `keyword[..len - 1]` shifts by the full
/// keyword length; bytes that do occur shift so that their last such
/// occurrence lines up with the cursor. Entries are always in `1..=len` for a
/// non-empty keyword.
#[derive(Debug, Clone)]
pub struct SkipTable {
    shifts: [usize; 256],
}

impl SkipTable {
    /// Builds the table for `keyword`
    pub fn new(keyword: &[u8]) -> Self {
        let len = keyword.len();
        let mut shifts = [len; 256];
        for (i, &byte) in keyword.iter().enumerate().take(len.saturating_sub(1)) {
            shifts[byte as usize] = len - i - 1;
        }
        Self { shifts }
    }

    /// How far the cursor advances when `byte` sits under it after a mismatch
    #[inline]
    pub fn shift(&self, byte: u8) -> usize {
        self.shifts[byte as usize]
    }
}

/// Exact single-keyword matcher over raw bytes.
///
/// The skip table is rebuilt on every call, so a matcher can be shared
/// between threads without sharing any per-search state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatcher {
    keyword: Vec<u8>,
}

impl PatternMatcher {
    /// Creates a matcher for `keyword`, rejecting an empty keyword
    pub fn new(keyword: impl Into<Vec<u8>>) -> SearchResult<Self> {
        let keyword = keyword.into();
        if keyword.is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        Ok(Self { keyword })
    }

    pub fn keyword(&self) -> &[u8] {
        &self.keyword
    }

    /// Length of the keyword in bytes (never zero)
    pub fn len(&self) -> usize {
        self.keyword.len()
    }

    /// Always false, construction rejects an empty keyword
    pub fn is_empty(&self) -> bool {
        self.keyword.is_empty()
    }

    /// Returns true if the keyword occurs anywhere in `haystack`
    pub fn is_match(&self, haystack: &[u8]) -> bool {
        self.find(haystack).is_some()
    }

    /// Returns the offset of the first occurrence of the keyword in `haystack`
    pub fn find(&self, haystack: &[u8]) -> Option<usize> {
        let table = SkipTable::new(&self.keyword);
        find_with_table(&table, &self.keyword, haystack)
    }
}

/// One-shot form of [`PatternMatcher::is_match`].
///
/// An empty keyword trivially matches, the same way `str::contains("")` does.
pub fn contains_keyword(buffer: &[u8], keyword: &[u8]) -> bool {
    if keyword.is_empty() {
        return true;
    }
    let table = SkipTable::new(keyword);
    find_with_table(&table, keyword, buffer).is_some()
}

#[cfg(test)]
thread_local! {
    // Number of alignments tried by the last search on this thread
    static ALIGNMENTS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

// Caller guarantees `keyword` is non-empty.
fn find_with_table(table: &SkipTable, keyword: &[u8], haystack: &[u8]) -> Option<usize> {
    let len = keyword.len();
    if haystack.len() < len {
        return None;
    }

    #[cfg(test)]
    ALIGNMENTS.with(|count| count.set(0));

    let last = len - 1;
    let mut cursor = last;
    while cursor < haystack.len() {
        #[cfg(test)]
        ALIGNMENTS.with(|count| count.set(count.get() + 1));

        let mut k = 0;
        while k < len && keyword[last - k] == haystack[cursor - k] {
            k += 1;
        }
        if k == len {
            return Some(cursor - last);
        }
        cursor += table.shift(haystack[cursor]);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn alignments() -> usize {
        ALIGNMENTS.with(|count| count.get())
    }

    #[test]
    fn test_stops_at_first_occurrence() {
        let mut haystack = b"/Encrypt".to_vec();
        haystack.extend(std::iter::repeat(b'z').take(1 << 20));
        haystack.extend_from_slice(b"/Encrypt");

        let matcher = PatternMatcher::new("/Encrypt").unwrap();
        assert_eq!(matcher.find(&haystack), Some(0));
        assert_eq!(alignments(), 1);

        assert!(contains_keyword(&haystack, b"/Encrypt"));
        assert_eq!(alignments(), 1);
    }

    #[test]
    fn test_stops_after_later_first_occurrence() {
        // 'z' never occurs in the keyword, so every miss skips a full 8 bytes
        let mut haystack = vec![b'z'; 4096];
        haystack[80..88].copy_from_slice(b"/Encrypt");
        haystack[1000..1008].copy_from_slice(b"/Encrypt");

        let matcher = PatternMatcher::new("/Encrypt").unwrap();
        assert_eq!(matcher.find(&haystack), Some(80));
        assert_eq!(alignments(), 11);
    }

    #[test]
    fn test_full_miss_visits_every_skip() {
        let haystack = vec![b'z'; 800];
        let matcher = PatternMatcher::new("/Encrypt").unwrap();
        assert_eq!(matcher.find(&haystack), None);
        assert_eq!(alignments(), 100);
    }

    #[test]
    fn test_len_and_is_empty() {
        let matcher = PatternMatcher::new("/Encrypt").unwrap();
        assert_eq!(matcher.len(), 8);
        assert!(!matcher.is_empty());
    }

    #[test]
    fn test_skip_table_defaults_to_keyword_length() {
        let table = SkipTable::new(b"/Encrypt");
        assert_eq!(table.shift(b'z'), 8);
        assert_eq!(table.shift(0x00), 8);
        assert_eq!(table.shift(0xFF), 8);
    }

    #[test]
    fn test_skip_table_uses_last_occurrence_before_final_byte() {
        let table = SkipTable::new(b"/Encrypt");
        assert_eq!(table.shift(b'/'), 7);
        assert_eq!(table.shift(b'E'), 6);
        assert_eq!(table.shift(b'p'), 1);
        // 't' only appears in the final position
        assert_eq!(table.shift(b't'), 8);

        let table = SkipTable::new(b"abcab");
        assert_eq!(table.shift(b'a'), 1);
        assert_eq!(table.shift(b'b'), 3);
        assert_eq!(table.shift(b'c'), 2);
    }

    #[test]
    fn test_skip_table_entries_are_bounded() {
        let keyword = b"aaab\x00\xffxy";
        let table = SkipTable::new(keyword);
        for byte in 0..=255u8 {
            let shift = table.shift(byte);
            assert!(shift >= 1 && shift <= keyword.len(), "byte {byte}: {shift}");
        }
    }

    #[test]
    fn test_empty_keyword_is_rejected() {
        assert!(matches!(
            PatternMatcher::new(Vec::new()),
            Err(SearchError::EmptyPattern)
        ));
        assert!(contains_keyword(b"anything", b""));
    }

    #[test]
    fn test_basic_matches() {
        let matcher = PatternMatcher::new("/Encrypt").unwrap();
        assert!(matcher.is_match(b"xxxx/Encryptxxxx"));
        assert!(!matcher.is_match(b"no marker here"));
        assert!(!matcher.is_match(b""));
        assert!(matcher.is_match(b"/Encrypt"));
        assert!(!matcher.is_match(b"/Encryp"));
        assert!(!matcher.is_match(b"/encrypt"));
    }

    #[test]
    fn test_haystack_shorter_than_keyword() {
        let matcher = PatternMatcher::new("/Encrypt").unwrap();
        for len in 0..8 {
            assert!(!matcher.is_match(&b"/Encrypt"[..len]));
        }
    }

    #[test]
    fn test_find_reports_first_occurrence() {
        let matcher = PatternMatcher::new("/Encrypt").unwrap();
        let repeated = b"/Encrypt".repeat(64);
        assert_eq!(matcher.find(&repeated), Some(0));

        assert_eq!(matcher.find(b"ab/Encrypt/Encrypt"), Some(2));
        assert_eq!(matcher.find(b"tail /Encrypt"), Some(5));
    }

    #[test]
    fn test_binary_alphabet() {
        let keyword = [0x00, 0xFF, 0x80, 0x00];
        let matcher = PatternMatcher::new(keyword.to_vec()).unwrap();
        let mut haystack = vec![0xFFu8; 100];
        haystack[40..44].copy_from_slice(&keyword);
        assert_eq!(matcher.find(&haystack), Some(40));
        assert!(!matcher.is_match(&[0x00, 0xFF, 0x80, 0x01]));
    }

    #[test]
    fn test_repeated_characters() {
        let matcher = PatternMatcher::new("aaab").unwrap();
        assert_eq!(matcher.find(b"aaaaaaaaaaaaaaab"), Some(12));
        assert!(!matcher.is_match(b"aaaaaaaaaaaaaaaa"));
    }

    #[test]
    fn test_agrees_with_brute_force() {
        // Small alphabet so that partial matches are frequent
        let keywords: [&[u8]; 5] = [b"a", b"ab", b"aba", b"abcab", b"bbab"];
        let mut state: u32 = 0x2545_F491;
        for _ in 0..500 {
            let mut haystack = Vec::with_capacity(40);
            for _ in 0..(state % 40) {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                haystack.push(b'a' + (state % 3) as u8);
            }
            for keyword in keywords {
                let matcher = PatternMatcher::new(keyword).unwrap();
                assert_eq!(
                    matcher.find(&haystack),
                    brute_force(&haystack, keyword),
                    "keyword {:?} in {:?}",
                    keyword,
                    haystack
                );
                assert_eq!(
                    contains_keyword(&haystack, keyword),
                    brute_force(&haystack, keyword).is_some()
                );
            }
        }
    }
}
