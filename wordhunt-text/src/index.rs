use std::cmp::Ordering;
use std::collections::HashMap;

use wordhunt_common::TieBreak;

/// Word occurrence counts, built once and read-only afterwards.
///
/// Every stored word has a count of at least one; lookups of unknown words
/// report zero without inserting anything.
///
/// ```
/// use wordhunt_common::TieBreak;
/// use wordhunt_text::FrequencyIndex;
///
/// let index = FrequencyIndex::build(["a", "b", "a", "c", "a", "c"]);
/// assert_eq!(index.count("a"), 3);
/// assert_eq!(index.count("zzz"), 0);
///
/// let order: Vec<_> = index.ascending(TieBreak::Lexical);
/// assert_eq!(order, [("b", 1), ("c", 2), ("a", 3)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyIndex {
    counts: HashMap<String, u64>,
}

impl FrequencyIndex {
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for word in words {
            let word = word.as_ref();
            match counts.get_mut(word) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(word.to_owned(), 1);
                }
            }
        }
        Self { counts }
    }

    /// Occurrences of `word`, or 0 when it never appeared.
    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens that were indexed.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Every word with its count, ordered by ascending count.
    ///
    /// Equal counts follow `tie_break`: alphabetical for
    /// [`TieBreak::Lexical`], whatever the unstable sort leaves for
    /// [`TieBreak::Unspecified`].
    pub fn ascending(&self, tie_break: TieBreak) -> Vec<(&str, u64)> {
        let mut words: Vec<&str> = self.counts.keys().map(String::as_str).collect();
        let cmp = by_count(&self.counts);
        match tie_break {
            TieBreak::Lexical => words.sort_by(|a, b| cmp(*a, *b).then_with(|| a.cmp(b))),
            TieBreak::Unspecified => words.sort_unstable_by(|a, b| cmp(*a, *b)),
        }
        words
            .into_iter()
            .map(|word| (word, self.count(word)))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::build(iter)
    }
}

/// Comparator over words that orders them by their count in `counts`.
fn by_count(counts: &HashMap<String, u64>) -> impl Fn(&str, &str) -> Ordering + '_ {
    move |a: &str, b: &str| {
        let count_of = |word: &str| counts.get(word).copied().unwrap_or(0);
        count_of(a).cmp(&count_of(b))
    }
}
