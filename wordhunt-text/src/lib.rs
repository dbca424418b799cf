//! Text pipeline: markup stripping, tokenization and word counting.
//!
//! - `strip`: line flattening and delimiter-based tag removal
//! - `tokenize`: space splitting with punctuation trimming
//! - `index`: the [`FrequencyIndex`] built from the token stream
//!
//! [`analyze`] chains all three over a fetched page.

mod index;
mod strip;
mod tokenize;

pub use index::FrequencyIndex;
pub use strip::{flatten_lines, remove_block, strip_markup};
pub use tokenize::{tokenize, TRIM_CHARS};

/// Turn a raw page body into word counts.
///
/// ```
/// let index = wordhunt_text::analyze("<html><body>Hello, world! Hello.</body></html>");
/// assert_eq!(index.count("Hello"), 2);
/// assert_eq!(index.count("world"), 1);
/// assert_eq!(index.len(), 2);
/// ```
pub fn analyze(raw: &str) -> FrequencyIndex {
    let flat = flatten_lines(raw);
    let text = strip_markup(&flat);
    tracing::debug!(
        raw_len = raw.len(),
        flat_len = flat.len(),
        text_len = text.len(),
        "text.stripped"
    );

    let index = FrequencyIndex::build(tokenize(&text));
    tracing::debug!(
        distinct = index.len(),
        total = index.total(),
        "text.indexed"
    );
    index
}
