//! Interactive word-count queries.
//!
//! [`QueryLoop`] answers whitespace-delimited commands against a built
//! [`wordhunt_text::FrequencyIndex`]: `-all` lists every word by ascending
//! count, anything else is looked up verbatim.

mod command;
mod query_loop;

pub use command::{Command, LIST_ALL, parse_command};
pub use query_loop::{BANNER, LoopState, LoopSummary, QueryLoop};
