pub mod completion;
pub mod error;
pub mod logging;

pub use completion::{
    CompletionConfig, FuzzyMatcher, SharedCompleter, Suggestion, SuggestionKind, SuggestionRanker,
    TrieStore, WordCompleter, match_case,
};
pub use error::{CompleterError, Result};
