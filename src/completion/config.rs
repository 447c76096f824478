//! Tunable completion policy
//!
//! Everything here is policy rather than algorithm: the minimum word length the
//! store accepts, how many edits a query of a given length may absorb, whether
//! exact matches are weighted by insertion frequency, and how aggressively the
//! fuzzy candidate buffer is compacted.
//!
//! Configuration is read from JSON. Every field is optional; missing fields take
//! the defaults below.
//!
//! ```json
//! {
//!   "min_word_length": 2,
//!   "edit_budget": {
//!     "steps": [{ "max_len": 4, "edits": 1 }, { "max_len": 8, "edits": 2 }],
//!     "max_edits": 3
//!   },
//!   "rank_by_frequency": false,
//!   "compaction_factor": 4
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CompleterError, Result};

/// Words shorter than this (in characters) are never stored.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 2;

/// Fuzzy candidate buffer is kept within this multiple of the requested limit.
pub const DEFAULT_COMPACTION_FACTOR: usize = 4;

/// One breakpoint of the edit budget: queries of at most `max_len` characters
/// may be matched with up to `edits` edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStep {
    pub max_len: usize,
    pub edits: usize,
}

/// Maps query length to the maximum edit distance allowed for fuzzy matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditBudget {
    /// Breakpoints, strictly ascending by `max_len`
    pub steps: Vec<BudgetStep>,
    /// Budget for queries longer than every breakpoint
    pub max_edits: usize,
}

impl Default for EditBudget {
    fn default() -> Self {
        Self {
            steps: vec![
                BudgetStep { max_len: 4, edits: 1 },
                BudgetStep { max_len: 8, edits: 2 },
            ],
            max_edits: 3,
        }
    }
}

impl EditBudget {
    /// Edit budget for a query of `query_len` characters
    pub fn for_length(&self, query_len: usize) -> usize {
        self.steps
            .iter()
            .find(|step| query_len <= step.max_len)
            .map(|step| step.edits)
            .unwrap_or(self.max_edits)
    }

    fn validate(&self) -> Result<()> {
        for pair in self.steps.windows(2) {
            if pair[0].max_len >= pair[1].max_len {
                return Err(CompleterError::InvalidConfig(format!(
                    "edit budget steps must be strictly ascending by max_len ({} then {})",
                    pair[0].max_len, pair[1].max_len
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub min_word_length: usize,
    pub edit_budget: EditBudget,
    /// Reorder exact-prefix matches by descending insertion count. Every word
    /// under the prefix is considered, not just the first alphabetical ones.
    pub rank_by_frequency: bool,
    pub compaction_factor: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            edit_budget: EditBudget::default(),
            rank_by_frequency: false,
            compaction_factor: DEFAULT_COMPACTION_FACTOR,
        }
    }
}

impl CompletionConfig {
    /// Load and validate a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| CompleterError::io(path, e))?;
        let config: Self = serde_json::from_str(&text).map_err(|source| CompleterError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!("Loaded completion config from {:?}: {:?}", path, config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_word_length == 0 {
            return Err(CompleterError::InvalidConfig(
                "min_word_length must be at least 1".to_string(),
            ));
        }
        if self.compaction_factor == 0 {
            return Err(CompleterError::InvalidConfig(
                "compaction_factor must be at least 1".to_string(),
            ));
        }
        self.edit_budget.validate()
    }
}
