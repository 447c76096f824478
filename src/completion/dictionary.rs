//! Word-list ingestion
//!
//! Dictionaries are plain text, one word per line. Each line is trimmed and
//! blank lines are skipped. A load either succeeds completely or leaves the
//! caller's store untouched: words are read in full before any of them is
//! inserted.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::trie::TrieStore;
use crate::error::{CompleterError, Result};

/// Read every non-blank, trimmed line from `reader`
pub fn read_words<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// Read a word list from a file
pub fn read_word_file(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| CompleterError::io(path, e))?;
    read_words(BufReader::new(file)).map_err(|e| CompleterError::io(path, e))
}

/// Insert every word of every file into `store`.
///
/// All files are read before the store is touched, so a missing or unreadable
/// file leaves `store` exactly as it was. Returns the number of new words.
pub fn load_into(store: &mut TrieStore, paths: &[impl AsRef<Path>]) -> Result<usize> {
    let mut batches = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let words = read_word_file(path)?;
        tracing::debug!("Read {} words from {:?}", words.len(), path);
        batches.push(words);
    }

    let before = store.len();
    for words in &batches {
        store.extend(words);
    }
    let added = store.len() - before;
    tracing::info!("Loaded {} new words ({} total)", added, store.len());
    Ok(added)
}

/// Normalize a word list: trim lines, drop blanks and sort.
///
/// Duplicates are kept and ordering is by code point, so the output is
/// stable regardless of the input order. Blank lines are dropped rather than
/// sorted to the top, so the result can be loaded back as a dictionary.
pub fn sort_word_list(input: &Path) -> Result<Vec<String>> {
    let mut words = read_word_file(input)?;
    words.sort_unstable();
    Ok(words)
}

/// Write one word per line
pub fn write_words<W: Write>(mut writer: W, words: &[String]) -> std::io::Result<()> {
    for word in words {
        writeln!(writer, "{}", word)?;
    }
    writer.flush()
}

/// Write one word per line to `path`, replacing its contents
pub fn write_word_file(path: &Path, words: &[String]) -> Result<()> {
    File::create(path)
        .and_then(|file| write_words(BufWriter::new(file), words))
        .map_err(|e| CompleterError::io(path, e))
}
