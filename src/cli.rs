//! Command-line surface for the `word-completer` binary

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use word_completer::completion::dictionary::{self, write_word_file, write_words};
use word_completer::completion::{CompletionConfig, SuggestionKind, WordCompleter, osa_distance};

#[derive(Debug, Parser)]
#[command(name = "word-completer", version, about = "Typo-tolerant word completion")]
pub struct Cli {
    /// Word list to load, one word per line (repeatable)
    #[arg(short, long = "dictionary", global = true)]
    pub dictionaries: Vec<PathBuf>,

    /// JSON completion configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "word_completer=trace" (defaults to RUST_LOG, then "info")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Disable ANSI colors in log output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Also write a DEBUG-level session log to the user cache directory
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print completions for a partially typed word
    Suggest {
        prefix: String,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
        /// Show match kind and replaced byte range
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print words within an edit distance of a query, with their distances
    Fuzzy {
        query: String,
        /// Edit budget (defaults to the configured budget for the query length)
        #[arg(short = 'k', long)]
        max_edits: Option<usize>,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Interactive session: "+word" adds, "-word" removes, anything else is a query
    Repl {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Normalize a word list: trim lines, drop blanks, sort
    Sort {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write every loaded word in alphabetical order
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn build_completer(cli: &Cli) -> Result<WordCompleter> {
    let config = match &cli.config {
        Some(path) => CompletionConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => CompletionConfig::default(),
    };

    let mut completer = WordCompleter::new(config);
    if !cli.dictionaries.is_empty() {
        completer
            .load_dictionaries(&cli.dictionaries)
            .context("Failed to load dictionaries")?;
    } else {
        tracing::warn!("No dictionary given; starting with an empty vocabulary");
    }
    Ok(completer)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Sort { input, output } => {
            let words = dictionary::sort_word_list(input)
                .with_context(|| format!("Failed to sort {:?}", input))?;
            match output {
                Some(path) => {
                    write_word_file(path, &words)?;
                    tracing::info!("Wrote {} sorted words to {:?}", words.len(), path);
                }
                None => write_words(&mut out, &words)?,
            }
        }
        Command::Suggest { prefix, limit, verbose } => {
            let completer = build_completer(&cli)?;
            for suggestion in completer.suggest(prefix, *limit) {
                if *verbose {
                    let kind = match suggestion.kind {
                        SuggestionKind::Exact => "exact",
                        SuggestionKind::Fuzzy => "fuzzy",
                    };
                    writeln!(
                        out,
                        "{}\t{}\t{}..{}",
                        suggestion.text, kind, suggestion.replaces.start, suggestion.replaces.end
                    )?;
                } else {
                    writeln!(out, "{}", suggestion.text)?;
                }
            }
        }
        Command::Fuzzy { query, max_edits, limit } => {
            let completer = build_completer(&cli)?;
            let canonical = query.trim().to_lowercase();
            let budget = match max_edits {
                Some(k) => *k,
                None => completer.config().edit_budget.for_length(canonical.chars().count()),
            };
            for word in completer.search_fuzzy(&canonical, budget, *limit) {
                writeln!(out, "{}\t{}", word, osa_distance(&word, &canonical))?;
            }
        }
        Command::Repl { limit } => {
            let mut completer = build_completer(&cli)?;
            tracing::info!("{} words loaded", completer.store().len());
            repl(&mut completer, *limit, io::stdin().lock(), &mut out)?;
        }
        Command::Export { output } => {
            let words = build_completer(&cli)?.store().words();
            match output {
                Some(path) => write_word_file(path, &words)?,
                None => write_words(&mut out, &words)?,
            }
        }
    }

    Ok(())
}

fn repl<R: BufRead, W: Write>(
    completer: &mut WordCompleter,
    limit: usize,
    input: R,
    out: &mut W,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read from stdin")?;
        let line = line.trim();
        if let Some(word) = line.strip_prefix('+') {
            let added = completer.add_word(word);
            writeln!(out, "{} {}", if added { "added" } else { "unchanged" }, word.trim())?;
        } else if let Some(word) = line.strip_prefix('-') {
            let removed = completer.remove_word(word);
            writeln!(out, "{} {}", if removed { "removed" } else { "unchanged" }, word.trim())?;
        } else if !line.is_empty() {
            writeln!(out, "{}", completer.get_suggestions(line, limit).join(" "))?;
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Cursor;

    #[test]
    fn test_repl_session() {
        let mut completer = WordCompleter::default();
        completer.extend(["apple", "apply"]);

        let input = indoc! {"
            app
            +applet
            app
            -apple
            -apple
            APP
        "};
        let mut out = Vec::new();
        repl(&mut completer, 5, Cursor::new(input), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            indoc! {"
                apple apply
                added applet
                apple applet apply
                removed apple
                unchanged apple
                APPLET APPLY
            "}
        );
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "word-completer",
            "suggest",
            "helo",
            "--limit",
            "3",
            "-d",
            "a.txt",
            "-d",
            "b.txt",
        ])
        .unwrap();
        assert_eq!(cli.dictionaries, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert!(matches!(cli.command, Command::Suggest { limit: 3, verbose: false, .. }));
    }

    #[test]
    fn test_export_after_load() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.txt");
        std::fs::write(&words, "Zebra\napple\n").unwrap();
        let output = dir.path().join("out.txt");

        let cli = Cli::try_parse_from([
            "word-completer",
            "export",
            "--output",
            output.to_str().unwrap(),
            "--dictionary",
            words.to_str().unwrap(),
        ])
        .unwrap();
        run(cli).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "apple\nzebra\n");
    }

    #[test]
    fn test_missing_dictionary_is_an_error() {
        let cli =
            Cli::try_parse_from(["word-completer", "suggest", "x", "-d", "/nonexistent/words.txt"])
                .unwrap();
        assert!(build_completer(&cli).is_err());
    }
}
