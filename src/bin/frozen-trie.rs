use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::EnvFilter;

use frozen_trie::{SearchConfig, Suggestions, Trie};

/// Query a frozen trie blob.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Blob file to load.
    #[arg(short, long)]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Raw)]
    format: Format,

    /// TOML file with search settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lowercase queries before lookup (overrides the config file).
    #[arg(long)]
    ignore_case: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Raw big-endian records.
    Raw,
    /// Base64 text.
    Base64,
    /// `var trie_data="...";` companion script.
    Script,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exit status 0 if the word is in the dictionary, 1 otherwise.
    Exists { word: String },
    /// Words starting with a prefix.
    Complete {
        prefix: String,
        #[arg(long, default_value_t = 10)]
        max: usize,
    },
    /// Words containing a string anywhere.
    Submatch {
        word: String,
        #[arg(long, default_value_t = 10)]
        max: usize,
    },
    /// Words within an edit distance, with their cost.
    Search {
        word: String,
        #[arg(long, default_value_t = 2)]
        max_cost: u32,
    },
    /// Run the keystroke suggestion pipeline.
    Suggest { query: String },
}

fn load(args: &Args) -> Result<Trie> {
    let trie = match args.format {
        Format::Raw => Trie::open(&args.input),
        Format::Base64 => std::fs::read(&args.input)
            .map_err(Into::into)
            .and_then(|text| Trie::from_payload(text, true)),
        Format::Script => Trie::open_script(&args.input),
    };
    trie.with_context(|| format!("loading {}", args.input.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("FROZEN_TRIE_LOG"))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => SearchConfig::default(),
    };

    let mut trie = load(&args)?;
    trie.set_case_sensitive(config.case_sensitive && !args.ignore_case);

    match &args.command {
        Command::Exists { word } => {
            let found = trie.exists(word)?;
            println!("{}", found);
            if !found {
                std::process::exit(1);
            }
        }
        Command::Complete { prefix, max } => {
            if let Some(node) = trie.lookup_node(prefix)? {
                for word in trie.lookup_completions(node, *max)? {
                    println!("{}", word);
                }
            }
        }
        Command::Submatch { word, max } => {
            for word in trie.lookup_submatches(word, *max)? {
                println!("{}", word);
            }
        }
        Command::Search { word, max_cost } => {
            for correction in trie.corrections(word, *max_cost)? {
                println!("{}\t{}", correction.word, correction.cost);
            }
        }
        Command::Suggest { query } => {
            let suggestions = trie.suggest(query, &config)?;
            let heading = match &suggestions {
                Suggestions::Empty => None,
                Suggestions::Exact(_) => Some("Found exact match"),
                Suggestions::Completions(_) => Some("Found some completions"),
                Suggestions::Fuzzy { .. } if suggestions.is_empty() => {
                    Some("Nothing relevant found")
                }
                Suggestions::Fuzzy { .. } => Some("Found some submatches or corrections"),
                Suggestions::Unmatched => Some("Nothing relevant found"),
            };
            if let Some(heading) = heading {
                eprintln!("{}", heading);
            }
            for word in suggestions.words() {
                println!("{}", word);
            }
        }
    }

    Ok(())
}
