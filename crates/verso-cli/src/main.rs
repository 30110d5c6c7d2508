use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use verso_core::Vocabulary;
use verso_data::{Corpus, TokenCounts};
use verso_nn::{ModelConfig, Translator};

#[derive(Parser)]
#[command(
    name = "verso",
    about = "Verso — a verse-aligned encoder-decoder translation experiment",
    long_about = "Builds per-language vocabularies and embeddings from two parallel\nverse-tagged corpora and runs an encoder-decoder forward pass over the\nfirst N verse pairs, printing each greedily decoded verse.",
    version,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the translation experiment over two parallel corpora
    Translate {
        /// Source-language corpus (verse-tagged XML)
        #[arg(long)]
        source: PathBuf,
        /// Target-language corpus (verse-tagged XML)
        #[arg(long)]
        target: PathBuf,
        /// Number of verse pairs to translate
        #[arg(long, default_value = "5")]
        verses: usize,
        /// Embedding dimension
        #[arg(long, default_value = "50")]
        embedding_dim: usize,
        /// Hidden state dimension
        #[arg(long, default_value = "10")]
        hidden_dim: usize,
        /// Seed for parameter initialization
        #[arg(long, default_value = "0")]
        seed: u64,
    },
    /// Print token and vocabulary statistics for one corpus
    Stats {
        /// Corpus file (verse-tagged XML)
        #[arg(long)]
        corpus: PathBuf,
        /// How many of the most frequent tokens to list
        #[arg(long, default_value = "10")]
        top: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Translate {
            source,
            target,
            verses,
            embedding_dim,
            hidden_dim,
            seed,
        } => cmd_translate(&source, &target, verses, embedding_dim, hidden_dim, seed),
        Commands::Stats { corpus, top } => cmd_stats(&corpus, top),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn load_corpus(path: &Path) -> Result<Corpus, Box<dyn std::error::Error>> {
    let mut corpus = Corpus::from_xml_file(path)?;
    corpus.clean();
    Ok(corpus)
}

fn cmd_translate(
    source: &Path,
    target: &Path,
    verses: usize,
    embedding_dim: usize,
    hidden_dim: usize,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let source_corpus = load_corpus(source)?;
    let target_corpus = load_corpus(target)?;

    let source_vocab = Vocabulary::from_tokens(source_corpus.all_tokens());
    let target_vocab = Vocabulary::from_tokens(target_corpus.all_tokens());
    println!(
        "vocabularies: {} source tokens, {} target tokens",
        source_vocab.len(),
        target_vocab.len()
    );

    let config = ModelConfig {
        embedding_dim,
        hidden_dim,
        seed,
    };
    let translator = Translator::new(config, source_vocab, target_vocab);

    let pairs: Vec<(Vec<String>, Vec<String>)> = source_corpus
        .tokenized()
        .into_iter()
        .zip(target_corpus.tokenized())
        .take(verses)
        .map(|((_, src), (_, tgt))| (src, tgt))
        .collect();
    let verse_ids: Vec<String> = source_corpus
        .verses()
        .iter()
        .take(pairs.len())
        .map(|v| v.id.clone())
        .collect();

    let cancel = AtomicBool::new(false);
    let results = translator.translate_corpus(&pairs, &cancel);

    for (verse_id, result) in verse_ids.iter().zip(&results) {
        match result {
            Ok(translation) => {
                println!("\nverse {}:", verse_id);
                println!("  {}", translation.tokens.join(" "));
                println!("  loss proxy: {:.4}", translation.total_distance());
            }
            Err(err) => println!("\nverse {}: skipped ({})", verse_id, err),
        }
    }
    Ok(())
}

fn cmd_stats(corpus: &Path, top: usize) -> Result<(), Box<dyn std::error::Error>> {
    let corpus = load_corpus(corpus)?;
    let tokens = corpus.all_tokens();
    let counts = TokenCounts::from_tokens(&tokens);

    println!("verses:          {}", corpus.len());
    println!("tokens:          {}", counts.total());
    println!("distinct tokens: {}", counts.distinct());
    println!("\ntop {} tokens:", top);
    for (token, count) in counts.most_common(top) {
        println!("  {:<16} {}", token, count);
    }
    Ok(())
}
