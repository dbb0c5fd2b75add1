use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use question_tokeniser::{load, parse_corpus, save_vocabs, Config, OneHotEncoder, OneHotLabels};

/// question_tokeniser: normalise classification questions into token sequences.
///
/// Applies the tokenisation rules from a config file to a question dataset,
/// builds vocabularies and shows one-hot encodings.
#[derive(Parser)]
#[command(name = "question_tokeniser")]
#[command(version = "0.1.0")]
#[command(about = "Tokenise question-classification datasets", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenise a dataset and print each question before and after
    ///
    /// Uses the dataset paths and tokenisation rules from the config file,
    /// indexes every token of the dataset and prints the one-hot shape of
    /// each question.
    Tokenise {
        /// Path to the TOML config file
        #[arg(long, value_name = "FILE", env = "QTOKENISER_CONFIG")]
        config: PathBuf,

        /// Use the test dataset instead of the training dataset
        #[arg(long)]
        test: bool,
    },

    /// Build the vocabulary of a dataset and write it one token per line
    Vocab {
        /// Dataset file to read
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Vocabulary file to write (overwritten)
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Print the label index of a dataset
    Labels {
        /// Dataset file to read
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli);

    let result = match cli.command {
        Commands::Tokenise { config, test } => tokenise(&config, test),
        Commands::Vocab { input, output } => save_vocabs(&input, &output)
            .with_context(|| format!("Failed to build vocabulary from {}", input.display())),
        Commands::Labels { input } => print_labels(&input),
    };

    if let Err(e) = result {
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn tokenise(config_path: &Path, test: bool) -> Result<()> {
    let config = Config::from_config_file(config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    let dataset_path = if test {
        config
            .paths
            .test
            .clone()
            .context("Config has no test dataset path")?
    } else {
        config.paths.train.clone()
    };

    let dataset = load(&dataset_path)
        .with_context(|| format!("Failed to load dataset {}", dataset_path.display()))?;
    log::info!(
        "Tokenising {} questions with rules {:?}",
        dataset.len(),
        config.rules.enabled()
    );

    let tokenised = parse_corpus(&dataset.questions, &config.rules);

    let mut encoder = OneHotEncoder::new();
    encoder.update_index(&tokenised);
    let width = encoder.len();

    for ((question, label), tokens) in dataset.iter().zip(tokenised.iter()) {
        println!("{:?}\n{:?}\n{}\n{:?}\n", question, tokens, label, (tokens.len(), width));
    }

    log::info!("One-hot width: {} tokens", width);
    Ok(())
}

fn print_labels(input: &Path) -> Result<()> {
    let dataset = load(input)
        .with_context(|| format!("Failed to load dataset {}", input.display()))?;
    let labels = OneHotLabels::from_labels(&dataset.labels);

    for (index, label) in labels.labels().iter().enumerate() {
        println!("{}\t{}", index, label);
    }
    Ok(())
}
