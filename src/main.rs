use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use prompt_qcm::data::{load_qcm, load_record, read_input, save_json};
use prompt_qcm::{practice, protocol, render, Config, Error, Qcm, Result};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Sentence the model replies with when it refuses a request
    #[arg(long, global = true, env = "PROMPTQCM_REFUSAL_PHRASE")]
    refusal_phrase: Option<String>,

    /// Write JSON output to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a model reply into a QCM
    Parse {
        /// Reply text file, `-` or nothing for stdin
        input: Option<PathBuf>,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        module_id: String,
    },
    /// Turn a QCM into a storable record
    Encode {
        input: Option<PathBuf>,
        /// Creation time (RFC 3339), defaults to now
        #[arg(long)]
        created_at: Option<DateTime<Utc>>,
    },
    /// Turn a stored record back into a QCM
    Decode { input: Option<PathBuf> },
    /// Write a QCM as plain text
    Render { input: Option<PathBuf> },
    /// Print the chat messages for a generation request
    Prompt { text: String },
    /// Score a practice attempt and store it on the record
    Score {
        input: PathBuf,
        /// One letter per question, `-` to skip one, e.g. `B,-,C`
        #[arg(long, value_delimiter = ',', required = true)]
        answers: Vec<String>,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match Config::from_env()
        .and_then(|config| config.with_refusal_phrase(cli.refusal_phrase.clone()))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    init_tracing(&config);

    if let Err(e) = run(cli, &config) {
        match e {
            Error::Refused(_) | Error::Unparseable => eprintln!("{}", e),
            other => eprintln!("Error: {}", other),
        }
        std::process::exit(1);
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, config: &Config) -> Result<()> {
    let output = cli.output.as_deref();

    match cli.command {
        Command::Parse {
            input,
            name,
            module_id,
        } => {
            let text = read_input(input.as_deref())?;
            let questions = config
                .parser()
                .parse(&text)
                .into_result(&config.refusal_phrase)?;
            tracing::info!(questions = questions.len(), "Parsed reply");

            let qcm = Qcm::new(questions)
                .with_name(name)
                .with_module_id(module_id);
            emit(output, &qcm)
        }
        Command::Encode { input, created_at } => {
            let qcm = load_qcm(input.as_deref())?;
            let record = qcm.to_record(created_at.unwrap_or_else(Utc::now));
            emit(output, &record)
        }
        Command::Decode { input } => {
            let qcm = load_record(input.as_deref())?.into_qcm();
            emit(output, &qcm)
        }
        Command::Render { input } => {
            let qcm = load_qcm(input.as_deref())?;
            print!("{}", render::CompletionText(&qcm.questions));
            Ok(())
        }
        Command::Prompt { text } => {
            let messages = protocol::build_messages(&text, &config.refusal_phrase);
            emit(output, &messages)
        }
        Command::Score { input, answers } => {
            let mut record = load_record(Some(input.as_path()))?;
            let mut qcm = record.clone().into_qcm();

            let score = practice::score_answers(&qcm, &answers)?;
            tracing::info!(score, "Practice attempt scored");
            qcm.record_score(score);

            // Only the score changes; the stored columns are written back as read.
            record.score = qcm.score.map(u32::from);
            emit(output, &record)
        }
    }
}

fn emit<T: Serialize>(output: Option<&Path>, value: &T) -> Result<()> {
    match output {
        Some(path) => save_json(path, value),
        None => {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(())
        }
    }
}
