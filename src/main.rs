use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::{Parser, Subcommand};
use course_quiz::{
    Config, OpenAiClient, PdfTextExtractor, QuizError, Services, Store, parse, runtime,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding documents, quizzes and results
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Chat model name
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the chat-completions API
    #[arg(long)]
    api_base: Option<String>,

    /// API key for the completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Log file for the terminal UI (defaults to <data-dir>/course-quiz.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the terminal UI
    Tui,
    /// Parse raw quiz text and print the questions as JSON
    Parse {
        /// File with the model's quiz text
        input: PathBuf,
    },
}

fn load_config(args: &Args) -> Result<Config, QuizError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(model) = &args.model {
        config.completion.model = model.clone();
    }
    if let Some(api_base) = &args.api_base {
        config.completion.api_base = api_base.clone();
    }
    Ok(config)
}

fn init_file_logging(path: &Path) -> Result<(), QuizError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn parse_file(input: &Path) -> Result<(), QuizError> {
    let raw = fs::read_to_string(input)?;
    let quiz = parse(&raw);
    tracing::info!(questions = quiz.len(), input = %input.display(), "parsed quiz text");

    let json = serde_json::to_string_pretty(&quiz).map_err(std::io::Error::other)?;
    println!("{json}");
    Ok(())
}

async fn run_tui(args: Args, config: Config) -> Result<(), QuizError> {
    let log_path = args.log_file.clone().unwrap_or_else(|| config.log_path());
    init_file_logging(&log_path)?;

    let store = Store::open(&config.data_dir)?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        model = %config.completion.model,
        "starting course-quiz"
    );

    let services = Services {
        store,
        extractor: Arc::new(PdfTextExtractor),
        completion: Arc::new(OpenAiClient::new(config.completion.clone(), args.api_key)),
        quiz: config.quiz,
    };
    runtime::run(services).await
}

#[tokio::main]
async fn main() {
    // Populate OPENAI_API_KEY before clap reads the environment.
    dotenv::dotenv().ok();
    let mut args = Args::parse();
    let command = args.command.take();

    let result = match load_config(&args) {
        Ok(config) => match command {
            Some(Command::Parse { input }) => {
                init_stderr_logging();
                parse_file(&input)
            }
            Some(Command::Tui) | None => run_tui(args, config).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
