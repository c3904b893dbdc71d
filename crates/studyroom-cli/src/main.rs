use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studyroom-cli", version, about = "Studyroom CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stopwatch and countdown in the foreground
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Study session history
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Study reports
    Report {
        #[command(subcommand)]
        action: commands::report::ReportAction,
    },
    /// Time-attack quiz
    Quiz {
        #[command(subcommand)]
        action: commands::quiz::QuizAction,
    },
    /// Ask the AI to answer a question
    Ask {
        #[command(subcommand)]
        action: commands::ask::AskAction,
    },
    /// Generate practice questions similar to a given one
    Generate(commands::generate::GenerateArgs),
    /// Study memos
    Memo {
        #[command(subcommand)]
        action: commands::memo::MemoAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// API key management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("STUDYROOM_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Session { action } => commands::session::run(action),
        Commands::Report { action } => commands::report::run(action),
        Commands::Quiz { action } => commands::quiz::run(action),
        Commands::Ask { action } => commands::ask::run(action),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Memo { action } => commands::memo::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
