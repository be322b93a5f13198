//! pawfect CLI: record and save the Pawfect HCI evaluation.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use pawfect_core::catalog::Category;
use pawfect_core::model::{HeuristicId, Rating, Scenario, StepId};

mod commands;
mod workspace;

#[derive(Parser)]
#[command(name = "pawfect", version, about = "Pawfect HCI evaluation recorder")]
struct Cli {
    /// Working evaluation document
    #[arg(long, global = true, default_value = workspace::DEFAULT_DOCUMENT)]
    file: PathBuf,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and a fresh evaluation document
    Init {
        /// Overwrite an existing evaluation document
        #[arg(long)]
        force: bool,
    },

    /// Show or update one of the ten heuristics
    Heuristic {
        /// Heuristic number (1-10)
        id: HeuristicId,

        /// excellent, good, needs-improvement, poor or not-rated
        #[arg(long)]
        rating: Option<Rating>,

        /// Replace the notes
        #[arg(long)]
        notes: Option<String>,

        /// Mark as reviewed (true/false)
        #[arg(long)]
        checked: Option<bool>,
    },

    /// Show or update a cognitive walkthrough step
    Step {
        /// Step key, e.g. "task2-3"
        key: StepId,

        /// Mark as completed (true/false)
        #[arg(long)]
        completed: Option<bool>,

        /// Replace the notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Log, list or remove usability tests
    #[command(subcommand)]
    Test(TestCommand),

    /// Show completion progress
    Progress,

    /// Write the evaluation as a dated JSON download
    Export {
        /// Output directory (defaults to export_dir from config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Write a self-contained HTML report
    Report {
        /// Output file
        #[arg(long, default_value = "pawfect-report.html")]
        output: PathBuf,
    },

    /// Save the evaluation to the configured backend
    Save {
        /// Evaluator name (defaults to evaluator_name from config)
        #[arg(long)]
        name: Option<String>,

        /// Overall notes attached to every saved record
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },

    /// Sign out and forget the stored identity
    Logout,

    /// List adoptable pets
    Pets {
        /// All, dog, cat, bird, small-animals or others
        #[arg(long, default_value = "all")]
        category: Category,
    },

    /// Send a message through the contact form
    Contact {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        message: String,
    },
}

#[derive(Subcommand)]
enum TestCommand {
    /// Log a usability test
    Add {
        #[arg(long, default_value = "")]
        participant: String,

        /// pet-discovery, contact-inquiry or account-creation
        #[arg(long, default_value = "pet-discovery")]
        scenario: Scenario,

        /// Time to complete, in seconds
        #[arg(long, default_value = "")]
        time: String,

        #[arg(long, default_value = "0")]
        clicks: u32,

        /// The participant completed the task
        #[arg(long)]
        success: bool,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Remove a logged test by id
    Remove { id: String },

    /// List logged tests
    List,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pawfect=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file = cli.file;
    let config = cli.config;

    let result = match cli.command {
        Commands::Init { force } => commands::init::execute(&file, force),
        Commands::Heuristic {
            id,
            rating,
            notes,
            checked,
        } => commands::heuristic::execute(&file, id, rating, notes, checked),
        Commands::Step {
            key,
            completed,
            notes,
        } => commands::step::execute(&file, key, completed, notes),
        Commands::Test(TestCommand::Add {
            participant,
            scenario,
            time,
            clicks,
            success,
            notes,
        }) => commands::test::add(&file, participant, scenario, time, clicks, success, notes),
        Commands::Test(TestCommand::Remove { id }) => commands::test::remove(&file, &id),
        Commands::Test(TestCommand::List) => commands::test::list(&file),
        Commands::Progress => commands::progress::execute(&file),
        Commands::Export { output } => commands::export::execute(&file, output, config),
        Commands::Report { output } => commands::report::execute(&file, &output),
        Commands::Save { name, notes } => {
            commands::save::execute(&file, name, notes, config).await
        }
        Commands::Login { email, password } => {
            commands::account::login(email, password, config).await
        }
        Commands::Signup {
            name,
            email,
            password,
            confirm_password,
        } => commands::account::signup(name, email, password, confirm_password, config).await,
        Commands::Logout => commands::account::logout(config).await,
        Commands::Pets { category } => commands::site::pets(category),
        Commands::Contact {
            name,
            email,
            message,
        } => commands::site::contact(name, email, message),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
