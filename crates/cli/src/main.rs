//! pass.in CLI - database migrations and operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! passin-cli migrate
//!
//! # Create an event (prints its ID)
//! passin-cli event create --title "Rust Meetup" --maximum-attendees 120
//!
//! # Check an attendee in
//! passin-cli check-in --attendee-id 42
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `event create` - Create events attendees can register for
//! - `check-in` - Record an attendee's arrival

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use passin_core::AttendeeId;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "passin-cli")]
#[command(author, version, about = "pass.in CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage events
    Event {
        #[command(subcommand)]
        action: EventAction,
    },
    /// Check an attendee in
    CheckIn {
        /// Attendee ID returned at registration
        #[arg(short, long)]
        attendee_id: i32,
    },
}

#[derive(Debug, Subcommand)]
enum EventAction {
    /// Create a new event
    Create {
        /// Event title
        #[arg(short, long)]
        title: String,

        /// Maximum number of attendees (unlimited if omitted)
        #[arg(short, long, allow_negative_numbers = true)]
        maximum_attendees: Option<i64>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Event { action } => match action {
            EventAction::Create {
                title,
                maximum_attendees,
            } => {
                let event_id = commands::event::create(&title, maximum_attendees).await?;
                #[allow(clippy::print_stdout)]
                {
                    println!("{event_id}");
                }
            }
        },
        Commands::CheckIn { attendee_id } => {
            commands::check_in::record(AttendeeId::new(attendee_id)).await?;
        }
    }
    Ok(())
}
