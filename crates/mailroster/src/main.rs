//! `mailroster` - curate recipient lists and dispatch bulk email.
//!
//! Thin command-line front end over `mailroster-core`; every command
//! loads the persisted snapshot, runs one session operation, and
//! reports the outcome.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailroster_remote::RemoteClient;

#[derive(Parser)]
#[command(name = "mailroster")]
#[command(version, about = "Curate recipient lists and dispatch bulk email", long_about = None)]
struct Cli {
    /// Base URL of the backing service. Falls back to the
    /// MAILROSTER_BASE_URL environment variable, then to localhost.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the global address book
    Email {
        #[command(subcommand)]
        action: EmailAction,
    },
    /// Manage recipient groups
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },
    /// Import addresses from a spreadsheet or CSV file
    Import {
        /// File to upload for address extraction
        file: PathBuf,
    },
    /// Compose and dispatch a message to the resolved recipients
    Send {
        /// Subject line (a placeholder is substituted when empty)
        #[arg(long, default_value = "")]
        subject: String,
        /// Message body (a placeholder is substituted when empty)
        #[arg(long, default_value = "")]
        content: String,
        /// Directly selected recipient address (repeatable)
        #[arg(long = "to")]
        to: Vec<String>,
        /// Selected recipient group id (repeatable)
        #[arg(long = "group")]
        groups: Vec<String>,
        /// Attachment file (repeatable)
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
        /// Also import recipients from a spreadsheet/CSV before sending
        #[arg(long)]
        import_file: Option<PathBuf>,
    },
    /// Wipe the remote store and reset local state
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show counts of stored addresses and groups
    Status,
}

#[derive(Subcommand)]
enum EmailAction {
    /// Add a single address
    Add {
        /// The address to add
        address: String,
    },
    /// Remove an address (groups keep their frozen member lists)
    Remove {
        /// The address to remove
        address: String,
    },
    /// List all addresses in insertion order
    List,
}

#[derive(Subcommand)]
enum GroupAction {
    /// Create a group from selected members and/or an imported file
    Create {
        /// Group name
        name: String,
        /// Member address (repeatable)
        #[arg(long = "member")]
        members: Vec<String>,
        /// Import members from a spreadsheet/CSV file
        #[arg(long)]
        from_file: Option<PathBuf>,
    },
    /// Replace a group's name and members, keeping its id
    Update {
        /// Group id
        id: String,
        /// New name (keeps the current one when omitted)
        #[arg(long)]
        name: Option<String>,
        /// New member address (repeatable; omitting keeps current members)
        #[arg(long = "member")]
        members: Vec<String>,
    },
    /// Delete a group
    Delete {
        /// Group id
        id: String,
    },
    /// List all groups
    List,
    /// Show a group's members
    Show {
        /// Group id
        id: String,
    },
    /// Write a group's member listing to a local file
    Export {
        /// Group id
        id: String,
        /// Output path (defaults to "<group name>.csv")
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let base_url = cli
        .base_url
        .or_else(|| std::env::var("MAILROSTER_BASE_URL").ok())
        .unwrap_or_else(|| RemoteClient::DEFAULT_BASE_URL.to_string());
    info!(%base_url, "starting mailroster");

    let mut session = commands::connect(&base_url).await?;

    match cli.command {
        Commands::Email { action } => match action {
            EmailAction::Add { address } => commands::email_add(&mut session, &address).await?,
            EmailAction::Remove { address } => {
                commands::email_remove(&mut session, &address).await;
            }
            EmailAction::List => commands::email_list(&session),
        },
        Commands::Group { action } => match action {
            GroupAction::Create {
                name,
                members,
                from_file,
            } => commands::group_create(&mut session, &name, members, from_file).await?,
            GroupAction::Update { id, name, members } => {
                commands::group_update(&mut session, &id, name, members).await?;
            }
            GroupAction::Delete { id } => commands::group_delete(&mut session, &id).await,
            GroupAction::List => commands::group_list(&session),
            GroupAction::Show { id } => commands::group_show(&session, &id)?,
            GroupAction::Export { id, output } => {
                commands::group_export(&session, &id, output)?;
            }
        },
        Commands::Import { file } => commands::import(&mut session, &file).await?,
        Commands::Send {
            subject,
            content,
            to,
            groups,
            attachments,
            import_file,
        } => {
            commands::send(
                &mut session,
                subject,
                content,
                to,
                groups,
                attachments,
                import_file,
            )
            .await?;
        }
        Commands::Clear { yes } => commands::clear(&mut session, yes).await?,
        Commands::Status => commands::status(&session),
    }

    Ok(())
}
