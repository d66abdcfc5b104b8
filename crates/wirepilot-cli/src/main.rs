use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod session;

use session::Session;

#[derive(Parser, Debug)]
#[command(
    name = "wirepilot",
    version,
    about = "Connect to WireSock tunnels with per-app split tunneling"
)]
struct Cli {
    /// Use this directory for settings, cache and logs.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List tunnel configs in the source directory
    Servers,
    Connect {
        server_id: String,
    },
    Disconnect,
    /// Reconnect to the last server when auto-connect is enabled
    Up,
    Status,
    /// Refetch country names and list servers again
    UpdateLocations,
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
    /// Manage split-tunneling process lists
    Apps {
        #[command(subcommand)]
        action: AppsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    Show,
    SetSource { directory: PathBuf },
    SetClient { path: PathBuf },
    AutoConnect { state: commands::settings::Toggle },
}

#[derive(Subcommand, Debug)]
enum AppsCommand {
    List,
    Include {
        #[command(subcommand)]
        edit: ListEdit,
    },
    Exclude {
        #[command(subcommand)]
        edit: ListEdit,
    },
}

#[derive(Subcommand, Debug)]
enum ListEdit {
    Add { name: String },
    Remove { name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = session::resolve_paths(cli.data_dir)?;
    let _guard = logging::init(&paths)?;
    let mut session = Session::load(paths);

    match cli.command {
        Commands::Servers => commands::servers::list(&session),
        Commands::Connect { server_id } => commands::connect::connect(&mut session, &server_id),
        Commands::Disconnect => commands::connect::disconnect(&session),
        Commands::Up => commands::connect::up(&mut session),
        Commands::Status => commands::status::execute(&session),
        Commands::UpdateLocations => commands::servers::update_locations(&session),
        Commands::Settings { action } => {
            let action = match action {
                SettingsCommand::Show => commands::settings::SettingsAction::Show,
                SettingsCommand::SetSource { directory } => {
                    commands::settings::SettingsAction::SetSource { directory }
                }
                SettingsCommand::SetClient { path } => {
                    commands::settings::SettingsAction::SetClient { path }
                }
                SettingsCommand::AutoConnect { state } => {
                    commands::settings::SettingsAction::AutoConnect { state }
                }
            };
            commands::settings::execute(&mut session, action)
        }
        Commands::Apps { action } => {
            let action = match action {
                AppsCommand::List => commands::apps::AppsAction::List,
                AppsCommand::Include { edit } => match edit {
                    ListEdit::Add { name } => commands::apps::AppsAction::AddInclude { name },
                    ListEdit::Remove { name } => {
                        commands::apps::AppsAction::RemoveInclude { name }
                    }
                },
                AppsCommand::Exclude { edit } => match edit {
                    ListEdit::Add { name } => commands::apps::AppsAction::AddExclude { name },
                    ListEdit::Remove { name } => {
                        commands::apps::AppsAction::RemoveExclude { name }
                    }
                },
            };
            commands::apps::execute(&mut session, action)
        }
    }
}
