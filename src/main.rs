// Entrypoint for the CLI application.
// - Parses the command line, runs the instance gate, then dispatches.
// - Returns `anyhow::Result` so any propagated error prints to stderr and
//   exits non-zero.

use anyhow::Result;
use clap::{Parser, Subcommand};
use put_cli::api::{self, ApiClient};
use put_cli::config::ConfigStore;
use put_cli::instance::InstanceGate;
use put_cli::ui;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "put",
    version = "1.0.0",
    about = "A self-hosted Drive CLI for developers",
    long_about = "put is a command-line interface for interacting with your self-hosted\n\
                  PUT instance. It allows you to list, upload, and remove files\n\
                  from your instance."
)]
struct Cli {
    /// Allow insecure connections to the server (e.g. self-signed certificates)
    #[arg(short = 'u', long = "unsecure", global = true, env = "PUT_INSECURE")]
    unsecure: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List files on the server
    #[command(visible_alias = "l")]
    Ls,

    /// Upload a file to the server
    #[command(visible_alias = "s")]
    Stash {
        /// Path of the local file to upload
        file_path: PathBuf,
        /// Share the file with the public
        #[arg(long)]
        share: bool,
    },

    /// Remove a file from the server
    #[command(visible_alias = "rm")]
    Remove {
        /// Name of the remote file
        file_name: String,
    },

    /// Rename a file on the server
    #[command(visible_alias = "r")]
    Rename { old_name: String, new_name: String },

    /// Download a file from the server
    #[command(visible_aliases = ["d", "get"])]
    Down {
        /// Name of the remote file
        file_name: String,
        /// Where to put it (defaults to the remote name)
        download_path: Option<PathBuf>,
    },

    /// Manage the instance URI
    Instance {
        #[command(subcommand)]
        command: InstanceCommands,
    },
}

#[derive(Subcommand)]
enum InstanceCommands {
    /// Verify and store a new instance URI
    Set { uri: String },
    /// Print the configured instance URI
    Get,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = api::http_client(cli.unsecure)?;
    let store = ConfigStore::open_default()?;
    let mut gate = InstanceGate::new();

    if let Commands::Instance {
        command: InstanceCommands::Set { uri },
    } = &cli.command
    {
        gate.set_instance(&store, &client, cli.unsecure, uri)?;
        println!("Instance URI saved.");
        return Ok(());
    }

    // Every remaining command talks to the configured instance.
    gate.ensure_ready(&store, &client, cli.unsecure, ui::prompt_instance_uri)?;

    match cli.command {
        Commands::Ls => {
            let api = ApiClient::from_store(&store, client)?;
            let files = api.list_files()?;
            ui::print_file_table(&files);
        }
        Commands::Stash { file_path, share } => {
            let api = ApiClient::from_store(&store, client)?;
            let spinner = ui::spinner("Uploading...");
            let result = api.upload(&file_path, share);
            spinner.finish_and_clear();
            match result? {
                Some(link) => {
                    println!("Your file is now publicly shareable. Here's the share link: {link}")
                }
                None => println!("File uploaded successfully."),
            }
        }
        Commands::Remove { file_name } => {
            let api = ApiClient::from_store(&store, client)?;
            api.remove(&file_name)?;
            println!("File removed successfully.");
        }
        Commands::Rename { old_name, new_name } => {
            let api = ApiClient::from_store(&store, client)?;
            api.rename(&old_name, &new_name)?;
            println!("Renamed {old_name} to {new_name}.");
        }
        Commands::Down {
            file_name,
            download_path,
        } => {
            let api = ApiClient::from_store(&store, client)?;
            let spinner = ui::spinner("Downloading...");
            let result = api.download(&file_name, download_path);
            spinner.finish_and_clear();
            let dest = result?;
            println!("Saved to {}.", dest.display());
        }
        Commands::Instance { command } => match command {
            InstanceCommands::Get => {
                let config = store.load()?;
                println!("{}", config.instance_uri);
            }
            // `instance set` returned before the gate ran.
            InstanceCommands::Set { .. } => unreachable!(),
        },
    }

    Ok(())
}
