use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rxstation",
    about = "RxStation - pharmacy workstation identity agent",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Data directory (default: $RXSTATION_DATA_DIR or ~/.rxstation)")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Device Registry base URL")]
    pub registry_url: Option<String>,

    #[arg(long, global = true, help = "Bearer token for the Device Registry")]
    pub token: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Replay browser signals from a JSON snapshot instead of probing this host"
    )]
    pub signals: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Log level (overridden by RUST_LOG)")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Resolve this station against the registry, registering it if needed")]
    Resolve,

    #[command(about = "Collect and print the current fingerprint and its hash")]
    Fingerprint {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(subcommand, about = "Manage registered devices")]
    Devices(DeviceCommands),

    #[command(about = "Replace a device's registered hash with the current fingerprint")]
    UpdateHash {
        #[arg(help = "Registry id of the device")]
        id: i64,

        #[arg(short, long, help = "Submit without asking for confirmation")]
        yes: bool,
    },

    #[command(subcommand, about = "Inspect or clear the local station binding")]
    Binding(BindingCommands),

    #[command(subcommand, about = "View or initialise configuration")]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum DeviceCommands {
    #[command(about = "List registered devices")]
    List {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Delete a registered device")]
    Delete {
        #[arg(help = "Registry id of the device")]
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum BindingCommands {
    #[command(about = "Show the local station binding")]
    Show {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Delete the local station binding")]
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    #[command(about = "Show current configuration")]
    Show {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Write a default configuration file")]
    Init {
        #[arg(long, help = "Overwrite an existing configuration file")]
        force: bool,
    },
}
