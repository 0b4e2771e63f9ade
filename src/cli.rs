// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kiln")]
#[command(about = "Re-image physical test machines through a FOG imaging service")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new kiln.yml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Reimage a machine and wait until it is reachable again
    Reimage {
        /// Machine to reimage (short or fully-qualified name)
        machine: String,

        /// OS type, e.g. ubuntu
        #[arg(long)]
        os_type: String,

        /// OS version, e.g. 20.04
        #[arg(long)]
        os_version: String,

        /// Machine type; looked up in the inventory when omitted
        #[arg(long)]
        machine_type: Option<String>,
    },
}
