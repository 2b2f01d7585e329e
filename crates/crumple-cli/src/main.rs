//! Crumple CLI — demo scenarios, snapshot inspection, validation.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "crumple")]
#[command(version, about = "Crumple — plastic cage deformation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a built-in demo scenario.
    Demo {
        /// Which scenario to run (impact_panel, joint_cage).
        #[arg(short, long, default_value = "impact_panel")]
        scenario: String,

        /// Write the final state snapshot to this path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a mesh or config file.
    Validate {
        /// Path to mesh (.json) or config (.toml) file.
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Demo { scenario, output } => commands::demo(&scenario, output.as_deref()),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
