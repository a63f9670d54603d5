use clap::{Parser, Subcommand};

/// Project-scoped control room for decision records.
#[derive(Debug, Parser)]
#[command(name = "control-room", version)]
pub struct Cli {
    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List known projects.
    Projects,
    /// Make a project current.
    Select { project_id: String },
    /// Register a new project and make it current.
    Create {
        project_id: String,
        #[arg(long)]
        label: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Show the current project.
    Current,
    /// List decisions of the current project.
    Decisions,
    /// Show one decision of the current project.
    Decision { decision_id: String },
    /// Ask the backend to verify a decision.
    Verify { decision_id: String },
    /// Leave the current project.
    Switch,
    /// Show backend health.
    Status,
}
