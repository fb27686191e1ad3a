mod config;
mod edit_session;
mod service;

use clap::{Parser, Subcommand};
use config::Config;
use hrdesk_types::{EmployeeId, ProjectId, SkillId};
use service::HrDeskService;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hrdesk")]
#[command(about = "Employee records, skills and projects from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    Version,

    /// Show the logged-in manager
    Me,

    /// End the server session
    Logout,

    /// View, create, update or delete employee records
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// An employee's skills, statistics and resume import
    Skills {
        #[command(subcommand)]
        action: SkillsAction,
    },

    /// The logged-in manager's skill catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Project details and membership
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Local employee directory
    Directory {
        #[command(subcommand)]
        action: DirectoryAction,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    Show { id: EmployeeId },

    /// Create an employee, or update one when --id is given
    Save {
        #[arg(long)]
        id: Option<EmployeeId>,
        #[arg(long)]
        firstname: Option<String>,
        #[arg(long)]
        lastname: Option<String>,
        #[arg(long)]
        title: Option<String>,
        /// Department id
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Formatted as (xxx) xxx-xxxx
        #[arg(long)]
        phone: Option<String>,
    },

    Delete { id: EmployeeId },
}

#[derive(Subcommand)]
pub enum SkillsAction {
    /// Print the skill table and statistics
    Show { id: EmployeeId },

    /// Edit the skill list interactively
    Edit { id: EmployeeId },

    /// Upload a resume and merge the extracted skills
    MergeResume {
        id: EmployeeId,
        file: PathBuf,
        /// Save the merged list afterwards
        #[arg(long)]
        save: bool,
    },
}

#[derive(Subcommand)]
pub enum CatalogAction {
    List {
        /// Space-separated terms matched against skill and category names
        #[arg(long, short)]
        query: Option<String>,
    },
    Add {
        name: String,
        #[arg(long)]
        category: i64,
    },
    Update {
        skill_id: SkillId,
        name: String,
        #[arg(long)]
        category: i64,
    },
    Delete { skill_id: SkillId },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    Show { id: ProjectId },

    /// Change status, priority or dates; unset flags keep their value
    Update {
        id: ProjectId,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        start: Option<String>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        end: Option<String>,
    },

    /// Add a member by employee id or name
    AddMember {
        id: ProjectId,
        member: String,
        #[arg(long, default_value = "")]
        role: String,
    },

    EditMember {
        id: ProjectId,
        member: String,
        #[arg(long, default_value = "")]
        role: String,
    },

    RemoveMember { id: ProjectId, member: String },

    Delete { id: ProjectId },
}

#[derive(Subcommand)]
pub enum DirectoryAction {
    /// List entries containing every query term
    List { query: Vec<String> },

    /// Replace the local directory with the server's employee list
    Sync,

    Remove { id: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Run with --help for usage");
        return;
    };
    if let Commands::Version = command {
        println!("hrdesk {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = hrdesk_logging::init_logging(&config.logging.level, config.logging.format) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let service = match HrDeskService::new(config) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("startup failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = service.run(command).await {
        tracing::error!("command failed: {:#}", e);
        eprintln!("{e}");
        std::process::exit(1);
    }
}
