use clap::{Parser, Subcommand};

/// Account prefilled on the login form of the web client
pub const DEMO_EMAIL: &str = "demo@flowplan.dev";

/// Account name used when registration is given none
pub const DEFAULT_ACCOUNT_NAME: &str = "New User";

#[derive(Parser, Debug)]
#[command(name = "flowplan")]
#[command(about = "FlowPlan from the command line - projects and AI task suggestions")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Backend base URL, overriding FLOWPLAN_BACKEND_URL for this run
    #[arg(long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Print raw JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long, default_value = DEMO_EMAIL)]
        email: String,

        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        #[arg(long, default_value = DEFAULT_ACCOUNT_NAME)]
        name: String,

        #[arg(long)]
        email: String,

        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List or create projects
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Ask the AI copilot to suggest tasks for a project
    Suggest {
        #[arg(long, default_value = "Website Redesign")]
        project_name: String,

        #[arg(
            long,
            default_value = "Improve conversion, ship new pricing page, refresh branding"
        )]
        description: String,

        #[arg(long, default_value_t = 5)]
        count: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectsCommand {
    /// List your projects
    List,

    /// Create a project
    Create {
        #[arg(long, default_value = "New Project")]
        name: String,

        #[arg(long, default_value = "Kickoff plan")]
        description: String,
    },
}
