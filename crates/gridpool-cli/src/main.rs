use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "gridpool",
    about = "GridPool — device pool placement for distributed training jobs",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the placement plan for a job config
    Plan {
        /// Path to the job config
        #[arg(short, long, default_value = "gridpool.toml")]
        config: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Show which pool hosts a role.
    ///
    /// Roles: actor_rollout, critic, reward_model, reference.
    Resolve {
        #[arg(short, long, default_value = "gridpool.toml")]
        config: String,
        #[arg(short, long)]
        role: String,
    },
    /// Write a starter job config
    Init {
        #[arg(short, long, default_value = "gridpool.toml")]
        path: String,
        /// Placement policy: colocated or split
        #[arg(long, default_value = "colocated")]
        policy: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gridpool=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan { config, format } => commands::plan::plan(&config, &format),
        Commands::Resolve { config, role } => commands::plan::resolve(&config, &role),
        Commands::Init { path, policy, force } => commands::init::init(&path, &policy, force),
    }
}
