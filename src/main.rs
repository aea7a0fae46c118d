// Artifacts Crew Agent - Main Entry Point
// One process per character; the crew coordinates through the shared task store

use clap::Parser;

use artifacts_crew::overseer::load_api_token;
use artifacts_crew::verbosity::set_verbosity_level;
use artifacts_crew::{Overseer, Role};

#[derive(Parser)]
#[command(name = "artifacts-crew")]
#[command(about = "Cooperative character automation for ArtifactsMMO")]
struct Cli {
    /// Character to drive
    #[arg(short, long)]
    character: String,

    /// Crew role: fighter, crafter, forager, tasker or recycler
    #[arg(short, long)]
    role: String,

    /// Configuration file
    #[arg(long, default_value = "crew_config.toml")]
    config: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    set_verbosity_level(cli.verbose);

    println!("🚀 Artifacts Crew Agent Starting...");

    let Some(role) = Role::parse(&cli.role) else {
        eprintln!(
            "❌ Unknown role '{}'. Choose fighter, crafter, forager, tasker or recycler",
            cli.role
        );
        std::process::exit(2);
    };

    // Load API token
    let token = load_api_token()?;

    let mut overseer = match Overseer::bootstrap(token, &cli.character, role, &cli.config).await {
        Ok(overseer) => {
            println!("✅ Successfully authenticated!");
            overseer
        }
        Err(e) => {
            eprintln!("❌ Bootstrap failed: {}", e);
            return Err(e);
        }
    };

    match overseer.run_continuous().await {
        Ok(()) => {
            println!("\n🎉 ORDER OPERATIONS COMPLETED!");
        }
        Err(e) => {
            eprintln!("\n❌ Order operations failed: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
