use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use channel_assignment::audit::audit;
use channel_assignment::config::{find_config, Overrides, Settings};
use channel_assignment::display::{print_channel_sheet, write_channel_sheet_to_file};
use channel_assignment::engine::assign_channels;
use channel_assignment::roster::load_roster;
use channel_assignment::web::{self, AppState};

#[derive(Parser)]
#[command(name = "channel-assignment", version, about = "Assign mixing-console inputs to a band roster")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true, env = "CHANNEL_ASSIGN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assign channels once and print the sheet
    Assign(AssignArgs),
    /// Run the HTTP API
    Serve(ServeArgs),
}

#[derive(Args)]
struct AssignArgs {
    /// Roster file (.json performers or .csv booking export)
    #[arg(long)]
    roster: PathBuf,

    /// Console layout JSON; the built-in festival console otherwise
    #[arg(long, env = "CHANNEL_ASSIGN_LAYOUT")]
    layout: Option<PathBuf>,

    /// Sheet title
    #[arg(long)]
    title: Option<String>,

    /// Also write the sheet (or JSON with --json) to this file
    #[arg(long)]
    out: Option<PathBuf>,

    /// Emit the assignment outcome as JSON instead of a text sheet
    #[arg(long)]
    json: bool,

    /// Check the result against the patching rules
    #[arg(long)]
    audit: bool,
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long, env = "CHANNEL_ASSIGN_HOST")]
    host: Option<String>,

    #[arg(long, env = "CHANNEL_ASSIGN_PORT")]
    port: Option<u16>,

    #[arg(long, env = "CHANNEL_ASSIGN_LAYOUT")]
    layout: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let file_config = find_config(cli.config.as_deref())?;

    match cli.command {
        Command::Assign(args) => {
            let settings = Settings::resolve(
                file_config,
                Overrides {
                    layout_path: args.layout.clone(),
                    title: args.title.clone(),
                    ..Default::default()
                },
            );
            run_assign(&settings, &args)?;
        }
        Command::Serve(args) => {
            let settings = Settings::resolve(
                file_config,
                Overrides {
                    host: args.host,
                    port: args.port,
                    layout_path: args.layout,
                    title: None,
                },
            );
            let layout = settings.load_layout()?;
            info!("Default console has {} inputs", layout.channel_count());
            web::start_server(&settings.host, settings.port, AppState::new(layout, settings.title.clone())).await?;
        }
    }

    Ok(())
}

fn run_assign(settings: &Settings, args: &AssignArgs) -> Result<(), Box<dyn std::error::Error>> {
    let layout = settings.load_layout()?;
    let roster = load_roster(&args.roster)?;

    let outcome = assign_channels(&layout, &roster);

    for skipped in &outcome.skipped {
        info!("Skipped roster entry {:?}: {:?}", skipped.name, skipped.reason);
    }
    if !outcome.unpaired_keyboard.is_empty() {
        warn!(
            "Keyboard inputs without a left/right side: {}",
            outcome.unpaired_keyboard.join(", ")
        );
    }

    if args.json {
        let json = serde_json::to_string_pretty(&outcome)?;
        println!("{}", json);
        if let Some(out) = &args.out {
            std::fs::write(out, &json)?;
        }
    } else {
        print_channel_sheet(&settings.title, &outcome.layout);
        if let Some(out) = &args.out {
            write_channel_sheet_to_file(&settings.title, &outcome.layout, out)?;
            println!("Channel sheet saved to {}", out.display());
        }
    }

    if args.audit {
        let report = audit(&outcome.layout);
        println!("\n=== Audit ===");
        for (performer, count) in &report.channel_counts {
            println!("  {}: {} channel(s)", performer, count);
        }
        if report.is_clean() {
            println!("All patching rules hold");
        } else {
            for violation in &report.violations {
                println!("⚠️  {}", violation);
            }
        }
    }

    Ok(())
}
