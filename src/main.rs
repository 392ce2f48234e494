//! Falcon Formation - Main Entry Point
//!
//! Command line front end for creating and showing balanced practice teams.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use falcon_formation::common::types::normalize_name;
use falcon_formation::config::loader::load_config;
use falcon_formation::config::types::AppConfig;
use falcon_formation::{
    compute_team_split, render_team_split, FormationService, HoldsportRestClient,
    PgFormationStore, Player, Position, RenderOptions, TeamMetadata,
};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error), overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute and store teams for a practice
    Create(TeamDate),
    /// Print the stored teams for a practice
    Show {
        #[command(flatten)]
        target: TeamDate,
        #[arg(long)]
        hide_skill: bool,
        #[arg(long)]
        hide_position: bool,
        #[arg(long)]
        hide_guest: bool,
    },
    /// Report how many goalies are registered
    Goalies(TeamDate),
    /// Manage guests for a practice
    #[command(subcommand)]
    Guest(GuestCommand),
    /// Change a member's skill and position
    Member {
        #[arg(long)]
        team_id: i64,
        #[arg(long)]
        member_id: u64,
        /// Clamped into the accepted skill range
        #[arg(long, allow_negative_numbers = true)]
        skill: i64,
        #[arg(long)]
        position: Position,
    },
    /// Register team metadata
    #[command(subcommand)]
    Team(TeamCommand),
    /// Split a roster read from a JSON file without touching any service
    Balance {
        /// JSON array of players
        #[arg(long)]
        roster: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
        /// Player whose team is printed first
        #[arg(long)]
        anchor: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
struct TeamDate {
    #[arg(long)]
    team_id: i64,
    /// Practice date, defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum GuestCommand {
    Add {
        #[command(flatten)]
        target: TeamDate,
        #[arg(long)]
        name: String,
        /// Clamped into the accepted skill range
        #[arg(
            long,
            allow_negative_numbers = true,
            default_value_t = i64::from(falcon_formation::model::DEFAULT_SKILL)
        )]
        skill: i64,
        #[arg(long, default_value = "Forward")]
        position: Position,
    },
    Remove {
        #[command(flatten)]
        target: TeamDate,
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum TeamCommand {
    Init {
        #[arg(long)]
        team_id: i64,
        #[arg(long)]
        name: String,
        /// Holdsport activity name of the practice
        #[arg(long)]
        activity: String,
        #[arg(long, default_value = "")]
        jersey_1: String,
        #[arg(long, default_value = "")]
        jersey_2: String,
    },
}

type Service = FormationService<PgFormationStore, HoldsportRestClient>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();
    let config = load_config(Some(&args.config))?;

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Configuration file: {}", args.config);

    match args.command {
        Command::Balance {
            roster,
            date,
            seed,
            anchor,
        } => balance(&config, &roster, date, seed, anchor)?,
        command => run_service_command(&config, command).await?,
    }

    Ok(())
}

fn balance(
    config: &AppConfig,
    path: &str,
    date: Option<NaiveDate>,
    seed: Option<u64>,
    anchor: Option<String>,
) -> Result<()> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Reading {}", path))?;
    let players: Vec<Player> =
        serde_json::from_str(&raw).with_context(|| format!("Parsing roster {}", path))?;

    let mut engine = config.engine.clone();
    if anchor.is_some() {
        engine.anchor_player = anchor;
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let date = date.unwrap_or_else(|| chrono::Utc::now().date_naive());

    let computation = compute_team_split(&players, date, &engine, &mut rng)?;
    println!(
        "{}",
        render_team_split(&computation.split, None, RenderOptions::default())
    );
    Ok(())
}

async fn run_service_command(config: &AppConfig, command: Command) -> Result<()> {
    let service = connect(config).await?;
    let today = |date: Option<NaiveDate>| date.unwrap_or_else(|| service.practice_date());

    match command {
        Command::Create(target) => {
            let date = today(target.date);
            match service.create_teams(target.team_id, date).await? {
                Some(split) => println!(
                    "{}",
                    service
                        .render_split(target.team_id, &split, RenderOptions::default())
                        .await?
                ),
                None => println!("No players registered for {}", date),
            }
        }
        Command::Show {
            target,
            hide_skill,
            hide_position,
            hide_guest,
        } => {
            let options = RenderOptions {
                show_skill: !hide_skill,
                show_position: !hide_position,
                show_guest: !hide_guest,
            };
            match service
                .get_teams(target.team_id, today(target.date), options)
                .await?
            {
                Some(text) => println!("{}", text),
                None => println!("No team distribution found."),
            }
        }
        Command::Goalies(target) => {
            println!(
                "{}",
                service
                    .goalie_status(target.team_id, today(target.date))
                    .await?
            );
        }
        Command::Guest(GuestCommand::Add {
            target,
            name,
            skill,
            position,
        }) => {
            let guest = Player::guest(normalize_name(&name), skill, position)?;
            service
                .add_guest(target.team_id, today(target.date), &guest)
                .await?;
            println!("Added guest {}", guest);
        }
        Command::Guest(GuestCommand::Remove { target, name }) => {
            let name = normalize_name(&name);
            if !service
                .remove_guest(target.team_id, today(target.date), &name)
                .await?
            {
                bail!("No guest named {}", name);
            }
            println!("Removed guest {}", name);
        }
        Command::Member {
            team_id,
            member_id,
            skill,
            position,
        } => {
            let member = service
                .update_member(team_id, member_id, skill, position)
                .await?;
            println!("Updated {}", member);
        }
        Command::Team(TeamCommand::Init {
            team_id,
            name,
            activity,
            jersey_1,
            jersey_2,
        }) => {
            let metadata = TeamMetadata::new(team_id, name)
                .with_activity(activity)
                .with_jerseys(jersey_1, jersey_2);
            service.register_team(&metadata).await?;
            println!("Registered team {}", metadata.name);
        }
        Command::Balance { .. } => bail!("balance runs without a service"),
    }
    Ok(())
}

async fn connect(config: &AppConfig) -> Result<Service> {
    let database = config
        .database
        .as_ref()
        .context("No database configured, set APP__DATABASE__URL")?;
    let store = PgFormationStore::connect(database).await?;
    let holdsport = HoldsportRestClient::from_config(&config.holdsport)?;

    Ok(FormationService::new(
        Arc::new(store),
        Arc::new(holdsport),
        config.engine.clone(),
    )
    .with_utc_offset(config.settings.utc_offset_hours))
}
