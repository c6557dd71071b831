#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ground_lib::config::{load_from_path, Config};
use ground_lib::station::{Station, StationCommand};
use ground_lib::transmitter::{persistence, Transmitter};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Ground-station core CLI: DSM2/DSMX/FrSkyX passive fingerprinting and scan scheduling")]
struct Cli {
    /// Path to configuration TOML file
    #[arg(short, long, value_name = "FILE", default_value = "ground-station.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the control loop (routes probe notifications into the
    /// registry until interrupted). USB discovery and the per-probe
    /// sessions that feed it are supplied by the embedding application via
    /// `ground_lib::probe::ProbeSource`/`ProbeTransport`; with none
    /// attached, the loop just idles.
    Scan,
    /// Load the persisted registry and run hacking dispatch once.
    Hack,
    /// Print the persisted transmitter registry.
    Show,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let cfg = load_from_path(&cli.config).unwrap_or_else(|_| Config::default());

    if let Err(err) = ground_lib::telemetry::init_tracing(&cfg.logging.level, cfg.logging.show_target) {
        eprintln!("failed to initialize tracing: {err}");
        std::process::exit(1);
    }
    if !cli.config.exists() {
        warn!(path = %cli.config.display(), "config file not found, using built-in defaults");
    }

    let result = match cli.command {
        Commands::Scan => run_scan().await,
        Commands::Hack => run_hack(&cfg),
        Commands::Show => run_show(&cfg),
    };

    if let Err(err) = result {
        error!(%err, "command failed");
        ground_lib::telemetry::shutdown_tracing();
        std::process::exit(1);
    }
    ground_lib::telemetry::shutdown_tracing();
}

async fn run_scan() -> Result<(), String> {
    let station = Station::new();
    // `recv_rx`/`discovery_rx` are fed by the embedding application's
    // `ground_lib::station::spawn_probe_session`/`ProbeSource` wiring; the
    // bare CLI has neither, so the loop idles until commanded to stop.
    let (_recv_tx, recv_rx) = tokio::sync::mpsc::channel(64);
    let (_discovery_tx, discovery_rx) = tokio::sync::mpsc::channel(8);
    let (cmd_tx, cmd_rx) = tokio::sync::mpsc::channel(8);

    info!("control loop starting; press ctrl-c to stop");
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cmd_tx.send(StationCommand::Shutdown).await;
        }
    });
    station.run(recv_rx, cmd_rx, discovery_rx).await;
    info!("control loop stopped");
    Ok(())
}

fn run_hack(cfg: &Config) -> Result<(), String> {
    let mut station = Station::new();
    persistence::load(&mut station.registry, &cfg.persistence.path).map_err(|e| e.to_string())?;

    let (assignments, diagnostics) = station.hack_all();
    for assignment in &assignments {
        info!(port = %assignment.port, chip = ?assignment.chip_id, "hack dispatched");
    }
    for reason in &diagnostics {
        warn!(%reason, "hack candidate skipped");
    }
    if assignments.is_empty() && diagnostics.is_empty() {
        info!("no transmitters marked for hacking");
    }
    Ok(())
}

fn run_show(cfg: &Config) -> Result<(), String> {
    let mut registry = ground_lib::transmitter::TransmitterRegistry::new();
    persistence::load(&mut registry, &cfg.persistence.path).map_err(|e| e.to_string())?;

    if registry.is_empty() {
        println!("registry is empty ({})", cfg.persistence.path.display());
        return Ok(());
    }

    for tx in registry.iter() {
        describe(tx);
    }
    Ok(())
}

fn describe(tx: &Transmitter) {
    let header = tx.header();
    match tx {
        Transmitter::Dsm(dsm) => {
            println!(
                "{} {} id={:02X?} hackable={} do_hack={} channels={}",
                header.prot_name,
                header.name,
                dsm.id,
                header.hackable,
                header.do_hack,
                dsm.channels.len(),
            );
        }
        Transmitter::FrSkyX(frsky) => {
            let known = frsky.channels.iter().filter(|(c, _)| *c >= 0).count();
            println!(
                "{} {} id={:02X?} hackable={} do_hack={} table={known}/{}",
                header.prot_name,
                header.name,
                frsky.id,
                header.hackable,
                header.do_hack,
                frsky.channels.len(),
            );
        }
    }
}
