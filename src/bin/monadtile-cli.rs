use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use monadtile::common::config::{Config, config_file};
use monadtile::common::geometry::Rect;
use monadtile::common::log;
use monadtile::layout_engine::{LayoutCommand, LayoutEngine, SplitAxis, WindowId};

#[derive(Parser)]
#[command(name = "monadtile-cli")]
#[command(about = "Inspect and exercise the monadtile layout engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
    /// Run a command sequence against a simulated window stack and print
    /// the resulting frames
    Simulate {
        /// Number of simulated windows
        #[arg(long, default_value_t = 3)]
        windows: u64,
        /// Screen width in pixels
        #[arg(long, default_value_t = 1920.0)]
        width: f64,
        /// Screen height in pixels
        #[arg(long, default_value_t = 1080.0)]
        height: f64,
        /// Use the wide variant instead of tall
        #[arg(long)]
        wide: bool,
        /// Layout commands to run in order, e.g. "grow shuffle_down flip"
        commands: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write the default configuration to the config path
    Init {
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    /// Validate the configuration and report problems
    Validate {
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Print the effective configuration
    Show {
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn load_config(path: &Option<PathBuf>) -> anyhow::Result<Config> {
    let path = path.clone().unwrap_or_else(config_file);
    if path.exists() {
        Config::read(&path).with_context(|| format!("reading {}", path.display()))
    } else {
        Ok(Config::default())
    }
}

fn run_config(cmd: ConfigCommands) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Init { path, force } => {
            let path = path.unwrap_or_else(config_file);
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            Config::default().save(&path)?;
            println!("wrote {}", path.display());
        }
        ConfigCommands::Validate { path } => {
            let config = load_config(&path)?;
            let issues = config.validate();
            if issues.is_empty() {
                println!("ok");
            } else {
                for issue in &issues {
                    eprintln!("{issue}");
                }
                bail!("{} problem(s) found", issues.len());
            }
        }
        ConfigCommands::Show { path } => {
            let config = load_config(&path)?;
            print!("{}", toml::to_string_pretty(&config.settings)?);
        }
    }
    Ok(())
}

fn run_simulate(
    windows: u64,
    width: f64,
    height: f64,
    wide: bool,
    commands: Vec<String>,
) -> anyhow::Result<()> {
    let mut config = load_config(&None)?;
    let fixes = config.auto_fix_values();
    if fixes > 0 {
        eprintln!("adjusted {fixes} out-of-range setting(s)");
    }

    let axis = if wide { SplitAxis::Wide } else { SplitAxis::Tall };
    let mut engine = LayoutEngine::new(config.settings.layout);
    let layout = engine.create_layout(axis);
    engine.add_windows(layout, (1..=windows).map(WindowId::new));

    let screen = Rect::new(0.0, 0.0, width, height);
    for raw in &commands {
        let command = LayoutCommand::from_str(raw)
            .map_err(|_| anyhow::anyhow!("unknown layout command: {raw}"))?;
        let response = engine.handle_command(layout, screen, command);
        if let Some(wid) = response.focus_window {
            println!("focus -> {wid}");
        }
    }

    println!("{}", engine.debug_tree(layout));
    for pane in engine.calculate_layout(layout, screen) {
        let f = pane.frame;
        println!(
            "{:>4}  {:>5}x{:<5} at ({}, {})",
            pane.window, f.size.width, f.size.height, f.origin.x, f.origin.y
        );
    }
    Ok(())
}

fn main() {
    log::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Config { config_cmd } => run_config(config_cmd),
        Commands::Simulate { windows, width, height, wide, commands } => {
            run_simulate(windows, width, height, wide, commands)
        }
    };
    if let Err(err) = result {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}
