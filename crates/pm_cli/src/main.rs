//! Play Match CLI
//!
//! Terminal viewer for tactical analysis results: play tables, similar-play
//! ranking and pairwise comparison.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use pm_core::{MatchSide, SelectionStore, TacticalWorkspace};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "pm_cli")]
#[command(about = "Inspect tactical play comparison results", long_about = None)]
struct Cli {
    /// View config JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the number of candidates shown
    #[arg(long, global = true)]
    top_k: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Side {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
}

#[cfg(feature = "cli")]
impl From<Side> for MatchSide {
    fn from(side: Side) -> Self {
        match side {
            Side::One => MatchSide::Match1,
            Side::Two => MatchSide::Match2,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List plays with metrics and zone coverage
    Plays {
        /// Analysis response JSON file
        #[arg(long)]
        analysis: PathBuf,

        /// Match dataset
        #[arg(long, value_enum, default_value = "1")]
        side: Side,

        /// Also print every normalized pass
        #[arg(long, default_value = "false")]
        passes: bool,
    },

    /// Rank match-2 plays most similar to a match-1 play
    Similar {
        #[arg(long)]
        analysis: PathBuf,

        /// Match-1 play id
        #[arg(long)]
        play: u32,
    },

    /// Compare a match-1 play with a match-2 play
    Compare {
        #[arg(long)]
        analysis: PathBuf,

        #[arg(long)]
        play1: u32,

        #[arg(long)]
        play2: u32,

        /// Print JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Validate two match files before uploading them
    Check {
        #[arg(long)]
        match1: PathBuf,

        #[arg(long)]
        match2: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = pm_cli::load_config(cli.config.as_deref(), cli.top_k)?;
    let store = SelectionStore::new();
    let mut workspace = TacticalWorkspace::new(store.clone(), config);

    match cli.command {
        Commands::Plays {
            analysis,
            side,
            passes,
        } => {
            pm_cli::load_analysis(&mut workspace, &analysis)?;
            let views = workspace.play_views(side.into());
            print!("{}", pm_cli::render_play_table(&views));
            if passes {
                for view in &views {
                    println!("\nPlay {}:", view.play_id);
                    print!("{}", pm_cli::render_passes(view));
                }
            }
        }

        Commands::Similar { analysis, play } => {
            pm_cli::load_analysis(&mut workspace, &analysis)?;
            store.select_play1(Some(play));
            print!("{}", pm_cli::render_candidates(play, &workspace.candidates()));
        }

        Commands::Compare {
            analysis,
            play1,
            play2,
            json,
        } => {
            pm_cli::load_analysis(&mut workspace, &analysis)?;
            store.select_play1(Some(play1));
            store.select_play2(Some(play2));

            let Some(cmp) = workspace.comparison() else {
                anyhow::bail!("Play {} (match 1) or play {} (match 2) not found", play1, play2);
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&cmp)?);
            } else {
                print!("{}", pm_cli::render_comparison(&cmp));
            }
        }

        Commands::Check { match1, match2 } => {
            pm_cli::check_match_files(&match1, &match2)?;
            println!("Both match files are valid JSON and ready to upload");
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("pm_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
