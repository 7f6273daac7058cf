use anyhow::Result;
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;

use provmap_verify::{load_map, report};

#[derive(Parser)]
#[command(name = "provmap-verify")]
#[command(about = "Verify province map datasets for coverage and integrity")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate that every bitmap pixel maps to a defined province
    Check {
        /// Path to the provinces bitmap (.bmp)
        bitmap: PathBuf,

        /// Path to the definition table (.csv)
        definitions: PathBuf,

        /// Output report as JSON
        #[arg(long)]
        json: bool,

        /// Write report to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show map dimensions and definition counts
    Info {
        /// Path to the provinces bitmap (.bmp)
        bitmap: PathBuf,

        /// Path to the definition table (.csv)
        definitions: PathBuf,
    },

    /// Spatial statistics for a single province
    Province {
        /// Province id to inspect
        id: i32,

        /// Path to the provinces bitmap (.bmp)
        bitmap: PathBuf,

        /// Path to the definition table (.csv)
        definitions: PathBuf,

        /// Output statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a pixel coordinate to a province id
    Locate {
        /// Pixel x coordinate
        x: u32,

        /// Pixel y coordinate
        y: u32,

        /// Path to the provinces bitmap (.bmp)
        bitmap: PathBuf,

        /// Path to the definition table (.csv)
        definitions: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Check {
            bitmap,
            definitions,
            json,
            output,
        } => {
            let map = load_map(&bitmap, &definitions)?;
            let summary = map.validate();

            if json {
                let json_output = report::json_report(&summary)?;
                if let Some(path) = output {
                    std::fs::write(&path, &json_output)?;
                    log::info!("Report written to: {}", path.display());
                } else {
                    println!("{}", json_output);
                }
            } else {
                let mut writer: Box<dyn std::io::Write> = if let Some(path) = output {
                    Box::new(std::fs::File::create(&path)?)
                } else {
                    Box::new(std::io::stdout())
                };
                report::print_report(&map, &summary, &mut writer)?;
            }

            // Exit with error code if coverage is not total
            if !summary.is_valid() {
                std::process::exit(1);
            }
        }

        Commands::Info { bitmap, definitions } => {
            let map = load_map(&bitmap, &definitions)?;
            let distinct: HashSet<_> = map.ids().iter().collect();

            println!("\n=== Map Info ===");
            println!("Surface: {}x{}", map.width(), map.height());
            println!("Definition rows: {}", map.province_count());
            println!("Distinct province ids: {}", distinct.len());
        }

        Commands::Province {
            id,
            bitmap,
            definitions,
            json,
        } => {
            let map = load_map(&bitmap, &definitions)?;

            match map.stats(id) {
                Some(stats) if json => {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                }
                Some(stats) => {
                    println!("Province {}: {} pixels", id, stats.pixel_count);
                    println!(
                        "Bounding box: ({}, {}) .. ({}, {})",
                        stats.min_x, stats.min_y, stats.max_x, stats.max_y
                    );
                    println!("Center: ({}, {})", stats.center_x, stats.center_y);
                }
                None => {
                    println!("Province {}: no pixels on the map", id);
                    std::process::exit(1);
                }
            }
        }

        Commands::Locate {
            x,
            y,
            bitmap,
            definitions,
        } => {
            let map = load_map(&bitmap, &definitions)?;

            match map.locate(x, y) {
                Some(id) => println!("({}, {}) -> province {}", x, y, id),
                None => {
                    println!("({}, {}) -> not found", x, y);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
