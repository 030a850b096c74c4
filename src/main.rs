use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use std::path::PathBuf;

use rusty_las_tiler::info::{summarize_file, unix_timestamp, write_csv, write_json};
use rusty_las_tiler::merge::{merge_dir, MergeOutcome};
use rusty_las_tiler::options::{MergeOptions, MergeOrder, SplitOptions, ThinOptions};
use rusty_las_tiler::thinning::thin_file;
use rusty_las_tiler::tiling::split_file_with;

#[derive(Parser)]
#[command(name = "las-tiler", version, about = "Split, merge, thin and inspect LAS point clouds")]
struct Args {
	#[command(subcommand)]
	cmd: Cmd,
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
	/// By file name
	Sorted,
	/// As the file system lists the directory
	Listing,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
	Csv,
	Json,
}

#[derive(Subcommand)]
enum Cmd {
	/// Split a LAS file into a regular grid of tiles named tile_{i}_{j}.las
	Split {
		input_file: PathBuf,
		output_dir: PathBuf,
		#[arg(long, alias = "tile_width")]
		tile_width: f64,
		#[arg(long, alias = "tile_height")]
		tile_height: f64,
	},

	/// Merge every .las/.laz file of a directory into one file
	Merge {
		input_dir: PathBuf,
		output_file: PathBuf,
		/// Inputs are read sorted by file name unless `listing` is given
		#[arg(long, value_enum, default_value_t = Order::Sorted)]
		order: Order,
		/// Warn about and skip unreadable or mismatching inputs
		#[arg(long)]
		skip_invalid: bool,
		/// Write the bounds of the merged points instead of the first header's
		#[arg(long)]
		recompute_bounds: bool,
	},

	/// Keep a random fraction of the points
	Thin {
		input: PathBuf,
		output: PathBuf,
		/// Between 0 and 1, exclusive
		fraction: f64,
		#[arg(long, default_value_t = 0)]
		seed: u64,
	},

	/// Export header metadata and point statistics
	Info {
		input: PathBuf,
		/// Defaults to las_summary.csv or las_summary.json
		#[arg(short, long)]
		output: Option<PathBuf>,
		#[arg(long, value_enum, default_value_t = Format::Csv)]
		format: Format,
	},
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	match args.cmd {
		Cmd::Split {
			input_file,
			output_dir,
			tile_width,
			tile_height,
		} => {
			let options = SplitOptions::new(tile_width, tile_height);
			split_file_with(&input_file, &output_dir, &options, |tile| {
				println!("Saved tile: {}", tile.path.display())
			})
			.with_context(|| format!("splitting {}", input_file.display()))?;
			println!("Splitting completed.");
		}

		Cmd::Merge {
			input_dir,
			output_file,
			order,
			skip_invalid,
			recompute_bounds,
		} => {
			let options = MergeOptions {
				order: match order {
					Order::Sorted => MergeOrder::Sorted,
					Order::Listing => MergeOrder::Listing,
				},
				skip_invalid,
				recompute_bounds,
			};
			let outcome = merge_dir(&input_dir, &output_file, &options)
				.with_context(|| format!("merging {}", input_dir.display()))?;
			match outcome {
				MergeOutcome::NoInputFiles => {
					println!("No LAS/LAZ files found in: {}", input_dir.display())
				}
				MergeOutcome::Merged {
					output,
					files,
					points,
					skipped,
				} => {
					if !skipped.is_empty() {
						println!("Skipped {} files.", skipped.len());
					}
					println!("Merged {} points from {} files.", points, files);
					println!("Merged LAS saved to: {}", output.display());
				}
			}
		}

		Cmd::Thin {
			input,
			output,
			fraction,
			seed,
		} => {
			let kept = thin_file(&input, &output, &ThinOptions { fraction, seed })
				.with_context(|| format!("thinning {}", input.display()))?;
			println!("Thinned LAS file with {} points saved to: {}", kept, output.display());
		}

		Cmd::Info {
			input,
			output,
			format,
		} => {
			let summary =
				summarize_file(&input).with_context(|| format!("reading {}", input.display()))?;
			let output = output.unwrap_or_else(|| match format {
				Format::Csv => PathBuf::from("las_summary.csv"),
				Format::Json => PathBuf::from("las_summary.json"),
			});
			match format {
				Format::Csv => write_csv(&summary, &output, unix_timestamp()),
				Format::Json => write_json(&summary, &output),
			}
			.with_context(|| format!("writing {}", output.display()))?;
			println!("Summary saved to: {}", output.display());
		}
	}

	Ok(())
}
