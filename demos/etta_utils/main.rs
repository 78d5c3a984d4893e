//! Animation description utility.
//!
//! Provides two subcommands:
//! - `validate`: scan a directory and parse every `.mcmeta` / `.mcmetax` file.
//! - `simulate`: tick one file against scripted events and print the frames shown.

use std::{
	fs,
	ops::Range,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use etta_rs::prelude::*;
use walkdir::WalkDir;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Validate(opts) => run_validate(opts),
		Command::Simulate(opts) => run_simulate(opts),
	}
}

#[derive(Parser)]
#[command(name = "etta_utils")]
#[command(author = "etta-rs project")]
#[command(version)]
#[command(about = "Validate and simulate texture animation descriptions", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Parse every animation description under a directory
	Validate(ValidateArgs),
	/// Tick a single description and print the frame shown each tick
	Simulate(SimulateArgs),
}

#[derive(Args)]
struct ValidateArgs {
	/// Directory containing texture assets
	#[arg(value_name = "DIR")]
	root: PathBuf,

	/// Reject inverted frame ranges instead of collapsing them
	#[arg(long, default_value_t = false)]
	strict: bool,

	/// Print every segment of files that parse cleanly
	#[arg(short, long, default_value_t = false)]
	verbose: bool,
}

#[derive(Args)]
struct SimulateArgs {
	/// Path to a single animation description
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Number of ticks to run
	#[arg(short, long, value_name = "COUNT", default_value_t = 40)]
	ticks: u64,

	/// Event active over a tick window, as `name@start..end`
	#[arg(short, long = "event", value_name = "EVENT", value_parser = parse_window)]
	events: Vec<EventWindow>,

	/// Player health
	#[arg(long, value_name = "HP", default_value_t = 20.0)]
	health: f64,

	/// Player food level
	#[arg(long, value_name = "FOOD", default_value_t = 20)]
	hunger: i32,

	/// Print a JSON snapshot per tick instead of the frame number
	#[arg(long, default_value_t = false)]
	json: bool,
}

#[derive(Clone, Debug)]
struct EventWindow {
	name: String,
	ticks: Range<u64>,
}

fn parse_window(value: &str) -> Result<EventWindow, String> {
	let (name, window) = value.split_once('@').ok_or_else(|| format!("expected name@start..end, got `{value}`"))?;
	let (start, end) = window.split_once("..").ok_or_else(|| format!("expected start..end, got `{window}`"))?;
	let start = start.trim().parse::<u64>().map_err(|err| format!("bad start tick: {err}"))?;
	let end = end.trim().parse::<u64>().map_err(|err| format!("bad end tick: {err}"))?;

	Ok(EventWindow {
		name: name.trim().to_lowercase(),
		ticks: start..end,
	})
}

/// Events switched on and off by tick number.
struct Script<'a> {
	windows: &'a [EventWindow],
	tick: u64,
}

impl GameState for Script<'_> {
	fn is_event_active(&self, name: &str) -> bool {
		let name = name.to_lowercase();
		self.windows.iter().any(|window| window.name == name && window.ticks.contains(&self.tick))
	}
}

fn run_validate(args: ValidateArgs) -> Result<()> {
	if !args.root.is_dir() {
		bail!("{} is not a directory", args.root.display());
	}

	let config = if args.strict {
		ParseConfig::strict()
	} else {
		ParseConfig::default()
	};
	let files = collect_description_files(&args.root);
	if files.is_empty() {
		println!("No animation descriptions found under {}", args.root.display());
		return Ok(());
	}

	let mut failures = 0usize;
	for path in &files {
		match validate_file(path, &args.root, &config) {
			Ok(metadata) => {
				println!(
					"[OK]  {} ({}, {} segments)",
					metadata.texture,
					metadata.source,
					metadata.segments.len()
				);
				if args.verbose {
					for segment in &metadata.segments {
						println!("      - {} [{}] priority {}", segment.name, segment.type_name(), segment.priority);
					}
				}
			}
			Err(err) => {
				failures += 1;
				println!("[ERR] {} - {err:#}", path.display());
			}
		}
	}

	println!("Checked {} files: {} ok, {failures} failed", files.len(), files.len() - failures);
	if failures > 0 {
		bail!("Validation finished with errors");
	}

	Ok(())
}

fn run_simulate(args: SimulateArgs) -> Result<()> {
	let texture = texture_id_for(&args.file, Path::new(""));
	let content = fs::read_to_string(&args.file).with_context(|| format!("Failed to read {}", args.file.display()))?;

	let registry = AnimationRegistry::new();
	registry
		.load(&content, &texture, &ParseConfig::default())
		.with_context(|| format!("Failed to parse {}", args.file.display()))?;

	let player = PlayerSnapshot::new(args.health, 20.0, args.hunger);
	for tick in 0..args.ticks {
		let script = Script {
			windows: &args.events,
			tick,
		};
		registry.tick(&player, &script);

		if args.json {
			let snapshot = registry.snapshot(&texture).context("texture vanished from registry")?;
			println!("{}", serde_json::to_string(&snapshot)?);
		} else {
			println!("{tick:>5}: {}", registry.current_frame(&texture));
		}
	}

	if !args.json {
		println!();
		println!("{}", registry.debug_info(&texture));
	}

	Ok(())
}

fn collect_description_files(root: &Path) -> Vec<PathBuf> {
	let mut files = Vec::new();

	for entry in WalkDir::new(root).follow_links(false) {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				println!("{err}");
				continue;
			}
		};

		let is_description = entry
			.path()
			.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| ext == "mcmeta" || ext == "mcmetax");
		if entry.file_type().is_file() && is_description {
			files.push(entry.into_path());
		}
	}

	files.sort();
	files
}

fn validate_file(path: &Path, root: &Path, config: &ParseConfig) -> Result<AnimationMetadata> {
	let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
	let texture = texture_id_for(path, root);
	let metadata = format::parse(&content, &texture, config)?;
	Ok(metadata)
}

/// `item/clock.png.etta/anim.mcmetax` and `item/clock.png.mcmeta` both map to `item/clock`.
fn texture_id_for(path: &Path, root: &Path) -> TextureId {
	let relative = path.strip_prefix(root).unwrap_or(path);
	let text = relative.to_string_lossy().replace('\\', "/");

	let base = match text.find(".etta/") {
		Some(index) => &text[..index],
		None => text.trim_end_matches(".mcmetax").trim_end_matches(".mcmeta"),
	};
	let base = base.trim_end_matches(".png");

	TextureId::from(base)
}
