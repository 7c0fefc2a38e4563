use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use dirparser_core::{load_listing, Reconciler, ReportStatus, VerifyConfig};
use tracing_subscriber::EnvFilter;

mod output;

const EXAMPLES: &str = "\
Examples:
  dirparser -c filelist.txt ./recovered
  dirparser --verify filelist.txt ./recovered";

#[derive(Parser, Debug)]
#[command(
	name = "dirparser",
	version,
	about = "Recreate or verify a directory tree from a recovery-tool file listing",
	after_help = EXAMPLES
)]
#[command(group(ArgGroup::new("mode").required(true).args(["create", "verify"])))]
struct Cli {
	/// Create directory structure from the listing
	#[arg(short = 'c', long)]
	create: bool,
	/// Verify recovered files against the listing
	#[arg(short = 'v', long)]
	verify: bool,
	/// Path to the recovery-tool file listing
	listing: PathBuf,
	/// Directory to create the structure in / verify against
	target: PathBuf,
	/// Compare paths case-sensitively when verifying
	#[arg(long, conflicts_with = "create")]
	case_sensitive: bool,
	/// Follow symlinks while scanning for extra entries
	#[arg(long, conflicts_with = "create")]
	follow_links: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
	Create,
	Verify,
}

impl Cli {
	fn mode(&self) -> Mode {
		if self.create {
			Mode::Create
		} else {
			Mode::Verify
		}
	}

	fn verify_config(&self) -> VerifyConfig {
		VerifyConfig {
			case_insensitive: !self.case_sensitive,
			follow_links: self.follow_links,
		}
	}
}

fn exit_status(status: ReportStatus) -> u8 {
	if status.is_failure() {
		1
	} else {
		0
	}
}

fn init_tracing() {
	// Keep stdout for the report
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.init();
}

/// Fatal errors go to stdout with the report, context chain on one line
fn fatal_message(err: &anyhow::Error) -> String {
	format!("{err:#}")
}

fn run(cli: &Cli) -> Result<ExitCode> {
	let listing = load_listing(&cli.listing).context("Error parsing listing file")?;

	let mut reconciler = Reconciler::with_config(&cli.target, cli.verify_config());
	reconciler.set_progress_callback(output::print_event);

	match cli.mode() {
		Mode::Create => {
			println!("Found {} directories in the listing", listing.directories.len());
			let report = reconciler
				.create_directories(&listing)
				.context("Error creating directories")?;
			output::print_create_summary(&report);
			Ok(ExitCode::from(exit_status(report.status())))
		}
		Mode::Verify => {
			println!(
				"Verifying against listing: {} directories, {} files",
				listing.directories.len(),
				listing.files.len()
			);
			println!();
			let report = reconciler.verify(&listing);
			output::print_verify_summary(&report, &listing);
			Ok(ExitCode::from(exit_status(report.status())))
		}
	}
}

fn main() -> ExitCode {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(err) => {
			// Usage errors exit with 1, help and version with 0
			let _ = err.print();
			return if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
		}
	};

	init_tracing();

	match run(&cli) {
		Ok(code) => code,
		Err(err) => {
			println!("{}", fatal_message(&err));
			ExitCode::FAILURE
		}
	}
}
