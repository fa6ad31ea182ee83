use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rotor_enigma::{MachineConfig, Session};

/// Encrypt or decrypt messages with a configurable rotor machine.
///
/// Input consists of settings lines (starting with `*`) followed by the
/// messages they apply to. Output is written in blocks of five.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
	/// Machine configuration file.
	#[arg(value_name = "CONFIG")]
	config: PathBuf,

	/// Messages to convert (standard input if omitted).
	#[arg(value_name = "INPUT")]
	input: Option<PathBuf>,

	/// Where to write converted messages (standard output if omitted).
	#[arg(value_name = "OUTPUT")]
	output: Option<PathBuf>,

	/// More logging on stderr (-v debug, -vv trace).
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

macro_rules! unwrap {
	($res:expr) => {
		match $res {
			Ok(v) => v,
			Err(e) => {
				let _ = writeln!(io::stderr(), "Error: {:#}", e);
				std::process::exit(1);
			}
		}
	};
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
	let level = match verbose {
		0 => Level::WARN,
		1 => Level::DEBUG,
		_ => Level::TRACE,
	};
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
	let subscriber = FmtSubscriber::builder()
		.with_env_filter(env_filter)
		.with_writer(io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;
	Ok(())
}

fn read_config(path: &Path) -> anyhow::Result<MachineConfig> {
	let text = fs::read_to_string(path)
		.with_context(|| format!("could not open {}", path.display()))?;
	let config = MachineConfig::parse(&text)
		.with_context(|| format!("in configuration {}", path.display()))?;
	info!(
		path = %path.display(),
		rotors = config.rotors().len(),
		"loaded configuration"
	);
	Ok(config)
}

fn encipher_file(args: &Args, config: &MachineConfig) -> anyhow::Result<()> {
	let mut session = Session::new(config)?;

	let input: Box<dyn BufRead> = match &args.input {
		Some(path) => Box::new(BufReader::new(
			File::open(path).with_context(|| format!("could not open {}", path.display()))?,
		)),
		None => Box::new(io::stdin().lock()),
	};

	let mut output: Box<dyn Write> = match &args.output {
		Some(path) => Box::new(BufWriter::new(
			File::create(path).with_context(|| format!("could not open {}", path.display()))?,
		)),
		None => Box::new(io::stdout().lock()),
	};

	session.process(input, &mut output)?;
	Ok(())
}

fn main() {
	let args = Args::parse();
	unwrap!(init_logging(args.verbose));

	let config = unwrap!(read_config(&args.config));
	unwrap!(encipher_file(&args, &config));
}
