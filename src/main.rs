#![allow(missing_docs)]

use clap::{ArgAction, Parser, Subcommand};
use simplelog::{Config, LevelFilter, WriteLogger};

mod cmd;

#[derive(Parser)]
#[command(name = "typetree", about = "Type-tree schema inspection and decoding tools")]
struct Cli {
	/// Increase log verbosity (-v info, -vv debug, -vvv trace).
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Template(cmd::template::Args),
	Classdb(cmd::classdb::Args),
	Decode(cmd::decode::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> typetree::tree::Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match cli.command {
		Commands::Template(args) => cmd::template::run(args),
		Commands::Classdb(args) => cmd::classdb::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
	}
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => return,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};
	if let Err(err) = WriteLogger::init(level, Config::default(), std::io::stderr()) {
		eprintln!("failed to initialize logging: {err}");
	}
}
