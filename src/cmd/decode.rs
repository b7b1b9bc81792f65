use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use typetree::tree::{ByteSource, DecodeOptions, Result, StreamReader, TemplateField, TreeError, build_from_external_schema, decode_at_with};

use crate::cmd::print::{PrintOptions, render_value, value_to_json};
use crate::cmd::util::{emit_json, find_class, load_class_database, load_flat_template, parse_offset};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub schema: Option<PathBuf>,
	#[arg(long = "ref-hash")]
	pub ref_hash: bool,
	#[arg(long)]
	pub classdb: Option<PathBuf>,
	#[arg(long)]
	pub class: Option<String>,
	#[arg(long)]
	pub editor: bool,
	#[arg(long, default_value = "0")]
	pub offset: String,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-array")]
	pub max_array: Option<usize>,
	#[arg(long = "max-items")]
	pub max_items: Option<usize>,
}

/// Decode one value tree from a data file using a flat schema or class database.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file,
		schema,
		ref_hash,
		classdb,
		class,
		editor,
		offset,
		json,
		max_array,
		max_items,
	} = args;

	let offset = parse_offset(&offset)?;
	let template = load_template(schema, ref_hash, classdb, class, editor)?;

	let decode = DecodeOptions { max_array_len: max_array };

	let mut reader = StreamReader::new(BufReader::new(File::open(&file)?))?;
	let value = decode_at_with(&template, &mut reader, offset, &decode)?;
	let end = reader.position();

	if json {
		let payload = DecodeJson {
			path: file.display().to_string(),
			root: format!("{} {}", template.type_name, template.name),
			offset,
			end,
			value: value_to_json(&value),
		};
		return emit_json(&payload);
	}

	let mut print = PrintOptions::default();
	if let Some(max_items) = max_items {
		print.max_array_items = max_items;
	}

	println!("path: {}", file.display());
	println!("root: {} {}", template.type_name, template.name);
	println!("offset: {offset}");
	println!("end: {end}");
	println!("decoded:");
	print!("{}", render_value(&value, print));
	Ok(())
}

fn load_template(schema: Option<PathBuf>, ref_hash: bool, classdb: Option<PathBuf>, class: Option<String>, editor: bool) -> Result<TemplateField> {
	match (schema, classdb, class) {
		(Some(path), None, None) => load_flat_template(&path, ref_hash),
		(None, Some(path), Some(selector)) => {
			let db = load_class_database(&path)?;
			let item = find_class(&db, &selector)?;
			build_from_external_schema(&db, item, editor)
		}
		(None, Some(_), None) => Err(TreeError::InvalidArgs {
			reason: "--classdb requires --class".to_owned(),
		}),
		_ => Err(TreeError::InvalidArgs {
			reason: "pass exactly one of --schema or --classdb/--class".to_owned(),
		}),
	}
}

#[derive(serde::Serialize)]
struct DecodeJson {
	path: String,
	root: String,
	offset: u64,
	end: u64,
	value: serde_json::Value,
}
