use std::path::PathBuf;

use typetree::tree::Result;

use crate::cmd::print::render_template;
use crate::cmd::util::{emit_json, load_flat_template};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long = "ref-hash")]
	pub ref_hash: bool,
	#[arg(long)]
	pub json: bool,
}

/// Rebuild and print the template tree of a serialized flat schema.
pub fn run(args: Args) -> Result<()> {
	let Args { file, ref_hash, json } = args;

	let template = load_flat_template(&file, ref_hash)?;
	let violation = template.validate().err();

	if json {
		let payload = TemplateJson {
			path: file.display().to_string(),
			node_count: template.node_count(),
			violation: violation.map(|item| item.to_string()),
			template: serde_json::to_value(&template)?,
		};
		return emit_json(&payload);
	}

	println!("path: {}", file.display());
	println!("node_count: {}", template.node_count());
	match violation {
		Some(item) => println!("violation: {item}"),
		None => println!("violation: none"),
	}
	print!("{}", render_template(&template));
	Ok(())
}

#[derive(serde::Serialize)]
struct TemplateJson {
	path: String,
	node_count: usize,
	violation: Option<String>,
	template: serde_json::Value,
}
