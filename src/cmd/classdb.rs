use std::path::PathBuf;

use typetree::tree::{Result, build_from_external_schema};

use crate::cmd::print::render_template;
use crate::cmd::util::{emit_json, find_class, load_class_database};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub class: Option<String>,
	#[arg(long)]
	pub editor: bool,
	#[arg(long)]
	pub json: bool,
}

/// List class database entries, or print one class's template tree.
pub fn run(args: Args) -> Result<()> {
	let Args { file, class, editor, json } = args;

	let db = load_class_database(&file)?;

	let Some(selector) = class else {
		let rows = db
			.classes
			.iter()
			.map(|item| {
				Ok(ClassRowJson {
					class_id: item.class_id,
					name: db.class_name(item)?.to_owned(),
					editor: item.editor_root.is_some(),
					release: item.release_root.is_some(),
				})
			})
			.collect::<Result<Vec<_>>>()?;

		if json {
			return emit_json(&rows);
		}
		println!("path: {}", file.display());
		println!("classes: {}", rows.len());
		for row in &rows {
			let variants = match (row.editor, row.release) {
				(true, true) => "editor+release",
				(true, false) => "editor",
				(false, true) => "release",
				(false, false) => "none",
			};
			println!("  {:>6} {} ({variants})", row.class_id, row.name);
		}
		return Ok(());
	};

	let item = find_class(&db, &selector)?;
	let template = build_from_external_schema(&db, item, editor)?;

	if json {
		return emit_json(&template);
	}
	println!("path: {}", file.display());
	println!("class: {} {}", item.class_id, db.class_name(item)?);
	let from_editor = item
		.preferred_root(editor)
		.zip(item.editor_root.as_ref())
		.is_some_and(|(root, editor_root)| std::ptr::eq(root, editor_root));
	println!("variant: {}", if from_editor { "editor" } else { "release" });
	print!("{}", render_template(&template));
	Ok(())
}

#[derive(serde::Serialize)]
struct ClassRowJson {
	class_id: i32,
	name: String,
	editor: bool,
	release: bool,
}
