use std::fs;
use std::path::Path;

use typetree::tree::{ClassDatabase, ClassType, FlatFormat, FlatSchema, Result, TemplateField, TreeError, build_from_flat_schema};

/// Read a serialized flat schema and rebuild its template tree.
pub(crate) fn load_flat_template(path: &Path, ref_hash: bool) -> Result<TemplateField> {
	let format = if ref_hash { FlatFormat::WithRefHash } else { FlatFormat::Compact };
	let bytes = fs::read(path)?;
	let schema = FlatSchema::parse(&bytes, format)?;
	build_from_flat_schema(&schema)
}

/// Read a JSON class database.
pub(crate) fn load_class_database(path: &Path) -> Result<ClassDatabase> {
	let bytes = fs::read(path)?;
	ClassDatabase::from_json(&bytes)
}

/// Find a class by decimal id or by name.
pub(crate) fn find_class<'a>(db: &'a ClassDatabase, selector: &str) -> Result<&'a ClassType> {
	let found = match selector.parse::<i32>() {
		Ok(class_id) => db.find_by_id(class_id),
		Err(_) => db.find_by_name(selector),
	};
	found.ok_or_else(|| TreeError::ClassNotFound { name: selector.to_owned() })
}

/// Parse decimal or `0x`-prefixed hex offset literal.
pub(crate) fn parse_offset(value: &str) -> Result<u64> {
	let parsed = if let Some(stripped) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		u64::from_str_radix(stripped, 16)
	} else {
		value.parse::<u64>()
	};

	parsed.map_err(|_| TreeError::InvalidArgs {
		reason: format!("invalid offset literal: {value}"),
	})
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use typetree::tree::{ClassDatabase, ClassType, TreeError};

	use super::{find_class, parse_offset};

	#[test]
	fn offsets_accept_decimal_and_hex() {
		assert_eq!(parse_offset("128").expect("decimal"), 128);
		assert_eq!(parse_offset("0x80").expect("hex"), 128);
		assert_eq!(parse_offset("0X1f").expect("upper prefix"), 31);
		assert!(matches!(parse_offset("12z"), Err(TreeError::InvalidArgs { .. })));
	}

	#[test]
	fn classes_resolve_by_id_or_name() {
		let db = ClassDatabase {
			strings: ["GameObject", "Transform"].into_iter().collect(),
			classes: vec![
				ClassType {
					class_id: 1,
					name: 0,
					..ClassType::default()
				},
				ClassType {
					class_id: 4,
					name: 1,
					..ClassType::default()
				},
			],
		};

		assert_eq!(find_class(&db, "4").expect("by id").class_id, 4);
		assert_eq!(find_class(&db, "GameObject").expect("by name").class_id, 1);
		assert!(matches!(find_class(&db, "Camera"), Err(TreeError::ClassNotFound { .. })));
	}
}
