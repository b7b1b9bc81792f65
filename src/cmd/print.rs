use std::fmt::Write;

use typetree::tree::{Scalar, TemplateField, ValueField};

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum number of bytes previewed for byte arrays.
	pub max_blob_preview: usize,
	/// Maximum recursive print depth for nested arrays/composites.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_string_len: 200,
			max_array_items: 16,
			max_blob_preview: 16,
			max_print_depth: 12,
		}
	}
}

/// Render a template tree, one node per line.
pub fn render_template(template: &TemplateField) -> String {
	let mut out = String::new();
	render_template_node(&mut out, template, 0);
	out
}

fn render_template_node(out: &mut String, template: &TemplateField, indent: usize) {
	let pad = " ".repeat(indent);
	let _ = write!(out, "{pad}{} {}", template.type_name, template.name);
	if template.has_value() {
		let _ = write!(out, " : {}", template.value_kind);
	}
	if template.is_array {
		out.push_str(" [array]");
	}
	if template.is_aligned {
		out.push_str(" [aligned]");
	}
	out.push('\n');
	for child in &template.children {
		render_template_node(out, child, indent + 2);
	}
}

/// Render a decoded value tree.
pub fn render_value(value: &ValueField<'_>, options: PrintOptions) -> String {
	let mut out = String::new();
	render_value_node(&mut out, value, 0, 0, options);
	out
}

fn render_value_node(out: &mut String, value: &ValueField<'_>, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match &value.scalar {
		Some(Scalar::ArraySize(size)) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}{} [... {size} items]", value.name());
				return;
			}
			let _ = writeln!(out, "{pad}{} [{size}]", value.name());
			for item in value.children.iter().take(options.max_array_items) {
				render_value_node(out, item, indent + 2, depth + 1, options);
			}
			if value.children.len() > options.max_array_items {
				let _ = writeln!(out, "{pad}  ... {} more", value.children.len() - options.max_array_items);
			}
		}
		Some(scalar) => {
			let _ = writeln!(out, "{pad}{} = {}", value.name(), format_scalar(scalar, options));
		}
		None => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}{} {} {{ ... }}", value.type_name(), value.name());
				return;
			}
			let _ = writeln!(out, "{pad}{} {} {{", value.type_name(), value.name());
			for item in &value.children {
				render_value_node(out, item, indent + 2, depth + 1, options);
			}
			let _ = writeln!(out, "{pad}}}");
		}
	}
}

fn format_scalar(scalar: &Scalar, options: PrintOptions) -> String {
	match scalar {
		Scalar::Bool(v) => v.to_string(),
		Scalar::I8(v) => v.to_string(),
		Scalar::U8(v) => v.to_string(),
		Scalar::I16(v) => v.to_string(),
		Scalar::U16(v) => v.to_string(),
		Scalar::I32(v) => v.to_string(),
		Scalar::U32(v) => v.to_string(),
		Scalar::I64(v) => v.to_string(),
		Scalar::U64(v) => v.to_string(),
		Scalar::F32(v) => v.to_string(),
		Scalar::F64(v) => v.to_string(),
		Scalar::String(raw) => format!("\"{}\"", truncate(&String::from_utf8_lossy(raw), options.max_string_len)),
		Scalar::Bytes(raw) => {
			let preview: Vec<String> = raw.iter().take(options.max_blob_preview).map(|byte| format!("{byte:02x}")).collect();
			let more = if raw.len() > options.max_blob_preview { " ..." } else { "" };
			format!("bytes[{}] {}{more}", raw.len(), preview.join(" "))
		}
		Scalar::ArraySize(size) => format!("[{size}]"),
	}
}

/// Convert a decoded value tree into JSON.
///
/// Composites become objects keyed by field name, arrays become JSON arrays,
/// and byte arrays become arrays of numbers.
pub fn value_to_json(value: &ValueField<'_>) -> serde_json::Value {
	use serde_json::{Map, Value as JsonValue, json};

	match &value.scalar {
		Some(Scalar::ArraySize(_)) => JsonValue::Array(value.children.iter().map(value_to_json).collect()),
		Some(Scalar::Bool(v)) => json!(v),
		Some(Scalar::I8(v)) => json!(v),
		Some(Scalar::U8(v)) => json!(v),
		Some(Scalar::I16(v)) => json!(v),
		Some(Scalar::U16(v)) => json!(v),
		Some(Scalar::I32(v)) => json!(v),
		Some(Scalar::U32(v)) => json!(v),
		Some(Scalar::I64(v)) => json!(v),
		Some(Scalar::U64(v)) => json!(v),
		Some(Scalar::F32(v)) => json!(v),
		Some(Scalar::F64(v)) => json!(v),
		Some(Scalar::String(raw)) => json!(String::from_utf8_lossy(raw)),
		Some(Scalar::Bytes(raw)) => json!(raw),
		None => {
			let fields: Map<String, JsonValue> = value.children.iter().map(|item| (item.name().to_owned(), value_to_json(item))).collect();
			JsonValue::Object(fields)
		}
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
