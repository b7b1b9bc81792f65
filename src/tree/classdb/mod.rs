use log::debug;

use crate::tree::{IndexedStrings, Result, StringTable, TemplateField, TreeError};

/// One node of an explicit class database field tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
pub struct ClassNode {
	/// String table index of the field name.
	pub field_name: u16,
	/// String table index of the type name.
	pub type_name: u16,
	/// Raw type flags; exactly `1` marks an array.
	#[serde(default)]
	pub type_flags: u8,
	/// Raw meta flags; bit `0x4000` requests alignment.
	#[serde(default)]
	pub meta_flags: u32,
	/// Declared byte size, `-1` when variable.
	#[serde(default)]
	pub byte_size: i32,
	/// Node format version.
	#[serde(default)]
	pub version: u16,
	/// Child nodes in declared order.
	#[serde(default)]
	pub children: Vec<ClassNode>,
}

/// One class entry with its editor and release field trees.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
pub struct ClassType {
	/// Numeric class id.
	pub class_id: i32,
	/// String table index of the class name.
	pub name: u16,
	/// String table index of the base class name.
	#[serde(default)]
	pub base_name: Option<u16>,
	/// Field tree used by editor builds.
	#[serde(default)]
	pub editor_root: Option<ClassNode>,
	/// Field tree used by release builds.
	#[serde(default)]
	pub release_root: Option<ClassNode>,
}

impl ClassType {
	/// Select a root variant: editor when preferred and present, else release, else editor.
	pub fn preferred_root(&self, prefer_editor: bool) -> Option<&ClassNode> {
		if prefer_editor && self.editor_root.is_some() {
			return self.editor_root.as_ref();
		}
		self.release_root.as_ref().or(self.editor_root.as_ref())
	}
}

/// Standalone class database keyed by class id and name.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
pub struct ClassDatabase {
	/// Shared string table for class and node names.
	pub strings: IndexedStrings,
	/// Class entries.
	pub classes: Vec<ClassType>,
}

impl ClassDatabase {
	/// Parse a JSON-encoded database.
	pub fn from_json(bytes: &[u8]) -> Result<Self> {
		Ok(serde_json::from_slice(bytes)?)
	}

	/// Look up a class by numeric id.
	pub fn find_by_id(&self, class_id: i32) -> Option<&ClassType> {
		self.classes.iter().find(|item| item.class_id == class_id)
	}

	/// Look up a class by resolved name.
	pub fn find_by_name(&self, name: &str) -> Option<&ClassType> {
		let idx = self.strings.position(name)?;
		self.classes.iter().find(|item| u32::from(item.name) == idx)
	}

	/// Resolve a class name through the string table.
	pub fn class_name(&self, class: &ClassType) -> Result<&str> {
		self.strings.resolve(u32::from(class.name))
	}
}

/// Mirror one class's preferred field tree into a template tree.
pub fn build_from_external_schema(db: &ClassDatabase, class: &ClassType, prefer_editor: bool) -> Result<TemplateField> {
	let Some(root) = class.preferred_root(prefer_editor) else {
		let name = db
			.class_name(class)
			.map(str::to_owned)
			.unwrap_or_else(|_| format!("#{}", class.class_id));
		return Err(TreeError::MissingSchema { class: name });
	};

	let template = build_node(&db.strings, root)?;
	debug!(
		"built template {} ({}) from class {} with {} nodes",
		template.name,
		template.type_name,
		class.class_id,
		template.node_count()
	);
	Ok(template)
}

fn build_node<S: StringTable>(strings: &S, node: &ClassNode) -> Result<TemplateField> {
	let name = strings.resolve(u32::from(node.field_name))?;
	let type_name = strings.resolve(u32::from(node.type_name))?;
	let children = node
		.children
		.iter()
		.map(|child| build_node(strings, child))
		.collect::<Result<Vec<_>>>()?;
	Ok(TemplateField::from_raw(name, type_name, node.type_flags, node.meta_flags, children))
}
