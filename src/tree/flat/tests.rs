use crate::tree::{FlatFormat, FlatNode, FlatSchema, StringBuffer, TreeError, ValueKind, build_from_flat_schema};

/// `(level, type_name, name, type_flags, meta_flags)`
type Row = (u8, &'static str, &'static str, u8, u32);

fn schema(rows: &[Row]) -> FlatSchema {
	let texts = rows.iter().flat_map(|(_, type_name, name, _, _)| [*type_name, *name]);
	let (strings, offsets) = StringBuffer::from_strings(texts);
	let nodes = rows
		.iter()
		.enumerate()
		.map(|(idx, (level, _, _, type_flags, meta_flags))| FlatNode {
			level: *level,
			type_flags: *type_flags,
			type_ref: offsets[idx * 2],
			name_ref: offsets[idx * 2 + 1],
			index: idx as u32,
			meta_flags: *meta_flags,
			..FlatNode::default()
		})
		.collect();
	FlatSchema { nodes, strings }
}

#[test]
fn rebuilds_nested_tree_from_levels() {
	let source = schema(&[
		(0, "GameObject", "Base", 0, 0),
		(1, "vector", "m_Component", 0, 0x4000),
		(2, "Array", "Array", 1, 0),
		(3, "int", "size", 0, 0),
		(3, "ComponentPair", "data", 0, 0),
		(4, "int", "m_FileID", 0, 0),
		(4, "SInt64", "m_PathID", 0, 0),
		(1, "unsigned int", "m_Layer", 0, 0),
		(1, "string", "m_Name", 0, 0x8000),
		(2, "Array", "Array", 1, 0x4000),
		(3, "int", "size", 0, 0),
		(3, "char", "data", 0, 0),
		(1, "bool", "m_IsActive", 0, 0x4000),
	]);

	let root = build_from_flat_schema(&source).expect("template builds");
	assert_eq!(root.name.as_ref(), "Base");
	assert_eq!(root.type_name.as_ref(), "GameObject");
	assert_eq!(root.value_kind, ValueKind::None);
	assert_eq!(root.node_count(), 13);

	let names: Vec<&str> = root.children.iter().map(|item| item.name.as_ref()).collect();
	assert_eq!(names, ["m_Component", "m_Layer", "m_Name", "m_IsActive"]);

	let component = &root.children[0];
	assert!(component.is_aligned);
	let array = &component.children[0];
	assert!(array.is_array);
	assert_eq!(array.children.len(), 2);
	assert_eq!(array.children[0].value_kind, ValueKind::Int32);
	let pair = &array.children[1];
	assert_eq!(pair.children.len(), 2);
	assert_eq!(pair.children[1].value_kind, ValueKind::Int64);

	assert_eq!(root.children[1].value_kind, ValueKind::UInt32);
	assert_eq!(root.children[2].value_kind, ValueKind::String);
	assert_eq!(root.children[2].children.len(), 1);
	assert_eq!(root.children[3].value_kind, ValueKind::Bool);
	assert!(root.children[3].children.is_empty());
}

#[test]
fn deep_run_returns_to_shallower_sibling() {
	let source = schema(&[
		(0, "Root", "Base", 0, 0),
		(1, "A", "a", 0, 0),
		(2, "B", "b", 0, 0),
		(3, "int", "c", 0, 0),
		(1, "int", "d", 0, 0),
	]);

	let root = build_from_flat_schema(&source).expect("template builds");
	assert_eq!(root.children.len(), 2);
	assert_eq!(root.children[0].children[0].children[0].name.as_ref(), "c");
	assert_eq!(root.children[1].name.as_ref(), "d");
	assert!(root.children[1].children.is_empty());
}

#[test]
fn level_gaps_nest_under_nearest_shallower_node() {
	let source = schema(&[(0, "Root", "Base", 0, 0), (2, "int", "skip", 0, 0), (1, "int", "next", 0, 0)]);

	let root = build_from_flat_schema(&source).expect("template builds");
	let names: Vec<&str> = root.children.iter().map(|item| item.name.as_ref()).collect();
	assert_eq!(names, ["skip", "next"]);
}

#[test]
fn nodes_after_root_subtree_are_ignored() {
	let source = schema(&[(0, "Root", "Base", 0, 0), (1, "int", "a", 0, 0), (0, "Other", "Stray", 0, 0), (1, "int", "b", 0, 0)]);

	let root = build_from_flat_schema(&source).expect("template builds");
	assert_eq!(root.name.as_ref(), "Base");
	assert_eq!(root.children.len(), 1);
}

#[test]
fn empty_schema_fails() {
	let source = FlatSchema {
		nodes: Vec::new(),
		strings: StringBuffer::default(),
	};
	assert!(matches!(build_from_flat_schema(&source), Err(TreeError::EmptySchema)));
}

#[test]
fn unresolvable_name_fails() {
	let mut source = schema(&[(0, "Root", "Base", 0, 0)]);
	source.nodes[0].name_ref = 999;
	assert!(matches!(build_from_flat_schema(&source), Err(TreeError::StringOffsetOutOfRange { offset: 999, .. })));
}

fn encode(source: &FlatSchema, format: FlatFormat) -> Vec<u8> {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(&(source.nodes.len() as i32).to_le_bytes());
	bytes.extend_from_slice(&(source.strings.as_bytes().len() as i32).to_le_bytes());
	for node in &source.nodes {
		bytes.extend_from_slice(&node.version.to_le_bytes());
		bytes.push(node.level);
		bytes.push(node.type_flags);
		bytes.extend_from_slice(&node.type_ref.to_le_bytes());
		bytes.extend_from_slice(&node.name_ref.to_le_bytes());
		bytes.extend_from_slice(&node.byte_size.to_le_bytes());
		bytes.extend_from_slice(&node.index.to_le_bytes());
		bytes.extend_from_slice(&node.meta_flags.to_le_bytes());
		if format == FlatFormat::WithRefHash {
			bytes.extend_from_slice(&node.ref_type_hash.to_le_bytes());
		}
	}
	bytes.extend_from_slice(source.strings.as_bytes());
	bytes
}

#[test]
fn parses_serialized_node_list() {
	let mut source = schema(&[(0, "Root", "Base", 0, 0), (1, "Array", "Array", 1, 0x4000), (2, "int", "size", 0, 0), (2, "UInt8", "data", 0, 0)]);
	source.nodes[2].byte_size = 4;
	source.nodes[3].ref_type_hash = 0xDEAD_BEEF_0000_0001;

	let parsed = FlatSchema::parse(&encode(&source, FlatFormat::WithRefHash), FlatFormat::WithRefHash).expect("parses with hash");
	assert_eq!(parsed, source);

	let compact = FlatSchema::parse(&encode(&source, FlatFormat::Compact), FlatFormat::Compact).expect("parses compact");
	assert_eq!(compact.nodes[2].byte_size, 4);
	assert_eq!(compact.nodes[3].ref_type_hash, 0);

	let root = build_from_flat_schema(&compact).expect("template builds");
	assert!(root.children[0].is_array);
	assert!(root.children[0].is_aligned);
}

#[test]
fn parse_rejects_negative_and_truncated_counts() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(&(-1_i32).to_le_bytes());
	bytes.extend_from_slice(&0_i32.to_le_bytes());
	assert!(matches!(
		FlatSchema::parse(&bytes, FlatFormat::Compact),
		Err(TreeError::NegativeCount { what: "node", count: -1 })
	));

	let mut bytes = Vec::new();
	bytes.extend_from_slice(&2_i32.to_le_bytes());
	bytes.extend_from_slice(&0_i32.to_le_bytes());
	bytes.extend_from_slice(&[0_u8; 30]);
	assert!(matches!(
		FlatSchema::parse(&bytes, FlatFormat::Compact),
		Err(TreeError::UnexpectedEof { at: 8, need: 48, rem: 30 })
	));
}
