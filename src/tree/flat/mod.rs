use log::debug;

use crate::tree::bytes::Cursor;
use crate::tree::{ByteSource, Result, StringBuffer, StringTable, TemplateField, TreeError};

/// One node of a flat, depth-leveled type tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlatNode {
	/// Node format version.
	pub version: u16,
	/// Nesting depth; the root is the first node.
	pub level: u8,
	/// Raw type flags; exactly `1` marks an array.
	pub type_flags: u8,
	/// String reference for the type name.
	pub type_ref: u32,
	/// String reference for the field name.
	pub name_ref: u32,
	/// Declared byte size, `-1` when variable.
	pub byte_size: i32,
	/// Declared node index.
	pub index: u32,
	/// Raw meta flags; bit `0x4000` requests alignment.
	pub meta_flags: u32,
	/// Referenced type hash, zero when absent from the layout.
	pub ref_type_hash: u64,
}

/// Binary node record layout of a serialized flat schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlatFormat {
	/// 24-byte records.
	#[default]
	Compact,
	/// 32-byte records with a trailing `ref_type_hash`.
	WithRefHash,
}

impl FlatFormat {
	/// Encoded record size in bytes.
	pub fn node_size(self) -> usize {
		match self {
			Self::Compact => 24,
			Self::WithRefHash => 32,
		}
	}
}

/// Flat leveled node list plus the string table its references point into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSchema<S = StringBuffer> {
	/// Nodes in depth-first order.
	pub nodes: Vec<FlatNode>,
	/// Resolver for `name_ref`/`type_ref`.
	pub strings: S,
}

impl FlatSchema<StringBuffer> {
	/// Parse a serialized node list followed by its string buffer.
	pub fn parse(bytes: &[u8], format: FlatFormat) -> Result<Self> {
		let mut cursor = Cursor::new(bytes);

		let node_count = read_count(&mut cursor, "node")?;
		let buffer_len = read_count(&mut cursor, "string buffer")?;

		let need = node_count.saturating_mul(format.node_size());
		if need > cursor.remaining() {
			return Err(TreeError::UnexpectedEof {
				at: cursor.position(),
				need,
				rem: cursor.remaining(),
			});
		}

		let mut nodes = Vec::with_capacity(node_count);
		for _ in 0..node_count {
			nodes.push(read_node(&mut cursor, format)?);
		}

		let strings = StringBuffer::new(cursor.read_exact(buffer_len)?.to_vec());
		Ok(Self { nodes, strings })
	}
}

fn read_count(cursor: &mut Cursor<'_>, what: &'static str) -> Result<usize> {
	let count = cursor.read_i32()?;
	usize::try_from(count).map_err(|_| TreeError::NegativeCount { what, count })
}

fn read_node(cursor: &mut Cursor<'_>, format: FlatFormat) -> Result<FlatNode> {
	let mut node = FlatNode {
		version: cursor.read_u16()?,
		level: cursor.read_u8()?,
		type_flags: cursor.read_u8()?,
		type_ref: cursor.read_u32()?,
		name_ref: cursor.read_u32()?,
		byte_size: cursor.read_i32()?,
		index: cursor.read_u32()?,
		meta_flags: cursor.read_u32()?,
		ref_type_hash: 0,
	};
	if format == FlatFormat::WithRefHash {
		node.ref_type_hash = cursor.read_u64()?;
	}
	Ok(node)
}

/// Rebuild a template tree from a flat leveled node list.
///
/// The first node is the root. Nodes following the root's subtree are ignored.
pub fn build_from_flat_schema<S: StringTable>(source: &FlatSchema<S>) -> Result<TemplateField> {
	if source.nodes.is_empty() {
		return Err(TreeError::EmptySchema);
	}

	let mut ctx = LevelCursor {
		nodes: &source.nodes,
		at: 0,
	};
	let root = build_subtree(&mut ctx, &source.strings)?;

	let trailing = source.nodes.len() - ctx.at - 1;
	if trailing > 0 {
		debug!("flat schema: ignoring {trailing} nodes after root subtree {}", root.name);
	}
	debug!("built template {} ({}) from {} flat nodes", root.name, root.type_name, ctx.at + 1);

	Ok(root)
}

/// Shared forward cursor; `at` always names the last consumed node.
struct LevelCursor<'n> {
	nodes: &'n [FlatNode],
	at: usize,
}

fn build_subtree<S: StringTable>(ctx: &mut LevelCursor<'_>, strings: &S) -> Result<TemplateField> {
	let node = ctx.nodes[ctx.at];
	let name = strings.resolve(node.name_ref)?;
	let type_name = strings.resolve(node.type_ref)?;

	let mut children = Vec::new();
	while let Some(next) = ctx.nodes.get(ctx.at + 1) {
		if next.level <= node.level {
			break;
		}
		ctx.at += 1;
		children.push(build_subtree(ctx, strings)?);
	}

	Ok(TemplateField::from_raw(name, type_name, node.type_flags, node.meta_flags, children))
}

#[cfg(test)]
mod tests;
