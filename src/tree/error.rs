use thiserror::Error;

use crate::tree::ValueKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors produced while building templates and decoding values.
#[derive(Debug, Error)]
pub enum TreeError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: u64,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Seek target lies past the end of the source.
	#[error("seek to {pos} out of range (len={len})")]
	SeekOutOfRange {
		/// Requested absolute position.
		pos: u64,
		/// Source length in bytes.
		len: u64,
	},
	/// Class type exposes neither an editor nor a release root node.
	#[error("no schema root variant available for class {class}")]
	MissingSchema {
		/// Resolved class name.
		class: String,
	},
	/// Template tree does not satisfy decoder structural rules.
	#[error("schema violation: {0}")]
	SchemaViolation(#[from] SchemaViolation),
	/// Length prefix decoded as a negative value.
	#[error("negative length {len} for field {field}")]
	NegativeLength {
		/// Field whose length prefix was read.
		field: String,
		/// Parsed signed length.
		len: i32,
	},
	/// Array element count exceeded configured limit.
	#[error("array {field} too large: count={count}, max={max}")]
	ArrayTooLarge {
		/// Array field whose count was read.
		field: String,
		/// Requested element count.
		count: usize,
		/// Maximum permitted element count.
		max: usize,
	},
	/// Flat schema contains no nodes.
	#[error("flat schema has no nodes")]
	EmptySchema,
	/// Count field in a schema blob was negative.
	#[error("negative {what} count {count}")]
	NegativeCount {
		/// Logical count being parsed.
		what: &'static str,
		/// Parsed signed count.
		count: i32,
	},
	/// String buffer offset is past the buffer end.
	#[error("string offset {offset} out of range (len={len})")]
	StringOffsetOutOfRange {
		/// Requested byte offset.
		offset: u32,
		/// Buffer length in bytes.
		len: usize,
	},
	/// String at offset has no NUL terminator before the buffer end.
	#[error("unterminated string at offset {offset}")]
	StringUnterminated {
		/// Requested byte offset.
		offset: u32,
	},
	/// String bytes at offset are not valid UTF-8.
	#[error("string at offset {offset} is not valid utf-8")]
	StringNotUtf8 {
		/// Requested byte offset.
		offset: u32,
	},
	/// String table index is out of range.
	#[error("string index {idx} out of range (len={len})")]
	StringIndexOutOfRange {
		/// Requested index.
		idx: u32,
		/// Number of strings in the table.
		len: usize,
	},
	/// Requested class was not found in the class database.
	#[error("class not found: {name}")]
	ClassNotFound {
		/// Requested class name or id.
		name: String,
	},
	/// JSON parse or render failure.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Command-line arguments were inconsistent.
	#[error("invalid arguments: {reason}")]
	InvalidArgs {
		/// Human-readable description.
		reason: String,
	},
}

/// Structural template errors detected before any bytes are read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
	/// Array node does not have exactly a size child and an element child.
	#[error("array {field} expected 2 children, found {found}")]
	ArrayArity {
		/// Array field name.
		field: String,
		/// Actual child count.
		found: usize,
	},
	/// Array size child is not an integer kind.
	#[error("array {field} expected integer size field, found {found}")]
	ArraySizeKind {
		/// Array field name.
		field: String,
		/// Actual size-field kind.
		found: ValueKind,
	},
	/// Fixed-width value node carries child schemas.
	#[error("value-typed field {field} carries {count} children")]
	ValueWithChildren {
		/// Value field name.
		field: String,
		/// Child count.
		count: usize,
	},
	/// Kind cannot be read as a standalone scalar.
	#[error("field {field} has kind {kind} which is not a readable scalar")]
	UnsupportedScalar {
		/// Field name.
		field: String,
		/// Offending kind.
		kind: ValueKind,
	},
}
