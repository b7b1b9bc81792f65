use crate::tree::{Result, TreeError};

/// Resolves schema string references to text.
pub trait StringTable {
	/// Resolve one reference.
	fn resolve(&self, reference: u32) -> Result<&str>;
}

/// NUL-terminated string buffer addressed by byte offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuffer {
	bytes: Vec<u8>,
}

impl StringBuffer {
	/// Wrap raw buffer bytes.
	pub fn new(bytes: Vec<u8>) -> Self {
		Self { bytes }
	}

	/// Build a buffer by NUL-joining `items`, returning each item's offset.
	pub fn from_strings<'s>(items: impl IntoIterator<Item = &'s str>) -> (Self, Vec<u32>) {
		let mut bytes = Vec::new();
		let mut offsets = Vec::new();
		for item in items {
			offsets.push(bytes.len() as u32);
			bytes.extend_from_slice(item.as_bytes());
			bytes.push(0);
		}
		(Self { bytes }, offsets)
	}

	/// Raw buffer bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}
}

impl StringTable for StringBuffer {
	fn resolve(&self, reference: u32) -> Result<&str> {
		let start = reference as usize;
		let rem = self.bytes.get(start..).filter(|rem| !rem.is_empty()).ok_or(TreeError::StringOffsetOutOfRange {
			offset: reference,
			len: self.bytes.len(),
		})?;
		let end = rem
			.iter()
			.position(|byte| *byte == 0)
			.ok_or(TreeError::StringUnterminated { offset: reference })?;
		std::str::from_utf8(&rem[..end]).map_err(|_| TreeError::StringNotUtf8 { offset: reference })
	}
}

/// String table addressed by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct IndexedStrings {
	strings: Vec<Box<str>>,
}

impl IndexedStrings {
	/// Wrap an ordered string list.
	pub fn new(strings: Vec<Box<str>>) -> Self {
		Self { strings }
	}

	/// Number of strings.
	pub fn len(&self) -> usize {
		self.strings.len()
	}

	/// True when the table holds no strings.
	pub fn is_empty(&self) -> bool {
		self.strings.is_empty()
	}

	/// Index of the first string equal to `value`.
	pub fn position(&self, value: &str) -> Option<u32> {
		self.strings.iter().position(|item| item.as_ref() == value).map(|idx| idx as u32)
	}
}

impl<S: Into<Box<str>>> FromIterator<S> for IndexedStrings {
	fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
		Self {
			strings: iter.into_iter().map(Into::into).collect(),
		}
	}
}

impl StringTable for IndexedStrings {
	fn resolve(&self, reference: u32) -> Result<&str> {
		self.strings.get(reference as usize).map(|item| item.as_ref()).ok_or(TreeError::StringIndexOutOfRange {
			idx: reference,
			len: self.strings.len(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::{IndexedStrings, StringBuffer, StringTable};
	use crate::tree::TreeError;

	#[test]
	fn buffer_resolves_by_byte_offset() {
		let buffer = StringBuffer::new(b"Base\0m_Name\0string\0".to_vec());
		assert_eq!(buffer.resolve(0).expect("first"), "Base");
		assert_eq!(buffer.resolve(5).expect("second"), "m_Name");
		assert_eq!(buffer.resolve(7).expect("mid-string offset"), "Name");
		assert_eq!(buffer.resolve(12).expect("third"), "string");
	}

	#[test]
	fn buffer_rejects_bad_offsets() {
		let buffer = StringBuffer::new(b"abc\0def".to_vec());
		assert!(matches!(buffer.resolve(7), Err(TreeError::StringOffsetOutOfRange { offset: 7, len: 7 })));
		assert!(matches!(buffer.resolve(4), Err(TreeError::StringUnterminated { offset: 4 })));
		assert!(matches!(buffer.resolve(0x8000_0000), Err(TreeError::StringOffsetOutOfRange { .. })));
	}

	#[test]
	fn from_strings_reports_offsets() {
		let (buffer, offsets) = StringBuffer::from_strings(["Base", "", "m_Name"]);
		assert_eq!(offsets, vec![0, 5, 6]);
		assert_eq!(buffer.resolve(offsets[1]).expect("empty string"), "");
		assert_eq!(buffer.resolve(offsets[2]).expect("name"), "m_Name");
	}

	#[test]
	fn indexed_strings_resolve_by_index() {
		let table: IndexedStrings = ["GameObject", "m_Name"].into_iter().collect();
		assert_eq!(table.resolve(1).expect("index 1"), "m_Name");
		assert_eq!(table.position("GameObject"), Some(0));
		assert!(matches!(table.resolve(2), Err(TreeError::StringIndexOutOfRange { idx: 2, len: 2 })));
	}
}
