use std::fmt;

/// Closed taxonomy of value kinds a template field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ValueKind {
	/// Composite node without a value of its own.
	None,
	/// Signed 8-bit integer.
	Int8,
	/// Unsigned 8-bit integer.
	UInt8,
	/// Signed 16-bit integer.
	Int16,
	/// Unsigned 16-bit integer.
	UInt16,
	/// Signed 32-bit integer.
	Int32,
	/// Unsigned 32-bit integer.
	UInt32,
	/// Signed 64-bit integer.
	Int64,
	/// Unsigned 64-bit integer.
	UInt64,
	/// One-byte boolean.
	Bool,
	/// 32-bit IEEE float.
	Float,
	/// 64-bit IEEE float.
	Double,
	/// Length-prefixed byte string.
	String,
	/// Length-prefixed opaque byte blob.
	ByteArray,
	/// Generic length-prefixed array marker.
	Array,
}

impl ValueKind {
	/// Map a schema type name to its kind. Unknown names map to [`ValueKind::None`].
	pub fn from_type_name(type_name: &str) -> Self {
		match type_name {
			"string" => Self::String,
			"SInt8" | "sbyte" => Self::Int8,
			"UInt8" | "char" | "byte" => Self::UInt8,
			"SInt16" | "short" => Self::Int16,
			"UInt16" | "unsigned short" | "ushort" => Self::UInt16,
			"SInt32" | "int" | "Type*" => Self::Int32,
			"UInt32" | "unsigned int" | "uint" => Self::UInt32,
			"SInt64" | "long" => Self::Int64,
			"UInt64" | "FileSize" | "unsigned long long" | "ulong" => Self::UInt64,
			"float" => Self::Float,
			"double" => Self::Double,
			"bool" => Self::Bool,
			"Array" => Self::Array,
			"TypelessData" => Self::ByteArray,
			_ => Self::None,
		}
	}

	/// True for the eight fixed-width integer kinds.
	pub fn is_integer(self) -> bool {
		matches!(
			self,
			Self::Int8 | Self::UInt8 | Self::Int16 | Self::UInt16 | Self::Int32 | Self::UInt32 | Self::Int64 | Self::UInt64
		)
	}

	/// Encoded width of fixed-width scalar kinds.
	pub fn byte_width(self) -> Option<usize> {
		match self {
			Self::Int8 | Self::UInt8 | Self::Bool => Some(1),
			Self::Int16 | Self::UInt16 => Some(2),
			Self::Int32 | Self::UInt32 | Self::Float => Some(4),
			Self::Int64 | Self::UInt64 | Self::Double => Some(8),
			Self::None | Self::String | Self::ByteArray | Self::Array => None,
		}
	}

	/// Stable label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Int8 => "int8",
			Self::UInt8 => "uint8",
			Self::Int16 => "int16",
			Self::UInt16 => "uint16",
			Self::Int32 => "int32",
			Self::UInt32 => "uint32",
			Self::Int64 => "int64",
			Self::UInt64 => "uint64",
			Self::Bool => "bool",
			Self::Float => "float",
			Self::Double => "double",
			Self::String => "string",
			Self::ByteArray => "bytearray",
			Self::Array => "array",
		}
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
