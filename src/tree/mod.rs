mod bytes;
mod classdb;
mod decode;
mod error;
mod flat;
mod kind;
mod strings;
mod template;
mod value;

/// Byte source abstraction and its slice/stream implementations.
pub use bytes::{ByteSource, Cursor, StreamReader};
/// External class database schema source and its template adapter.
pub use classdb::{ClassDatabase, ClassNode, ClassType, build_from_external_schema};
/// Schema-driven decoding entry points and options.
pub use decode::{DecodeOptions, decode, decode_at, decode_at_with, decode_with};
/// Error and result aliases.
pub use error::{Result, SchemaViolation, TreeError};
/// Flat leveled node list schema source and its template adapter.
pub use flat::{FlatFormat, FlatNode, FlatSchema, build_from_flat_schema};
/// Value kind taxonomy.
pub use kind::ValueKind;
/// String table resolvers.
pub use strings::{IndexedStrings, StringBuffer, StringTable};
/// Immutable schema node type.
pub use template::TemplateField;
/// Decoded value tree types.
pub use value::{Scalar, ValueField};
