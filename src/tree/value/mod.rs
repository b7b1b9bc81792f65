use crate::tree::TemplateField;

/// Decoded payload of one value field.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	/// One-byte boolean.
	Bool(bool),
	/// Signed 8-bit integer.
	I8(i8),
	/// Unsigned 8-bit integer.
	U8(u8),
	/// Signed 16-bit integer.
	I16(i16),
	/// Unsigned 16-bit integer.
	U16(u16),
	/// Signed 32-bit integer.
	I32(i32),
	/// Unsigned 32-bit integer.
	U32(u32),
	/// Signed 64-bit integer.
	I64(i64),
	/// Unsigned 64-bit integer.
	U64(u64),
	/// 32-bit float.
	F32(f32),
	/// 64-bit float.
	F64(f64),
	/// Raw encoded string bytes.
	String(Vec<u8>),
	/// Opaque byte-array blob.
	Bytes(Vec<u8>),
	/// Element count of a generic array.
	ArraySize(u32),
}

impl Scalar {
	/// Widen any integer scalar to `i64`.
	pub fn as_i64(&self) -> Option<i64> {
		match *self {
			Self::I8(v) => Some(i64::from(v)),
			Self::U8(v) => Some(i64::from(v)),
			Self::I16(v) => Some(i64::from(v)),
			Self::U16(v) => Some(i64::from(v)),
			Self::I32(v) => Some(i64::from(v)),
			Self::U32(v) => Some(i64::from(v)),
			Self::I64(v) => Some(v),
			Self::U64(v) => i64::try_from(v).ok(),
			_ => None,
		}
	}

	/// Widen any non-negative integer scalar to `u64`.
	pub fn as_u64(&self) -> Option<u64> {
		match *self {
			Self::U8(v) => Some(u64::from(v)),
			Self::U16(v) => Some(u64::from(v)),
			Self::U32(v) => Some(u64::from(v)),
			Self::U64(v) => Some(v),
			_ => self.as_i64().and_then(|v| u64::try_from(v).ok()),
		}
	}

	/// Numeric value as `f64`.
	pub fn as_f64(&self) -> Option<f64> {
		match *self {
			Self::F32(v) => Some(f64::from(v)),
			Self::F64(v) => Some(v),
			Self::U64(v) => Some(v as f64),
			_ => self.as_i64().map(|v| v as f64),
		}
	}
}

/// Decoded instance of a template field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueField<'t> {
	/// Template node that produced this value.
	pub template: &'t TemplateField,
	/// Decoded payload, absent for composites.
	pub scalar: Option<Scalar>,
	/// Decoded children: array elements or composite fields.
	pub children: Vec<ValueField<'t>>,
}

impl<'t> ValueField<'t> {
	/// Field name from the template.
	pub fn name(&self) -> &'t str {
		let template: &'t TemplateField = self.template;
		&template.name
	}

	/// Type name from the template.
	pub fn type_name(&self) -> &'t str {
		let template: &'t TemplateField = self.template;
		&template.type_name
	}

	/// First child with the given field name.
	pub fn get(&self, name: &str) -> Option<&ValueField<'t>> {
		self.children.iter().find(|item| item.name() == name)
	}

	/// Follow a chain of child names.
	pub fn get_path(&self, path: &[&str]) -> Option<&ValueField<'t>> {
		path.iter().try_fold(self, |item, name| item.get(name))
	}

	/// Boolean payload.
	pub fn as_bool(&self) -> Option<bool> {
		match self.scalar {
			Some(Scalar::Bool(v)) => Some(v),
			_ => None,
		}
	}

	/// Integer payload widened to `i64`.
	pub fn as_i64(&self) -> Option<i64> {
		self.scalar.as_ref().and_then(Scalar::as_i64)
	}

	/// Non-negative integer payload widened to `u64`.
	pub fn as_u64(&self) -> Option<u64> {
		self.scalar.as_ref().and_then(Scalar::as_u64)
	}

	/// Numeric payload as `f64`.
	pub fn as_f64(&self) -> Option<f64> {
		self.scalar.as_ref().and_then(Scalar::as_f64)
	}

	/// String payload, when it is valid UTF-8.
	pub fn as_str(&self) -> Option<&str> {
		match &self.scalar {
			Some(Scalar::String(raw)) => std::str::from_utf8(raw).ok(),
			_ => None,
		}
	}

	/// Raw string or byte-array payload.
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match &self.scalar {
			Some(Scalar::String(raw) | Scalar::Bytes(raw)) => Some(raw),
			_ => None,
		}
	}

	/// Element count of an array node.
	pub fn array_size(&self) -> Option<usize> {
		match &self.scalar {
			Some(Scalar::ArraySize(size)) => Some(*size as usize),
			Some(Scalar::Bytes(raw)) => Some(raw.len()),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests;
