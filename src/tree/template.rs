use crate::tree::{SchemaViolation, ValueKind};

/// Raw type-flag value marking an array node.
pub(crate) const ARRAY_TYPE_FLAG: u8 = 1;
/// Raw meta-flag bit requesting post-field 4-byte alignment.
pub(crate) const ALIGN_META_FLAG: u32 = 0x4000;

/// Immutable schema node describing one field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TemplateField {
	/// Field name.
	pub name: Box<str>,
	/// Field type name.
	pub type_name: Box<str>,
	/// Kind derived from `type_name`; [`ValueKind::None`] for composites.
	pub value_kind: ValueKind,
	/// Array node with a size child and an element child.
	pub is_array: bool,
	/// Cursor is 4-byte aligned after this field.
	pub is_aligned: bool,
	/// Child schemas in declared order.
	pub children: Vec<TemplateField>,
}

impl TemplateField {
	/// Build a node from resolved strings and raw flags.
	pub fn from_raw(name: &str, type_name: &str, type_flags: u8, meta_flags: u32, children: Vec<TemplateField>) -> Self {
		Self {
			name: name.into(),
			type_name: type_name.into(),
			value_kind: ValueKind::from_type_name(type_name),
			is_array: type_flags == ARRAY_TYPE_FLAG,
			is_aligned: meta_flags & ALIGN_META_FLAG != 0,
			children,
		}
	}

	/// True when the node decodes to a value of its own.
	pub fn has_value(&self) -> bool {
		self.value_kind != ValueKind::None
	}

	/// First child with the given name.
	pub fn child(&self, name: &str) -> Option<&TemplateField> {
		self.children.iter().find(|item| item.name.as_ref() == name)
	}

	/// Number of nodes in this subtree, including `self`.
	pub fn node_count(&self) -> usize {
		1 + self.children.iter().map(TemplateField::node_count).sum::<usize>()
	}

	/// Check decoder structural rules for this node only.
	pub(crate) fn check_shape(&self) -> Result<(), SchemaViolation> {
		if self.is_array {
			if self.children.len() != 2 {
				return Err(SchemaViolation::ArrayArity {
					field: self.name.to_string(),
					found: self.children.len(),
				});
			}
			let size_kind = self.children[0].value_kind;
			if !size_kind.is_integer() {
				return Err(SchemaViolation::ArraySizeKind {
					field: self.name.to_string(),
					found: size_kind,
				});
			}
			return Ok(());
		}

		match self.value_kind {
			ValueKind::None | ValueKind::String => Ok(()),
			ValueKind::Array | ValueKind::ByteArray => Err(SchemaViolation::UnsupportedScalar {
				field: self.name.to_string(),
				kind: self.value_kind,
			}),
			_ if !self.children.is_empty() => Err(SchemaViolation::ValueWithChildren {
				field: self.name.to_string(),
				count: self.children.len(),
			}),
			_ => Ok(()),
		}
	}

	/// Report the first structural violation anywhere in this subtree.
	pub fn validate(&self) -> Result<(), SchemaViolation> {
		self.check_shape()?;
		// String nodes keep their inner char array for inspection only.
		if !self.is_array && self.value_kind == ValueKind::String {
			return Ok(());
		}
		self.children.iter().try_for_each(TemplateField::validate)
	}
}

#[cfg(test)]
mod tests {
	use super::TemplateField;
	use crate::tree::{SchemaViolation, ValueKind};

	fn leaf(name: &str, type_name: &str) -> TemplateField {
		TemplateField::from_raw(name, type_name, 0, 0, Vec::new())
	}

	#[test]
	fn derives_flags_exactly() {
		let field = TemplateField::from_raw("Array", "Array", 1, 0x4000, vec![leaf("size", "int"), leaf("data", "float")]);
		assert!(field.is_array);
		assert!(field.is_aligned);
		assert_eq!(field.value_kind, ValueKind::Array);
		assert!(field.has_value());

		let bitmask_like = TemplateField::from_raw("x", "int", 3, 0x4001, Vec::new());
		assert!(!bitmask_like.is_array, "only type flag 1 marks an array");
		assert!(bitmask_like.is_aligned);

		let unaligned = TemplateField::from_raw("x", "Vector3f", 0, 0x0001, Vec::new());
		assert!(!unaligned.is_aligned);
		assert!(!unaligned.has_value());
	}

	#[test]
	fn validate_reports_nested_violation() {
		let bad_array = TemplateField::from_raw("Array", "Array", 1, 0, vec![leaf("size", "float"), leaf("data", "int")]);
		let vector = TemplateField::from_raw("m_List", "vector", 0, 0, vec![bad_array]);
		let root = TemplateField::from_raw("Base", "Thing", 0, 0, vec![leaf("m_Id", "int"), vector]);

		let err = root.validate().expect_err("bad size kind");
		assert_eq!(
			err,
			SchemaViolation::ArraySizeKind {
				field: "Array".to_owned(),
				found: ValueKind::Float,
			}
		);
		assert_eq!(root.node_count(), 6);
		assert!(root.child("m_List").is_some());
		assert!(root.child("missing").is_none());
	}

	#[test]
	fn validate_skips_string_inner_array() {
		let inner = TemplateField::from_raw("Array", "Array", 1, 0x4000, vec![leaf("size", "int"), leaf("data", "char")]);
		let string = TemplateField::from_raw("m_Name", "string", 0, 0x8000, vec![inner]);
		string.validate().expect("string with inner array is valid");

		let bad = TemplateField::from_raw("m_Value", "int", 0, 0, vec![leaf("x", "int")]);
		assert!(matches!(bad.validate(), Err(SchemaViolation::ValueWithChildren { count: 1, .. })));
	}
}
