use crate::tree::{Scalar, TemplateField, ValueField};

#[test]
fn integer_accessors_widen_and_reject_other_kinds() {
	assert_eq!(Scalar::I8(-3).as_i64(), Some(-3));
	assert_eq!(Scalar::U32(7).as_u64(), Some(7));
	assert_eq!(Scalar::I16(-1).as_u64(), None);
	assert_eq!(Scalar::U64(u64::MAX).as_i64(), None);
	assert_eq!(Scalar::U64(u64::MAX).as_u64(), Some(u64::MAX));
	assert_eq!(Scalar::F32(0.5).as_f64(), Some(0.5));
	assert_eq!(Scalar::I32(2).as_f64(), Some(2.0));
	assert_eq!(Scalar::Bool(true).as_i64(), None);
	assert_eq!(Scalar::ArraySize(3).as_i64(), None);
}

#[test]
fn lookup_by_name_and_path() {
	let x = TemplateField::from_raw("x", "float", 0, 0, Vec::new());
	let position = TemplateField::from_raw("m_LocalPosition", "Vector3f", 0, 0, vec![x.clone()]);
	let name = TemplateField::from_raw("m_Name", "string", 0, 0, Vec::new());
	let root = TemplateField::from_raw("Base", "Transform", 0, 0, vec![position.clone(), name.clone()]);

	let value = ValueField {
		template: &root,
		scalar: None,
		children: vec![
			ValueField {
				template: &position,
				scalar: None,
				children: vec![ValueField {
					template: &x,
					scalar: Some(Scalar::F32(1.25)),
					children: Vec::new(),
				}],
			},
			ValueField {
				template: &name,
				scalar: Some(Scalar::String(b"Cube".to_vec())),
				children: Vec::new(),
			},
		],
	};

	assert_eq!(value.name(), "Base");
	assert_eq!(value.type_name(), "Transform");
	assert_eq!(value.get("m_Name").and_then(ValueField::as_str), Some("Cube"));
	assert_eq!(value.get("m_Name").and_then(ValueField::as_bytes), Some(&b"Cube"[..]));
	assert_eq!(value.get_path(&["m_LocalPosition", "x"]).and_then(ValueField::as_f64), Some(1.25));
	assert!(value.get_path(&["m_LocalPosition", "y"]).is_none());
	assert!(value.get_path(&[]).is_some_and(|item| item.name() == "Base"));
	assert_eq!(value.as_i64(), None);
}

#[test]
fn array_size_reports_both_array_shapes() {
	let template = TemplateField::from_raw("Array", "Array", 1, 0, Vec::new());
	let generic = ValueField {
		template: &template,
		scalar: Some(Scalar::ArraySize(4)),
		children: Vec::new(),
	};
	let blob = ValueField {
		template: &template,
		scalar: Some(Scalar::Bytes(vec![1, 2, 3])),
		children: Vec::new(),
	};
	assert_eq!(generic.array_size(), Some(4));
	assert_eq!(blob.array_size(), Some(3));
	assert_eq!(blob.as_str(), None);
}
