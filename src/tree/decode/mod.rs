use log::{debug, trace};

use crate::tree::{ByteSource, Result, Scalar, SchemaViolation, TemplateField, TreeError, ValueField, ValueKind};

/// Upper bound on element vector preallocation, independent of declared counts.
const PREALLOC_ELEMS: usize = 4096;

/// Runtime limits for schema-driven decoding.
///
/// Byte-array and string lengths are never capped: their payload is read in
/// one bounded call and fails on truncation.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
	/// Maximum accepted element count for per-element arrays. `None` means unlimited.
	pub max_array_len: Option<usize>,
}

/// Decode one value tree at the reader's current position.
pub fn decode<'t, R: ByteSource + ?Sized>(template: &'t TemplateField, reader: &mut R) -> Result<ValueField<'t>> {
	decode_with(template, reader, &DecodeOptions::default())
}

/// Seek to `position`, then decode one value tree.
pub fn decode_at<'t, R: ByteSource + ?Sized>(template: &'t TemplateField, reader: &mut R, position: u64) -> Result<ValueField<'t>> {
	decode_at_with(template, reader, position, &DecodeOptions::default())
}

/// Decode one value tree with explicit options.
pub fn decode_with<'t, R: ByteSource + ?Sized>(template: &'t TemplateField, reader: &mut R, opt: &DecodeOptions) -> Result<ValueField<'t>> {
	debug!("decode {} ({}) at {}", template.name, template.type_name, reader.position());
	decode_field(template, reader, opt)
}

/// Seek to `position`, then decode with explicit options.
pub fn decode_at_with<'t, R: ByteSource + ?Sized>(
	template: &'t TemplateField,
	reader: &mut R,
	position: u64,
	opt: &DecodeOptions,
) -> Result<ValueField<'t>> {
	reader.set_position(position)?;
	decode_with(template, reader, opt)
}

fn decode_field<'t, R: ByteSource + ?Sized>(template: &'t TemplateField, reader: &mut R, opt: &DecodeOptions) -> Result<ValueField<'t>> {
	template.check_shape()?;

	if template.is_array {
		return decode_array(template, reader, opt);
	}

	match template.value_kind {
		ValueKind::None => decode_composite(template, reader, opt),
		ValueKind::String => decode_string(template, reader),
		_ => decode_leaf(template, reader),
	}
}

fn decode_array<'t, R: ByteSource + ?Sized>(template: &'t TemplateField, reader: &mut R, opt: &DecodeOptions) -> Result<ValueField<'t>> {
	let count = read_length(template, reader)?;

	let value = if template.value_kind == ValueKind::ByteArray {
		let data = reader.read_bytes(count)?;
		ValueField {
			template,
			scalar: Some(Scalar::Bytes(data)),
			children: Vec::new(),
		}
	} else {
		if let Some(max) = opt.max_array_len.filter(|&max| count > max) {
			return Err(TreeError::ArrayTooLarge {
				field: template.name.to_string(),
				count,
				max,
			});
		}
		let element = &template.children[1];
		let mut children = Vec::with_capacity(count.min(PREALLOC_ELEMS));
		for _ in 0..count {
			children.push(decode_field(element, reader, opt)?);
		}
		ValueField {
			template,
			scalar: Some(Scalar::ArraySize(count as u32)),
			children,
		}
	};

	if template.is_aligned {
		reader.align4()?;
	}
	Ok(value)
}

fn decode_composite<'t, R: ByteSource + ?Sized>(template: &'t TemplateField, reader: &mut R, opt: &DecodeOptions) -> Result<ValueField<'t>> {
	let children = template
		.children
		.iter()
		.map(|child| decode_field(child, reader, opt))
		.collect::<Result<Vec<_>>>()?;

	if template.is_aligned {
		reader.align4()?;
	}
	Ok(ValueField {
		template,
		scalar: None,
		children,
	})
}

fn decode_string<'t, R: ByteSource + ?Sized>(template: &'t TemplateField, reader: &mut R) -> Result<ValueField<'t>> {
	let len = read_length(template, reader)?;
	let raw = reader.read_bytes(len)?;
	// Strings always realign, whatever the node's own flag says.
	reader.align4()?;
	Ok(ValueField {
		template,
		scalar: Some(Scalar::String(raw)),
		children: Vec::new(),
	})
}

fn decode_leaf<'t, R: ByteSource + ?Sized>(template: &'t TemplateField, reader: &mut R) -> Result<ValueField<'t>> {
	let scalar = match template.value_kind {
		ValueKind::Int8 => Scalar::I8(reader.read_i8()?),
		ValueKind::UInt8 => Scalar::U8(reader.read_u8()?),
		ValueKind::Bool => Scalar::Bool(reader.read_u8()? != 0),
		ValueKind::Int16 => Scalar::I16(reader.read_i16()?),
		ValueKind::UInt16 => Scalar::U16(reader.read_u16()?),
		ValueKind::Int32 => Scalar::I32(reader.read_i32()?),
		ValueKind::UInt32 => Scalar::U32(reader.read_u32()?),
		ValueKind::Int64 => Scalar::I64(reader.read_i64()?),
		ValueKind::UInt64 => Scalar::U64(reader.read_u64()?),
		ValueKind::Float => Scalar::F32(reader.read_f32()?),
		ValueKind::Double => Scalar::F64(reader.read_f64()?),
		ValueKind::None | ValueKind::String | ValueKind::ByteArray | ValueKind::Array => {
			return Err(SchemaViolation::UnsupportedScalar {
				field: template.name.to_string(),
				kind: template.value_kind,
			}
			.into());
		}
	};

	if template.is_aligned {
		reader.align4()?;
	}
	Ok(ValueField {
		template,
		scalar: Some(scalar),
		children: Vec::new(),
	})
}

fn read_length<R: ByteSource + ?Sized>(template: &TemplateField, reader: &mut R) -> Result<usize> {
	let at = reader.position();
	let len = reader.read_i32()?;
	let count = usize::try_from(len).map_err(|_| TreeError::NegativeLength {
		field: template.name.to_string(),
		len,
	})?;
	trace!("{} length {count} at {at}", template.name);
	Ok(count)
}
