use anyhow::{bail, Result};
use crate::class_constants::type_annotation;
use crate::{ClassRead, DecodeError};
use crate::tree::annotation::{Annotation, ElementValue, ElementValuePair};
use crate::tree::pool::ConstantPool;
use crate::tree::type_annotation::{LocalVariableTarget, TargetInfo, TypeAnnotation, TypePath, TypePathKind};

/// Reads the `num_annotations` and `annotations` items of the `Runtime[In]VisibleAnnotations` attributes.
pub(super) fn read_annotations(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<Vec<Annotation>> {
	reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| read_annotation(r, pool)
	)
}

/// Reads the body of the `Runtime[In]VisibleParameterAnnotations` attributes, note that the number of parameters is an `u8`.
pub(super) fn read_parameter_annotations(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<Vec<Vec<Annotation>>> {
	reader.read_vec(
		|r| r.read_u8_as_usize(),
		|r| read_annotations(r, pool)
	)
}

pub(super) fn read_type_annotations(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<Vec<TypeAnnotation>> {
	reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| read_type_annotation(r, pool)
	)
}

fn read_annotation(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<Annotation> {
	Ok(Annotation {
		type_name: pool.reference(reader.read_u16()?)?,
		element_value_pairs: reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| Ok(ElementValuePair {
				name: pool.reference(r.read_u16()?)?,
				value: read_element_value(r, pool)?,
			})
		)?,
	})
}

pub(super) fn read_element_value(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<ElementValue> {
	Ok(match reader.read_u8()? {
		b'B' => ElementValue::Byte(pool.reference(reader.read_u16()?)?),
		b'C' => ElementValue::Char(pool.reference(reader.read_u16()?)?),
		b'D' => ElementValue::Double(pool.reference(reader.read_u16()?)?),
		b'F' => ElementValue::Float(pool.reference(reader.read_u16()?)?),
		b'I' => ElementValue::Int(pool.reference(reader.read_u16()?)?),
		b'J' => ElementValue::Long(pool.reference(reader.read_u16()?)?),
		b'S' => ElementValue::Short(pool.reference(reader.read_u16()?)?),
		b'Z' => ElementValue::Boolean(pool.reference(reader.read_u16()?)?),
		b's' => ElementValue::String(pool.reference(reader.read_u16()?)?),
		b'e' => ElementValue::Enum {
			type_name: pool.reference(reader.read_u16()?)?,
			const_name: pool.reference(reader.read_u16()?)?,
		},
		b'c' => ElementValue::Class(pool.reference(reader.read_u16()?)?),
		b'@' => ElementValue::Annotation(read_annotation(reader, pool)?),
		b'[' => ElementValue::Array(reader.read_vec(
			|r| r.read_u16_as_usize(),
			|r| read_element_value(r, pool)
		)?),
		tag => bail!(DecodeError::UnknownElementValueTag { tag: tag as char }),
	})
}

fn read_type_annotation(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<TypeAnnotation> {
	let target_type = reader.read_u8()?;
	let target_info = read_target_info(reader, target_type)?;
	let type_path = read_type_path(reader)?;
	let annotation = read_annotation(reader, pool)?;
	Ok(TypeAnnotation { target_type, target_info, type_path, annotation })
}

fn read_target_info(reader: &mut impl ClassRead, target_type: u8) -> Result<TargetInfo> {
	Ok(match target_type {
		type_annotation::CLASS_TYPE_PARAMETER | type_annotation::METHOD_TYPE_PARAMETER => {
			TargetInfo::TypeParameter { index: reader.read_u8()? }
		},
		type_annotation::CLASS_EXTENDS => TargetInfo::SuperType { index: reader.read_u16()? },
		type_annotation::CLASS_TYPE_PARAMETER_BOUND | type_annotation::METHOD_TYPE_PARAMETER_BOUND => {
			let type_parameter_index = reader.read_u8()?;
			let bound_index = reader.read_u8()?;
			TargetInfo::TypeParameterBound { type_parameter_index, bound_index }
		},
		type_annotation::FIELD | type_annotation::METHOD_RETURN | type_annotation::METHOD_RECEIVER => TargetInfo::Empty,
		type_annotation::METHOD_FORMAL_PARAMETER => TargetInfo::FormalParameter { index: reader.read_u8()? },
		type_annotation::THROWS => TargetInfo::Throws { index: reader.read_u8()? },
		type_annotation::LOCAL_VARIABLE | type_annotation::RESOURCE_VARIABLE => {
			let table = reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(LocalVariableTarget {
					start_pc: r.read_u16()?,
					length: r.read_u16()?,
					index: r.read_u16()?,
				})
			)?;
			TargetInfo::LocalVariable { table }
		},
		type_annotation::EXCEPTION_PARAMETER => TargetInfo::Catch { exception_table_index: reader.read_u16()? },
		type_annotation::INSTANCE_OF | type_annotation::NEW |
		type_annotation::CONSTRUCTOR_REFERENCE | type_annotation::METHOD_REFERENCE => {
			TargetInfo::Offset { offset: reader.read_u16()? }
		},
		type_annotation::CAST | type_annotation::CONSTRUCTOR_INVOCATION_TYPE_ARGUMENT |
		type_annotation::METHOD_INVOCATION_TYPE_ARGUMENT | type_annotation::CONSTRUCTOR_REFERENCE_TYPE_ARGUMENT |
		type_annotation::METHOD_REFERENCE_TYPE_ARGUMENT => {
			let offset = reader.read_u16()?;
			let type_argument_index = reader.read_u8()?;
			TargetInfo::TypeArgument { offset, type_argument_index }
		},
		target_type => bail!(DecodeError::UnknownTargetType { target_type }),
	})
}

fn read_type_path(reader: &mut impl ClassRead) -> Result<TypePath> {
	let path = reader.read_vec(
		|r| r.read_u8_as_usize(),
		|r| {
			let kind = r.read_u8()?;
			let type_argument_index = r.read_u8()?;
			Ok(match (kind, type_argument_index) {
				(0, 0) => TypePathKind::ArrayDeeper,
				(1, 0) => TypePathKind::NestedDeeper,
				(2, 0) => TypePathKind::WildcardBound,
				(3, index) => TypePathKind::TypeArgument { index },
				(kind, type_argument_index) => bail!(DecodeError::InvalidTypePath { kind, type_argument_index }),
			})
		}
	)?;
	Ok(TypePath { path })
}

#[cfg(test)]
mod testing {
	use java_string::JavaString;
	use pretty_assertions::assert_eq;
	use crate::DecodeError;
	use crate::class_reader::annotation::{read_element_value, read_type_annotations};
	use crate::tree::annotation::{Annotation, ElementValue, ElementValuePair};
	use crate::tree::pool::{Constant, ConstantPool, PoolRef};
	use crate::tree::type_annotation::{LocalVariableTarget, TargetInfo, TypePath, TypePathKind};

	fn pool() -> ConstantPool {
		ConstantPool::new(vec![
			None,
			Some(Constant::Utf8(JavaString::from("LAnno;"))),
			Some(Constant::Utf8(JavaString::from("value"))),
			Some(Constant::Integer(1)),
			Some(Constant::Integer(2)),
			Some(Constant::Double(0.5)),
			None,
			Some(Constant::Utf8(JavaString::from("Ljava/lang/annotation/RetentionPolicy;"))),
			Some(Constant::Utf8(JavaString::from("RUNTIME"))),
		])
	}

	fn read(bytes: &[u8]) -> anyhow::Result<ElementValue> {
		let mut reader = bytes;
		let value = read_element_value(&mut reader, &pool())?;
		assert!(reader.is_empty(), "not all bytes read: {reader:?}");
		Ok(value)
	}

	fn err(result: anyhow::Result<impl std::fmt::Debug>) -> Option<DecodeError> {
		result.unwrap_err().downcast_ref::<DecodeError>().cloned()
	}

	#[test]
	fn array_of_ints() -> anyhow::Result<()> {
		let value = read(&[b'[', 0x00, 0x02, b'I', 0x00, 0x03, b'I', 0x00, 0x04])?;
		assert_eq!(value, ElementValue::Array(vec![
			ElementValue::Int(PoolRef::new(3)),
			ElementValue::Int(PoolRef::new(4)),
		]));
		Ok(())
	}

	#[test]
	fn empty_array() -> anyhow::Result<()> {
		assert_eq!(read(&[b'[', 0x00, 0x00])?, ElementValue::Array(Vec::new()));
		Ok(())
	}

	#[test]
	fn primitives_share_integer_constants() -> anyhow::Result<()> {
		assert_eq!(read(&[b'Z', 0x00, 0x03])?, ElementValue::Boolean(PoolRef::new(3)));
		assert_eq!(read(&[b'C', 0x00, 0x04])?, ElementValue::Char(PoolRef::new(4)));
		assert_eq!(read(&[b'D', 0x00, 0x05])?, ElementValue::Double(PoolRef::new(5)));
		assert_eq!(read(&[b'D', 0x00, 0x05])?.tag(), b'D');
		Ok(())
	}

	#[test]
	fn enum_and_nested_annotation() -> anyhow::Result<()> {
		assert_eq!(read(&[b'e', 0x00, 0x07, 0x00, 0x08])?, ElementValue::Enum {
			type_name: PoolRef::new(7),
			const_name: PoolRef::new(8),
		});

		let value = read(&[
			b'@', 0x00, 0x01, 0x00, 0x01,
				0x00, 0x02, b'[', 0x00, 0x01,
					b'@', 0x00, 0x01, 0x00, 0x00,
		])?;
		assert_eq!(value, ElementValue::Annotation(Annotation {
			type_name: PoolRef::new(1),
			element_value_pairs: vec![
				ElementValuePair {
					name: PoolRef::new(2),
					value: ElementValue::Array(vec![
						ElementValue::Annotation(Annotation { type_name: PoolRef::new(1), element_value_pairs: Vec::new() }),
					]),
				},
			],
		}));
		Ok(())
	}

	#[test]
	fn wrong_constant_kind() {
		assert_eq!(
			err(read(&[b'J', 0x00, 0x03])),
			Some(DecodeError::PoolKindMismatch { index: 3, expected: "Long", got: "Integer" })
		);
		assert_eq!(
			err(read(&[b's', 0x00, 0x03])),
			Some(DecodeError::PoolKindMismatch { index: 3, expected: "Utf8", got: "Integer" })
		);
	}

	#[test]
	fn unknown_tag() {
		assert_eq!(err(read(&[b'X', 0x00, 0x03])), Some(DecodeError::UnknownElementValueTag { tag: 'X' }));
		assert_eq!(err(read(&[b'[', 0x00, 0x01, b'q'])), Some(DecodeError::UnknownElementValueTag { tag: 'q' }));
	}

	#[test]
	fn nested_arrays_claiming_too_many_elements() {
		let bytes: Vec<u8> = [b'[', 0xff, 0xff].repeat(200);
		assert_eq!(err(read(&bytes)), Some(DecodeError::Truncated { wanted: 1 }));
	}

	fn read_type(bytes: &[u8]) -> anyhow::Result<(u8, TargetInfo, TypePath)> {
		let mut reader = bytes;
		let mut annotations = read_type_annotations(&mut reader, &pool())?;
		assert!(reader.is_empty(), "not all bytes read: {reader:?}");
		assert_eq!(annotations.len(), 1);
		let annotation = annotations.remove(0);
		assert_eq!(annotation.annotation, Annotation { type_name: PoolRef::new(1), element_value_pairs: Vec::new() });
		Ok((annotation.target_type, annotation.target_info, annotation.type_path))
	}

	#[test]
	fn type_annotation_targets() -> anyhow::Result<()> {
		let (target_type, target_info, type_path) = read_type(&[0x00, 0x01, 0x11, 0x02, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00])?;
		assert_eq!(target_type, 0x11);
		assert_eq!(target_info, TargetInfo::TypeParameterBound { type_parameter_index: 2, bound_index: 1 });
		assert_eq!(type_path, TypePath::default());

		let (_, target_info, _) = read_type(&[0x00, 0x01, 0x10, 0xff, 0xff, 0x00, 0x00, 0x01, 0x00, 0x00])?;
		assert_eq!(target_info, TargetInfo::SuperType { index: 0xffff });

		let (_, target_info, _) = read_type(&[0x00, 0x01, 0x14, 0x00, 0x00, 0x01, 0x00, 0x00])?;
		assert_eq!(target_info, TargetInfo::Empty);

		let (_, target_info, _) = read_type(&[0x00, 0x01, 0x17, 0x03, 0x00, 0x00, 0x01, 0x00, 0x00])?;
		assert_eq!(target_info, TargetInfo::Throws { index: 3 });

		let (_, target_info, _) = read_type(&[
			0x00, 0x01, 0x40,
			0x00, 0x02, 0x00, 0x00, 0x00, 0x10, 0x00, 0x01, 0x00, 0x20, 0x00, 0x04, 0x00, 0x01,
			0x00, 0x00, 0x01, 0x00, 0x00,
		])?;
		assert_eq!(target_info, TargetInfo::LocalVariable { table: vec![
			LocalVariableTarget { start_pc: 0, length: 16, index: 1 },
			LocalVariableTarget { start_pc: 32, length: 4, index: 1 },
		] });

		let (_, target_info, _) = read_type(&[0x00, 0x01, 0x42, 0x00, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00])?;
		assert_eq!(target_info, TargetInfo::Catch { exception_table_index: 1 });

		let (_, target_info, _) = read_type(&[0x00, 0x01, 0x44, 0x00, 0x07, 0x00, 0x00, 0x01, 0x00, 0x00])?;
		assert_eq!(target_info, TargetInfo::Offset { offset: 7 });

		let (_, target_info, _) = read_type(&[0x00, 0x01, 0x4b, 0x00, 0x07, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00])?;
		assert_eq!(target_info, TargetInfo::TypeArgument { offset: 7, type_argument_index: 1 });
		Ok(())
	}

	#[test]
	fn type_path() -> anyhow::Result<()> {
		let (_, _, type_path) = read_type(&[
			0x00, 0x01, 0x13,
			0x04, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x02,
			0x00, 0x01, 0x00, 0x00,
		])?;
		assert_eq!(type_path.path, vec![
			TypePathKind::ArrayDeeper,
			TypePathKind::NestedDeeper,
			TypePathKind::WildcardBound,
			TypePathKind::TypeArgument { index: 2 },
		]);
		Ok(())
	}

	#[test]
	fn bad_type_annotations() {
		assert_eq!(
			err(read_type(&[0x00, 0x01, 0x18, 0x00])),
			Some(DecodeError::UnknownTargetType { target_type: 0x18 })
		);
		assert_eq!(
			err(read_type(&[0x00, 0x01, 0x13, 0x01, 0x04, 0x00, 0x00, 0x01, 0x00, 0x00])),
			Some(DecodeError::InvalidTypePath { kind: 4, type_argument_index: 0 })
		);
		assert_eq!(
			err(read_type(&[0x00, 0x01, 0x13, 0x01, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00])),
			Some(DecodeError::InvalidTypePath { kind: 0, type_argument_index: 1 })
		);
	}
}
