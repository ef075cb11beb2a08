use anyhow::Result;
use bytes::BufMut;
use java_string::JavaStr;
use pretty_assertions::assert_eq;
use class_file::DecodeError;
use class_file::tree::annotation::ElementValue;
use class_file::tree::attribute::{Attribute, LineNumber};
use class_file::tree::pool::Constant;
use class_file::tree::version::Version;

mod common;

use common::{assemble, attribute, minimal_class, Pool, EMPTY_BODY};

fn decode_error(result: Result<impl std::fmt::Debug>) -> DecodeError {
	let err = result.unwrap_err();
	err.downcast_ref::<DecodeError>()
		.unwrap_or_else(|| panic!("no DecodeError in {err:?}"))
		.clone()
}

#[test]
fn minimal() -> Result<()> {
	let class = class_file::parse(&minimal_class(52))?;

	assert_eq!(class.version, Version::V1_8);
	assert_eq!(class.name()?.as_java_str(), JavaStr::from_str("Test"));
	assert_eq!(class.super_class, None);
	assert_eq!(class.super_class_name()?, None);
	assert!(class.access.is_public);
	assert!(class.access.is_super);
	assert!(class.interfaces.is_empty());
	assert!(class.fields.is_empty());
	assert!(class.methods.is_empty());
	assert!(class.attributes.is_empty());
	assert_eq!(class.constant_pool.len(), 3);
	Ok(())
}

#[test]
fn bad_magic() {
	let mut bytes = minimal_class(52);
	bytes[..4].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
	assert_eq!(decode_error(class_file::parse(&bytes)), DecodeError::BadMagic { got: 0xDEADBEEF });
}

#[test]
fn versions() -> Result<()> {
	for major in 45..=52 {
		assert_eq!(class_file::parse(&minimal_class(major))?.version.major(), major);
	}
	assert_eq!(decode_error(class_file::parse(&minimal_class(44))), DecodeError::UnsupportedVersion { major: 44, minor: 0 });
	assert_eq!(decode_error(class_file::parse(&minimal_class(53))), DecodeError::UnsupportedVersion { major: 53, minor: 0 });
	Ok(())
}

#[test]
fn every_truncation_fails() {
	let bytes = minimal_class(52);
	for end in 0..bytes.len() {
		let err = decode_error(class_file::parse(&bytes[..end]));
		assert!(matches!(err, DecodeError::Truncated { .. }), "cut at {end}: {err:?}");
	}
}

#[test]
fn decoding_is_deterministic() -> Result<()> {
	let bytes = minimal_class(52);
	assert_eq!(class_file::parse(&bytes)?, class_file::parse(&bytes)?);
	Ok(())
}

#[test]
fn decoding_nan_constants_is_deterministic() -> Result<()> {
	let mut pool = Pool::new();
	let float = pool.float(f32::NAN);
	let double = pool.double(f64::NAN);
	let this_class = pool.class("java/lang/Float");
	let bytes = assemble(52, &pool, 0x0031, this_class, 0, &EMPTY_BODY);

	let class = class_file::parse(&bytes)?;
	assert!(matches!(class.constant_pool.entry(float)?, Constant::Float(value) if value.is_nan()));
	assert!(matches!(class.constant_pool.entry(double)?, Constant::Double(value) if value.is_nan()));
	assert_eq!(class, class_file::parse(&bytes)?);
	Ok(())
}

#[test]
fn trailing_bytes() -> Result<()> {
	let mut bytes = minimal_class(52);
	bytes.extend_from_slice(&[0xAA, 0xBB]);

	// ignored by parse, but left in the reader by read_class
	assert_eq!(class_file::parse(&bytes)?.name()?.as_java_str(), JavaStr::from_str("Test"));

	let mut reader = &bytes[..];
	let class = class_file::read_class(&mut reader)?;
	assert_eq!(class.name()?.as_java_str(), JavaStr::from_str("Test"));
	assert_eq!(reader, &[0xAA, 0xBB]);
	Ok(())
}

#[test]
fn this_class_must_be_a_class() {
	let mut pool = Pool::new();
	let name = pool.utf8("Test");
	let bytes = assemble(52, &pool, 0, name, 0, &EMPTY_BODY);

	assert_eq!(
		decode_error(class_file::parse(&bytes)),
		DecodeError::PoolKindMismatch { index: 1, expected: "Class", got: "Utf8" }
	);
}

#[test]
fn long_takes_two_slots() -> Result<()> {
	let mut pool = Pool::new();
	let long = pool.long(1 << 40);
	let this_class = pool.class("Test");
	assert_eq!((long, this_class), (1, 4));

	let class = class_file::parse(&assemble(52, &pool, 0, this_class, 0, &EMPTY_BODY))?;
	assert_eq!(class.constant_pool.len(), 5);
	assert_eq!(class.constant_pool.entry(1)?, &Constant::Long(1 << 40));
	assert_eq!(decode_error(class.constant_pool.entry(2)), DecodeError::PoolIndexEmpty { index: 2 });

	// the upper half of the long can't be used as this_class
	let bytes = assemble(52, &pool, 0, 2, 0, &EMPTY_BODY);
	assert_eq!(decode_error(class_file::parse(&bytes)), DecodeError::PoolIndexEmpty { index: 2 });
	Ok(())
}

#[test]
fn unknown_attribute() {
	let mut pool = Pool::new();
	let this_class = pool.class("Test");
	let name = pool.utf8("Unknown");

	let mut body = Vec::new();
	body.put_u16(0); // interfaces
	body.put_u16(0); // fields
	body.put_u16(0); // methods
	body.put_u16(1);
	attribute(&mut body, name, &[]);

	assert_eq!(
		decode_error(class_file::parse(&assemble(52, &pool, 0, this_class, 0, &body))),
		DecodeError::UnknownAttribute { name: "Unknown".into() }
	);
}

#[test]
fn method_with_code_and_line_numbers() -> Result<()> {
	let mut pool = Pool::new();
	let this_class = pool.class("Test");
	let method_name = pool.utf8("run");
	let method_descriptor = pool.utf8("()V");
	let code_name = pool.utf8("Code");
	let line_number_table_name = pool.utf8("LineNumberTable");

	let mut line_number_table = Vec::new();
	line_number_table.put_u16(2);
	line_number_table.put_slice(&[0x00, 0x00, 0x00, 0x01]);
	line_number_table.put_slice(&[0x00, 0x04, 0x00, 0x02]);

	let mut code = Vec::new();
	code.put_u16(1); // max_stack
	code.put_u16(1); // max_locals
	code.put_u32(5);
	code.put_slice(&[0x2a, 0xb7, 0x00, 0x01, 0xb1]);
	code.put_u16(0); // exception table
	code.put_u16(1);
	attribute(&mut code, line_number_table_name, &line_number_table);

	let mut body = Vec::new();
	body.put_u16(0); // interfaces
	body.put_u16(0); // fields
	body.put_u16(1);
	body.put_u16(0x0001);
	body.put_u16(method_name);
	body.put_u16(method_descriptor);
	body.put_u16(1);
	attribute(&mut body, code_name, &code);
	body.put_u16(0); // class attributes

	let class = class_file::parse(&assemble(52, &pool, 0, this_class, 0, &body))?;
	assert_eq!(class.methods.len(), 1);
	let method = &class.methods[0];
	assert!(method.access.is_public);
	assert_eq!(method.name.get(&class.constant_pool)?.as_java_str(), JavaStr::from_str("run"));

	let [Attribute::Code(code)] = &method.attributes[..] else {
		panic!("expected just a code attribute, got {:?}", method.attributes);
	};
	assert_eq!(code.max_stack, 1);
	assert_eq!(code.code, vec![0x2a, 0xb7, 0x00, 0x01, 0xb1]);
	assert_eq!(code.attributes, vec![
		Attribute::LineNumberTable(vec![
			LineNumber { start_pc: 0, line_number: 1 },
			LineNumber { start_pc: 4, line_number: 2 },
		]),
	]);
	Ok(())
}

#[test]
fn full_class() -> Result<()> {
	let mut pool = Pool::new();
	let this_class = pool.class("pkg/Full");
	let super_class = pool.class("java/lang/Object");
	let interface = pool.class("java/lang/Runnable");
	let field_name = pool.utf8("VALUE");
	let field_descriptor = pool.utf8("I");
	let constant_value_name = pool.utf8("ConstantValue");
	let forty_two = pool.integer(42);
	let method_name = pool.utf8("run");
	let method_descriptor = pool.utf8("()V");
	let annotations_name = pool.utf8("RuntimeVisibleAnnotations");
	let annotation_type = pool.utf8("Lpkg/Anno;");
	let element_name = pool.utf8("kind");
	let enum_type = pool.utf8("Lpkg/Kind;");
	let enum_const = pool.utf8("FAST");
	let deprecated_name = pool.utf8("Deprecated");
	let source_file_name = pool.utf8("SourceFile");
	let source_file = pool.utf8("Full.java");

	let mut annotations = Vec::new();
	annotations.put_u16(1);
	annotations.put_u16(annotation_type);
	annotations.put_u16(1);
	annotations.put_u16(element_name);
	annotations.put_u8(b'e');
	annotations.put_u16(enum_type);
	annotations.put_u16(enum_const);

	let mut body = Vec::new();
	body.put_u16(1);
	body.put_u16(interface);

	body.put_u16(1);
	body.put_u16(0x0019); // public static final
	body.put_u16(field_name);
	body.put_u16(field_descriptor);
	body.put_u16(1);
	attribute(&mut body, constant_value_name, &forty_two.to_be_bytes());

	body.put_u16(1);
	body.put_u16(0x0401); // public abstract
	body.put_u16(method_name);
	body.put_u16(method_descriptor);
	body.put_u16(2);
	attribute(&mut body, annotations_name, &annotations);
	attribute(&mut body, deprecated_name, &[]);

	body.put_u16(1);
	attribute(&mut body, source_file_name, &source_file.to_be_bytes());

	let class = class_file::parse(&assemble(51, &pool, 0x0421, this_class, super_class, &body))?;
	let pool = &class.constant_pool;

	assert_eq!(class.version, Version::V1_7);
	assert!(class.access.is_abstract);
	assert_eq!(class.name()?.as_java_str(), JavaStr::from_str("pkg/Full"));
	assert_eq!(class.super_class_name()?.map(|name| name.as_java_str()), Some(JavaStr::from_str("java/lang/Object")));
	let interfaces: Vec<_> = class.interface_names()?.into_iter().map(|name| name.as_java_str()).collect();
	assert_eq!(interfaces, vec![JavaStr::from_str("java/lang/Runnable")]);

	let field = &class.fields[0];
	assert!(field.access.is_public && field.access.is_static && field.access.is_final);
	assert_eq!(field.descriptor.get(pool)?.as_java_str(), JavaStr::from_str("I"));
	let [Attribute::ConstantValue(value)] = &field.attributes[..] else {
		panic!("expected a constant value, got {:?}", field.attributes);
	};
	assert_eq!(value.get(pool)?, &Constant::Integer(42));

	let method = &class.methods[0];
	assert!(method.access.is_abstract);
	let [Attribute::RuntimeVisibleAnnotations(annotations), Attribute::Deprecated] = &method.attributes[..] else {
		panic!("expected annotations and deprecated, got {:?}", method.attributes);
	};
	assert_eq!(annotations.len(), 1);
	let annotation = &annotations[0];
	assert_eq!(annotation.type_name.get(pool)?.as_java_str(), JavaStr::from_str("Lpkg/Anno;"));
	let pair = &annotation.element_value_pairs[0];
	assert_eq!(pair.name.get(pool)?.as_java_str(), JavaStr::from_str("kind"));
	let ElementValue::Enum { type_name, const_name } = &pair.value else {
		panic!("expected an enum value, got {:?}", pair.value);
	};
	assert_eq!(type_name.get(pool)?.as_java_str(), JavaStr::from_str("Lpkg/Kind;"));
	assert_eq!(const_name.get(pool)?.as_java_str(), JavaStr::from_str("FAST"));

	let [Attribute::SourceFile(source_file)] = &class.attributes[..] else {
		panic!("expected a source file, got {:?}", class.attributes);
	};
	assert_eq!(source_file.get(pool)?.as_java_str(), JavaStr::from_str("Full.java"));
	assert_eq!(class.attributes[0].name(), "SourceFile");
	Ok(())
}
