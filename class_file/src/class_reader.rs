use anyhow::{anyhow, bail, Context, Result};
use java_string::JavaString;
use log::{debug, trace};
use crate::class_constants::{self, attribute};
use crate::{ClassRead, DecodeError};
use crate::class_reader::pool::PoolContext;
use crate::tree::attribute::{Attribute, BootstrapMethod, Code, EnclosingMethod, Exception, InnerClass, LineNumber, LocalVariable, LocalVariableType, MethodParameter};
use crate::tree::class::ClassFile;
use crate::tree::field::Field;
use crate::tree::method::Method;
use crate::tree::pool::{ClassInfo, Constant, ConstantPool, MethodHandle, NameAndType, PoolRef};
use crate::tree::version::Version;

pub(crate) mod pool;
mod frame;
mod annotation;

pub(crate) fn read(reader: &mut impl ClassRead) -> Result<ClassFile> {
	let magic = reader.read_u32()?;
	if magic != class_constants::MAGIC {
		bail!(DecodeError::BadMagic { got: magic });
	}

	let minor = reader.read_u16()?;
	let major = reader.read_u16()?;
	let version = Version::new(major, minor);

	if !version.is_supported() {
		bail!(DecodeError::UnsupportedVersion { major, minor });
	}

	let constant_pool = pool::read(reader)
		.context("while reading the constant pool")?;

	let access = reader.read_u16()?.into();
	let this_class = constant_pool.reference::<ClassInfo>(reader.read_u16()?)
		.context("while reading `this_class`")?;
	let super_class = constant_pool.get_optional(reader.read_u16()?, ConstantPool::reference::<ClassInfo>)
		.context("while reading `super_class`")?;
	let interfaces = reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| constant_pool.reference::<ClassInfo>(r.read_u16()?)
	).context("while reading the interfaces")?;

	let class_name = this_class.get(&constant_pool)?.name.get(&constant_pool)?;

	let fields = reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| read_field(r, &constant_pool)
	).with_context(|| anyhow!("failed to read field of class {class_name}"))?;
	let methods = reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| read_method(r, &constant_pool)
	).with_context(|| anyhow!("failed to read method of class {class_name}"))?;
	let attributes = read_attributes(reader, &constant_pool)
		.with_context(|| anyhow!("failed to read attributes of class {class_name}"))?;

	debug!("read class {class_name} of version {}.{}: {} pool slots, {} fields, {} methods, {} attributes",
		version.major(), version.minor(), constant_pool.len(), fields.len(), methods.len(), attributes.len());

	Ok(ClassFile {
		version,
		constant_pool,
		access,
		this_class,
		super_class,
		interfaces,
		fields,
		methods,
		attributes,
	})
}

fn read_field(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<Field> {
	let access = reader.read_u16()?.into();
	let name = pool.reference::<JavaString>(reader.read_u16()?)?;
	let descriptor = pool.reference::<JavaString>(reader.read_u16()?)?;

	let attributes = read_attributes(reader, pool)
		.with_context(|| anyhow!("while reading attributes of field {}", display(pool, name)))?;

	Ok(Field { access, name, descriptor, attributes })
}

fn read_method(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<Method> {
	let access = reader.read_u16()?.into();
	let name = pool.reference::<JavaString>(reader.read_u16()?)?;
	let descriptor = pool.reference::<JavaString>(reader.read_u16()?)?;

	let attributes = read_attributes(reader, pool)
		.with_context(|| anyhow!("while reading attributes of method {}{}", display(pool, name), display(pool, descriptor)))?;

	Ok(Method { access, name, descriptor, attributes })
}

/// Renders a checked utf8 reference for error messages.
fn display(pool: &ConstantPool, string: PoolRef<JavaString>) -> String {
	string.get(pool)
		.map(|string| string.to_string())
		.unwrap_or_else(|_| format!("{string:?}"))
}

/// Reads the `attributes_count` and `attributes` items of classes, fields, methods and the `Code` attribute.
fn read_attributes(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<Vec<Attribute>> {
	reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| read_attribute(r, pool)
	)
}

fn read_attribute(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<Attribute> {
	let name = pool.get::<JavaString>(reader.read_u16()?)
		.context("while reading an attribute name")?;
	let length = reader.read_u32_as_usize()?;
	trace!("attribute `{name}` with length {length}");

	read_attribute_body(reader, pool, name, length)
		.with_context(|| anyhow!("while reading attribute `{name}`"))
}

fn read_attribute_body(reader: &mut impl ClassRead, pool: &ConstantPool, name: &JavaString, length: usize) -> Result<Attribute> {
	Ok(match name.as_java_str() {
		name if name == attribute::CONSTANT_VALUE => Attribute::ConstantValue(read_constant_value(reader, pool)?),
		name if name == attribute::CODE => Attribute::Code(read_code(reader, pool)?),
		name if name == attribute::STACK_MAP_TABLE => {
			let frames = reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| frame::read_stack_map_frame(r, pool)
			)?;
			Attribute::StackMapTable(frames)
		},
		name if name == attribute::EXCEPTIONS => {
			let exceptions = reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| pool.reference::<ClassInfo>(r.read_u16()?)
			)?;
			Attribute::Exceptions(exceptions)
		},
		name if name == attribute::SOURCE_FILE => Attribute::SourceFile(pool.reference(reader.read_u16()?)?),
		name if name == attribute::LINE_NUMBER_TABLE => {
			let line_numbers = reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(LineNumber {
					start_pc: r.read_u16()?,
					line_number: r.read_u16()?,
				})
			)?;
			Attribute::LineNumberTable(line_numbers)
		},
		name if name == attribute::LOCAL_VARIABLE_TABLE => {
			let local_variables = reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(LocalVariable {
					start_pc: r.read_u16()?,
					length: r.read_u16()?,
					name: pool.reference(r.read_u16()?)?,
					descriptor: pool.reference(r.read_u16()?)?,
					index: r.read_u16()?,
				})
			)?;
			Attribute::LocalVariableTable(local_variables)
		},
		name if name == attribute::LOCAL_VARIABLE_TYPE_TABLE => {
			let local_variable_types = reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(LocalVariableType {
					start_pc: r.read_u16()?,
					length: r.read_u16()?,
					name: pool.reference(r.read_u16()?)?,
					signature: pool.reference(r.read_u16()?)?,
					index: r.read_u16()?,
				})
			)?;
			Attribute::LocalVariableTypeTable(local_variable_types)
		},
		name if name == attribute::INNER_CLASSES => {
			let inner_classes = reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(InnerClass {
					inner_class: pool.reference(r.read_u16()?)?,
					outer_class: pool.get_optional(r.read_u16()?, ConstantPool::reference::<ClassInfo>)?,
					inner_name: pool.get_optional(r.read_u16()?, ConstantPool::reference::<JavaString>)?,
					access: r.read_u16()?.into(),
				})
			)?;
			Attribute::InnerClasses(inner_classes)
		},
		name if name == attribute::ENCLOSING_METHOD => Attribute::EnclosingMethod(EnclosingMethod {
			class: pool.reference(reader.read_u16()?)?,
			method: pool.get_optional(reader.read_u16()?, ConstantPool::reference::<NameAndType>)?,
		}),
		name if name == attribute::SIGNATURE => Attribute::Signature(pool.reference(reader.read_u16()?)?),
		name if name == attribute::SOURCE_DEBUG_EXTENSION => Attribute::SourceDebugExtension(reader.read_u8_vec(length)?),
		name if name == attribute::SYNTHETIC => Attribute::Synthetic,
		name if name == attribute::DEPRECATED => Attribute::Deprecated,
		name if name == attribute::RUNTIME_VISIBLE_ANNOTATIONS => {
			Attribute::RuntimeVisibleAnnotations(annotation::read_annotations(reader, pool)?)
		},
		name if name == attribute::RUNTIME_INVISIBLE_ANNOTATIONS => {
			Attribute::RuntimeInvisibleAnnotations(annotation::read_annotations(reader, pool)?)
		},
		name if name == attribute::RUNTIME_VISIBLE_PARAMETER_ANNOTATIONS => {
			Attribute::RuntimeVisibleParameterAnnotations(annotation::read_parameter_annotations(reader, pool)?)
		},
		name if name == attribute::RUNTIME_INVISIBLE_PARAMETER_ANNOTATIONS => {
			Attribute::RuntimeInvisibleParameterAnnotations(annotation::read_parameter_annotations(reader, pool)?)
		},
		name if name == attribute::RUNTIME_VISIBLE_TYPE_ANNOTATIONS => {
			Attribute::RuntimeVisibleTypeAnnotations(annotation::read_type_annotations(reader, pool)?)
		},
		name if name == attribute::RUNTIME_INVISIBLE_TYPE_ANNOTATIONS => {
			Attribute::RuntimeInvisibleTypeAnnotations(annotation::read_type_annotations(reader, pool)?)
		},
		name if name == attribute::ANNOTATION_DEFAULT => Attribute::AnnotationDefault(annotation::read_element_value(reader, pool)?),
		name if name == attribute::BOOTSTRAP_METHODS => {
			let bootstrap_methods = reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| Ok(BootstrapMethod {
					method_ref: pool.reference::<MethodHandle>(r.read_u16()?)?,
					arguments: r.read_vec(
						|r| r.read_u16_as_usize(),
						|r| pool.reference::<Constant>(r.read_u16()?)
					)?,
				})
			)?;
			Attribute::BootstrapMethods(bootstrap_methods)
		},
		name if name == attribute::METHOD_PARAMETERS => {
			let method_parameters = reader.read_vec(
				|r| r.read_u8_as_usize(),
				|r| Ok(MethodParameter {
					name: pool.get_optional(r.read_u16()?, ConstantPool::reference::<JavaString>)?,
					access: r.read_u16()?.into(),
				})
			)?;
			Attribute::MethodParameters(method_parameters)
		},
		_ => bail!(DecodeError::UnknownAttribute { name: name.clone() }),
	})
}

fn read_constant_value(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<PoolRef<Constant>> {
	let index = reader.read_u16()?;
	let constant = pool.entry(index)?;
	match constant {
		Constant::Integer(_) | Constant::Float(_) | Constant::Long(_) | Constant::Double(_) | Constant::String(_) => {
			Ok(PoolRef::new(index))
		},
		_ => Err(anyhow::Error::new(DecodeError::PoolKindMismatch {
			index,
			expected: "Integer, Float, Long, Double or String",
			got: constant.kind_name(),
		})).pool_context(index),
	}
}

fn read_code(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<Code> {
	let max_stack = reader.read_u16()?;
	let max_locals = reader.read_u16()?;

	let code_length = reader.read_u32_as_usize()?;
	let code = reader.read_u8_vec(code_length)?;

	let exception_table = reader.read_vec(
		|r| r.read_u16_as_usize(),
		|r| Ok(Exception {
			start_pc: r.read_u16()?,
			end_pc: r.read_u16()?,
			handler_pc: r.read_u16()?,
			catch_type: pool.get_optional(r.read_u16()?, ConstantPool::reference::<ClassInfo>)?,
		})
	)?;

	let attributes = read_attributes(reader, pool)?;

	Ok(Code { max_stack, max_locals, code, exception_table, attributes })
}
