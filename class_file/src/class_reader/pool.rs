use anyhow::{anyhow, bail, Context, Result};
use java_string::JavaString;
use log::trace;
use crate::class_constants::pool;
use crate::{ClassRead, DecodeError, jstring};
use crate::tree::pool::{slot, ClassInfo, Constant, ConstantPool, InvokeDynamic, MemberRef, MethodHandle, MethodType, NameAndType, PoolKind, PoolRef, ReferenceKind, StringInfo};

/// A constant pool entry like it's stored in the class file, with the indices into the constant pool not yet checked.
#[derive(Debug, Clone, PartialEq)]
enum PoolEntry {
	Utf8 { string: JavaString },
	Integer { bytes: i32 },
	Float { bytes: f32 },
	Long { bytes: i64 },
	Double { bytes: f64 },
	Class { name_index: u16 },
	String { string_index: u16 },
	FieldRef { class_index: u16, name_and_type_index: u16 },
	MethodRef { class_index: u16, name_and_type_index: u16 },
	InterfaceMethodRef { class_index: u16, name_and_type_index: u16 },
	NameAndType { name_index: u16, descriptor_index: u16 },
	MethodHandle { reference_kind: ReferenceKind, reference_index: u16 },
	MethodType { descriptor_index: u16 },
	InvokeDynamic { bootstrap_method_attribute_index: u16, name_and_type_index: u16 },
}

impl PoolEntry {
	fn tag(&self) -> u8 {
		match self {
			PoolEntry::Utf8 { .. } => pool::UTF8,
			PoolEntry::Integer { .. } => pool::INTEGER,
			PoolEntry::Float { .. } => pool::FLOAT,
			PoolEntry::Long { .. } => pool::LONG,
			PoolEntry::Double { .. } => pool::DOUBLE,
			PoolEntry::Class { .. } => pool::CLASS,
			PoolEntry::String { .. } => pool::STRING,
			PoolEntry::FieldRef { .. } => pool::FIELD_REF,
			PoolEntry::MethodRef { .. } => pool::METHOD_REF,
			PoolEntry::InterfaceMethodRef { .. } => pool::INTERFACE_METHOD_REF,
			PoolEntry::NameAndType { .. } => pool::NAME_AND_TYPE,
			PoolEntry::MethodHandle { .. } => pool::METHOD_HANDLE,
			PoolEntry::MethodType { .. } => pool::METHOD_TYPE,
			PoolEntry::InvokeDynamic { .. } => pool::INVOKE_DYNAMIC,
		}
	}

	/// Reads one entry, `index` is only used for error messages.
	fn read(reader: &mut impl ClassRead, index: usize) -> Result<PoolEntry> {
		Ok(match reader.read_u8()? {
			pool::UTF8 => {
				let length = reader.read_u16_as_usize()?;
				let vec = reader.read_u8_vec(length)?;
				let string = jstring::decode_modified_utf8(&vec)?;
				PoolEntry::Utf8 { string }
			},
			pool::INTEGER => PoolEntry::Integer { bytes: reader.read_i32()? },
			pool::FLOAT => PoolEntry::Float { bytes: reader.read_f32()? },
			pool::LONG => PoolEntry::Long { bytes: reader.read_i64()? },
			pool::DOUBLE => PoolEntry::Double { bytes: reader.read_f64()? },
			pool::CLASS => PoolEntry::Class { name_index: reader.read_u16()? },
			pool::STRING => PoolEntry::String { string_index: reader.read_u16()? },
			pool::FIELD_REF => PoolEntry::FieldRef {
				class_index: reader.read_u16()?,
				name_and_type_index: reader.read_u16()?,
			},
			pool::METHOD_REF => PoolEntry::MethodRef {
				class_index: reader.read_u16()?,
				name_and_type_index: reader.read_u16()?,
			},
			pool::INTERFACE_METHOD_REF => PoolEntry::InterfaceMethodRef {
				class_index: reader.read_u16()?,
				name_and_type_index: reader.read_u16()?,
			},
			pool::NAME_AND_TYPE => PoolEntry::NameAndType {
				name_index: reader.read_u16()?,
				descriptor_index: reader.read_u16()?,
			},
			pool::METHOD_HANDLE => PoolEntry::MethodHandle {
				reference_kind: ReferenceKind::try_from(reader.read_u8()?)?,
				reference_index: reader.read_u16()?,
			},
			pool::METHOD_TYPE => PoolEntry::MethodType { descriptor_index: reader.read_u16()? },
			pool::INVOKE_DYNAMIC => PoolEntry::InvokeDynamic {
				bootstrap_method_attribute_index: reader.read_u16()?,
				name_and_type_index: reader.read_u16()?,
			},
			tag => bail!(DecodeError::UnknownConstantTag { tag, index }),
		})
	}

	/// Turns the indices of this entry into [`PoolRef`]s, checking them against the tags of all entries.
	fn resolve(self, tags: &[Option<u8>]) -> Result<Constant> {
		Ok(match self {
			PoolEntry::Utf8 { string } => Constant::Utf8(string),
			PoolEntry::Integer { bytes } => Constant::Integer(bytes),
			PoolEntry::Float { bytes } => Constant::Float(bytes),
			PoolEntry::Long { bytes } => Constant::Long(bytes),
			PoolEntry::Double { bytes } => Constant::Double(bytes),
			PoolEntry::Class { name_index } => Constant::Class(ClassInfo {
				name: reference(tags, name_index)?,
			}),
			PoolEntry::String { string_index } => Constant::String(StringInfo {
				string: reference(tags, string_index)?,
			}),
			PoolEntry::FieldRef { class_index, name_and_type_index } => {
				Constant::FieldRef(member_ref(tags, class_index, name_and_type_index)?)
			},
			PoolEntry::MethodRef { class_index, name_and_type_index } => {
				Constant::MethodRef(member_ref(tags, class_index, name_and_type_index)?)
			},
			PoolEntry::InterfaceMethodRef { class_index, name_and_type_index } => {
				Constant::InterfaceMethodRef(member_ref(tags, class_index, name_and_type_index)?)
			},
			PoolEntry::NameAndType { name_index, descriptor_index } => Constant::NameAndType(NameAndType {
				name: reference(tags, name_index)?,
				descriptor: reference(tags, descriptor_index)?,
			}),
			PoolEntry::MethodHandle { reference_kind, reference_index } => {
				let &tag = slot(tags, reference_index).pool_context(reference_index)?;
				if !reference_kind.accepts(tag) {
					return Err(anyhow::Error::new(DecodeError::PoolKindMismatch {
						index: reference_index,
						expected: reference_kind.expected(),
						got: pool::name(tag),
					})).with_context(|| anyhow!("while checking the reference of a {reference_kind:?} method handle"));
				}
				Constant::MethodHandle(MethodHandle { reference_kind, reference: PoolRef::new(reference_index) })
			},
			PoolEntry::MethodType { descriptor_index } => Constant::MethodType(MethodType {
				descriptor: reference(tags, descriptor_index)?,
			}),
			PoolEntry::InvokeDynamic { bootstrap_method_attribute_index, name_and_type_index } => Constant::InvokeDynamic(InvokeDynamic {
				bootstrap_method_attr_index: bootstrap_method_attribute_index,
				name_and_type: reference(tags, name_and_type_index)?,
			}),
		})
	}
}

fn reference<T: PoolKind>(tags: &[Option<u8>], index: u16) -> Result<PoolRef<T>> {
	let &tag = slot(tags, index).pool_context(index)?;
	PoolRef::checked(index, tag).pool_context(index)
}

fn member_ref(tags: &[Option<u8>], class_index: u16, name_and_type_index: u16) -> Result<MemberRef> {
	Ok(MemberRef {
		class: reference(tags, class_index)?,
		name_and_type: reference(tags, name_and_type_index)?,
	})
}

/// Reads the constant pool from the specified reader. The first thing read is an `u16` specifying the size of the constant pool.
///
/// The entries are read first, and only then the indices inside them are checked, since entries may reference
/// entries that come after them.
pub(crate) fn read(reader: &mut impl ClassRead) -> Result<ConstantPool> {
	let mut pool = vec![None];

	let constant_pool_count = reader.read_u16_as_usize()?;
	while pool.len() < constant_pool_count {
		let index = pool.len();
		let entry = PoolEntry::read(reader, index)
			.with_context(|| anyhow!("while reading constant pool entry {index}"))?;
		trace!("constant pool entry {index}: {entry:?}");

		let is_wide = matches!(entry, PoolEntry::Long { .. } | PoolEntry::Double { .. });
		pool.push(Some(entry));
		if is_wide {
			pool.push(None); // long and double take up two pool slots
		}
	}

	let tags: Vec<Option<u8>> = pool.iter()
		.map(|entry| entry.as_ref().map(PoolEntry::tag))
		.collect();

	let mut entries = Vec::with_capacity(pool.len());
	for (index, entry) in pool.into_iter().enumerate() {
		let constant = entry
			.map(|entry| entry.resolve(&tags))
			.transpose()
			.with_context(|| anyhow!("while resolving constant pool entry {index}"))?;
		entries.push(constant);
	}

	Ok(ConstantPool::new(entries))
}

/// Tiny helper trait for adding pool indices to errors.
pub(crate) trait PoolContext {
	fn pool_context(self, index: u16) -> Self;
}
impl<T> PoolContext for Result<T> {
	fn pool_context(self, index: u16) -> Self {
		self.with_context(|| anyhow!("while getting pool index {index}"))
	}
}
