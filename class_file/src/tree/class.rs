use std::fmt::{Debug, Formatter};
use anyhow::Result;
use java_string::JavaString;
use crate::tree::attribute::Attribute;
use crate::tree::field::Field;
use crate::tree::method::Method;
use crate::tree::pool::{ClassInfo, ConstantPool, PoolRef};
use crate::tree::version::Version;

/// A decoded class file.
///
/// The class file owns its [`ConstantPool`]. All the [`PoolRef`]s inside of it are checked to point into that constant pool.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
	pub version: Version,
	pub constant_pool: ConstantPool,
	pub access: ClassAccess,
	pub this_class: PoolRef<ClassInfo>,
	/// Only `java/lang/Object` has no super class.
	pub super_class: Option<PoolRef<ClassInfo>>,
	pub interfaces: Vec<PoolRef<ClassInfo>>,

	pub fields: Vec<Field>,
	pub methods: Vec<Method>,

	pub attributes: Vec<Attribute>,
}

impl ClassFile {
	/// The name of this class, like `java/lang/Object`.
	pub fn name(&self) -> Result<&JavaString> {
		self.class_name(self.this_class)
	}

	pub fn super_class_name(&self) -> Result<Option<&JavaString>> {
		self.super_class.map(|class| self.class_name(class)).transpose()
	}

	pub fn interface_names(&self) -> Result<Vec<&JavaString>> {
		self.interfaces.iter().map(|&class| self.class_name(class)).collect()
	}

	fn class_name(&self, class: PoolRef<ClassInfo>) -> Result<&JavaString> {
		class.get(&self.constant_pool)?.name.get(&self.constant_pool)
	}
}

/// The raw access flag bits, as used for classes, fields, methods, inner classes and method parameters.
///
/// Take a look at the [Java Virtual Machine Specification](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html) for which
/// of these are allowed where.
pub mod flags {
	pub const ACC_PUBLIC: u16 = 0x0001;
	pub const ACC_PRIVATE: u16 = 0x0002;
	pub const ACC_PROTECTED: u16 = 0x0004;
	pub const ACC_STATIC: u16 = 0x0008;
	pub const ACC_FINAL: u16 = 0x0010;
	pub const ACC_SUPER: u16 = 0x0020;
	pub const ACC_SYNCHRONIZED: u16 = 0x0020;
	pub const ACC_VOLATILE: u16 = 0x0040;
	pub const ACC_BRIDGE: u16 = 0x0040;
	pub const ACC_TRANSIENT: u16 = 0x0080;
	pub const ACC_VARARGS: u16 = 0x0080;
	pub const ACC_NATIVE: u16 = 0x0100;
	pub const ACC_INTERFACE: u16 = 0x0200;
	pub const ACC_ABSTRACT: u16 = 0x0400;
	pub const ACC_STRICT: u16 = 0x0800;
	pub const ACC_SYNTHETIC: u16 = 0x1000;
	pub const ACC_ANNOTATION: u16 = 0x2000;
	pub const ACC_ENUM: u16 = 0x4000;
	pub const ACC_MANDATED: u16 = 0x8000;
}

/// Represents the access flags a class can have.
///
/// Take a look at the [Java Virtual Machine Specification](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html#jvms-4.1-200-E.1), for
/// the meanings of these fields, and what combinations are legal and which not.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ClassAccess {
	pub is_public: bool,
	pub is_final: bool,
	pub is_super: bool,
	pub is_interface: bool,
	pub is_abstract: bool,
	pub is_synthetic: bool,
	pub is_annotation: bool,
	pub is_enum: bool,
}

impl Debug for ClassAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("ClassAccess { ")?;
		if self.is_public     { f.write_str("public ")?; }
		if self.is_final      { f.write_str("final ")?; }
		if self.is_super      { f.write_str("super ")?; }
		if self.is_interface  { f.write_str("interface ")?; }
		if self.is_abstract   { f.write_str("abstract ")?; }
		if self.is_synthetic  { f.write_str("synthetic ")?; }
		if self.is_annotation { f.write_str("annotation ")?; }
		if self.is_enum       { f.write_str("enum ")?; }
		f.write_str("}")
	}
}

impl From<u16> for ClassAccess {
	fn from(value: u16) -> Self {
		ClassAccess {
			is_public:     value & flags::ACC_PUBLIC     != 0,
			is_final:      value & flags::ACC_FINAL      != 0,
			is_super:      value & flags::ACC_SUPER      != 0,
			is_interface:  value & flags::ACC_INTERFACE  != 0,
			is_abstract:   value & flags::ACC_ABSTRACT   != 0,
			is_synthetic:  value & flags::ACC_SYNTHETIC  != 0,
			is_annotation: value & flags::ACC_ANNOTATION != 0,
			is_enum:       value & flags::ACC_ENUM       != 0,
		}
	}
}

impl From<ClassAccess> for u16 {
	fn from(value: ClassAccess) -> Self {
		(if value.is_public     { flags::ACC_PUBLIC     } else { 0 }) |
		(if value.is_final      { flags::ACC_FINAL      } else { 0 }) |
		(if value.is_super      { flags::ACC_SUPER      } else { 0 }) |
		(if value.is_interface  { flags::ACC_INTERFACE  } else { 0 }) |
		(if value.is_abstract   { flags::ACC_ABSTRACT   } else { 0 }) |
		(if value.is_synthetic  { flags::ACC_SYNTHETIC  } else { 0 }) |
		(if value.is_annotation { flags::ACC_ANNOTATION } else { 0 }) |
		(if value.is_enum       { flags::ACC_ENUM       } else { 0 })
	}
}
