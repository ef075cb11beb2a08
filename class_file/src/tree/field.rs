use std::fmt::{Debug, Formatter};
use java_string::JavaString;
use crate::tree::attribute::Attribute;
use crate::tree::class::flags;
use crate::tree::pool::PoolRef;

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
	pub access: FieldAccess,
	pub name: PoolRef<JavaString>,
	/// A field descriptor, like `I` or `Ljava/lang/String;`.
	pub descriptor: PoolRef<JavaString>,

	pub attributes: Vec<Attribute>,
}

/// Represents the access flags a field can have.
///
/// Take a look at the [Java Virtual Machine Specification](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html#jvms-4.5-200-A.1), for
/// the meanings of these fields, and what combinations are legal and which not.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldAccess {
	pub is_public: bool,
	pub is_private: bool,
	pub is_protected: bool,
	pub is_static: bool,
	pub is_final: bool,
	pub is_volatile: bool,
	pub is_transient: bool,
	pub is_synthetic: bool,
	pub is_enum: bool,
}

impl Debug for FieldAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("FieldAccess { ")?;
		if self.is_public    { f.write_str("public ")?; }
		if self.is_private   { f.write_str("private ")?; }
		if self.is_protected { f.write_str("protected ")?; }
		if self.is_static    { f.write_str("static ")?; }
		if self.is_final     { f.write_str("final ")?; }
		if self.is_volatile  { f.write_str("volatile ")?; }
		if self.is_transient { f.write_str("transient ")?; }
		if self.is_synthetic { f.write_str("synthetic ")?; }
		if self.is_enum      { f.write_str("enum ")?; }
		f.write_str("}")
	}
}

impl From<u16> for FieldAccess {
	fn from(value: u16) -> Self {
		FieldAccess {
			is_public:    value & flags::ACC_PUBLIC    != 0,
			is_private:   value & flags::ACC_PRIVATE   != 0,
			is_protected: value & flags::ACC_PROTECTED != 0,
			is_static:    value & flags::ACC_STATIC    != 0,
			is_final:     value & flags::ACC_FINAL     != 0,
			is_volatile:  value & flags::ACC_VOLATILE  != 0,
			is_transient: value & flags::ACC_TRANSIENT != 0,
			is_synthetic: value & flags::ACC_SYNTHETIC != 0,
			is_enum:      value & flags::ACC_ENUM      != 0,
		}
	}
}

impl From<FieldAccess> for u16 {
	fn from(value: FieldAccess) -> Self {
		(if value.is_public    { flags::ACC_PUBLIC    } else { 0 }) |
		(if value.is_private   { flags::ACC_PRIVATE   } else { 0 }) |
		(if value.is_protected { flags::ACC_PROTECTED } else { 0 }) |
		(if value.is_static    { flags::ACC_STATIC    } else { 0 }) |
		(if value.is_final     { flags::ACC_FINAL     } else { 0 }) |
		(if value.is_volatile  { flags::ACC_VOLATILE  } else { 0 }) |
		(if value.is_transient { flags::ACC_TRANSIENT } else { 0 }) |
		(if value.is_synthetic { flags::ACC_SYNTHETIC } else { 0 }) |
		(if value.is_enum      { flags::ACC_ENUM      } else { 0 })
	}
}
