use std::fmt::{Debug, Formatter};
use java_string::JavaString;
use crate::tree::attribute::Attribute;
use crate::tree::class::flags;
use crate::tree::pool::PoolRef;

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
	pub access: MethodAccess,
	pub name: PoolRef<JavaString>,
	/// A method descriptor, like `(ILjava/lang/String;)V`.
	pub descriptor: PoolRef<JavaString>,

	pub attributes: Vec<Attribute>,
}

/// Represents the access flags a method can have.
///
/// Take a look at the [Java Virtual Machine Specification](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html#jvms-4.6-200-A.1), for
/// the meanings of these fields, and what combinations are legal and which not.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct MethodAccess {
	pub is_public: bool,
	pub is_private: bool,
	pub is_protected: bool,
	pub is_static: bool,
	pub is_final: bool,
	pub is_synchronized: bool,
	pub is_bridge: bool,
	pub is_varargs: bool,
	pub is_native: bool,
	pub is_abstract: bool,
	pub is_strict: bool,
	pub is_synthetic: bool,
}

impl Debug for MethodAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("MethodAccess { ")?;
		if self.is_public       { f.write_str("public ")?; }
		if self.is_private      { f.write_str("private ")?; }
		if self.is_protected    { f.write_str("protected ")?; }
		if self.is_static       { f.write_str("static ")?; }
		if self.is_final        { f.write_str("final ")?; }
		if self.is_synchronized { f.write_str("synchronized ")?; }
		if self.is_bridge       { f.write_str("bridge ")?; }
		if self.is_varargs      { f.write_str("varargs ")?; }
		if self.is_native       { f.write_str("native ")?; }
		if self.is_abstract     { f.write_str("abstract ")?; }
		if self.is_strict       { f.write_str("strict ")?; }
		if self.is_synthetic    { f.write_str("synthetic ")?; }
		f.write_str("}")
	}
}

impl From<u16> for MethodAccess {
	fn from(value: u16) -> Self {
		MethodAccess {
			is_public:       value & flags::ACC_PUBLIC       != 0,
			is_private:      value & flags::ACC_PRIVATE      != 0,
			is_protected:    value & flags::ACC_PROTECTED    != 0,
			is_static:       value & flags::ACC_STATIC       != 0,
			is_final:        value & flags::ACC_FINAL        != 0,
			is_synchronized: value & flags::ACC_SYNCHRONIZED != 0,
			is_bridge:       value & flags::ACC_BRIDGE       != 0,
			is_varargs:      value & flags::ACC_VARARGS      != 0,
			is_native:       value & flags::ACC_NATIVE       != 0,
			is_abstract:     value & flags::ACC_ABSTRACT     != 0,
			is_strict:       value & flags::ACC_STRICT       != 0,
			is_synthetic:    value & flags::ACC_SYNTHETIC    != 0,
		}
	}
}

impl From<MethodAccess> for u16 {
	fn from(value: MethodAccess) -> Self {
		(if value.is_public       { flags::ACC_PUBLIC       } else { 0 }) |
		(if value.is_private      { flags::ACC_PRIVATE      } else { 0 }) |
		(if value.is_protected    { flags::ACC_PROTECTED    } else { 0 }) |
		(if value.is_static       { flags::ACC_STATIC       } else { 0 }) |
		(if value.is_final        { flags::ACC_FINAL        } else { 0 }) |
		(if value.is_synchronized { flags::ACC_SYNCHRONIZED } else { 0 }) |
		(if value.is_bridge       { flags::ACC_BRIDGE       } else { 0 }) |
		(if value.is_varargs      { flags::ACC_VARARGS      } else { 0 }) |
		(if value.is_native       { flags::ACC_NATIVE       } else { 0 }) |
		(if value.is_abstract     { flags::ACC_ABSTRACT     } else { 0 }) |
		(if value.is_strict       { flags::ACC_STRICT       } else { 0 }) |
		(if value.is_synthetic    { flags::ACC_SYNTHETIC    } else { 0 })
	}
}
