use std::fmt::{Debug, Formatter};
use java_string::JavaString;
use crate::tree::annotation::{Annotation, ElementValue};
use crate::tree::class::flags;
use crate::tree::frame::StackMapFrame;
use crate::tree::pool::{ClassInfo, Constant, MethodHandle, NameAndType, PoolRef};
use crate::tree::type_annotation::TypeAnnotation;

/// An attribute of a class, field, method or `Code` attribute.
///
/// Take a look at the [Java Virtual Machine Specification](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html#jvms-4.7) for
/// the meaning of each of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
	/// Points to an [`Constant::Integer`], [`Constant::Float`], [`Constant::Long`], [`Constant::Double`] or [`Constant::String`].
	ConstantValue(PoolRef<Constant>),
	Code(Code),
	StackMapTable(Vec<StackMapFrame>),
	Exceptions(Vec<PoolRef<ClassInfo>>),
	SourceFile(PoolRef<JavaString>),
	LineNumberTable(Vec<LineNumber>),
	LocalVariableTable(Vec<LocalVariable>),
	LocalVariableTypeTable(Vec<LocalVariableType>),
	InnerClasses(Vec<InnerClass>),
	EnclosingMethod(EnclosingMethod),
	Signature(PoolRef<JavaString>),
	/// The raw bytes, the content is not checked.
	SourceDebugExtension(Vec<u8>),
	Synthetic,
	Deprecated,
	RuntimeVisibleAnnotations(Vec<Annotation>),
	RuntimeInvisibleAnnotations(Vec<Annotation>),
	/// For each parameter, the annotations on it.
	RuntimeVisibleParameterAnnotations(Vec<Vec<Annotation>>),
	/// For each parameter, the annotations on it.
	RuntimeInvisibleParameterAnnotations(Vec<Vec<Annotation>>),
	RuntimeVisibleTypeAnnotations(Vec<TypeAnnotation>),
	RuntimeInvisibleTypeAnnotations(Vec<TypeAnnotation>),
	AnnotationDefault(ElementValue),
	BootstrapMethods(Vec<BootstrapMethod>),
	MethodParameters(Vec<MethodParameter>),
}

impl Attribute {
	/// The name of the attribute, as stored in the class file.
	pub fn name(&self) -> &'static str {
		match self {
			Attribute::ConstantValue(_) => "ConstantValue",
			Attribute::Code(_) => "Code",
			Attribute::StackMapTable(_) => "StackMapTable",
			Attribute::Exceptions(_) => "Exceptions",
			Attribute::SourceFile(_) => "SourceFile",
			Attribute::LineNumberTable(_) => "LineNumberTable",
			Attribute::LocalVariableTable(_) => "LocalVariableTable",
			Attribute::LocalVariableTypeTable(_) => "LocalVariableTypeTable",
			Attribute::InnerClasses(_) => "InnerClasses",
			Attribute::EnclosingMethod(_) => "EnclosingMethod",
			Attribute::Signature(_) => "Signature",
			Attribute::SourceDebugExtension(_) => "SourceDebugExtension",
			Attribute::Synthetic => "Synthetic",
			Attribute::Deprecated => "Deprecated",
			Attribute::RuntimeVisibleAnnotations(_) => "RuntimeVisibleAnnotations",
			Attribute::RuntimeInvisibleAnnotations(_) => "RuntimeInvisibleAnnotations",
			Attribute::RuntimeVisibleParameterAnnotations(_) => "RuntimeVisibleParameterAnnotations",
			Attribute::RuntimeInvisibleParameterAnnotations(_) => "RuntimeInvisibleParameterAnnotations",
			Attribute::RuntimeVisibleTypeAnnotations(_) => "RuntimeVisibleTypeAnnotations",
			Attribute::RuntimeInvisibleTypeAnnotations(_) => "RuntimeInvisibleTypeAnnotations",
			Attribute::AnnotationDefault(_) => "AnnotationDefault",
			Attribute::BootstrapMethods(_) => "BootstrapMethods",
			Attribute::MethodParameters(_) => "MethodParameters",
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Code {
	pub max_stack: u16,
	pub max_locals: u16,
	/// The raw bytecode.
	pub code: Vec<u8>,
	pub exception_table: Vec<Exception>,
	pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Exception {
	pub start_pc: u16,
	pub end_pc: u16,
	pub handler_pc: u16,
	/// [`None`] catches everything, this is used for `finally` blocks.
	pub catch_type: Option<PoolRef<ClassInfo>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineNumber {
	pub start_pc: u16,
	pub line_number: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalVariable {
	pub start_pc: u16,
	pub length: u16,
	pub name: PoolRef<JavaString>,
	pub descriptor: PoolRef<JavaString>,
	pub index: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalVariableType {
	pub start_pc: u16,
	pub length: u16,
	pub name: PoolRef<JavaString>,
	pub signature: PoolRef<JavaString>,
	pub index: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InnerClass {
	pub inner_class: PoolRef<ClassInfo>,
	/// [`None`] for top level classes, local classes and anonymous classes.
	pub outer_class: Option<PoolRef<ClassInfo>>,
	/// [`None`] for anonymous classes.
	pub inner_name: Option<PoolRef<JavaString>>,
	pub access: InnerClassAccess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnclosingMethod {
	pub class: PoolRef<ClassInfo>,
	/// [`None`] if the class is not immediately enclosed by a method or constructor.
	pub method: Option<PoolRef<NameAndType>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BootstrapMethod {
	pub method_ref: PoolRef<MethodHandle>,
	pub arguments: Vec<PoolRef<Constant>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodParameter {
	/// [`None`] for a parameter without a name.
	pub name: Option<PoolRef<JavaString>>,
	pub access: ParameterAccess,
}

/// Represents the access flags an inner class can have.
///
/// Take a look at the [Java Virtual Machine Specification](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html#jvms-4.7.6-300-D.1-D.1), for
/// the meanings of these fields.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct InnerClassAccess {
	pub is_public: bool,
	pub is_private: bool,
	pub is_protected: bool,
	pub is_static: bool,
	pub is_final: bool,
	pub is_interface: bool,
	pub is_abstract: bool,
	pub is_synthetic: bool,
	pub is_annotation: bool,
	pub is_enum: bool,
}

impl Debug for InnerClassAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("InnerClassAccess { ")?;
		if self.is_public     { f.write_str("public ")?; }
		if self.is_private    { f.write_str("private ")?; }
		if self.is_protected  { f.write_str("protected ")?; }
		if self.is_static     { f.write_str("static ")?; }
		if self.is_final      { f.write_str("final ")?; }
		if self.is_interface  { f.write_str("interface ")?; }
		if self.is_abstract   { f.write_str("abstract ")?; }
		if self.is_synthetic  { f.write_str("synthetic ")?; }
		if self.is_annotation { f.write_str("annotation ")?; }
		if self.is_enum       { f.write_str("enum ")?; }
		f.write_str("}")
	}
}

impl From<u16> for InnerClassAccess {
	fn from(value: u16) -> Self {
		InnerClassAccess {
			is_public:     value & flags::ACC_PUBLIC     != 0,
			is_private:    value & flags::ACC_PRIVATE    != 0,
			is_protected:  value & flags::ACC_PROTECTED  != 0,
			is_static:     value & flags::ACC_STATIC     != 0,
			is_final:      value & flags::ACC_FINAL      != 0,
			is_interface:  value & flags::ACC_INTERFACE  != 0,
			is_abstract:   value & flags::ACC_ABSTRACT   != 0,
			is_synthetic:  value & flags::ACC_SYNTHETIC  != 0,
			is_annotation: value & flags::ACC_ANNOTATION != 0,
			is_enum:       value & flags::ACC_ENUM       != 0,
		}
	}
}

impl From<InnerClassAccess> for u16 {
	fn from(value: InnerClassAccess) -> Self {
		(if value.is_public     { flags::ACC_PUBLIC     } else { 0 }) |
		(if value.is_private    { flags::ACC_PRIVATE    } else { 0 }) |
		(if value.is_protected  { flags::ACC_PROTECTED  } else { 0 }) |
		(if value.is_static     { flags::ACC_STATIC     } else { 0 }) |
		(if value.is_final      { flags::ACC_FINAL      } else { 0 }) |
		(if value.is_interface  { flags::ACC_INTERFACE  } else { 0 }) |
		(if value.is_abstract   { flags::ACC_ABSTRACT   } else { 0 }) |
		(if value.is_synthetic  { flags::ACC_SYNTHETIC  } else { 0 }) |
		(if value.is_annotation { flags::ACC_ANNOTATION } else { 0 }) |
		(if value.is_enum       { flags::ACC_ENUM       } else { 0 })
	}
}

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParameterAccess {
	pub is_final: bool,
	pub is_synthetic: bool,
	pub is_mandated: bool,
}

impl Debug for ParameterAccess {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("ParameterAccess { ")?;
		if self.is_final     { f.write_str("final ")?; }
		if self.is_synthetic { f.write_str("synthetic ")?; }
		if self.is_mandated  { f.write_str("mandated ")?; }
		f.write_str("}")
	}
}

impl From<u16> for ParameterAccess {
	fn from(value: u16) -> Self {
		ParameterAccess {
			is_final:     value & flags::ACC_FINAL     != 0,
			is_synthetic: value & flags::ACC_SYNTHETIC != 0,
			is_mandated:  value & flags::ACC_MANDATED  != 0,
		}
	}
}

impl From<ParameterAccess> for u16 {
	fn from(value: ParameterAccess) -> Self {
		(if value.is_final     { flags::ACC_FINAL     } else { 0 }) |
		(if value.is_synthetic { flags::ACC_SYNTHETIC } else { 0 }) |
		(if value.is_mandated  { flags::ACC_MANDATED  } else { 0 })
	}
}
