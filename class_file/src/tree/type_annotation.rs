use crate::tree::annotation::Annotation;

/// An annotation on a use of a type.
///
/// Take a look at the [Java Virtual Machine Specification](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html#jvms-4.7.20).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeAnnotation {
	/// The raw `target_type`, it determines the variant of [`TypeAnnotation::target_info`].
	pub target_type: u8,
	pub target_info: TargetInfo,
	pub type_path: TypePath,
	pub annotation: Annotation,
}

/// States exactly on which type the annotation is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetInfo {
	/// The annotation is on a type parameter of a generic class, interface, method or constructor.
	TypeParameter {
		/// Specifies the index of the type parameter. `0` means the first type parameter.
		index: u8,
	},
	/// The annotation is on a type in an `extends` or `implements` clause.
	SuperType {
		/// `65535` means the super class, anything else is an index into the interfaces of the class.
		index: u16,
	},
	/// The annotation is on a bound of a type parameter.
	TypeParameterBound {
		/// Specifies the index of the type parameter. `0` means the first type parameter.
		type_parameter_index: u8,
		/// Specifies the index of the bound. `0` means the first bound.
		bound_index: u8,
	},
	/// The annotation is on the type of a field, the return type of a method, or the receiver type of a method.
	Empty,
	/// The annotation is on the type of a formal parameter of a method, constructor or lambda expression.
	FormalParameter {
		index: u8,
	},
	/// The annotation is on the `i`-th type in the `throws` clause.
	Throws {
		index: u8,
	},
	/// The annotation is on the type of a local variable or resource variable.
	LocalVariable {
		table: Vec<LocalVariableTarget>,
	},
	/// The annotation is on the type of an exception parameter.
	Catch {
		/// An index into the exception table of the `Code` attribute.
		exception_table_index: u16,
	},
	/// The annotation is on an `instanceof`, `new` or method reference expression.
	Offset {
		offset: u16,
	},
	/// The annotation is on a type argument of a cast, or of a generic constructor or method invocation or reference.
	TypeArgument {
		offset: u16,
		type_argument_index: u8,
	},
}

/// A range of bytecode in which a local variable has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalVariableTarget {
	pub start_pc: u16,
	pub length: u16,
	pub index: u16,
}

/// Which part of the type the annotation is on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TypePath {
	pub path: Vec<TypePathKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypePathKind {
	/// The annotation is deeper in an array type.
	ArrayDeeper,
	/// The annotation is deeper in a nested type.
	NestedDeeper,
	/// The annotation is on the bound of a wildcard type argument of a parameterized type.
	WildcardBound,
	/// The annotation is on a type argument of a parameterized type.
	TypeArgument {
		index: u8,
	},
}
