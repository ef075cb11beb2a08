//! Constants defined by the class file format.

pub(crate) const MAGIC: u32 = 0xCAFE_BABE;

/// The tags of constant pool entries.
pub(crate) mod pool {
	pub(crate) const UTF8: u8 = 1;
	pub(crate) const INTEGER: u8 = 3;
	pub(crate) const FLOAT: u8 = 4;
	pub(crate) const LONG: u8 = 5;
	pub(crate) const DOUBLE: u8 = 6;
	pub(crate) const CLASS: u8 = 7;
	pub(crate) const STRING: u8 = 8;
	pub(crate) const FIELD_REF: u8 = 9;
	pub(crate) const METHOD_REF: u8 = 10;
	pub(crate) const INTERFACE_METHOD_REF: u8 = 11;
	pub(crate) const NAME_AND_TYPE: u8 = 12;
	pub(crate) const METHOD_HANDLE: u8 = 15;
	pub(crate) const METHOD_TYPE: u8 = 16;
	pub(crate) const INVOKE_DYNAMIC: u8 = 18;

	/// The name of the pool entry kind with that tag, for error messages.
	pub(crate) fn name(tag: u8) -> &'static str {
		match tag {
			UTF8 => "Utf8",
			INTEGER => "Integer",
			FLOAT => "Float",
			LONG => "Long",
			DOUBLE => "Double",
			CLASS => "Class",
			STRING => "String",
			FIELD_REF => "FieldRef",
			METHOD_REF => "MethodRef",
			INTERFACE_METHOD_REF => "InterfaceMethodRef",
			NAME_AND_TYPE => "NameAndType",
			METHOD_HANDLE => "MethodHandle",
			METHOD_TYPE => "MethodType",
			INVOKE_DYNAMIC => "InvokeDynamic",
			_ => "unknown",
		}
	}

	pub(crate) mod method_handle_reference {
		pub(crate) const GET_FIELD: u8 = 1;
		pub(crate) const GET_STATIC: u8 = 2;
		pub(crate) const PUT_FIELD: u8 = 3;
		pub(crate) const PUT_STATIC: u8 = 4;
		pub(crate) const INVOKE_VIRTUAL: u8 = 5;
		pub(crate) const INVOKE_STATIC: u8 = 6;
		pub(crate) const INVOKE_SPECIAL: u8 = 7;
		pub(crate) const NEW_INVOKE_SPECIAL: u8 = 8;
		pub(crate) const INVOKE_INTERFACE: u8 = 9;
	}
}

/// The names of the attributes we know how to read.
pub(crate) mod attribute {
	use java_string::JavaStr;

	pub(crate) const CONSTANT_VALUE: &JavaStr = JavaStr::from_str("ConstantValue");
	pub(crate) const CODE: &JavaStr = JavaStr::from_str("Code");
	pub(crate) const STACK_MAP_TABLE: &JavaStr = JavaStr::from_str("StackMapTable");
	pub(crate) const EXCEPTIONS: &JavaStr = JavaStr::from_str("Exceptions");
	pub(crate) const SOURCE_FILE: &JavaStr = JavaStr::from_str("SourceFile");
	pub(crate) const LINE_NUMBER_TABLE: &JavaStr = JavaStr::from_str("LineNumberTable");
	pub(crate) const LOCAL_VARIABLE_TABLE: &JavaStr = JavaStr::from_str("LocalVariableTable");
	pub(crate) const LOCAL_VARIABLE_TYPE_TABLE: &JavaStr = JavaStr::from_str("LocalVariableTypeTable");
	pub(crate) const INNER_CLASSES: &JavaStr = JavaStr::from_str("InnerClasses");
	pub(crate) const ENCLOSING_METHOD: &JavaStr = JavaStr::from_str("EnclosingMethod");
	pub(crate) const SIGNATURE: &JavaStr = JavaStr::from_str("Signature");
	pub(crate) const SOURCE_DEBUG_EXTENSION: &JavaStr = JavaStr::from_str("SourceDebugExtension");
	pub(crate) const SYNTHETIC: &JavaStr = JavaStr::from_str("Synthetic");
	pub(crate) const DEPRECATED: &JavaStr = JavaStr::from_str("Deprecated");
	pub(crate) const RUNTIME_VISIBLE_ANNOTATIONS: &JavaStr = JavaStr::from_str("RuntimeVisibleAnnotations");
	pub(crate) const RUNTIME_INVISIBLE_ANNOTATIONS: &JavaStr = JavaStr::from_str("RuntimeInvisibleAnnotations");
	pub(crate) const RUNTIME_VISIBLE_PARAMETER_ANNOTATIONS: &JavaStr = JavaStr::from_str("RuntimeVisibleParameterAnnotations");
	pub(crate) const RUNTIME_INVISIBLE_PARAMETER_ANNOTATIONS: &JavaStr = JavaStr::from_str("RuntimeInvisibleParameterAnnotations");
	pub(crate) const RUNTIME_VISIBLE_TYPE_ANNOTATIONS: &JavaStr = JavaStr::from_str("RuntimeVisibleTypeAnnotations");
	pub(crate) const RUNTIME_INVISIBLE_TYPE_ANNOTATIONS: &JavaStr = JavaStr::from_str("RuntimeInvisibleTypeAnnotations");
	pub(crate) const ANNOTATION_DEFAULT: &JavaStr = JavaStr::from_str("AnnotationDefault");
	pub(crate) const BOOTSTRAP_METHODS: &JavaStr = JavaStr::from_str("BootstrapMethods");
	pub(crate) const METHOD_PARAMETERS: &JavaStr = JavaStr::from_str("MethodParameters");
}

/// The values of the `target_type` item of type annotations.
pub(crate) mod type_annotation {
	pub(crate) const CLASS_TYPE_PARAMETER: u8 = 0x00;
	pub(crate) const METHOD_TYPE_PARAMETER: u8 = 0x01;
	pub(crate) const CLASS_EXTENDS: u8 = 0x10;
	pub(crate) const CLASS_TYPE_PARAMETER_BOUND: u8 = 0x11;
	pub(crate) const METHOD_TYPE_PARAMETER_BOUND: u8 = 0x12;
	pub(crate) const FIELD: u8 = 0x13;
	pub(crate) const METHOD_RETURN: u8 = 0x14;
	pub(crate) const METHOD_RECEIVER: u8 = 0x15;
	pub(crate) const METHOD_FORMAL_PARAMETER: u8 = 0x16;
	pub(crate) const THROWS: u8 = 0x17;
	pub(crate) const LOCAL_VARIABLE: u8 = 0x40;
	pub(crate) const RESOURCE_VARIABLE: u8 = 0x41;
	pub(crate) const EXCEPTION_PARAMETER: u8 = 0x42;
	pub(crate) const INSTANCE_OF: u8 = 0x43;
	pub(crate) const NEW: u8 = 0x44;
	pub(crate) const CONSTRUCTOR_REFERENCE: u8 = 0x45;
	pub(crate) const METHOD_REFERENCE: u8 = 0x46;
	pub(crate) const CAST: u8 = 0x47;
	pub(crate) const CONSTRUCTOR_INVOCATION_TYPE_ARGUMENT: u8 = 0x48;
	pub(crate) const METHOD_INVOCATION_TYPE_ARGUMENT: u8 = 0x49;
	pub(crate) const CONSTRUCTOR_REFERENCE_TYPE_ARGUMENT: u8 = 0x4A;
	pub(crate) const METHOD_REFERENCE_TYPE_ARGUMENT: u8 = 0x4B;
}
