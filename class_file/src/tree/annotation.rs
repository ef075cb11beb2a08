use java_string::JavaString;
use crate::tree::pool::PoolRef;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
	/// A field descriptor of the annotation interface, like `Ljava/lang/Deprecated;`.
	pub type_name: PoolRef<JavaString>,
	pub element_value_pairs: Vec<ElementValuePair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementValuePair {
	pub name: PoolRef<JavaString>,
	pub value: ElementValue,
}

/// The value of an annotation element.
///
/// The primitive kinds point to the constant pool entry holding the value. Note that `byte`, `char`, `short` and `boolean`
/// values are all stored as [`Constant::Integer`][crate::tree::pool::Constant::Integer].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementValue {
	Byte(PoolRef<i32>),
	Char(PoolRef<i32>),
	Double(PoolRef<f64>),
	Float(PoolRef<f32>),
	Int(PoolRef<i32>),
	Long(PoolRef<i64>),
	Short(PoolRef<i32>),
	Boolean(PoolRef<i32>),
	String(PoolRef<JavaString>),
	Enum {
		/// A field descriptor of the enum, like `Ljava/lang/annotation/RetentionPolicy;`.
		type_name: PoolRef<JavaString>,
		const_name: PoolRef<JavaString>,
	},
	/// A return descriptor, like `Ljava/lang/Object;` or `V`.
	Class(PoolRef<JavaString>),
	Annotation(Annotation),
	Array(Vec<ElementValue>),
}

impl ElementValue {
	/// The tag of this element value in the class file, like `b'I'` for [`ElementValue::Int`].
	pub fn tag(&self) -> u8 {
		match self {
			ElementValue::Byte(_) => b'B',
			ElementValue::Char(_) => b'C',
			ElementValue::Double(_) => b'D',
			ElementValue::Float(_) => b'F',
			ElementValue::Int(_) => b'I',
			ElementValue::Long(_) => b'J',
			ElementValue::Short(_) => b'S',
			ElementValue::Boolean(_) => b'Z',
			ElementValue::String(_) => b's',
			ElementValue::Enum { .. } => b'e',
			ElementValue::Class(_) => b'c',
			ElementValue::Annotation(_) => b'@',
			ElementValue::Array(_) => b'[',
		}
	}
}
