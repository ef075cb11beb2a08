use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use anyhow::{bail, Result};
use java_string::JavaString;
use crate::class_constants::pool;
use crate::class_constants::pool::method_handle_reference;
use crate::class_reader::pool::PoolContext;
use crate::DecodeError;

/// A reference to an entry of the [`ConstantPool`], known to point to an entry of kind `T`.
///
/// References inside a decoded [`ClassFile`][crate::tree::class::ClassFile] have been checked against its constant pool,
/// so [`PoolRef::get`] with that pool never fails.
pub struct PoolRef<T> {
	index: u16,
	kind: PhantomData<fn() -> T>,
}

impl<T> PoolRef<T> {
	pub(crate) const fn new(index: u16) -> PoolRef<T> {
		PoolRef { index, kind: PhantomData }
	}

	/// The index into the constant pool.
	pub const fn index(self) -> u16 {
		self.index
	}
}

impl<T: PoolKind> PoolRef<T> {
	/// Creates a reference to `index`, if an entry with tag `tag` can be used as a `T`.
	pub(crate) fn checked(index: u16, tag: u8) -> Result<PoolRef<T>> {
		if !T::accepts(tag) {
			bail!(DecodeError::PoolKindMismatch { index, expected: T::NAME, got: pool::name(tag) });
		}
		Ok(PoolRef::new(index))
	}

	/// Looks up the referenced entry.
	pub fn get(self, pool: &ConstantPool) -> Result<&T> {
		pool.get(self.index)
	}
}

impl<T> Clone for PoolRef<T> {
	fn clone(&self) -> Self {
		*self
	}
}
impl<T> Copy for PoolRef<T> {}

impl<T> PartialEq for PoolRef<T> {
	fn eq(&self, other: &Self) -> bool {
		self.index == other.index
	}
}
impl<T> Eq for PoolRef<T> {}

impl<T> Hash for PoolRef<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.index.hash(state)
	}
}

impl<T> Debug for PoolRef<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.index)
	}
}

/// A kind of constant pool entry, that a [`PoolRef`] can point to.
pub trait PoolKind: Sized {
	/// The name of this kind, for error messages.
	const NAME: &'static str;

	/// Whether an entry with the tag `tag` can be used as this kind.
	fn accepts(tag: u8) -> bool;

	/// Gets this kind out of a [`Constant`], if it's of this kind.
	fn from_constant(constant: &Constant) -> Option<&Self>;
}

macro_rules! pool_kind {
	($kind:ty, $variant:ident, $tag:ident) => {
		impl PoolKind for $kind {
			const NAME: &'static str = stringify!($variant);

			fn accepts(tag: u8) -> bool {
				tag == pool::$tag
			}

			fn from_constant(constant: &Constant) -> Option<&Self> {
				if let Constant::$variant(x) = constant { Some(x) } else { None }
			}
		}
	}
}

pool_kind!(JavaString, Utf8, UTF8);
pool_kind!(i32, Integer, INTEGER);
pool_kind!(f32, Float, FLOAT);
pool_kind!(i64, Long, LONG);
pool_kind!(f64, Double, DOUBLE);
pool_kind!(ClassInfo, Class, CLASS);
pool_kind!(StringInfo, String, STRING);
pool_kind!(NameAndType, NameAndType, NAME_AND_TYPE);
pool_kind!(MethodHandle, MethodHandle, METHOD_HANDLE);
pool_kind!(MethodType, MethodType, METHOD_TYPE);
pool_kind!(InvokeDynamic, InvokeDynamic, INVOKE_DYNAMIC);

/// Field, method and interface method references share the [`MemberRef`] shape.
impl PoolKind for MemberRef {
	const NAME: &'static str = "FieldRef, MethodRef or InterfaceMethodRef";

	fn accepts(tag: u8) -> bool {
		matches!(tag, pool::FIELD_REF | pool::METHOD_REF | pool::INTERFACE_METHOD_REF)
	}

	fn from_constant(constant: &Constant) -> Option<&Self> {
		match constant {
			Constant::FieldRef(x) | Constant::MethodRef(x) | Constant::InterfaceMethodRef(x) => Some(x),
			_ => None,
		}
	}
}

/// Any entry at all.
impl PoolKind for Constant {
	const NAME: &'static str = "any";

	fn accepts(_: u8) -> bool {
		true
	}

	fn from_constant(constant: &Constant) -> Option<&Self> {
		Some(constant)
	}
}

/// An entry of the constant pool, with all indices into the constant pool resolved into [`PoolRef`]s.
///
/// Two [`Constant::Float`]s (or [`Constant::Double`]s) are equal if their bits are, so a `NaN` entry equals itself.
#[derive(Debug, Clone)]
pub enum Constant {
	Utf8(JavaString),
	Integer(i32),
	Float(f32),
	Long(i64),
	Double(f64),
	Class(ClassInfo),
	String(StringInfo),
	FieldRef(MemberRef),
	MethodRef(MemberRef),
	InterfaceMethodRef(MemberRef),
	NameAndType(NameAndType),
	MethodHandle(MethodHandle),
	MethodType(MethodType),
	InvokeDynamic(InvokeDynamic),
}

impl Constant {
	/// The tag this entry has in the class file.
	pub fn tag(&self) -> u8 {
		match self {
			Constant::Utf8(_) => pool::UTF8,
			Constant::Integer(_) => pool::INTEGER,
			Constant::Float(_) => pool::FLOAT,
			Constant::Long(_) => pool::LONG,
			Constant::Double(_) => pool::DOUBLE,
			Constant::Class(_) => pool::CLASS,
			Constant::String(_) => pool::STRING,
			Constant::FieldRef(_) => pool::FIELD_REF,
			Constant::MethodRef(_) => pool::METHOD_REF,
			Constant::InterfaceMethodRef(_) => pool::INTERFACE_METHOD_REF,
			Constant::NameAndType(_) => pool::NAME_AND_TYPE,
			Constant::MethodHandle(_) => pool::METHOD_HANDLE,
			Constant::MethodType(_) => pool::METHOD_TYPE,
			Constant::InvokeDynamic(_) => pool::INVOKE_DYNAMIC,
		}
	}

	/// The name of the kind of this entry, like `"Class"`.
	pub fn kind_name(&self) -> &'static str {
		pool::name(self.tag())
	}
}

impl PartialEq for Constant {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Constant::Utf8(a), Constant::Utf8(b)) => a == b,
			(Constant::Integer(a), Constant::Integer(b)) => a == b,
			(Constant::Float(a), Constant::Float(b)) => a.to_bits() == b.to_bits(),
			(Constant::Long(a), Constant::Long(b)) => a == b,
			(Constant::Double(a), Constant::Double(b)) => a.to_bits() == b.to_bits(),
			(Constant::Class(a), Constant::Class(b)) => a == b,
			(Constant::String(a), Constant::String(b)) => a == b,
			(Constant::FieldRef(a), Constant::FieldRef(b)) => a == b,
			(Constant::MethodRef(a), Constant::MethodRef(b)) => a == b,
			(Constant::InterfaceMethodRef(a), Constant::InterfaceMethodRef(b)) => a == b,
			(Constant::NameAndType(a), Constant::NameAndType(b)) => a == b,
			(Constant::MethodHandle(a), Constant::MethodHandle(b)) => a == b,
			(Constant::MethodType(a), Constant::MethodType(b)) => a == b,
			(Constant::InvokeDynamic(a), Constant::InvokeDynamic(b)) => a == b,
			_ => false,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassInfo {
	/// A binary class name (like `java/lang/Object`) or an array descriptor.
	pub name: PoolRef<JavaString>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringInfo {
	pub string: PoolRef<JavaString>,
}

/// A reference to a field, method or interface method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberRef {
	pub class: PoolRef<ClassInfo>,
	pub name_and_type: PoolRef<NameAndType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameAndType {
	pub name: PoolRef<JavaString>,
	pub descriptor: PoolRef<JavaString>,
}

/// A method handle.
///
/// The [`MethodHandle::reference`] has been checked to be of the kind the [`ReferenceKind`] requires, see
/// [`ReferenceKind::expected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodHandle {
	pub reference_kind: ReferenceKind,
	pub reference: PoolRef<MemberRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodType {
	pub descriptor: PoolRef<JavaString>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvokeDynamic {
	/// An index into the `bootstrap_methods` of the `BootstrapMethods` attribute of the class.
	pub bootstrap_method_attr_index: u16,
	pub name_and_type: PoolRef<NameAndType>,
}

/// The behaviour of a [`MethodHandle`].
///
/// Take a look at the [Java Virtual Machine Specification](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-5.html#jvms-5.4.3.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
	GetField,
	GetStatic,
	PutField,
	PutStatic,
	InvokeVirtual,
	InvokeStatic,
	InvokeSpecial,
	NewInvokeSpecial,
	InvokeInterface,
}

impl ReferenceKind {
	/// Whether a method handle of this kind may reference an entry with the tag `tag`.
	pub(crate) fn accepts(self, tag: u8) -> bool {
		match self {
			ReferenceKind::GetField | ReferenceKind::GetStatic | ReferenceKind::PutField | ReferenceKind::PutStatic => tag == pool::FIELD_REF,
			ReferenceKind::InvokeVirtual | ReferenceKind::NewInvokeSpecial => tag == pool::METHOD_REF,
			ReferenceKind::InvokeStatic | ReferenceKind::InvokeSpecial => matches!(tag, pool::METHOD_REF | pool::INTERFACE_METHOD_REF),
			ReferenceKind::InvokeInterface => tag == pool::INTERFACE_METHOD_REF,
		}
	}

	/// The kinds of entries a method handle of this kind references.
	pub fn expected(self) -> &'static str {
		match self {
			ReferenceKind::GetField | ReferenceKind::GetStatic | ReferenceKind::PutField | ReferenceKind::PutStatic => "FieldRef",
			ReferenceKind::InvokeVirtual | ReferenceKind::NewInvokeSpecial => "MethodRef",
			ReferenceKind::InvokeStatic | ReferenceKind::InvokeSpecial => "MethodRef or InterfaceMethodRef",
			ReferenceKind::InvokeInterface => "InterfaceMethodRef",
		}
	}
}

impl TryFrom<u8> for ReferenceKind {
	type Error = DecodeError;

	fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
		Ok(match value {
			method_handle_reference::GET_FIELD => ReferenceKind::GetField,
			method_handle_reference::GET_STATIC => ReferenceKind::GetStatic,
			method_handle_reference::PUT_FIELD => ReferenceKind::PutField,
			method_handle_reference::PUT_STATIC => ReferenceKind::PutStatic,
			method_handle_reference::INVOKE_VIRTUAL => ReferenceKind::InvokeVirtual,
			method_handle_reference::INVOKE_STATIC => ReferenceKind::InvokeStatic,
			method_handle_reference::INVOKE_SPECIAL => ReferenceKind::InvokeSpecial,
			method_handle_reference::NEW_INVOKE_SPECIAL => ReferenceKind::NewInvokeSpecial,
			method_handle_reference::INVOKE_INTERFACE => ReferenceKind::InvokeInterface,
			kind => return Err(DecodeError::InvalidReferenceKind { kind }),
		})
	}
}

impl From<ReferenceKind> for u8 {
	fn from(value: ReferenceKind) -> Self {
		match value {
			ReferenceKind::GetField => method_handle_reference::GET_FIELD,
			ReferenceKind::GetStatic => method_handle_reference::GET_STATIC,
			ReferenceKind::PutField => method_handle_reference::PUT_FIELD,
			ReferenceKind::PutStatic => method_handle_reference::PUT_STATIC,
			ReferenceKind::InvokeVirtual => method_handle_reference::INVOKE_VIRTUAL,
			ReferenceKind::InvokeStatic => method_handle_reference::INVOKE_STATIC,
			ReferenceKind::InvokeSpecial => method_handle_reference::INVOKE_SPECIAL,
			ReferenceKind::NewInvokeSpecial => method_handle_reference::NEW_INVOKE_SPECIAL,
			ReferenceKind::InvokeInterface => method_handle_reference::INVOKE_INTERFACE,
		}
	}
}

/// Gets the entry in the slot `index`, failing for indices past the end and for empty slots.
pub(crate) fn slot<E>(entries: &[Option<E>], index: u16) -> Result<&E> {
	match entries.get(index as usize) {
		Some(Some(entry)) => Ok(entry),
		Some(None) => bail!(DecodeError::PoolIndexEmpty { index }),
		None => bail!(DecodeError::PoolIndexOutOfRange { index, size: entries.len() }),
	}
}

/// The constant pool of a class file.
///
/// The constant pool is indexed starting from `1`. The index `0`, as well as the index after a [`Constant::Long`] or
/// [`Constant::Double`] don't hold an entry.
#[derive(Clone, PartialEq)]
pub struct ConstantPool {
	/// We store a [`None`] for the zero index, as well as for the upper indices of [`Constant::Long`] and [`Constant::Double`].
	entries: Vec<Option<Constant>>,
}

impl ConstantPool {
	pub(crate) fn new(entries: Vec<Option<Constant>>) -> ConstantPool {
		ConstantPool { entries }
	}

	/// The number of slots, counting the zero slot and the upper halves of longs and doubles.
	///
	/// This is the `constant_pool_count` item of the class file, except if a [`Constant::Long`] or
	/// [`Constant::Double`] sits in the last slot. Its upper half then lies past the count, and this is one more.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if there are no slots, not even the zero slot. Use [`ConstantPool::iter`] to look for entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Gets the entry at `index`, of whatever kind it is.
	pub fn entry(&self, index: u16) -> Result<&Constant> {
		slot(&self.entries, index).pool_context(index)
	}

	/// Gets the entry at `index`, failing if it's not of kind `T`.
	pub fn get<T: PoolKind>(&self, index: u16) -> Result<&T> {
		let entry = self.entry(index)?;
		T::from_constant(entry)
			.ok_or_else(|| anyhow::Error::new(DecodeError::PoolKindMismatch { index, expected: T::NAME, got: entry.kind_name() }))
			.pool_context(index)
	}

	/// Creates a reference to the entry at `index`, failing if it's not of kind `T`.
	pub fn reference<T: PoolKind>(&self, index: u16) -> Result<PoolRef<T>> {
		self.get::<T>(index)?;
		Ok(PoolRef::new(index))
	}

	/// Returns [`None`] if `index` is zero, otherwise returns [`Some`] of the result of the function `f`.
	pub(crate) fn get_optional<'a, T: 'a>(&'a self, index: u16, f: impl Fn(&'a ConstantPool, u16) -> Result<T>) -> Result<Option<T>> {
		if index == 0 {
			Ok(None)
		} else {
			Ok(Some(f(self, index)?))
		}
	}

	/// Iterates over all the entries, together with their index.
	pub fn iter(&self) -> impl Iterator<Item = (u16, &Constant)> + '_ {
		self.entries.iter()
			.enumerate()
			.filter_map(|(index, entry)| Some((index as u16, entry.as_ref()?)))
	}

	fn render_member(&self, member: &MemberRef) -> Result<String> {
		let class = member.class.get(self)?.name.get(self)?;
		let name_and_type = member.name_and_type.get(self)?;
		Ok(format!("{class}.{}:{}", name_and_type.name.get(self)?, name_and_type.descriptor.get(self)?))
	}

	fn render(&self, entry: &Constant) -> Result<String> {
		Ok(match entry {
			Constant::Utf8(string) => format!("Utf8: {string}"),
			Constant::Integer(integer) => format!("Integer: {integer}"),
			Constant::Float(float) => format!("Float: {float}"),
			Constant::Long(long) => format!("Long: {long}"),
			Constant::Double(double) => format!("Double: {double}"),
			Constant::Class(class) => format!("Class: {}", class.name.get(self)?),
			Constant::String(string) => format!("String: {}", string.string.get(self)?),
			Constant::FieldRef(member) => format!("FieldRef: {}", self.render_member(member)?),
			Constant::MethodRef(member) => format!("MethodRef: {}", self.render_member(member)?),
			Constant::InterfaceMethodRef(member) => format!("InterfaceMethodRef: {}", self.render_member(member)?),
			Constant::NameAndType(name_and_type) => {
				format!("NameAndType: {}:{}", name_and_type.name.get(self)?, name_and_type.descriptor.get(self)?)
			},
			Constant::MethodHandle(handle) => {
				format!("MethodHandle: {:?} {}", handle.reference_kind, self.render_member(handle.reference.get(self)?)?)
			},
			Constant::MethodType(method_type) => format!("MethodType: {}", method_type.descriptor.get(self)?),
			Constant::InvokeDynamic(invoke_dynamic) => {
				let name_and_type = invoke_dynamic.name_and_type.get(self)?;
				format!("InvokeDynamic: bootstrap method {}, {}:{}",
					invoke_dynamic.bootstrap_method_attr_index,
					name_and_type.name.get(self)?,
					name_and_type.descriptor.get(self)?
				)
			},
		})
	}
}

impl Debug for ConstantPool {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let mut d = f.debug_map();

		for (index, entry) in self.iter() {
			match self.render(entry) {
				Ok(dbg) => d.entry(&index, &dbg),
				Err(e) => d.entry(&index, &e),
			};
		}

		d.finish()
	}
}
