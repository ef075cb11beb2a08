use java_string::JavaString;

/// The kinds of structural errors decoding a class file can run into.
///
/// Decoding functions return [`anyhow::Result`], with one of these as the root cause. Use
/// [`anyhow::Error::downcast_ref`] to find out which one it was, the error chain around it tells
/// you where in the class file it happened.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
	#[error("unexpected end of input, wanted {wanted} more bytes")]
	Truncated { wanted: usize },
	#[error("wrong magic: got {got:#x}, expected 0xCAFEBABE")]
	BadMagic { got: u32 },
	#[error("unsupported class file version {major}.{minor}")]
	UnsupportedVersion { major: u16, minor: u16 },

	#[error("constant pool index {index} out of range for pool of size {size}")]
	PoolIndexOutOfRange { index: u16, size: usize },
	#[error("constant pool index {index} points to an empty slot: either zero or the upper half of a long or double")]
	PoolIndexEmpty { index: u16 },
	#[error("constant pool entry at index {index} is `{got}`, expected `{expected}`")]
	PoolKindMismatch { index: u16, expected: &'static str, got: &'static str },
	#[error("unknown constant pool tag {tag} at pool index {index}")]
	UnknownConstantTag { tag: u8, index: usize },
	#[error("invalid `reference_kind` {kind} for `MethodHandle` pool entry")]
	InvalidReferenceKind { kind: u8 },

	#[error("malformed modified utf8 input around byte {offset}")]
	MalformedUtf8 { offset: usize },
	#[error("empty `Utf8` constant")]
	EmptyUtf8,

	#[error("unknown attribute `{name}`")]
	UnknownAttribute { name: JavaString },
	#[error("unknown `element_value` tag {tag:?}")]
	UnknownElementValueTag { tag: char },
	#[error("unknown type annotation target type {target_type:#04x}")]
	UnknownTargetType { target_type: u8 },
	#[error("invalid type path entry: kind {kind}, type argument index {type_argument_index}")]
	InvalidTypePath { kind: u8, type_argument_index: u8 },
	#[error("unknown stack map frame type {frame_type}")]
	UnknownFrameType { frame_type: u8 },
	#[error("unknown verification_type_info tag {tag}")]
	UnknownVerificationTypeTag { tag: u8 },
}
