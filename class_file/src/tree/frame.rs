use crate::tree::pool::{ClassInfo, PoolRef};

/// A frame of the `StackMapTable` attribute.
///
/// The `offset_delta` of each frame is relative to the frame before it, see the
/// [Java Virtual Machine Specification](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html#jvms-4.7.4).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StackMapFrame {
	/// Frame types `0` to `63`, the frame type is the offset delta.
	Same {
		offset_delta: u8,
	},
	/// Frame types `64` to `127`, the offset delta is the frame type minus `64`.
	SameLocals1StackItem {
		offset_delta: u8,
		stack: VerificationType,
	},
	/// Frame type `247`.
	SameLocals1StackItemExtended {
		offset_delta: u16,
		stack: VerificationType,
	},
	/// Frame types `248` to `250`.
	Chop {
		/// The number of last locals that are absent, `251` minus the frame type.
		absent_locals: u8,
		offset_delta: u16,
	},
	/// Frame type `251`.
	SameExtended {
		offset_delta: u16,
	},
	/// Frame types `252` to `254`, the number of locals is the frame type minus `251`.
	Append {
		offset_delta: u16,
		locals: Vec<VerificationType>,
	},
	/// Frame type `255`.
	Full {
		offset_delta: u16,
		locals: Vec<VerificationType>,
		stack: Vec<VerificationType>,
	},
}

impl StackMapFrame {
	pub fn offset_delta(&self) -> u16 {
		match *self {
			StackMapFrame::Same { offset_delta } => offset_delta as u16,
			StackMapFrame::SameLocals1StackItem { offset_delta, .. } => offset_delta as u16,
			StackMapFrame::SameLocals1StackItemExtended { offset_delta, .. } => offset_delta,
			StackMapFrame::Chop { offset_delta, .. } => offset_delta,
			StackMapFrame::SameExtended { offset_delta } => offset_delta,
			StackMapFrame::Append { offset_delta, .. } => offset_delta,
			StackMapFrame::Full { offset_delta, .. } => offset_delta,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationType {
	Top,
	Integer,
	Float,
	Long,
	Double,
	Null,
	UninitializedThis,
	Object(PoolRef<ClassInfo>),
	Uninitialized {
		/// The offset of the `new` instruction that created the object.
		offset: u16,
	},
}
