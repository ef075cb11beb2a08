use anyhow::{bail, Result};
use crate::{ClassRead, DecodeError};
use crate::tree::frame::{StackMapFrame, VerificationType};
use crate::tree::pool::{ClassInfo, ConstantPool};

pub(super) fn read_stack_map_frame(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<StackMapFrame> {
	Ok(match reader.read_u8()? {
		offset_delta @ 0..=63 => StackMapFrame::Same { offset_delta },
		frame_type @ 64..=127 => StackMapFrame::SameLocals1StackItem {
			offset_delta: frame_type - 64,
			stack: read_verification_type(reader, pool)?,
		},
		frame_type @ 128..=246 => bail!(DecodeError::UnknownFrameType { frame_type }),
		247 => StackMapFrame::SameLocals1StackItemExtended {
			offset_delta: reader.read_u16()?,
			stack: read_verification_type(reader, pool)?,
		},
		frame_type @ 248..=250 => StackMapFrame::Chop {
			absent_locals: 251 - frame_type,
			offset_delta: reader.read_u16()?,
		},
		251 => StackMapFrame::SameExtended {
			offset_delta: reader.read_u16()?,
		},
		frame_type @ 252..=254 => {
			let offset_delta = reader.read_u16()?;
			let count = frame_type - 251;
			let locals = reader.read_vec(
				|_| Ok(count as usize),
				|r| read_verification_type(r, pool),
			)?;
			StackMapFrame::Append { offset_delta, locals }
		},
		255 => {
			let offset_delta = reader.read_u16()?;
			let locals = reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| read_verification_type(r, pool),
			)?;
			let stack = reader.read_vec(
				|r| r.read_u16_as_usize(),
				|r| read_verification_type(r, pool),
			)?;
			StackMapFrame::Full { offset_delta, locals, stack }
		},
	})
}

fn read_verification_type(reader: &mut impl ClassRead, pool: &ConstantPool) -> Result<VerificationType> {
	Ok(match reader.read_u8()? {
		0 => VerificationType::Top,
		1 => VerificationType::Integer,
		2 => VerificationType::Float,
		3 => VerificationType::Double,
		4 => VerificationType::Long,
		5 => VerificationType::Null,
		6 => VerificationType::UninitializedThis,
		7 => VerificationType::Object(pool.reference::<ClassInfo>(reader.read_u16()?)?),
		8 => VerificationType::Uninitialized { offset: reader.read_u16()? },
		tag => bail!(DecodeError::UnknownVerificationTypeTag { tag }),
	})
}
