//! Decoding the string format used in the Java Virtual Machine Specification into a [`JavaString`].
//!
//! The format is a "modified" utf8: `\0` is stored using two bytes, and characters outside of the
//! basic multilingual plane are stored as two three byte sequences, one for each half of the surrogate pair.
//!
//! See <https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html#jvms-4.4.7> for the complete specification
//! of the string format.

use anyhow::{anyhow, bail, Context, Result};
use java_string::{JavaCodePoint, JavaString};
use crate::DecodeError;

/// Decodes modified utf8 into a [`JavaString`].
///
/// Unpaired surrogates are kept as they are. Any malformed input gives a [`DecodeError::MalformedUtf8`], with the offset
/// of the byte around which the problem is. Empty input gives a [`DecodeError::EmptyUtf8`].
pub fn decode_modified_utf8(bytes: &[u8]) -> Result<JavaString> {
	if bytes.is_empty() {
		bail!(DecodeError::EmptyUtf8);
	}

	let len = bytes.len();
	let mut units: Vec<u16> = Vec::with_capacity(len);
	let mut count = 0;

	while let Some(&c) = bytes.get(count) {
		if c > 127 {
			break;
		}
		units.push(c as u16);
		count += 1;
	}

	while let Some(&c) = bytes.get(count) {
		let c = c as u16;
		match c >> 4 {
			// 0xxx_xxxx
			0..=7 => {
				count += 1;
				units.push(c);
			},
			// 110x_xxxx 10xx_xxxx
			0xC | 0xD => {
				count += 2;
				if count > len {
					bail!(DecodeError::MalformedUtf8 { offset: len });
				}
				let c2 = bytes[count - 1] as u16;
				if c2 & 0xC0 != 0x80 {
					bail!(DecodeError::MalformedUtf8 { offset: count });
				}
				units.push((c & 0x1F) << 6 | (c2 & 0x3F));
			},
			// 1110_xxxx 10xx_xxxx 10xx_xxxx
			0xE => {
				count += 3;
				if count > len {
					bail!(DecodeError::MalformedUtf8 { offset: len });
				}
				let c2 = bytes[count - 2] as u16;
				let c3 = bytes[count - 1] as u16;
				if c2 & 0xC0 != 0x80 || c3 & 0xC0 != 0x80 {
					bail!(DecodeError::MalformedUtf8 { offset: count - 1 });
				}
				units.push((c & 0x0F) << 12 | (c2 & 0x3F) << 6 | (c3 & 0x3F));
			},
			// 10xx_xxxx and 1111_xxxx
			_ => bail!(DecodeError::MalformedUtf8 { offset: count }),
		}
	}

	let mut string = JavaString::new();
	for unit in char::decode_utf16(units) {
		let code_point = match unit {
			Ok(char) => JavaCodePoint::from_char(char),
			Err(e) => {
				let surrogate = e.unpaired_surrogate();
				JavaCodePoint::from_u32(surrogate as u32)
					.with_context(|| anyhow!("unpaired surrogate {surrogate:#x} is not a java code point"))?
			},
		};
		string.push_java(code_point);
	}
	Ok(string)
}
