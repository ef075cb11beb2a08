//! A crate for decoding [Java Class Files](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html) of versions
//! `45` up to `52` (Java 8).
//!
//! Use [`parse`] to decode a class file from a byte slice, or [`read_class`] to decode one from a reader. The result is a
//! [`ClassFile`], which owns the [constant pool][tree::pool::ConstantPool]. All references to constant pool entries in the
//! tree are [typed indices][tree::pool::PoolRef] that have been checked to point to an entry of the right kind.
//!
//! Decoding is all or nothing: any structural problem gives an error, never a partial class file. The root cause of
//! such an error is a [`DecodeError`].

pub mod tree;
pub mod jstring;
mod class_reader;
mod class_constants;
mod error;

pub use error::DecodeError;

use std::io::{ErrorKind, Read};
use anyhow::{bail, Context, Result};
use crate::tree::class::ClassFile;

/// Decodes a single java class file from the bytes.
///
/// Bytes after the end of the class file structure are ignored, a warning is logged for them.
pub fn parse(bytes: &[u8]) -> Result<ClassFile> {
	let mut reader = bytes;
	let class = class_reader::read(&mut reader)?;

	if !reader.is_empty() {
		log::warn!("ignoring {} trailing bytes after the end of the class file", reader.len());
	}

	Ok(class)
}

/// Reads a single java class file from the reader.
///
/// Reading stops at the end of the class file structure, anything after it is left in the reader.
pub fn read_class(reader: &mut impl Read) -> Result<ClassFile> {
	class_reader::read(reader)
}

trait ClassRead {
	fn read_n<const N: usize>(&mut self) -> Result<[u8; N]>;
	fn read_u8(&mut self) -> Result<u8> {
		Ok(u8::from_be_bytes(self.read_n().context("couldn't read u8, perhaps the data's end is reached?")?))
	}
	fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_be_bytes(self.read_n().context("couldn't read u16, perhaps the data's end is reached?")?))
	}
	fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_n().context("couldn't read u32, perhaps the data's end is reached?")?))
	}
	fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.read_n().context("couldn't read i32, perhaps the data's end is reached?")?))
	}
	fn read_i64(&mut self) -> Result<i64> {
		Ok(i64::from_be_bytes(self.read_n().context("couldn't read i64, perhaps the data's end is reached?")?))
	}
	fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_be_bytes(self.read_n().context("couldn't read f32, perhaps the data's end is reached?")?))
	}
	fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_be_bytes(self.read_n().context("couldn't read f64, perhaps the data's end is reached?")?))
	}

	fn read_u8_as_usize(&mut self) -> Result<usize> {
		Ok(self.read_u8()? as usize)
	}
	fn read_u16_as_usize(&mut self) -> Result<usize> {
		Ok(self.read_u16()? as usize)
	}
	fn read_u32_as_usize(&mut self) -> Result<usize> {
		Ok(self.read_u32()? as usize)
	}
	fn read_u8_vec(&mut self, size: usize) -> Result<Vec<u8>>;
	fn read_vec<T, S, E>(&mut self, get_size: S, mut get_element: E) -> Result<Vec<T>>
		where
			S: FnOnce(&mut Self) -> Result<usize>,
			E: FnMut(&mut Self) -> Result<T>
	{
		let size = get_size(self)?;
		// the size isn't trusted until the elements are actually there
		let mut vec = Vec::with_capacity(size.min(256));
		for _ in 0..size {
			vec.push(get_element(self)?);
		}
		Ok(vec)
	}
}

impl<T: Read> ClassRead for T {
	fn read_n<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut buf = [0u8; N];
		match self.read_exact(&mut buf) {
			Ok(()) => Ok(buf),
			Err(e) if e.kind() == ErrorKind::UnexpectedEof => bail!(DecodeError::Truncated { wanted: N }),
			Err(e) => Err(e.into()),
		}
	}
	fn read_u8_vec(&mut self, size: usize) -> Result<Vec<u8>> {
		// going through `take` means a wrong size can't make us allocate a huge buffer up front
		let mut vec = Vec::new();
		self.by_ref().take(size as u64).read_to_end(&mut vec)?;
		if vec.len() < size {
			bail!(DecodeError::Truncated { wanted: size - vec.len() });
		}
		Ok(vec)
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::{ClassRead, DecodeError};

	#[test]
	fn big_endian() -> anyhow::Result<()> {
		let mut reader: &[u8] = &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0xff, 0xff, 0xff, 0xfe];
		assert_eq!(reader.read_u8()?, 0x01);
		assert_eq!(reader.read_u16()?, 0x0203);
		assert_eq!(reader.read_u32()?, 0x0405_0607);
		assert_eq!(reader.read_i32()?, -2);
		assert!(reader.is_empty());
		Ok(())
	}

	#[test]
	fn truncated() {
		let mut reader: &[u8] = &[0x01];
		let err = reader.read_u16().unwrap_err();
		assert_eq!(err.downcast_ref::<DecodeError>(), Some(&DecodeError::Truncated { wanted: 2 }));

		let mut reader: &[u8] = &[0x01, 0x02, 0x03];
		let err = reader.read_u8_vec(10).unwrap_err();
		assert_eq!(err.downcast_ref::<DecodeError>(), Some(&DecodeError::Truncated { wanted: 7 }));
	}

	#[test]
	fn read_vec() -> anyhow::Result<()> {
		let mut reader: &[u8] = &[0x00, 0x02, 0x00, 0x07, 0x00, 0x09, 0xaa];
		let vec = reader.read_vec(|r| r.read_u16_as_usize(), |r| r.read_u16())?;
		assert_eq!(vec, vec![7, 9]);
		assert_eq!(reader, &[0xaa]);
		Ok(())
	}

	#[test]
	fn read_vec_with_too_large_size() {
		let mut reader: &[u8] = &[0xff, 0xff, 0xff, 0xff, 0x00, 0x07];
		let err = reader.read_vec(|r| r.read_u32_as_usize(), |r| r.read_u16()).unwrap_err();
		assert_eq!(err.downcast_ref::<DecodeError>(), Some(&DecodeError::Truncated { wanted: 2 }));
	}
}
