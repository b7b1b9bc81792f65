use std::io::{self, Read, Seek, SeekFrom};

use crate::tree::{Result, TreeError};

/// Positioned little-endian byte source consumed by the decoder.
///
/// Positions are absolute offsets from the start of the source, and alignment
/// is measured against them.
pub trait ByteSource {
	/// Return current byte offset.
	fn position(&self) -> u64;

	/// Move to an absolute byte offset.
	fn set_position(&mut self, pos: u64) -> Result<()>;

	/// Fill `buf` completely and advance.
	fn read_into(&mut self, buf: &mut [u8]) -> Result<()>;

	/// Advance `n` bytes without reading them.
	fn skip(&mut self, n: u64) -> Result<()>;

	/// Read exactly `n` bytes into an owned buffer.
	fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
		let mut out = vec![0_u8; n];
		self.read_into(&mut out)?;
		Ok(out)
	}

	/// Skip to the next 4-byte aligned position.
	fn align4(&mut self) -> Result<()> {
		let pad = (4 - self.position() % 4) % 4;
		if pad == 0 {
			return Ok(());
		}
		self.skip(pad)
	}

	/// Read an `i8`.
	fn read_i8(&mut self) -> Result<i8> {
		Ok(self.read_u8()? as i8)
	}

	/// Read a `u8`.
	fn read_u8(&mut self) -> Result<u8> {
		let mut buf = [0_u8; 1];
		self.read_into(&mut buf)?;
		Ok(buf[0])
	}

	/// Read a little-endian `i16`.
	fn read_i16(&mut self) -> Result<i16> {
		let mut buf = [0_u8; 2];
		self.read_into(&mut buf)?;
		Ok(i16::from_le_bytes(buf))
	}

	/// Read a little-endian `u16`.
	fn read_u16(&mut self) -> Result<u16> {
		let mut buf = [0_u8; 2];
		self.read_into(&mut buf)?;
		Ok(u16::from_le_bytes(buf))
	}

	/// Read a little-endian `i32`.
	fn read_i32(&mut self) -> Result<i32> {
		let mut buf = [0_u8; 4];
		self.read_into(&mut buf)?;
		Ok(i32::from_le_bytes(buf))
	}

	/// Read a little-endian `u32`.
	fn read_u32(&mut self) -> Result<u32> {
		let mut buf = [0_u8; 4];
		self.read_into(&mut buf)?;
		Ok(u32::from_le_bytes(buf))
	}

	/// Read a little-endian `i64`.
	fn read_i64(&mut self) -> Result<i64> {
		let mut buf = [0_u8; 8];
		self.read_into(&mut buf)?;
		Ok(i64::from_le_bytes(buf))
	}

	/// Read a little-endian `u64`.
	fn read_u64(&mut self) -> Result<u64> {
		let mut buf = [0_u8; 8];
		self.read_into(&mut buf)?;
		Ok(u64::from_le_bytes(buf))
	}

	/// Read a little-endian `f32`.
	fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_bits(self.read_u32()?))
	}

	/// Read a little-endian `f64`.
	fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_bits(self.read_u64()?))
	}
}

/// Bounded cursor over an immutable byte slice.
///
/// Padding skips may move the position past the end; only reads fail there.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(TreeError::UnexpectedEof {
				at: self.pos as u64,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}
}

impl ByteSource for Cursor<'_> {
	fn position(&self) -> u64 {
		self.pos as u64
	}

	fn set_position(&mut self, pos: u64) -> Result<()> {
		let len = self.bytes.len() as u64;
		if pos > len {
			return Err(TreeError::SeekOutOfRange { pos, len });
		}
		self.pos = pos as usize;
		Ok(())
	}

	fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
		let raw = self.read_exact(buf.len())?;
		buf.copy_from_slice(raw);
		Ok(())
	}

	fn skip(&mut self, n: u64) -> Result<()> {
		self.pos = self.pos.saturating_add(n as usize);
		Ok(())
	}

	fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
		Ok(self.read_exact(n)?.to_vec())
	}
}

/// Byte source over any seekable reader, tracking its own position.
pub struct StreamReader<R> {
	inner: R,
	pos: u64,
}

impl<R: Read + Seek> StreamReader<R> {
	/// Wrap `inner`, starting at its current stream position.
	pub fn new(mut inner: R) -> Result<Self> {
		let pos = inner.stream_position()?;
		Ok(Self { inner, pos })
	}

	/// Unwrap the underlying reader.
	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl<R: Read + Seek> ByteSource for StreamReader<R> {
	fn position(&self) -> u64 {
		self.pos
	}

	fn set_position(&mut self, pos: u64) -> Result<()> {
		self.pos = self.inner.seek(SeekFrom::Start(pos))?;
		Ok(())
	}

	fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
		if let Err(err) = self.inner.read_exact(buf) {
			// A failed read_exact may still have consumed part of the stream.
			if let Ok(pos) = self.inner.stream_position() {
				self.pos = pos;
			}
			return Err(err.into());
		}
		self.pos += buf.len() as u64;
		Ok(())
	}

	fn skip(&mut self, n: u64) -> Result<()> {
		let offset = i64::try_from(n).map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "skip distance overflows i64"))?;
		// `seek_relative` preserves a `BufReader` buffer.
		self.inner.seek_relative(offset)?;
		self.pos = self.pos.saturating_add(n);
		Ok(())
	}

	fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
		let mut out = Vec::new();
		(&mut self.inner).take(n as u64).read_to_end(&mut out)?;
		self.pos += out.len() as u64;
		if out.len() < n {
			return Err(TreeError::UnexpectedEof {
				at: self.pos,
				need: n - out.len(),
				rem: 0,
			});
		}
		Ok(out)
	}
}
