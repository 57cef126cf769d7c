//! Stream callback contract
//!
//! The binding layer reads streamed resources through [`InputStream`], a
//! four-callback interface mirroring what native media libraries expect:
//! read, seek, tell and size, each returning a negative value on error.
//! [`StreamAdapter`] satisfies it for any `Read + Seek`.

use std::io::{Read, Seek, SeekFrom};

/// Callbacks the binding layer invokes while loading from a stream
///
/// All calls happen synchronously during a single blocking native call.
pub trait InputStream {
    /// Read up to `buffer.len()` bytes, returning the count or -1
    fn read(&mut self, buffer: &mut [u8]) -> i64;

    /// Move to an absolute position, returning it or -1
    fn seek(&mut self, position: u64) -> i64;

    /// Current position or -1
    fn tell(&mut self) -> i64;

    /// Total size in bytes or -1
    fn size(&mut self) -> i64;
}

/// Adapts a `Read + Seek` to the [`InputStream`] callbacks
///
/// The adapter only borrows the stream; it is meant to live for the
/// duration of one factory call.
pub struct StreamAdapter<'a, S: Read + Seek + ?Sized> {
    stream: &'a mut S,
}

impl<'a, S: Read + Seek + ?Sized> StreamAdapter<'a, S> {
    /// Wrap a stream for the duration of one native call
    pub fn new(stream: &'a mut S) -> Self {
        Self { stream }
    }
}

impl<S: Read + Seek + ?Sized> InputStream for StreamAdapter<'_, S> {
    fn read(&mut self, buffer: &mut [u8]) -> i64 {
        self.stream
            .read(buffer)
            .map_or(-1, |count| i64::try_from(count).unwrap_or(-1))
    }

    fn seek(&mut self, position: u64) -> i64 {
        self.stream
            .seek(SeekFrom::Start(position))
            .map_or(-1, |pos| i64::try_from(pos).unwrap_or(-1))
    }

    fn tell(&mut self) -> i64 {
        self.stream
            .stream_position()
            .map_or(-1, |pos| i64::try_from(pos).unwrap_or(-1))
    }

    fn size(&mut self) -> i64 {
        let Ok(current) = self.stream.stream_position() else {
            return -1;
        };
        let size = self.stream.seek(SeekFrom::End(0));
        if self.stream.seek(SeekFrom::Start(current)).is_err() {
            return -1;
        }
        size.map_or(-1, |size| i64::try_from(size).unwrap_or(-1))
    }
}

/// Bytes requested from the stream per read callback
const READ_CHUNK: usize = 64 * 1024;

/// Pull the whole stream into memory through the callbacks
///
/// The reported size is only trusted as an upper bound; the buffer grows
/// with the bytes actually delivered.
pub(crate) fn read_all(stream: &mut dyn InputStream) -> Option<Vec<u8>> {
    let size = usize::try_from(stream.size()).ok()?;
    if stream.seek(0) != 0 {
        return None;
    }

    let mut data = Vec::with_capacity(size.min(READ_CHUNK));
    let mut chunk = vec![0u8; size.clamp(1, READ_CHUNK)];
    while data.len() < size {
        let wanted = (size - data.len()).min(chunk.len());
        let count = usize::try_from(stream.read(&mut chunk[..wanted])).ok()?;
        if count == 0 {
            break;
        }
        data.extend_from_slice(&chunk[..count.min(wanted)]);
    }

    if data.len() == size {
        Some(data)
    } else {
        log::error!("Stream ended after {} of {size} bytes", data.len());
        None
    }
}
