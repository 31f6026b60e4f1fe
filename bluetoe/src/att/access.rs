//! The access protocol every attribute implements.
//!
//! An access is described by [`AccessArgs`] and answered with exactly one [`AccessResult`]. Reads
//! and writes are offset-aware: the value bytes `[offset, size)` take part in the transfer, which
//! is clamped to the capacity of the buffer. Comparisons never touch the value.
//!
//! [`AccessArgs`]: struct.AccessArgs.html
//! [`AccessResult`]: enum.AccessResult.html

use {
    super::{AttUuid, ErrorCode},
    crate::gatt::ClientConfigs,
};

/// Outcome of an attribute access.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessResult {
    /// The whole (remaining) value was transferred, or a comparison did not match.
    Success,
    /// The read buffer was too small to hold the remaining value.
    ReadTruncated,
    /// More bytes were offered than the value can hold. The fitting prefix was stored.
    WriteOverflow,
    /// Fewer bytes were offered than the remaining size of the value. They were stored.
    WriteTruncated,
    /// The offset points past the end of the value.
    InvalidOffset,
    /// The attribute can not be written.
    WriteNotPermitted,
    /// The attribute can not be read (or its value compared).
    ReadNotPermitted,
    /// The attribute's 128-bit type equals the one it was compared to.
    UuidEqual,
    /// The attribute's value equals the one it was compared to.
    ValueEqual,
}

impl AccessResult {
    /// Returns the ATT error code a server should respond with, if this result is an error.
    ///
    /// Truncated reads are not errors: the client continues with a *Read Blob* request.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            AccessResult::Success
            | AccessResult::ReadTruncated
            | AccessResult::UuidEqual
            | AccessResult::ValueEqual => None,
            AccessResult::WriteOverflow | AccessResult::WriteTruncated => {
                Some(ErrorCode::InvalidAttributeValueLength)
            }
            AccessResult::InvalidOffset => Some(ErrorCode::InvalidOffset),
            AccessResult::WriteNotPermitted => Some(ErrorCode::WriteNotPermitted),
            AccessResult::ReadNotPermitted => Some(ErrorCode::ReadNotPermitted),
        }
    }
}

/// The kind of access requested.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
    /// A write that transfers no data and only checks whether writing would be permitted.
    CheckWrite,
    Compare128BitUuid,
    CompareValue,
}

impl AccessKind {
    /// Returns whether this access would modify the attribute value.
    pub fn is_write(&self) -> bool {
        match self {
            AccessKind::Write | AccessKind::CheckWrite => true,
            _ => false,
        }
    }
}

#[derive(Debug)]
enum Access<'b> {
    Read(&'b mut [u8]),
    Write(&'b [u8]),
    CheckWrite,
    Compare128BitUuid(&'b [u8; 16]),
    CompareValue(&'b [u8]),
}

/// Arguments of a single attribute access.
///
/// The buffer size is the capacity of the buffer before the access and the number of bytes read
/// or written after it.
#[derive(Debug)]
pub struct AccessArgs<'b> {
    access: Access<'b>,
    offset: usize,
    buffer_size: usize,
    client_configs: ClientConfigs<'b>,
}

impl<'b> AccessArgs<'b> {
    fn new(access: Access<'b>, buffer_size: usize, offset: usize) -> Self {
        Self {
            access,
            offset,
            buffer_size,
            client_configs: ClientConfigs::none(),
        }
    }

    /// Read the value starting at `offset` into `buffer`.
    pub fn read(buffer: &'b mut [u8], offset: usize) -> Self {
        let capacity = buffer.len();
        Self::new(Access::Read(buffer), capacity, offset)
    }

    /// Write `data` into the value starting at `offset`.
    pub fn write(data: &'b [u8], offset: usize) -> Self {
        Self::new(Access::Write(data), data.len(), offset)
    }

    /// Check whether a write at `offset` would be permitted, without writing anything.
    pub fn check_write(offset: usize) -> Self {
        Self::new(Access::CheckWrite, 0, offset)
    }

    /// Compare the attribute's 128-bit type with `uuid`, given in little-endian wire order.
    pub fn compare_128bit_uuid(uuid: &'b [u8; 16]) -> Self {
        Self::new(Access::Compare128BitUuid(uuid), 16, 0)
    }

    /// Compare the value bytes starting at `offset` with `value`.
    pub fn compare_value(value: &'b [u8], offset: usize) -> Self {
        Self::new(Access::CompareValue(value), value.len(), offset)
    }

    /// Attaches the client configuration slots of the connection performing the access.
    pub fn with_client_configs(mut self, configs: ClientConfigs<'b>) -> Self {
        self.client_configs = configs;
        self
    }

    pub fn kind(&self) -> AccessKind {
        match self.access {
            Access::Read(_) => AccessKind::Read,
            Access::Write(_) => AccessKind::Write,
            Access::CheckWrite => AccessKind::CheckWrite,
            Access::Compare128BitUuid(_) => AccessKind::Compare128BitUuid,
            Access::CompareValue(_) => AccessKind::CompareValue,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Buffer capacity before the access, bytes transferred after it.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Returns the bytes produced by a read access.
    ///
    /// Empty for all other kinds of access.
    pub fn output(&self) -> &[u8] {
        match &self.access {
            Access::Read(buffer) => &buffer[..self.buffer_size],
            _ => &[],
        }
    }

    /// Returns the client configuration slots of the connection performing the access.
    pub fn client_configs(&mut self) -> &mut ClientConfigs<'b> {
        &mut self.client_configs
    }

    /// Serves a read-only value of `size` bytes.
    ///
    /// `read(offset, out)` must fill `out` with the value bytes starting at `offset`; it is only
    /// called with ranges inside the value. Reads and value comparisons are answered, 128-bit UUID
    /// comparisons never match and writes are rejected.
    pub fn read_with<F>(&mut self, size: usize, mut read: F) -> AccessResult
    where
        F: FnMut(usize, &mut [u8]),
    {
        let offset = self.offset;
        match &mut self.access {
            Access::Read(buffer) => {
                if offset > size {
                    self.buffer_size = 0;
                    return AccessResult::InvalidOffset;
                }

                let remaining = size - offset;
                let len = remaining.min(buffer.len());
                read(offset, &mut buffer[..len]);
                self.buffer_size = len;

                if len == remaining {
                    AccessResult::Success
                } else {
                    AccessResult::ReadTruncated
                }
            }
            Access::CompareValue(candidate) => {
                if offset > size {
                    return AccessResult::InvalidOffset;
                }
                if candidate.len() != size - offset {
                    return AccessResult::Success;
                }

                let mut chunk = [0; 16];
                for (i, expected) in candidate.chunks(chunk.len()).enumerate() {
                    let chunk = &mut chunk[..expected.len()];
                    read(offset + i * 16, chunk);
                    if chunk != expected {
                        return AccessResult::Success;
                    }
                }

                AccessResult::ValueEqual
            }
            Access::Compare128BitUuid(_) => AccessResult::Success,
            Access::Write(_) | Access::CheckWrite => AccessResult::WriteNotPermitted,
        }
    }

    /// Serves a read-only value stored as a byte slice.
    pub fn read_slice(&mut self, value: &[u8]) -> AccessResult {
        self.read_with(value.len(), |offset, out| {
            out.copy_from_slice(&value[offset..offset + out.len()])
        })
    }

    /// Serves a write-only value of `size` bytes.
    ///
    /// `write(offset, data)` must store `data` starting at `offset`; it is only called with ranges
    /// inside the value. Reads and comparisons are rejected.
    pub fn write_with<F>(&mut self, size: usize, write: F) -> AccessResult
    where
        F: FnOnce(usize, &[u8]),
    {
        let offset = self.offset;
        match &self.access {
            Access::Write(data) => {
                if offset > size {
                    self.buffer_size = 0;
                    return AccessResult::InvalidOffset;
                }

                let remaining = size - offset;
                let len = remaining.min(data.len());
                write(offset, &data[..len]);
                self.buffer_size = len;

                if data.len() > remaining {
                    AccessResult::WriteOverflow
                } else if data.len() < remaining {
                    AccessResult::WriteTruncated
                } else {
                    AccessResult::Success
                }
            }
            Access::CheckWrite => {
                if offset > size {
                    AccessResult::InvalidOffset
                } else {
                    AccessResult::Success
                }
            }
            Access::Read(_) | Access::CompareValue(_) | Access::Compare128BitUuid(_) => {
                AccessResult::ReadNotPermitted
            }
        }
    }

    /// Answers a 128-bit UUID comparison against the attribute type `uuid`.
    ///
    /// 16-bit types never match. All other kinds of access return `Success`.
    pub fn compare_128bit_uuid_with(&self, uuid: &AttUuid) -> AccessResult {
        match (&self.access, uuid) {
            (Access::Compare128BitUuid(candidate), AttUuid::Uuid128(uuid))
                if uuid.to_le_bytes() == **candidate =>
            {
                AccessResult::UuidEqual
            }
            _ => AccessResult::Success,
        }
    }
}
