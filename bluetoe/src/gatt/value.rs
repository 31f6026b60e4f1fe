//! Storage backing characteristic values.
//!
//! Values are owned by the application. A characteristic only holds a [`ValueStorage`] that
//! borrows them, so the application can keep updating a value while the database is live.
//!
//! [`ValueStorage`]: trait.ValueStorage.html

use {
    core::{cell::Cell, mem},
    zerocopy::{AsBytes, FromBytes},
};

/// Identity of an application-owned value.
///
/// Used to locate the characteristic a value is bound to when pushing a notification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ValueId(*const ());

impl ValueId {
    /// Returns the identity of `value`.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        ValueId(value as *const T as *const ())
    }
}

/// Fixed-size storage a characteristic value is bound to.
///
/// `read` and `write` are only ever called with byte ranges that lie inside `[0, size())`.
pub trait ValueStorage {
    /// Whether the value can be read.
    const READABLE: bool = true;

    /// Whether the value can be written.
    const WRITABLE: bool;

    /// Size of the value in bytes.
    fn size(&self) -> usize;

    /// Copies the value bytes starting at `offset` into `out`.
    fn read(&self, offset: usize, out: &mut [u8]);

    /// Stores `data` in the value starting at `offset`.
    ///
    /// Only called if `WRITABLE` is `true`. Storages that can't be written implement this as an
    /// empty function.
    fn write(&self, offset: usize, data: &[u8]);

    /// Returns the identity of the bound value.
    fn identity(&self) -> ValueId;
}

/// Read/write storage bound to an application-owned `Cell`.
///
/// The value's in-memory representation is transferred as-is, so multi-byte integers are sent in
/// the byte order of the target (little-endian on every supported MCU).
#[derive(Debug)]
pub struct BoundValue<'a, T: AsBytes + FromBytes + Copy>(&'a Cell<T>);

impl<'a, T: AsBytes + FromBytes + Copy> BoundValue<'a, T> {
    pub fn new(cell: &'a Cell<T>) -> Self {
        BoundValue(cell)
    }
}

impl<T: AsBytes + FromBytes + Copy> ValueStorage for BoundValue<'_, T> {
    const WRITABLE: bool = true;

    fn size(&self) -> usize {
        mem::size_of::<T>()
    }

    fn read(&self, offset: usize, out: &mut [u8]) {
        let value = self.0.get();
        out.copy_from_slice(&value.as_bytes()[offset..offset + out.len()]);
    }

    fn write(&self, offset: usize, data: &[u8]) {
        let mut value = self.0.get();
        value.as_bytes_mut()[offset..offset + data.len()].copy_from_slice(data);
        self.0.set(value);
    }

    fn identity(&self) -> ValueId {
        ValueId::of(self.0)
    }
}

/// Read-only storage bound to a constant.
#[derive(Debug)]
pub struct ConstValue<'a, T: AsBytes + ?Sized>(&'a T);

impl<'a, T: AsBytes + ?Sized> ConstValue<'a, T> {
    pub fn new(value: &'a T) -> Self {
        ConstValue(value)
    }
}

impl<T: AsBytes + ?Sized> ValueStorage for ConstValue<'_, T> {
    const WRITABLE: bool = false;

    fn size(&self) -> usize {
        self.0.as_bytes().len()
    }

    fn read(&self, offset: usize, out: &mut [u8]) {
        out.copy_from_slice(&self.0.as_bytes()[offset..offset + out.len()]);
    }

    fn write(&self, _offset: usize, _data: &[u8]) {}

    fn identity(&self) -> ValueId {
        ValueId::of(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_value() {
        let cell = Cell::new(0x1122_3344u32);
        let storage = BoundValue::new(&cell);
        assert_eq!(storage.size(), 4);

        let mut out = [0; 2];
        storage.read(1, &mut out);
        assert_eq!(&out[..], &0x1122_3344u32.to_ne_bytes()[1..3]);

        storage.write(0, &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(cell.get().to_ne_bytes(), [0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(storage.identity(), ValueId::of(&cell));
    }

    #[test]
    fn const_value() {
        static NAME: [u8; 3] = *b"abc";
        let storage = ConstValue::new(&NAME[..]);
        assert!(!<ConstValue<'_, [u8]> as ValueStorage>::WRITABLE);
        assert_eq!(storage.size(), 3);

        let mut out = [0; 2];
        storage.read(1, &mut out);
        assert_eq!(&out, b"bc");
    }

    /// Storage that keeps its bytes in reverse order.
    struct Reversed<'a>(&'a Cell<[u8; 4]>);

    impl ValueStorage for Reversed<'_> {
        const WRITABLE: bool = true;

        fn size(&self) -> usize {
            4
        }

        fn read(&self, offset: usize, out: &mut [u8]) {
            let mut bytes = self.0.get();
            bytes.reverse();
            out.copy_from_slice(&bytes[offset..offset + out.len()]);
        }

        fn write(&self, offset: usize, data: &[u8]) {
            let mut bytes = self.0.get();
            bytes.reverse();
            bytes[offset..offset + data.len()].copy_from_slice(data);
            bytes.reverse();
            self.0.set(bytes);
        }

        fn identity(&self) -> ValueId {
            ValueId::of(self.0)
        }
    }

    #[test]
    fn custom_storage() {
        use crate::{
            att::{AccessArgs, AccessResult},
            gatt::{AttributeList, Characteristic, Origin},
            uuid::Uuid16,
        };

        let cell = Cell::new([0u8; 4]);
        let c = Characteristic::new(Uuid16(0x2A00), Reversed(&cell));
        let value = c.attribute_at(1, Origin::START);

        let mut args = AccessArgs::write(&[1, 2], 1);
        assert_eq!(value.access(&mut args), AccessResult::WriteTruncated);
        assert_eq!(cell.get(), [0, 2, 1, 0]);

        let mut buf = [0; 4];
        let mut args = AccessArgs::read(&mut buf, 0);
        assert_eq!(value.access(&mut args), AccessResult::Success);
        assert_eq!(args.output(), &[0, 1, 2, 0]);
    }

    #[test]
    fn identities_differ() {
        let a = Cell::new(0u8);
        let b = Cell::new(0u8);
        assert_ne!(ValueId::of(&a), ValueId::of(&b));
    }
}
