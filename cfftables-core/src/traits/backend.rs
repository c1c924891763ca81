//! Read-only storage access for packed bit matrices
//!
//! Views are built over the raw bytes of a matrix; this trait is the only
//! way those bytes leave their owner, and it never hands out `&mut`.

/// Trait for types exposing a row-major packed bit buffer
///
/// Bit `(r, c)` lives at bit offset `r * row_pitch() + c`, least significant
/// bit first within each byte.
pub trait BitStorage {
    /// Get a slice of the underlying data
    fn as_bytes(&self) -> &[u8];

    /// Bits per stored row
    fn row_pitch(&self) -> usize;

    /// Get the size of the data in bytes
    fn size(&self) -> usize {
        self.as_bytes().len()
    }

    /// Read the bit at an absolute bit offset
    ///
    /// The offset is not validated against the logical matrix shape.
    #[inline]
    fn bit_at(&self, offset: usize) -> bool {
        (self.as_bytes()[offset >> 3] >> (offset & 7)) & 1 == 1
    }
}
