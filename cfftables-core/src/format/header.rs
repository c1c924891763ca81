//! The `<d>-CFF(<t>,<n>)` header
//!
//! Shape triple shared by the text dump, `Display` output and catalog
//! listings.

use core::fmt;

/// Shape and cover-free parameter of a CFF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CffHeader {
    /// Cover-free parameter
    pub d: usize,
    /// Number of rows (ground set size)
    pub t: usize,
    /// Number of columns (subsets)
    pub n: usize,
}

impl CffHeader {
    /// Create a new header
    pub const fn new(d: usize, t: usize, n: usize) -> Self {
        Self { d, t, n }
    }

    /// Total number of cells
    pub const fn cells(&self) -> Option<usize> {
        self.t.checked_mul(self.n)
    }
}

impl fmt::Display for CffHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-CFF({},{})", self.d, self.t, self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_header_display() {
        assert_eq!(format!("{}", CffHeader::new(2, 9, 12)), "2-CFF(9,12)");
        assert_eq!(format!("{}", CffHeader::new(1, 0, 0)), "1-CFF(0,0)");
    }

    #[test]
    fn test_header_cells() {
        assert_eq!(CffHeader::new(1, 4, 6).cells(), Some(24));
        assert_eq!(CffHeader::new(1, usize::MAX, 2).cells(), None);
    }
}
