//! Read-only projections of a CFF's matrix
//!
//! Each view borrows its [`Cff`] and caches the shape and row pitch at
//! construction. Items are computed from the packed bytes on every access;
//! nothing is materialized between calls.
//!
//! | view        | length | item                                 | negative index |
//! |-------------|--------|--------------------------------------|----------------|
//! | [`Rows`]    | `t`    | `n` bits of a row                    | wraps          |
//! | [`Cols`]    | `n`    | `t` bits of a column                 | wraps          |
//! | [`Subsets`] | `n`    | ascending rows set in a column       | rejected       |
//! | [`Pools`]   | `t`    | ascending columns set in a row       | wraps          |

use std::iter::FusedIterator;

use cfftables_core::{normalize_index, BitStorage};

use crate::cff::Cff;
use crate::error::{Error, Result};

/// Common shape of the four views
pub trait View: Copy {
    type Item;

    /// Number of items
    fn len(&self) -> usize;

    /// Item at an index already known to be in range
    fn fetch(&self, index: usize) -> Self::Item;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Restartable iterator over a view, ascending by index
#[derive(Debug, Clone)]
pub struct ViewIter<V> {
    view: V,
    front: usize,
    back: usize,
}

impl<V: View> ViewIter<V> {
    fn new(view: V) -> Self {
        Self {
            view,
            front: 0,
            back: view.len(),
        }
    }
}

impl<V: View> Iterator for ViewIter<V> {
    type Item = V::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = self.view.fetch(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<V: View> DoubleEndedIterator for ViewIter<V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.view.fetch(self.back))
    }
}

impl<V: View> ExactSizeIterator for ViewIter<V> {}

impl<V: View> FusedIterator for ViewIter<V> {}

/// Generates construction, checked indexing and iteration for a view.
/// `$wrap` selects whether negative indices count from the end.
macro_rules! view_accessors {
    ($view:ident, $item:ty, $len:ident, $wrap:expr) => {
        impl<'a> $view<'a> {
            pub(crate) fn new(cff: &'a Cff) -> Self {
                let matrix = cff.matrix();
                Self {
                    cff,
                    t: matrix.rows(),
                    n: matrix.cols(),
                    pitch: matrix.row_pitch(),
                }
            }

            /// Number of items
            pub fn len(&self) -> usize {
                self.$len
            }

            pub fn is_empty(&self) -> bool {
                self.$len == 0
            }

            /// Checked indexing
            pub fn get(&self, index: isize) -> Result<$item> {
                let resolved = resolve(index, self.$len, $wrap)?;
                Ok(self.at(resolved))
            }

            /// Fresh iterator from the first item
            pub fn iter(&self) -> ViewIter<Self> {
                ViewIter::new(*self)
            }

            #[inline]
            fn bit(&self, row: usize, col: usize) -> bool {
                self.cff.matrix().bit_at(row * self.pitch + col)
            }
        }

        impl View for $view<'_> {
            type Item = $item;

            fn len(&self) -> usize {
                self.$len
            }

            fn fetch(&self, index: usize) -> $item {
                self.at(index)
            }
        }

        impl<'a> IntoIterator for $view<'a> {
            type Item = $item;
            type IntoIter = ViewIter<$view<'a>>;

            fn into_iter(self) -> Self::IntoIter {
                ViewIter::new(self)
            }
        }

        impl<'a> IntoIterator for &$view<'a> {
            type Item = $item;
            type IntoIter = ViewIter<$view<'a>>;

            fn into_iter(self) -> Self::IntoIter {
                ViewIter::new(*self)
            }
        }
    };
}

fn resolve(index: isize, len: usize, wrap: bool) -> Result<usize> {
    if index < 0 && !wrap {
        return Err(Error::index(index, len));
    }
    normalize_index(index, len).map_err(|_| Error::index(index, len))
}

/// Rows of the matrix as `n` bits each
#[derive(Debug, Clone, Copy)]
pub struct Rows<'a> {
    cff: &'a Cff,
    t: usize,
    n: usize,
    pitch: usize,
}

impl Rows<'_> {
    fn at(&self, row: usize) -> Vec<u8> {
        (0..self.n).map(|c| u8::from(self.bit(row, c))).collect()
    }
}

view_accessors!(Rows, Vec<u8>, t, true);

/// Columns of the matrix as `t` bits each
#[derive(Debug, Clone, Copy)]
pub struct Cols<'a> {
    cff: &'a Cff,
    t: usize,
    n: usize,
    pitch: usize,
}

impl Cols<'_> {
    fn at(&self, col: usize) -> Vec<u8> {
        (0..self.t).map(|r| u8::from(self.bit(r, col))).collect()
    }
}

view_accessors!(Cols, Vec<u8>, n, true);

/// Each column as the ascending set of rows it contains
#[derive(Debug, Clone, Copy)]
pub struct Subsets<'a> {
    cff: &'a Cff,
    t: usize,
    n: usize,
    pitch: usize,
}

impl Subsets<'_> {
    fn at(&self, col: usize) -> Vec<usize> {
        (0..self.t).filter(|&r| self.bit(r, col)).collect()
    }
}

// Subset numbers are not axis positions, so no wraparound here
view_accessors!(Subsets, Vec<usize>, n, false);

/// Each row as the ascending set of columns containing it, i.e. the pool a
/// ground-set element is tested in
#[derive(Debug, Clone, Copy)]
pub struct Pools<'a> {
    cff: &'a Cff,
    t: usize,
    n: usize,
    pitch: usize,
}

impl Pools<'_> {
    fn at(&self, row: usize) -> Vec<usize> {
        (0..self.n).filter(|&c| self.bit(row, c)).collect()
    }
}

view_accessors!(Pools, Vec<usize>, t, true);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sample() -> Cff {
        // 3 x 5 with a non-byte-aligned pitch
        let mut cff = Cff::all_zeros(1, 3, 5).unwrap();
        for (r, c) in [(0, 0), (0, 3), (1, 1), (1, 4), (2, 0), (2, 2)] {
            cff.set(r, c, 1).unwrap();
        }
        cff
    }

    #[test]
    fn test_rows_and_cols() {
        let cff = sample();
        let rows = cff.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.get(1).unwrap(), vec![0, 1, 0, 0, 1]);
        assert_eq!(rows.get(-1).unwrap(), vec![1, 0, 1, 0, 0]);
        assert_eq!(rows.get(3).unwrap_err().kind(), ErrorKind::IndexError);

        let cols = cff.cols();
        assert_eq!(cols.len(), 5);
        assert_eq!(cols.get(0).unwrap(), vec![1, 0, 1]);
        assert_eq!(cols.get(-5).unwrap(), vec![1, 0, 1]);
        assert_eq!(cols.get(-6).unwrap_err().kind(), ErrorKind::IndexError);
    }

    #[test]
    fn test_subsets_reject_negative_index() {
        let cff = sample();
        let subsets = cff.subsets();
        assert_eq!(subsets.get(0).unwrap(), vec![0, 2]);
        assert_eq!(subsets.get(4).unwrap(), vec![1]);
        assert_eq!(subsets.get(-1).unwrap_err().kind(), ErrorKind::IndexError);
        assert_eq!(subsets.get(5).unwrap_err().kind(), ErrorKind::IndexError);
    }

    #[test]
    fn test_pools_wrap() {
        let cff = sample();
        let pools = cff.pools();
        assert_eq!(pools.get(0).unwrap(), vec![0, 3]);
        assert_eq!(pools.get(-2).unwrap(), vec![1, 4]);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let cff = sample();
        let pools = cff.pools();
        let first: Vec<_> = pools.iter().collect();
        let second: Vec<_> = pools.iter().collect();
        assert_eq!(first, second);
        assert_eq!(pools.iter().len(), 3);
        assert_eq!(pools.iter().rev().next(), Some(vec![0, 2]));

        let mut count = 0;
        for subset in &cff.subsets() {
            assert!(!subset.is_empty());
            count += 1;
        }
        assert_eq!(count, 5);
    }

    #[test]
    fn test_views_see_later_writes() {
        let mut cff = sample();
        assert_eq!(cff.cols().get(2).unwrap(), vec![0, 0, 1]);
        cff.set(0, 2, 1).unwrap();
        assert_eq!(cff.cols().get(2).unwrap(), vec![1, 0, 1]);
        assert_eq!(cff.subsets().get(2).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_empty_views() {
        let cff = Cff::all_zeros(1, 0, 0).unwrap();
        assert!(cff.rows().is_empty());
        assert_eq!(cff.subsets().iter().count(), 0);
        assert_eq!(cff.rows().get(-1).unwrap_err().kind(), ErrorKind::IndexError);
    }
}
