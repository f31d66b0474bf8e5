//! Strided iteration.
//!
//! [`Offsets`] walks the buffer offsets a descriptor selects in row-major
//! index order (last index fastest). Element iterators are thin adapters on
//! top of it, so iteration over a sliced view follows the view's strides
//! rather than assuming contiguity.

use crate::descriptor::Descriptor;

/// Iterator over the buffer offsets of a descriptor, in row-major index order.
#[derive(Debug, Clone)]
pub struct Offsets<const N: usize> {
    extents: [usize; N],
    strides: [usize; N],
    indices: [usize; N],
    pos: usize,
    remaining: usize,
}

impl<const N: usize> Offsets<N> {
    pub fn new(desc: &Descriptor<N>) -> Self {
        Self {
            extents: *desc.extents(),
            strides: *desc.strides(),
            indices: [0; N],
            pos: desc.start(),
            remaining: desc.size(),
        }
    }

    /// Multi-dimensional index of the next offset to be yielded.
    #[inline]
    pub fn indices(&self) -> &[usize; N] {
        &self.indices
    }
}

impl<const N: usize> Iterator for Offsets<N> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.pos;
        self.remaining -= 1;

        // Advance indices (row-major order: last index changes fastest)
        for i in (0..N).rev() {
            self.indices[i] += 1;
            if self.indices[i] < self.extents[i] {
                self.pos += self.strides[i];
                break;
            }
            self.pos -= (self.indices[i] - 1) * self.strides[i];
            self.indices[i] = 0;
        }

        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const N: usize> ExactSizeIterator for Offsets<N> {}

/// Iterator over the elements of a view, in row-major index order.
#[derive(Debug, Clone)]
pub struct StridedIter<'a, T, const N: usize> {
    data: &'a [T],
    offsets: Offsets<N>,
}

impl<'a, T, const N: usize> StridedIter<'a, T, N> {
    pub(crate) fn new(data: &'a [T], desc: &Descriptor<N>) -> Self {
        Self {
            data,
            offsets: Offsets::new(desc),
        }
    }
}

impl<'a, T, const N: usize> Iterator for StridedIter<'a, T, N> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.offsets.next().map(|pos| &self.data[pos])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl<T, const N: usize> ExactSizeIterator for StridedIter<'_, T, N> {}

/// Iterator yielding `(indices, element)` pairs.
#[derive(Debug, Clone)]
pub struct StridedEnumerate<'a, T, const N: usize> {
    inner: StridedIter<'a, T, N>,
}

impl<'a, T, const N: usize> StridedEnumerate<'a, T, N> {
    pub(crate) fn new(inner: StridedIter<'a, T, N>) -> Self {
        Self { inner }
    }
}

impl<'a, T, const N: usize> Iterator for StridedEnumerate<'a, T, N> {
    type Item = ([usize; N], &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let indices = *self.inner.offsets.indices();
        let value = self.inner.next()?;
        Some((indices, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T, const N: usize> ExactSizeIterator for StridedEnumerate<'_, T, N> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_offsets() {
        let d = Descriptor::new([2, 3]);
        assert_eq!(Offsets::new(&d).collect::<Vec<_>>(), (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_strided_offsets() {
        // rows 1..3, every other column of a 4x6 array
        let d = Descriptor::from_parts(7, [2, 3], [6, 2]);
        let offs: Vec<usize> = Offsets::new(&d).collect();
        assert_eq!(offs, vec![7, 9, 11, 13, 15, 17]);
    }

    #[test]
    fn test_transposed_offsets() {
        let d = Descriptor::from_parts(0, [3, 2], [1, 3]);
        let offs: Vec<usize> = Offsets::new(&d).collect();
        assert_eq!(offs, vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_rank_zero_yields_start_once() {
        let d = Descriptor::<0>::from_parts(4, [], []);
        assert_eq!(Offsets::new(&d).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_empty_yields_nothing() {
        let d = Descriptor::new([3, 0]);
        let mut it = Offsets::new(&d);
        assert_eq!(it.len(), 0);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let d = Descriptor::new([2, 2, 2]);
        let mut it = Offsets::new(&d);
        it.next();
        it.next();
        assert_eq!(it.len(), 6);
        assert_eq!(it.indices(), &[0, 1, 0]);
    }

    #[test]
    fn test_enumerate() {
        let data = [10, 11, 12, 13];
        let d = Descriptor::new([2, 2]);
        let pairs: Vec<_> = StridedEnumerate::new(StridedIter::new(&data, &d)).collect();
        assert_eq!(pairs[0], ([0, 0], &10));
        assert_eq!(pairs[3], ([1, 1], &13));
    }
}
