use std::iter::FusedIterator;
use std::slice;

use crate::multiset::Multiset;

/// Borrowing iterator over every element of a [`Multiset`], duplicates included.
///
/// Occurrences of a distinct value are yielded back to back, values in insertion order.
#[derive(Debug)]
pub struct Iter<'a, E> {
    values: &'a [E],
    multiplicities: &'a [usize],
    index: usize,
    yielded: usize,
    remaining: usize,
}

impl<'a, E> Iter<'a, E> {
    pub(crate) fn new(values: &'a [E], multiplicities: &'a [usize], total: usize) -> Self {
        Self {
            values,
            multiplicities,
            index: 0,
            yielded: 0,
            remaining: total,
        }
    }
}

impl<E> Clone for Iter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            values: self.values,
            multiplicities: self.multiplicities,
            index: self.index,
            yielded: self.yielded,
            remaining: self.remaining,
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        let value = self.values.get(self.index)?;
        self.yielded += 1;
        if self.yielded == self.multiplicities[self.index] {
            self.index += 1;
            self.yielded = 0;
        }
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> FusedIterator for Iter<'_, E> {}

/// `(value, multiplicity)` pairs of a [`Multiset`].
#[derive(Debug)]
pub struct Entries<'a, E> {
    inner: std::iter::Zip<slice::Iter<'a, E>, slice::Iter<'a, usize>>,
}

impl<'a, E> Entries<'a, E> {
    pub(crate) fn new(values: &'a [E], multiplicities: &'a [usize]) -> Self {
        Self {
            inner: values.iter().zip(multiplicities.iter()),
        }
    }
}

impl<E> Clone for Entries<'_, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, E> Iterator for Entries<'a, E> {
    type Item = (&'a E, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, &count)| (value, count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> ExactSizeIterator for Entries<'_, E> {}

impl<E> FusedIterator for Entries<'_, E> {}

/// Owning iterator over a [`Multiset`]. The last occurrence of each value is
/// moved out, earlier ones are clones.
#[derive(Debug)]
pub struct IntoIter<E> {
    values: std::vec::IntoIter<E>,
    multiplicities: std::vec::IntoIter<usize>,
    current: Option<(E, usize)>,
    remaining: usize,
}

impl<E: Clone> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        if self.current.is_none() {
            let value = self.values.next()?;
            let count = self.multiplicities.next()?;
            self.current = Some((value, count));
        }
        let (value, count) = self.current.take()?;
        self.remaining -= 1;
        if count == 1 {
            Some(value)
        } else {
            let out = value.clone();
            self.current = Some((value, count - 1));
            Some(out)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E: Clone> ExactSizeIterator for IntoIter<E> {}

impl<E: Clone> FusedIterator for IntoIter<E> {}

impl<E: Clone> IntoIterator for Multiset<E> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> IntoIter<E> {
        let (values, multiplicities, remaining) = self.into_parts();
        IntoIter {
            values: values.into_iter(),
            multiplicities: multiplicities.into_iter(),
            current: None,
            remaining,
        }
    }
}

impl<'a, E> IntoIterator for &'a Multiset<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Iter<'a, E> {
        self.iter()
    }
}
