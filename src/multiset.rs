use std::fmt;

use log::{debug, trace, warn};

use crate::multiset_error::{checked_count, MultisetError, Result};
use crate::multiset_iter::{Entries, Iter};

/// Separator used by the `Display` rendering.
pub const DEFAULT_SEPARATOR: &str = ", ";

/// A bag of elements that remembers how many times each distinct value was added.
///
/// Distinct values are kept in insertion order, with their multiplicities in a
/// parallel vector. A value whose multiplicity drops to zero is removed from both.
/// The total size never exceeds `usize::MAX`; adds that would pass it are refused.
#[derive(Clone)]
pub struct Multiset<E> {
    values: Vec<E>,
    multiplicities: Vec<usize>,
    // sum of `multiplicities`
    total: usize,
}

impl<E> Multiset<E> {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            multiplicities: Vec::new(),
            total: 0,
        }
    }

    /// Total number of elements, duplicates included.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct values.
    pub fn distinct_len(&self) -> usize {
        self.values.len()
    }

    /// The distinct values, in the order they were first added.
    pub fn values(&self) -> &[E] {
        &self.values
    }

    /// Multiplicities aligned with [`Multiset::values`].
    pub fn multiplicities(&self) -> &[usize] {
        &self.multiplicities
    }

    /// Visits every element, repeating each distinct value as many times as it occurs.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(&self.values, &self.multiplicities, self.total)
    }

    /// `(value, multiplicity)` pairs in insertion order.
    pub fn entries(&self) -> Entries<'_, E> {
        Entries::new(&self.values, &self.multiplicities)
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.multiplicities.clear();
        self.total = 0;
    }

    pub(crate) fn into_parts(self) -> (Vec<E>, Vec<usize>, usize) {
        (self.values, self.multiplicities, self.total)
    }

    // Removes the entry from both vectors, keeping the order of the others.
    fn remove_at(&mut self, index: usize) -> (E, usize) {
        let value = self.values.remove(index);
        let count = self.multiplicities.remove(index);
        self.total -= count;
        (value, count)
    }
}

impl<E: PartialEq> Multiset<E> {
    /// Builds a multiset holding each of `elements` once (repeats accumulate).
    pub fn from_elements(elements: &[E]) -> Self
    where
        E: Clone,
    {
        let mut bag = Self::new();
        bag.add_all(elements.iter().cloned());
        bag
    }

    fn position(&self, element: &E) -> Option<usize> {
        self.values.iter().position(|value| value == element)
    }

    /// Adds a single occurrence of `element`.
    ///
    /// # Panics
    ///
    /// Panics if the multiset already holds `usize::MAX` elements.
    pub fn add(&mut self, element: E) {
        if !self.insert(element, 1) {
            panic!("multiset size overflow");
        }
    }

    /// Adds `count` occurrences of `element`.
    ///
    /// A zero count is inert: an absent element is not registered. A negative
    /// count, or one that would push the total size past `usize::MAX`, is
    /// rejected and the multiset is left untouched.
    pub fn add_n(&mut self, element: E, count: i64) -> Result<()> {
        let requested = count;
        let count = checked_count(count)?;
        if !self.insert(element, count) {
            warn!("rejected multiplicity argument {}: size overflow", requested);
            return Err(MultisetError::InvalidArgument { count: requested });
        }
        Ok(())
    }

    /// Adds each element once, in order.
    ///
    /// # Panics
    ///
    /// Panics if the total size would pass `usize::MAX`.
    pub fn add_all<I: IntoIterator<Item = E>>(&mut self, elements: I) {
        for element in elements {
            self.add(element);
        }
    }

    // Returns false, leaving everything untouched, when the total would overflow.
    // Every multiplicity is bounded by the total, so one check covers both.
    fn insert(&mut self, element: E, count: usize) -> bool {
        if count == 0 {
            return true;
        }
        let Some(total) = self.total.checked_add(count) else {
            return false;
        };
        self.total = total;
        match self.position(&element) {
            Some(index) => {
                self.multiplicities[index] += count;
                trace!(
                    "add: entry {} now has multiplicity {}",
                    index,
                    self.multiplicities[index]
                );
            }
            None => {
                self.values.push(element);
                self.multiplicities.push(count);
                trace!(
                    "add: new entry {} with multiplicity {}",
                    self.values.len() - 1,
                    count
                );
            }
        }
        true
    }

    /// Removes a single occurrence of `element`, returning whether one was present.
    pub fn remove(&mut self, element: &E) -> bool {
        self.take(element, 1)
    }

    /// Removes exactly `count` occurrences of `element`.
    ///
    /// Returns `Ok(false)` without touching anything when the element is absent
    /// or occurs fewer than `count` times. A negative count is an error.
    pub fn remove_n(&mut self, element: &E, count: i64) -> Result<bool> {
        let count = checked_count(count)?;
        Ok(self.take(element, count))
    }

    fn take(&mut self, element: &E, count: usize) -> bool {
        let Some(index) = self.position(element) else {
            trace!("remove: element not present");
            return false;
        };
        let present = self.multiplicities[index];
        if present < count {
            trace!(
                "remove: requested {} but entry {} only has {}",
                count,
                index,
                present
            );
            return false;
        }
        if present == count {
            self.remove_at(index);
            trace!("remove: entry {} dropped", index);
        } else {
            self.multiplicities[index] = present - count;
            self.total -= count;
            trace!(
                "remove: entry {} now has multiplicity {}",
                index,
                present - count
            );
        }
        true
    }

    /// Removes every occurrence of `element`, returning how many there were.
    pub fn remove_all(&mut self, element: &E) -> usize {
        match self.position(element) {
            Some(index) => {
                let (_, count) = self.remove_at(index);
                debug!("remove_all: dropped entry {} ({} occurrences)", index, count);
                count
            }
            None => 0,
        }
    }

    pub fn contains(&self, element: &E) -> bool {
        self.position(element).is_some()
    }

    /// Multiplicity of `element`, zero when absent.
    pub fn count(&self, element: &E) -> usize {
        self.position(element)
            .map_or(0, |index| self.multiplicities[index])
    }

    /// Adds every occurrence held by `other` to this multiset.
    ///
    /// Fails without changing `self` if the combined size would pass `usize::MAX`.
    pub fn merge(&mut self, other: &Self) -> Result<()>
    where
        E: Clone,
    {
        let Some(total) = self.total.checked_add(other.total) else {
            let count = i64::try_from(other.total).unwrap_or(i64::MAX);
            warn!("merge rejected: {} more elements would overflow", other.total);
            return Err(MultisetError::InvalidArgument { count });
        };
        for (value, count) in other.entries() {
            match self.position(value) {
                Some(index) => self.multiplicities[index] += count,
                None => {
                    self.values.push(value.clone());
                    self.multiplicities.push(count);
                }
            }
        }
        self.total = total;
        debug!(
            "merge: {} distinct values, {} elements",
            self.distinct_len(),
            self.total
        );
        Ok(())
    }
}

impl<E: fmt::Display> Multiset<E> {
    fn fmt_with<W: fmt::Write>(&self, out: &mut W, separator: &str) -> fmt::Result {
        out.write_char('[')?;
        for (i, element) in self.iter().enumerate() {
            if i > 0 {
                out.write_str(separator)?;
            }
            write!(out, "{}", element)?;
        }
        out.write_char(']')
    }

    /// Renders the expanded bag as `[a<sep>a<sep>b]`. Diagnostic output only.
    pub fn to_string_with(&self, separator: &str) -> String {
        Separated {
            bag: self,
            separator,
        }
        .to_string()
    }
}

struct Separated<'a, E> {
    bag: &'a Multiset<E>,
    separator: &'a str,
}

impl<E: fmt::Display> fmt::Display for Separated<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.bag.fmt_with(f, self.separator)
    }
}

impl<E> Default for Multiset<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for Multiset<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<E: fmt::Display> fmt::Display for Multiset<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, DEFAULT_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MultisetError;

    fn assert_aligned<E>(bag: &Multiset<E>) {
        assert_eq!(bag.values.len(), bag.multiplicities.len());
        assert!(bag.multiplicities.iter().all(|&m| m > 0));
        assert_eq!(bag.total, bag.multiplicities.iter().sum::<usize>());
    }

    #[test]
    fn add_accumulates_in_place() {
        let mut bag = Multiset::new();
        bag.add_n("a", 2).unwrap();
        bag.add("b");
        bag.add("a");

        assert_eq!(bag.values, vec!["a", "b"]);
        assert_eq!(bag.multiplicities, vec![3, 1]);
        assert_aligned(&bag);
    }

    #[test]
    fn zero_add_does_not_register() {
        let mut bag = Multiset::new();
        bag.add_n('x', 0).unwrap();

        assert!(bag.values.is_empty());
        assert!(bag.multiplicities.is_empty());
    }

    #[test]
    fn negative_add_leaves_storage_alone() {
        let mut bag = Multiset::from_elements(&[1, 2, 2]);
        let before = bag.clone();

        assert_eq!(
            bag.add_n(2, -1),
            Err(MultisetError::InvalidArgument { count: -1 })
        );
        assert_eq!(bag.values, before.values);
        assert_eq!(bag.multiplicities, before.multiplicities);
    }

    #[test]
    fn exhausted_entry_leaves_both_vectors() {
        let mut bag = Multiset::from_elements(&["a", "b", "c"]);
        assert_eq!(bag.remove_n(&"b", 1), Ok(true));

        assert_eq!(bag.values, vec!["a", "c"]);
        assert_eq!(bag.multiplicities, vec![1, 1]);
        assert_aligned(&bag);
    }

    #[test]
    fn over_removal_is_refused() {
        let mut bag = Multiset::new();
        bag.add_n("a", 3).unwrap();

        assert_eq!(bag.remove_n(&"a", 5), Ok(false));
        assert_eq!(bag.multiplicities, vec![3]);
        assert_eq!(bag.remove_n(&"a", -2), Err(MultisetError::InvalidArgument { count: -2 }));
        assert_eq!(bag.multiplicities, vec![3]);
    }

    #[test]
    fn zero_removal() {
        let mut bag = Multiset::from_elements(&[4]);
        assert_eq!(bag.remove_n(&4, 0), Ok(true));
        assert_eq!(bag.remove_n(&5, 0), Ok(false));
        assert_eq!(bag.multiplicities, vec![1]);
    }

    #[test]
    fn merge_sums_multiplicities() {
        let mut left = Multiset::from_elements(&["a", "b", "a"]);
        let right = Multiset::from_elements(&["c", "a"]);
        left.merge(&right).unwrap();

        assert_eq!(left.values, vec!["a", "b", "c"]);
        assert_eq!(left.multiplicities, vec![3, 1, 1]);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn overflowing_add_is_refused() {
        let mut bag = Multiset::new();
        bag.add_n("a", i64::MAX).unwrap();
        bag.add_n("a", i64::MAX).unwrap();
        let before = bag.clone();

        assert_eq!(
            bag.add_n("a", 2),
            Err(MultisetError::InvalidArgument { count: 2 })
        );
        assert_eq!(bag.values, before.values);
        assert_eq!(bag.multiplicities, before.multiplicities);
        assert_eq!(bag.count(&"a"), usize::MAX - 1);
        assert_aligned(&bag);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn total_is_bounded_across_entries() {
        let mut bag = Multiset::new();
        bag.add_n("a", i64::MAX).unwrap();
        bag.add_n("b", i64::MAX).unwrap();

        assert!(bag.add_n("c", 2).is_err());
        assert!(!bag.contains(&"c"));
        assert_eq!(bag.len(), usize::MAX - 1);
        assert!(!bag.is_empty());

        bag.add("c");
        assert_eq!(bag.len(), usize::MAX);
        assert!(bag.remove(&"a"));
        assert_eq!(bag.len(), usize::MAX - 1);
        assert_eq!(bag.remove_all(&"b"), i64::MAX as usize);
        assert_eq!(bag.len(), i64::MAX as usize);
        assert_aligned(&bag);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "multiset size overflow")]
    fn single_add_past_the_limit_panics() {
        let mut bag = Multiset::new();
        bag.add_n('x', i64::MAX).unwrap();
        bag.add_n('x', i64::MAX).unwrap();
        bag.add('x');
        bag.add('y');
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn overflowing_merge_changes_nothing() {
        let mut left = Multiset::new();
        left.add_n("a", i64::MAX).unwrap();
        left.add_n("b", i64::MAX).unwrap();
        let mut right = Multiset::new();
        right.add_n("a", 1).unwrap();
        right.add_n("c", 1).unwrap();
        let before = left.clone();

        assert_eq!(
            left.merge(&right),
            Err(MultisetError::InvalidArgument { count: 2 })
        );
        assert_eq!(left.values, before.values);
        assert_eq!(left.multiplicities, before.multiplicities);
        assert_eq!(left.total, before.total);
    }

    #[test]
    fn rendering() {
        let bag = Multiset::from_elements(&["a", "a", "b"]);
        assert_eq!(bag.to_string(), "[a, a, b]");
        assert_eq!(bag.to_string_with(" , "), "[a , a , b]");
        assert_eq!(Multiset::<u8>::new().to_string(), "[]");
        assert_eq!(format!("<{}>", bag), "<[a, a, b]>");
        assert_eq!(format!("{:?}", bag), r#"{"a": 2, "b": 1}"#);
    }
}
