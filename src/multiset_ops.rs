//! Trait sugar over the named `Multiset` operations.

use std::ops::{Add, AddAssign, SubAssign};

use crate::multiset::Multiset;

impl<E: PartialEq> FromIterator<E> for Multiset<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut bag = Multiset::new();
        bag.add_all(iter);
        bag
    }
}

impl<E: PartialEq> Extend<E> for Multiset<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<E: PartialEq, const N: usize> From<[E; N]> for Multiset<E> {
    fn from(elements: [E; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<E: PartialEq> From<Vec<E>> for Multiset<E> {
    fn from(elements: Vec<E>) -> Self {
        elements.into_iter().collect()
    }
}

/// `bag += element` adds one occurrence.
impl<E: PartialEq> AddAssign<E> for Multiset<E> {
    fn add_assign(&mut self, element: E) {
        self.add(element);
    }
}

/// `bag -= &element` removes one occurrence if there is one.
impl<E: PartialEq> SubAssign<&E> for Multiset<E> {
    fn sub_assign(&mut self, element: &E) {
        self.remove(element);
    }
}

impl<E: PartialEq + Clone> Add<&Multiset<E>> for &Multiset<E> {
    type Output = Multiset<E>;

    /// Multiset sum: every multiplicity of `rhs` is added to a copy of `self`.
    ///
    /// Panics if the combined size would pass `usize::MAX`; use
    /// [`Multiset::merge`] to handle that case.
    fn add(self, rhs: &Multiset<E>) -> Multiset<E> {
        let mut sum = self.clone();
        if let Err(err) = sum.merge(rhs) {
            panic!("multiset size overflow: {}", err);
        }
        sum
    }
}

// Equal when both hold the same (value, multiplicity) pairs; insertion order is ignored.
impl<E: PartialEq> PartialEq for Multiset<E> {
    fn eq(&self, other: &Self) -> bool {
        self.distinct_len() == other.distinct_len()
            && self
                .entries()
                .all(|(value, count)| other.count(value) == count)
    }
}

impl<E: Eq> Eq for Multiset<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_follow_named_methods() {
        let mut bag = Multiset::new();
        bag += "a";
        bag += "a";
        bag += "b";
        bag -= &"a";
        bag -= &"missing";

        assert_eq!(bag.count(&"a"), 1);
        assert_eq!(bag.count(&"b"), 1);
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn sum_leaves_operands_alone() {
        let left = Multiset::from([1, 2]);
        let right = Multiset::from(vec![2, 3, 3]);
        let sum = &left + &right;

        assert_eq!(sum.multiplicities(), &[1, 2, 2]);
        assert_eq!(left.len(), 2);
        assert_eq!(right.len(), 3);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: Multiset<_> = ["x", "y", "x"].into_iter().collect();
        let b: Multiset<_> = ["y", "x", "x"].into_iter().collect();
        let c: Multiset<_> = ["y", "x"].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(c, a);
    }

    #[test]
    fn extend_appends_each_once() {
        let mut bag = Multiset::from(['q']);
        bag.extend(vec!['q', 'r']);
        assert_eq!(bag.values(), &['q', 'r']);
        assert_eq!(bag.multiplicities(), &[2, 1]);
    }
}
