//! Pending-jump lists for backpatching
//!
//! A [`JumpList`] records the indices of jump quads whose target is not known yet.
//! Lists are merged as control-flow branches join and are consumed when the target
//! becomes known (see [`CodegenSession::backpatch`]). Both operations take the list
//! by value, so a spent list cannot be merged or patched again.
//!
//! [`CodegenSession::backpatch`]: crate::codegen::CodegenSession::backpatch

/// Owned list of instruction indices awaiting a jump target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpList {
    indices: Vec<usize>,
}

impl JumpList {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// List holding one pending instruction
    pub fn singleton(index: usize) -> Self {
        Self {
            indices: vec![index],
        }
    }

    /// Concatenate two lists; `other`'s indices follow `self`'s
    pub fn merge(mut self, mut other: JumpList) -> JumpList {
        if self.indices.is_empty() {
            return other;
        }
        self.indices.append(&mut other.indices);
        self
    }

    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Hand the indices over for resolution
    pub(crate) fn into_indices(self) -> Vec<usize> {
        self.indices
    }
}

/// Free-function form of [`JumpList::merge`], mirroring how grammar actions combine lists
pub fn merge(a: JumpList, b: JumpList) -> JumpList {
    a.merge(b)
}

impl Extend<usize> for JumpList {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.indices.extend(iter);
    }
}

impl FromIterator<usize> for JumpList {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for JumpList {
    type Item = usize;
    type IntoIter = std::vec::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use test_log::test;

    fn index_set(list: &JumpList) -> BTreeSet<usize> {
        list.iter().collect()
    }

    #[test]
    fn test_singleton() {
        let list = JumpList::singleton(7);
        assert_eq!(list.len(), 1);
        assert!(list.contains(7));
    }

    #[test]
    fn test_merge_identity() {
        let list: JumpList = [3, 4].into_iter().collect();
        assert_eq!(merge(JumpList::new(), list.clone()), list);
        assert_eq!(merge(list.clone(), JumpList::new()), list);
        assert!(merge(JumpList::new(), JumpList::new()).is_empty());
    }

    #[test]
    fn test_merge_keeps_order() {
        let merged = merge(
            JumpList::singleton(2),
            merge(JumpList::singleton(9), JumpList::singleton(5)),
        );
        assert_eq!(merged.into_iter().collect::<Vec<_>>(), vec![2, 9, 5]);
    }

    #[test]
    fn test_merge_associative_index_set() {
        let a = || JumpList::singleton(1);
        let b = || JumpList::from_iter([4, 6]);
        let c = || JumpList::singleton(10);

        let left = merge(merge(a(), b()), c());
        let right = merge(a(), merge(b(), c()));
        assert_eq!(index_set(&left), index_set(&right));
    }

    #[test]
    fn test_extend() {
        let mut list = JumpList::singleton(1);
        list.extend([2, 3]);
        list.push(4);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }
}
