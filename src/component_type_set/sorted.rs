use crate::component_type_set::ComponentTypeSet;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SortedComponentTypes<K> {
    keys: Vec<K>,
}

impl<K> Default for SortedComponentTypes<K> {
    fn default() -> Self {
        Self { keys: vec![] }
    }
}

impl<K> ComponentTypeSet for SortedComponentTypes<K>
where
    K: Copy + Ord + Hash + Debug + 'static,
{
    type Key = K;

    fn add(&mut self, key: K) -> bool {
        match self.keys.binary_search(&key) {
            Ok(_) => false,
            Err(position) => {
                self.keys.insert(position, key);
                true
            }
        }
    }

    fn remove(&mut self, key: K) -> bool {
        match self.keys.binary_search(&key) {
            Ok(position) => {
                self.keys.remove(position);
                true
            }
            Err(_) => false,
        }
    }

    fn contains(&self, key: K) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    fn contains_all(&self, subset: &Self) -> bool {
        subset.keys.iter().all(|key| self.contains(*key))
    }

    fn overlaps(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self.keys.iter().peekable(), other.keys.iter().peekable());
        while let (Some(x), Some(y)) = (a.peek(), b.peek()) {
            match x.cmp(y) {
                Ordering::Less => {
                    a.next();
                }
                Ordering::Greater => {
                    b.next();
                }
                Ordering::Equal => return true,
            }
        }
        false
    }

    fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.keys.iter().copied()
    }
}
