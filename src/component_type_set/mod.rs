mod bits;
mod sorted;

pub use bits::ComponentTypeBits;
pub use sorted::SortedComponentTypes;

use std::fmt::Debug;
use std::hash::Hash;

pub trait ComponentTypeSet: Default + Clone + Eq + Hash + Debug + 'static {
    type Key: Copy + Eq + Hash + Debug + 'static;

    fn create() -> Self {
        Self::default()
    }

    fn from_keys(keys: impl IntoIterator<Item = Self::Key>) -> Self {
        let mut set = Self::create();
        set.add_all(keys);
        set
    }

    /// Returns `false` if the key was already present.
    fn add(&mut self, key: Self::Key) -> bool;

    /// Returns `false` if the key was absent.
    fn remove(&mut self, key: Self::Key) -> bool;

    fn add_all(&mut self, keys: impl IntoIterator<Item = Self::Key>) {
        for key in keys {
            self.add(key);
        }
    }

    fn remove_all(&mut self, keys: impl IntoIterator<Item = Self::Key>) {
        for key in keys {
            self.remove(key);
        }
    }

    fn contains(&self, key: Self::Key) -> bool;

    fn contains_all(&self, subset: &Self) -> bool;

    fn overlaps(&self, other: &Self) -> bool;

    fn overlaps_keys(&self, keys: &[Self::Key]) -> bool {
        keys.iter().any(|key| self.contains(*key))
    }

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize {
        self.iter().count()
    }

    fn iter(&self) -> impl Iterator<Item = Self::Key> + '_;
}
