use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;

pub trait EntityId: Copy + Eq + Hash + Debug + 'static {}

impl<T: Copy + Eq + Hash + Debug + 'static> EntityId for T {}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct EntityKey {
    pub(crate) index: u32,
}

impl EntityKey {
    pub const fn from_index(index: u32) -> EntityKey {
        EntityKey { index }
    }

    pub const fn index(&self) -> u32 {
        self.index
    }
}

impl Display for EntityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index)
    }
}

impl Debug for EntityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.index)
    }
}
