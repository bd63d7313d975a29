use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd, Default)]
pub struct ComponentType {
    pub(crate) index: u16,
}

impl ComponentType {
    pub const fn new(index: u16) -> ComponentType {
        ComponentType { index }
    }

    pub const fn index(&self) -> u16 {
        self.index
    }
}

impl Display for ComponentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.index)
    }
}

impl From<u16> for ComponentType {
    fn from(index: u16) -> Self {
        ComponentType { index }
    }
}
