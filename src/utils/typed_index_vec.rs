use std::marker::PhantomData;

pub trait TiVecKey {
    fn from_index(index: usize) -> Self;
    fn as_index(&self) -> usize;
}

pub struct TiVec<K, T> {
    pd: PhantomData<K>,
    inner: Vec<T>,
}

impl<K, T> Default for TiVec<K, T> {
    fn default() -> Self {
        TiVec::new()
    }
}

impl<K, T> TiVec<K, T> {
    pub(crate) fn new() -> TiVec<K, T> {
        TiVec {
            pd: Default::default(),
            inner: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: TiVecKey, V> TiVec<K, V> {
    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key.as_index())
    }

    pub fn push_with_key(&mut self, f: impl FnOnce(&K) -> V) -> K {
        let key = K::from_index(self.inner.len());
        self.inner.push(f(&key));
        key
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.inner
            .iter()
            .enumerate()
            .map(|(index, value)| (K::from_index(index), value))
    }
}
