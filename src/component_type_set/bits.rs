use crate::component::ComponentType;
use crate::component_type_set::ComponentTypeSet;
use tinyvec::TinyVec;

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct ComponentTypeBits {
    // no trailing zero words, derived Eq and Hash rely on it
    words: TinyVec<[u64; 2]>,
}

impl ComponentTypeBits {
    fn locate(key: ComponentType) -> (usize, u64) {
        let index = key.index as usize;
        (index / WORD_BITS, 1 << (index % WORD_BITS))
    }

    fn word(&self, index: usize) -> u64 {
        self.words.get(index).copied().unwrap_or(0)
    }

    fn trim(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }
}

impl ComponentTypeSet for ComponentTypeBits {
    type Key = ComponentType;

    fn add(&mut self, key: ComponentType) -> bool {
        let (word, mask) = Self::locate(key);
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
        let present = self.words[word] & mask != 0;
        self.words[word] |= mask;
        !present
    }

    fn remove(&mut self, key: ComponentType) -> bool {
        let (word, mask) = Self::locate(key);
        if self.word(word) & mask == 0 {
            return false;
        }
        self.words[word] &= !mask;
        self.trim();
        true
    }

    fn contains(&self, key: ComponentType) -> bool {
        let (word, mask) = Self::locate(key);
        self.word(word) & mask != 0
    }

    fn contains_all(&self, subset: &Self) -> bool {
        subset
            .words
            .iter()
            .enumerate()
            .all(|(i, required)| required & !self.word(i) == 0)
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0)
    }

    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn len(&self) -> usize {
        self.words.iter().map(|it| it.count_ones() as usize).sum()
    }

    fn iter(&self) -> impl Iterator<Item = ComponentType> + '_ {
        self.words.iter().enumerate().flat_map(|(i, word)| {
            let word = *word;
            (0..WORD_BITS)
                .filter(move |bit| word & (1 << bit) != 0)
                .map(move |bit| ComponentType::new((i * WORD_BITS + bit) as u16))
        })
    }
}
