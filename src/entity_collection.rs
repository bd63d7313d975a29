use crate::entity_key::EntityId;
use crate::query::QueryId;
use crate::query::QueryTransition;
use std::collections::hash_set;
use std::collections::HashSet;

pub struct EntityCollection<E> {
    query: QueryId,
    matched_entities: HashSet<E>,
}

impl<E: EntityId> EntityCollection<E> {
    pub(crate) fn new(query: QueryId) -> Self {
        Self {
            query,
            matched_entities: HashSet::new(),
        }
    }

    pub fn query(&self) -> QueryId {
        self.query
    }

    pub fn contains(&self, entity: E) -> bool {
        self.matched_entities.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.matched_entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched_entities.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, E> {
        self.matched_entities.iter()
    }

    pub fn to_set(&self) -> HashSet<E> {
        self.matched_entities.clone()
    }

    /// Idempotent in both directions.
    pub(crate) fn apply(&mut self, entity: E, transition: QueryTransition) {
        match transition {
            QueryTransition::Add => {
                self.matched_entities.insert(entity);
            }
            QueryTransition::Remove => {
                self.matched_entities.remove(&entity);
            }
            QueryTransition::Noop => {}
        }
    }
}

impl<'a, E: EntityId> IntoIterator for &'a EntityCollection<E> {
    type Item = &'a E;
    type IntoIter = hash_set::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
