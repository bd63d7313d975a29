use crate::component_core::Core;
use crate::component_type_set::ComponentTypeSet;
use crate::entity_collection::EntityCollection;
use crate::entity_key::EntityId;
use crate::query::Query;
use crate::query::QueryId;
use crate::query::QueryManager;
use log::debug;
use std::collections::HashMap;

pub struct Mantle<E, S: ComponentTypeSet> {
    pub(crate) queries: QueryManager<S>,
    pub(crate) by_component_type: HashMap<S::Key, Vec<QueryId>>,
    pub(crate) matching_empty: Vec<QueryId>,
    pub(crate) collections: HashMap<QueryId, EntityCollection<E>>,
}

impl<E: EntityId, S: ComponentTypeSet> Default for Mantle<E, S> {
    fn default() -> Self {
        Self {
            queries: Default::default(),
            by_component_type: Default::default(),
            matching_empty: vec![],
            collections: Default::default(),
        }
    }
}

impl<E: EntityId, S: ComponentTypeSet> Mantle<E, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queries(&self) -> &QueryManager<S> {
        &self.queries
    }

    pub fn create_query(
        &mut self,
        all: impl IntoIterator<Item = S::Key>,
        any: impl IntoIterator<Item = S::Key>,
        none: impl IntoIterator<Item = S::Key>,
    ) -> QueryId {
        let (id, created) = self.queries.intern(Query::from_keys(all, any, none));
        if created {
            self.index_query(id);
        }
        id
    }

    fn index_query(&mut self, id: QueryId) {
        let query = self.queries.query(id);
        for component_type in query.component_types().iter() {
            self.by_component_type
                .entry(component_type)
                .or_default()
                .push(id);
        }
        if query.matches_empty() {
            self.matching_empty.push(id);
        }
    }

    pub fn queries_for(&self, component_type: S::Key) -> &[QueryId] {
        self.by_component_type
            .get(&component_type)
            .map(|it| it.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_entity_collection(
        &mut self,
        core: &Core<E, S>,
        all: impl IntoIterator<Item = S::Key>,
        any: impl IntoIterator<Item = S::Key>,
        none: impl IntoIterator<Item = S::Key>,
    ) -> &EntityCollection<E> {
        let id = self.create_query(all, any, none);
        self.materialize(core, id)
    }

    pub fn materialize(&mut self, core: &Core<E, S>, id: QueryId) -> &EntityCollection<E> {
        let queries = &self.queries;
        self.collections.entry(id).or_insert_with(|| {
            debug!(
                "materialize {} {} over {} entities",
                id,
                queries.query(id),
                core.entity_count()
            );
            let mut collection = EntityCollection::new(id);
            for (entity, types) in core.entities() {
                collection.apply(entity, queries.check(id, types));
            }
            collection
        })
    }

    pub fn entity_collection(&self, id: QueryId) -> Option<&EntityCollection<E>> {
        self.collections.get(&id)
    }

    pub fn collection(&self, id: QueryId) -> &EntityCollection<E> {
        match self.collections.get(&id) {
            Some(collection) => collection,
            None => panic!("query not materialized: {}", id),
        }
    }

    pub(crate) fn affected_queries(&self, component_types: &[S::Key]) -> Vec<QueryId> {
        let mut affected = component_types
            .iter()
            .flat_map(|it| self.queries_for(*it))
            .copied()
            .collect::<Vec<_>>();
        affected.sort_unstable();
        affected.dedup();
        affected
    }
}
