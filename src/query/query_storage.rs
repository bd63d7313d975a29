use crate::component_type_set::ComponentTypeSet;
use crate::query::query_desc::Query;
use crate::query::query_desc::QueryId;
use crate::utils::typed_index_vec::TiVec;
use log::debug;
use std::collections::HashMap;

pub(crate) struct QueryStorage<S> {
    owned: TiVec<QueryId, Query<S>>,
    by_value: HashMap<Query<S>, QueryId>,
}

impl<S> Default for QueryStorage<S> {
    fn default() -> Self {
        Self {
            owned: Default::default(),
            by_value: Default::default(),
        }
    }
}

impl<S: ComponentTypeSet> QueryStorage<S> {
    pub(crate) fn intern(&mut self, query: Query<S>) -> (QueryId, bool) {
        if let Some(id) = self.by_value.get(&query) {
            return (*id, false);
        }
        let id = self.owned.push_with_key(|_| query.clone());
        debug!("intern {} as {}", query, id);
        self.by_value.insert(query, id);
        (id, true)
    }

    pub(crate) fn find(&self, query: &Query<S>) -> Option<QueryId> {
        self.by_value.get(query).copied()
    }

    pub(crate) fn get(&self, id: QueryId) -> Option<&Query<S>> {
        self.owned.get(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.owned.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (QueryId, &Query<S>)> {
        self.owned.iter()
    }
}
