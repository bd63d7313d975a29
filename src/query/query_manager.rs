use crate::component_type_set::ComponentTypeSet;
use crate::query::query_desc::Query;
use crate::query::query_desc::QueryId;
use crate::query::query_desc::QueryTransition;
use crate::query::query_storage::QueryStorage;
use log::trace;

/// Asking about an id this manager never handed out is a bug and panics.
pub struct QueryManager<S> {
    storage: QueryStorage<S>,
}

impl<S> Default for QueryManager<S> {
    fn default() -> Self {
        Self {
            storage: Default::default(),
        }
    }
}

impl<S: ComponentTypeSet> QueryManager<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_query(
        &mut self,
        all: impl IntoIterator<Item = S::Key>,
        any: impl IntoIterator<Item = S::Key>,
        none: impl IntoIterator<Item = S::Key>,
    ) -> QueryId {
        self.intern(Query::from_keys(all, any, none)).0
    }

    pub(crate) fn intern(&mut self, query: Query<S>) -> (QueryId, bool) {
        self.storage.intern(query)
    }

    pub fn find(&self, query: &Query<S>) -> Option<QueryId> {
        self.storage.find(query)
    }

    pub fn query(&self, id: QueryId) -> &Query<S> {
        match self.storage.get(id) {
            Some(query) => query,
            None => panic!("query not created: {}", id),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (QueryId, &Query<S>)> {
        self.storage.iter()
    }

    pub fn check(&self, id: QueryId, types: &S) -> QueryTransition {
        let transition = self.query(id).check(types);
        trace!("{} full check: {:?}", id, transition);
        transition
    }

    pub fn check_on_added(&self, id: QueryId, added: &[S::Key], types: &S) -> QueryTransition {
        let transition = self.query(id).check_on_added(added, types);
        trace!("{} on added {:?}: {:?}", id, added, transition);
        transition
    }

    pub fn check_on_removed(&self, id: QueryId, removed: &[S::Key], types: &S) -> QueryTransition {
        let transition = self.query(id).check_on_removed(removed, types);
        trace!("{} on removed {:?}: {:?}", id, removed, transition);
        transition
    }
}
