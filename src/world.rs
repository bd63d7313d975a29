use crate::component_core::Core;
use crate::component_type_set::ComponentTypeSet;
use crate::entity_collection::EntityCollection;
use crate::entity_key::EntityId;
use crate::internal::operation_log::FlushResult;
use crate::mantle::Mantle;
use crate::query::QueryId;
use crate::world_configure::WorldConfig;
use std::cell::Ref;
use std::cell::RefCell;
use std::rc::Rc;

/// Collections are borrowed from a shared cell. Holding one while applying an immediate mutation
/// panics; switch the core to deferred mode to mutate while iterating.
pub struct World<E: EntityId, S: ComponentTypeSet> {
    pub(crate) core: Core<E, S>,
    pub(crate) mantle: Rc<RefCell<Mantle<E, S>>>,
}

impl<E: EntityId, S: ComponentTypeSet> Default for World<E, S> {
    fn default() -> Self {
        Self::with_config(&WorldConfig::default())
    }
}

impl<E: EntityId, S: ComponentTypeSet> World<E, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &WorldConfig) -> Self {
        let mut core = Core::with_capacity(config.entity_capacity, config.pool_capacity);
        let mantle = Rc::new(RefCell::new(Mantle::new()));
        core.subscribe(mantle.clone());
        World { core, mantle }
    }

    pub fn core(&self) -> &Core<E, S> {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut Core<E, S> {
        &mut self.core
    }

    pub fn mantle(&self) -> Rc<RefCell<Mantle<E, S>>> {
        self.mantle.clone()
    }

    pub fn query(
        &self,
        all: impl IntoIterator<Item = S::Key>,
        any: impl IntoIterator<Item = S::Key>,
        none: impl IntoIterator<Item = S::Key>,
    ) -> QueryId {
        let mut mantle = self.mantle.borrow_mut();
        let id = mantle.create_query(all, any, none);
        mantle.materialize(&self.core, id);
        id
    }

    pub fn entity_collection(
        &self,
        all: impl IntoIterator<Item = S::Key>,
        any: impl IntoIterator<Item = S::Key>,
        none: impl IntoIterator<Item = S::Key>,
    ) -> Ref<'_, EntityCollection<E>> {
        let id = self.query(all, any, none);
        self.collection(id)
    }

    pub fn collection(&self, id: QueryId) -> Ref<'_, EntityCollection<E>> {
        Ref::map(self.mantle.borrow(), |mantle| mantle.collection(id))
    }

    pub fn flush(&mut self) -> FlushResult {
        self.core.flush_deferred()
    }
}
