use crate::component_type_set::ComponentTypeSet;
use crate::entity_key::EntityId;
use crate::mantle::Mantle;
use crate::observer::ComponentObserver;
use log::trace;

impl<E: EntityId, S: ComponentTypeSet> ComponentObserver<E, S> for Mantle<E, S> {
    fn on_entity_registered(&mut self, entity: E, types: &S) {
        trace!("on_entity_registered {:?}", entity);
        for id in &self.matching_empty {
            if let Some(collection) = self.collections.get_mut(id) {
                collection.apply(entity, self.queries.check(*id, types));
            }
        }
    }

    fn on_components_added(&mut self, entity: E, added: &[S::Key], types: &S) {
        trace!("on_components_added {:?} {:?}", entity, added);
        for id in self.affected_queries(added) {
            if let Some(collection) = self.collections.get_mut(&id) {
                collection.apply(entity, self.queries.check_on_added(id, added, types));
            }
        }
    }

    fn on_components_removed(&mut self, entity: E, removed: &[S::Key], types: &S) {
        trace!("on_components_removed {:?} {:?}", entity, removed);
        for id in self.affected_queries(removed) {
            if let Some(collection) = self.collections.get_mut(&id) {
                collection.apply(entity, self.queries.check_on_removed(id, removed, types));
            }
        }
    }
}
