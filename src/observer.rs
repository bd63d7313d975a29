use crate::component_type_set::ComponentTypeSet;
use std::cell::RefCell;
use std::rc::Rc;

/// Every notification carries the entity's component types as they are right after the change.
/// Handlers run synchronously, in subscription order, while the core is mutably borrowed, so
/// they can't mutate the core re-entrantly.
pub trait ComponentObserver<E, S: ComponentTypeSet> {
    fn on_entity_registered(&mut self, _entity: E, _types: &S) {}

    fn on_components_added(&mut self, entity: E, added: &[S::Key], types: &S);

    fn on_components_removed(&mut self, entity: E, removed: &[S::Key], types: &S);
}

impl<E, S, T> ComponentObserver<E, S> for Rc<RefCell<T>>
where
    S: ComponentTypeSet,
    T: ComponentObserver<E, S>,
{
    fn on_entity_registered(&mut self, entity: E, types: &S) {
        self.borrow_mut().on_entity_registered(entity, types)
    }

    fn on_components_added(&mut self, entity: E, added: &[S::Key], types: &S) {
        self.borrow_mut().on_components_added(entity, added, types)
    }

    fn on_components_removed(&mut self, entity: E, removed: &[S::Key], types: &S) {
        self.borrow_mut().on_components_removed(entity, removed, types)
    }
}
