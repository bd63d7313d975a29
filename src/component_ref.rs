use crate::component_core::Core;
use crate::component_core::ErasedValue;
use crate::component_type_set::ComponentTypeSet;
use crate::core_result::CoreResult;
use crate::entity_key::EntityId;
use crate::internal::component_pool_manager::ComponentPoolManager;
use std::any::type_name;
use std::any::TypeId;

pub struct ComponentRef<'a, E, S: ComponentTypeSet> {
    entity: E,
    types: &'a S,
    pools: &'a mut ComponentPoolManager<E, S::Key>,
}

impl<'a, E: EntityId, S: ComponentTypeSet> ComponentRef<'a, E, S> {
    pub(crate) fn new(
        entity: E,
        types: &'a S,
        pools: &'a mut ComponentPoolManager<E, S::Key>,
    ) -> Self {
        Self {
            entity,
            types,
            pools,
        }
    }

    pub fn entity(&self) -> E {
        self.entity
    }

    pub fn types(&self) -> &S {
        self.types
    }

    pub fn get<V: 'static>(&self, key: S::Key) -> CoreResult<Option<&V>> {
        if !self.types.contains(key) {
            return Ok(None);
        }
        Ok(self.pools.specific_pool::<V>(key)?.get(&self.entity))
    }

    pub fn get_mut<V: 'static>(&mut self, key: S::Key) -> CoreResult<Option<&mut V>> {
        if !self.types.contains(key) {
            return Ok(None);
        }
        Ok(self.pools.specific_pool_mut::<V>(key)?.get_mut(&self.entity))
    }

    pub fn modify<V: 'static>(
        &mut self,
        key: S::Key,
        change: impl FnOnce(&mut V),
    ) -> CoreResult<bool> {
        match self.get_mut::<V>(key)? {
            Some(value) => {
                change(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub struct ComponentBatch<'a, E, S: ComponentTypeSet> {
    core: &'a mut Core<E, S>,
    entity: E,
    values: Vec<(S::Key, ErasedValue)>,
}

impl<'a, E: EntityId, S: ComponentTypeSet> ComponentBatch<'a, E, S> {
    pub(crate) fn new(core: &'a mut Core<E, S>, entity: E) -> Self {
        Self {
            core,
            entity,
            values: vec![],
        }
    }

    pub fn set<V: 'static>(mut self, key: S::Key, value: V) -> Self {
        self.values.push((
            key,
            ErasedValue {
                value_type: TypeId::of::<V>(),
                value_type_name: type_name::<V>(),
                value: Box::new(value),
            },
        ));
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All or nothing: a single unregistered key or mismatched value type rejects the whole batch.
    pub fn apply(self) -> CoreResult {
        self.core.set_erased(self.entity, self.values)
    }
}
