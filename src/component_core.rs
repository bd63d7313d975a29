use crate::component_ref::ComponentBatch;
use crate::component_ref::ComponentRef;
use crate::component_type_set::ComponentTypeSet;
use crate::core_result::CoreResult;
use crate::core_result::EntityError;
use crate::entity_key::EntityId;
use crate::entity_key::EntityKey;
use crate::internal::component_pool::AbstractPool;
use crate::internal::component_pool_manager::ComponentPoolManager;
use crate::internal::operation_log::FlushResult;
use crate::internal::operation_log::OperationLog;
use crate::observer::ComponentObserver;
use log::debug;
use log::trace;
use std::any::Any;
use std::collections::HashMap;

pub struct Core<E, S: ComponentTypeSet> {
    entities: HashMap<E, S>,
    pools: ComponentPoolManager<E, S::Key>,
    subscribers: Vec<Box<dyn ComponentObserver<E, S>>>,
    deferred: Option<OperationLog<E, S>>,
    flushes: u64,
    next_entity_index: u32,
}

pub(crate) struct ErasedValue {
    pub(crate) value_type: std::any::TypeId,
    pub(crate) value_type_name: &'static str,
    pub(crate) value: Box<dyn Any>,
}

impl<E: EntityId, S: ComponentTypeSet> Default for Core<E, S> {
    fn default() -> Self {
        Self::with_capacity(0, 0)
    }
}

// entities and subscribers
impl<E: EntityId, S: ComponentTypeSet> Core<E, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(entity_capacity: usize, pool_capacity: usize) -> Self {
        Core {
            entities: HashMap::with_capacity(entity_capacity),
            pools: ComponentPoolManager::new(pool_capacity),
            subscribers: vec![],
            deferred: None,
            flushes: 0,
            next_entity_index: 0,
        }
    }

    pub fn subscribe(&mut self, observer: impl ComponentObserver<E, S> + 'static) {
        self.subscribers.push(Box::new(observer));
    }

    pub fn register_entity(&mut self, entity: E) -> CoreResult {
        if self.entities.contains_key(&entity) {
            return Err(EntityError::AlreadyRegistered.into());
        }
        trace!("register entity {:?}", entity);
        let types = self.entities.entry(entity).or_insert_with(S::create);
        for subscriber in &mut self.subscribers {
            subscriber.on_entity_registered(entity, types);
        }
        Ok(())
    }

    pub fn is_registered(&self, entity: E) -> bool {
        self.entities.contains_key(&entity)
    }

    pub fn entities(&self) -> impl Iterator<Item = (E, &S)> + '_ {
        self.entities.iter().map(|(entity, types)| (*entity, types))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn get_component_types(&self, entity: E) -> Option<&S> {
        self.entities.get(&entity)
    }

    fn validate_entity(&self, entity: E) -> CoreResult {
        if !self.entities.contains_key(&entity) {
            return Err(EntityError::NotRegistered.into());
        }
        Ok(())
    }

    fn notify_added(&mut self, entity: E, added: &[S::Key]) {
        let Some(types) = self.entities.get(&entity) else {
            return;
        };
        trace!("components added to {:?}: {:?}", entity, added);
        for subscriber in &mut self.subscribers {
            subscriber.on_components_added(entity, added, types);
        }
    }

    fn notify_removed(&mut self, entity: E, removed: &[S::Key]) {
        let Some(types) = self.entities.get(&entity) else {
            return;
        };
        trace!("components removed from {:?}: {:?}", entity, removed);
        for subscriber in &mut self.subscribers {
            subscriber.on_components_removed(entity, removed, types);
        }
    }
}

impl<S: ComponentTypeSet> Core<EntityKey, S> {
    pub fn create_entity(&mut self) -> EntityKey {
        loop {
            let entity = EntityKey::from_index(self.next_entity_index);
            self.next_entity_index += 1;
            if self.register_entity(entity).is_ok() {
                return entity;
            }
        }
    }
}

// component types
impl<E: EntityId, S: ComponentTypeSet> Core<E, S> {
    pub fn register_component_type<V: 'static>(&mut self, key: S::Key) -> CoreResult {
        self.pools.init_pool::<V>(key)?;
        Ok(())
    }

    pub fn try_register_component_type<V: 'static>(&mut self, key: S::Key) -> bool {
        self.pools.init_pool::<V>(key).is_ok()
    }

    pub fn is_component_type_registered(&self, key: S::Key) -> bool {
        self.pools.is_registered(key)
    }

    pub fn component_count(&self, key: S::Key) -> usize {
        self.pools.count(key)
    }
}

// component values
impl<E: EntityId, S: ComponentTypeSet> Core<E, S> {
    pub fn set_component<V: 'static>(&mut self, entity: E, key: S::Key, value: V) -> CoreResult {
        self.set_typed("set_component", entity, vec![(key, value)])
    }

    pub fn set_components<V: 'static>(
        &mut self,
        entity: E,
        keys: impl IntoIterator<Item = S::Key>,
        mut selector: impl FnMut(S::Key) -> V,
    ) -> CoreResult {
        let values = keys
            .into_iter()
            .map(|key| (key, selector(key)))
            .collect::<Vec<_>>();
        self.set_typed("set_components", entity, values)
    }

    pub fn batch(&mut self, entity: E) -> ComponentBatch<'_, E, S> {
        ComponentBatch::new(self, entity)
    }

    pub fn unset_component(&mut self, entity: E, key: S::Key) -> CoreResult {
        self.unset_components(entity, [key])
    }

    pub fn unset_components(
        &mut self,
        entity: E,
        keys: impl IntoIterator<Item = S::Key>,
    ) -> CoreResult {
        let keys = keys.into_iter().collect::<Vec<_>>();
        self.validate_entity(entity)?;
        if let Some(log) = &mut self.deferred {
            log.push("unset_components", entity, move |core| {
                core.unset_components(entity, keys)
            });
            return Ok(());
        }

        let Some(types) = self.entities.get_mut(&entity) else {
            return Err(EntityError::NotRegistered.into());
        };
        let mut removed = Vec::new();
        for key in keys {
            if !types.remove(key) {
                continue;
            }
            trace!("remove component {:?} from {:?}", key, entity);
            self.pools.get_pool_mut(key).del(&entity);
            removed.push(key);
        }
        if !removed.is_empty() {
            self.notify_removed(entity, &removed);
        }
        Ok(())
    }

    pub fn has_component(&self, entity: E, key: S::Key) -> CoreResult<bool> {
        match self.entities.get(&entity) {
            Some(types) => Ok(types.contains(key)),
            None => Err(EntityError::NotRegistered.into()),
        }
    }

    pub fn try_get_component<V: 'static>(&self, entity: E, key: S::Key) -> CoreResult<Option<&V>> {
        self.validate_entity(entity)?;
        if !self.pools.is_registered(key) {
            return Ok(None);
        }
        Ok(self.pools.specific_pool::<V>(key)?.get(&entity))
    }

    pub fn try_get_component_mut<V: 'static>(
        &mut self,
        entity: E,
        key: S::Key,
    ) -> CoreResult<Option<&mut V>> {
        self.validate_entity(entity)?;
        if !self.pools.is_registered(key) {
            return Ok(None);
        }
        Ok(self.pools.specific_pool_mut::<V>(key)?.get_mut(&entity))
    }

    pub fn with_components<R>(
        &mut self,
        entity: E,
        access: impl FnOnce(&mut ComponentRef<'_, E, S>) -> R,
    ) -> CoreResult<R> {
        let Some(types) = self.entities.get(&entity) else {
            return Err(EntityError::NotRegistered.into());
        };
        let mut component_ref = ComponentRef::new(entity, types, &mut self.pools);
        Ok(access(&mut component_ref))
    }

    fn set_typed<V: 'static>(
        &mut self,
        name: &'static str,
        entity: E,
        values: Vec<(S::Key, V)>,
    ) -> CoreResult {
        self.validate_entity(entity)?;
        for (key, _) in &values {
            self.pools.validate::<V>(*key)?;
        }
        if let Some(log) = &mut self.deferred {
            log.push(name, entity, move |core| core.set_typed(name, entity, values));
            return Ok(());
        }
        self.attach(entity, values, |pool, entity, value, present| {
            let pool = pool
                .as_any_mut()
                .try_specialize::<V>()
                .expect("value type validated");
            if present {
                pool.update(entity, value);
            } else {
                pool.add(entity, value);
            }
        })
    }

    pub(crate) fn set_erased(
        &mut self,
        entity: E,
        values: Vec<(S::Key, ErasedValue)>,
    ) -> CoreResult {
        self.validate_entity(entity)?;
        for (key, value) in &values {
            self.pools
                .validate_value_type(*key, value.value_type, value.value_type_name)?;
        }
        if let Some(log) = &mut self.deferred {
            log.push("batch", entity, move |core| core.set_erased(entity, values));
            return Ok(());
        }
        self.attach(entity, values, |pool, entity, value, present| {
            if present {
                pool.update_any(entity, value.value);
            } else {
                pool.add_any(entity, value.value);
            }
        })
    }

    fn attach<T>(
        &mut self,
        entity: E,
        values: Vec<(S::Key, T)>,
        mut store: impl FnMut(&mut dyn AbstractPool<E>, E, T, bool),
    ) -> CoreResult {
        let Some(types) = self.entities.get_mut(&entity) else {
            return Err(EntityError::NotRegistered.into());
        };
        let mut added = Vec::new();
        for (key, value) in values {
            let present = types.contains(key);
            if present {
                trace!("update component {:?} of {:?}", key, entity);
            } else {
                trace!("add component {:?} to {:?}", key, entity);
                types.add(key);
                added.push(key);
            }
            store(self.pools.get_pool_mut(key), entity, value, present);
        }
        if !added.is_empty() {
            self.notify_added(entity, &added);
        }
        Ok(())
    }
}

// deferred mutation
impl<E: EntityId, S: ComponentTypeSet> Core<E, S> {
    pub fn begin_deferred(&mut self) {
        if self.deferred.is_none() {
            debug!("begin deferred mutation");
            self.deferred = Some(OperationLog::new());
        }
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    pub fn deferred_len(&self) -> usize {
        self.deferred.as_ref().map(|it| it.len()).unwrap_or(0)
    }

    /// Replays the recorded mutations in order, with the same notifications they would have raised
    /// if applied immediately. Does nothing when not deferring.
    pub fn flush_deferred(&mut self) -> FlushResult {
        let Some(log) = self.deferred.take() else {
            return FlushResult::default();
        };
        self.flushes += 1;
        log_mdc::insert("flush", self.flushes.to_string());
        debug!("flush {} deferred operations", log.len());
        let result = log.apply_to(self);
        log_mdc::remove("flush");
        result
    }
}
