use crate::core_result::ComponentError;
use crate::internal::component_pool::AbstractPool;
use crate::internal::component_pool::SpecificPool;
use log::info;
use std::any::type_name;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

pub(crate) struct ComponentPoolManager<E, K> {
    by_type: HashMap<K, Box<dyn AbstractPool<E>>>,
    pool_capacity: usize,
}

impl<E, K> ComponentPoolManager<E, K> {
    pub(crate) fn new(pool_capacity: usize) -> Self {
        Self {
            by_type: Default::default(),
            pool_capacity,
        }
    }
}

impl<E: Copy + Eq + Hash + 'static, K: Copy + Eq + Hash + Debug> ComponentPoolManager<E, K> {
    /// Returns `false` if the key was already bound to `V`.
    pub(crate) fn init_pool<V: 'static>(&mut self, key: K) -> Result<bool, ComponentError> {
        if let Some(existing) = self.by_type.get(&key) {
            if existing.value_type() == TypeId::of::<V>() {
                return Ok(false);
            }
            return Err(ComponentError::TypeConflict {
                component_type: format!("{:?}", key),
                registered: existing.value_type_name(),
                requested: type_name::<V>(),
            });
        }
        info!("initialize pool {:?} with {}", key, type_name::<V>());
        self.by_type.insert(
            key,
            Box::new(SpecificPool::<E, V>::with_capacity(self.pool_capacity)),
        );
        Ok(true)
    }

    pub(crate) fn validate_value_type(
        &self,
        key: K,
        value_type: TypeId,
        value_type_name: &'static str,
    ) -> Result<(), ComponentError> {
        let pool = self.get_pool(key)?;
        if pool.value_type() != value_type {
            return Err(ComponentError::TypeConflict {
                component_type: format!("{:?}", key),
                registered: pool.value_type_name(),
                requested: value_type_name,
            });
        }
        Ok(())
    }

    pub(crate) fn validate<V: 'static>(&self, key: K) -> Result<(), ComponentError> {
        self.validate_value_type(key, TypeId::of::<V>(), type_name::<V>())
    }

    pub(crate) fn get_pool(&self, key: K) -> Result<&dyn AbstractPool<E>, ComponentError> {
        match self.by_type.get(&key) {
            Some(pool) => Ok(pool.as_ref()),
            None => Err(ComponentError::NotRegistered {
                component_type: format!("{:?}", key),
            }),
        }
    }

    pub(crate) fn get_pool_mut(&mut self, key: K) -> &mut dyn AbstractPool<E> {
        match self.by_type.get_mut(&key) {
            Some(pool) => pool.as_mut(),
            None => panic!("framework BUG: pool not initialized for {:?}", key),
        }
    }

    pub(crate) fn specific_pool<V: 'static>(
        &self,
        key: K,
    ) -> Result<&SpecificPool<E, V>, ComponentError> {
        self.validate::<V>(key)?;
        Ok(self
            .get_pool(key)?
            .as_any()
            .try_specialize::<V>()
            .expect("value type validated"))
    }

    pub(crate) fn specific_pool_mut<V: 'static>(
        &mut self,
        key: K,
    ) -> Result<&mut SpecificPool<E, V>, ComponentError> {
        self.validate::<V>(key)?;
        Ok(self
            .get_pool_mut(key)
            .as_any_mut()
            .try_specialize::<V>()
            .expect("value type validated"))
    }

    pub(crate) fn is_registered(&self, key: K) -> bool {
        self.by_type.contains_key(&key)
    }

    pub(crate) fn count(&self, key: K) -> usize {
        self.by_type.get(&key).map(|it| it.len()).unwrap_or(0)
    }
}
