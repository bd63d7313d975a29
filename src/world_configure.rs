use crate::component_type_set::ComponentTypeSet;
use crate::core_result::CoreResult;
use crate::entity_key::EntityId;
use crate::observer::ComponentObserver;
use crate::query::QueryId;
use crate::world::World;
use log::info;
use log::trace;
use std::any::type_name;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorldConfig {
    pub entity_capacity: usize,
    pub pool_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            entity_capacity: 512,
            pool_capacity: 64,
        }
    }
}

pub struct ConfigurableWorld<E: EntityId, S: ComponentTypeSet> {
    pub(crate) fetus: World<E, S>,
}

impl<E: EntityId, S: ComponentTypeSet> Default for ConfigurableWorld<E, S> {
    fn default() -> Self {
        Self::with_config(WorldConfig::default())
    }
}

impl<E: EntityId, S: ComponentTypeSet> ConfigurableWorld<E, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WorldConfig) -> Self {
        trace!("configure world with {:?}", config);
        Self {
            fetus: World::with_config(&config),
        }
    }

    pub fn register_component_type<V: 'static>(&mut self, key: S::Key) -> CoreResult {
        trace!("register component type {:?} as {}", key, type_name::<V>());
        self.fetus.core.register_component_type::<V>(key)
    }

    pub fn register_query(
        &mut self,
        all: impl IntoIterator<Item = S::Key>,
        any: impl IntoIterator<Item = S::Key>,
        none: impl IntoIterator<Item = S::Key>,
    ) -> QueryId {
        self.fetus.query(all, any, none)
    }

    pub fn subscribe(&mut self, observer: impl ComponentObserver<E, S> + 'static) {
        self.fetus.core.subscribe(observer);
    }

    pub fn seal(self) -> World<E, S> {
        info!(
            "world sealed with {} declared queries",
            self.fetus.mantle.borrow().queries().len()
        );
        self.fetus
    }
}
