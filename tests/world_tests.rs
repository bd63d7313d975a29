use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use ctor::ctor;
use mantle_core::ComponentObserver;
use mantle_core::ComponentType;
use mantle_core::ComponentTypeBits;
use mantle_core::ConfigurableWorld;
use mantle_core::EntityKey;
use mantle_core::World;
use mantle_core::WorldConfig;

const HEALTH: ComponentType = ComponentType::new(0);
const POISONED: ComponentType = ComponentType::new(1);
const DEAD: ComponentType = ComponentType::new(2);

#[ctor]
fn init_logging() {
    let _ = log4rs::init_file("tests/log4rs.test.yaml", Default::default());
}

/// Records how many entities the world's query had when each change was reported.
struct MembershipProbe {
    world_mantle: Option<Rc<RefCell<mantle_core::Mantle<EntityKey, ComponentTypeBits>>>>,
    query: Option<mantle_core::QueryId>,
    seen: Vec<usize>,
}

impl ComponentObserver<EntityKey, ComponentTypeBits> for MembershipProbe {
    fn on_components_added(
        &mut self,
        _entity: EntityKey,
        _added: &[ComponentType],
        _types: &ComponentTypeBits,
    ) {
        if let (Some(mantle), Some(query)) = (&self.world_mantle, self.query) {
            self.seen.push(mantle.borrow().collection(query).len());
        }
    }

    fn on_components_removed(
        &mut self,
        _entity: EntityKey,
        _removed: &[ComponentType],
        _types: &ComponentTypeBits,
    ) {
    }
}

#[test]
fn default_config() {
    assert_eq!(
        WorldConfig::default(),
        WorldConfig {
            entity_capacity: 512,
            pool_capacity: 64,
        }
    );
}

#[test]
fn configured_world_keeps_declared_queries() {
    let mut configurable = ConfigurableWorld::<EntityKey, ComponentTypeBits>::with_config(
        WorldConfig {
            entity_capacity: 4,
            pool_capacity: 2,
        },
    );
    configurable
        .register_component_type::<u32>(HEALTH)
        .unwrap();
    configurable.register_component_type::<()>(POISONED).unwrap();
    configurable.register_component_type::<()>(DEAD).unwrap();
    assert!(configurable.register_component_type::<i64>(HEALTH).is_err());
    let alive = configurable.register_query([HEALTH], [], [DEAD]);
    let same = configurable.register_query([HEALTH], [], [DEAD]);
    assert_eq!(alive, same);

    let mut world = configurable.seal();
    let core = world.core_mut();
    let entities = (0..10).map(|_| core.create_entity()).collect::<Vec<_>>();
    for (i, entity) in entities.iter().enumerate() {
        core.set_component(*entity, HEALTH, i as u32).unwrap();
    }
    core.set_component(entities[3], DEAD, ()).unwrap();

    let alive_set = world.collection(alive).to_set();
    assert_eq!(alive_set.len(), 9);
    assert!(!alive_set.contains(&entities[3]));
}

#[test]
fn subscribers_see_queries_already_updated() {
    let mut configurable = ConfigurableWorld::<EntityKey, ComponentTypeBits>::new();
    configurable
        .register_component_type::<u32>(HEALTH)
        .unwrap();
    let healthy = configurable.register_query([HEALTH], [], []);
    let probe = Rc::new(RefCell::new(MembershipProbe {
        world_mantle: None,
        query: Some(healthy),
        seen: vec![],
    }));
    configurable.subscribe(probe.clone());
    let mut world = configurable.seal();
    probe.borrow_mut().world_mantle = Some(world.mantle());

    let core = world.core_mut();
    let first = core.create_entity();
    let second = core.create_entity();
    core.set_component(first, HEALTH, 10u32).unwrap();
    core.set_component(second, HEALTH, 20u32).unwrap();

    assert_eq!(probe.borrow().seen, vec![1, 2]);
}

#[test]
fn mutate_while_iterating_in_deferred_mode() {
    let mut world = World::<EntityKey, ComponentTypeBits>::new();
    let core = world.core_mut();
    core.register_component_type::<u32>(HEALTH).unwrap();
    core.register_component_type::<()>(POISONED).unwrap();
    core.register_component_type::<()>(DEAD).unwrap();
    let entities = (0..5).map(|_| core.create_entity()).collect::<Vec<_>>();
    for entity in &entities {
        core.set_component(*entity, HEALTH, 1u32).unwrap();
        core.set_component(*entity, POISONED, ()).unwrap();
    }
    let poisoned_alive = world.query([HEALTH, POISONED], [], [DEAD]);

    world.core_mut().begin_deferred();
    let mantle = world.mantle();
    for entity in mantle.borrow().collection(poisoned_alive) {
        let health = world
            .core_mut()
            .try_get_component_mut::<u32>(*entity, HEALTH)
            .unwrap()
            .unwrap();
        *health -= 1;
        if *health == 0 {
            world.core_mut().set_component(*entity, DEAD, ()).unwrap();
        }
    }
    assert_eq!(world.collection(poisoned_alive).len(), 5);
    assert_eq!(world.core().deferred_len(), 5);

    let result = world.flush();
    assert_eq!(result.applied, 5);
    assert!(result.errors.is_empty());
    assert!(world.collection(poisoned_alive).is_empty());
    assert_eq!(
        world.entity_collection([DEAD], [], []).to_set(),
        entities.into_iter().collect::<HashSet<_>>()
    );
}

#[test]
#[should_panic]
fn immediate_mutation_while_iterating_panics() {
    let mut world = World::<EntityKey, ComponentTypeBits>::new();
    let core = world.core_mut();
    core.register_component_type::<()>(POISONED).unwrap();
    core.register_component_type::<()>(DEAD).unwrap();
    let entity = core.create_entity();
    core.set_component(entity, POISONED, ()).unwrap();
    let poisoned = world.query([POISONED], [], []);

    let mantle = world.mantle();
    let mantle_ref = mantle.borrow();
    for entity in mantle_ref.collection(poisoned) {
        world.core_mut().set_component(*entity, DEAD, ()).unwrap();
    }
}
