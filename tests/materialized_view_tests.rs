use std::collections::HashMap;
use std::collections::HashSet;

use ctor::ctor;
use mantle_core::ComponentType;
use mantle_core::ComponentTypeBits;
use mantle_core::ComponentTypeSet;
use mantle_core::EntityKey;
use mantle_core::QueryId;
use mantle_core::SortedComponentTypes;
use mantle_core::World;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

const TYPE_COUNT: u16 = 8;
const STEPS: usize = 1200;

#[ctor]
fn init_logging() {
    let _ = log4rs::init_file("tests/log4rs.test.yaml", Default::default());
}

struct RawQuery {
    all: Vec<u16>,
    any: Vec<u16>,
    none: Vec<u16>,
}

impl RawQuery {
    fn random(rng: &mut StdRng) -> Self {
        let mut pick = |max: usize| {
            let count = rng.gen_range(0..=max);
            let mut keys = (0..count)
                .map(|_| rng.gen_range(0..TYPE_COUNT))
                .collect::<Vec<_>>();
            keys.sort_unstable();
            keys.dedup();
            keys
        };
        let all = pick(2);
        let any = pick(3);
        let none = pick(2);
        RawQuery { all, any, none }
    }

    fn matches(&self, types: &HashSet<u16>) -> bool {
        self.all.iter().all(|it| types.contains(it))
            && (self.any.is_empty() || self.any.iter().any(|it| types.contains(it)))
            && !self.none.iter().any(|it| types.contains(it))
    }
}

/// Keeps an independent copy of every entity's composition to compare collections against.
struct Model<E> {
    entities: HashMap<E, HashSet<u16>>,
}

impl<E: Copy + Eq + std::hash::Hash + std::fmt::Debug> Model<E> {
    fn expected(&self, query: &RawQuery) -> HashSet<E> {
        self.entities
            .iter()
            .filter(|(_, types)| query.matches(types))
            .map(|(entity, _)| *entity)
            .collect()
    }
}

trait Keys: ComponentTypeSet {
    fn key(index: u16) -> Self::Key;
}

impl Keys for ComponentTypeBits {
    fn key(index: u16) -> ComponentType {
        ComponentType::new(index)
    }
}

impl Keys for SortedComponentTypes<u16> {
    fn key(index: u16) -> u16 {
        index
    }
}

fn keys<S: Keys>(raw: &[u16]) -> Vec<S::Key> {
    raw.iter().map(|it| S::key(*it)).collect()
}

fn declare_query<S: Keys>(world: &World<EntityKey, S>, raw: &RawQuery) -> QueryId {
    world.query(keys::<S>(&raw.all), keys::<S>(&raw.any), keys::<S>(&raw.none))
}

fn verify<S: Keys>(
    world: &World<EntityKey, S>,
    model: &Model<EntityKey>,
    queries: &[(QueryId, RawQuery)],
    step: usize,
) {
    for (id, raw) in queries {
        assert_eq!(
            world.collection(*id).to_set(),
            model.expected(raw),
            "step {}: all {:?} any {:?} none {:?}",
            step,
            raw.all,
            raw.any,
            raw.none
        );
    }
}

fn run<S: Keys>(seed: u64, deferred: bool) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = World::<EntityKey, S>::new();
    for index in 0..TYPE_COUNT {
        world
            .core_mut()
            .register_component_type::<u32>(S::key(index))
            .unwrap();
    }

    let mut model = Model {
        entities: HashMap::new(),
    };
    let mut entities = vec![];
    let mut queries = (0..6)
        .map(|_| {
            let raw = RawQuery::random(&mut rng);
            (declare_query(&world, &raw), raw)
        })
        .collect::<Vec<_>>();

    if deferred {
        world.core_mut().begin_deferred();
    }

    for step in 0..STEPS {
        let roll = rng.gen_range(0..100);
        if roll < 10 || entities.is_empty() {
            let entity = world.core_mut().create_entity();
            entities.push(entity);
            model.entities.insert(entity, HashSet::new());
        } else if roll < 13 {
            // late query, materialized over whatever exists now
            if deferred {
                world.flush();
            }
            let raw = RawQuery::random(&mut rng);
            queries.push((declare_query(&world, &raw), raw));
            if deferred {
                world.core_mut().begin_deferred();
            }
        } else {
            let entity = entities[rng.gen_range(0..entities.len())];
            let picked = (0..rng.gen_range(1..=3))
                .map(|_| rng.gen_range(0..TYPE_COUNT))
                .collect::<Vec<_>>();
            let types = model.entities.get_mut(&entity).unwrap();
            if rng.gen_bool(0.55) {
                let value = step as u32;
                world
                    .core_mut()
                    .set_components(entity, keys::<S>(&picked), |_| value)
                    .unwrap();
                types.extend(picked.iter().copied());
            } else {
                world
                    .core_mut()
                    .unset_components(entity, keys::<S>(&picked))
                    .unwrap();
                for it in &picked {
                    types.remove(it);
                }
            }
        }

        if !deferred {
            if step % 5 == 4 {
                verify(&world, &model, &queries, step);
            }
        } else if step % 17 == 16 {
            let result = world.flush();
            assert!(result.is_ok(), "{:?}", result);
            verify(&world, &model, &queries, step);
            world.core_mut().begin_deferred();
        }
    }

    world.flush();
    verify(&world, &model, &queries, STEPS);
}

#[test]
fn bit_sets_match_brute_force() {
    for seed in 0..4 {
        run::<ComponentTypeBits>(seed, false);
    }
}

#[test]
fn sorted_sets_match_brute_force() {
    for seed in 10..14 {
        run::<SortedComponentTypes<u16>>(seed, false);
    }
}

#[test]
fn deferred_mutations_match_brute_force_after_flush() {
    for seed in 20..24 {
        run::<ComponentTypeBits>(seed, true);
        run::<SortedComponentTypes<u16>>(seed, true);
    }
}
