use std::any::type_name;
use std::any::Any;
use std::any::TypeId;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::hash::Hash;

pub(crate) struct SpecificPool<E, V> {
    buffer: Vec<Option<V>>,
    holes: VecDeque<usize>,
    by_entity: HashMap<E, usize>,
}

pub(crate) trait AbstractPool<E> {
    fn value_type(&self) -> TypeId;
    fn value_type_name(&self) -> &'static str;
    fn len(&self) -> usize;
    fn add_any(&mut self, entity: E, value: Box<dyn Any>);
    fn update_any(&mut self, entity: E, value: Box<dyn Any>);
    fn del(&mut self, entity: &E);
    fn as_any_mut(&mut self) -> AnyPoolMut<'_, E>;
    fn as_any(&self) -> AnyPool<'_, E>;
}

pub(crate) struct AnyPoolMut<'a, E> {
    any: &'a mut dyn Any,
    pd: std::marker::PhantomData<E>,
}

pub(crate) struct AnyPool<'a, E> {
    any: &'a dyn Any,
    pd: std::marker::PhantomData<E>,
}

impl<'a, E: 'static> AnyPoolMut<'a, E> {
    pub(crate) fn try_specialize<T: 'static>(self) -> Option<&'a mut SpecificPool<E, T>> {
        self.any.downcast_mut::<SpecificPool<E, T>>()
    }
}

impl<'a, E: 'static> AnyPool<'a, E> {
    pub(crate) fn try_specialize<T: 'static>(self) -> Option<&'a SpecificPool<E, T>> {
        self.any.downcast_ref::<SpecificPool<E, T>>()
    }
}

impl<E: Copy + Eq + Hash, V> SpecificPool<E, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        SpecificPool {
            buffer: Vec::with_capacity(capacity),
            holes: Default::default(),
            by_entity: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn add(&mut self, entity: E, value: V) {
        assert!(
            !self.by_entity.contains_key(&entity),
            "attempt to add {} twice to the same entity",
            type_name::<V>()
        );
        let index = match self.holes.pop_front() {
            None => {
                self.buffer.push(Some(value));
                self.buffer.len() - 1
            }
            Some(index) => {
                *self
                    .buffer
                    .get_mut(index)
                    .expect("holes contain index outside the bounds") = Some(value);
                index
            }
        };
        self.by_entity.insert(entity, index);
    }

    pub(crate) fn update(&mut self, entity: E, value: V) {
        let Some(slot) = self.get_mut(&entity) else {
            panic!("attempt to update absent {}", type_name::<V>());
        };
        *slot = value;
    }

    pub(crate) fn get(&self, entity: &E) -> Option<&V> {
        let index = *self.by_entity.get(entity)?;
        self.buffer.get(index).and_then(|it| it.as_ref())
    }

    pub(crate) fn get_mut(&mut self, entity: &E) -> Option<&mut V> {
        let index = *self.by_entity.get(entity)?;
        self.buffer.get_mut(index).and_then(|it| it.as_mut())
    }

    pub(crate) fn del_and_get(&mut self, entity: &E) -> V {
        let Some(index) = self.by_entity.remove(entity) else {
            panic!("attempt to remove absent {}", type_name::<V>());
        };
        if index == self.buffer.len() - 1 {
            self.buffer
                .pop()
                .flatten()
                .expect("mapped slot is always occupied")
        } else {
            self.holes.push_back(index);
            self.buffer[index]
                .take()
                .expect("mapped slot is always occupied")
        }
    }
}

impl<E: Copy + Eq + Hash + 'static, V: 'static> AbstractPool<E> for SpecificPool<E, V> {
    fn value_type(&self) -> TypeId {
        TypeId::of::<V>()
    }

    fn value_type_name(&self) -> &'static str {
        type_name::<V>()
    }

    fn len(&self) -> usize {
        self.by_entity.len()
    }

    fn add_any(&mut self, entity: E, value: Box<dyn Any>) {
        self.add(entity, downcast_value(value));
    }

    fn update_any(&mut self, entity: E, value: Box<dyn Any>) {
        self.update(entity, downcast_value(value));
    }

    fn del(&mut self, entity: &E) {
        self.del_and_get(entity);
    }

    fn as_any_mut(&mut self) -> AnyPoolMut<'_, E> {
        AnyPoolMut {
            any: self,
            pd: Default::default(),
        }
    }

    fn as_any(&self) -> AnyPool<'_, E> {
        AnyPool {
            any: self,
            pd: Default::default(),
        }
    }
}

fn downcast_value<V: 'static>(value: Box<dyn Any>) -> V {
    match value.downcast::<V>() {
        Ok(value) => *value,
        Err(_) => panic!("framework BUG: value is not {}", type_name::<V>()),
    }
}
