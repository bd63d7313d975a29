use crate::component_core::Core;
use crate::component_type_set::ComponentTypeSet;
use crate::core_result::CoreError;
use crate::core_result::CoreResult;
use crate::entity_key::EntityId;
use log::trace;
use std::collections::VecDeque;

type Operation<E, S> = Box<dyn FnOnce(&mut Core<E, S>) -> CoreResult>;

pub(crate) struct DeferredOperation<E, S: ComponentTypeSet> {
    pub(crate) name: &'static str,
    pub(crate) entity: E,
    pub(crate) apply: Operation<E, S>,
}

pub(crate) struct OperationLog<E, S: ComponentTypeSet> {
    operations: VecDeque<DeferredOperation<E, S>>,
}

#[derive(Debug, Default, Eq, PartialEq)]
pub struct FlushResult {
    pub applied: usize,
    pub errors: Vec<CoreError>,
}

impl FlushResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<E: EntityId, S: ComponentTypeSet> OperationLog<E, S> {
    pub(crate) fn new() -> Self {
        Self {
            operations: VecDeque::new(),
        }
    }

    pub(crate) fn push(
        &mut self,
        name: &'static str,
        entity: E,
        apply: impl FnOnce(&mut Core<E, S>) -> CoreResult + 'static,
    ) {
        trace!("defer {} for {:?}", name, entity);
        self.operations.push_back(DeferredOperation {
            name,
            entity,
            apply: Box::new(apply),
        });
    }

    pub(crate) fn len(&self) -> usize {
        self.operations.len()
    }

    pub(crate) fn apply_to(self, core: &mut Core<E, S>) -> FlushResult {
        let mut result = FlushResult::default();
        for operation in self.operations {
            trace!("apply deferred {} for {:?}", operation.name, operation.entity);
            match (operation.apply)(core) {
                Ok(()) => result.applied += 1,
                Err(error) => result.errors.push(error),
            }
        }
        result
    }
}
