#![allow(clippy::new_without_default)]

pub(crate) mod component;
pub(crate) mod component_core;
pub(crate) mod component_ref;
pub(crate) mod component_type_set;
pub(crate) mod core_result;
pub(crate) mod entity_collection;
pub(crate) mod entity_key;
pub(crate) mod internal;
pub(crate) mod mantle;
pub(crate) mod mantle_events;
pub(crate) mod observer;
pub(crate) mod query;
pub(crate) mod utils;
pub(crate) mod world;
pub(crate) mod world_configure;

pub use component::*;
pub use component_core::Core;
pub use component_ref::*;
pub use component_type_set::*;
pub use core_result::*;
pub use entity_collection::*;
pub use entity_key::*;
pub use internal::operation_log::FlushResult;
pub use mantle::Mantle;
pub use observer::*;
pub use query::*;
pub use world::World;
pub use world_configure::*;
