pub(crate) mod component_pool;
pub(crate) mod component_pool_manager;
pub(crate) mod operation_log;
