pub(crate) mod query_desc;
pub(crate) mod query_manager;
pub(crate) mod query_storage;

pub use query_desc::Query;
pub use query_desc::QueryId;
pub use query_desc::QueryTransition;
pub use query_manager::QueryManager;
