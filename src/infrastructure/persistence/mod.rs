mod pg_pool;
mod repositories;

pub use pg_pool::connect_pool;
pub use repositories::{InMemoryJobRepository, PgJobRepository};
