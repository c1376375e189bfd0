// All repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they accept both a `&PgPool` (direct query) and a `&mut Transaction` (atomic operations).

pub mod bookmark;
pub mod catalog;
pub mod progress;
pub mod quiz;
pub mod seed;
pub mod user;
