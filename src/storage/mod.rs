//! Persistence for teams, members, guests and computed splits

mod memory;
mod postgres;

pub use memory::InMemoryFormationStore;
pub use postgres::PgFormationStore;
