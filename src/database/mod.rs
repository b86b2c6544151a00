pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryProjectStore, MemoryUserStore};
pub use postgres::{PgProjectStore, PgUserStore};
pub use store::{ProjectStore, StoreError, UserStore};
