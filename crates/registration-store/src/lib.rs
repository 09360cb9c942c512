//! Durable storage for event registration records.
//!
//! Two interchangeable backends behind the [`Store`] enum: a MongoDB
//! collection and a flat JSON file with an in-memory mirror. Which one
//! runs is a startup configuration choice; callers only see the
//! create/list contract.

mod error;
mod file;
mod mongo;
mod record;
mod store;

pub use error::StoreError;
pub use file::FileStore;
pub use mongo::MongoStore;
pub use record::{NewRegistration, Registration};
pub use store::Store;
