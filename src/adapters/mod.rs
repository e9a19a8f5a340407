// Adapters layer: concrete implementations of the domain ports (database, processes).

pub mod mongo;
pub mod process;

pub use mongo::{MongoConnector, MongoUserStore};
pub use process::SystemCommandRunner;
