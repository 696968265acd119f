pub mod cache;
pub mod client;
pub mod error;
pub mod search;
pub mod store;

pub use cache::DirectoryCache;
pub use client::DirectoryClient;
pub use error::DirectoryError;
pub use search::{StoreSearch, MAX_RESULTS};
pub use store::{normalize, HoursRecord, NamedEntry, NormalizedStore, ScoredStore, StoreRecord};
