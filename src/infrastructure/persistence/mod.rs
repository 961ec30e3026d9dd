mod firestore_store;
mod memory_store;
pub mod wire;

pub use firestore_store::{FIRESTORE_BASE_URL, FirestoreJobStore, JOBS_COLLECTION};
pub use memory_store::InMemoryJobStore;
