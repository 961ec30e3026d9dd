mod itinerary_generator;
mod job_store;
mod token_minter;

pub use itinerary_generator::{GenerationError, ItineraryGenerator};
pub use job_store::{JobStore, JobStoreError};
pub use token_minter::{BearerToken, TokenMintError, TokenMinter};
