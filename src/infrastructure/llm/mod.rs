pub mod contract;
mod mock_generator;
mod openai_generator;
pub mod retry;

pub use mock_generator::MockItineraryGenerator;
pub use openai_generator::OpenAiGenerator;
