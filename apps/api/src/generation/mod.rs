// AI generation: builds the model input from a job description and the
// applicant's notes, and turns the reply into a document envelope.
// All model calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
