pub mod answers;
pub mod error;
pub mod invite;
pub mod pagination;
pub mod questionnaire;
pub mod submission;
pub mod tenure;
pub mod types;
pub mod variant;
pub mod wizard;
