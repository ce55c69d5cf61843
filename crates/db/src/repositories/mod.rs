//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods that take part in the submission transaction accept any
//! [`sqlx::PgExecutor`] so they run on a pool or inside a transaction.

pub mod employee_repo;
pub mod invite_link_repo;
pub mod survey_answer_repo;

pub use employee_repo::EmployeeRepo;
pub use invite_link_repo::InviteLinkRepo;
pub use survey_answer_repo::SurveyAnswerRepo;
