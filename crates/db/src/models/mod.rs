//! Row structs and DTOs.
//!
//! Each submodule has a `FromRow` + `Serialize` struct matching a table row
//! and, where rows are created through the API, a `Deserialize` create DTO.

pub mod employee;
pub mod invite_link;
pub mod survey_answer;
