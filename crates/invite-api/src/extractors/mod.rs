//! Axum extractors for request handling
//!
//! Custom extractors for path parameters and validated bodies and queries.

mod path;
mod validated;

pub use path::{GuildIdPath, GuildMemberPath, GuildRolePath};
pub use validated::{ValidatedJson, ValidatedQuery};
