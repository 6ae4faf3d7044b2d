//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use invite_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with guild_id
#[derive(Debug, Deserialize)]
pub struct GuildIdPath {
    pub guild_id: String,
}

impl GuildIdPath {
    pub fn guild_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.guild_id, "guild_id")
    }
}

/// Path parameters with guild_id and member_id
#[derive(Debug, Deserialize)]
pub struct GuildMemberPath {
    pub guild_id: String,
    pub member_id: String,
}

impl GuildMemberPath {
    pub fn guild_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.guild_id, "guild_id")
    }

    pub fn member_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.member_id, "member_id")
    }

    /// Both ids, guild first
    pub fn ids(&self) -> Result<(Snowflake, Snowflake), ApiError> {
        Ok((self.guild_id()?, self.member_id()?))
    }
}

/// Path parameters with guild_id and role_id
#[derive(Debug, Deserialize)]
pub struct GuildRolePath {
    pub guild_id: String,
    pub role_id: String,
}

impl GuildRolePath {
    pub fn guild_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.guild_id, "guild_id")
    }

    pub fn role_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.role_id, "role_id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_path_parsing() {
        let path = GuildMemberPath {
            guild_id: "100".to_string(),
            member_id: "77".to_string(),
        };
        assert_eq!(path.ids().unwrap(), (Snowflake::new(100), Snowflake::new(77)));
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let path = GuildRolePath {
            guild_id: "100".to_string(),
            role_id: "gold".to_string(),
        };
        let err = path.role_id().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PATH_PARAMETER");
        assert_eq!(err.to_string(), "Invalid path parameter: Invalid role_id format");
    }
}
