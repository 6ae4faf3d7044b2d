//! Guild permission bitflags
//!
//! Only the bits the promotion engine reasons about are named; unknown bits
//! coming from the role directory are retained so a round trip is lossless.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Platform permission flags (bit positions match the upstream API)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// Bypasses every permission check
        const ADMINISTRATOR    = 1 << 3;
        const VIEW_CHANNEL     = 1 << 10;
        const SEND_MESSAGES    = 1 << 11;
        /// Create, edit and assign roles
        const MANAGE_ROLES     = 1 << 28;

        const _ = !0;
    }
}

impl Permissions {
    /// Check a required permission, honouring the administrator bypass
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        self.contains(Permissions::ADMINISTRATOR) || self.contains(permission)
    }

    /// Union of the permissions granted by several roles
    pub fn combine<I>(grants: I) -> Self
    where
        I: IntoIterator<Item = Permissions>,
    {
        grants.into_iter().fold(Permissions::empty(), |acc, p| acc | p)
    }

    /// All bits set (guild owners)
    #[inline]
    pub fn owner() -> Self {
        Permissions::from_bits_retain(u64::MAX)
    }

    #[inline]
    pub fn to_i64(self) -> i64 {
        self.bits() as i64
    }

    #[inline]
    pub fn from_i64(bits: i64) -> Self {
        Permissions::from_bits_retain(bits as u64)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.bits())
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u64>()
            .map(Permissions::from_bits_retain)
            .map_err(serde::de::Error::custom)
    }
}
