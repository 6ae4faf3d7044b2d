//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AuditLogRepository, GuildRepository, InviteCodeRepository, InviteLedger, JoinRepository,
    MemberRepository, RankRepository, RepoResult, RoleRepository,
};
