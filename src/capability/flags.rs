//! Flag enums used by the bot and the startup check over their bit tables.

use crate::capability::{AssignmentError, BitAssignment};

flag_enum! {
    /// Features a guild has switched on.
    #[derive(poise::ChoiceParameter)]
    pub enum GuildFlag {
        #[name = "Leaderboard"]
        Leaderboard => "Leaderboard",
        #[name = "Activity checks"]
        ActivityChecks => "Activity checks",
        #[name = "Blacklist"]
        Blacklist => "Blacklist",
        // Bans blacklisted users when they are added or when they join.
        #[name = "Auto-ban blacklisted users"]
        AutoBan => "Auto-ban blacklisted users",
        #[name = "Diplomacy"]
        Diplomacy => "Diplomacy",
        #[name = "Proxy"]
        Proxy => "Proxy",
    }
}

flag_enum! {
    /// Bot permissions granted to roles or users.
    #[derive(poise::ChoiceParameter)]
    pub enum Permission {
        // Implies every other permission.
        #[name = "Administrator"]
        Administrator => "Administrator",
        #[name = "Manage permissions"]
        ManagePermissions => "Manage permissions",
        #[name = "Manage blacklist"]
        ManageBlacklist => "Manage blacklist",
        #[name = "Manage leaderboard"]
        ManageLeaderboard => "Manage leaderboard",
        #[name = "Manage ranks"]
        ManageRanks => "Manage ranks",
        #[name = "Manage activity checks"]
        ManageActivityChecks => "Manage activity checks",
        #[name = "Manage diplomacy"]
        ManageDiplomacy => "Manage diplomacy",
        #[name = "Use proxy"]
        UseProxy => "Use proxy",
    }
}

flag_enum! {
    /// Events echoed to a guild's audit log channel.
    #[derive(poise::ChoiceParameter)]
    pub enum AuditEvent {
        #[name = "Permission changes"]
        PermissionChanges => "Permission changes",
        #[name = "Blacklist changes"]
        BlacklistChanges => "Blacklist changes",
        #[name = "Point changes"]
        PointChanges => "Point changes",
        #[name = "Activity checks"]
        ActivityChecks => "Activity checks",
        #[name = "Diplomacy"]
        Diplomacy => "Diplomacy",
        #[name = "Proxy use"]
        ProxyUse => "Proxy use",
    }
}

/// Builds every flag table and reports the first invalid one.
///
/// Called once before the bot connects so a broken table stops startup instead of
/// surfacing on the first permission check.
pub fn verify_flag_tables() -> Result<(), AssignmentError> {
    BitAssignment::<GuildFlag>::standard()?;
    BitAssignment::<Permission>::standard()?;
    BitAssignment::<AuditEvent>::standard()?;

    // Force the shared tables now that construction is known to succeed.
    GuildFlag::assignment();
    Permission::assignment();
    AuditEvent::assignment();

    Ok(())
}
