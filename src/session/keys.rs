//! Credential store keys.

use std::fmt;

/// Every key the app writes to the secure store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StoreKey {
    JwtToken,
    UserId,
    Username,
    Name,
    EmailAddress,
    AuthProvider,
    AppleMusicConnected,
    Bio,
    AvatarUrl,
    FollowerCount,
    FollowingCount,
}

impl StoreKey {
    /// All keys, in a stable order.
    pub const ALL: [StoreKey; 11] = [
        StoreKey::JwtToken,
        StoreKey::UserId,
        StoreKey::Username,
        StoreKey::Name,
        StoreKey::EmailAddress,
        StoreKey::AuthProvider,
        StoreKey::AppleMusicConnected,
        StoreKey::Bio,
        StoreKey::AvatarUrl,
        StoreKey::FollowerCount,
        StoreKey::FollowingCount,
    ];

    /// The on-device key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::JwtToken => "jwtToken",
            StoreKey::UserId => "userId",
            StoreKey::Username => "username",
            StoreKey::Name => "name",
            StoreKey::EmailAddress => "emailAddress",
            StoreKey::AuthProvider => "authProvider",
            StoreKey::AppleMusicConnected => "appleMusicConnected",
            StoreKey::Bio => "bio",
            StoreKey::AvatarUrl => "avatarUrl",
            StoreKey::FollowerCount => "followerCount",
            StoreKey::FollowingCount => "followingCount",
        }
    }

    /// Look a key up by its on-device name.
    pub fn from_name(name: &str) -> Option<StoreKey> {
        StoreKey::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
