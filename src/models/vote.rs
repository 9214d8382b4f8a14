//! Vote direction as carried on posts and comments.

use serde::{Deserialize, Deserializer, Serialize};

/// A user's vote on a resource. Serialized as `-1`, `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum VoteValue {
    Down,
    #[default]
    None,
    Up,
}

impl VoteValue {
    /// Signed value used for net-vote arithmetic.
    pub fn as_i64(self) -> i64 {
        match self {
            VoteValue::Down => -1,
            VoteValue::None => 0,
            VoteValue::Up => 1,
        }
    }
}

impl TryFrom<i64> for VoteValue {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(VoteValue::Down),
            0 => Ok(VoteValue::None),
            1 => Ok(VoteValue::Up),
            other => Err(format!("vote value out of range: {}", other)),
        }
    }
}

impl From<VoteValue> for i64 {
    fn from(value: VoteValue) -> Self {
        value.as_i64()
    }
}

/// Treat a JSON `null` vote as no vote.
pub(crate) fn nullable_vote<'de, D>(deserializer: D) -> Result<VoteValue, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<VoteValue>::deserialize(deserializer).map(Option::unwrap_or_default)
}
