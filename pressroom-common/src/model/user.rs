use crate::model::Id;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENT_USER_ID: u64 = 1;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct UserMarker;

/// The signed-in user of a session.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct User {
    pub id: Id<UserMarker>,
    pub name: String,
    pub avatar: String,
}
