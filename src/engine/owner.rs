use std::fmt;

/// Identifier of the authenticated user a query is scoped to.
///
/// Only the bearer-token extractor (and the CLI, which takes the owner as
/// an explicit argument) construct one; request bodies never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(i32);

impl OwnerId {
    pub fn from_verified(id: i32) -> Self {
        OwnerId(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
