//! Agent identifiers.

use std::fmt;

/// Ordinal of an agent in the model's population arena.
///
/// Assigned in creation order, starting at zero, and never reused; the
/// population order of a tick and the layout of the state vector both follow
/// it.  Prefer [`AgentId::index`] over `id.0 as usize` when indexing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

impl TryFrom<usize> for AgentId {
    type Error = std::num::TryFromIntError;

    fn try_from(n: usize) -> Result<AgentId, Self::Error> {
        u32::try_from(n).map(AgentId)
    }
}
