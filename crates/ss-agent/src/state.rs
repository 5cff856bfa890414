//! Agent activation state.

/// Lifecycle of an agent.  Transitions only ever go forward:
/// `NotStarted → Active → Finished`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    /// Waiting at its entrance for its activation time.
    #[default]
    NotStarted,
    /// Walking towards its exit.  Only active agents block others.
    Active,
    /// Left the corridor.  Terminal.
    Finished,
}

impl AgentState {
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, AgentState::Active)
    }

    /// The following state, or `None` for the terminal state.
    #[inline]
    pub fn next(self) -> Option<AgentState> {
        match self {
            AgentState::NotStarted => Some(AgentState::Active),
            AgentState::Active     => Some(AgentState::Finished),
            AgentState::Finished   => None,
        }
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AgentState::NotStarted => "not started",
            AgentState::Active     => "active",
            AgentState::Finished   => "finished",
        };
        f.write_str(s)
    }
}
