//! Where a generation is in its life cycle.

/// Why a generation stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndReason {
    /// Every agent collided or parked.
    AllDead,
    /// The tick count reached the time budget.
    TimeExpired,
    /// The host asked for a new map mid-generation.
    Aborted,
}

impl EndReason {
    pub fn as_str(self) -> &'static str {
        match self {
            EndReason::AllDead     => "all_dead",
            EndReason::TimeExpired => "time_expired",
            EndReason::Aborted     => "aborted",
        }
    }
}

/// `Idle → Running → Ended(reason) → Running → …`
///
/// The surface has already been regenerated by the time a status reads
/// `Ended`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenerationStatus {
    #[default]
    Idle,
    Running,
    Ended(EndReason),
}

impl GenerationStatus {
    #[inline]
    pub fn is_running(self) -> bool {
        self == GenerationStatus::Running
    }

    #[inline]
    pub fn is_ended(self) -> bool {
        matches!(self, GenerationStatus::Ended(_))
    }
}
