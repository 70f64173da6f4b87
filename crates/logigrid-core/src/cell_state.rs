//! Cell states and manual transitions.

/// What is known about one pair of items.
///
/// Only [`Empty`], [`False`], [`True`] and [`FalseAuto`] occur during play.
/// [`TrueCorrect`], [`TrueIncorrect`] and [`Missed`] exist only in the
/// comparison grid shown once a game is lost.
///
/// [`Empty`]: CellState::Empty
/// [`False`]: CellState::False
/// [`True`]: CellState::True
/// [`FalseAuto`]: CellState::FalseAuto
/// [`TrueCorrect`]: CellState::TrueCorrect
/// [`TrueIncorrect`]: CellState::TrueIncorrect
/// [`Missed`]: CellState::Missed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum CellState {
    /// No information.
    #[default]
    Empty,
    /// Excluded by the player.
    False,
    /// Affirmed by the player.
    True,
    /// Excluded by deduction from another affirmed cell.
    FalseAuto,
    /// Affirmed by the player and part of the solution.
    TrueCorrect,
    /// Affirmed by the player but not part of the solution.
    TrueIncorrect,
    /// Part of the solution but never affirmed by the player.
    Missed,
}

/// A manual action on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum CellAction {
    /// Primary interaction.
    Affirm,
    /// Secondary interaction.
    Exclude,
}

impl CellAction {
    /// Maps the presentation layer's "secondary gesture" flag to an action.
    #[must_use]
    #[inline]
    pub const fn from_secondary(secondary: bool) -> Self {
        if secondary { Self::Exclude } else { Self::Affirm }
    }
}

impl CellState {
    /// Returns the state reached by applying `action` to this state.
    ///
    /// | current | affirm | exclude |
    /// |---|---|---|
    /// | `Empty` | `True` | `False` |
    /// | `FalseAuto` | `True` | `Empty` |
    /// | `True` | `False` | `Empty` |
    /// | `False` | `Empty` | `Empty` |
    ///
    /// Returns `None` for comparison-only states, which accept no input.
    ///
    /// # Examples
    ///
    /// ```
    /// use logigrid_core::{CellAction, CellState};
    ///
    /// let cycle = [CellState::True, CellState::False, CellState::Empty];
    /// let mut state = CellState::Empty;
    /// for expected in cycle {
    ///     state = state.after(CellAction::Affirm).unwrap();
    ///     assert_eq!(state, expected);
    /// }
    /// ```
    #[must_use]
    pub const fn after(self, action: CellAction) -> Option<Self> {
        let next = match (self, action) {
            (Self::Empty | Self::FalseAuto, CellAction::Affirm) => Self::True,
            (Self::True, CellAction::Affirm) => Self::False,
            (Self::Empty, CellAction::Exclude) => Self::False,
            (Self::False, _) | (Self::FalseAuto | Self::True, CellAction::Exclude) => Self::Empty,
            (Self::TrueCorrect | Self::TrueIncorrect | Self::Missed, _) => return None,
        };
        Some(next)
    }

    /// Returns `true` for the four states that occur during play.
    #[must_use]
    #[inline]
    pub const fn is_play_state(self) -> bool {
        matches!(self, Self::Empty | Self::False | Self::True | Self::FalseAuto)
    }

    /// Returns `true` if the player set this state directly.
    #[must_use]
    #[inline]
    pub const fn is_manual(self) -> bool {
        matches!(self, Self::False | Self::True)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirm_transitions() {
        let affirm = CellAction::Affirm;
        assert_eq!(CellState::Empty.after(affirm), Some(CellState::True));
        assert_eq!(CellState::FalseAuto.after(affirm), Some(CellState::True));
        assert_eq!(CellState::True.after(affirm), Some(CellState::False));
        assert_eq!(CellState::False.after(affirm), Some(CellState::Empty));
    }

    #[test]
    fn test_exclude_transitions() {
        let exclude = CellAction::Exclude;
        assert_eq!(CellState::Empty.after(exclude), Some(CellState::False));
        assert_eq!(CellState::FalseAuto.after(exclude), Some(CellState::Empty));
        assert_eq!(CellState::True.after(exclude), Some(CellState::Empty));
        assert_eq!(CellState::False.after(exclude), Some(CellState::Empty));
    }

    #[test]
    fn test_comparison_states_reject_input() {
        for state in [
            CellState::TrueCorrect,
            CellState::TrueIncorrect,
            CellState::Missed,
        ] {
            assert!(!state.is_play_state());
            assert_eq!(state.after(CellAction::Affirm), None);
            assert_eq!(state.after(CellAction::Exclude), None);
        }
    }

    #[test]
    fn test_secondary_flag_maps_to_exclude() {
        assert!(CellAction::from_secondary(true).is_exclude());
        assert!(CellAction::from_secondary(false).is_affirm());
    }
}
