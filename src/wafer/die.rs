use serde::Serialize;

/// Test outcome of a single die position on the wafer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DieState {
    /// Die tested and passed (`1`).
    Pass,
    /// Die tested and failed (`X`).
    Fail,
    /// Die passed testing but was reclassified by the neighbor rule (`Y`).
    FailByPrediction,
    /// No die exists at this grid position (`.`).
    NotPresent,
}

impl DieState {
    /// Decode a map character, `None` for anything outside the alphabet.
    pub fn from_char(character: char) -> Option<DieState> {
        match character {
            '1' => Some(DieState::Pass),
            'X' => Some(DieState::Fail),
            'Y' => Some(DieState::FailByPrediction),
            '.' => Some(DieState::NotPresent),
            _ => None,
        }
    }

    /// The map character for this state; inverse of [`DieState::from_char`].
    pub fn to_char(self) -> char {
        match self {
            DieState::Pass => '1',
            DieState::Fail => 'X',
            DieState::FailByPrediction => 'Y',
            DieState::NotPresent => '.',
        }
    }

    /// Whether an actual die sits at this position.
    #[inline]
    pub fn is_present(self) -> bool {
        self != DieState::NotPresent
    }
}

/// One die position together with its state.
///
/// Dies are plain values produced by grid iteration; their identity is the
/// (row, column) pair, the state is payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Die {
    pub row: usize,
    pub column: usize,
    pub state: DieState,
}
