/// Match-style flags — how a target combines its name or attribute checks.
///
/// The same flag set drives both the filename stage and the attribute stage
/// of the evaluator, independently of each other.
use bitflags::bitflags;

bitflags! {
    /// Combinable match-style bits.
    ///
    /// `SKIP` wins over everything else and disables the stage entirely.
    /// `MATCH_ALL` and `MATCH_ANY` are independent checks; when both are set
    /// both must pass. `INVERT` flips the sense of whichever checks are set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct MatchStyle: u8 {
        const SKIP      = 0b0001;
        const MATCH_ALL = 0b0010;
        const MATCH_ANY = 0b0100;
        const INVERT    = 0b1000;
    }
}

impl MatchStyle {
    /// `true` when the stage governed by this style must not be evaluated.
    #[inline]
    pub fn is_skip(self) -> bool {
        self.contains(Self::SKIP)
    }

    /// `true` when the stage's checks are inverted.
    #[inline]
    pub fn is_inverted(self) -> bool {
        self.contains(Self::INVERT)
    }
}
