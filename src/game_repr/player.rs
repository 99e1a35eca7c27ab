use std::fmt;

/// One of the two players. The first player moves on even plies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    First,
    Second,
}

impl PlayerId {
    pub const BOTH: [PlayerId; 2] = [PlayerId::First, PlayerId::Second];

    pub fn opponent(self) -> Self {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }

    /// Index into per-player arrays such as `locs`
    pub fn index(self) -> usize {
        match self {
            PlayerId::First => 0,
            PlayerId::Second => 1,
        }
    }

    /// Player to move after `ply_count` plies have been played
    pub fn to_move(ply_count: u32) -> Self {
        if ply_count % 2 == 0 {
            PlayerId::First
        } else {
            PlayerId::Second
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        for player in PlayerId::BOTH {
            assert_ne!(player, player.opponent());
            assert_eq!(player, player.opponent().opponent());
        }
    }

    #[test]
    fn test_to_move_alternates() {
        assert_eq!(PlayerId::to_move(0), PlayerId::First);
        assert_eq!(PlayerId::to_move(1), PlayerId::Second);
        assert_eq!(PlayerId::to_move(10), PlayerId::First);
    }
}
