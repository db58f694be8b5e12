use crate::grid::TileDelta;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

impl From<Direction> for TileDelta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::North => TileDelta { x: 0, y: -1 },
            Direction::South => TileDelta { x: 0, y: 1 },
            Direction::East => TileDelta { x: 1, y: 0 },
            Direction::West => TileDelta { x: -1, y: 0 },
        }
    }
}

/// Double-buffered direction input. `active` is the direction applied on the
/// current step, `pending` holds the next buffered turn; `None` means the
/// snek has not started moving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionBuffer {
    active: Option<Direction>,
    pending: Option<Direction>,
}

impl DirectionBuffer {
    /// Buffers `candidate` for the next step. Exact reversals and repeats of
    /// the reference direction are ignored. The first direction of a run
    /// also becomes active immediately, so the snek moves on the very next
    /// tick instead of waiting one out.
    pub fn request(&mut self, candidate: Direction) {
        let reference = self.active.or(self.pending);
        if let Some(reference) = reference {
            if candidate == reference || candidate == reference.opposite() {
                return;
            }
        }
        self.pending = Some(candidate);
        if self.active.is_none() {
            self.active = Some(candidate);
        }
    }

    /// Applies the buffered turn. Called once per step, before movement;
    /// `request` always validates against the last committed direction, so a
    /// rapid pair of inputs between two ticks can never turn the snek back
    /// on itself.
    pub fn commit(&mut self) -> Option<Direction> {
        if let Some(pending) = self.pending.take() {
            self.active = Some(pending);
        }
        self.active
    }

    pub fn active(&self) -> Option<Direction> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::South.opposite(), Direction::North);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::West.opposite(), Direction::East);

        // Double opposite returns to the original for all directions
        assert_eq!(Direction::North.opposite().opposite(), Direction::North);
        assert_eq!(Direction::East.opposite().opposite(), Direction::East);
    }

    #[test]
    fn test_unit_deltas() {
        assert_eq!(TileDelta::from(Direction::North), TileDelta { x: 0, y: -1 });
        assert_eq!(TileDelta::from(Direction::South), TileDelta { x: 0, y: 1 });
        assert_eq!(TileDelta::from(Direction::East), TileDelta { x: 1, y: 0 });
        assert_eq!(TileDelta::from(Direction::West), TileDelta { x: -1, y: 0 });
    }

    #[test]
    fn test_first_request_applies_immediately() {
        let mut buffer = DirectionBuffer::default();
        assert_eq!(buffer.active(), None);

        buffer.request(Direction::North);
        assert_eq!(buffer.active(), Some(Direction::North));
        assert_eq!(buffer.commit(), Some(Direction::North));
    }

    #[test]
    fn test_reversal_rejected_while_stationary() {
        // North then South before any commit: the second call is a no-op
        // because the first request is already the reference.
        let mut buffer = DirectionBuffer::default();
        buffer.request(Direction::North);
        buffer.request(Direction::South);

        assert_eq!(buffer.active(), Some(Direction::North));
        assert_eq!(buffer.commit(), Some(Direction::North));
    }

    #[test]
    fn test_reversal_rejected_while_moving() {
        let mut buffer = DirectionBuffer::default();
        buffer.request(Direction::East);
        buffer.commit();

        buffer.request(Direction::West);
        assert_eq!(buffer.commit(), Some(Direction::East));
    }

    #[test]
    fn test_same_direction_not_rebuffered() {
        let mut buffer = DirectionBuffer::default();
        buffer.request(Direction::East);
        buffer.commit();

        buffer.request(Direction::East);
        assert_eq!(buffer.pending, None);
    }

    #[test]
    fn test_buffered_turn_applies_on_commit() {
        let mut buffer = DirectionBuffer::default();
        buffer.request(Direction::East);
        buffer.commit();

        buffer.request(Direction::North);
        assert_eq!(buffer.active(), Some(Direction::East));
        assert_eq!(buffer.commit(), Some(Direction::North));
        assert_eq!(buffer.pending, None);
    }

    #[test]
    fn test_rapid_inputs_cannot_reverse_across_a_tick() {
        let mut buffer = DirectionBuffer::default();
        buffer.request(Direction::East);
        buffer.commit();

        // North then West within one tick: West is still the exact opposite
        // of the committed direction, so it never lands in the buffer.
        buffer.request(Direction::North);
        buffer.request(Direction::West);
        assert_eq!(buffer.commit(), Some(Direction::North));
    }

    #[test]
    fn test_pending_can_be_replaced_before_commit() {
        let mut buffer = DirectionBuffer::default();
        buffer.request(Direction::East);
        buffer.commit();

        // Both perpendicular to East; the later one wins.
        buffer.request(Direction::North);
        buffer.request(Direction::South);
        assert_eq!(buffer.commit(), Some(Direction::South));
    }

    #[test]
    fn test_commit_without_pending_keeps_active() {
        let mut buffer = DirectionBuffer::default();
        assert_eq!(buffer.commit(), None);

        buffer.request(Direction::West);
        buffer.commit();
        assert_eq!(buffer.commit(), Some(Direction::West));
    }
}
