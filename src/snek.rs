use std::collections::VecDeque;

use crate::grid::Tile;

/// The snek itself: head at the front, tail at the back. Segments stay
/// pairwise distinct for as long as the run is alive.
#[derive(Clone, Debug, PartialEq)]
pub struct Snek {
    segments: VecDeque<Tile>,
}

impl Default for Snek {
    fn default() -> Self {
        Snek::hatch(Tile::default())
    }
}

impl Snek {
    pub fn hatch(at: Tile) -> Snek {
        Snek {
            segments: VecDeque::from([at]),
        }
    }

    pub fn head(&self) -> Tile {
        *self.segments.front().expect("snek always has a head")
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn occupies(&self, tile: Tile) -> bool {
        self.segments.contains(&tile)
    }

    pub fn advance(&mut self, new_head: Tile) {
        self.segments.push_front(new_head);
    }

    pub fn drop_tail(&mut self) {
        self.segments.pop_back();
    }

    pub fn segments(&self) -> &VecDeque<Tile> {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hatchling_is_one_segment() {
        let snek = Snek::hatch(Tile { x: 5, y: 5 });
        assert_eq!(snek.len(), 1);
        assert_eq!(snek.head(), Tile { x: 5, y: 5 });
        assert!(snek.occupies(Tile { x: 5, y: 5 }));
    }

    #[test]
    fn test_advance_prepends_head() {
        let mut snek = Snek::hatch(Tile { x: 5, y: 5 });
        snek.advance(Tile { x: 6, y: 5 });

        assert_eq!(snek.head(), Tile { x: 6, y: 5 });
        assert_eq!(snek.len(), 2);
        assert!(snek.occupies(Tile { x: 5, y: 5 }));
    }

    #[test]
    fn test_movement_without_growth() {
        let mut snek = Snek::hatch(Tile { x: 3, y: 5 });
        snek.advance(Tile { x: 4, y: 5 });
        snek.advance(Tile { x: 5, y: 5 });

        // One step east: new head in, old tail out, length unchanged.
        snek.advance(Tile { x: 6, y: 5 });
        snek.drop_tail();

        assert_eq!(snek.len(), 3);
        assert_eq!(snek.head(), Tile { x: 6, y: 5 });
        assert!(!snek.occupies(Tile { x: 3, y: 5 }));
        assert!(snek.occupies(Tile { x: 4, y: 5 }));
    }

    #[test]
    fn test_occupies_checks_every_segment() {
        let mut snek = Snek::hatch(Tile { x: 2, y: 2 });
        snek.advance(Tile { x: 2, y: 3 });
        snek.advance(Tile { x: 2, y: 4 });

        // Head, middle and tail all count as obstacles.
        assert!(snek.occupies(Tile { x: 2, y: 4 }));
        assert!(snek.occupies(Tile { x: 2, y: 3 }));
        assert!(snek.occupies(Tile { x: 2, y: 2 }));
        assert!(!snek.occupies(Tile { x: 3, y: 3 }));
    }
}
