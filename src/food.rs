use rand::Rng;

use crate::grid::{Grid, Tile};
use crate::snek::Snek;

/// Picks a free tile uniformly at random, retrying while the candidate lands
/// on the snek. Termination relies on at least one tile being free, so this
/// must not be called once the snek fills the whole board.
pub fn place_food(rng: &mut impl Rng, grid: &Grid, snek: &Snek) -> Tile {
    assert!(
        (snek.len() as u32) < grid.tile_count(),
        "no free tile left to place food on"
    );

    loop {
        let tile = Tile {
            x: rng.gen_range(0..grid.tiles()),
            y: rng.gen_range(0..grid.tiles()),
        };
        if !snek.occupies(tile) {
            return tile;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_food_lands_on_a_free_tile() {
        let grid = Grid::fit(10, 1);
        let mut snek = Snek::hatch(Tile { x: 5, y: 5 });
        snek.advance(Tile { x: 6, y: 5 });
        snek.advance(Tile { x: 7, y: 5 });

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let food = place_food(&mut rng, &grid, &snek);
            assert!(food.x < grid.tiles() && food.y < grid.tiles());
            assert!(!snek.occupies(food));
        }
    }

    #[test]
    fn test_food_finds_the_single_free_tile() {
        // 2x2 board with three tiles taken: only (1, 1) is left.
        let grid = Grid::fit(2, 1);
        let mut snek = Snek::hatch(Tile { x: 0, y: 0 });
        snek.advance(Tile { x: 1, y: 0 });
        snek.advance(Tile { x: 0, y: 1 });

        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(place_food(&mut rng, &grid, &snek), Tile { x: 1, y: 1 });
    }

    #[test]
    fn test_full_board_panics() {
        let grid = Grid::fit(2, 1);
        let mut snek = Snek::hatch(Tile { x: 0, y: 0 });
        snek.advance(Tile { x: 1, y: 0 });
        snek.advance(Tile { x: 0, y: 1 });
        snek.advance(Tile { x: 1, y: 1 });

        let mut rng = StdRng::seed_from_u64(42);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            place_food(&mut rng, &grid, &snek);
        }));
        assert!(result.is_err());
    }
}
