#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    pub x: u16,
    pub y: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileDelta {
    pub x: i32,
    pub y: i32,
}

/// Square board of `tiles` x `tiles` cells. Everything that has a position
/// lives on this grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    tiles: u16,
    tile_px: u16,
}

impl Grid {
    /// Fits as many whole tiles into `board_px` as possible; the board is
    /// shrunk to the largest multiple of `tile_px` that still fits.
    pub fn fit(board_px: u16, tile_px: u16) -> Grid {
        assert!(tile_px > 0, "tile size must be positive");
        Grid {
            tiles: board_px / tile_px,
            tile_px,
        }
    }

    pub fn tiles(&self) -> u16 {
        self.tiles
    }

    pub fn board_px(&self) -> u16 {
        self.tiles * self.tile_px
    }

    pub fn tile_count(&self) -> u32 {
        u32::from(self.tiles) * u32::from(self.tiles)
    }

    pub fn center(&self) -> Tile {
        Tile {
            x: self.tiles / 2,
            y: self.tiles / 2,
        }
    }

    /// Moves `tile` by `delta`, or `None` if that would leave the board.
    pub fn step(&self, tile: Tile, delta: TileDelta) -> Option<Tile> {
        let x = i32::from(tile.x) + delta.x;
        let y = i32::from(tile.y) + delta.y;
        if x < 0 || x >= i32::from(self.tiles) || y < 0 || y >= i32::from(self.tiles) {
            return None;
        }
        Some(Tile {
            x: x as u16,
            y: y as u16,
        })
    }
}
