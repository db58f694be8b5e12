use ratatui::prelude::*;

use crate::direction::Direction;
use crate::grid::Tile;
use crate::session::Session;

const FOOD_SYMBOL: &str = "●";
const PARTICLE_SYMBOL: &str = "•";

// Particles this close to death render dim, standing in for the fade-out.
const DIM_BELOW: u8 = 7;

fn head_symbol(heading: Option<Direction>) -> &'static str {
    match heading {
        Some(Direction::North) => "^",
        Some(Direction::South) => "v",
        Some(Direction::East) => ">",
        Some(Direction::West) => "<",
        None => "@",
    }
}

impl Widget for &Session {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let n = self.grid().tiles();
        if n == 0 {
            return;
        }

        // Center the board in the game area; clip whatever does not fit.
        let origin_x = area.x + area.width.saturating_sub(n) / 2;
        let origin_y = area.y + area.height.saturating_sub(n) / 2;
        let to_cell = |tile: Tile| -> Option<(u16, u16)> {
            let x = origin_x + tile.x;
            let y = origin_y + tile.y;
            (x < area.right() && y < area.bottom()).then_some((x, y))
        };

        for ty in 0..n {
            for tx in 0..n {
                if let Some((x, y)) = to_cell(Tile { x: tx, y: ty }) {
                    buf[(x, y)].set_symbol(" ").set_bg(Color::Black);
                }
            }
        }

        if let Some((x, y)) = to_cell(self.food()) {
            buf[(x, y)].set_symbol(FOOD_SYMBOL).set_fg(Color::LightRed);
        }

        for segment in self.snek().segments().iter().skip(1) {
            if let Some((x, y)) = to_cell(*segment) {
                buf[(x, y)].set_symbol(" ").set_bg(Color::Green);
            }
        }

        if let Some((x, y)) = to_cell(self.snek().head()) {
            buf[(x, y)]
                .set_symbol(head_symbol(self.heading()))
                .set_fg(Color::Yellow);
        }

        for particle in self.particles().iter() {
            if particle.x < 0.0
                || particle.y < 0.0
                || particle.x >= f32::from(n)
                || particle.y >= f32::from(n)
            {
                continue;
            }
            let tile = Tile {
                x: particle.x as u16,
                y: particle.y as u16,
            };
            if let Some((x, y)) = to_cell(tile) {
                let cell = &mut buf[(x, y)];
                cell.set_symbol(PARTICLE_SYMBOL).set_fg(particle.color);
                if particle.life < DIM_BELOW {
                    cell.set_style(Style::default().add_modifier(Modifier::DIM));
                }
            }
        }
    }
}
