use rand::Rng;
use ratatui::style::Color;

use crate::grid::Tile;

pub const BURST_SIZE: usize = 8;
pub const PARTICLE_LIFE: u8 = 20;

// Tiles per tick; symmetric around zero.
const SPREAD: f32 = 0.1;

const PARTICLE_COLORS: [Color; 4] = [
    Color::LightRed,
    Color::LightMagenta,
    Color::Red,
    Color::Magenta,
];

/// One spark of the burst thrown when food gets eaten. Positions are in
/// fractional tile units so the renderer can floor them back to a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    pub life: u8,
    pub color: Color,
}

/// Purely cosmetic; nothing in the simulation reads these back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn spawn_burst(&mut self, rng: &mut impl Rng, tile: Tile) {
        for _ in 0..BURST_SIZE {
            self.particles.push(Particle {
                x: f32::from(tile.x) + 0.5,
                y: f32::from(tile.y) + 0.5,
                vx: rng.gen_range(-SPREAD..SPREAD),
                vy: rng.gen_range(-SPREAD..SPREAD),
                life: PARTICLE_LIFE,
                color: PARTICLE_COLORS[rng.gen_range(0..PARTICLE_COLORS.len())],
            });
        }
    }

    /// Moves every particle by its velocity, ages it, and drops the dead.
    pub fn advance(&mut self) {
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.life -= 1;
            p.life > 0
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
