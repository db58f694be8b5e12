use std::time::Duration;

use log::{info, warn};
use rand::Rng;

use crate::direction::{Direction, DirectionBuffer};
use crate::food::place_food;
use crate::grid::{Grid, Tile};
use crate::particles::ParticleField;
use crate::snek::Snek;

pub const FOOD_REWARD: u32 = 10;
pub const LEVEL_STRIDE: u32 = 50;
pub const BASE_STEP: Duration = Duration::from_millis(100);
pub const STEP_FLOOR: Duration = Duration::from_millis(50);
const STEP_DECREMENT_MS: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// No direction chosen yet; nothing moved.
    Waiting,
    /// Normal movement, no special events.
    Ongoing,
    /// Ate food. Carries the new step period when the level went up.
    Nommed { new_period: Option<Duration> },
    /// Every tile is snek; there is nowhere left to put food.
    Filled,
    /// Hit a wall or itself; the run is over.
    Collision(Collision),
}

/// One playthrough. Owns the snek, the food tile, the direction buffer, the
/// particles and all counters; built by [`Session::start`] and thrown away
/// when the run ends.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    grid: Grid,
    snek: Snek,
    food: Tile,
    directions: DirectionBuffer,
    particles: ParticleField,
    score: u32,
    level: u32,
    elapsed_secs: u64,
    step_period: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            grid: Grid::default(),
            snek: Snek::default(),
            food: Tile::default(),
            directions: DirectionBuffer::default(),
            particles: ParticleField::default(),
            score: 0,
            level: 1,
            elapsed_secs: 0,
            step_period: BASE_STEP,
        }
    }
}

impl Session {
    /// Begins a fresh run on `grid`. Refuses boards too small to hold a
    /// one-tile snek and a food tile at the same time.
    pub fn start(grid: Grid, rng: &mut impl Rng) -> Option<Session> {
        if grid.tile_count() < 2 {
            warn!(
                "refusing to start on a {}x{} board",
                grid.tiles(),
                grid.tiles()
            );
            return None;
        }

        let snek = Snek::hatch(grid.center());
        let food = place_food(rng, &grid, &snek);
        Some(Session {
            grid,
            snek,
            food,
            ..Session::default()
        })
    }

    pub fn request_direction(&mut self, dir: Direction) {
        self.directions.request(dir);
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self, rng: &mut impl Rng) -> StepResult {
        let Some(dir) = self.directions.commit() else {
            return StepResult::Waiting;
        };

        let Some(new_head) = self.grid.step(self.snek.head(), dir.into()) else {
            return StepResult::Collision(Collision::Wall);
        };

        // Checked against the pre-growth body: the tail tile still counts as
        // an obstacle even though it is about to vacate this tick.
        if self.snek.occupies(new_head) {
            return StepResult::Collision(Collision::Body);
        }

        self.snek.advance(new_head);

        let result = if new_head == self.food {
            self.score += FOOD_REWARD;
            self.particles.spawn_burst(rng, self.food);
            let new_period = self.level_up();
            if self.snek.len() as u32 == self.grid.tile_count() {
                StepResult::Filled
            } else {
                self.food = place_food(rng, &self.grid, &self.snek);
                StepResult::Nommed { new_period }
            }
        } else {
            self.snek.drop_tail();
            StepResult::Ongoing
        };

        if !self.particles.is_empty() {
            self.particles.advance();
        }
        result
    }

    /// Recomputes the level from the score and, when it rose, derives the
    /// new step period. The level never drops within a run.
    fn level_up(&mut self) -> Option<Duration> {
        let level = self.score / LEVEL_STRIDE + 1;
        if level <= self.level {
            return None;
        }
        self.level = level;

        let millis = (BASE_STEP.as_millis() as u64)
            .saturating_sub(u64::from(level - 1) * STEP_DECREMENT_MS);
        self.step_period = Duration::from_millis(millis).max(STEP_FLOOR);
        info!(
            "reached level {}, step period now {}ms",
            level,
            self.step_period.as_millis()
        );
        Some(self.step_period)
    }

    pub fn tick_second(&mut self) {
        self.elapsed_secs += 1;
    }

    /// Elapsed play time as MM:SS.
    pub fn elapsed_display(&self) -> String {
        format!("{:02}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snek(&self) -> &Snek {
        &self.snek
    }

    pub fn food(&self) -> Tile {
        self.food
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn heading(&self) -> Option<Direction> {
        self.directions.active()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn step_period(&self) -> Duration {
        self.step_period
    }
}
