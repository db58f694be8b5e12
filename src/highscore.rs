use std::fs;
use std::path::PathBuf;

use log::error;

const HIGH_SCORE_FILE: &str = ".slither_high_score.txt";

/// Persistent best score: one integer in a dot-file. IO failures degrade to
/// a default and get logged, they never stop a game.
#[derive(Debug)]
pub struct HighScore {
    best: u32,
    path: PathBuf,
}

impl HighScore {
    pub fn load() -> HighScore {
        Self::load_from(HIGH_SCORE_FILE)
    }

    fn load_from(path: impl Into<PathBuf>) -> HighScore {
        let path = path.into();
        let best = match fs::read_to_string(&path).map(|s| s.trim().parse().unwrap_or(0)) {
            Ok(best) => best,
            Err(e) => {
                error!("Error loading high score: {}", e);
                0
            }
        };
        HighScore { best, path }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Records `score` if it beats the current best.
    pub fn submit(&mut self, score: u32) {
        if score <= self.best {
            return;
        }
        self.best = score;
        if let Err(e) = fs::write(&self.path, self.best.to_string()) {
            error!("Error saving high score: {}", e);
        }
    }
}
