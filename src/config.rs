use std::time::Duration;

use crate::coords::Coords;
use crate::error::ConfigError;

/// Everything needed to set up a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    pub head: Coords,
    pub food: Coords,
    /// Seed for food placement; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub tick: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::for_board(20, 20)
    }
}

impl GameConfig {
    /// Head and food on the middle row, a quarter and three quarters across.
    pub fn for_board(height: usize, width: usize) -> Self {
        GameConfig {
            height,
            width,
            head: Coords::new(height / 2, width / 4),
            food: Coords::new(height / 2, width * 3 / 4),
            seed: None,
            tick: Duration::from_millis(60),
        }
    }

    pub fn new(height: usize, width: usize, head: Coords, food: Coords) -> Self {
        GameConfig { head, food, ..GameConfig::for_board(height, width) }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (height, width) = (self.height, self.width);

        // Head, food and at least one free cell for the first respawn.
        if height == 0 || width == 0 || height * width < 3 {
            return Err(ConfigError::BoardTooSmall { height, width });
        }

        for &(what, coords) in &[("head", self.head), ("food", self.food)] {
            if coords.row >= height || coords.col >= width {
                return Err(ConfigError::OutOfBounds { what, coords, height, width });
            }
        }

        if self.head == self.food {
            return Err(ConfigError::Overlap(self.head));
        }

        if self.tick.as_millis() == 0 {
            return Err(ConfigError::ZeroTick);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn board_defaults_put_head_and_food_on_the_middle_row() {
        let config = GameConfig::for_board(20, 20);

        assert_eq!(config.head, Coords::new(10, 5));
        assert_eq!(config.food, Coords::new(10, 15));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn narrow_board_defaults_collide() {
        let config = GameConfig::for_board(5, 1);

        assert_eq!(config.validate(), Err(ConfigError::Overlap(Coords::new(2, 0))));
    }

    #[test]
    fn rejects_tiny_boards() {
        let config = GameConfig::new(1, 2, Coords::new(0, 0), Coords::new(0, 1));

        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooSmall { height: 1, width: 2 })
        );
    }

    #[test]
    fn rejects_positions_off_the_board() {
        let config = GameConfig::new(5, 5, Coords::new(0, 0), Coords::new(5, 1));

        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfBounds { what: "food", .. })
        ));
    }

    #[test]
    fn rejects_overlapping_head_and_food() {
        let config = GameConfig::new(5, 5, Coords::new(2, 2), Coords::new(2, 2));

        assert_eq!(config.validate(), Err(ConfigError::Overlap(Coords::new(2, 2))));
    }
}
