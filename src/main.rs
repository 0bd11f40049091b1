mod game;
mod term;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::error;

use autosnake::{Coords, GameConfig};
use game::{Flow, SnakeGame};

#[derive(Parser)]
#[command(name = "autosnake")]
#[command(version, about = "Snake that finds its own way to the food")]
struct Cli {
    /// Board height in cells
    #[arg(long, default_value_t = 20)]
    height: usize,

    /// Board width in cells
    #[arg(long, default_value_t = 20)]
    width: usize,

    /// Starting head row (defaults to the middle row)
    #[arg(long)]
    head_row: Option<usize>,

    /// Starting head column (defaults to a quarter of the width)
    #[arg(long)]
    head_col: Option<usize>,

    /// Starting food row (defaults to the middle row)
    #[arg(long)]
    food_row: Option<usize>,

    /// Starting food column (defaults to three quarters of the width)
    #[arg(long)]
    food_col: Option<usize>,

    /// Seed for food placement, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between moves
    #[arg(long, default_value_t = 60)]
    tick_ms: u64,
}

impl Cli {
    fn into_config(self) -> GameConfig {
        let base = GameConfig::for_board(self.height, self.width);
        GameConfig {
            head: Coords::new(
                self.head_row.unwrap_or(base.head.row),
                self.head_col.unwrap_or(base.head.col),
            ),
            food: Coords::new(
                self.food_row.unwrap_or(base.food.row),
                self.food_col.unwrap_or(base.food.col),
            ),
            seed: self.seed,
            tick: Duration::from_millis(self.tick_ms),
            ..base
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = Cli::parse().into_config();
    config.validate()?;

    let mut game = SnakeGame::new(config)?;
    game.initialize()?;

    let result = run(&mut game);
    let restored = game.restore();
    finish(result, restored)
}

/// A failed round outranks a failed terminal restore, which is only logged.
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Err(e), Err(restore_err)) => {
            error!("{:#}", restore_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), restored) => restored,
    }
}

fn run(game: &mut SnakeGame) -> Result<()> {
    if let Flow::Quit = game.show_intro()? {
        return Ok(());
    }

    // Each round ends on a key press: CTRL+C quits, anything else restarts
    while let Flow::Again = game.play()? {}

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn round_error_survives_a_failed_restore() {
        let err = finish(Err(anyhow!("board dump")), Err(anyhow!("restore failed"))).unwrap_err();

        assert_eq!(err.to_string(), "board dump");
    }

    #[test]
    fn restore_error_surfaces_after_a_clean_round() {
        let err = finish(Ok(()), Err(anyhow!("restore failed"))).unwrap_err();

        assert_eq!(err.to_string(), "restore failed");
        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}
