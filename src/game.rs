use std::{cmp::max, thread::sleep, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;

use autosnake::{Autopilot, Coords, GameConfig, GameState, Grid, Occupant, Tick};

use crate::term::{ScreenPos, TermInt, TermManager};

const TICK_INTERVAL_MS: u64 = 5;
const MIN_STEP_MS: u64 = TICK_INTERVAL_MS;
const MAX_STEP_MS: u64 = 2000;

const SNAKE_HEAD_CHAR: char = '@';
const SNAKE_BODY_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

/// Each board cell is two terminal columns wide so the board looks square.
const CELL_WIDTH: TermInt = 2;

pub enum Flow {
    Again,
    Quit,
}

pub struct SnakeGame {
    config: GameConfig,
    step_ms: u64,
    paused: bool,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        let term = TermManager::new().context("reading terminal size")?;
        let step_ms = clamp_step_ms(config.tick.as_millis().min(u128::from(MAX_STEP_MS)) as u64);
        Ok(SnakeGame { config, step_ms, paused: false, term })
    }

    pub fn initialize(&mut self) -> Result<()> {
        // Frame plus one status line, computed wide to avoid overflowing TermInt
        let need_w = self.config.width * CELL_WIDTH as usize + 2;
        let need_h = self.config.height + 2;
        let (w, h) = self.term.get_terminal_size();
        if need_w > w as usize || need_h + 1 > h as usize {
            bail!(
                "a {}x{} board needs a {}x{} terminal, found {}x{}",
                self.config.height,
                self.config.width,
                need_w,
                need_h + 1,
                w,
                h
            );
        }

        self.term.setup().context("setting up terminal")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore().context("restoring terminal")
    }

    pub fn show_intro(&mut self) -> Result<Flow> {
        let lines = &[
            "The snake steers itself",
            "+ / - to change speed",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin",
        ];

        self.term.show_message(lines)?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        Ok(Flow::Again)
    }

    pub fn play(&mut self) -> Result<Flow> {
        let frame = self.frame_size();
        self.term.clear()?;
        self.term.draw_borders(frame)?;
        self.term.hide_message()?;

        let mut state = GameState::new(&self.config)?;
        let mut pilot = Autopilot::new();
        let mut ticks_until_step = self.ticks_per_step();

        self.print_board(state.grid())?;
        self.print_status(&state)?;

        loop {
            sleep(Duration::from_millis(TICK_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match &key_ev {
                    ev if is_ctrl_c(ev) => return Ok(Flow::Quit),
                    KeyEvent { code, modifiers: _ } => match code {
                        KeyCode::Char('+') | KeyCode::Char('=') => self.change_speed(true),
                        KeyCode::Char('-') => self.change_speed(false),
                        KeyCode::Esc => self.toggle_pause()?,
                        _ => {}
                    },
                }
            }

            if self.paused {
                continue;
            }

            ticks_until_step -= 1;
            if ticks_until_step > 0 {
                continue;
            }
            ticks_until_step = self.ticks_per_step();

            let before = state.grid().clone();
            let tick = pilot.advance(&mut state)?;
            self.print_board_update(&before, state.grid())?;
            self.print_status(&state)?;

            if tick.is_over() {
                self.game_over(&state, tick)?;
                break;
            }
        }

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            Ok(Flow::Quit)
        } else {
            Ok(Flow::Again)
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn frame_size(&self) -> ScreenPos {
        (
            self.config.width as TermInt * CELL_WIDTH + 2,
            self.config.height as TermInt + 2,
        )
    }

    fn ticks_per_step(&self) -> u64 {
        max(self.step_ms / TICK_INTERVAL_MS, 1)
    }

    fn change_speed(&mut self, faster: bool) {
        self.step_ms = next_step_ms(self.step_ms, faster);
    }

    fn game_over(&mut self, state: &GameState, tick: Tick) -> Result<()> {
        let headline = if tick == Tick::Won { "Board filled!" } else { "Snake is stuck!" };
        info!("game over after {} moves: {:?}, score {}", state.moves(), tick, state.score());

        if tick == Tick::Stuck {
            for &pos in state.trail().iter().chain(std::iter::once(&state.head())) {
                self.print_cell(pos, DEAD_SNAKE_CHAR)?;
            }
        }

        self.term.show_message(&[
            headline,
            &*format!("Score: {}", state.score()),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit.",
        ])?;
        Ok(())
    }

    fn print_board(&mut self, grid: &Grid) -> Result<()> {
        for (pos, occupant) in grid.iter() {
            self.print_cell(pos, glyph(occupant))?;
        }
        self.term.flush()?;
        Ok(())
    }

    fn print_board_update(&mut self, before: &Grid, after: &Grid) -> Result<()> {
        for ((pos, old), (_, new)) in before.iter().zip(after.iter()) {
            if old != new {
                self.print_cell(pos, glyph(new))?;
            }
        }
        self.term.flush()?;
        Ok(())
    }

    fn print_status(&mut self, state: &GameState) -> Result<()> {
        let y = self.frame_size().1;
        let line = format!("Score: {:<6} Moves: {:<8}", state.score(), state.moves());
        self.term.print_str_at((0, y), &line)?;
        self.term.flush()?;
        Ok(())
    }

    fn print_cell(&mut self, pos: Coords, ch: char) -> Result<()> {
        let x = 1 + pos.col as TermInt * CELL_WIDTH;
        let y = 1 + pos.row as TermInt;
        for dx in 0..CELL_WIDTH {
            self.term.print_at((x + dx, y), ch)?;
        }
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}

fn clamp_step_ms(step_ms: u64) -> u64 {
    step_ms.max(MIN_STEP_MS).min(MAX_STEP_MS)
}

fn next_step_ms(step_ms: u64, faster: bool) -> u64 {
    if faster {
        clamp_step_ms(step_ms / 2)
    } else {
        clamp_step_ms(step_ms.saturating_mul(2))
    }
}

fn glyph(occupant: &Occupant) -> char {
    match occupant {
        Occupant::Empty => ' ',
        Occupant::Food => APPLE_CHAR,
        Occupant::Head => SNAKE_HEAD_CHAR,
        Occupant::Body { .. } => SNAKE_BODY_CHAR,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn huge_tick_is_clamped() {
        assert_eq!(clamp_step_ms(u64::MAX), MAX_STEP_MS);
        assert_eq!(clamp_step_ms(0), MIN_STEP_MS);
        assert_eq!(clamp_step_ms(60), 60);
    }

    #[test]
    fn speed_changes_stay_in_range() {
        assert_eq!(next_step_ms(u64::MAX, false), MAX_STEP_MS);
        assert_eq!(next_step_ms(1500, false), MAX_STEP_MS);
        assert_eq!(next_step_ms(60, false), 120);
        assert_eq!(next_step_ms(60, true), 30);
        assert_eq!(next_step_ms(MIN_STEP_MS, true), MIN_STEP_MS);
    }
}
