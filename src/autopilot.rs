use std::collections::VecDeque;

use log::{debug, warn};
use rand::Rng;

use crate::coords::Coords;
use crate::error::GameError;
use crate::occupant::is_passable;
use crate::pathfinder::find_path;
use crate::state::{GameState, MoveOutcome, STEP_COST};

/// What happened during one call to [`Autopilot::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Followed the plan one step.
    Moved { to: Coords },
    /// Followed the plan onto the food; the plan is discarded.
    Ate { at: Coords },
    /// No path to the food; took the first legal step to buy time.
    Wandered { to: Coords },
    /// The next planned step was refused; a new plan is made next tick.
    Replanned,
    /// No legal move exists.
    Stuck,
    /// Every cell is filled by the snake.
    Won,
}

impl Tick {
    pub fn is_over(&self) -> bool {
        matches!(self, Tick::Stuck | Tick::Won)
    }
}

/// Steers the snake along A* plans, replanning whenever food is eaten or a
/// step no longer fits the board.
#[derive(Debug, Default)]
pub struct Autopilot {
    plan: VecDeque<Coords>,
}

impl Autopilot {
    pub fn new() -> Self {
        Autopilot::default()
    }

    /// Steps still queued in the current plan.
    pub fn plan(&self) -> &VecDeque<Coords> {
        &self.plan
    }

    pub fn advance<R: Rng>(&mut self, state: &mut GameState<R>) -> Result<Tick, GameError> {
        if self.plan.is_empty() {
            self.plan = find_path(state).into();
            debug!("planned {} steps from {} to {}", self.plan.len(), state.head(), state.food());
        }

        let target = match self.plan.pop_front() {
            Some(target) => target,
            None => return wander(state),
        };

        match state.step(target) {
            Ok(MoveOutcome::Moved { ate_food: true }) => {
                self.plan.clear();
                Ok(Tick::Ate { at: target })
            }
            Ok(MoveOutcome::Moved { ate_food: false }) => Ok(Tick::Moved { to: target }),
            Ok(MoveOutcome::Rejected) => {
                warn!("planned step {} -> {} no longer legal", state.head(), target);
                self.plan.clear();
                Ok(Tick::Replanned)
            }
            Err(GameError::BoardFull { .. }) => {
                self.plan.clear();
                Ok(Tick::Won)
            }
            Err(e) => Err(e),
        }
    }
}

/// Neighbours of the head that `step` would accept right now.
fn legal_steps<R: Rng>(state: &GameState<R>) -> Vec<Coords> {
    let grid = state.grid();
    grid.neighbors_of(state.head())
        .filter(|&c| grid.cell_at(c).map_or(false, |o| is_passable(*o, STEP_COST)))
        .collect()
}

fn wander<R: Rng>(state: &mut GameState<R>) -> Result<Tick, GameError> {
    let head = state.head();

    for to in legal_steps(state) {
        if let MoveOutcome::Moved { .. } = state.step(to)? {
            warn!("no path from {} to food at {}, wandered to {}", head, state.food(), to);
            return Ok(Tick::Wandered { to });
        }
    }

    warn!("snake stuck at {} with score {}", head, state.score());
    Ok(Tick::Stuck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn state(height: usize, width: usize, head: (usize, usize), food: (usize, usize)) -> GameState {
        let config = GameConfig::new(height, width, head.into(), food.into()).with_seed(11);
        GameState::new(&config).unwrap()
    }

    #[test]
    fn follows_the_plan_to_the_food() {
        let mut state = state(3, 5, (1, 0), (1, 3));
        let mut pilot = Autopilot::new();

        assert_eq!(pilot.advance(&mut state).unwrap(), Tick::Moved { to: Coords::new(1, 1) });
        assert_eq!(pilot.plan().len(), 2);
        assert_eq!(pilot.advance(&mut state).unwrap(), Tick::Moved { to: Coords::new(1, 2) });
        assert_eq!(pilot.advance(&mut state).unwrap(), Tick::Ate { at: Coords::new(1, 3) });
        assert!(pilot.plan().is_empty());
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn stale_plan_is_dropped() {
        let mut state = state(3, 5, (1, 0), (1, 3));
        let mut pilot = Autopilot { plan: vec![Coords::new(2, 4)].into() };

        assert_eq!(pilot.advance(&mut state).unwrap(), Tick::Replanned);
        assert!(pilot.plan().is_empty());
        assert_eq!(state.head(), Coords::new(1, 0));
    }

    #[test]
    fn wanders_when_food_is_unreachable() {
        // One row of four cells. After the first bite the neck at (0,1) still
        // has decay 1, so food respawned at (0,0) is cut off.
        let mut state = state(1, 4, (0, 1), (0, 2));
        let mut pilot = Autopilot::new();

        assert_eq!(pilot.advance(&mut state).unwrap(), Tick::Ate { at: Coords::new(0, 2) });
        let food = state.food();
        let tick = pilot.advance(&mut state).unwrap();

        if food == Coords::new(0, 3) {
            assert_eq!(tick, Tick::Ate { at: food });
        } else {
            // Food behind the neck: the only free neighbour is (0,3).
            assert_eq!(food, Coords::new(0, 0));
            assert_eq!(tick, Tick::Wandered { to: Coords::new(0, 3) });
        }
    }

    fn run_until_over(state: &mut GameState, limit: usize) -> Vec<Tick> {
        let mut pilot = Autopilot::new();
        let mut ticks = Vec::new();

        for _ in 0..limit {
            let tick = pilot.advance(state).unwrap();
            ticks.push(tick);
            if tick.is_over() {
                break;
            }
        }

        ticks
    }

    #[test]
    fn reports_stuck_in_a_dead_end() {
        let mut state = state(1, 4, (0, 1), (0, 2));

        let ticks = run_until_over(&mut state, 10);

        assert_eq!(ticks.last(), Some(&Tick::Stuck), "{:?}", ticks);
        assert_eq!(state.head(), Coords::new(0, 3));
    }

    #[test]
    fn filling_a_tiny_board_wins() {
        let mut state = state(2, 2, (0, 0), (0, 1));

        let ticks = run_until_over(&mut state, 10);

        assert_eq!(ticks.last(), Some(&Tick::Won), "{:?}", ticks);
        // The last food stays on the board: eating it would leave nowhere to respawn.
        assert_eq!(state.score(), 2);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn wandering_only_considers_enterable_neighbours() {
        // After one bite the neck at (0,1) has decay 1 and is skipped.
        let mut state = state(1, 4, (0, 1), (0, 2));
        state.step(Coords::new(0, 2)).unwrap();

        assert_eq!(legal_steps(&state), vec![Coords::new(0, 3)]);
    }
}
