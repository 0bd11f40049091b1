use std::collections::BTreeSet;

use log::{debug, error, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::GameConfig;
use crate::coords::Coords;
use crate::error::GameError;
use crate::grid::Grid;
use crate::occupant::{is_passable, Occupant};

/// Arrival cost of a single step taken against the live board. Earlier steps
/// of a plan have already ticked the trail, so the cost never accumulates here.
pub const STEP_COST: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { ate_food: bool },
    /// The target was not enterable; nothing changed.
    Rejected,
}

/// The whole simulation: board, positions into it, score and the set of
/// cells currently holding body segments.
#[derive(Debug, Clone)]
pub struct GameState<R = ChaCha8Rng> {
    grid: Grid,
    head: Coords,
    food: Coords,
    score: u32,
    moves: u64,
    trail: BTreeSet<Coords>,
    rng: R,
}

impl GameState {
    /// Sets up a game from `config`, seeding food placement from
    /// `config.seed` or from the OS when no seed was given.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        GameState::with_rng(config, rng)
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;

        let mut grid = Grid::new(config.height, config.width);
        grid.set(config.head, Occupant::Head)?;
        grid.set(config.food, Occupant::Food)?;

        Ok(GameState {
            grid,
            head: config.head,
            food: config.food,
            score: 0,
            moves: 0,
            trail: BTreeSet::new(),
            rng,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn head(&self) -> Coords {
        self.head
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of accepted moves so far.
    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn trail(&self) -> &BTreeSet<Coords> {
        &self.trail
    }

    pub fn is_board_full(&self) -> bool {
        self.grid.count(|o| *o == Occupant::Empty) == 0
    }

    /// Moves the head onto `target` if it is an adjacent, enterable cell.
    ///
    /// A rejected move leaves the state untouched. Eating food grows the
    /// score and relocates the food; any other move ticks the trail down.
    ///
    /// Reaching the food when no empty cell is left for its replacement
    /// returns `BoardFull` before anything moves, so the final board still
    /// passes [`GameState::check_invariants`].
    pub fn step(&mut self, target: Coords) -> Result<MoveOutcome, GameError> {
        let occupant = *self.grid.cell_at(target)?;

        if !self.head.is_adjacent(target) || !is_passable(occupant, STEP_COST) {
            debug!("rejected step {} -> {} onto {:?}", self.head, target, occupant);
            return Ok(MoveOutcome::Rejected);
        }

        let ate_food = occupant == Occupant::Food;
        // Eating turns food into head and head into body, so the empty count
        // the respawn will see is the one we have now.
        if ate_food && self.is_board_full() {
            return Err(self.board_full());
        }

        if ate_food {
            self.score += 1;
        } else {
            self.decay_trail()?;
        }

        self.grid.set(self.head, Occupant::body(self.score))?;
        self.trail.insert(self.head);
        self.grid.set(target, Occupant::Head)?;
        self.head = target;
        self.moves += 1;

        if ate_food {
            info!("ate food at {}, score {}", target, self.score);
            self.respawn_food()?;
        }

        if cfg!(debug_assertions) {
            self.check_invariants()?;
        }

        Ok(MoveOutcome::Moved { ate_food })
    }

    /// Places food on a uniformly chosen empty cell.
    pub fn respawn_food(&mut self) -> Result<Coords, GameError> {
        if self.is_board_full() {
            return Err(self.board_full());
        }

        let width = self.grid.width();
        let cells = self.grid.len();

        loop {
            let i = self.rng.gen_range(0..cells);
            let candidate = Coords::new(i / width, i % width);

            if *self.grid.cell_at(candidate)? == Occupant::Empty {
                self.grid.set(candidate, Occupant::Food)?;
                self.food = candidate;
                info!("food respawned at {}", candidate);
                return Ok(candidate);
            }
        }
    }

    /// Verifies the single head, the single food and that the trail matches
    /// the body cells on the board exactly.
    pub fn check_invariants(&self) -> Result<(), GameError> {
        let heads = self.grid.count(|o| *o == Occupant::Head);
        if heads != 1 || *self.grid.cell_at(self.head)? != Occupant::Head {
            return Err(self.invariant(format!("{} head cells, tracked head at {}", heads, self.head)));
        }

        let foods = self.grid.count(|o| *o == Occupant::Food);
        if foods != 1 || *self.grid.cell_at(self.food)? != Occupant::Food {
            return Err(self.invariant(format!("{} food cells, tracked food at {}", foods, self.food)));
        }

        let bodies: BTreeSet<Coords> =
            self.grid.iter().filter(|(_, o)| o.is_body()).map(|(c, _)| c).collect();
        if bodies != self.trail {
            return Err(self.invariant(format!(
                "trail {:?} disagrees with body cells {:?}",
                self.trail, bodies
            )));
        }

        Ok(())
    }

    fn decay_trail(&mut self) -> Result<(), GameError> {
        let mut expired = Vec::new();

        for &coords in &self.trail {
            let decay = match *self.grid.cell_at(coords)? {
                Occupant::Body { decay } => decay.saturating_sub(1),
                other => {
                    return Err(self.invariant(format!("trail cell {} holds {:?}", coords, other)))
                }
            };

            if decay == 0 {
                expired.push(coords);
            } else {
                self.grid.set(coords, Occupant::body(decay))?;
            }
        }

        for coords in expired {
            self.trail.remove(&coords);
            self.grid.set(coords, Occupant::Empty)?;
        }

        Ok(())
    }

    fn board_full(&self) -> GameError {
        info!("no empty cell for food at score {}", self.score);
        GameError::BoardFull { score: self.score, board: self.grid.to_string() }
    }

    fn invariant(&self, reason: String) -> GameError {
        error!("invariant violated: {}", reason);
        GameError::InvariantViolation { reason, board: self.grid.to_string() }
    }
}
