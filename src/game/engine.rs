use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

use super::{
    action::Direction,
    config::GameConfig,
    state::{CollisionType, EndReason, GameState, Position, RunState, Snake},
};
use crate::error::ConfigError;

/// Random placements tried before falling back to scanning every free cell
const MAX_RANDOM_FOOD_ATTEMPTS: usize = 64;

/// Result of a single `advance()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The round is not running; nothing changed
    Idle,
    /// The snake moved one cell
    Moved { ate_food: bool },
    /// The snake hit a wall or itself; the round is over
    Collided(CollisionType),
    /// The snake ate the last food the board had room for; the round is over
    BoardFilled,
}

impl TickOutcome {
    pub fn ends_round(&self) -> bool {
        matches!(self, TickOutcome::Collided(_) | TickOutcome::BoardFilled)
    }
}

/// The tick engine: owns the game state and applies one move per tick
pub struct TickEngine {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
    /// Set once a direction change was accepted; cleared by the next tick
    direction_locked: bool,
}

impl TickEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine with a fixed food sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let origin = Position::new(config.origin_x, config.origin_y);
        let state = GameState::new(
            Snake::new(origin, Direction::Right),
            origin,
            config.width,
            config.height,
            config.cell_size,
        );

        let mut engine = Self {
            config,
            state,
            rng,
            direction_locked: false,
        };
        engine.reset();
        Ok(engine)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    /// Whether a direction change is already pending for this tick
    pub fn is_direction_locked(&self) -> bool {
        self.direction_locked
    }

    /// Put the game back to its pre-start state
    pub fn reset(&mut self) {
        let origin = Position::new(self.config.origin_x, self.config.origin_y);
        let snake = Snake::new(origin, Direction::Right);

        // The eaten cell is always under the head, so the only food cell the
        // snake check cannot rule out is the one left over from last round
        let previous = self.config.avoid_previous_food.then_some(self.state.food);
        let shape = self.board_shape();
        // Validated boards always have a cell besides the origin
        let food = spawn_food(&mut self.rng, &shape, &snake, previous)
            .or_else(|| spawn_food(&mut self.rng, &shape, &snake, None))
            .unwrap_or(origin);

        self.state = GameState::new(
            snake,
            food,
            self.config.width,
            self.config.height,
            self.config.cell_size,
        );
        self.direction_locked = false;
    }

    /// Enter the countdown phase
    pub fn begin_countdown(&mut self) {
        self.state.run_state = RunState::Counting;
    }

    /// Let `advance()` move the snake
    pub fn begin_running(&mut self) {
        self.state.run_state = RunState::Running;
    }

    /// Latch a new direction for the next tick
    ///
    /// Only one change is accepted per tick; reversals and repeats of the
    /// current direction are ignored and do not take the lock.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if !self.state.is_running() || self.direction_locked {
            return false;
        }

        let current = self.state.snake.direction;
        if direction == current || current.is_opposite(direction) {
            return false;
        }

        self.state.snake.direction = direction;
        self.direction_locked = true;
        true
    }

    /// Execute one tick of the game
    pub fn advance(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Idle;
        }

        let step = self.config.cell_size as i32;
        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.snake.direction, step);

        // Checked against the body before the tail moves away
        if let Some(collision) = self.check_collision(new_head) {
            debug!(?collision, x = new_head.x, y = new_head.y, "snake collided");
            self.end_round(EndReason::Collision(collision));
            return TickOutcome::Collided(collision);
        }

        self.state.snake.push_head(new_head);
        self.state.ticks += 1;

        let ate_food = new_head == self.state.food;
        if ate_food {
            self.state.score += 1;
            debug!(score = self.state.score, "food eaten");

            let shape = self.board_shape();
            match spawn_food(&mut self.rng, &shape, &self.state.snake, None) {
                Some(food) => self.state.food = food,
                None => {
                    self.end_round(EndReason::BoardFilled);
                    return TickOutcome::BoardFilled;
                }
            }
        } else {
            self.state.snake.pop_tail();
        }

        self.direction_locked = false;
        TickOutcome::Moved { ate_food }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn end_round(&mut self, reason: EndReason) {
        self.state.run_state = RunState::Ended;
        self.state.end_reason = Some(reason);
    }

    fn board_shape(&self) -> BoardShape {
        BoardShape {
            columns: self.config.columns() as i32,
            rows: self.config.rows() as i32,
            cell_size: self.config.cell_size as i32,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BoardShape {
    columns: i32,
    rows: i32,
    cell_size: i32,
}

/// Pick a cell that is off the snake and, if given, not `exclude`
///
/// Random retries first; once those run out every free cell is listed and
/// one is chosen from that list, so a nearly full board still terminates.
/// Returns `None` only when no such cell exists.
fn spawn_food<R: Rng>(
    rng: &mut R,
    shape: &BoardShape,
    snake: &Snake,
    exclude: Option<Position>,
) -> Option<Position> {
    let is_free = |pos: Position| !snake.occupies(pos) && Some(pos) != exclude;
    let total = shape.columns as usize * shape.rows as usize;

    if snake.len() < total {
        for _ in 0..MAX_RANDOM_FOOD_ATTEMPTS {
            let pos = Position::new(
                rng.gen_range(0..shape.columns) * shape.cell_size,
                rng.gen_range(0..shape.rows) * shape.cell_size,
            );
            if is_free(pos) {
                return Some(pos);
            }
        }
    }

    let free: Vec<Position> = (0..shape.rows)
        .flat_map(|row| (0..shape.columns).map(move |col| (col, row)))
        .map(|(col, row)| Position::new(col * shape.cell_size, row * shape.cell_size))
        .filter(|pos| is_free(*pos))
        .collect();

    free.choose(rng).copied()
}
