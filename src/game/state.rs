use super::action::Direction;

/// A position on the board, in pixels, aligned to the cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one cell of `step` pixels in a direction
    pub fn moved_in_direction(&self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * step, dy * step)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// Create a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "a snake needs at least a head");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front of the body
    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    /// Drop the last segment
    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop()
        } else {
            None
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// High-level lifecycle phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Counting,
    Running,
    Ended,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake ran into one of its own segments
    SelfCollision,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionType),
    /// No free cell was left to place food on
    BoardFilled,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub score: u32,
    pub ticks: u32,
    pub run_state: RunState,
    pub end_reason: Option<EndReason>,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            snake,
            food,
            width,
            height,
            cell_size,
            score: 0,
            ticks: 0,
            run_state: RunState::NotStarted,
            end_reason: None,
        }
    }

    /// Check if a position is within the board bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(200, 200);
        assert_eq!(
            pos.moved_in_direction(Direction::Right, 20),
            Position::new(220, 200)
        );
        assert_eq!(
            pos.moved_in_direction(Direction::Left, 20),
            Position::new(180, 200)
        );
        assert_eq!(
            pos.moved_in_direction(Direction::Up, 20),
            Position::new(200, 180)
        );
        assert_eq!(
            pos.moved_in_direction(Direction::Down, 20),
            Position::new(200, 220)
        );
    }

    #[test]
    fn test_snake_head_and_occupancy() {
        let snake = Snake::from_segments(
            vec![
                Position::new(60, 20),
                Position::new(40, 20),
                Position::new(20, 20),
            ],
            Direction::Right,
        );
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(60, 20));
        assert!(snake.occupies(Position::new(60, 20)));
        assert!(snake.occupies(Position::new(20, 20)));
        assert!(!snake.occupies(Position::new(80, 20)));
    }

    #[test]
    fn test_single_segment_never_pops() {
        let mut snake = Snake::new(Position::new(0, 0), Direction::Right);
        assert_eq!(snake.pop_tail(), None);
        snake.push_head(Position::new(20, 0));
        assert_eq!(snake.pop_tail(), Some(Position::new(0, 0)));
        assert_eq!(snake.body, vec![Position::new(20, 0)]);
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(200, 200), Direction::Right),
            Position::new(100, 100),
            400,
            400,
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(380, 380)));
        assert!(!state.is_in_bounds(Position::new(-20, 100)));
        assert!(!state.is_in_bounds(Position::new(400, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 400)));
    }
}
