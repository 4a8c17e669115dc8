use std::io;
use std::time::{Duration, Instant};

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, error, info, trace, warn};

use crate::cell::Direction;
use crate::config::Board;
use crate::food::{Food, FoodError};
use crate::render::{Color, Render, Surface};
use crate::snake::{Snake, Step};

const INITIAL_SPEED: u32 = 1;

/// A repeating schedule. Replacing it is the only way to change its pace.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Ticker { interval, next_due: now + interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    pub fn time_left(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Schedules the next tick one interval after the one that just fired.
    /// Falls back to `now` if the loop fell more than an interval behind.
    pub fn advance(&mut self, now: Instant) {
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
    }

    pub fn restart(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }
}

pub struct SnakeGame {
    board: Board,
    snake: Snake,
    food: Food,
    score: u32,
    speed: u32,
    // Set by the first direction request after a tick, cleared by the next tick
    input_locked: bool,
    ticker: Option<Ticker>,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new(board: Board, seed: Option<u64>) -> Result<Self, FoodError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let snake = Snake::new(board.cell_size);
        let food = Food::spawn(&mut rng, &board, &snake)?;

        Ok(SnakeGame {
            board,
            snake,
            food,
            score: 0,
            speed: INITIAL_SPEED,
            input_locked: false,
            ticker: None,
            rng,
        })
    }

    /// Tick interval for a given speed: `1000 / (10 + 2 * speed)` ms.
    pub fn interval_for(speed: u32) -> Duration {
        Duration::from_micros(1_000_000 / (10 + 2 * speed as u64))
    }

    /// Starts a fresh round and replaces any running schedule.
    pub fn start(&mut self, now: Instant) -> Result<(), FoodError> {
        self.new_round()?;

        let interval = Self::interval_for(self.speed);
        if self.ticker.replace(Ticker::new(interval, now)).is_some() {
            debug!("Previous tick schedule cancelled");
        }
        info!(speed = self.speed, interval_ms = interval.as_millis() as u64, "Game started");
        Ok(())
    }

    /// Drops the current snake and food for new ones. The schedule and the
    /// speed are left alone.
    pub fn reset(&mut self) -> Result<(), FoodError> {
        info!(score = self.score, length = self.snake.len(), "Round over");
        self.new_round()
    }

    pub fn ate_food(&mut self) -> Result<(), FoodError> {
        self.score += 1;
        if self.score % 2 == 0 {
            self.speed += 1;
        }
        debug!(score = self.score, speed = self.speed, "Food eaten");

        self.food.relocate(&mut self.rng, &self.board, &self.snake)
    }

    /// Offers a direction change to the snake. Only the first request
    /// between two ticks gets through, accepted or not.
    pub fn steer(&mut self, direction: Direction) {
        if self.input_locked {
            return;
        }

        self.input_locked = true;
        if !self.snake.turn(direction) {
            trace!(?direction, "Reverse turn ignored");
        }
    }

    /// One scheduled step: update, then redraw everything.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> io::Result<()> {
        self.update();
        self.render(surface)
    }

    pub fn update(&mut self) {
        self.input_locked = false;

        let outcome = match self.snake.update(&self.board, self.food.cell()) {
            Step::Crashed { at } => {
                debug!(x = at.x, y = at.y, "Crashed");
                self.reset()
            },
            Step::Ate { .. } => self.ate_food(),
            Step::Moved { .. } => Ok(()),
        };

        if let Err(FoodError::BoardFull(cells)) = outcome {
            warn!(cells, score = self.score, "Board filled up, starting over");
            if let Err(e) = self.new_round() {
                error!("Could not start a new round: {}", e);
            }
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) -> io::Result<()> {
        let (w, h) = (self.board.width, self.board.height);

        surface.set_fill_color(Color::White);
        surface.fill_rect(0, 0, w, h)?;
        surface.set_stroke_color(Color::Black);
        surface.stroke_rect(0, 0, w, h)?;

        self.food.render(surface)?;
        self.snake.render(surface)?;

        surface.set_fill_color(Color::Black);
        surface.fill_text(&format!("Score: {}", self.score), 5, h.saturating_sub(20))?;
        surface.fill_text(&format!("Speed: {}", self.speed), 5, h.saturating_sub(5))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn ticker(&self) -> Option<&Ticker> {
        self.ticker.as_ref()
    }

    pub fn ticker_mut(&mut self) -> Option<&mut Ticker> {
        self.ticker.as_mut()
    }

    pub fn tick_interval(&self) -> Option<Duration> {
        self.ticker.map(|t| t.interval())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn new_round(&mut self) -> Result<(), FoodError> {
        let snake = Snake::new(self.board.cell_size);
        let food = Food::spawn(&mut self.rng, &self.board, &snake)?;

        self.snake = snake;
        self.food = food;
        self.score = 0;
        Ok(())
    }

    #[cfg(test)]
    fn place_food(&mut self, cell: crate::cell::Cell) {
        self.food = Food::at(cell, self.board.cell_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, Direction::*};
    use crate::render::testing::{Op, RecordingSurface};

    fn game() -> SnakeGame {
        let board = Board::new(200, 100, 10).unwrap();
        let mut game = SnakeGame::new(board, Some(3)).unwrap();
        game.start(Instant::now()).unwrap();
        game
    }

    fn park_food(game: &mut SnakeGame) {
        game.place_food(Cell::new(0, 9));
    }

    #[test]
    fn interval_follows_speed() {
        assert_eq!(SnakeGame::interval_for(1), Duration::from_micros(83_333));
        assert_eq!(SnakeGame::interval_for(5), Duration::from_millis(50));
    }

    #[test]
    fn not_running_until_started() {
        let board = Board::new(200, 100, 10).unwrap();
        let game = SnakeGame::new(board, Some(1)).unwrap();
        assert!(!game.is_running());
        assert_eq!(game.tick_interval(), None);
    }

    #[test]
    fn restart_replaces_the_schedule() {
        let mut game = game();
        let later = Instant::now() + Duration::from_secs(10);
        game.start(later).unwrap();

        let ticker = game.ticker().unwrap();
        assert!(!ticker.is_due(later));
        assert!(ticker.is_due(later + ticker.interval()));
    }

    #[test]
    fn score_and_speed_law() {
        let mut game = game();
        let expected = [(1, 1), (2, 2), (3, 2), (4, 3), (5, 3), (6, 4)];

        for (score, speed) in expected.iter() {
            game.ate_food().unwrap();
            assert_eq!(game.score(), *score);
            assert_eq!(game.speed(), *speed);
            assert!(!game.snake().occupied().contains(&game.food().cell()));
        }
    }

    #[test]
    fn speed_change_keeps_the_running_interval() {
        let mut game = game();
        let interval = game.tick_interval();
        game.ate_food().unwrap();
        game.ate_food().unwrap();

        assert_eq!(game.speed(), 2);
        assert_eq!(game.tick_interval(), interval);
    }

    #[test]
    fn eating_then_crashing_into_the_wall() {
        let mut game = game();
        game.place_food(Cell::new(5, 1));

        game.update();
        assert_eq!(game.snake().len(), 6);
        assert_eq!(game.snake().head(), Cell::new(5, 1));
        assert_eq!(game.score(), 1);
        assert_eq!(game.speed(), 1);

        park_food(&mut game);
        // Head at column 5, the last column is 19
        for _ in 5..19 {
            game.update();
        }
        assert_eq!(game.snake().head(), Cell::new(19, 1));
        assert_eq!(game.score(), 1);

        let interval = game.tick_interval();
        game.update();
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().len(), 5);
        assert_eq!(game.snake().head(), Cell::new(4, 1));
        assert_eq!(game.speed(), 1);
        assert_eq!(game.tick_interval(), interval);
    }

    #[test]
    fn reset_keeps_speed() {
        let mut game = game();
        game.ate_food().unwrap();
        game.ate_food().unwrap();
        game.reset().unwrap();

        assert_eq!(game.score(), 0);
        assert_eq!(game.speed(), 2);
        assert!(game.is_running());
    }

    #[test]
    fn one_direction_change_per_tick() {
        let mut game = game();
        park_food(&mut game);

        game.steer(Down);
        game.steer(Left);
        game.update();
        assert_eq!(game.snake().direction(), Down);
        assert_eq!(game.snake().head(), Cell::new(4, 2));

        game.steer(Right);
        game.update();
        assert_eq!(game.snake().head(), Cell::new(5, 2));
    }

    #[test]
    fn rejected_reverse_still_uses_the_tick() {
        let mut game = game();
        park_food(&mut game);

        game.steer(Left);
        game.steer(Down);
        game.update();
        assert_eq!(game.snake().direction(), Right);
        assert_eq!(game.snake().head(), Cell::new(5, 1));
    }

    #[test]
    fn tick_draws_board_food_snake_and_text() {
        let mut game = game();
        park_food(&mut game);
        let mut surface = RecordingSurface::new();
        game.tick(&mut surface).unwrap();

        assert_eq!(surface.ops[0], Op::Fill(Color::White, 0, 0, 200, 100));
        assert_eq!(surface.ops[1], Op::Stroke(Color::Black, 0, 0, 200, 100));
        assert_eq!(surface.filled_with(Color::Green), vec![(0, 90)]);
        assert_eq!(surface.filled_with(Color::Blue).len(), 5);
        assert_eq!(surface.filled_with(Color::Blue)[0], (50, 10));
        assert_eq!(surface.texts(), vec!["Score: 0", "Speed: 1"]);
        assert_eq!(surface.ops.last(), Some(&Op::Text(Color::Black, "Speed: 1".to_string(), 5, 95)));
    }

    #[test]
    fn full_board_starts_a_new_round() {
        let board = Board::new(60, 20, 10).unwrap();
        let mut game = SnakeGame::new(board, Some(5)).unwrap();
        game.start(Instant::now()).unwrap();

        // Walk the food right in front of the snake until every cell is taken
        let path = [(5, 1, Right), (5, 0, Up), (4, 0, Left), (3, 0, Left), (2, 0, Left), (1, 0, Left), (0, 0, Left)];
        for (x, y, dir) in path.iter() {
            game.steer(*dir);
            game.place_food(Cell::new(*x, *y));
            game.update();
        }

        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().len(), 5);
        assert!(!game.snake().occupied().contains(&game.food().cell()));
    }

    #[test]
    fn ticker_catches_up_after_a_stall() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(100), start);
        assert!(!ticker.is_due(start));
        assert_eq!(ticker.time_left(start), Duration::from_millis(100));

        let late = start + Duration::from_millis(450);
        assert!(ticker.is_due(late));
        ticker.advance(late);
        assert_eq!(ticker.time_left(late), Duration::from_millis(100));
    }
}
