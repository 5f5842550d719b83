use crate::Coords;
use crate::config::GameConfig;
use crate::food::{FoodError, FoodPlacer};
use crate::score::Score;
use crate::snake::{Direction, Snake};

use rand::{rngs::ThreadRng, Rng};
use tracing::{debug, info};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
}

/// Why a session stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Collision(Collision),
    /// The snake covers every cell food could go to.
    BoardFull,
}

/// Snapshot handed to the renderer after each turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldState {
    pub body: Vec<Coords>,
    /// Never on the body. `None` once the snake has filled the grid.
    pub food: Option<Coords>,
    pub score: u32,
    pub ate: bool,
    pub ending: Option<Ending>,
}

impl WorldState {
    pub fn is_terminal(&self) -> bool {
        self.ending.is_some()
    }
}

/// One game, from the first turn until the snake crashes or fills the grid.
/// Once ended a session stays ended; start a new one to play again.
pub struct Session<R = ThreadRng> {
    config: GameConfig,
    snake: Snake,
    food: Coords,
    placer: FoodPlacer<R>,
    score: Score,
    ending: Option<Ending>,
}

impl Session<ThreadRng> {
    pub fn new(config: GameConfig) -> Result<Self, FoodError> {
        Session::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, FoodError> {
        let snake = Snake::new(config.initial_head, config.initial_length, Direction::Right, config.step);
        Session::with_snake(config, snake, rng)
    }

    /// Starts from a given snake; the first food cell is drawn around it.
    pub fn with_snake(config: GameConfig, snake: Snake, rng: R) -> Result<Self, FoodError> {
        let mut placer = FoodPlacer::new(config.width, config.height, config.step, rng);
        let food = placer.place(snake.body())?;
        let score = Score::new(config.score_increment);

        info!(head = ?snake.head(), length = snake.len(), ?food, "session started");
        Ok(Session { config, snake, food, placer, score, ending: None })
    }

    pub fn change_heading(&mut self, requested: Direction) {
        if self.ending.is_none() {
            self.snake.change_heading(requested);
        }
    }

    /// Plays one turn: move or grow, replace eaten food, score it and check
    /// for a crash. After the session has ended this only reports the final
    /// state.
    pub fn turn(&mut self) -> WorldState {
        if self.ending.is_some() {
            return self.world();
        }

        let (_, ate) = self.snake.advance(self.food);

        if ate {
            self.score.increment();
            match self.placer.place(self.snake.body()) {
                Ok(food) => self.food = food,
                Err(e) => {
                    info!(error = %e, "no room left for food");
                    self.ending = Some(Ending::BoardFull);
                }
            }
            debug!(score = self.score.value(), length = self.snake.len(), food = ?self.food, "food eaten");
        }

        if let Some(collision) = self.collision() {
            self.ending = Some(Ending::Collision(collision));
        }

        if let Some(ending) = self.ending {
            info!(?ending, score = self.score.value(), length = self.snake.len(), "session over");
        }

        self.world()
    }

    pub fn world(&self) -> WorldState {
        WorldState {
            body: self.snake.body().to_vec(),
            food: (self.ending != Some(Ending::BoardFull)).then_some(self.food),
            score: self.score.value(),
            ate: self.snake.ate_food(),
            ending: self.ending,
        }
    }

    #[cfg(test)]
    pub fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    #[cfg(test)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    fn collision(&self) -> Option<Collision> {
        if !self.config.contains(self.snake.head()) {
            Some(Collision::Wall)
        } else if self.snake.hits_itself() {
            Some(Collision::SelfCollision)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn session_with(body: Vec<Coords>, heading: Direction) -> Session<StdRng> {
        let config = GameConfig::default();
        let snake = Snake::from_body(body, heading, config.step);
        Session::with_snake(config, snake, StdRng::seed_from_u64(42)).unwrap()
    }

    fn starting_session() -> Session<StdRng> {
        Session::with_rng(GameConfig::default(), StdRng::seed_from_u64(42)).unwrap()
    }

    #[test]
    fn new_session_starts_running_at_zero() {
        let session = starting_session();
        assert!(!session.is_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().body(), &[(100, 50), (90, 50), (80, 50)]);

        let world = session.world();
        assert!(!world.body.contains(&world.food.unwrap()));
        assert!(!world.is_terminal());
    }

    #[test]
    fn eating_grows_scores_and_replaces_food() {
        let mut session = starting_session();
        session.food = (110, 50);

        let world = session.turn();
        assert!(world.ate);
        assert_eq!(world.body, vec![(110, 50), (100, 50), (90, 50), (80, 50)]);
        assert_eq!(world.score, 10);
        assert!(!world.body.contains(&world.food.unwrap()));
        assert!(!world.is_terminal());
    }

    #[test]
    fn moving_leaves_food_and_score_alone() {
        let mut session = starting_session();
        session.food = (500, 300);

        let world = session.turn();
        assert!(!world.ate);
        assert_eq!(world.body, vec![(110, 50), (100, 50), (90, 50)]);
        assert_eq!(world.food, Some((500, 300)));
        assert_eq!(world.score, 0);
    }

    #[test]
    fn score_rises_only_on_eating_turns() {
        let mut session = starting_session();
        let mut last = session.score();
        let mut eaten = 0;

        for turn in 0..30 {
            // Put food right in front of the head on every other turn
            if turn % 2 == 0 {
                let head = session.snake().head();
                session.food = (head.0 + 10, head.1);
            }
            let world = session.turn();
            if world.ate {
                eaten += 1;
                assert_eq!(world.score, last + 10);
            } else {
                assert_eq!(world.score, last);
            }
            last = world.score;
        }
        assert!(eaten >= 15);
        assert_eq!(session.score(), eaten * 10);
    }

    #[test]
    fn leaving_the_grid_ends_the_session() {
        let mut session = session_with(vec![(0, 50), (10, 50), (20, 50)], Left);
        let world = session.turn();
        assert_eq!(world.body[0], (-10, 50));
        assert!(world.is_terminal());
        assert_eq!(world.ending, Some(Ending::Collision(Collision::Wall)));

        let mut session = session_with(vec![(710, 470), (700, 470), (690, 470)], Down);
        assert_eq!(session.turn().ending, Some(Ending::Collision(Collision::Wall)));
    }

    #[test]
    fn last_cell_on_each_edge_is_still_in_play() {
        let mut session = session_with(vec![(700, 460), (690, 460), (680, 460)], Right);
        session.food = (10, 10);
        assert!(!session.turn().is_terminal());
        session.change_heading(Down);
        assert!(!session.turn().is_terminal());
        assert_eq!(session.snake().head(), (710, 470));
    }

    #[test]
    fn running_into_the_body_ends_the_session() {
        let mut session = session_with(vec![(100, 50), (90, 50), (80, 50), (70, 50), (60, 50)], Right);
        session.food = (10, 10);
        session.change_heading(Down);
        session.turn();
        session.change_heading(Left);
        session.turn();
        session.change_heading(Up);
        let world = session.turn();
        assert_eq!(world.ending, Some(Ending::Collision(Collision::SelfCollision)));
    }

    #[test]
    fn ended_session_does_not_change() {
        let mut session = session_with(vec![(0, 50), (10, 50), (20, 50)], Left);
        let last = session.turn();
        assert!(session.is_over());

        session.change_heading(Up);
        assert_eq!(session.snake().heading(), Left);
        assert_eq!(session.turn(), last);
        assert_eq!(session.turn().body, last.body);
    }

    #[test]
    fn filling_the_grid_ends_as_board_full() {
        // 4x3 grid: food can only go to the six cells with x in 10..=30, y in 10..=20
        let config = GameConfig { width: 40, height: 30, step: 10, ..Default::default() };
        let body = vec![(20, 20), (10, 20), (10, 10), (20, 10), (30, 10)];
        let snake = Snake::from_body(body, Right, config.step);
        let mut session = Session::with_snake(config, snake, StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(session.food, (30, 20));

        let world = session.turn();
        assert!(world.ate);
        assert_eq!(world.score, 10);
        assert_eq!(world.ending, Some(Ending::BoardFull));
        assert_eq!(world.body.len(), 6);
        assert_eq!(world.food, None);
    }

    #[test]
    fn no_room_for_the_first_food_fails_to_start() {
        let config = GameConfig { width: 40, height: 30, step: 10, ..Default::default() };
        let body = vec![(30, 20), (20, 20), (10, 20), (10, 10), (20, 10), (30, 10)];
        let snake = Snake::from_body(body, Right, config.step);

        let err = Session::with_snake(config, snake, StdRng::seed_from_u64(5)).err();
        assert_eq!(err, Some(FoodError::NoFreeCell { columns: 4, rows: 3 }));
    }
}
