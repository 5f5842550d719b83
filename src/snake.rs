use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left))
    }

    /// Unit offset for one move of `step` units in this direction.
    pub fn offset(self, step: i32) -> Coords {
        match self {
            Up => (0, -step),
            Down => (0, step),
            Left => (-step, 0),
            Right => (step, 0),
        }
    }
}

pub struct Snake {
    body: Vec<Coords>,
    heading: Direction,
    step: i32,
    ate_food: bool,
}

impl Snake {
    /// Builds a straight snake of `size` cells with its head at `head`, the
    /// rest trailing behind it against `heading`.
    pub fn new(head: Coords, size: usize, heading: Direction, step: i32) -> Self {
        let (dx, dy) = heading.offset(step);

        let body = (0..size as i32)
            .map(|i| (head.0 - dx * i, head.1 - dy * i))
            .collect();
        Snake { body, heading, step, ate_food: false }
    }

    /// Takes an explicit body, head first. Used to set up arbitrary positions.
    #[cfg(test)]
    pub fn from_body(body: Vec<Coords>, heading: Direction, step: i32) -> Self {
        debug_assert!(!body.is_empty(), "a snake needs at least a head");
        Snake { body, heading, step, ate_food: false }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    #[cfg(test)]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn ate_food(&self) -> bool {
        self.ate_food
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn change_heading(&mut self, requested: Direction) {
        if !requested.is_opposite(self.heading) {
            self.heading = requested;
        }
    }

    /// Moves the head one step along the heading. Reaching `food` grows the
    /// snake by keeping the tail; otherwise the tail is dropped.
    pub fn advance(&mut self, food: Coords) -> (&[Coords], bool) {
        let (dx, dy) = self.heading.offset(self.step);
        let head = self.head();
        let new_head = (head.0 + dx, head.1 + dy);

        self.body.insert(0, new_head);
        self.ate_food = new_head == food;

        if !self.ate_food {
            self.body.pop();
        }

        (&self.body, self.ate_food)
    }

    pub fn hits_itself(&self) -> bool {
        self.body[1..].contains(&self.head())
    }
}
