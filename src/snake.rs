use std::collections::VecDeque;

use crate::grid::{Direction, Pos, PosDelta, Size};

/// The snake's body, head first, and where it is going.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Pos>,
    heading: Direction,
    next_heading: Direction,
}

impl Snake {
    /// Lays the snake out horizontally across the middle of the grid, head on
    /// the right, facing right. `initial_length` must be in `1..=size.width`.
    pub fn new(size: Size, initial_length: u16) -> Self {
        let mid_x = size.width / 2;
        let mid_y = size.height / 2;
        let tail_x = mid_x - initial_length / 2;

        let body = (0..initial_length)
            .rev()
            .map(|i| Pos {
                x: tail_x + i,
                y: mid_y,
            })
            .collect();

        Snake {
            body,
            heading: Direction::Right,
            next_heading: Direction::Right,
        }
    }

    pub fn head(&self) -> Pos {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn body(&self) -> &VecDeque<Pos> {
        &self.body
    }

    /// The direction the snake moved in on its last step.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// The direction the snake will move in on its next step.
    pub fn next_heading(&self) -> Direction {
        self.next_heading
    }

    /// Requests a turn. Reversing onto the neck is ignored, and the check is
    /// made against the last step taken, so several requests between steps
    /// can never add up to a reversal.
    pub fn change_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.opposite() == self.heading {
            return false;
        }
        self.next_heading = new_direction;
        true
    }

    /// Where the head would land next step, `None` if that is off the grid.
    pub fn next_head(&self, size: Size) -> Option<Pos> {
        self.head()
            .checked_add(PosDelta::from(self.next_heading), size)
    }

    /// Moves one cell onto `new_head`. The tail stays put when growing.
    pub fn slither(&mut self, new_head: Pos, grow: bool) {
        self.heading = self.next_heading;
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn occupies(&self, pos: Pos) -> bool {
        self.body.contains(&pos)
    }

    /// True when the head shares a cell with any other segment.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|pos| *pos == head)
    }
}
