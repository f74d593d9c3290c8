/// Dimensions of the playing field, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub fn new(width: u16, height: u16) -> Self {
        Size { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Every cell of the grid, row by row.
    pub fn cells(self) -> impl Iterator<Item = Pos> {
        let Size { width, height } = self;
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos { x, y }))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A cell on the grid. Rows grow downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: u16,
    pub y: u16,
}

impl Pos {
    pub fn new(x: u16, y: u16) -> Self {
        Pos { x, y }
    }

    /// Offsets the cell, or returns `None` when the result leaves the grid.
    pub fn checked_add(&self, delta: PosDelta, size: Size) -> Option<Pos> {
        let new_x = self.x as i32 + delta.x;
        let new_y = self.y as i32 + delta.y;
        if new_x < 0 || new_y < 0 || new_x >= size.width as i32 || new_y >= size.height as i32 {
            return None;
        }
        Some(Pos {
            x: new_x as u16,
            y: new_y as u16,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PosDelta {
    pub x: i32,
    pub y: i32,
}

impl From<Direction> for PosDelta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => PosDelta { x: 0, y: -1 },
            Direction::Down => PosDelta { x: 0, y: 1 },
            Direction::Left => PosDelta { x: -1, y: 0 },
            Direction::Right => PosDelta { x: 1, y: 0 },
        }
    }
}
