use labyrinth_maze::{CellCoord, Maze, TileType};

/// Tile counts and key cells of a generated maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeStats {
    pub cells: (usize, usize),
    pub tiles: (usize, usize),
    pub floor: usize,
    pub wall: usize,
    pub statue: usize,
    pub reachable_cells: usize,
    pub start: CellCoord,
    pub end: CellCoord,
    /// Walking distance from start to end, in tiles.
    pub solution_length: Option<usize>,
}

impl MazeStats {
    pub fn of(maze: &Maze) -> Self {
        Self {
            cells: maze.cell_dimensions(),
            tiles: maze.dimensions(),
            floor: maze.floor_count(),
            wall: maze.count(TileType::Wall),
            statue: maze.count(TileType::Statue),
            reachable_cells: maze.reachable_cells(maze.start()),
            start: maze.start(),
            end: maze.end(),
            solution_length: maze.path_length(maze.start(), maze.end()),
        }
    }

    /// A perfect maze reaches every cell and carves exactly `2wh - 1` floor
    /// tiles (each cell plus one opening per spanning tree edge).
    pub fn is_perfect(&self) -> bool {
        let (w, h) = self.cells;
        self.reachable_cells == w * h && self.floor + 1 == 2 * w * h
    }
}

impl std::fmt::Display for MazeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Maze: {}x{} cells, {}x{} tiles",
            self.cells.0, self.cells.1, self.tiles.0, self.tiles.1
        )?;
        writeln!(
            f,
            "  floor={} wall={} statue={} reachable={}",
            self.floor, self.wall, self.statue, self.reachable_cells
        )?;
        write!(
            f,
            "  start=({}, {}) end=({}, {}) solution=",
            self.start.x, self.start.y, self.end.x, self.end.y
        )?;
        match self.solution_length {
            Some(n) => write!(f, "{n} tiles"),
            None => write!(f, "unreachable"),
        }
    }
}
