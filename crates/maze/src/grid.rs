use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Classification of a single maze tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Wall,
    /// Decorative obstacle; a distinct render variant of a wall.
    Statue,
}

impl TileType {
    pub fn is_floor(self) -> bool {
        matches!(self, Self::Floor)
    }

    fn glyph(self) -> char {
        match self {
            Self::Floor => '.',
            Self::Wall => '#',
            Self::Statue => '&',
        }
    }
}

/// A logical maze cell. Cell `(x, y)` lives on tile `(2x + 1, 2y + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

impl CellCoord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Tile coordinate of this cell's center.
    pub fn tile(self) -> (usize, usize) {
        (2 * self.x + 1, 2 * self.y + 1)
    }

    /// Axis neighbour in direction `(dx, dy)`, if it stays inside `width x height`.
    pub fn offset(self, dx: isize, dy: isize, width: usize, height: usize) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < width && y < height).then_some(Self { x, y })
    }
}

/// Generated maze: an odd-sized tile grid over a `width x height` cell lattice.
///
/// Tiles are stored column-major (`tiles[x][y]` flattened). Tiles are written
/// once by the generator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    width: usize,
    height: usize,
    tiles: Vec<TileType>,
    start: CellCoord,
    end: CellCoord,
}

impl Maze {
    pub(crate) fn filled(
        width: usize,
        height: usize,
        tiles: Vec<TileType>,
        start: CellCoord,
    ) -> Self {
        debug_assert_eq!(tiles.len(), (2 * width + 1) * (2 * height + 1));
        Self {
            width,
            height,
            tiles,
            start,
            end: start,
        }
    }

    pub(crate) fn set_end(&mut self, end: CellCoord) {
        self.end = end;
    }

    /// Logical cell dimensions `(width, height)`.
    pub fn cell_dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Tile grid dimensions `(2 * width + 1, 2 * height + 1)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (2 * self.width + 1, 2 * self.height + 1)
    }

    /// Cell the carve started from.
    pub fn start(&self) -> CellCoord {
        self.start
    }

    /// Cell farthest (by walking distance) from the start.
    pub fn end(&self) -> CellCoord {
        self.end
    }

    fn index(&self, x: usize, y: usize) -> usize {
        x * (2 * self.height + 1) + y
    }

    /// Tile at `(x, y)`. Panics when out of bounds; use [`Maze::get`] otherwise.
    pub fn tile(&self, x: usize, y: usize) -> TileType {
        let (tx, ty) = self.dimensions();
        assert!(x < tx && y < ty, "tile ({x}, {y}) outside {tx}x{ty} maze");
        self.tiles[self.index(x, y)]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<TileType> {
        let (tx, ty) = self.dimensions();
        (x < tx && y < ty).then(|| self.tiles[self.index(x, y)])
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, tile: TileType) {
        let i = self.index(x, y);
        self.tiles[i] = tile;
    }

    pub fn cell_tile(&self, cell: CellCoord) -> TileType {
        let (x, y) = cell.tile();
        self.tile(x, y)
    }

    /// All tiles with their coordinates, `x` outer and `y` inner.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TileType)> + '_ {
        let ty = 2 * self.height + 1;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (i / ty, i % ty, *tile))
    }

    /// All logical cells, `x` outer and `y` inner.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| CellCoord::new(x, y)))
    }

    pub fn count(&self, kind: TileType) -> usize {
        self.tiles.iter().filter(|t| **t == kind).count()
    }

    pub fn floor_count(&self) -> usize {
        self.count(TileType::Floor)
    }

    /// Breadth-first walking distance (in tiles) from `from` to every tile.
    /// Unreachable and non-floor tiles are `None`.
    pub fn walking_distances(&self, from: CellCoord) -> Vec<Option<usize>> {
        let (tx, ty) = self.dimensions();
        let mut dist = vec![None; self.tiles.len()];
        let (sx, sy) = from.tile();
        if self.get(sx, sy).is_none_or(|t| !t.is_floor()) {
            return dist;
        }

        let mut queue = VecDeque::new();
        dist[self.index(sx, sy)] = Some(0);
        queue.push_back((sx, sy));

        while let Some((x, y)) = queue.pop_front() {
            let here = dist[self.index(x, y)].unwrap_or(0);
            for (dx, dy) in [(-1isize, 0isize), (1, 0), (0, -1), (0, 1)] {
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                else {
                    continue;
                };
                if nx >= tx || ny >= ty {
                    continue;
                }
                let ni = self.index(nx, ny);
                if dist[ni].is_some() || !self.tiles[ni].is_floor() {
                    continue;
                }
                dist[ni] = Some(here + 1);
                queue.push_back((nx, ny));
            }
        }
        dist
    }

    /// Walking distance in tiles between two cells, `None` when unreachable.
    pub fn path_length(&self, from: CellCoord, to: CellCoord) -> Option<usize> {
        let (x, y) = to.tile();
        self.get(x, y)?;
        self.walking_distances(from)[self.index(x, y)]
    }

    /// Number of logical cells reachable from `from` through floor tiles.
    pub fn reachable_cells(&self, from: CellCoord) -> usize {
        let dist = self.walking_distances(from);
        self.cells()
            .filter(|c| {
                let (x, y) = c.tile();
                dist[self.index(x, y)].is_some()
            })
            .count()
    }

    /// Reachable cell with the greatest walking distance from `from`. The first
    /// cell in [`Maze::cells`] order wins ties.
    pub fn farthest_cell(&self, from: CellCoord) -> CellCoord {
        let dist = self.walking_distances(from);
        let mut best = (from, 0usize);
        for cell in self.cells() {
            let (x, y) = cell.tile();
            if let Some(d) = dist[self.index(x, y)] {
                if d > best.1 {
                    best = (cell, d);
                }
            }
        }
        best.0
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (tx, ty) = self.dimensions();
        let start = self.start.tile();
        let end = self.end.tile();
        for y in 0..ty {
            for x in 0..tx {
                let glyph = if (x, y) == start {
                    'S'
                } else if (x, y) == end {
                    'E'
                } else {
                    self.tile(x, y).glyph()
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
