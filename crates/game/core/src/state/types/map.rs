use std::fmt;

use super::{GridCoordinate, Tile};

/// Square N x N grid of tiles, stored row-major.
///
/// The size is fixed at construction. Every accessor is bounds-checked, so a
/// cell outside `[0, N)` is never dereferenced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    size: u32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Creates an all-empty map.
    pub fn new(size: u32) -> Self {
        Self::filled(size, Tile::Empty)
    }

    pub fn filled(size: u32, tile: Tile) -> Self {
        let len = size as usize * size as usize;
        Self {
            size,
            tiles: vec![tile; len],
        }
    }

    /// Builds a map from rows of tiles. Returns `None` unless the rows form a
    /// non-empty square.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|row| row.len() != size) {
            return None;
        }

        Some(Self {
            size: size as u32,
            tiles: rows.into_iter().flatten().collect(),
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn contains(&self, cell: GridCoordinate) -> bool {
        let within = |index: i32| u32::try_from(index).is_ok_and(|index| index < self.size);
        within(cell.col) && within(cell.row)
    }

    #[inline]
    fn index(&self, cell: GridCoordinate) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.row as usize * self.size as usize + cell.col as usize)
    }

    /// Tile at `cell`, or `None` outside the map.
    pub fn tile(&self, cell: GridCoordinate) -> Option<Tile> {
        self.index(cell).map(|index| self.tiles[index])
    }

    /// Overwrites the tile at `cell`. Returns false (and changes nothing)
    /// outside the map.
    pub fn set(&mut self, cell: GridCoordinate, tile: Tile) -> bool {
        match self.index(cell) {
            Some(index) => {
                self.tiles[index] = tile;
                true
            }
            None => false,
        }
    }

    /// All cells with their tiles, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (GridCoordinate, Tile)> + '_ {
        let size = self.size as usize;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let cell = GridCoordinate::new((index % size) as i32, (index / size) as i32);
            (cell, *tile)
        })
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|candidate| **candidate == tile).count()
    }
}

impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.size.max(1) as usize) {
            let line: String = row.iter().map(|tile| tile.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
