use std::fmt;

use crate::coords::Coords;
use crate::error::GameError;
use crate::occupant::Occupant;

/// Fixed-size board stored densely in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Occupant>,
}

impl Grid {
    pub fn new(height: usize, width: usize) -> Self {
        Grid { height, width, cells: vec![Occupant::Empty; height * width] }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coords: Coords) -> bool {
        coords.row < self.height && coords.col < self.width
    }

    /// Offset of `coords` into the dense storage, `None` when out of bounds.
    pub fn index_of(&self, coords: Coords) -> Option<usize> {
        if self.contains(coords) {
            Some(coords.row * self.width + coords.col)
        } else {
            None
        }
    }

    pub fn cell_at(&self, coords: Coords) -> Result<&Occupant, GameError> {
        match self.index_of(coords) {
            Some(i) => Ok(&self.cells[i]),
            None => Err(self.out_of_bounds(coords)),
        }
    }

    pub fn set(&mut self, coords: Coords, occupant: Occupant) -> Result<(), GameError> {
        match self.index_of(coords) {
            Some(i) => {
                self.cells[i] = occupant;
                Ok(())
            }
            None => Err(self.out_of_bounds(coords)),
        }
    }

    /// In-bounds orthogonal neighbours, always yielded as down, up, right, left.
    pub fn neighbors_of(&self, coords: Coords) -> impl Iterator<Item = Coords> {
        let Coords { row, col } = coords;
        let candidates = [
            row.checked_add(1).map(|r| Coords::new(r, col)),
            row.checked_sub(1).map(|r| Coords::new(r, col)),
            col.checked_add(1).map(|c| Coords::new(row, c)),
            col.checked_sub(1).map(|c| Coords::new(row, c)),
        ];
        let (height, width) = (self.height, self.width);

        IntoIterator::into_iter(candidates)
            .flatten()
            .filter(move |c| c.row < height && c.col < width)
    }

    /// Every cell with its position, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coords, &Occupant)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, occupant)| (Coords::new(i / width, i % width), occupant))
    }

    pub fn count<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&Occupant) -> bool,
    {
        self.cells.iter().filter(|o| predicate(o)).count()
    }

    fn out_of_bounds(&self, coords: Coords) -> GameError {
        GameError::OutOfBounds { coords, height: self.height, width: self.width }
    }
}

/// Plain-text dump, one glyph per cell and a newline after every row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for occupant in row {
                let ch = match occupant {
                    Occupant::Empty => '.',
                    Occupant::Food => 'O',
                    Occupant::Head => '@',
                    Occupant::Body { .. } => '#',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_at_rejects_out_of_bounds() {
        let grid = Grid::new(3, 4);

        assert!(grid.cell_at(Coords::new(2, 3)).is_ok());
        assert!(matches!(
            grid.cell_at(Coords::new(3, 0)),
            Err(GameError::OutOfBounds { height: 3, width: 4, .. })
        ));
        assert!(grid.cell_at(Coords::new(0, 4)).is_err());
    }

    #[test]
    fn set_uses_row_major_indexing() {
        let mut grid = Grid::new(2, 3);
        grid.set(Coords::new(1, 2), Occupant::Food).unwrap();

        assert_eq!(grid.index_of(Coords::new(1, 2)), Some(5));
        assert_eq!(grid.cell_at(Coords::new(1, 2)).unwrap(), &Occupant::Food);
        assert_eq!(grid.count(|o| *o == Occupant::Food), 1);
    }

    #[test]
    fn neighbors_are_clipped_at_the_edges() {
        let grid = Grid::new(3, 3);

        let corner: Vec<_> = grid.neighbors_of(Coords::new(0, 0)).collect();
        assert_eq!(corner, vec![Coords::new(1, 0), Coords::new(0, 1)]);

        let centre: Vec<_> = grid.neighbors_of(Coords::new(1, 1)).collect();
        assert_eq!(
            centre,
            vec![Coords::new(2, 1), Coords::new(0, 1), Coords::new(1, 2), Coords::new(1, 0)]
        );

        let far: Vec<_> = grid.neighbors_of(Coords::new(2, 2)).collect();
        assert_eq!(far, vec![Coords::new(1, 2), Coords::new(2, 1)]);
    }

    #[test]
    fn display_renders_rows_in_order() {
        let mut grid = Grid::new(2, 3);
        grid.set(Coords::new(0, 0), Occupant::Head).unwrap();
        grid.set(Coords::new(0, 1), Occupant::body(1)).unwrap();
        grid.set(Coords::new(1, 2), Occupant::Food).unwrap();

        assert_eq!(grid.to_string(), "@#.\n..O\n");
    }
}
