use std::fmt;

/// A position on the board, addressed as `(row, col)` from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coords {
    pub row: usize,
    pub col: usize,
}

impl Coords {
    pub const fn new(row: usize, col: usize) -> Self {
        Coords { row, col }
    }

    /// Taxicab distance, the admissible heuristic for 4-connected movement.
    pub fn manhattan(self, other: Coords) -> usize {
        abs_diff(self.row, other.row) + abs_diff(self.col, other.col)
    }

    pub fn is_adjacent(self, other: Coords) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(usize, usize)> for Coords {
    fn from((row, col): (usize, usize)) -> Self {
        Coords::new(row, col)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

fn abs_diff(a: usize, b: usize) -> usize {
    if a > b { a - b } else { b - a }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Coords::new(0, 0);
        let b = Coords::new(4, 3);

        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn adjacency_excludes_diagonals_and_self() {
        let c = Coords::new(2, 2);

        assert!(c.is_adjacent(Coords::new(1, 2)));
        assert!(c.is_adjacent(Coords::new(2, 3)));
        assert!(!c.is_adjacent(Coords::new(3, 3)));
        assert!(!c.is_adjacent(c));
    }
}
