/// What a single board cell holds.
///
/// `Body` segments carry a countdown: every accepted move that does not eat
/// food lowers it by one, and once it reaches zero the cell reverts to
/// `Empty`. A body created at score `s` therefore lingers for `s` moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Empty,
    Food,
    Head,
    Body { decay: u32 },
}

impl Occupant {
    pub fn body(decay: u32) -> Self {
        Occupant::Body { decay }
    }

    pub fn is_body(&self) -> bool {
        matches!(self, Occupant::Body { .. })
    }

    pub fn decay(&self) -> Option<u32> {
        match self {
            Occupant::Body { decay } => Some(*decay),
            _ => None,
        }
    }
}

/// Whether a mover may enter a cell holding `occupant` on its
/// `arrival_cost`-th move, counted from the board as it is observed now.
///
/// A body segment with decay `d` is cleared before move `d + 1` is applied,
/// so it only blocks arrivals at cost `d` or lower.
pub fn is_passable(occupant: Occupant, arrival_cost: u32) -> bool {
    match occupant {
        Occupant::Empty | Occupant::Food => true,
        Occupant::Head => false,
        Occupant::Body { decay } => decay < arrival_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_food_are_always_passable() {
        for cost in 0..4 {
            assert!(is_passable(Occupant::Empty, cost));
            assert!(is_passable(Occupant::Food, cost));
        }
    }

    #[test]
    fn head_is_never_passable() {
        assert!(!is_passable(Occupant::Head, 0));
        assert!(!is_passable(Occupant::Head, u32::MAX));
    }

    #[test]
    fn body_opens_once_arrival_outlasts_decay() {
        let body = Occupant::body(2);

        assert!(!is_passable(body, 1));
        assert!(!is_passable(body, 2));
        assert!(is_passable(body, 3));
    }

    #[test]
    fn expired_body_is_passable_on_the_next_move() {
        assert!(is_passable(Occupant::body(0), 1));
        assert!(!is_passable(Occupant::body(0), 0));
    }
}
