use std::fmt;

/// Unique identifier for a combatant within one encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// Identifiers are assigned from 1 in roster order.
    pub const FIRST: Self = Self(1);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in square coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: diagonal steps cost the same as orthogonal ones.
    pub fn distance(&self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    pub fn is_adjacent(&self, other: Position) -> bool {
        self.distance(other) == 1
    }

    /// One square closer to `target`, moving diagonally when both axes differ.
    pub fn step_towards(&self, target: Position) -> Position {
        Position {
            x: self.x + (target.x - self.x).signum(),
            y: self.y + (target.y - self.y).signum(),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Round counter. Round 1 opens when the encounter starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round(pub u32);

impl Round {
    pub const ZERO: Self = Self(0);
    pub const FIRST: Self = Self(1);

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rectangular arena bounds. Valid squares are `0..width` by `0..height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arena {
    pub width: u32,
    pub height: u32,
}

impl Arena {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_distance_counts_diagonals_as_one() {
        let a = Position::new(0, 0);
        assert_eq!(a.distance(Position::new(3, 1)), 3);
        assert_eq!(a.distance(Position::new(-2, -2)), 2);
        assert!(a.is_adjacent(Position::new(1, 1)));
        assert!(!a.is_adjacent(a));
    }

    #[test]
    fn step_towards_closes_distance() {
        let from = Position::new(0, 0);
        let to = Position::new(3, -1);
        let step = from.step_towards(to);
        assert_eq!(step, Position::new(1, -1));
        assert_eq!(step.distance(to), 2);
    }

    #[test]
    fn arena_bounds() {
        let arena = Arena::new(4, 3);
        assert!(arena.contains(Position::new(3, 2)));
        assert!(!arena.contains(Position::new(4, 0)));
        assert!(!arena.contains(Position::new(0, -1)));
    }
}
