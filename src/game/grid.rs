//! The 5×5 map grid and fuel-cost geometry.

use std::fmt;
use std::str::FromStr;

/// Width and height of the map in cells.
pub const GRID_SIZE: u8 = 5;

/// The home base cell: non-interactive, zero fuel cost.
pub const HOME: Coord = Coord::new(2, 2);

/// A cell position on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    /// Column, 0 at the left.
    pub x: u8,
    /// Row, 0 at the top.
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Whether this coordinate lies on the map.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.x < GRID_SIZE && self.y < GRID_SIZE
    }

    /// Whether this is the home base.
    #[must_use]
    pub const fn is_home(self) -> bool {
        self.x == HOME.x && self.y == HOME.y
    }

    /// Configuration key for this cell, e.g. `"3,1"`.
    #[must_use]
    pub fn key(self) -> String {
        format!("{},{}", self.x, self.y)
    }

    /// Every cell on the map in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| Coord::new(x, y)))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Error parsing a `"x,y"` cell key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCoordError {
    key: String,
}

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cell key {:?} (expected \"x,y\")", self.key)
    }
}

impl std::error::Error for ParseCoordError {}

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError { key: s.to_string() };
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Coord::new(x, y))
    }
}

/// Fuel needed to reach `(x, y)`: Manhattan distance from home.
///
/// Home costs 0, the four corners of the 5×5 grid cost 4.
#[must_use]
pub const fn calculate_fuel_cost(x: u8, y: u8) -> u32 {
    x.abs_diff(HOME.x) as u32 + y.abs_diff(HOME.y) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_cost_is_manhattan_distance() {
        for cell in Coord::all() {
            let expected = (i32::from(cell.x) - 2).unsigned_abs() + (i32::from(cell.y) - 2).unsigned_abs();
            assert_eq!(calculate_fuel_cost(cell.x, cell.y), expected, "cell {cell}");
        }
    }

    #[test]
    fn test_fuel_cost_landmarks() {
        assert_eq!(calculate_fuel_cost(2, 2), 0);
        assert_eq!(calculate_fuel_cost(0, 0), 4);
        assert_eq!(calculate_fuel_cost(4, 4), 4);
        assert_eq!(calculate_fuel_cost(2, 1), 1);
    }

    #[test]
    fn test_all_covers_grid_once() {
        let cells: Vec<_> = Coord::all().collect();
        assert_eq!(cells.len(), 25);
        assert_eq!(cells[0], Coord::new(0, 0));
        assert_eq!(cells[24], Coord::new(4, 4));
        assert_eq!(cells.iter().filter(|c| c.is_home()).count(), 1);
    }

    #[test]
    fn test_key_roundtrip() {
        let cell = Coord::new(3, 1);
        assert_eq!(cell.key(), "3,1");
        assert_eq!("3,1".parse::<Coord>().unwrap(), cell);
        assert_eq!(" 0 , 4 ".parse::<Coord>().unwrap(), Coord::new(0, 4));
    }

    #[test]
    fn test_bad_keys_rejected() {
        assert!("3".parse::<Coord>().is_err());
        assert!("a,b".parse::<Coord>().is_err());
        assert!("-1,2".parse::<Coord>().is_err());
    }

    #[test]
    fn test_bounds() {
        assert!(Coord::new(4, 4).in_bounds());
        assert!(!Coord::new(5, 0).in_bounds());
        assert!(!Coord::new(0, 5).in_bounds());
    }
}
