//! Library geometry and the [`Coordinate`] that addresses a single book.
//!
//! Each hexagon holds four walls, each wall five shelves, each shelf thirty-two
//! volumes. Hexagons are numbered without bound, which is what makes the
//! library infinite. Two construction paths exist:
//!
//! - [`Coordinate::wrapping`] reduces `wall`, `shelf` and `volume` into range
//!   (used by generation and by search probes).
//! - [`Coordinate::strict`] rejects out-of-range components (used by the
//!   single-book endpoint so callers get predictable addressing).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BabelError, Result};

pub const WALLS: u8 = 4;
pub const SHELVES: u8 = 5;
pub const VOLUMES: u8 = 32;
pub const BOOKS_PER_HEXAGON: u64 = WALLS as u64 * SHELVES as u64 * VOLUMES as u64;

/// Location of one book. Components other than `hexagon` are always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub hexagon: u64,
    pub wall: u8,
    pub shelf: u8,
    pub volume: u8,
}

impl Coordinate {
    /// Build a coordinate, reducing `wall`, `shelf` and `volume` modulo their
    /// ranges. Negative values wrap from the top (`-1` volume is volume 31).
    pub fn wrapping(hexagon: u64, wall: i64, shelf: i64, volume: i64) -> Self {
        Self {
            hexagon,
            wall: wall.rem_euclid(WALLS as i64) as u8,
            shelf: shelf.rem_euclid(SHELVES as i64) as u8,
            volume: volume.rem_euclid(VOLUMES as i64) as u8,
        }
    }

    /// Like [`Coordinate::wrapping`] but for a signed hexagon. A negative
    /// hexagon lies outside the library and is rejected.
    pub fn wrapping_signed(hexagon: i64, wall: i64, shelf: i64, volume: i64) -> Result<Self> {
        let hexagon = u64::try_from(hexagon).map_err(|_| {
            BabelError::InvalidCoordinate(format!("hexagon must be non-negative, got {hexagon}"))
        })?;
        Ok(Self::wrapping(hexagon, wall, shelf, volume))
    }

    /// Build a coordinate, rejecting any component outside its declared range.
    pub fn strict(hexagon: i64, wall: i64, shelf: i64, volume: i64) -> Result<Self> {
        let hexagon = u64::try_from(hexagon).map_err(|_| {
            BabelError::InvalidCoordinate(format!("hexagon must be non-negative, got {hexagon}"))
        })?;
        Self::checked(hexagon, wall, shelf, volume)
    }

    /// [`Coordinate::strict`] for a hexagon already known to be non-negative.
    pub fn checked(hexagon: u64, wall: i64, shelf: i64, volume: i64) -> Result<Self> {
        let wall = check_range("wall", wall, WALLS)?;
        let shelf = check_range("shelf", shelf, SHELVES)?;
        let volume = check_range("volume", volume, VOLUMES)?;
        Ok(Self {
            hexagon,
            wall,
            shelf,
            volume,
        })
    }

    /// Parse four textual components (URL path segments, CLI arguments) strictly.
    pub fn parse_parts(hexagon: &str, wall: &str, shelf: &str, volume: &str) -> Result<Self> {
        let hexagon = hexagon.trim();
        if hexagon.starts_with('-') {
            return Err(BabelError::InvalidCoordinate(format!(
                "hexagon must be non-negative, got {hexagon}"
            )));
        }
        let hexagon: u64 = hexagon.parse().map_err(|_| {
            BabelError::InvalidCoordinate(format!(
                "hexagon must be an integer in 0..={}, got {hexagon:?}",
                u64::MAX
            ))
        })?;
        let component = |name: &str, raw: &str| -> Result<i64> {
            raw.trim().parse().map_err(|_| {
                BabelError::InvalidCoordinate(format!("{name} must be an integer, got {raw:?}"))
            })
        };
        Self::checked(
            hexagon,
            component("wall", wall)?,
            component("shelf", shelf)?,
            component("volume", volume)?,
        )
    }

    /// Stable book identifier: `hexagon.wall.shelf.volume`.
    pub fn id(&self) -> String {
        format!("{}.{}.{}.{}", self.hexagon, self.wall, self.shelf, self.volume)
    }

    /// Seed string for the generator, namespaced by the library's base seed.
    pub fn seed_string(&self, base_seed: &str) -> String {
        format!(
            "{base_seed}|{}|{}|{}|{}",
            self.hexagon, self.wall, self.shelf, self.volume
        )
    }

    /// Same shelf, volume shifted by `delta` with wraparound.
    pub fn shifted_volume(&self, delta: i64) -> Self {
        Self {
            volume: (self.volume as i64 + delta).rem_euclid(VOLUMES as i64) as u8,
            ..*self
        }
    }

    /// Distance in `[0, 1]`. Books in different hexagons are maximally distant;
    /// within a hexagon, walls, shelves and (circular) volumes contribute equally.
    pub fn distance(&self, other: &Coordinate) -> f64 {
        if self.hexagon != other.hexagon {
            return 1.0;
        }
        let wall = circular_gap(self.wall, other.wall, WALLS) as f64 / (WALLS / 2) as f64;
        let shelf = self.shelf.abs_diff(other.shelf) as f64 / (SHELVES - 1) as f64;
        let volume = circular_gap(self.volume, other.volume, VOLUMES) as f64 / (VOLUMES / 2) as f64;
        (wall + shelf + volume) / 3.0
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hexagon {} / wall {} / shelf {} / volume {}",
            self.hexagon, self.wall, self.shelf, self.volume
        )
    }
}

fn check_range(name: &str, value: i64, bound: u8) -> Result<u8> {
    if (0..bound as i64).contains(&value) {
        Ok(value as u8)
    } else {
        Err(BabelError::InvalidCoordinate(format!(
            "{name} must be in 0..={}, got {value}",
            bound - 1
        )))
    }
}

fn circular_gap(a: u8, b: u8, modulus: u8) -> u8 {
    let d = a.abs_diff(b);
    d.min(modulus - d)
}
