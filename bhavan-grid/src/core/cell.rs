//! Cell categories for the building occupancy grid.
//!
//! Every cell of every floor carries exactly one semantic category. The
//! rasterizer writes `Wall`, `Door`, `Stair` and `Floor`; `WallBuffer` is only
//! ever produced by the wall buffer expander on a derived grid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic cell category.
///
/// Write precedence during rasterization (higher overrides lower):
/// 1. `Door` (always wins)
/// 2. `Stair`
/// 3. `Wall`
/// 4. `Floor` (only fills `Empty`)
/// 5. `Empty`
///
/// The serde names are the category strings of the persisted grid record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CellType {
    /// No building element projects onto this cell
    #[default]
    Empty = 0,

    /// Wall-like element (walls, columns, curtain walls, windows)
    Wall = 1,

    /// Door leaf or opening
    Door = 2,

    /// Stair flight; vertical connector between floors
    Stair = 3,

    /// Slab surface
    Floor = 4,

    /// Hazard margin around walls (derived grids only)
    WallBuffer = 5,
}

impl CellType {
    /// All categories in discriminant order.
    pub const ALL: [CellType; 6] = [
        CellType::Empty,
        CellType::Wall,
        CellType::Door,
        CellType::Stair,
        CellType::Floor,
        CellType::WallBuffer,
    ];

    /// Can a walker step into this cell?
    #[inline]
    pub fn is_traversable(self) -> bool {
        !matches!(self, CellType::Wall | CellType::WallBuffer)
    }

    /// Is this cell anything other than `Empty`?
    #[inline]
    pub fn is_occupied(self) -> bool {
        self != CellType::Empty
    }

    /// Cells the wall buffer must never overwrite.
    #[inline]
    pub fn is_buffer_protected(self) -> bool {
        matches!(self, CellType::Wall | CellType::Door | CellType::Stair)
    }

    /// Would a cell currently holding `self` accept a write of `incoming`?
    ///
    /// Door always wins, Stair wins unless the cell is a Door, Wall wins
    /// unless the cell is a Door or Stair, Floor only fills Empty.
    #[inline]
    pub fn accepts(self, incoming: CellType) -> bool {
        match incoming {
            CellType::Door => true,
            CellType::Stair => self != CellType::Door,
            CellType::Wall => !matches!(self, CellType::Door | CellType::Stair),
            CellType::Floor => self == CellType::Empty,
            CellType::WallBuffer => !self.is_buffer_protected(),
            CellType::Empty => false,
        }
    }

    /// Category string used in the persisted grid record.
    pub fn name(self) -> &'static str {
        match self {
            CellType::Empty => "empty",
            CellType::Wall => "wall",
            CellType::Door => "door",
            CellType::Stair => "stair",
            CellType::Floor => "floor",
            CellType::WallBuffer => "wall_buffer",
        }
    }

    /// Convert from u8 (for compact storage)
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => CellType::Wall,
            2 => CellType::Door,
            3 => CellType::Stair,
            4 => CellType::Floor,
            5 => CellType::WallBuffer,
            _ => CellType::Empty,
        }
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            CellType::Empty => ' ',
            CellType::Wall => '#',
            CellType::Door => 'D',
            CellType::Stair => 'S',
            CellType::Floor => '.',
            CellType::WallBuffer => '+',
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a category string outside the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cell category: {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for CellType {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(CellType::Empty),
            "wall" => Ok(CellType::Wall),
            "door" => Ok(CellType::Door),
            "stair" => Ok(CellType::Stair),
            "floor" => Ok(CellType::Floor),
            "wall_buffer" => Ok(CellType::WallBuffer),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_type_traversable() {
        assert!(CellType::Empty.is_traversable());
        assert!(CellType::Floor.is_traversable());
        assert!(CellType::Door.is_traversable());
        assert!(CellType::Stair.is_traversable());
        assert!(!CellType::Wall.is_traversable());
        assert!(!CellType::WallBuffer.is_traversable());
    }

    #[test]
    fn test_door_always_wins() {
        for current in CellType::ALL {
            assert!(current.accepts(CellType::Door));
        }
    }

    #[test]
    fn test_floor_never_downgrades() {
        assert!(CellType::Empty.accepts(CellType::Floor));
        assert!(!CellType::Wall.accepts(CellType::Floor));
        assert!(!CellType::Door.accepts(CellType::Floor));
        assert!(!CellType::Stair.accepts(CellType::Floor));
    }

    #[test]
    fn test_wall_and_stair_priority() {
        assert!(CellType::Floor.accepts(CellType::Wall));
        assert!(!CellType::Stair.accepts(CellType::Wall));
        assert!(!CellType::Door.accepts(CellType::Wall));

        assert!(CellType::Wall.accepts(CellType::Stair));
        assert!(!CellType::Door.accepts(CellType::Stair));
    }

    #[test]
    fn test_name_roundtrip() {
        for cell in CellType::ALL {
            assert_eq!(cell.name().parse::<CellType>().unwrap(), cell);
            assert_eq!(CellType::from_u8(cell as u8), cell);
        }
        assert!("walla".parse::<CellType>().is_err());
        assert!("window".parse::<CellType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&CellType::WallBuffer).unwrap();
        assert_eq!(json, "\"wall_buffer\"");
        let parsed: CellType = serde_json::from_str("\"stair\"").unwrap();
        assert_eq!(parsed, CellType::Stair);
        assert!(serde_json::from_str::<CellType>("\"lava\"").is_err());
        assert!(serde_json::from_str::<CellType>("\"walla\"").is_err());
    }
}
