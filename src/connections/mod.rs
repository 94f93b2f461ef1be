use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The four compass sides of a grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    /// All sides in clockwise order, matching the mask bit layout
    pub const ALL: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    /// The side facing back at this one across a shared edge
    pub fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::East => Side::West,
            Side::South => Side::North,
            Side::West => Side::East,
        }
    }

    /// Grid offset to the neighbor cell on this side (North is +y, East is +x)
    pub fn offset(self) -> (i32, i32) {
        match self {
            Side::North => (0, 1),
            Side::East => (1, 0),
            Side::South => (0, -1),
            Side::West => (-1, 0),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Side::North => 0b0001,
            Side::East => 0b0010,
            Side::South => 0b0100,
            Side::West => 0b1000,
        }
    }
}

/// A quarter-turn count in [0, 3], clockwise
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    Serialize,
    Deserialize,
)]
pub struct Rotation(u8);

impl Rotation {
    /// All four rotations in search order
    pub const ALL: [Rotation; 4] = [Rotation(0), Rotation(1), Rotation(2), Rotation(3)];

    /// Identity rotation
    pub const NONE: Rotation = Rotation(0);

    pub fn new(steps: u8) -> Self {
        Self(steps % 4)
    }

    pub fn steps(self) -> u8 {
        self.0
    }

    /// Rotation angle about the vertical axis for the rendering layer
    pub fn degrees(self) -> f32 {
        self.0 as f32 * 90.0
    }
}

/// Bitset of {North, East, South, West} road connections on a tile edge.
///
/// Bits are laid out clockwise so rotating the tile by one quarter turn is a
/// 4-bit rotate of the mask.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub struct ConnectionMask(u8);

impl ConnectionMask {
    /// No connections on any side
    pub const NONE: ConnectionMask = ConnectionMask(0b0000);

    /// Connections on all four sides (the base tile mask)
    pub const ALL: ConnectionMask = ConnectionMask(0b1111);

    /// Build a mask from a list of open sides
    pub fn of(sides: &[Side]) -> Self {
        let mut mask = Self::NONE;
        for &side in sides {
            mask = mask.with(side);
        }
        mask
    }

    /// Whether the given side is open
    pub fn has(self, side: Side) -> bool {
        self.0 & side.bit() != 0
    }

    /// This mask with the given side opened
    pub fn with(self, side: Side) -> Self {
        Self(self.0 | side.bit())
    }

    /// Number of open sides (0-4)
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// A road tile needs at least two open sides; anything less is a dead end
    pub fn is_valid_road_tile(self) -> bool {
        self.count() >= 2
    }

    /// Rotate the mask clockwise by the given quarter turns.
    ///
    /// One step maps North to East, East to South, South to West, West to
    /// North; four steps are the identity.
    pub fn rotate(self, rotation: Rotation) -> Self {
        let steps = rotation.steps();
        let bits = self.0 & 0b1111;
        Self(((bits << steps) | (bits >> (4 - steps))) & 0b1111)
    }

    /// Whether two adjacent masks agree on a shared edge: `a` must be open
    /// toward `b` and `b` open back toward `a`
    pub fn can_connect(a: ConnectionMask, b: ConnectionMask, direction_from_a_to_b: Side) -> bool {
        a.has(direction_from_a_to_b) && b.has(direction_from_a_to_b.opposite())
    }

    /// The open sides of this mask, in clockwise order
    pub fn sides(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |&side| self.has(side))
    }
}

impl std::fmt::Display for ConnectionMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return write!(f, "none");
        }
        let names: Vec<String> = self.sides().map(|s| s.to_string()).collect();
        write!(f, "{}", names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_masks() -> impl Iterator<Item = ConnectionMask> {
        (0u8..16).map(ConnectionMask)
    }

    #[test]
    fn test_opposite_side_symmetry() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
        }
    }

    #[test]
    fn test_offsets_are_inverses() {
        for side in Side::ALL {
            let (dx, dy) = side.offset();
            let (ox, oy) = side.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_rotation_round_trip() {
        for mask in all_masks() {
            assert_eq!(mask.rotate(Rotation::new(4)), mask);
            assert_eq!(
                mask.rotate(Rotation::new(1)).rotate(Rotation::new(3)),
                mask
            );
        }
    }

    #[test]
    fn test_rotation_single_step() {
        let north_only = ConnectionMask::of(&[Side::North]);
        assert_eq!(
            north_only.rotate(Rotation::new(1)),
            ConnectionMask::of(&[Side::East])
        );
        assert_eq!(
            north_only.rotate(Rotation::new(2)),
            ConnectionMask::of(&[Side::South])
        );
        assert_eq!(
            north_only.rotate(Rotation::new(3)),
            ConnectionMask::of(&[Side::West])
        );

        let corner = ConnectionMask::of(&[Side::North, Side::East]);
        assert_eq!(
            corner.rotate(Rotation::new(1)),
            ConnectionMask::of(&[Side::East, Side::South])
        );
    }

    #[test]
    fn test_rotation_preserves_count() {
        for mask in all_masks() {
            for rotation in Rotation::ALL {
                assert_eq!(mask.rotate(rotation).count(), mask.count());
            }
        }
    }

    #[test]
    fn test_connection_count() {
        assert_eq!(ConnectionMask::NONE.count(), 0);
        assert_eq!(ConnectionMask::ALL.count(), 4);
        assert_eq!(ConnectionMask::of(&[Side::North, Side::South]).count(), 2);
    }

    #[test]
    fn test_valid_road_tile_predicate() {
        assert!(!ConnectionMask::NONE.is_valid_road_tile());
        assert!(!ConnectionMask::of(&[Side::North]).is_valid_road_tile());
        assert!(ConnectionMask::of(&[Side::North, Side::South]).is_valid_road_tile());
        assert!(ConnectionMask::ALL.is_valid_road_tile());
    }

    #[test]
    fn test_can_connect() {
        let open_east = ConnectionMask::of(&[Side::East, Side::West]);
        let open_west = ConnectionMask::of(&[Side::East, Side::West]);
        assert!(ConnectionMask::can_connect(open_east, open_west, Side::East));

        let closed = ConnectionMask::of(&[Side::North, Side::South]);
        assert!(!ConnectionMask::can_connect(open_east, closed, Side::East));
        assert!(!ConnectionMask::can_connect(closed, open_west, Side::East));
    }

    #[test]
    fn test_mask_display() {
        assert_eq!(ConnectionMask::NONE.to_string(), "none");
        assert_eq!(
            ConnectionMask::of(&[Side::North, Side::South]).to_string(),
            "North|South"
        );
    }

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Rotation::new(5), Rotation::new(1));
        assert_eq!(Rotation::new(4), Rotation::NONE);
        assert_eq!(Rotation::new(3).degrees(), 270.0);
    }
}
