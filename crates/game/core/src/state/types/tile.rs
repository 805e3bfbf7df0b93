/// Classification of one map cell.
///
/// The first three variants are structural and come from the generator.
/// `Bomb`, `FireHorizontal` and `FireVertical` are transient explosive
/// markers stamped by the engine. Players and power-ups are tracked outside
/// the map.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Tile {
    #[default]
    Empty,
    /// Destructible block.
    Breaking,
    /// Indestructible block.
    NonBreaking,
    Bomb,
    FireHorizontal,
    FireVertical,
}

impl Tile {
    /// Kinds the map generator draws from.
    pub const STRUCTURAL: [Tile; 3] = [Tile::Empty, Tile::Breaking, Tile::NonBreaking];

    pub fn is_fire(self) -> bool {
        matches!(self, Tile::FireHorizontal | Tile::FireVertical)
    }

    /// Tiles a player cannot step onto.
    pub fn blocks_movement(self) -> bool {
        matches!(self, Tile::Breaking | Tile::NonBreaking | Tile::Bomb)
    }

    /// Single-character rendering used by text dumps and layout files.
    pub fn glyph(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Breaking => '+',
            Tile::NonBreaking => '#',
            Tile::Bomb => 'o',
            Tile::FireHorizontal => '-',
            Tile::FireVertical => '|',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        Some(match glyph {
            '.' => Tile::Empty,
            '+' => Tile::Breaking,
            '#' => Tile::NonBreaking,
            'o' => Tile::Bomb,
            '-' => Tile::FireHorizontal,
            '|' => Tile::FireVertical,
            _ => return None,
        })
    }
}
