//! Game configuration.
//!
//! Loaded from JSON (every field has a default) and validated once, before
//! the engine is built. A configuration that would produce inconsistent
//! geometry is refused outright.

use crate::board::{standard_legend, Board, Bonus};
use crate::geometry::{GridGeometry, RackGeometry, WheelGeometry};
use kurbo::{Point, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Letters used when nothing else is configured or stored.
pub const DEFAULT_LETTERS: [char; 7] = ['A', 'B', 'C', 'D', 'E', 'F', 'G'];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Letter set is empty")]
    EmptyLetters,
    #[error("Board legend is empty")]
    EmptyLegend,
    #[error("Board legend row {row} has {found} cells, expected {expected}")]
    NonRectangularLegend {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unknown bonus tag {tag:?} at row {row}, column {col}")]
    UnknownBonusTag { tag: String, row: usize, col: usize },
    #[error("Invalid {name}: {value}")]
    InvalidDimension { name: &'static str, value: f64 },
    #[error("Rack holds {capacity} tiles but {found} were given")]
    RackOverflow { capacity: usize, found: usize },
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTag {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl ColorTag {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSS hex notation (`#rrggbb` or `#rrggbbaa`).
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for ColorTag {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<ColorTag> for Color {
    fn from(color: ColorTag) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Cosmetic color per bonus kind. Has no effect on game behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusPalette {
    pub plain: ColorTag,
    pub double_letter: ColorTag,
    pub triple_letter: ColorTag,
    pub double_word: ColorTag,
    pub triple_word: ColorTag,
    pub center: ColorTag,
    /// Fill for cells holding a letter.
    pub occupied: ColorTag,
    /// Fill for the cell under a dragged tile.
    pub highlight: ColorTag,
}

impl Default for BonusPalette {
    fn default() -> Self {
        Self {
            plain: ColorTag::rgb(0xe8, 0xf4, 0xd0),
            double_letter: ColorTag::rgb(0x6a, 0x1b, 0x9a),
            triple_letter: ColorTag::rgb(0x15, 0x65, 0xc0),
            double_word: ColorTag::rgb(0xf9, 0xa8, 0x25),
            triple_word: ColorTag::rgb(0xc6, 0x28, 0x28),
            center: ColorTag::rgb(0xf9, 0xa8, 0x25),
            occupied: ColorTag::rgb(0x4c, 0xaf, 0x50),
            highlight: ColorTag::rgb(0xff, 0xd5, 0x4f),
        }
    }
}

impl BonusPalette {
    /// Color tag for a bonus kind.
    pub fn color_for(&self, bonus: Bonus) -> Color {
        let tag = match bonus {
            Bonus::None => self.plain,
            Bonus::DoubleLetter => self.double_letter,
            Bonus::TripleLetter => self.triple_letter,
            Bonus::DoubleWord => self.double_word,
            Bonus::TripleWord => self.triple_word,
            Bonus::Center => self.center,
        };
        tag.into()
    }
}

/// Letter wheel layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Top-left corner of the square wheel area.
    pub origin: Point,
    /// Side length of the wheel area.
    pub size: f64,
    /// Distance from the wheel center to each letter center.
    pub radius: f64,
    /// Side length of each letter square.
    pub letter_size: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            size: 250.0,
            radius: 90.0,
            letter_size: 50.0,
        }
    }
}

impl WheelConfig {
    /// Center of the wheel.
    pub fn center(&self) -> Point {
        self.origin + Vec2::new(self.size / 2.0, self.size / 2.0)
    }

    pub fn geometry(&self) -> WheelGeometry {
        WheelGeometry::new(self.center(), self.radius, self.letter_size)
    }
}

/// Board layout and legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Top-left corner of the board.
    pub origin: Point,
    /// Width of the board; cells are square.
    pub size: f64,
    /// Row-major bonus tags.
    pub legend: Vec<Vec<String>>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            origin: Point::new(0.0, 270.0),
            size: 440.0,
            legend: standard_legend(),
        }
    }
}

impl BoardConfig {
    /// Number of columns in the legend.
    pub fn cols(&self) -> usize {
        self.legend.first().map(Vec::len).unwrap_or(0)
    }

    pub fn cell_size(&self) -> f64 {
        match self.cols() {
            0 => 0.0,
            cols => self.size / cols as f64,
        }
    }

    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.origin, self.cell_size(), self.legend.len(), self.cols())
    }

    /// Build the board described by the legend.
    pub fn build_board(&self) -> ConfigResult<Board> {
        Board::from_legend(&self.legend)
    }
}

/// Tile rack layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RackConfig {
    /// Top-left corner of the first tile.
    pub origin: Point,
    pub tile_size: f64,
    pub gap: f64,
    /// Number of tile slots.
    pub capacity: usize,
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            origin: Point::new(0.0, 730.0),
            tile_size: 36.0,
            gap: 6.0,
            capacity: 7,
        }
    }
}

impl RackConfig {
    pub fn geometry(&self) -> RackGeometry {
        RackGeometry::new(self.origin, self.tile_size, self.gap, self.capacity)
    }
}

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub wheel: WheelConfig,
    pub board: BoardConfig,
    pub rack: RackConfig,
    /// Initial wheel letters.
    pub letters: Vec<char>,
    /// Initial rack contents; shorter than the capacity leaves empty slots.
    pub rack_letters: Vec<char>,
    pub palette: BonusPalette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            wheel: WheelConfig::default(),
            board: BoardConfig::default(),
            rack: RackConfig::default(),
            letters: DEFAULT_LETTERS.to_vec(),
            rack_letters: DEFAULT_LETTERS.to_vec(),
            palette: BonusPalette::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check that the configuration describes a consistent game.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.letters.is_empty() {
            return Err(ConfigError::EmptyLetters);
        }

        positive("wheel size", self.wheel.size)?;
        positive("wheel radius", self.wheel.radius)?;
        positive("letter size", self.wheel.letter_size)?;
        positive("board size", self.board.size)?;
        positive("rack tile size", self.rack.tile_size)?;
        if !self.rack.gap.is_finite() || self.rack.gap < 0.0 {
            return Err(ConfigError::InvalidDimension {
                name: "rack gap",
                value: self.rack.gap,
            });
        }
        if self.rack.capacity == 0 {
            return Err(ConfigError::InvalidDimension {
                name: "rack capacity",
                value: 0.0,
            });
        }
        if self.rack_letters.len() > self.rack.capacity {
            return Err(ConfigError::RackOverflow {
                capacity: self.rack.capacity,
                found: self.rack_letters.len(),
            });
        }

        // Legend shape and tags.
        self.board.build_board()?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { name, value })
    }
}
