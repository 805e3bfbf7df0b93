//! Pixel and grid coordinate types and the conversions between them.
//!
//! A pixel coordinate is always a whole multiple of the movement unit, so the
//! conversion is exact. Misaligned input is a caller bug and is reported as
//! [`CoordinateError`] rather than rounded.

use std::fmt;

use crate::error::{ErrorSeverity, GameError};

/// Cell index on the map, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoordinate {
    pub col: i32,
    pub row: i32,
}

impl GridCoordinate {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Neighbor `steps` cells away along `(dcol, drow)`.
    #[inline]
    pub const fn offset(self, dcol: i32, drow: i32, steps: i32) -> Self {
        Self {
            col: self.col + dcol * steps,
            row: self.row + drow * steps,
        }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Position in pixels, always a multiple of the movement unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelCoordinate {
    pub top: i32,
    pub left: i32,
}

impl PixelCoordinate {
    pub const fn new(top: i32, left: i32) -> Self {
        Self { top, left }
    }
}

/// A position given in either representation, tagged at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Coordinate {
    Grid(GridCoordinate),
    Pixel(PixelCoordinate),
}

impl Coordinate {
    pub fn to_grid(self, unit: u32) -> Result<GridCoordinate, CoordinateError> {
        match self {
            Coordinate::Grid(grid) => Ok(grid),
            Coordinate::Pixel(pixel) => to_grid_coordinate(pixel, unit),
        }
    }

    pub fn to_pixel(self, unit: u32) -> Result<PixelCoordinate, CoordinateError> {
        match self {
            Coordinate::Grid(grid) => to_pixel_coordinate(grid, unit),
            Coordinate::Pixel(pixel) => Ok(pixel),
        }
    }
}

impl From<GridCoordinate> for Coordinate {
    fn from(value: GridCoordinate) -> Self {
        Coordinate::Grid(value)
    }
}

impl From<PixelCoordinate> for Coordinate {
    fn from(value: PixelCoordinate) -> Self {
        Coordinate::Pixel(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateError {
    #[error("movement unit must be positive (got {unit})")]
    InvalidUnit { unit: u32 },

    #[error("pixel coordinate {pixel:?} is not aligned to unit {unit}")]
    Misaligned { pixel: PixelCoordinate, unit: u32 },

    #[error("cell {grid} at unit {unit} is outside the pixel range")]
    PixelOverflow { grid: GridCoordinate, unit: u32 },
}

impl GameError for CoordinateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUnit { .. } => "COORD_INVALID_UNIT",
            Self::Misaligned { .. } => "COORD_MISALIGNED",
            Self::PixelOverflow { .. } => "COORD_PIXEL_OVERFLOW",
        }
    }
}

fn check_unit(unit: u32) -> Result<i32, CoordinateError> {
    match i32::try_from(unit) {
        Ok(unit) if unit > 0 => Ok(unit),
        _ => Err(CoordinateError::InvalidUnit { unit }),
    }
}

/// `{ col: left / unit, row: top / unit }`, exact division only.
pub fn to_grid_coordinate(
    pixel: PixelCoordinate,
    unit: u32,
) -> Result<GridCoordinate, CoordinateError> {
    let size = check_unit(unit)?;
    if pixel.left % size != 0 || pixel.top % size != 0 {
        return Err(CoordinateError::Misaligned { pixel, unit });
    }

    Ok(GridCoordinate {
        col: pixel.left / size,
        row: pixel.top / size,
    })
}

/// Inverse of [`to_grid_coordinate`].
pub fn to_pixel_coordinate(
    grid: GridCoordinate,
    unit: u32,
) -> Result<PixelCoordinate, CoordinateError> {
    let size = check_unit(unit)?;
    match (grid.row.checked_mul(size), grid.col.checked_mul(size)) {
        (Some(top), Some(left)) => Ok(PixelCoordinate { top, left }),
        _ => Err(CoordinateError::PixelOverflow { grid, unit }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_exact_for_aligned_pixels() {
        for unit in [1u32, 8, 40] {
            for row in -2..6 {
                for col in -2..6 {
                    let pixel = PixelCoordinate::new(row * unit as i32, col * unit as i32);
                    let grid = to_grid_coordinate(pixel, unit).unwrap();
                    assert_eq!(grid, GridCoordinate::new(col, row));
                    assert_eq!(to_pixel_coordinate(grid, unit), Ok(pixel));
                }
            }
        }
    }

    #[test]
    fn misaligned_pixels_are_rejected() {
        let pixel = PixelCoordinate::new(40, 41);
        assert_eq!(
            to_grid_coordinate(pixel, 40),
            Err(CoordinateError::Misaligned { pixel, unit: 40 })
        );
    }

    #[test]
    fn zero_unit_is_rejected() {
        assert_eq!(
            to_grid_coordinate(PixelCoordinate::new(0, 0), 0),
            Err(CoordinateError::InvalidUnit { unit: 0 })
        );
        assert_eq!(
            Coordinate::Grid(GridCoordinate::new(1, 1)).to_pixel(0),
            Err(CoordinateError::InvalidUnit { unit: 0 })
        );
    }

    #[test]
    fn oversized_units_are_rejected() {
        let grid = GridCoordinate::new(14, 14);
        assert_eq!(
            to_pixel_coordinate(grid, 200_000_000),
            Err(CoordinateError::PixelOverflow {
                grid,
                unit: 200_000_000
            })
        );
        assert_eq!(
            to_pixel_coordinate(grid, u32::MAX),
            Err(CoordinateError::InvalidUnit { unit: u32::MAX })
        );
    }

    #[test]
    fn tagged_union_normalizes_either_way() {
        let grid = GridCoordinate::new(3, 2);
        let pixel = PixelCoordinate::new(80, 120);

        assert_eq!(Coordinate::from(grid).to_pixel(40), Ok(pixel));
        assert_eq!(Coordinate::from(pixel).to_grid(40), Ok(grid));
        assert_eq!(Coordinate::from(grid).to_grid(40), Ok(grid));
        assert_eq!(Coordinate::from(pixel).to_pixel(40), Ok(pixel));
    }
}
