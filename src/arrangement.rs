// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use rand::prelude::*;

use crate::error::{Error, Result};

/// Width and height pair, in pixels.
///
/// Parses from `"WxH"`, or from a single number `"N"` meaning `NxN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s.split_once(|c| c == 'x' || c == 'X').unwrap_or((s, s));
        Ok(Self::new(w.trim().parse()?, h.trim().parse()?))
    }
}

/// Grid of equally sized tiles covering an image exactly.
///
/// Tiles are enumerated in row-major order:
/// the tile at row `r`, column `c` has index `r * cols + c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    tile: Dimensions,
    rows: usize,
    cols: usize,
}

impl TileGrid {
    /// Fits `tile` over `image`.
    ///
    /// Returns `None` if a tile dimension is zero,
    /// does not divide the image dimension, or the tile count overflows.
    pub fn new(image: Dimensions, tile: Dimensions) -> Option<Self> {
        if image.width.checked_rem(tile.width)? != 0 || image.height.checked_rem(tile.height)? != 0
        {
            return None;
        }

        let rows = image.height.checked_div(tile.height)?;
        let cols = image.width.checked_div(tile.width)?;
        rows.checked_mul(cols)?;

        Some(Self { tile, rows, cols })
    }

    pub const fn tile(&self) -> Dimensions {
        self.tile
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of tiles.
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major index of the tile at (`row`, `col`).
    pub const fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// `(column, row)` pairs of every tile, in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| (c, r)))
    }
}

/// Validated tile grid and ordering.
///
/// Can only be made through [`Arrangement::new`],
/// so holding one means the ordering is a permutation of the grid's tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    grid: TileGrid,
    order: Vec<usize>,
}

impl Arrangement {
    /// Validates `tile` and `ordering` against an image of size `image`.
    ///
    /// Value at index `k` of `ordering` is the source tile placed in output slot `k`.
    ///
    /// # Errors
    /// [`Error::InvalidArrangement`] whenever [`valid_input`] is false.
    pub fn new(image: Dimensions, tile: Dimensions, ordering: &[i64]) -> Result<Self> {
        let grid = TileGrid::new(image, tile).ok_or(Error::InvalidArrangement)?;
        if ordering.len() != grid.len() || !is_unique(ordering) {
            return Err(Error::InvalidArrangement);
        }

        let order = ordering
            .iter()
            .map(|&v| usize::try_from(v).map_err(|_| Error::InvalidArrangement))
            .collect::<Result<_>>()?;

        Ok(Self { grid, order })
    }

    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Source tile index filling output slot `slot`.
    ///
    /// # Panics
    /// Panics if `slot` is not less than the tile count.
    pub fn source_of(&self, slot: usize) -> usize {
        self.order[slot]
    }
}

/// Checks `collection` is a permutation of `[0, len)`.
///
/// Empty input is vacuously a permutation.
pub fn is_unique(collection: &[i64]) -> bool {
    let mut sorted = collection.to_vec();
    sorted.sort_unstable();
    sorted.iter().zip(0_i64..).all(|(&v, i)| v == i)
}

/// Checks that `tile` evenly divides `image`,
/// and that `ordering` is a permutation of all the resulting tiles.
pub fn valid_input(image: Dimensions, tile: Dimensions, ordering: &[i64]) -> bool {
    Arrangement::new(image, tile, ordering).is_ok()
}

/// Inverse permutation of `ordering`.
///
/// Rearranging with `ordering` and then with its inverse restores the input.
/// Returns `None` if `ordering` is not a permutation.
pub fn invert(ordering: &[i64]) -> Option<Vec<i64>> {
    if !is_unique(ordering) {
        return None;
    }

    let mut inverse = vec![0; ordering.len()];
    for (slot, &src) in (0_i64..).zip(ordering) {
        *inverse.get_mut(usize::try_from(src).ok()?)? = slot;
    }
    Some(inverse)
}

/// Ordering that leaves every tile in place.
pub fn identity(len: usize) -> Vec<i64> {
    (0_i64..).take(len).collect()
}

/// Uniformly random permutation of `len` tiles.
pub fn random_ordering<R: Rng + ?Sized>(len: usize, random: &mut R) -> Vec<i64> {
    let mut ordering = identity(len);
    ordering.shuffle(random);
    ordering
}
