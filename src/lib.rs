//! Library to rearrange image/array tiles.
//!
//! Image is cut into a grid of equally sized tiles,
//! then reassembled with the tiles in a given order ([rearrange()]):
//!
//! * Tile size must divide the image size with no remainder.
//! * Ordering must use every tile exactly once ([is_unique]).
//!   Value at index `k` is the source tile placed in slot `k`,
//!   both counted in row-major order.
//!
//! [rearrange_tiles] does the whole round trip from file to file,
//! keeping the color type of the source image.
//! Applying [invert]ed ordering afterwards restores the original.

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

mod arrangement;
mod error;
mod rearrange;

#[doc(inline)]
pub use crate::arrangement::{
    identity, invert, is_unique, random_ordering, valid_input, Arrangement, Dimensions, TileGrid,
};
#[doc(inline)]
pub use crate::error::{Error, Result};
#[doc(inline)]
pub use crate::rearrange::{get_tile, open_image, rearrange, rearrange_image, rearrange_tiles};
