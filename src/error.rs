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

use thiserror::Error;

/// Error type of every fallible operation in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Tile size does not divide the image evenly,
    /// or the ordering is not a permutation of the tiles.
    #[error("The tile size or ordering are not valid for the given image")]
    InvalidArrangement,

    /// Decoding or encoding failure from the image codec.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// File could not be opened.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Pixel buffer does not match the reported image geometry.
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
