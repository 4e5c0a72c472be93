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

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::io::Reader as ImageReader;
use image::DynamicImage;
use log::{debug, trace};
use ndarray::parallel::prelude::*;
use ndarray::prelude::*;
use ndarray::{Slice, Zip};

use crate::arrangement::{Arrangement, Dimensions};
use crate::error::Result;

/// Tile at column `i`, row `j` of `arr`.
///
/// Only the first 2 dimensions (rows, columns) are cut.
///
/// # Panics
/// Panics if the tile reaches outside of `arr`.
pub fn get_tile<'a, A, D>(
    mut arr: ArrayView<'a, A, D>,
    tile: Dimensions,
    i: usize,
    j: usize,
) -> ArrayView<'a, A, D>
where
    D: Dimension,
{
    let (w, h) = (tile.width, tile.height);
    arr.slice_axis_inplace(Axis(0), Slice::from(h * j..h * (j + 1)));
    arr.slice_axis_inplace(Axis(1), Slice::from(w * i..w * (i + 1)));
    arr
}

/// Main rearrangement algorithm.
///
/// Cuts `arr` into tiles of size `tile` and reassembles them so that
/// output slot `k` (row-major) holds source tile `ordering[k]`.
///
/// Parameters:
/// * `arr` : Input array view, shaped `(height, width, depth)`.
///   Depth is carried along with each pixel.
/// * `tile` : Tile size. Must divide the image size exactly.
/// * `ordering` : Permutation of all tile indices.
///
/// # Errors
/// [`Error::InvalidArrangement`](crate::Error::InvalidArrangement)
/// if the tile size or ordering does not fit the array.
/// Nothing is allocated in that case.
pub fn rearrange<A>(arr: ArrayView3<'_, A>, tile: Dimensions, ordering: &[i64]) -> Result<Array3<A>>
where
    A: Clone + Default + Send + Sync,
{
    let (height, width, depth) = arr.dim();
    let arrangement = Arrangement::new(Dimensions::new(width, height), tile, ordering)?;
    let grid = arrangement.grid();
    debug!(
        "rearranging {width}x{height} image into {}x{} tiles of {tile}",
        grid.cols(),
        grid.rows(),
    );

    let tiles: Vec<_> = grid
        .positions()
        .map(|(i, j)| get_tile(arr.view(), tile, i, j))
        .collect();

    let mut out = Array3::<A>::default(arr.raw_dim());

    // Zero sized chunks panic; a zero depth array has nothing to place anyway.
    let chunk = (tile.height, tile.width, depth.max(1));
    Zip::indexed(out.exact_chunks_mut(chunk)).par_for_each(|(r, c, _), mut slot| {
        let src = arrangement.source_of(grid.index(r, c));
        trace!("tile {src} -> ({c}, {r})");
        slot.assign(&tiles[src]);
    });

    Ok(out)
}

/// Opens and decodes an image, guessing the format from its content.
///
/// # Errors
/// Propagates I/O and decoding errors.
pub fn open_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    Ok(ImageReader::new(BufReader::new(File::open(path)?))
        .with_guessed_format()?
        .decode()?)
}

/// Rearranges tiles of a decoded image and saves the result to `out_path`.
///
/// Output has the same size and color type as `image`.
/// Format is chosen from the extension of `out_path`.
///
/// # Errors
/// [`Error::InvalidArrangement`](crate::Error::InvalidArrangement) on bad tile size or ordering,
/// in which case nothing is written.
/// Encoding errors are propagated as is.
pub fn rearrange_image(
    image: &DynamicImage,
    tile: Dimensions,
    ordering: &[i64],
    out_path: impl AsRef<Path>,
) -> Result<()> {
    let color = image.color();
    let (width, height) = (image.width(), image.height());

    let arr = ArrayView3::from_shape(
        (
            height as usize,
            width as usize,
            usize::from(color.bytes_per_pixel()),
        ),
        image.as_bytes(),
    )?;

    let out = rearrange(arr, tile, ordering)?;

    image::save_buffer(out_path, &out.into_raw_vec(), width, height, color)?;

    Ok(())
}

/// Rearranges the tiles of the image at `image_path` and saves it to `out_path`.
///
/// The source image is released on every path, including failed validation.
///
/// # Errors
/// See [`open_image`] and [`rearrange_image`].
pub fn rearrange_tiles(
    image_path: impl AsRef<Path>,
    tile: Dimensions,
    ordering: &[i64],
    out_path: impl AsRef<Path>,
) -> Result<()> {
    let image = open_image(image_path)?;
    rearrange_image(&image, tile, ordering, out_path)
}

#[cfg(test)]
mod tests {
    use crate::arrangement::{identity, invert, random_ordering};
    use crate::error::Error;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use super::*;

    const fn dim(width: usize, height: usize) -> Dimensions {
        Dimensions::new(width, height)
    }

    fn numbered(height: usize, width: usize, depth: usize) -> Array3<u32> {
        Array3::from_shape_fn((height, width, depth), |(y, x, z)| {
            (y * width * depth + x * depth + z) as u32
        })
    }

    // Straight pixel-by-pixel placement, one tile at a time.
    fn reference(arr: &Array3<u32>, tile: Dimensions, ordering: &[i64]) -> Array3<u32> {
        let cols = arr.dim().1 / tile.width;
        let mut out = Array3::zeros(arr.raw_dim());
        for (k, &src) in ordering.iter().enumerate() {
            let src = src as usize;
            let (sx, sy) = (tile.width * (src % cols), tile.height * (src / cols));
            let (dx, dy) = (tile.width * (k % cols), tile.height * (k / cols));
            for y in 0..tile.height {
                for x in 0..tile.width {
                    for z in 0..arr.dim().2 {
                        out[[dy + y, dx + x, z]] = arr[[sy + y, sx + x, z]];
                    }
                }
            }
        }
        out
    }

    #[test]
    fn get_tile_region() {
        let arr = numbered(4, 6, 1);
        let t = get_tile(arr.view(), dim(2, 2), 2, 1);
        assert_eq!(t.dim(), (2, 2, 1));
        assert_eq!(t, arr.slice(s![2..4, 4..6, ..]));
    }

    #[test]
    fn swap_columns_within_rows() {
        // TL TR
        // BL BR
        let arr = Array3::from_shape_vec(
            (4, 4, 1),
            vec![
                1, 1, 2, 2, //
                1, 1, 2, 2, //
                3, 3, 4, 4, //
                3, 3, 4, 4, //
            ],
        )
        .unwrap();

        let out = rearrange(arr.view(), dim(2, 2), &[1, 0, 3, 2]).unwrap();
        let expected = Array3::from_shape_vec(
            (4, 4, 1),
            vec![
                2, 2, 1, 1, //
                2, 2, 1, 1, //
                4, 4, 3, 3, //
                4, 4, 3, 3, //
            ],
        )
        .unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn identity_is_noop() {
        let arr = numbered(6, 8, 3);
        for tile in [dim(1, 1), dim(2, 3), dim(8, 6), dim(4, 2)] {
            let n = (8 / tile.width) * (6 / tile.height);
            let out = rearrange(arr.view(), tile, &identity(n)).unwrap();
            assert_eq!(out, arr, "{tile}");
        }
    }

    #[test]
    fn matches_reference_placement() {
        let mut random = Xoshiro256StarStar::seed_from_u64(1);
        let arr = numbered(6, 12, 2);
        for tile in [dim(3, 2), dim(4, 3), dim(1, 6), dim(12, 1)] {
            let n = (12 / tile.width) * (6 / tile.height);
            let ordering = random_ordering(n, &mut random);
            let out = rearrange(arr.view(), tile, &ordering).unwrap();
            assert_eq!(out, reference(&arr, tile, &ordering), "{tile} {ordering:?}");
        }
    }

    #[test]
    fn inverse_restores() {
        let mut random = Xoshiro256StarStar::seed_from_u64(2);
        let arr = numbered(8, 8, 4);
        let ordering = random_ordering(16, &mut random);

        let shuffled = rearrange(arr.view(), dim(2, 2), &ordering).unwrap();
        let restored = rearrange(shuffled.view(), dim(2, 2), &invert(&ordering).unwrap()).unwrap();
        assert_eq!(restored, arr);
    }

    #[test]
    fn rejects_invalid_input() {
        let arr = numbered(4, 6, 1);
        for (tile, ordering) in [
            (dim(4, 4), vec![0]),
            (dim(0, 2), vec![0, 1]),
            (dim(2, 0), vec![]),
            (dim(2, 2), vec![0, 0, 1, 2, 3, 4]),
            (dim(2, 2), vec![0, 1, 2, 3, 4]),
        ] {
            let e = rearrange(arr.view(), tile, &ordering).unwrap_err();
            assert!(matches!(e, Error::InvalidArrangement), "{tile} {ordering:?}");
        }
    }

    #[test]
    fn empty_image() {
        let arr = Array3::<u8>::zeros((0, 0, 3));
        let out = rearrange(arr.view(), dim(2, 2), &[]).unwrap();
        assert_eq!(out.dim(), (0, 0, 3));
    }
}
