//! Main Program for Jigarrange
//! Run with `--help` for more instruction

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

use std::path::PathBuf;

use anyhow::{bail, Error};
use clap::Parser;
use env_logger::Env;
use jigarrange::{identity, invert, open_image, random_ordering, Dimensions, TileGrid};
use log::{info, warn};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use sha2::{Digest, Sha256};

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    /// Input file
    input: PathBuf,

    /// Tile size (WxH, or N for square tiles)
    #[arg(short = 't', long)]
    tile_size: Dimensions,

    /// Comma-separated source tile index for each slot, row-major
    #[arg(
        short = 'r',
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        conflicts_with = "shuffle"
    )]
    order: Vec<i64>,

    /// Use a random ordering (printed to stdout)
    #[arg(long)]
    shuffle: bool,

    /// Random seed
    #[arg(long, requires = "shuffle")]
    seed: Option<String>,

    /// Apply the inverse of the ordering (undo a previous run)
    #[arg(long)]
    inverse: bool,

    /// Number of worker threads
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Output file
    #[arg(short = 'o', long)]
    output: PathBuf,
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Some(n) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()?;
    }

    let im = open_image(&args.input)?;
    let size = Dimensions::new(im.width() as usize, im.height() as usize);
    info!("{} is {size}", args.input.display());

    let mut ordering = if args.shuffle {
        let Some(grid) = TileGrid::new(size, args.tile_size) else {
            bail!(jigarrange::Error::InvalidArrangement);
        };

        let mut random = if let Some(seed) = args.seed {
            let mut hasher = Sha256::new();
            hasher.update(seed);

            Xoshiro256StarStar::from_seed(hasher.finalize().into())
        } else {
            Xoshiro256StarStar::from_entropy()
        };

        let ordering = random_ordering(grid.len(), &mut random);
        println!(
            "{}",
            ordering
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(",")
        );
        ordering
    } else if args.order.is_empty() {
        warn!("No ordering given, using identity");
        TileGrid::new(size, args.tile_size).map_or_else(Vec::new, |g| identity(g.len()))
    } else {
        args.order
    };

    if args.inverse {
        ordering = invert(&ordering).ok_or(jigarrange::Error::InvalidArrangement)?;
    }

    jigarrange::rearrange_image(&im, args.tile_size, &ordering, &args.output)?;

    Ok(())
}
