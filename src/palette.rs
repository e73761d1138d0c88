// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A table of pale, pseudo-random colours, one per root.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use error::RenderError;

/// Maps a root index to an RGB triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colours: Vec<[u8; 3]>,
}

impl Palette {
    /// Builds `size` colours from `seed`.  Each channel is 255 - c * c
    /// for a random c in 0..16, which keeps everything on the light
    /// side.  The same seed always gives the same table.
    pub fn generate(size: usize, seed: u64) -> Result<Palette, RenderError> {
        if size == 0 {
            return Err(RenderError::EmptyPalette);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let colours = (0..size)
            .map(|_| {
                let mut colour = [0u8; 3];
                for channel in colour.iter_mut() {
                    let c: u8 = rng.gen_range(0, 16);
                    *channel = 255 - c * c;
                }
                colour
            })
            .collect();
        Ok(Palette { colours })
    }

    /// The colour for a root index.  Indices past the end of the table
    /// wrap around.
    pub fn colour(&self, index: usize) -> [u8; 3] {
        self.colours[index % self.colours.len()]
    }

    /// The number of distinct colours.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Never true for a generated palette.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}
