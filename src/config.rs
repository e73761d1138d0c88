// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that decides what a render looks like, with defaults
//! that reproduce the stock image.

use num::Complex;
use num_cpus;
use std::str::FromStr;

use error::RenderError;
use palette::Palette;
use planes::PlaneMapper;
use polynomial::Polynomial;
use scheduler::{self, ClassMap};

/// Where the polynomial's roots come from.
#[derive(Debug, Clone, PartialEq)]
pub enum RootSpec {
    /// `Polynomial::ring` with this many roots.
    Ring(usize),
    /// These roots, in this order.
    Explicit(Vec<Complex<f32>>),
}

/// The full set of render parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Size of the sampled rectangle: 1.6 radii wide, one radius tall.
    pub radius: f32,
    /// Newton steps per pixel.
    pub iterations: usize,
    /// Number of horizontal bands, and so threads.  Zero means one band
    /// per CPU.
    pub bands: usize,
    /// The roots to classify against.
    pub roots: RootSpec,
    /// Number of colours in the palette.
    pub palette_size: usize,
    /// Seed for the palette.
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            width: 640,
            height: 400,
            radius: 5.0,
            iterations: 60,
            bands: 8,
            roots: RootSpec::Ring(20),
            palette_size: 100,
            seed: 69,
        }
    }
}

impl RenderConfig {
    /// The default configuration at a given height, with the width
    /// following the 8:5 aspect ratio.
    pub fn with_height(height: usize) -> RenderConfig {
        RenderConfig {
            // An unrepresentable width is left at zero for plane() to refuse.
            width: aspect_width(height).unwrap_or(0),
            height,
            ..RenderConfig::default()
        }
    }

    /// The polynomial described by `roots`.
    pub fn polynomial(&self) -> Polynomial {
        match self.roots {
            RootSpec::Ring(count) => Polynomial::ring(count),
            RootSpec::Explicit(ref roots) => Polynomial::from_roots(roots.clone()),
        }
    }

    /// The pixel-to-complex mapping for this image.
    pub fn plane(&self) -> Result<PlaneMapper, RenderError> {
        PlaneMapper::from_radius(self.width, self.height, self.radius)
    }

    /// The colour table.
    pub fn palette(&self) -> Result<Palette, RenderError> {
        Palette::generate(self.palette_size, self.seed)
    }

    /// The number of bands actually used.
    pub fn band_count(&self) -> usize {
        if self.bands == 0 {
            num_cpus::get()
        } else {
            self.bands
        }
    }

    /// Renders the image this configuration describes.
    pub fn render(&self) -> Result<ClassMap, RenderError> {
        let polynomial = self.polynomial();
        debug!("roots: {:?}", polynomial.roots());
        scheduler::render(&polynomial, &self.plane()?, self.iterations, self.band_count())
    }
}

/// The width that goes with `height` at 8:5, or `None` if it would
/// overflow.
pub fn aspect_width(height: usize) -> Option<usize> {
    height.checked_mul(8).map(|width| width / 5)
}

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A specific implementation of parse_pair using a comma and expecting
/// floating point numbers.
pub fn parse_complex(s: &str) -> Option<Complex<f32>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

/// Parses `WIDTHxHEIGHT`, or a bare `HEIGHT` with the width taken
/// from the aspect ratio.  Sizes whose pixel count does not fit in a
/// `usize` are refused.
pub fn parse_size(s: &str) -> Option<(usize, usize)> {
    let size = match parse_pair(s, 'x') {
        Some(size) => size,
        None => {
            let height = usize::from_str(s).ok()?;
            (aspect_width(height)?, height)
        }
    };
    size.0.checked_mul(size.1).map(|_| size)
}
