#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Newton fractal renderer
//!
//! Newton's method finds a root of a polynomial by starting from a
//! guess and repeatedly sliding down the tangent: z <- z - f(z)/f'(z).
//! Which root it finds depends, in a wildly non-linear way, on where
//! it starts.  Treat every pixel of an image as a starting point on
//! the complex plane, run the method for a fixed number of steps,
//! and colour the pixel by whichever root it ended up nearest to.
//! The boundaries between the basins of attraction are fractal.
//!
//! Every pixel is independent of every other, so the image is cut
//! into horizontal bands and each band is rendered on its own
//! thread, straight into its own slice of the output buffer.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate crossbeam;
extern crate image;
extern crate itertools;
extern crate num;
extern crate num_cpus;
extern crate rand;

#[cfg(test)]
extern crate tempfile;

pub mod config;
pub mod encode;
pub mod error;
pub mod palette;
pub mod planes;
pub mod polynomial;
pub mod render;
pub mod scheduler;

pub use config::{RenderConfig, RootSpec};
pub use error::RenderError;
pub use palette::Palette;
pub use planes::{Pixel, PlaneMapper};
pub use polynomial::Polynomial;
pub use scheduler::ClassMap;
