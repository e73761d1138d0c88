// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Renders one band of rows.  A band owns its slice of the
//! classification buffer outright, so any number of them can be
//! rendered at once without coordinating.

use itertools::iproduct;
use num::Complex;
use std::ops::Range;

use planes::{Pixel, PlaneMapper};
use polynomial::Polynomial;

/// Classifies every pixel in `rows` and writes the root index into
/// `band`, which holds exactly those rows in row-major order: pixel
/// (x, y) lands at `(y - rows.start) * width + x`.
///
/// The polynomial must have at least one root.
pub fn render_band(
    polynomial: &Polynomial,
    plane: &PlaneMapper,
    iterations: usize,
    rows: Range<usize>,
    band: &mut [usize],
) {
    let width = plane.width();
    assert!(band.len() == rows.len() * width);
    assert!(rows.end <= plane.height());

    let mut scratch: Vec<Complex<f32>> = Vec::with_capacity(polynomial.len() + 1);
    for (cell, (row, column)) in band.iter_mut().zip(iproduct!(rows, 0..width)) {
        let start = plane.pixel_to_point(&Pixel(column, row));
        *cell = polynomial
            .find_nearest_root_with(start, iterations, &mut scratch)
            .unwrap_or(0);
    }
}
