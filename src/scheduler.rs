// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cuts the image into horizontal bands, renders each band on its own
//! thread, and hands back the finished classification buffer.

use crossbeam;
use std::mem;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use error::RenderError;
use planes::{Pixel, PlaneMapper};
use polynomial::Polynomial;
use render::render_band;

/// The root index of every pixel in the image, in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMap {
    width: usize,
    height: usize,
    cells: Vec<usize>,
}

impl ClassMap {
    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Every root index, row by row.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// The root index of a single pixel, if it is inside the image.
    pub fn get(&self, pixel: &Pixel) -> Option<usize> {
        if pixel.0 >= self.width || pixel.1 >= self.height {
            return None;
        }
        self.cells.get(pixel.1 * self.width + pixel.0).cloned()
    }
}

/// Splits `0..height` into `bands` contiguous ranges of equal height.
/// The last range absorbs whatever rows are left over.  Asking for
/// more bands than there are rows gives one band per row.
pub fn partition(height: usize, bands: usize) -> Vec<Range<usize>> {
    let bands = bands.min(height).max(1);
    let rows = height / bands;
    (0..bands)
        .map(|band| {
            let start = band * rows;
            let end = if band + 1 == bands { height } else { start + rows };
            start..end
        })
        .collect()
}

/// Renders the whole plane with one thread per band and blocks until
/// every band is done.  The output does not depend on the band count.
pub fn render(
    polynomial: &Polynomial,
    plane: &PlaneMapper,
    iterations: usize,
    bands: usize,
) -> Result<ClassMap, RenderError> {
    if polynomial.is_empty() {
        return Err(RenderError::NoRoots);
    }
    if bands == 0 {
        return Err(RenderError::NoBands);
    }

    let width = plane.width();
    let bands = partition(plane.height(), bands);
    let mut cells = vec![0 as usize; plane.len()];
    debug!(
        "rendering {}x{} in {} bands, {} iterations",
        width,
        plane.height(),
        bands.len(),
        iterations
    );

    {
        // Hand each band exclusive ownership of its own rows.
        let mut remaining: &mut [usize] = &mut cells;
        let mut slices: Vec<&mut [usize]> = Vec::with_capacity(bands.len());
        for rows in &bands {
            let (slice, rest) =
                mem::replace(&mut remaining, &mut []).split_at_mut(rows.len() * width);
            slices.push(slice);
            remaining = rest;
        }

        let finished = AtomicUsize::new(0);
        let total = bands.len();
        let finished = &finished;
        crossbeam::scope(|spawner| {
            for (index, (rows, slice)) in bands.iter().zip(slices).enumerate() {
                spawner.spawn(move |_| {
                    render_band(polynomial, plane, iterations, rows.clone(), slice);
                    let done = finished.fetch_add(1, Ordering::SeqCst) + 1;
                    info!(
                        "band {} (rows {}..{}) done, {:.1}%",
                        index,
                        rows.start,
                        rows.end,
                        done as f32 / total as f32 * 100.0
                    );
                });
            }
        })
        .map_err(|_| RenderError::WorkerPanicked)?;
    }

    Ok(ClassMap {
        width,
        height: plane.height(),
        cells,
    })
}
