// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane.  Every pixel of the image is
//! a starting point for Newton's method, and this is where that
//! starting point comes from.

use error::RenderError;
use num::Complex;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a pixel in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels onto the complex plane with
///
/// ```text
/// re = x / width  * scale.0 - offset.0
/// im = y / height * scale.1 - offset.1
/// ```
///
/// The scale and offset are stored as given rather than derived from
/// corners on every call, so that the same constants always produce
/// the same starting points.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneMapper {
    /// The right-lower hand corner of the integral cartesian plane.
    /// The left-upper is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    // The span of the complex rectangle along each axis.
    scale: (f32, f32),
    // Subtracted after scaling; the negation of the first corner.
    offset: (f32, f32),
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane, and the two
    /// corners of the complex rectangle the image should cover.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f32>,
        rightupper: Complex<f32>,
    ) -> Result<PlaneMapper, RenderError> {
        if rightupper.re <= leftlower.re {
            return Err(RenderError::InvalidPlane(
                "The left lower corner is not to the left of the right upper corner.".to_string(),
            ));
        }

        if rightupper.im <= leftlower.im {
            return Err(RenderError::InvalidPlane(
                "The left lower corner is not lower than the right upper corner".to_string(),
            ));
        }

        PlaneMapper::checked(
            width,
            height,
            (rightupper.re - leftlower.re, rightupper.im - leftlower.im),
            (-leftlower.re, -leftlower.im),
        )
    }

    /// The stock framing: a rectangle centred on the origin, 1.6 radii
    /// wide and one radius tall.
    pub fn from_radius(
        width: usize,
        height: usize,
        radius: f32,
    ) -> Result<PlaneMapper, RenderError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(RenderError::InvalidPlane(format!(
                "The radius must be a positive number, not {}",
                radius
            )));
        }

        PlaneMapper::checked(
            width,
            height,
            (1.6 * radius, 1.0 * radius),
            (0.8 * radius, 0.5 * radius),
        )
    }

    fn checked(
        width: usize,
        height: usize,
        scale: (f32, f32),
        offset: (f32, f32),
    ) -> Result<PlaneMapper, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidPlane(format!(
                "The image must have at least one pixel, not {}x{}",
                width, height
            )));
        }

        if width.checked_mul(height).is_none() {
            return Err(RenderError::InvalidPlane(format!(
                "The image is too large to hold: {}x{}",
                width, height
            )));
        }

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            scale,
            offset,
        })
    }

    /// The width of the integral plane, in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// The height of the integral plane, in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// complex number Newton's method will start from.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f32> {
        Complex::new(
            pixel.0 as f32 / self.integral_plane.0 as f32 * self.scale.0 - self.offset.0,
            pixel.1 as f32 / self.integral_plane.1 as f32 * self.scale.1 - self.offset.1,
        )
    }
}
