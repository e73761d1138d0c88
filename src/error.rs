// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The things that can stop a render before it starts.  The numerical
//! core itself never fails; everything here is a setup problem.

/// Why a render could not be carried out.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// Classification needs at least one root to be nearest to.
    #[fail(display = "the polynomial has no roots to classify against")]
    NoRoots,

    /// The image has to be cut into at least one band.
    #[fail(display = "band count must be at least one")]
    NoBands,

    /// There must be at least one colour to paint a root with.
    #[fail(display = "the palette must contain at least one colour")]
    EmptyPalette,

    /// The pixel plane or the complex plane is unusable.
    #[fail(display = "invalid plane: {}", _0)]
    InvalidPlane(String),

    /// One of the band workers panicked before finishing its rows.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}
