// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A polynomial described by its roots rather than its coefficients:
//! f(z) = SCALE * (z - r0)(z - r1)...(z - rn-1).  Knowing the roots up
//! front is what makes the Newton fractal possible: every point on
//! the plane is run through Newton's method, and whichever root it
//! lands closest to decides its colour.

use num::Complex;
use std::f32::consts::PI;

/// Both the value and the slope are multiplied by this, so it cancels
/// in the Newton quotient.  A power of two, so the scaling is exact.
pub const SCALE: f32 = 0.125;

/// An ordered collection of roots.  The position of a root in the
/// collection is its classification index, and so ultimately its
/// colour.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polynomial {
    roots: Vec<Complex<f32>>,
}

impl Polynomial {
    /// An empty polynomial.  It evaluates to SCALE everywhere.
    pub fn new() -> Polynomial {
        Polynomial { roots: vec![] }
    }

    /// Builds a polynomial from a list of roots, keeping their order.
    pub fn from_roots(roots: Vec<Complex<f32>>) -> Polynomial {
        Polynomial { roots }
    }

    /// The ring of roots used by the stock render: `count` roots
    /// walked clockwise around the origin, with magnitudes cycling
    /// through 0.5, 2.0, 1.5, 4.0 so the basins are not all the same
    /// size.
    pub fn ring(count: usize) -> Polynomial {
        let mut polynomial = Polynomial::new();
        for i in 0..count {
            let t = i as f32 / count as f32;
            let angle = (1.0 - t) * 2.0 * PI;
            let magnitude = 0.5 * ((i % 2 + 1) as f32) * ((i % 4 + 1) as f32);
            polynomial.add_root(Complex::new(
                angle.cos() * magnitude,
                angle.sin() * magnitude,
            ));
        }
        polynomial
    }

    /// Appends a root.  Its index is the number of roots already present.
    pub fn add_root(&mut self, root: Complex<f32>) {
        self.roots.push(root);
    }

    /// The roots, in classification order.
    pub fn roots(&self) -> &[Complex<f32>] {
        &self.roots
    }

    /// The number of roots, which is also the degree.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// True when there is nothing to classify against.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// f(z).  With no roots this is the empty product, SCALE.
    pub fn evaluate(&self, z: Complex<f32>) -> Complex<f32> {
        self.roots
            .iter()
            .fold(Complex::new(SCALE, 0.0), |acc, root| acc * (z - *root))
    }

    /// f'(z), computed without any division so that it stays well
    /// defined when z sits exactly on a root.
    pub fn derivative(&self, z: Complex<f32>) -> Complex<f32> {
        let mut suffix = Vec::with_capacity(self.roots.len() + 1);
        self.suffix_products(z, &mut suffix);
        self.slope(z, &suffix)
    }

    /// Runs exactly `iterations` Newton steps from `z0`.  A step is
    /// skipped whenever the real part of f'(z) is exactly zero; only
    /// the real part is checked.  There is no early exit on
    /// convergence.
    pub fn newtons_method(&self, z0: Complex<f32>, iterations: usize) -> Complex<f32> {
        let mut scratch = Vec::with_capacity(self.roots.len() + 1);
        self.newtons_method_with(z0, iterations, &mut scratch)
    }

    /// Runs Newton's method from `z0` and returns the index of the root
    /// the result ends up nearest to, or `None` if there are no roots.
    pub fn find_nearest_root(&self, z0: Complex<f32>, iterations: usize) -> Option<usize> {
        let mut scratch = Vec::with_capacity(self.roots.len() + 1);
        self.find_nearest_root_with(z0, iterations, &mut scratch)
    }

    /// The index of the root with the smallest squared distance to `z`.
    /// Ties go to the lowest index.  Distances that are not finite
    /// never win; if no distance is finite the answer is root 0.
    pub fn nearest_root(&self, z: Complex<f32>) -> Option<usize> {
        if self.roots.is_empty() {
            return None;
        }

        let mut nearest: Option<(usize, f32)> = None;
        for (index, root) in self.roots.iter().enumerate() {
            let distance = (*root - z).norm_sqr();
            if !distance.is_finite() {
                continue;
            }
            match nearest {
                Some((_, best)) if distance >= best => {}
                _ => nearest = Some((index, distance)),
            }
        }
        Some(nearest.map_or(0, |(index, _)| index))
    }

    /// As `find_nearest_root`, reusing a caller-owned scratch buffer so
    /// that a worker can classify a whole band without allocating.
    pub(crate) fn find_nearest_root_with(
        &self,
        z0: Complex<f32>,
        iterations: usize,
        scratch: &mut Vec<Complex<f32>>,
    ) -> Option<usize> {
        let z = self.newtons_method_with(z0, iterations, scratch);
        self.nearest_root(z)
    }

    pub(crate) fn newtons_method_with(
        &self,
        z0: Complex<f32>,
        iterations: usize,
        scratch: &mut Vec<Complex<f32>>,
    ) -> Complex<f32> {
        let mut z = z0;
        for _ in 0..iterations {
            self.suffix_products(z, scratch);
            let slope = self.slope(z, scratch);
            if slope.re != 0.0 {
                // scratch[0] is the full product, so this is f(z).
                let value = scratch[0].scale(SCALE);
                z = z - value / slope;
            }
        }
        z
    }

    /// Fills `suffix` so that suffix[i] is the product of (z - rk) for
    /// k in i..n, with suffix[n] = 1.
    fn suffix_products(&self, z: Complex<f32>, suffix: &mut Vec<Complex<f32>>) {
        let n = self.roots.len();
        suffix.clear();
        suffix.resize(n + 1, Complex::new(1.0, 0.0));
        for (i, root) in self.roots.iter().enumerate().rev() {
            suffix[i] = suffix[i + 1] * (z - *root);
        }
    }

    /// Sum over i of prefix(i) * suffix[i + 1], where prefix(i) is the
    /// product of the factors before i.  Each term is f(z) with the
    /// i-th factor left out.
    fn slope(&self, z: Complex<f32>, suffix: &[Complex<f32>]) -> Complex<f32> {
        let mut prefix = Complex::new(SCALE, 0.0);
        let mut slope = Complex::new(0.0, 0.0);
        for (i, root) in self.roots.iter().enumerate() {
            slope = slope + prefix * suffix[i + 1];
            prefix = prefix * (z - *root);
        }
        slope
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f32, im: f32) -> Complex<f32> {
        Complex::new(re, im)
    }

    fn z_squared_minus_one() -> Polynomial {
        Polynomial::from_roots(vec![c(1.0, 0.0), c(-1.0, 0.0)])
    }

    #[test]
    fn evaluates_to_zero_on_every_root() {
        let p = Polynomial::ring(20);
        for root in p.roots() {
            assert!(p.evaluate(*root).norm_sqr() < 1e-6, "f({}) != 0", root);
        }
    }

    #[test]
    fn empty_polynomial_evaluates_to_scale() {
        let p = Polynomial::new();
        assert_eq!(p.evaluate(c(3.0, -7.0)), c(SCALE, 0.0));
        assert_eq!(p.evaluate(c(0.0, 0.0)), c(SCALE, 0.0));
        assert_eq!(p.derivative(c(3.0, -7.0)), c(0.0, 0.0));
    }

    #[test]
    fn evaluate_matches_expanded_quadratic() {
        let p = z_squared_minus_one();
        let z = c(2.0, 1.0);
        let expected = (z * z - c(1.0, 0.0)).scale(SCALE);
        assert!((p.evaluate(z) - expected).norm() < 1e-6);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let p = Polynomial::from_roots(vec![c(1.0, 0.0), c(-1.0, 0.0), c(0.5, 0.5)]);
        let h = 1e-2_f32;
        for &z in &[c(2.0, 1.0), c(-1.5, 0.7), c(0.3, -1.2)] {
            let numeric = (p.evaluate(z + c(h, 0.0)) - p.evaluate(z - c(h, 0.0))).unscale(2.0 * h);
            let analytic = p.derivative(z);
            let error = (numeric - analytic).norm();
            assert!(
                error <= 1e-3 * analytic.norm().max(1.0),
                "derivative at {}: numeric {} analytic {}",
                z,
                numeric,
                analytic
            );
        }
    }

    #[test]
    fn derivative_is_defined_on_a_root() {
        let p = z_squared_minus_one();
        assert_eq!(p.derivative(c(1.0, 0.0)), c(2.0 * SCALE, 0.0));
        assert_eq!(p.derivative(c(-1.0, 0.0)), c(-2.0 * SCALE, 0.0));
    }

    #[test]
    fn single_root_converges_in_one_step() {
        let root = c(0.3, -0.7);
        let p = Polynomial::from_roots(vec![root]);
        let z = p.newtons_method(c(2.0, 2.0), 1);
        assert!((z - root).norm() < 1e-5);
    }

    #[test]
    fn skips_steps_when_the_slope_has_no_real_part() {
        // f'(2i) for z^2 - 1 is purely imaginary, so z never moves.
        let p = z_squared_minus_one();
        let start = c(0.0, 2.0);
        assert_eq!(p.newtons_method(start, 1), start);
        assert_eq!(p.newtons_method(start, 50), start);
    }

    #[test]
    fn zero_iterations_leaves_the_point_alone() {
        let p = Polynomial::ring(5);
        assert_eq!(p.newtons_method(c(0.25, 0.75), 0), c(0.25, 0.75));
    }

    #[test]
    fn a_root_classifies_as_itself() {
        let p = Polynomial::ring(20);
        for (index, root) in p.roots().iter().enumerate() {
            for &iterations in &[0, 1, 10, 60] {
                assert_eq!(p.find_nearest_root(*root, iterations), Some(index));
            }
        }
    }

    #[test]
    fn quadratic_basins_are_half_planes() {
        let p = z_squared_minus_one();
        assert_eq!(p.find_nearest_root(c(0.4, 1.5), 50), Some(0));
        assert_eq!(p.find_nearest_root(c(3.0, -2.0), 50), Some(0));
        assert_eq!(p.find_nearest_root(c(-0.4, 1.5), 50), Some(1));
        assert_eq!(p.find_nearest_root(c(-3.0, -2.0), 50), Some(1));
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let p = z_squared_minus_one();
        assert_eq!(p.nearest_root(c(0.0, 5.0)), Some(0));
        assert_eq!(p.find_nearest_root(c(0.0, 0.0), 50), Some(0));
    }

    #[test]
    fn non_finite_points_fall_back_to_root_zero() {
        let p = Polynomial::ring(4);
        assert_eq!(p.nearest_root(c(std::f32::NAN, 0.0)), Some(0));
        assert_eq!(p.nearest_root(c(std::f32::INFINITY, 1.0)), Some(0));
        assert_eq!(p.nearest_root(c(1.0, std::f32::NEG_INFINITY)), Some(0));
    }

    #[test]
    fn non_finite_distances_lose_to_finite_ones() {
        let p = Polynomial::from_roots(vec![c(std::f32::INFINITY, 0.0), c(1.0, 0.0), c(5.0, 0.0)]);
        assert_eq!(p.nearest_root(c(4.0, 0.0)), Some(2));
        assert_eq!(p.nearest_root(c(2.0, 0.0)), Some(1));
    }

    #[test]
    fn no_roots_means_no_classification() {
        let p = Polynomial::new();
        assert_eq!(p.newtons_method(c(1.0, 1.0), 10), c(1.0, 1.0));
        assert_eq!(p.find_nearest_root(c(1.0, 1.0), 10), None);
    }

    #[test]
    fn ring_keeps_insertion_order() {
        let p = Polynomial::ring(4);
        assert_eq!(p.len(), 4);
        // i = 0 sits at angle 2pi with magnitude 0.5.
        assert!((p.roots()[0] - c(0.5, 0.0)).norm() < 1e-5);
        // i = 3 sits at angle pi/2 with magnitude 0.5 * 2 * 4.
        assert!((p.roots()[3] - c(0.0, 4.0)).norm() < 1e-5);
    }
}
