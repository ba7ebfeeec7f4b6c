//! Multidimensional scaling of a distance matrix.
//!
//! Two solvers are provided:
//!
//! - [`classical_scaling`]: closed-form Torgerson scaling, the top
//!   eigenpairs of the double-centred squared distances
//!   `B = −½ J D⁽²⁾ J` with `J = I − 11ᵀ/n`.
//! - [`stress_scaling`]: iterative SMACOF stress majorization. Each step is
//!   the Guttman transform `X ← n⁻¹ B(X) X`, which never increases the raw
//!   stress `σ(X) = Σ_{i<j} (‖xᵢ − xⱼ‖ − δᵢⱼ)²`.

use crate::quality::pairwise_euclidean;
use liegeom_core::{
    distance::DistanceMatrix,
    error::{LieError, Result},
    types::{constants, DMatrix, Embedding},
};
use nalgebra::SymmetricEigen;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for [`stress_scaling`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalingOptions {
    /// Seed of the random starting configurations.
    pub seed: u64,
    /// Number of random starts; the lowest-stress result is kept.
    pub n_init: usize,
    /// Iteration cap per start.
    pub max_iter: usize,
    /// Stop once the normalized stress decreases by less than this.
    pub eps: f64,
}

impl Default for ScalingOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            n_init: 4,
            max_iter: 300,
            eps: 1e-3,
        }
    }
}

impl ScalingOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of random starts.
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    /// Set the per-start iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence threshold.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.n_init == 0 {
            return Err(LieError::invalid_input("n_init must be at least 1"));
        }
        if self.max_iter == 0 {
            return Err(LieError::invalid_input("max_iter must be at least 1"));
        }
        if !(self.eps.is_finite() && self.eps >= 0.0) {
            return Err(LieError::invalid_input(format!(
                "eps must be finite and non-negative, got {}",
                self.eps
            )));
        }
        Ok(())
    }
}

/// Result of one SMACOF run.
#[derive(Debug, Clone, PartialEq)]
pub struct StressSolution {
    /// Final configuration, one row per point.
    pub embedding: Embedding,
    /// Raw stress `Σ_{i<j} (dᵢⱼ − δᵢⱼ)²` of the final configuration.
    pub stress: f64,
    /// Guttman iterations performed.
    pub iterations: usize,
}

fn check_components(n_points: usize, n_components: usize) -> Result<()> {
    if n_points < 2 {
        return Err(LieError::invalid_dimension(format!(
            "scaling requires at least 2 points, got {}",
            n_points
        )));
    }
    if n_components == 0 || n_components > n_points {
        return Err(LieError::invalid_dimension(format!(
            "n_components must be in 1..={}, got {}",
            n_points, n_components
        )));
    }
    Ok(())
}

/// Classical (Torgerson) scaling.
///
/// Coordinates along axis `c` are `v_c √max(λ_c, 0)` for the eigenpairs of
/// `B` taken in decreasing eigenvalue order. Each axis is signed so that its
/// largest-magnitude coordinate is positive.
///
/// # Errors
///
/// - `InvalidDimension`: if there are fewer than 2 points or
///   `n_components` is zero or exceeds the number of points
/// - `NumericalError`: if the eigen-solver does not converge
pub fn classical_scaling(distances: &DistanceMatrix, n_components: usize) -> Result<Embedding> {
    let n = distances.len();
    check_components(n, n_components)?;

    let squared = distances.as_matrix().map(|d| d * d);
    let row_means: Vec<f64> = (0..n).map(|i| squared.row(i).mean()).collect();
    let grand_mean = row_means.iter().sum::<f64>() / n as f64;
    let b = DMatrix::from_fn(n, n, |i, j| {
        -0.5 * (squared[(i, j)] - row_means[i] - row_means[j] + grand_mean)
    });

    let eigen = SymmetricEigen::try_new(
        b,
        constants::SOLVER_EPSILON,
        constants::SOLVER_MAX_ITERATIONS,
    )
    .ok_or_else(|| LieError::numerical_error("eigen-solver did not converge in classical scaling"))?;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

    let mut coords = Embedding::zeros(n, n_components);
    for (axis, &idx) in order.iter().take(n_components).enumerate() {
        let lambda = eigen.eigenvalues[idx];
        if lambda < -constants::NON_NEGATIVITY_TOLERANCE {
            tracing::warn!(axis, eigenvalue = lambda, "clamping negative scaling eigenvalue");
        }
        let scale = lambda.max(0.0).sqrt();
        let vector = eigen.eigenvectors.column(idx);
        let sign = dominant_sign(vector.iter().copied());
        for i in 0..n {
            coords[(i, axis)] = sign * scale * vector[i];
        }
    }
    Ok(coords)
}

/// Sign that makes the largest-magnitude entry positive.
pub(crate) fn dominant_sign(values: impl Iterator<Item = f64>) -> f64 {
    let mut best = 0.0_f64;
    for v in values {
        if v.abs() > best.abs() {
            best = v;
        }
    }
    if best < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Metric SMACOF scaling; returns the lowest-stress configuration.
///
/// # Errors
///
/// - `InvalidDimension`: as for [`classical_scaling`]
/// - `InvalidInput`: if `n_init` or `max_iter` is zero or `eps` is negative
pub fn stress_scaling(
    distances: &DistanceMatrix,
    n_components: usize,
    options: &ScalingOptions,
) -> Result<Embedding> {
    smacof(distances, n_components, options).map(|solution| solution.embedding)
}

/// Metric SMACOF scaling with the stress and iteration count of the best run.
pub fn smacof(
    distances: &DistanceMatrix,
    n_components: usize,
    options: &ScalingOptions,
) -> Result<StressSolution> {
    let n = distances.len();
    check_components(n, n_components)?;
    options.validate()?;

    let delta = distances.as_matrix();
    let total: f64 = distances.upper_triangle().iter().map(|d| d * d).sum();
    let mut rng = StdRng::seed_from_u64(options.seed);

    let mut best: Option<StressSolution> = None;
    for start in 0..options.n_init {
        let initial = Embedding::from_fn(n, n_components, |_, _| rng.gen::<f64>());
        let solution = smacof_single(delta, total, initial, options);
        tracing::debug!(
            start,
            stress = solution.stress,
            iterations = solution.iterations,
            "smacof start finished"
        );
        let improves = best
            .as_ref()
            .map_or(true, |current| solution.stress < current.stress);
        if improves {
            best = Some(solution);
        }
    }

    best.ok_or_else(|| LieError::numerical_error("smacof produced no configuration"))
}

fn smacof_single(
    delta: &DMatrix<f64>,
    total: f64,
    mut x: Embedding,
    options: &ScalingOptions,
) -> StressSolution {
    let n = delta.nrows();
    let mut previous: Option<f64> = None;
    let mut iterations = 0;

    loop {
        let dist = pairwise_euclidean(&x);
        let stress = raw_stress(&dist, delta);
        let normalized = if total > 0.0 {
            (stress / total).sqrt()
        } else {
            0.0
        };

        let converged = previous.is_some_and(|p| p - normalized < options.eps);
        if converged || iterations == options.max_iter {
            return StressSolution {
                embedding: x,
                stress,
                iterations,
            };
        }
        previous = Some(normalized);

        x = guttman_transform(&x, &dist, delta) / n as f64;
        iterations += 1;
    }
}

fn raw_stress(dist: &DMatrix<f64>, delta: &DMatrix<f64>) -> f64 {
    let n = delta.nrows();
    let mut stress = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let r = dist[(i, j)] - delta[(i, j)];
            stress += r * r;
        }
    }
    stress
}

/// `B(X) X`, with `b_ij = −δ_ij / d_ij` off the diagonal (zero when
/// `d_ij = 0`) and rows summing to zero.
fn guttman_transform(x: &Embedding, dist: &DMatrix<f64>, delta: &DMatrix<f64>) -> Embedding {
    let n = x.nrows();
    let mut b = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        let mut diagonal = 0.0;
        for j in 0..n {
            if i != j && dist[(i, j)] > 0.0 {
                let ratio = delta[(i, j)] / dist[(i, j)];
                b[(i, j)] = -ratio;
                diagonal += ratio;
            }
        }
        b[(i, i)] = diagonal;
    }
    b * x
}
