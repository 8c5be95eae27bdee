use super::error::VectorError;
use super::mask::FrozenMask;
use tracing::trace;

/// Magnitudes at or below this are treated as zero when computing angles.
pub const VERY_SMALL: f64 = 1.0e-6;

#[inline]
fn check_len(expected: usize, found: usize) -> Result<(), VectorError> {
    if expected != found {
        return Err(VectorError::DimensionMismatch { expected, found });
    }
    Ok(())
}

fn check_mask(len: usize, frozen: Option<&FrozenMask>) -> Result<(), VectorError> {
    match frozen {
        Some(mask) => check_len(len, mask.len()),
        None => Ok(()),
    }
}

#[inline]
fn is_active(frozen: Option<&FrozenMask>, index: usize) -> bool {
    frozen.is_none_or(|mask| !mask.is_frozen(index))
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MaskedSum {
    sum: f64,
    active: usize,
}

impl MaskedSum {
    fn mean(self) -> Result<f64, VectorError> {
        if self.active == 0 {
            return Err(VectorError::DivideByZero);
        }
        Ok(self.sum / self.active as f64)
    }
}

/// Sums `term(i)` over every coordinate the mask leaves active.
///
/// Every masked reduction in this module goes through here.
fn masked_sum<F>(
    len: usize,
    frozen: Option<&FrozenMask>,
    term: F,
) -> Result<MaskedSum, VectorError>
where
    F: Fn(usize) -> f64,
{
    check_mask(len, frozen)?;
    let (sum, active) = (0..len)
        .filter(|&i| is_active(frozen, i))
        .fold((0.0, 0usize), |(sum, active), i| (sum + term(i), active + 1));
    Ok(MaskedSum { sum, active })
}

/// Calls `update(i)` for every coordinate the mask leaves active.
fn for_each_active<F>(
    len: usize,
    frozen: Option<&FrozenMask>,
    update: F,
) -> Result<(), VectorError>
where
    F: FnMut(usize),
{
    check_mask(len, frozen)?;
    (0..len)
        .filter(|&i| is_active(frozen, i))
        .for_each(update);
    Ok(())
}

/// Σ xᵢ·yᵢ over active coordinates.
pub fn dot_product(
    x: &[f64],
    y: &[f64],
    frozen: Option<&FrozenMask>,
) -> Result<f64, VectorError> {
    check_len(x.len(), y.len())?;
    Ok(masked_sum(x.len(), frozen, |i| x[i] * y[i])?.sum)
}

/// Σ xᵢ² over active coordinates.
pub fn squared(x: &[f64], frozen: Option<&FrozenMask>) -> Result<f64, VectorError> {
    Ok(masked_sum(x.len(), frozen, |i| x[i] * x[i])?.sum)
}

pub fn magnitude(x: &[f64], frozen: Option<&FrozenMask>) -> Result<f64, VectorError> {
    Ok(squared(x, frozen)?.sqrt())
}

/// Root-mean-square of the active coordinates.
///
/// Fails with [`VectorError::DivideByZero`] when no coordinate is active.
pub fn rms_magnitude(x: &[f64], frozen: Option<&FrozenMask>) -> Result<f64, VectorError> {
    let reduction = masked_sum(x.len(), frozen, |i| x[i] * x[i])?;
    trace!(
        "rms_magnitude: sum of squares {} over {} active of {} coordinates",
        reduction.sum,
        reduction.active,
        x.len()
    );
    Ok(reduction.mean()?.sqrt())
}

/// Angle in radians between `u` and `v`, or `0.0` if either is (nearly) zero.
pub fn angle_between(
    u: &[f64],
    v: &[f64],
    frozen: Option<&FrozenMask>,
) -> Result<f64, VectorError> {
    let dot = dot_product(u, v, frozen)?;
    let length_u = magnitude(u, frozen)?;
    let length_v = magnitude(v, frozen)?;
    if length_u > VERY_SMALL && length_v > VERY_SMALL {
        let cosine = (dot / (length_u * length_v)).clamp(-1.0, 1.0);
        return Ok(cosine.acos());
    }
    Ok(0.0)
}

/// `outputᵢ = xᵢ + yᵢ·scale`, leaving `outputᵢ = xᵢ` where frozen.
pub fn axpy(
    output: &mut [f64],
    x: &[f64],
    y: &[f64],
    scale: f64,
    frozen: Option<&FrozenMask>,
) -> Result<(), VectorError> {
    check_len(output.len(), x.len())?;
    check_len(output.len(), y.len())?;
    check_mask(output.len(), frozen)?;
    output.copy_from_slice(x);
    for_each_active(output.len(), frozen, |i| output[i] += y[i] * scale)
}

/// `resultᵢ += dirᵢ·scale` for active coordinates.
pub fn in_place_add_scaled(
    result: &mut [f64],
    direction: &[f64],
    scale: f64,
    frozen: Option<&FrozenMask>,
) -> Result<(), VectorError> {
    check_len(result.len(), direction.len())?;
    for_each_active(result.len(), frozen, |i| result[i] += direction[i] * scale)
}

/// Root-mean-square of `uᵢ − vᵢ` over active coordinates.
///
/// Fails with [`VectorError::DivideByZero`] when no coordinate is active.
pub fn rms_distance(
    u: &[f64],
    v: &[f64],
    frozen: Option<&FrozenMask>,
) -> Result<f64, VectorError> {
    check_len(u.len(), v.len())?;
    let reduction = masked_sum(u.len(), frozen, |i| {
        let e = u[i] - v[i];
        e * e
    })?;
    Ok(reduction.mean()?.sqrt())
}

pub fn copy(dest: &mut [f64], src: &[f64]) -> Result<(), VectorError> {
    check_len(dest.len(), src.len())?;
    dest.copy_from_slice(src);
    Ok(())
}

/// `resultᵢ = aᵢ + bᵢ`
pub fn add(result: &mut [f64], a: &[f64], b: &[f64]) -> Result<(), VectorError> {
    check_len(a.len(), b.len())?;
    check_len(a.len(), result.len())?;
    result
        .iter_mut()
        .zip(a.iter().zip(b))
        .for_each(|(r, (a, b))| *r = a + b);
    Ok(())
}
