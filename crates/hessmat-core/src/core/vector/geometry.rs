use super::error::VectorError;
use nalgebra::{Matrix4, Point3, Vector3};

/// Closest pair of points between two coordinate sets.
///
/// `first` and `second` are offsets of the x component in their vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseContact {
    pub first: usize,
    pub second: usize,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxedContactSummary {
    pub closest: CloseContact,
    /// Number of pairs closer than the requested cutoff.
    pub close_count: usize,
}

/// Orthorhombic periodic cell used for minimum-image distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicBox {
    widths: Vector3<f64>,
    reciprocal: Vector3<f64>,
}

impl PeriodicBox {
    /// Fails with [`VectorError::InvalidBoxWidth`] unless every width is
    /// positive and finite.
    pub fn new(x_width: f64, y_width: f64, z_width: f64) -> Result<Self, VectorError> {
        let widths = Vector3::new(x_width, y_width, z_width);
        if let Some(axis) = widths.iter().position(|&w| !(w.is_finite() && w > 0.0)) {
            return Err(VectorError::InvalidBoxWidth { axis });
        }
        Ok(Self {
            widths,
            reciprocal: widths.map(|w| 1.0 / w),
        })
    }

    pub fn widths(&self) -> Vector3<f64> {
        self.widths
    }

    /// Squared distance between `a` and the nearest periodic image of `b`.
    pub fn distance_squared(&self, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
        (0..3)
            .map(|axis| {
                let mut d = (a[axis] - b[axis]).abs();
                d -= (d * self.reciprocal[axis] + 0.5).trunc() * self.widths[axis];
                d * d
            })
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCuboid {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingCuboid {
    fn around(point: Point3<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    fn expand_to_encompass(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }
}

fn check_triples(len: usize) -> Result<(), VectorError> {
    if len % 3 != 0 {
        return Err(VectorError::NotTriples { len });
    }
    Ok(())
}

#[inline]
pub fn point_at(coordinates: &[f64], offset: usize) -> Point3<f64> {
    Point3::new(
        coordinates[offset],
        coordinates[offset + 1],
        coordinates[offset + 2],
    )
}

/// Iterates `(offset, point)` over the first `len` scalars of `coordinates`.
fn points(coordinates: &[f64], len: usize) -> impl Iterator<Item = (usize, Point3<f64>)> + '_ {
    (0..len)
        .step_by(3)
        .map(move |offset| (offset, point_at(coordinates, offset)))
}

fn checked_prefix(coordinates: &[f64], len: usize) -> Result<(), VectorError> {
    if len > coordinates.len() {
        return Err(VectorError::OutOfRange {
            requested: len,
            len: coordinates.len(),
        });
    }
    check_triples(len)
}

/// Finds the closest pair of points between two coordinate sets.
///
/// Returns `Ok(None)` when either set is empty.
pub fn find_close_contact(
    first: &[f64],
    second: &[f64],
) -> Result<Option<CloseContact>, VectorError> {
    check_triples(first.len())?;
    check_triples(second.len())?;

    let closest = points(first, first.len())
        .flat_map(|(i1, p1)| {
            points(second, second.len())
                .map(move |(i2, p2)| (i1, i2, nalgebra::distance_squared(&p1, &p2)))
        })
        .fold(None, |best: Option<(usize, usize, f64)>, candidate| match best {
            Some(current) if current.2 <= candidate.2 => Some(current),
            _ => Some(candidate),
        });

    Ok(closest.map(|(first, second, d2)| CloseContact {
        first,
        second,
        distance: d2.sqrt(),
    }))
}

/// Minimum-image variant of [`find_close_contact`] restricted to the first
/// `first_len` / `second_len` scalars, also counting pairs closer than
/// `close_distance`.
pub fn find_close_contact_in_box(
    first: &[f64],
    first_len: usize,
    second: &[f64],
    second_len: usize,
    periodic_box: &PeriodicBox,
    close_distance: f64,
) -> Result<Option<BoxedContactSummary>, VectorError> {
    checked_prefix(first, first_len)?;
    checked_prefix(second, second_len)?;

    let close_distance_squared = close_distance * close_distance;
    let mut close_count = 0;
    let mut closest: Option<(usize, usize, f64)> = None;

    for (i1, p1) in points(first, first_len) {
        for (i2, p2) in points(second, second_len) {
            let d2 = periodic_box.distance_squared(&p1, &p2);
            if closest.is_none_or(|(_, _, best)| d2 < best) {
                closest = Some((i1, i2, d2));
            }
            if d2 < close_distance_squared {
                close_count += 1;
            }
        }
    }

    Ok(closest.map(|(first, second, d2)| BoxedContactSummary {
        closest: CloseContact {
            first,
            second,
            distance: d2.sqrt(),
        },
        close_count,
    }))
}

/// Axis-aligned bounds of the first `len` scalars (all of them if `None`).
///
/// Returns `Ok(None)` when there are no points.
pub fn bounding_cuboid(
    coordinates: &[f64],
    len: Option<usize>,
) -> Result<Option<BoundingCuboid>, VectorError> {
    let len = len.unwrap_or(coordinates.len());
    checked_prefix(coordinates, len)?;

    Ok(points(coordinates, len).fold(None, |cuboid, (_, point)| {
        let mut cuboid = cuboid.unwrap_or_else(|| BoundingCuboid::around(point));
        cuboid.expand_to_encompass(&point);
        Some(cuboid)
    }))
}

/// Writes `transform · p` for every point of `coordinates` into `destination`.
pub fn apply_transform(
    destination: &mut [f64],
    coordinates: &[f64],
    transform: &Matrix4<f64>,
) -> Result<(), VectorError> {
    check_triples(coordinates.len())?;
    if destination.len() != coordinates.len() {
        return Err(VectorError::DimensionMismatch {
            expected: coordinates.len(),
            found: destination.len(),
        });
    }
    for (offset, point) in points(coordinates, coordinates.len()) {
        let moved = transform.transform_point(&point);
        destination[offset..offset + 3].copy_from_slice(moved.coords.as_slice());
    }
    Ok(())
}
