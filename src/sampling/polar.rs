use crate::math::Point2;

/// Converts polar coordinates around the origin to a point.
#[must_use]
pub fn polar_to_cartesian(theta: f64, radius: f64) -> Point2 {
    let (sin, cos) = theta.sin_cos();
    Point2::new(radius * cos, radius * sin)
}

/// Evaluates a polar radius function at each angle.
pub fn sample_polar<F, I>(radius: F, thetas: I) -> Vec<Point2>
where
    F: Fn(f64) -> f64,
    I: IntoIterator<Item = f64>,
{
    thetas
        .into_iter()
        .map(|theta| polar_to_cartesian(theta, radius(theta)))
        .collect()
}
