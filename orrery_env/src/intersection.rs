//! Intersection predicates and loci between primitives.
//!
//! Ellipsoid tests run in the ellipsoid's normalized coordinates, where it is
//! the unit sphere. The normalizing map is affine, so it preserves incidence,
//! convexity of pyramids and the ray parameter along any line.
//!
//! A pyramid is evaluated as the field of view it describes: the infinite
//! convex cone bounded by the half-spaces of its lateral faces.

use crate::error::{EnvError, EnvResult};
use crate::geometry::{Composite, Ellipsoid, LineString, Object, Polygon, Pyramid, Ray, TOLERANCE};
use nalgebra::{Point3, Vector3};

/// Rays sampled per pyramid base edge when tracing a footprint.
pub(crate) const FOOTPRINT_DISCRETIZATION: usize = 20;

// ============================================================================
// DISPATCH
// ============================================================================

pub(crate) fn intersects(left: &Object, right: &Object) -> EnvResult<bool> {
    intersects_ordered(left, right)
        .or_else(|| intersects_ordered(right, left))
        .unwrap_or_else(|| Err(EnvError::unsupported(left.kind_name(), right.kind_name())))
}

pub(crate) fn intersection(left: &Object, right: &Object) -> EnvResult<Composite> {
    intersection_ordered(left, right)
        .or_else(|| intersection_ordered(right, left))
        .unwrap_or_else(|| Err(EnvError::unsupported(left.kind_name(), right.kind_name())))
}

pub(crate) fn contains(outer: &Object, inner: &Object) -> EnvResult<bool> {
    match (outer, inner) {
        (_, Object::Point(point)) => contains_point(outer, point),
        (_, Object::PointSet(points)) => {
            for point in points {
                if !contains_point(outer, point)? {
                    return Ok(false);
                }
            }
            Ok(!points.is_empty())
        }

        // Convex outer shapes contain a polyline or polygon iff they contain its vertices
        (Object::Ellipsoid(_) | Object::Pyramid(_), Object::LineString(line_string)) => {
            all_points_inside(outer, line_string.points())
        }
        (Object::Ellipsoid(_) | Object::Pyramid(_), Object::Polygon(polygon)) => {
            all_points_inside(outer, polygon.vertices())
        }

        (Object::Pyramid(pyramid), Object::Ellipsoid(ellipsoid)) => {
            Ok(Cone::from_pyramid(pyramid).contains_ellipsoid(ellipsoid))
        }
        (Object::Pyramid(outer), Object::Pyramid(inner)) => {
            let cone = Cone::from_pyramid(outer);
            let recedes = inner
                .edge_directions()
                .iter()
                .all(|d| cone.normals.iter().all(|n| n.dot(d) >= -TOLERANCE * d.norm()));
            Ok(cone.contains(inner.apex()) && recedes)
        }

        // A bounded shape never holds an unbounded cone
        (Object::Ellipsoid(_), Object::Pyramid(_)) => Ok(false),
        (Object::Ellipsoid(outer), Object::Ellipsoid(inner))
            if outer.is_sphere() && inner.is_sphere() =>
        {
            let distance = (inner.center() - outer.center()).norm();
            Ok(distance + inner.semi_axes().x <= outer.semi_axes().x + TOLERANCE)
        }

        _ => Err(EnvError::unsupported(outer.kind_name(), inner.kind_name())),
    }
}

fn all_points_inside(outer: &Object, points: &[Point3<f64>]) -> EnvResult<bool> {
    for point in points {
        if !contains_point(outer, point)? {
            return Ok(false);
        }
    }
    Ok(!points.is_empty())
}

fn contains_point(object: &Object, point: &Point3<f64>) -> EnvResult<bool> {
    let contained = match object {
        Object::Point(other) => (other - point).norm() <= TOLERANCE,
        Object::PointSet(points) => points.iter().any(|p| (p - point).norm() <= TOLERANCE),
        Object::LineString(line_string) => line_string
            .segments()
            .any(|(a, b)| distance_to_segment(point, a, b) <= TOLERANCE),
        Object::Polygon(polygon) => polygon.contains_point(point),
        Object::Pyramid(pyramid) => Cone::from_pyramid(pyramid).contains(point),
        Object::Ellipsoid(ellipsoid) => ellipsoid.contains_point(point),
    };
    Ok(contained)
}

fn intersects_ordered(left: &Object, right: &Object) -> Option<EnvResult<bool>> {
    let result = match (left, right) {
        (Object::Point(point), other) => contains_point(other, point),
        (Object::PointSet(points), other) => {
            let mut any = Ok(false);
            for point in points {
                match contains_point(other, point) {
                    Ok(true) => {
                        any = Ok(true);
                        break;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        any = Err(e);
                        break;
                    }
                }
            }
            any
        }
        (Object::LineString(line_string), Object::Ellipsoid(ellipsoid)) => Ok(line_string
            .segments()
            .any(|(a, b)| clip_segment_to_ellipsoid(a, b, ellipsoid).is_some())),
        (Object::LineString(line_string), Object::Pyramid(pyramid)) => {
            let cone = Cone::from_pyramid(pyramid);
            Ok(line_string
                .segments()
                .any(|(a, b)| cone.clip_segment(a, b).is_some()))
        }
        (Object::Polygon(polygon), Object::Ellipsoid(ellipsoid)) => {
            polygon_intersects_ellipsoid(polygon, ellipsoid)
        }
        (Object::Pyramid(pyramid), Object::Ellipsoid(ellipsoid)) => {
            Ok(Cone::from_pyramid(pyramid).intersects_ellipsoid(ellipsoid))
        }
        (Object::Ellipsoid(a), Object::Ellipsoid(b)) if a.is_sphere() && b.is_sphere() => {
            let distance = (a.center() - b.center()).norm();
            Ok(distance <= a.semi_axes().x + b.semi_axes().x)
        }
        _ => return None,
    };
    Some(result)
}

fn intersection_ordered(left: &Object, right: &Object) -> Option<EnvResult<Composite>> {
    let result = match (left, right) {
        (Object::Point(point), other) => contains_point(other, point).map(|inside| {
            if inside {
                Composite::from(Object::Point(*point))
            } else {
                Composite::empty()
            }
        }),
        (Object::PointSet(points), other) => {
            let mut kept = Vec::new();
            for point in points {
                match contains_point(other, point) {
                    Ok(true) => kept.push(*point),
                    Ok(false) => {}
                    Err(e) => return Some(Err(e)),
                }
            }
            Ok(match kept.len() {
                0 => Composite::empty(),
                _ => Composite::from(Object::PointSet(kept)),
            })
        }
        (Object::LineString(line_string), Object::Ellipsoid(ellipsoid)) => Ok(clip_line_string(
            line_string,
            |a, b| clip_segment_to_ellipsoid(a, b, ellipsoid),
        )),
        (Object::LineString(line_string), Object::Pyramid(pyramid)) => {
            let cone = Cone::from_pyramid(pyramid);
            Ok(clip_line_string(line_string, |a, b| cone.clip_segment(a, b)))
        }
        (Object::Pyramid(pyramid), Object::Ellipsoid(ellipsoid)) => {
            Ok(pyramid_ellipsoid_footprint(pyramid, ellipsoid))
        }
        _ => return None,
    };
    Some(result)
}

// ============================================================================
// CONE
// ============================================================================

/// Convex cone spanned by the lateral faces of a pyramid.
struct Cone {
    apex: Point3<f64>,
    directions: Vec<Vector3<f64>>,
    /// Inward face normals, one per pair of consecutive directions
    normals: Vec<Vector3<f64>>,
}

impl Cone {
    fn from_pyramid(pyramid: &Pyramid) -> Self {
        Self::new(*pyramid.apex(), pyramid.edge_directions())
    }

    fn new(apex: Point3<f64>, directions: Vec<Vector3<f64>>) -> Self {
        let axis: Vector3<f64> = directions.iter().map(|d| d.normalize()).sum();
        let count = directions.len();

        let normals = (0..count)
            .map(|i| {
                let n = directions[i].cross(&directions[(i + 1) % count]).normalize();
                if n.dot(&axis) < 0.0 {
                    -n
                } else {
                    n
                }
            })
            .collect();

        Self {
            apex,
            directions,
            normals,
        }
    }

    /// The same cone expressed in the normalized coordinates of `ellipsoid`.
    fn normalized_by(&self, ellipsoid: &Ellipsoid) -> Self {
        Self::new(
            ellipsoid.normalize_point(&self.apex),
            self.directions
                .iter()
                .map(|d| ellipsoid.normalize_vector(d))
                .collect(),
        )
    }

    fn contains(&self, point: &Point3<f64>) -> bool {
        let offset = point - self.apex;
        let scale = offset.norm().max(1.0);
        self.normals
            .iter()
            .all(|n| n.dot(&offset) >= -TOLERANCE * scale)
    }

    /// Euclidean distance from `point` to the solid cone.
    fn distance_to(&self, point: &Point3<f64>) -> f64 {
        if self.contains(point) {
            return 0.0;
        }

        let q = point - self.apex;
        let count = self.directions.len();
        let mut best = q.norm();

        for (i, d) in self.directions.iter().enumerate() {
            // Edge ray
            let t = (q.dot(d) / d.norm_squared()).max(0.0);
            best = best.min((q - d * t).norm());

            // Face wedge between consecutive edges
            let e = &self.directions[(i + 1) % count];
            let n = &self.normals[i];
            let projected = q - n * q.dot(n);
            if let Some((alpha, beta)) = wedge_coordinates(&projected, d, e) {
                if alpha >= 0.0 && beta >= 0.0 {
                    best = best.min(q.dot(n).abs());
                }
            }
        }

        best
    }

    fn intersects_ellipsoid(&self, ellipsoid: &Ellipsoid) -> bool {
        self.normalized_by(ellipsoid).distance_to(&Point3::origin()) <= 1.0
    }

    /// Support-function test of the ellipsoid against every face half-space.
    fn contains_ellipsoid(&self, ellipsoid: &Ellipsoid) -> bool {
        let shape = ellipsoid.shape_matrix();
        self.normals.iter().all(|n| {
            let nearest = n.dot(&ellipsoid.center().coords) - (shape.transpose() * n).norm();
            nearest >= n.dot(&self.apex.coords)
        })
    }

    /// Cyrus-Beck clip of segment `a -> b`, as a parameter interval.
    fn clip_segment(&self, a: &Point3<f64>, b: &Point3<f64>) -> Option<(f64, f64)> {
        let mut enter = 0.0_f64;
        let mut exit = 1.0_f64;
        let direction = b - a;

        for n in &self.normals {
            let numerator = n.dot(&(a - self.apex));
            let denominator = n.dot(&direction);

            if denominator.abs() <= f64::EPSILON {
                if numerator < 0.0 {
                    return None;
                }
                continue;
            }

            let t = -numerator / denominator;
            if denominator > 0.0 {
                enter = enter.max(t);
            } else {
                exit = exit.min(t);
            }
            if enter > exit {
                return None;
            }
        }

        Some((enter, exit))
    }
}

/// Solves `v = alpha * d + beta * e` for `v` in the plane of `d` and `e`.
fn wedge_coordinates(v: &Vector3<f64>, d: &Vector3<f64>, e: &Vector3<f64>) -> Option<(f64, f64)> {
    let dd = d.dot(d);
    let de = d.dot(e);
    let ee = e.dot(e);
    let determinant = dd * ee - de * de;
    if determinant.abs() <= f64::EPSILON * dd * ee {
        return None;
    }

    let vd = v.dot(d);
    let ve = v.dot(e);
    Some(((vd * ee - ve * de) / determinant, (ve * dd - vd * de) / determinant))
}

// ============================================================================
// ELLIPSOID HELPERS
// ============================================================================

/// Parameters along `ray` where it enters and leaves `ellipsoid`.
///
/// An origin inside the ellipsoid enters at `t = 0`.
fn ray_hits(ray: &Ray, ellipsoid: &Ellipsoid) -> Option<(f64, f64)> {
    let origin = ellipsoid.normalize_point(&ray.origin).coords;
    let direction = ellipsoid.normalize_vector(&ray.direction);

    let (t0, t1) = unit_sphere_roots(&origin, &direction)?;
    if t1 < 0.0 {
        return None;
    }
    Some((t0.max(0.0), t1))
}

/// Roots of `|origin + t * direction| = 1`, in increasing order.
fn unit_sphere_roots(origin: &Vector3<f64>, direction: &Vector3<f64>) -> Option<(f64, f64)> {
    let a = direction.norm_squared();
    if a <= f64::EPSILON {
        return None;
    }
    let b = 2.0 * origin.dot(direction);
    let c = origin.norm_squared() - 1.0;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    Some(((-b - root) / (2.0 * a), (-b + root) / (2.0 * a)))
}

fn clip_segment_to_ellipsoid(
    a: &Point3<f64>,
    b: &Point3<f64>,
    ellipsoid: &Ellipsoid,
) -> Option<(f64, f64)> {
    let origin = ellipsoid.normalize_point(a).coords;
    let direction = ellipsoid.normalize_vector(&(b - a));

    if direction.norm_squared() <= f64::EPSILON {
        return (origin.norm_squared() <= 1.0).then_some((0.0, 1.0));
    }

    let (t0, t1) = unit_sphere_roots(&origin, &direction)?;
    let enter = t0.max(0.0);
    let exit = t1.min(1.0);
    (enter <= exit).then_some((enter, exit))
}

fn polygon_intersects_ellipsoid(polygon: &Polygon, ellipsoid: &Ellipsoid) -> EnvResult<bool> {
    let normalized = Polygon::new(
        polygon
            .vertices()
            .iter()
            .map(|v| ellipsoid.normalize_point(v))
            .collect(),
    )?;

    let origin = Point3::origin();
    let normal = normalized.normal();
    let plane_distance = normal.dot(&(origin - normalized.vertices()[0])).abs();

    if normalized.contains_projection(&origin) {
        return Ok(plane_distance <= 1.0);
    }

    let touches_edge = normalized
        .edges()
        .any(|(a, b)| distance_to_segment(&origin, a, b) <= 1.0);
    Ok(touches_edge)
}

fn distance_to_segment(point: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    let ab = b - a;
    let length_squared = ab.norm_squared();
    if length_squared <= f64::EPSILON {
        return (point - a).norm();
    }
    let t = ((point - a).dot(&ab) / length_squared).clamp(0.0, 1.0);
    (point - (a + ab * t)).norm()
}

// ============================================================================
// LOCI
// ============================================================================

/// Keeps the clipped parts of each segment, joining parts that meet.
fn clip_line_string<F>(line_string: &LineString, clip: F) -> Composite
where
    F: Fn(&Point3<f64>, &Point3<f64>) -> Option<(f64, f64)>,
{
    let mut runs: Vec<Vec<Point3<f64>>> = Vec::new();
    let mut current: Vec<Point3<f64>> = Vec::new();

    for (a, b) in line_string.segments() {
        match clip(a, b) {
            Some((enter, exit)) => {
                let start = a + (b - a) * enter;
                let end = a + (b - a) * exit;

                let joins = current
                    .last()
                    .map_or(false, |last| (last - start).norm() <= TOLERANCE);
                if !joins && !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
                if current.is_empty() {
                    current.push(start);
                }
                if (end - start).norm() > TOLERANCE {
                    current.push(end);
                }
            }
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    Composite::new(runs.into_iter().map(run_to_object).collect())
}

fn run_to_object(points: Vec<Point3<f64>>) -> Object {
    if points.len() == 1 {
        Object::Point(points[0])
    } else {
        Object::LineString(LineString::new_unchecked(points))
    }
}

/// Entry and exit traces of the lateral faces of `pyramid` on `ellipsoid`.
///
/// When every boundary ray hits, the result is two closed line strings (entry
/// then exit). Partial hits produce one open trace per contiguous run of hits,
/// entry runs first. An ellipsoid wholly inside the field of view is returned
/// as is.
fn pyramid_ellipsoid_footprint(pyramid: &Pyramid, ellipsoid: &Ellipsoid) -> Composite {
    let rays = pyramid.rays_of_lateral_faces(FOOTPRINT_DISCRETIZATION);
    let hits: Vec<Option<(Point3<f64>, Point3<f64>)>> = rays
        .iter()
        .map(|ray| ray_hits(ray, ellipsoid).map(|(t0, t1)| (ray.point_at(t0), ray.point_at(t1))))
        .collect();

    let hit_count = hits.iter().filter(|hit| hit.is_some()).count();

    if hit_count == 0 {
        let cone = Cone::from_pyramid(pyramid);
        if cone.contains_ellipsoid(ellipsoid) {
            return Composite::from(Object::Ellipsoid(ellipsoid.clone()));
        }
        return Composite::empty();
    }

    if hit_count == hits.len() {
        let mut entry: Vec<Point3<f64>> = hits.iter().flatten().map(|(p, _)| *p).collect();
        let mut exit: Vec<Point3<f64>> = hits.iter().flatten().map(|(_, p)| *p).collect();
        entry.push(entry[0]);
        exit.push(exit[0]);
        return Composite::new(vec![
            Object::LineString(LineString::new_unchecked(entry)),
            Object::LineString(LineString::new_unchecked(exit)),
        ]);
    }

    // Rotate so the walk starts on a miss; runs then never wrap around
    let start = hits.iter().position(|hit| hit.is_none()).unwrap_or(0);
    let ordered: Vec<_> = hits[start..].iter().chain(hits[..start].iter()).collect();

    let mut entry_runs = Vec::new();
    let mut exit_runs = Vec::new();
    let mut entry = Vec::new();
    let mut exit = Vec::new();

    for hit in ordered {
        match hit {
            Some((near, far)) => {
                entry.push(*near);
                exit.push(*far);
            }
            None if !entry.is_empty() => {
                entry_runs.push(std::mem::take(&mut entry));
                exit_runs.push(std::mem::take(&mut exit));
            }
            None => {}
        }
    }
    if !entry.is_empty() {
        entry_runs.push(entry);
        exit_runs.push(exit);
    }

    Composite::new(
        entry_runs
            .into_iter()
            .chain(exit_runs)
            .map(run_to_object)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point2, UnitQuaternion};

    fn fov_at(apex: Point3<f64>, half_x: f64, half_y: f64) -> Pyramid {
        let base = Polygon::from_plane(
            &[
                Point2::new(-half_x, -half_y),
                Point2::new(half_x, -half_y),
                Point2::new(half_x, half_y),
                Point2::new(-half_x, half_y),
            ],
            apex + Vector3::z(),
            Vector3::x(),
            Vector3::y(),
        )
        .unwrap();
        Pyramid::new(base, apex).unwrap()
    }

    fn unit_sphere_at(z: f64) -> Ellipsoid {
        Ellipsoid::sphere(Point3::new(0.0, 0.0, z), 1.0).unwrap()
    }

    #[test]
    fn test_pyramid_sees_sphere_ahead() {
        let fov = Object::Pyramid(fov_at(Point3::origin(), 0.1, 0.1));
        let ahead = Object::Ellipsoid(unit_sphere_at(10.0));
        let behind = Object::Ellipsoid(unit_sphere_at(-10.0));

        assert!(fov.intersects(&ahead).unwrap());
        assert!(ahead.intersects(&fov).unwrap());
        assert!(!fov.intersects(&behind).unwrap());
    }

    #[test]
    fn test_pyramid_misses_sphere_off_axis() {
        let fov = Object::Pyramid(fov_at(Point3::origin(), 0.1, 0.1));
        // Well outside a ~5.7 degree half-angle
        let aside = Object::Ellipsoid(unit_sphere_at(10.0).clone());
        let aside = aside.transformed(&nalgebra::Isometry3::translation(5.0, 0.0, 0.0));

        assert!(!fov.intersects(&aside).unwrap());
    }

    #[test]
    fn test_footprint_is_entry_and_exit_rings() {
        let fov = Object::Pyramid(fov_at(Point3::origin(), 0.1, 0.1));
        let large = Object::Ellipsoid(Ellipsoid::sphere(Point3::new(0.0, 0.0, 10.0), 5.0).unwrap());

        let locus = fov.intersection_with(&large).unwrap();
        assert_eq!(locus.object_count(), 2);

        let entry = locus.access_object_at(0).unwrap().as_line_string().unwrap();
        let exit = locus.access_object_at(1).unwrap().as_line_string().unwrap();
        assert!(entry.is_closed());
        assert!(exit.is_closed());
        assert_eq!(entry.len(), 4 * FOOTPRINT_DISCRETIZATION + 1);

        // Entry on the near side, exit on the far side, both on the surface
        for point in entry.points() {
            assert!(point.z < 10.0);
            assert_relative_eq!((point - Point3::new(0.0, 0.0, 10.0)).norm(), 5.0, epsilon = 1e-6);
        }
        for point in exit.points() {
            assert!(point.z > 10.0);
        }
    }

    #[test]
    fn test_partial_footprint_is_open_traces() {
        let fov = Object::Pyramid(fov_at(Point3::origin(), 0.5, 0.5));
        // Sphere catching only the +x side of the field of view
        let sphere = Object::Ellipsoid(Ellipsoid::sphere(Point3::new(5.0, 0.0, 10.0), 1.0).unwrap());

        let locus = fov.intersection_with(&sphere).unwrap();
        assert!(!locus.is_empty());
        assert_eq!(locus.object_count() % 2, 0);
        assert!(locus
            .objects()
            .iter()
            .all(|o| o.is_point() || (o.is_line_string() && !o.as_line_string().unwrap().is_closed())));
    }

    #[test]
    fn test_sphere_inside_field_of_view() {
        let fov = fov_at(Point3::origin(), 1.0, 1.0);
        let small = unit_sphere_at(10.0);

        let outer = Object::Pyramid(fov);
        let inner = Object::Ellipsoid(small.clone());
        assert!(outer.contains(&inner).unwrap());

        let locus = outer.intersection_with(&inner).unwrap();
        assert_eq!(locus.object_count(), 1);
        assert_eq!(locus.access_object_at(0).unwrap().as_ellipsoid(), Some(&small));
    }

    #[test]
    fn test_oblate_ellipsoid_contains_point() {
        let oblate = Ellipsoid::new(Point3::origin(), 2.0, 2.0, 1.0, UnitQuaternion::identity()).unwrap();
        let outer = Object::Ellipsoid(oblate);

        assert!(outer.contains(&Object::Point(Point3::new(1.9, 0.0, 0.0))).unwrap());
        assert!(!outer.contains(&Object::Point(Point3::new(0.0, 0.0, 1.1))).unwrap());
    }

    #[test]
    fn test_line_string_clipped_by_sphere() {
        let line = Object::LineString(LineString::new(vec![
            Point3::new(-3.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ])
        .unwrap());
        let sphere = Object::Ellipsoid(Ellipsoid::sphere(Point3::origin(), 1.0).unwrap());

        let locus = line.intersection_with(&sphere).unwrap();
        assert_eq!(locus.object_count(), 1);

        let clipped = locus.access_object_at(0).unwrap().as_line_string().unwrap();
        assert_relative_eq!(clipped.length(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_line_string_clipped_by_pyramid() {
        let fov = Object::Pyramid(fov_at(Point3::origin(), 1.0, 1.0));
        // Crosses the cone at z = 2, where it spans x in [-2, 2]
        let line = Object::LineString(LineString::new(vec![
            Point3::new(-5.0, 0.0, 2.0),
            Point3::new(5.0, 0.0, 2.0),
        ])
        .unwrap());

        assert!(line.intersects(&fov).unwrap());
        let locus = line.intersection_with(&fov).unwrap();
        let clipped = locus.access_object_at(0).unwrap().as_line_string().unwrap();
        assert_relative_eq!(clipped.length(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_polygon_touches_sphere() {
        let sphere = Object::Ellipsoid(Ellipsoid::sphere(Point3::origin(), 1.0).unwrap());
        let near = Polygon::from_plane(
            &[Point2::new(-1.0, -1.0), Point2::new(1.0, -1.0), Point2::new(0.0, 1.0)],
            Point3::new(0.0, 0.0, 0.5),
            Vector3::x(),
            Vector3::y(),
        )
        .unwrap();
        let far = Polygon::from_plane(
            &[Point2::new(-1.0, -1.0), Point2::new(1.0, -1.0), Point2::new(0.0, 1.0)],
            Point3::new(0.0, 0.0, 1.5),
            Vector3::x(),
            Vector3::y(),
        )
        .unwrap();

        assert!(Object::Polygon(near).intersects(&sphere).unwrap());
        assert!(!Object::Polygon(far).intersects(&sphere).unwrap());
    }

    #[test]
    fn test_unsupported_pair() {
        let fov = Object::Pyramid(fov_at(Point3::origin(), 1.0, 1.0));
        let result = fov.intersects(&fov);

        assert_eq!(
            result,
            Err(EnvError::UnsupportedIntersection {
                left: "Pyramid",
                right: "Pyramid"
            })
        );
    }

    #[test]
    fn test_point_set_filtered() {
        let sphere = Object::Ellipsoid(Ellipsoid::sphere(Point3::origin(), 1.0).unwrap());
        let points = Object::PointSet(vec![Point3::origin(), Point3::new(5.0, 0.0, 0.0)]);

        let locus = points.intersection_with(&sphere).unwrap();
        assert_eq!(locus.objects(), &[Object::PointSet(vec![Point3::origin()])]);
    }
}
