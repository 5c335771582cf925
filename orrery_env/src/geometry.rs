//! 3D geometry primitives, composites, and shapes attached to frames.
//!
//! The primitive set is closed: [`Object`] is an enum so callers can match
//! exhaustively on the kind of an intersection result.

use crate::error::{EnvError, EnvResult};
use crate::frame::Frame;
use crate::intersection;
use crate::time::Instant;
use nalgebra::{Isometry3, Matrix3, Point2, Point3, Unit, UnitQuaternion, Vector3};

/// Tolerance used for planarity and on-surface checks (meters).
pub(crate) const TOLERANCE: f64 = 1e-9;

/// A half-line.
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
}

impl Ray {
    /// Creates a ray. Fails on a zero direction.
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> EnvResult<Self> {
        let direction = Unit::try_new(direction, TOLERANCE)
            .ok_or_else(|| EnvError::invalid_geometry("ray direction is zero"))?;
        Ok(Self { origin, direction })
    }

    /// Point at distance `t` along the ray.
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction.into_inner() * t
    }
}

/// An ordered sequence of points joined by straight segments.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    points: Vec<Point3<f64>>,
}

impl LineString {
    /// Creates a line string; at least two points are required.
    pub fn new(points: Vec<Point3<f64>>) -> EnvResult<Self> {
        if points.len() < 2 {
            return Err(EnvError::invalid_geometry(format!(
                "line string needs at least 2 points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Caller guarantees at least two points.
    pub(crate) fn new_unchecked(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the first and last points coincide.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 2 => {
                (first - last).norm() <= TOLERANCE
            }
            _ => false,
        }
    }

    /// Consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> {
        self.points.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Total length of all segments.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| (b - a).norm()).sum()
    }
}

/// A planar polygon in 3D space.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3<f64>>,
}

impl Polygon {
    /// Creates a polygon from at least three coplanar vertices.
    pub fn new(vertices: Vec<Point3<f64>>) -> EnvResult<Self> {
        if vertices.len() < 3 {
            return Err(EnvError::invalid_geometry(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }

        let polygon = Self { vertices };
        let normal = polygon.raw_normal();
        if normal.norm() <= TOLERANCE {
            return Err(EnvError::invalid_geometry("polygon vertices are collinear"));
        }

        let normal = normal.normalize();
        let origin = polygon.vertices[0];
        let scale = polygon
            .vertices
            .iter()
            .map(|v| (v - origin).norm())
            .fold(1.0, f64::max);
        if polygon
            .vertices
            .iter()
            .any(|v| normal.dot(&(v - origin)).abs() > 1e-9 * scale)
        {
            return Err(EnvError::invalid_geometry("polygon vertices are not coplanar"));
        }

        Ok(polygon)
    }

    /// Embeds a 2D polygon in the plane spanned by `x_axis` and `y_axis` at `origin`.
    ///
    /// # Arguments
    /// * `points` - Vertices in plane coordinates
    /// * `origin` - Position of the plane origin
    /// * `x_axis` - Direction of the plane x axis
    /// * `y_axis` - Direction of the plane y axis
    pub fn from_plane(
        points: &[Point2<f64>],
        origin: Point3<f64>,
        x_axis: Vector3<f64>,
        y_axis: Vector3<f64>,
    ) -> EnvResult<Self> {
        let x_axis = Unit::try_new(x_axis, TOLERANCE)
            .ok_or_else(|| EnvError::invalid_geometry("plane x axis is zero"))?;
        let y_axis = Unit::try_new(y_axis, TOLERANCE)
            .ok_or_else(|| EnvError::invalid_geometry("plane y axis is zero"))?;

        let vertices = points
            .iter()
            .map(|p| origin + x_axis.into_inner() * p.x + y_axis.into_inner() * p.y)
            .collect();

        Self::new(vertices)
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Unit normal (right-handed with respect to vertex order).
    pub fn normal(&self) -> Vector3<f64> {
        self.raw_normal().normalize()
    }

    /// Arithmetic mean of the vertices.
    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Closed edge loop.
    pub fn edges(&self) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// True if `point` lies in the polygon plane and inside its boundary.
    pub fn contains_point(&self, point: &Point3<f64>) -> bool {
        let normal = self.normal();
        let origin = self.vertices[0];
        if normal.dot(&(point - origin)).abs() > TOLERANCE {
            return false;
        }
        self.contains_projection(point)
    }

    /// Even-odd test of the projection of `point` onto the polygon plane.
    pub(crate) fn contains_projection(&self, point: &Point3<f64>) -> bool {
        let normal = self.normal();
        let origin = self.vertices[0];
        let u = (self.vertices[1] - origin).normalize();
        let v = normal.cross(&u);

        let project = |p: &Point3<f64>| {
            let d = p - origin;
            (d.dot(&u), d.dot(&v))
        };

        let (px, py) = project(point);
        let mut inside = false;
        for (a, b) in self.edges() {
            let (ax, ay) = project(a);
            let (bx, by) = project(b);

            // Points on an edge count as inside
            let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
            let within = (px - ax) * (px - bx) <= TOLERANCE && (py - ay) * (py - by) <= TOLERANCE;
            if cross.abs() <= TOLERANCE && within {
                return true;
            }

            if (ay > py) != (by > py) && px < (bx - ax) * (py - ay) / (by - ay) + ax {
                inside = !inside;
            }
        }
        inside
    }

    /// True when every turn has the same orientation.
    pub fn is_convex(&self) -> bool {
        let normal = self.normal();
        let n = self.vertices.len();
        (0..n).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let c = self.vertices[(i + 2) % n];
            normal.dot(&(b - a).cross(&(c - b))) >= -TOLERANCE
        })
    }

    fn raw_normal(&self) -> Vector3<f64> {
        // Newell's method
        self.edges().fold(Vector3::zeros(), |acc, (a, b)| {
            acc + Vector3::new(
                (a.y - b.y) * (a.z + b.z),
                (a.z - b.z) * (a.x + b.x),
                (a.x - b.x) * (a.y + b.y),
            )
        })
    }

    fn transformed(&self, transform: &Isometry3<f64>) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| transform * v).collect(),
        }
    }
}

/// A pyramid with a convex polygonal base.
///
/// When intersected, the pyramid is treated as the field of view it describes:
/// the solid cone starting at the apex and extending indefinitely through the
/// base.
#[derive(Debug, Clone, PartialEq)]
pub struct Pyramid {
    base: Polygon,
    apex: Point3<f64>,
}

impl Pyramid {
    /// Creates a pyramid. The base must be convex and the apex off its plane.
    pub fn new(base: Polygon, apex: Point3<f64>) -> EnvResult<Self> {
        if !base.is_convex() {
            return Err(EnvError::invalid_geometry("pyramid base must be convex"));
        }

        let height = base.normal().dot(&(apex - base.vertices()[0]));
        if height.abs() <= TOLERANCE {
            return Err(EnvError::invalid_geometry("pyramid apex lies in its base plane"));
        }

        Ok(Self { base, apex })
    }

    pub fn base(&self) -> &Polygon {
        &self.base
    }

    pub fn apex(&self) -> &Point3<f64> {
        &self.apex
    }

    /// Directions from the apex to each base vertex, in base order.
    pub fn edge_directions(&self) -> Vec<Vector3<f64>> {
        self.base.vertices().iter().map(|v| v - self.apex).collect()
    }

    /// Rays sampling the lateral faces along the base boundary.
    ///
    /// Each base edge contributes `discretization` rays, starting at its first
    /// vertex, so consecutive rays walk around the boundary of the field of view.
    pub fn rays_of_lateral_faces(&self, discretization: usize) -> Vec<Ray> {
        let steps = discretization.max(1);
        let mut rays = Vec::with_capacity(self.base.vertices().len() * steps);

        for (a, b) in self.base.edges() {
            for step in 0..steps {
                let s = step as f64 / steps as f64;
                let target = a + (b - a) * s;
                if let Ok(ray) = Ray::new(self.apex, target - self.apex) {
                    rays.push(ray);
                }
            }
        }

        rays
    }

    fn transformed(&self, transform: &Isometry3<f64>) -> Self {
        Self {
            base: self.base.transformed(transform),
            apex: transform * self.apex,
        }
    }
}

/// A solid ellipsoid.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsoid {
    center: Point3<f64>,
    semi_axes: Vector3<f64>,
    orientation: UnitQuaternion<f64>,
}

impl Ellipsoid {
    /// Creates an ellipsoid with semi-axes `a`, `b`, `c` along its local x, y, z.
    ///
    /// # Arguments
    /// * `orientation` - Maps ellipsoid axes to the enclosing frame
    pub fn new(
        center: Point3<f64>,
        a: f64,
        b: f64,
        c: f64,
        orientation: UnitQuaternion<f64>,
    ) -> EnvResult<Self> {
        if !(a > 0.0 && b > 0.0 && c > 0.0) {
            return Err(EnvError::invalid_geometry(format!(
                "ellipsoid semi-axes must be positive, got ({}, {}, {})",
                a, b, c
            )));
        }

        Ok(Self {
            center,
            semi_axes: Vector3::new(a, b, c),
            orientation,
        })
    }

    /// Creates a sphere.
    pub fn sphere(center: Point3<f64>, radius: f64) -> EnvResult<Self> {
        Self::new(center, radius, radius, radius, UnitQuaternion::identity())
    }

    pub fn center(&self) -> &Point3<f64> {
        &self.center
    }

    pub fn semi_axes(&self) -> &Vector3<f64> {
        &self.semi_axes
    }

    pub fn orientation(&self) -> &UnitQuaternion<f64> {
        &self.orientation
    }

    /// True if all semi-axes are equal.
    pub fn is_sphere(&self) -> bool {
        let a = self.semi_axes.x;
        (self.semi_axes.y - a).abs() <= TOLERANCE * a && (self.semi_axes.z - a).abs() <= TOLERANCE * a
    }

    /// Maps a point into the frame where this ellipsoid is the unit sphere.
    pub(crate) fn normalize_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let local = self.orientation.inverse_transform_vector(&(point - self.center));
        Point3::from(local.component_div(&self.semi_axes))
    }

    /// Maps a direction into the frame where this ellipsoid is the unit sphere.
    pub(crate) fn normalize_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.orientation
            .inverse_transform_vector(vector)
            .component_div(&self.semi_axes)
    }

    /// Linear part of the map from unit-sphere coordinates to the enclosing frame.
    pub(crate) fn shape_matrix(&self) -> Matrix3<f64> {
        self.orientation.to_rotation_matrix().into_inner() * Matrix3::from_diagonal(&self.semi_axes)
    }

    /// True if `point` lies inside or on the surface.
    pub fn contains_point(&self, point: &Point3<f64>) -> bool {
        self.normalize_point(point).coords.norm_squared() <= 1.0 + 1e-12
    }

    fn transformed(&self, transform: &Isometry3<f64>) -> Self {
        Self {
            center: transform * self.center,
            semi_axes: self.semi_axes,
            orientation: transform.rotation * self.orientation,
        }
    }
}

/// A primitive 3D shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Point(Point3<f64>),
    PointSet(Vec<Point3<f64>>),
    LineString(LineString),
    Polygon(Polygon),
    Pyramid(Pyramid),
    Ellipsoid(Ellipsoid),
}

impl Object {
    /// Human readable kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Object::Point(_) => "Point",
            Object::PointSet(_) => "PointSet",
            Object::LineString(_) => "LineString",
            Object::Polygon(_) => "Polygon",
            Object::Pyramid(_) => "Pyramid",
            Object::Ellipsoid(_) => "Ellipsoid",
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Object::Point(_))
    }

    pub fn is_point_set(&self) -> bool {
        matches!(self, Object::PointSet(_))
    }

    pub fn is_line_string(&self) -> bool {
        matches!(self, Object::LineString(_))
    }

    pub fn is_polygon(&self) -> bool {
        matches!(self, Object::Polygon(_))
    }

    pub fn is_pyramid(&self) -> bool {
        matches!(self, Object::Pyramid(_))
    }

    pub fn is_ellipsoid(&self) -> bool {
        matches!(self, Object::Ellipsoid(_))
    }

    pub fn as_line_string(&self) -> Option<&LineString> {
        match self {
            Object::LineString(line_string) => Some(line_string),
            _ => None,
        }
    }

    pub fn as_pyramid(&self) -> Option<&Pyramid> {
        match self {
            Object::Pyramid(pyramid) => Some(pyramid),
            _ => None,
        }
    }

    pub fn as_ellipsoid(&self) -> Option<&Ellipsoid> {
        match self {
            Object::Ellipsoid(ellipsoid) => Some(ellipsoid),
            _ => None,
        }
    }

    /// Applies a rigid transform.
    pub fn transformed(&self, transform: &Isometry3<f64>) -> Object {
        match self {
            Object::Point(point) => Object::Point(transform * point),
            Object::PointSet(points) => {
                Object::PointSet(points.iter().map(|p| transform * p).collect())
            }
            Object::LineString(line_string) => Object::LineString(LineString::new_unchecked(
                line_string.points().iter().map(|p| transform * p).collect(),
            )),
            Object::Polygon(polygon) => Object::Polygon(polygon.transformed(transform)),
            Object::Pyramid(pyramid) => Object::Pyramid(pyramid.transformed(transform)),
            Object::Ellipsoid(ellipsoid) => Object::Ellipsoid(ellipsoid.transformed(transform)),
        }
    }

    /// True if the two shapes share at least one point.
    pub fn intersects(&self, other: &Object) -> EnvResult<bool> {
        intersection::intersects(self, other)
    }

    /// The shared locus of the two shapes.
    pub fn intersection_with(&self, other: &Object) -> EnvResult<Composite> {
        intersection::intersection(self, other)
    }

    /// True if every point of `other` lies inside `self`.
    pub fn contains(&self, other: &Object) -> EnvResult<bool> {
        intersection::contains(self, other)
    }
}

impl From<Point3<f64>> for Object {
    fn from(point: Point3<f64>) -> Self {
        Object::Point(point)
    }
}

impl From<LineString> for Object {
    fn from(line_string: LineString) -> Self {
        Object::LineString(line_string)
    }
}

impl From<Polygon> for Object {
    fn from(polygon: Polygon) -> Self {
        Object::Polygon(polygon)
    }
}

impl From<Pyramid> for Object {
    fn from(pyramid: Pyramid) -> Self {
        Object::Pyramid(pyramid)
    }
}

impl From<Ellipsoid> for Object {
    fn from(ellipsoid: Ellipsoid) -> Self {
        Object::Ellipsoid(ellipsoid)
    }
}

/// An ordered aggregate of primitives treated as one shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Composite {
    objects: Vec<Object>,
}

impl Composite {
    pub fn new(objects: Vec<Object>) -> Self {
        Self { objects }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn access_object_at(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn push(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    /// Appends every object of `other`.
    pub fn merge(&mut self, other: Composite) {
        self.objects.extend(other.objects);
    }

    /// Applies a rigid transform to every object.
    pub fn transformed(&self, transform: &Isometry3<f64>) -> Composite {
        Self {
            objects: self.objects.iter().map(|o| o.transformed(transform)).collect(),
        }
    }

    /// True if any pair of objects intersects.
    pub fn intersects(&self, other: &Composite) -> EnvResult<bool> {
        for mine in &self.objects {
            for theirs in &other.objects {
                if mine.intersects(theirs)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Union of the pairwise intersection loci, in pair order.
    pub fn intersection_with(&self, other: &Composite) -> EnvResult<Composite> {
        let mut result = Composite::empty();
        for mine in &self.objects {
            for theirs in &other.objects {
                result.merge(mine.intersection_with(theirs)?);
            }
        }
        Ok(result)
    }

    /// True if every object of `other` is contained by some object of `self`.
    pub fn contains(&self, other: &Composite) -> EnvResult<bool> {
        if other.is_empty() {
            return Ok(false);
        }
        for theirs in &other.objects {
            let mut contained = false;
            for mine in &self.objects {
                if mine.contains(theirs)? {
                    contained = true;
                    break;
                }
            }
            if !contained {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl From<Object> for Composite {
    fn from(object: Object) -> Self {
        Self::new(vec![object])
    }
}

impl From<Pyramid> for Composite {
    fn from(pyramid: Pyramid) -> Self {
        Self::new(vec![Object::Pyramid(pyramid)])
    }
}

impl From<Ellipsoid> for Composite {
    fn from(ellipsoid: Ellipsoid) -> Self {
        Self::new(vec![Object::Ellipsoid(ellipsoid)])
    }
}

/// A composite expressed in a given frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectGeometry {
    composite: Composite,
    frame: Frame,
}

impl ObjectGeometry {
    pub fn new(composite: Composite, frame: Frame) -> Self {
        Self { composite, frame }
    }

    /// Defined when it holds at least one object.
    pub fn is_defined(&self) -> bool {
        !self.composite.is_empty()
    }

    pub fn access_composite(&self) -> &Composite {
        &self.composite
    }

    pub fn access_frame(&self) -> &Frame {
        &self.frame
    }

    /// Re-expresses the shape in `frame` at `instant`.
    pub fn in_frame(&self, frame: &Frame, instant: &Instant) -> EnvResult<ObjectGeometry> {
        if &self.frame == frame {
            return Ok(self.clone());
        }
        let transform = self.frame.transform_to(frame, instant)?;
        Ok(Self::new(self.composite.transformed(&transform), frame.clone()))
    }

    /// True if the two shapes overlap at `instant` (evaluated in GCRF).
    pub fn intersects(&self, other: &ObjectGeometry, instant: &Instant) -> EnvResult<bool> {
        let gcrf = Frame::gcrf();
        self.in_frame(&gcrf, instant)?
            .composite
            .intersects(&other.in_frame(&gcrf, instant)?.composite)
    }

    /// Intersection locus at `instant`, expressed in GCRF.
    pub fn intersection_with(
        &self,
        other: &ObjectGeometry,
        instant: &Instant,
    ) -> EnvResult<ObjectGeometry> {
        let gcrf = Frame::gcrf();
        let composite = self
            .in_frame(&gcrf, instant)?
            .composite
            .intersection_with(&other.in_frame(&gcrf, instant)?.composite)?;
        Ok(Self::new(composite, gcrf))
    }

    /// True if `other` lies entirely inside this shape at `instant`.
    pub fn contains(&self, other: &ObjectGeometry, instant: &Instant) -> EnvResult<bool> {
        let gcrf = Frame::gcrf();
        self.in_frame(&gcrf, instant)?
            .composite
            .contains(&other.in_frame(&gcrf, instant)?.composite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn fov() -> Pyramid {
        let base = Polygon::from_plane(
            &[
                Point2::new(-0.1, -1.0),
                Point2::new(0.1, -1.0),
                Point2::new(0.1, 1.0),
                Point2::new(-0.1, 1.0),
            ],
            Point3::new(0.0, 0.0, 1.0),
            Vector3::x(),
            Vector3::y(),
        )
        .unwrap();
        Pyramid::new(base, Point3::origin()).unwrap()
    }

    #[test]
    fn test_polygon_from_plane() {
        let polygon = fov().base().clone();
        assert_eq!(polygon.vertices().len(), 4);
        assert_relative_eq!(polygon.normal(), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(polygon.centroid(), Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert!(polygon.is_convex());
    }

    #[test]
    fn test_polygon_rejects_degenerate_input() {
        assert!(Polygon::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]).is_err());
        assert!(Polygon::new(vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ])
        .is_err());
        assert!(Polygon::new(vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
        ])
        .is_err());
    }

    #[test]
    fn test_polygon_contains_point() {
        let polygon = fov().base().clone();
        assert!(polygon.contains_point(&Point3::new(0.0, 0.5, 1.0)));
        assert!(polygon.contains_point(&Point3::new(0.1, 0.0, 1.0)));
        assert!(!polygon.contains_point(&Point3::new(0.5, 0.0, 1.0)));
        assert!(!polygon.contains_point(&Point3::new(0.0, 0.0, 1.5)));
    }

    #[test]
    fn test_pyramid_rays_walk_the_boundary() {
        let rays = fov().rays_of_lateral_faces(5);
        assert_eq!(rays.len(), 20);
        assert!(rays.iter().all(|ray| ray.origin == Point3::origin()));
        assert!(rays.iter().all(|ray| ray.direction.z > 0.0));
    }

    #[test]
    fn test_pyramid_rejects_flat_apex() {
        let base = fov().base().clone();
        assert!(Pyramid::new(base, Point3::new(0.0, 0.0, 1.0)).is_err());
    }

    #[test]
    fn test_object_transform() {
        let rotation = Isometry3::rotation(Vector3::x() * FRAC_PI_2);
        let object = Object::Point(Point3::new(0.0, 1.0, 0.0)).transformed(&rotation);

        match object {
            Object::Point(p) => assert_relative_eq!(p, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12),
            other => panic!("unexpected {}", other.kind_name()),
        }
    }

    #[test]
    fn test_ellipsoid_transform_keeps_shape() {
        let ellipsoid = Ellipsoid::new(Point3::origin(), 3.0, 2.0, 1.0, UnitQuaternion::identity()).unwrap();
        let shifted = Object::Ellipsoid(ellipsoid)
            .transformed(&Isometry3::translation(10.0, 0.0, 0.0));

        let shifted = shifted.as_ellipsoid().unwrap();
        assert!(shifted.contains_point(&Point3::new(12.9, 0.0, 0.0)));
        assert!(!shifted.contains_point(&Point3::new(2.9, 0.0, 0.0)));
    }

    #[test]
    fn test_line_string_closed() {
        let open = LineString::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]).unwrap();
        let closed = LineString::new(vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::origin(),
        ])
        .unwrap();

        assert!(!open.is_closed());
        assert!(closed.is_closed());
        assert_relative_eq!(closed.length(), 2.0 + 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_line_string_needs_two_points() {
        assert!(matches!(
            LineString::new(vec![]),
            Err(EnvError::InvalidGeometry(_))
        ));
        assert!(matches!(
            LineString::new(vec![Point3::origin()]),
            Err(EnvError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_object_geometry_same_frame_is_identity() {
        let geometry = ObjectGeometry::new(Composite::from(fov()), Frame::gcrf());
        let moved = geometry.in_frame(&Frame::gcrf(), &Instant::j2000()).unwrap();
        assert_eq!(geometry, moved);
        assert!(geometry.is_defined());
        assert!(!ObjectGeometry::new(Composite::empty(), Frame::gcrf()).is_defined());
    }
}
