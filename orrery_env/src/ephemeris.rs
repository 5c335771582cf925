//! Low-precision analytic ephemerides for the Sun and the Moon.
//!
//! Both series are the short forms published in the Astronomical Almanac:
//! about 0.01° for the Sun and a few tenths of a degree for the Moon, which is
//! plenty for visibility and illumination geometry.

use crate::time::Instant;
use nalgebra::Point3;

/// Astronomical unit (meters).
pub const ASTRONOMICAL_UNIT: f64 = 149_597_870_700.0;

/// Earth equatorial radius used by the lunar parallax series (meters).
const PARALLAX_EARTH_RADIUS: f64 = 6_378_140.0;

/// Position of the Sun in GCRF (meters) at `instant`.
pub fn sun_position(instant: &Instant) -> Point3<f64> {
    let n = instant.days_since_j2000();

    let mean_longitude = 280.460 + 0.985_647_4 * n;
    let mean_anomaly = (357.528 + 0.985_600_3 * n).to_radians();

    let longitude = (mean_longitude
        + 1.915 * mean_anomaly.sin()
        + 0.020 * (2.0 * mean_anomaly).sin())
    .to_radians();
    let distance = (1.000_14 - 0.016_71 * mean_anomaly.cos() - 0.000_14 * (2.0 * mean_anomaly).cos())
        * ASTRONOMICAL_UNIT;
    let obliquity = (23.439 - 0.000_000_4 * n).to_radians();

    Point3::new(
        distance * longitude.cos(),
        distance * obliquity.cos() * longitude.sin(),
        distance * obliquity.sin() * longitude.sin(),
    )
}

/// Position of the Moon in GCRF (meters) at `instant`.
pub fn moon_position(instant: &Instant) -> Point3<f64> {
    let t = instant.centuries_since_j2000();
    let sin = |deg: f64| deg.to_radians().sin();
    let cos = |deg: f64| deg.to_radians().cos();

    let longitude = 218.32 + 481_267.881 * t
        + 6.29 * sin(135.0 + 477_198.87 * t)
        - 1.27 * sin(259.3 - 413_335.36 * t)
        + 0.66 * sin(235.7 + 890_534.22 * t)
        + 0.21 * sin(269.9 + 954_397.74 * t)
        - 0.19 * sin(357.5 + 35_999.05 * t)
        - 0.11 * sin(186.5 + 966_404.03 * t);

    let latitude = 5.13 * sin(93.3 + 483_202.02 * t)
        + 0.28 * sin(228.2 + 960_400.89 * t)
        - 0.28 * sin(318.3 + 6_003.15 * t)
        - 0.17 * sin(217.6 - 407_332.21 * t);

    let parallax = 0.9508
        + 0.0518 * cos(135.0 + 477_198.87 * t)
        + 0.0095 * cos(259.3 - 413_335.36 * t)
        + 0.0078 * cos(235.7 + 890_534.22 * t)
        + 0.0028 * cos(269.9 + 954_397.74 * t);

    let distance = PARALLAX_EARTH_RADIUS / sin(parallax);

    // Ecliptic direction cosines, then rotate by the mean obliquity
    let l = cos(latitude) * cos(longitude);
    let m = cos(latitude) * sin(longitude);
    let n = sin(latitude);

    Point3::new(
        distance * l,
        distance * (0.9175 * m - 0.3978 * n),
        distance * (0.3978 * m + 0.9175 * n),
    )
}
