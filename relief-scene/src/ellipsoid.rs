use bevy::math::DVec3;

use crate::math::{Cartesian3, Cartographic};

/// Equatorial radius used for the spherical Earth model, in meters.
pub const EARTH_RADIUS: f64 = 6378137.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub radii: DVec3,
    pub radii_squared: DVec3,
}
impl Ellipsoid {
    pub const SPHERICAL_EARTH: Ellipsoid = Ellipsoid {
        radii: DVec3::new(EARTH_RADIUS, EARTH_RADIUS, EARTH_RADIUS),
        radii_squared: DVec3::new(
            EARTH_RADIUS * EARTH_RADIUS,
            EARTH_RADIUS * EARTH_RADIUS,
            EARTH_RADIUS * EARTH_RADIUS,
        ),
    };
    pub const UNIT_SPHERE: Ellipsoid = Ellipsoid {
        radii: DVec3::ONE,
        radii_squared: DVec3::ONE,
    };
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Ellipsoid {
            radii: DVec3::new(x, y, z),
            radii_squared: DVec3::new(x * x, y * y, z * z),
        }
    }
    pub fn sphere(radius: f64) -> Self {
        return Ellipsoid::new(radius, radius, radius);
    }
    pub fn cartographic_to_cartesian(&self, cartographic: &Cartographic) -> DVec3 {
        return DVec3::from_radians(
            cartographic.longitude,
            cartographic.latitude,
            cartographic.height,
            self.radii_squared,
        );
    }
}
