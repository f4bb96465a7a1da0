use serde::{Deserialize, Serialize};

use crate::math::*;

/// A geographic position. Longitude and latitude are stored in radians.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cartographic {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
}
impl Cartographic {
    pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Self {
        Cartographic {
            longitude: longitude.to_radians(),
            latitude: latitude.to_radians(),
            height,
        }
    }
    pub fn equals_epsilon(&self, right: &Cartographic, epsilon: f64) -> bool {
        return equals_epsilon(self.longitude, right.longitude, None, Some(epsilon))
            && equals_epsilon(self.latitude, right.latitude, None, Some(epsilon))
            && equals_epsilon(self.height, right.height, None, Some(epsilon));
    }
}
