use bevy::math::DVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned geographic extent. Units follow whoever built it; the
/// affine transform produces degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}
impl Rectangle {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
    /// Builds the rectangle spanned by two opposite corners given as
    /// `(x, y)` = `(longitude, latitude)` in any order.
    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min.x, min.y, max.x, max.y)
    }
    pub fn equals_epsilon(&self, right: &Rectangle, absolute_epsilon: f64) -> bool {
        return (self.west - right.west).abs() <= absolute_epsilon
            && (self.south - right.south).abs() <= absolute_epsilon
            && (self.east - right.east).abs() <= absolute_epsilon
            && (self.north - right.north).abs() <= absolute_epsilon;
    }
}
