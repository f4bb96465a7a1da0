use bevy::math::DVec3;

use crate::math::equals_epsilon;

pub trait Cartesian3 {
    fn from_radians(longitude: f64, latitude: f64, height: f64, radii_squared: DVec3) -> DVec3;
    fn equals_epsilon(
        &self,
        right: DVec3,
        relative_epsilon: Option<f64>,
        absolute_epsilon: Option<f64>,
    ) -> bool;
    fn midpoint(&self, right: DVec3) -> DVec3;
    fn to_array_f64(&self) -> [f64; 3];
}
impl Cartesian3 for DVec3 {
    fn from_radians(longitude: f64, latitude: f64, height: f64, radii_squared: DVec3) -> DVec3 {
        let cos_latitude = latitude.cos();
        let n = DVec3::new(
            cos_latitude * longitude.cos(),
            cos_latitude * longitude.sin(),
            latitude.sin(),
        )
        .normalize();
        let k = radii_squared * n;
        let gamma = n.dot(k).sqrt();
        return k / gamma + n * height;
    }
    fn equals_epsilon(
        &self,
        right: DVec3,
        relative_epsilon: Option<f64>,
        absolute_epsilon: Option<f64>,
    ) -> bool {
        return self.eq(&right)
            || equals_epsilon(self.x, right.x, relative_epsilon, absolute_epsilon)
                && equals_epsilon(self.y, right.y, relative_epsilon, absolute_epsilon)
                && equals_epsilon(self.z, right.z, relative_epsilon, absolute_epsilon);
    }
    fn midpoint(&self, right: DVec3) -> DVec3 {
        return (*self + right) * 0.5;
    }
    fn to_array_f64(&self) -> [f64; 3] {
        return [self.x, self.y, self.z];
    }
}
