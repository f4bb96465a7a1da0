use bevy::log::debug;
use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use super::Mesh;
use crate::math::Cartesian3;

/// How a recentering stage picks the point moved to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Centering {
    /// Midpoint of the first and last vertex in raster order.
    CornerMidpoint,
    /// Half the grid extent: translate by `(-(W-1)/2, (H-1)/2, 0)`. Matches a
    /// planar layout where columns run along +x and rows along -y.
    GridHalfExtent,
    /// Component-wise mean of all vertices.
    Centroid,
}
impl Centering {
    /// The translation that recenters `mesh`, computed from its current state.
    pub fn offset(&self, mesh: &Mesh) -> DVec3 {
        match self {
            Centering::CornerMidpoint => match (mesh.first_vertex(), mesh.last_vertex()) {
                (Some(first), Some(last)) => -first.midpoint(last),
                _ => DVec3::ZERO,
            },
            Centering::GridHalfExtent => DVec3::new(
                -(mesh.width.saturating_sub(1) as f64) / 2.0,
                mesh.height.saturating_sub(1) as f64 / 2.0,
                0.0,
            ),
            Centering::Centroid => -mesh.centroid(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Uniform(f64),
    /// Scale so that the grid's width spans `target` units, `target / (W-1)`.
    FitWidth(f64),
}
impl Scale {
    pub fn factor(&self, mesh: &Mesh) -> f64 {
        match *self {
            Scale::Uniform(s) => s,
            Scale::FitWidth(target) => target / mesh.width.saturating_sub(1).max(1) as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One whole-mesh stage. Stages that depend on mesh statistics read them when
/// the stage runs, so earlier stages affect later ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTransform {
    Recenter(Centering),
    Translate([f64; 3]),
    Scale(Scale),
    Flip(Axis),
}
impl ModelTransform {
    pub fn apply(&self, mesh: &mut Mesh) {
        match self {
            ModelTransform::Recenter(centering) => {
                let offset = centering.offset(mesh);
                debug!("recentering by {:?} ({:?})", offset, centering);
                translate(mesh, offset);
            }
            ModelTransform::Translate(offset) => translate(mesh, DVec3::from_array(*offset)),
            ModelTransform::Scale(scale) => {
                let factor = scale.factor(mesh);
                debug!("scaling by {}", factor);
                for v in mesh.vertices.iter_mut() {
                    *v *= factor;
                }
            }
            ModelTransform::Flip(axis) => {
                for v in mesh.vertices.iter_mut() {
                    match axis {
                        Axis::X => v.x = -v.x,
                        Axis::Y => v.y = -v.y,
                        Axis::Z => v.z = -v.z,
                    }
                }
            }
        }
    }
}

fn translate(mesh: &mut Mesh, offset: DVec3) {
    for v in mesh.vertices.iter_mut() {
        *v += offset;
    }
}

/// Ordered list of stages, run exactly in the configured order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelTransformPipeline {
    pub stages: Vec<ModelTransform>,
}
impl ModelTransformPipeline {
    pub fn new(stages: Vec<ModelTransform>) -> Self {
        Self { stages }
    }
    pub fn apply(&self, mesh: &mut Mesh) {
        for stage in &self.stages {
            stage.apply(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::height_map_terrain::{HeightGrid, MeshBuilder};
    use crate::math::EPSILON10;

    fn planar(width: usize, height: usize) -> Mesh {
        let grid = HeightGrid::from_fn(width, height, |x, y| ((x + y) as f64).into()).unwrap();
        MeshBuilder::default().build(&grid, |x, y, z| DVec3::new(x as f64, -(y as f64), z)).unwrap()
    }

    #[test]
    fn corner_midpoint_centers_the_corners() {
        let mut mesh = planar(4, 3);
        ModelTransform::Recenter(Centering::CornerMidpoint).apply(&mut mesh);
        let first = mesh.first_vertex().unwrap();
        let last = mesh.last_vertex().unwrap();
        assert!(first.midpoint(last).abs_diff_eq(DVec3::ZERO, EPSILON10));
    }

    #[test]
    fn grid_half_extent_centers_planar_grid() {
        let mut mesh = planar(5, 3);
        ModelTransform::Recenter(Centering::GridHalfExtent).apply(&mut mesh);
        let c = mesh.centroid();
        assert!(c.x.abs() < EPSILON10);
        assert!(c.y.abs() < EPSILON10);
        assert_eq!(mesh.vertex(0, 0), DVec3::new(-2.0, 1.0, 0.0));
    }

    #[test]
    fn centroid_centering_zeroes_the_mean() {
        let mut mesh = planar(6, 4);
        ModelTransform::Recenter(Centering::Centroid).apply(&mut mesh);
        assert!(mesh.centroid().abs_diff_eq(DVec3::ZERO, EPSILON10));
    }

    #[test]
    fn order_matters() {
        let base = planar(3, 3);
        let center_then_scale = ModelTransformPipeline::new(vec![
            ModelTransform::Recenter(Centering::CornerMidpoint),
            ModelTransform::Translate([1.0, 0.0, 0.0]),
            ModelTransform::Scale(Scale::Uniform(2.0)),
        ]);
        let scale_then_center = ModelTransformPipeline::new(vec![
            ModelTransform::Recenter(Centering::CornerMidpoint),
            ModelTransform::Scale(Scale::Uniform(2.0)),
            ModelTransform::Translate([1.0, 0.0, 0.0]),
        ]);
        let mut a = base.clone();
        let mut b = base.clone();
        center_then_scale.apply(&mut a);
        scale_then_center.apply(&mut b);
        assert_ne!(a.vertices, b.vertices);
        assert_eq!(a.vertex(0, 0).x, (0.0 - 1.0 + 1.0) * 2.0);
        assert_eq!(b.vertex(0, 0).x, (0.0 - 1.0) * 2.0 + 1.0);
    }

    #[test]
    fn statistics_are_read_when_the_stage_runs() {
        let mut mesh = planar(3, 3);
        ModelTransformPipeline::new(vec![
            ModelTransform::Translate([10.0, 10.0, 10.0]),
            ModelTransform::Recenter(Centering::Centroid),
        ])
        .apply(&mut mesh);
        assert!(mesh.centroid().abs_diff_eq(DVec3::ZERO, EPSILON10));
    }

    #[test]
    fn fit_width_and_flip() {
        let mut mesh = planar(11, 2);
        ModelTransformPipeline::new(vec![
            ModelTransform::Scale(Scale::FitWidth(10.0)),
            ModelTransform::Flip(Axis::Y),
        ])
        .apply(&mut mesh);
        assert_eq!(mesh.vertex(10, 0).x, 10.0);
        assert_eq!(mesh.vertex(0, 1).y, 1.0);
        let topology = planar(11, 2).faces;
        assert_eq!(mesh.faces, topology);
    }

    #[test]
    fn pipeline_deserializes_from_json() {
        let pipeline: ModelTransformPipeline = serde_json::from_str(
            r#"[{"recenter":"corner_midpoint"},{"scale":{"uniform":0.001}},{"flip":"z"}]"#,
        )
        .unwrap();
        assert_eq!(
            pipeline.stages,
            vec![
                ModelTransform::Recenter(Centering::CornerMidpoint),
                ModelTransform::Scale(Scale::Uniform(0.001)),
                ModelTransform::Flip(Axis::Z),
            ]
        );
    }
}
