use std::io::Write;

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use super::{Mesh, Triangle};
use crate::error::Result;
use crate::math::Cartesian3;

/// Serialized mesh: `{"vertices": [[x, y, z], ...], "faces": [[i, j, k], ...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshDocument {
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<Triangle>,
}
impl From<&Mesh> for MeshDocument {
    fn from(mesh: &Mesh) -> Self {
        MeshDocument {
            vertices: mesh.vertices.iter().map(Cartesian3::to_array_f64).collect(),
            faces: mesh.faces.clone(),
        }
    }
}
impl MeshDocument {
    pub fn to_writer(&self, writer: impl Write) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
    /// Vertices of a reloaded document as model-space points.
    pub fn positions(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.vertices.iter().map(|v| DVec3::from_array(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::height_map_terrain::{HeightGrid, MeshBuilder};

    #[test]
    fn nested_array_layout() {
        let grid = HeightGrid::from_elevations(2, 2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let mesh = MeshBuilder::default().build(&grid, |x, y, z| {
            DVec3::new(x as f64, y as f64, z)
        }).unwrap();
        let mut json = Vec::new();
        MeshDocument::from(&mesh).to_writer(&mut json).unwrap();
        let json = String::from_utf8(json).unwrap();
        assert_eq!(
            json,
            r#"{"vertices":[[0.0,0.0,0.0],[1.0,0.0,1.0],[0.0,1.0,2.0],[1.0,1.0,3.0]],"faces":[[0,2,1],[2,3,1]]}"#
        );
    }

    #[test]
    fn reload_matches_mesh() {
        let grid = HeightGrid::from_elevations(3, 2, vec![5.0; 6]).unwrap();
        let mesh = MeshBuilder::default().build(&grid, |x, y, z| {
            DVec3::new(x as f64 * 0.5, y as f64, z)
        }).unwrap();
        let mut buffer = Vec::new();
        MeshDocument::from(&mesh).to_writer(&mut buffer).unwrap();
        let doc = MeshDocument::from_json(std::str::from_utf8(&buffer).unwrap()).unwrap();
        assert_eq!(doc.faces, mesh.faces);
        assert_eq!(doc.positions().collect::<Vec<_>>(), mesh.vertices);
    }

    #[test]
    fn reads_integer_valued_documents() {
        // writers without a float type emit `1`, not `1.0`
        let doc = MeshDocument::from_json(
            r#"{"vertices":[[0,0,1],[-2,3.5,0]],"faces":[[0,0,0],[1,0,1]]}"#,
        )
        .unwrap();
        assert_eq!(doc.vertices, vec![[0.0, 0.0, 1.0], [-2.0, 3.5, 0.0]]);
        assert_eq!(doc.faces, vec![[0, 0, 0], [1, 0, 1]]);
        assert_eq!(doc.positions().next(), Some(DVec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(MeshDocument::from_json(r#"{"vertices":[[0,0]],"faces":[]}"#).is_err());
    }
}
