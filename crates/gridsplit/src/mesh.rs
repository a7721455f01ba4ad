use crate::grid::Grid;

/// A vertex in a [`TriangleMesh`], in world units after `scaling`.
pub type Vertex = [f64; 3];

/// A closed triangle mesh for one cell's bounding cuboid, for visualization only.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    pub vertices: [Vertex; 8],
    pub triangles: Vec<[usize; 3]>,
}

const CUBE_TRIANGLES: [[usize; 3]; 12] = [
    [0, 2, 1],
    [1, 2, 3],
    [0, 4, 6],
    [0, 6, 2],
    [1, 3, 5],
    [3, 7, 5],
    [1, 5, 0],
    [0, 5, 4],
    [2, 6, 3],
    [3, 6, 7],
    [4, 7, 6],
    [4, 5, 7],
];

/// Emits a closed box mesh for every cell in `grid`, for diagnostic visualization only.
///
/// Rendering and file I/O remain out of scope; this only produces mesh
/// data. Corner order per cube is `(xmin/max, ymin/max, zmin/max)`.
#[must_use]
pub fn generate_grid_cubes(grid: &Grid, scaling: f64, zmin: f64, zmax: f64) -> Vec<TriangleMesh> {
    let mut meshes = Vec::with_capacity(grid.numx() * grid.numy());

    for cell in grid.cells() {
        let sw = cell.original_square.sw();
        let ne = cell.original_square.ne();

        let (xmin, xmax) = (sw.x() as f64 * scaling, ne.x() as f64 * scaling);
        let (ymin, ymax) = (sw.y() as f64 * scaling, ne.y() as f64 * scaling);
        let (zmin, zmax) = (zmin * scaling, zmax * scaling);

        let vertices: [Vertex; 8] = [
            [xmin, ymin, zmin],
            [xmax, ymin, zmin],
            [xmin, ymax, zmin],
            [xmax, ymax, zmin],
            [xmin, ymin, zmax],
            [xmax, ymin, zmax],
            [xmin, ymax, zmax],
            [xmax, ymax, zmax],
        ];

        meshes.push(TriangleMesh {
            vertices,
            triangles: CUBE_TRIANGLES.to_vec(),
        });
    }

    meshes
}
