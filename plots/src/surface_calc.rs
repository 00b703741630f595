use anyhow::{Result, bail};
use delaunator::Point;
use itertools::Itertools;
use ndarray::Array2;
use tracing::debug;

/// Two coordinates closer than this are treated as the same grid line
const GRID_EPSILON: f64 = 1e-9;

/// One surface facet in data coordinates (x, y, height)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [(f64, f64, f64); 3],
}

impl Triangle {
    /// Mean height of the three vertices, used for shading
    pub fn mean_height(&self) -> f64 {
        self.vertices.iter().map(|v| v.2).sum::<f64>() / 3.0
    }
}

/// Scattered (x, y, z) samples snapped onto their rectangular grid
///
/// Benchmark sweeps usually cover every combination of two dimensions, so the
/// samples of one surface sit on a regular grid. Sparse sweeps leave holes. `z[[i, j]]` is the height at
/// `(xs[i], ys[j])`; cells that were not measured hold NaN.
#[derive(Clone, Debug)]
pub struct SurfaceGrid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub z: Array2<f64>,
}

fn distinct_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    values
        .sorted_by(|a, b| a.total_cmp(b))
        .dedup_by(|a, b| (a - b).abs() < GRID_EPSILON)
        .collect()
}

fn grid_index(axis: &[f64], value: f64) -> Option<usize> {
    axis.iter().position(|v| (v - value).abs() < GRID_EPSILON)
}

impl SurfaceGrid {
    /// Build the grid from points; non-finite coordinates are dropped
    ///
    /// A repeated (x, y) keeps the last height. Fails when fewer than two
    /// distinct values exist along either axis, since nothing can be
    /// triangulated.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64, f64)>) -> Result<Self> {
        let points: Vec<(f64, f64, f64)> = points
            .into_iter()
            .filter(|(x, y, _)| x.is_finite() && y.is_finite())
            .collect();

        let xs = distinct_sorted(points.iter().map(|p| p.0));
        let ys = distinct_sorted(points.iter().map(|p| p.1));
        if xs.len() < 2 || ys.len() < 2 {
            bail!(
                "surface needs at least two distinct values per axis, got {}x{}",
                xs.len(),
                ys.len()
            );
        }

        let mut z = Array2::from_elem((xs.len(), ys.len()), f64::NAN);
        for (x, y, height) in points {
            // Both lookups succeed: xs/ys were built from these same points
            if let (Some(i), Some(j)) = (grid_index(&xs, x), grid_index(&ys, y)) {
                if z[[i, j]].is_finite() {
                    debug!("Duplicate surface sample at ({x}, {y}); keeping the later one");
                }
                z[[i, j]] = height;
            }
        }

        Ok(Self { xs, ys, z })
    }

    /// Number of grid cells holding a finite height
    pub fn filled(&self) -> usize {
        self.z.iter().filter(|v| v.is_finite()).count()
    }

    /// Lowest and highest finite height
    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.z
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()
    }

    fn vertex(&self, i: usize, j: usize) -> Option<(f64, f64, f64)> {
        let height = self.z[[i, j]];
        height.is_finite().then(|| (self.xs[i], self.ys[j], height))
    }

    /// Every grid point holds a finite height
    pub fn is_complete(&self) -> bool {
        self.filled() == self.z.len()
    }

    /// Measured points, row by row
    pub fn points(&self) -> Vec<(f64, f64, f64)> {
        self.z
            .indexed_iter()
            .filter_map(|((i, j), _)| self.vertex(i, j))
            .collect()
    }

    /// Triangulate the surface
    ///
    /// A complete grid splits every cell into two triangles along the
    /// (i, j)-(i+1, j+1) diagonal. Anything else (holes, scattered samples)
    /// is covered by a Delaunay triangulation of the measured points, which
    /// spans their convex hull. Fewer than three non-collinear points give
    /// no triangles.
    pub fn triangles(&self) -> Vec<Triangle> {
        if self.is_complete() {
            self.grid_triangles()
        } else {
            debug!(
                "Surface grid has {} of {} points; using Delaunay triangulation",
                self.filled(),
                self.z.len()
            );
            self.delaunay_triangles()
        }
    }

    fn grid_triangles(&self) -> Vec<Triangle> {
        let mut triangles = Vec::new();
        for i in 0..self.xs.len().saturating_sub(1) {
            for j in 0..self.ys.len().saturating_sub(1) {
                if let (Some(a), Some(b), Some(c), Some(d)) = (
                    self.vertex(i, j),
                    self.vertex(i + 1, j),
                    self.vertex(i + 1, j + 1),
                    self.vertex(i, j + 1),
                ) {
                    triangles.push(Triangle {
                        vertices: [a, b, c],
                    });
                    triangles.push(Triangle {
                        vertices: [a, c, d],
                    });
                }
            }
        }
        triangles
    }

    fn delaunay_triangles(&self) -> Vec<Triangle> {
        let points = self.points();
        let sites: Vec<Point> = points.iter().map(|&(x, y, _)| Point { x, y }).collect();
        delaunator::triangulate(&sites)
            .triangles
            .chunks_exact(3)
            .map(|corners| Triangle {
                vertices: [points[corners[0]], points[corners[1]], points[corners[2]]],
            })
            .collect()
    }
}
