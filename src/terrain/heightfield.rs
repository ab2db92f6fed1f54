use anyhow::{ensure, Result};
use glam::{Vec2, Vec3};

use super::RaycastHit;
use crate::math::{intersect_aabb, moller_trumbore_intersect, Ray, AABB};

/// Regular grid of terrain heights.
///
/// Samples are stored row-major: `heights[row * columns + column]`, where
/// columns run along +X and rows along +Z starting at `origin`. Each cell is
/// split into two triangles along its (0,0)-(1,1) diagonal.
#[derive(Debug, Clone)]
pub struct Heightfield {
    origin: Vec2,
    cell_size: f32,
    columns: usize,
    rows: usize,
    heights: Vec<f32>,
    bounds: AABB,
}

impl Heightfield {
    pub fn new(
        origin: Vec2,
        cell_size: f32,
        columns: usize,
        rows: usize,
        heights: Vec<f32>,
    ) -> Result<Self> {
        ensure!(cell_size > 0.0, "heightfield cell size must be positive, got {cell_size}");
        ensure!(
            columns >= 2 && rows >= 2,
            "heightfield needs at least 2x2 samples, got {columns}x{rows}"
        );
        ensure!(
            heights.len() == columns * rows,
            "heightfield expects {} samples, got {}",
            columns * rows,
            heights.len()
        );

        let (low, high) = heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)));
        let extent = Vec2::new((columns - 1) as f32, (rows - 1) as f32) * cell_size;
        let bounds = AABB::new(
            Vec3::new(origin.x, low, origin.y),
            Vec3::new(origin.x + extent.x, high, origin.y + extent.y),
        );

        Ok(Self {
            origin,
            cell_size,
            columns,
            rows,
            heights,
            bounds,
        })
    }

    /// Sample `height(x, z)` at every grid vertex
    pub fn from_fn(
        origin: Vec2,
        cell_size: f32,
        columns: usize,
        rows: usize,
        height: impl Fn(f32, f32) -> f32,
    ) -> Result<Self> {
        let mut heights = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                let x = origin.x + column as f32 * cell_size;
                let z = origin.y + row as f32 * cell_size;
                heights.push(height(x, z));
            }
        }
        Self::new(origin, cell_size, columns, rows, heights)
    }

    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    fn sample(&self, column: usize, row: usize) -> f32 {
        self.heights[row * self.columns + column]
    }

    fn vertex(&self, column: usize, row: usize) -> Vec3 {
        Vec3::new(
            self.origin.x + column as f32 * self.cell_size,
            self.sample(column, row),
            self.origin.y + row as f32 * self.cell_size,
        )
    }

    /// Surface height at `(x, z)`, `None` outside the grid
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let local = (Vec2::new(x, z) - self.origin) / self.cell_size;
        let max = Vec2::new((self.columns - 1) as f32, (self.rows - 1) as f32);
        if local.x < 0.0 || local.y < 0.0 || local.x > max.x || local.y > max.y {
            return None;
        }

        let column = (local.x.floor() as usize).min(self.columns - 2);
        let row = (local.y.floor() as usize).min(self.rows - 2);
        let fx = local.x - column as f32;
        let fz = local.y - row as f32;

        let h00 = self.sample(column, row);
        let h10 = self.sample(column + 1, row);
        let h01 = self.sample(column, row + 1);
        let h11 = self.sample(column + 1, row + 1);

        Some(if fx >= fz {
            h00 + (h10 - h00) * fx + (h11 - h10) * fz
        } else {
            h00 + (h01 - h00) * fz + (h11 - h01) * fx
        })
    }

    fn intersect_cell(&self, ray: &Ray, column: usize, row: usize) -> Option<RaycastHit> {
        let p00 = self.vertex(column, row);
        let p10 = self.vertex(column + 1, row);
        let p01 = self.vertex(column, row + 1);
        let p11 = self.vertex(column + 1, row + 1);

        [(p00, p10, p11), (p00, p11, p01)]
            .into_iter()
            .filter_map(|(a, b, c)| moller_trumbore_intersect(ray.origin, ray.direction, a, b, c))
            .min_by(|a, b| a.t.total_cmp(&b.t))
            .map(|hit| RaycastHit {
                point: ray.at(hit.t),
                distance: hit.t,
                normal: hit.normal,
            })
    }

    /// Walk the cells under the ray in order (2D DDA) and return the first hit
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RaycastHit> {
        const SKIN: f32 = 1e-3;

        let padded = AABB::new(self.bounds.min - Vec3::splat(SKIN), self.bounds.max + Vec3::splat(SKIN));
        let (t_enter, t_exit) = intersect_aabb(ray, &padded)?;
        let t_exit = t_exit.min(max_distance);
        if t_enter > t_exit {
            return None;
        }

        let start = (Vec2::new(ray.at(t_enter).x, ray.at(t_enter).z) - self.origin) / self.cell_size;
        let last_column = (self.columns - 2) as i64;
        let last_row = (self.rows - 2) as i64;
        let mut column = (start.x.floor() as i64).clamp(0, last_column);
        let mut row = (start.y.floor() as i64).clamp(0, last_row);

        let dir = Vec2::new(ray.direction.x, ray.direction.z);
        let step_column: i64 = if dir.x > 0.0 { 1 } else { -1 };
        let step_row: i64 = if dir.y > 0.0 { 1 } else { -1 };

        let t_delta = |d: f32| {
            if d.abs() < 1e-8 {
                f32::INFINITY
            } else {
                self.cell_size / d.abs()
            }
        };
        let t_next = |cell: i64, step: i64, pos: f32, d: f32| {
            if d.abs() < 1e-8 {
                return f32::INFINITY;
            }
            let boundary = if step > 0 { cell + 1 } else { cell } as f32;
            t_enter + (boundary - pos) * self.cell_size / d
        };

        let delta_column = t_delta(dir.x);
        let delta_row = t_delta(dir.y);
        let mut next_column = t_next(column, step_column, start.x, dir.x);
        let mut next_row = t_next(row, step_row, start.y, dir.y);

        let max_steps = self.columns + self.rows;
        for _ in 0..max_steps {
            if let Some(hit) = self.intersect_cell(ray, column as usize, row as usize) {
                return (hit.distance <= max_distance).then_some(hit);
            }

            if next_column.min(next_row) > t_exit {
                return None;
            }

            if next_column < next_row {
                column += step_column;
                next_column += delta_column;
            } else {
                row += step_row;
                next_row += delta_row;
            }

            if !(0..=last_column).contains(&column) || !(0..=last_row).contains(&row) {
                return None;
            }
        }

        None
    }
}
