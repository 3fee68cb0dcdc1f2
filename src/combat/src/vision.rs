//! Line-of-sight primitive shared by the player's field of view and enemy
//! sight checks.

/// Walkability/transparency queries over a map. Out-of-bounds coordinates
/// must answer `false` to both.
pub trait Terrain {
    fn is_walkable(&self, x: i32, y: i32) -> bool;
    fn is_transparent(&self, x: i32, y: i32) -> bool;
}

pub struct VisionSystem;

impl VisionSystem {
    /// Rasterises the digital line from `from` to `to`, both endpoints
    /// included.
    pub fn line(from: (i32, i32), to: (i32, i32)) -> Vec<(i32, i32)> {
        // Bresenham算法实现
        let (mut x, mut y) = from;
        let (x2, y2) = to;
        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut points = Vec::with_capacity((dx - dy) as usize + 1);
        loop {
            points.push((x, y));
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        points
    }

    /// True when no opaque tile lies strictly between `from` and `to` on the
    /// traced line. The endpoints themselves may be opaque.
    pub fn has_line_of_sight<T>(terrain: &T, from: (i32, i32), to: (i32, i32)) -> bool
    where
        T: Terrain + ?Sized,
    {
        let points = Self::line(from, to);
        let inner = points.len().saturating_sub(1);
        points
            .iter()
            .take(inner)
            .skip(1)
            .all(|&(x, y)| terrain.is_transparent(x, y))
    }

    /// Euclidean distance gate, `sqrt(dx² + dy²) <= radius`.
    pub fn within_radius(from: (i32, i32), to: (i32, i32), radius: u32) -> bool {
        let dx = (to.0 - from.0) as i64;
        let dy = (to.1 - from.1) as i64;
        let r = radius as i64;
        dx * dx + dy * dy <= r * r
    }

    /// Distance gate followed by a line trace.
    pub fn can_see<T>(terrain: &T, from: (i32, i32), to: (i32, i32), radius: u32) -> bool
    where
        T: Terrain + ?Sized,
    {
        Self::within_radius(from, to, radius) && Self::has_line_of_sight(terrain, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Open 20x20 field with configurable wall cells.
    struct Field {
        walls: Vec<(i32, i32)>,
    }

    impl Terrain for Field {
        fn is_walkable(&self, x: i32, y: i32) -> bool {
            self.is_transparent(x, y)
        }
        fn is_transparent(&self, x: i32, y: i32) -> bool {
            (0..20).contains(&x) && (0..20).contains(&y) && !self.walls.contains(&(x, y))
        }
    }

    #[test]
    fn line_includes_both_endpoints() {
        let line = VisionSystem::line((0, 0), (4, 2));
        assert_eq!(line.first(), Some(&(0, 0)));
        assert_eq!(line.last(), Some(&(4, 2)));
        assert_eq!(line.len(), 5);
    }

    #[test]
    fn line_to_self_is_single_point() {
        assert_eq!(VisionSystem::line((3, 3), (3, 3)), vec![(3, 3)]);
    }

    #[test]
    fn wall_between_blocks_sight() {
        let field = Field {
            walls: vec![(5, 5)],
        };
        assert!(!VisionSystem::has_line_of_sight(&field, (3, 5), (7, 5)));
        assert!(VisionSystem::has_line_of_sight(&field, (3, 6), (7, 6)));
    }

    #[test]
    fn opaque_target_is_still_seen() {
        let field = Field {
            walls: vec![(7, 5)],
        };
        assert!(VisionSystem::has_line_of_sight(&field, (3, 5), (7, 5)));
    }

    #[test]
    fn radius_gate_is_euclidean() {
        assert!(VisionSystem::within_radius((0, 0), (6, 0), 6));
        assert!(!VisionSystem::within_radius((0, 0), (5, 5), 6));
        assert!(VisionSystem::within_radius((0, 0), (4, 4), 6));
    }

    #[test]
    fn can_see_combines_gate_and_trace() {
        let field = Field { walls: vec![] };
        assert!(VisionSystem::can_see(&field, (10, 10), (10, 16), 6));
        assert!(!VisionSystem::can_see(&field, (10, 10), (10, 17), 6));
    }
}
