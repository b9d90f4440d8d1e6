//! # Raycast Module
//!
//! Hit-testing against the [`World`]. A ray is walked cell by cell
//! (Amanatides & Woo traversal) until it enters an occupied cell or runs past
//! the maximum distance.
//!
//! The face the ray crossed to enter the hit cell is reported alongside the
//! hit, which is what placement needs: the new block goes into the neighbor
//! across that face.

use cgmath::{InnerSpace, Point3, Vector3};

use super::{block::block_side::BlockSide, block::block_type::BlockType, world::World};

/// Directions with a smaller component than this are treated as parallel to the axis.
const PARALLEL_EPSILON: f32 = 1e-6;

/// The first occupied cell along a ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// Coordinate of the hit block.
    pub position: Point3<i32>,
    /// Type of the hit block.
    pub block_type: BlockType,
    /// Face of the hit block the ray entered through.
    ///
    /// `None` when the ray starts inside the block.
    pub side: Option<BlockSide>,
    /// Distance along the normalized ray to the entry point.
    pub distance: f32,
}

impl RayHit {
    /// The empty cell in front of the hit face, where a placed block should go.
    pub fn placement_target(&self) -> Option<Point3<i32>> {
        self.side
            .map(|side| World::neighbor(self.position, side))
    }
}

/// Per-axis traversal state.
struct AxisWalk {
    step: i32,
    t_max: f32,
    t_delta: f32,
}

impl AxisWalk {
    fn new(origin: f32, direction: f32, cell: i32) -> Self {
        if direction.abs() < PARALLEL_EPSILON {
            return AxisWalk {
                step: 0,
                t_max: f32::INFINITY,
                t_delta: f32::INFINITY,
            };
        }
        let step = if direction > 0.0 { 1 } else { -1 };
        let boundary = if step > 0 { cell as f32 + 1.0 } else { cell as f32 };
        AxisWalk {
            step,
            t_max: ((boundary - origin) / direction).max(0.0),
            t_delta: 1.0 / direction.abs(),
        }
    }
}

/// Casts a ray from `origin` along `direction` and returns the first block it hits.
///
/// # Arguments
/// * `world` - The world to test against
/// * `origin` - Start of the ray in world space
/// * `direction` - Direction of the ray; need not be normalized
/// * `max_distance` - Cells entered beyond this distance are ignored
///
/// # Returns
/// `None` if the direction is zero, `max_distance` is not finite, or nothing
/// is hit within `max_distance`.
pub fn raycast(
    world: &World,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    max_distance: f32,
) -> Option<RayHit> {
    if direction.magnitude2() == 0.0 || !max_distance.is_finite() {
        return None;
    }
    let direction = direction.normalize();

    let mut cell = World::cell_at(origin);
    if let Some(block_type) = world.get(cell) {
        return Some(RayHit {
            position: cell,
            block_type,
            side: None,
            distance: 0.0,
        });
    }

    let mut x = AxisWalk::new(origin.x, direction.x, cell.x);
    let mut y = AxisWalk::new(origin.y, direction.y, cell.y);
    let mut z = AxisWalk::new(origin.z, direction.z, cell.z);

    loop {
        // Step along whichever axis reaches its next boundary first. The face
        // entered is the one facing back against the step.
        let (distance, side) = if x.t_max < y.t_max && x.t_max < z.t_max {
            cell.x = cell.x.checked_add(x.step)?;
            let distance = x.t_max;
            x.t_max += x.t_delta;
            (distance, if x.step > 0 { BlockSide::Left } else { BlockSide::Right })
        } else if y.t_max < z.t_max {
            cell.y = cell.y.checked_add(y.step)?;
            let distance = y.t_max;
            y.t_max += y.t_delta;
            (distance, if y.step > 0 { BlockSide::Bottom } else { BlockSide::Top })
        } else {
            cell.z = cell.z.checked_add(z.step)?;
            let distance = z.t_max;
            z.t_max += z.t_delta;
            (distance, if z.step > 0 { BlockSide::Back } else { BlockSide::Front })
        };

        if !distance.is_finite() || distance > max_distance {
            return None;
        }

        if let Some(block_type) = world.get(cell) {
            return Some(RayHit {
                position: cell,
                block_type,
                side: Some(side),
                distance,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_world() -> World {
        let mut world = World::new();
        for x in -3..3 {
            for z in -3..3 {
                world.place(Point3::new(x, 0, z), BlockType::Grass).unwrap();
            }
        }
        world
    }

    #[test]
    fn looking_down_hits_the_top_face() {
        let world = floor_world();
        let hit = raycast(
            &world,
            Point3::new(0.5, 3.5, 0.5),
            Vector3::new(0.0, -1.0, 0.0),
            10.0,
        )
        .unwrap();

        assert_eq!(hit.position, Point3::new(0, 0, 0));
        assert_eq!(hit.block_type, BlockType::Grass);
        assert_eq!(hit.side, Some(BlockSide::Top));
        assert!((hit.distance - 2.5).abs() < 1e-5);
        assert_eq!(hit.placement_target(), Some(Point3::new(0, 1, 0)));
    }

    #[test]
    fn horizontal_ray_hits_the_facing_side() {
        let mut world = World::new();
        world.place(Point3::new(4, 1, 0), BlockType::Stone).unwrap();

        let hit = raycast(
            &world,
            Point3::new(0.5, 1.5, 0.5),
            Vector3::new(1.0, 0.0, 0.0),
            10.0,
        )
        .unwrap();
        assert_eq!(hit.position, Point3::new(4, 1, 0));
        assert_eq!(hit.side, Some(BlockSide::Left));
        assert_eq!(hit.placement_target(), Some(Point3::new(3, 1, 0)));

        let back = raycast(
            &world,
            Point3::new(8.5, 1.5, 0.5),
            Vector3::new(-2.0, 0.0, 0.0),
            10.0,
        )
        .unwrap();
        assert_eq!(back.side, Some(BlockSide::Right));
        assert_eq!(back.placement_target(), Some(Point3::new(5, 1, 0)));
    }

    #[test]
    fn placement_target_is_always_empty() {
        let world = floor_world();
        for direction in [
            Vector3::new(0.3, -1.0, 0.2),
            Vector3::new(-0.7, -0.4, 0.1),
            Vector3::new(0.0, -1.0, -0.9),
        ] {
            let hit = raycast(&world, Point3::new(0.2, 2.7, 0.4), direction, 10.0).unwrap();
            let target = hit.placement_target().unwrap();
            assert_eq!(world.get(target), None);
        }
    }

    #[test]
    fn misses_beyond_reach() {
        let world = floor_world();
        let origin = Point3::new(0.5, 20.5, 0.5);
        let down = Vector3::new(0.0, -1.0, 0.0);
        assert_eq!(raycast(&world, origin, down, 10.0), None);
        assert!(raycast(&world, origin, down, 25.0).is_some());
    }

    #[test]
    fn unbounded_reach_terminates() {
        let world = floor_world();
        let origin = Point3::new(0.5, 1.5, 0.5);
        let up = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(raycast(&world, origin, up, f32::INFINITY), None);
        assert_eq!(raycast(&world, origin, up, f32::NAN), None);
        assert_eq!(
            raycast(&world, Point3::new(0.5, 2.5, 0.5), Vector3::new(1.0, 0.0, 0.0), 1.0e6),
            None
        );
    }

    #[test]
    fn zero_direction_never_hits() {
        let world = floor_world();
        assert_eq!(
            raycast(&world, Point3::new(0.5, 3.0, 0.5), Vector3::new(0.0, 0.0, 0.0), 10.0),
            None
        );
    }

    #[test]
    fn starting_inside_a_block_has_no_side() {
        let world = floor_world();
        let hit = raycast(
            &world,
            Point3::new(0.5, 0.5, 0.5),
            Vector3::new(0.0, 1.0, 0.0),
            10.0,
        )
        .unwrap();
        assert_eq!(hit.position, Point3::new(0, 0, 0));
        assert_eq!(hit.side, None);
        assert_eq!(hit.placement_target(), None);
    }
}
