//! Axis-aligned bounding boxes in world space.

use cgmath::Point3;

/// An axis-aligned box spanning `min..=max` on every axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f32>,
    /// Maximum corner.
    pub max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from two corners, in any order.
    pub fn new(a: Point3<f32>, b: Point3<f32>) -> Self {
        Aabb {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// The unit box occupied by the voxel at a world coordinate.
    pub fn voxel(world_position: Point3<i32>) -> Self {
        let min = Point3::new(
            world_position.x as f32,
            world_position.y as f32,
            world_position.z as f32,
        );
        Aabb {
            min,
            max: Point3::new(min.x + 1.0, min.y + 1.0, min.z + 1.0),
        }
    }

    /// Whether the two boxes overlap. Touching faces count as overlapping.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Whether `point` lies inside the box or on its surface.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_and_disjoint_boxes() {
        let a = Aabb::voxel(Point3::new(0, 0, 0));
        let b = Aabb::new(Point3::new(0.5, 0.5, 0.5), Point3::new(2.0, 2.0, 2.0));
        let c = Aabb::voxel(Point3::new(3, 0, 0));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
        assert!(a.intersects(&Aabb::voxel(Point3::new(1, 0, 0))));
    }

    #[test]
    fn voxel_box_contains_its_interior() {
        let bounds = Aabb::voxel(Point3::new(-2, 5, 1));
        assert_eq!(bounds.min, Point3::new(-2.0, 5.0, 1.0));
        assert!(bounds.contains_point(Point3::new(-1.5, 5.5, 1.9)));
        assert!(!bounds.contains_point(Point3::new(-2.5, 5.5, 1.5)));
    }

    #[test]
    fn new_orders_corners() {
        let bounds = Aabb::new(Point3::new(1.0, -1.0, 4.0), Point3::new(-1.0, 1.0, 2.0));
        assert_eq!(bounds.min, Point3::new(-1.0, -1.0, 2.0));
        assert_eq!(bounds.max, Point3::new(1.0, 1.0, 4.0));
    }
}
