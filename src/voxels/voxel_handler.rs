//! # Voxel Handler Module
//!
//! Picking and editing voxels from an observer's point of view.
//!
//! Each update casts a ray from the observer through the voxel grid with a
//! fast voxel traversal (DDA) that visits every cell the ray crosses, in order,
//! and remembers the first solid one together with the face the ray entered
//! through. Edits act on that cached hit: removing clears the hit voxel, adding
//! fills the open cell in front of the hit face. Either edit rebuilds the
//! owning chunk and any neighbour chunk sharing the edited boundary.

use cgmath::{InnerSpace, Point3, Vector3};
use log::{debug, trace};

use crate::settings::{SettingsError, WorldSettings};

use super::{
    block::{block_side::BlockSide, VoxelId, AIR},
    chunk::chunk_index::ChunkLocation,
    world::World,
};

/// Upper bound on the per-axis parametric step, used for near-axis-aligned rays.
const MAX_DELTA: f32 = 10_000_000.0;

/// What [`VoxelHandler::set_voxel`] does with the targeted voxel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// Clear the targeted voxel.
    #[default]
    Remove,
    /// Fill the cell in front of the targeted face.
    Add,
}

impl InteractionMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            InteractionMode::Remove => InteractionMode::Add,
            InteractionMode::Add => InteractionMode::Remove,
        }
    }
}

/// Supplies the picking ray each update.
pub trait Observer {
    /// Eye position in world space.
    fn position(&self) -> Point3<f32>;
    /// Viewing direction; need not be normalised.
    fn forward(&self) -> Vector3<f32>;
}

/// A fixed ray, for callers without a camera.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Start of the ray.
    pub origin: Point3<f32>,
    /// Direction of the ray.
    pub direction: Vector3<f32>,
}

impl Observer for Ray {
    fn position(&self) -> Point3<f32> {
        self.origin
    }

    fn forward(&self) -> Vector3<f32> {
        self.direction
    }
}

/// The first solid voxel along a ray.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RayHit {
    /// Material of the hit voxel.
    pub voxel_id: VoxelId,
    /// World coordinate of the hit voxel.
    pub world_position: Point3<i32>,
    /// Index of the chunk holding the voxel.
    pub chunk_index: usize,
    /// Position of that chunk in chunk coordinates.
    pub chunk_position: Point3<i32>,
    /// Coordinate of the voxel inside its chunk.
    pub local_position: Point3<i32>,
    /// Index of the voxel in its chunk's grid.
    pub voxel_index: usize,
    /// Outward normal of the face the ray entered through. Zero when the ray
    /// started inside the voxel.
    pub normal: Vector3<i32>,
}

impl RayHit {
    fn new(location: ChunkLocation, world_position: Point3<i32>, voxel_id: VoxelId, normal: Vector3<i32>) -> Self {
        RayHit {
            voxel_id,
            world_position,
            chunk_index: location.chunk_index,
            chunk_position: location.chunk_position,
            local_position: location.local_position,
            voxel_index: location.voxel_index,
            normal,
        }
    }

    /// The face the ray entered through, or `None` if it started inside the voxel.
    pub fn face(&self) -> Option<BlockSide> {
        BlockSide::from_normal(self.normal)
    }

    /// The chunk location of the hit voxel.
    pub fn location(&self) -> ChunkLocation {
        ChunkLocation {
            chunk_position: self.chunk_position,
            chunk_index: self.chunk_index,
            local_position: self.local_position,
            voxel_index: self.voxel_index,
        }
    }
}

/// Finds the first solid voxel within `max_distance` of `origin` along
/// `direction`.
///
/// Cells outside the world count as open, so rays may start outside and enter
/// the world. The walk visits at most `max_distance + 1` cells per axis and
/// stops early once it is outside the world and moving away from it.
///
/// # Returns
/// `None` for a miss, a zero or non-finite direction or origin, or a distance
/// that is not positive and finite.
pub fn ray_cast(world: &World, origin: Point3<f32>, direction: Vector3<f32>, max_distance: f32) -> Option<RayHit> {
    let length = direction.magnitude();
    if !length.is_finite() || length == 0.0 || !max_distance.is_finite() || max_distance <= 0.0 {
        return None;
    }
    if !(origin.x.is_finite() && origin.y.is_finite() && origin.z.is_finite()) {
        return None;
    }
    let travel = direction / length * max_distance;

    let mut voxel = Point3::new(
        origin.x.floor() as i32,
        origin.y.floor() as i32,
        origin.z.floor() as i32,
    );
    let (step_x, delta_x, mut max_x) = axis_setup(origin.x, travel.x);
    let (step_y, delta_y, mut max_y) = axis_setup(origin.y, travel.y);
    let (step_z, delta_z, mut max_z) = axis_setup(origin.z, travel.z);
    let step = Vector3::new(step_x, step_y, step_z);
    let extent = world_extent(world);
    let mut normal = Vector3::new(0, 0, 0);

    let max_steps = (max_distance.ceil() as usize).saturating_add(1).saturating_mul(3);
    for _ in 0..=max_steps {
        if max_x > 1.0 && max_y > 1.0 && max_z > 1.0 {
            break;
        }
        if leaving_world(voxel, step, extent) {
            break;
        }
        if let Some(location) = world.locate(voxel) {
            let voxel_id = world.grids().voxel_at(&location);
            if voxel_id != AIR {
                trace!("Ray hit voxel {} at {:?}, normal {:?}", voxel_id, voxel, normal);
                return Some(RayHit::new(location, voxel, voxel_id, normal));
            }
        }

        if max_x < max_y {
            if max_x < max_z {
                voxel.x = voxel.x.checked_add(step_x)?;
                max_x += delta_x;
                normal = Vector3::new(-step_x, 0, 0);
            } else {
                voxel.z = voxel.z.checked_add(step_z)?;
                max_z += delta_z;
                normal = Vector3::new(0, 0, -step_z);
            }
        } else if max_y < max_z {
            voxel.y = voxel.y.checked_add(step_y)?;
            max_y += delta_y;
            normal = Vector3::new(0, -step_y, 0);
        } else {
            voxel.z = voxel.z.checked_add(step_z)?;
            max_z += delta_z;
            normal = Vector3::new(0, 0, -step_z);
        }
    }

    trace!("Ray from {:?} missed", origin);
    None
}

/// Size of the world in voxels along each axis.
fn world_extent(world: &World) -> Vector3<i32> {
    let layout = world.layout();
    let size = layout.chunk_size();
    let (width, height, depth) = layout.dimensions();
    Vector3::new(width * size, height * size, depth * size)
}

/// Whether a walk at `voxel` can never enter the world again.
fn leaving_world(voxel: Point3<i32>, step: Vector3<i32>, extent: Vector3<i32>) -> bool {
    let leaving = |coordinate: i32, step: i32, extent: i32| {
        (coordinate < 0 && step <= 0) || (coordinate >= extent && step >= 0)
    };
    leaving(voxel.x, step.x, extent.x) || leaving(voxel.y, step.y, extent.y) || leaving(voxel.z, step.z, extent.z)
}

/// Step direction, parametric cell width and parametric distance to the first
/// cell boundary for one axis. `travel` is the ray's full extent on that axis.
fn axis_setup(start: f32, travel: f32) -> (i32, f32, f32) {
    if travel == 0.0 {
        return (0, f32::INFINITY, f32::INFINITY);
    }
    let delta = (1.0 / travel.abs()).min(MAX_DELTA);
    let fraction = start - start.floor();
    if travel > 0.0 {
        (1, delta, delta * (1.0 - fraction))
    } else {
        (-1, delta, delta * fraction)
    }
}

/// Picks voxels from an observer and applies edits to a [`World`].
///
/// # Examples
///
/// ```
/// use cgmath::{Point3, Vector3};
/// use voxel_world_core::settings::WorldSettings;
/// use voxel_world_core::voxels::{
///     terrain::SolidTerrain,
///     voxel_handler::{InteractionMode, Ray, VoxelHandler},
///     world::World,
/// };
///
/// let settings = WorldSettings { chunk_size: 8, world_width: 1, world_height: 1, world_depth: 1, ..WorldSettings::default() };
/// let mut world = World::build(&settings, &SolidTerrain(1)).unwrap();
/// let mut handler = VoxelHandler::new(&settings).unwrap();
///
/// let eye = Ray { origin: Point3::new(4.5, 10.0, 4.5), direction: Vector3::new(0.0, -1.0, 0.0) };
/// assert!(handler.update(&world, &eye).is_some());
/// assert_eq!(handler.mode(), InteractionMode::Remove);
/// assert!(handler.set_voxel(&mut world));
/// assert_eq!(world.voxel_id(Point3::new(4, 7, 4)), 0);
/// ```
#[derive(Clone, Debug)]
pub struct VoxelHandler {
    mode: InteractionMode,
    /// Material placed in [`InteractionMode::Add`].
    new_voxel_id: VoxelId,
    max_ray_distance: f32,
    /// Result of the last update.
    hit: Option<RayHit>,
}

impl VoxelHandler {
    /// Creates a handler in [`InteractionMode::Remove`] placing the configured
    /// default material.
    ///
    /// # Errors
    /// Fails if `settings` do not validate.
    pub fn new(settings: &WorldSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(VoxelHandler {
            mode: InteractionMode::default(),
            new_voxel_id: settings.default_material_id()?,
            max_ray_distance: settings.max_ray_distance,
            hit: None,
        })
    }

    /// The current interaction mode.
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Toggles between removing and adding.
    pub fn switch_mode(&mut self) -> InteractionMode {
        self.mode = self.mode.toggled();
        debug!("Interaction mode switched to {:?}", self.mode);
        self.mode
    }

    /// Sets the interaction mode.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    /// The material placed by [`VoxelHandler::add_voxel`].
    pub fn selected_material(&self) -> VoxelId {
        self.new_voxel_id
    }

    /// Selects the material placed by [`VoxelHandler::add_voxel`].
    ///
    /// # Returns
    /// `false`, leaving the selection unchanged, if `voxel_id` is air.
    pub fn set_material(&mut self, voxel_id: VoxelId) -> bool {
        if voxel_id == AIR {
            return false;
        }
        self.new_voxel_id = voxel_id;
        true
    }

    /// How far the picking ray reaches.
    pub fn max_ray_distance(&self) -> f32 {
        self.max_ray_distance
    }

    /// Casts a fresh ray from `observer` and caches the result.
    pub fn update<O>(&mut self, world: &World, observer: &O) -> Option<&RayHit>
    where
        O: Observer + ?Sized,
    {
        self.hit = ray_cast(
            world,
            observer.position(),
            observer.forward(),
            self.max_ray_distance,
        );
        self.hit.as_ref()
    }

    /// The cached hit of the last update, if the ray found a voxel.
    pub fn hit(&self) -> Option<&RayHit> {
        self.hit.as_ref()
    }

    /// Applies the current mode to the cached hit.
    ///
    /// # Returns
    /// Whether the world changed.
    pub fn set_voxel(&mut self, world: &mut World) -> bool {
        match self.mode {
            InteractionMode::Remove => self.remove_voxel(world),
            InteractionMode::Add => self.add_voxel(world),
        }
    }

    /// Clears the hit voxel and rebuilds every chunk whose mesh depends on it.
    ///
    /// # Returns
    /// `false`, without touching the world, if there is no cached hit.
    pub fn remove_voxel(&mut self, world: &mut World) -> bool {
        let Some(hit) = self.hit else {
            return false;
        };
        let location = hit.location();
        if world.set_voxel(&location, AIR).is_none() {
            return false;
        }

        self.finish_edit(world, &location);
        debug!("Removed voxel at {:?}", hit.world_position);
        true
    }

    /// Places the selected material in the open cell in front of the hit face.
    ///
    /// # Returns
    /// `false`, without touching the world, if there is no cached hit or the
    /// target cell is outside the world or already solid.
    pub fn add_voxel(&mut self, world: &mut World) -> bool {
        let Some(hit) = self.hit else {
            return false;
        };
        let Some(face) = hit.face() else {
            return false;
        };
        let target = hit.world_position + face.normal();
        let Some(location) = world.locate(target) else {
            return false;
        };
        if world.grids().voxel_at(&location) != AIR {
            return false;
        }
        if world.set_voxel(&location, self.new_voxel_id).is_none() {
            return false;
        }

        self.finish_edit(world, &location);
        debug!("Added voxel {} at {:?} on the {:?} face", self.new_voxel_id, target, face);
        true
    }

    fn finish_edit(&mut self, world: &mut World, location: &ChunkLocation) {
        world.mark_boundary_neighbours_dirty(location);
        world.rebuild_dirty();
        self.hit = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::terrain::{EmptyTerrain, TerrainGenerator};

    /// Solid below `top`, air above.
    struct Slab {
        top: i32,
    }

    impl TerrainGenerator for Slab {
        fn voxel_at(&self, world_position: Point3<i32>) -> VoxelId {
            if world_position.y < self.top {
                1
            } else {
                AIR
            }
        }
    }

    fn settings(width: u32, height: u32) -> WorldSettings {
        deep_settings(width, height, 1)
    }

    fn deep_settings(width: u32, height: u32, depth: u32) -> WorldSettings {
        WorldSettings {
            chunk_size: 4,
            world_width: width,
            world_height: height,
            world_depth: depth,
            ..WorldSettings::default()
        }
    }

    fn world_with(width: u32, height: u32, terrain: &dyn TerrainGenerator) -> World {
        World::build(&settings(width, height), terrain).unwrap()
    }

    fn place(world: &mut World, position: Point3<i32>, voxel_id: VoxelId) {
        let location = world.locate(position).unwrap();
        world.set_voxel(&location, voxel_id);
        world.rebuild_dirty();
    }

    fn down_from(x: f32, y: f32, z: f32) -> Ray {
        Ray {
            origin: Point3::new(x, y, z),
            direction: Vector3::new(0.0, -1.0, 0.0),
        }
    }

    #[test]
    fn rays_in_an_empty_world_miss() {
        let world = world_with(2, 1, &EmptyTerrain);
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..100 {
            let origin = Point3::new(rng.f32() * 8.0, rng.f32() * 4.0, rng.f32() * 4.0);
            let direction = Vector3::new(rng.f32() - 0.5, rng.f32() - 0.5, rng.f32() - 0.5);
            assert_eq!(ray_cast(&world, origin, direction, 6.0), None);
        }
    }

    #[test]
    fn hit_normal_faces_the_ray_origin() {
        let mut world = world_with(2, 1, &EmptyTerrain);
        place(&mut world, Point3::new(1, 0, 1), 3);

        let hit = ray_cast(&world, Point3::new(1.5, 3.5, 1.5), Vector3::new(0.0, -1.0, 0.0), 6.0).unwrap();
        assert_eq!(hit.world_position, Point3::new(1, 0, 1));
        assert_eq!(hit.voxel_id, 3);
        assert_eq!(hit.normal, Vector3::new(0, 1, 0));
        assert_eq!(hit.face(), Some(BlockSide::TOP));

        let hit = ray_cast(&world, Point3::new(5.5, 0.5, 1.5), Vector3::new(-1.0, 0.0, 0.0), 6.0).unwrap();
        assert_eq!(hit.world_position, Point3::new(1, 0, 1));
        assert_eq!(hit.normal, Vector3::new(1, 0, 0));
        assert_eq!(hit.chunk_index, 0);
        assert_eq!(hit.local_position, Point3::new(1, 0, 1));
    }

    #[test]
    fn rays_enter_the_world_from_outside() {
        let mut world = world_with(2, 1, &EmptyTerrain);
        place(&mut world, Point3::new(0, 2, 2), 1);

        let hit = ray_cast(&world, Point3::new(-2.5, 2.5, 2.5), Vector3::new(1.0, 0.0, 0.0), 6.0).unwrap();
        assert_eq!(hit.world_position, Point3::new(0, 2, 2));
        assert_eq!(hit.normal, Vector3::new(-1, 0, 0));
    }

    #[test]
    fn skewed_ray_enters_through_the_crossed_face() {
        let mut world = world_with(2, 1, &EmptyTerrain);
        for y in 0..4 {
            for z in 0..4 {
                place(&mut world, Point3::new(3, y, z), 1);
            }
        }

        let hit = ray_cast(&world, Point3::new(0.5, 0.5, 0.5), Vector3::new(1.0, 0.3, 0.0), 6.0).unwrap();
        assert_eq!(hit.world_position, Point3::new(3, 1, 0));
        assert_eq!(hit.normal, Vector3::new(-1, 0, 0));
    }

    #[test]
    fn targets_beyond_reach_are_missed() {
        let mut world = world_with(2, 1, &EmptyTerrain);
        place(&mut world, Point3::new(0, 0, 0), 1);
        assert!(ray_cast(&world, Point3::new(7.5, 0.5, 0.5), Vector3::new(-1.0, 0.0, 0.0), 6.0).is_none());
        assert!(ray_cast(&world, Point3::new(7.5, 0.5, 0.5), Vector3::new(-1.0, 0.0, 0.0), 8.0).is_some());
    }

    #[test]
    fn ray_starting_inside_a_voxel_has_no_normal() {
        let world = world_with(1, 1, &Slab { top: 2 });
        let hit = ray_cast(&world, Point3::new(1.5, 0.5, 1.5), Vector3::new(0.0, 1.0, 0.0), 6.0).unwrap();
        assert_eq!(hit.world_position, Point3::new(1, 0, 1));
        assert_eq!(hit.normal, Vector3::new(0, 0, 0));
        assert_eq!(hit.face(), None);
    }

    #[test]
    fn degenerate_rays_miss() {
        let world = world_with(1, 1, &Slab { top: 2 });
        let origin = Point3::new(1.5, 0.5, 1.5);
        assert!(ray_cast(&world, origin, Vector3::new(0.0, 0.0, 0.0), 6.0).is_none());
        assert!(ray_cast(&world, origin, Vector3::new(f32::NAN, 0.0, 0.0), 6.0).is_none());
        assert!(ray_cast(&world, origin, Vector3::new(0.0, 1.0, 0.0), 0.0).is_none());
    }

    #[test]
    fn far_away_origins_miss_without_overflow() {
        let world = world_with(1, 1, &Slab { top: 2 });
        let rays = [
            (Point3::new(1e10, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0)),
            (Point3::new(1e10, 0.5, 0.5), Vector3::new(-1.0, 0.0, 0.0)),
            (Point3::new(-1e10, 0.5, 0.5), Vector3::new(-1.0, 0.0, 0.0)),
            (Point3::new(0.5, f32::MAX, 0.5), Vector3::new(0.0, 1.0, 0.0)),
            (Point3::new(0.5, -3e9, 0.5), Vector3::new(0.3, -1.0, 0.2)),
            (Point3::new(f32::INFINITY, 0.5, 0.5), Vector3::new(-1.0, 0.0, 0.0)),
        ];
        for (origin, direction) in rays {
            assert_eq!(ray_cast(&world, origin, direction, 6.0), None);
        }
    }

    #[test]
    fn long_reach_walks_terminate() {
        let mut world = world_with(1, 1, &EmptyTerrain);
        let origin = Point3::new(0.5, 0.5, 0.5);
        let along_x = Vector3::new(1.0, 0.0, 0.0);

        assert_eq!(ray_cast(&world, origin, along_x, 1e8), None);
        assert_eq!(ray_cast(&world, origin, Vector3::new(1.0, 0.7, 0.3), f32::MAX), None);
        assert_eq!(ray_cast(&world, origin, along_x, f32::INFINITY), None);

        place(&mut world, Point3::new(3, 0, 0), 1);
        let hit = ray_cast(&world, origin, along_x, 1e8).unwrap();
        assert_eq!(hit.world_position, Point3::new(3, 0, 0));
        assert_eq!(hit.normal, Vector3::new(-1, 0, 0));
    }

    #[test]
    fn mode_toggles_between_remove_and_add() {
        let mut handler = VoxelHandler::new(&settings(1, 1)).unwrap();
        assert_eq!(handler.mode(), InteractionMode::Remove);
        assert_eq!(handler.switch_mode(), InteractionMode::Add);
        assert_eq!(handler.switch_mode(), InteractionMode::Remove);
        handler.set_mode(InteractionMode::Add);
        assert_eq!(handler.mode(), InteractionMode::Add);
    }

    #[test]
    fn material_selection_rejects_air() {
        let mut handler = VoxelHandler::new(&settings(1, 1)).unwrap();
        assert_eq!(handler.selected_material(), 3);
        assert!(!handler.set_material(AIR));
        assert!(handler.set_material(7));
        assert_eq!(handler.selected_material(), 7);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut settings = settings(1, 1);
        settings.max_ray_distance = -1.0;
        assert!(matches!(
            VoxelHandler::new(&settings),
            Err(SettingsError::InvalidRayDistance(_))
        ));
    }

    #[test]
    fn edits_without_a_hit_are_no_ops() {
        let mut world = world_with(1, 1, &Slab { top: 1 });
        let mut handler = VoxelHandler::new(&settings(1, 1)).unwrap();

        assert!(handler.update(&world, &down_from(1.5, 3.5, 1.5)).is_some());
        let sky = Ray {
            origin: Point3::new(1.5, 3.5, 1.5),
            direction: Vector3::new(0.0, 1.0, 0.0),
        };
        assert!(handler.update(&world, &sky).is_none());
        assert!(!handler.remove_voxel(&mut world));
        assert!(!handler.add_voxel(&mut world));
        assert_eq!(world.chunk(0).unwrap().rebuild_count(), 1);
    }

    #[test]
    fn remove_clears_the_voxel_and_shrinks_the_mesh() {
        let mut world = world_with(1, 1, &Slab { top: 1 });
        place(&mut world, Point3::new(1, 1, 1), 2);
        let before = world.chunk(0).unwrap().mesh().vertex_count();
        let mut handler = VoxelHandler::new(&settings(1, 1)).unwrap();

        let hit = *handler.update(&world, &down_from(1.5, 3.5, 1.5)).unwrap();
        assert_eq!(hit.world_position, Point3::new(1, 1, 1));
        assert!(handler.set_voxel(&mut world));

        assert_eq!(world.voxel_id(Point3::new(1, 1, 1)), AIR);
        assert!(world.chunk(0).unwrap().mesh().vertex_count() < before);
        assert!(handler.hit().is_none());
    }

    #[test]
    fn add_fills_the_cell_in_front_of_the_hit_face() {
        // Floor fills the lower chunk up to its top layer; the upper chunk is empty.
        let mut world = world_with(1, 2, &Slab { top: 4 });
        assert!(world.chunk(1).unwrap().is_empty());
        let mut handler = VoxelHandler::new(&settings(1, 2)).unwrap();
        handler.switch_mode();
        handler.set_material(5);

        handler.update(&world, &down_from(2.5, 7.5, 2.5));
        assert!(handler.set_voxel(&mut world));

        assert_eq!(world.voxel_id(Point3::new(2, 4, 2)), 5);
        let upper = world.chunk(1).unwrap();
        assert!(!upper.is_empty());
        assert_eq!(upper.rebuild_count(), 2);
        // The bottom face rests on the lower chunk and is culled.
        assert_eq!(upper.mesh().face_count(), 5);
        assert_eq!(world.chunk(0).unwrap().rebuild_count(), 2);
    }

    #[test]
    fn add_onto_an_occupied_cell_is_a_no_op() {
        let mut world = world_with(1, 1, &Slab { top: 2 });
        let mut handler = VoxelHandler::new(&settings(1, 1)).unwrap();
        handler.set_mode(InteractionMode::Add);

        // Started inside a solid voxel: the target is the voxel itself.
        handler.update(&world, &down_from(1.5, 1.5, 1.5));
        assert_eq!(handler.hit().unwrap().normal, Vector3::new(0, 0, 0));
        assert!(!handler.set_voxel(&mut world));
        assert_eq!(world.chunk(0).unwrap().rebuild_count(), 1);
        assert!(handler.hit().is_some());
    }

    #[test]
    fn add_outside_the_world_is_a_no_op() {
        let mut world = world_with(1, 1, &Slab { top: 4 });
        let mut handler = VoxelHandler::new(&settings(1, 1)).unwrap();
        handler.set_mode(InteractionMode::Add);

        handler.update(&world, &down_from(1.5, 6.5, 1.5));
        assert_eq!(handler.hit().unwrap().world_position, Point3::new(1, 3, 1));
        assert!(!handler.add_voxel(&mut world));
        assert_eq!(world.voxel_id(Point3::new(1, 4, 1)), AIR);
    }

    #[test]
    fn boundary_edit_rebuilds_the_neighbour_chunk() {
        let mut world = world_with(2, 1, &Slab { top: 1 });
        let mut handler = VoxelHandler::new(&settings(2, 1)).unwrap();

        // World x = 4 is local x = 0 of the second chunk.
        handler.update(&world, &down_from(4.5, 3.5, 1.5));
        assert_eq!(handler.hit().unwrap().local_position, Point3::new(0, 0, 1));
        assert!(handler.remove_voxel(&mut world));

        assert_eq!(world.chunk(1).unwrap().rebuild_count(), 2);
        assert_eq!(world.chunk(0).unwrap().rebuild_count(), 2);
        assert_eq!(world.voxel_id(Point3::new(4, 0, 1)), AIR);
    }

    #[test]
    fn removal_on_the_bottom_layer_rebuilds_the_chunk_below() {
        let settings = deep_settings(1, 2, 1);
        // The lower chunk is full; the upper chunk holds one layer at local y = 0.
        let mut world = World::build(&settings, &Slab { top: 5 }).unwrap();
        let mut handler = VoxelHandler::new(&settings).unwrap();
        let lower = world.layout().chunk_index(Point3::new(0, 0, 0)).unwrap();
        let upper = world.layout().chunk_index(Point3::new(0, 1, 0)).unwrap();

        handler.update(&world, &down_from(1.5, 7.5, 1.5));
        let hit = *handler.hit().unwrap();
        assert_eq!(hit.chunk_index, upper);
        assert_eq!(hit.local_position, Point3::new(1, 0, 1));
        assert!(handler.remove_voxel(&mut world));

        assert_eq!(world.voxel_id(Point3::new(1, 4, 1)), AIR);
        assert_eq!(world.chunk(upper).unwrap().rebuild_count(), 2);
        assert_eq!(world.chunk(lower).unwrap().rebuild_count(), 2);
    }

    #[test]
    fn addition_on_the_back_layer_rebuilds_the_chunk_behind() {
        let settings = deep_settings(1, 1, 2);
        let mut world = World::build(&settings, &Slab { top: 1 }).unwrap();
        let mut handler = VoxelHandler::new(&settings).unwrap();
        handler.set_mode(InteractionMode::Add);
        let behind = world.layout().chunk_index(Point3::new(0, 0, 0)).unwrap();
        let front = world.layout().chunk_index(Point3::new(0, 0, 1)).unwrap();

        // World z = 4 is local z = 0 of the front chunk; the target sits at local y = 1.
        handler.update(&world, &down_from(1.5, 3.5, 4.5));
        assert_eq!(handler.hit().unwrap().world_position, Point3::new(1, 0, 4));
        assert!(handler.set_voxel(&mut world));

        assert_eq!(world.voxel_id(Point3::new(1, 1, 4)), handler.selected_material());
        assert_eq!(world.chunk(front).unwrap().rebuild_count(), 2);
        assert_eq!(world.chunk(behind).unwrap().rebuild_count(), 2);
    }

    #[test]
    fn removal_on_the_back_layer_rebuilds_the_chunk_behind() {
        let settings = deep_settings(1, 1, 2);
        let mut world = World::build(&settings, &Slab { top: 2 }).unwrap();
        let mut handler = VoxelHandler::new(&settings).unwrap();
        let behind = world.layout().chunk_index(Point3::new(0, 0, 0)).unwrap();

        handler.update(&world, &down_from(1.5, 3.5, 4.5));
        assert_eq!(handler.hit().unwrap().local_position, Point3::new(1, 1, 0));
        assert!(handler.remove_voxel(&mut world));

        assert_eq!(world.voxel_id(Point3::new(1, 1, 4)), AIR);
        assert_eq!(world.chunk(behind).unwrap().rebuild_count(), 2);
    }

    #[test]
    fn interior_edit_leaves_neighbours_alone() {
        let mut world = world_with(2, 1, &Slab { top: 1 });
        let mut handler = VoxelHandler::new(&settings(2, 1)).unwrap();

        handler.update(&world, &down_from(5.5, 3.5, 1.5));
        assert!(handler.remove_voxel(&mut world));
        assert_eq!(world.chunk(1).unwrap().rebuild_count(), 2);
        assert_eq!(world.chunk(0).unwrap().rebuild_count(), 1);
    }
}
