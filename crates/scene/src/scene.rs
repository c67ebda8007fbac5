use glam::Vec3;
use labyrinth_common::{NO_HIT, Plane};
use labyrinth_render::{
    DirectionalLight, MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS, PointLight, Renderer,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entity::Entity;

/// Stable handle to an entity owned by a [`Scene`].
///
/// Handles are allocated in increasing order and never reused, so a handle to
/// a removed entity simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(pub u64);

/// Entities, lights and the current selection.
///
/// Uses BTreeMap keyed by monotonically increasing handles, so iteration order
/// is insertion order. The scene owns its entities; models are shared.
#[derive(Debug, Default)]
pub struct Scene {
    entities: BTreeMap<EntityHandle, Entity>,
    next_handle: u64,
    point_lights: Vec<PointLight>,
    directional_lights: Vec<DirectionalLight>,
    selected: Option<EntityHandle>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, entity: Entity) -> EntityHandle {
        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        self.entities.insert(handle, entity);
        handle
    }

    /// Remove an entity. Clears the selection if it pointed at this entity.
    pub fn remove_entity(&mut self, handle: EntityHandle) -> Option<Entity> {
        let removed = self.entities.remove(&handle);
        if removed.is_some() && self.selected == Some(handle) {
            self.selected = None;
        }
        removed
    }

    pub fn entity(&self, handle: EntityHandle) -> Option<&Entity> {
        self.entities.get(&handle)
    }

    pub fn entity_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.entities.get_mut(&handle)
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityHandle, &Entity)> {
        self.entities.iter().map(|(h, e)| (*h, e))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn add_point_light(&mut self, light: PointLight) -> usize {
        self.point_lights.push(light);
        self.point_lights.len() - 1
    }

    pub fn add_directional_light(&mut self, light: DirectionalLight) -> usize {
        self.directional_lights.push(light);
        self.directional_lights.len() - 1
    }

    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    pub fn point_lights_mut(&mut self) -> &mut [PointLight] {
        &mut self.point_lights
    }

    pub fn directional_lights(&self) -> &[DirectionalLight] {
        &self.directional_lights
    }

    pub fn directional_lights_mut(&mut self) -> &mut [DirectionalLight] {
        &mut self.directional_lights
    }

    pub fn selected(&self) -> Option<EntityHandle> {
        self.selected
    }

    pub fn selected_entity(&self) -> Option<&Entity> {
        self.selected.and_then(|h| self.entities.get(&h))
    }

    pub fn clear_selection(&mut self) {
        if let Some(e) = self.selected.take().and_then(|h| self.entities.get_mut(&h)) {
            e.set_selected(false);
        }
    }

    /// Push light uniforms (directional first, then point, each in index
    /// order) and draw every entity in insertion order.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        if self.directional_lights.len() > MAX_DIRECTIONAL_LIGHTS {
            tracing::warn!(
                count = self.directional_lights.len(),
                max = MAX_DIRECTIONAL_LIGHTS,
                "too many directional lights, extra lights skipped"
            );
        }
        for (i, light) in self
            .directional_lights
            .iter()
            .take(MAX_DIRECTIONAL_LIGHTS)
            .enumerate()
        {
            renderer.set_directional_light(i, light);
        }

        if self.point_lights.len() > MAX_POINT_LIGHTS {
            tracing::warn!(
                count = self.point_lights.len(),
                max = MAX_POINT_LIGHTS,
                "too many point lights, extra lights skipped"
            );
        }
        for (i, light) in self.point_lights.iter().take(MAX_POINT_LIGHTS).enumerate() {
            renderer.set_point_light(i, light);
        }

        for entity in self.entities.values() {
            entity.draw(renderer);
        }
    }

    /// Select the entity whose pick shape the ray hits first.
    ///
    /// Every entity's flag is cleared before testing, so a miss drops the
    /// previous selection. Ties keep the earliest entity. Returns whether an
    /// entity is selected afterwards.
    pub fn select_by_ray_cast(&mut self, origin: Vec3, direction: Vec3) -> bool {
        self.selected = None;

        let mut min_t = NO_HIT;
        let mut best = None;
        for (handle, entity) in self.entities.iter_mut() {
            entity.set_selected(false);
            let t = entity.ray_test(origin, direction);
            if t < min_t {
                min_t = t;
                best = Some(*handle);
            }
        }

        let Some(handle) = best else {
            tracing::debug!("ray cast selected nothing");
            return false;
        };
        if let Some(entity) = self.entities.get_mut(&handle) {
            entity.set_selected(true);
        }
        self.selected = Some(handle);
        tracing::debug!(handle = handle.0, distance = min_t, "ray cast selected entity");
        true
    }

    /// Move the selected entity to where the ray meets the plane through its
    /// current position with the given normal. Returns false when nothing is
    /// selected or the ray is parallel to the plane.
    pub fn drag_selected(&mut self, origin: Vec3, direction: Vec3, plane_normal: Vec3) -> bool {
        let Some(entity) = self.selected.and_then(|h| self.entities.get_mut(&h)) else {
            return false;
        };
        let plane = Plane::point_normal(entity.position(), plane_normal);
        let t = plane.ray_test(origin, direction);
        if !t.is_finite() {
            return false;
        }
        entity.set_position(origin + direction * t);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_render::{MeshHandle, Model, RecordingRenderer, RenderCommand};
    use std::rc::Rc;

    fn entity_at(model: &Rc<Model>, pos: Vec3) -> Entity {
        let mut e = Entity::from_model(Rc::clone(model));
        e.set_position(pos);
        e
    }

    fn cube() -> Rc<Model> {
        Rc::new(Model::new("cube", MeshHandle(0)))
    }

    fn selected_count(scene: &Scene) -> usize {
        scene.entities().filter(|(_, e)| e.is_selected()).count()
    }

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new();
        assert_eq!(s.entity_count(), 0);
        assert!(s.selected().is_none());
        assert!(s.point_lights().is_empty());
    }

    #[test]
    fn handles_are_unique_and_ordered() {
        let model = cube();
        let mut s = Scene::new();
        let a = s.add_entity(entity_at(&model, Vec3::ZERO));
        let b = s.add_entity(entity_at(&model, Vec3::X));
        assert!(a < b);
        s.remove_entity(a);
        let c = s.add_entity(entity_at(&model, Vec3::Y));
        assert!(b < c);
        assert!(s.entity(a).is_none());
        let order: Vec<_> = s.entities().map(|(h, _)| h).collect();
        assert_eq!(order, vec![b, c]);
    }

    #[test]
    fn picks_nearest_along_ray() {
        let model = cube();
        let mut s = Scene::new();
        let far = s.add_entity(entity_at(&model, Vec3::new(0.0, 0.0, -6.0)));
        let near = s.add_entity(entity_at(&model, Vec3::new(0.0, 0.0, -4.0)));
        // Sphere surfaces at t = 3.0 and t = 5.0 from the origin.
        assert!(s.select_by_ray_cast(Vec3::new(0.0, 0.0, 0.0), -Vec3::Z));
        assert_eq!(s.selected(), Some(near));
        assert!(s.entity(near).unwrap().is_selected());
        assert!(!s.entity(far).unwrap().is_selected());
    }

    #[test]
    fn insertion_order_does_not_bias_nearest() {
        let model = cube();
        let mut s = Scene::new();
        let near = s.add_entity(entity_at(&model, Vec3::new(0.0, 0.0, -4.0)));
        s.add_entity(entity_at(&model, Vec3::new(0.0, 0.0, -6.0)));
        s.select_by_ray_cast(Vec3::ZERO, -Vec3::Z);
        assert_eq!(s.selected(), Some(near));
    }

    #[test]
    fn ties_keep_earliest() {
        let model = cube();
        let mut s = Scene::new();
        let first = s.add_entity(entity_at(&model, Vec3::new(0.0, 0.0, -4.0)));
        s.add_entity(entity_at(&model, Vec3::new(0.0, 0.0, -4.0)));
        s.select_by_ray_cast(Vec3::ZERO, -Vec3::Z);
        assert_eq!(s.selected(), Some(first));
        assert_eq!(selected_count(&s), 1);
    }

    #[test]
    fn miss_clears_previous_selection() {
        let model = cube();
        let mut s = Scene::new();
        s.add_entity(entity_at(&model, Vec3::new(0.0, 0.0, -4.0)));
        assert!(s.select_by_ray_cast(Vec3::ZERO, -Vec3::Z));
        assert!(!s.select_by_ray_cast(Vec3::ZERO, Vec3::Y));
        assert!(s.selected().is_none());
        assert_eq!(selected_count(&s), 0);
    }

    #[test]
    fn reselect_moves_flag() {
        let model = cube();
        let mut s = Scene::new();
        let a = s.add_entity(entity_at(&model, Vec3::new(0.0, 0.0, -4.0)));
        let b = s.add_entity(entity_at(&model, Vec3::new(4.0, 0.0, 0.0)));
        s.select_by_ray_cast(Vec3::ZERO, -Vec3::Z);
        assert_eq!(s.selected(), Some(a));
        s.select_by_ray_cast(Vec3::ZERO, Vec3::X);
        assert_eq!(s.selected(), Some(b));
        assert_eq!(selected_count(&s), 1);
    }

    #[test]
    fn empty_scene_selects_nothing() {
        let mut s = Scene::new();
        assert!(!s.select_by_ray_cast(Vec3::ZERO, -Vec3::Z));
    }

    #[test]
    fn removing_selected_entity_clears_selection() {
        let model = cube();
        let mut s = Scene::new();
        let a = s.add_entity(entity_at(&model, Vec3::new(0.0, 0.0, -4.0)));
        s.select_by_ray_cast(Vec3::ZERO, -Vec3::Z);
        assert!(s.remove_entity(a).is_some());
        assert!(s.selected().is_none());
        assert!(s.selected_entity().is_none());
    }

    #[test]
    fn clear_selection_resets_flag() {
        let model = cube();
        let mut s = Scene::new();
        let a = s.add_entity(entity_at(&model, Vec3::new(0.0, 0.0, -4.0)));
        s.select_by_ray_cast(Vec3::ZERO, -Vec3::Z);
        s.clear_selection();
        assert!(s.selected().is_none());
        assert!(!s.entity(a).unwrap().is_selected());
    }

    #[test]
    fn at_most_one_entity_is_ever_flagged() {
        let model = cube();
        let mut s = Scene::new();
        for x in [-4.0, 0.0, 4.0] {
            s.add_entity(entity_at(&model, Vec3::new(x, 0.0, -4.0)));
        }
        for x in [-4.0, 0.0, 4.0, 0.0] {
            s.select_by_ray_cast(Vec3::new(x, 0.0, 0.0), -Vec3::Z);
            assert_eq!(selected_count(&s), 1);
            let flagged: Vec<_> = s
                .entities()
                .filter(|(_, e)| e.is_selected())
                .map(|(h, _)| h)
                .collect();
            assert_eq!(flagged, s.selected().into_iter().collect::<Vec<_>>());
        }
        s.clear_selection();
        assert_eq!(selected_count(&s), 0);
    }

    #[test]
    fn draw_pushes_lights_then_entities() {
        let model = cube();
        let mut s = Scene::new();
        s.add_point_light(PointLight::default());
        s.add_point_light(PointLight {
            radius: 3.0,
            ..PointLight::default()
        });
        s.add_directional_light(DirectionalLight::default());
        s.add_entity(entity_at(&model, Vec3::ZERO));
        s.add_entity(entity_at(&model, Vec3::X));

        let mut r = RecordingRenderer::new();
        s.draw(&mut r);

        let cmds = r.commands();
        assert!(matches!(cmds[0], RenderCommand::DirectionalLight(0, _)));
        assert!(matches!(cmds[1], RenderCommand::PointLight(0, _)));
        assert!(matches!(cmds[2], RenderCommand::PointLight(1, l) if l.radius == 3.0));
        assert_eq!(r.draw_calls(), 2);
        let translations: Vec<Vec3> = r
            .matrices_per_draw()
            .iter()
            .map(|m| m.w_axis.truncate())
            .collect();
        assert_eq!(translations, vec![Vec3::ZERO, Vec3::X]);
    }

    #[test]
    fn draw_highlights_only_selected() {
        let model = cube();
        let mut s = Scene::new();
        s.add_entity(entity_at(&model, Vec3::new(0.0, 0.0, -4.0)));
        s.add_entity(entity_at(&model, Vec3::new(5.0, 0.0, 0.0)));
        s.add_entity(entity_at(&model, Vec3::new(-5.0, 0.0, 0.0)));
        s.select_by_ray_cast(Vec3::ZERO, -Vec3::Z);

        let mut r = RecordingRenderer::new();
        s.draw(&mut r);
        assert_eq!(r.selection_per_draw(), vec![true, false, false]);
    }

    #[test]
    fn light_uniforms_are_capped() {
        let mut s = Scene::new();
        for _ in 0..(MAX_POINT_LIGHTS + 2) {
            s.add_point_light(PointLight::default());
        }
        let mut r = RecordingRenderer::new();
        s.draw(&mut r);
        let pushed = r
            .commands()
            .iter()
            .filter(|c| matches!(c, RenderCommand::PointLight(..)))
            .count();
        assert_eq!(pushed, MAX_POINT_LIGHTS);
    }

    #[test]
    fn drag_moves_selected_onto_plane() {
        let model = cube();
        let mut s = Scene::new();
        let a = s.add_entity(entity_at(&model, Vec3::new(0.0, 0.0, -4.0)));
        s.select_by_ray_cast(Vec3::ZERO, -Vec3::Z);

        // Plane z = -4 facing the viewer; aim slightly to the right.
        let dir = Vec3::new(0.5, 0.0, -1.0);
        assert!(s.drag_selected(Vec3::ZERO, dir, Vec3::Z));
        let p = s.entity(a).unwrap().position();
        assert!(p.abs_diff_eq(Vec3::new(2.0, 0.0, -4.0), 1e-5));
        assert_eq!(s.entity(a).unwrap().pick_shape().center(), p);
    }

    #[test]
    fn drag_without_selection_is_noop() {
        let mut s = Scene::new();
        assert!(!s.drag_selected(Vec3::ZERO, -Vec3::Z, Vec3::Z));
    }
}
