use glam::Vec3;
use labyrinth_scene::{EntityHandle, Scene};

/// Scene inspector for developer tooling.
///
/// Read-only queries against a scene for debugging and CLI output.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene state.
    pub fn summary(scene: &Scene) -> SceneSummary {
        SceneSummary {
            entity_count: scene.entity_count(),
            point_lights: scene.point_lights().len(),
            directional_lights: scene.directional_lights().len(),
            lit_point_lights: scene.point_lights().iter().filter(|l| l.is_lit).count(),
            selected: scene.selected(),
        }
    }

    /// Transform, model and pick state of one entity.
    pub fn inspect_entity(scene: &Scene, handle: EntityHandle) -> Option<EntityInfo> {
        scene.entity(handle).map(|e| EntityInfo {
            handle,
            model: e.model().name.clone(),
            position: e.position(),
            rotation: e.rotation(),
            scale: e.scale(),
            pick_radius: e.pick_shape().bounding_radius(),
            selected: e.is_selected(),
        })
    }

    /// All entity handles in draw order.
    pub fn list_entities(scene: &Scene) -> Vec<EntityHandle> {
        scene.entities().map(|(h, _)| h).collect()
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub entity_count: usize,
    pub point_lights: usize,
    pub directional_lights: usize,
    pub lit_point_lights: usize,
    pub selected: Option<EntityHandle>,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: entities={} point_lights={} (lit {}) directional_lights={} selected=",
            self.entity_count, self.point_lights, self.lit_point_lights, self.directional_lights
        )?;
        match self.selected {
            Some(h) => write!(f, "#{}", h.0),
            None => write!(f, "none"),
        }
    }
}

/// Detailed info about a single entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityInfo {
    pub handle: EntityHandle,
    pub model: String,
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub pick_radius: f32,
    pub selected: bool,
}

impl std::fmt::Display for EntityInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (p, r, s) = (self.position, self.rotation, self.scale);
        write!(f, "Entity #{} [{}]", self.handle.0, self.model)?;
        write!(f, " pos=({:.2}, {:.2}, {:.2})", p.x, p.y, p.z)?;
        write!(f, " rot=({:.2}, {:.2}, {:.2})", r.x, r.y, r.z)?;
        write!(f, " scale=({:.2}, {:.2}, {:.2})", s.x, s.y, s.z)?;
        write!(f, " r={:.2}", self.pick_radius)?;
        if self.selected {
            write!(f, " selected")?;
        }
        Ok(())
    }
}
