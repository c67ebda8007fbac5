use glam::{Vec2, Vec3, Vec4};
use labyrinth_animation::Bezier;
use labyrinth_render::{DirectionalLight, PointLight};
use labyrinth_scene::Scene;

/// Seconds for one trip around a light loop.
pub const LOOP_PERIOD: f64 = 5.0;

/// Phase offsets into the color curve for the three color channels.
const COLOR_PHASES: [f64; 3] = [0.0, 0.66, 0.33];

/// Closed loops on a ten-unit reference square, as `(x, height, z)`.
const LOOP_A: [(f32, f32, f32); 5] = [
    (2.0, 1.0, 2.0),
    (9.0, 1.0, 2.0),
    (9.0, 1.0, 9.0),
    (2.0, 1.0, 9.0),
    (2.0, 1.0, 2.0),
];
const LOOP_B: [(f32, f32, f32); 6] = [
    (8.0, 1.5, 2.0),
    (2.0, 1.5, 2.0),
    (2.0, 1.5, 8.0),
    (8.0, 1.5, 8.0),
    (2.0, 1.5, 2.0),
    (8.0, 1.5, 2.0),
];
const REFERENCE_EXTENT: f32 = 10.0;

/// One directional light plus two point lights that circle the maze while
/// cycling their colors.
#[derive(Debug, Clone)]
pub struct LightRig {
    paths: Vec<(usize, Bezier<Vec3>)>,
    color: Bezier<f32>,
}

impl LightRig {
    /// Add the rig's lights to `scene`. `extent` is the maze footprint in
    /// world units along x and z.
    pub fn install(scene: &mut Scene, extent: Vec2) -> Self {
        scene.add_directional_light(DirectionalLight {
            direction: Vec3::new(0.8, 2.0, 1.2),
            color: Vec4::splat(0.1),
            ambient: Vec4::ZERO,
            ..DirectionalLight::default()
        });

        let paths: Vec<(usize, Bezier<Vec3>)> = [&LOOP_A[..], &LOOP_B[..]]
            .into_iter()
            .map(|points| {
                let curve: Bezier<Vec3> = points
                    .iter()
                    .map(|&(x, y, z)| {
                        Vec3::new(
                            x * extent.x / REFERENCE_EXTENT,
                            y,
                            z * extent.y / REFERENCE_EXTENT,
                        )
                    })
                    .collect();
                let index = scene.add_point_light(PointLight {
                    position: curve.at(0.0).unwrap_or_default(),
                    color: Vec4::ONE,
                    ..PointLight::default()
                });
                (index, curve)
            })
            .collect();

        let rig = Self {
            paths,
            color: Bezier::new(vec![1.0, 0.0, 0.0, 1.0]),
        };
        rig.animate(scene, 0.0);
        rig
    }

    /// Indices of the point lights this rig drives.
    pub fn point_light_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.paths.iter().map(|(i, _)| *i)
    }

    /// Position of each driven light at `time` seconds.
    pub fn positions_at(&self, time: f64) -> Vec<Vec3> {
        let s = time / LOOP_PERIOD;
        self.paths
            .iter()
            .map(|(_, curve)| curve.at(s).unwrap_or_default())
            .collect()
    }

    /// Colors of the two driven lights at `time` seconds. The second light
    /// rotates the channels of the first.
    pub fn colors_at(&self, time: f64) -> [Vec4; 2] {
        let s = time / LOOP_PERIOD;
        let [a, b, c] = COLOR_PHASES.map(|phase| self.color.at(s + phase).unwrap_or(1.0));
        [Vec4::new(a, b, c, 1.0), Vec4::new(b, c, a, 1.0)]
    }

    /// Move and recolor the driven lights for `time` seconds.
    pub fn animate(&self, scene: &mut Scene, time: f64) {
        let positions = self.positions_at(time);
        let colors = self.colors_at(time);
        let lights = scene.point_lights_mut();
        for (slot, ((index, _), position)) in self.paths.iter().zip(positions).enumerate() {
            if let Some(light) = lights.get_mut(*index) {
                light.position = position;
                light.color = colors[slot % colors.len()];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rig() -> (Scene, LightRig) {
        let mut scene = Scene::new();
        let rig = LightRig::install(&mut scene, Vec2::splat(10.0));
        (scene, rig)
    }

    #[test]
    fn installs_one_directional_two_point() {
        let (scene, rig) = rig();
        assert_eq!(scene.directional_lights().len(), 1);
        assert_eq!(scene.point_lights().len(), 2);
        assert_eq!(rig.point_light_indices().collect::<Vec<_>>(), vec![0, 1]);
        let d = scene.directional_lights()[0];
        assert_eq!(d.direction, Vec3::new(0.8, 2.0, 1.2));
        assert_eq!(d.ambient, Vec4::ZERO);
    }

    #[test]
    fn loops_start_at_first_control_point() {
        let (scene, _) = rig();
        assert_eq!(scene.point_lights()[0].position, Vec3::new(2.0, 1.0, 2.0));
        assert_eq!(scene.point_lights()[1].position, Vec3::new(8.0, 1.5, 2.0));
    }

    #[test]
    fn loops_scale_with_extent() {
        let mut scene = Scene::new();
        LightRig::install(&mut scene, Vec2::new(20.0, 30.0));
        assert_eq!(scene.point_lights()[0].position, Vec3::new(4.0, 1.0, 6.0));
    }

    #[test]
    fn animation_is_periodic() {
        let (_, rig) = rig();
        let a = rig.positions_at(1.25);
        let b = rig.positions_at(1.25 + LOOP_PERIOD);
        for (p, q) in a.iter().zip(&b) {
            assert!(p.abs_diff_eq(*q, 1e-4));
        }
        assert_ne!(rig.positions_at(0.0)[0], rig.positions_at(1.0)[0]);
    }

    #[test]
    fn colors_rotate_channels() {
        let (_, rig) = rig();
        let [first, second] = rig.colors_at(0.0);
        assert_relative_eq!(first.x, 1.0);
        assert_eq!(second.x, first.y);
        assert_eq!(second.y, first.z);
        assert_eq!(second.z, first.x);
        assert_eq!(first.w, 1.0);
    }

    #[test]
    fn animate_writes_scene_lights() {
        let (mut scene, rig) = rig();
        rig.animate(&mut scene, 2.0);
        let expected = rig.positions_at(2.0);
        assert_eq!(scene.point_lights()[0].position, expected[0]);
        assert_eq!(scene.point_lights()[1].color, rig.colors_at(2.0)[1]);
    }
}
