use labyrinth_camera::Camera;
use labyrinth_input::FrameInput;
use labyrinth_render::Renderer;
use labyrinth_scene::EntityHandle;
use std::rc::Rc;

use crate::builder::Level;
use crate::debug::DebugView;

/// What happened during one [`Session::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    /// Seconds since the session started.
    pub time: f64,
    /// Selection after a pick request, `None` when no pick was requested.
    pub picked: Option<Option<EntityHandle>>,
    /// Whether a drag request moved the selected entity.
    pub dragged: bool,
    pub reached_end: bool,
}

/// Headless frame loop over a built [`Level`].
///
/// Frames are seen through the player's orbit camera, or through the
/// free-fly [`DebugView`] while it is enabled.
#[derive(Debug)]
pub struct Session {
    level: Level,
    debug_view: Option<DebugView>,
    time: f64,
    frame: u64,
}

impl Session {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            debug_view: None,
            time: 0.0,
            frame: 0,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn debug_view(&self) -> Option<&DebugView> {
        self.debug_view.as_ref()
    }

    /// Camera used for drawing and picking this frame.
    pub fn active_camera(&self) -> &Camera {
        match &self.debug_view {
            Some(view) => view.camera(),
            None => self.level.player().camera(),
        }
    }

    /// Enable the debug camera, starting from the player's current view, or
    /// drop it and return to the player camera.
    pub fn set_debug_camera(&mut self, enabled: bool) {
        if enabled == self.debug_view.is_some() {
            return;
        }
        self.debug_view = enabled.then(|| DebugView::from_camera(self.level.player().camera()));
        tracing::info!(enabled, frame = self.frame, "debug camera toggled");
    }

    /// Advance one frame and issue its draws.
    ///
    /// Order: clock, debug toggle, player or debug camera, zoom, pick, drag,
    /// light animation, camera uniforms, scene draw, player draw, light
    /// gizmos (debug camera only).
    ///
    /// A negative `delta_time` counts as zero for both the clock and movement.
    pub fn step<R: Renderer + ?Sized>(
        &mut self,
        input: &FrameInput,
        renderer: &mut R,
    ) -> FrameReport {
        let _span = tracing::debug_span!("session_step", frame = self.frame).entered();

        let input = FrameInput {
            delta_time: input.delta_time.max(0.0),
            ..input.clone()
        };
        self.time += f64::from(input.delta_time);
        if input.toggle_debug_camera {
            self.set_debug_camera(self.debug_view.is_none());
        }

        let viewport = self.level.config().viewport;
        let gizmo = Rc::clone(self.level.light_gizmo());
        let (scene, player, lights) = self.level.parts_mut();

        let camera = match self.debug_view.as_mut() {
            Some(view) => {
                view.fly(&input);
                view.camera_mut()
            }
            None => {
                player.update(&input);
                player.camera_mut()
            }
        };
        if input.scroll != 0.0 {
            camera.zoom_by(input.scroll);
        }
        let camera: &Camera = camera;

        let picked = input.pick.map(|cursor| {
            let ray = camera.screen_ray(cursor, viewport);
            scene.select_by_ray_cast(ray.origin, ray.direction);
            scene.selected()
        });

        let dragged = input.drag.is_some_and(|cursor| {
            let ray = camera.screen_ray(cursor, viewport);
            scene.drag_selected(ray.origin, ray.direction, camera.front())
        });

        lights.animate(scene, self.time);

        renderer.set_camera(&camera.uniforms());
        scene.draw(renderer);
        player.draw(renderer);
        if self.debug_view.is_some() {
            DebugView::draw_light_gizmos(scene, &gizmo, renderer);
        }

        let report = FrameReport {
            frame: self.frame,
            time: self.time,
            picked,
            dragged,
            reached_end: self.level.player_reached_end(),
        };
        self.frame += 1;
        report
    }

    /// Run every input in order, calling `clear` on the renderer before each
    /// frame. Returns the last report.
    pub fn run<R, C>(
        &mut self,
        inputs: &[FrameInput],
        renderer: &mut R,
        mut clear: C,
    ) -> Option<FrameReport>
    where
        R: Renderer + ?Sized,
        C: FnMut(&mut R),
    {
        let _span = tracing::info_span!("session_run", frames = inputs.len()).entered();
        let mut last = None;
        for input in inputs {
            clear(&mut *renderer);
            last = Some(self.step(input, &mut *renderer));
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::LevelModels;
    use crate::config::LevelConfig;
    use glam::{Vec2, Vec3};
    use labyrinth_input::{Action, ActionState};
    use labyrinth_render::{RecordingRenderer, RenderCommand};

    fn session() -> Session {
        let level = Level::build(&LevelConfig::default(), &LevelModels::headless()).unwrap();
        Session::new(level)
    }

    #[test]
    fn idle_step_draws_every_tile_and_player() {
        let mut s = session();
        let mut r = RecordingRenderer::new();
        let report = s.step(&FrameInput::idle(0.016), &mut r);
        assert_eq!(r.draw_calls(), 21 * 21 + 1);
        assert!(matches!(r.commands()[0], RenderCommand::Camera(_)));
        assert_eq!(report.frame, 0);
        assert_eq!(report.picked, None);
        assert!(!report.dragged);
        assert_eq!(s.frame(), 1);
    }

    #[test]
    fn lights_are_pushed_before_draws() {
        let mut s = session();
        let mut r = RecordingRenderer::new();
        s.step(&FrameInput::idle(0.016), &mut r);
        let first_draw = r
            .commands()
            .iter()
            .position(|c| matches!(c, RenderCommand::Draw { .. }))
            .unwrap();
        let lights = r.commands()[..first_draw]
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    RenderCommand::PointLight(..) | RenderCommand::DirectionalLight(..)
                )
            })
            .count();
        assert_eq!(lights, 3);
    }

    #[test]
    fn clock_advances_and_lights_move() {
        let mut s = session();
        let mut r = RecordingRenderer::new();
        let before = s.level().scene().point_lights()[0].position;
        s.step(&FrameInput::idle(1.0), &mut r);
        assert_eq!(s.time(), 1.0);
        assert_ne!(s.level().scene().point_lights()[0].position, before);
    }

    #[test]
    fn movement_intent_moves_player() {
        let mut s = session();
        let mut r = RecordingRenderer::new();
        let start = s.level().player().position();
        let actions: ActionState = [Action::MoveForward].into_iter().collect();
        s.step(&FrameInput::with_actions(0.5, actions), &mut r);
        assert_ne!(s.level().player().position(), start);
    }

    #[test]
    fn center_pick_selects_then_drag_moves() {
        let mut s = session();
        let mut r = RecordingRenderer::new();
        let center = s.level().config().viewport / 2.0;
        let report = s.step(
            &FrameInput {
                pick: Some(center),
                ..FrameInput::idle(0.016)
            },
            &mut r,
        );
        let Some(Some(handle)) = report.picked else {
            panic!("center of the screen should hit a tile");
        };
        assert_eq!(s.level().scene().selected(), Some(handle));
        assert_eq!(r.selection_per_draw().iter().filter(|s| **s).count(), 1);

        let report = s.step(
            &FrameInput {
                drag: Some(center + Vec2::new(40.0, 0.0)),
                ..FrameInput::idle(0.016)
            },
            &mut r,
        );
        assert!(report.dragged);
    }

    #[test]
    fn drag_without_selection_is_noop() {
        let mut s = session();
        let mut r = RecordingRenderer::new();
        let report = s.step(
            &FrameInput {
                drag: Some(Vec2::new(100.0, 100.0)),
                ..FrameInput::idle(0.016)
            },
            &mut r,
        );
        assert!(!report.dragged);
    }

    #[test]
    fn run_clears_between_frames() {
        let mut s = session();
        let mut r = RecordingRenderer::new();
        let inputs = vec![FrameInput::idle(0.1); 3];
        let last = s.run(&inputs, &mut r, RecordingRenderer::clear).unwrap();
        assert_eq!(last.frame, 2);
        assert_eq!(r.draw_calls(), 21 * 21 + 1);
        assert!((s.time() - 0.3).abs() < 1e-6);
    }

    fn toggle() -> FrameInput {
        FrameInput {
            toggle_debug_camera: true,
            ..FrameInput::idle(0.016)
        }
    }

    fn eye(r: &RecordingRenderer) -> Vec3 {
        r.commands()
            .iter()
            .find_map(|c| match c {
                RenderCommand::Camera(u) => Some(u.eye),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn negative_delta_neither_moves_nor_ticks() {
        let mut s = session();
        let mut r = RecordingRenderer::new();
        let start = s.level().player().position();
        let actions: ActionState = [Action::MoveForward].into_iter().collect();
        s.step(&FrameInput::with_actions(-0.5, actions), &mut r);
        assert_eq!(s.time(), 0.0);
        assert_eq!(s.level().player().position(), start);
    }

    #[test]
    fn debug_camera_flies_while_player_waits() {
        let mut s = session();
        let mut r = RecordingRenderer::new();
        s.step(&toggle(), &mut r);
        let view_start = s.debug_view().unwrap().camera().position();
        let player_start = s.level().player().position();

        let actions: ActionState = [Action::MoveForward, Action::FlyUp].into_iter().collect();
        s.step(&FrameInput::with_actions(0.5, actions), &mut r);

        assert_eq!(s.level().player().position(), player_start);
        let moved = s.debug_view().unwrap().camera().position();
        assert_ne!(moved, view_start);
        assert_eq!(s.active_camera().position(), moved);
    }

    #[test]
    fn debug_view_draws_light_gizmos_from_its_camera() {
        let mut s = session();
        let mut r = RecordingRenderer::new();
        s.step(&toggle(), &mut r);
        let lights = s.level().scene().point_lights().len();
        assert_eq!(r.draw_calls(), 21 * 21 + 1 + lights);

        r.clear();
        let actions: ActionState = [Action::FlyUp].into_iter().collect();
        s.step(&FrameInput::with_actions(1.0, actions), &mut r);
        assert_eq!(eye(&r), s.debug_view().unwrap().camera().position());
        assert_ne!(eye(&r), s.level().player().camera().position());
    }

    #[test]
    fn toggling_back_restores_player_camera() {
        let mut s = session();
        let mut r = RecordingRenderer::new();
        s.step(&toggle(), &mut r);
        s.step(&toggle(), &mut r);
        assert!(s.debug_view().is_none());

        r.clear();
        s.step(&FrameInput::idle(0.016), &mut r);
        assert_eq!(r.draw_calls(), 21 * 21 + 1);
        assert_eq!(eye(&r), s.level().player().camera().position());
    }

    #[test]
    fn scroll_zooms_the_active_camera() {
        let mut s = session();
        let mut r = RecordingRenderer::new();
        let scroll = |amount| FrameInput {
            scroll: amount,
            ..FrameInput::idle(0.016)
        };

        s.step(&FrameInput::idle(0.016), &mut r);
        assert_eq!(s.active_camera().zoom(), 70.0);
        s.step(&scroll(1.0), &mut r);
        s.step(&scroll(5.0), &mut r);
        assert_eq!(s.level().player().camera().zoom(), 40.0);

        s.step(&toggle(), &mut r);
        s.step(&scroll(10.0), &mut r);
        assert_eq!(s.active_camera().zoom(), 30.0);
        assert_eq!(s.level().player().camera().zoom(), 40.0);
    }
}
