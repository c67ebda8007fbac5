use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A decoded input intent. The player and camera consume intents, never raw
/// device events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    /// Orbit the camera counter-clockwise around the player.
    OrbitLeft,
    OrbitRight,
    /// Raise the orbit camera (increase polar angle).
    TiltUp,
    TiltDown,
    /// Raise the free-fly debug camera. Ignored by the player.
    FlyUp,
    FlyDown,
}

impl Action {
    /// Default keyboard binding: WASD to move, HJKL to orbit and tilt, E and Q
    /// to fly up and down.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Self::MoveForward),
            's' => Some(Self::MoveBackward),
            'a' => Some(Self::StrafeLeft),
            'd' => Some(Self::StrafeRight),
            'h' => Some(Self::OrbitLeft),
            'l' => Some(Self::OrbitRight),
            'j' => Some(Self::TiltUp),
            'k' => Some(Self::TiltDown),
            'e' => Some(Self::FlyUp),
            'q' => Some(Self::FlyDown),
            _ => None,
        }
    }
}

/// Set of intents held during a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    held: BTreeSet<Action>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.held.iter().copied()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl FromIterator<Action> for ActionState {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}

/// Everything the core reads from the outside world for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub delta_time: f32,
    pub actions: ActionState,
    /// Cursor position (window pixels, origin top-left) of a pick click.
    pub pick: Option<Vec2>,
    /// Cursor position while dragging the current selection.
    pub drag: Option<Vec2>,
    /// Scroll wheel offset; positive narrows the field of view.
    pub scroll: f32,
    /// Switch between the player camera and the free-fly debug camera.
    pub toggle_debug_camera: bool,
}

impl FrameInput {
    pub fn idle(delta_time: f32) -> Self {
        Self {
            delta_time,
            ..Self::default()
        }
    }

    pub fn with_actions(delta_time: f32, actions: ActionState) -> Self {
        Self {
            delta_time,
            actions,
            ..Self::default()
        }
    }
}
