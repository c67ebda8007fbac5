use glam::Vec2;

use crate::action::{Action, ActionState, FrameInput};

/// Errors from parsing an input script.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScriptError {
    #[error(
        "segment {index}: expected `keys:frames`, `pick:x:y`, `zoom:amount` or `debug`, \
         got {segment:?}"
    )]
    Malformed { index: usize, segment: String },
    #[error("segment {index}: unbound key {key:?}")]
    UnboundKey { index: usize, key: char },
    #[error("segment {index}: invalid number {value:?}")]
    InvalidNumber { index: usize, value: String },
}

/// Expand a compact input script into per-frame inputs.
///
/// Segments are comma separated:
/// - `keys:frames` holds the bound keys (may be empty) for `frames` frames,
/// - `pick:x:y` emits one idle frame with a pick click at window pixel `(x, y)`,
/// - `zoom:amount` emits one idle frame scrolling by `amount`,
/// - `debug` emits one idle frame that toggles the debug camera.
///
/// Example: `w:30,hj:10,:5,pick:512:384,debug,e:10,zoom:30`.
pub fn parse_script(script: &str, delta_time: f32) -> Result<Vec<FrameInput>, ScriptError> {
    let mut frames = Vec::new();
    for (index, segment) in script.split(',').map(str::trim).enumerate() {
        if segment.is_empty() {
            continue;
        }
        let parts: Vec<&str> = segment.split(':').collect();
        match parts.as_slice() {
            ["pick", x, y] => {
                let cursor = Vec2::new(parse_number(index, x)?, parse_number(index, y)?);
                frames.push(FrameInput {
                    pick: Some(cursor),
                    ..FrameInput::idle(delta_time)
                });
            }
            ["zoom", amount] => {
                frames.push(FrameInput {
                    scroll: parse_number(index, amount)?,
                    ..FrameInput::idle(delta_time)
                });
            }
            ["debug"] => {
                frames.push(FrameInput {
                    toggle_debug_camera: true,
                    ..FrameInput::idle(delta_time)
                });
            }
            [keys, count] => {
                let actions = keys
                    .chars()
                    .map(|key| Action::from_key(key).ok_or(ScriptError::UnboundKey { index, key }))
                    .collect::<Result<ActionState, _>>()?;
                let count: usize = count.parse().map_err(|_| ScriptError::InvalidNumber {
                    index,
                    value: (*count).to_string(),
                })?;
                frames.extend(
                    std::iter::repeat_with(|| FrameInput::with_actions(delta_time, actions.clone()))
                        .take(count),
                );
            }
            _ => {
                return Err(ScriptError::Malformed {
                    index,
                    segment: segment.to_string(),
                });
            }
        }
    }
    Ok(frames)
}

fn parse_number(index: usize, value: &str) -> Result<f32, ScriptError> {
    value.parse().map_err(|_| ScriptError::InvalidNumber {
        index,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_held_keys() {
        let frames = parse_script("w:3,hj:2", 0.5).unwrap();
        assert_eq!(frames.len(), 5);
        assert!(frames[0].actions.is_held(Action::MoveForward));
        assert!(frames[4].actions.is_held(Action::OrbitLeft));
        assert!(frames[4].actions.is_held(Action::TiltUp));
        assert!(frames.iter().all(|f| f.delta_time == 0.5));
    }

    #[test]
    fn empty_keys_are_idle_frames() {
        let frames = parse_script(":4", 0.1).unwrap();
        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|f| f.actions.is_empty()));
    }

    #[test]
    fn pick_segment() {
        let frames = parse_script("pick:512:384", 0.1).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].pick, Some(Vec2::new(512.0, 384.0)));
    }

    #[test]
    fn zoom_and_debug_segments() {
        let frames = parse_script("debug,eq:2,zoom:-2.5", 0.1).unwrap();
        assert_eq!(frames.len(), 4);
        assert!(frames[0].toggle_debug_camera);
        assert!(frames[1].actions.is_held(Action::FlyUp));
        assert!(frames[2].actions.is_held(Action::FlyDown));
        assert!(!frames[2].toggle_debug_camera);
        assert_eq!(frames[3].scroll, -2.5);
        assert!(matches!(
            parse_script("zoom:far", 0.1),
            Err(ScriptError::InvalidNumber { index: 0, .. })
        ));
    }

    #[test]
    fn empty_script_is_empty() {
        assert!(parse_script("", 0.1).unwrap().is_empty());
    }

    #[test]
    fn errors_name_the_segment() {
        assert_eq!(
            parse_script("w:1,q:2", 0.1),
            Err(ScriptError::UnboundKey { index: 1, key: 'q' })
        );
        assert!(matches!(
            parse_script("w:lots", 0.1),
            Err(ScriptError::InvalidNumber { index: 0, .. })
        ));
        assert!(matches!(
            parse_script("w", 0.1),
            Err(ScriptError::Malformed { index: 0, .. })
        ));
    }
}
