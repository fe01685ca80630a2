//! First-person flight navigation.
//!
//! [`FlyControls`] maps keyboard and mouse input to camera translation and
//! rotation. It holds no reference to any windowing system: the platform
//! layer feeds it [`InputEvent`] values and calls [`FlyControls::update`]
//! once per frame with the elapsed time.
//!
//! Bindings: `W`/`S` forward/back, `A`/`D` left/right, `R`/`F` up/down,
//! arrow keys pitch/yaw, `Q`/`E` roll, Shift slows movement to a tenth.
//! Without drag-to-look, the left/right mouse buttons drive forward/back;
//! with it, looking only follows the mouse while a button is held.

use std::f32::consts::PI;

use nalgebra::UnitQuaternion;

use crate::input::{InputEvent, KeyCode, MouseButton};
use crate::math::{mat4_from_scale_rotation_translation, quat_from_xyzw, Mat4, Vec3};

/// Per-axis movement intent, set by key and mouse handlers.
///
/// Key-driven fields are 0 or 1; mouse-driven yaw/pitch are analog.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct MoveState {
    up: f32,
    down: f32,
    left: f32,
    right: f32,
    forward: f32,
    back: f32,
    pitch_up: f32,
    pitch_down: f32,
    yaw_left: f32,
    yaw_right: f32,
    roll_left: f32,
    roll_right: f32,
}

impl MoveState {
    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Flight navigation controller: integrates buffered input into a camera
/// position and orientation.
#[derive(Debug, Clone)]
pub struct FlyControls {
    /// Translation speed in world units per second.
    pub movement_speed: f32,
    /// Rotation speed in radians per second at full deflection.
    pub roll_speed: f32,
    /// Scale applied to relative mouse deltas when looking.
    pub mouse_speed: f32,
    /// Keep moving forward without input (unless backing up).
    pub auto_forward: bool,
    /// Only follow the mouse while a button is held.
    pub drag_to_look: bool,
    /// Ignore all input and updates while false.
    pub enabled: bool,

    position: Vec3,
    orientation: UnitQuaternion<f32>,
    speed_multiplier: f32,
    alt_held: bool,
    drag_depth: u32,
    state: MoveState,
    movement: Vec3,
    rotation: Vec3,
}

impl FlyControls {
    /// Create a controller at the origin with the default tunables.
    pub fn new() -> Self {
        Self {
            movement_speed: 1000.0,
            roll_speed: PI / 24.0,
            mouse_speed: 0.05,
            auto_forward: false,
            drag_to_look: false,
            enabled: true,
            position: Vec3::zeros(),
            orientation: UnitQuaternion::identity(),
            speed_multiplier: 1.0,
            alt_held: false,
            drag_depth: 0,
            state: MoveState::default(),
            movement: Vec3::zeros(),
            rotation: Vec3::zeros(),
        }
    }

    /// Current camera position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current camera orientation.
    pub fn orientation(&self) -> UnitQuaternion<f32> {
        self.orientation
    }

    /// Place the camera.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Orient the camera.
    pub fn set_orientation(&mut self, orientation: UnitQuaternion<f32>) {
        self.orientation = orientation;
    }

    /// Camera world matrix (rotation + translation, unit scale).
    pub fn transform(&self) -> Mat4 {
        mat4_from_scale_rotation_translation(
            Vec3::new(1.0, 1.0, 1.0),
            self.orientation.into_inner(),
            self.position,
        )
    }

    /// Feed one input event into the controller.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if !self.enabled {
            return;
        }
        match *event {
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::MouseDown(button) => self.mouse_down(button),
            InputEvent::MouseUp(button) => self.mouse_up(button),
            InputEvent::MouseMove { dx, dy } => self.mouse_move(dx, dy),
        }
    }

    /// Advance the camera by `dt` seconds of the current movement intent.
    pub fn update(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }

        let move_mult = dt * self.movement_speed * self.speed_multiplier;
        let rot_mult = dt * self.roll_speed;

        // Translate along the locally-oriented movement vector.
        self.position += self.orientation * (self.movement * move_mult);

        // Incremental rotation: small per-axis angles packed into a
        // quaternion with w = 1, normalized before composition.
        let dq = quat_from_xyzw(
            self.rotation.x * rot_mult,
            self.rotation.y * rot_mult,
            self.rotation.z * rot_mult,
            1.0,
        );
        self.orientation = UnitQuaternion::from_quaternion(self.orientation.into_inner() * dq);
    }

    /// Clear all movement intent and the speed multiplier.
    pub fn reset(&mut self) {
        self.speed_multiplier = 1.0;
        self.state.clear();
        self.update_movement_vector();
        self.update_rotation_vector();
    }

    fn key_down(&mut self, key: KeyCode) {
        if key.is_alt() {
            self.alt_held = true;
            return;
        }
        // Alt-chords belong to the host application, not the camera.
        if self.alt_held {
            return;
        }
        if key.is_shift() {
            self.speed_multiplier = 0.1;
            return;
        }
        match key {
            KeyCode::W => self.state.forward = 1.0,
            KeyCode::S => self.state.back = 1.0,
            KeyCode::A => self.state.left = 1.0,
            KeyCode::D => self.state.right = 1.0,
            KeyCode::R => self.state.up = 1.0,
            KeyCode::F => self.state.down = 1.0,
            KeyCode::ArrowUp => self.state.pitch_up = 1.0,
            KeyCode::ArrowDown => self.state.pitch_down = 1.0,
            KeyCode::ArrowLeft => self.state.yaw_left = 1.0,
            KeyCode::ArrowRight => self.state.yaw_right = 1.0,
            KeyCode::Q => self.state.roll_left = 1.0,
            KeyCode::E => self.state.roll_right = 1.0,
            _ => return,
        }
        self.update_movement_vector();
        self.update_rotation_vector();
    }

    fn key_up(&mut self, key: KeyCode) {
        if key.is_alt() {
            self.alt_held = false;
            return;
        }
        if key.is_shift() {
            self.speed_multiplier = 1.0;
            return;
        }
        match key {
            KeyCode::W => self.state.forward = 0.0,
            KeyCode::S => self.state.back = 0.0,
            KeyCode::A => self.state.left = 0.0,
            KeyCode::D => self.state.right = 0.0,
            KeyCode::R => self.state.up = 0.0,
            KeyCode::F => self.state.down = 0.0,
            KeyCode::ArrowUp => self.state.pitch_up = 0.0,
            KeyCode::ArrowDown => self.state.pitch_down = 0.0,
            KeyCode::ArrowLeft => self.state.yaw_left = 0.0,
            KeyCode::ArrowRight => self.state.yaw_right = 0.0,
            KeyCode::Q => self.state.roll_left = 0.0,
            KeyCode::E => self.state.roll_right = 0.0,
            _ => return,
        }
        self.update_movement_vector();
        self.update_rotation_vector();
    }

    fn mouse_down(&mut self, button: MouseButton) {
        if self.drag_to_look {
            self.drag_depth += 1;
            return;
        }
        match button {
            MouseButton::Left => self.state.forward = 1.0,
            MouseButton::Right => self.state.back = 1.0,
            MouseButton::Middle => return,
        }
        self.update_movement_vector();
    }

    fn mouse_up(&mut self, button: MouseButton) {
        if self.drag_to_look {
            self.drag_depth = self.drag_depth.saturating_sub(1);
            self.state.yaw_left = 0.0;
            self.state.pitch_down = 0.0;
        } else {
            match button {
                MouseButton::Left => self.state.forward = 0.0,
                MouseButton::Right => self.state.back = 0.0,
                MouseButton::Middle => return,
            }
            self.update_movement_vector();
        }
        self.update_rotation_vector();
    }

    fn mouse_move(&mut self, dx: f32, dy: f32) {
        if !self.drag_to_look || self.drag_depth > 0 {
            self.state.yaw_left = -dx * self.mouse_speed;
            self.state.pitch_down = dy * self.mouse_speed;
            self.update_rotation_vector();
        }
    }

    fn update_movement_vector(&mut self) {
        let forward = if self.state.forward > 0.0 || (self.auto_forward && self.state.back <= 0.0)
        {
            1.0
        } else {
            0.0
        };
        self.movement.x = -self.state.left + self.state.right;
        self.movement.y = -self.state.down + self.state.up;
        self.movement.z = -forward + self.state.back;
    }

    fn update_rotation_vector(&mut self) {
        self.rotation.x = -self.state.pitch_down + self.state.pitch_up;
        self.rotation.y = -self.state.yaw_right + self.state.yaw_left;
        self.rotation.z = -self.state.roll_right + self.state.roll_left;
    }
}

impl Default for FlyControls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_key_moves_along_negative_z() {
        let mut controls = FlyControls::new();
        controls.movement_speed = 1.0;
        controls.handle_event(&InputEvent::KeyDown(KeyCode::W));
        controls.update(1.0);
        assert!((controls.position().z - (-1.0)).abs() < 1e-6);
        assert_eq!(controls.position().x, 0.0);
    }

    #[test]
    fn key_release_stops_motion() {
        let mut controls = FlyControls::new();
        controls.movement_speed = 1.0;
        controls.handle_event(&InputEvent::KeyDown(KeyCode::D));
        controls.update(1.0);
        controls.handle_event(&InputEvent::KeyUp(KeyCode::D));
        let before = controls.position();
        controls.update(1.0);
        assert_eq!(controls.position(), before);
    }

    #[test]
    fn shift_slows_movement() {
        let mut controls = FlyControls::new();
        controls.movement_speed = 1.0;
        controls.handle_event(&InputEvent::KeyDown(KeyCode::ShiftLeft));
        controls.handle_event(&InputEvent::KeyDown(KeyCode::W));
        controls.update(1.0);
        assert!((controls.position().z - (-0.1)).abs() < 1e-6);

        controls.handle_event(&InputEvent::KeyUp(KeyCode::ShiftLeft));
        controls.update(1.0);
        assert!((controls.position().z - (-1.1)).abs() < 1e-6);
    }

    #[test]
    fn auto_forward_without_input() {
        let mut controls = FlyControls::new();
        controls.movement_speed = 1.0;
        controls.auto_forward = true;
        // Movement vector refreshes on the next input event.
        controls.handle_event(&InputEvent::KeyDown(KeyCode::A));
        controls.handle_event(&InputEvent::KeyUp(KeyCode::A));
        controls.update(1.0);
        assert!(controls.position().z < 0.0);
    }

    #[test]
    fn roll_rotates_about_local_z() {
        let mut controls = FlyControls::new();
        controls.handle_event(&InputEvent::KeyDown(KeyCode::Q));
        controls.update(1.0);
        // Positive roll sends the local X axis toward +Y.
        let x_axis = controls.orientation() * Vec3::new(1.0, 0.0, 0.0);
        assert!(x_axis.y > 0.0);
        assert!((x_axis.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn mouse_buttons_drive_forward_back() {
        let mut controls = FlyControls::new();
        controls.movement_speed = 1.0;
        controls.handle_event(&InputEvent::MouseDown(MouseButton::Left));
        controls.update(1.0);
        assert!(controls.position().z < 0.0);
        controls.handle_event(&InputEvent::MouseUp(MouseButton::Left));
        let before = controls.position();
        controls.update(1.0);
        assert_eq!(controls.position(), before);
    }

    #[test]
    fn drag_to_look_gates_mouse_look() {
        let mut controls = FlyControls::new();
        controls.drag_to_look = true;

        controls.handle_event(&InputEvent::MouseMove { dx: 10.0, dy: 0.0 });
        controls.update(1.0);
        assert!(controls.orientation().angle() < 1e-6);

        controls.handle_event(&InputEvent::MouseDown(MouseButton::Left));
        controls.handle_event(&InputEvent::MouseMove { dx: 10.0, dy: 0.0 });
        controls.update(1.0);
        assert!(controls.orientation().angle() > 1e-4);

        // Release zeroes the mouse-driven axes.
        let oriented = controls.orientation();
        controls.handle_event(&InputEvent::MouseUp(MouseButton::Left));
        controls.update(1.0);
        assert!(controls.orientation().angle_to(&oriented) < 1e-6);
    }

    #[test]
    fn alt_chords_do_not_steer() {
        let mut controls = FlyControls::new();
        controls.movement_speed = 1.0;
        controls.handle_event(&InputEvent::KeyDown(KeyCode::AltLeft));
        controls.handle_event(&InputEvent::KeyDown(KeyCode::W));
        controls.update(1.0);
        assert_eq!(controls.position(), Vec3::zeros());

        // Releasing Alt restores normal steering. The key-up for W is
        // still honored even though its key-down was swallowed.
        controls.handle_event(&InputEvent::KeyUp(KeyCode::W));
        controls.handle_event(&InputEvent::KeyUp(KeyCode::AltLeft));
        controls.handle_event(&InputEvent::KeyDown(KeyCode::W));
        controls.update(1.0);
        assert!((controls.position().z - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn disabled_ignores_input_and_updates() {
        let mut controls = FlyControls::new();
        controls.enabled = false;
        controls.handle_event(&InputEvent::KeyDown(KeyCode::W));
        controls.update(1.0);
        assert_eq!(controls.position(), Vec3::zeros());
    }

    #[test]
    fn reset_clears_movement() {
        let mut controls = FlyControls::new();
        controls.movement_speed = 1.0;
        controls.handle_event(&InputEvent::KeyDown(KeyCode::ShiftLeft));
        controls.handle_event(&InputEvent::KeyDown(KeyCode::W));
        controls.reset();
        controls.update(1.0);
        assert_eq!(controls.position(), Vec3::zeros());
    }

    #[test]
    fn transform_matches_position() {
        let mut controls = FlyControls::new();
        controls.set_position(Vec3::new(1.0, 2.0, 3.0));
        let m = controls.transform();
        assert_eq!(m[(0, 3)], 1.0);
        assert_eq!(m[(1, 3)], 2.0);
        assert_eq!(m[(2, 3)], 3.0);
    }
}
