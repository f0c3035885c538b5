//! Arcball camera controller.
//!
//! Raw pointer, wheel and key input is folded into a rotation quaternion and
//! a translation vector once per frame by [`Arcball::update`]. Pointer motion
//! is smoothed with a first-order low-pass filter, so a released drag keeps
//! rotating until the smoothed cursor reaches the release point.

use std::collections::BTreeSet;

use glam::{Quat, Vec2, Vec3};

use crate::math::{lerp_toward, point_to_sphere, quat_from_euler};
use crate::settings::ArcballSettings;
use crate::timer::Interval;

pub mod keys {
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
}

const FRAME_DELTA_SCALE: f32 = 0.01;
const FRAME_DELTA_MIN: f32 = 0.01;
const FRAME_DELTA_MAX: f32 = 0.99;
const LERP_SNAP: f32 = 1.0e-3;
const RESET_ROTATION_EPSILON: f32 = 1.0e-4;
const RESET_EPSILON: f32 = 1.0e-2;
/// Catch-up limit after a stalled frame clock: one second of decay.
const MAX_RESET_TICKS_PER_ADVANCE: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    None,
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// DOM-style button codes: 1 left, 2 middle, 3 right, anything else none.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            _ => MouseButton::None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            MouseButton::None => -1,
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcballMode {
    Idle,
    Rotating,
    Panning,
    Resetting,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcballViewport {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

/// Output of one [`Arcball::update`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcballFrame {
    pub rotation: Quat,
    pub translation: Vec3,
}

#[derive(Debug, Clone, Copy, Default)]
struct PointerState {
    press: Vec2,
    release: Vec2,
    moved: Vec2,
    lerp: Vec2,
    button: MouseButton,
    scroll: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereVectors {
    pub start: Vec3,
    pub end: Vec3,
    pub perpendicular: Vec3,
}

#[derive(Debug, Clone, Copy)]
struct RotationState {
    last: Quat,
    delta: Quat,
    current: Quat,
}

#[derive(Debug, Clone, Copy)]
struct TranslationState {
    last: Vec3,
    delta: Vec3,
    current: Vec3,
}

#[derive(Debug, Clone, Copy, Default)]
struct KeyboardAccumulators {
    add_rotation: Vec2,
    add_translation: Vec2,
    delta_rotation: Vec2,
    delta_translation: Vec2,
}

#[derive(Debug, Clone, Copy)]
struct ResetTimer {
    factor: f32,
    interval: Interval,
}

pub struct Arcball {
    settings: ArcballSettings,
    viewport: ArcballViewport,
    pointer: PointerState,
    keys: BTreeSet<u32>,
    sphere: SphereVectors,
    rotation: RotationState,
    translation: TranslationState,
    keyboard: KeyboardAccumulators,
    rotating: bool,
    reset: Option<ResetTimer>,
}

impl Arcball {
    /// `width`, `height` and the radius (which defaults to `height`) must be
    /// positive; the sphere mapping divides by them.
    pub fn new(width: f32, height: f32, radius: Option<f32>) -> Self {
        Self::with_initial(
            width,
            height,
            radius,
            Vec3::ZERO,
            Quat::IDENTITY,
            ArcballSettings::default(),
        )
    }

    pub fn with_initial(
        width: f32,
        height: f32,
        radius: Option<f32>,
        translation: Vec3,
        rotation: Quat,
        settings: ArcballSettings,
    ) -> Self {
        let viewport = make_viewport(width, height, radius);
        let scroll = translation
            .z
            .clamp(settings.scroll_min, settings.scroll_max);
        Self {
            settings,
            viewport,
            pointer: PointerState {
                scroll,
                ..PointerState::default()
            },
            keys: BTreeSet::new(),
            sphere: SphereVectors {
                start: Vec3::ZERO,
                end: Vec3::ZERO,
                perpendicular: Vec3::ZERO,
            },
            rotation: RotationState {
                last: rotation,
                delta: Quat::IDENTITY,
                current: rotation,
            },
            translation: TranslationState {
                last: translation,
                delta: Vec3::ZERO,
                current: translation,
            },
            keyboard: KeyboardAccumulators::default(),
            rotating: false,
            reset: None,
        }
    }

    /// Advances the controller by one animation frame.
    ///
    /// `frame_delta_ms` is scaled into a smoothing coefficient clamped to
    /// `[0.01, 0.99]`; 25 ms gives 0.25.
    pub fn update(&mut self, frame_delta_ms: f32) -> ArcballFrame {
        let frame_delta_ms = if frame_delta_ms.is_finite() {
            frame_delta_ms
        } else {
            self.settings.frame_delta
        };
        let frame_delta = (frame_delta_ms * FRAME_DELTA_SCALE).clamp(FRAME_DELTA_MIN, FRAME_DELTA_MAX);

        let pointer = &mut self.pointer;
        pointer.lerp = lerp_toward(pointer.lerp, pointer.moved, frame_delta);
        if (pointer.moved - pointer.lerp).abs().max_element() < LERP_SNAP {
            pointer.lerp = pointer.moved;
        }
        let lerp = pointer.lerp;
        let button = pointer.button;

        if button == MouseButton::Right || lerp == pointer.release {
            self.rotating = false;
        }

        if button == MouseButton::Left || self.rotating {
            let viewport = self.viewport;
            self.sphere.end = point_to_sphere(
                lerp.x,
                lerp.y,
                viewport.width,
                viewport.height,
                viewport.radius,
            );
            self.sphere.perpendicular = self.sphere.start.cross(self.sphere.end);
            self.rotation.delta = if self.sphere.perpendicular.length() > 0.0 {
                let p = self.sphere.perpendicular;
                Quat::from_xyzw(p.x, p.y, p.z, -self.sphere.start.dot(self.sphere.end))
            } else {
                Quat::IDENTITY
            };
            self.rotation.current = self.rotation.last * self.rotation.delta;
        } else {
            self.rotation.last = self.rotation.current;
        }

        let translation = &mut self.translation;
        if button == MouseButton::Right {
            let drag = self.pointer.moved - self.pointer.press;
            translation.delta.x = drag.x;
            translation.delta.y = drag.y;
            translation.current.x = translation.last.x + drag.x;
            translation.current.y = translation.last.y + drag.y;
        } else {
            translation.last.x = translation.current.x;
            translation.last.y = translation.current.y;
        }

        translation.delta.z = (self.pointer.scroll - translation.current.z) * self.settings.zoom_step;
        translation.current.z += translation.delta.z;

        self.accumulate_keys(frame_delta);

        let keyboard = &self.keyboard;
        self.rotation.delta = quat_from_euler(keyboard.delta_rotation.x, keyboard.delta_rotation.y, 0.0);

        ArcballFrame {
            rotation: self.rotation.delta * self.rotation.current,
            translation: keyboard.delta_translation.extend(0.0) + self.translation.current,
        }
    }

    fn accumulate_keys(&mut self, frame_delta: f32) {
        let rotation_step = frame_delta * self.settings.key_rotation_step;
        let translation_step = frame_delta * self.settings.key_translation_step;
        let held = |code: u32| self.keys.contains(&code);

        let mut add_rotation = self.keyboard.add_rotation;
        let mut add_translation = self.keyboard.add_translation;
        if held(keys::W) {
            add_rotation.x -= rotation_step;
        }
        if held(keys::S) {
            add_rotation.x += rotation_step;
        }
        if held(keys::A) {
            add_rotation.y -= rotation_step;
        }
        if held(keys::D) {
            add_rotation.y += rotation_step;
        }
        if held(keys::LEFT) {
            add_translation.x -= translation_step;
        }
        if held(keys::RIGHT) {
            add_translation.x += translation_step;
        }
        if held(keys::UP) {
            add_translation.y -= translation_step;
        }
        if held(keys::DOWN) {
            add_translation.y += translation_step;
        }

        let keyboard = &mut self.keyboard;
        keyboard.add_rotation = add_rotation;
        keyboard.add_translation = add_translation;
        keyboard.delta_rotation = lerp_toward(keyboard.delta_rotation, add_rotation, frame_delta);
        keyboard.delta_translation =
            lerp_toward(keyboard.delta_translation, add_translation, frame_delta);
    }

    pub fn mouse_down(&mut self, x: f32, y: f32, button: MouseButton) {
        self.stop();
        let position = Vec2::new(x, y);
        let pointer = &mut self.pointer;
        pointer.press = position;
        pointer.moved = position;
        pointer.release = position;
        pointer.lerp = position;
        pointer.button = button;
        self.rotating = false;

        self.rotation.last = self.rotation.current;
        self.translation.last = self.translation.current;
        let viewport = self.viewport;
        self.sphere.start = point_to_sphere(x, y, viewport.width, viewport.height, viewport.radius);
    }

    pub fn mouse_up(&mut self, x: f32, y: f32, _button: MouseButton) {
        let released = self.pointer.button;
        let position = Vec2::new(x, y);
        self.pointer.release = position;
        self.pointer.moved = position;
        self.pointer.button = MouseButton::None;
        if released == MouseButton::Left {
            self.rotating = true;
        }
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        if self.pointer.button != MouseButton::None {
            self.pointer.moved = Vec2::new(x, y);
        }
    }

    pub fn mouse_over(&mut self) {
        self.pointer.button = MouseButton::None;
    }

    /// Leaving the canvas releases a held button at the last tracked position.
    pub fn mouse_out(&mut self) {
        if self.pointer.button != MouseButton::None {
            let last = self.pointer.moved;
            self.mouse_up(last.x, last.y, self.pointer.button);
        }
    }

    pub fn mouse_scroll(&mut self, delta: f32) {
        self.stop();
        self.pointer.scroll = (self.pointer.scroll - delta * self.settings.scroll_speed)
            .clamp(self.settings.scroll_min, self.settings.scroll_max);
    }

    pub fn key_down(&mut self, code: u32) {
        self.stop();
        self.keys.insert(code);
    }

    pub fn key_up(&mut self, code: u32) {
        self.keys.remove(&code);
    }

    pub fn is_key_down(&self, code: u32) -> bool {
        self.keys.contains(&code)
    }

    pub fn set_scroll_bounds(&mut self, min: f32, max: f32) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.settings.scroll_min = min;
        self.settings.scroll_max = max;
        self.pointer.scroll = self.pointer.scroll.clamp(min, max);
    }

    pub fn set_scroll_speed(&mut self, speed: f32) {
        self.settings.scroll_speed = speed;
    }

    pub fn resize(&mut self, width: f32, height: f32, radius: Option<f32>) {
        self.viewport = make_viewport(width, height, radius);
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.keyboard.add_translation += Vec2::new(x, y);
    }

    pub fn rotate(&mut self, x: f32, y: f32) {
        self.keyboard.add_rotation += Vec2::new(x, y);
    }

    /// Positive amounts move the scene toward the viewer.
    pub fn zoom(&mut self, amount: f32) {
        self.pointer.scroll = (self.pointer.scroll + amount)
            .clamp(self.settings.scroll_min, self.settings.scroll_max);
    }

    /// Starts decaying every rotation and translation toward identity at 60 Hz.
    /// Does nothing while a reset is already running.
    ///
    /// A drag or inertia in progress is frozen where it is and held keys are
    /// released, so the decay starts from what is on screen.
    pub fn reset(&mut self, factor: f32) {
        if self.reset.is_some() {
            return;
        }
        self.pointer.button = MouseButton::None;
        self.rotating = false;
        self.rotation.last = self.rotation.current;
        self.translation.last = self.translation.current;
        self.keys.clear();
        self.reset = Some(ResetTimer {
            factor: factor.clamp(0.0, 0.999),
            interval: Interval::sixty_hz(),
        });
        tracing::debug!(factor, "arcball reset started");
    }

    /// Cancels a running reset. Safe to call when none is active.
    pub fn stop(&mut self) {
        if self.reset.take().is_some() {
            tracing::debug!("arcball reset cancelled");
        }
    }

    pub fn advance_timers(&mut self, elapsed_ms: f32) {
        let ticks = match self.reset.as_mut() {
            Some(timer) => timer.interval.advance(elapsed_ms),
            None => return,
        };
        for _ in 0..ticks.min(MAX_RESET_TICKS_PER_ADVANCE) {
            if !self.tick_reset() {
                break;
            }
        }
    }

    /// Runs one decay step; returns whether the reset is still in progress.
    pub fn tick_reset(&mut self) -> bool {
        let Some(timer) = self.reset else {
            return false;
        };
        let factor = timer.factor;

        let last = self.rotation.last.normalize();
        let step = Quat::IDENTITY.slerp(last.inverse(), 1.0 - factor);
        self.rotation.last = (step * last).normalize();
        self.rotation.current = self.rotation.last;

        self.translation.current *= factor;
        self.translation.last = self.translation.current;
        self.pointer.scroll *= factor;

        let keyboard = &mut self.keyboard;
        keyboard.add_rotation *= factor;
        keyboard.add_translation *= factor;
        keyboard.delta_rotation *= factor;
        keyboard.delta_translation *= factor;

        let converged = self.rotation.last.xyz().length() < RESET_ROTATION_EPSILON
            && self.translation.current.length() < RESET_EPSILON
            && self.pointer.scroll.abs() < RESET_EPSILON
            && keyboard.add_rotation.length() < RESET_EPSILON
            && keyboard.add_translation.length() < RESET_EPSILON
            && keyboard.delta_rotation.length() < RESET_EPSILON
            && keyboard.delta_translation.length() < RESET_EPSILON;
        if !converged {
            return true;
        }

        self.rotation.last = Quat::IDENTITY;
        self.rotation.current = Quat::IDENTITY;
        self.translation.last = Vec3::ZERO;
        self.translation.current = Vec3::ZERO;
        self.pointer.scroll = 0.0;
        self.keyboard = KeyboardAccumulators::default();
        self.reset = None;
        tracing::debug!("arcball reset finished");
        false
    }

    pub fn mode(&self) -> ArcballMode {
        if self.reset.is_some() {
            ArcballMode::Resetting
        } else if self.pointer.button == MouseButton::Right {
            ArcballMode::Panning
        } else if self.pointer.button == MouseButton::Left || self.rotating {
            ArcballMode::Rotating
        } else {
            ArcballMode::Idle
        }
    }

    pub fn is_resetting(&self) -> bool {
        self.reset.is_some()
    }

    pub fn viewport(&self) -> ArcballViewport {
        self.viewport
    }

    pub fn settings(&self) -> &ArcballSettings {
        &self.settings
    }

    pub fn scroll_value(&self) -> f32 {
        self.pointer.scroll
    }

    pub fn pointer_lerp(&self) -> Vec2 {
        self.pointer.lerp
    }

    pub fn button(&self) -> MouseButton {
        self.pointer.button
    }

    pub fn sphere_vectors(&self) -> SphereVectors {
        self.sphere
    }

    pub fn current_rotation(&self) -> Quat {
        self.rotation.current
    }

    pub fn last_rotation(&self) -> Quat {
        self.rotation.last
    }

    pub fn current_translation(&self) -> Vec3 {
        self.translation.current
    }
}

fn make_viewport(width: f32, height: f32, radius: Option<f32>) -> ArcballViewport {
    debug_assert!(width > 0.0 && height > 0.0, "arcball viewport must be positive");
    ArcballViewport {
        width,
        height,
        radius: radius.unwrap_or(height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::SIXTY_HZ_MS;

    fn approx_quat(a: Quat, b: Quat) -> bool {
        (a.x - b.x).abs() < 1.0e-5
            && (a.y - b.y).abs() < 1.0e-5
            && (a.z - b.z).abs() < 1.0e-5
            && (a.w - b.w).abs() < 1.0e-5
    }

    #[test]
    fn pointer_smoothing_converges_geometrically() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(0.0, 0.0, MouseButton::Right);
        arcball.mouse_move(100.0, 0.0);
        let expected = [50.0, 75.0, 87.5, 93.75, 96.875];
        for value in expected {
            arcball.update(50.0);
            assert!((arcball.pointer_lerp().x - value).abs() < 1.0e-4);
        }
    }

    #[test]
    fn frame_delta_is_clamped() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(0.0, 0.0, MouseButton::Right);
        arcball.mouse_move(100.0, 0.0);
        arcball.update(0.0);
        assert!((arcball.pointer_lerp().x - 1.0).abs() < 1.0e-4);

        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(0.0, 0.0, MouseButton::Right);
        arcball.mouse_move(100.0, 0.0);
        arcball.update(10_000.0);
        assert!((arcball.pointer_lerp().x - 99.0).abs() < 1.0e-4);
    }

    #[test]
    fn coincident_sphere_vectors_give_identity() {
        let mut arcball = Arcball::new(200.0, 100.0, None);
        arcball.mouse_down(30.0, 40.0, MouseButton::Left);
        let frame = arcball.update(25.0);
        let sphere = arcball.sphere_vectors();
        assert_eq!(sphere.start, sphere.end);
        assert_eq!(sphere.perpendicular, Vec3::ZERO);
        assert_eq!(frame.rotation, Quat::IDENTITY);
        assert_eq!(arcball.current_rotation(), arcball.last_rotation());
    }

    #[test]
    fn left_drag_rotates_and_inertia_settles() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(50.0, 50.0, MouseButton::Left);
        arcball.mouse_move(70.0, 50.0);
        let frame = arcball.update(25.0);
        assert!(!approx_quat(frame.rotation, Quat::IDENTITY));
        assert_eq!(arcball.mode(), ArcballMode::Rotating);

        arcball.mouse_up(70.0, 50.0, MouseButton::Left);
        assert_eq!(arcball.mode(), ArcballMode::Rotating);

        let mut frames = 0;
        while arcball.mode() == ArcballMode::Rotating {
            arcball.update(25.0);
            frames += 1;
            assert!(frames < 500, "inertia never settled");
        }
        assert_eq!(arcball.mode(), ArcballMode::Idle);
        assert_eq!(arcball.pointer_lerp(), Vec2::new(70.0, 50.0));

        let settled = arcball.update(25.0).rotation;
        let again = arcball.update(25.0).rotation;
        assert_eq!(settled, again);
        assert!(!approx_quat(settled, Quat::IDENTITY));
    }

    #[test]
    fn right_press_cancels_inertia() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(50.0, 50.0, MouseButton::Left);
        arcball.mouse_move(90.0, 50.0);
        arcball.update(25.0);
        arcball.mouse_up(90.0, 50.0, MouseButton::Left);
        arcball.update(25.0);
        assert_eq!(arcball.mode(), ArcballMode::Rotating);

        arcball.mouse_down(10.0, 10.0, MouseButton::Right);
        assert_eq!(arcball.mode(), ArcballMode::Panning);
        let before = arcball.current_rotation();
        arcball.update(25.0);
        assert_eq!(arcball.current_rotation(), before);
    }

    #[test]
    fn right_drag_pans_from_last_translation() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(10.0, 10.0, MouseButton::Right);
        arcball.mouse_move(40.0, 30.0);
        let frame = arcball.update(25.0);
        assert_eq!(frame.translation.truncate(), Vec2::new(30.0, 20.0));
        arcball.mouse_up(40.0, 30.0, MouseButton::Right);
        arcball.update(25.0);

        arcball.mouse_down(0.0, 0.0, MouseButton::Right);
        arcball.mouse_move(5.0, -5.0);
        let frame = arcball.update(25.0);
        assert_eq!(frame.translation.truncate(), Vec2::new(35.0, 15.0));
    }

    #[test]
    fn mouse_move_ignored_without_button() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_move(80.0, 80.0);
        arcball.update(25.0);
        assert_eq!(arcball.pointer_lerp(), Vec2::ZERO);
        assert_eq!(arcball.mode(), ArcballMode::Idle);
    }

    #[test]
    fn scroll_is_clamped_and_zoom_eases_in() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.set_scroll_bounds(-100.0, 100.0);
        arcball.mouse_scroll(10.0);
        assert_eq!(arcball.scroll_value(), -100.0);
        let frame = arcball.update(25.0);
        assert!((frame.translation.z + 10.0).abs() < 1.0e-4);
        let frame = arcball.update(25.0);
        assert!((frame.translation.z + 19.0).abs() < 1.0e-4);

        arcball.zoom(500.0);
        assert_eq!(arcball.scroll_value(), 100.0);
    }

    #[test]
    fn keys_drive_rotation_and_translation() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.key_down(keys::W);
        arcball.key_down(keys::LEFT);
        assert!(arcball.is_key_down(keys::W));
        let frame = arcball.update(25.0);
        assert!(!approx_quat(frame.rotation, Quat::IDENTITY));
        // 0.25 * 50 = 12.5 target, smoothed by 0.25 on the first frame.
        assert!((frame.translation.x + 3.125).abs() < 1.0e-4);
        arcball.key_up(keys::W);
        assert!(!arcball.is_key_down(keys::W));
    }

    #[test]
    fn translate_and_rotate_feed_keyboard_targets() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.translate(40.0, -40.0);
        let frame = arcball.update(25.0);
        assert!((frame.translation.x - 10.0).abs() < 1.0e-4);
        assert!((frame.translation.y + 10.0).abs() < 1.0e-4);

        arcball.rotate(0.0, 1.0);
        let frame = arcball.update(25.0);
        // The second axis feeds pitch, which lands on the quaternion's x.
        assert!(frame.rotation.x.abs() > 0.0);
        assert_eq!(frame.rotation.y, 0.0);
    }

    #[test]
    fn reset_converges_and_stops() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(50.0, 50.0, MouseButton::Left);
        arcball.mouse_move(95.0, 20.0);
        for _ in 0..10 {
            arcball.update(25.0);
        }
        arcball.mouse_up(95.0, 20.0, MouseButton::Left);
        arcball.mouse_scroll(20.0);
        arcball.key_down(keys::D);
        arcball.key_down(keys::DOWN);
        for _ in 0..10 {
            arcball.update(25.0);
        }
        arcball.key_up(keys::D);
        arcball.key_up(keys::DOWN);

        arcball.reset(0.9);
        assert_eq!(arcball.mode(), ArcballMode::Resetting);
        let mut ticks = 0;
        while arcball.tick_reset() {
            ticks += 1;
            assert!(ticks < 1000, "reset never converged");
        }
        assert!(!arcball.is_resetting());
        assert!(!arcball.tick_reset());

        let frame = arcball.update(25.0);
        assert_eq!(frame.rotation, Quat::IDENTITY);
        assert_eq!(frame.translation, Vec3::ZERO);
        assert_eq!(arcball.scroll_value(), 0.0);
    }

    fn shortest_angle(rotation: Quat) -> f32 {
        2.0 * rotation.normalize().w.abs().min(1.0).acos()
    }

    #[test]
    fn reset_during_drag_decays_from_current_rotation() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(50.0, 50.0, MouseButton::Left);
        arcball.mouse_move(90.0, 50.0);
        for _ in 0..20 {
            arcball.update(25.0);
        }
        let before = shortest_angle(arcball.current_rotation());
        assert!(before > 0.1);

        arcball.reset(0.9);
        assert_eq!(arcball.last_rotation(), arcball.current_rotation());
        assert!(arcball.tick_reset());
        let after = shortest_angle(arcball.current_rotation());
        assert!((after - before * 0.9).abs() < 1.0e-3, "{before} -> {after}");
    }

    #[test]
    fn reset_during_inertia_decays_from_current_rotation() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(50.0, 50.0, MouseButton::Left);
        arcball.mouse_move(90.0, 50.0);
        arcball.update(25.0);
        arcball.mouse_up(90.0, 50.0, MouseButton::Left);
        for _ in 0..3 {
            arcball.update(25.0);
        }
        assert_eq!(arcball.mode(), ArcballMode::Rotating);
        let before = shortest_angle(arcball.current_rotation());

        arcball.reset(0.9);
        arcball.advance_timers(SIXTY_HZ_MS);
        let after = shortest_angle(arcball.current_rotation());
        assert!((after - before * 0.9).abs() < 1.0e-3, "{before} -> {after}");
        arcball.update(25.0);
        assert_eq!(arcball.mode(), ArcballMode::Resetting);
    }

    #[test]
    fn reset_during_pan_decays_from_current_translation() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(10.0, 10.0, MouseButton::Right);
        arcball.mouse_move(60.0, 30.0);
        arcball.update(25.0);
        arcball.reset(0.9);
        assert!(arcball.tick_reset());
        let translation = arcball.current_translation();
        assert!((translation.x - 45.0).abs() < 1.0e-4);
        assert!((translation.y - 18.0).abs() < 1.0e-4);
    }

    #[test]
    fn reset_releases_held_keys_and_converges() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.key_down(keys::D);
        arcball.key_down(keys::RIGHT);
        for _ in 0..5 {
            arcball.update(25.0);
        }
        arcball.reset(0.9);
        assert!(!arcball.is_key_down(keys::D));
        assert!(!arcball.is_key_down(keys::RIGHT));

        let mut frames = 0;
        while arcball.is_resetting() {
            arcball.advance_timers(SIXTY_HZ_MS);
            arcball.update(25.0);
            frames += 1;
            assert!(frames < 1000, "reset never converged with keys held");
        }
    }

    #[test]
    fn stalled_clock_catches_up_at_most_one_second() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.zoom(100.0);
        arcball.reset(0.99);
        arcball.advance_timers(1.0e6);
        assert!(arcball.is_resetting());
        let expected = 100.0 * 0.99_f32.powi(60);
        assert!((arcball.scroll_value() - expected).abs() < 1.0e-2);
    }

    #[test]
    fn middle_press_cancels_inertia() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(50.0, 50.0, MouseButton::Left);
        arcball.mouse_move(90.0, 50.0);
        arcball.update(25.0);
        arcball.mouse_up(90.0, 50.0, MouseButton::Left);
        arcball.update(25.0);
        assert_eq!(arcball.mode(), ArcballMode::Rotating);

        arcball.mouse_down(20.0, 20.0, MouseButton::Middle);
        assert_eq!(arcball.mode(), ArcballMode::Idle);
        let before = arcball.current_rotation();
        arcball.update(25.0);
        assert_eq!(arcball.current_rotation(), before);
        assert_eq!(arcball.last_rotation(), before);
    }

    #[test]
    fn mouse_over_releases_held_button() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(50.0, 50.0, MouseButton::Left);
        assert_eq!(arcball.button(), MouseButton::Left);
        arcball.mouse_over();
        assert_eq!(arcball.button(), MouseButton::None);
        assert_eq!(arcball.mode(), ArcballMode::Idle);
        arcball.mouse_move(80.0, 80.0);
        arcball.update(25.0);
        assert_eq!(arcball.pointer_lerp(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn scroll_speed_scales_wheel_steps() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_scroll(2.0);
        assert_eq!(arcball.scroll_value(), -100.0);
        arcball.set_scroll_speed(10.0);
        arcball.mouse_scroll(2.0);
        assert_eq!(arcball.scroll_value(), -120.0);
        assert_eq!(arcball.settings().scroll_speed, 10.0);
    }

    #[test]
    fn inverted_scroll_bounds_are_swapped_and_reclamp() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.zoom(200.0);
        assert_eq!(arcball.scroll_value(), 200.0);
        arcball.set_scroll_bounds(50.0, -50.0);
        assert_eq!(arcball.settings().scroll_min, -50.0);
        assert_eq!(arcball.settings().scroll_max, 50.0);
        assert_eq!(arcball.scroll_value(), 50.0);
        arcball.mouse_scroll(10.0);
        assert_eq!(arcball.scroll_value(), -50.0);
    }

    #[test]
    fn reset_is_cancelled_by_input() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.zoom(200.0);
        arcball.reset(0.9);
        arcball.reset(0.1);
        assert!(arcball.is_resetting());
        arcball.mouse_down(1.0, 1.0, MouseButton::Left);
        assert!(!arcball.is_resetting());

        arcball.reset(0.9);
        arcball.mouse_scroll(1.0);
        assert!(!arcball.is_resetting());

        arcball.reset(0.9);
        arcball.key_down(keys::A);
        assert!(!arcball.is_resetting());

        arcball.stop();
        arcball.stop();
        assert!(!arcball.is_resetting());
    }

    #[test]
    fn timers_tick_at_sixty_hz() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.zoom(100.0);
        arcball.reset(0.5);
        arcball.advance_timers(1000.0 / 60.0 * 2.5);
        assert!((arcball.scroll_value() - 25.0).abs() < 1.0e-3);
        arcball.advance_timers(0.0);
        assert!((arcball.scroll_value() - 25.0).abs() < 1.0e-3);
    }

    #[test]
    fn mouse_out_releases_held_button() {
        let mut arcball = Arcball::new(100.0, 100.0, None);
        arcball.mouse_down(50.0, 50.0, MouseButton::Left);
        arcball.mouse_move(60.0, 60.0);
        arcball.mouse_out();
        assert_eq!(arcball.button(), MouseButton::None);
        arcball.mouse_move(0.0, 0.0);
        for _ in 0..200 {
            arcball.update(25.0);
        }
        assert_eq!(arcball.pointer_lerp(), Vec2::new(60.0, 60.0));
        assert_eq!(arcball.mode(), ArcballMode::Idle);
    }

    #[test]
    fn resize_defaults_radius_to_height() {
        let mut arcball = Arcball::new(100.0, 100.0, Some(30.0));
        assert_eq!(arcball.viewport().radius, 30.0);
        arcball.resize(640.0, 480.0, None);
        assert_eq!(
            arcball.viewport(),
            ArcballViewport {
                width: 640.0,
                height: 480.0,
                radius: 480.0
            }
        );
    }

    #[test]
    fn button_codes_round_trip() {
        assert_eq!(MouseButton::from_code(1), MouseButton::Left);
        assert_eq!(MouseButton::from_code(3), MouseButton::Right);
        assert_eq!(MouseButton::from_code(-1), MouseButton::None);
        assert_eq!(MouseButton::Right.code(), 3);
        assert_eq!(MouseButton::None.code(), -1);
    }
}
