// Host input: translate mouse, keyboard and touch into aim intents for the charge controller.
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::plugins::charge::{AimIntent, InputInbox};
use crate::plugins::core_sim::SimSet;

pub const BOOST_KEY: KeyCode = KeyCode::Space;

/// Touch currently acting as the pointer, if any.
#[derive(Resource, Default)]
pub struct ActiveTouch(pub Option<u64>);

pub struct RangeInputPlugin;
impl Plugin for RangeInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveTouch>()
            .add_systems(Update, (collect_pointer_input, collect_touch_input).chain().in_set(SimSet::Input));
    }
}

/// Window position (origin top-left, logical px) to an offset from screen center in -1..1, y up.
pub fn window_to_ndc(pos: Vec2, size: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(pos.x / size.x * 2.0 - 1.0, 1.0 - pos.y / size.y * 2.0)
}

fn collect_pointer_input(
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut last_offset: Local<Option<Vec2>>,
    mut inbox: ResMut<InputInbox>,
) {
    if let Ok(win) = q_window.get_single() {
        if let Some(cursor) = win.cursor_position() {
            let offset = window_to_ndc(cursor, Vec2::new(win.width(), win.height()));
            if *last_offset != Some(offset) {
                *last_offset = Some(offset);
                inbox.push(AimIntent::PointerMoved(offset));
            }
        }
    }

    if buttons.just_pressed(MouseButton::Left) {
        inbox.push(AimIntent::PointerDown);
    }
    if keys.just_pressed(BOOST_KEY) {
        inbox.push(AimIntent::BoostDown);
    }
    if keys.just_released(BOOST_KEY) {
        inbox.push(AimIntent::BoostUp);
    }
    if buttons.just_released(MouseButton::Left) {
        inbox.push(AimIntent::PointerUp);
    }
}

fn collect_touch_input(
    mut ev_touch: EventReader<TouchInput>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut active: ResMut<ActiveTouch>,
    mut inbox: ResMut<InputInbox>,
) {
    let size = q_window
        .get_single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::ZERO);
    for ev in ev_touch.read() {
        match ev.phase {
            TouchPhase::Started => {
                if active.0.is_none() {
                    active.0 = Some(ev.id);
                    inbox.push(AimIntent::PointerMoved(window_to_ndc(ev.position, size)));
                    inbox.push(AimIntent::PointerDown);
                }
            }
            TouchPhase::Moved => {
                if active.0 == Some(ev.id) {
                    inbox.push(AimIntent::PointerMoved(window_to_ndc(ev.position, size)));
                }
            }
            TouchPhase::Ended | TouchPhase::Canceled => {
                if active.0 == Some(ev.id) {
                    active.0 = None;
                    inbox.push(AimIntent::PointerUp);
                }
            }
        }
    }
}
