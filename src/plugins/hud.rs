use bevy::prelude::*;

use crate::plugins::scoreboard::{PowerMeter, Score};

#[derive(Component)]
pub struct Hud;
#[derive(Component)]
pub struct PowerBar;
#[derive(Component)]
pub struct PowerBarFill;
#[derive(Component)]
pub struct PowerLabel;
#[derive(Component)]
pub struct VictoryBanner;

pub struct HudPlugin;
impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, (update_hud, update_power_bar, update_victory_banner));
    }
}

fn spawn_hud(mut commands: Commands) {
    let text = |size: f32, color: Color| TextStyle { font_size: size, color, ..default() };

    commands.spawn((
        TextBundle::from_section("Targets: 0 / 0\nScore: 0", text(24.0, Color::WHITE))
            .with_style(Style { position_type: PositionType::Absolute, left: Val::Px(16.0), top: Val::Px(12.0), ..default() }),
        Hud,
    ));

    commands.spawn(
        TextBundle::from_section(
            "Hold LMB to aim\nHold SPACE to charge\nRelease SPACE to fire",
            text(16.0, Color::srgb(0.85, 0.85, 0.90)),
        )
        .with_style(Style { position_type: PositionType::Absolute, right: Val::Px(16.0), top: Val::Px(12.0), ..default() }),
    );

    // Power bar container + fill, hidden while power is zero
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(48.0),
                    left: Val::Percent(50.0),
                    margin: UiRect::left(Val::Px(-128.0)),
                    width: Val::Px(256.0),
                    height: Val::Px(16.0),
                    padding: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                background_color: Color::srgba(0.0, 0.0, 0.0, 0.4).into(),
                visibility: Visibility::Hidden,
                ..default()
            },
            PowerBar,
        ))
        .with_children(|parent| {
            parent.spawn((
                NodeBundle {
                    style: Style { width: Val::Percent(0.0), height: Val::Percent(100.0), ..default() },
                    background_color: Color::srgb(0.92, 0.70, 0.10).into(),
                    ..default()
                },
                PowerBarFill,
            ));
            parent.spawn((
                TextBundle::from_section("Power: 0%", text(14.0, Color::WHITE))
                    .with_style(Style { position_type: PositionType::Absolute, top: Val::Px(-22.0), ..default() }),
                PowerLabel,
            ));
        });

    commands.spawn((
        TextBundle {
            visibility: Visibility::Hidden,
            ..TextBundle::from_section("VICTORY!\nPress R to play again", text(48.0, Color::srgb(0.98, 0.80, 0.18)))
                .with_style(Style { position_type: PositionType::Absolute, left: Val::Percent(30.0), top: Val::Percent(40.0), ..default() })
        },
        VictoryBanner,
    ));
}

fn update_hud(score: Res<Score>, mut q_text: Query<&mut Text, With<Hud>>) {
    if !score.is_changed() { return; }
    if let Ok(mut text) = q_text.get_single_mut() {
        text.sections[0].value = format!("Targets: {} / {}\nScore: {}", score.hits, score.total, score.points);
    }
}

fn update_power_bar(
    meter: Res<PowerMeter>,
    mut q_bar: Query<&mut Visibility, With<PowerBar>>,
    mut q_fill: Query<(&mut Style, &mut BackgroundColor), With<PowerBarFill>>,
    mut q_label: Query<&mut Text, With<PowerLabel>>,
) {
    if !meter.is_changed() { return; }
    let power = meter.normalized.clamp(0.0, 1.0);
    if let Ok(mut vis) = q_bar.get_single_mut() {
        *vis = if power > 0.0 { Visibility::Visible } else { Visibility::Hidden };
    }
    if let Ok((mut style, mut color)) = q_fill.get_single_mut() {
        style.width = Val::Percent(power * 100.0);
        // yellow -> orange -> red
        let col = if power < 0.5 {
            let t = power / 0.5;
            Color::srgb(0.92, 0.70 - 0.25 * t, 0.10)
        } else {
            let t = (power - 0.5) / 0.5;
            Color::srgb(0.92 - 0.02 * t, 0.45 - 0.30 * t, 0.10 + 0.05 * t)
        };
        *color = col.into();
    }
    if let Ok(mut text) = q_label.get_single_mut() {
        text.sections[0].value = format!("Power: {}%", (power * 100.0).round() as u32);
    }
}

fn update_victory_banner(score: Res<Score>, mut q: Query<&mut Visibility, With<VictoryBanner>>) {
    if !score.is_changed() { return; }
    if let Ok(mut vis) = q.get_single_mut() {
        *vis = if score.won { Visibility::Visible } else { Visibility::Hidden };
    }
}
