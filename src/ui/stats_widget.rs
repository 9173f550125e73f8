use crate::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

pub struct StatsWidgetPlugin;

impl Plugin for StatsWidgetPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_widget)
            .add_systems(Update, update_widget_system.after(GalaxySet::Regenerate))
            .add_plugins(FrameTimeDiagnosticsPlugin::default());
    }
}

#[derive(Component)]
enum StatsLine {
    FrameRate,
    Particles,
}

fn setup_widget(mut commands: Commands) {
    let holder = commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::FlexStart,
                width: Val::Px(260.),
                right: Val::Percent(1.),
                top: Val::Percent(1.),
                bottom: Val::Auto,
                left: Val::Auto,
                padding: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(Color::linear_rgba(0.0, 0.03, 0.08, 0.5)),
            GlobalZIndex(i32::MAX - 1),
        ))
        .id();

    for line in [StatsLine::FrameRate, StatsLine::Particles] {
        let text = commands
            .spawn((
                line,
                Text(" N/A".to_string()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                Node {
                    padding: UiRect::all(Val::Px(4.0)),
                    ..default()
                },
            ))
            .id();
        commands.entity(holder).add_child(text);
    }
}

fn frame_rate_label(fps: f64, frame_time: f64) -> String {
    format!("{:>6} {:<8}", "FPS:", format!("{fps:.1} ({frame_time:.2} ms)"))
}

fn particles_label(cloud: &GalaxyCloud) -> String {
    format!(
        "{:>6} {} ({:.2} ms)",
        "Particles:",
        cloud.particle_count(),
        cloud.last_generation_time.as_secs_f64() * 1000.0
    )
}

fn update_widget_system(
    diagnostics: Res<DiagnosticsStore>,
    cloud: Res<GalaxyCloud>,
    mut query: Query<(&mut Text, &StatsLine)>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|frame_time| frame_time.smoothed())
        .unwrap_or(0.0);

    for (mut text, line) in &mut query {
        text.0 = match line {
            StatsLine::FrameRate => frame_rate_label(fps, frame_time),
            StatsLine::Particles => particles_label(&cloud),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn particle_line_reports_count_and_generation_time() {
        let cloud = GalaxyCloud {
            last_generation_time: Duration::from_micros(12_500),
            ..default()
        };
        assert_eq!(particles_label(&cloud), "Particles: 0 (12.50 ms)");
    }

    #[test]
    fn frame_rate_line_is_padded() {
        assert_eq!(frame_rate_label(59.94, 16.68), "  FPS: 59.9 (16.68 ms)");
    }
}
