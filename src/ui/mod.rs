use bevy::prelude::*;

mod parameter_panel;
mod stats_widget;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            stats_widget::StatsWidgetPlugin,
            parameter_panel::ParameterPanelPlugin,
        ));
    }
}
