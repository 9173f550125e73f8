use crate::prelude::*;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use orbit_camera::{OrbitCameraInput, ResetOrbitCamera};

pub struct ParameterPanelPlugin;

impl Plugin for ParameterPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParameterDraft>()
            .add_systems(Startup, configure_visuals_system)
            .add_systems(
                Update,
                (sync_draft, parameter_panel_system)
                    .chain()
                    .before(GalaxySet::ApplyParameters),
            );
    }
}

/// Values shown by the panel. Ahead of `GalaxyParameters` while a field is being edited.
#[derive(Resource, Deref, DerefMut, Default)]
pub struct ParameterDraft(pub GalaxyParameters);

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

fn sync_draft(params: Res<GalaxyParameters>, mut draft: ResMut<ParameterDraft>) {
    if params.is_changed() {
        draft.0 = params.clone();
    }
}

/// A field is done once its drag stops, it loses focus, or it changed
/// through a click rather than a drag.
fn finished_editing(response: &egui::Response) -> bool {
    response.drag_stopped()
        || response.lost_focus()
        || (response.changed() && !response.dragged() && !response.has_focus())
}

fn srgb_bytes(color: Srgba) -> [u8; 3] {
    let [r, g, b, _] = color.to_u8_array();
    [r, g, b]
}

fn parameter_panel_system(
    mut contexts: EguiContexts,
    mut draft: ResMut<ParameterDraft>,
    params: Res<GalaxyParameters>,
    cloud: Res<GalaxyCloud>,
    mut camera_input: ResMut<OrbitCameraInput>,
    mut committed_evw: EventWriter<ParameterCommitted>,
    mut reset_evw: EventWriter<ResetOrbitCamera>,
) {
    let ctx = contexts.ctx_mut();
    let (min, max) = (GalaxyParameters::MIN, GalaxyParameters::MAX);
    let mut edits = Vec::new();

    egui::SidePanel::left("parameter_panel")
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Galaxy");

            let response = ui.add(
                egui::Slider::new(&mut draft.count, min.count..=max.count)
                    .step_by(100.0)
                    .text("count"),
            );
            if finished_editing(&response) {
                edits.push(ParameterEdit::Count(draft.count));
            }

            let response = ui.add(
                egui::Slider::new(&mut draft.size, min.size..=max.size)
                    .step_by(0.001)
                    .text("size"),
            );
            if finished_editing(&response) {
                edits.push(ParameterEdit::Size(draft.size));
            }

            let response = ui.checkbox(&mut draft.size_attenuation, "Attenuation");
            if response.changed() {
                edits.push(ParameterEdit::SizeAttenuation(draft.size_attenuation));
            }

            let response = ui.add(
                egui::Slider::new(&mut draft.radius, min.radius..=max.radius)
                    .step_by(0.01)
                    .text("radius"),
            );
            if finished_editing(&response) {
                edits.push(ParameterEdit::Radius(draft.radius));
            }

            let response = ui.add(
                egui::Slider::new(&mut draft.branches, min.branches..=max.branches)
                    .step_by(1.0)
                    .text("branches"),
            );
            if finished_editing(&response) {
                edits.push(ParameterEdit::Branches(draft.branches));
            }

            let response = ui.add(
                egui::Slider::new(&mut draft.spin, min.spin..=max.spin)
                    .step_by(0.1)
                    .text("spin"),
            );
            if finished_editing(&response) {
                edits.push(ParameterEdit::Spin(draft.spin));
            }

            let response = ui.add(
                egui::Slider::new(&mut draft.randomness, min.randomness..=max.randomness)
                    .step_by(0.01)
                    .text("noise"),
            );
            if finished_editing(&response) {
                edits.push(ParameterEdit::Randomness(draft.randomness));
            }

            let response = ui.add(
                egui::Slider::new(
                    &mut draft.randomness_power,
                    min.randomness_power..=max.randomness_power,
                )
                .step_by(0.001)
                .text("power"),
            );
            if finished_editing(&response) {
                edits.push(ParameterEdit::RandomnessPower(draft.randomness_power));
            }

            ui.separator();

            let mut inside = srgb_bytes(draft.inside_color);
            ui.horizontal(|ui| {
                ui.color_edit_button_srgb(&mut inside);
                ui.label("insideColor");
            });
            draft.inside_color = Srgba::rgb_u8(inside[0], inside[1], inside[2]);

            let mut outside = srgb_bytes(draft.outside_color);
            ui.horizontal(|ui| {
                ui.color_edit_button_srgb(&mut outside);
                ui.label("outsideColor");
            });
            draft.outside_color = Srgba::rgb_u8(outside[0], outside[1], outside[2]);

            // the picker popup is dragged continuously, wait for the release
            if !ui.input(|i| i.pointer.any_down()) {
                if srgb_bytes(params.inside_color) != inside {
                    edits.push(ParameterEdit::InsideColor(draft.inside_color));
                }
                if srgb_bytes(params.outside_color) != outside {
                    edits.push(ParameterEdit::OutsideColor(draft.outside_color));
                }
            }

            ui.separator();
            if ui.button("Reset Camera").clicked() {
                reset_evw.write(ResetOrbitCamera);
            }

            if let Some(err) = &cloud.last_error {
                ui.separator();
                ui.colored_label(egui::Color32::LIGHT_RED, err.to_string());
            }
        });

    for edit in edits {
        committed_evw.write(ParameterCommitted(edit));
    }

    // orbit controls only see the pointer when egui doesn't
    let enabled = !(ctx.wants_pointer_input() || ctx.is_pointer_over_area());
    if camera_input.enabled != enabled {
        camera_input.enabled = enabled;
    }
}
