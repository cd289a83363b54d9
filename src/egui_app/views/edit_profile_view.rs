use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::AppView;
use crate::egui_app::views::components;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label(egui::RichText::new("Edit Profile").size(28.0).strong());
    ui.add_space(16.0);

    if state.profile_form.is_loading_source() {
        components::loading(ui, "Loading profile...");
        return;
    }

    let submitting = state.profile_form.is_submitting();
    let form = &mut state.profile_form;

    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());

        egui::Grid::new("profile_form")
            .num_columns(2)
            .spacing([16.0, 10.0])
            .show(ui, |ui| {
                ui.colored_label(colors::TEXT_SECONDARY, "First name");
                ui.add(egui::TextEdit::singleline(&mut form.first_name).desired_width(280.0));
                ui.end_row();

                ui.colored_label(colors::TEXT_SECONDARY, "Last name");
                ui.add(egui::TextEdit::singleline(&mut form.last_name).desired_width(280.0));
                ui.end_row();

                ui.colored_label(colors::TEXT_SECONDARY, "Location");
                ui.add(egui::TextEdit::singleline(&mut form.location).desired_width(280.0));
                ui.end_row();

                ui.colored_label(colors::TEXT_SECONDARY, "Bio");
                ui.add(
                    egui::TextEdit::multiline(&mut form.bio)
                        .hint_text("Tell readers about yourself")
                        .desired_rows(5)
                        .desired_width(420.0),
                );
                ui.end_row();
            });

        components::inline_error(ui, form.error.as_deref());
    });
    ui.add_space(16.0);

    let mut save = false;
    let mut cancel = false;
    ui.horizontal(|ui| {
        save = ui
            .add_enabled(!submitting, styles::primary_button("Save Profile"))
            .clicked();
        cancel = ui.button("Cancel").clicked();
        if submitting {
            ui.spinner();
        }
    });

    if save {
        state.submit_profile_form();
    } else if cancel {
        state.navigate(AppView::Dashboard);
    }
}
