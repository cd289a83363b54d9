use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let available_rect = ui.available_rect_before_wrap();

    ui.vertical_centered(|ui| {
        let total_height = if state.auth_form.is_signup_mode { 380.0 } else { 280.0 };
        let top_space = (available_rect.height() - total_height).max(0.0) / 3.0;
        ui.add_space(top_space);

        ui.label(
            egui::RichText::new("Poetica")
                .size(36.0)
                .strong()
                .color(colors::ACCENT),
        );
        ui.add_space(12.0);

        ui.label(
            egui::RichText::new(if state.auth_form.is_signup_mode {
                "Join the community"
            } else {
                "Welcome back"
            })
            .size(22.0)
            .color(colors::TEXT_PRIMARY),
        );
        ui.add_space(20.0);

        if let Some(ref error) = state.auth_form.error {
            ui.label(egui::RichText::new(error).color(colors::ERROR));
            ui.add_space(10.0);
        }

        let input_width = 280.0;
        let label_width = 110.0;
        let indent = ((available_rect.width() - input_width - label_width - 20.0) / 2.0).max(0.0);

        let field = |ui: &mut egui::Ui, label: &str, value: &mut String, password: bool| {
            ui.horizontal(|ui| {
                ui.add_space(indent);
                ui.add_sized(
                    [label_width, 24.0],
                    egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
                );
                ui.add_sized(
                    [input_width, 28.0],
                    egui::TextEdit::singleline(value).password(password),
                );
            });
            ui.add_space(8.0);
        };

        let form = &mut state.auth_form;
        if form.is_signup_mode {
            field(ui, "Username:", &mut form.username, false);
        }
        field(ui, "Email:", &mut form.email, false);
        field(ui, "Password:", &mut form.password, true);
        if form.is_signup_mode {
            field(ui, "Confirm:", &mut form.confirm_password, true);
        }

        ui.add_space(16.0);

        let submit_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
        ui.horizontal(|ui| {
            let button_width = 130.0;
            let total_buttons_width = button_width * 2.0 + 10.0;
            ui.add_space(((available_rect.width() - total_buttons_width) / 2.0).max(0.0));

            let submit_label = if state.auth_form.is_signup_mode { "Register" } else { "Login" };
            let submit = ui.add_enabled(
                !state.auth_form.loading,
                styles::primary_button(submit_label).min_size(egui::vec2(button_width, 32.0)),
            );
            if submit.clicked() || (submit_pressed && !state.auth_form.loading) {
                state.auth_form.error = None;
                if state.auth_form.is_signup_mode {
                    state.handle_signup();
                } else {
                    state.handle_login();
                }
            }

            ui.add_space(10.0);

            let toggle_label = if state.auth_form.is_signup_mode {
                "Back to Login"
            } else {
                "Create Account"
            };
            if ui
                .add_sized([button_width, 32.0], egui::Button::new(toggle_label))
                .clicked()
            {
                state.auth_form.toggle_mode();
            }
        });

        if state.auth_form.loading {
            ui.add_space(15.0);
            ui.horizontal(|ui| {
                ui.add_space(((available_rect.width() - 100.0) / 2.0).max(0.0));
                ui.colored_label(colors::TEXT_SECONDARY, "Signing in...");
                ui.spinner();
            });
        }
    });
}
