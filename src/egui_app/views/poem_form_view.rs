use eframe::egui;

use crate::egui_app::helpers::capitalize;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::AppView;
use crate::egui_app::views::components;
use crate::shared::Category;

/// Create and edit share this form; `poem_form.editing` tells them apart.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let editing = state.poem_form.editing;
    let heading = if editing.is_some() { "Edit Poem" } else { "Write a New Poem" };

    ui.label(egui::RichText::new(heading).size(28.0).strong());
    ui.add_space(16.0);

    if state.poem_form.is_loading_source() {
        components::loading(ui, "Loading poem...");
        return;
    }

    let submitting = state.poem_form.is_submitting();
    let form = &mut state.poem_form;

    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.colored_label(colors::TEXT_SECONDARY, "Title");
        ui.add(
            egui::TextEdit::singleline(&mut form.title)
                .hint_text("Give your poem a title")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(10.0);

        ui.colored_label(colors::TEXT_SECONDARY, "Poem");
        ui.add(
            egui::TextEdit::multiline(&mut form.content)
                .hint_text("Write your poem here...")
                .desired_rows(14)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.colored_label(colors::TEXT_SECONDARY, "Category");
            egui::ComboBox::from_id_salt("poem_category")
                .selected_text(capitalize(form.category.as_str()))
                .show_ui(ui, |ui| {
                    for category in Category::ALL {
                        ui.selectable_value(
                            &mut form.category,
                            category,
                            capitalize(category.as_str()),
                        );
                    }
                });
        });
        ui.add_space(10.0);

        ui.colored_label(colors::TEXT_SECONDARY, "Tags (comma separated)");
        ui.add(
            egui::TextEdit::singleline(&mut form.tags_input)
                .hint_text("love, hope, dreams")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(10.0);

        let publish_label = if editing.is_some() { "Published" } else { "Publish immediately" };
        ui.checkbox(&mut form.is_published, publish_label);

        components::inline_error(ui, form.error.as_deref());
    });
    ui.add_space(16.0);

    let mut submit = false;
    let mut cancel = false;
    ui.horizontal(|ui| {
        let label = if editing.is_some() { "Save Changes" } else { "Publish Poem" };
        submit = ui
            .add_enabled(!submitting, styles::primary_button(label))
            .clicked();
        cancel = ui.button("Cancel").clicked();
        if submitting {
            ui.spinner();
        }
    });

    if submit {
        state.submit_poem_form();
    } else if cancel {
        match editing {
            Some(id) => state.navigate(AppView::Detail(id)),
            None => state.navigate(AppView::Dashboard),
        }
    }
}
