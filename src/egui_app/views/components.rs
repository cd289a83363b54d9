//! Widgets shared by several views: loading and error states, chips, and
//! the poem card.

use eframe::egui;

use crate::egui_app::helpers::{capitalize, format_date, truncate_text, PREVIEW_LENGTH};
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::AppView;
use crate::shared::{Category, PoemView};

pub fn loading(ui: &mut egui::Ui, label: &str) {
    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        ui.spinner();
        ui.colored_label(colors::TEXT_SECONDARY, label);
    });
}

/// Error message with a retry button. Returns whether retry was clicked.
pub fn error_state(ui: &mut egui::Ui, message: &str) -> bool {
    let mut retry = false;
    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        ui.colored_label(colors::ERROR, message);
        ui.add_space(8.0);
        retry = ui.button("Try again").clicked();
    });
    retry
}

/// Inline error below a form or action row
pub fn inline_error(ui: &mut egui::Ui, error: Option<&str>) {
    if let Some(error) = error {
        ui.add_space(6.0);
        ui.label(egui::RichText::new(error).color(colors::ERROR));
    }
}

pub fn category_chip(ui: &mut egui::Ui, category: Category) {
    styles::chip_frame().show(ui, |ui| {
        ui.colored_label(colors::TEXT_SECONDARY, capitalize(category.as_str()));
    });
}

pub fn tag_chips(ui: &mut egui::Ui, tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    ui.horizontal_wrapped(|ui| {
        for tag in tags {
            styles::chip_frame().show(ui, |ui| {
                ui.colored_label(colors::ACCENT, format!("#{}", tag));
            });
        }
    });
}

/// Poem preview. Returns the view to open when the card or byline is clicked.
pub fn poem_card(ui: &mut egui::Ui, poem: &PoemView) -> Option<AppView> {
    let mut next = None;

    let response = styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            if ui
                .link(egui::RichText::new(&poem.title).size(20.0).strong())
                .clicked()
            {
                next = Some(AppView::Detail(poem.id));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                category_chip(ui, poem.category);
                if !poem.is_published {
                    styles::chip_frame().show(ui, |ui| {
                        ui.colored_label(colors::ACCENT, "Draft");
                    });
                }
            });
        });
        ui.add_space(6.0);

        ui.colored_label(
            colors::TEXT_PRIMARY,
            truncate_text(&poem.content, PREVIEW_LENGTH),
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.colored_label(colors::TEXT_SECONDARY, "By");
            if ui.link(poem.author.display_name()).clicked() {
                next = Some(AppView::Profile(poem.author.id));
            }
            ui.colored_label(colors::TEXT_SECONDARY, format_date(&poem.created_at));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(colors::TEXT_SECONDARY, format!("💬 {}", poem.comments.len()));
                ui.colored_label(colors::TEXT_SECONDARY, format!("♥ {}", poem.likes.len()));
            });
        });

        tag_chips(ui, &poem.tags);
    });

    // The whole card opens the poem unless a link inside was clicked
    if next.is_none() && response.response.interact(egui::Sense::click()).clicked() {
        next = Some(AppView::Detail(poem.id));
    }

    next
}
