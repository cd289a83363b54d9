use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::egui_app::types::{AppView, Loadable};
use crate::egui_app::views::components;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label(
        egui::RichText::new("Discover Poetry")
            .size(28.0)
            .strong()
            .color(colors::TEXT_PRIMARY),
    );
    ui.colored_label(
        colors::TEXT_SECONDARY,
        "The newest poems shared by the community",
    );
    ui.add_space(16.0);

    let mut next: Option<AppView> = None;
    let mut go_to_page: Option<u32> = None;

    match &state.listing.data {
        Loadable::NotStarted | Loadable::Loading(_) => components::loading(ui, "Loading poems..."),
        Loadable::Failed(message) => {
            if components::error_state(ui, message) {
                go_to_page = Some(state.listing.page);
            }
        }
        Loadable::Loaded(list) => {
            if list.poems.is_empty() {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.colored_label(
                        colors::TEXT_SECONDARY,
                        "No poems yet. Be the first to share one!",
                    );
                });
            }

            for poem in &list.poems {
                if let Some(view) = components::poem_card(ui, poem) {
                    next = Some(view);
                }
                ui.add_space(12.0);
            }

            let pagination = list.pagination;
            if pagination.pages > 1 {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(pagination.has_previous(), egui::Button::new("← Previous"))
                        .clicked()
                    {
                        go_to_page = Some(pagination.page - 1);
                    }
                    ui.colored_label(
                        colors::TEXT_SECONDARY,
                        format!("Page {} of {}", pagination.page, pagination.pages),
                    );
                    if ui
                        .add_enabled(pagination.has_next(), egui::Button::new("Next →"))
                        .clicked()
                    {
                        go_to_page = Some(pagination.page + 1);
                    }
                });
            }
        }
    }

    if let Some(page) = go_to_page {
        state.set_listing_page(page);
    }
    if let Some(view) = next {
        state.navigate(view);
    }
}
