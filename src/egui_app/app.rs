/**
 * Poetica Desktop App
 *
 * `eframe::App` implementation: polls finished requests, then draws the
 * top bar and the current view every frame.
 */

use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::styles;
use crate::egui_app::views;

pub struct PoeticaApp {
    state: AppState,
}

impl PoeticaApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        styles::apply_global_theme(&cc.egui_ctx);
        Self {
            state: AppState::new(),
        }
    }
}

impl eframe::App for PoeticaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.check_pending_operations();

        views::render_top_bar(ctx, &mut self.state);

        views::render_main_panel(ctx, &mut self.state);

        ctx.request_repaint();
    }
}
