use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;

pub mod auth_view;
pub mod components;
pub mod dashboard_view;
pub mod detail_view;
pub mod edit_profile_view;
pub mod listing_view;
pub mod poem_form_view;
pub mod profile_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            let mut next: Option<AppView> = None;
            let mut logout = false;

            ui.horizontal(|ui| {
                if ui
                    .add(
                        egui::Label::new(
                            egui::RichText::new("Poetica")
                                .size(20.0)
                                .strong()
                                .color(colors::TEXT_LIGHT),
                        )
                        .sense(egui::Sense::click()),
                    )
                    .clicked()
                {
                    next = Some(AppView::Listing);
                }
                ui.add_space(16.0);

                let nav = |ui: &mut egui::Ui, label: &str| {
                    ui.add(egui::Button::new(
                        egui::RichText::new(label).color(colors::TEXT_LIGHT),
                    ).frame(false))
                    .clicked()
                };

                if nav(ui, "Home") {
                    next = Some(AppView::Listing);
                }

                let session = state.session();
                let user = session.user().map(|u| (u.id, u.username.clone()));
                drop(session);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(8.0);
                    match user {
                        Some((id, username)) => {
                            if nav(ui, "Logout") {
                                logout = true;
                            }
                            if nav(ui, &format!("@{}", username)) {
                                next = Some(AppView::Profile(id));
                            }
                            if nav(ui, "Write") {
                                next = Some(AppView::CreatePoem);
                            }
                            if nav(ui, "Dashboard") {
                                next = Some(AppView::Dashboard);
                            }
                        }
                        None if state.is_restoring() => {
                            ui.spinner();
                        }
                        None => {
                            if nav(ui, "Login") {
                                state.auth_form.is_signup_mode = false;
                                next = Some(AppView::Auth);
                            }
                            if nav(ui, "Register") {
                                state.auth_form.is_signup_mode = true;
                                next = Some(AppView::Auth);
                            }
                        }
                    }
                });
            });

            if logout {
                state.logout();
            } else if let Some(view) = next {
                state.navigate(view);
            }
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(styles::page_frame())
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.set_max_width(900.0);
                    match state.current_view {
                        AppView::Auth => auth_view::render(ui, state),
                        AppView::Listing => listing_view::render(ui, state),
                        AppView::Detail(_) => detail_view::render(ui, state),
                        AppView::Dashboard => dashboard_view::render(ui, state),
                        AppView::Profile(_) => profile_view::render(ui, state),
                        AppView::CreatePoem | AppView::EditPoem(_) => {
                            poem_form_view::render(ui, state)
                        }
                        AppView::EditProfile => edit_profile_view::render(ui, state),
                    }
                });
        });
}
