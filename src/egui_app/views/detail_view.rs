use eframe::egui;

use crate::egui_app::helpers::{format_date, pluralize};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::{AppView, Loadable};
use crate::egui_app::views::components;

enum Action {
    Navigate(AppView),
    Like,
    Comment,
    AskDelete(bool),
    Delete,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let me = state.current_user_id();
    let authenticated = state.is_authenticated();
    let liking = state.detail.is_liking();
    let commenting = state.detail.is_commenting();
    let deleting = state.detail.is_deleting();

    let mut action: Option<Action> = None;

    if ui.link("← Back to poems").clicked() {
        action = Some(Action::Navigate(AppView::Listing));
    }
    ui.add_space(12.0);

    match &state.detail.poem {
        Loadable::NotStarted | Loadable::Loading(_) => components::loading(ui, "Loading poem..."),
        Loadable::Failed(message) => {
            if components::error_state(ui, message) {
                action = Some(Action::Navigate(state.current_view));
            }
        }
        Loadable::Loaded(poem) => {
            let is_author = me.is_some_and(|id| poem.is_authored_by(id));

            styles::card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&poem.title)
                            .size(30.0)
                            .strong()
                            .color(colors::TEXT_PRIMARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        components::category_chip(ui, poem.category);
                        if !poem.is_published {
                            ui.colored_label(colors::TEXT_SECONDARY, "Draft");
                        }
                    });
                });

                ui.horizontal(|ui| {
                    ui.colored_label(colors::TEXT_SECONDARY, "By");
                    if ui.link(poem.author.display_name()).clicked() {
                        action = Some(Action::Navigate(AppView::Profile(poem.author.id)));
                    }
                    ui.colored_label(colors::TEXT_SECONDARY, format_date(&poem.created_at));
                });
                ui.add_space(16.0);

                ui.label(
                    egui::RichText::new(&poem.content)
                        .size(17.0)
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(16.0);

                components::tag_chips(ui, &poem.tags);
                ui.add_space(12.0);
                ui.separator();

                ui.horizontal(|ui| {
                    let liked = me.is_some_and(|id| poem.is_liked_by(id));
                    let heart = if liked { "♥" } else { "♡" };
                    let label = egui::RichText::new(format!(
                        "{} {}",
                        heart,
                        pluralize(poem.likes.len(), "like")
                    ))
                    .color(if liked { colors::LIKED } else { colors::TEXT_PRIMARY });
                    if ui.add_enabled(!liking, egui::Button::new(label)).clicked() {
                        action = Some(Action::Like);
                    }

                    if is_author {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if state.detail.confirm_delete {
                                if ui.button("Cancel").clicked() {
                                    action = Some(Action::AskDelete(false));
                                }
                                if ui
                                    .add_enabled(!deleting, styles::danger_button("Yes, delete"))
                                    .clicked()
                                {
                                    action = Some(Action::Delete);
                                }
                                ui.colored_label(colors::ERROR, "Delete this poem?");
                            } else {
                                if ui.add(styles::danger_button("Delete")).clicked() {
                                    action = Some(Action::AskDelete(true));
                                }
                                if ui.button("Edit").clicked() {
                                    action = Some(Action::Navigate(AppView::EditPoem(poem.id)));
                                }
                            }
                        });
                    }
                });

                components::inline_error(ui, state.detail.action_error.as_deref());
            });

            ui.add_space(20.0);
            ui.label(
                egui::RichText::new(format!("Comments ({})", poem.comments.len()))
                    .size(20.0)
                    .strong(),
            );
            ui.add_space(8.0);

            if authenticated {
                ui.add(
                    egui::TextEdit::multiline(&mut state.detail.comment_input)
                        .hint_text("Share your thoughts...")
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!commenting, styles::primary_button("Post Comment"))
                        .clicked()
                    {
                        action = Some(Action::Comment);
                    }
                    if commenting {
                        ui.spinner();
                    }
                });
            } else if ui.link("Log in to join the conversation").clicked() {
                action = Some(Action::Navigate(AppView::Auth));
            }
            ui.add_space(12.0);

            if poem.comments.is_empty() {
                ui.colored_label(colors::TEXT_SECONDARY, "No comments yet.");
            }
            for comment in &poem.comments {
                ui.horizontal(|ui| {
                    if ui.link(&comment.user.username).clicked() {
                        action = Some(Action::Navigate(AppView::Profile(comment.user.id)));
                    }
                    ui.colored_label(colors::TEXT_SECONDARY, format_date(&comment.created_at));
                });
                ui.colored_label(colors::TEXT_PRIMARY, &comment.text);
                ui.add_space(6.0);
                ui.separator();
            }
        }
    }

    match action {
        Some(Action::Navigate(view)) => state.navigate(view),
        Some(Action::Like) => state.toggle_like(),
        Some(Action::Comment) => state.submit_comment(),
        Some(Action::AskDelete(confirm)) => state.detail.confirm_delete = confirm,
        Some(Action::Delete) => state.delete_poem(),
        None => {}
    }
}
