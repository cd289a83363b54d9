use eframe::egui;

use crate::egui_app::helpers::{format_date, pluralize};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::{AppView, Loadable};
use crate::egui_app::views::components;
use crate::shared::UserSummary;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let me = state.current_user_id();
    let follow_pending = state.profile.is_following_pending();

    let mut next: Option<AppView> = None;
    let mut follow = false;

    match &state.profile.data {
        Loadable::NotStarted | Loadable::Loading(_) => components::loading(ui, "Loading profile..."),
        Loadable::Failed(message) => {
            if components::error_state(ui, message) {
                next = Some(state.current_view);
            }
        }
        Loadable::Loaded((user, poems)) => {
            styles::card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(user.display_name()).size(28.0).strong());
                        ui.colored_label(colors::TEXT_SECONDARY, format!("@{}", user.username));
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if me == Some(user.id) {
                            if ui.button("Edit Profile").clicked() {
                                next = Some(AppView::EditProfile);
                            }
                        } else {
                            let following = me.is_some_and(|id| user.is_followed_by(id));
                            let button = if following {
                                egui::Button::new("Unfollow")
                            } else {
                                styles::primary_button("Follow")
                            };
                            if ui.add_enabled(!follow_pending, button).clicked() {
                                follow = true;
                            }
                        }
                    });
                });
                ui.add_space(8.0);

                if let Some(bio) = &user.profile.bio {
                    ui.colored_label(colors::TEXT_PRIMARY, bio);
                    ui.add_space(4.0);
                }
                ui.horizontal(|ui| {
                    if let Some(location) = &user.profile.location {
                        ui.colored_label(colors::TEXT_SECONDARY, format!("📍 {}", location));
                    }
                    ui.colored_label(
                        colors::TEXT_SECONDARY,
                        format!("Joined {}", format_date(&user.created_at)),
                    );
                });
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label(pluralize(user.followers.len(), "follower"));
                    ui.label("·");
                    ui.label(format!("{} following", user.following.len()));
                    ui.label("·");
                    ui.label(pluralize(poems.len(), "poem"));
                });

                if let Some(view) = people_row(ui, "Followers:", &user.followers) {
                    next = Some(view);
                }
                if let Some(view) = people_row(ui, "Following:", &user.following) {
                    next = Some(view);
                }

                components::inline_error(ui, state.profile.action_error.as_deref());
            });
            ui.add_space(20.0);

            ui.label(egui::RichText::new("Poems").size(22.0).strong());
            ui.add_space(8.0);
            if poems.is_empty() {
                ui.colored_label(colors::TEXT_SECONDARY, "No published poems yet.");
            }
            for poem in poems {
                if let Some(view) = components::poem_card(ui, poem) {
                    next = Some(view);
                }
                ui.add_space(12.0);
            }
        }
    }

    if follow {
        state.toggle_follow();
    }
    if let Some(view) = next {
        state.navigate(view);
    }
}

fn people_row(ui: &mut egui::Ui, label: &str, people: &[UserSummary]) -> Option<AppView> {
    if people.is_empty() {
        return None;
    }
    let mut next = None;
    ui.horizontal_wrapped(|ui| {
        ui.colored_label(colors::TEXT_SECONDARY, label);
        for person in people {
            if ui.link(&person.username).clicked() {
                next = Some(AppView::Profile(person.id));
            }
        }
    });
    next
}
