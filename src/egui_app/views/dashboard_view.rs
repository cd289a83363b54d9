use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::{AppView, Loadable};
use crate::egui_app::views::components;
use crate::shared::PoemView;

/// Totals shown in the stats card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoemStats {
    pub published: usize,
    pub drafts: usize,
    pub likes: usize,
    pub comments: usize,
}

impl PoemStats {
    pub fn of(poems: &[PoemView]) -> Self {
        let published = poems.iter().filter(|p| p.is_published).count();
        Self {
            published,
            drafts: poems.len() - published,
            likes: poems.iter().map(|p| p.likes.len()).sum(),
            comments: poems.iter().map(|p| p.comments.len()).sum(),
        }
    }
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let (username, user_id) = {
        let session = state.session();
        (
            session.user().map(|u| u.username.clone()).unwrap_or_default(),
            session.user_id(),
        )
    };

    let mut next: Option<AppView> = None;

    ui.label(
        egui::RichText::new(format!("Welcome back, {}!", username))
            .size(28.0)
            .strong(),
    );
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.add(styles::primary_button("Write New Poem")).clicked() {
            next = Some(AppView::CreatePoem);
        }
        if ui.button("Edit Profile").clicked() {
            next = Some(AppView::EditProfile);
        }
        if let Some(id) = user_id {
            if ui.button("View Public Profile").clicked() {
                next = Some(AppView::Profile(id));
            }
        }
    });
    ui.add_space(20.0);

    match &state.dashboard {
        Loadable::NotStarted | Loadable::Loading(_) => components::loading(ui, "Loading your poems..."),
        Loadable::Failed(message) => {
            if components::error_state(ui, message) {
                next = Some(AppView::Dashboard);
            }
        }
        Loadable::Loaded(poems) => {
            let stats = PoemStats::of(poems);

            styles::card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new("Quick Stats").size(18.0).strong());
                ui.add_space(6.0);
                egui::Grid::new("dashboard_stats")
                    .num_columns(2)
                    .spacing([40.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Poems published:");
                        ui.label(egui::RichText::new(stats.published.to_string()).strong());
                        ui.end_row();
                        ui.label("Drafts:");
                        ui.label(egui::RichText::new(stats.drafts.to_string()).strong());
                        ui.end_row();
                        ui.label("Total likes:");
                        ui.label(egui::RichText::new(stats.likes.to_string()).strong());
                        ui.end_row();
                        ui.label("Total comments:");
                        ui.label(egui::RichText::new(stats.comments.to_string()).strong());
                        ui.end_row();
                    });
            });
            ui.add_space(20.0);

            ui.label(egui::RichText::new("Your Poems").size(22.0).strong());
            ui.add_space(8.0);

            if poems.is_empty() {
                ui.colored_label(colors::TEXT_SECONDARY, "You haven't published any poems yet.");
                ui.add_space(8.0);
                if ui.add(styles::primary_button("Write Your First Poem")).clicked() {
                    next = Some(AppView::CreatePoem);
                }
            }

            for poem in poems {
                if let Some(view) = components::poem_card(ui, poem) {
                    next = Some(view);
                }
                ui.add_space(12.0);
            }
        }
    }

    if let Some(view) = next {
        state.navigate(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::shared::{AuthorProfile, AuthorSummary, Category, CommentView, LikeView, UserSummary};

    fn poem(likes: usize, comments: usize) -> PoemView {
        draft_or_not(likes, comments, true)
    }

    fn draft_or_not(likes: usize, comments: usize, is_published: bool) -> PoemView {
        let author = UserSummary {
            id: Uuid::new_v4(),
            username: "hughes".to_string(),
        };
        PoemView {
            id: Uuid::new_v4(),
            title: "Hawk Roosting".to_string(),
            content: "I sit in the top of the wood".to_string(),
            category: Category::Nature,
            tags: Vec::new(),
            author: AuthorSummary {
                id: author.id,
                username: author.username.clone(),
                profile: AuthorProfile::default(),
            },
            is_published,
            likes: (0..likes).map(|_| LikeView { user: Uuid::new_v4() }).collect(),
            comments: (0..comments)
                .map(|i| CommentView {
                    id: Uuid::new_v4(),
                    user: author.clone(),
                    text: format!("comment {}", i),
                    created_at: Utc::now(),
                })
                .collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stats_sum_over_poems() {
        let stats = PoemStats::of(&[poem(2, 1), poem(3, 0)]);
        assert_eq!(
            stats,
            PoemStats {
                published: 2,
                drafts: 0,
                likes: 5,
                comments: 1
            }
        );
    }

    #[test]
    fn test_stats_count_drafts_apart() {
        let stats = PoemStats::of(&[poem(1, 0), draft_or_not(0, 2, false), draft_or_not(0, 0, false)]);
        assert_eq!(stats.published, 1);
        assert_eq!(stats.drafts, 2);
        assert_eq!(stats.comments, 2);
    }

    #[test]
    fn test_stats_of_nothing() {
        assert_eq!(
            PoemStats::of(&[]),
            PoemStats {
                published: 0,
                drafts: 0,
                likes: 0,
                comments: 0
            }
        );
    }
}
