//! Theme Module
//!
//! Color scheme and styling for the desktop client:
//!
//! - Color constants for the parchment theme
//! - Frame builders for the top bar, pages, poem cards and chips
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//!
//! styles::card_frame().show(ui, |ui| {
//!     ui.colored_label(colors::TEXT_PRIMARY, "Ode to a Nightingale");
//! });
//! ```

pub mod colors;
pub mod styles;
