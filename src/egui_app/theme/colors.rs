//! Color Constants for the Parchment Theme
//!
//! Ink-on-paper palette: dark walnut chrome around warm parchment pages.

use eframe::egui::Color32;

/// Top bar background - Walnut
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x3E, 0x2A, 0x24);

/// Page background - Parchment
pub const PAGE_BG: Color32 = Color32::from_rgb(0xF7, 0xF2, 0xEC);

/// Poem card background - Light parchment
pub const CARD_BG: Color32 = Color32::from_rgb(0xFD, 0xFA, 0xF5);

/// Card border - Muted tan
pub const CARD_BORDER: Color32 = Color32::from_rgb(0xD8, 0xC8, 0xB4);

/// Card hover background
pub const CARD_HOVER: Color32 = Color32::from_rgb(0xF0, 0xE6, 0xDA);

/// Category and tag chips
pub const CHIP_BG: Color32 = Color32::from_rgb(0xEA, 0xDB, 0xC8);

/// Form input background
pub const INPUT_BG: Color32 = Color32::from_rgb(0xFF, 0xFD, 0xF9);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF0, 0xE0, 0xD6);

/// Poem body text - Ink
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0x2F, 0x1E, 0x1A);

/// Bylines, dates and counts
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x8B, 0x7B, 0x6B);

/// Links and highlights - Oxblood
pub const ACCENT: Color32 = Color32::from_rgb(0x8C, 0x2F, 0x39);

/// Button primary background
pub const BUTTON_PRIMARY: Color32 = Color32::from_rgb(0x5C, 0x3A, 0x2C);

/// Button primary hover
pub const BUTTON_PRIMARY_HOVER: Color32 = Color32::from_rgb(0x6D, 0x4B, 0x3D);

/// Button secondary background
pub const BUTTON_SECONDARY: Color32 = Color32::from_rgb(0xC7, 0xB2, 0x9A);

/// Filled heart
pub const LIKED: Color32 = Color32::from_rgb(0xC6, 0x28, 0x28);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xC6, 0x45, 0x45);

/// Destructive button background
pub const DANGER: Color32 = Color32::from_rgb(0xB0, 0x3A, 0x2E);

/// Separator/divider color
pub const SEPARATOR: Color32 = Color32::from_rgb(0xD0, 0xC0, 0xB0);
