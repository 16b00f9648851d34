//! Immediate-mode drawing surface the host hands to every render call.
//!
//! Widgets return `true` on the frame they were activated. Labels are
//! scoped by the innermost child region, so identical buttons on different
//! cards stay distinguishable.

use crate::host::Texture;

/// Straight-alpha RGBA colour, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const RED: Color = Color([1.0, 0.0, 0.0, 1.0]);
}

/// Hue of the `<`/`>` move buttons.
pub const MOVE_BUTTON_HUE: f32 = 3.0 / 7.0;
/// Hue of the `NEW` badge.
pub const NEW_BADGE_HUE: f32 = 6.0 / 7.0;

/// Size argument meaning "fill the available width".
pub const FULL_WIDTH: f32 = -1.0;

pub trait Ui {
    /// Begin a window. `open` is cleared when the user closes it.
    ///
    /// Every call must be paired with [`Ui::end_window`], even when the
    /// window is collapsed and this returns `false`.
    fn begin_window(&mut self, title: &str, first_use_size: [f32; 2], open: &mut bool) -> bool;
    fn end_window(&mut self);

    /// Begin a scrollable child region. A zero size component fills the
    /// available space.
    fn begin_child(&mut self, id: &str, size: [f32; 2], border: bool);
    fn end_child(&mut self);

    /// Start a table layout with `count` columns.
    fn columns(&mut self, count: i32);
    fn next_column(&mut self);

    fn text(&mut self, text: &str);
    fn text_colored(&mut self, color: Color, text: &str);

    fn button(&mut self, label: &str) -> bool;
    /// A button of an explicit size; [`FULL_WIDTH`] stretches it.
    fn button_sized(&mut self, label: &str, size: [f32; 2]) -> bool;
    /// A button tinted with the given hue (`0.0..1.0`).
    fn button_hued(&mut self, label: &str, hue: f32) -> bool;

    fn input_text(&mut self, label: &str, value: &mut String) -> bool;
    fn input_int(&mut self, label: &str, value: &mut i32) -> bool;
    fn radio_button(&mut self, label: &str, active: bool) -> bool;

    fn image(&mut self, texture: &Texture, size: [f32; 2]);

    fn same_line(&mut self);
    /// Continue on the current line at `x` from the start of the region,
    /// which lets widgets draw on top of the previous one.
    fn same_line_at(&mut self, x: f32);
    fn separator(&mut self);

    /// Whether the UI currently wants mouse or keyboard input.
    fn wants_input(&self) -> bool;
}
