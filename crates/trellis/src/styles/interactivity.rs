//! Tooltip and cursor translation.

use trellis_core::{
    source::{CursorType, InteractivityStyle},
    target::{PredefinedCursor, Shape},
};

/// Sets the tooltip and cursor of a shape. Empty tooltips and cursors without a
/// predefined counterpart leave the shape unchanged.
pub fn apply_interactivity(shape: &mut Shape, style: &InteractivityStyle) {
    if let Some(tooltip) = style.tooltip.as_deref().filter(|t| !t.is_empty()) {
        shape.set_tooltip(tooltip);
    }

    if let Some(cursor) = style.cursor.and_then(translate_cursor) {
        shape.set_cursor(cursor);
    }
}

/// Maps a source cursor to a predefined target cursor.
///
/// # Examples
///
/// ```
/// # use trellis::styles::interactivity::translate_cursor;
/// # use trellis_core::{source::CursorType, target::PredefinedCursor};
/// assert_eq!(translate_cursor(CursorType::WaitCursor), Some(PredefinedCursor::Wait));
/// assert_eq!(translate_cursor(CursorType::Copy), None);
/// ```
pub fn translate_cursor(cursor: CursorType) -> Option<PredefinedCursor> {
    let cursor = match cursor {
        CursorType::Default
        | CursorType::Alias
        | CursorType::Cell
        | CursorType::Copy
        | CursorType::NoDrop
        | CursorType::VText
        | CursorType::Custom => return None,
        CursorType::AppStarting => PredefinedCursor::AppStarting,
        CursorType::Arrow => PredefinedCursor::Arrow,
        CursorType::Cross => PredefinedCursor::Cross,
        CursorType::Hand => PredefinedCursor::Hand,
        CursorType::Help => PredefinedCursor::Help,
        CursorType::HSplit => PredefinedCursor::HSplit,
        CursorType::IBeam => PredefinedCursor::IBeam,
        CursorType::No => PredefinedCursor::No,
        CursorType::NoMove2D => PredefinedCursor::NoMove2D,
        CursorType::NoMoveHoriz => PredefinedCursor::NoMoveH,
        CursorType::NoMoveVert => PredefinedCursor::NoMoveV,
        CursorType::PanEast => PredefinedCursor::PanEast,
        CursorType::PanNE => PredefinedCursor::PanNorthEast,
        CursorType::PanNorth => PredefinedCursor::PanNorth,
        CursorType::PanNW => PredefinedCursor::PanNorthWest,
        CursorType::PanSE => PredefinedCursor::PanSouthEast,
        CursorType::PanSouth => PredefinedCursor::PanSouth,
        CursorType::PanSW => PredefinedCursor::PanSouthWest,
        CursorType::PanWest => PredefinedCursor::PanWest,
        CursorType::SizeAll => PredefinedCursor::SizeAll,
        CursorType::SizeNESW => PredefinedCursor::SizeNESW,
        CursorType::SizeNS => PredefinedCursor::SizeNS,
        CursorType::SizeNWSE => PredefinedCursor::SizeNWSE,
        CursorType::SizeWE => PredefinedCursor::SizeWE,
        CursorType::UpArrow => PredefinedCursor::UpArrow,
        CursorType::VSplit => PredefinedCursor::VSplit,
        CursorType::WaitCursor => PredefinedCursor::Wait,
    };
    Some(cursor)
}
