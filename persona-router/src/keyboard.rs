//! Menu keyboard: topics laid out as a grid of (label, callback id) buttons.

use persona_core::{KeyboardButton, KeyboardLayout};

use crate::registry::Topic;

/// Splits `topics` into rows of `row_size` buttons, keeping order; the last row may be shorter.
/// A `row_size` of 0 is treated as 1.
pub fn build_keyboard(topics: &[Topic], row_size: usize) -> KeyboardLayout {
    let rows = topics
        .chunks(row_size.max(1))
        .map(|chunk| {
            chunk
                .iter()
                .map(|t| KeyboardButton::new(t.label.clone(), t.callback_id.clone()))
                .collect()
        })
        .collect();
    KeyboardLayout::new(rows)
}
