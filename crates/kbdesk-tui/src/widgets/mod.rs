mod articles;
mod chat;
mod popup;
mod status_bar;
mod tabs;

pub use articles::ArticlesWidget;
pub use chat::ChatWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
pub use tabs::TabsWidget;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Make server text safe for a single table cell: control characters
/// (escape sequences, newlines, tabs) become spaces.
pub fn sanitize_cell(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Like [`sanitize_cell`] but keeps line breaks for multi-line panes
pub fn sanitize_block(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\r')
        .map(|c| if c.is_control() && c != '\n' { ' ' } else { c })
        .collect()
}

/// Truncate to a display width, appending an ellipsis when cut
pub fn truncate_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}
