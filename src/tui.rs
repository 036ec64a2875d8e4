//! TUI utilities shared by the Libris terminal front-end.
//!
//! Formatting helpers that turn display records, ratings and the banner into
//! styled ratatui lines. Only available with the `tui` feature.
//!
//! # Examples
//!
//! ```rust
//! use libris::tui::{format_book_title, format_stars};
//! use libris::display::DisplayBook;
//!
//! let book = DisplayBook {
//!     title: "Dune".to_string(),
//!     authors_text: "Frank Herbert".to_string(),
//!     thumbnail_url: None,
//!     rating: 4.5,
//!     ratings_count: 120,
//! };
//!
//! let title = format_book_title(&book);
//! let stars = format_stars(book.rating, book.ratings_count);
//! ```

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::{
    display::DisplayBook,
    rating::{Star, render_stars},
    state::{Banner, BannerKind, ToggleAction},
};

/// Formats a book's title and authors for list display.
pub fn format_book_title(book: &DisplayBook) -> Line<'static> {
    let mut spans = vec![Span::styled(
        book.title.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if !book.authors_text.is_empty() {
        spans.push(Span::raw(" by "));
        spans.push(Span::styled(
            book.authors_text.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    Line::from(spans)
}

/// Formats a rating as five colored star glyphs followed by the ratings count.
pub fn format_stars(rating: f64, ratings_count: u64) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = render_stars(Some(rating))
        .iter()
        .map(|star| {
            let color = match star {
                Star::Filled | Star::Half => Color::Yellow,
                Star::Empty => Color::DarkGray,
            };
            Span::styled(star.glyph().to_string(), Style::default().fg(color))
        })
        .collect();

    spans.push(Span::styled(
        format!(" ({})", ratings_count),
        Style::default().fg(Color::DarkGray),
    ));

    Line::from(spans)
}

/// Formats the wishlist control of a book for its current [`ToggleAction`].
///
/// A disabled control is dimmed and does nothing when pressed.
pub fn format_toggle(action: ToggleAction) -> Span<'static> {
    match action {
        ToggleAction::Add => Span::styled("[+ wishlist]", Style::default().fg(Color::Green)),
        ToggleAction::Remove => Span::styled("[- remove]", Style::default().fg(Color::Red)),
        ToggleAction::Disabled => Span::styled(
            "[✓ on wishlist]",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        ),
        ToggleAction::Pending => Span::styled("[…]", Style::default().fg(Color::DarkGray)),
    }
}

/// Creates a styled status message for TUI display.
pub fn create_status_message(prefix: &str, message: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}:", prefix),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(message.to_string(), Style::default().fg(color)),
    ])
}

/// Formats the banner, colored by its kind.
pub fn format_banner(banner: &Banner) -> Line<'static> {
    match banner.kind {
        BannerKind::Info => create_status_message("Info", &banner.message, Color::Blue),
        BannerKind::Error => create_status_message("Error", &banner.message, Color::Red),
    }
}

/// Truncates text to fit within a specified width, counted in characters.
///
/// # Examples
///
/// ```rust
/// use libris::tui::truncate_text;
///
/// let truncated = truncate_text("This is a very long text", 10);
/// assert_eq!(truncated, "This is...");
/// ```
pub fn truncate_text(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else if width > 3 {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        text.chars().take(width).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Hello World", 5), "He...");
        assert_eq!(truncate_text("Hi", 10), "Hi");
        assert_eq!(truncate_text("Test", 3), "Tes");
        assert_eq!(truncate_text("Émile Zola", 6), "Émi...");
    }

    #[test]
    fn test_format_stars() {
        assert_eq!(line_text(&format_stars(3.5, 12)), "★★★⯪☆ (12)");
    }

    #[test]
    fn test_format_book_title_without_authors() {
        let book = DisplayBook {
            title: "Anonymous".to_string(),
            authors_text: String::new(),
            thumbnail_url: None,
            rating: 0.0,
            ratings_count: 0,
        };
        assert_eq!(line_text(&format_book_title(&book)), "Anonymous");
    }

    #[test]
    fn test_format_banner() {
        let line = format_banner(&Banner::info("No books matched your search."));
        assert_eq!(line_text(&line), "Info: No books matched your search.");
    }
}
