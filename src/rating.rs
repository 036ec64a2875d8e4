//! Five-star rating glyphs.
//!
//! [`render_stars`] turns an average rating into exactly five [`Star`] states.
//! Ratings outside `0..=5` are clamped and a missing or non-finite rating
//! counts as zero.
//!
//! # Examples
//!
//! ```rust
//! use libris::rating::{render_stars, Star};
//!
//! let stars = render_stars(Some(3.5));
//! assert_eq!(
//!     stars,
//!     [Star::Filled, Star::Filled, Star::Filled, Star::Half, Star::Empty]
//! );
//! ```

/// Number of glyphs in a rendered rating.
pub const STAR_COUNT: usize = 5;

/// State of a single rating glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Star {
    Filled,
    Half,
    Empty,
}

impl Star {
    /// Terminal glyph for this state.
    pub fn glyph(&self) -> char {
        match self {
            Star::Filled => '★',
            Star::Half => '⯪',
            Star::Empty => '☆',
        }
    }
}

/// Renders a rating as five ordered glyph states.
///
/// Positions `1..=floor(r)` are filled, position `floor(r) + 1` is half-filled
/// when the fractional part is at least `0.5`, the rest are empty.
pub fn render_stars(rating: Option<f64>) -> [Star; STAR_COUNT] {
    let rating = match rating {
        Some(r) if r.is_finite() => r.clamp(0.0, STAR_COUNT as f64),
        _ => 0.0,
    };

    let filled = rating.floor() as usize;
    let has_half = rating - rating.floor() >= 0.5;

    let mut stars = [Star::Empty; STAR_COUNT];
    for (position, star) in stars.iter_mut().enumerate() {
        if position < filled {
            *star = Star::Filled;
        } else if position == filled && has_half {
            *star = Star::Half;
        }
    }
    stars
}

/// Renders a rating straight to its glyph string, e.g. `★★★⯪☆`.
pub fn star_string(rating: Option<f64>) -> String {
    render_stars(rating).iter().map(Star::glyph).collect()
}
