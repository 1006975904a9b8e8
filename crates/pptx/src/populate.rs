//! Fill a presentation with slides described by [`SlideSpec`] rows.

use crate::presentation::Presentation;
use crate::slide::Slide;
use deckgen_core::{Result, SlideSpec};

/// Placeholders whose name starts with this receive the slide title.
pub const TITLE_PREFIX: &str = "Title";

/// Placeholders whose name starts with this receive the slide body.
pub const CONTENT_PREFIX: &str = "Content";

/// Append one slide per row, in order.
///
/// Fails on the first row whose layout the template lacks; slides added for
/// earlier rows stay in the presentation.
pub fn populate(presentation: &mut Presentation, rows: &[SlideSpec]) -> Result<()> {
    for (index, row) in rows.iter().enumerate() {
        let slide = presentation.add_slide(&row.layout)?;
        let filled = fill_placeholders(slide, &row.title, &row.body);
        log::debug!(
            "Slide {} ('{}'): filled {} placeholders",
            index + 1,
            row.layout,
            filled
        );
    }

    log::info!("Populated {} slides", rows.len());
    Ok(())
}

/// Set title and body text on the matching placeholders of a slide.
///
/// Empty strings leave placeholders blank. Returns how many were filled.
pub fn fill_placeholders(slide: &mut Slide, title: &str, body: &str) -> usize {
    let mut filled = 0;
    for placeholder in slide.placeholders_mut() {
        if placeholder.name().starts_with(TITLE_PREFIX) && !title.is_empty() {
            placeholder.set_text(title);
            filled += 1;
        } else if placeholder.name().starts_with(CONTENT_PREFIX) && !body.is_empty() {
            placeholder.set_text(body);
            filled += 1;
        }
    }
    filled
}
