//! Tests for bitmap glyph lookup and text metrics

#[cfg(test)]
mod tests {
    use paeviz::render::font::{FontScale, glyph};

    // Tests 12 pt text at 300 DPI uses a scale of five
    // Verified by dropping the cap height ratio
    #[test]
    fn test_scale_for_figure_text() {
        assert_eq!(FontScale::for_points(12.0, 300.0).factor(), 5);
    }

    // Tests tiny text never drops below one pixel per font pixel
    // Verified by removing the lower bound
    #[test]
    fn test_scale_lower_bound() {
        assert_eq!(FontScale::for_points(1.0, 72.0).factor(), 1);
        assert_eq!(FontScale::new(0).factor(), 1);
    }

    // Tests text width counts the advance between glyphs only
    // Verified by adding a trailing advance
    #[test]
    fn test_text_metrics() {
        let scale = FontScale::new(2);

        assert_eq!(scale.text_width(""), 0);
        assert_eq!(scale.text_width("A"), 10);
        assert_eq!(scale.text_width("AB"), 22);
        assert_eq!(scale.text_width("PAE (Å)"), 82);
        assert_eq!(scale.text_height(), 14);
    }

    // Tests glyph lookup for ASCII, the angstrom sign and fallbacks
    // Verified by mapping unknown characters to a blank glyph
    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph(' '), [0; 7]);
        assert_eq!(glyph('A'), [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]);
        assert_ne!(glyph('Å'), glyph('A'));
        assert_eq!(glyph('é'), glyph('?'));
    }

    // Tests the last printable ASCII glyph closes the table
    // Verified by dropping the final row so '~' falls back
    #[test]
    fn test_glyph_table_ends_at_tilde() {
        assert_eq!(glyph('~'), [0x00, 0x00, 0x08, 0x15, 0x02, 0x00, 0x00]);
        assert_eq!(glyph('}'), [0x08, 0x04, 0x04, 0x02, 0x04, 0x04, 0x08]);
        assert_ne!(glyph('~'), glyph('?'));
    }
}
