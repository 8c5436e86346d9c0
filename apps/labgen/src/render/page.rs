//! Page geometry for the generated report.

/// Twentieths of a point per inch, the unit DOCX uses for page measurements.
pub const TWIPS_PER_INCH: f32 = 1440.0;

/// Margins of every page, in inches.
///
/// The left margin is wider than the rest to leave binding space for printed
/// submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub margin_left_in: f32,
    pub margin_right_in: f32,
    pub margin_top_in: f32,
    pub margin_bottom_in: f32,
}

impl Default for PageSetup {
    /// Left 1.5", top/right/bottom 1.0".
    fn default() -> Self {
        Self {
            margin_left_in: 1.5,
            margin_right_in: 1.0,
            margin_top_in: 1.0,
            margin_bottom_in: 1.0,
        }
    }
}

/// Page margins converted to twips, ready for the document writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginsTwips {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl PageSetup {
    pub fn margins_twips(&self) -> MarginsTwips {
        MarginsTwips {
            left: inches_to_twips(self.margin_left_in),
            right: inches_to_twips(self.margin_right_in),
            top: inches_to_twips(self.margin_top_in),
            bottom: inches_to_twips(self.margin_bottom_in),
        }
    }
}

pub fn inches_to_twips(inches: f32) -> i32 {
    (inches * TWIPS_PER_INCH).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_left_margin_is_widest() {
        let page = PageSetup::default();
        assert!(page.margin_left_in > page.margin_right_in);
        assert!(page.margin_left_in > page.margin_top_in);
        assert!(page.margin_left_in > page.margin_bottom_in);
    }

    #[test]
    fn test_default_margins_in_twips() {
        let margins = PageSetup::default().margins_twips();
        assert_eq!(
            margins,
            MarginsTwips {
                left: 2160,
                right: 1440,
                top: 1440,
                bottom: 1440,
            }
        );
    }

    #[test]
    fn test_inches_to_twips_rounds() {
        assert_eq!(inches_to_twips(0.0), 0);
        assert_eq!(inches_to_twips(0.75), 1080);
        assert_eq!(inches_to_twips(1.0 / 3.0), 480);
    }
}
