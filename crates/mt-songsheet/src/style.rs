//! Shared sheet dimensions and line weights.

/// Padding in inches, added only on the right and bottom of elements.
pub const PADDING: f64 = 0.25;

/// Line width of the header box.
pub const THIN_LW: f64 = 0.01;

/// Line width of melody modifiers and slides.
pub const THINISH_LW: f64 = 0.005;

/// Line width of bold along-sine marks.
pub const THICKER_LW: f64 = 0.02;

/// Line width of hairlines and sine curves.
pub const THINEST_LW: f64 = 0.001;

/// Guitar string thicknesses from thick to thin, in inches.
pub const STRING_THICKNESSES: [f64; 6] = [0.0472, 0.0314, 0.0236, 0.0157, 0.0079, 0.0039];

/// Size of sub and superscripts relative to their root character.
pub const SUBSUP_SIZE_MUL: f64 = 0.65;

/// Options shared by every element of a sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SheetStyle {
    /// Draw strings thin to thick instead of thick to thin.
    pub mirror: bool,
}

impl SheetStyle {
    /// String thicknesses in drawing order.
    pub fn thicknesses(&self) -> [f64; 6] {
        let mut t = STRING_THICKNESSES;
        if self.mirror {
            t.reverse();
        }
        t
    }
}
