//! Default sizes and spacings (canvas units)

use crate::types::Length;

pub const CANVAS_WIDTH: Length = Length::units(1200.0);
pub const CANVAS_HEIGHT: Length = Length::units(800.0);
pub const CANVAS_PADDING: Length = Length::units(50.0);

pub const SYMBOL_SIZE: Length = Length::units(40.0);
pub const SYMBOL_STROKE_WIDTH: Length = Length::units(2.0);
pub const SYMBOL_SPACING: Length = Length::units(80.0);

pub const VERTICAL_SPACING: Length = Length::units(120.0);
pub const HORIZONTAL_SPACING: Length = Length::units(100.0);

pub const CONNECTION_STROKE_WIDTH: Length = Length::units(2.0);
pub const MARRIAGE_LINE_LENGTH: Length = Length::units(60.0);
pub const CHILD_CONNECTION_OFFSET: Length = Length::units(20.0);

pub const CONNECTION_STROKE: &str = "#000000";
