use crate::fonts::BuiltinFont;

/// RGB color for drawing operations.
///
/// Each component is in the range 0.0 (none) to 1.0 (full intensity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Create a color from RGB components (each 0.0–1.0).
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    /// Create a color from 8-bit RGB components.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Color {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }
}

/// Horizontal anchor for a text command: where `x` sits relative to the
/// rendered string. The sink resolves Center and Right into a pen
/// position using the font metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Stroke style for outlined shapes and rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Line width in millimetres.
    pub width: f64,
}

/// One positioned drawing instruction.
///
/// Coordinates are millimetres from the page's top-left corner; a text
/// command's `y` is its baseline. Font sizes are points. The layout
/// engine produces these fresh on every render and the sink consumes
/// them immediately; nothing is retained between renders.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Text {
        x: f64,
        y: f64,
        content: String,
        font: BuiltinFont,
        size: f64,
        color: Color,
        align: TextAlign,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Stroke,
    },
    /// The document's single logo asset, stretched into the given box.
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// One fixed-size page of layout output.
#[derive(Debug, Clone)]
pub struct Page {
    /// Page width in millimetres.
    pub width: f64,
    /// Page height in millimetres.
    pub height: f64,
    pub commands: Vec<DrawCmd>,
}

impl Page {
    pub fn new(width: f64, height: f64) -> Self {
        Page {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }
}
