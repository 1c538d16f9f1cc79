/// The two standard PDF fonts the invoice renders with. Standard-14
/// fonts are available in every PDF viewer without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFont {
    /// PDF resource name used in content streams.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
        }
    }

    /// PDF BaseFont name.
    pub fn pdf_base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }
}

/// Helvetica advance widths for ASCII 32..=126 in 1/1000 em, from the
/// Adobe AFM files. Eight glyphs per row.
const HELVETICA_WIDTHS: [u16; 95] = [
    // space ! " # $ % & '
    278, 278, 355, 556, 556, 889, 667, 191,
    // ( ) * + , - . /
    333, 333, 389, 584, 278, 333, 278, 278,
    // 0 1 2 3 4 5 6 7
    556, 556, 556, 556, 556, 556, 556, 556,
    // 8 9 : ; < = > ?
    556, 556, 278, 278, 584, 584, 584, 556,
    // @ A B C D E F G
    1015, 667, 667, 722, 722, 667, 611, 778,
    // H I J K L M N O
    722, 278, 500, 667, 556, 833, 722, 778,
    // P Q R S T U V W
    667, 778, 722, 667, 611, 722, 667, 944,
    // X Y Z [ \ ] ^ _
    667, 667, 611, 278, 278, 278, 469, 556,
    // ` a b c d e f g
    333, 556, 556, 500, 556, 556, 278, 556,
    // h i j k l m n o
    556, 222, 222, 500, 222, 833, 556, 556,
    // p q r s t u v w
    556, 556, 333, 500, 278, 556, 500, 722,
    // x y z { | } ~
    500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths, same layout as above.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // space ! " # $ % & '
    278, 333, 474, 556, 556, 889, 722, 238,
    // ( ) * + , - . /
    333, 333, 389, 584, 278, 333, 278, 278,
    // 0 1 2 3 4 5 6 7
    556, 556, 556, 556, 556, 556, 556, 556,
    // 8 9 : ; < = > ?
    556, 556, 333, 333, 584, 584, 584, 611,
    // @ A B C D E F G
    975, 722, 722, 722, 722, 667, 611, 778,
    // H I J K L M N O
    722, 278, 556, 722, 611, 833, 722, 778,
    // P Q R S T U V W
    667, 778, 722, 667, 611, 722, 667, 944,
    // X Y Z [ \ ] ^ _
    667, 667, 611, 333, 278, 333, 584, 556,
    // ` a b c d e f g
    333, 556, 611, 556, 611, 556, 333, 611,
    // h i j k l m n o
    611, 278, 278, 556, 278, 889, 611, 611,
    // p q r s t u v w
    611, 611, 389, 556, 333, 611, 556, 778,
    // x y z { | } ~
    556, 556, 500, 389, 280, 389, 584,
];

/// Em-dash advance width, identical in both faces. The layout uses the
/// em dash as its empty-description placeholder, so it must measure
/// correctly even though it sits outside the ASCII table.
const EM_DASH_WIDTH: u16 = 1000;

/// Fallback width for anything outside the table (1/1000 em).
const DEFAULT_WIDTH: u16 = 278;

/// Font metrics for the built-in fonts.
pub struct FontMetrics;

impl FontMetrics {
    fn widths(font: BuiltinFont) -> &'static [u16; 95] {
        match font {
            BuiltinFont::Helvetica => &HELVETICA_WIDTHS,
            BuiltinFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of a single character in 1/1000 em units.
    pub fn char_width(font: BuiltinFont, ch: char) -> u16 {
        match ch as u32 {
            0x2014 => EM_DASH_WIDTH,
            code @ 0x20..=0x7e => Self::widths(font)[(code - 0x20) as usize],
            _ => DEFAULT_WIDTH,
        }
    }

    /// Width of a whole string in points at the given size.
    pub fn measure_text(text: &str, font: BuiltinFont, font_size: f64) -> f64 {
        let units: u32 = text
            .chars()
            .map(|ch| u32::from(Self::char_width(font, ch)))
            .sum();
        f64::from(units) * font_size / 1000.0
    }
}
