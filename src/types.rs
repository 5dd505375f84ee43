//! Core types for spark-ellipsis.
//!
//! Colors and attributes describe how the ellipsis span is painted. The
//! policy enums describe where the ellipsis goes and when fitting kicks in.

use serde::Deserialize;

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Alpha 255 = fully opaque, 0 = fully transparent.
/// Special value: r=-1 means "terminal default" (let terminal pick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Create an ANSI palette color (0-255).
    ///
    /// Uses special marker: r=-2, g=palette_index.
    pub const fn ansi(index: u8) -> Self {
        Self {
            r: -2,
            g: index as i16,
            b: 0,
            a: 255,
        }
    }

    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    #[inline]
    pub const fn is_ansi(&self) -> bool {
        self.r == -2
    }

    /// ANSI palette index (only meaningful if `is_ansi()`).
    #[inline]
    pub const fn ansi_index(&self) -> u8 {
        self.g as u8
    }

    /// Parse a hex color: `#RGB`, `#RRGGBB` or `#RRGGBBAA` (`#` optional).
    ///
    /// ```
    /// use spark_ellipsis::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#f00"), Some(Rgba::RED));
    /// assert_eq!(Rgba::from_hex("808080"), Some(Rgba::GRAY));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => {
                let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
                Some(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Parse any supported color format.
    ///
    /// Supports hex, the named constants above (`"gray"`/`"grey"`, `"red"`, ...),
    /// `"ansi:N"` palette entries and `"default"` for the terminal default.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let lower = input.to_lowercase();
        let named = match lower.as_str() {
            "default" | "inherit" | "currentcolor" => Some(Self::TERMINAL_DEFAULT),
            "black" => Some(Self::BLACK),
            "white" => Some(Self::WHITE),
            "red" => Some(Self::RED),
            "green" => Some(Self::GREEN),
            "blue" => Some(Self::BLUE),
            "yellow" => Some(Self::YELLOW),
            "cyan" => Some(Self::CYAN),
            "magenta" => Some(Self::MAGENTA),
            "gray" | "grey" => Some(Self::GRAY),
            _ => None,
        };
        if named.is_some() {
            return named;
        }

        if let Some(index) = lower.strip_prefix("ansi:") {
            return index.trim().parse::<u8>().ok().map(Self::ansi);
        }

        Self::from_hex(input)
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const INVERSE = 1 << 5;
        const HIDDEN = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

impl Attr {
    /// Look up a single attribute by its lowercase config name.
    pub fn from_config_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "bold" => Some(Self::BOLD),
            "dim" => Some(Self::DIM),
            "italic" => Some(Self::ITALIC),
            "underline" => Some(Self::UNDERLINE),
            "blink" => Some(Self::BLINK),
            "inverse" | "reverse" => Some(Self::INVERSE),
            "hidden" => Some(Self::HIDDEN),
            "strikethrough" => Some(Self::STRIKETHROUGH),
            _ => None,
        }
    }
}

// =============================================================================
// Ellipsis policy
// =============================================================================

/// Where the ellipsis marker is placed when text must be truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EllipsisPosition {
    /// After a trimmed prefix: `"abc..."`.
    #[default]
    End,
    /// Between a trimmed left part and a trimmed right part: `"abc...ij"`.
    Middle,
}

/// How the terminal measurement oracle breaks lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Break at any grapheme boundary.
    #[default]
    Char,
    /// Break at word boundaries, force-breaking words wider than the line.
    Word,
}

/// When already-fitting text is returned untouched.
///
/// A host widget measuring its own text typically only skips truncation when
/// the text is strictly shorter than the limit, so text filling exactly
/// `limit` lines still gets an ellipsis appended. `WithinLimit` treats an
/// exact fill as fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortCircuit {
    /// Unchanged iff `lines < limit`.
    BelowLimit,
    /// Unchanged iff `lines <= limit`.
    #[default]
    WithinLimit,
}

impl ShortCircuit {
    /// Whether text occupying `lines` lines can be shown as-is under `limit`.
    #[inline]
    pub fn already_fits(self, lines: usize, limit: usize) -> bool {
        match self {
            Self::BelowLimit => lines < limit,
            Self::WithinLimit => lines <= limit,
        }
    }
}

/// How the ellipsis span is painted.
///
/// `size` is forwarded to hosts that can scale glyphs. Terminal cells have a
/// fixed size, so the ANSI renderer ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EllipsisStyle {
    pub fg: Rgba,
    pub attrs: Attr,
    pub size: Option<u16>,
}

impl Default for EllipsisStyle {
    fn default() -> Self {
        Self {
            fg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
            size: None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
