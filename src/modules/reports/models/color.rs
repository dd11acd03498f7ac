use std::fmt;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const DARK_GREY: Color = Color::rgb(0xa9, 0xa9, 0xa9);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex color: {}", hex));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| format!("Invalid hex color {}: {}", hex, e))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Same color at `alpha` opacity over a white page
    pub fn tint(&self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let blend = |c: u8| (255.0 - alpha * (255.0 - c as f32)).round() as u8;
        Self::rgb(blend(self.r), blend(self.g), blend(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
