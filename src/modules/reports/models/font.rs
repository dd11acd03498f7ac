use std::fmt;
use std::str::FromStr;

/// Standard PDF font family used for every text run of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontName {
    #[default]
    Helvetica,
    Times,
    Courier,
}

impl FromStr for FontName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "helvetica" | "arial" | "sans" => Ok(FontName::Helvetica),
            "times" | "times-roman" | "serif" => Ok(FontName::Times),
            "courier" | "mono" => Ok(FontName::Courier),
            other => Err(format!("Unsupported font family: {}", other)),
        }
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontName::Helvetica => write!(f, "helvetica"),
            FontName::Times => write!(f, "times"),
            FontName::Courier => write!(f, "courier"),
        }
    }
}
