use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which slice of the contract a tranche pays for.
///
/// The first invoice always covers phase units 1 and 2 together
/// ("Termin 1 & 2"); every later unit `n >= 3` is invoiced on its own
/// ("Termin n").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Installment {
    First,
    Unit(u32),
    /// Title that does not follow the termin naming scheme.
    Other(String),
}

impl Installment {
    pub fn title(&self) -> String {
        match self {
            Self::First => String::from("Termin 1 & 2"),
            Self::Unit(n) => format!("Termin {n}"),
            Self::Other(title) => title.clone(),
        }
    }

    /// Installment number shown on the pay button.
    pub fn number(&self) -> Option<u32> {
        match self {
            Self::First => Some(1),
            Self::Unit(n) => Some(*n),
            Self::Other(_) => None,
        }
    }

    pub fn parse(title: &str) -> Self {
        let compact: String = title
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        match compact.strip_prefix("termin") {
            Some("1&2") => Self::First,
            Some(rest) => match rest.parse::<u32>() {
                Ok(n) if n >= 3 => Self::Unit(n),
                _ => Self::Other(title.to_string()),
            },
            None => Self::Other(title.to_string()),
        }
    }
}

impl std::fmt::Display for Installment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl Serialize for Installment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.title())
    }
}

impl<'de> Deserialize<'de> for Installment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let title = String::deserialize(deserializer)?;
        Ok(Self::parse(&title))
    }
}
