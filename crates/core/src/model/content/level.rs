use std::fmt;
use std::str::FromStr;

/// Tier name of a level. Every module offers the same three tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LevelName {
    Hustler,
    Mastermind,
    Unstoppable,
}

/// Raised when a level name is none of the known tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevelName(pub String);

impl fmt::Display for UnknownLevelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown level type `{}`", self.0)
    }
}

impl std::error::Error for UnknownLevelName {}

impl LevelName {
    pub const ALL: [LevelName; 3] = [Self::Hustler, Self::Mastermind, Self::Unstoppable];

    /// Decodes a raw tier name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "HUSTLER" => Some(Self::Hustler),
            "MASTERMIND" => Some(Self::Mastermind),
            "UNSTOPPABLE" => Some(Self::Unstoppable),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hustler => "HUSTLER",
            Self::Mastermind => "MASTERMIND",
            Self::Unstoppable => "UNSTOPPABLE",
        }
    }
}

impl FromStr for LevelName {
    type Err = UnknownLevelName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s).ok_or_else(|| UnknownLevelName(s.to_owned()))
    }
}

impl fmt::Display for LevelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_any_case() {
        assert_eq!(LevelName::decode("hustler"), Some(LevelName::Hustler));
        assert_eq!(LevelName::decode("MasterMind"), Some(LevelName::Mastermind));
        assert_eq!(LevelName::decode(" UNSTOPPABLE "), Some(LevelName::Unstoppable));
    }

    #[test]
    fn rejects_unknown_tier() {
        let err = "legend".parse::<LevelName>().unwrap_err();
        assert_eq!(err, UnknownLevelName("legend".into()));
        assert_eq!(err.to_string(), "unknown level type `legend`");
    }

    #[test]
    fn display_is_canonical_uppercase() {
        let names: Vec<String> = LevelName::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["HUSTLER", "MASTERMIND", "UNSTOPPABLE"]);
    }
}
