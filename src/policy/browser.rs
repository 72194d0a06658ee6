//! The set of browsers policies are generated for.
use std::fmt;
use std::str::FromStr;

/// A managed browser whose policies are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Browser {
    /// Google Chrome.
    Chrome,
    /// Brave.
    Brave,
    /// Microsoft Edge.
    Edge,
}

impl Browser {
    /// Every supported browser, in generation order.
    pub const ALL: [Self; 3] = [Self::Chrome, Self::Brave, Self::Edge];

    /// Lowercase identifier used as the policy-source key and in file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Brave => "brave",
            Self::Edge => "edge",
        }
    }

    /// Match a policy-source key exactly; `Chrome` is not `chrome`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == key)
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Browser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown browser '{s}': must be one of chrome, brave, edge")
            })
    }
}
