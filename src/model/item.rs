// File: ./src/model/item.rs
use serde::Serialize;
use std::fmt;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

pub const UNASSIGNED: &str = "Unassigned";

/// Status as reported by the remote service. Only `complete` carries meaning;
/// every other value is kept verbatim.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ChoreStatus {
    Complete,
    Other(String),
}

impl ChoreStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Complete)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Complete => "complete",
            Self::Other(raw) => raw,
        }
    }
}

impl Default for ChoreStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for ChoreStatus {
    fn from(raw: &str) -> Self {
        if raw == "complete" {
            Self::Complete
        } else {
            Self::Other(raw.to_string())
        }
    }
}

impl From<String> for ChoreStatus {
    fn from(raw: String) -> Self {
        if raw == "complete" {
            Self::Complete
        } else {
            Self::Other(raw)
        }
    }
}

impl fmt::Display for ChoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chore flattened out of the remote payload, with its assignee already
/// resolved through the category lookup.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Chore {
    pub id: String,
    pub name: String,
    pub assigned_to: String,
    pub status: ChoreStatus,
    /// Hour of day (0-23) of `scheduled_at`, in the timestamp's own offset.
    pub hour: Option<u32>,
}

impl Chore {
    pub fn new(id: &str, name: &str, assigned_to: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            assigned_to: assigned_to.to_string(),
            status: ChoreStatus::default(),
            hour: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<ChoreStatus>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_hour(mut self, hour: u32) -> Self {
        self.hour = Some(hour);
        self
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }
}

// --- FIXED TABLES ---
// Declaration order is match order for the query parser.

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FamilyMember {
    Banksy,
    Miles,
    Sophia,
    Malcolm,
    Deborah,
    House,
}

impl FamilyMember {
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Name as it is spoken back, e.g. "Miles".
    pub fn title(&self) -> String {
        title_case(self.as_str())
    }
}

impl fmt::Display for FamilyMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
    Night,
    Today,
    All,
}

impl Period {
    pub const WHOLE_DAY: (u32, u32) = (0, 24);

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Half-open hour interval `[start, end)` covered by this period.
    /// Evening and night share a range.
    pub fn hours(&self) -> (u32, u32) {
        match self {
            Period::Morning => (5, 12),
            Period::Afternoon => (12, 17),
            Period::Evening | Period::Night => (17, 23),
            Period::Today | Period::All => Self::WHOLE_DAY,
        }
    }

    /// `today` and `all` never filter on hour.
    pub fn spans_whole_day(&self) -> bool {
        matches!(self, Period::Today | Period::All)
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        let (start, end) = self.hours();
        start <= hour && hour < end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_raw() {
        assert!(ChoreStatus::from("complete").is_done());
        assert!(!ChoreStatus::from("pending").is_done());
        assert!(!ChoreStatus::from("Complete").is_done());
        assert_eq!(ChoreStatus::from("pending").as_str(), "pending");
    }

    #[test]
    fn test_table_order() {
        let names: Vec<&str> = FamilyMember::all().map(|m| m.as_str()).collect();
        assert_eq!(
            names,
            ["banksy", "miles", "sophia", "malcolm", "deborah", "house"]
        );
        let periods: Vec<String> = Period::all().map(|p| p.to_string()).collect();
        assert_eq!(
            periods,
            ["morning", "afternoon", "evening", "night", "today", "all"]
        );
    }

    #[test]
    fn test_evening_and_night_share_hours() {
        assert_eq!(Period::Evening.hours(), Period::Night.hours());
        assert!(Period::Night.contains_hour(17));
        assert!(!Period::Night.contains_hour(23));
        assert!(Period::Morning.contains_hour(5));
        assert!(!Period::Morning.contains_hour(12));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(FamilyMember::Deborah.title(), "Deborah");
        assert_eq!(title_case("mIlES"), "Miles");
        assert_eq!(title_case("mary-jane"), "Mary-Jane");
    }
}
