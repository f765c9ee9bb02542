use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const CURRENT_VERSION: i32 = 1;

/// Free-form subject attributes, usually `teacher` and `room`.
pub type SubjectDetails = BTreeMap<String, String>;

/// `(start_time, end_time)`
pub type Period = (String, String);

/// `[day, week_type, subject, period]`, all stored as strings.
pub type ScheduleEntry = Vec<String>;

/// 課表文件 (USF)
///
/// Fields are public and the mutators never check anything; call
/// `validate()` before relying on the invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usf {
    pub version: i32,
    pub subjects: BTreeMap<String, SubjectDetails>,
    pub periods: Vec<Period>,
    pub timetable: Vec<ScheduleEntry>,
}

impl Default for Usf {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            subjects: BTreeMap::new(),
            periods: Vec::new(),
            timetable: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekType {
    All,
    Even,
    Odd,
}

impl WeekType {
    pub const VALUES: [&'static str; 3] = ["all", "even", "odd"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Even => "even",
            Self::Odd => "odd",
        }
    }

    /// Whether an entry of this type is held in the given week (1-based).
    pub fn applies_to_week(&self, week: u32) -> bool {
        match self {
            Self::All => true,
            Self::Even => week % 2 == 0,
            Self::Odd => week % 2 == 1,
        }
    }
}

impl FromStr for WeekType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "even" => Ok(Self::Even),
            "odd" => Ok(Self::Odd),
            other => Err(format!("unknown week type '{}'", other)),
        }
    }
}

impl fmt::Display for WeekType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<WeekType> for String {
    fn from(week_type: WeekType) -> Self {
        week_type.as_str().to_string()
    }
}

/// Typed, borrowed view of a well-formed timetable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntryView<'a> {
    pub day: u8,
    pub week_type: WeekType,
    pub subject: &'a str,
    pub period: usize,
}

impl<'a> ScheduleEntryView<'a> {
    /// Returns `None` unless the entry has four items, a day in 1..=7,
    /// a known week type and a positive period number. Subject and
    /// period references are not resolved.
    pub fn parse(entry: &'a [String]) -> Option<Self> {
        let [day, week_type, subject, period] = entry else {
            return None;
        };

        let day = day.parse::<u8>().ok().filter(|d| (1..=7).contains(d))?;
        let week_type = week_type.parse::<WeekType>().ok()?;
        let period = period.parse::<usize>().ok().filter(|p| *p >= 1)?;

        Some(Self {
            day,
            week_type,
            subject: subject.as_str(),
            period,
        })
    }
}

impl Usf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(&self, name: &str) -> Option<&SubjectDetails> {
        self.subjects.get(name)
    }

    /// Period by its 1-based number.
    pub fn period(&self, number: usize) -> Option<&Period> {
        number.checked_sub(1).and_then(|i| self.periods.get(i))
    }

    /// Well-formed entries in stored order; malformed ones are skipped.
    pub fn entries(&self) -> impl Iterator<Item = ScheduleEntryView<'_>> {
        self.timetable
            .iter()
            .filter_map(|entry| ScheduleEntryView::parse(entry))
    }

    pub fn entries_for_day(&self, day: u8) -> impl Iterator<Item = ScheduleEntryView<'_>> {
        self.entries().filter(move |entry| entry.day == day)
    }
}
