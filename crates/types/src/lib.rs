use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Clone, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}
id_newtype!(StudentId);

pub const WEEKDAYS: usize = 5;

#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Weekday {
    pub const ALL: [Weekday; WEEKDAYS] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Accepts full or three-letter English day names, any case.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "mon" | "monday" => Some(Weekday::Mon),
            "tue" | "tuesday" => Some(Weekday::Tue),
            "wed" | "wednesday" => Some(Weekday::Wed),
            "thu" | "thursday" => Some(Weekday::Thu),
            "fri" | "friday" => Some(Weekday::Fri),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
        }
    }
}

#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum LengthClass {
    Short,
    Medium,
    Long,
}

impl LengthClass {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(LengthClass::Short),
            1 => Some(LengthClass::Medium),
            2 => Some(LengthClass::Long),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Weekday as it arrives from a loader: either the numeric code or a day name.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum WeekdayRecord {
    Code(i64),
    Label(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct SongRecord {
    pub name: String,
    #[serde(default)]
    pub leader: String,
    pub priority: i32,
    pub length: i64,
    #[serde(default)]
    pub stage: bool,
    #[serde(default)]
    pub students: Vec<StudentId>,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct TimeslotRecord {
    pub weekday: WeekdayRecord,
    #[serde(default)]
    pub leader: String,
    pub length: i64,
    #[serde(default)]
    pub stage: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Song {
    pub name: String,
    pub leader: String,
    pub priority: i32,
    pub length: LengthClass,
    pub stage: bool,
    pub students: Vec<StudentId>,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Timeslot {
    pub weekday: Weekday,
    pub leader: String,
    pub length: LengthClass,
    pub stage: bool,
    #[serde(default)]
    pub song: Option<String>,
    #[serde(default)]
    pub taken: bool,
}

impl Timeslot {
    pub fn new(weekday: Weekday, length: LengthClass, stage: bool) -> Self {
        Self {
            weekday,
            leader: String::new(),
            length,
            stage,
            song: None,
            taken: false,
        }
    }
}

/// How the distinct-day cap treats the weekday of the slot being considered.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Default, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DayCap {
    /// Every used weekday counts, including the candidate's own day.
    #[default]
    Legacy,
    /// A weekday the student already rehearses on never trips the cap.
    ExcludeCandidateDay,
}

fn default_max_days() -> i64 {
    5
}
fn default_max_per_day() -> i64 {
    2
}
fn default_iterations() -> i64 {
    1000
}
fn default_top_recorded() -> i64 {
    3
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct OptimizeParams {
    #[serde(default = "default_max_days")]
    pub max_days: i64,
    #[serde(default = "default_max_per_day")]
    pub max_per_day: i64,
    #[serde(default = "default_iterations")]
    pub iterations: i64,
    #[serde(default = "default_top_recorded")]
    pub top_recorded: i64,
    #[serde(default)]
    pub seed: u64,
    /// Worker threads for restarts; 0 uses the available parallelism.
    #[serde(default)]
    pub threads: usize,
    #[serde(default)]
    pub day_cap: DayCap,
    #[serde(default)]
    pub distinct: bool,
}

impl Default for OptimizeParams {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
            max_per_day: default_max_per_day(),
            iterations: default_iterations(),
            top_recorded: default_top_recorded(),
            seed: 0,
            threads: 0,
            day_cap: DayCap::default(),
            distinct: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct OptimizeRequest {
    pub songs: Vec<SongRecord>,
    pub timeslots: Vec<TimeslotRecord>,
    #[serde(default)]
    pub params: OptimizeParams,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentTotal {
    pub student: StudentId,
    pub rehearsals: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RetainedResult {
    pub score: u32,
    pub timeslots: Vec<Timeslot>,
    /// Rehearsal totals in roster order.
    pub student_totals: Vec<StudentTotal>,
    /// Songs left without a timeslot, in the order they were attempted.
    #[serde(default)]
    pub unscheduled: Vec<String>,
}

impl RetainedResult {
    pub fn assignment_key(&self) -> Vec<Option<&str>> {
        self.timeslots.iter().map(|t| t.song.as_deref()).collect()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchStats {
    pub restarts: u32,
    pub retained: usize,
    pub best_score: Option<u32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OptimizeOutcome {
    /// Retained schedules, best first; `None` marks a slot no restart filled.
    pub results: Vec<Option<RetainedResult>>,
    /// Ranked student totals, parallel to `results`.
    pub rankings: Vec<Vec<StudentTotal>>,
    pub stats: SearchStats,
}
