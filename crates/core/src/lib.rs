pub mod engine;
pub mod ranking;
pub mod retained;
pub mod roster;
pub mod scoring;
pub mod shuffle;
pub mod tracker;

use thiserror::Error;

pub use tracker::Limits;
pub use types::{
    DayCap, LengthClass, OptimizeOutcome, OptimizeParams, OptimizeRequest, RetainedResult, Song,
    SongRecord, StudentId, StudentTotal, Timeslot, TimeslotRecord, Weekday, WeekdayRecord,
};

/// Upper bound on retained schedules; every slot holds a full timeslot copy.
pub const MAX_TOP_RECORDED: usize = 65_536;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: length class must be 0, 1 or 2, got {value}")]
    InvalidLength { field: String, value: i64 },
    #[error("{field}: unknown weekday {value}")]
    InvalidWeekday { field: String, value: String },
    #[error("{field}: value {value} is out of range")]
    ParameterOutOfRange { field: &'static str, value: i64 },
    #[error("top_recorded must be at least 1")]
    ZeroTopRecorded,
    #[error("invalid request: {}", join_errors(.0))]
    Many(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to start restart workers: {0}")]
    Pool(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub limits: Limits,
    pub iterations: u32,
    pub top_recorded: usize,
    pub seed: u64,
    pub threads: usize,
    pub distinct: bool,
}

/// Validated input for one optimize call.
#[derive(Clone, Debug)]
pub struct Problem {
    pub songs: Vec<Song>,
    pub timeslots: Vec<Timeslot>,
    pub config: SearchConfig,
}

pub fn prepare(req: &OptimizeRequest) -> Result<Problem, ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    let mut songs = Vec::with_capacity(req.songs.len());
    for (i, s) in req.songs.iter().enumerate() {
        match LengthClass::from_code(s.length) {
            Some(length) => songs.push(Song {
                name: s.name.clone(),
                leader: s.leader.clone(),
                priority: s.priority,
                length,
                stage: s.stage,
                students: s.students.clone(),
            }),
            None => errors.push(ValidationError::InvalidLength {
                field: format!("songs[{i}].length"),
                value: s.length,
            }),
        }
    }

    let mut timeslots = Vec::with_capacity(req.timeslots.len());
    for (i, t) in req.timeslots.iter().enumerate() {
        let weekday = match &t.weekday {
            WeekdayRecord::Code(code) => Weekday::from_code(*code).ok_or_else(|| code.to_string()),
            WeekdayRecord::Label(label) => Weekday::from_label(label).ok_or_else(|| label.clone()),
        };
        let weekday = weekday.map_err(|value| ValidationError::InvalidWeekday {
            field: format!("timeslots[{i}].weekday"),
            value,
        });
        let length = LengthClass::from_code(t.length).ok_or(ValidationError::InvalidLength {
            field: format!("timeslots[{i}].length"),
            value: t.length,
        });
        match (weekday, length) {
            (Ok(weekday), Ok(length)) => timeslots.push(Timeslot {
                leader: t.leader.clone(),
                ..Timeslot::new(weekday, length, t.stage)
            }),
            (weekday, length) => {
                errors.extend(weekday.err());
                errors.extend(length.err());
            }
        }
    }

    let p = &req.params;
    let max_days = counter("max_days", p.max_days, &mut errors);
    let max_per_day = counter("max_per_day", p.max_per_day, &mut errors);
    let iterations = counter("iterations", p.iterations, &mut errors);
    let top_recorded = match usize::try_from(p.top_recorded) {
        Ok(0) => {
            errors.push(ValidationError::ZeroTopRecorded);
            0
        }
        Ok(k) if k <= MAX_TOP_RECORDED => k,
        _ => {
            errors.push(ValidationError::ParameterOutOfRange {
                field: "top_recorded",
                value: p.top_recorded,
            });
            0
        }
    };

    match errors.len() {
        0 => Ok(Problem {
            songs,
            timeslots,
            config: SearchConfig {
                limits: Limits {
                    max_days,
                    max_per_day,
                    day_cap: p.day_cap,
                },
                iterations,
                top_recorded,
                seed: p.seed,
                threads: p.threads,
                distinct: p.distinct,
            },
        }),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Many(errors)),
    }
}

fn counter(field: &'static str, value: i64, errors: &mut Vec<ValidationError>) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| {
        errors.push(ValidationError::ParameterOutOfRange { field, value });
        0
    })
}

/// Produces ranked schedules for a request. Runs to completion before returning.
pub trait Scheduler: Send + Sync + 'static {
    fn schedule(&self, req: &OptimizeRequest) -> Result<OptimizeOutcome, SolveError>;
}
