use rand::seq::SliceRandom;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use sched_core::engine::{self, PlannedSong};
use sched_core::retained::Retained;
use sched_core::roster::Roster;
use sched_core::scoring::score;
use sched_core::shuffle::{priority_order, reorder};
use sched_core::tracker::{Availability, Limits};
use sched_core::{
    prepare, OptimizeOutcome, OptimizeRequest, RetainedResult, Scheduler, SearchConfig,
    SolveError, Song, Timeslot,
};
use tracing::{debug, info};

/// Restarts evaluated per worker thread before merging into the retained set.
const RESTARTS_PER_WORKER: usize = 16;

pub struct HeurSolver;
impl HeurSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeurSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for HeurSolver {
    fn schedule(&self, req: &OptimizeRequest) -> Result<OptimizeOutcome, SolveError> {
        let problem = prepare(req)?;
        optimize(&problem.songs, &problem.timeslots, &problem.config)
    }
}

/// Runs the multi-start search on a dedicated pool of `config.threads` workers.
pub fn optimize(
    songs: &[Song],
    timeslots: &[Timeslot],
    config: &SearchConfig,
) -> Result<OptimizeOutcome, SolveError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|e| SolveError::Pool(e.to_string()))?;
    Ok(pool.install(|| search(songs, timeslots, config)))
}

/// Runs the multi-start search on the current rayon pool.
///
/// Each restart draws from its own ChaCha stream, and candidates merge in
/// restart order, so the outcome depends only on the inputs and the seed.
pub fn search(songs: &[Song], timeslots: &[Timeslot], config: &SearchConfig) -> OptimizeOutcome {
    let search = Search::new(songs, timeslots, config);
    let mut retained = Retained::new(config.top_recorded, config.distinct);

    let batch = (rayon::current_num_threads() * RESTARTS_PER_WORKER).max(1) as u32;
    let mut start = 0u32;
    while start < config.iterations {
        let end = start.saturating_add(batch).min(config.iterations);
        let candidates: Vec<RetainedResult> = (start..end)
            .into_par_iter()
            .map(|restart| search.restart(restart))
            .collect();
        for (restart, candidate) in (start..end).zip(candidates) {
            let s = candidate.score;
            if let Some(slot) = retained.offer(candidate) {
                debug!(restart, slot, score = s, "restart kept");
            }
        }
        start = end;
    }

    let outcome = retained.into_outcome();
    info!(
        songs = songs.len(),
        timeslots = timeslots.len(),
        students = search.roster.len(),
        iterations = config.iterations,
        top_recorded = config.top_recorded,
        best = ?outcome.stats.best_score,
        "search finished"
    );
    outcome
}

/// Read-only state shared by every restart.
struct Search<'a> {
    roster: Roster,
    plans: Vec<PlannedSong<'a>>,
    base_order: Vec<usize>,
    template: Vec<Timeslot>,
    limits: Limits,
    seed: u64,
}

impl<'a> Search<'a> {
    fn new(songs: &'a [Song], timeslots: &[Timeslot], config: &SearchConfig) -> Self {
        let roster = Roster::from_songs(songs);
        let plans = songs.iter().map(|s| roster.plan(s)).collect();
        let template = timeslots
            .iter()
            .cloned()
            .map(|mut t| {
                t.song = None;
                t.taken = false;
                t
            })
            .collect();
        Self {
            plans,
            base_order: priority_order(songs),
            template,
            limits: config.limits,
            seed: config.seed,
            roster,
        }
    }

    fn restart(&self, restart: u32) -> RetainedResult {
        let mut rng = restart_rng(self.seed, restart);
        let order = reorder(
            &self.base_order,
            |&i| self.plans[i].song.priority,
            &mut rng,
        );
        let mut slots = self.template.clone();
        let mut scan: Vec<usize> = (0..slots.len()).collect();
        scan.shuffle(&mut rng);
        let mut tracker = Availability::new(self.roster.len(), self.limits);

        let dropped = engine::assign(&order, &self.plans, &mut slots, &scan, &mut tracker);
        debug_assert!(tracker.is_consistent());

        RetainedResult {
            score: score(&slots),
            timeslots: slots,
            student_totals: self.roster.totals(tracker.totals()),
            unscheduled: dropped
                .into_iter()
                .map(|i| self.plans[i].song.name.clone())
                .collect(),
        }
    }
}

fn restart_rng(seed: u64, restart: u32) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(u64::from(restart));
    rng
}
