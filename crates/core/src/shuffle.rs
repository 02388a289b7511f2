use rand::seq::SliceRandom;
use rand::Rng;
use types::Song;

/// Song positions sorted by priority, highest first. Equal priorities keep
/// input order, so this is the stable base every restart shuffles from.
pub fn priority_order(songs: &[Song]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..songs.len()).collect();
    order.sort_by(|&a, &b| songs[b].priority.cmp(&songs[a].priority));
    order
}

/// Shuffles each run of equal `tier` independently, keeping runs in place.
pub fn reorder<T, K, R>(base: &[T], tier: impl Fn(&T) -> K, rng: &mut R) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    R: Rng + ?Sized,
{
    let mut out = Vec::with_capacity(base.len());
    for run in base.chunk_by(|a, b| tier(a) == tier(b)) {
        let start = out.len();
        out.extend_from_slice(run);
        out[start..].shuffle(rng);
    }
    out
}
