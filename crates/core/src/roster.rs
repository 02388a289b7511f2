use std::collections::HashMap;
use types::{Song, StudentId, StudentTotal};

use crate::engine::PlannedSong;

/// Student population in first-appearance order.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    ids: Vec<StudentId>,
    index: HashMap<StudentId, usize>,
}

impl Roster {
    pub fn from_songs(songs: &[Song]) -> Self {
        let mut roster = Self::default();
        for s in songs.iter().flat_map(|song| &song.students) {
            roster.insert(s);
        }
        roster
    }

    fn insert(&mut self, id: &StudentId) -> usize {
        if let Some(&i) = self.index.get(id) {
            return i;
        }
        let i = self.ids.len();
        self.ids.push(id.clone());
        self.index.insert(id.clone(), i);
        i
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[StudentId] {
        &self.ids
    }

    pub fn index_of(&self, id: &StudentId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Resolves a song's students to roster positions, dropping repeats and
    /// students outside the roster.
    pub fn plan<'a>(&self, song: &'a Song) -> PlannedSong<'a> {
        let mut students: Vec<usize> = Vec::with_capacity(song.students.len());
        for i in song.students.iter().filter_map(|s| self.index_of(s)) {
            if !students.contains(&i) {
                students.push(i);
            }
        }
        PlannedSong { song, students }
    }

    pub fn totals(&self, counts: &[u32]) -> Vec<StudentTotal> {
        self.ids
            .iter()
            .zip(counts)
            .map(|(student, &rehearsals)| StudentTotal {
                student: student.clone(),
                rehearsals,
            })
            .collect()
    }
}
