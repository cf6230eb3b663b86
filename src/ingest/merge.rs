use std::collections::HashSet;
use std::hash::Hash;
use crate::ingest::record::{
    AdmissionRecord, Category, Dataset, InferredEntities, Institute, Program, RecordKey, Round,
};

/// Insertion-ordered set: existing entries first, then new ones as first seen.
#[derive(Debug, Clone)]
pub struct UniqueSet<T> {
    items: Vec<T>,
    seen: HashSet<T>,
}

impl<T: Eq + Hash + Clone> UniqueSet<T> {
    pub fn from_existing(existing: Vec<T>) -> Self {
        let mut set = Self {
            items: Vec::with_capacity(existing.len()),
            seen: HashSet::with_capacity(existing.len()),
        };
        for item in existing {
            set.insert(item);
        }
        set
    }

    pub fn insert(&mut self, item: T) -> bool {
        if self.seen.contains(&item) {
            return false;
        }
        self.seen.insert(item.clone());
        self.items.push(item);
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Added { rank: u64 },
    Duplicate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub new_records_added: usize,
    pub duplicates_skipped: usize,
}

/// Accumulates one ingestion run on top of an existing dataset.
///
/// Admission records are deduplicated on their composite key and receive
/// ranks continuing from the highest existing rank. Institutes, programs,
/// categories and rounds are deduplicated on their full value.
pub struct MergeEngine {
    records: Vec<AdmissionRecord>,
    keys: HashSet<RecordKey>,
    current_max_rank: u64,
    institutes: UniqueSet<Institute>,
    programs: UniqueSet<Program>,
    categories: UniqueSet<Category>,
    rounds: UniqueSet<Round>,
    stats: MergeStats,
}

impl MergeEngine {
    pub fn new(existing: Dataset) -> Self {
        let current_max_rank = existing.max_rank();
        let keys = existing.colleges.iter().map(AdmissionRecord::key).collect();

        Self {
            records: existing.colleges,
            keys,
            current_max_rank,
            institutes: UniqueSet::from_existing(existing.institutes),
            programs: UniqueSet::from_existing(existing.programs),
            categories: UniqueSet::from_existing(existing.categories),
            rounds: UniqueSet::from_existing(existing.rounds),
            stats: MergeStats::default(),
        }
    }

    pub fn merge(&mut self, inferred: InferredEntities) -> MergeOutcome {
        let InferredEntities {
            mut record,
            institute,
            program,
            category,
            round,
        } = inferred;

        self.institutes.insert(institute);
        self.programs.insert(program);
        self.categories.insert(category);
        self.rounds.insert(round);

        if !self.keys.insert(record.key()) {
            self.stats.duplicates_skipped += 1;
            return MergeOutcome::Duplicate;
        }

        self.current_max_rank += 1;
        record.rank = self.current_max_rank;
        self.records.push(record);
        self.stats.new_records_added += 1;

        MergeOutcome::Added {
            rank: self.current_max_rank,
        }
    }

    pub fn current_max_rank(&self) -> u64 {
        self.current_max_rank
    }

    pub fn stats(&self) -> MergeStats {
        self.stats
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn finish(self) -> (Dataset, MergeStats) {
        let dataset = Dataset {
            colleges: self.records,
            institutes: self.institutes.into_vec(),
            programs: self.programs.into_vec(),
            categories: self.categories.into_vec(),
            rounds: self.rounds.into_vec(),
        };
        (dataset, self.stats)
    }
}
