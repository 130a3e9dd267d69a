//! General index built from emitted index records.
//!
//! `single` keys of the form `"main; sub"` file the target under `main` with
//! sub-term `sub`. `pair` keys file it twice, once in each direction.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::model::{IndexKind, IndexRecord};

/// All terms starting with the same letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexGroup {
    /// Upper-cased first letter, or "Symbols"
    pub letter: String,
    pub terms: Vec<IndexTerm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexTerm {
    pub term: String,
    pub targets: Vec<String>,
    pub subterms: Vec<IndexSubterm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSubterm {
    pub term: String,
    pub targets: Vec<String>,
}

const SYMBOLS: &str = "Symbols";

/// Case-insensitive sort key; the term as written breaks ties.
type SortKey = (String, String);

fn sort_key(term: &str) -> SortKey {
    (term.to_lowercase(), term.to_string())
}

#[derive(Default)]
struct TermEntry {
    targets: Vec<String>,
    subterms: BTreeMap<SortKey, Vec<String>>,
}

fn push_target(targets: &mut Vec<String>, target: &str) {
    if !targets.iter().any(|t| t == target) {
        targets.push(target.to_string());
    }
}

#[derive(Default)]
struct IndexBuilder {
    terms: BTreeMap<SortKey, TermEntry>,
}

impl IndexBuilder {
    fn add(&mut self, main: &str, sub: &str, target: &str) {
        let entry = self.terms.entry(sort_key(main)).or_default();
        if sub.is_empty() {
            push_target(&mut entry.targets, target);
        } else {
            push_target(entry.subterms.entry(sort_key(sub)).or_default(), target);
        }
    }

    fn add_record(&mut self, record: &IndexRecord) {
        let (main, sub) = split_key(&record.key);
        if main.is_empty() {
            warn!(key = %record.key, target = %record.target, "index key without a main term");
            return;
        }
        self.add(main, sub, &record.target);
        if record.kind == IndexKind::Pair && !sub.is_empty() {
            self.add(sub, main, &record.target);
        }
    }

    fn finish(self) -> Vec<IndexGroup> {
        // Symbols sort before letters.
        let mut groups: BTreeMap<(bool, String), Vec<IndexTerm>> = BTreeMap::new();
        for ((_, term), entry) in self.terms {
            let letter = group_letter(&term);
            let key = (letter != SYMBOLS, letter);
            groups.entry(key).or_default().push(IndexTerm {
                term,
                targets: entry.targets,
                subterms: entry
                    .subterms
                    .into_iter()
                    .map(|((_, term), targets)| IndexSubterm { term, targets })
                    .collect(),
            });
        }
        groups
            .into_iter()
            .map(|((_, letter), terms)| IndexGroup { letter, terms })
            .collect()
    }
}

/// Split `"main; sub"` into trimmed halves; no separator means no sub-term.
fn split_key(key: &str) -> (&str, &str) {
    match key.split_once(';') {
        Some((main, sub)) => (main.trim(), sub.trim()),
        None => (key.trim(), ""),
    }
}

fn group_letter(term: &str) -> String {
    match term.chars().next() {
        Some(c) if c.is_alphabetic() => c.to_uppercase().collect(),
        _ => SYMBOLS.to_string(),
    }
}

/// Group and sort index records.
pub fn build_index<'a>(records: impl IntoIterator<Item = &'a IndexRecord>) -> Vec<IndexGroup> {
    let mut builder = IndexBuilder::default();
    for record in records {
        builder.add_record(record);
    }
    builder.finish()
}
