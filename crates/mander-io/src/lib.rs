//! Community persistence for mander.
//!
//! Two companion formats:
//! - the partition itself, as an ordered nested bracketed list of precinct
//!   ids: `[[id1, id2], [id3, id4]]`
//! - the quantification table, as TSV with one row per metric and one
//!   column per community, in partition order
//!
//! Loading resolves every id against a live graph. An id with no match is
//! counted and reported through [`LoadReport`] - never silently dropped,
//! and never fatal for the rest of the file.

use std::collections::HashMap;

use mander_core::{Communities, Community, Graph, PrecinctStore};
use thiserror::Error;
use tracing::warn;

/// Persistence error
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed community list: {0}")]
    Malformed(String),

    #[error("community member {0} is not a graph node")]
    UnknownNode(usize),

    #[error("community {0} has no quantification values; quantify before writing")]
    MissingStats(usize),
}

/// Outcome of resolving a persisted partition against a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Ids resolved to graph nodes.
    pub matched: usize,
    /// Ids with no precinct or no node; see `unmatched_ids`.
    pub unmatched: usize,
    pub unmatched_ids: Vec<String>,
}

/// Serializes a partition as a nested bracketed list of precinct ids,
/// in community order.
pub fn write_communities(
    store: &PrecinctStore,
    graph: &Graph,
    communities: &Communities,
) -> Result<String, PersistError> {
    let mut out = String::from("[");
    for (index, community) in communities.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push('[');
        for (position, member) in community.members().enumerate() {
            let node = graph.node(member).ok_or(PersistError::UnknownNode(member))?;
            let precinct = store
                .get(node.precinct())
                .ok_or(PersistError::UnknownNode(member))?;
            if position > 0 {
                out.push_str(", ");
            }
            out.push_str(&precinct.id);
        }
        out.push(']');
    }
    out.push(']');
    Ok(out)
}

/// Parses a nested bracketed list and resolves each precinct id against the
/// graph, tagging matched nodes with their community index.
///
/// Unresolvable ids are accumulated in the [`LoadReport`]; the partition is
/// built from whatever matched.
pub fn read_communities(
    text: &str,
    store: &PrecinctStore,
    graph: &mut Graph,
) -> Result<(Communities, LoadReport), PersistError> {
    let parsed = parse_nested(text)?;

    // nodes are keyed by arena index, persisted ids by precinct id
    let node_by_precinct: HashMap<usize, usize> = graph
        .nodes()
        .map(|node| (node.precinct(), node.id()))
        .collect();

    let mut report = LoadReport::default();
    let mut communities = Vec::with_capacity(parsed.len());
    for (index, ids) in parsed.into_iter().enumerate() {
        let mut community = Community::new();
        for id in ids {
            let node = store
                .index_of(&id)
                .and_then(|precinct| node_by_precinct.get(&precinct).copied());
            match node {
                Some(node) => {
                    // the node id came from the graph itself
                    graph.set_community(node, Some(index)).unwrap();
                    community.insert(node);
                    report.matched += 1;
                }
                None => {
                    report.unmatched += 1;
                    report.unmatched_ids.push(id);
                }
            }
        }
        communities.push(community);
    }
    if report.unmatched > 0 {
        warn!(
            unmatched = report.unmatched,
            matched = report.matched,
            "persisted partition references unknown precinct ids"
        );
    }
    Ok((Communities::new(communities), report))
}

/// Serializes the quantification table: one TSV row per metric, one column
/// per community, in partition order.
pub fn write_quantification(communities: &Communities) -> Result<String, PersistError> {
    let mut rows = [
        String::from("population"),
        String::from("compactness"),
        String::from("partisanship"),
    ];
    for (index, community) in communities.iter().enumerate() {
        let stats = community.stats().ok_or(PersistError::MissingStats(index))?;
        for (row, value) in rows
            .iter_mut()
            .zip([stats.population, stats.compactness, stats.partisanship])
        {
            row.push('\t');
            row.push_str(&value.to_string());
        }
    }
    let mut out = String::new();
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }
    Ok(out)
}

/// Tokenizes `[[a, b], [c]]` into id lists. Whitespace between tokens is
/// free-form; anything else out of place is malformed.
fn parse_nested(text: &str) -> Result<Vec<Vec<String>>, PersistError> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();
    cursor.expect('[')?;
    let mut communities = Vec::new();

    cursor.skip_whitespace();
    if !cursor.eat(']') {
        loop {
            cursor.skip_whitespace();
            cursor.expect('[')?;
            let mut members = Vec::new();
            cursor.skip_whitespace();
            if !cursor.eat(']') {
                loop {
                    cursor.skip_whitespace();
                    members.push(cursor.token()?);
                    cursor.skip_whitespace();
                    if cursor.eat(']') {
                        break;
                    }
                    cursor.expect(',')?;
                }
            }
            communities.push(members);
            cursor.skip_whitespace();
            if cursor.eat(']') {
                break;
            }
            cursor.expect(',')?;
        }
    }
    cursor.skip_whitespace();
    if !cursor.at_end() {
        return Err(PersistError::Malformed(format!(
            "trailing input at offset {}",
            cursor.offset()
        )));
    }
    Ok(communities)
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(text: &str) -> Self {
        Cursor {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn offset(&self) -> usize {
        self.pos
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.get(self.pos) == Some(&expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PersistError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(PersistError::Malformed(format!(
                "expected '{expected}' at offset {}, found {:?}",
                self.pos,
                self.chars.get(self.pos)
            )))
        }
    }

    /// One precinct id: everything up to a delimiter or whitespace.
    fn token(&mut self) -> Result<String, PersistError> {
        let start = self.pos;
        while let Some(&c) = self.chars.get(self.pos) {
            if c == ',' || c == '[' || c == ']' || c.is_whitespace() {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(PersistError::Malformed(format!(
                "expected precinct id at offset {start}"
            )));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }
}
