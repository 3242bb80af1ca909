//! Mask-based areal apportionment.
//!
//! Used when scoring a set of precincts against an external polygon (an
//! official district boundary, for instance) rather than another community.
//! Population and votes are assumed uniformly dense within a precinct, so a
//! precinct contributes to the mask in proportion to the fraction of its
//! area the mask covers.

use mander_core::geom::total_area;
use mander_core::{GeometryKernel, ManderError, Polygon, PrecinctStore, Result, VoteGroup};

/// Population and per-category vote totals apportioned into a mask polygon.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaskTally {
    pub population: f64,
    votes: [f64; VoteGroup::COUNT],
}

impl MaskTally {
    pub fn votes(&self, group: VoteGroup) -> f64 {
        self.votes[group.index()]
    }

    pub fn total_votes(&self) -> f64 {
        self.votes.iter().sum()
    }
}

/// Apportions the given precincts' population and votes into `mask` by
/// fractional geometric overlap.
pub fn apportion<K, I>(
    kernel: &K,
    store: &PrecinctStore,
    precincts: I,
    mask: &[Polygon],
) -> Result<MaskTally>
where
    K: GeometryKernel + ?Sized,
    I: IntoIterator<Item = usize>,
{
    let mut tally = MaskTally::default();
    for index in precincts {
        let precinct = store
            .get(index)
            .ok_or_else(|| ManderError::InvalidState(format!("missing precinct {index}")))?;
        let area = kernel.area(&precinct.boundary)?;
        if area <= 0.0 {
            return Err(ManderError::Geometry(format!(
                "precinct {} has no positive area",
                precinct.id
            )));
        }
        let overlap = total_area(
            kernel,
            &kernel.intersection(std::slice::from_ref(&precinct.boundary), mask)?,
        )?;
        let fraction = (overlap / area).clamp(0.0, 1.0);
        if fraction == 0.0 {
            continue;
        }
        tally.population += precinct.population as f64 * fraction;
        for (group, count) in precinct.votes.iter() {
            tally.votes[group.index()] += count as f64 * fraction;
        }
    }
    Ok(tally)
}
