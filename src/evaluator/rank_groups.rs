use crate::cards::Rank;

/// Ranks grouped by multiplicity, sorted by (count desc, rank desc).
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Build from per-rank counts indexed by [`Rank::index`].
    pub fn from_counts(rank_counts: &[u8; 13]) -> Self {
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .copied()
            .filter(|r| rank_counts[r.index()] > 0)
            .map(|r| (r, rank_counts[r.index()]))
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        Self { groups }
    }

    fn with_count(&self, count: u8) -> impl Iterator<Item = Rank> + '_ {
        self.groups.iter().filter(move |(_, c)| *c == count).map(|(r, _)| *r)
    }

    /// The rank held four times, if exactly one rank is.
    pub fn quad(&self) -> Option<Rank> {
        let mut quads = self.with_count(4);
        match (quads.next(), quads.next()) {
            (Some(r), None) => Some(r),
            _ => None,
        }
    }

    /// Ranks held exactly three times, highest first.
    pub fn trips(&self) -> Vec<Rank> {
        self.with_count(3).collect()
    }

    /// Ranks held exactly twice, highest first.
    pub fn pairs(&self) -> Vec<Rank> {
        self.with_count(2).collect()
    }

    /// Trips rank and pair rank of a full house. A second set of trips serves as the pair.
    pub fn full_house(&self) -> Option<(Rank, Rank)> {
        let trips = self.trips();
        let set = *trips.first()?;
        let pair = self
            .groups
            .iter()
            .filter(|(r, c)| *r != set && *c >= 2)
            .map(|(r, _)| *r)
            .max()?;
        Some((set, pair))
    }

    /// Every rank present except those listed, highest first. Used for kickers.
    pub fn ranks_excluding(&self, used: &[Rank]) -> Vec<Rank> {
        let mut rest: Vec<Rank> =
            self.groups.iter().map(|(r, _)| *r).filter(|r| !used.contains(r)).collect();
        rest.sort_unstable_by(|a, b| b.cmp(a));
        rest
    }

    /// True when no rank appears more than once.
    #[cfg(test)]
    pub fn all_distinct(&self) -> bool {
        self.groups.iter().all(|(_, c)| *c == 1)
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(Rank, u8)] {
        &self.groups
    }
}
