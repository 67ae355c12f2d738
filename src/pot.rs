//! Main and side pot construction and distribution.
//!
//! Pots are built from what each seat put in over the whole hand. Every distinct
//! contribution level cuts a slice; a slice is contested by the non-folded players
//! who reached that level.

use crate::evaluator::HandRank;

/// One seat's chips in the pot for the hand, plus whether it folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub seat: usize,
    pub amount: u64,
    pub folded: bool,
}

/// A pot and the seats that may win it, in ascending seat order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    pub amount: u64,
    pub eligible: Vec<usize>,
}

/// Result of distributing one pot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotAward {
    /// 0 is the main pot; side pots follow in order of the all-in that created them.
    pub pot_index: usize,
    /// Winning seats in odd-chip order (first seat left of the dealer first).
    pub winners: Vec<usize>,
    /// Chips for each winner, parallel to `winners`.
    pub shares: Vec<u64>,
    pub amount: u64,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettlementError {
    #[error("no showdown hand for contested seat {0}")]
    MissingHand(usize),
    #[error("pot {0} has no eligible player")]
    NoEligiblePlayer(usize),
    #[error("awarded {awarded} chips but {contributed} were put in")]
    ChipsMismatch { contributed: u64, awarded: u64 },
}

/// Slice contributions into the main pot and side pots.
///
/// Slices that end up with the same eligible seats are merged. A slice only folded
/// players reached (possible after a forced fold) goes to the pot below it, or to
/// the first pot above it when there is none below. If no seat still in the hand
/// put in anything, a single pot goes to the seats still in. The pots always add
/// up to the total contributed.
///
/// ```
/// use holdem_core::pot::{build_pots, Contribution};
///
/// let pots = build_pots(&[
///     Contribution { seat: 0, amount: 100, folded: false },
///     Contribution { seat: 1, amount: 300, folded: false },
///     Contribution { seat: 2, amount: 50, folded: true },
/// ]);
/// assert_eq!(pots[0].amount, 250);
/// assert_eq!(pots[0].eligible, vec![0, 1]);
/// assert_eq!(pots[1].amount, 200);
/// assert_eq!(pots[1].eligible, vec![1]);
/// ```
pub fn build_pots(contributions: &[Contribution]) -> Vec<Pot> {
    let mut levels: Vec<u64> =
        contributions.iter().map(|c| c.amount).filter(|&a| a > 0).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::new();
    let mut carry = 0u64;
    let mut prev = 0u64;
    for lvl in levels {
        let reached = contributions.iter().filter(|c| c.amount >= lvl);
        let amount = (lvl - prev) * reached.clone().count() as u64;
        prev = lvl;
        let mut eligible: Vec<usize> = reached.filter(|c| !c.folded).map(|c| c.seat).collect();
        eligible.sort_unstable();

        if eligible.is_empty() {
            match pots.last_mut() {
                Some(last) => last.amount += amount,
                None => carry += amount,
            }
            continue;
        }
        match pots.last_mut() {
            Some(last) if last.eligible == eligible => last.amount += amount,
            _ => {
                pots.push(Pot { amount: amount + carry, eligible });
                carry = 0;
            }
        }
    }

    // nobody left in the hand reached any level: the seats still in take it all
    if carry > 0 {
        let mut eligible: Vec<usize> =
            contributions.iter().filter(|c| !c.folded).map(|c| c.seat).collect();
        eligible.sort_unstable();
        pots.push(Pot { amount: carry, eligible });
    }
    pots
}

/// Distribute `pots` to the best hands among their eligible seats.
///
/// `hands` is indexed by seat and needs an entry for every seat in a contested
/// pot; a pot with one eligible seat is awarded without looking at hands.
/// Remainder chips go one each to the tied winners in seat order starting left
/// of `dealer`.
pub fn award_pots(
    pots: &[Pot],
    hands: &[Option<HandRank>],
    dealer: usize,
) -> Result<Vec<PotAward>, SettlementError> {
    let n = hands.len().max(1);
    let start = (dealer + 1) % n;
    let mut awards = Vec::with_capacity(pots.len());
    for (pot_index, pot) in pots.iter().enumerate() {
        let mut winners = match pot.eligible.as_slice() {
            [] => return Err(SettlementError::NoEligiblePlayer(pot_index)),
            [only] => vec![*only],
            contested => best_seats(contested, hands)?,
        };
        winners.sort_by_key(|&s| (s + n - start) % n);

        let count = winners.len() as u64;
        let per = pot.amount / count;
        let odd = (pot.amount % count) as usize;
        let shares = (0..winners.len()).map(|i| per + u64::from(i < odd)).collect();
        awards.push(PotAward { pot_index, winners, shares, amount: pot.amount });
    }
    Ok(awards)
}

fn best_seats(
    contested: &[usize],
    hands: &[Option<HandRank>],
) -> Result<Vec<usize>, SettlementError> {
    let mut best: Option<&HandRank> = None;
    let mut winners = Vec::new();
    for &seat in contested {
        let hand =
            hands.get(seat).and_then(Option::as_ref).ok_or(SettlementError::MissingHand(seat))?;
        match best {
            Some(b) if hand < b => {}
            Some(b) if hand == b => winners.push(seat),
            _ => {
                best = Some(hand);
                winners.clear();
                winners.push(seat);
            }
        }
    }
    Ok(winners)
}
