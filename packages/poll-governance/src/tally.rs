use std::cmp::Reverse;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Decimal, StdError, StdResult};

use crate::poll_ledger::Poll;

/// This structure describes the tally of a poll.
#[cw_serde]
pub struct PollStats {
    pub total_votes: u64,
    /// Share of the votes per option in percent, aligned with the poll options
    pub percentages: Vec<Decimal>,
    /// Option with the most votes. Ties resolve to the lowest index.
    /// Not set while the poll has no votes.
    pub leader: Option<u32>,
}

/// Aggregates the per-option counters of a poll snapshot.
pub fn tally(poll: &Poll) -> StdResult<PollStats> {
    if poll.option_counts.len() != poll.options.len() {
        return Err(StdError::generic_err(format!(
            "Poll {} has {} counters for {} options",
            poll.address,
            poll.option_counts.len(),
            poll.options.len()
        )));
    }

    let counted: u128 = poll.option_counts.iter().map(|c| u128::from(*c)).sum();
    if counted != u128::from(poll.total_votes) {
        return Err(StdError::generic_err(format!(
            "Poll {} total votes {} do not match counters sum {counted}",
            poll.address, poll.total_votes
        )));
    }

    let percentages = poll
        .option_counts
        .iter()
        .map(|count| {
            if poll.total_votes == 0 {
                return Ok(Decimal::zero());
            }
            Decimal::checked_from_ratio(u128::from(*count) * 100, poll.total_votes)
                .map_err(|err| StdError::generic_err(err.to_string()))
        })
        .collect::<StdResult<Vec<_>>>()?;

    let leader = if poll.total_votes > 0 {
        poll.option_counts
            .iter()
            .enumerate()
            .max_by_key(|(index, count)| (**count, Reverse(*index)))
            .map(|(index, _)| index as u32)
    } else {
        None
    };

    Ok(PollStats {
        total_votes: poll.total_votes,
        percentages,
        leader,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use cosmwasm_std::Addr;
    use proptest::prelude::*;

    use super::*;

    fn poll_with_counts(counts: &[u64]) -> Poll {
        Poll {
            address: "poll".to_string(),
            bump: 255,
            authority: Addr::unchecked("creator"),
            title: "title".to_string(),
            description: "".to_string(),
            options: (0..counts.len()).map(|i| format!("option {i}")).collect(),
            option_counts: counts.to_vec(),
            total_votes: counts.iter().sum(),
            created_at: 1000,
            end_time: 87400,
            is_active: true,
        }
    }

    #[test]
    fn empty_poll_has_zero_percentages_and_no_leader() {
        let stats = tally(&poll_with_counts(&[0, 0, 0])).unwrap();

        assert_eq!(
            stats,
            PollStats {
                total_votes: 0,
                percentages: vec![Decimal::zero(); 3],
                leader: None,
            }
        );
    }

    #[test]
    fn single_vote() {
        let stats = tally(&poll_with_counts(&[1, 0])).unwrap();

        assert_eq!(stats.total_votes, 1);
        assert_eq!(
            stats.percentages,
            vec![Decimal::from_str("100").unwrap(), Decimal::zero()]
        );
        assert_eq!(stats.leader, Some(0));
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        assert_eq!(tally(&poll_with_counts(&[1, 3, 3])).unwrap().leader, Some(1));
        assert_eq!(tally(&poll_with_counts(&[2, 2])).unwrap().leader, Some(0));
        assert_eq!(tally(&poll_with_counts(&[0, 0, 5])).unwrap().leader, Some(2));
    }

    #[test]
    fn fractional_shares() {
        let stats = tally(&poll_with_counts(&[1, 1, 1])).unwrap();
        let third = Decimal::from_str("33.333333333333333333").unwrap();

        assert_eq!(stats.percentages, vec![third; 3]);
    }

    #[test]
    fn malformed_snapshots_are_rejected() {
        let mut misaligned = poll_with_counts(&[1, 0]);
        misaligned.option_counts.push(0);
        assert_eq!(
            tally(&misaligned).unwrap_err().to_string(),
            "Generic error: Poll poll has 3 counters for 2 options"
        );

        let mut miscounted = poll_with_counts(&[1, 0]);
        miscounted.total_votes = 2;
        assert_eq!(
            tally(&miscounted).unwrap_err().to_string(),
            "Generic error: Poll poll total votes 2 do not match counters sum 1"
        );
    }

    proptest! {
        #[test]
        fn tally_invariants(counts in prop::collection::vec(0u64..1_000_000, 2..=10)) {
            let stats = tally(&poll_with_counts(&counts)).unwrap();

            prop_assert_eq!(stats.percentages.len(), counts.len());

            let max = counts.iter().copied().max().unwrap_or_default();
            if stats.total_votes == 0 {
                prop_assert!(stats.leader.is_none());
                prop_assert!(stats.percentages.iter().all(|p| p.is_zero()));
            } else {
                let first_max = counts.iter().position(|c| *c == max).unwrap() as u32;
                prop_assert_eq!(stats.leader, Some(first_max));

                // Each share is rounded down by at most one atomic unit
                let sum = stats
                    .percentages
                    .iter()
                    .fold(Decimal::zero(), |acc, p| acc + *p);
                let hundred = Decimal::from_str("100").unwrap();
                let tolerance = Decimal::from_atomics(counts.len() as u128, 18).unwrap();
                prop_assert!(sum <= hundred);
                prop_assert!(sum + tolerance >= hundred);
            }
        }
    }
}
