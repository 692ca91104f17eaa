use crate::buckets::BucketKeys;
use crate::ranking::Medal;
use crate::store::GroupTable;

/// Where a user stands relative to the user ranked just above
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankAbove {
    /// Ranked first, nobody to catch up with
    Leader,

    /// `messages_needed` more messages overtake the user at `rank_above`
    Behind { rank_above: usize, messages_needed: u64 },
}

/// Where a user stands relative to the user ranked just below
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBelow {
    /// Ranked last
    Bottom,

    /// Same global count as the user at `rank_below`
    Tied { rank_below: usize },

    /// `lead` messages ahead of the user at `rank_below`
    Ahead { rank_below: usize, lead: u64 },
}

/// One user's rank within a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankProfile {
    pub user_id: String,

    /// 1-based rank by global count
    pub rank: usize,

    /// Number of users in the group's ranking
    pub total_ranked: usize,

    pub global: u64,
    pub daily: u64,
    pub weekly: u64,
    pub above: RankAbove,
    pub below: RankBelow,
}

impl RankProfile {
    #[must_use]
    pub const fn medal(&self) -> Option<Medal> {
        Medal::for_position(self.rank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    Profile(RankProfile),

    /// Nothing has ever been recorded for the group
    NoData,

    /// The user has no record in the group
    NotRanked,
}

/// Compute `user_id`'s rank and neighbour gaps by global count
#[must_use]
pub fn build_profile(table: &GroupTable, user_id: &str, keys: &BucketKeys) -> ProfileOutcome {
    let Some(stats) = table.get(user_id) else {
        return ProfileOutcome::NotRanked;
    };

    let mut ranking: Vec<_> = table.iter().map(|(id, stats)| (id, stats.global)).collect();
    // stable: equal counts stay in first-seen order
    ranking.sort_by(|a, b| b.1.cmp(&a.1));

    let Some(index) = ranking.iter().position(|&(id, _)| id == user_id) else {
        return ProfileOutcome::NotRanked;
    };

    let rank = index + 1;
    let own = stats.global;

    let above = match index.checked_sub(1).and_then(|i| ranking.get(i)) {
        Some(&(_, above_count)) => RankAbove::Behind {
            rank_above: rank - 1,
            messages_needed: (above_count - own).saturating_add(1),
        },
        None => RankAbove::Leader,
    };

    let below = match ranking.get(index + 1) {
        Some(&(_, below_count)) if below_count == own => RankBelow::Tied { rank_below: rank + 1 },
        Some(&(_, below_count)) => RankBelow::Ahead {
            rank_below: rank + 1,
            lead: own - below_count,
        },
        None => RankBelow::Bottom,
    };

    ProfileOutcome::Profile(RankProfile {
        user_id: user_id.to_string(),
        rank,
        total_ranked: ranking.len(),
        global: own,
        daily: stats.daily_count(keys),
        weekly: stats.weekly_count(keys),
        above,
        below,
    })
}
