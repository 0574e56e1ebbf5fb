use std::ops::RangeInclusive;

use crate::Config;

/// How many catalog pages a run fetches, derived once from the sizing total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPlan {
    pub total: u64,
    pub session_count: usize,
    truncated: bool,
}

impl SessionPlan {
    /// Totals below `max_results` get every page, anything above is capped at the
    /// number of pages that cover `max_results`, rounding up like the uncapped count.
    pub fn from_total(total: u64, config: &Config) -> Self {
        let page_size = config.page_size.max(1);
        let cap = config.max_results;

        if total < cap as u64 {
            // total < cap, so it fits a usize.
            let session_count = (total as usize).div_ceil(page_size);
            Self {
                total,
                session_count,
                truncated: false,
            }
        } else {
            Self {
                total,
                session_count: cap.div_ceil(page_size),
                truncated: true,
            }
        }
    }

    /// Whether the run only covers the most popular slice of the results.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// 1-based page numbers to fetch. Empty for an empty plan.
    pub fn pages(&self) -> RangeInclusive<usize> {
        1..=self.session_count
    }
}
