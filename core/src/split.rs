//! Split percentage table.
//!
//! The constants are business policy. The asymmetric 3- and 4-person
//! rows deliberately leave part of the pool undistributed.

use crate::{classifier::Role, team::TeamComposition};

/// Percentage (0–100) of the pool owed to one technician holding `role`
/// on a job with the given headcount.
pub fn split_percent(total_techs: usize, lead_count: usize, assistant_count: usize, role: Role) -> f64 {
    if !role.is_payable() || total_techs == 0 {
        return 0.0;
    }
    let mut total = total_techs;
    if lead_count + assistant_count != total {
        log::debug!(
            "split: headcount {total} disagrees with {lead_count}L/{assistant_count}A, using role counts"
        );
        total = lead_count + assistant_count;
        if total == 0 {
            return 0.0;
        }
    }

    let lead = role == Role::Lead;
    let pick = |lead_pct: f64, assistant_pct: f64| if lead { lead_pct } else { assistant_pct };
    let uniform = lead_count == total || assistant_count == total;

    match (total, lead_count, assistant_count) {
        (1, _, _)                 => 100.0,
        (2, 1, 1)                 => pick(65.0, 35.0),
        (2, _, _) if uniform      => 50.0,
        (3, 1, 2)                 => pick(46.0, 27.0),
        (3, 2, 1)                 => pick(38.0, 24.0),
        (3, _, _) if uniform      => 33.33,
        (4, 2, 2)                 => pick(30.0, 20.0),
        (4, 3, 1)                 => pick(30.0, 10.0),
        (4, _, _) if uniform      => 25.0,
        _                         => 100.0 / total as f64,
    }
}

pub fn split_for(composition: &TeamComposition, role: Role) -> f64 {
    split_percent(
        composition.total_techs,
        composition.lead_count,
        composition.assistant_count,
        role,
    )
}
