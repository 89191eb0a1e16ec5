//! Team role resolver: final Lead/Assistant/None per technician on one
//! job, based on who else worked it.
//!
//! Rules, first match wins:
//!   1. Class 1 is always Assistant (fills a slot, earns nothing).
//!   2. Other ineligible technicians (class 0) get no role.
//!   3. A class 2 leads when class 2 is the highest eligible class
//!      and nobody on the job is class 3+.
//!   4. A lone class 2+ technician leads.
//!   5. Otherwise the classifier's default role.

use crate::classifier::{Role, SkillClass, TechnicianProfile, APPRENTICE_CLASS, MID_CLASS, SENIOR_CLASS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedTechnician {
    pub profile: TechnicianProfile,
    pub role:    Role,
}

/// Headcount fed to the split table. Class 1 apprentices count;
/// technicians with no role do not.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TeamComposition {
    pub total_techs:     usize,
    pub lead_count:      usize,
    pub assistant_count: usize,
}

impl TeamComposition {
    pub fn of(team: &[ResolvedTechnician]) -> Self {
        let lead_count = team.iter().filter(|t| t.role == Role::Lead).count();
        let assistant_count = team.iter().filter(|t| t.role == Role::Assistant).count();
        Self {
            total_techs: team.iter().filter(|t| t.role.is_payable()).count(),
            lead_count,
            assistant_count,
        }
    }
}

/// Resolve roles for one job. `team` is already de-duplicated with the
/// primary technician first; output keeps that order.
pub fn resolve_roles(team: &[TechnicianProfile]) -> Vec<ResolvedTechnician> {
    let highest_eligible: Option<SkillClass> =
        team.iter().filter(|p| p.eligible).map(|p| p.skill_class).max();
    let has_senior = team.iter().any(|p| p.skill_class >= SENIOR_CLASS);
    let solo = team.len() == 1;

    team.iter()
        .map(|profile| {
            let role = if profile.skill_class == APPRENTICE_CLASS {
                Role::Assistant
            } else if !profile.eligible {
                Role::Unassigned
            } else if profile.skill_class == MID_CLASS
                && highest_eligible == Some(MID_CLASS)
                && !has_senior
            {
                Role::Lead
            } else if solo && profile.skill_class >= MID_CLASS {
                Role::Lead
            } else {
                profile.default_role
            };
            ResolvedTechnician { profile: profile.clone(), role }
        })
        .collect()
}
