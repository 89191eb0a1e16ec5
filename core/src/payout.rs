//! Payout calculator and job de-duplication.
//!
//! For one target technician, walks the ledger in source order and
//! emits at most one `PayoutEntry` per job. Jobs are identified by
//! `customer|date|item|pool`, so a job exported on several rows (one
//! per technician, typically) is paid once.

use crate::{
    classifier::{Role, SkillClass, TechnicianProfile},
    context::RunContext,
    ledger::{dedup_key, JobRecord},
    roster::{name_key, Roster},
    split::split_for,
    team::{resolve_roles, TeamComposition},
    types::{round_cents, DedupKey, Money, TechName},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One technician's participation in one job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub profile:       TechnicianProfile,
    pub role:          Role,
    pub split_percent: f64,
    /// Zero for ineligible technicians regardless of split.
    pub payout:        Money,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobAllocation {
    pub dedup_key:    DedupKey,
    pub pool_amount:  Money,
    pub composition:  TeamComposition,
    /// Primary technician first, then assigned order.
    pub assignments:  Vec<Assignment>,
    pub team_details: String,
}

impl JobAllocation {
    pub fn assignment_for(&self, technician: &str) -> Option<&Assignment> {
        let key = name_key(technician);
        self.assignments.iter().find(|a| name_key(&a.profile.name) == key)
    }

    pub fn total_paid(&self) -> Money {
        self.assignments.iter().map(|a| a.payout).sum()
    }
}

/// One output row for a technician's ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayoutEntry {
    pub customer_name:     String,
    pub job_business_unit: String,
    pub completion_date:   NaiveDate,
    pub item_name:         String,
    pub total_pool_amount: Money,
    pub technician_share:  Money,
    pub role_for_job:      Role,
    pub split_percentage:  f64,
    pub skill_class:       SkillClass,
    pub team_details:      String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoPool,
    NotOnJob,
    Duplicate,
    Ineligible,
    ZeroPayout,
}

impl SkipReason {
    pub const ALL: [SkipReason; 5] = [
        SkipReason::NoPool,
        SkipReason::NotOnJob,
        SkipReason::Duplicate,
        SkipReason::Ineligible,
        SkipReason::ZeroPayout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoPool     => "no_pool",
            SkipReason::NotOnJob   => "not_on_job",
            SkipReason::Duplicate  => "duplicate",
            SkipReason::Ineligible => "ineligible",
            SkipReason::ZeroPayout => "zero_payout",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedJob {
    /// Position of the record in the ledger passed to `payouts_for`.
    pub index:     usize,
    pub dedup_key: DedupKey,
    pub reason:    SkipReason,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnicianPayouts {
    pub technician: TechName,
    pub entries:    Vec<PayoutEntry>,
    pub total:      Money,
    pub skipped:    Vec<SkippedJob>,
}

impl PayoutEntry {
    pub fn dedup_key(&self) -> DedupKey {
        dedup_key(&self.customer_name, self.completion_date, &self.item_name, self.total_pool_amount)
    }
}

impl TechnicianPayouts {
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }
}

pub struct PayoutCalculator<'a> {
    roster: &'a Roster,
}

impl<'a> PayoutCalculator<'a> {
    pub fn new(roster: &'a Roster) -> Self {
        Self { roster }
    }

    /// Classify, resolve and split every technician on one job.
    pub fn allocate_job(&self, job: &JobRecord) -> JobAllocation {
        self.allocate_team(job, &job.technician_names_in(self.roster))
    }

    fn allocate_team(&self, job: &JobRecord, names: &[String]) -> JobAllocation {
        let profiles: Vec<TechnicianProfile> = names
            .iter()
            .map(|name| {
                let mut profile = self.roster.profile(name);
                // Show the ledger's spelling, not the roster's.
                profile.name = name.clone();
                profile
            })
            .collect();

        let team = resolve_roles(&profiles);
        let composition = TeamComposition::of(&team);

        let assignments: Vec<Assignment> = team
            .into_iter()
            .map(|member| {
                let split_percent = split_for(&composition, member.role);
                let payout = if member.profile.eligible {
                    round_cents(job.pool_amount * split_percent / 100.0)
                } else {
                    0.0
                };
                Assignment { profile: member.profile, role: member.role, split_percent, payout }
            })
            .collect();

        JobAllocation {
            dedup_key: job.dedup_key(),
            pool_amount: job.pool_amount,
            composition,
            team_details: team_details(&assignments),
            assignments,
        }
    }

    /// Every payable job for `technician`, in ledger order.
    pub fn payouts_for(&self, ctx: &RunContext, technician: &str, jobs: &[JobRecord]) -> TechnicianPayouts {
        let mut processed: HashSet<DedupKey> = HashSet::new();
        let mut entries = Vec::new();
        let mut skipped = Vec::new();
        let target = technician.trim();

        for (index, job) in jobs.iter().enumerate() {
            let dedup_key = job.dedup_key();
            let mut skip = |reason: SkipReason| {
                log::debug!("run={} tech={target} skipped job {dedup_key}: {reason}", ctx.run_id);
                skipped.push(SkippedJob { index, dedup_key: dedup_key.clone(), reason });
            };

            if !job.has_pool() {
                skip(SkipReason::NoPool);
                continue;
            }
            let names = job.technician_names_in(self.roster);
            let target_key = name_key(target);
            if !names.iter().any(|n| name_key(n) == target_key) {
                skip(SkipReason::NotOnJob);
                continue;
            }
            if processed.contains(&dedup_key) {
                skip(SkipReason::Duplicate);
                continue;
            }
            processed.insert(dedup_key.clone());

            let allocation = self.allocate_team(job, &names);
            let Some(mine) = allocation.assignment_for(target) else {
                skip(SkipReason::NotOnJob);
                continue;
            };
            if !mine.profile.eligible || !mine.role.is_payable() {
                skip(SkipReason::Ineligible);
                continue;
            }
            if mine.payout <= 0.0 {
                skip(SkipReason::ZeroPayout);
                continue;
            }

            entries.push(PayoutEntry {
                customer_name:     job.customer_name.clone(),
                job_business_unit: job.job_business_unit.clone(),
                completion_date:   job.completion_date,
                item_name:         job.item_name.clone(),
                total_pool_amount: job.pool_amount,
                technician_share:  mine.payout,
                role_for_job:      mine.role,
                split_percentage:  mine.split_percent,
                skill_class:       mine.profile.skill_class,
                team_details:      allocation.team_details.clone(),
            });
        }

        let total = round_cents(entries.iter().map(|e| e.technician_share).sum());
        log::info!(
            "run={} tech={target}: {} payout rows, total ${total:.2}, {} jobs skipped",
            ctx.run_id,
            entries.len(),
            skipped.len()
        );
        TechnicianPayouts { technician: target.to_string(), entries, total, skipped }
    }
}

/// `Name (Class N): Role P%` per technician, joined with "; ".
pub fn team_details(assignments: &[Assignment]) -> String {
    assignments
        .iter()
        .map(|a| {
            let head = format!("{} (Class {})", a.profile.name, a.profile.skill_class);
            if a.profile.is_apprentice() {
                format!("{head}: {} {}% (no payout)", a.role, format_percent(a.split_percent))
            } else if !a.profile.eligible {
                format!("{head}: Not eligible")
            } else {
                format!("{head}: {} {}%", a.role, format_percent(a.split_percent))
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Two decimals at most, trailing zeros dropped: 65, 33.33, 12.5.
pub fn format_percent(pct: f64) -> String {
    let s = format!("{pct:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
