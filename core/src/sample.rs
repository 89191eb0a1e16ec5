//! Reproducible sample roster and ledger.
//!
//! Shaped like a real export: mixed title spellings, unknown titles,
//! off-roster helpers, untagged jobs, the same job repeated once per
//! technician, and the occasional unusable date.

use crate::{
    ledger::LedgerRow,
    name_generator::NameGenerator,
    rng::{SampleRng, SampleSlot},
    roster::{name_key, RosterEntry},
};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct SampleData {
    pub roster: Vec<RosterEntry>,
    pub rows:   Vec<LedgerRow>,
}

const POOLS: [u32; 7] = [50, 75, 80, 100, 150, 200, 250];
const TEAM_SIZE_WEIGHTS: [f64; 5] = [0.35, 0.30, 0.20, 0.10, 0.05];
const UNKNOWN_TITLES: [&str; 4] = ["Dispatcher", "CSR", "Warehouse", "Install Manager"];
const BUSINESS_UNITS: [&str; 4] = ["Plumbing Service", "HVAC Service", "Drains", "Electrical"];
const ITEMS: [&str; 8] = [
    "Water Heater Replacement",
    "Furnace Tune-Up",
    "Main Line Jetting",
    "Panel Upgrade",
    "Sewer Camera Inspection",
    "AC Install",
    "Repipe",
    "Drain Clear",
];

pub fn generate(seed: u64, technicians: usize, jobs: usize) -> SampleData {
    let mut roster_rng = SampleSlot::Roster.rng(seed);
    let roster = generate_roster(&mut roster_rng, technicians);
    let names: Vec<String> = roster.iter().map(|e| e.name.clone()).collect();

    let mut ledger_rng = SampleSlot::Ledger.rng(seed);
    let rows = generate_rows(&mut ledger_rng, &names, jobs);
    log::debug!("sample: seed={seed} {} technicians, {} ledger rows", roster.len(), rows.len());
    SampleData { roster, rows }
}

fn generate_roster(rng: &mut SampleRng, count: usize) -> Vec<RosterEntry> {
    let mut seen = HashSet::new();
    let mut roster = Vec::with_capacity(count);
    for i in 0..count {
        let mut name = NameGenerator::technician_name(rng);
        let mut attempts = 0;
        while seen.contains(&name_key(&name)) && attempts < 10 {
            name = NameGenerator::technician_name(rng);
            attempts += 1;
        }
        if seen.contains(&name_key(&name)) {
            name = format!("{name} {}", i + 2);
        }
        seen.insert(name_key(&name));
        roster.push(RosterEntry { name, position: position_title(rng) });
    }
    roster
}

fn position_title(rng: &mut SampleRng) -> String {
    // unknown, class 1..=4
    let class = rng.weighted_index(&[0.10, 0.20, 0.30, 0.25, 0.15]);
    if class == 0 {
        return rng.pick(&UNKNOWN_TITLES).to_string();
    }
    match rng.next_u64_below(3) {
        0 => format!("Technician Class {class}"),
        1 => format!("Service Tech - class{class}"),
        _ => format!("Plumber (CLASS {class})"),
    }
}

fn generate_rows(rng: &mut SampleRng, names: &[String], jobs: usize) -> Vec<LedgerRow> {
    let mut rows = Vec::with_capacity(jobs + jobs / 5);
    if names.is_empty() {
        return rows;
    }
    for _ in 0..jobs {
        let size = (rng.weighted_index(&TEAM_SIZE_WEIGHTS) + 1).min(names.len());
        let mut team = draw_team(rng, names, size);
        if rng.chance(0.05) {
            team.push(NameGenerator::technician_name(rng));
        }

        let pool_tag = if rng.chance(0.12) {
            if rng.chance(0.5) { "SPIFF 25".to_string() } else { String::new() }
        } else {
            format!("PBP {}", rng.pick(&POOLS))
        };

        let month = rng.next_u64_below(12) + 1;
        let day = rng.next_u64_below(28) + 1;
        let completion_date = if rng.chance(0.03) {
            "TBD".to_string()
        } else if rng.chance(0.5) {
            format!("2024-{month:02}-{day:02}")
        } else {
            format!("{month}/{day}/2024")
        };

        let row = LedgerRow {
            customer_name:        NameGenerator::customer_name(rng),
            job_business_unit:    rng.pick(&BUSINESS_UNITS).to_string(),
            completion_date,
            item_name:            rng.pick(&ITEMS).to_string(),
            pool_tag,
            primary_technician:   team[0].clone(),
            assigned_technicians: team[1..].join(", "),
        };

        // Same job exported again with another technician as primary.
        let repeat = team.len() > 1 && rng.chance(0.2);
        rows.push(row.clone());
        if repeat {
            let mut rotated = team.clone();
            rotated.rotate_left(1);
            rows.push(LedgerRow {
                primary_technician:   rotated[0].clone(),
                assigned_technicians: rotated[1..].join("; "),
                ..row
            });
        }
    }
    rows
}

/// `size` distinct names, partial Fisher-Yates.
fn draw_team(rng: &mut SampleRng, names: &[String], size: usize) -> Vec<String> {
    let mut idx: Vec<usize> = (0..names.len()).collect();
    for i in 0..size {
        let j = i + rng.next_u64_below((idx.len() - i) as u64) as usize;
        idx.swap(i, j);
    }
    idx[..size].iter().map(|&i| names[i].clone()).collect()
}
