use chrono::NaiveDate;
use pbp_core::{
    classifier::Role,
    context::RunContext,
    ledger::JobRecord,
    payout::{PayoutCalculator, SkipReason},
    roster::{Roster, RosterEntry},
};

fn roster() -> Roster {
    let entries = [
        ("Alice", "Technician Class 4"),
        ("Bob", "Technician Class 2"),
        ("Carl", "Technician Class 3"),
        ("Dana", "Technician Class 2"),
        ("Eve", "Apprentice Class 1"),
        ("Frank", "Dispatcher"),
        ("Gina", "Technician Class 3"),
    ]
    .map(|(name, position)| RosterEntry { name: name.into(), position: position.into() });
    Roster::from_entries(&entries).unwrap()
}

fn job(customer: &str, pool: f64, primary: &str, assigned: &str) -> JobRecord {
    JobRecord {
        customer_name:        customer.into(),
        job_business_unit:    "Plumbing Service".into(),
        completion_date:      NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        item_name:            "Water Heater Replacement".into(),
        pool_amount:          pool,
        primary_technician:   primary.into(),
        assigned_technicians: assigned.into(),
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn lead_and_assistant_split_the_pool() {
    let roster = roster();
    let calc = PayoutCalculator::new(&roster);
    let alloc = calc.allocate_job(&job("Acme", 150.0, "Alice", "Bob"));

    let alice = alloc.assignment_for("alice").unwrap();
    assert_eq!(alice.role, Role::Lead);
    assert_eq!(alice.split_percent, 65.0);
    assert!(approx(alice.payout, 97.50));

    let bob = alloc.assignment_for("Bob").unwrap();
    assert_eq!(bob.role, Role::Assistant);
    assert_eq!(bob.split_percent, 35.0);
    assert!(approx(bob.payout, 52.50));

    assert!(approx(alloc.total_paid(), 150.0));
    assert_eq!(
        alloc.team_details,
        "Alice (Class 4): Lead 65%; Bob (Class 2): Assistant 35%"
    );
}

#[test]
fn solo_senior_takes_the_whole_pool() {
    let roster = roster();
    let ctx = RunContext::for_test("solo");
    let calc = PayoutCalculator::new(&roster);
    let result = calc.payouts_for(&ctx, "Carl", &[job("Beta", 80.0, "Carl", "")]);

    assert_eq!(result.entries.len(), 1);
    let entry = &result.entries[0];
    assert_eq!(entry.role_for_job, Role::Lead);
    assert_eq!(entry.split_percentage, 100.0);
    assert!(approx(entry.technician_share, 80.0));
    assert!(approx(result.total, 80.0));
}

#[test]
fn two_seniors_split_evenly() {
    let roster = roster();
    let alloc = PayoutCalculator::new(&roster).allocate_job(&job("Acme", 120.0, "Carl", "Gina"));
    for a in &alloc.assignments {
        assert_eq!(a.role, Role::Lead);
        assert_eq!(a.split_percent, 50.0);
        assert!(approx(a.payout, 60.0));
    }
}

#[test]
fn one_lead_two_assistants() {
    let roster = roster();
    let alloc = PayoutCalculator::new(&roster).allocate_job(&job("Acme", 200.0, "Carl", "Dana, Bob"));
    let splits: Vec<f64> = alloc.assignments.iter().map(|a| a.split_percent).collect();
    assert_eq!(splits, vec![46.0, 27.0, 27.0]);
    let sum: f64 = splits.iter().sum();
    assert!(approx(sum, 100.0));
}

#[test]
fn apprentice_holds_a_slot_but_earns_nothing() {
    let roster = roster();
    let ctx = RunContext::for_test("apprentice");
    let calc = PayoutCalculator::new(&roster);
    let jobs = [job("Acme", 100.0, "Carl", "Eve")];

    let carl = calc.payouts_for(&ctx, "Carl", &jobs);
    assert_eq!(carl.entries[0].split_percentage, 65.0);
    assert!(approx(carl.total, 65.0));

    let eve = calc.payouts_for(&ctx, "Eve", &jobs);
    assert!(eve.entries.is_empty());
    assert_eq!(eve.skipped_for(SkipReason::Ineligible), 1);

    let alloc = calc.allocate_job(&jobs[0]);
    assert_eq!(alloc.assignment_for("Eve").unwrap().payout, 0.0);
    assert_eq!(
        alloc.team_details,
        "Carl (Class 3): Lead 65%; Eve (Class 1): Assistant 35% (no payout)"
    );
}

#[test]
fn unknown_technician_is_not_counted() {
    let roster = roster();
    let calc = PayoutCalculator::new(&roster);
    let alloc = calc.allocate_job(&job("Acme", 90.0, "Bob", "Frank, Somebody New"));

    assert_eq!(alloc.composition.total_techs, 1);
    let bob = alloc.assignment_for("Bob").unwrap();
    assert_eq!(bob.role, Role::Lead);
    assert!(approx(bob.payout, 90.0));
    assert_eq!(
        alloc.team_details,
        "Bob (Class 2): Lead 100%; Frank (Class 0): Not eligible; Somebody New (Class 0): Not eligible"
    );
}

#[test]
fn zero_or_missing_pool_pays_nobody() {
    let roster = roster();
    let ctx = RunContext::for_test("nopool");
    let calc = PayoutCalculator::new(&roster);
    let jobs = [job("Acme", 0.0, "Alice", "Bob"), job("Beta", -5.0, "Alice", "")];
    for tech in ["Alice", "Bob"] {
        let result = calc.payouts_for(&ctx, tech, &jobs);
        assert!(result.entries.is_empty());
        assert_eq!(result.skipped_for(SkipReason::NoPool), 2);
    }
}

#[test]
fn duplicate_rows_are_paid_once() {
    let roster = roster();
    let ctx = RunContext::for_test("dup");
    let calc = PayoutCalculator::new(&roster);
    let jobs = [
        job("Acme", 150.0, "Alice", "Bob"),
        job("Acme", 150.0, "Bob", "Alice"),
        job("Acme", 150.0, "alice", "BOB"),
    ];

    let alice = calc.payouts_for(&ctx, "Alice", &jobs);
    assert_eq!(alice.entries.len(), 1);
    assert!(approx(alice.total, 97.5));
    assert_eq!(alice.skipped_for(SkipReason::Duplicate), 2);
}

#[test]
fn target_not_on_job_is_skipped() {
    let roster = roster();
    let ctx = RunContext::for_test("absent");
    let result = PayoutCalculator::new(&roster).payouts_for(&ctx, "Dana", &[job("Acme", 150.0, "Alice", "Bob")]);
    assert!(result.entries.is_empty());
    assert_eq!(result.skipped_for(SkipReason::NotOnJob), 1);
}

#[test]
fn names_match_case_insensitively_and_keep_first_spelling() {
    let roster = roster();
    let ctx = RunContext::for_test("case");
    let calc = PayoutCalculator::new(&roster);
    let record = job("Acme", 150.0, "ALICE", "alice, bob");

    assert_eq!(record.technician_names(), vec!["ALICE", "bob"]);
    let result = calc.payouts_for(&ctx, "  Alice ", &[record]);
    assert_eq!(result.technician, "Alice");
    assert_eq!(result.entries.len(), 1);
    assert!(result.entries[0].team_details.starts_with("ALICE (Class 4): Lead 65%"));
}

#[test]
fn payouts_are_rounded_to_cents() {
    let roster = roster();
    let alloc = PayoutCalculator::new(&roster).allocate_job(&job("Acme", 100.0, "Carl", "Gina, Alice"));
    for a in &alloc.assignments {
        assert_eq!(a.split_percent, 33.33);
        assert!(approx(a.payout, 33.33));
    }
}

#[test]
fn entries_follow_ledger_order_and_total_sums_shares() {
    let roster = roster();
    let ctx = RunContext::for_test("order");
    let calc = PayoutCalculator::new(&roster);
    let jobs = [
        job("Zeta", 100.0, "Bob", ""),
        job("Acme", 150.0, "Alice", "Bob"),
        job("Mid", 40.0, "Bob", "Eve"),
    ];
    let bob = calc.payouts_for(&ctx, "Bob", &jobs);
    let customers: Vec<&str> = bob.entries.iter().map(|e| e.customer_name.as_str()).collect();
    assert_eq!(customers, vec!["Zeta", "Acme", "Mid"]);
    // 100 + 52.50 + 26.00
    assert!(approx(bob.total, 178.5));
}

#[test]
fn space_separated_assigned_list_is_split_on_roster_names() {
    let roster = roster();
    let ctx = RunContext::for_test("spaces");
    let calc = PayoutCalculator::new(&roster);
    let record = job("Acme", 150.0, "Alice", "Bob Dana");

    assert_eq!(record.technician_names_in(&roster), vec!["Alice", "Bob", "Dana"]);
    let alloc = calc.allocate_job(&record);
    let splits: Vec<f64> = alloc.assignments.iter().map(|a| a.split_percent).collect();
    assert_eq!(splits, vec![46.0, 27.0, 27.0]);

    let bob = calc.payouts_for(&ctx, "Bob", &[record.clone()]);
    assert_eq!(bob.entries.len(), 1);
    assert_eq!(bob.entries[0].role_for_job, Role::Assistant);
    assert!(approx(bob.total, 40.5));

    let alice = calc.payouts_for(&ctx, "Alice", &[record]);
    assert!(approx(alice.total, 69.0));
}

#[test]
fn full_names_stay_whole_when_split_on_spaces() {
    let entries = [
        ("Alice Moore", "Technician Class 4"),
        ("Bob Nguyen", "Technician Class 2"),
        ("Dana Patel", "Technician Class 2"),
    ]
    .map(|(name, position)| RosterEntry { name: name.into(), position: position.into() });
    let roster = Roster::from_entries(&entries).unwrap();

    let record = job("Acme", 100.0, "Alice Moore", "Bob Nguyen Dana Patel, Walk In Helper");
    assert_eq!(
        record.technician_names_in(&roster),
        vec!["Alice Moore", "Bob Nguyen", "Dana Patel", "Walk In Helper"]
    );
    assert_eq!(roster.split_names("bob nguyen"), vec!["bob nguyen"]);
    assert_eq!(roster.split_names("Zed Quinn"), vec!["Zed Quinn"]);
    assert_eq!(roster.split_names("Zed Dana Patel"), vec!["Dana Patel"]);
}
