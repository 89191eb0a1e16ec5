use pbp_core::{classifier::Role, split::split_percent};

use pbp_core::classifier::Role::{Assistant as A, Lead as L};

#[test]
fn table_constants() {
    let cases: [(usize, usize, usize, Role, f64); 17] = [
        (1, 1, 0, L, 100.0),
        (1, 0, 1, A, 100.0),
        (2, 1, 1, L, 65.0),
        (2, 1, 1, A, 35.0),
        (2, 2, 0, L, 50.0),
        (2, 0, 2, A, 50.0),
        (3, 1, 2, L, 46.0),
        (3, 1, 2, A, 27.0),
        (3, 2, 1, L, 38.0),
        (3, 2, 1, A, 24.0),
        (3, 3, 0, L, 33.33),
        (3, 0, 3, A, 33.33),
        (4, 2, 2, L, 30.0),
        (4, 2, 2, A, 20.0),
        (4, 3, 1, L, 30.0),
        (4, 3, 1, A, 10.0),
        (4, 4, 0, L, 25.0),
    ];
    for (total, leads, assistants, role, expected) in cases {
        assert_eq!(
            split_percent(total, leads, assistants, role),
            expected,
            "{total} techs {leads}L/{assistants}A as {role}"
        );
    }
}

#[test]
fn unmatched_compositions_split_evenly() {
    assert_eq!(split_percent(4, 1, 3, L), 25.0);
    assert_eq!(split_percent(4, 1, 3, A), 25.0);
    assert_eq!(split_percent(5, 2, 3, L), 20.0);
    assert!((split_percent(6, 1, 5, A) - 100.0 / 6.0).abs() < 1e-12);
}

#[test]
fn no_role_or_empty_team_gets_nothing() {
    assert_eq!(split_percent(2, 1, 1, Role::Unassigned), 0.0);
    assert_eq!(split_percent(0, 0, 0, L), 0.0);
}

#[test]
fn headcount_is_recomputed_from_role_counts() {
    // Stated total of 3 but only one lead and one assistant.
    assert_eq!(split_percent(3, 1, 1, L), 65.0);
    assert_eq!(split_percent(2, 0, 0, L), 0.0);
}
