use pbp_core::classifier::{classify, skill_class_of, Role, TechnicianProfile};

#[test]
fn class_marker_is_found_anywhere_in_title() {
    assert_eq!(skill_class_of("Class 3"), 3);
    assert_eq!(skill_class_of("class3"), 3);
    assert_eq!(skill_class_of("  Plumbing Technician CLASS 4 "), 4);
    assert_eq!(skill_class_of("Service Tech - class 2"), 2);
    assert_eq!(skill_class_of("Apprentice (Class 1)"), 1);
}

#[test]
fn titles_without_a_valid_class_are_unknown() {
    assert_eq!(skill_class_of(""), 0);
    assert_eq!(skill_class_of("Dispatcher"), 0);
    assert_eq!(skill_class_of("Class 5"), 0);
    assert_eq!(skill_class_of("Class"), 0);
    assert_eq!(skill_class_of("first class service"), 0);
}

#[test]
fn class_maps_to_eligibility_and_default_role() {
    let cases = [
        ("Class 4", 4, true, Role::Lead),
        ("Class 3", 3, true, Role::Lead),
        ("Class 2", 2, true, Role::Assistant),
        ("Class 1", 1, false, Role::Assistant),
        ("Office", 0, false, Role::Unassigned),
    ];
    for (title, class, eligible, role) in cases {
        let c = classify(title);
        assert_eq!(c.skill_class, class, "{title}");
        assert_eq!(c.eligible, eligible, "{title}");
        assert_eq!(c.default_role, role, "{title}");
    }
}

#[test]
fn unknown_profile_keeps_the_requested_name() {
    let p = TechnicianProfile::unknown("  Zed Ortiz ");
    assert_eq!(p.name, "Zed Ortiz");
    assert_eq!(p.skill_class, 0);
    assert!(!p.eligible);
    assert_eq!(p.default_role, Role::Unassigned);
}

#[test]
fn role_serializes_with_display_names() {
    assert_eq!(serde_json::to_string(&Role::Lead).unwrap(), "\"Lead\"");
    assert_eq!(serde_json::to_string(&Role::Unassigned).unwrap(), "\"None\"");
    assert_eq!(Role::Assistant.to_string(), "Assistant");
}
