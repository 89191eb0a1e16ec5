//! Technician classifier: position title to skill class, eligibility
//! and default role.
//!
//! Never fails: anything without a recognisable "class N" marker is
//! class 0 (unknown, ineligible, no role).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Skill class parsed from a title: 0 = unknown, 1 = apprentice,
/// 2 = mid, 3 and 4 = senior.
pub type SkillClass = u8;

pub const UNKNOWN_CLASS: SkillClass = 0;
pub const APPRENTICE_CLASS: SkillClass = 1;
pub const MID_CLASS: SkillClass = 2;
pub const SENIOR_CLASS: SkillClass = 3;

/// A technician's role on one job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    Lead,
    Assistant,
    /// Excluded from the team headcount.
    #[serde(rename = "None")]
    Unassigned,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Lead       => "Lead",
            Role::Assistant  => "Assistant",
            Role::Unassigned => "None",
        }
    }

    /// Inverse of `as_str`.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "Lead"      => Some(Role::Lead),
            "Assistant" => Some(Role::Assistant),
            "None"      => Some(Role::Unassigned),
            _           => None,
        }
    }

    pub fn is_payable(&self) -> bool {
        !matches!(self, Role::Unassigned)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    pub skill_class:  SkillClass,
    pub eligible:     bool,
    pub default_role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnicianProfile {
    pub name:         String,
    pub skill_class:  SkillClass,
    /// False for class 0 and class 1.
    pub eligible:     bool,
    pub default_role: Role,
}

impl TechnicianProfile {
    pub fn new(name: &str, position: &str) -> Self {
        let c = classify(position);
        Self {
            name:         name.trim().to_string(),
            skill_class:  c.skill_class,
            eligible:     c.eligible,
            default_role: c.default_role,
        }
    }

    /// Profile for a name the roster does not know.
    pub fn unknown(name: &str) -> Self {
        Self::new(name, "")
    }

    pub fn is_apprentice(&self) -> bool {
        self.skill_class == APPRENTICE_CLASS
    }
}

fn class_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"class\s*([1-4])").expect("static class pattern"))
}

/// Parse the skill class out of a free-text position title.
pub fn skill_class_of(position: &str) -> SkillClass {
    let normalized = position.trim().to_lowercase();
    class_pattern()
        .captures(&normalized)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<SkillClass>().ok())
        .unwrap_or(UNKNOWN_CLASS)
}

pub fn classify(position: &str) -> Classification {
    let skill_class = skill_class_of(position);
    let (eligible, default_role) = match skill_class {
        4 | 3 => (true,  Role::Lead),
        2     => (true,  Role::Assistant),
        // Apprentices fill a team slot but never earn.
        1     => (false, Role::Assistant),
        _     => (false, Role::Unassigned),
    };
    Classification { skill_class, eligible, default_role }
}
