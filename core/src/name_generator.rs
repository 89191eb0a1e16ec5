//! Deterministic technician and customer names from curated lists.
//! Same RNG seed, same names.

use crate::rng::SampleRng;

pub struct NameGenerator;

impl NameGenerator {
    /// "First Last".
    pub fn technician_name(rng: &mut SampleRng) -> String {
        let first = rng.pick(Self::first_names());
        let last = rng.pick(Self::last_names());
        format!("{first} {last}")
    }

    /// A residential or commercial customer.
    pub fn customer_name(rng: &mut SampleRng) -> String {
        if rng.chance(0.7) {
            format!("{}, {}", rng.pick(Self::last_names()), rng.pick(Self::first_names()))
        } else {
            format!(
                "{} {} {}",
                rng.pick(Self::business_prefixes()),
                rng.pick(Self::business_industries()),
                rng.pick(Self::business_suffixes())
            )
        }
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph",
            "Thomas", "Charles", "Daniel", "Matthew", "Anthony", "Mark", "Steven", "Paul",
            "Andrew", "Kevin", "Brian", "Jason", "Ryan", "Eric", "Scott", "Brandon",
            "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Susan", "Jessica", "Sarah",
            "Karen", "Lisa", "Ashley", "Emily", "Michelle", "Amanda", "Melissa", "Laura",
            "Rachel", "Megan", "Andrea", "Hannah", "Alice", "Grace", "Natalie", "Sofia",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
            "Rodriguez", "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas",
            "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
            "Harris", "Clark", "Lewis", "Robinson", "Walker", "Young", "Allen", "King",
            "Wright", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson",
            "Baker", "Hall", "Rivera", "Campbell", "Mitchell", "Carter", "Roberts", "Patel",
        ]
    }

    fn business_prefixes() -> &'static [&'static str] {
        &[
            "Premier", "Elite", "First", "Superior", "Quality", "Reliable", "Trusted",
            "Metro", "Valley", "Coastal", "Central", "United", "Prime",
        ]
    }

    fn business_suffixes() -> &'static [&'static str] {
        &["LLC", "Inc", "Co", "Group", "Partners", "Holdings"]
    }

    fn business_industries() -> &'static [&'static str] {
        &[
            "Dental", "Auto", "Retail", "Restaurant", "Storage", "Realty",
            "Logistics", "Fitness", "Bakery", "Printing",
        ]
    }
}
