//! Deterministic firm and venture names from curated word lists.

use crate::rng::DemoRng;

pub struct NameGenerator;

impl NameGenerator {
    /// "Prefix Sector Suffix", e.g. "Coastal Textile Holdings".
    pub fn firm_name(rng: &mut DemoRng) -> String {
        let prefix = rng.pick(Self::prefixes());
        let sector = rng.pick(Self::sectors());
        let suffix = rng.pick(Self::firm_suffixes());
        format!("{prefix} {sector} {suffix}")
    }

    /// "Founder's Craft Studio", e.g. "Elif's Ceramics Workshop".
    pub fn venture_name(rng: &mut DemoRng) -> String {
        let founder = rng.pick(Self::founders());
        let craft = rng.pick(Self::crafts());
        let suffix = rng.pick(Self::venture_suffixes());
        format!("{founder}'s {craft} {suffix}")
    }

    fn prefixes() -> &'static [&'static str] {
        &[
            "Anatolian", "Aegean", "Coastal", "Central", "Northern", "Green", "Blue",
            "United", "Summit", "Harbor", "Valley", "Delta", "Golden", "Silver",
        ]
    }

    fn sectors() -> &'static [&'static str] {
        &[
            "Textile", "Packaging", "Steel", "Plastics", "Food", "Chemicals", "Paper",
            "Glass", "Logistics", "Energy", "Automotive", "Furniture", "Ceramics",
        ]
    }

    fn firm_suffixes() -> &'static [&'static str] {
        &["Industries", "Holdings", "Manufacturing", "Group", "Works", "Co"]
    }

    fn founders() -> &'static [&'static str] {
        &[
            "Elif", "Zeynep", "Ayse", "Merve", "Deniz", "Selin", "Ece", "Derya",
            "Maria", "Sofia", "Lena", "Amira", "Nadia", "Grace", "Ines", "Yara",
        ]
    }

    fn crafts() -> &'static [&'static str] {
        &[
            "Ceramics", "Weaving", "Bakery", "Design", "Software", "Herbal", "Print",
            "Tailoring", "Organic", "Jewelry", "Repair", "Catering",
        ]
    }

    fn venture_suffixes() -> &'static [&'static str] {
        &["Workshop", "Studio", "Collective", "Lab", "House", "Cooperative"]
    }
}
