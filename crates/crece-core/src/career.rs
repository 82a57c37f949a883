//! Career-name normalization.
//!
//! User accounts carry free-form career strings; course and question data is
//! keyed by canonical career names. The alias table maps known variants onto
//! canonical keys; matching is accent-insensitive and first-match-wins in
//! declared table order. Unrecognized careers pass through unchanged unless
//! they carry the "systems" cue.

/// Canonical career keys used by the catalog and question bank.
pub const BUSINESS_SYSTEMS: &str = "Business Information Systems";
pub const COMPUTER_SCIENCE: &str = "Computer Science";
pub const UX_DESIGN: &str = "UX/UI Design";
pub const DIGITAL_MARKETING: &str = "Digital Marketing";
pub const DATA_AI: &str = "Data Science & AI";

/// Career used when a lookup misses entirely.
pub const DEFAULT_CAREER: &str = COMPUTER_SCIENCE;

/// Known spellings and naming variants, in match-priority order.
const ALIASES: &[(&str, &str)] = &[
    ("Systems Engineering", BUSINESS_SYSTEMS),
    ("Enterprise Systems Engineering", BUSINESS_SYSTEMS),
    ("Business Information Systems", BUSINESS_SYSTEMS),
    ("Computer Science", COMPUTER_SCIENCE),
    ("UX/UI Design", UX_DESIGN),
    ("Advanced Digital Marketing", DIGITAL_MARKETING),
    ("Digital Marketing", DIGITAL_MARKETING),
    ("Data Science & AI", DATA_AI),
    ("Data Analysis & Artificial Intelligence", DATA_AI),
];

/// Lowercase a career string and strip the accents common in student input.
fn fold(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Map a free-form career string onto its canonical key.
///
/// An alias matches when the folded input equals the folded alias, or when
/// the input contains the alias's leading word. The first matching row wins.
pub fn normalize(input: &str) -> String {
    let folded = fold(input);

    for (alias, canonical) in ALIASES {
        let folded_alias = fold(alias);
        let leading = folded_alias.split(' ').next().unwrap_or(&folded_alias);
        if folded == folded_alias || folded.contains(leading) {
            return (*canonical).to_string();
        }
    }

    // Substring cue: anything mentioning "systems" is the business-systems
    // track under a non-standard name.
    if folded.contains("systems") {
        return BUSINESS_SYSTEMS.to_string();
    }

    input.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(normalize("Computer Science"), COMPUTER_SCIENCE);
        assert_eq!(normalize("UX/UI Design"), UX_DESIGN);
    }

    #[test]
    fn test_case_and_accent_insensitive() {
        assert_eq!(normalize("computer science"), COMPUTER_SCIENCE);
        assert_eq!(normalize("Cómputer Scíence"), COMPUTER_SCIENCE);
    }

    #[test]
    fn test_variant_maps_to_canonical() {
        assert_eq!(normalize("Systems Engineering"), BUSINESS_SYSTEMS);
        assert_eq!(normalize("Enterprise Systems Engineering"), BUSINESS_SYSTEMS);
        assert_eq!(normalize("Advanced Digital Marketing"), DIGITAL_MARKETING);
    }

    #[test]
    fn test_substring_cue() {
        assert_eq!(normalize("Information Systems Management"), BUSINESS_SYSTEMS);
    }

    #[test]
    fn test_first_match_wins_by_table_order() {
        // Contains the leading word of both the "Systems Engineering" row and
        // the "Data Science & AI" row; the earlier row decides.
        assert_eq!(normalize("Data Systems Engineering"), BUSINESS_SYSTEMS);
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(normalize("Veterinary Medicine"), "Veterinary Medicine");
    }
}
