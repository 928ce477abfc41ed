//! Prompt construction from a company profile.
//!
//! The prompt degrades gracefully around missing fields; only the company
//! name is mandatory. Long descriptions are trimmed at sentence boundaries
//! so the prompt stays within the generation provider's input budget.

use crate::error::PitchError;
use herald_types::CompanyProfile;

/// Descriptions longer than this are trimmed before entering the prompt.
const MAX_DESCRIPTION_CHARS: usize = 1350;

/// Builds the pitch-generation prompt for a company.
///
/// Fails with [`PitchError::MissingCompanyName`] when the profile has no
/// name; every other field contributes a clause only when present.
pub fn build_prompt(profile: &CompanyProfile) -> Result<String, PitchError> {
    let name = profile
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or(PitchError::MissingCompanyName)?;

    let mut prompt = format!(
        "Create a proposal for the {name} company from HappyAI to introduce AI into its business."
    );

    let industry = profile.industry.as_deref().filter(|i| !i.is_empty());
    let specialities = &profile.specialities;
    match (industry, specialities.is_empty()) {
        (Some(industry), false) => {
            prompt.push_str(&format!(
                " Take into account the company industry ({industry}) and some of specialities: {}.",
                specialities.join(", ")
            ));
        }
        (Some(industry), true) => {
            prompt.push_str(&format!(
                " Take into account the company industry ({industry})."
            ));
        }
        (None, false) => {
            prompt.push_str(&format!(
                " Take into account some of company specialities: {}.",
                specialities.join(", ")
            ));
        }
        (None, true) => {}
    }

    if let Some(description) = profile.description.as_deref().filter(|d| !d.is_empty()) {
        let description = if description.chars().count() > MAX_DESCRIPTION_CHARS {
            trim_description(description, MAX_DESCRIPTION_CHARS)
        } else {
            description.to_string()
        };
        prompt.push_str(&format!(
            " Also you can use a description of company: {description}."
        ));
    }

    if let Some(size) = profile.headcount_floor() {
        prompt.push_str(&format!(" Take into account company size ({size})."));
    }

    prompt.push_str(&format!(
        " Introduce yourself like a Head of Business Department of HappyAI company. \
         Try to fit into 350 tokens. Use company name {name} for greetings."
    ));
    Ok(prompt)
}

/// Trims a description to at most `max_chars` by dropping whole sentences
/// from the end.
fn trim_description(description: &str, max_chars: usize) -> String {
    let mut trimmed = String::new();
    let mut total = 0;

    for sentence in description.split('.') {
        // A sentence re-enters the text with its trailing dot.
        let sentence_len = sentence.chars().count() + 1;
        if total + sentence_len > max_chars {
            break;
        }
        trimmed.push_str(sentence);
        trimmed.push('.');
        total += sentence_len;
    }

    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_profile() -> CompanyProfile {
        CompanyProfile {
            name: Some("Acme".into()),
            industry: Some("Robotics".into()),
            specialities: vec!["welding".into(), "assembly".into()],
            description: Some("We build robots. They weld things.".into()),
            company_size: Some(vec![Some(51), Some(200)]),
        }
    }

    #[test]
    fn full_profile_produces_all_clauses() {
        let prompt = build_prompt(&full_profile()).unwrap();
        assert!(prompt.starts_with("Create a proposal for the Acme company from HappyAI"));
        assert!(prompt.contains("industry (Robotics)"));
        assert!(prompt.contains("specialities: welding, assembly."));
        assert!(prompt.contains("description of company: We build robots. They weld things.."));
        assert!(prompt.contains("company size (51)"));
        assert!(prompt.contains("Use company name Acme for greetings."));
    }

    #[test]
    fn missing_name_is_an_error() {
        let profile = CompanyProfile {
            name: None,
            ..full_profile()
        };
        assert!(matches!(
            build_prompt(&profile),
            Err(PitchError::MissingCompanyName)
        ));
    }

    #[test]
    fn specialities_without_industry() {
        let profile = CompanyProfile {
            industry: None,
            ..full_profile()
        };
        let prompt = build_prompt(&profile).unwrap();
        assert!(prompt.contains("Take into account some of company specialities: welding, assembly."));
        assert!(!prompt.contains("industry"));
    }

    #[test]
    fn bare_profile_still_builds() {
        let profile = CompanyProfile {
            name: Some("Acme".into()),
            ..CompanyProfile::default()
        };
        let prompt = build_prompt(&profile).unwrap();
        assert!(prompt.contains("Create a proposal for the Acme company"));
        assert!(prompt.contains("Head of Business Department"));
        assert!(!prompt.contains("industry"));
        assert!(!prompt.contains("description"));
    }

    #[test]
    fn long_description_is_trimmed_at_sentence_boundaries() {
        let sentence = "This sentence is exactly forty chars ok."; // 40 chars
        let long = sentence.repeat(40); // 1600 chars
        let profile = CompanyProfile {
            description: Some(long),
            ..full_profile()
        };
        let prompt = build_prompt(&profile).unwrap();

        let start = prompt.find("description of company: ").unwrap() + "description of company: ".len();
        let end = prompt[start..].find(" Take into account company size").unwrap() + start;
        let embedded = &prompt[start..end];
        assert!(embedded.chars().count() <= MAX_DESCRIPTION_CHARS + 1);
        assert!(embedded.ends_with("ok.."));
    }

    #[test]
    fn trim_keeps_whole_sentences() {
        let text = "One. Two. Three.";
        assert_eq!(trim_description(text, 10), "One. Two.");
        assert_eq!(trim_description(text, 4), "One.");
        assert_eq!(trim_description(text, 2), "");
    }
}
