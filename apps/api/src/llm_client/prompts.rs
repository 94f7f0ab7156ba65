// Career counseling prompt sent with every analysis request.

/// Career analysis prompt template.
/// Replace: {goals}, {interests}, {current_skills}
pub const CAREER_PROMPT_TEMPLATE: &str = r#"Act as a career counselor analyzing a student's profile. Based on the following information, suggest suitable career paths:

Goals: {goals}
Interests: {interests}
Current Skills: {current_skills}

Provide a detailed analysis in the following JSON format exactly:
{
    "professions": [
        {
            "name": "Profession Name",
            "requiredSkills": ["skill1", "skill2", "skill3"],
            "careerPath": ["10th Grade - Focus on relevant subjects", "12th Grade - Choose appropriate stream", "Bachelor's Degree details", "Master's/Additional qualifications", "Entry-level position", "Career progression"],
            "salaryRange": "Entry level to Senior level salary range in INR",
            "marketStats": "Current job market statistics and future outlook",
            "successStory": "A brief success story in this field"
        }
    ]
}

Important:
1. Provide exactly 10 professions
2. Ensure all JSON fields are present for each profession
3. Make sure the response is properly formatted JSON
4. Be specific and detailed in each field"#;

/// Number of professions the prompt asks for.
pub const REQUESTED_PROFESSIONS: usize = 10;

/// Fills the career template with the student's profile.
pub fn build_career_prompt(goals: &str, interests: &str, current_skills: &str) -> String {
    fill_template(
        CAREER_PROMPT_TEMPLATE,
        &[
            ("{goals}", goals.trim()),
            ("{interests}", interests.trim()),
            ("{current_skills}", current_skills.trim()),
        ],
    )
}

/// Substitutes placeholders in a single left-to-right pass over the template.
/// Inserted values are never rescanned, so user text is kept verbatim.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match values.iter().find(|(placeholder, _)| tail.starts_with(placeholder)) {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_profile_fields() {
        let prompt = build_career_prompt(
            "Work on climate tech",
            "  physics, hiking ",
            "Python, statistics",
        );
        assert!(prompt.contains("Goals: Work on climate tech\n"));
        assert!(prompt.contains("Interests: physics, hiking\n"));
        assert!(prompt.contains("Current Skills: Python, statistics\n"));
    }

    #[test]
    fn test_prompt_has_no_unfilled_placeholders() {
        let prompt = build_career_prompt("a", "b", "c");
        assert!(!prompt.contains("{goals}"));
        assert!(!prompt.contains("{interests}"));
        assert!(!prompt.contains("{current_skills}"));
    }

    #[test]
    fn test_placeholder_names_in_user_text_are_kept_verbatim() {
        let prompt = build_career_prompt("learn {current_skills} deeply", "{interests} and art", "Rust");
        assert!(prompt.contains("Goals: learn {current_skills} deeply\n"));
        assert!(prompt.contains("Interests: {interests} and art\n"));
        assert!(prompt.contains("Current Skills: Rust\n"));
    }

    #[test]
    fn test_schema_braces_survive_filling() {
        let prompt = build_career_prompt("a", "b", "c");
        assert!(prompt.contains("{\n    \"professions\": ["));
        assert_eq!(prompt.matches('{').count(), CAREER_PROMPT_TEMPLATE.matches('{').count() - 3);
    }

    #[test]
    fn test_prompt_requests_ten_professions() {
        let prompt = build_career_prompt("a", "b", "c");
        assert!(prompt.contains(&format!("exactly {REQUESTED_PROFESSIONS} professions")));
        for key in [
            "\"requiredSkills\"",
            "\"careerPath\"",
            "\"salaryRange\"",
            "\"marketStats\"",
            "\"successStory\"",
        ] {
            assert!(prompt.contains(key), "prompt should show {key}");
        }
    }
}
