//! Renders a career report into the downloadable Markdown document.

use crate::models::career::{CareerProfession, CareerReport};
use crate::models::profile::UserProfileRow;

const NOT_PROVIDED: &str = "Not provided";

/// Renders the profile summary followed by one numbered section per profession.
///
/// Works with any number of professions, including none.
pub fn render_report_markdown(profile: &UserProfileRow, report: &CareerReport) -> String {
    let mut md = String::from("# Career Recommendations\n\n");

    let prepared_for = profile
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("Student");
    md.push_str(&format!("**Prepared for:** {prepared_for}  \n"));
    md.push_str(&format!(
        "**Generated:** {}\n\n",
        profile.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    md.push_str("## Profile\n\n");
    md.push_str(&format!("- **Goals:** {}\n", or_missing(&profile.goals)));
    md.push_str(&format!("- **Interests:** {}\n", or_missing(&profile.interests)));
    md.push_str(&format!(
        "- **Current Skills:** {}\n\n",
        or_missing(&profile.current_skills)
    ));

    if report.professions.is_empty() {
        md.push_str("_No recommendations were returned for this profile._\n");
        return md;
    }

    for (index, profession) in report.professions.iter().enumerate() {
        push_profession(&mut md, index + 1, profession);
    }
    md
}

fn push_profession(md: &mut String, number: usize, p: &CareerProfession) {
    let name = if p.name.is_empty() {
        "Unnamed profession"
    } else {
        p.name.as_str()
    };
    md.push_str(&format!("## {number}. {name}\n\n"));
    md.push_str(&format!(
        "- **Required Skills:** {}\n",
        join_or_missing(&p.required_skills, ", ")
    ));
    md.push_str(&format!(
        "- **Career Path:** {}\n",
        join_or_missing(&p.career_path, " → ")
    ));
    md.push_str(&format!("- **Salary Range:** {}\n", or_missing(&p.salary_range)));
    md.push_str(&format!(
        "- **Market Statistics:** {}\n",
        or_missing(&p.market_stats)
    ));
    md.push_str(&format!(
        "- **Success Story:** {}\n\n",
        or_missing(&p.success_story)
    ));
}

fn or_missing(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() {
        NOT_PROVIDED
    } else {
        value
    }
}

fn join_or_missing(items: &[String], separator: &str) -> String {
    if items.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        items.join(separator)
    }
}
