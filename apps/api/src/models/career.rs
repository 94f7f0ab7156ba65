//! Career recommendation schema shared by the normalizer and the document renderer.

use serde::Serialize;
use serde_json::{Map, Value};

/// One recommended profession. All fields are free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerProfession {
    pub name: String,
    pub required_skills: Vec<String>,
    /// Stage-labeled steps, e.g. "12th Grade - Choose appropriate stream".
    pub career_path: Vec<String>,
    pub salary_range: String,
    pub market_stats: String,
    pub success_story: String,
}

/// `{"professions": [...]}`. Ten professions are requested, not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CareerReport {
    pub professions: Vec<CareerProfession>,
}

impl CareerReport {
    /// Best-effort typed view over a normalized mapping.
    ///
    /// Non-object entries in `professions` are skipped; missing or mistyped
    /// fields come back empty. A bare string where a list is expected becomes
    /// a one-element list.
    pub fn from_normalized(report: &Map<String, Value>) -> Self {
        let professions = report
            .get("professions")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(profession_from_object)
                    .collect()
            })
            .unwrap_or_default();
        Self { professions }
    }
}

fn profession_from_object(obj: &Map<String, Value>) -> CareerProfession {
    CareerProfession {
        name: text_field(obj, "name"),
        required_skills: list_field(obj, "requiredSkills"),
        career_path: list_field(obj, "careerPath"),
        salary_range: text_field(obj, "salaryRange"),
        market_stats: text_field(obj, "marketStats"),
        success_story: text_field(obj, "successStory"),
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn list_field(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_profession_uses_camel_case_keys() {
        let profession = CareerProfession {
            name: "Data Scientist".to_string(),
            required_skills: vec!["Python".to_string()],
            career_path: vec!["Bachelor's in Statistics".to_string()],
            salary_range: "6-30 LPA".to_string(),
            market_stats: "Growing 20% yearly".to_string(),
            success_story: "Started as an analyst".to_string(),
        };
        let value = serde_json::to_value(&profession).unwrap();
        assert_eq!(value["requiredSkills"][0], "Python");
        assert_eq!(value["salaryRange"], "6-30 LPA");
        assert_eq!(value["successStory"], "Started as an analyst");
    }

    #[test]
    fn test_from_normalized_reads_full_profession() {
        let report = as_map(json!({
            "professions": [{
                "name": "Civil Engineer",
                "requiredSkills": ["AutoCAD", "Structural analysis"],
                "careerPath": ["10th Grade - Science", "B.Tech Civil"],
                "salaryRange": "4-20 LPA",
                "marketStats": "Steady demand from infrastructure projects",
                "successStory": "E. Sreedharan"
            }]
        }));
        let typed = CareerReport::from_normalized(&report);
        assert_eq!(typed.professions.len(), 1);
        let p = &typed.professions[0];
        assert_eq!(p.name, "Civil Engineer");
        assert_eq!(p.required_skills, vec!["AutoCAD", "Structural analysis"]);
        assert_eq!(p.career_path.len(), 2);
        assert_eq!(p.success_story, "E. Sreedharan");
    }

    #[test]
    fn test_from_normalized_tolerates_missing_and_mistyped_fields() {
        let report = as_map(json!({
            "professions": [
                {"name": "Pilot", "requiredSkills": "Situational awareness", "careerPath": 7},
                "not an object",
                {"salaryRange": 1200000}
            ]
        }));
        let typed = CareerReport::from_normalized(&report);
        assert_eq!(typed.professions.len(), 2);
        assert_eq!(typed.professions[0].required_skills, vec!["Situational awareness"]);
        assert!(typed.professions[0].career_path.is_empty());
        assert!(typed.professions[0].market_stats.is_empty());
        assert_eq!(typed.professions[1].salary_range, "1200000");
        assert!(typed.professions[1].name.is_empty());
    }

    #[test]
    fn test_from_normalized_without_professions_key_is_empty() {
        let typed = CareerReport::from_normalized(&as_map(json!({"answer": 42})));
        assert!(typed.professions.is_empty());
    }
}
