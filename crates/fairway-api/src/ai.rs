//! Request/response contract of the AI coaching service
//!
//! Requests go over the wire as `{"action": "...", "payload": {...}}`.
//! Successful responses are action-specific JSON; failures are `{"error": "..."}`.

use serde::{Deserialize, Serialize};

/// A request to the AI service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum AiRequest {
    /// Coach a swing from still frames (JPEG data URLs)
    #[serde(rename_all = "camelCase")]
    AnalyzeSwing { base64_frames: Vec<String> },

    FindCourses { location: String },

    FindInstructionalContent { query: String },

    #[serde(rename_all = "camelCase")]
    GeneratePersonalizedTips { areas_for_improvement: Vec<Insight> },

    GetClubRecommendation { conditions: ShotConditions },
}

impl AiRequest {
    /// Wire name of the action
    pub fn action(&self) -> &'static str {
        match self {
            AiRequest::AnalyzeSwing { .. } => "analyzeSwing",
            AiRequest::FindCourses { .. } => "findCourses",
            AiRequest::FindInstructionalContent { .. } => "findInstructionalContent",
            AiRequest::GeneratePersonalizedTips { .. } => "generatePersonalizedTips",
            AiRequest::GetClubRecommendation { .. } => "getClubRecommendation",
        }
    }
}

/// Error body returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiErrorBody {
    pub error: String,
}

/// A titled observation (strength or area for improvement)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drill {
    pub name: String,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwingAnalysis {
    pub overall_summary: String,
    pub strengths: Vec<Insight>,
    pub areas_for_improvement: Vec<Insight>,
    pub suggested_drills: Vec<Drill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub address: String,
    pub website: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
    pub rating: Option<f64>,
}

/// A web page the service cited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    pub web: WebSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSearch {
    pub courses: Vec<Course>,
    #[serde(default)]
    pub sources: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    Video,
    Article,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionalContent {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSearch {
    pub content: Vec<InstructionalContent>,
    #[serde(default)]
    pub sources: Vec<GroundingChunk>,
}

/// Playing conditions for a club recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotConditions {
    /// Yards to target
    pub distance: u32,
    pub lie: String,
    /// Miles per hour
    pub wind_speed: u32,
    pub wind_direction: String,
    /// Yards; negative is downhill
    pub elevation_change: i32,
}

impl Default for ShotConditions {
    fn default() -> Self {
        Self {
            distance: 150,
            lie: "Fairway".to_string(),
            wind_speed: 0,
            wind_direction: "No Wind".to_string(),
            elevation_change: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRecommendation {
    pub club: String,
    pub confidence: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_club: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_reasoning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_as_action_and_payload() {
        let request = AiRequest::AnalyzeSwing {
            base64_frames: vec!["data:image/jpeg;base64,AAAA".into()],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["action"], "analyzeSwing");
        assert_eq!(value["payload"]["base64Frames"][0], "data:image/jpeg;base64,AAAA");
        assert_eq!(request.action(), "analyzeSwing");
    }

    #[test]
    fn tips_request_uses_camel_case_payload() {
        let request = AiRequest::GeneratePersonalizedTips {
            areas_for_improvement: vec![Insight {
                title: "Grip".into(),
                description: "Too strong".into(),
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["action"], "generatePersonalizedTips");
        assert_eq!(value["payload"]["areasForImprovement"][0]["title"], "Grip");
    }

    #[test]
    fn swing_analysis_parses_service_json() {
        let value = json!({
            "overallSummary": "Solid tempo.",
            "strengths": [{"title": "Balance", "description": "Stable finish"}],
            "areasForImprovement": [{"title": "Takeaway", "description": "Too inside"}],
            "suggestedDrills": [{"name": "Gate drill", "instructions": "Place two tees"}]
        });
        let analysis: SwingAnalysis = serde_json::from_value(value).unwrap();
        assert_eq!(analysis.areas_for_improvement[0].title, "Takeaway");
        assert!(analysis.suggested_drills[0].video_url.is_none());
    }

    #[test]
    fn course_search_tolerates_missing_sources() {
        let value = json!({
            "courses": [{
                "name": "Pine Hollow", "address": "1 Main St", "website": "",
                "phone": "", "type": "Public", "summary": "Hilly", "rating": null
            }]
        });
        let search: CourseSearch = serde_json::from_value(value).unwrap();
        assert_eq!(search.courses[0].kind, "Public");
        assert!(search.sources.is_empty());
    }
}
