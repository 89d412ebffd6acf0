//! AI service trait

use async_trait::async_trait;
use fairway_api::{
    AiRequest, ClubRecommendation, ContentSearch, CourseSearch, Insight, ShotConditions,
    SwingAnalysis,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors from the AI service boundary
#[derive(Debug, Error)]
pub enum AiError {
    #[error("Could not reach the AI service: {0}")]
    Transport(String),

    /// The service answered with an `{"error": ...}` body
    #[error("The AI service failed. {0}")]
    Service(String),

    #[error("Unexpected response for {action}: {message}")]
    InvalidResponse {
        action: &'static str,
        message: String,
    },

    #[error("Action not supported: {0}")]
    Unsupported(String),
}

pub type AiResult<T> = Result<T, AiError>;

/// The external AI coaching service.
///
/// Implementors only provide [`AiService::submit`]; the typed helpers build
/// the request and decode the action's response shape.
#[async_trait]
pub trait AiService: Send + Sync {
    /// Send one request and return the raw JSON response
    async fn submit(&self, request: AiRequest) -> AiResult<Value>;

    /// Coach a swing from JPEG data URLs
    async fn analyze_swing(&self, base64_frames: Vec<String>) -> AiResult<SwingAnalysis> {
        let request = AiRequest::AnalyzeSwing { base64_frames };
        decode(request.action(), self.submit(request).await?)
    }

    async fn find_courses(&self, location: String) -> AiResult<CourseSearch> {
        let request = AiRequest::FindCourses { location };
        decode(request.action(), self.submit(request).await?)
    }

    async fn find_instructional_content(&self, query: String) -> AiResult<ContentSearch> {
        let request = AiRequest::FindInstructionalContent { query };
        decode(request.action(), self.submit(request).await?)
    }

    /// A handful of short tips for the given weaknesses
    async fn generate_personalized_tips(
        &self,
        areas_for_improvement: Vec<Insight>,
    ) -> AiResult<Vec<String>> {
        let request = AiRequest::GeneratePersonalizedTips {
            areas_for_improvement,
        };
        decode(request.action(), self.submit(request).await?)
    }

    async fn get_club_recommendation(
        &self,
        conditions: ShotConditions,
    ) -> AiResult<ClubRecommendation> {
        let request = AiRequest::GetClubRecommendation { conditions };
        decode(request.action(), self.submit(request).await?)
    }
}

fn decode<T: DeserializeOwned>(action: &'static str, value: Value) -> AiResult<T> {
    serde_json::from_value(value).map_err(|e| AiError::InvalidResponse {
        action,
        message: e.to_string(),
    })
}
