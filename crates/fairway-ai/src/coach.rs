//! Swing analysis gated by the daily usage limit

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use fairway_api::SwingAnalysis;
use fairway_core::UsageGovernor;
use tracing::info;

use crate::{AiResult, AiService};

/// Result of a gated analysis request
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Completed(SwingAnalysis),
    /// Today's limit was already used up; the service was not contacted
    LimitReached { limit: u32 },
}

/// Encode a JPEG frame as the data URL the service expects
pub fn jpeg_data_url(frame: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(frame))
}

/// Consume one unit of today's allowance, then analyze the frames.
///
/// The unit is spent even if the service call fails afterwards.
pub async fn analyze_with_limit(
    governor: &mut UsageGovernor,
    service: &dyn AiService,
    frames: Vec<String>,
    today: NaiveDate,
) -> AiResult<AnalysisOutcome> {
    if !governor.check_and_consume(today) {
        return Ok(AnalysisOutcome::LimitReached {
            limit: governor.limit(),
        });
    }

    info!(
        frames = frames.len(),
        remaining = governor.remaining(today),
        "Submitting swing for analysis"
    );
    let analysis = service.analyze_swing(frames).await?;
    Ok(AnalysisOutcome::Completed(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockAiService;
    use fairway_store::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    fn analysis_json() -> serde_json::Value {
        json!({
            "overallSummary": "Good rhythm",
            "strengths": [],
            "areasForImprovement": [],
            "suggestedDrills": []
        })
    }

    #[test]
    fn test_jpeg_data_url() {
        assert_eq!(jpeg_data_url(b"abc"), "data:image/jpeg;base64,YWJj");
    }

    #[tokio::test]
    async fn test_denied_analysis_never_calls_service() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let mut governor = UsageGovernor::load(Arc::new(MemoryStore::new()), 1, today);
        let service = MockAiService::new();
        service.respond_with(analysis_json());

        let first = analyze_with_limit(&mut governor, &service, vec![jpeg_data_url(b"f")], today)
            .await
            .unwrap();
        assert!(matches!(first, AnalysisOutcome::Completed(_)));

        let second = analyze_with_limit(&mut governor, &service, vec![jpeg_data_url(b"f")], today)
            .await
            .unwrap();
        assert_eq!(second, AnalysisOutcome::LimitReached { limit: 1 });
        assert_eq!(service.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_call_still_spends_allowance() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let mut governor = UsageGovernor::load(Arc::new(MemoryStore::new()), 5, today);
        let service = MockAiService::new();
        service.fail_with("AI service failed: timeout");

        assert!(analyze_with_limit(&mut governor, &service, vec![], today).await.is_err());
        assert_eq!(governor.count(), 1);
    }
}
