//! GetResultsHandler - Query handler for assessment scores and summaries.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::assessment::{AssessmentError, UseCaseSummary};
use crate::domain::foundation::{AssessmentId, ScoreSet};
use crate::ports::AssessmentStore;

use super::AssessmentHandlerError;

/// Query for the results of an assessment.
#[derive(Debug, Clone)]
pub struct GetResultsQuery {
    pub assessment_id: AssessmentId,
}

/// Scores and use case summaries of an assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResults {
    pub completed: bool,
    pub category_scores: BTreeMap<String, ScoreSet>,
    pub use_case_scores: BTreeMap<String, BTreeMap<String, ScoreSet>>,
    pub summaries: Vec<UseCaseSummary>,
}

/// Handler for result retrieval.
pub struct GetResultsHandler {
    store: Arc<dyn AssessmentStore>,
}

impl GetResultsHandler {
    pub fn new(store: Arc<dyn AssessmentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetResultsQuery) -> Result<AssessmentResults, AssessmentHandlerError> {
        let assessment = self.store.load(query.assessment_id).await?;
        let questionnaire = &assessment.questionnaire;

        let mut summaries = Vec::new();
        for (category, scores) in questionnaire.final_use_case_scores() {
            for use_case in scores.keys() {
                let summary = questionnaire
                    .use_case_summary(use_case, category)
                    .map_err(AssessmentError::from)?;
                summaries.push(summary);
            }
        }

        Ok(AssessmentResults {
            completed: questionnaire.is_completed(),
            category_scores: questionnaire.final_category_scores().clone(),
            use_case_scores: questionnaire.final_use_case_scores().clone(),
            summaries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::assessment::test_support::{answer, next, selected, store};

    #[tokio::test]
    async fn results_of_completed_run() {
        let store = store();
        let id = selected(&store, &["Rohrnetz"]).await;
        for option in ["5", "5", "Niedrig", "5", "Ja"] {
            answer(&store, id, option).await;
            next(&store, id).await;
        }
        let handler = GetResultsHandler::new(store);

        let results = handler
            .handle(GetResultsQuery { assessment_id: id })
            .await
            .unwrap();

        assert!(results.completed);
        assert_eq!(results.category_scores["Rohrnetz"].potential, 4.0);
        assert_eq!(results.summaries.len(), 2);
        assert!(results.summaries.iter().all(|s| s.category == "Rohrnetz"));
    }

    #[tokio::test]
    async fn results_before_completion_are_empty() {
        let store = store();
        let id = selected(&store, &["Rohrnetz"]).await;
        let handler = GetResultsHandler::new(store);

        let results = handler
            .handle(GetResultsQuery { assessment_id: id })
            .await
            .unwrap();

        assert!(!results.completed);
        assert!(results.summaries.is_empty());
    }
}
