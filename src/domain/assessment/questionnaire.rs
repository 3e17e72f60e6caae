//! Questionnaire - orchestrates a complete assessment run.
//!
//! # Flow
//!
//! 1. `select_categories` answers the selection question and builds the
//!    sequence `[preferences, general] + chosen`.
//! 2. `answer_current` / `next_question` / `previous_question` walk the
//!    questions of every category in order.
//! 3. Leaving the preferences category fixes the global weights and
//!    scores every chosen category against the ranking table.
//! 4. Leaving a use-case category fixes its local weights, finalises its
//!    risk and scores its use cases.
//!
//! The questionnaire owns copies of everything it needs from the
//! [`Catalog`], so a serialized questionnaire is a complete snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    Advance, Answer, AssessmentError, Catalog, Category, CategoryKind, ConfigurationError,
    ExpectedAnswer, LookupError, ProContra, Question, Retreat, ScoringSettings, UseCase,
};
use crate::domain::analysis::CategoryBaseline;
use crate::domain::foundation::{Level, ScoreSet};

/// Outcome of a category selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing was selected; the run cannot start.
    NoAnswer,
    /// The run starts at the first preference question.
    Started,
}

/// Outcome of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// The current question has no answer yet.
    NoAnswer,
    /// Moved to another question of the same category.
    Question,
    /// Moved into another category.
    CategoryEntered,
    /// Moved past the last question of the last category.
    Completed,
    /// Already at the first question; back to category selection.
    AtStart,
}

/// Everything the presentation layer shows for one use case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCaseSummary {
    pub name: String,
    pub category: String,
    pub description: String,
    pub literature_source: Option<String>,
    pub pro_contra: ProContra,
    pub is_applicable: bool,
    pub non_applicability_reasons: Vec<Vec<ExpectedAnswer>>,
    pub scores: Option<ScoreSet>,
}

/// A single assessment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    init_question: Question,
    preferences_template: Category,
    general_template: Category,
    category_templates: Vec<Category>,
    settings: ScoringSettings,

    global_weights: BTreeMap<String, Level>,
    local_weights: BTreeMap<String, BTreeMap<String, Level>>,
    final_category_scores: BTreeMap<String, ScoreSet>,
    final_use_case_scores: BTreeMap<String, BTreeMap<String, ScoreSet>>,
    categories: Vec<Category>,
    chosen_categories: Vec<String>,
    category_index: usize,
    flat_question_index: usize,
    completed: bool,
}

impl Questionnaire {
    /// Creates an unstarted questionnaire over the catalogue.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            init_question: catalog.selection_question().clone(),
            preferences_template: catalog.preferences().clone(),
            general_template: catalog.general().clone(),
            category_templates: catalog.categories().to_vec(),
            settings: catalog.settings().clone(),
            global_weights: BTreeMap::new(),
            local_weights: BTreeMap::new(),
            final_category_scores: BTreeMap::new(),
            final_use_case_scores: BTreeMap::new(),
            categories: Vec::new(),
            chosen_categories: Vec::new(),
            category_index: 0,
            flat_question_index: 1,
            completed: false,
        }
    }

    // ─── Selection ──────────────────────────────────────────────────

    /// Answers the selection question and (re)builds the category sequence.
    ///
    /// Categories that were already part of the run keep their answers.
    /// Inserted consequences are withdrawn; cursors, weights and scores
    /// start over.
    ///
    /// # Errors
    ///
    /// `AnswerOutOfDomain` if a name is not a selectable category.
    pub fn select_categories(&mut self, names: &[String]) -> Result<Selection, AssessmentError> {
        if names.is_empty() {
            return Ok(Selection::NoAnswer);
        }
        self.init_question
            .set_answer(Answer::Multiple(names.to_vec()))?;

        let mut previous = std::mem::take(&mut self.categories);
        let mut take_or = |template: &Category| -> Category {
            match previous.iter().position(|c| c.name() == template.name()) {
                Some(pos) => previous.swap_remove(pos),
                None => template.clone(),
            }
        };

        let mut categories = vec![
            take_or(&self.preferences_template),
            take_or(&self.general_template),
        ];
        let mut chosen = Vec::with_capacity(names.len());
        for template in &self.category_templates {
            if names.iter().any(|n| n == template.name()) {
                categories.push(take_or(template));
                chosen.push(template.name().to_string());
            }
        }
        for category in &mut categories {
            category.reset_navigation();
        }

        self.categories = categories;
        self.chosen_categories = chosen;
        self.global_weights.clear();
        self.local_weights.clear();
        self.final_category_scores.clear();
        self.final_use_case_scores.clear();
        self.category_index = 0;
        self.flat_question_index = 1;
        self.completed = false;
        Ok(Selection::Started)
    }

    // ─── Navigation ─────────────────────────────────────────────────

    /// Category under the cursor, `None` before selection and after
    /// completion.
    pub fn current_category(&self) -> Option<&Category> {
        self.categories.get(self.category_index)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_category()?.current_question()
    }

    /// Records an answer for the current question.
    ///
    /// Returns `false` for an empty answer, leaving the question untouched.
    pub fn answer_current(&mut self, answer: Answer) -> Result<bool, AssessmentError> {
        if answer.is_empty() {
            return Ok(false);
        }
        let question = self
            .categories
            .get_mut(self.category_index)
            .and_then(Category::current_question_mut)
            .ok_or(AssessmentError::NoActiveCategory("no question to answer"))?;
        question.set_answer(answer)?;
        Ok(true)
    }

    /// Moves to the next question, entering the next category (and
    /// evaluating the one being left) when the current one is exhausted.
    pub fn next_question(&mut self) -> Result<Step, AssessmentError> {
        if self.completed {
            return Ok(Step::Completed);
        }
        let category = self
            .categories
            .get_mut(self.category_index)
            .ok_or(AssessmentError::NoActiveCategory("categories have not been selected"))?;

        match category.current_question() {
            Some(question) if !question.is_answered() => return Ok(Step::NoAnswer),
            Some(_) => {
                if category.advance()? == Advance::Advanced {
                    self.flat_question_index += 1;
                }
                if category.current_question().is_some() {
                    return Ok(Step::Question);
                }
            }
            None => {}
        }

        if self.advance_category()? {
            Ok(Step::CategoryEntered)
        } else {
            Ok(Step::Completed)
        }
    }

    /// Moves to the previous question.
    ///
    /// From completion this is the last question of the last category;
    /// from the first question of a category it is the last question of
    /// the previous one.
    pub fn previous_question(&mut self) -> Result<Step, AssessmentError> {
        if self.completed {
            self.retreat_category();
            self.jump_into_current();
            return Ok(Step::CategoryEntered);
        }
        let index = self.category_index;
        let Some(category) = self.categories.get_mut(index) else {
            return Ok(Step::AtStart);
        };

        match category.retreat() {
            Retreat::Retreated => {
                self.step_back();
                Ok(Step::Question)
            }
            Retreat::AtStart if index == 0 => Ok(Step::AtStart),
            Retreat::AtStart => {
                self.retreat_category();
                self.jump_into_current();
                Ok(Step::CategoryEntered)
            }
        }
    }

    fn jump_into_current(&mut self) {
        if let Some(category) = self.categories.get_mut(self.category_index) {
            category.jump_to_last();
        }
        self.step_back();
    }

    fn step_back(&mut self) {
        self.flat_question_index = self.flat_question_index.saturating_sub(1).max(1);
    }

    /// Fixes weights and evaluates the current category (unless it is the
    /// general category), then moves the category cursor forward.
    ///
    /// Returns whether another category remains.
    pub fn advance_category(&mut self) -> Result<bool, AssessmentError> {
        let kind = self
            .current_category()
            .ok_or(AssessmentError::NoActiveCategory("no category to leave"))?
            .kind();
        if kind != CategoryKind::General {
            self.set_weights()?;
            self.evaluate_category()?;
        }

        self.category_index += 1;
        let remaining = self.category_index < self.categories.len();
        if !remaining {
            self.completed = true;
        }
        Ok(remaining)
    }

    /// Moves the category cursor back; clears completion.
    pub fn retreat_category(&mut self) {
        self.category_index = self.category_index.saturating_sub(1);
        self.completed = false;
    }

    // ─── Evaluation ─────────────────────────────────────────────────

    /// Stores the current category's criterion weights, globally for the
    /// preferences category and locally otherwise.
    pub fn set_weights(&mut self) -> Result<(), AssessmentError> {
        let category = self
            .current_category()
            .ok_or(AssessmentError::NoActiveCategory("no category to weight"))?;
        let weights = category.criterion_weights()?;
        if category.kind() == CategoryKind::Preferences {
            self.global_weights = weights;
        } else {
            let name = category.name().to_string();
            self.local_weights.insert(name, weights);
        }
        Ok(())
    }

    /// Evaluates the current category.
    ///
    /// - Preferences: baseline scores for every chosen category.
    /// - Use-case category: final risk and use case scores.
    /// - General: nothing.
    pub fn evaluate_category(&mut self) -> Result<(), AssessmentError> {
        let category = self
            .current_category()
            .ok_or(AssessmentError::NoActiveCategory("no category to evaluate"))?;

        match category.kind() {
            CategoryKind::Preferences => {
                for name in &self.chosen_categories {
                    let baseline = CategoryBaseline::score(name, &self.global_weights, &self.settings)?;
                    self.final_category_scores.insert(name.clone(), baseline);
                }
            }
            CategoryKind::UseCases => {
                let name = category.name().to_string();
                let general: Vec<Question> = self.general_questions().into_iter().cloned().collect();
                let general: Vec<&Question> = general.iter().collect();
                let general_pool: Vec<Question> = self.general_condition_pool().into_iter().cloned().collect();
                let general_pool: Vec<&Question> = general_pool.iter().collect();

                let risk = category.combined_risk(&general);
                self.final_category_scores.entry(name.clone()).or_default().risk = f64::from(risk);

                let weights = self.local_weights.get(&name).cloned().unwrap_or_default();
                let scores = self.categories[self.category_index].evaluate_use_cases(
                    &weights,
                    &general,
                    &general_pool,
                    &self.settings.data_dependent_effort_criteria,
                )?;
                self.final_use_case_scores.insert(name, scores);
            }
            CategoryKind::General => {}
        }
        Ok(())
    }

    // ─── Lookup ─────────────────────────────────────────────────────

    /// Finds a use case within a chosen category.
    pub fn get_use_case(&self, use_case: &str, category: &str) -> Result<&UseCase, LookupError> {
        self.categories
            .iter()
            .filter(|c| c.kind() == CategoryKind::UseCases)
            .find(|c| c.name() == category)
            .ok_or_else(|| LookupError::CategoryNotFound {
                category: category.to_string(),
            })?
            .use_case(use_case)
    }

    /// Finds the unique category owning a use case.
    ///
    /// # Errors
    ///
    /// `UseCaseUnassigned` if no category has it, `DuplicateUseCase` if
    /// more than one does.
    pub fn get_category_of_use_case(&self, use_case: &str) -> Result<&Category, AssessmentError> {
        let mut matches = self.categories.iter().filter(|c| c.has_use_case(use_case));
        match (matches.next(), matches.next()) {
            (Some(category), None) => Ok(category),
            (None, _) => Err(LookupError::UseCaseUnassigned {
                use_case: use_case.to_string(),
            }
            .into()),
            (Some(_), Some(_)) => Err(ConfigurationError::DuplicateUseCase {
                use_case: use_case.to_string(),
            }
            .into()),
        }
    }

    /// Collects what the presentation layer shows for one use case.
    pub fn use_case_summary(&self, use_case: &str, category: &str) -> Result<UseCaseSummary, LookupError> {
        let found = self.get_use_case(use_case, category)?;
        Ok(UseCaseSummary {
            name: found.name().to_string(),
            category: category.to_string(),
            description: found.description().to_string(),
            literature_source: found.literature_source().map(str::to_string),
            pro_contra: found.pro_contra().clone(),
            is_applicable: found.is_applicable(),
            non_applicability_reasons: found.non_applicability_reasons().to_vec(),
            scores: self
                .final_use_case_scores
                .get(category)
                .and_then(|scores| scores.get(use_case))
                .copied(),
        })
    }

    /// Live questions of the general category.
    pub fn general_questions(&self) -> Vec<&Question> {
        self.categories
            .iter()
            .find(|c| c.kind() == CategoryKind::General)
            .map(|c| c.questions().collect())
            .unwrap_or_default()
    }

    /// Every question template of the general category, including
    /// consequences that were never shown.
    pub fn general_condition_pool(&self) -> Vec<&Question> {
        self.categories
            .iter()
            .find(|c| c.kind() == CategoryKind::General)
            .map(|c| c.all_questions().iter().collect())
            .unwrap_or_default()
    }

    // ─── Progress ───────────────────────────────────────────────────

    /// Live question count over all categories; grows with consequences.
    pub fn total_questions(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }

    pub fn progress_text(&self) -> String {
        format!("Question {}/{}", self.flat_question_index, self.total_questions())
    }

    // ─── Accessors ──────────────────────────────────────────────────

    pub fn init_question(&self) -> &Question {
        &self.init_question
    }

    /// Names of every selectable category.
    pub fn available_categories(&self) -> impl Iterator<Item = &str> {
        self.category_templates.iter().map(Category::name)
    }

    pub fn global_weights(&self) -> &BTreeMap<String, Level> {
        &self.global_weights
    }

    pub fn local_weights(&self, category: &str) -> Option<&BTreeMap<String, Level>> {
        self.local_weights.get(category)
    }

    pub fn final_category_scores(&self) -> &BTreeMap<String, ScoreSet> {
        &self.final_category_scores
    }

    pub fn final_use_case_scores(&self) -> &BTreeMap<String, BTreeMap<String, ScoreSet>> {
        &self.final_use_case_scores
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn chosen_categories(&self) -> &[String] {
        &self.chosen_categories
    }

    pub fn category_index(&self) -> usize {
        self.category_index
    }

    pub fn flat_question_index(&self) -> usize {
        self.flat_question_index
    }

    pub fn is_started(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::CatalogDocument;

    const CATALOG: &str = r#"
selection_prompt: Welche Kategorien?
global_criteria:
  effort:
    - name: Kostenaufwand
  potential:
    - name: Energieeffizienz
preferences:
  name: Präferenzen
general:
  name: Allgemeine Fragen
  questions: [general_risk]
categories:
  - name: Rohrnetz
    criteria:
      - name: Genauigkeit
    questions: [flow_1]
    consequences: [flow_2]
    use_cases: [Leckageortung, Prognose]
  - name: Pumpen
    criteria:
      - name: Genauigkeit
    questions: [pump_risk]
    use_cases: [Pumpenoptimierung]
questions:
  - name: general_risk
    text: Wie hoch ist das allgemeine Risiko?
    options: [Niedrig, Hoch]
    tags: [Risk]
    values: { Niedrig: 1, Hoch: 5 }
  - name: flow_1
    text: Liegen Durchflussdaten vor?
    options: [Ja, Nein]
    consequences: { Nein: flow_2 }
  - name: flow_2
    text: Wie aufwendig ist eine Durchflussmessung?
    options: [Gering, Hoch]
    tags: [Effort]
    values: { Gering: 1, Hoch: 5 }
    criterion: Datenerhebungsaufwand
  - name: pump_risk
    text: Wie kritisch sind Pumpenausfälle?
    options: [Unkritisch, Kritisch]
    tags: [Risk]
    values: { Unkritisch: 1, Kritisch: 5 }
conditions:
  - id: no_flow_data
    kind: data_availability
    expected:
      - { question: flow_1, answer: Nein }
use_cases:
  - name: Leckageortung
    potential: { Genauigkeit: 4 }
    effort: { Datenerhebungsaufwand: 3 }
    risk: 2
    conditions: [no_flow_data]
    pro: [Frühe Erkennung]
  - name: Prognose
    potential: { Genauigkeit: 4 }
    effort: { Datenerhebungsaufwand: 1 }
    risk: 5
  - name: Pumpenoptimierung
    potential: { Genauigkeit: 2 }
    effort: { Kostenaufwand: 2 }
    risk: 3
category_ranking:
  Rohrnetz: { Kostenaufwand: 3, Energieeffizienz: 4 }
  Pumpen: { Kostenaufwand: 2, Energieeffizienz: 5 }
"#;

    fn questionnaire() -> Questionnaire {
        let doc: CatalogDocument = serde_yaml::from_str(CATALOG).unwrap();
        Questionnaire::new(&Catalog::from_document(doc).unwrap())
    }

    fn select(q: &mut Questionnaire, names: &[&str]) {
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        assert_eq!(q.select_categories(&names).unwrap(), Selection::Started);
    }

    fn answer_and_next(q: &mut Questionnaire, answer: &str) -> Step {
        assert!(q.answer_current(Answer::single(answer)).unwrap());
        q.next_question().unwrap()
    }

    fn current_name(q: &Questionnaire) -> &str {
        q.current_question().unwrap().name()
    }

    #[test]
    fn empty_selection_does_not_start() {
        let mut q = questionnaire();
        assert_eq!(q.select_categories(&[]).unwrap(), Selection::NoAnswer);
        assert!(!q.is_started());
        assert!(q.next_question().is_err());
    }

    #[test]
    fn unknown_category_is_out_of_domain() {
        let mut q = questionnaire();
        let err = q.select_categories(&["Kläranlage".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            AssessmentError::Configuration(ConfigurationError::AnswerOutOfDomain { .. })
        ));
    }

    #[test]
    fn selection_orders_preferences_general_then_chosen() {
        let mut q = questionnaire();
        select(&mut q, &["Pumpen", "Rohrnetz"]);
        let names: Vec<&str> = q.categories().iter().map(Category::name).collect();
        assert_eq!(names, vec!["Präferenzen", "Allgemeine Fragen", "Rohrnetz", "Pumpen"]);
        assert_eq!(q.chosen_categories(), &["Rohrnetz".to_string(), "Pumpen".to_string()]);
    }

    #[test]
    fn next_without_answer_reports_no_answer() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        assert_eq!(q.next_question().unwrap(), Step::NoAnswer);
        assert_eq!(q.flat_question_index(), 1);
    }

    #[test]
    fn empty_answer_is_not_recorded() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        assert!(!q.answer_current(Answer::Multiple(vec![])).unwrap());
        assert!(!q.current_question().unwrap().is_answered());
    }

    #[test]
    fn full_run_scores_categories_and_use_cases() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        assert_eq!(q.progress_text(), "Question 1/5");

        assert_eq!(answer_and_next(&mut q, "5"), Step::Question); // Kostenaufwand
        assert_eq!(answer_and_next(&mut q, "5"), Step::CategoryEntered); // Energieeffizienz
        assert_eq!(
            q.final_category_scores()["Rohrnetz"],
            ScoreSet::new(4.0, 3.0, 0.0)
        );

        assert_eq!(answer_and_next(&mut q, "Hoch"), Step::CategoryEntered); // general_risk
        assert_eq!(q.current_category().unwrap().name(), "Rohrnetz");

        assert_eq!(answer_and_next(&mut q, "5"), Step::Question); // Genauigkeit
        assert_eq!(answer_and_next(&mut q, "Nein"), Step::Question); // flow_1
        assert_eq!(current_name(&q), "flow_2");
        assert_eq!(q.progress_text(), "Question 6/6");

        assert_eq!(answer_and_next(&mut q, "Hoch"), Step::Completed);
        assert!(q.is_completed());
        assert!(q.current_category().is_none());

        // Category risk: only general_risk = 5
        assert_eq!(q.final_category_scores()["Rohrnetz"].risk, 5.0);

        let use_cases = &q.final_use_case_scores()["Rohrnetz"];
        assert!(use_cases["Leckageortung"].is_zero());
        // Potential 4*5/5 = 4, Effort: data-dependent without own data source -> 1,
        // Risk (5 + 5) / 2 = 5
        assert_eq!(use_cases["Prognose"], ScoreSet::new(4.0, 1.0, 5.0));

        let summary = q.use_case_summary("Leckageortung", "Rohrnetz").unwrap();
        assert!(!summary.is_applicable);
        assert_eq!(summary.non_applicability_reasons.len(), 1);
        assert_eq!(summary.pro_contra.pro, vec!["Frühe Erkennung".to_string()]);
    }

    #[test]
    fn previous_from_completion_returns_to_last_question() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        for answer in ["5", "5", "Niedrig", "5", "Ja"] {
            answer_and_next(&mut q, answer);
        }
        assert!(q.is_completed());
        assert_eq!(q.flat_question_index(), 6);

        assert_eq!(q.previous_question().unwrap(), Step::CategoryEntered);
        assert!(!q.is_completed());
        assert_eq!(current_name(&q), "flow_1");
        assert_eq!(q.flat_question_index(), 5);
    }

    #[test]
    fn previous_crosses_category_boundary() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        answer_and_next(&mut q, "5");
        answer_and_next(&mut q, "5");
        assert_eq!(q.current_category().unwrap().kind(), CategoryKind::General);

        assert_eq!(q.previous_question().unwrap(), Step::CategoryEntered);
        assert_eq!(q.current_category().unwrap().kind(), CategoryKind::Preferences);
        assert_eq!(current_name(&q), "Energieeffizienz");
        assert_eq!(q.flat_question_index(), 2);
    }

    #[test]
    fn previous_at_first_question_is_at_start() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        assert_eq!(q.previous_question().unwrap(), Step::AtStart);
        assert_eq!(q.flat_question_index(), 1);
    }

    #[test]
    fn previous_withdraws_consequence_and_shrinks_total() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        for answer in ["5", "5", "Niedrig", "5", "Nein"] {
            answer_and_next(&mut q, answer);
        }
        assert_eq!(q.total_questions(), 6);

        assert_eq!(q.previous_question().unwrap(), Step::Question);
        assert_eq!(current_name(&q), "flow_1");
        assert_eq!(q.total_questions(), 5);
    }

    #[test]
    fn reevaluation_recomputes_reasons() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        for answer in ["5", "5", "Niedrig", "5", "Nein", "Gering"] {
            answer_and_next(&mut q, answer);
        }
        q.previous_question().unwrap();
        q.next_question().unwrap();

        let summary = q.use_case_summary("Leckageortung", "Rohrnetz").unwrap();
        assert_eq!(summary.non_applicability_reasons.len(), 1);
    }

    #[test]
    fn local_weights_are_stored_per_category() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        for answer in ["2", "4", "Niedrig", "3", "Ja"] {
            answer_and_next(&mut q, answer);
        }
        assert_eq!(q.global_weights()["Kostenaufwand"], Level::new(2).unwrap());
        assert_eq!(
            q.local_weights("Rohrnetz").unwrap()["Genauigkeit"],
            Level::new(3).unwrap()
        );
    }

    #[test]
    fn category_of_use_case_is_unique() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz", "Pumpen"]);
        assert_eq!(
            q.get_category_of_use_case("Pumpenoptimierung").unwrap().name(),
            "Pumpen"
        );
        assert!(matches!(
            q.get_category_of_use_case("Clustering"),
            Err(AssessmentError::Lookup(LookupError::UseCaseUnassigned { .. }))
        ));
    }

    #[test]
    fn use_case_lookup_requires_chosen_category() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        assert!(q.get_use_case("Prognose", "Rohrnetz").is_ok());
        assert!(matches!(
            q.get_use_case("Pumpenoptimierung", "Pumpen"),
            Err(LookupError::CategoryNotFound { .. })
        ));
        assert!(matches!(
            q.get_use_case("Clustering", "Rohrnetz"),
            Err(LookupError::UseCaseNotFound { .. })
        ));
    }

    #[test]
    fn reselection_keeps_answers_and_resets_cursors() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        answer_and_next(&mut q, "3");
        q.previous_question().unwrap();
        assert_eq!(q.previous_question().unwrap(), Step::AtStart);

        select(&mut q, &["Rohrnetz", "Pumpen"]);
        assert_eq!(q.category_index(), 0);
        assert_eq!(q.flat_question_index(), 1);
        assert_eq!(
            q.current_question().unwrap().answer(),
            Some(&Answer::single("3"))
        );
    }

    #[test]
    fn reselection_after_run_does_not_repeat_consequences() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        for answer in ["5", "5", "Hoch", "5", "Nein", "Hoch"] {
            answer_and_next(&mut q, answer);
        }
        assert!(q.is_completed());

        select(&mut q, &["Rohrnetz"]);
        assert_eq!(q.total_questions(), 5);
        for answer in ["5", "5", "Hoch", "5", "Nein"] {
            answer_and_next(&mut q, answer);
        }
        assert_eq!(current_name(&q), "flow_2");
        let names: Vec<&str> = q.current_category().unwrap().questions().map(Question::name).collect();
        assert_eq!(names, vec!["Genauigkeit", "flow_1", "flow_2"]);
        assert_eq!(q.total_questions(), 6);

        q.previous_question().unwrap();
        assert_eq!(answer_and_next(&mut q, "Ja"), Step::Completed);
        assert_eq!(q.total_questions(), 5);
        let rohrnetz = q.categories().iter().find(|c| c.name() == "Rohrnetz").unwrap();
        let names: Vec<&str> = rohrnetz.questions().map(Question::name).collect();
        assert_eq!(names, vec!["Genauigkeit", "flow_1"]);
    }

    #[test]
    fn general_consequences_are_seen_by_conditions_before_shown() {
        let catalog = CATALOG
            .replace(
                "  questions: [general_risk]\n",
                "  questions: [general_risk]\n  consequences: [general_follow_up]\n",
            )
            .replace(
                "      - { question: flow_1, answer: Nein }\n",
                "      - { question: general_follow_up, answer: Ja }\n",
            )
            .replace(
                "    values: { Niedrig: 1, Hoch: 5 }\n",
                "    values: { Niedrig: 1, Hoch: 5 }\n    consequences: { Hoch: general_follow_up }\n",
            )
            .replace(
                "  - name: flow_1\n",
                "  - name: general_follow_up\n    text: Gibt es eine Folgefrage?\n    options: [Ja, Nein]\n  - name: flow_1\n",
            );
        let doc: CatalogDocument = serde_yaml::from_str(&catalog).unwrap();
        let mut q = Questionnaire::new(&Catalog::from_document(doc).unwrap());
        select(&mut q, &["Rohrnetz"]);

        for answer in ["5", "5", "Niedrig", "5", "Ja"] {
            answer_and_next(&mut q, answer);
        }
        assert!(q.is_completed());
        let summary = q.use_case_summary("Leckageortung", "Rohrnetz").unwrap();
        assert!(summary.is_applicable);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut q = questionnaire();
        select(&mut q, &["Rohrnetz"]);
        answer_and_next(&mut q, "4");

        let json = serde_json::to_string(&q).unwrap();
        let restored: Questionnaire = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, q);
    }
}
