//! Shared fixtures for the assessment handler tests.

use std::sync::Arc;

use crate::adapters::catalog::parse_catalog;
use crate::adapters::storage::InMemoryAssessmentStore;
use crate::domain::assessment::{Answer, Catalog, Questionnaire};
use crate::domain::foundation::AssessmentId;
use crate::ports::{AssessmentStore, StoredAssessment};

const CATALOG: &str = r##"
selection_prompt: Welche Kategorien?
global_criteria:
  effort:
    - name: Kostenaufwand
  potential:
    - name: Energieeffizienz
preferences:
  name: Präferenzen
  color: "#1f77b4"
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
"##;

pub(super) fn catalog() -> Arc<Catalog> {
    Arc::new(parse_catalog(CATALOG).unwrap())
}

pub(super) fn store() -> Arc<InMemoryAssessmentStore> {
    Arc::new(InMemoryAssessmentStore::new())
}

/// Stores a fresh, unstarted assessment.
pub(super) async fn started(store: &Arc<InMemoryAssessmentStore>) -> AssessmentId {
    let assessment = StoredAssessment::new(AssessmentId::new(), Questionnaire::new(&catalog()));
    store.save(&assessment).await.unwrap();
    assessment.id
}

/// Stores an assessment with the given categories selected.
pub(super) async fn selected(store: &Arc<InMemoryAssessmentStore>, categories: &[&str]) -> AssessmentId {
    let id = started(store).await;
    let mut assessment = store.load(id).await.unwrap();
    let names: Vec<String> = categories.iter().map(|c| c.to_string()).collect();
    assessment.questionnaire.select_categories(&names).unwrap();
    store.save(&assessment).await.unwrap();
    id
}

pub(super) async fn answer(store: &Arc<InMemoryAssessmentStore>, id: AssessmentId, option: &str) {
    let mut assessment = store.load(id).await.unwrap();
    assert!(assessment.questionnaire.answer_current(Answer::single(option)).unwrap());
    store.save(&assessment).await.unwrap();
}

pub(super) async fn next(store: &Arc<InMemoryAssessmentStore>, id: AssessmentId) {
    let mut assessment = store.load(id).await.unwrap();
    assessment.questionnaire.next_question().unwrap();
    store.save(&assessment).await.unwrap();
}
