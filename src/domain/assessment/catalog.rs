//! Catalog - the validated, read-only assessment configuration.
//!
//! A [`CatalogDocument`] is the serde shape of the configuration file. It
//! references questions, conditions and use cases by name;
//! [`Catalog::from_document`] resolves those references, generates the
//! preference questions and rejects every inconsistency up front so that
//! a running questionnaire only fails on genuinely broken state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{
    find_in_pool, Category, CategoryKind, Condition, ConditionKind, ConfigurationError,
    ExpectedAnswer, ProContra, Question, QuestionInfo, QuestionTag, UseCase,
    DEFAULT_PREFERENCE_PROMPT,
};
use crate::domain::foundation::{Level, ValidationError};

/// Name of the generated category selection question.
pub const SELECTION_QUESTION_NAME: &str = "category_selection";

fn default_data_dependent_effort_criteria() -> Vec<String> {
    vec![
        "Datenerhebungsaufwand".to_string(),
        "Sensorinstallationsaufwand".to_string(),
    ]
}

fn default_preference_prompt() -> String {
    DEFAULT_PREFERENCE_PROMPT.to_string()
}

// ════════════════════════════════════════════════════════════════════
// Document
// ════════════════════════════════════════════════════════════════════

/// Root of the catalogue file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Prompt of the category selection question.
    pub selection_prompt: String,
    /// Prompt template for generated preference questions.
    #[serde(default = "default_preference_prompt")]
    pub preference_prompt: String,
    pub global_criteria: GlobalCriteriaDocument,
    #[serde(default = "default_data_dependent_effort_criteria")]
    pub data_dependent_effort_criteria: Vec<String>,
    pub preferences: SectionDocument,
    pub general: SectionDocument,
    pub categories: Vec<CategoryDocument>,
    #[serde(default)]
    pub questions: Vec<QuestionDocument>,
    #[serde(default)]
    pub conditions: Vec<ConditionDocument>,
    #[serde(default)]
    pub use_cases: Vec<UseCaseDocument>,
    /// Category name -> global criterion -> predefined score.
    #[serde(default)]
    pub category_ranking: BTreeMap<String, BTreeMap<String, Level>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalCriteriaDocument {
    pub effort: Vec<CriterionDocument>,
    pub potential: Vec<CriterionDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionDocument {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Preferences or general section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDocument {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub consequences: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDocument {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub criteria: Vec<CriterionDocument>,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub consequences: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDocument {
    pub name: String,
    pub text: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub multi_choice: bool,
    #[serde(default)]
    pub tags: Vec<QuestionTag>,
    #[serde(default)]
    pub values: Option<BTreeMap<String, Level>>,
    #[serde(default)]
    pub criterion: Option<String>,
    #[serde(default)]
    pub consequences: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub info: QuestionInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionDocument {
    pub id: String,
    pub kind: ConditionKind,
    pub expected: Vec<ExpectedAnswer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCaseDocument {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub literature_source: Option<String>,
    #[serde(default)]
    pub pro: Vec<String>,
    #[serde(default)]
    pub contra: Vec<String>,
    pub potential: BTreeMap<String, Level>,
    pub effort: BTreeMap<String, Level>,
    pub risk: Level,
    /// Condition ids.
    #[serde(default)]
    pub conditions: Vec<String>,
}

// ════════════════════════════════════════════════════════════════════
// Validated catalogue
// ════════════════════════════════════════════════════════════════════

/// Global criteria grouped into the two baseline score groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalCriteria {
    pub effort: Vec<String>,
    pub potential: Vec<String>,
}

impl GlobalCriteria {
    /// Effort criteria followed by potential criteria.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.effort.iter().chain(self.potential.iter())
    }
}

/// Read-only scoring inputs shared by every category evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub global_criteria: GlobalCriteria,
    pub data_dependent_effort_criteria: Vec<String>,
    /// Category name -> global criterion -> predefined score.
    pub category_ranking: BTreeMap<String, BTreeMap<String, Level>>,
}

/// Validated assessment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    selection_question: Question,
    preferences: Category,
    general: Category,
    categories: Vec<Category>,
    settings: ScoringSettings,
}

impl Catalog {
    /// Resolves and validates a catalogue document.
    ///
    /// # Errors
    ///
    /// Any [`ConfigurationError`]: unresolved references, duplicate names,
    /// malformed questions, consequences outside the owning category,
    /// conditions that cannot see their questions, ambiguous question
    /// texts, undeclared criteria or missing ranking entries.
    pub fn from_document(doc: CatalogDocument) -> Result<Self, ConfigurationError> {
        if doc.selection_prompt.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                context: "selection_prompt".to_string(),
                source: ValidationError::empty_field("selection_prompt"),
            });
        }

        let questions = index_questions(&doc.questions)?;
        let conditions = index_conditions(&doc.conditions)?;
        let use_cases = index_use_cases(&doc.use_cases, &conditions)?;

        let mut category_names = BTreeSet::new();
        for name in [&doc.preferences.name, &doc.general.name]
            .into_iter()
            .chain(doc.categories.iter().map(|c| &c.name))
        {
            if !category_names.insert(name.as_str()) {
                return Err(ConfigurationError::DuplicateName {
                    kind: "category",
                    name: name.clone(),
                });
            }
        }

        let global_criteria = GlobalCriteria {
            effort: doc.global_criteria.effort.iter().map(|c| c.name.clone()).collect(),
            potential: doc.global_criteria.potential.iter().map(|c| c.name.clone()).collect(),
        };

        let preferences = build_preferences(&doc, &global_criteria)?;
        let general = build_section(&doc.general, CategoryKind::General, &questions)?;
        let general_pool: Vec<&Question> = general.all_questions().iter().collect();

        let mut assigned: BTreeSet<&str> = BTreeSet::new();
        let mut categories = Vec::with_capacity(doc.categories.len());
        for category_doc in &doc.categories {
            for use_case in &category_doc.use_cases {
                if !assigned.insert(use_case.as_str()) {
                    return Err(ConfigurationError::DuplicateUseCase {
                        use_case: use_case.clone(),
                    });
                }
            }
            let category = build_category(category_doc, &doc.preference_prompt, &questions, &use_cases)?;
            check_ranking(&category, &global_criteria, &doc.category_ranking)?;
            check_condition_pools(&category, &general_pool)?;
            categories.push(category);
        }

        let selection_question = Question::new(
            SELECTION_QUESTION_NAME,
            doc.selection_prompt,
            categories.iter().map(|c| c.name().to_string()).collect(),
        )
        .multi_choice(true)
        .with_tags([QuestionTag::Specification]);

        Ok(Self {
            selection_question,
            preferences,
            general,
            categories,
            settings: ScoringSettings {
                global_criteria,
                data_dependent_effort_criteria: doc.data_dependent_effort_criteria,
                category_ranking: doc.category_ranking,
            },
        })
    }

    /// The multi-choice category selection question.
    pub fn selection_question(&self) -> &Question {
        &self.selection_question
    }

    pub fn preferences(&self) -> &Category {
        &self.preferences
    }

    pub fn general(&self) -> &Category {
        &self.general
    }

    /// Selectable use-case categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name() == name)
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }
}

fn index_questions(docs: &[QuestionDocument]) -> Result<HashMap<&str, Question>, ConfigurationError> {
    let mut questions = HashMap::with_capacity(docs.len());
    for doc in docs {
        let mut question = Question::new(&doc.name, &doc.text, doc.options.clone())
            .multi_choice(doc.multi_choice)
            .with_tags(doc.tags.iter().copied())
            .with_info(doc.info.clone());
        if let Some(values) = &doc.values {
            question = question.with_value_map(values.clone());
        }
        if let Some(criterion) = &doc.criterion {
            question = question.with_criterion(criterion);
        }
        if let Some(consequences) = &doc.consequences {
            question = question.with_consequences(consequences.clone());
        }
        question.validate()?;

        if questions.insert(doc.name.as_str(), question).is_some() {
            return Err(ConfigurationError::DuplicateName {
                kind: "question",
                name: doc.name.clone(),
            });
        }
    }
    Ok(questions)
}

fn index_conditions(
    docs: &[ConditionDocument],
) -> Result<HashMap<&str, Condition>, ConfigurationError> {
    let mut conditions = HashMap::with_capacity(docs.len());
    for doc in docs {
        let condition = Condition::new(doc.kind, doc.expected.clone());
        if conditions.insert(doc.id.as_str(), condition).is_some() {
            return Err(ConfigurationError::DuplicateName {
                kind: "condition",
                name: doc.id.clone(),
            });
        }
    }
    Ok(conditions)
}

fn index_use_cases<'a>(
    docs: &'a [UseCaseDocument],
    conditions: &HashMap<&str, Condition>,
) -> Result<HashMap<&'a str, UseCase>, ConfigurationError> {
    let mut use_cases = HashMap::with_capacity(docs.len());
    for doc in docs {
        let resolved = doc
            .conditions
            .iter()
            .map(|id| {
                conditions
                    .get(id.as_str())
                    .cloned()
                    .ok_or_else(|| ConfigurationError::unknown("condition", id, &doc.name))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut use_case = UseCase::new(&doc.name, doc.potential.clone(), doc.effort.clone(), doc.risk)
            .with_description(&doc.description)
            .with_pro_contra(ProContra {
                pro: doc.pro.clone(),
                contra: doc.contra.clone(),
            })
            .with_conditions(resolved);
        if let Some(source) = &doc.literature_source {
            use_case = use_case.with_literature_source(source);
        }

        if use_cases.insert(doc.name.as_str(), use_case).is_some() {
            return Err(ConfigurationError::DuplicateUseCase {
                use_case: doc.name.clone(),
            });
        }
    }
    Ok(use_cases)
}

fn resolve_questions(
    names: &[String],
    questions: &HashMap<&str, Question>,
    owner: &str,
) -> Result<Vec<Question>, ConfigurationError> {
    names
        .iter()
        .map(|name| {
            questions
                .get(name.as_str())
                .cloned()
                .ok_or_else(|| ConfigurationError::unknown("question", name, owner))
        })
        .collect()
}

fn preference_questions(criteria: &[CriterionDocument], prompt: &str) -> Vec<Question> {
    criteria
        .iter()
        .map(|c| Question::preference(&c.name, prompt, c.description.clone()))
        .collect()
}

fn criterion_descriptions(criteria: &[CriterionDocument]) -> BTreeMap<String, String> {
    criteria
        .iter()
        .filter_map(|c| c.description.clone().map(|d| (c.name.clone(), d)))
        .collect()
}

fn build_preferences(
    doc: &CatalogDocument,
    global_criteria: &GlobalCriteria,
) -> Result<Category, ConfigurationError> {
    let section = &doc.preferences;
    let all: Vec<CriterionDocument> = doc
        .global_criteria
        .effort
        .iter()
        .chain(doc.global_criteria.potential.iter())
        .cloned()
        .collect();
    let questions = preference_questions(&all, &doc.preference_prompt);
    if questions.is_empty() {
        return Err(ConfigurationError::EmptyCategory {
            category: section.name.clone(),
        });
    }

    let mut category = Category::new(&section.name, CategoryKind::Preferences, questions, Vec::new())
        .with_criteria(global_criteria.all().cloned().collect())
        .with_criteria_descriptions(criterion_descriptions(&all));
    if let Some(color) = &section.color {
        category = category.with_color(color);
    }
    if let Some(description) = &section.description {
        category = category.with_description(description);
    }
    Ok(category)
}

fn build_section(
    section: &SectionDocument,
    kind: CategoryKind,
    questions: &HashMap<&str, Question>,
) -> Result<Category, ConfigurationError> {
    let defaults = resolve_questions(&section.questions, questions, &section.name)?;
    let consequences = resolve_questions(&section.consequences, questions, &section.name)?;
    if defaults.is_empty() {
        return Err(ConfigurationError::EmptyCategory {
            category: section.name.clone(),
        });
    }
    check_consequence_targets(&section.name, &defaults, &consequences)?;

    let mut category = Category::new(&section.name, kind, defaults, consequences);
    if let Some(color) = &section.color {
        category = category.with_color(color);
    }
    if let Some(description) = &section.description {
        category = category.with_description(description);
    }
    Ok(category)
}

fn build_category(
    doc: &CategoryDocument,
    prompt: &str,
    questions: &HashMap<&str, Question>,
    use_cases: &HashMap<&str, UseCase>,
) -> Result<Category, ConfigurationError> {
    let mut defaults = preference_questions(&doc.criteria, prompt);
    defaults.extend(resolve_questions(&doc.questions, questions, &doc.name)?);
    let consequences = resolve_questions(&doc.consequences, questions, &doc.name)?;
    if defaults.is_empty() {
        return Err(ConfigurationError::EmptyCategory {
            category: doc.name.clone(),
        });
    }
    check_consequence_targets(&doc.name, &defaults, &consequences)?;

    let criteria: Vec<String> = doc.criteria.iter().map(|c| c.name.clone()).collect();
    let mut owned = Vec::with_capacity(doc.use_cases.len());
    for name in &doc.use_cases {
        let use_case = use_cases
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| ConfigurationError::unknown("use case", name, &doc.name))?;
        if let Some(criterion) = use_case
            .predefined_potential()
            .keys()
            .find(|k| !criteria.contains(k))
        {
            return Err(ConfigurationError::UndeclaredCriterion {
                use_case: name.clone(),
                criterion: criterion.clone(),
                category: doc.name.clone(),
            });
        }
        owned.push(use_case);
    }

    let mut category = Category::new(&doc.name, CategoryKind::UseCases, defaults, consequences)
        .with_criteria(criteria)
        .with_criteria_descriptions(criterion_descriptions(&doc.criteria))
        .with_use_cases(owned);
    if let Some(color) = &doc.color {
        category = category.with_color(color);
    }
    if let Some(short_name) = &doc.short_name {
        category = category.with_short_name(short_name);
    }
    if let Some(description) = &doc.description {
        category = category.with_description(description);
    }
    Ok(category)
}

/// Every consequence target must be a consequence candidate of the same
/// category.
fn check_consequence_targets(
    category: &str,
    defaults: &[Question],
    consequences: &[Question],
) -> Result<(), ConfigurationError> {
    for question in defaults.iter().chain(consequences) {
        for target in question.consequences().into_iter().flat_map(|c| c.values()) {
            if !consequences.iter().any(|q| q.name() == target.as_str()) {
                return Err(ConfigurationError::ConsequenceNotFound {
                    consequence: target.clone(),
                    category: category.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn check_ranking(
    category: &Category,
    global_criteria: &GlobalCriteria,
    ranking: &BTreeMap<String, BTreeMap<String, Level>>,
) -> Result<(), ConfigurationError> {
    let row = ranking.get(category.name());
    for criterion in global_criteria.all() {
        if row.and_then(|r| r.get(criterion)).is_none() {
            return Err(ConfigurationError::RankingEntryMissing {
                category: category.name().to_string(),
                criterion: criterion.clone(),
            });
        }
    }
    Ok(())
}

/// Conditions must find their questions, unambiguously, in the pool they
/// are checked against at evaluation time.
fn check_condition_pools(category: &Category, general: &[&Question]) -> Result<(), ConfigurationError> {
    let pool = category.condition_pool(general);

    let mut texts = BTreeSet::new();
    for question in &pool {
        if !texts.insert(question.text()) {
            return Err(ConfigurationError::DuplicateQuestionText {
                text: question.text().to_string(),
                category: category.name().to_string(),
            });
        }
    }

    for use_case in category.use_cases() {
        for condition in use_case.conditions() {
            for key in condition.question_keys() {
                if find_in_pool(&pool, key).is_none() {
                    return Err(ConfigurationError::QuestionNotInPool {
                        question: key.to_string(),
                        use_case: use_case.name().to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}
