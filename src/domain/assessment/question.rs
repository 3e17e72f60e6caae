//! Question - an answerable unit with optional value mapping and follow-up.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::ConfigurationError;
use crate::domain::foundation::Level;

/// Default prompt for generated preference questions.
pub const DEFAULT_PREFERENCE_PROMPT: &str =
    "How important is the criterion {criterion} to you on a scale from 1 to 5? (5 = very important, 1 = unimportant)";

const NO_INFO_TEXT: &str = "No additional information available.";

/// How a question feeds aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QuestionTag {
    Preference,
    Specification,
    Potential,
    Effort,
    Risk,
}

impl QuestionTag {
    /// Tags whose questions must carry an answer value map.
    pub const VALUED: [QuestionTag; 3] =
        [QuestionTag::Preference, QuestionTag::Effort, QuestionTag::Risk];
}

impl fmt::Display for QuestionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A recorded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    /// Creates a single-choice answer.
    pub fn single(option: impl Into<String>) -> Self {
        Answer::Single(option.into())
    }

    /// Creates a multi-choice answer.
    pub fn multiple<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Answer::Multiple(options.into_iter().map(Into::into).collect())
    }

    /// Returns the scalar answer, if this is a single choice.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Answer::Single(s) => Some(s),
            Answer::Multiple(_) => None,
        }
    }

    /// Returns the selected options.
    pub fn selected(&self) -> Vec<&str> {
        match self {
            Answer::Single(s) => vec![s.as_str()],
            Answer::Multiple(v) => v.iter().map(String::as_str).collect(),
        }
    }

    /// Returns true if nothing was selected.
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Single(s) => s.is_empty(),
            Answer::Multiple(v) => v.is_empty(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selected().join(", "))
    }
}

/// Explanatory texts shown next to a question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionInfo {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub consequence_description: Option<String>,
    #[serde(default)]
    pub reason_to_exist: Option<String>,
}

/// A question template plus its mutable answer state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    name: String,
    text: String,
    options: Vec<String>,
    multi_choice: bool,
    tags: BTreeSet<QuestionTag>,
    value_map: Option<BTreeMap<String, Level>>,
    criterion: Option<String>,
    consequences: Option<BTreeMap<String, String>>,
    info: QuestionInfo,
    answer: Option<Answer>,
    value: Option<Level>,
}

impl Question {
    /// Creates an unanswered single-choice question without tags.
    pub fn new(name: impl Into<String>, text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            options,
            multi_choice: false,
            tags: BTreeSet::new(),
            value_map: None,
            criterion: None,
            consequences: None,
            info: QuestionInfo::default(),
            answer: None,
            value: None,
        }
    }

    /// Generates the 1..5 weighting question for an evaluation criterion.
    ///
    /// `prompt` may contain a `{criterion}` placeholder.
    pub fn preference(criterion: &str, prompt: &str, description: Option<String>) -> Self {
        let options: Vec<String> = Level::all().map(|l| l.to_string()).collect();
        let value_map = Level::all().map(|l| (l.to_string(), l)).collect();
        Question::new(criterion, prompt.replace("{criterion}", criterion), options)
            .with_tags([QuestionTag::Preference])
            .with_value_map(value_map)
            .with_info(QuestionInfo {
                description,
                consequence_description: Some(
                    "A low weight makes high values of this criterion count less in the final evaluation."
                        .to_string(),
                ),
                reason_to_exist: Some(
                    "Weighting the criteria brings your own perspective and prerequisites into the evaluation."
                        .to_string(),
                ),
            })
    }

    pub fn multi_choice(mut self, multi_choice: bool) -> Self {
        self.multi_choice = multi_choice;
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = QuestionTag>) -> Self {
        self.tags.extend(tags);
        self
    }

    pub fn with_value_map(mut self, value_map: BTreeMap<String, Level>) -> Self {
        self.value_map = Some(value_map);
        self
    }

    pub fn with_criterion(mut self, criterion: impl Into<String>) -> Self {
        self.criterion = Some(criterion.into());
        self
    }

    pub fn with_consequences(mut self, consequences: BTreeMap<String, String>) -> Self {
        self.consequences = Some(consequences);
        self
    }

    pub fn with_info(mut self, info: QuestionInfo) -> Self {
        self.info = info;
        self
    }

    /// Checks the template for internal consistency.
    ///
    /// Multi-choice questions may not map values or trigger consequences,
    /// value maps must cover exactly the options, and consequence triggers
    /// must be options.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.multi_choice {
            if self.value_map.is_some() {
                return Err(ConfigurationError::MultiChoiceUnsupported {
                    question: self.name.clone(),
                    feature: "an answer value map",
                });
            }
            if self.consequences.is_some() {
                return Err(ConfigurationError::MultiChoiceUnsupported {
                    question: self.name.clone(),
                    feature: "consequence triggers",
                });
            }
        }

        match &self.value_map {
            Some(map) => {
                if let Some(key) = map.keys().find(|k| !self.options.contains(k)) {
                    return Err(self.out_of_domain(key));
                }
                if let Some(option) = self.options.iter().find(|o| !map.contains_key(*o)) {
                    return Err(ConfigurationError::unknown(
                        "value mapping for option",
                        option.clone(),
                        self.name.clone(),
                    ));
                }
            }
            None => {
                if let Some(tag) = QuestionTag::VALUED.iter().find(|t| self.tags.contains(*t)) {
                    return Err(ConfigurationError::MissingValueMap {
                        question: self.name.clone(),
                        tag: tag.to_string(),
                    });
                }
            }
        }

        if let Some(trigger) = self
            .consequences
            .iter()
            .flat_map(|c| c.keys())
            .find(|k| !self.options.contains(k))
        {
            return Err(self.out_of_domain(trigger));
        }

        Ok(())
    }

    /// Records an answer and derives its numeric value.
    ///
    /// A single answer given to a multi-choice question is stored as a
    /// one-element selection.
    pub fn set_answer(&mut self, answer: Answer) -> Result<(), ConfigurationError> {
        let answer = match (answer, self.multi_choice) {
            (Answer::Single(s), true) => Answer::Multiple(vec![s]),
            (Answer::Multiple(v), false) => {
                if v.len() != 1 {
                    return Err(self.out_of_domain(&v.join(", ")));
                }
                Answer::Single(v.into_iter().next().unwrap_or_default())
            }
            (answer, _) => answer,
        };

        if answer.is_empty() {
            return Err(self.out_of_domain(""));
        }
        if let Some(bad) = answer
            .selected()
            .into_iter()
            .find(|s| !self.options.iter().any(|o| o == s))
        {
            return Err(self.out_of_domain(bad));
        }

        self.value = match (&self.value_map, answer.as_single()) {
            (Some(map), Some(option)) => map.get(option).copied(),
            _ => None,
        };
        self.answer = Some(answer);
        Ok(())
    }

    /// Returns true if the current answer is a consequence trigger.
    pub fn consequence_triggered(&self) -> bool {
        self.consequence_name().is_some()
    }

    /// Returns the follow-up question name selected by the current answer.
    pub fn consequence_name(&self) -> Option<&str> {
        let triggers = self.consequences.as_ref()?;
        let answer = self.answer.as_ref()?.as_single()?;
        triggers.get(answer).map(String::as_str)
    }

    /// Assembles the explanatory texts into one block.
    pub fn info_text(&self) -> String {
        let sections = [
            ("Information about the question:", &self.info.description),
            ("Effects of the answers:", &self.info.consequence_description),
            ("Why this question is asked:", &self.info.reason_to_exist),
        ];
        let blocks: Vec<String> = sections
            .iter()
            .filter_map(|(heading, text)| {
                text.as_deref()
                    .filter(|t| !t.is_empty())
                    .map(|t| format!("{}\n{}", heading, t))
            })
            .collect();

        if blocks.is_empty() {
            NO_INFO_TEXT.to_string()
        } else {
            blocks.join("\n\n")
        }
    }

    /// True if `key` is this question's name or display text.
    pub fn is_identified_by(&self, key: &str) -> bool {
        self.name == key || self.text == key
    }

    pub fn has_tag(&self, tag: QuestionTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_multi_choice(&self) -> bool {
        self.multi_choice
    }

    pub fn tags(&self) -> &BTreeSet<QuestionTag> {
        &self.tags
    }

    pub fn criterion(&self) -> Option<&str> {
        self.criterion.as_deref()
    }

    pub fn consequences(&self) -> Option<&BTreeMap<String, String>> {
        self.consequences.as_ref()
    }

    pub fn info(&self) -> &QuestionInfo {
        &self.info
    }

    pub fn answer(&self) -> Option<&Answer> {
        self.answer.as_ref()
    }

    pub fn value(&self) -> Option<Level> {
        self.value
    }

    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }

    fn out_of_domain(&self, answer: &str) -> ConfigurationError {
        ConfigurationError::AnswerOutOfDomain {
            question: self.name.clone(),
            answer: answer.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(v: u8) -> Level {
        Level::new(v).unwrap()
    }

    fn yes_no() -> Vec<String> {
        vec!["Ja".to_string(), "Nein".to_string()]
    }

    fn flow_data_question() -> Question {
        Question::new("flow_1", "Liegen Durchflussdaten vor?", yes_no())
            .with_tags([QuestionTag::Effort])
            .with_value_map([("Ja".to_string(), level(1)), ("Nein".to_string(), level(5))].into())
            .with_criterion("Datenerhebungsaufwand")
            .with_consequences([("Nein".to_string(), "flow_2".to_string())].into())
    }

    #[test]
    fn set_answer_derives_value_for_every_option() {
        let mut q = flow_data_question();
        q.set_answer(Answer::single("Ja")).unwrap();
        assert_eq!(q.value(), Some(level(1)));
        q.set_answer(Answer::single("Nein")).unwrap();
        assert_eq!(q.value(), Some(level(5)));
    }

    #[test]
    fn set_answer_rejects_unknown_option() {
        let mut q = flow_data_question();
        let err = q.set_answer(Answer::single("Vielleicht")).unwrap_err();
        assert!(matches!(err, ConfigurationError::AnswerOutOfDomain { .. }));
        assert!(!q.is_answered());
    }

    #[test]
    fn set_answer_without_value_map_leaves_value_unset() {
        let mut q = Question::new("history", "Wie weit reicht Ihre Datenhistorie zurück?", yes_no());
        q.set_answer(Answer::single("Ja")).unwrap();
        assert_eq!(q.value(), None);
        assert_eq!(q.answer(), Some(&Answer::single("Ja")));
    }

    #[test]
    fn multi_choice_wraps_single_answer() {
        let mut q = Question::new("init", "Select", yes_no()).multi_choice(true);
        q.set_answer(Answer::single("Ja")).unwrap();
        assert_eq!(q.answer(), Some(&Answer::multiple(["Ja"])));
    }

    #[test]
    fn multi_choice_rejects_empty_selection() {
        let mut q = Question::new("init", "Select", yes_no()).multi_choice(true);
        assert!(q.set_answer(Answer::Multiple(vec![])).is_err());
    }

    #[test]
    fn consequence_triggers_only_on_mapped_answer() {
        let mut q = flow_data_question();
        assert!(!q.consequence_triggered());

        q.set_answer(Answer::single("Ja")).unwrap();
        assert!(!q.consequence_triggered());
        assert_eq!(q.consequence_name(), None);

        q.set_answer(Answer::single("Nein")).unwrap();
        assert!(q.consequence_triggered());
        assert_eq!(q.consequence_name(), Some("flow_2"));
    }

    #[test]
    fn validate_rejects_consequences_on_multi_choice() {
        let q = Question::new("q", "Q?", yes_no())
            .multi_choice(true)
            .with_consequences([("Ja".to_string(), "f".to_string())].into());
        assert!(matches!(
            q.validate(),
            Err(ConfigurationError::MultiChoiceUnsupported { .. })
        ));
    }

    #[test]
    fn validate_requires_value_map_for_effort_questions() {
        let q = Question::new("q", "Q?", yes_no()).with_tags([QuestionTag::Effort]);
        assert!(matches!(
            q.validate(),
            Err(ConfigurationError::MissingValueMap { .. })
        ));
    }

    #[test]
    fn validate_rejects_incomplete_value_map() {
        let q = Question::new("q", "Q?", yes_no())
            .with_value_map([("Ja".to_string(), level(1))].into());
        assert!(q.validate().is_err());
    }

    #[test]
    fn validate_accepts_well_formed_question() {
        assert!(flow_data_question().validate().is_ok());
    }

    #[test]
    fn preference_question_maps_scale_to_levels() {
        let mut q = Question::preference("Kostenaufwand", DEFAULT_PREFERENCE_PROMPT, None);
        assert!(q.text().contains("Kostenaufwand"));
        assert!(q.has_tag(QuestionTag::Preference));
        assert!(q.validate().is_ok());
        q.set_answer(Answer::single("4")).unwrap();
        assert_eq!(q.value(), Some(level(4)));
    }

    #[test]
    fn info_text_falls_back_when_empty() {
        let q = Question::new("q", "Q?", yes_no());
        assert_eq!(q.info_text(), NO_INFO_TEXT);
    }

    #[test]
    fn info_text_joins_available_sections() {
        let q = Question::new("q", "Q?", yes_no()).with_info(QuestionInfo {
            description: Some("Beschreibung".to_string()),
            consequence_description: None,
            reason_to_exist: Some("Grund".to_string()),
        });
        assert_eq!(
            q.info_text(),
            "Information about the question:\nBeschreibung\n\nWhy this question is asked:\nGrund"
        );
    }

    #[test]
    fn identified_by_name_or_text() {
        let q = flow_data_question();
        assert!(q.is_identified_by("flow_1"));
        assert!(q.is_identified_by("Liegen Durchflussdaten vor?"));
        assert!(!q.is_identified_by("flow_2"));
    }

    #[test]
    fn answer_deserializes_untagged() {
        let single: Answer = serde_json::from_str("\"Ja\"").unwrap();
        let multi: Answer = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert_eq!(single, Answer::single("Ja"));
        assert_eq!(multi, Answer::multiple(["a", "b"]));
    }
}
