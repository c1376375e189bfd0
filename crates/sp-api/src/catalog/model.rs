//! Response shapes for the catalog read surface.
//!
//! Parent titles are attached as read-only joins at request time; nothing
//! here is stored.

use serde::Serialize;
use sp_db::models::{Quiz, QuizQuestion, Subject, Topic, TopicExample, Unit};

/// A subject with its units and their topics, all in presentation order.
#[derive(Debug, Serialize)]
pub struct SubjectDetail {
    #[serde(flatten)]
    pub subject: Subject,
    pub units: Vec<UnitWithTopics>,
}

#[derive(Debug, Serialize)]
pub struct UnitWithTopics {
    #[serde(flatten)]
    pub unit: Unit,
    pub topics: Vec<Topic>,
}

/// A unit with ordered topics and the owning subject's title.
#[derive(Debug, Serialize)]
pub struct UnitDetail {
    #[serde(flatten)]
    pub unit: Unit,
    pub subject_title: String,
    pub topics: Vec<Topic>,
}

/// A topic with its examples and the titles of its owners.
#[derive(Debug, Serialize)]
pub struct TopicDetail {
    #[serde(flatten)]
    pub topic: Topic,
    pub examples: Vec<TopicExample>,
    pub unit_title: String,
    pub subject_title: String,
}

/// A quiz with its ordered questions.
#[derive(Debug, Serialize)]
pub struct QuizDetail {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<QuizQuestion>,
}
