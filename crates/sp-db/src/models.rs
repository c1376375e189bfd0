use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subject category taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "subject_category", rename_all = "kebab-case")]
pub enum SubjectCategory {
    Frontend,
    Backend,
    Core,
    AiMl,
}

impl std::str::FromStr for SubjectCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            "core" => Ok(Self::Core),
            "ai-ml" => Ok(Self::AiMl),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_theme", rename_all = "lowercase")]
pub enum UserTheme {
    Light,
    Dark,
    System,
}

/// Subject model - the top-level course entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Subject {
    /// Unique subject identifier
    pub id: Uuid,
    /// Subject title (max 100 chars)
    pub title: String,
    /// Subject description (max 500 chars)
    pub description: String,
    /// Cover image URL
    pub image_url: String,
    /// Category for filtering on the landing pages
    pub category: SubjectCategory,
    /// When the subject was created
    pub created_at: DateTime<Utc>,
    /// When the subject was last updated
    pub updated_at: DateTime<Utc>,
}

/// Unit model - an ordered subdivision of a subject
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Unit {
    /// Unique unit identifier
    pub id: Uuid,
    /// Subject this unit belongs to (indexed)
    pub subject_id: Uuid,
    /// Unit title (max 100 chars)
    pub title: String,
    /// Unit description (max 300 chars)
    pub description: String,
    /// Presentation order within the subject (unique per subject)
    pub position: i32,
    /// When the unit was created
    pub created_at: DateTime<Utc>,
    /// When the unit was last updated
    pub updated_at: DateTime<Utc>,
}

/// Topic model - the unit of content and of completion tracking
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Topic {
    /// Unique topic identifier
    pub id: Uuid,
    /// Unit this topic belongs to (indexed)
    pub unit_id: Uuid,
    /// Owning subject, denormalized for direct subject-level queries;
    /// must always equal the unit's subject_id
    pub subject_id: Uuid,
    /// Topic title (max 100 chars)
    pub title: String,
    /// Markdown-like body text
    pub content: String,
    /// Presentation order within the unit (unique per unit)
    pub position: i32,
    /// When the topic was created
    pub created_at: DateTime<Utc>,
    /// When the topic was last updated
    pub updated_at: DateTime<Utc>,
}

/// Code example attached to a topic
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopicExample {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
    pub position: i32,
}

/// Quiz model - at most one per unit
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Quiz {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub subject_id: Uuid,
    pub title: String,
    pub time_limit_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Multiple-choice question belonging to a quiz
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct QuizQuestion {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub prompt: String,
    /// Up to 4 choices by convention
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: i32,
    pub explanation: Option<String>,
    pub position: i32,
}

/// User account
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Stored lowercase; unique
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub theme: UserTheme,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-user per-subject progress entry (lazily created)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SubjectProgressRow {
    pub user_id: Uuid,
    pub subject_id: Uuid,
    /// Derived value; recomputed on every mutation
    pub progress_percentage: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Latest stored quiz result for a user
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct QuizResult {
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub correct_count: i32,
    pub total_questions: i32,
    pub taken_at: DateTime<Utc>,
}

/// Bookmarked topic with enough context to render a profile list entry
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BookmarkedTopic {
    pub topic_id: Uuid,
    pub unit_id: Uuid,
    pub subject_id: Uuid,
    pub title: String,
}

/// Per-subject progress summary for the profile page
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProgressSummary {
    pub subject_id: Uuid,
    pub subject_title: String,
    pub completed_topics: i64,
    pub completed_units: i64,
    pub total_topics: i64,
    pub progress_percentage: i32,
}
