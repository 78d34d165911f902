use serde::Serialize;
use serde_json::Value;

use super::entity_kind::EntityKind;
use super::form::{DraftError, FieldSpec, FieldType, FormReader, JsonFieldPolicy, RawForm};
use crate::modules::content::application::domain::entities::{Service, Stat};
use crate::modules::remote_table::application::ports::outgoing::Row;

use FieldType::*;

/// One entity form: its field schema and how raw values become a typed row.
pub trait EntityForm: Serialize + Sized {
    const KIND: EntityKind;
    const FIELDS: &'static [FieldSpec];

    fn read(form: &FormReader<'_>) -> Result<Self, DraftError>;

    fn from_form(form: &RawForm, policy: JsonFieldPolicy) -> Result<Self, DraftError> {
        Self::read(&FormReader::new(form, Self::FIELDS, policy))
    }
}

//
// ──────────────────────────────────────────────────────────
// Personal info
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalInfoDraft {
    pub full_name: String,
    pub tagline: String,
    pub description: String,
    pub profile_image_url: Option<String>,
    pub resume_url: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub roles: Vec<String>,
    pub stats: Vec<Stat>,
    pub services: Vec<Service>,
}

impl EntityForm for PersonalInfoDraft {
    const KIND: EntityKind = EntityKind::PersonalInfo;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("full_name", "Full name", Text),
        FieldSpec::required("tagline", "Tagline", Text),
        FieldSpec::required("description", "Description", LongText),
        FieldSpec::optional("profile_image_url", "Profile image URL", Url),
        FieldSpec::optional("resume_url", "Resume URL", Url),
        FieldSpec::optional("github_url", "GitHub URL", Url),
        FieldSpec::optional("linkedin_url", "LinkedIn URL", Url),
        FieldSpec::optional("twitter_url", "Twitter URL", Url),
        FieldSpec::optional("email", "Email", Text),
        FieldSpec::optional("phone", "Phone", Text),
        FieldSpec::optional("location", "Location", Text),
        FieldSpec::optional("roles", "Roles (comma separated)", CommaList),
        FieldSpec::optional("stats", "Stats (JSON)", Json),
        FieldSpec::optional("services", "Services (JSON)", Json),
    ];

    fn read(form: &FormReader<'_>) -> Result<Self, DraftError> {
        Ok(Self {
            full_name: form.text("full_name")?,
            tagline: form.text("tagline")?,
            description: form.text("description")?,
            profile_image_url: form.optional_text("profile_image_url"),
            resume_url: form.optional_text("resume_url"),
            github_url: form.optional_text("github_url"),
            linkedin_url: form.optional_text("linkedin_url"),
            twitter_url: form.optional_text("twitter_url"),
            email: form.optional_text("email"),
            phone: form.optional_text("phone"),
            location: form.optional_text("location"),
            roles: form.list("roles"),
            stats: form.json_list("stats")?,
            services: form.json_list("services")?,
        })
    }
}

//
// ──────────────────────────────────────────────────────────
// Project
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub category: String,
    pub date: String,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
}

impl EntityForm for ProjectDraft {
    const KIND: EntityKind = EntityKind::Project;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("title", "Title", Text),
        FieldSpec::required("description", "Description", LongText),
        FieldSpec::optional("image_url", "Image URL", Url),
        FieldSpec::optional("tags", "Tags (comma separated)", CommaList),
        FieldSpec::required("category", "Category", Text),
        FieldSpec::required("date", "Date", Date),
        FieldSpec::optional("github_url", "GitHub URL", Url),
        FieldSpec::optional("live_url", "Live URL", Url),
        FieldSpec::optional("featured", "Featured", Checkbox),
    ];

    fn read(form: &FormReader<'_>) -> Result<Self, DraftError> {
        Ok(Self {
            title: form.text("title")?,
            description: form.text("description")?,
            image_url: form.optional_text("image_url"),
            tags: form.list("tags"),
            category: form.text("category")?,
            date: form.text("date")?,
            github_url: form.optional_text("github_url"),
            live_url: form.optional_text("live_url"),
            featured: form.checkbox("featured"),
        })
    }
}

//
// ──────────────────────────────────────────────────────────
// Experience
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub period: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
    pub responsibilities: Vec<String>,
    pub order_index: i32,
}

impl EntityForm for ExperienceDraft {
    const KIND: EntityKind = EntityKind::Experience;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("title", "Title", Text),
        FieldSpec::required("company", "Company", Text),
        FieldSpec::required("location", "Location", Text),
        FieldSpec::required("period", "Period", Text),
        FieldSpec::required("type", "Type", Text),
        FieldSpec::required("description", "Description", LongText),
        FieldSpec::optional("achievements", "Achievements (comma separated)", CommaList),
        FieldSpec::optional("technologies", "Technologies (comma separated)", CommaList),
        FieldSpec::optional(
            "responsibilities",
            "Responsibilities (comma separated)",
            CommaList,
        ),
        FieldSpec::optional("order_index", "Display order", Integer),
    ];

    fn read(form: &FormReader<'_>) -> Result<Self, DraftError> {
        Ok(Self {
            title: form.text("title")?,
            company: form.text("company")?,
            location: form.text("location")?,
            period: form.text("period")?,
            kind: form.text("type")?,
            description: form.text("description")?,
            achievements: form.list("achievements"),
            technologies: form.list("technologies"),
            responsibilities: form.list("responsibilities"),
            order_index: form.integer("order_index")?,
        })
    }
}

//
// ──────────────────────────────────────────────────────────
// Education, certification, skill
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationDraft {
    pub degree: String,
    pub school: String,
    pub location: String,
    pub period: String,
    pub gpa: Option<String>,
    pub achievements: Vec<String>,
}

impl EntityForm for EducationDraft {
    const KIND: EntityKind = EntityKind::Education;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("degree", "Degree", Text),
        FieldSpec::required("school", "School", Text),
        FieldSpec::required("location", "Location", Text),
        FieldSpec::required("period", "Period", Text),
        FieldSpec::optional("gpa", "GPA", Text),
        FieldSpec::optional("achievements", "Achievements (comma separated)", CommaList),
    ];

    fn read(form: &FormReader<'_>) -> Result<Self, DraftError> {
        Ok(Self {
            degree: form.text("degree")?,
            school: form.text("school")?,
            location: form.text("location")?,
            period: form.text("period")?,
            gpa: form.optional_text("gpa"),
            achievements: form.list("achievements"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificationDraft {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub credential_id: Option<String>,
}

impl EntityForm for CertificationDraft {
    const KIND: EntityKind = EntityKind::Certification;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Name", Text),
        FieldSpec::required("issuer", "Issuer", Text),
        FieldSpec::required("date", "Date", Date),
        FieldSpec::optional("credential_id", "Credential ID", Text),
    ];

    fn read(form: &FormReader<'_>) -> Result<Self, DraftError> {
        Ok(Self {
            name: form.text("name")?,
            issuer: form.text("issuer")?,
            date: form.text("date")?,
            credential_id: form.optional_text("credential_id"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillDraft {
    pub name: String,
    pub category: String,
    pub level: Option<String>,
}

impl EntityForm for SkillDraft {
    const KIND: EntityKind = EntityKind::Skill;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Name", Text),
        FieldSpec::required("category", "Category", Text),
        FieldSpec::optional("level", "Level (0-100)", Text),
    ];

    fn read(form: &FormReader<'_>) -> Result<Self, DraftError> {
        Ok(Self {
            name: form.text("name")?,
            category: form.text("category")?,
            level: form.numeric_text("level")?,
        })
    }
}

//
// ──────────────────────────────────────────────────────────
// Dispatch
// ──────────────────────────────────────────────────────────
//

pub fn field_specs(kind: EntityKind) -> &'static [FieldSpec] {
    match kind {
        EntityKind::PersonalInfo => PersonalInfoDraft::FIELDS,
        EntityKind::Project => ProjectDraft::FIELDS,
        EntityKind::Experience => ExperienceDraft::FIELDS,
        EntityKind::Education => EducationDraft::FIELDS,
        EntityKind::Certification => CertificationDraft::FIELDS,
        EntityKind::Skill => SkillDraft::FIELDS,
    }
}

/// A validated, typed submission for exactly one entity kind.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityDraft {
    PersonalInfo(PersonalInfoDraft),
    Project(ProjectDraft),
    Experience(ExperienceDraft),
    Education(EducationDraft),
    Certification(CertificationDraft),
    Skill(SkillDraft),
}

impl EntityDraft {
    pub fn from_form(
        kind: EntityKind,
        form: &RawForm,
        policy: JsonFieldPolicy,
    ) -> Result<Self, DraftError> {
        Ok(match kind {
            EntityKind::PersonalInfo => {
                EntityDraft::PersonalInfo(PersonalInfoDraft::from_form(form, policy)?)
            }
            EntityKind::Project => EntityDraft::Project(ProjectDraft::from_form(form, policy)?),
            EntityKind::Experience => {
                EntityDraft::Experience(ExperienceDraft::from_form(form, policy)?)
            }
            EntityKind::Education => {
                EntityDraft::Education(EducationDraft::from_form(form, policy)?)
            }
            EntityKind::Certification => {
                EntityDraft::Certification(CertificationDraft::from_form(form, policy)?)
            }
            EntityKind::Skill => EntityDraft::Skill(SkillDraft::from_form(form, policy)?),
        })
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityDraft::PersonalInfo(_) => PersonalInfoDraft::KIND,
            EntityDraft::Project(_) => ProjectDraft::KIND,
            EntityDraft::Experience(_) => ExperienceDraft::KIND,
            EntityDraft::Education(_) => EducationDraft::KIND,
            EntityDraft::Certification(_) => CertificationDraft::KIND,
            EntityDraft::Skill(_) => SkillDraft::KIND,
        }
    }

    pub fn into_row(self) -> Result<Row, DraftError> {
        let value = match self {
            EntityDraft::PersonalInfo(d) => serde_json::to_value(d),
            EntityDraft::Project(d) => serde_json::to_value(d),
            EntityDraft::Experience(d) => serde_json::to_value(d),
            EntityDraft::Education(d) => serde_json::to_value(d),
            EntityDraft::Certification(d) => serde_json::to_value(d),
            EntityDraft::Skill(d) => serde_json::to_value(d),
        }
        .map_err(|e| DraftError::Encode(e.to_string()))?;

        match value {
            Value::Object(row) => Ok(row),
            other => Err(DraftError::Encode(format!("expected an object, got {other}"))),
        }
    }
}
