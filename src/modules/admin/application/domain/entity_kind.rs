use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::remote_table::application::ports::outgoing::TableName;

/// The content tables the admin editor can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    PersonalInfo,
    Project,
    Experience,
    Education,
    Certification,
    Skill,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::PersonalInfo,
        EntityKind::Project,
        EntityKind::Experience,
        EntityKind::Education,
        EntityKind::Certification,
        EntityKind::Skill,
    ];

    pub fn table(&self) -> TableName {
        match self {
            EntityKind::PersonalInfo => TableName::PersonalInfo,
            EntityKind::Project => TableName::Projects,
            EntityKind::Experience => TableName::Experiences,
            EntityKind::Education => TableName::Education,
            EntityKind::Certification => TableName::Certifications,
            EntityKind::Skill => TableName::Skills,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::PersonalInfo => "personal_info",
            EntityKind::Project => "project",
            EntityKind::Experience => "experience",
            EntityKind::Education => "education",
            EntityKind::Certification => "certification",
            EntityKind::Skill => "skill",
        }
    }

    /// Exactly one row exists; it is edited in place, never created or deleted.
    pub fn is_singleton(&self) -> bool {
        matches!(self, EntityKind::PersonalInfo)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown entity kind: {0}")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "personal_info" => Ok(EntityKind::PersonalInfo),
            "project" | "projects" => Ok(EntityKind::Project),
            "experience" | "experiences" => Ok(EntityKind::Experience),
            "education" => Ok(EntityKind::Education),
            "certification" | "certifications" => Ok(EntityKind::Certification),
            "skill" | "skills" => Ok(EntityKind::Skill),
            _ => Err(UnknownEntityKind(raw.to_string())),
        }
    }
}
