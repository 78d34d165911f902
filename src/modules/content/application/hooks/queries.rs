use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::entity_resource::{EntityResource, ResourceQuery};
use crate::modules::content::application::domain::entities::{
    Certification, ContactMessage, Education, Experience, PersonalInfo, Project, Skill,
};
use crate::modules::remote_table::application::ports::outgoing::{
    RemoteTableClient, Row, SelectQuery, TableError, TableName,
};

/// A row type read from one table in one fixed display order.
pub trait TableEntity: DeserializeOwned + Clone + Send + Sync + 'static {
    const TABLE: TableName;
    /// Ordering column and whether it ascends.
    const ORDER: (&'static str, bool);
}

impl TableEntity for Project {
    const TABLE: TableName = TableName::Projects;
    const ORDER: (&'static str, bool) = ("created_at", false);
}

impl TableEntity for Experience {
    const TABLE: TableName = TableName::Experiences;
    const ORDER: (&'static str, bool) = ("order_index", true);
}

impl TableEntity for Education {
    const TABLE: TableName = TableName::Education;
    const ORDER: (&'static str, bool) = ("period", false);
}

impl TableEntity for Certification {
    const TABLE: TableName = TableName::Certifications;
    const ORDER: (&'static str, bool) = ("date", false);
}

impl TableEntity for Skill {
    const TABLE: TableName = TableName::Skills;
    const ORDER: (&'static str, bool) = ("category", true);
}

impl TableEntity for ContactMessage {
    const TABLE: TableName = TableName::ContactMessages;
    const ORDER: (&'static str, bool) = ("created_at", false);
}

pub fn decode_row<E: DeserializeOwned>(row: Row) -> Result<E, TableError> {
    serde_json::from_value(serde_json::Value::Object(row))
        .map_err(|e| TableError::Decode(e.to_string()))
}

pub fn decode_rows<E: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<E>, TableError> {
    rows.into_iter().map(decode_row).collect()
}

// ─── Queries ──────────────────────────────────────────────

/// `select *` over the whole table in the entity's display order.
pub struct ListQuery<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> ListQuery<E> {
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E> Default for ListQuery<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: TableEntity> ResourceQuery for ListQuery<E> {
    type Output = Vec<E>;

    fn label(&self) -> &'static str {
        E::TABLE.as_str()
    }

    async fn run(&self, client: &dyn RemoteTableClient) -> Result<Vec<E>, TableError> {
        let (column, ascending) = E::ORDER;
        let result = client
            .select(E::TABLE, SelectQuery::all().order_by(column, ascending))
            .await?;
        decode_rows(result.rows)
    }
}

/// First personal_info row, if any.
pub struct PersonalInfoQuery;

#[async_trait]
impl ResourceQuery for PersonalInfoQuery {
    type Output = Option<PersonalInfo>;

    fn label(&self) -> &'static str {
        TableName::PersonalInfo.as_str()
    }

    async fn run(&self, client: &dyn RemoteTableClient) -> Result<Self::Output, TableError> {
        let result = client
            .select(TableName::PersonalInfo, SelectQuery::all().limit(1))
            .await?;
        result.rows.into_iter().next().map(decode_row).transpose()
    }
}

/// Single project by id. A missing row is `None`, not an error.
pub struct ProjectByIdQuery {
    pub id: Uuid,
}

#[async_trait]
impl ResourceQuery for ProjectByIdQuery {
    type Output = Option<Project>;

    fn label(&self) -> &'static str {
        "project"
    }

    async fn run(&self, client: &dyn RemoteTableClient) -> Result<Self::Output, TableError> {
        let result = client
            .select(
                TableName::Projects,
                SelectQuery::all().eq("id", self.id.to_string()).limit(1),
            )
            .await?;
        result.rows.into_iter().next().map(decode_row).transpose()
    }
}

pub type PersonalInfoHook = EntityResource<PersonalInfoQuery>;
pub type ProjectHook = EntityResource<ProjectByIdQuery>;
pub type ProjectsHook = EntityResource<ListQuery<Project>>;
pub type ExperiencesHook = EntityResource<ListQuery<Experience>>;
pub type EducationHook = EntityResource<ListQuery<Education>>;
pub type CertificationsHook = EntityResource<ListQuery<Certification>>;
pub type SkillsHook = EntityResource<ListQuery<Skill>>;
pub type ContactMessagesHook = EntityResource<ListQuery<ContactMessage>>;
