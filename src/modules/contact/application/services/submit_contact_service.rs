use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::modules::contact::application::domain::ContactForm;
use crate::modules::contact::application::ports::incoming::{
    SubmitContactError, SubmitContactUseCase,
};
use crate::modules::remote_table::application::ports::outgoing::{RemoteTableClient, TableName};

#[derive(Clone)]
pub struct SubmitContactService {
    client: Arc<dyn RemoteTableClient>,
}

impl SubmitContactService {
    pub fn new(client: Arc<dyn RemoteTableClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubmitContactUseCase for SubmitContactService {
    async fn execute(&self, form: ContactForm) -> Result<(), SubmitContactError> {
        let message = form.validate().map_err(|e| {
            warn!("Contact submission rejected: {}", e);
            SubmitContactError::from(e)
        })?;

        self.client
            .insert(TableName::ContactMessages, message.into_row())
            .await?;

        info!("Contact message stored");
        Ok(())
    }
}
