use crate::domain::presentation::TranscriptEntry;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client as DynamoDbClient};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

const PRESENTATION_SK: &str = "presentation";
const GROUP_SK: &str = "group";

/// Document storage for presentations, their transcripts and group pointers
#[async_trait]
pub trait PresentationRepository: Send + Sync {
    /// Create a presentation record and return its id
    async fn create_presentation(&self, title: &str, group: &str) -> AppResult<String>;

    /// Point `group` at its most recent presentation, keeping other group fields
    async fn upsert_group_pointer(&self, group: &str, presentation_id: &str) -> AppResult<()>;

    /// Add one transcript entry under a presentation
    async fn append_transcript(
        &self,
        presentation_id: &str,
        entry: &TranscriptEntry,
    ) -> AppResult<()>;
}

/// DynamoDB implementation of the presentation repository.
///
/// Everything lives in one table keyed by `PK` (String) and `SK` (String):
/// - presentation: `PK = presentation/<id>`, `SK = presentation`
/// - transcript: `PK = presentation/<id>`, `SK = transcripts/<order:06>`
/// - group: `PK = groups/<group>`, `SK = group`
pub struct DynamoDbPresentationRepository {
    client: Arc<DynamoDbClient>,
    table_name: String,
}

impl DynamoDbPresentationRepository {
    pub fn new(client: Arc<DynamoDbClient>, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

pub(crate) fn presentation_pk(presentation_id: &str) -> String {
    format!("presentation/{}", presentation_id)
}

pub(crate) fn transcript_sk(order: usize) -> String {
    format!("transcripts/{:06}", order)
}

pub(crate) fn group_pk(group: &str) -> String {
    format!("groups/{}", group)
}

fn persistence_error<E>(operation: &str, err: &E) -> AppError
where
    E: std::error::Error + 'static,
{
    let detail = DisplayErrorContext(err).to_string();
    tracing::error!(operation, error = %detail, "DynamoDB request failed");
    AppError::Persistence(format!("{} failed: {}", operation, detail))
}

#[async_trait]
impl PresentationRepository for DynamoDbPresentationRepository {
    async fn create_presentation(&self, title: &str, group: &str) -> AppResult<String> {
        let presentation_id = Uuid::new_v4().simple().to_string();

        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", AttributeValue::S(presentation_pk(&presentation_id)))
            .item("SK", AttributeValue::S(PRESENTATION_SK.to_string()))
            .item("sync_id", AttributeValue::S(String::new()))
            .item("title", AttributeValue::S(title.to_string()))
            .item("group", AttributeValue::S(group.to_string()))
            .item("created_at", AttributeValue::S(Utc::now().to_rfc3339()))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await
            .map_err(|e| persistence_error("create presentation", &e))?;

        tracing::info!(presentation_id = %presentation_id, title, group, "Presentation created");
        Ok(presentation_id)
    }

    async fn upsert_group_pointer(&self, group: &str, presentation_id: &str) -> AppResult<()> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(group_pk(group)))
            .key("SK", AttributeValue::S(GROUP_SK.to_string()))
            .update_expression("SET presentation_sync_id = :presentation_id")
            .expression_attribute_values(
                ":presentation_id",
                AttributeValue::S(presentation_id.to_string()),
            )
            .send()
            .await
            .map_err(|e| persistence_error("update group pointer", &e))?;

        tracing::debug!(group, presentation_id, "Group pointer updated");
        Ok(())
    }

    async fn append_transcript(
        &self,
        presentation_id: &str,
        entry: &TranscriptEntry,
    ) -> AppResult<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", AttributeValue::S(presentation_pk(presentation_id)))
            .item("SK", AttributeValue::S(transcript_sk(entry.order)))
            .item("order", AttributeValue::N(entry.order.to_string()))
            .item("script", AttributeValue::S(entry.script.clone()))
            .item("transcript", AttributeValue::S(entry.transcript.clone()))
            .item("voice_path", AttributeValue::S(entry.voice_path.clone()))
            .send()
            .await
            .map_err(|e| persistence_error("append transcript", &e))?;

        Ok(())
    }
}
