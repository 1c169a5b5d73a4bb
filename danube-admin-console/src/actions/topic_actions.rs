use super::payloads::{qualify, DispatchStrategy, SchemaType, TopicActionRequest};
use super::{parse_number, text_field, Dispatch, DialogState, FormError, Notification};
use crate::core::http_client::TOPIC_ACTIONS_PATH;
use crate::core::GatewayClient;
use crate::read_model::{topics_list_key, QueryCache, QueryKey};

/// Draft of the create-topic dialog. Numeric input stays text until submit.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTopicForm {
    /// `/namespace/topic`, or a bare name combined with `namespace`
    pub topic: String,
    pub namespace: String,
    pub partitions: String,
    pub schema_type: SchemaType,
    pub schema_data: String,
    pub dispatch_strategy: DispatchStrategy,
}

impl Default for CreateTopicForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            namespace: String::new(),
            partitions: String::new(),
            schema_type: SchemaType::String,
            schema_data: "{}".to_string(),
            dispatch_strategy: DispatchStrategy::NonReliable,
        }
    }
}

impl CreateTopicForm {
    pub fn to_request(&self) -> Result<TopicActionRequest, FormError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(FormError::Missing("topic"));
        }
        Ok(TopicActionRequest::Create {
            topic: topic.to_string(),
            namespace: qualify(topic, &self.namespace),
            partitions: parse_number("partitions", &self.partitions)?,
            schema_type: self.schema_type,
            schema_data: text_field(&self.schema_data),
            dispatch_strategy: self.dispatch_strategy,
        })
    }
}

/// Params of the move (unload) and delete dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTarget {
    pub topic: String,
    /// only consulted when `topic` is not fully qualified
    pub namespace: String,
}

impl TopicTarget {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            namespace: String::new(),
        }
    }

    /// Whether the dialog should ask for a namespace.
    pub fn needs_namespace(&self) -> bool {
        !self.topic.trim_start().starts_with('/')
    }

    fn unload_request(&self) -> TopicActionRequest {
        TopicActionRequest::Unload {
            topic: self.topic.clone(),
            namespace: qualify(&self.topic, &self.namespace),
        }
    }

    fn delete_request(&self) -> TopicActionRequest {
        TopicActionRequest::Delete {
            topic: self.topic.clone(),
            namespace: qualify(&self.topic, &self.namespace),
        }
    }
}

/// Create, move and delete topics.
///
/// Success invalidates `topicsList` plus the keys handed to
/// [`TopicActions::with_invalidate_keys`], e.g. the broker a topic lived on.
pub struct TopicActions {
    dispatch: Dispatch,
    create: DialogState<CreateTopicForm>,
    unload: DialogState<TopicTarget>,
    delete: DialogState<TopicTarget>,
}

impl TopicActions {
    pub fn new(client: GatewayClient, cache: QueryCache) -> Self {
        Self::with_invalidate_keys(client, cache, Vec::new())
    }

    pub fn with_invalidate_keys(client: GatewayClient, cache: QueryCache, extra: Vec<QueryKey>) -> Self {
        Self {
            dispatch: Dispatch::new(client, cache, topics_list_key(), extra),
            create: DialogState::Closed,
            unload: DialogState::Closed,
            delete: DialogState::Closed,
        }
    }

    pub fn invalidate_keys(&self) -> &[QueryKey] {
        &self.dispatch.invalidate
    }

    // ===== CREATE =====

    pub fn open_create(&mut self) {
        self.open_create_with(CreateTopicForm::default());
    }

    pub fn open_create_with(&mut self, form: CreateTopicForm) {
        self.create = DialogState::Open(form);
    }

    pub fn create_dialog(&self) -> &DialogState<CreateTopicForm> {
        &self.create
    }

    /// Draft edits while the dialog is open.
    pub fn create_form_mut(&mut self) -> Option<&mut CreateTopicForm> {
        self.create.params_mut()
    }

    pub fn close_create(&mut self) {
        self.create = DialogState::Closed;
    }

    pub async fn submit_create(&mut self) -> bool {
        let request = match self.create.params() {
            Some(form) => form.to_request(),
            None => Err(FormError::DialogClosed("create")),
        };
        if self.send(request, "Created", "Failed to create topic").await {
            self.close_create();
            return true;
        }
        false
    }

    // ===== UNLOAD (MOVE) =====

    pub fn open_unload(&mut self, topic: impl Into<String>) {
        self.unload = DialogState::Open(TopicTarget::new(topic));
    }

    pub fn unload_dialog(&self) -> &DialogState<TopicTarget> {
        &self.unload
    }

    pub fn unload_target_mut(&mut self) -> Option<&mut TopicTarget> {
        self.unload.params_mut()
    }

    pub fn close_unload(&mut self) {
        self.unload = DialogState::Closed;
    }

    pub async fn submit_unload(&mut self) -> bool {
        let request = self
            .unload
            .params()
            .map(TopicTarget::unload_request)
            .ok_or(FormError::DialogClosed("move"));
        if self.send(request, "Moved", "Failed to move topic").await {
            self.close_unload();
            return true;
        }
        false
    }

    // ===== DELETE =====

    pub fn open_delete(&mut self, topic: impl Into<String>) {
        self.delete = DialogState::Open(TopicTarget::new(topic));
    }

    pub fn delete_dialog(&self) -> &DialogState<TopicTarget> {
        &self.delete
    }

    pub fn delete_target_mut(&mut self) -> Option<&mut TopicTarget> {
        self.delete.params_mut()
    }

    pub fn close_delete(&mut self) {
        self.delete = DialogState::Closed;
    }

    pub async fn submit_delete(&mut self) -> bool {
        let request = self
            .delete
            .params()
            .map(TopicTarget::delete_request)
            .ok_or(FormError::DialogClosed("delete"));
        if self.send(request, "Deleted", "Failed to delete topic").await {
            self.close_delete();
            return true;
        }
        false
    }

    // ===== FEEDBACK =====

    pub fn notification(&self) -> Option<&Notification> {
        self.dispatch.notification()
    }

    pub fn dismiss_notification(&mut self) {
        self.dispatch.dismiss();
    }

    async fn send(
        &mut self,
        request: Result<TopicActionRequest, FormError>,
        success_default: &str,
        failure_default: &str,
    ) -> bool {
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                self.dispatch.reject(e);
                return false;
            }
        };
        let action = format!("topic {} {}", request.name(), request.topic());
        self.dispatch
            .send(TOPIC_ACTIONS_PATH, &action, &request, success_default, failure_default)
            .await
    }
}
