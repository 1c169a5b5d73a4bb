use super::payloads::ClusterActionRequest;
use super::{csv_field, parse_number, Dispatch, DialogState, FormError, Notification};
use crate::core::http_client::CLUSTER_ACTIONS_PATH;
use crate::core::GatewayClient;
use crate::read_model::{cluster_key, QueryCache, QueryKey};

pub const DEFAULT_UNLOAD_TIMEOUT: &str = "60";
pub const DEFAULT_ACTIVATE_REASON: &str = "admin_activate";

/// Draft of the unload-broker dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct UnloadBrokerForm {
    pub broker_id: String,
    pub max_parallel: String,
    /// comma separated
    pub namespaces_include: String,
    /// comma separated
    pub namespaces_exclude: String,
    pub dry_run: bool,
    pub timeout_seconds: String,
}

impl UnloadBrokerForm {
    pub fn new(broker_id: impl Into<String>) -> Self {
        Self {
            broker_id: broker_id.into(),
            max_parallel: String::new(),
            namespaces_include: String::new(),
            namespaces_exclude: String::new(),
            dry_run: false,
            timeout_seconds: DEFAULT_UNLOAD_TIMEOUT.to_string(),
        }
    }

    pub fn to_request(&self) -> Result<ClusterActionRequest, FormError> {
        let broker_id = self.broker_id.trim();
        if broker_id.is_empty() {
            return Err(FormError::Missing("broker_id"));
        }
        Ok(ClusterActionRequest::Unload {
            broker_id: broker_id.to_string(),
            max_parallel: parse_number("max_parallel", &self.max_parallel)?,
            namespaces_include: csv_field(&self.namespaces_include),
            namespaces_exclude: csv_field(&self.namespaces_exclude),
            dry_run: self.dry_run,
            timeout_seconds: parse_number("timeout_seconds", &self.timeout_seconds)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivateForm {
    pub broker_id: String,
    pub reason: String,
}

impl ActivateForm {
    pub fn new(broker_id: impl Into<String>) -> Self {
        Self {
            broker_id: broker_id.into(),
            reason: DEFAULT_ACTIVATE_REASON.to_string(),
        }
    }

    pub fn to_request(&self) -> Result<ClusterActionRequest, FormError> {
        let broker_id = self.broker_id.trim();
        if broker_id.is_empty() {
            return Err(FormError::Missing("broker_id"));
        }
        let reason = match self.reason.trim() {
            "" => DEFAULT_ACTIVATE_REASON,
            reason => reason,
        };
        Ok(ClusterActionRequest::Activate {
            broker_id: broker_id.to_string(),
            reason: reason.to_string(),
        })
    }
}

/// Unload (drain) and activate brokers.
///
/// Success invalidates `clusterPage` plus any extra keys, typically the
/// detail key of the broker being acted on.
pub struct ClusterActions {
    dispatch: Dispatch,
    unload: DialogState<UnloadBrokerForm>,
    activate: DialogState<ActivateForm>,
}

impl ClusterActions {
    pub fn new(client: GatewayClient, cache: QueryCache) -> Self {
        Self::with_invalidate_keys(client, cache, Vec::new())
    }

    pub fn with_invalidate_keys(client: GatewayClient, cache: QueryCache, extra: Vec<QueryKey>) -> Self {
        Self {
            dispatch: Dispatch::new(client, cache, cluster_key(), extra),
            unload: DialogState::Closed,
            activate: DialogState::Closed,
        }
    }

    pub fn invalidate_keys(&self) -> &[QueryKey] {
        &self.dispatch.invalidate
    }

    // ===== UNLOAD =====

    pub fn open_unload(&mut self, broker_id: impl Into<String>) {
        self.unload = DialogState::Open(UnloadBrokerForm::new(broker_id));
    }

    pub fn open_unload_with(&mut self, form: UnloadBrokerForm) {
        self.unload = DialogState::Open(form);
    }

    pub fn unload_dialog(&self) -> &DialogState<UnloadBrokerForm> {
        &self.unload
    }

    pub fn unload_form_mut(&mut self) -> Option<&mut UnloadBrokerForm> {
        self.unload.params_mut()
    }

    pub fn close_unload(&mut self) {
        self.unload = DialogState::Closed;
    }

    pub async fn submit_unload(&mut self) -> bool {
        let request = match self.unload.params() {
            Some(form) => form.to_request(),
            None => Err(FormError::DialogClosed("unload")),
        };
        if self.send(request, "Unload started", "Failed to unload broker").await {
            self.close_unload();
            return true;
        }
        false
    }

    // ===== ACTIVATE =====

    pub fn open_activate(&mut self, broker_id: impl Into<String>) {
        self.activate = DialogState::Open(ActivateForm::new(broker_id));
    }

    pub fn activate_dialog(&self) -> &DialogState<ActivateForm> {
        &self.activate
    }

    pub fn activate_form_mut(&mut self) -> Option<&mut ActivateForm> {
        self.activate.params_mut()
    }

    pub fn close_activate(&mut self) {
        self.activate = DialogState::Closed;
    }

    pub async fn submit_activate(&mut self) -> bool {
        let request = match self.activate.params() {
            Some(form) => form.to_request(),
            None => Err(FormError::DialogClosed("activate")),
        };
        if self.send(request, "Broker activated", "Failed to activate broker").await {
            self.close_activate();
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
        request: Result<ClusterActionRequest, FormError>,
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
        let action = format!("broker {} {}", request.name(), request.broker_id());
        self.dispatch
            .send(CLUSTER_ACTIONS_PATH, &action, &request, success_default, failure_default)
            .await
    }
}
