use std::{collections::HashMap, future::Future};

use tokio::sync::Mutex;

/// A trait for storing the channel that a buddy up workflow step posts its
/// pairs to.
///
/// A binding is written when the step is configured in workflow builder, and
/// read back when the step executes.
pub trait WorkflowChannelStore {
    /// Binds the specified channel to the workflow step with the specified id,
    /// overwriting any previous binding for that step.
    fn put(&self, step_id: &str, channel_id: &str) -> impl Future<Output = ()> + Send;

    /// The id of the channel bound to the workflow step with the specified id.
    fn get(&self, step_id: &str) -> impl Future<Output = Option<String>> + Send;
}

/// A `WorkflowChannelStore` that keeps bindings in process memory.
///
/// Bindings do not survive a restart, a step configured before a restart must
/// be reconfigured before it can execute again.
pub struct InMemoryWorkflowChannelStore {
    bindings: Mutex<HashMap<String, String>>,
}

impl InMemoryWorkflowChannelStore {
    pub fn new() -> Self {
        Self {
            bindings: Mutex::new(HashMap::new()),
        }
    }
}

impl WorkflowChannelStore for InMemoryWorkflowChannelStore {
    async fn put(&self, step_id: &str, channel_id: &str) {
        let mut bindings = self.bindings.lock().await;
        bindings.insert(step_id.to_string(), channel_id.to_string());
    }

    async fn get(&self, step_id: &str) -> Option<String> {
        self.bindings.lock().await.get(step_id).cloned()
    }
}
