use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::{ClientError, ResourceClient};

pub(crate) fn terminating() -> Result<String, ClientError> {
    Ok("Terminating".into())
}

/// Replays a fixed sequence of `get` results; the last entry repeats once the
/// script runs out.
pub(crate) struct ScriptedClient {
    script: Mutex<VecDeque<Result<String, ClientError>>>,
    delete_result: Result<(), ClientError>,
    get_latency: Option<Duration>,
    gets: AtomicU32,
    deletes: AtomicU32,
}

impl ScriptedClient {
    pub(crate) fn new(script: Vec<Result<String, ClientError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            delete_result: Ok(()),
            get_latency: None,
            gets: AtomicU32::new(0),
            deletes: AtomicU32::new(0),
        }
    }

    pub(crate) fn with_delete_result(
        mut self,
        result: Result<(), ClientError>,
    ) -> Self {
        self.delete_result = result;
        self
    }

    pub(crate) fn with_get_latency(mut self, latency: Duration) -> Self {
        self.get_latency = Some(latency);
        self
    }

    pub(crate) fn gets(&self) -> u32 {
        self.gets.load(Ordering::SeqCst)
    }

    pub(crate) fn deletes(&self) -> u32 {
        self.deletes.load(Ordering::SeqCst)
    }

    fn next(&self) -> Result<String, ClientError> {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script
                .front()
                .cloned()
                .unwrap_or_else(|| Err(ClientError::Transport("empty script".into())))
        }
    }
}

#[async_trait]
impl ResourceClient for ScriptedClient {
    type Resource = String;

    async fn get(&self, _id: &str) -> Result<String, ClientError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.get_latency {
            tokio::time::sleep(latency).await;
        }
        self.next()
    }

    async fn delete(&self, _id: &str) -> Result<(), ClientError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.delete_result.clone()
    }

    fn phase(&self, resource: &String) -> String {
        resource.clone()
    }
}
