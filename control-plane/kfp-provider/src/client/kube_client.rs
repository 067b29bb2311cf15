use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace};
use kfp_wait::ClientError;
use kube::{
    Client,
    api::{Api, DeleteParams, PostParams},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::trace;

use super::{ClientSet, ObjectClient};

/// Map a kube error onto the provider's error classes. `what` names the
/// object for the not-found message.
pub fn classify(err: kube::Error, what: &str) -> ClientError {
    match err {
        kube::Error::Api(ae) if ae.code == 404 => {
            ClientError::NotFound(what.to_string())
        }
        kube::Error::Api(ae) => ClientError::Api {
            code: ae.code,
            reason: ae.reason,
            message: ae.message,
        },
        other => ClientError::Transport(other.to_string()),
    }
}

pub struct KubeObjectClient<K> {
    api: Api<K>,
    kind: &'static str,
}

impl<K> KubeObjectClient<K> {
    pub fn new(api: Api<K>, kind: &'static str) -> Self {
        Self { api, kind }
    }

    fn describe(&self, name: &str) -> String {
        format!("{} {}", self.kind, name)
    }
}

#[async_trait]
impl<K> ObjectClient<K> for KubeObjectClient<K>
where
    K: kube::Resource
        + Clone
        + Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static,
{
    async fn get(&self, name: &str) -> Result<K, ClientError> {
        trace!(kind = self.kind, name, "get");
        self.api
            .get(name)
            .await
            .map_err(|e| classify(e, &self.describe(name)))
    }

    async fn create(&self, obj: &K) -> Result<K, ClientError> {
        let name = obj
            .meta()
            .name
            .clone()
            .or_else(|| obj.meta().generate_name.clone())
            .unwrap_or_default();
        trace!(kind = self.kind, name = %name, "create");
        self.api
            .create(&PostParams::default(), obj)
            .await
            .map_err(|e| classify(e, &self.describe(&name)))
    }

    async fn replace(&self, name: &str, obj: &K) -> Result<K, ClientError> {
        trace!(kind = self.kind, name, "replace");
        self.api
            .replace(name, &PostParams::default(), obj)
            .await
            .map_err(|e| classify(e, &self.describe(name)))
    }

    async fn delete(&self, name: &str) -> Result<(), ClientError> {
        trace!(kind = self.kind, name, "delete");
        self.api
            .delete(name, &DeleteParams::default())
            .await
            .map(|_| ())
            .map_err(|e| classify(e, &self.describe(name)))
    }
}

/// [`ClientSet`] backed by a live cluster connection.
#[derive(Clone)]
pub struct KubeClientSet {
    client: Client,
}

impl KubeClientSet {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using the ambient kubeconfig or in-cluster service account.
    pub async fn try_default() -> Result<Self, kube::Error> {
        Ok(Self::new(Client::try_default().await?))
    }
}

impl ClientSet for KubeClientSet {
    fn namespaces(&self) -> Arc<dyn ObjectClient<Namespace>> {
        Arc::new(KubeObjectClient::new(
            Api::<Namespace>::all(self.client.clone()),
            "namespace",
        ))
    }

    fn config_maps(&self, namespace: &str) -> Arc<dyn ObjectClient<ConfigMap>> {
        Arc::new(KubeObjectClient::new(
            Api::<ConfigMap>::namespaced(self.client.clone(), namespace),
            "configmap",
        ))
    }
}
