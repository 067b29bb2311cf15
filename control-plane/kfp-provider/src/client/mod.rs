//! Typed access to the Kubernetes kinds the provider manages.
//!
//! Handlers never talk to `kube::Api` directly. They receive a [`ClientSet`]
//! through the provider context and get back [`ObjectClient`]s whose errors
//! are already classified into [`ClientError`].

mod kube_client;

pub use kube_client::{KubeClientSet, KubeObjectClient, classify};

use std::sync::Arc;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace};
use kfp_wait::ClientError;

/// CRUD over one kind, scoped to a namespace when the kind is namespaced.
#[async_trait]
pub trait ObjectClient<K>: Send + Sync {
    async fn get(&self, name: &str) -> Result<K, ClientError>;

    async fn create(&self, obj: &K) -> Result<K, ClientError>;

    async fn replace(&self, name: &str, obj: &K) -> Result<K, ClientError>;

    async fn delete(&self, name: &str) -> Result<(), ClientError>;
}

pub trait ClientSet: Send + Sync {
    fn namespaces(&self) -> Arc<dyn ObjectClient<Namespace>>;

    fn config_maps(&self, namespace: &str) -> Arc<dyn ObjectClient<ConfigMap>>;
}
