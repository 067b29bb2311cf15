use std::sync::Arc;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use kfp_wait::{ClientError, ResourceClient, delete_and_wait};
use kube::ResourceExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{ProviderContext, ResourceHandler};
use crate::ProviderError;
use crate::client::ObjectClient;
use crate::schema::MetadataBlock;
use crate::state::ResourceState;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct NamespaceAttributes {
    #[serde(default)]
    pub metadata: MetadataBlock,
}

impl NamespaceAttributes {
    fn to_namespace(&self) -> Namespace {
        let mut metadata = self.metadata.expand();
        // cluster-scoped
        metadata.namespace = None;
        Namespace {
            metadata,
            ..Default::default()
        }
    }
}

/// `kubernetes_namespace`
pub struct NamespaceResource;

#[async_trait]
impl ResourceHandler for NamespaceResource {
    type Attributes = NamespaceAttributes;

    fn type_name(&self) -> &'static str {
        "kubernetes_namespace"
    }

    #[instrument(skip_all)]
    async fn create(
        &self,
        ctx: &ProviderContext,
        state: &mut ResourceState<NamespaceAttributes>,
    ) -> Result<(), ProviderError> {
        let namespace = state.attributes.to_namespace();
        info!(metadata = ?namespace.metadata, "creating new namespace");
        let out = ctx.clients.namespaces().create(&namespace).await?;
        info!(name = %out.name_any(), uid = ?out.metadata.uid, "submitted new namespace");
        state.set_id(out.name_any());

        self.read(ctx, state).await
    }

    #[instrument(skip_all, fields(id = ?state.id))]
    async fn read(
        &self,
        ctx: &ProviderContext,
        state: &mut ResourceState<NamespaceAttributes>,
    ) -> Result<(), ProviderError> {
        let name = state.require_id()?.to_string();
        info!(%name, "reading namespace");
        match ctx.clients.namespaces().get(&name).await {
            Ok(namespace) => {
                debug!(?namespace, "received namespace");
                state.attributes.metadata =
                    MetadataBlock::flatten(&namespace.metadata);
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                warn!(%name, "removing namespace from state (it is gone)");
                state.clear_id();
                Ok(())
            }
            Err(e) => {
                debug!(%name, error = ?e, "read failed");
                Err(e.into())
            }
        }
    }

    #[instrument(skip_all, fields(id = ?state.id))]
    async fn update(
        &self,
        ctx: &ProviderContext,
        state: &mut ResourceState<NamespaceAttributes>,
    ) -> Result<(), ProviderError> {
        let name = state.require_id()?.to_string();
        let mut namespace = state.attributes.to_namespace();
        // the server may have generated the name
        namespace.metadata.name = Some(name.clone());
        info!(metadata = ?namespace.metadata, "updating namespace");
        let out = ctx.clients.namespaces().replace(&name, &namespace).await?;
        info!(name = %out.name_any(), "submitted updated namespace");
        state.set_id(out.name_any());

        self.read(ctx, state).await
    }

    #[instrument(skip_all, fields(id = ?state.id))]
    async fn delete(
        &self,
        ctx: &ProviderContext,
        state: &mut ResourceState<NamespaceAttributes>,
    ) -> Result<(), ProviderError> {
        let name = state.require_id()?.to_string();
        info!(%name, "deleting namespace");
        let lifecycle = NamespaceLifecycle::new(ctx.clients.namespaces());
        let report =
            delete_and_wait(&lifecycle, &name, &ctx.cfg.namespace_wait_spec())
                .await?;
        info!(%name, polls = report.polls, elapsed = ?report.elapsed, "namespace deleted");

        state.clear_id();
        Ok(())
    }
}

/// Exposes a Namespace's `status.phase` to the deletion awaiter.
pub struct NamespaceLifecycle {
    api: Arc<dyn ObjectClient<Namespace>>,
}

impl NamespaceLifecycle {
    pub fn new(api: Arc<dyn ObjectClient<Namespace>>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ResourceClient for NamespaceLifecycle {
    type Resource = Namespace;

    async fn get(&self, id: &str) -> Result<Namespace, ClientError> {
        self.api.get(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.api.delete(id).await
    }

    fn phase(&self, resource: &Namespace) -> String {
        resource
            .status
            .as_ref()
            .and_then(|s| s.phase.clone())
            .unwrap_or_default()
    }
}
