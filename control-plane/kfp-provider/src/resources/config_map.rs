use std::collections::BTreeMap;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::ResourceExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{ProviderContext, ResourceHandler};
use crate::ProviderError;
use crate::schema::{MetadataBlock, build_id, parse_id};
use crate::state::ResourceState;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ConfigMapAttributes {
    #[serde(default)]
    pub metadata: MetadataBlock,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl ConfigMapAttributes {
    fn to_config_map(&self) -> ConfigMap {
        ConfigMap {
            metadata: self.metadata.expand(),
            data: (!self.data.is_empty()).then(|| self.data.clone()),
            ..Default::default()
        }
    }
}

/// `kubernetes_config_map`, identified as `<namespace>/<name>`.
pub struct ConfigMapResource;

#[async_trait]
impl ResourceHandler for ConfigMapResource {
    type Attributes = ConfigMapAttributes;

    fn type_name(&self) -> &'static str {
        "kubernetes_config_map"
    }

    #[instrument(skip_all)]
    async fn create(
        &self,
        ctx: &ProviderContext,
        state: &mut ResourceState<ConfigMapAttributes>,
    ) -> Result<(), ProviderError> {
        let mut config_map = state.attributes.to_config_map();
        let ns = config_map
            .metadata
            .namespace
            .take()
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| ctx.cfg.default_namespace.clone());
        config_map.metadata.namespace = Some(ns.clone());
        info!(%ns, metadata = ?config_map.metadata, "creating new config map");
        let out = ctx.clients.config_maps(&ns).create(&config_map).await?;
        info!(%ns, name = %out.name_any(), "submitted new config map");
        state.set_id(build_id(&ns, &out.name_any()));

        self.read(ctx, state).await
    }

    #[instrument(skip_all, fields(id = ?state.id))]
    async fn read(
        &self,
        ctx: &ProviderContext,
        state: &mut ResourceState<ConfigMapAttributes>,
    ) -> Result<(), ProviderError> {
        let (ns, name) = parse_id(state.require_id()?)?;
        info!(%ns, %name, "reading config map");
        match ctx.clients.config_maps(&ns).get(&name).await {
            Ok(config_map) => {
                debug!(?config_map, "received config map");
                state.attributes.metadata =
                    MetadataBlock::flatten(&config_map.metadata);
                state.attributes.data = config_map.data.unwrap_or_default();
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                warn!(%ns, %name, "removing config map from state (it is gone)");
                state.clear_id();
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip_all, fields(id = ?state.id))]
    async fn update(
        &self,
        ctx: &ProviderContext,
        state: &mut ResourceState<ConfigMapAttributes>,
    ) -> Result<(), ProviderError> {
        let (ns, name) = parse_id(state.require_id()?)?;
        let mut config_map = state.attributes.to_config_map();
        config_map.metadata.name = Some(name.clone());
        config_map.metadata.namespace = Some(ns.clone());
        info!(metadata = ?config_map.metadata, "updating config map");
        let out = ctx
            .clients
            .config_maps(&ns)
            .replace(&name, &config_map)
            .await?;
        info!(%ns, name = %out.name_any(), "submitted updated config map");
        state.set_id(build_id(&ns, &out.name_any()));

        self.read(ctx, state).await
    }

    #[instrument(skip_all, fields(id = ?state.id))]
    async fn delete(
        &self,
        ctx: &ProviderContext,
        state: &mut ResourceState<ConfigMapAttributes>,
    ) -> Result<(), ProviderError> {
        let (ns, name) = parse_id(state.require_id()?)?;
        info!(%ns, %name, "deleting config map");
        match ctx.clients.config_maps(&ns).delete(&name).await {
            Ok(()) => info!(%ns, %name, "config map deleted"),
            Err(e) if e.is_not_found() => {
                info!(%ns, %name, "config map already gone")
            }
            Err(e) => return Err(e.into()),
        }

        state.clear_id();
        Ok(())
    }
}
