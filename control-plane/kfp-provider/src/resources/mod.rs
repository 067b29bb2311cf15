mod config_map;
mod namespace;

pub use config_map::{ConfigMapAttributes, ConfigMapResource};
pub use namespace::{NamespaceAttributes, NamespaceLifecycle, NamespaceResource};

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use envconfig::Envconfig;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::ProviderError;
use crate::client::{ClientSet, KubeClientSet};
use crate::config::ProviderConfig;
use crate::state::ResourceState;

/// Everything a handler needs, passed explicitly on every call.
#[derive(Clone)]
pub struct ProviderContext {
    pub clients: Arc<dyn ClientSet>,
    pub cfg: ProviderConfig,
}

impl ProviderContext {
    pub fn new(clients: Arc<dyn ClientSet>, cfg: ProviderConfig) -> Self {
        Self { clients, cfg }
    }

    pub async fn from_env() -> Result<Self, ProviderError> {
        let cfg = ProviderConfig::init_from_env()?;
        debug!(?cfg, "provider configuration loaded");
        let clients = KubeClientSet::try_default().await?;
        Ok(Self::new(Arc::new(clients), cfg))
    }
}

/// CRUD callbacks for one resource type, invoked by the host framework.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    type Attributes: Serialize + DeserializeOwned + Default + Debug + Send + Sync;

    fn type_name(&self) -> &'static str;

    async fn create(
        &self,
        ctx: &ProviderContext,
        state: &mut ResourceState<Self::Attributes>,
    ) -> Result<(), ProviderError>;

    /// Refresh `state` from the cluster. A vanished object clears the id
    /// instead of failing.
    async fn read(
        &self,
        ctx: &ProviderContext,
        state: &mut ResourceState<Self::Attributes>,
    ) -> Result<(), ProviderError>;

    async fn update(
        &self,
        ctx: &ProviderContext,
        state: &mut ResourceState<Self::Attributes>,
    ) -> Result<(), ProviderError>;

    async fn delete(
        &self,
        ctx: &ProviderContext,
        state: &mut ResourceState<Self::Attributes>,
    ) -> Result<(), ProviderError>;

    async fn import(
        &self,
        ctx: &ProviderContext,
        id: &str,
    ) -> Result<ResourceState<Self::Attributes>, ProviderError> {
        let mut state = ResourceState::imported(id);
        self.read(ctx, &mut state).await?;
        Ok(state)
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

/// Type-erased handler operating on JSON state records.
#[async_trait]
pub trait DynResource: Send + Sync {
    fn type_name(&self) -> &'static str;

    async fn execute(
        &self,
        ctx: &ProviderContext,
        op: Operation,
        record: Value,
    ) -> Result<Value, ProviderError>;
}

#[async_trait]
impl<H> DynResource for H
where
    H: ResourceHandler,
{
    fn type_name(&self) -> &'static str {
        ResourceHandler::type_name(self)
    }

    async fn execute(
        &self,
        ctx: &ProviderContext,
        op: Operation,
        record: Value,
    ) -> Result<Value, ProviderError> {
        let mut state: ResourceState<H::Attributes> =
            serde_json::from_value(record)?;
        match op {
            Operation::Create => self.create(ctx, &mut state).await?,
            Operation::Read => self.read(ctx, &mut state).await?,
            Operation::Update => self.update(ctx, &mut state).await?,
            Operation::Delete => self.delete(ctx, &mut state).await?,
            Operation::Import => {
                let id = state.require_id()?.to_string();
                state = self.import(ctx, &id).await?;
            }
        }
        Ok(serde_json::to_value(&state)?)
    }
}

/// Registry of the resource types this provider serves.
pub struct Provider {
    resources: BTreeMap<&'static str, Arc<dyn DynResource>>,
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider {
    pub fn new() -> Self {
        let mut provider = Self {
            resources: BTreeMap::new(),
        };
        provider.register(NamespaceResource);
        provider.register(ConfigMapResource);
        provider
    }

    pub fn register<R: DynResource + 'static>(&mut self, resource: R) {
        self.resources.insert(resource.type_name(), Arc::new(resource));
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn resource(
        &self,
        type_name: &str,
    ) -> Result<Arc<dyn DynResource>, ProviderError> {
        self.resources
            .get(type_name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownResourceType(type_name.into()))
    }

    #[instrument(level = "debug", skip(self, ctx, record))]
    pub async fn execute(
        &self,
        ctx: &ProviderContext,
        type_name: &str,
        op: Operation,
        record: Value,
    ) -> Result<Value, ProviderError> {
        self.resource(type_name)?.execute(ctx, op, record).await
    }
}
