#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, NamespaceStatus};
use kfp_provider::client::{ClientSet, ObjectClient};
use kfp_provider::config::ProviderConfig;
use kfp_provider::resources::ProviderContext;
use kfp_wait::ClientError;
use kube::Resource;
use kube::core::ObjectMeta;

// DNS-1123 safe numeric suffix for unique names
pub const DIGITS: [char; 10] =
    ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
pub fn uniq(prefix: &str) -> String {
    format!("{prefix}-{}", nanoid::nanoid!(6, &DIGITS))
}

struct Entry<K> {
    obj: K,
    // gets left before a deleted object disappears
    lingering: Option<u32>,
}

/// Object store shared by all scoped clients of one kind.
pub struct MemoryStore<K> {
    kind: &'static str,
    objects: Mutex<BTreeMap<String, Entry<K>>>,
    next_version: Mutex<u64>,
    linger_polls: u32,
    on_delete: fn(&mut K),
    injected_get_error: Mutex<Option<ClientError>>,
}

impl<K: Clone> MemoryStore<K> {
    fn new(kind: &'static str, linger_polls: u32, on_delete: fn(&mut K)) -> Self {
        Self {
            kind,
            objects: Mutex::new(BTreeMap::new()),
            next_version: Mutex::new(1),
            linger_polls,
            on_delete,
            injected_get_error: Mutex::new(None),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn get_raw(&self, key: &str) -> Option<K> {
        self.objects.lock().unwrap().get(key).map(|e| e.obj.clone())
    }

    pub fn remove_raw(&self, key: &str) {
        self.objects.lock().unwrap().remove(key);
    }

    pub fn fail_next_get(&self, err: ClientError) {
        *self.injected_get_error.lock().unwrap() = Some(err);
    }

    fn bump(&self) -> String {
        let mut v = self.next_version.lock().unwrap();
        *v += 1;
        v.to_string()
    }

    fn not_found(&self, key: &str) -> ClientError {
        ClientError::NotFound(format!("{} {}", self.kind, key))
    }
}

fn conflict(key: &str) -> ClientError {
    ClientError::Api {
        code: 409,
        reason: "AlreadyExists".into(),
        message: format!("{key} already exists"),
    }
}

/// [`ObjectClient`] view over a [`MemoryStore`], optionally namespace-scoped.
pub struct MemoryApi<K> {
    store: Arc<MemoryStore<K>>,
    scope: Option<String>,
}

impl<K> MemoryApi<K> {
    fn key(&self, name: &str) -> String {
        match &self.scope {
            Some(ns) => format!("{ns}/{name}"),
            None => name.to_string(),
        }
    }
}

#[async_trait]
impl<K> ObjectClient<K> for MemoryApi<K>
where
    K: Resource<DynamicType = ()> + Clone + Send + Sync + 'static,
{
    async fn get(&self, name: &str) -> Result<K, ClientError> {
        if let Some(err) = self.store.injected_get_error.lock().unwrap().take() {
            return Err(err);
        }
        let key = self.key(name);
        let mut objects = self.store.objects.lock().unwrap();
        let Some(entry) = objects.get_mut(&key) else {
            return Err(self.store.not_found(&key));
        };
        match entry.lingering {
            Some(0) => {
                objects.remove(&key);
                Err(self.store.not_found(&key))
            }
            Some(n) => {
                entry.lingering = Some(n - 1);
                Ok(entry.obj.clone())
            }
            None => Ok(entry.obj.clone()),
        }
    }

    async fn create(&self, obj: &K) -> Result<K, ClientError> {
        let mut obj = obj.clone();
        let version = self.store.bump();
        let meta: &mut ObjectMeta = obj.meta_mut();
        if meta.name.is_none() {
            let prefix = meta.generate_name.clone().unwrap_or_default();
            meta.name = Some(format!("{prefix}{version}"));
        }
        meta.namespace = self.scope.clone();
        meta.uid = Some(format!("uid-{version}"));
        meta.resource_version = Some(version);
        meta.generation = Some(1);
        let key = self.key(meta.name.as_deref().unwrap_or_default());

        let mut objects = self.store.objects.lock().unwrap();
        if objects.contains_key(&key) {
            return Err(conflict(&key));
        }
        objects.insert(
            key,
            Entry {
                obj: obj.clone(),
                lingering: None,
            },
        );
        Ok(obj)
    }

    async fn replace(&self, name: &str, obj: &K) -> Result<K, ClientError> {
        let key = self.key(name);
        let version = self.store.bump();
        let mut objects = self.store.objects.lock().unwrap();
        let Some(entry) = objects.get_mut(&key) else {
            return Err(self.store.not_found(&key));
        };
        let mut next = obj.clone();
        {
            let prev = entry.obj.meta();
            let meta = next.meta_mut();
            meta.name = Some(name.to_string());
            meta.namespace = self.scope.clone();
            meta.uid = prev.uid.clone();
            meta.generation = prev.generation.map(|g| g + 1);
            meta.resource_version = Some(version);
        }
        entry.obj = next.clone();
        Ok(next)
    }

    async fn delete(&self, name: &str) -> Result<(), ClientError> {
        let key = self.key(name);
        let mut objects = self.store.objects.lock().unwrap();
        if !objects.contains_key(&key) {
            return Err(self.store.not_found(&key));
        }
        if self.store.linger_polls == 0 {
            objects.remove(&key);
            return Ok(());
        }
        if let Some(entry) = objects.get_mut(&key) {
            (self.store.on_delete)(&mut entry.obj);
            if entry.lingering.is_none() {
                entry.lingering = Some(self.store.linger_polls);
            }
        }
        Ok(())
    }
}

fn mark_terminating(ns: &mut Namespace) {
    ns.status = Some(NamespaceStatus {
        phase: Some("Terminating".into()),
        ..Default::default()
    });
}

fn mark_active(ns: &mut Namespace) {
    if ns.status.is_none() {
        ns.status = Some(NamespaceStatus {
            phase: Some("Active".into()),
            ..Default::default()
        });
    }
}

fn no_op(_: &mut ConfigMap) {}

/// In-memory cluster. Deleted namespaces stay `Terminating` for a number of
/// reads before they vanish; config maps vanish immediately.
pub struct MemoryCluster {
    pub namespaces: Arc<MemoryStore<Namespace>>,
    pub config_maps: Arc<MemoryStore<ConfigMap>>,
}

impl MemoryCluster {
    pub fn new(namespace_linger_polls: u32) -> Arc<Self> {
        Arc::new(Self {
            namespaces: Arc::new(MemoryStore::new(
                "namespace",
                namespace_linger_polls,
                mark_terminating,
            )),
            config_maps: Arc::new(MemoryStore::new("configmap", 0, no_op)),
        })
    }
}

/// Wraps namespace creation so stored namespaces report `Active`.
struct ActiveNamespaces(MemoryApi<Namespace>);

#[async_trait]
impl ObjectClient<Namespace> for ActiveNamespaces {
    async fn get(&self, name: &str) -> Result<Namespace, ClientError> {
        self.0.get(name).await
    }

    async fn create(&self, obj: &Namespace) -> Result<Namespace, ClientError> {
        let mut obj = obj.clone();
        mark_active(&mut obj);
        self.0.create(&obj).await
    }

    async fn replace(
        &self,
        name: &str,
        obj: &Namespace,
    ) -> Result<Namespace, ClientError> {
        let mut obj = obj.clone();
        mark_active(&mut obj);
        self.0.replace(name, &obj).await
    }

    async fn delete(&self, name: &str) -> Result<(), ClientError> {
        self.0.delete(name).await
    }
}

impl ClientSet for MemoryCluster {
    fn namespaces(&self) -> Arc<dyn ObjectClient<Namespace>> {
        Arc::new(ActiveNamespaces(MemoryApi {
            store: self.namespaces.clone(),
            scope: None,
        }))
    }

    fn config_maps(&self, namespace: &str) -> Arc<dyn ObjectClient<ConfigMap>> {
        Arc::new(MemoryApi {
            store: self.config_maps.clone(),
            scope: Some(namespace.to_string()),
        })
    }
}

pub fn test_config() -> ProviderConfig {
    ProviderConfig {
        default_namespace: "default".into(),
        namespace_delete_timeout_secs: 10,
        delete_poll_interval_ms: 1000,
    }
}

pub fn context(cluster: Arc<MemoryCluster>) -> ProviderContext {
    ProviderContext::new(cluster, test_config())
}

pub const POLL: Duration = Duration::from_millis(1000);
