use crate::ProviderError;

/// Id of a namespaced object: `<namespace>/<name>`.
pub fn build_id(namespace: &str, name: &str) -> String {
    format!("{}/{}", namespace, name)
}

pub fn parse_id(id: &str) -> Result<(String, String), ProviderError> {
    match id.split_once('/') {
        Some((ns, name))
            if !ns.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok((ns.to_string(), name.to_string()))
        }
        _ => Err(ProviderError::InvalidId(id.to_string())),
    }
}
