// file: src/client/endpoint.rs
// description: endpoint scheme normalization and OData resource paths
// reference: bind-time url handling for the typed clients

/// Prepends `https://` unless the endpoint already carries an http(s) scheme.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    if has_http_scheme(endpoint) {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    }
}

fn has_http_scheme(endpoint: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        endpoint
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Joins a normalized endpoint and a path that starts with `/`.
pub(crate) fn join(endpoint: &str, path: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), path)
}

/// `/indexes('name')`, with single quotes doubled per OData key syntax.
pub(crate) fn index_path(index_name: &str) -> String {
    format!("/indexes('{}')", index_name.replace('\'', "''"))
}
