//! URL record construction: path normalization and query parameter derivation.

use crate::collection::{QueryParam, Url};

const SEPARATOR: char = '/';

/// Build the [`Url`] record for `host` and `path_template`.
///
/// Empty segments (leading, trailing or doubled `/`) are dropped. Every name in
/// `query_names` becomes a disabled, empty-valued [`QueryParam`] unless the
/// name occurs anywhere in `path_template` as a substring, in which case it is
/// left out. Note that this is a plain substring test: `us` is dropped for
/// `/users`.
pub fn build_url<S: AsRef<str>>(host: &str, path_template: &str, query_names: &[S]) -> Url {
    let path: Vec<String> = path_template
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect();

    let query = query_names
        .iter()
        .filter_map(|name| {
            let name: &str = name.as_ref();
            (!path_template.contains(name)).then(|| build_query_param(name))
        })
        .collect();

    Url {
        raw: join_raw(host, &path),
        host: vec![host.to_string()],
        path,
        query,
    }
}

/// A query parameter that consuming tools show but do not send
pub fn build_query_param(key: &str) -> QueryParam {
    QueryParam {
        key: key.to_string(),
        value: String::new(),
        disabled: true,
        description: String::new(),
    }
}

// Join host and segments with exactly one separator between each part.
fn join_raw(host: &str, segments: &[String]) -> String {
    if segments.is_empty() {
        return host.to_string();
    }
    let joined = segments.join("/");
    if host.is_empty() {
        return joined;
    }
    format!("{}{}{}", host.trim_end_matches(SEPARATOR), SEPARATOR, joined)
}
