use url::Url;

use crate::SinopiaClientError;

/// Derives the `//host[:port]/path` prefix npm uses to scope per-registry
/// settings such as `_authToken`.
///
/// The URL is parsed only to reject malformed registries. The key itself is
/// sliced from the registry string as written, so the host keeps its case,
/// an explicit port stays even when it's the scheme default, and the path
/// is not normalized. Userinfo, query, and fragment are dropped. A registry
/// with no path at all, like `https://registry.example.com:4873`, scopes to
/// `//registry.example.com:4873` with no trailing slash.
pub fn scope_key(registry: &str) -> Result<String, SinopiaClientError> {
    let url = Url::parse(registry)
        .map_err(|e| SinopiaClientError::UrlParseError(registry.to_owned(), e))?;
    if url.host_str().is_none() {
        return Err(SinopiaClientError::MissingHost(registry.to_owned()));
    }

    let raw = registry.trim();
    let rest = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let authority_end = rest
        .find(|c| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    let netloc = authority
        .rsplit_once('@')
        .map_or(authority, |(_, netloc)| netloc);
    let path_end = rest[authority_end..]
        .find(|c| matches!(c, '?' | '#'))
        .map_or(rest.len(), |idx| authority_end + idx);
    let path = &rest[authority_end..path_end];
    Ok(format!("//{netloc}{path}"))
}
