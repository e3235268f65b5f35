//! Search engine query resolution.

use tabview_config::schema::{SearchEngineConfig, SearchMethod, SEARCH_TERMS_PLACEHOLDER};

use crate::engine::{NavigationKind, NavigationRequest, RequestMethod};

/// Build the navigation for `query` on `engine`.
///
/// GET engines carry the url-encoded query in the url; POST engines carry
/// it in a form body built from the engine's post template.
pub fn resolve(engine: &SearchEngineConfig, query: &str, zoom: u32) -> NavigationRequest {
    let terms = urlencoding::encode(query);
    let url = engine.url_template.replace(SEARCH_TERMS_PLACEHOLDER, &terms);

    match engine.method {
        SearchMethod::Get => NavigationRequest::get(url, zoom, NavigationKind::Other),
        SearchMethod::Post => {
            let body = engine
                .post_template
                .as_deref()
                .unwrap_or_default()
                .replace(SEARCH_TERMS_PLACEHOLDER, &terms);
            NavigationRequest {
                method: RequestMethod::Post,
                body: Some(body.into_bytes()),
                ..NavigationRequest::get(url, zoom, NavigationKind::FormSubmit)
            }
        }
    }
}
