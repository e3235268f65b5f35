//! Search engine validation: unique ids, placeholders, default engine.

use std::collections::HashSet;

use crate::schema::{SearchMethod, TabviewConfig, SEARCH_TERMS_PLACEHOLDER};

pub(crate) fn validate_search(errors: &mut Vec<String>, config: &TabviewConfig) {
    let search = &config.search;
    let mut seen = HashSet::new();

    for engine in &search.engines {
        if engine.id.trim().is_empty() {
            errors.push("search.engines: engine id must not be empty".into());
            continue;
        }
        if !seen.insert(engine.id.as_str()) {
            errors.push(format!("search.engines: duplicate engine id '{}'", engine.id));
        }

        let has_placeholder = match engine.method {
            SearchMethod::Get => engine.url_template.contains(SEARCH_TERMS_PLACEHOLDER),
            SearchMethod::Post => engine
                .post_template
                .as_deref()
                .is_some_and(|body| body.contains(SEARCH_TERMS_PLACEHOLDER)),
        };
        if !has_placeholder {
            errors.push(format!(
                "search.engines.{}: template has no {SEARCH_TERMS_PLACEHOLDER} placeholder",
                engine.id
            ));
        }
    }

    if search.engine(&search.default_engine).is_none() {
        errors.push(format!(
            "search.default_engine = '{}' is not a defined engine",
            search.default_engine
        ));
    }
}
