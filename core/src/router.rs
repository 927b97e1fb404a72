use log::debug;

use crate::actions;
use crate::params::{decode_uri_component, parse_query, Params};
use crate::store::{Store, StoreBackend};
use crate::view::{self, Page};
use crate::view_state::{Mode, ViewState};

// what the embedding layer does after a navigation event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Render(Page),
    Redirect(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedHash<'a> {
    pub segments: Vec<&'a str>,
    pub params: Params,
}

// the query is the text between the first and second ?, anything after
// a second ? is dropped; segments stay percent-encoded here
pub fn parse_hash(raw: &str) -> ParsedHash<'_> {
    let hash = if raw.is_empty() { "#/" } else { raw };

    let mut parts = hash.split('?');
    let path = parts.next().unwrap_or("");
    let query = parts.next().unwrap_or("");

    let route = path.strip_prefix('#').unwrap_or(path);
    let segments = route.split('/').filter(|part| !part.is_empty()).collect();

    ParsedHash {
        segments,
        params: parse_query(query),
    }
}

// params fold into the view state before dispatch, so deep links and
// redirects both carry mode and search; entering a detail page counts
// a view every time, re-entries included
pub fn handle_hash(
    store: &Store<impl StoreBackend>,
    view_state: &mut ViewState,
    raw_hash: &str,
) -> Outcome {
    let parsed = parse_hash(raw_hash);
    view_state.apply_params(&parsed.params);
    debug!("routing {:?} as {:?}", raw_hash, parsed.segments);

    match parsed.segments.as_slice() {
        [] => Outcome::Render(Page::List(view::list_page(store, view_state))),
        ["post", id, ..] => {
            let post_id = decode_uri_component(id);
            match actions::record_view(store, &post_id) {
                Some(post) => Outcome::Render(Page::Detail(Box::new(view::detail_page(
                    store,
                    post,
                    parsed.params,
                )))),
                None => Outcome::Render(Page::NotFound),
            }
        }
        _ => Outcome::Redirect(view_state.list_hash()),
    }
}

// source params from the opening link win, live state fills in anything
// absent or empty; returns the list hash to navigate to
pub fn back_to_list(view_state: &mut ViewState, source: &Params) -> String {
    if let Some(mode) = source.get("mode").and_then(|raw| Mode::parse(raw)) {
        view_state.mode = mode;
    }
    if let Some(search) = source.get("search").filter(|raw| !raw.is_empty()) {
        view_state.search = search.clone();
    }
    view_state.list_hash()
}
