extern crate console_error_panic_hook;
extern crate wasm_bindgen_test;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

pub mod dom;
pub mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use ls_blog_core::router::{self, Outcome};
use ls_blog_core::seed;
use ls_blog_core::view;
use ls_blog_core::view_state::{Mode, ViewState};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(contents: &str);
}

pub fn document_and_root() -> (Document, Element) {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let root = document.query_selector("#app").unwrap().unwrap();

    (document, root)
}

pub fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

pub fn current_hash() -> String {
    web_sys::window().unwrap().location().hash().unwrap()
}

// routes whatever hash the address bar currently holds
pub fn route_current(view_state: &Rc<RefCell<ViewState>>) {
    let hash = current_hash();
    let outcome = {
        let mut live = view_state.borrow_mut();
        router::handle_hash(&storage::store(), &mut live, &hash)
    };
    // header state follows every route, not just list renders
    dom::update_header_controls(&view_state.borrow());

    match outcome {
        Outcome::Render(page) => dom::commit(view_state, page),
        Outcome::Redirect(hash) => dom::navigate(&hash),
    }
}

fn render_list_now(view_state: &Rc<RefCell<ViewState>>) {
    let page = view::list_page(&storage::store(), &view_state.borrow());
    dom::commit(view_state, view::Page::List(page));
}

// each control writes the hash for history, then renders straight away
// rather than waiting for the hashchange event to come back around
pub fn bind_header_controls(view_state: &Rc<RefCell<ViewState>>) {
    let document = web_sys::window().unwrap().document().unwrap();

    if let Some(latest_btn) = document.query_selector("#btn-latest").unwrap() {
        let view_state0 = view_state.clone();
        let on_latest = Closure::<dyn FnMut()>::new(move || {
            let hash = {
                let mut live = view_state0.borrow_mut();
                live.mode = Mode::Latest;
                live.list_hash()
            };
            dom::navigate(&hash);
            render_list_now(&view_state0);
            dom::announce(view::SORTED_LATEST_NOTICE);
        });
        latest_btn
            .dyn_ref::<HtmlElement>()
            .unwrap()
            .set_onclick(Some(on_latest.as_ref().unchecked_ref()));
        on_latest.forget();
    }

    if let Some(trending_btn) = document.query_selector("#btn-trending").unwrap() {
        let view_state1 = view_state.clone();
        let on_trending = Closure::<dyn FnMut()>::new(move || {
            let hash = {
                let mut live = view_state1.borrow_mut();
                live.mode = Mode::Trending;
                live.list_hash()
            };
            dom::navigate(&hash);
            render_list_now(&view_state1);
            dom::announce(view::SORTED_TRENDING_NOTICE);
        });
        trending_btn
            .dyn_ref::<HtmlElement>()
            .unwrap()
            .set_onclick(Some(on_trending.as_ref().unchecked_ref()));
        on_trending.forget();
    }

    if let Some(search_input) = document.query_selector("#searchInput").unwrap() {
        let input = search_input.dyn_ref::<HtmlInputElement>().unwrap().clone();
        let view_state2 = view_state.clone();
        let on_search = Closure::<dyn FnMut()>::new(move || {
            let hash = {
                let mut live = view_state2.borrow_mut();
                live.search = input.value();
                live.list_hash()
            };
            dom::navigate(&hash);
            // the hash just written is a list route, so this renders,
            // but only after the address bar has actually settled on it
            let hash_now = current_hash();
            if router::parse_hash(&hash_now).segments.is_empty() {
                render_list_now(&view_state2);
            }
        });
        search_input
            .dyn_ref::<HtmlElement>()
            .unwrap()
            .set_oninput(Some(on_search.as_ref().unchecked_ref()));
        on_search.forget();
    }
}

pub fn subscribe_to_hash_changes(view_state: &Rc<RefCell<ViewState>>) {
    let view_state0 = view_state.clone();
    let on_hash_change = Closure::<dyn FnMut()>::new(move || {
        route_current(&view_state0);
    });
    web_sys::window()
        .unwrap()
        .set_onhashchange(Some(on_hash_change.as_ref().unchecked_ref()));
    on_hash_change.forget();
}

#[wasm_bindgen]
pub fn bootstrap() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    seed::ensure_seed(&storage::store(), now_millis());
    log(&format!("booting with hash {:?}", current_hash()));

    let view_state = Rc::new(RefCell::new(ViewState::default()));
    bind_header_controls(&view_state);
    subscribe_to_hash_changes(&view_state);
    route_current(&view_state);
}
