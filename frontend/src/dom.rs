use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use ls_blog_core::actions::{self, CommentError};
use ls_blog_core::router;
use ls_blog_core::view::{self, CommentView, DetailPage, ListPage, Page, PostCard};
use ls_blog_core::view_state::{Mode, ViewState};

use crate::storage;

pub fn navigate(hash: &str) {
    web_sys::window().unwrap().location().set_hash(hash).unwrap();
}

// a page without the live region drops the message
pub fn announce(message: &str) {
    let document = web_sys::window().unwrap().document().unwrap();

    if let Some(region) = document.query_selector("#liveRegion").unwrap() {
        region.set_text_content(Some(message));
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

// the header lives in the host page, outside the render root
pub fn update_header_controls(view_state: &ViewState) {
    let document = web_sys::window().unwrap().document().unwrap();

    let latest = document.query_selector("#btn-latest").unwrap();
    let trending = document.query_selector("#btn-trending").unwrap();
    if let (Some(latest), Some(trending)) = (latest, trending) {
        latest
            .set_attribute("aria-pressed", bool_str(view_state.mode == Mode::Latest))
            .unwrap();
        trending
            .set_attribute("aria-pressed", bool_str(view_state.mode == Mode::Trending))
            .unwrap();
    }

    if let Some(input) = document.query_selector("#searchInput").unwrap() {
        let input = input.dyn_ref::<HtmlInputElement>().unwrap();
        // writing an unchanged value would move the caret
        if input.value() != view_state.search {
            input.set_value(&view_state.search);
        }
    }
}

pub fn commit(view_state: &Rc<RefCell<ViewState>>, page: Page) {
    let (document, root) = crate::document_and_root();
    root.set_inner_html("");

    match page {
        Page::List(list) => commit_list(&document, &root, view_state, list),
        Page::Detail(detail) => commit_detail(&document, &root, view_state, *detail),
        Page::NotFound => commit_not_found(&document, &root),
    }
}

fn commit_list(
    document: &Document,
    root: &Element,
    view_state: &Rc<RefCell<ViewState>>,
    page: ListPage,
) {
    let section = document.create_element("section").unwrap();
    section.set_attribute("aria-label", "Blog list").unwrap();

    if page.cards.is_empty() {
        let empty = document.create_element("div").unwrap();
        empty.set_class_name("empty");
        empty.set_text_content(Some(view::EMPTY_LIST_NOTICE));
        section.append_child(&empty).unwrap();
    } else {
        let grid = document.create_element("div").unwrap();
        grid.set_class_name("grid");
        for card in &page.cards {
            grid.append_child(&build_card(document, card)).unwrap();
        }
        section.append_child(&grid).unwrap();
    }

    root.append_child(&section).unwrap();
    update_header_controls(&view_state.borrow());
}

fn build_card(document: &Document, card: &PostCard) -> Element {
    let article = document.create_element("article").unwrap();
    article.set_class_name("card");
    article.dyn_ref::<HtmlElement>().unwrap().set_tab_index(0);
    article.set_attribute("role", "button").unwrap();
    article
        .set_attribute("aria-label", &format!("Open post {}", card.title))
        .unwrap();
    article.set_attribute("data-id", &card.id).unwrap();

    let thumb = document.create_element("div").unwrap();
    thumb.set_class_name("card-thumb");
    let image = document.create_element("img").unwrap();
    image.set_attribute("src", &card.thumbnail).unwrap();
    image
        .set_attribute("alt", &format!("Thumbnail for {}", card.title))
        .unwrap();
    thumb.append_child(&image).unwrap();
    article.append_child(&thumb).unwrap();

    let body = document.create_element("div").unwrap();
    body.set_class_name("card-body");

    let title = document.create_element("h3").unwrap();
    title.set_class_name("card-title");
    title.set_text_content(Some(&card.title));
    body.append_child(&title).unwrap();

    let summary = document.create_element("p").unwrap();
    summary.set_class_name("card-summary");
    summary.set_text_content(Some(&card.summary));
    body.append_child(&summary).unwrap();

    let meta = document.create_element("div").unwrap();
    meta.set_class_name("card-meta");
    meta.append_child(&glyph_span(document, "badge", "\u{1f464}", &card.author, None))
        .unwrap();
    meta.append_child(&glyph_span(
        document,
        "badge",
        "\u{1f5d3}\u{fe0f}",
        &format!("Updated {}", card.updated_label),
        None,
    ))
    .unwrap();
    meta.append_child(&glyph_span(
        document,
        "badge",
        "\u{2764}\u{fe0f}",
        &card.likes.to_string(),
        Some("Likes"),
    ))
    .unwrap();
    meta.append_child(&glyph_span(
        document,
        "badge",
        "\u{1f4ac}",
        &card.comments.to_string(),
        Some("Comments"),
    ))
    .unwrap();
    meta.append_child(&glyph_span(
        document,
        "badge",
        "\u{1f441}\u{fe0f}",
        &card.views.to_string(),
        Some("Views"),
    ))
    .unwrap();
    body.append_child(&meta).unwrap();

    article.append_child(&body).unwrap();

    let hash0 = card.detail_hash.clone();
    let open = Closure::<dyn FnMut()>::new(move || navigate(&hash0));
    article
        .dyn_ref::<HtmlElement>()
        .unwrap()
        .set_onclick(Some(open.as_ref().unchecked_ref()));
    open.forget();

    let hash1 = card.detail_hash.clone();
    let open_on_key = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
        move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            if key == "Enter" || key == " " {
                event.prevent_default();
                navigate(&hash1);
            }
        },
    );
    article
        .dyn_ref::<HtmlElement>()
        .unwrap()
        .set_onkeydown(Some(open_on_key.as_ref().unchecked_ref()));
    open_on_key.forget();

    article
}

fn commit_detail(
    document: &Document,
    root: &Element,
    view_state: &Rc<RefCell<ViewState>>,
    page: DetailPage,
) {
    let article = document.create_element("article").unwrap();
    article.set_class_name("detail");
    article
        .set_attribute("aria-label", "Blog post detail")
        .unwrap();

    let header = document.create_element("div").unwrap();
    header.set_class_name("detail-header");

    let title = document.create_element("h1").unwrap();
    title.set_class_name("detail-title");
    title.set_text_content(Some(&page.title));
    header.append_child(&title).unwrap();

    let meta = document.create_element("div").unwrap();
    meta.set_class_name("detail-meta");
    meta.append_child(&glyph_span(document, "", "\u{1f464}", &page.author, None))
        .unwrap();
    meta.append_child(&glyph_span(
        document,
        "",
        "\u{1f5d3}\u{fe0f}",
        &format!("Created {}", page.created_label),
        None,
    ))
    .unwrap();
    meta.append_child(&glyph_span(
        document,
        "",
        "\u{1f501}",
        &format!("Updated {}", page.updated_label),
        None,
    ))
    .unwrap();
    meta.append_child(&glyph_span(
        document,
        "",
        "\u{1f441}\u{fe0f}",
        &page.views.to_string(),
        Some("Views"),
    ))
    .unwrap();

    // likes live in their own span so the like handler can patch the
    // count without a re-render
    let likes_span = document.create_element("span").unwrap();
    likes_span.set_attribute("title", "Likes").unwrap();
    likes_span
        .append_child(&glyph(document, "\u{2764}\u{fe0f}"))
        .unwrap();
    likes_span
        .append_child(&document.create_text_node(" "))
        .unwrap();
    let like_count = document.create_element("span").unwrap();
    like_count.set_id("likeCount");
    like_count.set_class_name("like-count");
    like_count.set_text_content(Some(&page.likes.to_string()));
    likes_span.append_child(&like_count).unwrap();
    meta.append_child(&likes_span).unwrap();

    header.append_child(&meta).unwrap();

    let actions_row = document.create_element("div").unwrap();
    actions_row.set_class_name("detail-actions");

    let back_btn = document.create_element("button").unwrap();
    back_btn.set_id("backBtn");
    back_btn.set_class_name("btn");
    back_btn.set_attribute("type", "button").unwrap();
    back_btn.set_text_content(Some("\u{2190} Back"));

    let view_state0 = view_state.clone();
    let source = page.source.clone();
    let back = Closure::<dyn FnMut()>::new(move || {
        let hash = router::back_to_list(&mut view_state0.borrow_mut(), &source);
        navigate(&hash);
    });
    back_btn
        .dyn_ref::<HtmlElement>()
        .unwrap()
        .set_onclick(Some(back.as_ref().unchecked_ref()));
    back.forget();
    actions_row.append_child(&back_btn).unwrap();

    let like_btn = document.create_element("button").unwrap();
    like_btn.set_id("likeBtn");
    like_btn.set_class_name("btn like-btn");
    like_btn.set_attribute("type", "button").unwrap();
    like_btn
        .set_attribute("aria-pressed", bool_str(page.liked))
        .unwrap();
    like_btn.set_attribute("aria-label", "Toggle like").unwrap();
    like_btn.set_text_content(Some(view::like_label(page.liked)));

    let post_id0 = page.id.clone();
    let like_btn0 = like_btn.clone();
    let like_count0 = like_count.clone();
    let like = Closure::<dyn FnMut()>::new(move || {
        if let Some(change) = actions::toggle_like(&storage::store(), &post_id0) {
            like_count0.set_text_content(Some(&change.likes.to_string()));
            like_btn0
                .set_attribute("aria-pressed", bool_str(change.liked))
                .unwrap();
            like_btn0.set_text_content(Some(view::like_label(change.liked)));
            announce(&view::like_announcement(change));
        }
    });
    like_btn
        .dyn_ref::<HtmlElement>()
        .unwrap()
        .set_onclick(Some(like.as_ref().unchecked_ref()));
    like.forget();
    actions_row.append_child(&like_btn).unwrap();

    header.append_child(&actions_row).unwrap();
    article.append_child(&header).unwrap();

    let content = document.create_element("div").unwrap();
    content.set_class_name("post-content");
    // post bodies are trusted markup from the store, not user input
    content.set_inner_html(&page.content_html);
    article.append_child(&content).unwrap();

    let comments = document.create_element("section").unwrap();
    comments.set_class_name("comments");
    comments.set_attribute("aria-label", "Comments").unwrap();

    let heading = document.create_element("h2").unwrap();
    heading.set_text_content(Some(&view::comment_heading(page.comments.len())));
    comments.append_child(&heading).unwrap();

    let comment_list = document.create_element("div").unwrap();
    comment_list.set_id("commentList");
    fill_comment_list(document, &comment_list, &page.comments);
    comments.append_child(&comment_list).unwrap();

    let form = document.create_element("form").unwrap();
    form.set_id("commentForm");
    form.set_class_name("comment-form");
    form.set_attribute("novalidate", "").unwrap();

    let name_field = field_wrap(document, "nameInput", "Name");
    let name_input: HtmlInputElement = document
        .create_element("input")
        .unwrap()
        .dyn_into()
        .unwrap();
    name_input.set_id("nameInput");
    name_input.set_attribute("name", "name").unwrap();
    name_input.set_attribute("type", "text").unwrap();
    name_input.set_attribute("required", "").unwrap();
    name_input.set_attribute("autocomplete", "name").unwrap();
    name_field.append_child(&name_input).unwrap();
    form.append_child(&name_field).unwrap();

    let text_field = field_wrap(document, "textInput", "Comment");
    let text_input: HtmlTextAreaElement = document
        .create_element("textarea")
        .unwrap()
        .dyn_into()
        .unwrap();
    text_input.set_id("textInput");
    text_input.set_attribute("name", "text").unwrap();
    text_input.set_attribute("required", "").unwrap();
    text_field.append_child(&text_input).unwrap();
    form.append_child(&text_field).unwrap();

    let submit_row = document.create_element("div").unwrap();
    let submit_btn = document.create_element("button").unwrap();
    submit_btn.set_class_name("btn primary");
    submit_btn.set_attribute("type", "submit").unwrap();
    submit_btn.set_text_content(Some("Submit Comment"));
    submit_row.append_child(&submit_btn).unwrap();
    form.append_child(&submit_row).unwrap();

    let document0 = document.clone();
    let post_id1 = page.id.clone();
    let name_input0 = name_input.clone();
    let text_input0 = text_input.clone();
    let comment_list0 = comment_list.clone();
    let heading0 = heading.clone();
    let submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let name = name_input0.value();
        let text = text_input0.value();
        let store = storage::store();

        match actions::submit_comment(&store, &post_id1, &name, &text, crate::now_millis()) {
            Ok(thread) => {
                name_input0.set_value("");
                text_input0.set_value("");
                fill_comment_list(
                    &document0,
                    &comment_list0,
                    &view::comment_views(&store, &post_id1),
                );
                heading0.set_text_content(Some(&view::comment_heading(thread.len())));
                announce(view::COMMENT_ADDED_NOTICE);
            }
            Err(error) => {
                announce(view::MISSING_FIELDS_NOTICE);
                match error {
                    CommentError::EmptyName => name_input0.focus().unwrap(),
                    CommentError::EmptyText => text_input0.focus().unwrap(),
                }
            }
        }
    });
    form.dyn_ref::<HtmlElement>()
        .unwrap()
        .set_onsubmit(Some(submit.as_ref().unchecked_ref()));
    submit.forget();

    comments.append_child(&form).unwrap();
    article.append_child(&comments).unwrap();
    root.append_child(&article).unwrap();
}

fn fill_comment_list(document: &Document, list: &Element, comments: &[CommentView]) {
    list.set_inner_html("");

    if comments.is_empty() {
        let empty = document.create_element("div").unwrap();
        empty.set_class_name("empty");
        empty.set_text_content(Some(view::EMPTY_COMMENTS_NOTICE));
        list.append_child(&empty).unwrap();
        return;
    }

    for comment in comments {
        let article = document.create_element("article").unwrap();
        article.set_class_name("comment");

        let who = document.create_element("div").unwrap();
        who.set_class_name("who");
        who.set_text_content(Some(&comment.name));
        article.append_child(&who).unwrap();

        let when = document.create_element("div").unwrap();
        when.set_class_name("when");
        when.set_text_content(Some(&comment.posted_label));
        article.append_child(&when).unwrap();

        let text = document.create_element("p").unwrap();
        text.set_text_content(Some(&comment.text));
        article.append_child(&text).unwrap();

        list.append_child(&article).unwrap();
    }
}

fn commit_not_found(document: &Document, root: &Element) {
    let empty = document.create_element("div").unwrap();
    empty.set_class_name("empty");
    empty
        .append_child(&document.create_text_node(&format!("{} ", view::NOT_FOUND_NOTICE)))
        .unwrap();

    let link = document.create_element("a").unwrap();
    link.set_attribute("href", "#/").unwrap();
    link.set_text_content(Some("Go back"));
    empty.append_child(&link).unwrap();

    root.append_child(&empty).unwrap();
}

fn glyph(document: &Document, text: &str) -> Element {
    let span = document.create_element("span").unwrap();
    span.set_class_name("i");
    span.set_text_content(Some(text));
    span
}

fn glyph_span(
    document: &Document,
    class: &str,
    icon: &str,
    text: &str,
    title: Option<&str>,
) -> Element {
    let span = document.create_element("span").unwrap();
    if !class.is_empty() {
        span.set_class_name(class);
    }
    if let Some(title) = title {
        span.set_attribute("title", title).unwrap();
    }
    span.append_child(&glyph(document, icon)).unwrap();
    span.append_child(&document.create_text_node(&format!(" {}", text)))
        .unwrap();
    span
}

// the caller appends its input after the label
fn field_wrap(document: &Document, input_id: &str, label_text: &str) -> Element {
    let field = document.create_element("div").unwrap();
    field.set_class_name("field");

    let label = document.create_element("label").unwrap();
    label.set_attribute("for", input_id).unwrap();
    label
        .append_child(&document.create_text_node(&format!("{} ", label_text)))
        .unwrap();

    let marker = document.create_element("span").unwrap();
    marker.set_attribute("aria-hidden", "true").unwrap();
    marker.set_text_content(Some("*"));
    label.append_child(&marker).unwrap();

    field.append_child(&label).unwrap();
    field
}
