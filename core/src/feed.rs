use std::cmp::Ordering;

use crate::persisted::Post;
use crate::view_state::{Mode, ViewState};

// likes desc, then views desc, then updated_at desc
fn trending_order(a: &Post, b: &Post) -> Ordering {
    b.likes
        .cmp(&a.likes)
        .then(b.views.cmp(&a.views))
        .then(b.updated_at.cmp(&a.updated_at))
}

fn latest_order(a: &Post, b: &Post) -> Ordering {
    b.updated_at.cmp(&a.updated_at)
}

fn apply_search_filter(posts: Vec<Post>, search: &str) -> Vec<Post> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return posts;
    }
    posts
        .into_iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post.author.to_lowercase().contains(&needle)
        })
        .collect()
}

// filter first, then stable-sort, so equally ranked posts keep their
// stored order
pub fn filter_and_rank(posts: Vec<Post>, view_state: &ViewState) -> Vec<Post> {
    let mut posts = apply_search_filter(posts, &view_state.search);
    let order: fn(&Post, &Post) -> Ordering = match view_state.mode {
        Mode::Trending => trending_order,
        Mode::Latest => latest_order,
    };
    posts.sort_by(order);
    posts
}
