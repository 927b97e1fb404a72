use crate::data;
use crate::persisted::{Comment, Post};
use crate::store::{Store, StoreBackend};

use log::debug;

// carried back to the page for the in-place counter and button updates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LikeChange {
    pub likes: u64,
    pub liked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentError {
    EmptyName,
    EmptyText,
}

// unknown ids leave storage untouched
pub fn record_view(store: &Store<impl StoreBackend>, post_id: &str) -> Option<Post> {
    let mut posts = data::posts(store);
    let index = posts.iter().position(|post| post.id == post_id)?;
    posts[index].views += 1;
    data::set_posts(store, &posts);
    Some(posts[index].clone())
}

// unliking never takes the counter below zero
pub fn toggle_like(store: &Store<impl StoreBackend>, post_id: &str) -> Option<LikeChange> {
    let mut posts = data::posts(store);
    let index = posts.iter().position(|post| post.id == post_id)?;

    let mut likes_map = data::user_likes(store);
    let was_liked = likes_map.get(post_id).copied().unwrap_or(false);
    // unliked posts keep an explicit false entry
    likes_map.insert(post_id.to_owned(), !was_liked);

    let post = &mut posts[index];
    if was_liked {
        post.likes = post.likes.saturating_sub(1);
    } else {
        post.likes += 1;
    }
    let likes = post.likes;

    // flag map first, then posts
    data::set_user_likes(store, &likes_map);
    data::set_posts(store, &posts);

    Some(LikeChange {
        likes,
        liked: !was_liked,
    })
}

// newest first; the post itself is never consulted, so threads can
// outlive their post
pub fn submit_comment(
    store: &Store<impl StoreBackend>,
    post_id: &str,
    name: &str,
    text: &str,
    now: u64,
) -> Result<Vec<Comment>, CommentError> {
    let name = name.trim();
    let text = text.trim();
    if name.is_empty() {
        return Err(CommentError::EmptyName);
    }
    if text.is_empty() {
        return Err(CommentError::EmptyText);
    }

    let mut comments = data::comments_by_post(store);
    let thread = comments.entry(post_id.to_owned()).or_default();
    thread.insert(
        0,
        Comment {
            id: comment_id(),
            name: name.to_owned(),
            text: text.to_owned(),
            created_at: now,
        },
    );
    let updated = thread.clone();
    data::set_comments_by_post(store, &comments);

    Ok(updated)
}

const ID_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// seven base36 digits, like c_k3j9x2p
fn comment_id() -> String {
    let mut bytes = [0u8; 7];
    // entropy failure degrades to a fixed suffix
    if let Err(err) = getrandom::getrandom(&mut bytes) {
        debug!("no entropy for comment id, using zeroes: {}", err);
    }

    let mut id = String::from("c_");
    for byte in bytes {
        id.push(ID_DIGITS[(byte % 36) as usize] as char);
    }
    id
}
