use crate::persisted::{CommentsByPost, Post, UserLikes};
use crate::store::{Store, StoreBackend};

// the three storage entries; everything the app persists lives under these
pub const POSTS_KEY: &'static str = "blog.posts";
pub const COMMENTS_KEY: &'static str = "blog.comments";
pub const USER_LIKES_KEY: &'static str = "blog.userLikes";

pub fn posts(store: &Store<impl StoreBackend>) -> Vec<Post> {
    store.get_or(POSTS_KEY, Vec::new())
}

pub fn set_posts(store: &Store<impl StoreBackend>, posts: &[Post]) {
    store.set(POSTS_KEY, &posts);
}

pub fn comments_by_post(store: &Store<impl StoreBackend>) -> CommentsByPost {
    store.get_or(COMMENTS_KEY, CommentsByPost::new())
}

pub fn set_comments_by_post(store: &Store<impl StoreBackend>, map: &CommentsByPost) {
    store.set(COMMENTS_KEY, map);
}

pub fn user_likes(store: &Store<impl StoreBackend>) -> UserLikes {
    store.get_or(USER_LIKES_KEY, UserLikes::new())
}

pub fn set_user_likes(store: &Store<impl StoreBackend>, map: &UserLikes) {
    store.set(USER_LIKES_KEY, map);
}

pub fn comment_count(store: &Store<impl StoreBackend>, post_id: &str) -> usize {
    comments_by_post(store)
        .get(post_id)
        .map(Vec::len)
        .unwrap_or(0)
}
