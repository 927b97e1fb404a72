use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::actions::LikeChange;
use crate::data;
use crate::feed;
use crate::params::Params;
use crate::persisted::Post;
use crate::store::{Store, StoreBackend};
use crate::view_state::ViewState;

pub const EMPTY_LIST_NOTICE: &'static str = "No posts match your search.";
pub const EMPTY_COMMENTS_NOTICE: &'static str = "Be the first to comment.";
pub const NOT_FOUND_NOTICE: &'static str = "Post not found.";
pub const MISSING_FIELDS_NOTICE: &'static str = "Please enter your name and a comment.";
pub const COMMENT_ADDED_NOTICE: &'static str = "Comment added.";
pub const SORTED_LATEST_NOTICE: &'static str = "Sorted by latest.";
pub const SORTED_TRENDING_NOTICE: &'static str = "Sorted by trending.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    List(ListPage),
    Detail(Box<DetailPage>),
    NotFound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListPage {
    pub cards: Vec<PostCard>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub thumbnail: String,
    pub updated_label: String,
    pub likes: u64,
    pub views: u64,
    pub comments: usize,
    pub detail_hash: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailPage {
    pub id: String,
    pub title: String,
    pub author: String,
    pub created_label: String,
    pub updated_label: String,
    pub views: u64,
    pub likes: u64,
    pub liked: bool,
    // trusted markup straight from the stored post
    pub content_html: String,
    pub comments: Vec<CommentView>,
    // the route params the page was opened with, for the back button
    pub source: Params,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentView {
    pub name: String,
    pub posted_label: String,
    pub text: String,
}

pub fn list_page(store: &Store<impl StoreBackend>, view_state: &ViewState) -> ListPage {
    let ranked = feed::filter_and_rank(data::posts(store), view_state);
    let comment_map = data::comments_by_post(store);

    let cards = ranked
        .into_iter()
        .map(|post| {
            let detail_hash = view_state.detail_hash(&post.id);
            let summary = truncate(&post.summary, 120);
            let updated_label = format_date(post.updated_at);
            let comments = comment_map.get(&post.id).map(Vec::len).unwrap_or(0);
            PostCard {
                id: post.id,
                title: post.title,
                author: post.author,
                summary,
                thumbnail: post.thumbnail,
                updated_label,
                likes: post.likes,
                views: post.views,
                comments,
                detail_hash,
            }
        })
        .collect();

    ListPage { cards }
}

// the caller hands over the post actions::record_view just bumped
pub fn detail_page(store: &Store<impl StoreBackend>, post: Post, source: Params) -> DetailPage {
    let liked = data::user_likes(store)
        .get(&post.id)
        .copied()
        .unwrap_or(false);
    let comments = comment_views(store, &post.id);

    DetailPage {
        created_label: format_date(post.created_at),
        updated_label: format_date(post.updated_at),
        liked,
        comments,
        source,
        id: post.id,
        title: post.title,
        author: post.author,
        views: post.views,
        likes: post.likes,
        content_html: post.content,
    }
}

// stored order preserved
pub fn comment_views(store: &Store<impl StoreBackend>, post_id: &str) -> Vec<CommentView> {
    data::comments_by_post(store)
        .remove(post_id)
        .unwrap_or_default()
        .into_iter()
        .map(|comment| CommentView {
            posted_label: format_date(comment.created_at),
            name: comment.name,
            text: comment.text,
        })
        .collect()
}

pub fn like_label(liked: bool) -> &'static str {
    if liked {
        "\u{2764}\u{fe0f} Liked"
    } else {
        "\u{1f90d} Like"
    }
}

pub fn like_announcement(change: LikeChange) -> String {
    format!(
        "Likes {} to {}",
        if change.liked { "increased" } else { "decreased" },
        change.likes
    )
}

pub fn comment_heading(count: usize) -> String {
    format!("Comments ({})", count)
}

// e.g. "05 Aug 2025"
const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[day] [month repr:short] [year]");

fn format_date(unix_millis: u64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(unix_millis as i128 * 1_000_000)
        .ok()
        .and_then(|moment| moment.format(&DATE_FORMAT).ok())
        .unwrap_or_default()
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let mut cut: String = text.chars().take(limit - 1).collect();
        cut.push('\u{2026}');
        cut
    } else {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persisted::Comment;
    use crate::store::MemoryBackend;
    use crate::view_state::Mode;

    const AUG_05_2025: u64 = 1_754_352_000_000;

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: id.to_owned(),
            title: title.to_owned(),
            author: "Zerg".to_owned(),
            summary: "A summary".to_owned(),
            content: "<p>Body</p>".to_owned(),
            thumbnail: "thumb.svg".to_owned(),
            created_at: AUG_05_2025,
            updated_at: AUG_05_2025,
            views: 7,
            likes: 2,
        }
    }

    fn store_with(posts: &[Post]) -> Store<MemoryBackend> {
        let store = Store::new(MemoryBackend::default());
        data::set_posts(&store, posts);
        store
    }

    #[test]
    pub fn test_format_date_label() {
        assert_eq!(format_date(AUG_05_2025), "05 Aug 2025");
    }

    #[test]
    pub fn test_truncate_long_summaries() {
        let short = "a".repeat(120);
        assert_eq!(truncate(&short, 120), short);

        let long = "b".repeat(121);
        let cut = truncate(&long, 120);
        assert_eq!(cut.chars().count(), 120);
        assert!(cut.ends_with('\u{2026}'));
        assert!(cut.starts_with(&"b".repeat(119)));
    }

    #[test]
    pub fn test_list_page_cards_carry_counts_and_links() {
        let store = store_with(&[post("zerg", "Zerg Tactics"), post("joe", "Joe's Diary")]);
        let mut comment_map = data::comments_by_post(&store);
        comment_map.insert(
            "zerg".to_owned(),
            vec![Comment {
                id: "c_0000001".to_owned(),
                name: "Joe".to_owned(),
                text: "nice".to_owned(),
                created_at: AUG_05_2025,
            }],
        );
        data::set_comments_by_post(&store, &comment_map);

        let view_state = ViewState {
            mode: Mode::Latest,
            search: "zerg".to_owned(),
        };
        let page = list_page(&store, &view_state);

        assert_eq!(page.cards.len(), 1);
        let card = &page.cards[0];
        assert_eq!(card.id, "zerg");
        assert_eq!(card.comments, 1);
        assert_eq!(card.updated_label, "05 Aug 2025");
        assert_eq!(card.detail_hash, "#/post/zerg?mode=latest&search=zerg");
    }

    #[test]
    pub fn test_detail_page_reads_the_like_flag() {
        let store = store_with(&[post("zerg", "Zerg Tactics")]);
        let mut likes_map = data::user_likes(&store);
        likes_map.insert("zerg".to_owned(), true);
        data::set_user_likes(&store, &likes_map);

        let page = detail_page(&store, data::posts(&store).remove(0), Params::new());
        assert!(page.liked);
        assert_eq!(page.created_label, "05 Aug 2025");
        assert_eq!(page.content_html, "<p>Body</p>");
        assert!(page.comments.is_empty());
    }

    #[test]
    pub fn test_announcement_strings() {
        assert_eq!(
            like_announcement(LikeChange {
                likes: 57,
                liked: true
            }),
            "Likes increased to 57"
        );
        assert_eq!(
            like_announcement(LikeChange {
                likes: 56,
                liked: false
            }),
            "Likes decreased to 56"
        );
        assert_eq!(comment_heading(2), "Comments (2)");
        assert_eq!(like_label(true), "\u{2764}\u{fe0f} Liked");
    }
}
