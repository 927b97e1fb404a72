use log::debug;

use crate::data;
use crate::persisted::{Comment, CommentsByPost, Post, UserLikes};
use crate::store::{Store, StoreBackend};

const DAY_MILLIS: u64 = 86_400_000;

// each collection seeds independently, and only when its storage entry
// is absent or unreadable
pub fn ensure_seed(store: &Store<impl StoreBackend>, now: u64) {
    if store
        .get_or::<Option<Vec<Post>>>(data::POSTS_KEY, None)
        .is_none()
    {
        let posts = seed_posts(now);
        debug!("seeding {} posts", posts.len());
        data::set_posts(store, &posts);
    }
    if store
        .get_or::<Option<CommentsByPost>>(data::COMMENTS_KEY, None)
        .is_none()
    {
        data::set_comments_by_post(store, &seed_comments(now));
    }
    if store
        .get_or::<Option<UserLikes>>(data::USER_LIKES_KEY, None)
        .is_none()
    {
        data::set_user_likes(store, &UserLikes::new());
    }
}

fn days_ago(now: u64, days: u64) -> u64 {
    now.saturating_sub(days * DAY_MILLIS)
}

fn thumbnail(id: &str) -> String {
    format!("https://picsum.photos/seed/{}/640/360", id)
}

fn seed_posts(now: u64) -> Vec<Post> {
    vec![
        Post {
            id: "nebula-notes".to_owned(),
            title: "Nebula Notes: Why Starry Nights Inspire Builders".to_owned(),
            author: "A. Patel".to_owned(),
            summary: "From backyard tinkering to breakthrough products, stargazing habits \
                      sneak into how we structure ideas, explore uncertainty, and ship with \
                      wonder."
                .to_owned(),
            content: r#"<h2>Notes from a Cold, Clear Night</h2>
<p>Ever noticed how ideas arrive like constellations: scattered dots, then suddenly a pattern? We can design for that.</p>
<ul>
  <li>Capture sparks fast.</li>
  <li>Connect them later.</li>
  <li>Share early, iterate often.</li>
</ul>
<pre><code>// "Ship small, shine often"
function sketch(){ return ["dot","dot","line"]; }</code></pre>
<p><img src="https://picsum.photos/seed/nebula-notes/640/360" alt="Starry placeholder image"></p>"#
                .to_owned(),
            thumbnail: thumbnail("nebula-notes"),
            created_at: days_ago(now, 24),
            updated_at: days_ago(now, 21),
            views: 132,
            likes: 18,
        },
        Post {
            id: "biogas-101".to_owned(),
            title: "Biogas 101: Turning Waste Into Watts".to_owned(),
            author: "RenewaTech".to_owned(),
            summary: "Biogas closes the loop between waste and energy. Here\u{2019}s how \
                      feedstock, digester design, and policy make or break real projects in \
                      India."
                .to_owned(),
            content: r#"<h2>From Dung to Data</h2>
<p>Biogas is a system, not a silo: feedstock logistics, digester geometry, gas clean-up, and end-use demand.</p>
<p><strong>Pro tip:</strong> Design for variability; feedstock isn't a constant.</p>
<ul>
  <li>Feedstock mix matters.</li>
  <li>Instrumentation reduces downtime.</li>
  <li>Policy unlocks scale.</li>
</ul>
<p><img src="https://picsum.photos/seed/biogas-101/640/360" alt="Biogas placeholder image"></p>"#
                .to_owned(),
            thumbnail: thumbnail("biogas-101"),
            created_at: days_ago(now, 30),
            updated_at: days_ago(now, 11),
            views: 420,
            likes: 56,
        },
        Post {
            id: "angular-forms".to_owned(),
            title: "Tiny Patterns for Better Forms".to_owned(),
            author: "DevStruggleSaga".to_owned(),
            summary: "Micro-interactions reduce friction: inline validation, keyboard-first \
                      flows, and resilient UI states for offline and slow networks."
                .to_owned(),
            content: r#"<h2>Form Finesse</h2>
<p>Start with the "happy path", then make it bulletproof: latency, loss, and user error.</p>
<pre><code>const valid = (v) => !!v?.trim();
if(!valid(name)) show("Name required");</code></pre>
<p><img src="https://picsum.photos/seed/angular-forms/640/360" alt="UI form placeholder"></p>"#
                .to_owned(),
            thumbnail: thumbnail("angular-forms"),
            created_at: days_ago(now, 18),
            updated_at: days_ago(now, 9),
            views: 201,
            likes: 33,
        },
        Post {
            id: "solar-dusk".to_owned(),
            title: "At Dusk with Solar: Lessons After Sunset".to_owned(),
            author: "SustainaPower".to_owned(),
            summary: "Storage sizing, demand shifting, and O&M discipline decide whether \
                      solar keeps promises beyond the golden hour."
                .to_owned(),
            content: r#"<h2>When the Sun Goes Home</h2>
<p>Storage is not a logo; it’s math. Start with load profiles, not marketing PDFs.</p>
<ul>
  <li>Audit real loads.</li>
  <li>Plan for seasonality.</li>
  <li>Monitor, then optimize.</li>
</ul>
<p><img src="https://picsum.photos/seed/solar-dusk/640/360" alt="Solar at dusk placeholder"></p>"#
                .to_owned(),
            thumbnail: thumbnail("solar-dusk"),
            created_at: days_ago(now, 15),
            updated_at: days_ago(now, 7),
            views: 158,
            likes: 22,
        },
        Post {
            id: "clean-apis".to_owned(),
            title: "Clean APIs in Messy Reality".to_owned(),
            author: "Raviesha Tech".to_owned(),
            summary: "Boundaries are kindness. Learn to say \"no\" with types, timeouts, and \
                      tests when every integration is a little chaotic."
                .to_owned(),
            content: r#"<h2>Interfaces as Promises</h2>
<p>APIs should degrade gracefully. Timeouts are features. Idempotency saves weekends.</p>
<pre><code>POST /v1/orders (idempotency-key: 123)
200 OK {orderId:"..."} // safe to retry</code></pre>"#
                .to_owned(),
            thumbnail: thumbnail("clean-apis"),
            created_at: days_ago(now, 10),
            updated_at: days_ago(now, 5),
            views: 305,
            likes: 47,
        },
        Post {
            id: "ship-small".to_owned(),
            title: "Ship Small, Learn Fast".to_owned(),
            author: "Abhijeet Patil".to_owned(),
            summary: "Reduce batch size to increase truth. Shorter cycles surface what users \
                      value and what you should delete."
                .to_owned(),
            content: r#"<h2>Speed is a Teacher</h2>
<p>Small releases are honest. They reveal rough edges while stakes are low.</p>
<p><img src="https://picsum.photos/seed/ship-small/640/360" alt="Minimalist placeholder image"></p>"#
                .to_owned(),
            thumbnail: thumbnail("ship-small"),
            created_at: days_ago(now, 6),
            updated_at: days_ago(now, 2),
            views: 96,
            likes: 14,
        },
    ]
}

fn seed_comments(now: u64) -> CommentsByPost {
    let mut comments = CommentsByPost::new();
    comments.insert(
        "biogas-101".to_owned(),
        vec![Comment {
            id: "c1".to_owned(),
            name: "Priya".to_owned(),
            text: "Super practical overview!".to_owned(),
            created_at: now,
        }],
    );
    comments.insert(
        "clean-apis".to_owned(),
        vec![Comment {
            id: "c2".to_owned(),
            name: "Kunal".to_owned(),
            text: "That idempotency example saved me once.".to_owned(),
            created_at: now,
        }],
    );
    comments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    const NOW: u64 = 1_754_352_000_000;

    #[test]
    pub fn test_seeds_an_empty_store() {
        let store = Store::new(MemoryBackend::default());
        ensure_seed(&store, NOW);

        let posts = data::posts(&store);
        assert_eq!(posts.len(), 6);
        assert_eq!(posts[0].id, "nebula-notes");

        let biogas = posts.iter().find(|post| post.id == "biogas-101").unwrap();
        assert_eq!(biogas.views, 420);
        assert_eq!(biogas.likes, 56);
        assert_eq!(biogas.created_at, NOW - 30 * DAY_MILLIS);
        assert_eq!(biogas.updated_at, NOW - 11 * DAY_MILLIS);

        assert_eq!(data::comment_count(&store, "biogas-101"), 1);
        assert_eq!(data::comment_count(&store, "clean-apis"), 1);
        assert!(data::user_likes(&store).is_empty());
    }

    #[test]
    pub fn test_seeding_twice_changes_nothing() {
        let store = Store::new(MemoryBackend::default());
        ensure_seed(&store, NOW);

        let before = data::posts(&store);
        ensure_seed(&store, NOW + 5 * DAY_MILLIS);
        assert_eq!(data::posts(&store), before);

        let comments = data::comments_by_post(&store);
        assert_eq!(comments["biogas-101"][0].created_at, NOW);
    }

    #[test]
    pub fn test_collections_seed_independently() {
        let store = Store::new(MemoryBackend::default());
        let mine = vec![seed_posts(NOW).remove(0)];
        data::set_posts(&store, &mine);

        ensure_seed(&store, NOW);

        // the existing posts entry is left alone, the others fill in
        assert_eq!(data::posts(&store).len(), 1);
        assert_eq!(data::comment_count(&store, "biogas-101"), 1);
        assert!(data::user_likes(&store).is_empty());
    }

    #[test]
    pub fn test_corrupt_entries_reseed() {
        let store = Store::new(MemoryBackend::default());
        store.set(data::POSTS_KEY, &"not an array");
        ensure_seed(&store, NOW);
        assert_eq!(data::posts(&store).len(), 6);
    }
}
