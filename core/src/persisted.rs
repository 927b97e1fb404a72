use std::collections::BTreeMap;

// timestamps throughout are unix milliseconds

#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub content: String,
    pub thumbnail: String,
    pub created_at: u64,
    pub updated_at: u64,
    pub views: u64,
    pub likes: u64,
}

#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub text: String,
    pub created_at: u64,
}

// newest comment first, insertion order is meaningful
pub type CommentsByPost = BTreeMap<String, Vec<Comment>>;

pub type UserLikes = BTreeMap<String, bool>;
