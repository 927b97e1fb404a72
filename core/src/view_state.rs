use crate::params::{append_pair, encode_uri_component, Params};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Latest,
    Trending,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Latest => "latest",
            Mode::Trending => "trending",
        }
    }

    pub fn parse(raw: &str) -> Option<Mode> {
        match raw {
            "latest" => Some(Mode::Latest),
            "trending" => Some(Mode::Trending),
            _ => None,
        }
    }
}

// the list controls as the router carries them between routes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub mode: Mode,
    pub search: String,
}

impl Default for ViewState {
    fn default() -> ViewState {
        ViewState {
            mode: Mode::Latest,
            search: String::new(),
        }
    }
}

impl ViewState {
    // an unrecognized or absent mode keeps the previous one, while
    // search is always replaced, absent reading as empty
    pub fn apply_params(&mut self, params: &Params) {
        if let Some(mode) = params.get("mode").and_then(|raw| Mode::parse(raw)) {
            self.mode = mode;
        }
        self.search = params.get("search").cloned().unwrap_or_default();
    }

    // mode always, search only when non-empty
    pub fn query_string(&self) -> String {
        let mut query = String::new();
        append_pair(&mut query, "mode", self.mode.as_str());
        if !self.search.is_empty() {
            append_pair(&mut query, "search", &self.search);
        }
        query
    }

    pub fn list_hash(&self) -> String {
        format!("#/?{}", self.query_string())
    }

    pub fn detail_hash(&self, post_id: &str) -> String {
        format!(
            "#/post/{}?{}",
            encode_uri_component(post_id),
            self.query_string()
        )
    }
}
