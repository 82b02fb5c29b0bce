use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{CuraError, Result},
    model::{ForumPost, ForumReply},
};

/// Forum threads owned by one dashboard, plus per-post reply drafts.
///
/// Replies are appended in arrival order and never reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forum {
    posts: Vec<ForumPost>,
    drafts: HashMap<String, String>,
}

impl Forum {
    pub fn new(posts: Vec<ForumPost>) -> Self {
        Self {
            posts,
            drafts: HashMap::new(),
        }
    }

    pub fn posts(&self) -> &[ForumPost] {
        &self.posts
    }

    pub fn post(&self, post_id: &str) -> Option<&ForumPost> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    /// Posts nobody has answered yet.
    pub fn awaiting_reply(&self) -> impl Iterator<Item = &ForumPost> {
        self.posts.iter().filter(|post| post.replies.is_empty())
    }

    pub fn draft(&self, post_id: &str) -> &str {
        self.drafts.get(post_id).map(String::as_str).unwrap_or("")
    }

    pub fn set_draft(&mut self, post_id: &str, text: impl Into<String>) -> Result<()> {
        self.ensure_post(post_id)?;
        self.drafts.insert(post_id.to_string(), text.into());
        Ok(())
    }

    /// Append the draft for `post_id` as a reply by `author` and clear it.
    ///
    /// A blank draft is a no-op and yields `None`.
    pub fn post_reply(&mut self, post_id: &str, author: &str) -> Result<Option<ForumReply>> {
        self.ensure_post(post_id)?;
        let content = self.draft(post_id).to_string();
        if content.trim().is_empty() {
            return Ok(None);
        }

        let reply = ForumReply {
            id: format!("reply-{}", Uuid::new_v4()),
            author: author.to_string(),
            content,
        };
        if let Some(post) = self.posts.iter_mut().find(|post| post.id == post_id) {
            post.replies.push(reply.clone());
        }
        self.drafts.remove(post_id);

        info!(post_id = %post_id, reply_id = %reply.id, author = %author, "Forum reply posted");
        Ok(Some(reply))
    }

    fn ensure_post(&self, post_id: &str) -> Result<()> {
        match self.post(post_id) {
            Some(_) => Ok(()),
            None => Err(CuraError::UnknownPost(post_id.to_string())),
        }
    }
}
