//! Discussion forum records

use fairway_util::{PostId, ReplyId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A reply to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: ReplyId,
    /// Display author
    pub name: String,
    pub message: String,
    /// Creation instant, milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Flagged for moderation; reported content can no longer be edited
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reported: bool,
}

/// A top-level discussion post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub name: String,
    pub message: String,
    pub timestamp: i64,
    /// Newest first
    #[serde(default)]
    pub replies: Vec<Reply>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reported: bool,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub unlikes: u32,
}

impl Post {
    pub fn reply(&self, reply_id: &ReplyId) -> Option<&Reply> {
        self.replies.iter().find(|r| &r.id == reply_id)
    }

    pub fn reply_mut(&mut self, reply_id: &ReplyId) -> Option<&mut Reply> {
        self.replies.iter_mut().find(|r| &r.id == reply_id)
    }
}

/// Addresses a post or one of its replies
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentRef {
    Post(PostId),
    Reply { post_id: PostId, reply_id: ReplyId },
}

impl ContentRef {
    pub fn post_id(&self) -> &PostId {
        match self {
            ContentRef::Post(post_id) => post_id,
            ContentRef::Reply { post_id, .. } => post_id,
        }
    }
}

/// A viewer's current vote on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteState {
    Liked,
    Unliked,
    Neutral,
}

/// Which posts the local viewer has liked or unliked.
///
/// A post id is in at most one of the two sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    #[serde(default)]
    pub liked_posts: BTreeSet<PostId>,
    #[serde(default)]
    pub unliked_posts: BTreeSet<PostId>,
}

impl InteractionRecord {
    pub fn vote_state(&self, post_id: &PostId) -> VoteState {
        if self.liked_posts.contains(post_id) {
            VoteState::Liked
        } else if self.unliked_posts.contains(post_id) {
            VoteState::Unliked
        } else {
            VoteState::Neutral
        }
    }
}
