//! Discussion state machine
//!
//! Posts and replies move through three states:
//!
//! ```text
//! Active --edit--> Active (message replaced)
//! Active --report--> Reported (visible, no longer editable)
//! ```
//!
//! Authorship is decided by the [`DisplayNameClaim`]: whatever name was last
//! submitted from this device. It is a convenience, not an identity check;
//! anyone can type someone else's name.

use chrono::{DateTime, Local};
use fairway_api::{ContentRef, InteractionRecord, Post, Reply, VoteState};
use fairway_config::Limits;
use fairway_store::{RecordKey, RecordStore, RecordStoreExt};
use fairway_util::{PostId, ReplyId, epoch_millis};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{ContentFilter, ForumResult, ValidationError};

/// The locally remembered display name used for edit ownership.
///
/// Anyone can type any name. This only decides which edit controls are
/// offered, it does not authenticate anybody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayNameClaim(Option<String>);

impl DisplayNameClaim {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    pub fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether content signed `author` is claimed by this device
    pub fn claims(&self, author: &str) -> bool {
        self.0.as_deref() == Some(author)
    }
}

/// Result of a report request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    Reported,
    /// The user did not confirm
    Declined,
    AlreadyReported,
    NotFound,
}

/// Result of an edit request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Saved,
    /// The new message failed validation or the target changed underneath;
    /// the edit was dropped without further notice
    Cancelled,
    /// Not owned, reported, or another edit is open
    NotPermitted,
    NoEditInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vote {
    Like,
    Unlike,
}

/// Posts, replies and the local viewer's votes
pub struct Forum {
    store: Arc<dyn RecordStore>,
    filter: Box<dyn ContentFilter>,
    limits: Limits,
    posts: Vec<Post>,
    interactions: InteractionRecord,
    claim: DisplayNameClaim,
    editing: Option<ContentRef>,
}

impl Forum {
    /// Load posts, votes and the remembered name. Unreadable records start empty.
    pub fn load(store: Arc<dyn RecordStore>, filter: Box<dyn ContentFilter>, limits: Limits) -> Self {
        let posts: Vec<Post> = store.load_record(RecordKey::Posts).unwrap_or_default();
        let interactions: InteractionRecord =
            store.load_record(RecordKey::Interactions).unwrap_or_default();
        let claim = store
            .load_record::<String>(RecordKey::DisplayName)
            .map(DisplayNameClaim::new)
            .unwrap_or_default();

        debug!(
            posts = posts.len(),
            liked = interactions.liked_posts.len(),
            unliked = interactions.unliked_posts.len(),
            "Forum loaded"
        );

        Self {
            store,
            filter,
            limits,
            posts,
            interactions,
            claim,
            editing: None,
        }
    }

    /// All posts, newest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, post_id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id == post_id)
    }

    pub fn interactions(&self) -> &InteractionRecord {
        &self.interactions
    }

    pub fn display_name(&self) -> &DisplayNameClaim {
        &self.claim
    }

    /// The content currently being edited, if any
    pub fn editing(&self) -> Option<&ContentRef> {
        self.editing.as_ref()
    }

    pub fn vote_state(&self, post_id: &PostId) -> VoteState {
        self.interactions.vote_state(post_id)
    }

    /// Trim and check a name/message pair
    pub fn validate(&self, name: &str, message: &str) -> Result<(String, String), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        if name.chars().count() > self.limits.name_max_chars {
            return Err(ValidationError::NameTooLong {
                max: self.limits.name_max_chars,
            });
        }
        let message = self.validate_message(message)?;
        Ok((name.to_string(), message))
    }

    fn validate_message(&self, message: &str) -> Result<String, ValidationError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyField { field: "message" });
        }
        if message.chars().count() > self.limits.message_max_chars {
            return Err(ValidationError::MessageTooLong {
                max: self.limits.message_max_chars,
            });
        }
        if self.filter.is_disallowed_content(message) {
            return Err(ValidationError::LinkDetected);
        }
        Ok(message.to_string())
    }

    /// Publish a new post at the front of the list
    pub fn submit_post(&mut self, name: &str, message: &str, now: DateTime<Local>) -> ForumResult<PostId> {
        let (name, message) = self.validate(name, message)?;

        let post = Post {
            id: PostId::generate(),
            name: name.clone(),
            message,
            timestamp: epoch_millis(&now),
            replies: Vec::new(),
            reported: false,
            likes: 0,
            unlikes: 0,
        };
        let post_id = post.id.clone();

        self.posts.insert(0, post);
        if let Err(e) = self.persist_posts() {
            self.posts.remove(0);
            return Err(e.into());
        }

        info!(post_id = %post_id, author = %name, "Post submitted");
        self.remember_name(name);
        Ok(post_id)
    }

    /// Add a reply at the front of a post's replies.
    ///
    /// Returns `None` if the post no longer exists.
    pub fn submit_reply(
        &mut self,
        post_id: &PostId,
        name: &str,
        message: &str,
        now: DateTime<Local>,
    ) -> ForumResult<Option<ReplyId>> {
        let (name, message) = self.validate(name, message)?;

        let Some(index) = self.post_index(post_id) else {
            debug!(post_id = %post_id, "Reply target not found");
            return Ok(None);
        };

        let reply = Reply {
            id: ReplyId::generate(),
            name: name.clone(),
            message,
            timestamp: epoch_millis(&now),
            reported: false,
        };
        let reply_id = reply.id.clone();

        self.posts[index].replies.insert(0, reply);
        if let Err(e) = self.persist_posts() {
            self.posts[index].replies.remove(0);
            return Err(e.into());
        }

        info!(post_id = %post_id, reply_id = %reply_id, author = %name, "Reply submitted");
        self.remember_name(name);
        Ok(Some(reply_id))
    }

    /// Flag content for moderation once the user confirms.
    ///
    /// `confirm` receives the message being reported and is not called when
    /// the target is missing or already reported.
    pub fn report(&mut self, target: &ContentRef, confirm: impl FnOnce(&str) -> bool) -> ForumResult<ReportOutcome> {
        let Some((_, reported, message)) = self.content(target) else {
            return Ok(ReportOutcome::NotFound);
        };
        if reported {
            return Ok(ReportOutcome::AlreadyReported);
        }
        if !confirm(message) {
            return Ok(ReportOutcome::Declined);
        }

        self.set_reported(target, true);
        if let Err(e) = self.persist_posts() {
            self.set_reported(target, false);
            return Err(e.into());
        }

        if self.editing.as_ref() == Some(target) {
            self.editing = None;
        }
        info!(content = ?target, "Content reported");
        Ok(ReportOutcome::Reported)
    }

    /// Whether the local user may start editing `target` now
    pub fn can_edit(&self, target: &ContentRef) -> bool {
        if self.editing.is_some() {
            return false;
        }
        self.is_own_editable(target)
    }

    /// Open an edit on `target`, returning its current message
    pub fn begin_edit(&mut self, target: &ContentRef) -> Option<String> {
        if !self.can_edit(target) {
            return None;
        }
        let (_, _, message) = self.content(target)?;
        let message = message.to_string();
        self.editing = Some(target.clone());
        debug!(content = ?target, "Edit started");
        Some(message)
    }

    pub fn cancel_edit(&mut self) {
        if let Some(target) = self.editing.take() {
            debug!(content = ?target, "Edit cancelled");
        }
    }

    /// Commit the open edit.
    ///
    /// An invalid message closes the edit without saving anything.
    pub fn save_edit(&mut self, new_message: &str) -> ForumResult<EditOutcome> {
        let Some(target) = self.editing.take() else {
            return Ok(EditOutcome::NoEditInProgress);
        };

        let message = match self.validate_message(new_message) {
            Ok(message) => message,
            Err(e) => {
                info!(content = ?target, reason = %e, "Edit dropped");
                return Ok(EditOutcome::Cancelled);
            }
        };

        if !self.is_own_editable(&target) {
            info!(content = ?target, "Edit target no longer editable");
            return Ok(EditOutcome::Cancelled);
        }

        let Some(previous) = self.replace_message(&target, message) else {
            return Ok(EditOutcome::Cancelled);
        };
        if let Err(e) = self.persist_posts() {
            self.replace_message(&target, previous);
            return Err(e.into());
        }

        info!(content = ?target, "Content edited");
        Ok(EditOutcome::Saved)
    }

    /// Begin and save an edit in one step
    pub fn edit_own_content(&mut self, target: &ContentRef, new_message: &str) -> ForumResult<EditOutcome> {
        if self.begin_edit(target).is_none() {
            return Ok(EditOutcome::NotPermitted);
        }
        self.save_edit(new_message)
    }

    /// Like, or undo a like. Switching from unlike moves the vote over.
    ///
    /// Returns the viewer's new vote, or `None` if the post does not exist.
    pub fn toggle_like(&mut self, post_id: &PostId) -> ForumResult<Option<VoteState>> {
        self.toggle(post_id, Vote::Like)
    }

    /// Mirror of [`Forum::toggle_like`]
    pub fn toggle_unlike(&mut self, post_id: &PostId) -> ForumResult<Option<VoteState>> {
        self.toggle(post_id, Vote::Unlike)
    }

    fn toggle(&mut self, post_id: &PostId, vote: Vote) -> ForumResult<Option<VoteState>> {
        let Some(index) = self.post_index(post_id) else {
            debug!(post_id = %post_id, "Vote target not found");
            return Ok(None);
        };

        let (cast, opposite) = match vote {
            Vote::Like => (VoteState::Liked, VoteState::Unliked),
            Vote::Unlike => (VoteState::Unliked, VoteState::Liked),
        };
        let current = self.interactions.vote_state(post_id);
        let mut interactions = self.interactions.clone();
        let previous = self.posts[index].clone();

        let Post { likes, unlikes, .. } = &mut self.posts[index];
        let InteractionRecord {
            liked_posts,
            unliked_posts,
        } = &mut interactions;
        let (own_count, other_count, own_set, other_set) = match vote {
            Vote::Like => (likes, unlikes, liked_posts, unliked_posts),
            Vote::Unlike => (unlikes, likes, unliked_posts, liked_posts),
        };

        let new_state = if current == cast {
            *own_count = own_count.saturating_sub(1);
            own_set.remove(post_id);
            VoteState::Neutral
        } else {
            if current == opposite {
                *other_count = other_count.saturating_sub(1);
                other_set.remove(post_id);
            }
            *own_count += 1;
            own_set.insert(post_id.clone());
            cast
        };

        if let Err(e) = self.persist_posts() {
            self.posts[index] = previous;
            return Err(e.into());
        }

        self.interactions = interactions;
        if let Err(e) = self.store.save_record(RecordKey::Interactions, &self.interactions) {
            warn!(error = %e, "Failed to persist interactions");
        }

        info!(post_id = %post_id, vote = ?new_state, "Vote toggled");
        Ok(Some(new_state))
    }

    /// Posts where the post or any of its replies mentions `term`
    /// (case-insensitive). Matching posts keep all their replies.
    pub fn search(&self, term: &str) -> Vec<&Post> {
        if term.trim().is_empty() {
            return self.posts.iter().collect();
        }
        let needle = term.to_lowercase();
        let matches = |name: &str, message: &str| {
            name.to_lowercase().contains(&needle) || message.to_lowercase().contains(&needle)
        };

        self.posts
            .iter()
            .filter(|post| {
                matches(&post.name, &post.message)
                    || post.replies.iter().any(|r| matches(&r.name, &r.message))
            })
            .collect()
    }

    fn post_index(&self, post_id: &PostId) -> Option<usize> {
        self.posts.iter().position(|p| &p.id == post_id)
    }

    /// Author, reported flag and message of the addressed content
    fn content(&self, target: &ContentRef) -> Option<(&str, bool, &str)> {
        let post = self.post(target.post_id())?;
        match target {
            ContentRef::Post(_) => Some((post.name.as_str(), post.reported, post.message.as_str())),
            ContentRef::Reply { reply_id, .. } => {
                let reply = post.reply(reply_id)?;
                Some((reply.name.as_str(), reply.reported, reply.message.as_str()))
            }
        }
    }

    fn is_own_editable(&self, target: &ContentRef) -> bool {
        match self.content(target) {
            Some((author, reported, _)) => !reported && self.claim.claims(author),
            None => false,
        }
    }

    fn set_reported(&mut self, target: &ContentRef, reported: bool) {
        let Some(index) = self.post_index(target.post_id()) else {
            return;
        };
        let post = &mut self.posts[index];
        match target {
            ContentRef::Post(_) => post.reported = reported,
            ContentRef::Reply { reply_id, .. } => {
                if let Some(reply) = post.reply_mut(reply_id) {
                    reply.reported = reported;
                }
            }
        }
    }

    /// Swap in `message`, returning the old one
    fn replace_message(&mut self, target: &ContentRef, message: String) -> Option<String> {
        let index = self.post_index(target.post_id())?;
        let post = &mut self.posts[index];
        let slot = match target {
            ContentRef::Post(_) => &mut post.message,
            ContentRef::Reply { reply_id, .. } => &mut post.reply_mut(reply_id)?.message,
        };
        Some(std::mem::replace(slot, message))
    }

    fn persist_posts(&self) -> Result<(), fairway_store::StoreError> {
        self.store.save_record(RecordKey::Posts, &self.posts).inspect_err(|e| {
            warn!(error = %e, "Failed to persist posts, keeping previous state");
        })
    }

    // Failures are logged only
    fn remember_name(&mut self, name: String) {
        if let Err(e) = self.store.save_record(RecordKey::DisplayName, &name) {
            warn!(error = %e, "Failed to persist display name");
        }
        self.claim = DisplayNameClaim::new(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ForumError, LinkFilter};
    use fairway_store::MemoryStore;

    fn forum() -> (Arc<MemoryStore>, Forum) {
        let store = Arc::new(MemoryStore::new());
        let forum = Forum::load(store.clone(), Box::new(LinkFilter::default()), Limits::default());
        (store, forum)
    }

    fn now() -> DateTime<Local> {
        fairway_util::now()
    }

    fn likes(forum: &Forum, id: &PostId) -> (u32, u32) {
        let post = forum.post(id).unwrap();
        (post.likes, post.unlikes)
    }

    #[test]
    fn test_submit_post_prepends_fresh_post() {
        let (_, mut forum) = forum();
        forum.submit_post("Alex", "First", now()).unwrap();
        let id = forum
            .submit_post("  Sam ", "  Great tip on course management ", now())
            .unwrap();

        let post = &forum.posts()[0];
        assert_eq!(post.id, id);
        assert_eq!(post.name, "Sam");
        assert_eq!(post.message, "Great tip on course management");
        assert_eq!((post.likes, post.unlikes), (0, 0));
        assert!(post.replies.is_empty());
        assert!(!post.reported);
        assert_eq!(forum.display_name().name(), Some("Sam"));
    }

    #[test]
    fn test_link_rejected_without_persisting() {
        let (store, mut forum) = forum();
        let err = forum.submit_post("Sam", "Check out http://spam.com", now()).unwrap_err();

        assert!(matches!(err, ForumError::Validation(ValidationError::LinkDetected)));
        assert!(forum.posts().is_empty());
        assert_eq!(store.write_count(), 0);
        assert_eq!(forum.display_name().name(), None);
    }

    #[test]
    fn test_field_validation() {
        let (_, forum) = forum();
        assert_eq!(
            forum.validate("   ", "hi"),
            Err(ValidationError::EmptyField { field: "name" })
        );
        assert_eq!(
            forum.validate("Sam", " \n "),
            Err(ValidationError::EmptyField { field: "message" })
        );
        assert_eq!(
            forum.validate(&"n".repeat(31), "hi"),
            Err(ValidationError::NameTooLong { max: 30 })
        );
        assert_eq!(
            forum.validate("Sam", &"m".repeat(501)),
            Err(ValidationError::MessageTooLong { max: 500 })
        );
        assert!(forum.validate(&"n".repeat(30), &"m".repeat(500)).is_ok());
    }

    #[test]
    fn test_failed_post_save_reverts() {
        let (store, mut forum) = forum();
        forum.submit_post("Sam", "Kept", now()).unwrap();

        store.fail_writes(true);
        let err = forum.submit_post("Alex", "Lost", now()).unwrap_err();
        assert!(matches!(err, ForumError::Store(_)));
        assert_eq!(forum.posts().len(), 1);
        assert_eq!(forum.posts()[0].message, "Kept");
        assert_eq!(forum.display_name().name(), Some("Sam"));
    }

    #[test]
    fn test_replies_newest_first() {
        let (_, mut forum) = forum();
        let post_id = forum.submit_post("Sam", "Driver advice?", now()).unwrap();

        forum.submit_reply(&post_id, "Alex", "Tee it higher", now()).unwrap();
        let latest = forum
            .submit_reply(&post_id, "Jo", "Slow down", now())
            .unwrap()
            .unwrap();

        let post = forum.post(&post_id).unwrap();
        assert_eq!(post.replies.len(), 2);
        assert_eq!(post.replies[0].id, latest);
        assert_eq!(forum.display_name().name(), Some("Jo"));
    }

    #[test]
    fn test_reply_to_missing_post_is_noop() {
        let (store, mut forum) = forum();
        let result = forum
            .submit_reply(&PostId::new("gone"), "Sam", "hello", now())
            .unwrap();
        assert!(result.is_none());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_report_requires_confirmation_and_is_final() {
        let (_, mut forum) = forum();
        let post_id = forum.submit_post("Sam", "Rude words", now()).unwrap();
        let target = ContentRef::Post(post_id.clone());

        assert_eq!(forum.report(&target, |_| false).unwrap(), ReportOutcome::Declined);
        assert!(!forum.post(&post_id).unwrap().reported);

        let mut prompted = None;
        let outcome = forum
            .report(&target, |message| {
                prompted = Some(message.to_string());
                true
            })
            .unwrap();
        assert_eq!(outcome, ReportOutcome::Reported);
        assert_eq!(prompted.as_deref(), Some("Rude words"));
        assert!(forum.post(&post_id).unwrap().reported);

        let outcome = forum
            .report(&target, |_| panic!("must not prompt twice"))
            .unwrap();
        assert_eq!(outcome, ReportOutcome::AlreadyReported);
    }

    #[test]
    fn test_report_reply() {
        let (_, mut forum) = forum();
        let post_id = forum.submit_post("Sam", "Question", now()).unwrap();
        let reply_id = forum
            .submit_reply(&post_id, "Alex", "Answer", now())
            .unwrap()
            .unwrap();

        let target = ContentRef::Reply {
            post_id: post_id.clone(),
            reply_id: reply_id.clone(),
        };
        assert_eq!(forum.report(&target, |_| true).unwrap(), ReportOutcome::Reported);

        let post = forum.post(&post_id).unwrap();
        assert!(!post.reported);
        assert!(post.reply(&reply_id).unwrap().reported);

        let missing = ContentRef::Reply {
            post_id,
            reply_id: ReplyId::new("gone"),
        };
        assert_eq!(forum.report(&missing, |_| true).unwrap(), ReportOutcome::NotFound);
    }

    #[test]
    fn test_edit_own_post() {
        let (_, mut forum) = forum();
        let post_id = forum.submit_post("Sam", "Typo hree", now()).unwrap();
        let target = ContentRef::Post(post_id.clone());

        let outcome = forum.edit_own_content(&target, "Typo here").unwrap();
        assert_eq!(outcome, EditOutcome::Saved);
        assert_eq!(forum.post(&post_id).unwrap().message, "Typo here");
        assert!(forum.editing().is_none());
    }

    #[test]
    fn test_edit_by_other_name_has_no_effect() {
        let (_, mut forum) = forum();
        let post_id = forum.submit_post("Sam", "Original", now()).unwrap();
        forum.submit_post("Alex", "Someone else", now()).unwrap();
        let target = ContentRef::Post(post_id.clone());

        assert!(!forum.can_edit(&target));
        assert_eq!(
            forum.edit_own_content(&target, "Hijacked").unwrap(),
            EditOutcome::NotPermitted
        );
        assert_eq!(forum.post(&post_id).unwrap().message, "Original");
    }

    #[test]
    fn test_reported_content_not_editable() {
        let (_, mut forum) = forum();
        let post_id = forum.submit_post("Sam", "Original", now()).unwrap();
        let target = ContentRef::Post(post_id);

        forum.report(&target, |_| true).unwrap();
        assert!(!forum.can_edit(&target));
        assert!(forum.begin_edit(&target).is_none());
    }

    #[test]
    fn test_single_edit_at_a_time() {
        let (_, mut forum) = forum();
        let first = ContentRef::Post(forum.submit_post("Sam", "One", now()).unwrap());
        let second = ContentRef::Post(forum.submit_post("Sam", "Two", now()).unwrap());

        assert_eq!(forum.begin_edit(&first).as_deref(), Some("One"));
        assert!(!forum.can_edit(&second));
        assert!(forum.begin_edit(&second).is_none());

        forum.cancel_edit();
        assert!(forum.can_edit(&second));
    }

    #[test]
    fn test_invalid_edit_silently_cancelled() {
        let (store, mut forum) = forum();
        let post_id = forum.submit_post("Sam", "Original", now()).unwrap();
        let target = ContentRef::Post(post_id.clone());
        let writes = store.write_count();

        forum.begin_edit(&target).unwrap();
        assert_eq!(forum.save_edit("visit spam.com").unwrap(), EditOutcome::Cancelled);
        assert!(forum.editing().is_none());
        assert_eq!(forum.post(&post_id).unwrap().message, "Original");

        forum.begin_edit(&target).unwrap();
        assert_eq!(forum.save_edit("   ").unwrap(), EditOutcome::Cancelled);
        assert_eq!(store.write_count(), writes);

        assert_eq!(forum.save_edit("anything").unwrap(), EditOutcome::NoEditInProgress);
    }

    #[test]
    fn test_edit_own_reply() {
        let (_, mut forum) = forum();
        let post_id = forum.submit_post("Alex", "Question", now()).unwrap();
        let reply_id = forum
            .submit_reply(&post_id, "Sam", "Answr", now())
            .unwrap()
            .unwrap();
        let target = ContentRef::Reply {
            post_id: post_id.clone(),
            reply_id: reply_id.clone(),
        };

        assert!(!forum.can_edit(&ContentRef::Post(post_id.clone())));
        assert_eq!(forum.edit_own_content(&target, "Answer").unwrap(), EditOutcome::Saved);
        let post = forum.post(&post_id).unwrap();
        assert_eq!(post.reply(&reply_id).unwrap().message, "Answer");
    }

    #[test]
    fn test_like_twice_restores_count() {
        let (_, mut forum) = forum();
        let id = forum.submit_post("Sam", "Nice round", now()).unwrap();

        assert_eq!(forum.toggle_like(&id).unwrap(), Some(VoteState::Liked));
        assert_eq!(likes(&forum, &id), (1, 0));
        assert_eq!(forum.toggle_like(&id).unwrap(), Some(VoteState::Neutral));
        assert_eq!(likes(&forum, &id), (0, 0));
        assert_eq!(forum.vote_state(&id), VoteState::Neutral);
    }

    #[test]
    fn test_like_then_unlike_moves_vote() {
        let (_, mut forum) = forum();
        let id = forum.submit_post("Sam", "Nice round", now()).unwrap();

        forum.toggle_like(&id).unwrap();
        assert_eq!(forum.toggle_unlike(&id).unwrap(), Some(VoteState::Unliked));
        assert_eq!(likes(&forum, &id), (0, 1));
        assert!(!forum.interactions().liked_posts.contains(&id));
        assert!(forum.interactions().unliked_posts.contains(&id));

        assert_eq!(forum.toggle_like(&id).unwrap(), Some(VoteState::Liked));
        assert_eq!(likes(&forum, &id), (1, 0));
    }

    #[test]
    fn test_vote_on_missing_post_is_noop() {
        let (store, mut forum) = forum();
        assert_eq!(forum.toggle_like(&PostId::new("gone")).unwrap(), None);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_vote_save_failure_keeps_previous_state() {
        let (store, mut forum) = forum();
        let id = forum.submit_post("Sam", "Nice round", now()).unwrap();

        store.fail_writes(true);
        assert!(forum.toggle_like(&id).is_err());
        assert_eq!(likes(&forum, &id), (0, 0));
        assert_eq!(forum.vote_state(&id), VoteState::Neutral);
    }

    #[test]
    fn test_interaction_save_failure_keeps_vote() {
        let (store, mut forum) = forum();
        let id = forum.submit_post("Sam", "Nice round", now()).unwrap();

        store.fail_writes_for(RecordKey::Interactions);
        assert_eq!(forum.toggle_like(&id).unwrap(), Some(VoteState::Liked));
        assert_eq!(likes(&forum, &id), (1, 0));
        assert_eq!(forum.vote_state(&id), VoteState::Liked);

        // Counts were saved with the posts, the vote itself was not
        let reloaded = Forum::load(store, Box::new(LinkFilter::default()), Limits::default());
        assert_eq!(likes(&reloaded, &id), (1, 0));
        assert_eq!(reloaded.vote_state(&id), VoteState::Neutral);
    }

    #[test]
    fn test_display_name_save_failure_keeps_post() {
        let (store, mut forum) = forum();
        store.fail_writes_for(RecordKey::DisplayName);

        let id = forum.submit_post("Sam", "Nice round", now()).unwrap();
        assert!(forum.display_name().claims("Sam"));
        assert!(forum.can_edit(&ContentRef::Post(id.clone())));

        let reloaded = Forum::load(store, Box::new(LinkFilter::default()), Limits::default());
        assert!(reloaded.post(&id).is_some());
        assert_eq!(reloaded.display_name().name(), None);
    }

    #[test]
    fn test_votes_and_name_survive_reload() {
        let (store, mut forum) = forum();
        let id = forum.submit_post("Sam", "Nice round", now()).unwrap();
        forum.toggle_unlike(&id).unwrap();

        let reloaded = Forum::load(store, Box::new(LinkFilter::default()), Limits::default());
        assert_eq!(reloaded.vote_state(&id), VoteState::Unliked);
        assert_eq!(likes(&reloaded, &id), (0, 1));
        assert!(reloaded.display_name().claims("Sam"));
    }

    #[test]
    fn test_search_matches_posts_and_replies() {
        let (_, mut forum) = forum();
        let putting = forum.submit_post("Sam", "Putting drills", now()).unwrap();
        let driver = forum.submit_post("Alex", "Driver slice", now()).unwrap();
        forum
            .submit_reply(&driver, "Jo", "Try a PUTTING mirror", now())
            .unwrap();
        forum.submit_post("Kim", "Course review", now()).unwrap();

        let ids: Vec<&PostId> = forum.search("putting").iter().map(|p| &p.id).collect();
        assert_eq!(ids, vec![&driver, &putting]);
        assert_eq!(forum.search("putting")[0].replies.len(), 1);

        assert_eq!(forum.search("kim").len(), 1);
        assert_eq!(forum.search("").len(), 3);
        assert_eq!(forum.search("   ").len(), 3);
        assert!(forum.search("nothing like this").is_empty());
    }
}
