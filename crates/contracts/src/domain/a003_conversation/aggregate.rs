use crate::domain::a002_document_chunk::aggregate::{DocumentChunk, DocumentChunkId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ConversationId = i64;

/// Shown in place of an empty message history.
pub const GREETING: &str = "Hello! How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// Retrieval context of an assistant message: a chunk id or the chunk itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChunkRef {
    Id(DocumentChunkId),
    Chunk(DocumentChunk),
}

impl ChunkRef {
    pub fn id(&self) -> DocumentChunkId {
        match self {
            ChunkRef::Id(id) => *id,
            ChunkRef::Chunk(chunk) => chunk.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub context: Vec<ChunkRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Conversation with its full message history, in server order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    #[serde(alias = "user")]
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List projection without message bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleConversation {
    pub id: ConversationId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Conversation> for SimpleConversation {
    fn from(c: &Conversation) -> Self {
        Self {
            id: c.id,
            title: c.title.clone(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Most recently updated first; ties keep the higher (newer) id first.
pub fn sort_recent_first(conversations: &mut [SimpleConversation]) {
    conversations.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Body of `POST ai/conversation/`. `user` is the id returned by "who am I".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateConversationRequest {
    pub title: String,
    pub user: i64,
}

/// Body of `POST ai/ai-response/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResponseRequest {
    pub conversation_id: ConversationId,
    pub query: String,
}

/// Trimmed title, `None` when blank.
pub fn normalize_title(title: &str) -> Option<String> {
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// The send control is enabled only for a non-blank draft with nothing in flight.
pub fn can_submit(draft: &str, in_flight: bool) -> bool {
    !in_flight && !draft.trim().is_empty()
}

/// Render unit of a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Line(String),
    Spacer,
}

/// One block per newline-delimited line; blank lines become spacers.
pub fn content_blocks(content: &str) -> Vec<ContentBlock> {
    content
        .split('\n')
        .map(|line| {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                ContentBlock::Spacer
            } else {
                ContentBlock::Line(line.to_string())
            }
        })
        .collect()
}
