use contracts::domain::a003_conversation::aggregate::{
    AiResponseRequest, Conversation, ConversationId, CreateConversationRequest,
    SimpleConversation,
};
use contracts::shared::pagination::ListWire;

use crate::shared::http::{self, ApiError};
use crate::system::auth::api::who_am_i;

pub async fn list_conversations() -> Result<Vec<SimpleConversation>, ApiError> {
    let wire: ListWire<SimpleConversation> =
        http::get_json("ai/simple-conversation/", "Failed to fetch conversations").await?;
    Ok(wire.into_vec())
}

pub async fn get_conversation(id: ConversationId) -> Result<Conversation, ApiError> {
    http::get_json(
        &format!("ai/conversation/{}/", id),
        "Failed to fetch conversation",
    )
    .await
}

/// The owner id is not known client-side, so it is looked up first.
pub async fn create_conversation(title: String) -> Result<Conversation, ApiError> {
    let me = who_am_i().await?;
    let request = CreateConversationRequest {
        title,
        user: me.id,
    };
    http::post_json("ai/conversation/", &request, "Failed to create conversation").await
}

/// Asks the assistant. The reply is read back by refetching the conversation.
pub async fn get_ai_response(
    conversation_id: ConversationId,
    query: String,
) -> Result<(), ApiError> {
    let request = AiResponseRequest {
        conversation_id,
        query,
    };
    http::post("ai/ai-response/", &request, "Failed to send message").await
}
