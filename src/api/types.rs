//! API request and response types

use crate::db::ConversationRow;
use crate::entities::{Recognition, RecognizedEntity};
use crate::runtime::Reply;
use serde::{Deserialize, Serialize};

/// One recognized user turn from the channel
#[derive(Debug, Clone, Deserialize)]
pub struct TurnRequest {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub entities: Vec<RecognizedEntity>,
    #[serde(default)]
    pub text: String,
}

impl TurnRequest {
    /// Nothing was recognized and nothing was typed
    pub fn is_empty(&self) -> bool {
        self.intent.as_deref().is_none_or(|i| i.trim().is_empty())
            && self.entities.is_empty()
            && self.text.trim().is_empty()
    }
}

impl From<TurnRequest> for Recognition {
    fn from(req: TurnRequest) -> Self {
        Recognition {
            intent: req.intent,
            entities: req.entities,
            text: req.text,
        }
    }
}

/// Replies for one turn, in order
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub replies: Vec<Reply>,
}

/// Response for conversation creation
#[derive(Debug, Serialize)]
pub struct CreateConversationResponse {
    pub conversation_id: String,
}

/// Response with a single stored conversation
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub conversation: ConversationRow,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
