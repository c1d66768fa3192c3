pub mod new_conversation_modal;
pub mod sidebar;
