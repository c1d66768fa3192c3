//! Chat pane (MVVM Standard)
//!
//! Structure:
//! - view_model.rs: ChatVm with RwSignals and the send workflow
//! - view.rs: Main component ChatView

mod view;
mod view_model;

pub use view::ChatView;
pub use view_model::{ChatLine, ChatVm};
