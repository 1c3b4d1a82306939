//! UI Components
//!
//! Reusable Leptos components.

mod auth_form;
mod board_view;
mod delete_confirm_button;
mod drop_zone;
mod list_column;
mod new_list_form;
mod task_card;

pub use auth_form::AuthForm;
pub use board_view::BoardView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use drop_zone::DropZone;
pub use list_column::ListColumn;
pub use new_list_form::NewListForm;
pub use task_card::TaskCard;
