pub mod chats;
pub mod users;

pub use chats::{clear_chat_history, get_chat_history, save_chat_history};
pub use users::{authenticate_user, create_user, get_user_by_id};
