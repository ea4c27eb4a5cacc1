pub mod authenticate_operator;
pub mod dispatch_messages;
pub mod list_countries;
