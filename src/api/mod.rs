//! Внешний API движка блэкджека.
//!
//! Здесь описываются:
//! - команды (commands.rs): всё, что меняет состояние (старт партии, hit/stand);
//! - запросы (queries.rs): только чтение;
//! - DTO (dto.rs): структуры для диспетчера чата;
//! - ошибки (errors.rs): то, что видит пользователь;
//! - текст (render.rs): сообщения для чата.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;
pub mod render;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
