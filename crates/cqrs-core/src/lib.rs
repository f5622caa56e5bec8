//! arx-cqrs-core - CQRS 核心库
//!
//! Command/Query trait 定义

mod command;
mod query;

pub use command::*;
pub use query::*;
