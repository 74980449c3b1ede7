//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Update DTOs double as the write allow-list: only the fields they name
//! can ever reach an UPDATE statement.

pub mod admin;
pub mod agent_purchase;
pub mod ai_model;
pub mod chapter;
pub mod coin_package;
pub mod crowdfunding;
pub mod friend;
pub mod melody;
pub mod membership;
pub mod notice;
pub mod novel;
pub mod novel_character;
pub mod outline;
pub mod recharge;
pub mod resource_audit;
pub mod setting;
pub mod site_message;
pub mod storage;
pub mod user;
pub mod user_limit;
pub mod wallet;
