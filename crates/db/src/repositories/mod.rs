//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_repo;
pub mod agent_purchase_repo;
pub mod ai_model_repo;
pub mod chapter_repo;
pub mod coin_package_repo;
pub mod crowdfunding_repo;
pub mod friend_repo;
pub mod melody_repo;
pub mod membership_repo;
pub mod notice_repo;
pub mod novel_character_repo;
pub mod novel_repo;
pub mod outline_repo;
pub mod recharge_repo;
pub mod resource_audit_repo;
pub mod setting_repo;
pub mod site_message_repo;
pub mod storage_config_repo;
pub mod storage_quota_repo;
pub mod token_repo;
pub mod user_limit_repo;
pub mod user_repo;
pub mod wallet_repo;

pub use admin_repo::{AdminLogRepo, AdminRoleRepo};
pub use agent_purchase_repo::AgentPurchaseRepo;
pub use ai_model_repo::{EmbeddingModelRepo, ModelPriceRepo, PresetModelRepo};
pub use chapter_repo::ChapterRepo;
pub use coin_package_repo::CoinPackageRepo;
pub use crowdfunding_repo::CrowdfundingRepo;
pub use friend_repo::FriendRepo;
pub use melody_repo::MelodyRepo;
pub use membership_repo::{MembershipLevelRepo, MembershipPurchaseRepo, UserMembershipRepo};
pub use notice_repo::{AnnouncementCategoryRepo, NoticeBarRepo};
pub use novel_character_repo::NovelCharacterRepo;
pub use novel_repo::NovelRepo;
pub use outline_repo::OutlineRepo;
pub use recharge_repo::RechargeRepo;
pub use resource_audit_repo::ResourceAuditRepo;
pub use setting_repo::SettingRepo;
pub use site_message_repo::SiteMessageRepo;
pub use storage_config_repo::StorageConfigRepo;
pub use storage_quota_repo::StorageQuotaRepo;
pub use token_repo::TokenRepo;
pub use user_limit_repo::UserLimitRepo;
pub use user_repo::UserRepo;
pub use wallet_repo::WalletRepo;
