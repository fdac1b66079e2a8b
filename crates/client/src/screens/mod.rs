//! Screen-scoped view models.
//!
//! Each screen owns its fetch states and exposes an explicit `activate` hook;
//! nothing is fetched until the hosting view calls it.

pub mod find;
pub mod group_sessions;
pub mod home;
pub mod notifications;

pub use find::FindScreen;
pub use group_sessions::GroupSessionsScreen;
pub use home::HomeScreen;
pub use notifications::NotificationsScreen;
