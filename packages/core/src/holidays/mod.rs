//! Holiday Resolution Module
//!
//! This module answers public holiday, weekend and work day questions for a
//! country, serving from the local store and falling back to an external
//! provider, plus day classification and free-day streaks.

pub mod resolver;
pub mod classifier;
pub mod streak;
pub mod store;
pub mod provider;
pub mod kayaposoft_adapter;
pub mod types;
pub mod error;


pub use resolver::HolidayResolver;
pub use classifier::DayClassifier;
pub use streak::StreakCalculator;
pub use store::{HolidayQuery, HolidayStore};
pub use provider::HolidayProvider;
pub use types::*;
pub use error::{ProviderError, ResolverError, StoreError};
