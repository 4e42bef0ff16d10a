//! Menu display for a restaurant site.
//!
//! A page load looks for a per-user menu hash in the URL. Without one the
//! pre-rendered static menu stays on screen; with one the personalized menu is
//! fetched (bounded wait, single attempt), rendered and swapped in, or a
//! user-safe error message is shown. Either way a [`filter::MenuView`] drives
//! category filtering and the mobile sidebar over the visible menu.

pub mod config;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod hash;
pub mod model;
pub mod page;
pub mod render;

pub use config::Config;
pub use dom::{Document, NodeId};
pub use fetch::{FetchOutcome, MenuClient};
pub use filter::{HeadlessViewport, MenuView, UiEvent, Viewport};
pub use model::{Category, Item, MenuDocument};
pub use page::{LoadFailure, LoadedPage, MenuSource, PageController, Shell};
