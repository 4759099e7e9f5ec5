//! Rock'n'Raft - memory pairs on sliding rafts
//!
//! Hosts any number of concurrent boards from [`rocknraft_engine`], one per
//! external session key, and drives them from the terminal or headless.
//!
//! # Architecture
//!
//! - **Session**: registry of live boards, each behind its own lock
//! - **Settings**: board shape and memorise time from TOML
//! - **Play**: typed and random turn input
//! - **Simulate**: racing random players for load and rule checks
//!
//! # Example
//!
//! ```no_run
//! use rocknraft::{SessionRegistry, Settings};
//! use rocknraft_engine::{Player, RenderMode, UserRef};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let registry = SessionRegistry::new();
//! let settings = Settings::from_env()?;
//!
//! let players = [Player::human(UserRef::new("42", "alice")), Player::surrogate()];
//! let handle = registry.create("msg-1".to_string(), settings.board_config(), players)?;
//! let snapshot = handle.snapshot(RenderMode::RevealAll).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod play;
mod session;
mod settings;
mod simulate;

// Crate-level exports - Turn input
pub use play::{ParseSelectionError, parse_selection, random_selection};

// Crate-level exports - Session management
pub use session::{SessionError, SessionHandle, SessionRegistry};

// Crate-level exports - Settings
pub use settings::{CONFIG_ENV, Settings, SettingsError};

// Crate-level exports - Headless games
pub use simulate::{GameSummary, TURN_LIMIT, simulate};
