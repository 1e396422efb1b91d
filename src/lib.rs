//! catalog-list: client-side list management for a product catalog.
//!
//! The crate implements the list controller of a catalog screen:
//! - Case-insensitive search over product name and description
//! - Page-size-bounded slicing of the catalog
//! - A delete workflow gated by a confirmation dialog
//! - A self-clearing notification banner for fetch/delete outcomes
//! - Asynchronous gateway calls that never block the controller

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime shell (runtime)                            │  ← Executes actions
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← List controller
//! │  - Event handling                                   │
//! │  - Delete state machine                             │
//! │  - View derivation (search / page size)             │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - View model  │   │ - Gateways    │   │ - Async calls │
//! │ - Banner      │   │ - JSON file   │   │ - Trace ctx   │
//! │ - Dialog      │   │ - Records     │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data paths (infrastructure/)                     │
//! │  - Error types (domain/error)                       │
//! │  - Product model (domain/product)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Configuration comes either from a key/value map or a TOML file:
//!
//! ```toml
//! page_size = 10
//! page_options = [5, 10, 20]
//! notification_delay_ms = 5000
//! catalog_file = "~/catalog.json"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use catalog_list::{handle_event, Event, ListState, WorkerResponse};
//! use catalog_list::storage::ProductRecord;
//!
//! let mut state = ListState::default();
//! let (_, actions) = handle_event(&mut state, &Event::Activate)?;
//! // ... the runtime posts `actions` to the worker, which eventually answers:
//! let fetched = WorkerResponse::ProductsFetched {
//!     records: vec![ProductRecord::new("1", "Test Product 1", "Test Description 1")],
//! };
//! handle_event(&mut state, &Event::WorkerResponse(fetched))?;
//! assert_eq!(state.view.len(), 1);
//! # Ok::<(), catalog_list::CatalogError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, ListState, Navigator, Route, RowAction};
pub use domain::{CatalogError, Product, Result};
pub use runtime::ListRuntime;
pub use worker::{WorkerMessage, WorkerResponse};

use app::state::{DEFAULT_NOTIFICATION_DELAY, DEFAULT_PAGE_OPTIONS};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default catalog file name inside the data directory.
const DEFAULT_CATALOG_FILE: &str = "catalog.json";

/// Default trace file name inside the data directory.
const DEFAULT_TRACE_FILE: &str = "catalog-list-otlp.json";

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Initial page size. Zero falls back to 5.
    pub page_size: usize,

    /// Page sizes offered by the selector. Default: `[5, 10, 20]`
    pub page_options: Vec<usize>,

    /// How long a notification stays visible. Default: 5 seconds
    pub notification_delay: Duration,

    /// JSON catalog used by [`ListRuntime::from_config`].
    ///
    /// Default: `<data_dir>/catalog.json`
    pub catalog_file: PathBuf,

    /// Tracing level. Tracing is disabled when unset.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive.
    pub trace_level: Option<String>,

    /// OTLP JSON trace output. Default: `<data_dir>/catalog-list-otlp.json`
    pub trace_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().resolve()
    }
}

/// Unresolved configuration as read from a map or TOML document.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    page_size: Option<usize>,
    page_options: Option<Vec<usize>>,
    notification_delay_ms: Option<u64>,
    catalog_file: Option<String>,
    trace_level: Option<String>,
    trace_file: Option<String>,
}

impl RawConfig {
    fn resolve(self) -> Config {
        let data_dir = infrastructure::get_data_dir();

        let page_options = self
            .page_options
            .map(|options| options.into_iter().filter(|&n| n > 0).collect::<Vec<_>>())
            .filter(|options| !options.is_empty())
            .unwrap_or_else(|| DEFAULT_PAGE_OPTIONS.to_vec());

        Config {
            page_size: app::effective_page_size(self.page_size),
            page_options,
            notification_delay: self
                .notification_delay_ms
                .map_or(DEFAULT_NOTIFICATION_DELAY, Duration::from_millis),
            catalog_file: self.catalog_file.as_deref().map_or_else(
                || data_dir.join(DEFAULT_CATALOG_FILE),
                infrastructure::expand_tilde,
            ),
            trace_level: self.trace_level.filter(|level| !level.trim().is_empty()),
            trace_file: self.trace_file.as_deref().map_or_else(
                || data_dir.join(DEFAULT_TRACE_FILE),
                infrastructure::expand_tilde,
            ),
        }
    }
}

impl Config {
    /// Parses configuration from a string key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - `page_size`: String → `usize` (falls back to 5 on parse error or zero)
    /// - `page_options`: Comma-separated → `Vec<usize>` (invalid entries dropped)
    /// - `notification_delay_ms`: String → milliseconds (falls back to 5000)
    /// - `catalog_file`, `trace_file`: paths, `~` expanded
    /// - `trace_level`: String
    ///
    /// Unknown keys are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use catalog_list::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "10".to_string());
    /// map.insert("page_options".to_string(), "10, 25,x".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 10);
    /// assert_eq!(config.page_options, vec![10, 25]);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let page_options = map.get("page_options").map(|s| {
            s.split(',')
                .map(str::trim)
                .filter_map(|p| p.parse::<usize>().ok())
                .collect::<Vec<_>>()
        });

        RawConfig {
            page_size: map.get("page_size").and_then(|s| s.trim().parse().ok()),
            page_options,
            notification_delay_ms: map
                .get("notification_delay_ms")
                .and_then(|s| s.trim().parse().ok()),
            catalog_file: map.get("catalog_file").cloned(),
            trace_level: map.get("trace_level").cloned(),
            trace_file: map.get("trace_file").cloned(),
        }
        .resolve()
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the document is not valid TOML, has
    /// a wrongly typed value, or names an unknown key.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let raw: RawConfig =
            toml::from_str(contents).map_err(|e| CatalogError::Config(e.to_string()))?;
        Ok(raw.resolve())
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading configuration file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Creates a runtime for `config`, backed by its JSON catalog.
///
/// Does not activate the list; dispatch [`Event::Activate`] when the screen
/// opens.
///
/// # Example
///
/// ```rust
/// use catalog_list::{initialize, Config, Navigator, Route};
///
/// struct Ignore;
/// impl Navigator for Ignore {
///     fn navigate(&self, _route: &Route) {}
/// }
///
/// let runtime = initialize(&Config::default(), Box::new(Ignore));
/// assert!(runtime.state().view.is_empty());
/// ```
pub fn initialize(config: &Config, navigator: Box<dyn Navigator + Send>) -> ListRuntime {
    tracing::debug!(
        page_size = config.page_size,
        catalog = ?config.catalog_file,
        "initializing catalog list"
    );
    ListRuntime::from_config(config, navigator)
}
