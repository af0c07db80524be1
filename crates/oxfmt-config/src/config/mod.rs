//! Configuration system for oxfmt
//!
//! This module finds, parses and memoizes the formatter's configuration file:
//! - `.oxfmtrc.json` - Standard JSON
//! - `.oxfmtrc.jsonc` - JSON with comments and trailing commas
//!
//! ## Configuration Discovery
//!
//! When no explicit config path is provided, the loader searches for the
//! files above starting from the working directory and moving up the
//! directory tree until a config is found or the filesystem root is reached.
//! `.oxfmtrc.json` is preferred when both exist in the same directory.
//!
//! ## Caching
//!
//! Resolved paths and parsed documents are memoized per [`ConfigLoader`].
//! A cached document is not refreshed when the file changes; load with
//! `use_cache: false` to read the current contents.
//!
//! ## Example Configuration
//!
//! ```jsonc
//! {
//!   // Indentation
//!   "useTabs": false,
//!   "tabWidth": 2,
//!   "printWidth": 100,
//!   "singleQuote": true,
//!   "trailingComma": "all",
//!   "experimentalSortImports": {
//!     "order": "asc",
//!     "ignoreCase": true
//!   },
//!   "overrides": [
//!     {
//!       "files": ["*.test.ts"],
//!       "options": { "printWidth": 120 }
//!     }
//!   ]
//! }
//! ```

mod document;
mod loader;
mod parser;
mod resolver;

// Re-export main types
pub use document::{
    ArrowParens, ConfigDocument, EndOfLine, FormatOptions, ObjectWrap, OverrideEntry, QuoteProps,
    SortImportsOptions, SortOrder, TrailingComma,
};
pub use loader::{ConfigCacheKey, ConfigLoader, LoadOptions, ResolveKey, load_config};
pub use parser::{ConfigFormat, parse_document, read_document};
pub use resolver::{CONFIG_FILE_NAMES, resolve_config_path};
