//! Client library for the Wikimedia/MediaWiki HTTP APIs.
//!
//! Covers the REST page endpoints (`/api/rest_v1/page/...`) and the
//! legacy Action API (`/w/api.php`, `formatversion=2`). Typed method
//! calls build correctly-encoded requests from configurable URL
//! templates, and raw JSON responses are reconciled into clean results:
//! title normalization and redirect chains are resolved back to the
//! titles as requested, and entries the server flags as missing are
//! filtered out.
//!
//! ```no_run
//! use mediawiki_client::{Client, PageDataOptions};
//!
//! let client = Client::new("https://en.wikipedia.org")?;
//! let meta = client.page_meta("Ninja")?;
//! let page = client.page_data("Ninja", PageDataOptions::default())?;
//! # Ok::<(), mediawiki_client::Error>(())
//! ```
//!
//! Every call is one stateless request/response cycle: no caching, no
//! retries, no pagination. Errors propagate to the caller untouched.

mod client;
mod error;
mod namespaces;
mod options;
mod page_data;
mod page_meta;
mod page_revisions;
mod page_wikitext;
mod req;
mod sitematrix;
mod user;

pub use client::{Client, ClientBuilder};
pub use error::{Error, Result};
pub use namespaces::Namespace;
pub use options::Options;
pub use page_data::{
    EntityUsage, MainSlot, PageData, PageDataOptions, PageDataRevision, PageLink, PageProps,
    Protection, RedirectLink, Slots,
};
pub use page_meta::PageMeta;
pub use page_revisions::{PageRevisionsOptions, Revision, RevisionOrdering};
pub use sitematrix::{Project, Site, Sitematrix, Special};
pub use user::User;
