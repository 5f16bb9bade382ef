//! Blocking client for the [NeoCities](https://neocities.org) API.
//!
//! Everything starts from a [`Site`]: give it a key to upload, push, delete
//! and list files, or a site name to look up public information.
//!
//! ```no_run
//! use neocities::Site;
//!
//! let site = Site::default().with_key("da77c3530c30593663bf7b797323e48c");
//! site.upload_file("public/index.html", "index.html", None)?;
//! let report = site.push("public", None)?;
//! assert!(report.is_complete());
//! # Ok::<(), neocities::Error>(())
//! ```
//!
//! Operations log through [`tracing`]; install a subscriber to see them.

mod api_client;
mod credentials;
mod error;
mod multipart;
mod neo_time;
mod site;

pub use api_client::{Api, ApiClient, ApiRequest, DEFAULT_API_URL};
pub use credentials::read_key_file;
pub use error::{ApiError, Error, MissingKey};
pub use multipart::{MULTIPART_BOUNDARY, make_multipart_file, multipart_content_type};
pub use neo_time::NeoTime;
pub use site::{PushFailure, PushReport, Site, SiteFile, SiteInfo};
