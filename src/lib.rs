//! A client library for remote IPFS-style content pinning services. Files are uploaded as
//! streamed multipart bodies, listed with cursor-based pagination, and can be looked up, renamed
//! and deleted by identifier.
//!
//! ```no_run
//! use pinlink::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PinningClient::new("my-bearer-token")?;
//!
//! let mut pager = client.files();
//! while let Some(page) = pager.next_page().await? {
//!     for file in page.files() {
//!         println!("{} {}", file.cid, file.name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "pinning-api")]
pub mod api;

pub mod version;

// Re-export some of our dependencies for QoL, implementing a custom transport needs these
#[cfg(feature = "pinning-api")]
pub use async_trait;
pub use bytes;

pub mod prelude {
    #[cfg(feature = "pinning-api")]
    pub use crate::api::*;

    pub use crate::version::*;
}
