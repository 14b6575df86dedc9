//! S2ORC embedding retriever
//!
//! Retrieves paper metadata and SPECTER embeddings from the Semantic
//! Scholar Graph API for a topic query, accumulating results across
//! paginated requests until a target sample size over a year window is
//! collected. Large samples are split across year-pair partitions; all
//! pages are merged into one mapping deduplicated by paper ID.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use s2orc_retriever::{client::SearchClient, config::Config, retriever::Retriever};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = SearchClient::new(config)?;
//!     let retriever = Retriever::new(Arc::new(client));
//!
//!     let papers = retriever.search_papers("mRNA vaccines", 500, 2015, 2021).await?;
//!     println!("retrieved {} papers", papers.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod retriever;

pub use client::SearchClient;
pub use config::Config;
pub use error::{ClientError, RetrieveError};
pub use retriever::{ResultMap, Retriever};
