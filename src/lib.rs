//! bls_series
//!
//! A small Rust library for retrieving county unemployment-rate series from the
//! BLS Public Data API (v2). Pairs with the `bls` CLI.
//!
//! ### Features
//! - Fetch one county's LAUS unemployment rate for a range of years
//! - Sweep ranges of county codes and keep the counties that have data
//! - Save sweeps as JSON or CSV
//! - Quick summary statistics (min, max, mean, median)
//!
//! ### Example
//! ```no_run
//! use bls_series::{Client, CountyId, SeriesRequest};
//!
//! let client: Client = Client::default();
//! let request = SeriesRequest::for_county(&CountyId::new("37119"), "2006", "2014", None);
//! let mut stdout = std::io::stdout();
//! bls_series::report::fetch_and_report(&client, &request, &mut stdout)?;
//! # Ok::<(), bls_series::BlsError>(())
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod report;
pub mod stats;
pub mod storage;
pub mod sweep;

pub use api::{Client, HttpTransport, Transport};
pub use error::BlsError;
pub use models::{CleanObservation, CountyId, SeriesId, SeriesRequest};
