//! z-commerce client SDK.
//!
//! Typed access to the z-commerce HTTP API: accounts, catalog items and
//! transactions.
//!
//! # Example
//!
//! ```no_run
//! use z_commerce_client::{NewTransaction, ZCommerceClient};
//!
//! # async fn example() -> Result<(), z_commerce_client::ClientError> {
//! let client = ZCommerceClient::new("http://z-commerce:8080")?;
//!
//! let items = client.list_items().await?;
//! let accounts = client.list_accounts().await?;
//!
//! let id = client
//!     .create_transaction(&NewTransaction {
//!         user: accounts[0].id.clone(),
//!         product: items[0].id.clone(),
//!         amount_of_product: 2,
//!     })
//!     .await?;
//!
//! let transaction = client.get_transaction(&id).await?;
//! println!("Total: {:?}", transaction.amount_of_sale);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, ZCommerceClient};
pub use error::ClientError;
pub use types::*;
