//! Asset catalog: inventory items with filtered, numerically-sorted listing.

pub mod asset;
pub mod service;

pub use asset::{Asset, AssetFilter, AssetPatch, Availability, NewAsset, Quantity, SortDirection};
pub use service::CatalogService;
