use std::sync::Arc;

use chrono::Utc;

use assetdesk_core::{AssetId, DomainError, DomainResult};
use assetdesk_infra::Collection;

use crate::asset::{Asset, AssetFilter, AssetPatch, Availability, NewAsset, SortDirection};

/// CRUD and filtered listing over the assets collection.
pub struct CatalogService {
    assets: Arc<dyn Collection<Asset>>,
}

impl CatalogService {
    pub fn new(assets: Arc<dyn Collection<Asset>>) -> Self {
        Self { assets }
    }

    /// List assets matching `filter`, sorted by quantity.
    ///
    /// Sorting happens here, after loading the matches: quantities may be
    /// persisted as text, and a store-side sort would put "10" before "2".
    pub fn list(&self, filter: &AssetFilter, sort: SortDirection) -> Vec<Asset> {
        let mut matches = self.assets.find(&|a: &Asset| filter.matches(a));
        matches.sort_by_key(|a| a.quantity.as_count());
        if sort == SortDirection::Desc {
            matches.reverse();
        }
        matches
    }

    pub fn get(&self, id: AssetId) -> DomainResult<Asset> {
        self.assets
            .get(id.as_uuid().to_owned())
            .ok_or(DomainError::NotFound)
    }

    /// Create an asset. Availability is `Available` unconditionally on
    /// creation, regardless of the submitted quantity.
    pub fn create(&self, new: NewAsset) -> DomainResult<Asset> {
        let asset = Asset {
            id: AssetId::new(),
            name: new.name,
            asset_type: new.asset_type,
            availability: Availability::Available,
            quantity: new.quantity,
            timestamp: Utc::now(),
        };
        self.assets.insert(asset.id.as_uuid().to_owned(), asset.clone());
        Ok(asset)
    }

    /// Patch an asset, recomputing availability when quantity changes and
    /// refreshing the timestamp.
    pub fn update(&self, id: AssetId, patch: AssetPatch) -> DomainResult<Asset> {
        let mut asset = self.get(id)?;

        if let Some(name) = patch.name {
            asset.name = name;
        }
        if let Some(asset_type) = patch.asset_type {
            asset.asset_type = asset_type;
        }
        if let Some(quantity) = patch.quantity {
            asset.availability = Availability::from_quantity(&quantity);
            asset.quantity = quantity;
        }
        asset.timestamp = Utc::now();

        if !self.assets.replace(id.as_uuid().to_owned(), asset.clone()) {
            return Err(DomainError::NotFound);
        }
        Ok(asset)
    }

    pub fn delete(&self, id: AssetId) -> DomainResult<()> {
        if self.assets.remove(id.as_uuid().to_owned()) {
            Ok(())
        } else {
            Err(DomainError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_infra::InMemoryCollection;
    use crate::asset::Quantity;
    use proptest::prelude::*;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(InMemoryCollection::new()))
    }

    fn seed(svc: &CatalogService, name: &str, asset_type: &str, quantity: Quantity) -> Asset {
        svc.create(NewAsset {
            name: name.to_string(),
            asset_type: asset_type.to_string(),
            quantity,
        })
        .unwrap()
    }

    #[test]
    fn listing_sorts_numerically_across_text_and_int_quantities() {
        let svc = service();
        seed(&svc, "Laptop", "Returnable", Quantity::Text("2".into()));
        seed(&svc, "Monitor", "Returnable", Quantity::Count(10));
        seed(&svc, "Pen", "Non-returnable", Quantity::Text("1".into()));

        let asc = svc.list(&AssetFilter::default(), SortDirection::Asc);
        let counts: Vec<i64> = asc.iter().map(|a| a.quantity.as_count()).collect();
        assert_eq!(counts, vec![1, 2, 10]);

        let desc = svc.list(&AssetFilter::default(), SortDirection::Desc);
        let counts: Vec<i64> = desc.iter().map(|a| a.quantity.as_count()).collect();
        assert_eq!(counts, vec![10, 2, 1]);
    }

    #[test]
    fn filters_are_and_combined() {
        let svc = service();
        seed(&svc, "Laptop Stand", "Returnable", Quantity::Count(4));
        seed(&svc, "Laptop", "Returnable", Quantity::Count(2));
        seed(&svc, "Notebook", "Non-returnable", Quantity::Count(9));

        let filter = AssetFilter {
            search: Some("laptop".to_string()),
            availability: Some(Availability::Available),
            asset_type: Some("Returnable".to_string()),
        };
        let result = svc.list(&filter, SortDirection::Desc);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|a| a.name.to_lowercase().contains("laptop")));
    }

    #[test]
    fn create_forces_available_even_for_zero_stock() {
        let svc = service();
        let asset = seed(&svc, "Chair", "Returnable", Quantity::Count(0));
        assert_eq!(asset.availability, Availability::Available);
    }

    #[test]
    fn quantity_patch_recomputes_availability() {
        let svc = service();
        let asset = seed(&svc, "Chair", "Returnable", Quantity::Count(5));

        let patch = AssetPatch {
            quantity: Some(Quantity::Text("0".into())),
            ..Default::default()
        };
        let updated = svc.update(asset.id, patch).unwrap();
        assert_eq!(updated.availability, Availability::OutOfStock);

        let patch = AssetPatch {
            quantity: Some(Quantity::Count(3)),
            ..Default::default()
        };
        let updated = svc.update(asset.id, patch).unwrap();
        assert_eq!(updated.availability, Availability::Available);
    }

    #[test]
    fn point_operations_404_on_missing_id() {
        let svc = service();
        let missing = AssetId::new();

        assert_eq!(svc.get(missing).unwrap_err(), DomainError::NotFound);
        assert_eq!(
            svc.update(missing, AssetPatch::default()).unwrap_err(),
            DomainError::NotFound
        );
        assert_eq!(svc.delete(missing).unwrap_err(), DomainError::NotFound);
    }

    proptest! {
        /// Ascending listings are totally ordered by coerced quantity no
        /// matter how the values were persisted.
        #[test]
        fn ascending_order_is_total_over_mixed_representations(
            quantities in proptest::collection::vec(0i64..10_000, 1..20),
            as_text in proptest::collection::vec(any::<bool>(), 1..20),
        ) {
            let svc = service();
            for (i, q) in quantities.iter().enumerate() {
                let quantity = if *as_text.get(i).unwrap_or(&false) {
                    Quantity::Text(q.to_string())
                } else {
                    Quantity::Count(*q)
                };
                seed(&svc, &format!("asset-{i}"), "Returnable", quantity);
            }

            let listed = svc.list(&AssetFilter::default(), SortDirection::Asc);
            let counts: Vec<i64> = listed.iter().map(|a| a.quantity.as_count()).collect();
            let mut expected = quantities.clone();
            expected.sort_unstable();
            prop_assert_eq!(counts, expected);
        }
    }
}
