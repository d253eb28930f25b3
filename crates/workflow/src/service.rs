use std::sync::Arc;

use chrono::Utc;

use assetdesk_core::{DomainError, DomainResult, RequestId};
use assetdesk_infra::Collection;

use crate::request::{AssetRequest, NewRequest, RequestFilter, RequestStatus};

/// Asset-request operations over the injected requests collection.
pub struct RequestService {
    requests: Arc<dyn Collection<AssetRequest>>,
}

impl RequestService {
    pub fn new(requests: Arc<dyn Collection<AssetRequest>>) -> Self {
        Self { requests }
    }

    /// File a request. Status starts `Pending`; no stock validation against
    /// the catalog happens here.
    pub fn file(&self, new: NewRequest) -> DomainResult<AssetRequest> {
        let request = AssetRequest {
            id: RequestId::new(),
            requester_email: new.requester_email,
            asset_id: new.asset_id,
            asset_name: new.asset_name,
            asset_type: new.asset_type,
            note: new.note,
            status: RequestStatus::Pending,
            timestamp: Utc::now(),
        };
        self.requests
            .insert(request.id.as_uuid().to_owned(), request.clone());
        Ok(request)
    }

    /// All requests, optionally narrowed by a case-insensitive substring on
    /// the requester email.
    pub fn list(&self, search_by_email: Option<&str>) -> Vec<AssetRequest> {
        match search_by_email {
            Some(search) => {
                let needle = search.to_lowercase();
                self.requests
                    .find(&|r: &AssetRequest| r.requester_email.to_lowercase().contains(&needle))
            }
            None => self.requests.all(),
        }
    }

    pub fn get(&self, id: RequestId) -> DomainResult<AssetRequest> {
        self.requests
            .get(id.as_uuid().to_owned())
            .ok_or(DomainError::NotFound)
    }

    /// Requests filed by `email`, optionally filtered.
    pub fn list_by_requester(&self, email: &str, filter: &RequestFilter) -> Vec<AssetRequest> {
        self.requests
            .find(&|r: &AssetRequest| r.requester_email == email && filter.matches(r))
    }

    /// Move a request to `status`, refreshing the timestamp.
    pub fn set_status(&self, id: RequestId, status: RequestStatus) -> DomainResult<AssetRequest> {
        let mut request = self.get(id)?;
        request.status = status;
        request.timestamp = Utc::now();

        if !self.requests.replace(id.as_uuid().to_owned(), request.clone()) {
            return Err(DomainError::NotFound);
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_infra::InMemoryCollection;

    fn service() -> RequestService {
        RequestService::new(Arc::new(InMemoryCollection::new()))
    }

    fn file(svc: &RequestService, email: &str, asset: &str, asset_type: Option<&str>) -> AssetRequest {
        svc.file(NewRequest {
            requester_email: email.to_string(),
            asset_id: None,
            asset_name: asset.to_string(),
            asset_type: asset_type.map(str::to_string),
            note: None,
        })
        .unwrap()
    }

    #[test]
    fn filing_starts_pending() {
        let svc = service();
        let request = file(&svc, "e@x.com", "Laptop", Some("Returnable"));
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(svc.list(None).len(), 1);
    }

    #[test]
    fn list_searches_by_requester_email_substring() {
        let svc = service();
        file(&svc, "alice@acme.com", "Laptop", None);
        file(&svc, "bob@acme.com", "Chair", None);
        file(&svc, "carol@other.org", "Desk", None);

        assert_eq!(svc.list(Some("acme")).len(), 2);
        assert_eq!(svc.list(Some("BOB")).len(), 1);
        assert_eq!(svc.list(Some("nobody")).len(), 0);
    }

    #[test]
    fn own_requests_filter_by_name_status_and_type() {
        let svc = service();
        let laptop = file(&svc, "e@x.com", "Laptop", Some("Returnable"));
        file(&svc, "e@x.com", "Notebook", Some("Non-returnable"));
        file(&svc, "other@x.com", "Laptop", Some("Returnable"));

        svc.set_status(laptop.id, RequestStatus::Approved).unwrap();

        let mine = svc.list_by_requester("e@x.com", &RequestFilter::default());
        assert_eq!(mine.len(), 2);

        let approved = svc.list_by_requester(
            "e@x.com",
            &RequestFilter {
                status: Some(RequestStatus::Approved),
                ..Default::default()
            },
        );
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].asset_name, "Laptop");

        let filtered = svc.list_by_requester(
            "e@x.com",
            &RequestFilter {
                search: Some("note".to_string()),
                asset_type: Some("Non-returnable".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].asset_name, "Notebook");
    }

    #[test]
    fn status_update_404s_on_missing_id_and_changes_nothing() {
        let svc = service();
        file(&svc, "e@x.com", "Laptop", None);

        let err = svc
            .set_status(RequestId::new(), RequestStatus::Approved)
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);

        let all = svc.list(None);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, RequestStatus::Pending);
    }
}
