//! Purchase Errors

use salvo::http::StatusError;
use tracing::error;

use enrol_app::domain::purchases::EntitlementsError;

pub(crate) fn into_status_error(error: EntitlementsError) -> StatusError {
    match error {
        EntitlementsError::InvalidInput(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        EntitlementsError::StoreUnavailable(source) => {
            error!("failed to check purchase: {source}");

            StatusError::service_unavailable().brief("Purchase status could not be determined")
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use enrol_app::{domain::purchases::PurchaseStoreError, ids::EmptyIdentifier};

    use super::*;

    #[test]
    fn invalid_input_maps_to_400() {
        let error = into_status_error(EntitlementsError::from(EmptyIdentifier("content id")));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "content id must not be empty");
    }

    #[test]
    fn store_unavailable_maps_to_503() {
        let error = into_status_error(EntitlementsError::StoreUnavailable(
            PurchaseStoreError::MalformedDocument("missing status".to_string()),
        ));

        assert_eq!(error.code, StatusCode::SERVICE_UNAVAILABLE);
    }
}
