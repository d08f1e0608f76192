use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_core::{ApplicationError, DomainError, InterfaceError, ProductId};
use catalog_db::RepositoryError;
use tracing::{error, warn};
use uuid::Uuid;

/// Error surfaced by a catalog route.
///
/// Every variant renders as a bare status code; the detail only reaches the
/// log, tagged with the correlation id.
#[derive(Debug)]
pub struct ApiError {
    pub interface: InterfaceError,
    product_id: Option<ProductId>,
}

impl ApiError {
    pub fn not_found(id: ProductId) -> Self {
        Self {
            interface: ApplicationError::NotFound(id).into_interface(new_correlation_id()),
            product_id: Some(id),
        }
    }

    pub fn bad_request(error: DomainError) -> Self {
        let product_id = match &error {
            DomainError::IdMismatch { path, .. } => Some(*path),
            DomainError::PriceOutOfRange { .. } => None,
        };
        Self {
            interface: ApplicationError::Domain(error).into_interface(new_correlation_id()),
            product_id,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.interface {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
            InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        Self {
            interface: ApplicationError::from(error).into_interface(new_correlation_id()),
            product_id: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(
                event_name = "catalog.request.failed",
                correlation_id = %self.interface.correlation_id(),
                status = status.as_u16(),
                error = %self.interface,
                "catalog request failed"
            );
        } else {
            warn!(
                event_name = "catalog.request.rejected",
                correlation_id = %self.interface.correlation_id(),
                product_id = self.product_id.map(|id| id.0),
                status = status.as_u16(),
                detail = %self.interface,
                "{}",
                self.interface.user_message()
            );
        }

        status.into_response()
    }
}

fn new_correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}
