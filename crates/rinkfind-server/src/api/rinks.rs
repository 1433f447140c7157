use axum::{
    extract::{Query, State},
    Extension, Json,
};
use rinkfind_core::Rink;
use rinkfind_search::{SearchError, SearchRequest};
use tracing::Instrument;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, AppState};

/// Raw query pairs in request order. A repeated key is not an error; the
/// first occurrence wins.
type QueryPairs = Vec<(String, String)>;

fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

/// `GET /rinks?zipcode=..&radius=..`: rinks within `radius` km of `zipcode`.
pub(super) async fn search_rinks(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<Vec<Rink>>, ApiError> {
    let zipcode = first_value(&pairs, "zipcode");
    let radius = first_value(&pairs, "radius");
    let request = SearchRequest::from_params(zipcode, radius);
    let span = tracing::info_span!("search_rinks", request_id = %req_id.0);

    match state.search.search(&request).instrument(span).await {
        Ok(result) => Ok(Json(result.rinks)),
        Err(SearchError::CoordinatesNotFound { postal_code }) => {
            tracing::info!(
                request_id = %req_id.0,
                postal_code = %postal_code,
                "coordinates not found"
            );
            Err(ApiError::bad_request(
                "could not determine coordinates for this postal code",
            ))
        }
        Err(SearchError::Store(error)) => Err(map_store_error(&req_id.0, &error)),
    }
}
