//! Shared response envelope types for API handlers.

use serde::Serialize;
use timeslot_core::types::DbId;

/// Standard `{ "data": T }` response envelope for collections.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "id": ... }` returned by create endpoints.
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: DbId,
}

/// `{ "status": "ok" }` acknowledgment for update and delete.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}
