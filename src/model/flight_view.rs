use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::flight::FlightSummaryDto;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightViewDto {
    pub id: i32,
    pub flight: FlightSummaryDto,
    /// Time of the most recent view.
    pub viewed_at: DateTime<Utc>,
    pub view_count: i32,
}

/// Query string of the view history endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ViewHistoryQuery {
    /// Maximum number of entries, most recent first. All entries when omitted.
    pub limit: Option<u64>,
}
