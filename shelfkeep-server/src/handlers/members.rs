//! Member handlers

use super::books::{default_page, default_per_page, sanitize_page};
use crate::error::ApiError;
use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shelfkeep_core::{BorrowEvent, CirculationError, Member};

/// Query parameters for listing members
#[derive(Debug, Deserialize)]
pub struct ListMembersQuery {
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Name or member ID substring
    pub search: Option<String>,
}

/// Member summary for list responses
#[derive(Debug, Serialize)]
pub struct MemberSummary {
    pub name: String,
    pub member_id: String,
    pub borrowed_books: Vec<String>,
    pub can_borrow: bool,
}

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name().to_string(),
            member_id: member.member_id().to_string(),
            borrowed_books: member.borrowed_books().to_vec(),
            can_borrow: member.can_borrow(),
        }
    }
}

/// Full member record including borrow history
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    #[serde(flatten)]
    pub summary: MemberSummary,
    pub history: Vec<BorrowEvent>,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            summary: MemberSummary::from(member),
            history: member.history().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListMembersResponse {
    pub members: Vec<MemberSummary>,
    pub total: u32,
    pub page: u32,
    pub per_page: u32,
}

/// List members in registration order
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<ListMembersQuery>,
) -> Json<ListMembersResponse> {
    let catalog = state.catalog.read().await;

    let members: Vec<&Member> = match query.search.as_deref() {
        Some(search) => catalog.search_members(search),
        None => catalog.list_members().iter().collect(),
    };
    let total = members.len() as u32;

    let page = sanitize_page(query.page);
    let start = (page - 1).saturating_mul(query.per_page) as usize;
    let members = members
        .into_iter()
        .skip(start)
        .take(query.per_page as usize)
        .map(MemberSummary::from)
        .collect();

    Json(ListMembersResponse {
        members,
        total,
        page,
        per_page: query.per_page,
    })
}

/// Get one member with their history
pub async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> Result<Json<MemberResponse>, ApiError> {
    let catalog = state.catalog.read().await;
    let member = catalog.find_member(&member_id).map(MemberResponse::from);
    member
        .map(Json)
        .ok_or_else(|| CirculationError::MemberNotFound(member_id).into())
}

/// Request body for registering a member
#[derive(Debug, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub member_id: String,
}

/// Register a member
pub async fn add_member(
    State(state): State<AppState>,
    Json(body): Json<NewMember>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    let response = state
        .mutate(|catalog| {
            catalog
                .add_member(&body.name, &body.member_id)
                .map(MemberResponse::from)
        })
        .await?;

    state.broadcast(ServerEvent::MemberAdded {
        member_id: response.summary.member_id.clone(),
        name: response.summary.name.clone(),
    });
    Ok((StatusCode::CREATED, Json(response)))
}

/// Delete a member after taking back everything they hold
pub async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let held = state
        .mutate(|catalog| {
            let held: Vec<String> = catalog
                .loaned_books()
                .into_iter()
                .filter(|b| b.borrower_id() == Some(member_id.as_str()))
                .map(|b| b.isbn().to_string())
                .collect();
            catalog.remove_member(&member_id).map(|_| held)
        })
        .await?;

    for isbn in held {
        state.broadcast(ServerEvent::BookReturned {
            isbn,
            member_id: member_id.clone(),
        });
    }
    tracing::info!(member_id = %member_id, "member deleted");
    state.broadcast(ServerEvent::MemberRemoved { member_id });
    Ok(StatusCode::NO_CONTENT)
}
