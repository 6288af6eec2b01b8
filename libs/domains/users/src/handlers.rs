//! HTTP handlers for the account registry.
//!
//! Every operation answers with the uniform envelope
//! `{ success, message, result? }`; the password field never appears in a
//! response because results are converted to [`PublicUser`] at this boundary.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::{get, patch},
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, Envelope, PublicUser, UpdateUser};
use crate::query::ListQuery;
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, update_user, delete_user),
    components(schemas(
        CreateUser,
        UpdateUser,
        PublicUser,
        Envelope<PublicUser>,
        Envelope<Vec<PublicUser>>
    )),
    tags(
        (name = "Users", description = "Account registry endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", patch(update_user).delete(delete_user))
        .with_state(shared_service)
}

/// A path segment that is not a well-formed identifier cannot resolve to a
/// record, so it classifies as not-found (never as a bad request)
fn parse_id(raw: &str) -> UserResult<Uuid> {
    raw.parse::<Uuid>().map_err(|_| UserError::NotFound)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created", body = Envelope<PublicUser>),
        (status = 400, description = "Format mismatch, validation failure, or duplicate account/email", body = Envelope<PublicUser>),
        (status = 500, description = "Store failure", body = Envelope<PublicUser>)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> UserResult<Json<Envelope<PublicUser>>> {
    let Json(input) = payload?;
    let user = service.create(input).await?;
    Ok(Json(Envelope::ok(PublicUser::from(user))))
}

/// List users, optionally bounded by age
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching users", body = Envelope<Vec<PublicUser>>),
        (status = 500, description = "Store failure", body = Envelope<PublicUser>)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Query(query): Query<ListQuery>,
) -> UserResult<Json<Envelope<Vec<PublicUser>>>> {
    let users = service.list(query).await?;
    let result = users.into_iter().map(PublicUser::from).collect();
    Ok(Json(Envelope::ok(result)))
}

/// Partially update a user
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = Envelope<PublicUser>),
        (status = 400, description = "Format mismatch, validation failure, or duplicate account/email", body = Envelope<PublicUser>),
        (status = 404, description = "Unknown or malformed identifier", body = Envelope<PublicUser>),
        (status = 500, description = "Store failure", body = Envelope<PublicUser>)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUser>, JsonRejection>,
) -> UserResult<Json<Envelope<PublicUser>>> {
    // content-type check comes first, matching the create path
    let Json(input) = payload?;
    let id = parse_id(&id)?;
    let user = service.update(id, input).await?;
    Ok(Json(Envelope::ok(PublicUser::from(user))))
}

/// Delete a user, returning its last representation
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = Envelope<PublicUser>),
        (status = 404, description = "Unknown or malformed identifier", body = Envelope<PublicUser>),
        (status = 500, description = "Store failure", body = Envelope<PublicUser>)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> UserResult<Json<Envelope<PublicUser>>> {
    let id = parse_id(&id)?;
    let user = service.delete(id).await?;
    Ok(Json(Envelope::ok(PublicUser::from(user))))
}
