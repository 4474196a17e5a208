//! HTTP request handlers for the library API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler acquires the library lock once and releases it before returning,
//! so no lock is held across an await point.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{BookId, MemberId};

use super::request::{CreateBookRequest, CreateMemberRequest};
use super::response::{
    ApiError, ApiErrorResponse, BookResponse, BorrowResponse, MemberResponse, ReturnResponse,
    TransactionResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
///
/// The collection endpoints answer with and without a trailing slash.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route("/books/", get(list_books_handler).post(create_book_handler))
        .route("/books/:book_id", get(get_book_handler))
        .route("/books/:book_id/borrow/:member_id", post(borrow_handler))
        .route("/books/:book_id/return/:member_id", post(return_handler))
        .route("/books/:book_id/fine/:member_id", get(fine_handler))
        .route(
            "/members",
            get(list_members_handler).post(create_member_handler),
        )
        .route(
            "/members/",
            get(list_members_handler).post(create_member_handler),
        )
        .route("/members/:member_id", get(get_member_handler))
        .route("/transactions", get(list_transactions_handler))
        .route("/transactions/overdue", get(overdue_handler))
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed serde error
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Unwraps path identifiers, turning extractor rejections into API errors.
fn path_ids<T>(path: Result<Path<T>, PathRejection>, correlation_id: Uuid) -> ApiResult<T> {
    path.map(|Path(ids)| ids).map_err(|rejection| {
        let body_text = rejection.body_text();
        warn!(correlation_id = %correlation_id, error = %body_text, "Invalid path parameter");
        ApiErrorResponse::bad_request(ApiError::invalid_path(body_text))
    })
}

fn created<T: Serialize>(body: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(body))
}

/// Handler for GET /.
async fn index_handler() -> impl IntoResponse {
    Json(json!({
        "message": "Library Management System API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "books": "/books",
            "members": "/members",
            "borrow": "/books/{book_id}/borrow/{member_id}",
            "return": "/books/{book_id}/return/{member_id}",
            "fine": "/books/{book_id}/fine/{member_id}",
            "transactions": "/transactions",
            "overdue": "/transactions/overdue"
        }
    }))
}

/// Handler for GET /books.
async fn list_books_handler(State(state): State<AppState>) -> Json<Vec<BookResponse>> {
    let library = state.read();
    Json(library.list_books().map(BookResponse::from).collect())
}

/// Handler for POST /books.
async fn create_book_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;
    let new_book = request.validate().inspect_err(|e| {
        warn!(correlation_id = %correlation_id, error = %e, "Book rejected");
    })?;

    let mut library = state.write();
    let book = library.create_book(new_book);
    info!(correlation_id = %correlation_id, book_id = %book.id, "Created book");
    Ok(created(BookResponse::from(book)))
}

/// Handler for GET /books/{book_id}.
async fn get_book_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<BookResponse>> {
    let book_id = BookId(path_ids(path, Uuid::new_v4())?);
    let library = state.read();
    Ok(Json(BookResponse::from(library.book(book_id)?)))
}

/// Handler for GET /members.
async fn list_members_handler(State(state): State<AppState>) -> Json<Vec<MemberResponse>> {
    let library = state.read();
    Json(library.list_members().map(MemberResponse::from).collect())
}

/// Handler for POST /members.
async fn create_member_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateMemberRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;
    let new_member = request.validate().inspect_err(|e| {
        warn!(correlation_id = %correlation_id, error = %e, "Member rejected");
    })?;

    let mut library = state.write();
    let member = library.create_member(new_member);
    info!(correlation_id = %correlation_id, member_id = %member.id, "Created member");
    Ok(created(MemberResponse::from(member)))
}

/// Handler for GET /members/{member_id}.
async fn get_member_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<MemberResponse>> {
    let member_id = MemberId(path_ids(path, Uuid::new_v4())?);
    let library = state.read();
    Ok(Json(MemberResponse::from(library.member(member_id)?)))
}

/// Handler for POST /books/{book_id}/borrow/{member_id}.
async fn borrow_handler(
    State(state): State<AppState>,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> ApiResult<Json<BorrowResponse>> {
    let correlation_id = Uuid::new_v4();
    let (book_id, member_id) = path_ids(path, correlation_id)?;
    info!(correlation_id = %correlation_id, book_id, member_id, "Processing borrow request");

    let receipt = state.write().borrow(BookId(book_id), MemberId(member_id))?;
    Ok(Json(BorrowResponse::from(receipt)))
}

/// Handler for POST /books/{book_id}/return/{member_id}.
async fn return_handler(
    State(state): State<AppState>,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> ApiResult<Json<ReturnResponse>> {
    let correlation_id = Uuid::new_v4();
    let (book_id, member_id) = path_ids(path, correlation_id)?;
    info!(correlation_id = %correlation_id, book_id, member_id, "Processing return request");

    let receipt = state
        .write()
        .return_book(BookId(book_id), MemberId(member_id))?;
    Ok(Json(ReturnResponse::from(receipt)))
}

/// Handler for GET /books/{book_id}/fine/{member_id}.
async fn fine_handler(
    State(state): State<AppState>,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let (book_id, member_id) = path_ids(path, Uuid::new_v4())?;
    let fine = state
        .read()
        .assess_fine(BookId(book_id), MemberId(member_id))?;
    Ok(Json(json!({
        "book_id": book_id,
        "member_id": member_id,
        "fine_amount": fine.amount,
        "days_overdue": fine.days_overdue,
        "due_date": fine.due_date,
    })))
}

/// Handler for GET /transactions.
async fn list_transactions_handler(
    State(state): State<AppState>,
) -> Json<Vec<TransactionResponse>> {
    let library = state.read();
    let now = library.now();
    Json(
        library
            .transactions()
            .iter()
            .map(|tx| TransactionResponse::new(tx, now))
            .collect(),
    )
}

/// Handler for GET /transactions/overdue.
async fn overdue_handler(State(state): State<AppState>) -> Json<Vec<TransactionResponse>> {
    let library = state.read();
    let now = library.now();
    Json(
        library
            .overdue_loans()
            .into_iter()
            .map(|tx| TransactionResponse::new(tx, now))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LendingPolicy, SeedConfig};
    use crate::library::Library;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        let mut library = Library::new(LendingPolicy::default());
        library.seed(&SeedConfig::default()).unwrap();
        create_router(AppState::new(library))
    }

    async fn send(router: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_index_lists_endpoints() {
        let (status, body) = send(create_test_router(), "GET", "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["books"], "/books");
    }

    #[tokio::test]
    async fn test_non_numeric_path_is_json_error() {
        let (status, body) = send(create_test_router(), "POST", "/books/abc/borrow/1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_PATH");
    }

    #[tokio::test]
    async fn test_get_unknown_member_is_404() {
        let (status, body) = send(create_test_router(), "GET", "/members/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Member not found: 99");
    }

    #[tokio::test]
    async fn test_create_book_without_content_type() {
        let response = create_test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/books")
                    .body(Body::from(r#"{"title":"A","author":"B","total_copies":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
