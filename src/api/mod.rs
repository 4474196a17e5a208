//! HTTP API module for the library catalog.
//!
//! This module provides the REST endpoints that expose the catalog and
//! lending operations over JSON.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CreateBookRequest, CreateMemberRequest};
pub use response::{
    ApiError, ApiErrorResponse, BookResponse, BorrowResponse, MemberResponse, ReturnResponse,
    TransactionResponse,
};
pub use state::AppState;
