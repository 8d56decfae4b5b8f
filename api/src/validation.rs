//! Request validation
//!
//! Pure validation profiles returning `Result<T, FieldErrors>`, plus the axum
//! extractors that run them before a handler. A failed profile rejects the
//! whole request with a 422 carrying every collected field error, so the
//! handler (and the service behind it) never runs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts},
    Form, Json,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::entities::{NewTodo, TodoChanges, TodoId};
use crate::error::{AppError, FieldErrors};

pub const TITLE_MIN_CHARS: usize = 2;
pub const TITLE_MAX_CHARS: usize = 100;

const ID: &str = "id";
const TITLE: &str = "title";
const COMPLETED: &str = "completed";

const ID_FORMAT: &str = "Invalid todo ID format";
const ID_REQUIRED: &str = "Todo ID is required";
const TITLE_REQUIRED: &str = "Title is required";
const TITLE_BLANK_UPDATE: &str = "Title cannot be empty if provided";
const TITLE_LENGTH: &str = "Title must be between 2 and 100 characters";
const TITLE_NOT_STRING: &str = "Title must be a string";
const COMPLETED_NOT_BOOL: &str = "Completed must be a boolean value";

/// Validate a todo ID path segment (hyphenated UUID form only)
pub fn validate_id(raw: &str) -> Result<TodoId, FieldErrors> {
    let mut errors = FieldErrors::new();

    let parsed = if raw.len() == 36 {
        Uuid::parse_str(raw).ok()
    } else {
        None
    };
    if parsed.is_none() {
        errors.push(ID, ID_FORMAT);
    }
    if raw.trim().is_empty() {
        errors.push(ID, ID_REQUIRED);
    }

    match parsed {
        Some(id) if errors.is_empty() => Ok(TodoId(id)),
        _ => Err(errors),
    }
}

/// Validate a creation body: `title` is required
pub fn validate_create(body: &Value) -> Result<NewTodo, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = match body.get(TITLE) {
        None | Some(Value::Null) => check_title("", TITLE_REQUIRED, &mut errors),
        Some(Value::String(raw)) => check_title(raw, TITLE_REQUIRED, &mut errors),
        Some(_) => {
            errors.push(TITLE, TITLE_NOT_STRING);
            None
        }
    };

    match title {
        Some(title) if errors.is_empty() => Ok(NewTodo { title }),
        _ => Err(errors),
    }
}

/// Validate an update body: every field is optional, but constrained when present
pub fn validate_update(body: &Value) -> Result<TodoChanges, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut changes = TodoChanges::default();

    match body.get(TITLE) {
        None => {}
        Some(Value::Null) => {
            check_title("", TITLE_BLANK_UPDATE, &mut errors);
        }
        Some(Value::String(raw)) => {
            changes.title = check_title(raw, TITLE_BLANK_UPDATE, &mut errors);
        }
        Some(_) => errors.push(TITLE, TITLE_NOT_STRING),
    }

    match body.get(COMPLETED) {
        None => {}
        Some(Value::Bool(completed)) => changes.completed = Some(*completed),
        Some(_) => errors.push(COMPLETED, COMPLETED_NOT_BOOL),
    }

    errors.into_result(changes)
}

/// Trim a title and check it against the length bounds.
/// Returns the trimmed title when it passes.
fn check_title(raw: &str, blank_message: &str, errors: &mut FieldErrors) -> Option<String> {
    let title = raw.trim();
    let mut valid = true;

    if title.is_empty() {
        errors.push(TITLE, blank_message);
        valid = false;
    }

    // Bounds count characters, not bytes.
    let len = title.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len) {
        errors.push(TITLE, TITLE_LENGTH);
        valid = false;
    }

    valid.then(|| title.to_string())
}

/// A JSON body that can be validated into a typed value
pub trait ValidateBody: Sized {
    fn validate(body: &Value) -> Result<Self, FieldErrors>;
}

impl ValidateBody for NewTodo {
    fn validate(body: &Value) -> Result<Self, FieldErrors> {
        validate_create(body)
    }
}

impl ValidateBody for TodoChanges {
    fn validate(body: &Value) -> Result<Self, FieldErrors> {
        validate_update(body)
    }
}

/// Extractor for a validated `:id` path parameter
#[derive(Debug, Clone, Copy)]
pub struct TodoIdParam(pub TodoId);

#[async_trait]
impl<S> FromRequestParts<S> for TodoIdParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;

        validate_id(&raw)
            .map(TodoIdParam)
            .map_err(AppError::unprocessable_entity)
    }
}

/// Extractor for a request body that passed its validation profile
///
/// JSON and urlencoded form bodies are parsed; a request with any other (or
/// no) content type is validated as an empty object. Only a body that claims
/// to be JSON or a form and fails to parse is a 400.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|mime| mime.starts_with("application/x-www-form-urlencoded"))
}

/// Parse the body into a JSON value, falling back to `{}` when it carries none
async fn body_value<S>(req: Request, state: &S) -> Result<Value, AppError>
where
    S: Send + Sync,
{
    if is_form(&req) {
        // Form fields always arrive as text.
        let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
        let object = fields
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect::<Map<_, _>>();
        return Ok(Value::Object(object));
    }

    match Json::<Value>::from_request(req, state).await {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Value::Object(Map::new())),
        Err(rejection) => Err(rejection.into()),
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidateBody + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = body_value(req, state).await?;

        T::validate(&body)
            .map(Validated)
            .map_err(AppError::unprocessable_entity)
    }
}
