// Maps warp rejections to plain-text status responses

use std::convert::Infallible;

use tracing::error;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Rejection;

use super::text;

pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (message, status) = if err.is_not_found() {
        ("Not Found", StatusCode::NOT_FOUND)
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ("Method not allowed", StatusCode::METHOD_NOT_ALLOWED)
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        ("Payload too large", StatusCode::PAYLOAD_TOO_LARGE)
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        ("Content-Length required", StatusCode::LENGTH_REQUIRED)
    } else if err.find::<warp::filters::body::BodyDeserializeError>().is_some() {
        ("Invalid form body", StatusCode::BAD_REQUEST)
    } else if err.find::<warp::reject::MissingHeader>().is_some()
        || err.find::<warp::reject::InvalidHeader>().is_some()
    {
        ("Bad request", StatusCode::BAD_REQUEST)
    } else {
        error!(rejection = ?err, "unhandled rejection");
        ("Internal Server Error", StatusCode::INTERNAL_SERVER_ERROR)
    };

    Ok(text(message, status))
}
