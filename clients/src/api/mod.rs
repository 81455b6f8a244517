pub mod responses;
pub mod wallet;

use serde::Serialize;

pub(crate) enum RequestMode<T: Serialize> {
    Json(T),
    Send,
}
