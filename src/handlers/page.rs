use crate::http::html_response;

const CHAT_PAGE: &str = include_str!("chat_page.html");

pub fn handle_index() -> warp::reply::Response {
    log::debug!("serving chat page");
    html_response(CHAT_PAGE)
}
