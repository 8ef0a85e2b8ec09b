use axum::response::Html;

const ADMIN_PAGE: &str = include_str!("../../assets/admin.html");

/// GET /admin
///
/// Static shell; all data is fetched by the page itself with the admin's token.
pub async fn admin_page() -> Html<&'static str> {
    Html(ADMIN_PAGE)
}
