/// Plain-text greeting, useful as a smoke test.
#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses((status = 200, description = "Gateway is up", body = String))
)]
pub async fn root() -> &'static str {
    "Hello World!"
}
