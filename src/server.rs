use crate::app_state::AppState;
use crate::config::ServerConfig;
use crate::prediction::first_value_per_field;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, HttpServer, get, post, web};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn render_index(
    app_state: &AppState,
    prediction_text: Option<&str>,
) -> Result<HttpResponse, actix_web::Error> {
    let page = app_state.renderer.index(prediction_text).map_err(|e| {
        log::error!("Failed to render page: {}", e);
        actix_web::error::ErrorInternalServerError(e)
    })?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page))
}

#[get("/")]
pub async fn home(
    _req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    render_index(&app_state, None)
}

/// Form fields in first-seen order, one value per field. Bodies that are not
/// urlencoded forms carry no fields.
fn decode_form(
    req: &HttpRequest,
    body: &[u8],
) -> Result<Vec<(String, String)>, serde_urlencoded::de::Error> {
    if req.content_type() != FORM_CONTENT_TYPE {
        if !body.is_empty() {
            log::debug!("Ignoring non-form body of type '{}'", req.content_type());
        }
        return Ok(Vec::new());
    }
    let pairs = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)?;
    Ok(first_value_per_field(pairs))
}

#[post("/predict")]
pub async fn predict(
    req: HttpRequest,
    body: web::Bytes,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    let text = match decode_form(&req, &body) {
        Ok(pairs) => app_state.prediction_text(&pairs),
        Err(e) => {
            log::warn!("Malformed form body: {}", e);
            format!("An error occurred: {}", e)
        }
    };
    render_index(&app_state, Some(&text))
}

#[get("/health")]
pub async fn health(_req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().body("Ok")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home).service(predict).service(health);
}

pub async fn startup(config: ServerConfig, app_state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(app_state);

    log::info!("Starting server at {}:{}", config.host, config.port);

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(app_state.clone())
            .configure(configure)
    })
    .bind((config.host, config.port))?
    .run()
    .await?;

    std::io::Result::Ok(())
}
