use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use platewise_core::{CategoricalField, Error, NumericField, Query};
use platewise_similarity::{RecommendationView, Recommender};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Deserialize)]
struct RecommendRequest {
    #[serde(flatten)]
    query: Query,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct Bounds<T> {
    min: T,
    max: T,
}

#[derive(Serialize)]
struct LimitInfo {
    default: usize,
    max: usize,
}

#[derive(Serialize)]
struct OptionsResponse<'a> {
    categories: BTreeMap<&'static str, &'a [String]>,
    ranges: BTreeMap<&'static str, Option<Bounds<f64>>>,
    weights: Bounds<f64>,
    limit: LimitInfo,
}

#[derive(Serialize)]
struct CatalogInfo {
    records: usize,
    distinct_names: usize,
    dimension: usize,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(recommender: Arc<Recommender>, port: u16) -> std::io::Result<()> {
        info!(port, "Starting REST API");
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(recommender.clone()))
                .configure(configure_routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register every endpoint. Expects `web::Data<Arc<Recommender>>` in app data.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/options", web::get().to(options))
        .route("/catalog", web::get().to(catalog_info))
        .route("/recommend", web::post().to(recommend))
        .route("/recommend/explain", web::post().to(explain));
}

/// Client mistakes map to 400; anything else is our fault.
fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        Error::FitMismatch { .. } | Error::InvalidN(_) | Error::InvalidQuery(_) => {
            HttpResponse::BadRequest().json(body)
        }
        _ => HttpResponse::InternalServerError().json(body),
    }
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

async fn options(recommender: web::Data<Arc<Recommender>>) -> ActixResult<HttpResponse> {
    let vocabulary = recommender.vocabulary();
    let config = recommender.config();

    let categories = CategoricalField::ALL
        .iter()
        .map(|&field| (field.name(), vocabulary.categories(field)))
        .collect();
    let ranges = NumericField::ALL
        .iter()
        .map(|&field| {
            let bounds = vocabulary.range(field).map(|r| Bounds {
                min: r.min,
                max: r.max,
            });
            (field.name(), bounds)
        })
        .collect();

    Ok(HttpResponse::Ok().json(OptionsResponse {
        categories,
        ranges,
        weights: Bounds {
            min: config.weight_min,
            max: config.weight_max,
        },
        limit: LimitInfo {
            default: config.default_limit,
            max: config.max_limit,
        },
    }))
}

async fn catalog_info(recommender: web::Data<Arc<Recommender>>) -> ActixResult<HttpResponse> {
    let catalog = recommender.catalog();
    Ok(HttpResponse::Ok().json(CatalogInfo {
        records: catalog.len(),
        distinct_names: catalog.distinct_names(),
        dimension: recommender.vocabulary().dimension(),
    }))
}

async fn recommend(
    recommender: web::Data<Arc<Recommender>>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    let started = Instant::now();
    let limit = req.limit.unwrap_or(recommender.config().default_limit);

    match recommender.recommend(&req.query, limit) {
        Ok(ranked) => {
            debug!(limit, returned = ranked.len(), "Served recommendation");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "result": RecommendationView::from_ranked_list(&ranked),
                "stats": recommender.stats(ranked.len()),
                "time": started.elapsed().as_secs_f64(),
            })))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn explain(
    recommender: web::Data<Arc<Recommender>>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    let started = Instant::now();
    let limit = req.limit.unwrap_or(recommender.config().default_limit);

    match recommender.explain(&req.query, limit) {
        Ok(explained) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "stats": recommender.stats(explained.len()),
            "result": explained,
            "time": started.elapsed().as_secs_f64(),
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}
