use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use komiku_scraper::app_state::AppState;
use komiku_scraper::cache::TtlCache;
use komiku_scraper::config::Config;
use komiku_scraper::komiku;
use komiku_scraper::models::{MangaListResponse, SearchResponse};
use log::{error, info};
use std::collections::HashMap;
use std::time::Duration;

#[get("/")]
async fn listing(
    data: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let page = query
        .get("page")
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1);
    let manga_list =
        komiku::get_listing_page(&data.client, &data.cache, &data.config, page).await;
    HttpResponse::Ok().json(MangaListResponse { manga_list })
}

#[get("/search")]
async fn search(
    data: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let q = query.get("q").cloned().unwrap_or_default();
    let results = komiku::search_listing(&data.client, &data.cache, &data.config, &q).await;
    HttpResponse::Ok().json(SearchResponse { query: q, results })
}

#[get("/manga/detail/{slug}")]
async fn manga_detail(data: web::Data<AppState>, slug: web::Path<String>) -> impl Responder {
    match komiku::get_manga_detail(&data.client, &data.config, &slug).await {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => {
            error!("Error fetching manga details: {}", e);
            HttpResponse::InternalServerError().body("Error fetching manga details")
        }
    }
}

#[get("/chapter/{chapter_link:.*}")]
async fn chapter(data: web::Data<AppState>, chapter_link: web::Path<String>) -> impl Responder {
    match komiku::get_chapter_pages(&data.client, &data.config, &chapter_link).await {
        Ok(pages) => HttpResponse::Ok().json(pages),
        Err(e) => {
            error!("Error fetching chapter data: {}", e);
            HttpResponse::InternalServerError().body("Error fetching chapter data")
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    log4rs::init_file("log4rs.yml", Default::default()).unwrap();

    let config = Config::load();

    let client = reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36")
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .unwrap();

    let cache = TtlCache::new(Duration::from_secs(config.cache_ttl_secs));

    let addr = ("0.0.0.0", config.port);
    info!("Cache TTL: {}s", config.cache_ttl_secs);
    info!("Upstream: {} / {}", config.site_origin, config.api_origin);

    let data = web::Data::new(AppState {
        client,
        cache,
        config,
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Cors::permissive())
            .service(listing)
            .service(search)
            .service(manga_detail)
            .service(chapter)
    })
    .bind(addr)?;

    info!("Server running at http://localhost:{}", addr.1);
    server.run().await
}
