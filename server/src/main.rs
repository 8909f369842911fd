use std::time::Duration;

use axum::Json;
use axum::{
    extract::Path,
    http::{HeaderValue, Method, StatusCode},
    response::Html,
    routing::get,
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tower_http::cors::CorsLayer;

use rubix::config::SolverConfig;
use rubix::error::Error;
use rubix::scramble::{self, Scramble};
use rubix::solver::{self, SolveResult};

#[derive(Serialize)]
struct ScrambleResponse {
    facelets: String,
    scramble: Scramble,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // build our application with a route
    let cors = CorsLayer::new()
        .allow_origin("http://127.0.0.1:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET]);
    let app = Router::new()
        .route("/", get(index))
        .route("/solve/:puzzle", get(solve))
        .route("/scramble", get(scramble))
        .layer(cors);

    let app = app.fallback(index);

    // run it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:32125")
        .await
        .unwrap();
    log::info!("listening on http://{}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

async fn index() -> Html<&'static str> {
    Html("<p>Solve a cube: http://localhost:32125/solve/<Facelet String></p>
    Example: <a href=\"http://localhost:32125/solve/UUUUUUUUUFFFRRRBBBLLLLLLFFFRRRBBBLLLFFFRRRBBBDDDDDDDDD\">http://localhost:32125/solve/UUUUUUUUUFFFRRRBBBLLLLLLFFFRRRBBBLLLFFFRRRBBBDDDDDDDDD</a>
    <p>Get a scramble: <a href=\"http://localhost:32125/scramble\">http://localhost:32125/scramble</a></p>")
}

async fn scramble() -> Json<ScrambleResponse> {
    let mut rng = StdRng::from_entropy();
    let (cube, scramble) = scramble::gen_scramble(&mut rng);
    Json(ScrambleResponse {
        facelets: cube.to_string(),
        scramble,
    })
}

async fn solve(
    Path(puzzle): Path<String>,
) -> Result<Json<SolveResult>, (StatusCode, Json<ErrorResponse>)> {
    let config = SolverConfig {
        timeout: Some(Duration::from_secs(120)),
        ..Default::default()
    };
    let result = tokio::task::spawn_blocking(move || solver::solve_facelets(&puzzle, &config))
        .await
        .map_err(|e| {
            log::error!("solver task failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?;
    result.map(Json).map_err(|e| {
        let status = match e {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Timeout { .. } | Error::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (
            status,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })
}
