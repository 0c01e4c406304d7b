//! Server initialization and routing
//!
//! One binary serves one of the four services. Each service gets its own
//! in-memory stores and typed clients for the peers it calls; the shared
//! routes (`/health`, `/ping`, `/metrics`) and the middleware stack are the
//! same for all of them.

use crate::api::health;
use crate::client::{CourtClient, IdentityClient, MupClient, PoliceClient, ServiceClient};
use crate::config::Config;
use crate::domain::{CourtHearing, Role};
use crate::domains::court::context::CourtState;
use crate::domains::court::service::{
    CrimeReportService, HearingService, SuspensionService, WarrantService,
};
use crate::domains::mup::context::MupState;
use crate::domains::mup::service::{
    DrivingBanService, PermitService, RegistrationService, VehicleService, WarrantGate,
};
use crate::domains::police::context::PoliceState;
use crate::domains::police::service::{InspectionService, ViolationService};
use crate::domains::statistics::context::StatisticsState;
use crate::domains::statistics::service::StatisticsService;
use crate::domains::{court, mup, police, statistics};
use crate::jwt::JwtManager;
use crate::middleware::{deadline_middleware, ObservabilityLayer, RoleGate, SanitizedMakeSpan};
use crate::repository::InMemoryRepository;
use anyhow::Result;
use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Router};
use clap::ValueEnum;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Service served by this process
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceKind {
    Court,
    Mup,
    Police,
    Statistics,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Court => "court",
            ServiceKind::Mup => "mup",
            ServiceKind::Police => "police",
            ServiceKind::Statistics => "statistics",
        }
    }
}

/// Run the HTTP server for `kind`
pub async fn run(config: Config, kind: ServiceKind, metrics: Option<PrometheusHandle>) -> Result<()> {
    let app = build_router(kind, &config, metrics)?;

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!(service = kind.as_str(), "HTTP server started on {}", http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(service = kind.as_str(), "HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Build the complete router for `kind`. Fails when the configuration is
/// out of range or a peer the service calls has no configured URL.
pub fn build_router(
    kind: ServiceKind,
    config: &Config,
    metrics: Option<PrometheusHandle>,
) -> Result<Router> {
    config.validate()?;
    let jwt_manager = JwtManager::new(&config.jwt);

    let routes = match kind {
        ServiceKind::Court => court::routes::routes(&jwt_manager).with_state(court_state(config)?),
        ServiceKind::Mup => mup::routes::routes(&jwt_manager).with_state(mup_state(config)?),
        ServiceKind::Police => {
            police::routes::routes(&jwt_manager).with_state(police_state(config)?)
        }
        ServiceKind::Statistics => {
            statistics::routes::routes(&jwt_manager).with_state(statistics_state(config)?)
        }
    };

    Ok(with_shared_routes(kind, &jwt_manager, routes, config, metrics))
}

fn with_shared_routes(
    kind: ServiceKind,
    jwt_manager: &JwtManager,
    routes: Router,
    config: &Config,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let service = kind.as_str();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let ping = RoleGate::new(jwt_manager.clone(), &[Role::User, Role::Admin])
        .protect(Router::new().route("/ping", get(health::ping)));

    Router::new()
        .route("/health", get(move || async move { health::health(service) }))
        .route("/metrics", get(health::metrics).with_state(metrics))
        .merge(ping)
        .merge(routes)
        .layer(from_fn_with_state(config.call_budget(), deadline_middleware))
        .layer(ObservabilityLayer)
        .layer(TraceLayer::new_for_http().make_span_with(SanitizedMakeSpan::new(service)))
        .layer(cors)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            config.request_timeout(),
        ))
}

fn peer(name: &'static str, base_url: &str, config: &Config) -> Result<ServiceClient> {
    ServiceClient::new(name, base_url, &config.outbound)
}

fn court_state(config: &Config) -> Result<CourtState> {
    let people = Arc::new(IdentityClient::new(peer(
        "identity",
        config.peers.identity()?,
        config,
    )?));
    let mup = Arc::new(MupClient::new(peer("mup", config.peers.mup()?, config)?));
    let hearings: Arc<InMemoryRepository<CourtHearing>> = Arc::new(InMemoryRepository::new());

    Ok(CourtState {
        hearings: Arc::new(HearingService::new(hearings.clone(), config.court.clone())),
        warrants: Arc::new(WarrantService::new(Arc::new(InMemoryRepository::new()))),
        suspensions: Arc::new(SuspensionService::new(
            Arc::new(InMemoryRepository::new()),
            mup,
        )),
        crime_reports: Arc::new(CrimeReportService::new(
            hearings,
            Arc::new(InMemoryRepository::new()),
            people,
            config.court.clone(),
        )),
    })
}

fn mup_state(config: &Config) -> Result<MupState> {
    let court = Arc::new(CourtClient::new(peer("court", config.peers.court()?, config)?));
    let gate = WarrantGate::new(court);
    let driving_bans = DrivingBanService::new(Arc::new(InMemoryRepository::new()));
    let vehicles = VehicleService::new(Arc::new(InMemoryRepository::new()));

    Ok(MupState {
        permits: Arc::new(PermitService::new(
            Arc::new(InMemoryRepository::new()),
            driving_bans.clone(),
            gate.clone(),
        )),
        registrations: Arc::new(RegistrationService::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(InMemoryRepository::new()),
            vehicles.clone(),
            driving_bans.clone(),
            gate,
        )),
        vehicles,
        driving_bans,
    })
}

fn police_state(config: &Config) -> Result<PoliceState> {
    let people = Arc::new(IdentityClient::new(peer(
        "identity",
        config.peers.identity()?,
        config,
    )?));
    let mup = Arc::new(MupClient::new(peer("mup", config.peers.mup()?, config)?));
    let court = Arc::new(CourtClient::new(peer("court", config.peers.court()?, config)?));
    let violations = ViolationService::new(Arc::new(InMemoryRepository::new()));

    Ok(PoliceState {
        inspections: Arc::new(InspectionService::new(
            violations.clone(),
            people,
            mup,
            court,
        )),
        violations,
    })
}

fn statistics_state(config: &Config) -> Result<StatisticsState> {
    let police = Arc::new(PoliceClient::new(peer(
        "police",
        config.peers.police()?,
        config,
    )?));
    let mup = Arc::new(MupClient::new(peer("mup", config.peers.mup()?, config)?));

    Ok(StatisticsState {
        statistics: Arc::new(StatisticsService::new(
            Arc::new(InMemoryRepository::new()),
            police,
            mup,
        )),
    })
}
