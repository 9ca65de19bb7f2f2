use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServiceDefaults};
use models::{Activity, Class, Grade, Reservation, Student, Teacher};
use service::{
    activities::ActivityService,
    crud::CrudService,
    reference::{HttpReferenceValidator, ReferenceValidator},
    reservations::ReservationService,
    storage::{JsonFileDb, Table},
};
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{
    atividades::{self, AtividadesState},
    gerenciamento::{self, GerenciamentoState},
    reservas,
};

/// Which of the three services this process runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceKind {
    Gerenciamento,
    Atividades,
    Reservas,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Gerenciamento => gerenciamento::SERVICE,
            ServiceKind::Atividades => atividades::SERVICE,
            ServiceKind::Reservas => reservas::SERVICE,
        }
    }

    pub fn defaults(self) -> ServiceDefaults {
        let port = match self {
            ServiceKind::Gerenciamento => 5000,
            ServiceKind::Reservas => 5001,
            ServiceKind::Atividades => 5002,
        };
        ServiceDefaults { name: self.name(), port }
    }
}

fn peer_validator(cfg: &AppConfig) -> Result<Arc<dyn ReferenceValidator>, StartupError> {
    let validator = HttpReferenceValidator::new(&cfg.peer.gerenciamento_url, cfg.peer.timeout())
        .map_err(|e| StartupError::InvalidConfig(format!("http client: {e}")))?;
    info!(peer = %validator.base_url(), timeout_secs = cfg.peer.timeout_secs, "reference validator ready");
    Ok(Arc::new(validator))
}

/// Open the service database and assemble its router.
pub async fn build_app(kind: ServiceKind, cfg: &AppConfig) -> Result<Router, StartupError> {
    let db_path = cfg.storage.path();
    common::env::ensure_parent_dir(&db_path).await?;
    let db = JsonFileDb::open(db_path).await?;

    let app = match kind {
        ServiceKind::Gerenciamento => gerenciamento::build_router(GerenciamentoState {
            students: CrudService::new(Table::<Student>::new(db.clone())),
            teachers: CrudService::new(Table::<Teacher>::new(db.clone())),
            classes: CrudService::new(Table::<Class>::new(db)),
        }),
        ServiceKind::Atividades => atividades::build_router(AtividadesState {
            activities: ActivityService::new(Table::<Activity>::new(db.clone()), peer_validator(cfg)?),
            grades: CrudService::new(Table::<Grade>::new(db)),
        }),
        ServiceKind::Reservas => {
            reservas::build_router(ReservationService::new(Table::<Reservation>::new(db), peer_validator(cfg)?))
        }
    };
    Ok(app)
}

/// Public entry: build the app and run the HTTP server
pub async fn run(kind: ServiceKind, cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(kind, &cfg).await?;

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    info!(service = kind.name(), %addr, db_file = %cfg.storage.db_file, "starting http server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
