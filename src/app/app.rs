use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::admin_user_conf::AdminUserConfig;
use crate::config::app_conf::AppConfig;
use crate::model::user::ROLE_ADMIN;
use crate::service::demand_service::DemandServiceImpl;
use crate::service::property_service::PropertyServiceImpl;
use crate::service::user_service::{UserService, UserServiceImpl};

pub struct App {
    config: AppConfig,
    router: Router,
    pub user_service: Arc<UserServiceImpl>,
    pub property_service: Arc<PropertyServiceImpl>,
    pub demand_service: Arc<DemandServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();

        use crate::config::jwt_conf::JwtConfig;
        use crate::config::mongo_conf::MongoConfig;
        use crate::config::sheets_conf::SheetsConfig;
        use crate::repository::demand_repo::MongoDemandRepository;
        use crate::repository::property_repo::MongoPropertyRepository;
        use crate::repository::user_repo::MongoUserRepository;
        use crate::util::events::DemandEvents;
        use crate::util::jwt::JwtTokenUtilsImpl;
        use crate::util::sheets::{GoogleSheetsClient, SheetLogAppender};

        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");

        let user_repo = Arc::new(MongoUserRepository::new(&mongo_config).await.expect("User repo error"));
        let property_repo = Arc::new(MongoPropertyRepository::new(&mongo_config).await.expect("Property repo error"));
        let demand_repo = Arc::new(MongoDemandRepository::new(&mongo_config).await.expect("Demand repo error"));

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let user_service = Arc::new(UserServiceImpl::new(user_repo, jwt_utils.clone()));

        // The spreadsheet log is optional at startup; submissions fail
        // per-request when the credentials are absent.
        let sheet_log: Option<Arc<dyn SheetLogAppender>> = match SheetsConfig::from_env() {
            Ok(conf) => Some(Arc::new(GoogleSheetsClient::new(conf))),
            Err(e) => {
                warn!("⚠️ Google Sheets config not loaded: {e} (property submissions will be rejected)");
                None
            }
        };
        let property_service = Arc::new(PropertyServiceImpl::new(property_repo.clone(), sheet_log));

        let events = Arc::new(DemandEvents::default());
        let demand_service = Arc::new(DemandServiceImpl::new(demand_repo, property_repo, events));

        use crate::middlewares::auth_middleware::AuthState;
        let auth_state = Arc::new(AuthState {
            jwt_utils: jwt_utils.clone(),
            user_service: user_service.clone(),
        });

        let mut app = App {
            config,
            router: Router::new(),
            user_service,
            property_service,
            demand_service,
        };
        app.router = app.create_router(auth_state);
        app.create_first_admin_user().await;
        app
    }

    fn create_router(&self, auth_state: Arc<crate::middlewares::auth_middleware::AuthState>) -> Router {
        use crate::router::admin_router::admin_router;
        use crate::router::demand_router::demand_router;
        use crate::router::property_router::property_router;
        use crate::router::user_router::user_router;
        Router::new()
            .merge(user_router(self.user_service.clone()))
            .merge(property_router(self.property_service.clone(), auth_state.clone()))
            .merge(demand_router(self.demand_service.clone(), auth_state.clone()))
            .merge(admin_router(self.user_service.clone(), auth_state))
            .route("/health", get(|| async { "OK" }))
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(self.config.host.parse().expect("Invalid host"), self.config.port);
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind address");
        axum::serve(listener, self.router).await.expect("Failed to start server");
    }

    async fn create_first_admin_user(&self) {
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                warn!("Admin user config not loaded: {e}");
                return;
            }
        };

        match self
            .user_service
            .register(admin_conf.email.clone(), admin_conf.password.clone(), ROLE_ADMIN)
            .await
        {
            Ok(_) => info!("First admin user created."),
            Err(crate::util::error::ServiceError::Conflict(_)) => {
                info!("Admin user already exists, skipping creation.");
            }
            Err(e) => error!("Failed to create admin user: {e}"),
        }
    }
}
