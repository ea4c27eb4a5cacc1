use std::io::Error;
use std::sync::Arc;

use poem::{EndpointExt, Route, Server, listener::TcpListener, middleware::Tracing};
use poem_openapi::OpenApiService;
use tokio::main;

use whatsblaster::{
    application::{
        handlers::attempt_executor::AttemptExecutor,
        services::{gateway::MessageGateway, jwt::JwtService, run_registry::ActiveRuns},
        usecases::{
            authenticate_operator::AuthenticateOperatorUseCase,
            dispatch_messages::DispatchMessagesUseCase, list_countries::ListCountriesUseCase,
        },
    },
    config::{Config, GatewayConfig},
    infrastructure::{
        gateways::{GreenApiClient, SimulatedGateway},
        repositories::in_memory::StaticCountryDirectory,
    },
    presentation::http::endpoints::root::{ApiState, endpoints},
    telemetry::init_logging,
};

#[main]
async fn main() -> Result<(), Error> {
    let config = Config::try_parse().map_err(Error::other)?;
    init_logging(&config.log_level, &config.log_format).map_err(Error::other)?;

    let gateway: Arc<dyn MessageGateway> = match &config.gateway {
        GatewayConfig::Simulated(simulated) => {
            tracing::warn!("mock mode active, no real messages will be sent");
            SimulatedGateway::new(*simulated)
        }
        GatewayConfig::GreenApi(green) => GreenApiClient::new(green.clone()).map_err(Error::other)?,
    };

    let state = ApiState {
        auth_usecase: Arc::new(AuthenticateOperatorUseCase::new(
            config.operator.clone(),
            config.jwt.clone(),
        )),
        list_countries_usecase: Arc::new(ListCountriesUseCase::new(Arc::new(
            StaticCountryDirectory::new(),
        ))),
        dispatch_usecase: Arc::new(DispatchMessagesUseCase::new(
            AttemptExecutor::new(gateway, config.send_timeout),
            Arc::new(ActiveRuns::new()),
        )),
        jwt: JwtService::new(config.jwt.clone()),
        mock_mode: config.mock_mode(),
    };

    let server_url = format!("{}://{}:{}", config.scheme, config.host, config.port);

    tracing::info!(%server_url, mock_mode = config.mock_mode(), "starting server");

    let api_service = OpenApiService::new(endpoints(state), "WhatsBlaster API", "0.1.0")
        .server(format!("{}/api", server_url));
    let ui = api_service.swagger_ui();
    let app = Route::new()
        .nest("/api", api_service)
        .nest("/", ui)
        .with(Tracing);

    Server::new(TcpListener::bind(format!("{}:{}", config.host, config.port)))
        .run(app)
        .await
}
