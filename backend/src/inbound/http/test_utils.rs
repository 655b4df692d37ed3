//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::routing::{configure, not_found};
use crate::inbound::http::state::HttpState;

/// Build the full application around `state`, as the server does.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(HealthState::new()))
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(not_found))
}
