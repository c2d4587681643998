//! Builder for the HTTP state shared by every worker.

use std::sync::Arc;

use actix_web::web;

use users_api::domain::UserService;
use users_api::domain::ports::{UsersCommand, UsersQuery};
use users_api::inbound::http::state::HttpState;
use users_api::outbound::persistence::{DbPool, DieselUserRepository};

/// Wire the Diesel repository into the user service and expose it through
/// both driving ports.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let service = Arc::new(UserService::new(Arc::new(DieselUserRepository::new(
        pool.clone(),
    ))));
    let users: Arc<dyn UsersQuery> = service.clone();
    let users_command: Arc<dyn UsersCommand> = service;
    web::Data::new(HttpState::new(users, users_command))
}
