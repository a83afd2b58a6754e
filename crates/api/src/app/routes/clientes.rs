use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use opea_infra::handlers::{CreateCliente, DeleteCliente, GetAllClientes, GetClienteById, UpdateCliente};

use crate::app::dto::{self, ClienteRequest, ClienteResponse};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_clientes).post(create_cliente))
        .route(
            "/:id",
            get(get_cliente).put(update_cliente).delete(delete_cliente),
        )
}

pub async fn create_cliente(
    Extension(services): Extension<AppServices>,
    body: Result<Json<ClienteRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match read_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };

    let cmd = CreateCliente {
        nome_empresa: body.nome_empresa,
        porte_empresa: body.porte_empresa,
    };

    match services.handlers().create(cmd).await {
        Ok(cliente) => {
            let location = format!("/api/clientes/{}", cliente.id_typed());
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(ClienteResponse::from(&cliente)),
            )
                .into_response()
        }
        Err(e) => errors::handler_error_to_response(e),
    }
}

pub async fn update_cliente(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
    body: Result<Json<ClienteRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match dto::parse_cliente_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.message),
    };
    let body = match read_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };

    let cmd = UpdateCliente {
        id,
        nome_empresa: body.nome_empresa,
        porte_empresa: body.porte_empresa,
    };

    match services.handlers().update(cmd).await {
        Ok(cliente) => (StatusCode::OK, Json(ClienteResponse::from(&cliente))).into_response(),
        Err(e) => errors::handler_error_to_response(e),
    }
}

pub async fn delete_cliente(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_cliente_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.message),
    };

    match services.handlers().delete(DeleteCliente { id }).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::handler_error_to_response(e),
    }
}

pub async fn list_clientes(Extension(services): Extension<AppServices>) -> axum::response::Response {
    match services.handlers().get_all(GetAllClientes).await {
        Ok(items) => {
            let items = items.into_iter().map(ClienteResponse::from).collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::handler_error_to_response(e),
    }
}

pub async fn get_cliente(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_cliente_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.message),
    };

    match services.handlers().get_by_id(GetClienteById { id }).await {
        Ok(Some(dto)) => (StatusCode::OK, Json(ClienteResponse::from(dto))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "cliente not found"),
        Err(e) => errors::handler_error_to_response(e),
    }
}

/// Unwrap a JSON body and run request validation.
fn read_body(
    body: Result<Json<ClienteRequest>, JsonRejection>,
) -> Result<dto::ValidClienteRequest, axum::response::Response> {
    let Json(body) = body.map_err(|rejection| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_json", rejection.body_text())
    })?;
    body.validate().map_err(errors::validation_errors)
}
