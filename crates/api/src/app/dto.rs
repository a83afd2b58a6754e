use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use opea_clientes::{Cliente, NOME_EMPRESA_MAX_LEN, PorteEmpresa};
use opea_core::ClienteId;
use opea_infra::ClienteDto;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/clientes` and `PUT /api/clientes/{id}`.
///
/// Fields stay loosely typed here so that a missing or malformed value is
/// reported as a validation failure rather than a generic JSON rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteRequest {
    pub nome_empresa: Option<String>,
    pub porte_empresa: Option<JsonValue>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidClienteRequest {
    pub nome_empresa: String,
    pub porte_empresa: PorteEmpresa,
}

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl ClienteRequest {
    /// Apply every rule and report all failures at once.
    pub fn validate(self) -> Result<ValidClienteRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let nome_empresa = match self.nome_empresa {
            Some(nome) if nome.trim().is_empty() => {
                errors.push(FieldError::new("nomeEmpresa", "nomeEmpresa is required"));
                None
            }
            Some(nome) if nome.chars().count() > NOME_EMPRESA_MAX_LEN => {
                errors.push(FieldError::new(
                    "nomeEmpresa",
                    format!("nomeEmpresa must be at most {NOME_EMPRESA_MAX_LEN} characters"),
                ));
                None
            }
            Some(nome) => Some(nome),
            None => {
                errors.push(FieldError::new("nomeEmpresa", "nomeEmpresa is required"));
                None
            }
        };

        let porte_empresa = match self.porte_empresa.as_ref().map(parse_porte) {
            Some(Some(porte)) => Some(porte),
            Some(None) => {
                errors.push(FieldError::new(
                    "porteEmpresa",
                    "porteEmpresa must be one of Pequena, Media, Grande (or 1, 2, 3)",
                ));
                None
            }
            None => {
                errors.push(FieldError::new("porteEmpresa", "porteEmpresa is required"));
                None
            }
        };

        match (nome_empresa, porte_empresa) {
            (Some(nome_empresa), Some(porte_empresa)) if errors.is_empty() => Ok(ValidClienteRequest {
                nome_empresa,
                porte_empresa,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_porte(value: &JsonValue) -> Option<PorteEmpresa> {
    match value {
        JsonValue::String(name) => name.parse().ok(),
        JsonValue::Number(n) => n.as_i64().and_then(PorteEmpresa::from_code),
        _ => None,
    }
}

/// Parse the `{id}` path segment (must be a non-nil UUID).
pub fn parse_cliente_id(raw: &str) -> Result<ClienteId, FieldError> {
    raw.parse::<ClienteId>()
        .map_err(|_| FieldError::new("id", "id must be a non-empty UUID"))
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteResponse {
    pub id: ClienteId,
    pub nome_empresa: String,
    pub porte_empresa: PorteEmpresa,
}

impl From<&Cliente> for ClienteResponse {
    fn from(cliente: &Cliente) -> Self {
        Self {
            id: cliente.id_typed(),
            nome_empresa: cliente.nome_empresa().to_string(),
            porte_empresa: cliente.porte_empresa(),
        }
    }
}

impl From<ClienteDto> for ClienteResponse {
    fn from(dto: ClienteDto) -> Self {
        Self {
            id: dto.id,
            nome_empresa: dto.nome_empresa,
            porte_empresa: dto.porte_empresa,
        }
    }
}
