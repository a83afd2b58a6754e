//! Clientes domain module (customer/company records).
//!
//! This crate contains the business rules for a cliente, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod cliente;

pub use cliente::{Cliente, PorteEmpresa, NOME_EMPRESA_MAX_LEN};
